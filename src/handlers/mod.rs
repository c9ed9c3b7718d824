/// Web API Handlers
///
/// This module contains the handlers for the RESTful API endpoints.
/// Each handler is responsible for processing a specific type of HTTP request,
/// extracting the necessary data, calling the appropriate repository functions
/// or outbound clients, and returning a properly formatted response.

mod auth_handlers;
mod car_handlers;
mod dealer_handlers;

// Re-export all handlers
pub use auth_handlers::*;
pub use car_handlers::*;
pub use dealer_handlers::*;
