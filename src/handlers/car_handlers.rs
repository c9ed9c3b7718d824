use axum::{Json, extract::State};
use tracing::{debug, info, instrument};

use crate::AppState;
use crate::dto::{CarEntry, CarsResponse};
use crate::errors::ApiError;
use crate::repo;
use crate::seed;

/// Handler for the car catalog listing
///
/// This function handles GET requests to `/cars`.
///
/// If the catalog has never been populated, it is seeded first; the seeding
/// runs in one transaction, so concurrent first requests cannot produce a
/// partial catalog. The response is every model joined with its make.
#[instrument(skip(state))]
pub async fn get_cars_handler(
    State(state): State<AppState>,
) -> Result<Json<CarsResponse>, ApiError> {
    debug!("Retrieving car catalog");

    if repo::car_make_count(&state.pool).map_err(ApiError::Database)? == 0 {
        info!("Car catalog empty, seeding reference data");
        seed::seed_reference_data(&state.pool).map_err(ApiError::Database)?;
    }

    let cars = repo::list_cars_with_makes(&state.pool).map_err(ApiError::Database)?;

    let car_models = cars
        .into_iter()
        .map(|(model, make)| CarEntry {
            car_model: model.get_name(),
            car_make: make.get_name(),
        })
        .collect();

    Ok(Json(CarsResponse { car_models }))
}
