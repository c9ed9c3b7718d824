use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a car manufacturer in the reference catalog
///
/// Car makes are written once by the seeding routine and are read-only at
/// runtime.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::car_makes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CarMake {
    /// Unique identifier for the car make (UUID v4 as string)
    id: String,

    /// The manufacturer name, e.g. "Audi"
    name: String,

    /// A short marketing description of the manufacturer
    description: String,

    /// When this car make was created
    created_at: NaiveDateTime,
}

impl CarMake {
    /// Creates a new car make
    ///
    /// ### Arguments
    ///
    /// * `name` - The manufacturer name
    /// * `description` - A short description of the manufacturer
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            created_at: Utc::now().naive_utc(),
        }
    }

    /// Gets the car make's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the manufacturer name
    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    /// Gets the manufacturer description
    pub fn get_description(&self) -> String {
        self.description.clone()
    }

    /// Gets the creation timestamp as a DateTime<Utc>
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_make_new() {
        let make = CarMake::new("Audi".to_string(), "German luxury brand".to_string());

        assert_eq!(make.get_name(), "Audi");
        assert_eq!(make.get_description(), "German luxury brand");
        assert!(Uuid::parse_str(&make.get_id()).is_ok());

        // Ensure created_at is within the last second
        let diff = Utc::now().signed_duration_since(make.get_created_at());
        assert!(diff.num_seconds() < 1);
    }
}
