use chrono::{NaiveDateTime, Utc};
use diesel::deserialize::{FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::serialize;
use diesel::serialize::{IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::{Sqlite, SqliteValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Earliest model year accepted by the catalog
pub const MIN_YEAR: i32 = 2015;

/// Latest model year accepted by the catalog
pub const MAX_YEAR: i32 = 2024;

/// The body style of a car model
///
/// Stored as a TEXT column holding the upper-case variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarType {
    Sedan,
    Suv,
    Wagon,
}

impl CarType {
    /// Returns the database/wire representation of the car type
    pub fn as_str(&self) -> &'static str {
        match self {
            CarType::Sedan => "SEDAN",
            CarType::Suv => "SUV",
            CarType::Wagon => "WAGON",
        }
    }

    /// Parses a car type from its database/wire representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SEDAN" => Some(CarType::Sedan),
            "SUV" => Some(CarType::Suv),
            "WAGON" => Some(CarType::Wagon),
            _ => None,
        }
    }
}

impl FromSql<Text, Sqlite> for CarType {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        CarType::parse(&text).ok_or_else(|| format!("unknown car type: {}", text).into())
    }
}

impl ToSql<Text, Sqlite> for CarType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

/// Error returned when a car model is created with a year outside the
/// supported range
#[derive(Error, Debug, PartialEq, Eq)]
#[error("year {0} outside supported range {MIN_YEAR}..={MAX_YEAR}")]
pub struct InvalidYear(pub i32);

/// Represents a car model in the reference catalog
///
/// Every model belongs to exactly one [`CarMake`](crate::models::CarMake);
/// the foreign key is enforced by the schema. The model year is validated at
/// construction time, so no out-of-range row can ever be written.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::car_models)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CarModel {
    /// Unique identifier for the car model (UUID v4 as string)
    id: String,

    /// The ID of the car make this model belongs to
    car_make_id: String,

    /// The model name, e.g. "Pathfinder"
    name: String,

    /// The body style of this model
    car_type: CarType,

    /// The model year, within [`MIN_YEAR`]..=[`MAX_YEAR`]
    year: i32,

    /// When this car model was created
    created_at: NaiveDateTime,
}

impl CarModel {
    /// Creates a new car model
    ///
    /// ### Arguments
    ///
    /// * `car_make_id` - The ID of the make this model belongs to
    /// * `name` - The model name
    /// * `car_type` - The body style
    /// * `year` - The model year
    ///
    /// ### Errors
    ///
    /// Returns [`InvalidYear`] if `year` falls outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(
        car_make_id: String,
        name: String,
        car_type: CarType,
        year: i32,
    ) -> Result<Self, InvalidYear> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(InvalidYear(year));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            car_make_id,
            name,
            car_type,
            year,
            created_at: Utc::now().naive_utc(),
        })
    }

    /// Gets the car model's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the ID of the make this model belongs to
    pub fn get_car_make_id(&self) -> String {
        self.car_make_id.clone()
    }

    /// Gets the model name
    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    /// Gets the body style
    pub fn get_car_type(&self) -> CarType {
        self.car_type
    }

    /// Gets the model year
    pub fn get_year(&self) -> i32 {
        self.year
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_model_new() {
        let model = CarModel::new(
            "make-id".to_string(),
            "Pathfinder".to_string(),
            CarType::Suv,
            2023,
        )
        .unwrap();

        assert_eq!(model.get_car_make_id(), "make-id");
        assert_eq!(model.get_name(), "Pathfinder");
        assert_eq!(model.get_car_type(), CarType::Suv);
        assert_eq!(model.get_year(), 2023);
        assert!(Uuid::parse_str(&model.get_id()).is_ok());
    }

    #[test]
    fn test_car_model_rejects_out_of_range_year() {
        let too_old = CarModel::new(
            "make-id".to_string(),
            "Old Timer".to_string(),
            CarType::Sedan,
            2014,
        );
        assert_eq!(too_old.unwrap_err(), InvalidYear(2014));

        let too_new = CarModel::new(
            "make-id".to_string(),
            "Concept".to_string(),
            CarType::Wagon,
            2025,
        );
        assert_eq!(too_new.unwrap_err(), InvalidYear(2025));
    }

    #[test]
    fn test_car_type_round_trip() {
        for car_type in [CarType::Sedan, CarType::Suv, CarType::Wagon] {
            assert_eq!(CarType::parse(car_type.as_str()), Some(car_type));
        }
        assert_eq!(CarType::parse("COUPE"), None);
    }

    #[test]
    fn test_car_type_serde_representation() {
        assert_eq!(serde_json::to_string(&CarType::Suv).unwrap(), "\"SUV\"");
        let parsed: CarType = serde_json::from_str("\"WAGON\"").unwrap();
        assert_eq!(parsed, CarType::Wagon);
    }
}
