use crate::db::DbPool;
use crate::models::{CarMake, CarModel, CarType};
use anyhow::Result;
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Counts the car makes in the catalog
///
/// Used by the cars handler to decide whether seeding is needed.
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool))]
pub fn car_make_count(pool: &DbPool) -> Result<i64> {
    let conn = &mut pool.get()?;

    let count = crate::schema::car_makes::table
        .count()
        .get_result(conn)?;

    Ok(count)
}

/// Creates a new car make in the catalog
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `name` - The manufacturer name
/// * `description` - A short description of the manufacturer
///
/// ### Returns
///
/// A Result containing the newly created CarMake if successful
#[instrument(skip(pool, description), fields(name = %name))]
pub fn create_car_make(pool: &DbPool, name: String, description: String) -> Result<CarMake> {
    debug!("Creating new car make");

    let conn = &mut pool.get()?;

    let new_make = CarMake::new(name, description);

    diesel::insert_into(crate::schema::car_makes::table)
        .values(new_make.clone())
        .execute(conn)?;

    info!("Successfully created car make with id: {}", new_make.get_id());

    Ok(new_make)
}

/// Creates a new car model under an existing make
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `car_make_id` - The ID of the make the model belongs to
/// * `name` - The model name
/// * `car_type` - The body style
/// * `year` - The model year, validated by [`CarModel::new`]
///
/// ### Errors
///
/// Returns an error if:
/// - The year is outside the supported range
/// - The referenced make does not exist (foreign key violation)
/// - Unable to get a connection from the pool, or the insert fails
#[instrument(skip(pool), fields(car_make_id = %car_make_id, name = %name))]
pub fn create_car_model(
    pool: &DbPool,
    car_make_id: &str,
    name: String,
    car_type: CarType,
    year: i32,
) -> Result<CarModel> {
    debug!("Creating new car model");

    let conn = &mut pool.get()?;

    let new_model = CarModel::new(car_make_id.to_string(), name, car_type, year)?;

    diesel::insert_into(crate::schema::car_models::table)
        .values(new_model.clone())
        .execute(conn)?;

    info!("Successfully created car model with id: {}", new_model.get_id());

    Ok(new_model)
}

/// Retrieves all car models joined with their makes
///
/// ### Returns
///
/// A Result containing every (CarModel, CarMake) pair in the catalog.
/// No pagination, no filtering.
#[instrument(skip(pool))]
pub fn list_cars_with_makes(pool: &DbPool) -> Result<Vec<(CarModel, CarMake)>> {
    debug!("Listing all car models with their makes");

    let conn = &mut pool.get()?;

    let result = crate::schema::car_models::table
        .inner_join(crate::schema::car_makes::table)
        .select((CarModel::as_select(), CarMake::as_select()))
        .load::<(CarModel, CarMake)>(conn)?;

    info!("Retrieved {} car models", result.len());

    Ok(result)
}
