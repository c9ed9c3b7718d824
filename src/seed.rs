/// Reference data seeding
///
/// Populates the car catalog the first time it is found empty. The whole
/// batch runs in a single transaction so a half-seeded catalog can never be
/// observed.

use crate::db::DbPool;
use crate::models::{CarMake, CarModel, CarType};
use anyhow::Result;
use diesel::prelude::*;
use tracing::{info, instrument};

/// The built-in catalog: manufacturer, description, models (name, body style, year)
const CATALOG: &[(&str, &str, &[(&str, CarType, i32)])] = &[
    (
        "NISSAN",
        "Great cars. Japanese technology",
        &[
            ("Pathfinder", CarType::Suv, 2023),
            ("Qashqai", CarType::Suv, 2023),
            ("XTRAIL", CarType::Suv, 2023),
        ],
    ),
    (
        "Mercedes",
        "Great cars. German technology",
        &[
            ("A-Class", CarType::Suv, 2023),
            ("C-Class", CarType::Suv, 2023),
            ("E-Class", CarType::Suv, 2023),
        ],
    ),
    (
        "Audi",
        "Great cars. German technology",
        &[
            ("A4", CarType::Suv, 2023),
            ("A5", CarType::Suv, 2023),
            ("A6", CarType::Suv, 2023),
        ],
    ),
    (
        "Kia",
        "Great cars. Korean technology",
        &[
            ("Sorrento", CarType::Suv, 2023),
            ("Carnival", CarType::Suv, 2023),
            ("Cerato", CarType::Sedan, 2023),
        ],
    ),
    (
        "Toyota",
        "Great cars. Japanese technology",
        &[
            ("Corolla", CarType::Sedan, 2023),
            ("Camry", CarType::Sedan, 2023),
            ("Kluger", CarType::Suv, 2023),
        ],
    ),
];

/// Seeds the car catalog with the built-in makes and models
///
/// ### Errors
///
/// Returns an error if a connection cannot be obtained or any insert fails;
/// in that case the transaction rolls back and the catalog stays empty.
#[instrument(skip(pool))]
pub fn seed_reference_data(pool: &DbPool) -> Result<()> {
    let conn = &mut pool.get()?;

    conn.transaction::<_, anyhow::Error, _>(|conn| {
        for (make_name, description, models) in CATALOG {
            let make = CarMake::new(make_name.to_string(), description.to_string());
            diesel::insert_into(crate::schema::car_makes::table)
                .values(make.clone())
                .execute(conn)?;

            for (model_name, car_type, year) in *models {
                let model =
                    CarModel::new(make.get_id(), model_name.to_string(), *car_type, *year)?;
                diesel::insert_into(crate::schema::car_models::table)
                    .values(model)
                    .execute(conn)?;
            }
        }
        Ok(())
    })?;

    info!("Seeded car catalog with {} makes", CATALOG.len());

    Ok(())
}
