//! Development seed data.
//!
//! Inserts a handful of dog subscriptions so the batch-planning endpoints
//! have something to aggregate locally: a mix of single- and multi-recipe
//! dogs, a test-flagged account for the customer filter, and one dog with
//! no recipe selected to exercise the skip-with-warning path.

use chrono::NaiveDate;
use sqlx::PgPool;

use super::migrate::MigrationError;

struct SeedDog {
    dog_name: &'static str,
    customer_email: &'static str,
    is_test: bool,
    recipes: &'static [&'static str],
    daily_grams: f64,
    meals_per_day: i32,
}

const SEED_DOGS: &[SeedDog] = &[
    SeedDog {
        dog_name: "Biscuit",
        customer_email: "sam@example.com",
        is_test: false,
        recipes: &["Beef & Quinoa Harvest"],
        daily_grams: 320.0,
        meals_per_day: 2,
    },
    SeedDog {
        dog_name: "Rex",
        customer_email: "jordan@example.com",
        is_test: false,
        recipes: &["Beef & Quinoa Harvest", "Chicken & Garden Veggie"],
        daily_grams: 540.0,
        meals_per_day: 2,
    },
    SeedDog {
        dog_name: "Luna",
        customer_email: "casey@example.com",
        is_test: false,
        recipes: &["Turkey & Brown Rice Comfort"],
        daily_grams: 260.0,
        meals_per_day: 3,
    },
    SeedDog {
        dog_name: "Peanut",
        customer_email: "alex@example.com",
        is_test: false,
        recipes: &["Chicken & Garden Veggie"],
        daily_grams: 160.0,
        meals_per_day: 2,
    },
    SeedDog {
        dog_name: "Moose",
        customer_email: "riley@example.com",
        is_test: false,
        recipes: &["Beef & Quinoa Harvest", "Turkey & Brown Rice Comfort"],
        daily_grams: 780.0,
        meals_per_day: 2,
    },
    SeedDog {
        dog_name: "Pixel",
        customer_email: "qa@freshpaw.dog",
        is_test: true,
        recipes: &["Beef & Quinoa Harvest"],
        daily_grams: 400.0,
        meals_per_day: 2,
    },
    SeedDog {
        dog_name: "Waffles",
        customer_email: "morgan@example.com",
        is_test: false,
        recipes: &[],
        daily_grams: 300.0,
        meals_per_day: 2,
    },
];

/// Seed the admin database with development data.
///
/// Refuses to run against a database that already has subscriptions - this
/// is a development convenience, not an import tool.
///
/// # Errors
///
/// Returns `MigrationError` if the connection or an insert fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MigrationError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    let pool = PgPool::connect(&database_url).await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dog_subscriptions")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        tracing::warn!(existing, "dog_subscriptions is not empty; skipping seed");
        return Ok(());
    }

    let active_from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default();
    for dog in SEED_DOGS {
        insert_dog(&pool, dog, active_from).await?;
    }

    tracing::info!(count = SEED_DOGS.len(), "Seeded dog subscriptions");
    Ok(())
}

async fn insert_dog(
    pool: &PgPool,
    dog: &SeedDog,
    active_from: NaiveDate,
) -> Result<(), MigrationError> {
    sqlx::query(
        r"
        INSERT INTO dog_subscriptions (
            dog_name, customer_email, is_test, recipes,
            daily_grams, meals_per_day, active_from
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(dog.dog_name)
    .bind(dog.customer_email)
    .bind(dog.is_test)
    .bind(sqlx::types::Json(dog.recipes))
    .bind(dog.daily_grams)
    .bind(dog.meals_per_day)
    .bind(active_from)
    .execute(pool)
    .await?;

    Ok(())
}
