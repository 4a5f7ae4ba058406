//! Database seeder for Sarraf development and testing.
//!
//! Seeds two demo clients (password: `password123`), their USD accounts,
//! and the default exchange rates.
//!
//! Usage: cargo run --bin seeder

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use sarraf_core::auth::hash_password;
use sarraf_db::entities::{accounts, clients};
use sarraf_db::repositories::ExchangeRateRepository;

/// Demo client IDs (consistent for all seeds)
const DEMO_CLIENTS: [(&str, &str, &str); 2] = [
    (
        "00000000-0000-0000-0000-000000000001",
        "demo_ahmed",
        "Ahmed Hashem",
    ),
    (
        "00000000-0000-0000-0000-000000000002",
        "demo_layla",
        "Layla Nasser",
    ),
];

/// Opening USD balance for demo clients.
const OPENING_USD_CENTS: i64 = 1_000_00;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = sarraf_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo clients...");
    seed_demo_clients(&db).await;

    println!("Seeding exchange rates...");
    seed_exchange_rates(&db).await;

    println!("Seeding complete!");
}

/// Seeds the demo clients with funded USD accounts.
async fn seed_demo_clients(db: &DatabaseConnection) {
    for (id, username, name) in DEMO_CLIENTS {
        let client_id = Uuid::parse_str(id).unwrap();

        if clients::Entity::find_by_id(client_id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Client {username} already exists, skipping...");
            continue;
        }

        let password_hash = hash_password("password123").expect("Failed to hash password");

        let client = clients::ActiveModel {
            id: Set(client_id),
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        if let Err(e) = client.insert(db).await {
            eprintln!("Failed to insert client {username}: {e}");
            continue;
        }

        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(client_id),
            currency: Set("USD".to_string()),
            balance: Set(Decimal::new(OPENING_USD_CENTS, 2)),
        };

        if let Err(e) = account.insert(db).await {
            eprintln!("Failed to insert USD account for {username}: {e}");
        } else {
            println!("  Created client {username} with 1000.00 USD");
        }
    }
}

/// Installs the default exchange rates if the table is empty.
async fn seed_exchange_rates(db: &DatabaseConnection) {
    let repo = ExchangeRateRepository::new(db.clone());

    match repo.seed_defaults().await {
        Ok(true) => println!("  Default exchange rates installed"),
        Ok(false) => println!("  Exchange rates already present, skipping..."),
        Err(e) => eprintln!("Failed to seed exchange rates: {e}"),
    }
}
