mod classifier;
mod config;
mod groups;
mod model;
mod seeder;
mod sheet;
mod storage;
mod utils;

use config::{AppConfig, load_config};
use groups::group_definitions;
use model::SeedError;
use sheet::{SheetReader, XlsxSheetReader};
use storage::SqliteStorage;
use tracing::{error, info};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    info!("🌱 Starting seed...");

    // Load configuration from file (missing file falls back to defaults)
    let config: AppConfig = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize storage (SQLite)
    let storage = match SqliteStorage::new(&config.db_path) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize storage: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config, &storage) {
        error!("Seed failed: {}", e);
        std::process::exit(1);
    }
}

/// Performs the whole pass: admin provisioning, sheet load, seeding, summary.
fn run(config: &AppConfig, storage: &SqliteStorage) -> Result<(), SeedError> {
    seeder::provision_admin(storage)?;

    let reader = XlsxSheetReader::new(config.excel_path.clone());
    let rows = reader.load_rows()?;
    info!("📊 Parsed {} rows from Excel", rows.len());

    let groups = group_definitions();
    let summary = seeder::run(storage, &rows, &groups)?;

    let (categories, brands, products) = storage.counts()?;
    info!(
        "🎉 Seed complete! {} products created, {} skipped. Totals: {} categories, {} brands, {} products.",
        summary.products_created, summary.products_skipped, categories, brands, products
    );
    Ok(())
}
