//! Registrar command line.
//!
//! Loads a seed file into an in-memory registry, replaying every enrollment
//! through the enrollment rules, then prints each student's transcript as
//! JSON.
//!
//! Usage: registrar [SEED_PATH]

mod seed;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use registrar_core::enrollment::{EnrollmentService, StudentReport};
use registrar_db::InMemoryRegistry;
use registrar_shared::{AppConfig, AppError, AppResult};

use crate::seed::{RegistryService, SeedFile};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let seed_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(&config.registry.seed_path), PathBuf::from);

    let registry = Arc::new(InMemoryRegistry::new());
    let service = EnrollmentService::new(registry.clone(), registry.clone(), registry.clone());

    let summary = SeedFile::from_path(&seed_path)
        .and_then(|seed| seed.apply(&registry, &service))
        .map_err(AppError::from)?;
    info!(
        path = %seed_path.display(),
        students = summary.students,
        courses = summary.courses,
        registered = summary.registered,
        graded = summary.graded,
        "Seed loaded"
    );

    let reports = transcripts(&registry, &service)?;
    let output = if config.registry.pretty {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };
    println!("{output}");

    Ok(())
}

/// One transcript per registered student, in index order.
fn transcripts(
    registry: &InMemoryRegistry,
    service: &RegistryService,
) -> AppResult<Vec<StudentReport>> {
    registry
        .list_students()
        .iter()
        .map(|student| {
            service
                .generate_report(&student.index_number)
                .map_err(AppError::from)
        })
        .collect()
}
