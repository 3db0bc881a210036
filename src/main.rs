use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;

use todo_api::api;
use todo_api::config::{Config, Storage};
use todo_api::repository::database::Database;
use todo_api::repository::memory::MemoryDatabase;
use todo_api::repository::TodoRepository;
use todo_api::service::todo_service::TodoService;
use todo_api::telemetry;

fn repository(config: &Config) -> anyhow::Result<Arc<dyn TodoRepository>> {
    match config.storage {
        Storage::Postgres => {
            let database = Database::new(config).context("failed to connect to the database")?;
            Ok(Arc::new(database))
        }
        Storage::Memory => Ok(Arc::new(MemoryDatabase::new())),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init(&config.app_name)?;

    let service = TodoService::new(repository(&config)?);
    let app_data = web::Data::new(service);

    tracing::info!(
        host = %config.host,
        port = config.port,
        storage = ?config.storage,
        "starting todo api"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .configure(api::api::config)
            .service(api::healthcheck)
            .default_service(web::route().to(api::not_found))
            .wrap(actix_web::middleware::Logger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}
