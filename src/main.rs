use guestdesk_backend::api::{AccountsApi, HealthApi, LogsApi, UsersApi};
use guestdesk_backend::config::{init_logging, DatabaseConnections, Settings};
use guestdesk_backend::AppData;
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let settings = Settings::from_env().expect("Failed to load settings");
    tracing::info!("Settings loaded: {settings:?}");

    let connections = DatabaseConnections::init(&settings)
        .await
        .expect("Failed to connect to databases");
    connections
        .migrate()
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    let app_data = Arc::new(AppData::init(connections, settings.clone()));

    let health_api = HealthApi::new(app_data.clone());
    let accounts_api = AccountsApi::new(app_data.clone());
    let users_api = UsersApi::new(app_data.clone());
    let logs_api = LogsApi::new(app_data.clone());

    let api_service = OpenApiService::new(
        (health_api, accounts_api, users_api, logs_api),
        "Guest Account Service",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", settings.server_address()));

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    let address = settings.server_address();
    tracing::info!("Starting server on http://{address}");
    tracing::info!("Swagger UI available at http://{address}/swagger");

    Server::new(TcpListener::bind(address)).run(app).await
}
