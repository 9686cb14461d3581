//! # Expense Tracker Backend
//!
//! Contains all non-UI logic for the expense tracker.
//!
//! This crate brings together:
//! - **Domain**: amortization, monthly aggregation and the expense/account services
//! - **Storage**: SQLite persistence behind repository traits
//! - **IO**: the REST API consumed by the web frontend
//!
//! ## Architecture
//!
//! ```text
//! Web frontend
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (aggregation core, services)
//!     ↓
//! Storage Layer (SQLite)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::Config;
use crate::domain::{AccountService, ExpenseService};
use crate::io::rest::{account_apis, expense_apis};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService<DbConnection>,
    pub expense_service: ExpenseService<DbConnection>,
}

impl AppState {
    pub fn new(db: Arc<DbConnection>, config: &Config) -> Self {
        let account_service = AccountService::new(db.clone());
        let expense_service = ExpenseService::new(
            db,
            account_service.clone(),
            config.installment_strategy.strategy(),
        );

        Self {
            account_service,
            expense_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    info!(
        "Setting up domain services (installment strategy: {:?})",
        config.installment_strategy
    );
    Ok(AppState::new(Arc::new(db), config))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &Config) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", config.cors_origin))?;

    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(account_apis::router())
        .merge(expense_apis::router());

    let mut router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api", api_routes);

    if let Some(static_dir) = &config.static_dir {
        info!("Serving static files from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    Ok(router.layer(cors).with_state(app_state))
}
