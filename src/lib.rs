//! SQLite gateway: static files, SQL over HTTP, a CORS-free reverse proxy, and an optional
//! declarative API mapping paths to SQL.

pub mod browser;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{load_api, resolve, ApiDescription, ResolvedApi};
pub use error::{AppError, ConfigError};
pub use routes::{app, common_routes, gateway_routes};
pub use server::run;
pub use service::QueryService;
pub use settings::Settings;
pub use state::AppState;
pub use store::open_database;
