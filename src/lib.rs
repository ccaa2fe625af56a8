pub mod config;
pub mod email;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod rate_limit;
pub mod routes;
pub mod sanitize;
pub mod server;

pub use config::Config;
pub use routes::AppState;
