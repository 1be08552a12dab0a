pub mod auth;
pub mod insights;
pub mod journal;
pub mod middleware;
pub mod moods;
pub mod privacy;
pub mod resources;
pub mod routes;
pub mod strategies;
pub mod support;

mod records;

pub use auth::{AppState, AppStateInner};
pub use routes::router;
