//! # tokmeter-server
//!
//! Minimal JSON API over `tokmeter-core`:
//! - `GET /health` - liveness probe
//! - `POST /api/calculate` - count tokens for text + model
//! - `GET /api/models` - supported models grouped by backend family
//!
//! Responses carry restrictive CORS and security headers; internal error
//! text is logged server-side and never forwarded to clients.

mod error;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::app;
pub use state::AppState;
