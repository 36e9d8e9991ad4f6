//! Web module: HTTP server for the dashboard.
//!
//! Provides:
//! - The dashboard page (form, buttons, chart)
//! - JSON endpoints for the fill and predict actions
//! - Static assets (favicon, stylesheet)

mod error;
mod handlers;
mod page;
mod server;
mod state;

pub use error::ServerError;
pub use handlers::{FillRequest, FillResponse, PredictRequest, PredictResponse};
pub use page::render_page;
pub use server::{router, serve};
pub use state::AppState;
