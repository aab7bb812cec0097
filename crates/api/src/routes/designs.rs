//! Routes for the design generation proxy and gallery listing.
//!
//! ```text
//! POST /designs/generate    generate_design
//! GET  /designs             list_designs
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::designs;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/designs/generate", post(designs::generate_design))
        .route("/designs", get(designs::list_designs))
}
