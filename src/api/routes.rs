use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers;
use crate::host::HostClient;

pub fn create_router<H: HostClient + 'static>() -> Router<Arc<H>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Catalogue resolution
        .route("/catalogues/:catalogue_id", get(handlers::get_catalogue::<H>))
        // Spec evolution
        .route(
            "/catalogues/:catalogue_id/interfaces/:interface_name",
            get(handlers::get_interface_evolution::<H>),
        )
        .route(
            "/catalogues/:catalogue_id/interfaces/:interface_name/summary",
            get(handlers::get_interface_summary::<H>),
        )
}
