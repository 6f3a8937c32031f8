//! linkd HTTP API
//!
//! The intake boundary of the service, built on Axum.
//!
//! # Endpoints
//!
//! - `POST /links` - submit a batch of link strings; returns `201 Created`
//!   with the persisted record `{"links": {link: status}, "links_num": id}`.
//! - `GET /health` - liveness check.
//!
//! # Usage
//!
//! ```ignore
//! use linkd_api::{build_router, AppState};
//!
//! let state = AppState::new(processor, shutdown_token, request_timeout);
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse, Result};
pub use routes::{build_router, HealthResponse, ProcessLinksRequest};
pub use state::AppState;
