//! Catalog HTTP API (impure shell).
//!
//! [`CatalogBackend`] is the seam the runtime talks to; [`CatalogClient`] is
//! the `reqwest` implementation. Tests substitute an in-memory backend.

pub mod client;

pub use client::CatalogClient;

use crate::model::error::FetchError;
use crate::model::plant::{NewPlant, Plant, PlantPage};
use async_trait::async_trait;

/// Errors from the catalog REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Request(e) if e.is_decode() => FetchError::Decode(e.to_string()),
            ApiError::Request(e) => FetchError::Transport(e.to_string()),
            ApiError::Status { status, body } => FetchError::Status { status, body },
        }
    }
}

/// Operations the catalog core needs from the server.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// `GET /api/plants` with the given query parameters.
    async fn list_plants(&self, params: &[(&'static str, String)]) -> Result<PlantPage, FetchError>;

    /// `GET /api/plants/categories/all`.
    async fn categories(&self) -> Result<Vec<String>, FetchError>;

    /// `POST /api/plants`.
    async fn create_plant(&self, plant: &NewPlant) -> Result<Plant, FetchError>;
}
