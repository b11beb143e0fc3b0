//! REST client for the plant catalog HTTP endpoints.
//!
//! Wraps `GET /api/plants`, `GET /api/plants/categories/all` and
//! `POST /api/plants` using [`reqwest`].

use crate::api::{ApiError, CatalogBackend};
use crate::model::error::FetchError;
use crate::model::plant::{DataEnvelope, NewPlant, Plant, PlantPage};
use async_trait::async_trait;
use std::time::Duration;

const PLANTS_PATH: &str = "/api/plants";
const CATEGORIES_PATH: &str = "/api/plants/categories/all";

/// HTTP client for one catalog server.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5001`).
    ///
    /// `timeout` bounds each request end to end.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Server origin requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the listing request without sending it.
    pub fn list_request(&self, params: &[(&'static str, String)]) -> Result<reqwest::Request, ApiError> {
        Ok(self
            .client
            .get(self.url(PLANTS_PATH))
            .query(params)
            .build()?)
    }

    /// Build the create request without sending it.
    pub fn create_request(&self, plant: &NewPlant) -> Result<reqwest::Request, ApiError> {
        Ok(self
            .client
            .post(self.url(PLANTS_PATH))
            .json(plant)
            .build()?)
    }

    /// Fetch one page of plants.
    pub async fn fetch_plants(&self, params: &[(&'static str, String)]) -> Result<PlantPage, ApiError> {
        let request = self.list_request(params)?;
        let response = self.client.execute(request).await?;
        Self::parse_response(response).await
    }

    /// Fetch every category name. A missing `data` field yields an empty list.
    pub async fn fetch_categories(&self) -> Result<Vec<String>, ApiError> {
        let response = self.client.get(self.url(CATEGORIES_PATH)).send().await?;
        let envelope: DataEnvelope<Option<Vec<String>>> = Self::parse_response(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Create a plant and return the stored record.
    pub async fn post_plant(&self, plant: &NewPlant) -> Result<Plant, ApiError> {
        let request = self.create_request(plant)?;
        let response = self.client.execute(request).await?;
        let envelope: DataEnvelope<Plant> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Return the response unchanged on success, or an [`ApiError::Status`]
    /// carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogBackend for CatalogClient {
    async fn list_plants(&self, params: &[(&'static str, String)]) -> Result<PlantPage, FetchError> {
        Ok(self.fetch_plants(params).await?)
    }

    async fn categories(&self) -> Result<Vec<String>, FetchError> {
        Ok(self.fetch_categories().await?)
    }

    async fn create_plant(&self, plant: &NewPlant) -> Result<Plant, FetchError> {
        Ok(self.post_plant(plant).await?)
    }
}
