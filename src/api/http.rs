use crate::api::traits::{AuthBackend, ListingStore};
use crate::api::types::{
    AuthResponse, BookingStatusChange, Envelope, FeatureCategory, OtpVerification,
    PendingRegistration, PropertyDraft, RegisterRequest, TourRequestDraft, TourStatusChange,
};
use crate::filters::ListingQuery;
use crate::models::{AuthToken, BookingStatus, Property, PropertyType, TourRequest, TourStatus};
use crate::session::Session;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for the marketplace backend
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://starkbrokers.com".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl ApiConfig {
    /// Read settings from the environment, falling back to defaults.
    /// `STARK_API_URL` overrides the base URL.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("STARK_API_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        config
    }
}

/// REST client for the marketplace backend
pub struct StarkApiClient {
    client: Client,
    config: ApiConfig,
    token: Option<AuthToken>,
}

impl StarkApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            token: None,
        })
    }

    /// Pick up the session's bearer token for authenticated endpoints.
    /// A cleared session detaches it again.
    pub fn authenticate(&mut self, session: &Session) {
        self.token = session.token().cloned();
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, token.as_str());
        }
        request
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T> {
        debug!("Requesting {}", path);

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", path))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status {}", path, status);
            anyhow::bail!("Request to {} failed: {}", path, status);
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to decode {} response", path))?;
        envelope.into_data()
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(self.request(Method::GET, path), path).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        pairs: &[(String, String)],
    ) -> Result<T> {
        self.execute(self.request(Method::GET, path).query(pairs), path)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.execute(self.request(Method::POST, path).json(body), path)
            .await
    }
}

#[async_trait]
impl ListingStore for StarkApiClient {
    async fn search(&self, query: &ListingQuery) -> Result<Vec<Property>> {
        self.get_with_query("/units", &query.to_query_pairs()).await
    }

    async fn available(&self, query: &ListingQuery) -> Result<Vec<Property>> {
        let mut pairs = query.to_query_pairs();
        pairs.push(("status".to_string(), "available".to_string()));
        self.get_with_query("/units", &pairs).await
    }

    async fn details(&self, id: u64) -> Result<Property> {
        self.get(&format!("/units/details/{}", id)).await
    }

    async fn owner_properties(&self) -> Result<Vec<Property>> {
        self.get("/units/owner-units").await
    }

    async fn create(&self, draft: &PropertyDraft) -> Result<Property> {
        self.post("/units/store", draft).await
    }

    async fn update(&self, id: u64, draft: &PropertyDraft) -> Result<Property> {
        self.post(&format!("/units/update/{}", id), draft).await
    }

    async fn delete(&self, id: u64) -> Result<()> {
        // The backend deletes through a GET endpoint
        let path = format!("/units/delete/{}", id);
        debug!("Requesting {}", path);

        let response = self
            .request(Method::GET, &path)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", path))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status {}", path, status);
            anyhow::bail!("Request to {} failed: {}", path, status);
        }

        let envelope: Envelope<serde_json::Value> = response
            .json()
            .await
            .with_context(|| format!("Failed to decode {} response", path))?;
        envelope.ack()
    }

    async fn property_types(&self) -> Result<Vec<PropertyType>> {
        self.get("/units/type").await
    }

    async fn feature_catalog(&self) -> Result<Vec<FeatureCategory>> {
        self.get("/categories").await
    }

    async fn request_tour(&self, draft: &TourRequestDraft) -> Result<TourRequest> {
        self.post("/booking-requests/store", draft).await
    }

    async fn tour_requests(&self) -> Result<Vec<TourRequest>> {
        self.get("/booking-requests").await
    }

    async fn set_tour_status(&self, booking_id: u64, status: TourStatus) -> Result<TourRequest> {
        let body = TourStatusChange { booking_id, status };
        self.post("/booking-requests/change-status", &body).await
    }

    async fn set_booking_status(&self, id: u64, status: BookingStatus) -> Result<Property> {
        let body = BookingStatusChange {
            unit_id: id,
            status,
        };
        self.post("/units/change-status", &body).await
    }

    fn source_name(&self) -> &'static str {
        "StarkBrokers"
    }
}

#[async_trait]
impl AuthBackend for StarkApiClient {
    async fn register(&self, request: &RegisterRequest) -> Result<PendingRegistration> {
        self.post("/auth/register", request).await
    }

    async fn verify_otp(&self, verification: &OtpVerification) -> Result<AuthResponse> {
        self.post("/auth/verify-otp", verification).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://starkbrokers.com");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let client = StarkApiClient::new(ApiConfig {
            base_url: "https://example.com/".to_string(),
            ..ApiConfig::default()
        })
        .unwrap();
        assert_eq!(client.url("/units"), "https://example.com/units");
    }
}
