use crate::api::types::{
    AuthResponse, FeatureCategory, OtpVerification, PendingRegistration, PropertyDraft,
    RegisterRequest, TourRequestDraft,
};
use crate::filters::ListingQuery;
use crate::models::{BookingStatus, Property, PropertyType, TourRequest, TourStatus};
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for listing backends.
/// Screens depend on this seam only, so the live HTTP client and the
/// in-memory test double are interchangeable.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Search all units matching the query
    async fn search(&self, query: &ListingQuery) -> Result<Vec<Property>>;

    /// Search only units that are open for booking
    async fn available(&self, query: &ListingQuery) -> Result<Vec<Property>>;

    /// Fetch one unit; unknown ids are an error
    async fn details(&self, id: u64) -> Result<Property>;

    /// Units belonging to the authenticated owner
    async fn owner_properties(&self) -> Result<Vec<Property>>;

    async fn create(&self, draft: &PropertyDraft) -> Result<Property>;

    async fn update(&self, id: u64, draft: &PropertyDraft) -> Result<Property>;

    async fn delete(&self, id: u64) -> Result<()>;

    /// Unit types the backend accepts
    async fn property_types(&self) -> Result<Vec<PropertyType>>;

    /// Feature groups with their identifiers
    async fn feature_catalog(&self) -> Result<Vec<FeatureCategory>>;

    async fn request_tour(&self, draft: &TourRequestDraft) -> Result<TourRequest>;

    async fn tour_requests(&self) -> Result<Vec<TourRequest>>;

    async fn set_tour_status(&self, booking_id: u64, status: TourStatus) -> Result<TourRequest>;

    async fn set_booking_status(&self, id: u64, status: BookingStatus) -> Result<Property>;

    /// Name of the backing store, for logs
    fn source_name(&self) -> &'static str;
}

/// Phone/OTP registration flow
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Submit registration details; the backend dispatches an OTP and
    /// answers with the id to verify against.
    async fn register(&self, request: &RegisterRequest) -> Result<PendingRegistration>;

    /// Exchange a received OTP for a token and profile.
    async fn verify_otp(&self, verification: &OtpVerification) -> Result<AuthResponse>;
}
