use crate::models::{AuthToken, BookingStatus, PropertyType, TourStatus, User, UserType};
use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Payload for creating or updating a unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub price: f64,
    pub area: f64,
    pub address: String,
    pub number_bedroom: u32,
    pub number_bathroom: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// Payload for booking a property tour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourRequestDraft {
    pub property_id: u64,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Registration details submitted before the OTP is dispatched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

/// Acknowledgment that an OTP was sent to the registrant's phone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRegistration {
    pub registration_id: String,
}

/// OTP answer for a pending registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerification {
    pub registration_id: String,
    pub otp: String,
}

/// Token and profile returned after successful verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: AuthToken,
    pub user: User,
}

/// Wire body for `/booking-requests/change-status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourStatusChange {
    pub booking_id: u64,
    pub status: TourStatus,
}

/// Wire body for `/units/change-status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusChange {
    pub unit_id: u64,
    pub status: BookingStatus,
}

/// One entry in a feature group as served by `/categories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureEntry {
    pub id: u32,
    pub name: String,
}

/// Feature group as served by `/categories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCategory {
    pub id: u32,
    pub name: String,
    pub features: Vec<FeatureEntry>,
}

/// JSON envelope every backend response is wrapped in
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, turning a `success: false` body into an error.
    pub fn into_data(self) -> anyhow::Result<T> {
        if !self.success {
            anyhow::bail!(
                "Backend rejected request: {}",
                self.message.unwrap_or_else(|| "no message".to_string())
            );
        }
        self.data.context("Backend response missing data")
    }

    /// Like [`Envelope::into_data`] but for endpoints whose payload carries
    /// no information (delete, status acks without a body).
    pub fn ack(self) -> anyhow::Result<()> {
        if !self.success {
            anyhow::bail!(
                "Backend rejected request: {}",
                self.message.unwrap_or_else(|| "no message".to_string())
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_surfaces_backend_rejections() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"success": false, "message": "nope"}"#).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn envelope_unwraps_payload() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"success": true, "data": 7}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap(), 7);
    }

    #[test]
    fn ack_ignores_missing_data() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(envelope.ack().is_ok());
    }

    #[test]
    fn draft_omits_empty_collections() {
        let draft = PropertyDraft {
            title: "Studio".to_string(),
            description: "Small studio".to_string(),
            property_type: PropertyType::Apartment,
            price: 4500.0,
            area: 55.0,
            address: "Corniche Rd".to_string(),
            number_bedroom: 0,
            number_bathroom: 1,
            features: Vec::new(),
            images: Vec::new(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("features").is_none());
        assert!(value.get("images").is_none());
        assert_eq!(value["type"], "apartment");
    }
}
