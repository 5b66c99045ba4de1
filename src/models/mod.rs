use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of unit listed on the marketplace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    Villa,
    Office,
    Shop,
    Land,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Apartment,
        PropertyType::Villa,
        PropertyType::Office,
        PropertyType::Shop,
        PropertyType::Land,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::Villa => "villa",
            PropertyType::Office => "office",
            PropertyType::Shop => "shop",
            PropertyType::Land => "land",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apartment" => Ok(PropertyType::Apartment),
            "villa" => Ok(PropertyType::Villa),
            "office" => Ok(PropertyType::Office),
            "shop" => Ok(PropertyType::Shop),
            "land" => Ok(PropertyType::Land),
            other => Err(anyhow::anyhow!("Unknown property type: {}", other)),
        }
    }
}

/// Moderation state of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Active,
    Pending,
}

/// Whether a unit is open for booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Available,
    Booked,
}

/// Core marketplace unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub price: f64,
    /// Size in square meters
    pub area: f64,
    /// Absent for land and office units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    pub location: String,
    /// Amenity identifiers, see [`crate::filters::FEATURE_IDS`]
    pub features: Vec<u32>,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    pub furnished: bool,
    pub status: PropertyStatus,
    pub booking_status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle of a tour request, owner-driven after submission
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TourStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
}

impl TourStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TourStatus::Pending => "pending",
            TourStatus::Confirmed => "confirmed",
            TourStatus::Rejected => "rejected",
            TourStatus::Cancelled => "cancelled",
        }
    }
}

/// A renter's request to visit a unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourRequest {
    pub booking_id: u64,
    pub property_id: u64,
    pub property_title: String,
    pub renter_name: String,
    pub renter_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renter_email: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: TourStatus,
    pub location: String,
}

/// Account role on the marketplace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Owner,
    Renter,
}

/// Registered account as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

/// Bearer token issued after OTP verification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthToken(pub String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_type_round_trips_through_str() {
        for t in PropertyType::ALL {
            assert_eq!(t.as_str().parse::<PropertyType>().unwrap(), t);
        }
        assert!("castle".parse::<PropertyType>().is_err());
    }

    #[test]
    fn property_type_serializes_lowercase() {
        let json = serde_json::to_string(&PropertyType::Apartment).unwrap();
        assert_eq!(json, "\"apartment\"");
    }
}
