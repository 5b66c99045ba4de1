use crate::api::traits::{AuthBackend, ListingStore};
use crate::api::types::{
    AuthResponse, FeatureCategory, FeatureEntry, OtpVerification, PendingRegistration,
    PropertyDraft, RegisterRequest, TourRequestDraft,
};
use crate::filters::{feature_key, ListingQuery};
use crate::models::{
    AuthToken, BookingStatus, Property, PropertyStatus, PropertyType, TourRequest, TourStatus,
    User,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};

/// In-memory stand-in for the marketplace backend.
///
/// Seeded with realistic listings so screens and tests can run against the
/// exact queries the live client would send, network-free and deterministic.
pub struct MockBackend {
    properties: Mutex<Vec<Property>>,
    tours: Mutex<Vec<TourRequest>>,
    pending: Mutex<Vec<(String, RegisterRequest)>>,
    next_id: AtomicU64,
}

impl MockBackend {
    pub fn new() -> Self {
        let properties = seed_properties();
        let tours = seed_tours(&properties);
        let next_id = (properties.len() + tours.len() + 1) as u64;

        info!("📋 Mock backend seeded with {} listings", properties.len());

        Self {
            properties: Mutex::new(properties),
            tours: Mutex::new(tours),
            pending: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(next_id),
        }
    }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply every dimension of the query, the way the live backend does.
fn matches(property: &Property, query: &ListingQuery) -> bool {
    if let Some(t) = query.property_type {
        if property.property_type != t {
            return false;
        }
    }
    if let Some(min) = query.price_min {
        if property.price < min {
            return false;
        }
    }
    if let Some(max) = query.price_max {
        if property.price > max {
            return false;
        }
    }
    if let Some(min) = query.area_min {
        if property.area < min {
            return false;
        }
    }
    if let Some(max) = query.area_max {
        if property.area > max {
            return false;
        }
    }
    if let Some(n) = query.bedrooms {
        if property.bedrooms != Some(n) {
            return false;
        }
    }
    if let Some(location) = &query.location {
        if !property.location.eq_ignore_ascii_case(location) {
            return false;
        }
    }
    query.features.iter().all(|id| property.features.contains(id))
}

#[async_trait]
impl ListingStore for MockBackend {
    async fn search(&self, query: &ListingQuery) -> Result<Vec<Property>> {
        let properties = self.properties.lock().unwrap();
        let hits: Vec<Property> = properties
            .iter()
            .filter(|p| matches(p, query))
            .cloned()
            .collect();
        debug!("Mock search matched {} of {} units", hits.len(), properties.len());
        Ok(hits)
    }

    async fn available(&self, query: &ListingQuery) -> Result<Vec<Property>> {
        let hits = self.search(query).await?;
        Ok(hits
            .into_iter()
            .filter(|p| p.booking_status == BookingStatus::Available)
            .collect())
    }

    async fn details(&self, id: u64) -> Result<Property> {
        let properties = self.properties.lock().unwrap();
        properties
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("Property not found"))
    }

    async fn owner_properties(&self) -> Result<Vec<Property>> {
        Ok(self.properties.lock().unwrap().clone())
    }

    async fn create(&self, draft: &PropertyDraft) -> Result<Property> {
        let property = Property {
            id: self.allocate_id(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            property_type: draft.property_type,
            price: draft.price,
            area: draft.area,
            bedrooms: Some(draft.number_bedroom),
            bathrooms: Some(draft.number_bathroom),
            location: draft.address.clone(),
            features: draft.features.clone(),
            images: draft.images.clone(),
            year_built: None,
            furnished: false,
            // new listings await moderation
            status: PropertyStatus::Pending,
            booking_status: BookingStatus::Available,
            created_at: Utc::now(),
        };
        self.properties.lock().unwrap().push(property.clone());
        Ok(property)
    }

    async fn update(&self, id: u64, draft: &PropertyDraft) -> Result<Property> {
        let mut properties = self.properties.lock().unwrap();
        let property = properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| anyhow!("Property not found"))?;

        property.title = draft.title.clone();
        property.description = draft.description.clone();
        property.property_type = draft.property_type;
        property.price = draft.price;
        property.area = draft.area;
        property.bedrooms = Some(draft.number_bedroom);
        property.bathrooms = Some(draft.number_bathroom);
        property.location = draft.address.clone();
        property.features = draft.features.clone();
        if !draft.images.is_empty() {
            property.images = draft.images.clone();
        }
        Ok(property.clone())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let mut properties = self.properties.lock().unwrap();
        let before = properties.len();
        properties.retain(|p| p.id != id);
        if properties.len() == before {
            anyhow::bail!("Property not found");
        }
        Ok(())
    }

    async fn property_types(&self) -> Result<Vec<PropertyType>> {
        Ok(PropertyType::ALL.to_vec())
    }

    async fn feature_catalog(&self) -> Result<Vec<FeatureCategory>> {
        let entries = |range: std::ops::RangeInclusive<u32>| -> Vec<FeatureEntry> {
            range
                .filter_map(|id| {
                    feature_key(id).map(|name| FeatureEntry {
                        id,
                        name: name.to_string(),
                    })
                })
                .collect()
        };
        Ok(vec![
            FeatureCategory {
                id: 1,
                name: "amenities".to_string(),
                features: entries(1..=19),
            },
            FeatureCategory {
                id: 2,
                name: "views".to_string(),
                features: entries(20..=24),
            },
        ])
    }

    async fn request_tour(&self, draft: &TourRequestDraft) -> Result<TourRequest> {
        let property = self.details(draft.property_id).await?;
        let tour = TourRequest {
            booking_id: self.allocate_id(),
            property_id: property.id,
            property_title: property.title.clone(),
            renter_name: draft.name.clone(),
            renter_phone: draft.phone.clone(),
            renter_email: draft.email.clone(),
            date: draft.date,
            time: draft.time,
            status: TourStatus::Pending,
            location: property.location.clone(),
        };
        self.tours.lock().unwrap().push(tour.clone());
        Ok(tour)
    }

    async fn tour_requests(&self) -> Result<Vec<TourRequest>> {
        Ok(self.tours.lock().unwrap().clone())
    }

    async fn set_tour_status(&self, booking_id: u64, status: TourStatus) -> Result<TourRequest> {
        let mut tours = self.tours.lock().unwrap();
        let tour = tours
            .iter_mut()
            .find(|t| t.booking_id == booking_id)
            .ok_or_else(|| anyhow!("Tour request not found"))?;
        tour.status = status;
        debug!("Tour {} is now {}", booking_id, status.as_str());
        Ok(tour.clone())
    }

    async fn set_booking_status(&self, id: u64, status: BookingStatus) -> Result<Property> {
        let mut properties = self.properties.lock().unwrap();
        let property = properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| anyhow!("Property not found"))?;
        property.booking_status = status;
        Ok(property.clone())
    }

    fn source_name(&self) -> &'static str {
        "Mock"
    }
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn register(&self, request: &RegisterRequest) -> Result<PendingRegistration> {
        let registration_id = format!("reg-{}", self.allocate_id());
        self.pending
            .lock()
            .unwrap()
            .push((registration_id.clone(), request.clone()));
        Ok(PendingRegistration { registration_id })
    }

    async fn verify_otp(&self, verification: &OtpVerification) -> Result<AuthResponse> {
        if verification.otp.trim().is_empty() {
            anyhow::bail!("Invalid OTP");
        }

        let request = {
            let mut pending = self.pending.lock().unwrap();
            let index = pending
                .iter()
                .position(|(id, _)| *id == verification.registration_id)
                .ok_or_else(|| anyhow!("Unknown registration id"))?;
            pending.remove(index).1
        };

        let now = Utc::now();
        let user_id = format!("user-{}", self.allocate_id());
        Ok(AuthResponse {
            token: AuthToken(format!("mock-token-{}", user_id)),
            user: User {
                id: user_id,
                full_name: request.name,
                email: request.email,
                phone: request.phone,
                user_type: request.user_type,
                created_at: now,
                last_login: now,
            },
        })
    }
}

fn seed_properties() -> Vec<Property> {
    let now = Utc::now();
    let unit = |id: u64,
                title: &str,
                description: &str,
                property_type: PropertyType,
                price: f64,
                area: f64,
                bedrooms: Option<u32>,
                bathrooms: Option<u32>,
                location: &str,
                features: &[u32],
                year_built: Option<i32>,
                furnished: bool| Property {
        id,
        title: title.to_string(),
        description: description.to_string(),
        property_type,
        price,
        area,
        bedrooms,
        bathrooms,
        location: location.to_string(),
        features: features.to_vec(),
        images: Vec::new(),
        year_built,
        furnished,
        status: PropertyStatus::Active,
        booking_status: BookingStatus::Available,
        created_at: now,
    };

    vec![
        unit(
            1,
            "Modern Apartment in Al Olaya",
            "Luxurious apartment with modern finishes, featuring an open-plan living area and premium appliances. Located in the heart of Riyadh's business district.",
            PropertyType::Apartment,
            8_500.0,
            120.0,
            Some(2),
            Some(2),
            "riyadh",
            &[1, 4, 5, 7, 11, 12, 13, 15],
            Some(2020),
            true,
        ),
        unit(
            2,
            "Luxury Villa in Al Nakheel",
            "Spacious family villa with private garden and swimming pool. Features high-end finishes, smart home system, and maid's quarters.",
            PropertyType::Villa,
            25_000.0,
            450.0,
            Some(5),
            Some(6),
            "riyadh",
            &[1, 2, 4, 6, 9],
            Some(2019),
            false,
        ),
        unit(
            3,
            "Premium Office Space in Jeddah Gate",
            "Modern office space with floor-to-ceiling windows, offering stunning views of the Red Sea. Includes dedicated parking and 24/7 security.",
            PropertyType::Office,
            15_000.0,
            200.0,
            None,
            Some(2),
            "jeddah",
            &[1, 4, 20],
            Some(2021),
            true,
        ),
        unit(
            4,
            "Cozy Studio in Al Khobar Corniche",
            "Fully furnished studio apartment with stunning sea views. Perfect for singles or couples.",
            PropertyType::Apartment,
            4_500.0,
            55.0,
            Some(0),
            Some(1),
            "khobar",
            &[1, 3, 4, 8, 20],
            Some(2018),
            true,
        ),
        unit(
            5,
            "Retail Space in Al Rashid Mall",
            "Prime retail location with high foot traffic. Suitable for retail or food & beverage businesses.",
            PropertyType::Shop,
            12_000.0,
            85.0,
            None,
            Some(1),
            "dammam",
            &[1, 4, 10, 24],
            Some(2017),
            false,
        ),
        unit(
            6,
            "Residential Land in Al Narjis",
            "Prime residential land plot in a developing area. Perfect for building your dream home.",
            PropertyType::Land,
            850_000.0,
            750.0,
            None,
            None,
            "riyadh",
            &[23],
            None,
            false,
        ),
        unit(
            7,
            "Penthouse in Al Hamra Tower",
            "Luxurious penthouse with panoramic city views, featuring high-end finishes and private roof terrace.",
            PropertyType::Apartment,
            35_000.0,
            380.0,
            Some(4),
            Some(5),
            "jeddah",
            &[1, 2, 3, 4, 9, 20, 21],
            Some(2022),
            true,
        ),
        unit(
            8,
            "Family Compound in Al Rawdah",
            "Private compound with multiple villas, shared pool, and landscaped gardens. Perfect for large families.",
            PropertyType::Villa,
            45_000.0,
            1_200.0,
            Some(12),
            Some(14),
            "dammam",
            &[1, 2, 4, 6, 9, 22],
            Some(2016),
            false,
        ),
    ]
}

fn seed_tours(properties: &[Property]) -> Vec<TourRequest> {
    let first = &properties[0];
    vec![TourRequest {
        booking_id: 9,
        property_id: first.id,
        property_title: first.title.clone(),
        renter_name: "Ahmed Mohammed".to_string(),
        renter_phone: "+966 50 123 4567".to_string(),
        renter_email: Some("ahmed@example.com".to_string()),
        date: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        status: TourStatus::Pending,
        location: first.location.clone(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FEATURE_IDS;
    use crate::models::UserType;

    fn draft() -> PropertyDraft {
        PropertyDraft {
            title: "Test Apartment".to_string(),
            description: "Two rooms near the corniche".to_string(),
            property_type: PropertyType::Apartment,
            price: 6_000.0,
            area: 95.0,
            address: "jeddah".to_string(),
            number_bedroom: 2,
            number_bathroom: 1,
            features: vec![1, 8],
            images: Vec::new(),
        }
    }

    #[tokio::test]
    async fn search_filters_by_type_and_price() {
        let store = MockBackend::new();
        let query = ListingQuery {
            property_type: Some(PropertyType::Villa),
            price_max: Some(30_000.0),
            ..ListingQuery::default()
        };

        let hits = store.search(&query).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Luxury Villa in Al Nakheel");
    }

    #[tokio::test]
    async fn empty_query_returns_everything() {
        let store = MockBackend::new();
        let hits = store.search(&ListingQuery::default()).await.unwrap();
        assert_eq!(hits.len(), 8);
    }

    #[tokio::test]
    async fn feature_filter_requires_every_selected_feature() {
        let store = MockBackend::new();
        let query = ListingQuery {
            features: vec![2, 9],
            ..ListingQuery::default()
        };

        let hits = store.search(&query).await.unwrap();
        assert!(hits.iter().all(|p| p.features.contains(&2) && p.features.contains(&9)));
        assert_eq!(hits.len(), 3);
    }

    #[tokio::test]
    async fn bedrooms_and_location_filters() {
        let store = MockBackend::new();
        let query = ListingQuery {
            bedrooms: Some(0),
            location: Some("Khobar".to_string()),
            ..ListingQuery::default()
        };

        let hits = store.search(&query).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Cozy Studio in Al Khobar Corniche");
    }

    #[tokio::test]
    async fn available_excludes_booked_units() {
        let store = MockBackend::new();
        store
            .set_booking_status(4, BookingStatus::Booked)
            .await
            .unwrap();

        let hits = store.available(&ListingQuery::default()).await.unwrap();
        assert_eq!(hits.len(), 7);
        assert!(hits.iter().all(|p| p.id != 4));
    }

    #[tokio::test]
    async fn create_update_delete_roundtrip() {
        let store = MockBackend::new();

        let created = store.create(&draft()).await.unwrap();
        assert_eq!(created.status, PropertyStatus::Pending);

        let mut changed = draft();
        changed.price = 6_500.0;
        let updated = store.update(created.id, &changed).await.unwrap();
        assert_eq!(updated.price, 6_500.0);

        store.delete(created.id).await.unwrap();
        assert!(store.details(created.id).await.is_err());
        assert!(store.delete(created.id).await.is_err());
    }

    #[tokio::test]
    async fn tour_flow() {
        let store = MockBackend::new();
        let tour = store
            .request_tour(&TourRequestDraft {
                property_id: 2,
                name: "Sara Al Qahtani".to_string(),
                phone: "+966 55 987 6543".to_string(),
                email: None,
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(tour.status, TourStatus::Pending);
        assert_eq!(tour.property_title, "Luxury Villa in Al Nakheel");

        let confirmed = store
            .set_tour_status(tour.booking_id, TourStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(confirmed.status, TourStatus::Confirmed);

        let all = store.tour_requests().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn register_and_verify_otp() {
        let store = MockBackend::new();
        let pending = store
            .register(&RegisterRequest {
                name: "Huda Al Harbi".to_string(),
                email: "huda@example.com".to_string(),
                phone: "+966 54 111 2222".to_string(),
                user_type: UserType::Owner,
            })
            .await
            .unwrap();

        let rejected = store
            .verify_otp(&OtpVerification {
                registration_id: pending.registration_id.clone(),
                otp: "  ".to_string(),
            })
            .await;
        assert!(rejected.is_err());

        let auth = store
            .verify_otp(&OtpVerification {
                registration_id: pending.registration_id.clone(),
                otp: "1234".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(auth.user.user_type, UserType::Owner);
        assert!(!auth.token.as_str().is_empty());

        // a registration id verifies once
        let replay = store
            .verify_otp(&OtpVerification {
                registration_id: pending.registration_id,
                otp: "1234".to_string(),
            })
            .await;
        assert!(replay.is_err());
    }

    #[tokio::test]
    async fn feature_catalog_covers_the_whole_table() {
        let store = MockBackend::new();
        let catalog = store.feature_catalog().await.unwrap();
        let total: usize = catalog.iter().map(|c| c.features.len()).sum();
        assert_eq!(total, FEATURE_IDS.len());
    }
}
