pub mod features;

pub use features::{feature_id, feature_key, FEATURE_IDS};

use crate::locale::Language;
use crate::models::PropertyType;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Raw filter state as the search screen holds it.
///
/// Numeric fields keep the user's text (possibly with grouping commas, or
/// garbage) until [`FilterInput::validate`] has looked at it. The screen owns
/// one of these, mutates it field by field, and swaps in
/// [`FilterInput::reset`] when the user clears everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterInput {
    pub property_type: Option<PropertyType>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub area_min: Option<String>,
    pub area_max: Option<String>,
    /// Raw bedrooms selection; an empty string is the "any" option.
    pub bedrooms: Option<String>,
    pub location: Option<String>,
    pub features: BTreeSet<u32>,
}

/// Keys a validation error can be reported under.
///
/// `Price` and `Area` are pair-level keys for the min/max ordering rule and
/// can coexist with the per-field keys of the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterField {
    PriceMin,
    PriceMax,
    AreaMin,
    AreaMax,
    Bedrooms,
    Price,
    Area,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::PriceMin => "price_min",
            FilterField::PriceMax => "price_max",
            FilterField::AreaMin => "area_min",
            FilterField::AreaMax => "area_max",
            FilterField::Bedrooms => "bedrooms",
            FilterField::Price => "price",
            FilterField::Area => "area",
        }
    }
}

/// Outcome of validating a [`FilterInput`]. Errors are data, never panics;
/// the screen decides what to show and whether to query at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: BTreeMap<FilterField, String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Clean request parameters for the listing store.
///
/// Absent dimensions are omitted from the serialized mapping entirely (never
/// sent as empty string, null, or an empty array) so the backend applies its
/// default unfiltered behavior for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<u32>,
}

impl ListingQuery {
    /// Flatten into query-string pairs for the transport. Scalar dimensions
    /// appear once, features as repeated `features[]` entries.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(t) = self.property_type {
            pairs.push(("type".to_string(), t.as_str().to_string()));
        }
        if let Some(v) = self.price_min {
            pairs.push(("price_min".to_string(), v.to_string()));
        }
        if let Some(v) = self.price_max {
            pairs.push(("price_max".to_string(), v.to_string()));
        }
        if let Some(v) = self.area_min {
            pairs.push(("area_min".to_string(), v.to_string()));
        }
        if let Some(v) = self.area_max {
            pairs.push(("area_max".to_string(), v.to_string()));
        }
        if let Some(n) = self.bedrooms {
            pairs.push(("bedrooms".to_string(), n.to_string()));
        }
        if let Some(l) = &self.location {
            pairs.push(("location".to_string(), l.clone()));
        }
        for id in &self.features {
            pairs.push(("features[]".to_string(), id.to_string()));
        }
        pairs
    }
}

/// Parse a user-supplied decimal, tolerating grouping commas ("5,000").
fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A range bound: present, non-empty and parseable. Sign is not checked here,
/// the ordering rule applies to whatever both bounds parse to.
fn bound(value: &Option<String>) -> Option<f64> {
    non_empty(value).and_then(parse_decimal)
}

impl FilterInput {
    /// Fresh empty filter set, the state at screen mount and after "reset".
    pub fn reset() -> Self {
        Self::default()
    }

    /// Add the feature if absent, remove it if present.
    pub fn toggle_feature(mut self, feature_id: u32) -> Self {
        if !self.features.remove(&feature_id) {
            self.features.insert(feature_id);
        }
        self
    }

    /// Check every field and return the per-field error messages, localized
    /// for `language`. Pure; the input is left untouched.
    pub fn validate(&self, language: Language) -> ValidationResult {
        let messages = language.messages();
        let mut errors = BTreeMap::new();

        let numeric = [
            (FilterField::PriceMin, &self.price_min),
            (FilterField::PriceMax, &self.price_max),
            (FilterField::AreaMin, &self.area_min),
            (FilterField::AreaMax, &self.area_max),
        ];
        for (field, value) in numeric {
            if let Some(raw) = non_empty(value) {
                match parse_decimal(raw) {
                    Some(v) if v >= 0.0 => {}
                    _ => {
                        errors.insert(field, messages.invalid_number.to_string());
                    }
                }
            }
        }

        // Ordering rules apply whenever both bounds parse, independently of
        // the per-field checks above.
        if let (Some(min), Some(max)) = (bound(&self.price_min), bound(&self.price_max)) {
            if min > max {
                errors.insert(FilterField::Price, messages.price_range_order.to_string());
            }
        }
        if let (Some(min), Some(max)) = (bound(&self.area_min), bound(&self.area_max)) {
            if min > max {
                errors.insert(FilterField::Area, messages.area_range_order.to_string());
            }
        }

        // Whole integers only; "2.5" is an error, never truncated.
        if let Some(raw) = non_empty(&self.bedrooms) {
            if raw.trim().parse::<u32>().is_err() {
                errors.insert(FilterField::Bedrooms, messages.invalid_number.to_string());
            }
        }

        ValidationResult { errors }
    }

    /// Build the clean request mapping.
    ///
    /// Callers gate on [`FilterInput::validate`] first; text that does not
    /// parse is not re-reported here, it simply yields no parameter.
    pub fn normalize(&self) -> ListingQuery {
        ListingQuery {
            property_type: self.property_type,
            price_min: bound(&self.price_min),
            price_max: bound(&self.price_max),
            area_min: bound(&self.area_min),
            area_max: bound(&self.area_max),
            bedrooms: non_empty(&self.bedrooms).and_then(|s| s.trim().parse().ok()),
            location: non_empty(&self.location).map(str::to_owned),
            features: self.features.iter().copied().collect(),
        }
    }
}
