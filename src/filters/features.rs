/// Amenity keys and the integer identifiers the listing backend filters on.
///
/// The UI may offer labels this table does not map (e.g. `furnished`); those
/// resolve to `None` and no feature toggle happens for them.
pub const FEATURE_IDS: &[(&str, u32)] = &[
    ("parking", 1),
    ("swimming_pool", 2),
    ("gym", 3),
    ("security", 4),
    ("elevator", 5),
    ("garden", 6),
    ("central_ac", 7),
    ("balcony", 8),
    ("maid_room", 9),
    ("storage", 10),
    ("kitchen_appliances", 11),
    ("internet", 12),
    ("satellite", 13),
    ("intercom", 14),
    ("maintenance", 15),
    ("mosque", 16),
    ("shopping", 17),
    ("schools", 18),
    ("pets_allowed", 19),
    ("sea_view", 20),
    ("city_view", 21),
    ("garden_view", 22),
    ("street_view", 23),
    ("mall_view", 24),
];

/// Resolve an amenity key to its backend identifier.
pub fn feature_id(key: &str) -> Option<u32> {
    FEATURE_IDS.iter().find(|(k, _)| *k == key).map(|(_, id)| *id)
}

/// Reverse lookup, used when rendering a unit's amenity list.
pub fn feature_key(id: u32) -> Option<&'static str> {
    FEATURE_IDS.iter().find(|(_, i)| *i == id).map(|(k, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn known_keys_resolve() {
        assert_eq!(feature_id("parking"), Some(1));
        assert_eq!(feature_id("mall_view"), Some(24));
        assert_eq!(feature_key(8), Some("balcony"));
    }

    #[test]
    fn unmapped_labels_resolve_to_none() {
        assert_eq!(feature_id("furnished"), None);
        assert_eq!(feature_key(99), None);
    }

    #[test]
    fn identifiers_are_unique() {
        let ids: BTreeSet<u32> = FEATURE_IDS.iter().map(|(_, id)| *id).collect();
        assert_eq!(ids.len(), FEATURE_IDS.len());
    }
}
