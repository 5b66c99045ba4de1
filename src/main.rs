mod api;
mod filters;
mod locale;
mod models;
mod session;

use api::{ApiConfig, ListingStore, MockBackend, StarkApiClient};
use filters::FilterInput;
use locale::Language;
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Stark Brokers - Marketplace Search");
    info!("=====================================");
    info!("");

    let language = std::env::var("STARK_LANG")
        .ok()
        .and_then(|tag| Language::from_tag(&tag))
        .unwrap_or_default();

    // Filter dimensions come from the environment so searches are scriptable
    let mut input = FilterInput::reset();
    input.property_type = env_var("STARK_TYPE").and_then(|v| v.parse().ok());
    input.price_min = env_var("STARK_PRICE_MIN");
    input.price_max = env_var("STARK_PRICE_MAX");
    input.area_min = env_var("STARK_AREA_MIN");
    input.area_max = env_var("STARK_AREA_MAX");
    input.bedrooms = env_var("STARK_BEDROOMS");
    input.location = env_var("STARK_LOCATION");
    if let Some(keys) = env_var("STARK_FEATURES") {
        for key in keys.split(',').map(str::trim).filter(|k| !k.is_empty()) {
            match filters::feature_id(key) {
                Some(id) => input = input.toggle_feature(id),
                None => info!("Ignoring unknown feature '{}'", key),
            }
        }
    }

    let validation = input.validate(language);
    if !validation.is_valid() {
        for (field, message) in &validation.errors {
            eprintln!("{}: {}", field.as_str(), message);
        }
        anyhow::bail!("Invalid search filters");
    }

    let query = input.normalize();

    let store: Box<dyn ListingStore> = match env_var("STARK_API_URL") {
        Some(url) => {
            info!("Using live backend at {}", url);
            Box::new(StarkApiClient::new(ApiConfig::from_env())?)
        }
        None => {
            info!("STARK_API_URL not set, using the built-in mock backend");
            Box::new(MockBackend::new())
        }
    };

    info!("Searching {} for available listings...", store.source_name());
    info!("");

    let properties = store.available(&query).await?;

    info!("\n✅ Found {} listings\n", properties.len());

    for (i, property) in properties.iter().enumerate() {
        println!("{}. {} ({} SAR)", i + 1, property.title, property.price);
        println!(
            "   {} · {} m² · {}",
            property.property_type, property.area, property.location
        );
        if let Some(bedrooms) = property.bedrooms {
            println!("   {} bedrooms", bedrooms);
        }
        let amenities: Vec<&str> = property
            .features
            .iter()
            .filter_map(|id| filters::feature_key(*id))
            .collect();
        if !amenities.is_empty() {
            println!("   Features: {}", amenities.join(", "));
        }
        println!("   ID: {}", property.id);
        println!();
    }

    // Save results for downstream tooling
    let json = serde_json::to_string_pretty(&properties)?;
    tokio::fs::write("listings.json", json).await?;
    info!("💾 Saved {} listings to listings.json", properties.len());

    Ok(())
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
