pub mod http;
pub mod mock;
pub mod traits;
pub mod types;

pub use http::{ApiConfig, StarkApiClient};
pub use mock::MockBackend;
pub use traits::{AuthBackend, ListingStore};
