// Adapters layer: concrete implementations for external systems
// (credential files, OAuth2, image fetching, Vision API, rendering).

pub mod auth;
pub mod credentials;
pub mod image_source;
pub mod overlay;
pub mod vision;
