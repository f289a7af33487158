//! Static asset resolution for the device web simulator.
//!
//! Provides:
//! - `AssetStore` - resolve request paths to files under a content root
//! - Extension to media type mapping

pub mod media_type;
pub mod store;

pub use media_type::media_type_for;
pub use store::{Asset, AssetError, AssetStore};
