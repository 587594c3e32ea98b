//! Remote store clients.
//!
//! [`HttpEntityStore`] talks to the sync server's REST surface;
//! [`HttpAssetUploader`] pushes binary assets (profile photos) to the same
//! server. [`OfflineRemote`] stands in when sync is not configured: every
//! operation fails transiently, so managers degrade to their local cache
//! exactly as they do during an outage.

mod assets;
mod http_store;
mod offline;

pub use assets::HttpAssetUploader;
pub use http_store::HttpEntityStore;
pub use offline::OfflineRemote;
