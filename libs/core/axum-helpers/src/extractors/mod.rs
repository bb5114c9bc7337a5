//! Request extractors shared by the domain routers.

pub mod caller;
pub mod id_path;
pub mod validated_json;

pub use caller::CallerIdentity;
pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
