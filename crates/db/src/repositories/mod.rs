//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&dyn DocumentStore` as the first argument and translate between
//! typed models and generic documents.

pub mod message_repo;
pub mod profile_repo;
pub mod project_repo;
pub mod service_repo;
pub mod session_repo;
pub mod settings_repo;

pub use message_repo::MessageRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
pub use service_repo::ServiceRepo;
pub use session_repo::SessionRepo;
pub use settings_repo::SettingsRepo;
