// Health Registry Service - Core Library
// Exposes the registry core for use in the API server and tests

pub mod catalog;
pub mod clients;
pub mod enrollments;
pub mod error;
pub mod service;

// Re-export commonly used types
pub use catalog::{ProgramCatalog, PROGRAMS};
pub use clients::{Client, ClientRegistry};
pub use enrollments::{Enrollment, EnrollmentLedger};
pub use error::{RegistryError, Result};
pub use service::{ClientProfile, RegistryService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
