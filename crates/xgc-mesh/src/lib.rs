//! Read-only access to unstructured XGC simulation output.
//!
//! One `MeshSnapshot` per simulation time index; catalogs hand them out
//! and are never written through.

pub mod analytic;
pub mod catalog;
pub mod directory;
pub mod snapshot;

pub use analytic::{AnalyticCatalog, AnalyticConfig};
pub use catalog::{FieldSelection, MeshCatalog};
pub use directory::DirectoryCatalog;
pub use snapshot::MeshSnapshot;
