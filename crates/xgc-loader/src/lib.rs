//! Loader core: time-series iteration, poloidal interpolation,
//! fluctuation decomposition, toroidal replication, output assembly.

pub mod assemble;
pub mod fluctuation;
pub mod interp;
pub mod loader;
pub mod timeline;
pub mod toroidal;

pub use loader::{load, XgcLoader};
pub use timeline::TimeSeries;
