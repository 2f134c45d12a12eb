// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Mesh Catalog
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::snapshot::MeshSnapshot;
use xgc_types::config::LoadMode;
use xgc_types::error::XgcResult;

/// Which density components a snapshot request retrieves from the
/// source. Fluctuation-only loads must never pull equilibrium data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSelection {
    Equilibrium,
    Fluctuation,
    Both,
}

impl FieldSelection {
    pub fn wants_equilibrium(self) -> bool {
        matches!(self, FieldSelection::Equilibrium | FieldSelection::Both)
    }

    pub fn wants_fluctuation(self) -> bool {
        matches!(self, FieldSelection::Fluctuation | FieldSelection::Both)
    }
}

impl From<LoadMode> for FieldSelection {
    fn from(mode: LoadMode) -> Self {
        match mode {
            LoadMode::Full => FieldSelection::Both,
            LoadMode::FluctuationOnly => FieldSelection::Fluctuation,
            LoadMode::EquilibriumOnly => FieldSelection::Equilibrium,
        }
    }
}

/// Read-only access to simulation output, keyed by time index.
///
/// Implementations surface `DataNotFound` for absent time indices and
/// never retry; missing simulation data is not transient.
pub trait MeshCatalog {
    /// Retrieve one time index worth of mesh data, restricted to the
    /// selected density components.
    fn snapshot(&self, time_index: usize, fields: FieldSelection) -> XgcResult<MeshSnapshot>;

    /// Number of distinct toroidal planes the source carries per step.
    fn n_planes(&self) -> usize;
}

impl<T: MeshCatalog + ?Sized> MeshCatalog for &T {
    fn snapshot(&self, time_index: usize, fields: FieldSelection) -> XgcResult<MeshSnapshot> {
        (**self).snapshot(time_index, fields)
    }

    fn n_planes(&self) -> usize {
        (**self).n_planes()
    }
}
