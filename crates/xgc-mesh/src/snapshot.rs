// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Mesh Snapshot
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One time index worth of unstructured simulation output.

use ndarray::{Array1, Array2};
use xgc_types::error::{XgcError, XgcResult};

/// Node positions, triangle connectivity and per-node density data for
/// one simulation time index.
///
/// `fluctuation` holds one row per toroidal source plane; `equilibrium`
/// is plane-independent (the background is axisymmetric). Either field
/// may be absent when the load did not select it.
#[derive(Debug, Clone)]
pub struct MeshSnapshot {
    /// Node R positions [n_nodes].
    pub node_r: Array1<f64>,
    /// Node Z positions [n_nodes].
    pub node_z: Array1<f64>,
    /// Triangle connectivity, node indices into the position arrays.
    pub triangles: Vec<[usize; 3]>,
    /// Per-node equilibrium electron density [n_nodes].
    pub equilibrium: Option<Array1<f64>>,
    /// Per-plane, per-node density fluctuation [n_planes, n_nodes].
    pub fluctuation: Option<Array2<f64>>,
}

impl MeshSnapshot {
    pub fn n_nodes(&self) -> usize {
        self.node_r.len()
    }

    pub fn n_planes(&self) -> usize {
        self.fluctuation.as_ref().map_or(0, |f| f.nrows())
    }

    /// Consistency check for externally produced data: array lengths,
    /// connectivity bounds, finite node positions.
    pub fn validate(&self) -> XgcResult<()> {
        let n = self.n_nodes();
        if self.node_z.len() != n {
            return Err(XgcError::MalformedData(format!(
                "node position arrays disagree: {} R values, {} Z values",
                n,
                self.node_z.len()
            )));
        }
        if n < 3 || self.triangles.is_empty() {
            return Err(XgcError::MalformedData(format!(
                "mesh too small: {} nodes, {} triangles",
                n,
                self.triangles.len()
            )));
        }
        for (i, &r) in self.node_r.iter().enumerate() {
            if !r.is_finite() || !self.node_z[i].is_finite() {
                return Err(XgcError::MalformedData(format!(
                    "node {i} has non-finite position ({r}, {})",
                    self.node_z[i]
                )));
            }
        }
        for (t, tri) in self.triangles.iter().enumerate() {
            for &v in tri {
                if v >= n {
                    return Err(XgcError::MalformedData(format!(
                        "triangle {t} references node {v}, mesh has {n} nodes"
                    )));
                }
            }
        }
        if let Some(ref eq) = self.equilibrium {
            if eq.len() != n {
                return Err(XgcError::MalformedData(format!(
                    "equilibrium has {} values for {} nodes",
                    eq.len(),
                    n
                )));
            }
        }
        if let Some(ref fluc) = self.fluctuation {
            if fluc.ncols() != n {
                return Err(XgcError::MalformedData(format!(
                    "fluctuation rows have {} values for {} nodes",
                    fluc.ncols(),
                    n
                )));
            }
            if fluc.nrows() == 0 {
                return Err(XgcError::MalformedData(
                    "fluctuation present but has zero planes".to_string(),
                ));
            }
        }
        Ok(())
    }
}
