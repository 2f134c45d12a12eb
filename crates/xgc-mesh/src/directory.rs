// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Directory Catalog
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Directory-backed catalog over converted XGC output.
//!
//! Layout of a catalog directory:
//!
//! ```text
//! mesh.json              geometry + plane count (time-independent)
//! equilibrium.json       per-node background density
//! snapshot_00042.json    per-plane fluctuation rows for time index 42
//! ```
//!
//! The simulation's native files are converted into this layout by an
//! external step; this module only reads.

use crate::catalog::{FieldSelection, MeshCatalog};
use crate::snapshot::MeshSnapshot;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use xgc_types::error::{XgcError, XgcResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MeshFile {
    node_r: Vec<f64>,
    node_z: Vec<f64>,
    triangles: Vec<[usize; 3]>,
    n_planes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EquilibriumFile {
    electron_density: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotFile {
    fluctuation: Vec<Vec<f64>>,
}

/// Read-only catalog rooted at one directory.
pub struct DirectoryCatalog {
    root: PathBuf,
    mesh: MeshFile,
}

impl DirectoryCatalog {
    /// Open a catalog directory. Reads and checks the geometry once;
    /// per-step files are read on demand.
    pub fn open(root: impl Into<PathBuf>) -> XgcResult<Self> {
        let root = root.into();
        let mesh: MeshFile = read_json(&root.join("mesh.json"))?;

        if mesh.node_r.len() != mesh.node_z.len() {
            return Err(XgcError::MalformedData(format!(
                "mesh.json node arrays disagree: {} R values, {} Z values",
                mesh.node_r.len(),
                mesh.node_z.len()
            )));
        }
        if mesh.n_planes < 1 {
            return Err(XgcError::MalformedData(
                "mesh.json declares zero toroidal planes".to_string(),
            ));
        }

        Ok(DirectoryCatalog { root, mesh })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn snapshot_path(&self, time_index: usize) -> PathBuf {
        self.root.join(format!("snapshot_{time_index:05}.json"))
    }

    fn read_equilibrium(&self) -> XgcResult<Array1<f64>> {
        let eq: EquilibriumFile = read_json(&self.root.join("equilibrium.json"))?;
        if eq.electron_density.len() != self.mesh.node_r.len() {
            return Err(XgcError::MalformedData(format!(
                "equilibrium.json has {} values for {} nodes",
                eq.electron_density.len(),
                self.mesh.node_r.len()
            )));
        }
        Ok(Array1::from_vec(eq.electron_density))
    }

    fn read_fluctuation(&self, time_index: usize) -> XgcResult<Array2<f64>> {
        let path = self.snapshot_path(time_index);
        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(XgcError::DataNotFound { time_index });
            }
            Err(e) => return Err(e.into()),
        };
        let file: SnapshotFile = serde_json::from_str(&contents)?;

        let n_nodes = self.mesh.node_r.len();
        if file.fluctuation.len() != self.mesh.n_planes {
            return Err(XgcError::MalformedData(format!(
                "snapshot {} has {} fluctuation planes, mesh declares {}",
                time_index,
                file.fluctuation.len(),
                self.mesh.n_planes
            )));
        }
        let mut fluc = Array2::zeros((self.mesh.n_planes, n_nodes));
        for (p, row) in file.fluctuation.iter().enumerate() {
            if row.len() != n_nodes {
                return Err(XgcError::MalformedData(format!(
                    "snapshot {} plane {} has {} values for {} nodes",
                    time_index,
                    p,
                    row.len(),
                    n_nodes
                )));
            }
            for (i, &v) in row.iter().enumerate() {
                fluc[[p, i]] = v;
            }
        }
        Ok(fluc)
    }
}

impl MeshCatalog for DirectoryCatalog {
    fn snapshot(&self, time_index: usize, fields: FieldSelection) -> XgcResult<MeshSnapshot> {
        let equilibrium = if fields.wants_equilibrium() {
            Some(self.read_equilibrium()?)
        } else {
            None
        };
        let fluctuation = if fields.wants_fluctuation() {
            Some(self.read_fluctuation(time_index)?)
        } else {
            // Still refuse to hand out data for absent time steps.
            if !self.snapshot_path(time_index).exists() {
                return Err(XgcError::DataNotFound { time_index });
            }
            None
        };

        Ok(MeshSnapshot {
            node_r: Array1::from_vec(self.mesh.node_r.clone()),
            node_z: Array1::from_vec(self.mesh.node_z.clone()),
            triangles: self.mesh.triangles.clone(),
            equilibrium,
            fluctuation,
        })
    }

    fn n_planes(&self) -> usize {
        self.mesh.n_planes
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> XgcResult<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
