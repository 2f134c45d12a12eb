// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Poloidal Interpolator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Unstructured-mesh to regular-grid interpolation on one poloidal plane.
//!
//! Element location and barycentric weights are computed once per mesh
//! and grid, then reused for every per-node field of the same snapshot
//! (equilibrium and each toroidal plane's fluctuation share the
//! geometry). Grid points outside the mesh's convex hull are marked
//! missing (NaN), never extrapolated.
//!
//! Candidate triangles are scanned in ascending index order and the
//! first containing triangle wins, so a fixed mesh and grid always
//! produce bit-identical output.

use ndarray::{Array2, ArrayView1};
use xgc_mesh::MeshSnapshot;
use xgc_types::error::{XgcError, XgcResult};
use xgc_types::grid::Grid2D;

/// Barycentric containment tolerance. Admits points numerically on a
/// triangle edge, including the hull boundary.
const BARY_TOL: f64 = 1e-10;

/// Degenerate-triangle determinant cutoff.
const MIN_DET: f64 = 1e-30;

#[derive(Debug, Clone, Copy)]
struct Support {
    nodes: [usize; 3],
    weights: [f64; 3],
}

/// Precomputed mapping from one mesh onto one grid's poloidal plane.
pub struct PlaneInterpolator {
    nr: usize,
    nz: usize,
    n_nodes: usize,
    // Row-major [ir * nz + iz]; None marks points outside the mesh.
    supports: Vec<Option<Support>>,
}

impl PlaneInterpolator {
    /// Locate the enclosing triangle and barycentric weights for every
    /// grid point. The snapshot is expected to have passed `validate`.
    pub fn new(snapshot: &MeshSnapshot, grid: &Grid2D) -> Self {
        let nr = grid.nr;
        let nz = grid.nz;
        let node_r = &snapshot.node_r;
        let node_z = &snapshot.node_z;
        let triangles = &snapshot.triangles;

        // Mesh bounding box; points outside it cannot be covered.
        let mut r_lo = f64::INFINITY;
        let mut r_hi = f64::NEG_INFINITY;
        let mut z_lo = f64::INFINITY;
        let mut z_hi = f64::NEG_INFINITY;
        for i in 0..node_r.len() {
            r_lo = r_lo.min(node_r[i]);
            r_hi = r_hi.max(node_r[i]);
            z_lo = z_lo.min(node_z[i]);
            z_hi = z_hi.max(node_z[i]);
        }

        // Uniform bins over the mesh bounding box keep candidate lists
        // short; a triangle lands in every bin its bounding box touches.
        let n_bins = ((triangles.len() as f64 / 2.0).sqrt().ceil() as usize).clamp(1, 256);
        let bin_dr = ((r_hi - r_lo) / n_bins as f64).max(f64::MIN_POSITIVE);
        let bin_dz = ((z_hi - z_lo) / n_bins as f64).max(f64::MIN_POSITIVE);
        let bin_of = |coord: f64, lo: f64, step: f64| -> usize {
            (((coord - lo) / step) as usize).min(n_bins - 1)
        };

        let mut bins: Vec<Vec<usize>> = vec![Vec::new(); n_bins * n_bins];
        for (t, tri) in triangles.iter().enumerate() {
            let tr_lo = tri.iter().map(|&v| node_r[v]).fold(f64::INFINITY, f64::min);
            let tr_hi = tri.iter().map(|&v| node_r[v]).fold(f64::NEG_INFINITY, f64::max);
            let tz_lo = tri.iter().map(|&v| node_z[v]).fold(f64::INFINITY, f64::min);
            let tz_hi = tri.iter().map(|&v| node_z[v]).fold(f64::NEG_INFINITY, f64::max);

            let br0 = bin_of(tr_lo, r_lo, bin_dr);
            let br1 = bin_of(tr_hi, r_lo, bin_dr);
            let bz0 = bin_of(tz_lo, z_lo, bin_dz);
            let bz1 = bin_of(tz_hi, z_lo, bin_dz);
            for br in br0..=br1 {
                for bz in bz0..=bz1 {
                    bins[br * n_bins + bz].push(t);
                }
            }
        }

        let mut supports = vec![None; nr * nz];
        for ir in 0..nr {
            let r = grid.r[ir];
            if r < r_lo || r > r_hi {
                continue;
            }
            let br = bin_of(r, r_lo, bin_dr);
            for iz in 0..nz {
                let z = grid.z[iz];
                if z < z_lo || z > z_hi {
                    continue;
                }
                let bz = bin_of(z, z_lo, bin_dz);

                for &t in &bins[br * n_bins + bz] {
                    let tri = triangles[t];
                    if let Some(weights) = barycentric(
                        r,
                        z,
                        (node_r[tri[0]], node_z[tri[0]]),
                        (node_r[tri[1]], node_z[tri[1]]),
                        (node_r[tri[2]], node_z[tri[2]]),
                    ) {
                        supports[ir * nz + iz] = Some(Support {
                            nodes: tri,
                            weights,
                        });
                        break;
                    }
                }
            }
        }

        PlaneInterpolator {
            nr,
            nz,
            n_nodes: node_r.len(),
            supports,
        }
    }

    /// Interpolate one per-node field onto the plane. Missing points
    /// come back as NaN.
    pub fn interpolate(&self, values: ArrayView1<f64>) -> XgcResult<Array2<f64>> {
        if values.len() != self.n_nodes {
            return Err(XgcError::MalformedData(format!(
                "field has {} values for a mesh of {} nodes",
                values.len(),
                self.n_nodes
            )));
        }

        let mut out = Array2::from_elem((self.nr, self.nz), f64::NAN);
        for ir in 0..self.nr {
            for iz in 0..self.nz {
                if let Some(s) = self.supports[ir * self.nz + iz] {
                    out[[ir, iz]] = s.weights[0] * values[s.nodes[0]]
                        + s.weights[1] * values[s.nodes[1]]
                        + s.weights[2] * values[s.nodes[2]];
                }
            }
        }
        Ok(out)
    }

    /// Grid points covered by the mesh.
    pub fn n_covered(&self) -> usize {
        self.supports.iter().filter(|s| s.is_some()).count()
    }
}

/// Barycentric weights of point p in triangle (a, b, c), or None when
/// the point is outside or the triangle is degenerate.
fn barycentric(
    pr: f64,
    pz: f64,
    a: (f64, f64),
    b: (f64, f64),
    c: (f64, f64),
) -> Option<[f64; 3]> {
    let det = (b.1 - c.1) * (a.0 - c.0) + (c.0 - b.0) * (a.1 - c.1);
    if det.abs() < MIN_DET {
        return None;
    }
    let w0 = ((b.1 - c.1) * (pr - c.0) + (c.0 - b.0) * (pz - c.1)) / det;
    let w1 = ((c.1 - a.1) * (pr - c.0) + (a.0 - c.0) * (pz - c.1)) / det;
    let w2 = 1.0 - w0 - w1;
    if w0 >= -BARY_TOL && w1 >= -BARY_TOL && w2 >= -BARY_TOL {
        Some([w0, w1, w2])
    } else {
        None
    }
}
