// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Sampling Grids
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Regular Cartesian sampling lattices the loader projects onto.
//!
//! Axis convention for everything built on these grids: axis 0 = R,
//! axis 1 = Z, axis 2 = toroidal angle φ (3D only). Assembled fields
//! carry the grid sample counts in exactly that order.

use crate::error::{XgcError, XgcResult};
use ndarray::Array1;

/// 2D poloidal sampling grid over an R–Z bounding box.
///
/// Coordinates are evenly spaced and include both endpoints. A
/// single-sample axis pins its coordinate at the lower bound.
#[derive(Debug, Clone)]
pub struct Grid2D {
    pub nr: usize,
    pub nz: usize,
    pub r: Array1<f64>, // R coordinates [nr]
    pub z: Array1<f64>, // Z coordinates [nz]
    pub dr: f64,
    pub dz: f64,
}

impl Grid2D {
    /// Create a validated grid from its bounding box and sample counts.
    pub fn new(
        nr: usize,
        nz: usize,
        r_min: f64,
        r_max: f64,
        z_min: f64,
        z_max: f64,
    ) -> XgcResult<Self> {
        check_axis("R", r_min, r_max, nr)?;
        check_axis("Z", z_min, z_max, nz)?;

        let r = Array1::linspace(r_min, r_max, nr);
        let z = Array1::linspace(z_min, z_max, nz);
        let dr = if nr > 1 { r[1] - r[0] } else { r_max - r_min };
        let dz = if nz > 1 { z[1] - z[0] } else { z_max - z_min };

        Ok(Grid2D {
            nr,
            nz,
            r,
            z,
            dr,
            dz,
        })
    }

    pub fn r_min(&self) -> f64 {
        self.r[0]
    }

    pub fn r_max(&self) -> f64 {
        self.r[self.nr - 1]
    }

    pub fn z_min(&self) -> f64 {
        self.z[0]
    }

    pub fn z_max(&self) -> f64 {
        self.z[self.nz - 1]
    }
}

/// 3D sampling grid: a poloidal R–Z lattice swept along a toroidal
/// angle axis. φ is in radians.
#[derive(Debug, Clone)]
pub struct Grid3D {
    pub poloidal: Grid2D,
    pub nphi: usize,
    pub phi: Array1<f64>, // toroidal angles [nphi]
    pub dphi: f64,
}

impl Grid3D {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        nr: usize,
        nz: usize,
        nphi: usize,
        r_min: f64,
        r_max: f64,
        z_min: f64,
        z_max: f64,
        phi_min: f64,
        phi_max: f64,
    ) -> XgcResult<Self> {
        let poloidal = Grid2D::new(nr, nz, r_min, r_max, z_min, z_max)?;
        check_axis("phi", phi_min, phi_max, nphi)?;

        let phi = Array1::linspace(phi_min, phi_max, nphi);
        let dphi = if nphi > 1 {
            phi[1] - phi[0]
        } else {
            phi_max - phi_min
        };

        Ok(Grid3D {
            poloidal,
            nphi,
            phi,
            dphi,
        })
    }
}

/// The target lattice of one load call.
#[derive(Debug, Clone)]
pub enum SampleGrid {
    TwoD(Grid2D),
    ThreeD(Grid3D),
}

impl SampleGrid {
    /// The poloidal plane every interpolation pass maps onto.
    pub fn poloidal(&self) -> &Grid2D {
        match self {
            SampleGrid::TwoD(g) => g,
            SampleGrid::ThreeD(g) => &g.poloidal,
        }
    }

    /// Grid sample counts in declared axis order.
    pub fn sample_shape(&self) -> Vec<usize> {
        match self {
            SampleGrid::TwoD(g) => vec![g.nr, g.nz],
            SampleGrid::ThreeD(g) => vec![g.poloidal.nr, g.poloidal.nz, g.nphi],
        }
    }
}

fn check_axis(name: &str, min: f64, max: f64, count: usize) -> XgcResult<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(XgcError::InvalidGrid(format!(
            "{name} bounds must be finite: [{min}, {max}]"
        )));
    }
    if min >= max {
        return Err(XgcError::InvalidGrid(format!(
            "{name} bounds inverted or degenerate: [{min}, {max}]"
        )));
    }
    if count < 1 {
        return Err(XgcError::InvalidGrid(format!(
            "{name} sample count must be >= 1, got {count}"
        )));
    }
    Ok(())
}
