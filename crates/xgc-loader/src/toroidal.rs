// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Toroidal Replicator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Extends interpolated poloidal planes across toroidal cross-sections.
//!
//! 2D grids replicate one plane at every cross-section (axisymmetric
//! sampling). 3D grids blend between the source planes linearly in
//! toroidal angle; the source planes sit at equally spaced angles
//! `2π p / n_planes`, and cross-section `c` shifts the angle origin by
//! `2π c / n_cross_section`.

use ndarray::{Array2, Array3, Array4};
use std::f64::consts::TAU;
use xgc_types::error::{XgcError, XgcResult};
use xgc_types::grid::Grid3D;

/// One plane copied to every cross-section of a 2D-grid load.
/// Output shape: [n_cross_section, nr, nz].
pub fn replicate_plane(plane: &Array2<f64>, n_cross_section: usize) -> Array3<f64> {
    let (nr, nz) = plane.dim();
    Array3::from_shape_fn((n_cross_section, nr, nz), |(_, ir, iz)| plane[[ir, iz]])
}

/// Sample the toroidal-angle axis of a 3D grid from per-plane poloidal
/// fields. Output shape: [n_cross_section, nr, nz, nphi].
///
/// A single field means an axisymmetric component (equilibrium): it is
/// carried to every angle unchanged. Anything with two or more fields
/// is blended between the bracketing planes.
pub fn replicate_volume(
    plane_fields: &[Array2<f64>],
    grid: &Grid3D,
    n_cross_section: usize,
) -> XgcResult<Array4<f64>> {
    let n_planes = plane_fields.len();
    if n_planes == 0 {
        return Err(XgcError::MalformedData(
            "toroidal replication needs at least one poloidal field".to_string(),
        ));
    }
    let (nr, nz) = plane_fields[0].dim();
    if (nr, nz) != (grid.poloidal.nr, grid.poloidal.nz) {
        return Err(XgcError::MalformedData(format!(
            "poloidal field is {nr}x{nz}, grid is {}x{}",
            grid.poloidal.nr, grid.poloidal.nz
        )));
    }
    for (p, field) in plane_fields.iter().enumerate() {
        if field.dim() != (nr, nz) {
            return Err(XgcError::MalformedData(format!(
                "poloidal field {p} is {:?}, expected ({nr}, {nz})",
                field.dim()
            )));
        }
    }

    let nphi = grid.nphi;
    let mut out = Array4::zeros((n_cross_section, nr, nz, nphi));

    if n_planes == 1 {
        for c in 0..n_cross_section {
            for ir in 0..nr {
                for iz in 0..nz {
                    let v = plane_fields[0][[ir, iz]];
                    for ip in 0..nphi {
                        out[[c, ir, iz, ip]] = v;
                    }
                }
            }
        }
        return Ok(out);
    }

    let spacing = TAU / n_planes as f64;
    for c in 0..n_cross_section {
        let offset = TAU * c as f64 / n_cross_section as f64;
        for ip in 0..nphi {
            let angle = (grid.phi[ip] + offset).rem_euclid(TAU);
            let s = angle / spacing;
            let k0 = (s.floor() as usize) % n_planes;
            let k1 = (k0 + 1) % n_planes;
            let w = s - s.floor();

            let f0 = &plane_fields[k0];
            let f1 = &plane_fields[k1];
            for ir in 0..nr {
                for iz in 0..nz {
                    out[[c, ir, iz, ip]] =
                        (1.0 - w) * f0[[ir, iz]] + w * f1[[ir, iz]];
                }
            }
        }
    }
    Ok(out)
}
