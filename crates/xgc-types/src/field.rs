// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Density Field
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The assembled load result.
//!
//! Shape is `(n_time, n_cross_section, nr, nz)` for 2D grids and
//! `(n_time, n_cross_section, nr, nz, nphi)` for 3D grids. Samples
//! falling outside the source mesh's convex hull hold the missing
//! marker (NaN); everything else is finite.

use crate::error::{XgcError, XgcResult};
use ndarray::{ArrayD, ArrayView2, ArrayView3, Axis, Ix2, Ix3};

/// Electron density resampled onto the requested lattice.
#[derive(Debug, Clone)]
pub struct DensityField {
    data: ArrayD<f64>,
    time_indices: Vec<usize>,
}

impl DensityField {
    /// Wrap an assembled array. The leading axis must match the number
    /// of selected time indices.
    pub fn new(data: ArrayD<f64>, time_indices: Vec<usize>) -> XgcResult<Self> {
        if data.ndim() != 4 && data.ndim() != 5 {
            return Err(XgcError::MalformedData(format!(
                "density field must be 4D or 5D, got {}D",
                data.ndim()
            )));
        }
        if data.shape()[0] != time_indices.len() {
            return Err(XgcError::MalformedData(format!(
                "leading axis {} does not match {} selected time indices",
                data.shape()[0],
                time_indices.len()
            )));
        }
        Ok(DensityField { data, time_indices })
    }

    /// True for the missing marker, false for any real sample.
    pub fn is_missing(value: f64) -> bool {
        value.is_nan()
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Simulation time indices along the leading axis, in selection order.
    pub fn time_indices(&self) -> &[usize] {
        &self.time_indices
    }

    pub fn n_time(&self) -> usize {
        self.time_indices.len()
    }

    pub fn n_cross_section(&self) -> usize {
        self.data.shape()[1]
    }

    /// One poloidal plane of a 2D-grid load, ready for contouring.
    pub fn plane(&self, time_pos: usize, cross_section: usize) -> XgcResult<ArrayView2<'_, f64>> {
        self.slab(time_pos, cross_section)?
            .into_dimensionality::<Ix2>()
            .map_err(|_| {
                XgcError::MalformedData(format!(
                    "plane() needs a 4D field, this one is {}D",
                    self.data.ndim()
                ))
            })
    }

    /// One (R, Z, φ) volume of a 3D-grid load.
    pub fn volume(&self, time_pos: usize, cross_section: usize) -> XgcResult<ArrayView3<'_, f64>> {
        self.slab(time_pos, cross_section)?
            .into_dimensionality::<Ix3>()
            .map_err(|_| {
                XgcError::MalformedData(format!(
                    "volume() needs a 5D field, this one is {}D",
                    self.data.ndim()
                ))
            })
    }

    fn slab(
        &self,
        time_pos: usize,
        cross_section: usize,
    ) -> XgcResult<ndarray::ArrayViewD<'_, f64>> {
        if time_pos >= self.n_time() || cross_section >= self.n_cross_section() {
            return Err(XgcError::InvalidConfiguration(format!(
                "slab ({time_pos}, {cross_section}) outside field of {} x {}",
                self.n_time(),
                self.n_cross_section()
            )));
        }
        Ok(self
            .data
            .index_axis(Axis(0), time_pos)
            .index_axis_move(Axis(0), cross_section))
    }

    /// Largest non-missing sample, if any sample is non-missing.
    pub fn max_finite(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }
}
