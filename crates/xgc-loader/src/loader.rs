// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Loader
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The load entry point.
//!
//! Time indices are independent: one snapshot read plus interpolation
//! each, no shared mutable state. The sweep runs them in parallel and
//! collects results in selection order, so completion order never shows
//! in the output. Any failure aborts the whole load; a partial field is
//! never returned.

use crate::assemble::assemble;
use crate::fluctuation::compose;
use crate::interp::PlaneInterpolator;
use crate::timeline::TimeSeries;
use crate::toroidal::{replicate_plane, replicate_volume};
use ndarray::{Array2, ArrayD};
use rayon::prelude::*;
use xgc_mesh::{FieldSelection, MeshCatalog, MeshSnapshot};
use xgc_types::config::{LoadMode, LoadRequest};
use xgc_types::error::{XgcError, XgcResult};
use xgc_types::field::DensityField;
use xgc_types::grid::SampleGrid;

/// Resamples density output from one mesh catalog onto sampling grids.
pub struct XgcLoader<C> {
    catalog: C,
}

impl<C: MeshCatalog + Sync> XgcLoader<C> {
    pub fn new(catalog: C) -> Self {
        XgcLoader { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Run one load: validate, sweep the time series, assemble.
    ///
    /// All configuration errors are raised before the catalog is
    /// touched.
    pub fn load(&self, grid: &SampleGrid, request: &LoadRequest) -> XgcResult<DensityField> {
        request.validate()?;
        self.check_toroidal_coverage(grid, request)?;

        let series = TimeSeries::new(request.time_start, request.time_end, request.time_stride)?;
        let indices = series.indices();
        let selection = FieldSelection::from(request.mode);

        let slabs = indices
            .par_iter()
            .map(|&t| self.load_slab(grid, request, selection, t))
            .collect::<XgcResult<Vec<_>>>()?;

        assemble(slabs, indices)
    }

    /// A 3D load with a fluctuating component needs genuinely distinct
    /// toroidal data: at least two source planes, and no more
    /// cross-sections than the source can tell apart.
    fn check_toroidal_coverage(&self, grid: &SampleGrid, request: &LoadRequest) -> XgcResult<()> {
        if matches!(grid, SampleGrid::TwoD(_)) || !request.mode.wants_fluctuation() {
            return Ok(());
        }
        let available = self.catalog.n_planes();
        if available < 2 {
            return Err(XgcError::InvalidConfiguration(format!(
                "3D fluctuation load needs >= 2 toroidal planes, source has {available}"
            )));
        }
        if request.n_cross_section > available {
            return Err(XgcError::InvalidConfiguration(format!(
                "requested {} cross-sections, source distinguishes only {available}",
                request.n_cross_section
            )));
        }
        Ok(())
    }

    /// One time index: snapshot, interpolate, decompose, replicate.
    fn load_slab(
        &self,
        grid: &SampleGrid,
        request: &LoadRequest,
        selection: FieldSelection,
        time_index: usize,
    ) -> XgcResult<ArrayD<f64>> {
        let snapshot = self.catalog.snapshot(time_index, selection)?;
        snapshot.validate()?;

        let interp = PlaneInterpolator::new(&snapshot, grid.poloidal());
        let equilibrium = match snapshot.equilibrium {
            Some(ref eq) => Some(interp.interpolate(eq.view())?),
            None => None,
        };

        match grid {
            SampleGrid::TwoD(_) => {
                // Axisymmetric sampling: every cross-section carries the
                // first source plane.
                let fluctuation = if request.mode.wants_fluctuation() {
                    let fluc = require_fluctuation(&snapshot, time_index)?;
                    Some(interp.interpolate(fluc.row(0))?)
                } else {
                    None
                };
                let plane = compose(
                    equilibrium.as_ref(),
                    fluctuation.as_ref(),
                    request.amplifier,
                    request.mode,
                )?;
                Ok(replicate_plane(&plane, request.n_cross_section).into_dyn())
            }
            SampleGrid::ThreeD(g3) => {
                let fields: Vec<Array2<f64>> = if request.mode.wants_fluctuation() {
                    let fluc = require_fluctuation(&snapshot, time_index)?;
                    let mut fields = Vec::with_capacity(fluc.nrows());
                    for p in 0..fluc.nrows() {
                        let plane_fluc = interp.interpolate(fluc.row(p))?;
                        fields.push(compose(
                            equilibrium.as_ref(),
                            Some(&plane_fluc),
                            request.amplifier,
                            request.mode,
                        )?);
                    }
                    fields
                } else {
                    vec![compose(
                        equilibrium.as_ref(),
                        None,
                        request.amplifier,
                        request.mode,
                    )?]
                };
                Ok(replicate_volume(&fields, g3, request.n_cross_section)?.into_dyn())
            }
        }
    }
}

fn require_fluctuation(snapshot: &MeshSnapshot, time_index: usize) -> XgcResult<&Array2<f64>> {
    snapshot.fluctuation.as_ref().ok_or_else(|| {
        XgcError::MalformedData(format!(
            "snapshot {time_index} carries no fluctuation data"
        ))
    })
}

/// Legacy-flag entry point, matching the XGC_Loader driver call
/// signature (`Full_Load`, `Fluc_Only`).
///
/// The flag pair collapses to a `LoadMode` (`fluctuation_only` wins)
/// before anything else happens.
#[allow(clippy::too_many_arguments)]
pub fn load<C: MeshCatalog + Sync>(
    catalog: &C,
    grid: &SampleGrid,
    time_start: usize,
    time_end: usize,
    time_stride: usize,
    amplifier: f64,
    n_cross_section: usize,
    full_load: bool,
    fluctuation_only: bool,
) -> XgcResult<DensityField> {
    let request = LoadRequest {
        time_start,
        time_end,
        time_stride,
        amplifier,
        n_cross_section,
        mode: LoadMode::from_flags(full_load, fluctuation_only),
    };
    XgcLoader::new(catalog).load(grid, &request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xgc_mesh::{AnalyticCatalog, AnalyticConfig};
    use xgc_types::grid::{Grid2D, Grid3D};

    fn catalog() -> AnalyticCatalog {
        AnalyticCatalog::new(AnalyticConfig::default()).unwrap()
    }

    fn grid2d(nr: usize, nz: usize) -> SampleGrid {
        SampleGrid::TwoD(Grid2D::new(nr, nz, 1.3, 1.6, -0.5, 0.5).unwrap())
    }

    fn grid3d(nphi: usize) -> SampleGrid {
        SampleGrid::ThreeD(
            Grid3D::new(24, 32, nphi, 1.3, 1.6, -0.5, 0.5, 0.0, 6.0).unwrap(),
        )
    }

    fn request(mode: LoadMode) -> LoadRequest {
        LoadRequest {
            time_start: 1,
            time_end: 3,
            time_stride: 1,
            amplifier: 1.0,
            n_cross_section: 2,
            mode,
        }
    }

    #[test]
    fn test_2d_shape_and_coverage() {
        let loader = XgcLoader::new(catalog());
        let field = loader.load(&grid2d(64, 96), &request(LoadMode::Full)).unwrap();

        assert_eq!(field.shape(), &[3, 2, 64, 96]);
        assert_eq!(field.time_indices(), &[1, 2, 3]);

        // The disc centre is covered, the grid corners are not.
        let plane = field.plane(0, 0).unwrap();
        assert!(plane[[32, 48]].is_finite(), "disc centre should be covered");
        assert!(plane[[0, 0]].is_nan(), "corner outside the hull must be missing");
        assert!(
            field.max_finite().unwrap() > 0.0,
            "covered samples should carry density"
        );
    }

    #[test]
    fn test_components_add_up() {
        let loader = XgcLoader::new(catalog());
        let grid = grid2d(48, 64);

        let full = loader.load(&grid, &request(LoadMode::Full)).unwrap();
        let fluc = loader
            .load(&grid, &request(LoadMode::FluctuationOnly))
            .unwrap();
        let eq = loader
            .load(&grid, &request(LoadMode::EquilibriumOnly))
            .unwrap();

        for ((&f, &d), &e) in full
            .data()
            .iter()
            .zip(fluc.data().iter())
            .zip(eq.data().iter())
        {
            if f.is_nan() {
                assert!(d.is_nan() && e.is_nan(), "missing sets must coincide");
            } else {
                assert!(
                    (f - (e + d)).abs() < 1e-9 * f.abs().max(1.0),
                    "full = equilibrium + fluctuation violated: {f} vs {e} + {d}"
                );
            }
        }
    }

    #[test]
    fn test_zero_amplifier_reproduces_equilibrium() {
        let loader = XgcLoader::new(catalog());
        let grid = grid2d(32, 32);

        let mut req = request(LoadMode::Full);
        req.amplifier = 0.0;
        let full = loader.load(&grid, &req).unwrap();
        let eq = loader
            .load(&grid, &request(LoadMode::EquilibriumOnly))
            .unwrap();

        for (&f, &e) in full.data().iter().zip(eq.data().iter()) {
            if f.is_nan() {
                assert!(e.is_nan());
            } else {
                assert!((f - e).abs() < 1e-12 * f.abs().max(1.0));
            }
        }
    }

    #[test]
    fn test_missing_time_index_aborts() {
        let config = AnalyticConfig {
            last_time: 2,
            ..Default::default()
        };
        let loader = XgcLoader::new(AnalyticCatalog::new(config).unwrap());

        let mut req = request(LoadMode::Full);
        req.time_end = 5;
        let err = loader.load(&grid2d(16, 16), &req).unwrap_err();
        assert!(matches!(err, XgcError::DataNotFound { .. }));
    }

    #[test]
    fn test_3d_shape() {
        let loader = XgcLoader::new(catalog());
        let field = loader.load(&grid3d(6), &request(LoadMode::Full)).unwrap();
        assert_eq!(field.shape(), &[3, 2, 24, 32, 6]);
        assert!(field.volume(0, 1).is_ok());
    }

    #[test]
    fn test_3d_coverage_limit() {
        let loader = XgcLoader::new(catalog()); // 8 source planes
        let mut req = request(LoadMode::Full);
        req.n_cross_section = 16;

        let err = loader.load(&grid3d(4), &req).unwrap_err();
        assert!(matches!(err, XgcError::InvalidConfiguration(_)));

        // Equilibrium-only loads are axisymmetric and exempt.
        req.mode = LoadMode::EquilibriumOnly;
        assert!(loader.load(&grid3d(4), &req).is_ok());

        // A 2D grid replicates freely as well.
        req.mode = LoadMode::Full;
        assert!(loader.load(&grid2d(16, 16), &req).is_ok());
    }

    #[test]
    fn test_validation_runs_before_io() {
        // The catalog has no time step 9; an invalid stride must win.
        let config = AnalyticConfig {
            last_time: 2,
            ..Default::default()
        };
        let loader = XgcLoader::new(AnalyticCatalog::new(config).unwrap());
        let mut req = request(LoadMode::Full);
        req.time_start = 9;
        req.time_end = 9;
        req.time_stride = 0;

        let err = loader.load(&grid2d(8, 8), &req).unwrap_err();
        assert!(matches!(err, XgcError::InvalidRange(_)));
    }

    #[test]
    fn test_legacy_flags_entry_point() {
        let cat = catalog();
        let grid = grid2d(24, 24);

        let field = load(&cat, &grid, 1, 1, 1, 1.0, 1, true, false).unwrap();
        assert_eq!(field.shape(), &[1, 1, 24, 24]);

        let fluc_only = load(&cat, &grid, 1, 1, 1, 1.0, 1, true, true).unwrap();
        let via_mode = XgcLoader::new(&cat)
            .load(
                &grid,
                &LoadRequest {
                    time_start: 1,
                    time_end: 1,
                    time_stride: 1,
                    amplifier: 1.0,
                    n_cross_section: 1,
                    mode: LoadMode::FluctuationOnly,
                },
            )
            .unwrap();
        for (&a, &b) in fluc_only.data().iter().zip(via_mode.data().iter()) {
            assert!(a.to_bits() == b.to_bits(), "flag mapping must not change data");
        }
    }

    #[test]
    fn test_cross_sections_identical_for_2d() {
        let loader = XgcLoader::new(catalog());
        let mut req = request(LoadMode::Full);
        req.n_cross_section = 3;
        let field = loader.load(&grid2d(24, 24), &req).unwrap();

        let base = field.plane(0, 0).unwrap();
        for c in 1..3 {
            let other = field.plane(0, c).unwrap();
            for (&a, &b) in base.iter().zip(other.iter()) {
                assert!(
                    a.to_bits() == b.to_bits(),
                    "2D cross-sections must replicate the same plane"
                );
            }
        }
    }
}
