// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Property-Based Tests (proptest) for xgc-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for xgc-types using proptest.
//!
//! Covers: grid axis spacing, grid validation, load-mode flag mapping,
//! load-request validation.

use proptest::prelude::*;
use xgc_types::config::{LoadMode, LoadRequest};
use xgc_types::error::XgcError;
use xgc_types::grid::{Grid2D, Grid3D};

// ── Grid Properties ──────────────────────────────────────────────────

proptest! {
    /// Axis coordinates are evenly spaced and include both endpoints.
    #[test]
    fn grid_axes_evenly_spaced(
        nr in 2usize..64,
        nz in 2usize..64,
        r_min in -5.0f64..5.0,
        span in 0.1f64..10.0,
    ) {
        let r_max = r_min + span;
        let grid = Grid2D::new(nr, nz, r_min, r_max, -1.0, 1.0).unwrap();

        prop_assert!((grid.r[0] - r_min).abs() < 1e-12);
        prop_assert!((grid.r[nr - 1] - r_max).abs() < 1e-12);

        let expected_dr = span / (nr - 1) as f64;
        prop_assert!((grid.dr - expected_dr).abs() < 1e-12);
        for i in 1..nr {
            let step = grid.r[i] - grid.r[i - 1];
            prop_assert!((step - expected_dr).abs() < 1e-9,
                "uneven R step at {}: {} vs {}", i, step, expected_dr);
        }
    }

    /// Inverted or degenerate bounds always fail with InvalidGrid.
    #[test]
    fn grid_rejects_non_increasing_bounds(
        nr in 1usize..32,
        lo in -5.0f64..5.0,
        drop in 0.0f64..3.0,
    ) {
        let hi = lo - drop; // hi <= lo
        let result = Grid2D::new(nr, nr, lo, hi, -1.0, 1.0);
        prop_assert!(matches!(result, Err(XgcError::InvalidGrid(_))));
    }

    /// A zero sample count on any axis fails with InvalidGrid.
    #[test]
    fn grid3d_rejects_zero_counts(axis in 0usize..3) {
        let (nr, nz, nphi) = match axis {
            0 => (0, 8, 8),
            1 => (8, 0, 8),
            _ => (8, 8, 0),
        };
        let result = Grid3D::new(nr, nz, nphi, 1.3, 1.6, -0.5, 0.5, 0.0, 1.0);
        prop_assert!(matches!(result, Err(XgcError::InvalidGrid(_))));
    }
}

// ── Load Mode / Request Properties ───────────────────────────────────

proptest! {
    /// fluctuation_only always wins over full_load.
    #[test]
    fn mode_flag_mapping_fluc_only_wins(full_load in any::<bool>()) {
        prop_assert_eq!(
            LoadMode::from_flags(full_load, true),
            LoadMode::FluctuationOnly
        );
    }

    /// Exactly the fluctuation-carrying modes want fluctuation data and
    /// FluctuationOnly never wants equilibrium data.
    #[test]
    fn mode_component_selection(full_load in any::<bool>(), fluc_only in any::<bool>()) {
        let mode = LoadMode::from_flags(full_load, fluc_only);
        if fluc_only {
            prop_assert!(!mode.wants_equilibrium());
            prop_assert!(mode.wants_fluctuation());
        } else if full_load {
            prop_assert!(mode.wants_equilibrium());
            prop_assert!(mode.wants_fluctuation());
        } else {
            prop_assert!(mode.wants_equilibrium());
            prop_assert!(!mode.wants_fluctuation());
        }
    }

    /// Any request with start <= end, stride >= 1, cross sections >= 1
    /// and a finite amplifier validates.
    #[test]
    fn request_validation_accepts_well_formed(
        start in 0usize..100,
        extent in 0usize..100,
        stride in 1usize..10,
        n_cross in 1usize..16,
        amplifier in -100.0f64..100.0,
    ) {
        let req = LoadRequest {
            time_start: start,
            time_end: start + extent,
            time_stride: stride,
            amplifier,
            n_cross_section: n_cross,
            mode: LoadMode::Full,
        };
        prop_assert!(req.validate().is_ok());
    }

    /// An inverted time range always fails with InvalidRange.
    #[test]
    fn request_validation_rejects_inverted_range(
        end in 0usize..100,
        gap in 1usize..50,
    ) {
        let req = LoadRequest {
            time_start: end + gap,
            time_end: end,
            time_stride: 1,
            amplifier: 1.0,
            n_cross_section: 1,
            mode: LoadMode::Full,
        };
        prop_assert!(matches!(req.validate(), Err(XgcError::InvalidRange(_))));
    }
}
