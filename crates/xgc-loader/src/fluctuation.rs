// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Fluctuation Decomposer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::{Array2, Zip};
use xgc_types::config::LoadMode;
use xgc_types::error::{XgcError, XgcResult};

/// Combine interpolated equilibrium and fluctuation planes according to
/// the load mode:
///
/// - `Full`: equilibrium + amplifier × fluctuation
/// - `FluctuationOnly`: amplifier × fluctuation
/// - `EquilibriumOnly`: equilibrium
///
/// Amplifier 1 reproduces the unscaled simulation fluctuation exactly;
/// missing samples (NaN) propagate.
pub fn compose(
    equilibrium: Option<&Array2<f64>>,
    fluctuation: Option<&Array2<f64>>,
    amplifier: f64,
    mode: LoadMode,
) -> XgcResult<Array2<f64>> {
    match mode {
        LoadMode::Full => {
            let eq = require(equilibrium, "equilibrium")?;
            let fluc = require(fluctuation, "fluctuation")?;
            if eq.dim() != fluc.dim() {
                return Err(XgcError::MalformedData(format!(
                    "component shapes disagree: {:?} vs {:?}",
                    eq.dim(),
                    fluc.dim()
                )));
            }
            let mut out = Array2::zeros(eq.dim());
            Zip::from(&mut out)
                .and(eq)
                .and(fluc)
                .for_each(|o, &e, &f| *o = e + amplifier * f);
            Ok(out)
        }
        LoadMode::FluctuationOnly => {
            let fluc = require(fluctuation, "fluctuation")?;
            Ok(fluc.mapv(|f| amplifier * f))
        }
        LoadMode::EquilibriumOnly => Ok(require(equilibrium, "equilibrium")?.clone()),
    }
}

fn require<'a>(
    component: Option<&'a Array2<f64>>,
    name: &str,
) -> XgcResult<&'a Array2<f64>> {
    component.ok_or_else(|| {
        XgcError::MalformedData(format!("load mode needs {name} data, none was supplied"))
    })
}
