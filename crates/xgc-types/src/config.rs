// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Load Configuration
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{XgcError, XgcResult};
use serde::{Deserialize, Serialize};

/// Which density components one load call retrieves.
///
/// The legacy driver interface carried two independent booleans
/// (`Full_Load`, `Fluc_Only`); those express three meaningful modes and
/// one ambiguous combination. The enum keeps only the three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Equilibrium plus amplified fluctuation.
    Full,
    /// Amplified fluctuation alone; equilibrium is never materialized.
    FluctuationOnly,
    /// Background density alone.
    EquilibriumOnly,
}

impl LoadMode {
    /// Map the legacy flag pair onto the enum. `fluctuation_only` wins:
    /// when it is set, `full_load` is irrelevant.
    pub fn from_flags(full_load: bool, fluctuation_only: bool) -> Self {
        if fluctuation_only {
            LoadMode::FluctuationOnly
        } else if full_load {
            LoadMode::Full
        } else {
            LoadMode::EquilibriumOnly
        }
    }

    pub fn wants_equilibrium(self) -> bool {
        matches!(self, LoadMode::Full | LoadMode::EquilibriumOnly)
    }

    pub fn wants_fluctuation(self) -> bool {
        matches!(self, LoadMode::Full | LoadMode::FluctuationOnly)
    }
}

/// Everything one load call needs besides the grid and the data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRequest {
    /// First simulation time index (inclusive).
    pub time_start: usize,
    /// Last simulation time index (inclusive).
    pub time_end: usize,
    /// Step between selected time indices.
    #[serde(default = "default_stride")]
    pub time_stride: usize,
    /// Scale factor applied to the fluctuating component.
    #[serde(default = "default_amplifier")]
    pub amplifier: f64,
    /// Number of toroidal cross-sections in the output.
    #[serde(default = "default_cross_section")]
    pub n_cross_section: usize,
    #[serde(default = "default_mode")]
    pub mode: LoadMode,
}

fn default_stride() -> usize {
    1
}
fn default_amplifier() -> f64 {
    1.0
}
fn default_cross_section() -> usize {
    1
}
fn default_mode() -> LoadMode {
    LoadMode::Full
}

impl LoadRequest {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> XgcResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let request: Self = serde_json::from_str(&contents)?;
        request.validate()?;
        Ok(request)
    }

    /// Reject malformed requests before any data source is touched.
    pub fn validate(&self) -> XgcResult<()> {
        if self.time_stride < 1 {
            return Err(XgcError::InvalidRange(
                "time stride must be >= 1".to_string(),
            ));
        }
        if self.time_start > self.time_end {
            return Err(XgcError::InvalidRange(format!(
                "time range inverted: start={} > end={}",
                self.time_start, self.time_end
            )));
        }
        if self.n_cross_section < 1 {
            return Err(XgcError::InvalidConfiguration(
                "n_cross_section must be >= 1".to_string(),
            ));
        }
        if !self.amplifier.is_finite() {
            return Err(XgcError::InvalidConfiguration(format!(
                "amplifier must be finite, got {}",
                self.amplifier
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> LoadRequest {
        LoadRequest {
            time_start: 1,
            time_end: 3,
            time_stride: 1,
            amplifier: 1.0,
            n_cross_section: 4,
            mode: LoadMode::Full,
        }
    }

    #[test]
    fn test_flag_mapping() {
        assert_eq!(LoadMode::from_flags(true, false), LoadMode::Full);
        assert_eq!(LoadMode::from_flags(false, false), LoadMode::EquilibriumOnly);
        assert_eq!(LoadMode::from_flags(false, true), LoadMode::FluctuationOnly);
        // The ambiguous combination collapses to fluctuation-only.
        assert_eq!(LoadMode::from_flags(true, true), LoadMode::FluctuationOnly);
    }

    #[test]
    fn test_validate_accepts_valid_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_stride() {
        let mut req = valid_request();
        req.time_stride = 0;
        assert!(matches!(req.validate(), Err(XgcError::InvalidRange(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut req = valid_request();
        req.time_start = 5;
        req.time_end = 2;
        assert!(matches!(req.validate(), Err(XgcError::InvalidRange(_))));
    }

    #[test]
    fn test_validate_rejects_zero_cross_sections() {
        let mut req = valid_request();
        req.n_cross_section = 0;
        assert!(matches!(
            req.validate(),
            Err(XgcError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_nan_amplifier() {
        let mut req = valid_request();
        req.amplifier = f64::NAN;
        assert!(matches!(
            req.validate(),
            Err(XgcError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let req = valid_request();
        let json = serde_json::to_string_pretty(&req).unwrap();
        let req2: LoadRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.time_start, req2.time_start);
        assert_eq!(req.n_cross_section, req2.n_cross_section);
        assert_eq!(req.mode, req2.mode);
    }

    #[test]
    fn test_defaults_fill_in() {
        let req: LoadRequest =
            serde_json::from_str(r#"{"time_start": 1, "time_end": 1}"#).unwrap();
        assert_eq!(req.time_stride, 1);
        assert_eq!(req.n_cross_section, 1);
        assert!((req.amplifier - 1.0).abs() < 1e-15);
        assert_eq!(req.mode, LoadMode::Full);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join("xgc_types_load_request_test.json");
        std::fs::write(
            &path,
            r#"{"time_start": 2, "time_end": 8, "time_stride": 2, "mode": "fluctuation_only"}"#,
        )
        .unwrap();
        let req = LoadRequest::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(req.time_start, 2);
        assert_eq!(req.mode, LoadMode::FluctuationOnly);
        std::fs::remove_file(&path).ok();
    }
}
