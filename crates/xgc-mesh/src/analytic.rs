// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Analytic Catalog
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Deterministic synthetic data source.
//!
//! A triangulated disc in the R–Z plane with a Gaussian background
//! density and a rotating poloidal-mode fluctuation. Every value is an
//! analytic function of (time index, plane, node), so the interpolation
//! core can be exercised without real simulation files.

use crate::catalog::{FieldSelection, MeshCatalog};
use crate::snapshot::MeshSnapshot;
use ndarray::{Array1, Array2};
use std::f64::consts::PI;
use xgc_types::error::{XgcError, XgcResult};

#[derive(Debug, Clone)]
pub struct AnalyticConfig {
    /// Disc centre in R.
    pub r_center: f64,
    /// Disc centre in Z.
    pub z_center: f64,
    /// Disc radius.
    pub minor_radius: f64,
    /// Concentric node rings between centre and edge.
    pub n_rings: usize,
    /// Nodes per ring.
    pub n_theta: usize,
    /// Distinct toroidal planes per time step.
    pub n_planes: usize,
    /// Peak background density [m^-3].
    pub peak_density: f64,
    /// Fluctuation amplitude relative to the local background.
    pub fluctuation_level: f64,
    /// Poloidal mode number of the fluctuation.
    pub mode_number: usize,
    /// Largest valid time index (inclusive, starting at 0).
    pub last_time: usize,
}

impl Default for AnalyticConfig {
    fn default() -> Self {
        Self {
            r_center: 1.45,
            z_center: 0.0,
            minor_radius: 0.14,
            n_rings: 16,
            n_theta: 48,
            n_planes: 8,
            peak_density: 1.0e19,
            fluctuation_level: 0.02,
            mode_number: 3,
            last_time: 100,
        }
    }
}

impl AnalyticConfig {
    pub fn validate(&self) -> XgcResult<()> {
        if self.n_rings < 1 || self.n_theta < 3 {
            return Err(XgcError::InvalidConfiguration(format!(
                "analytic mesh needs n_rings >= 1 and n_theta >= 3, got {} / {}",
                self.n_rings, self.n_theta
            )));
        }
        if self.n_planes < 1 {
            return Err(XgcError::InvalidConfiguration(
                "analytic catalog needs n_planes >= 1".to_string(),
            ));
        }
        if !self.minor_radius.is_finite() || self.minor_radius <= 0.0 {
            return Err(XgcError::InvalidConfiguration(format!(
                "analytic minor_radius must be positive, got {}",
                self.minor_radius
            )));
        }
        if !self.peak_density.is_finite() || self.peak_density <= 0.0 {
            return Err(XgcError::InvalidConfiguration(format!(
                "analytic peak_density must be positive, got {}",
                self.peak_density
            )));
        }
        Ok(())
    }
}

/// Synthetic mesh catalog with analytic density data.
pub struct AnalyticCatalog {
    config: AnalyticConfig,
    node_r: Array1<f64>,
    node_z: Array1<f64>,
    triangles: Vec<[usize; 3]>,
    // Polar node coordinates relative to the disc centre, reused by
    // every density evaluation.
    rho: Vec<f64>,
    theta: Vec<f64>,
}

impl AnalyticCatalog {
    pub fn new(config: AnalyticConfig) -> XgcResult<Self> {
        config.validate()?;

        let n_rings = config.n_rings;
        let n_theta = config.n_theta;
        let n_nodes = 1 + n_rings * n_theta;

        let mut node_r = Array1::zeros(n_nodes);
        let mut node_z = Array1::zeros(n_nodes);
        let mut rho = vec![0.0; n_nodes];
        let mut theta = vec![0.0; n_nodes];

        node_r[0] = config.r_center;
        node_z[0] = config.z_center;

        let ring_node = |ring: usize, k: usize| 1 + (ring - 1) * n_theta + k % n_theta;

        for ring in 1..=n_rings {
            let radius = config.minor_radius * ring as f64 / n_rings as f64;
            for k in 0..n_theta {
                let angle = 2.0 * PI * k as f64 / n_theta as f64;
                let idx = ring_node(ring, k);
                node_r[idx] = config.r_center + radius * angle.cos();
                node_z[idx] = config.z_center + radius * angle.sin();
                rho[idx] = radius;
                theta[idx] = angle;
            }
        }

        // Fan around the centre, then two triangles per quad between
        // consecutive rings.
        let mut triangles = Vec::with_capacity(n_theta * (2 * n_rings - 1));
        for k in 0..n_theta {
            triangles.push([0, ring_node(1, k), ring_node(1, k + 1)]);
        }
        for ring in 1..n_rings {
            for k in 0..n_theta {
                let a = ring_node(ring, k);
                let b = ring_node(ring, k + 1);
                let c = ring_node(ring + 1, k);
                let d = ring_node(ring + 1, k + 1);
                triangles.push([a, c, d]);
                triangles.push([a, d, b]);
            }
        }

        Ok(AnalyticCatalog {
            config,
            node_r,
            node_z,
            triangles,
            rho,
            theta,
        })
    }

    pub fn config(&self) -> &AnalyticConfig {
        &self.config
    }

    pub fn n_nodes(&self) -> usize {
        self.node_r.len()
    }

    /// Background density at polar radius rho.
    fn background(&self, rho: f64) -> f64 {
        let sigma = self.config.minor_radius / 2.0;
        self.config.peak_density * (-rho * rho / (2.0 * sigma * sigma)).exp()
    }

    /// Fluctuation at one node for one plane and time index.
    fn perturbation(&self, node: usize, plane: usize, time_index: usize) -> f64 {
        let phase = self.config.mode_number as f64 * self.theta[node]
            + 2.0 * PI * plane as f64 / self.config.n_planes as f64
            + 0.25 * time_index as f64;
        self.config.fluctuation_level * self.background(self.rho[node]) * phase.cos()
    }
}

impl MeshCatalog for AnalyticCatalog {
    fn snapshot(&self, time_index: usize, fields: FieldSelection) -> XgcResult<MeshSnapshot> {
        if time_index > self.config.last_time {
            return Err(XgcError::DataNotFound { time_index });
        }

        let n_nodes = self.n_nodes();
        let equilibrium = if fields.wants_equilibrium() {
            Some(Array1::from_shape_fn(n_nodes, |i| self.background(self.rho[i])))
        } else {
            None
        };
        let fluctuation = if fields.wants_fluctuation() {
            Some(Array2::from_shape_fn(
                (self.config.n_planes, n_nodes),
                |(p, i)| self.perturbation(i, p, time_index),
            ))
        } else {
            None
        };

        Ok(MeshSnapshot {
            node_r: self.node_r.clone(),
            node_z: self.node_z.clone(),
            triangles: self.triangles.clone(),
            equilibrium,
            fluctuation,
        })
    }

    fn n_planes(&self) -> usize {
        self.config.n_planes
    }
}
