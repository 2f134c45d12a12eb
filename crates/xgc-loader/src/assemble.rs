// ─────────────────────────────────────────────────────────────────────
// SCPN XGC Loader — Output Assembler
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::{ArrayD, Axis, IxDyn};
use xgc_types::error::{XgcError, XgcResult};
use xgc_types::field::DensityField;

/// Stack per-time-index slabs (shape `[n_cross_section, ...grid]`) into
/// the final density field, in selection order.
///
/// Slabs arrive here already ordered (the parallel sweep collects its
/// results by index), so each one lands at its deterministic position
/// regardless of completion order. No reordering, no deduplication.
pub fn assemble(slabs: Vec<ArrayD<f64>>, time_indices: Vec<usize>) -> XgcResult<DensityField> {
    if slabs.len() != time_indices.len() {
        return Err(XgcError::MalformedData(format!(
            "{} slabs for {} time indices",
            slabs.len(),
            time_indices.len()
        )));
    }
    let first = slabs.first().ok_or_else(|| {
        XgcError::MalformedData("cannot assemble an empty slab list".to_string())
    })?;
    let slab_shape = first.shape().to_vec();
    for (i, slab) in slabs.iter().enumerate() {
        if slab.shape() != slab_shape.as_slice() {
            return Err(XgcError::MalformedData(format!(
                "slab {i} shape {:?} differs from {:?}",
                slab.shape(),
                slab_shape
            )));
        }
    }

    let mut shape = Vec::with_capacity(slab_shape.len() + 1);
    shape.push(slabs.len());
    shape.extend_from_slice(&slab_shape);

    let mut data = ArrayD::zeros(IxDyn(&shape));
    for (i, slab) in slabs.iter().enumerate() {
        data.index_axis_mut(Axis(0), i).assign(slab);
    }

    DensityField::new(data, time_indices)
}
