//! Final compositing of the cached layers into the visible frame.

use crate::api::PipelineError;
use crate::raster::{Raster, CHANNELS};

/// Produce the displayed raster.
///
/// - `show_original`: a copy of `source`, ignoring every other layer
/// - otherwise: `dithered`, with `bloom` (if any) added on top using an
///   additive "lighter" blend weighted by bloom alpha:
///   `rgb = min(255, base + bloom * bloom_a / 255)`,
///   `a = min(255, base_a + bloom_a)`
///
/// # Errors
///
/// [`PipelineError::DimensionMismatch`] if `dithered` or `bloom` differ in
/// size from `source`.
pub fn composite(
    dithered: &Raster,
    bloom: Option<&Raster>,
    source: &Raster,
    show_original: bool,
) -> Result<Raster, PipelineError> {
    if show_original {
        return Ok(source.clone());
    }

    ensure_same_size(source, dithered)?;
    let mut output = dithered.clone();

    let Some(bloom) = bloom else {
        return Ok(output);
    };
    ensure_same_size(source, bloom)?;

    for (base, glow) in output
        .as_bytes_mut()
        .chunks_exact_mut(CHANNELS)
        .zip(bloom.as_bytes().chunks_exact(CHANNELS))
    {
        if glow[3] == 0 {
            continue;
        }
        let weight = glow[3] as f64 / 255.0;
        for c in 0..3 {
            let lit = base[c] as f64 + glow[c] as f64 * weight;
            base[c] = lit.round_ties_even().min(255.0) as u8;
        }
        base[3] = base[3].saturating_add(glow[3]);
    }

    Ok(output)
}

fn ensure_same_size(expected: &Raster, layer: &Raster) -> Result<(), PipelineError> {
    if expected.dimensions() != layer.dimensions() {
        return Err(PipelineError::DimensionMismatch {
            expected: expected.dimensions(),
            actual: layer.dimensions(),
        });
    }
    Ok(())
}
