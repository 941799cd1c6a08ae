//! Caching pipeline orchestrator.
//!
//! [`Pipeline`] chains the three passes and keeps the dither and bloom
//! layers from the last run. A run with the same source and parameters
//! reuses them; a view toggle ([`Pipeline::recomposite()`]) never recomputes
//! anything but the final composite.

use std::time::Instant;

use tracing::debug;

use super::PipelineError;
use crate::bloom::bloom;
use crate::composite::composite;
use crate::dither::dither;
use crate::params::PipelineParams;
use crate::raster::{Fingerprint, Raster};

/// Identity of a cached set of layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheKey {
    pub source: Fingerprint,
    pub params: PipelineParams,
}

/// Pass counters since the pipeline was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub dither_passes: u64,
    pub bloom_passes: u64,
    pub composite_passes: u64,
    pub cache_hits: u64,
}

#[derive(Debug)]
struct Layers {
    key: CacheKey,
    dithered: Raster,
    bloom: Option<Raster>,
}

/// Dither → bloom → composite, with the intermediate layers cached.
///
/// # Example
///
/// ```
/// use tone_dither::{Pipeline, PipelineParams, Raster};
///
/// let source = Raster::filled(4, 4, [90, 120, 200, 255]);
/// let params = PipelineParams::new().levels(3).bloom(true);
///
/// let mut pipeline = Pipeline::new();
/// let processed = pipeline.run(&source, &params, false).unwrap();
/// let original = pipeline.recomposite(&source, true).unwrap();
///
/// assert_eq!(original, source);
/// assert_eq!(processed.dimensions(), (4, 4));
/// assert_eq!(pipeline.stats().dither_passes, 1);
/// ```
#[derive(Debug, Default)]
pub struct Pipeline {
    layers: Option<Layers>,
    stats: PipelineStats,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `source` with `params`.
    ///
    /// Parameters are sanitized first, so two inputs that clamp to the same
    /// values share a cache entry. Layers are recomputed only when the source
    /// fingerprint or the sanitized parameters differ from the last run.
    ///
    /// # Errors
    ///
    /// [`PipelineError::EmptySource`] for a zero-sized source.
    pub fn run(
        &mut self,
        source: &Raster,
        params: &PipelineParams,
        show_original: bool,
    ) -> Result<Raster, PipelineError> {
        ensure_not_empty(source)?;

        let key = CacheKey {
            source: source.fingerprint(),
            params: params.sanitized(),
        };

        match &self.layers {
            Some(layers) if layers.key == key => {
                self.stats.cache_hits += 1;
                debug!(fingerprint = %key.source, "layer cache hit");
            }
            _ => {
                debug!(fingerprint = %key.source, style = %key.params.style, "layer cache miss");
                self.layers = Some(self.render_layers(source, key));
            }
        }

        self.composite_cached(source, show_original)
    }

    /// Composite again from cached layers, for switching between the
    /// original and processed view.
    ///
    /// # Errors
    ///
    /// [`PipelineError::NothingRendered`] if nothing is cached or the cache
    /// belongs to a different source.
    pub fn recomposite(
        &mut self,
        source: &Raster,
        show_original: bool,
    ) -> Result<Raster, PipelineError> {
        ensure_not_empty(source)?;
        match &self.layers {
            Some(layers) if layers.key.source == source.fingerprint() => {}
            _ => return Err(PipelineError::NothingRendered),
        }
        self.composite_cached(source, show_original)
    }

    /// Drop the cached layers.
    pub fn invalidate(&mut self) {
        if self.layers.take().is_some() {
            debug!("layer cache invalidated");
        }
    }

    /// Key of the cached layers, if any.
    pub fn cached_key(&self) -> Option<&CacheKey> {
        self.layers.as_ref().map(|layers| &layers.key)
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    fn render_layers(&mut self, source: &Raster, key: CacheKey) -> Layers {
        let params = &key.params;

        let started = Instant::now();
        let dithered = dither(source, params);
        self.stats.dither_passes += 1;
        debug!(
            width = source.width(),
            height = source.height(),
            levels = params.levels,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dither pass"
        );

        let bloom = if params.bloom_enabled {
            let started = Instant::now();
            let layer = bloom(&dithered, params.bloom_intensity);
            self.stats.bloom_passes += 1;
            debug!(
                intensity = params.bloom_intensity,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "bloom pass"
            );
            Some(layer)
        } else {
            None
        };

        Layers {
            key,
            dithered,
            bloom,
        }
    }

    fn composite_cached(
        &mut self,
        source: &Raster,
        show_original: bool,
    ) -> Result<Raster, PipelineError> {
        let layers = self.layers.as_ref().ok_or(PipelineError::NothingRendered)?;
        let output = composite(&layers.dithered, layers.bloom.as_ref(), source, show_original)?;
        self.stats.composite_passes += 1;
        Ok(output)
    }
}

fn ensure_not_empty(source: &Raster) -> Result<(), PipelineError> {
    if source.is_empty() {
        return Err(PipelineError::EmptySource {
            width: source.width(),
            height: source.height(),
        });
    }
    Ok(())
}
