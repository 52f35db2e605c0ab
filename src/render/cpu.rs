use crate::{
    foundation::{
        core::{CHANNELS, OptimizedRegion},
        error::{HighlightError, HighlightResult},
        math::lerp_trunc_u8,
    },
    render::{
        backend::{BlendBackend, BlendSettings},
        batch::{Batch, PaddedImage},
    },
};

/// Scalar CPU backend.
///
/// Mask construction may run on a `rayon` pool (`settings.parallel`); patch writes are always
/// applied one region at a time in list order.
pub struct CpuBackend {
    settings: BlendSettings,
    pool: Option<rayon::ThreadPool>,
}

impl CpuBackend {
    /// Create a backend; the thread pool is built on first parallel use.
    pub fn new(settings: BlendSettings) -> Self {
        Self {
            settings,
            pool: None,
        }
    }

    fn pool(&mut self) -> HighlightResult<&rayon::ThreadPool> {
        if self.pool.is_none() {
            self.pool = Some(build_thread_pool(self.settings.threads)?);
        }
        self.pool
            .as_ref()
            .ok_or_else(|| HighlightError::compute("internal error: thread pool missing"))
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new(BlendSettings::default())
    }
}

impl BlendBackend for CpuBackend {
    fn build_batch(&mut self, regions: &[OptimizedRegion]) -> HighlightResult<Batch> {
        if self.settings.parallel {
            let pool = self.pool()?;
            Batch::build_parallel(regions, pool)
        } else {
            Batch::build(regions)
        }
    }

    fn execute(
        &mut self,
        padded: &PaddedImage,
        batch: &Batch,
        alpha: f64,
    ) -> HighlightResult<PaddedImage> {
        if batch.masks.len() != batch.len() || batch.colors.len() != batch.len() {
            return Err(HighlightError::shape(
                "batch starts, masks and colors must have equal lengths",
            ));
        }

        let mut canvas = padded.clone();
        let stride = padded.stride();
        let max_w = batch.max_w as usize;

        for ((&(y0, x0), mask), &color) in batch.starts.iter().zip(&batch.masks).zip(&batch.colors)
        {
            if mask.len() != batch.max_h as usize * max_w {
                return Err(HighlightError::shape("batch mask does not match [max_h, max_w]"));
            }
            // Patches starting past the original bounds are clipped to the padded canvas; none
            // of their pixels survive the final crop.
            let rows = (batch.max_h).min(padded.padded_height.saturating_sub(y0)) as usize;
            let cols = (batch.max_w).min(padded.padded_width.saturating_sub(x0)) as usize;
            if rows == 0 || cols == 0 {
                continue;
            }

            for r in 0..rows {
                let row_off = (y0 as usize + r) * stride + x0 as usize * CHANNELS;
                let mask_row = &mask[r * max_w..r * max_w + cols];
                let base = &padded.data[row_off..row_off + cols * CHANNELS];
                let dst = &mut canvas.data[row_off..row_off + cols * CHANNELS];

                for ((&m, base_px), dst_px) in mask_row
                    .iter()
                    .zip(base.chunks_exact(CHANNELS))
                    .zip(dst.chunks_exact_mut(CHANNELS))
                {
                    if m == 0 {
                        continue;
                    }
                    let weight = f64::from(m) * alpha;
                    for c in 0..CHANNELS {
                        dst_px[c] = lerp_trunc_u8(base_px[c], color[c], weight);
                    }
                }
            }
        }

        Ok(canvas)
    }

    fn settings(&self) -> &BlendSettings {
        &self.settings
    }
}

fn build_thread_pool(threads: Option<usize>) -> HighlightResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| HighlightError::compute(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
