use crate::{
    foundation::{
        core::OptimizedRegion,
        error::{HighlightError, HighlightResult},
    },
    render::batch::{Batch, PaddedImage},
};

/// A compute backend that applies a [`Batch`] onto a [`PaddedImage`].
///
/// Backends are explicit values passed into every blend call; there is no process-wide
/// backend selection.
pub trait BlendBackend {
    /// Build the uniform per-region arrays for `regions`.
    fn build_batch(&mut self, regions: &[OptimizedRegion]) -> HighlightResult<Batch> {
        Batch::build(regions)
    }

    /// Blend every batch entry, in list order, and return the padded canvas.
    ///
    /// Each patch is read from `padded` (never from the canvas being written), and writes go
    /// through the mask, so the last region covering a pixel decides its color.
    fn execute(
        &mut self,
        padded: &PaddedImage,
        batch: &Batch,
        alpha: f64,
    ) -> HighlightResult<PaddedImage>;

    /// Settings this backend was created with.
    fn settings(&self) -> &BlendSettings;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Scalar CPU kernel with optional `rayon` batch construction.
    #[default]
    Cpu,
}

impl BackendKind {
    /// Parse a backend name (`"cpu"`), case-insensitively.
    pub fn parse(s: &str) -> HighlightResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "" => Err(HighlightError::validation("backend kind must be non-empty")),
            other => Err(HighlightError::validation(format!(
                "unknown backend kind '{other}'"
            ))),
        }
    }
}

/// Execution-context settings shared by all backends.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BlendSettings {
    /// Build per-region masks on a thread pool.
    pub parallel: bool,
    /// Worker count for the pool; `None` lets `rayon` decide.
    pub threads: Option<usize>,
}

impl BlendSettings {
    /// Reject `threads == Some(0)`.
    pub fn validate(&self) -> HighlightResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(HighlightError::validation(
                "blend settings 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// Deserialize settings from JSON, filling defaults for missing fields.
    pub fn from_json(s: &str) -> HighlightResult<Self> {
        let settings: Self = serde_json::from_str(s)
            .map_err(|e| HighlightError::validation(format!("blend settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Create a blend backend.
pub fn create_backend(
    kind: BackendKind,
    settings: &BlendSettings,
) -> HighlightResult<Box<dyn BlendBackend>> {
    settings.validate()?;
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
