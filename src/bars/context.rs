use super::config::BarConfig;
use super::error::UpdateError;
use super::layout::{Bar, BarLayout};
use super::update::update_bars;

/// Owns the active bar layout and the energy of the last frame.
///
/// Each visualizer keeps its own context; nothing is shared between them.
#[derive(Debug, Clone, Default)]
pub struct BarContext {
    layout: BarLayout,
    energy: f32,
}

impl BarContext {
    pub fn new(config: &BarConfig) -> Self {
        let mut ctx = Self::default();
        ctx.build_layout(config);
        ctx
    }

    /// Replaces the active layout with a fresh one for `config` and resets
    /// the energy estimate.
    pub fn build_layout(&mut self, config: &BarConfig) -> &[Bar] {
        self.replace_layout(BarLayout::build(config));
        &self.layout.bars
    }

    /// Installs a layout built elsewhere, e.g. off the frame thread.
    pub fn replace_layout(&mut self, layout: BarLayout) {
        self.layout = layout;
        self.energy = 0.0;
    }

    /// Refreshes bar values and energy from one frame. The buffer must have
    /// exactly as many bins as the layout was built for; on mismatch the
    /// previous values are kept.
    pub fn update(&mut self, magnitudes: &[u8]) -> Result<(), UpdateError> {
        let expected = self.layout.frequency_bin_count;
        if magnitudes.len() != expected {
            return Err(UpdateError::LengthMismatch {
                expected,
                actual: magnitudes.len(),
            });
        }
        self.energy = update_bars(&mut self.layout.bars, magnitudes);
        Ok(())
    }

    pub fn current_bars(&self) -> &[Bar] {
        &self.layout.bars
    }

    pub fn current_energy(&self) -> f32 {
        self.energy
    }

    pub fn layout(&self) -> &BarLayout {
        &self.layout
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.layout.frequency_bin_count
    }
}
