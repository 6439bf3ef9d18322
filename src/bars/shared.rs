use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::config::BarConfig;
use super::context::BarContext;
use super::error::UpdateError;
use super::layout::{Bar, BarLayout};

/// Cloneable handle to a [`BarContext`] for hosts that rebuild the layout on
/// one thread while another drives frame updates.
///
/// New layouts are computed before taking the write lock and swapped in
/// whole, so an update sees either the old or the new bar list.
#[derive(Debug, Clone, Default)]
pub struct SharedBars {
    inner: Arc<RwLock<BarContext>>,
}

impl SharedBars {
    pub fn new(config: &BarConfig) -> Self {
        Self::from_context(BarContext::new(config))
    }

    pub fn from_context(ctx: BarContext) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ctx)),
        }
    }

    /// Builds a layout for `config` and installs it. Returns the bar count.
    pub fn build_layout(&self, config: &BarConfig) -> usize {
        let layout = BarLayout::build(config);
        let n = layout.len();
        self.write().replace_layout(layout);
        n
    }

    pub fn update(&self, magnitudes: &[u8]) -> Result<(), UpdateError> {
        self.write().update(magnitudes)
    }

    /// Snapshot of the active bars.
    pub fn current_bars(&self) -> Vec<Bar> {
        self.read().current_bars().to_vec()
    }

    pub fn current_energy(&self) -> f32 {
        self.read().current_energy()
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.read().frequency_bin_count()
    }

    /// Runs `f` against the context under the read lock, for consumers that
    /// only need to look and not copy.
    pub fn with_bars<R>(&self, f: impl FnOnce(&[Bar], f32) -> R) -> R {
        let ctx = self.read();
        f(ctx.current_bars(), ctx.current_energy())
    }

    // a panic mid-update leaves at worst stale values, never a torn layout
    fn read(&self) -> RwLockReadGuard<'_, BarContext> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BarContext> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
