//! Equal-tempered spectrum bars.
//!
//! Maps the linear bins of a byte-valued spectrum onto bars spaced along the
//! 24-tone equal-tempered scale, and refreshes their values frame by frame.

pub mod audio;
pub mod bars;
pub mod data;

pub use bars::config::BarConfig;
pub use bars::context::BarContext;
pub use bars::error::{ConfigError, UpdateError};
pub use bars::layout::{Bar, BarLayout};
pub use bars::shared::SharedBars;
