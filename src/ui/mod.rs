//! Terminal output components.
//!
//! modfarm never prompts; this module provides:
//! - [`OutputMode`] / [`Output`] for verbosity-aware printing
//! - [`Theme`] for console styling

pub mod output;
pub mod theme;

pub use output::{Output, OutputMode};
pub use theme::{should_use_colors, Theme};
