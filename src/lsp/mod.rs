//! LSP protocol feature implementations.
//!
//! This module provides implementations for LSP features:
//! - Hover information naming the embedded language under the cursor
//! - Folding ranges for embedded blocks

mod folding;
mod hover;

pub use folding::folding_ranges;
pub use hover::hover_at_position;
