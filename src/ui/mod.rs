//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw/` - Main draw functions
//! - `theme.rs` - Color themes and presets
//! - `question_card.rs` - Question card widget

mod draw;
pub mod question_card;
pub mod theme;

// Re-export main draw function
pub use draw::draw;

pub use theme::Theme;
