//! Drawing functions for the TUI
//!
//! - `browser` - category sidebar, question list, pager, status
//! - `modal` - add-question form and blocking dialogs

mod browser;
mod modal;

use ratatui::{style::Style, widgets::Block, Frame};

use crate::app::App;
use crate::ui::theme::Theme;

use browser::draw_browser;
use modal::{draw_form, draw_modal};

/// Main draw function. `tick` drives the loading spinner.
pub fn draw(f: &mut Frame, app: &App, theme: &Theme, tick: usize) {
    let bg_block = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(bg_block, f.area());

    draw_browser(f, app, theme, tick);

    if let Some(form) = app.form() {
        draw_form(f, form, app.categories(), theme);
    }
    // Alerts stack above the form
    if let Some(modal) = app.modal() {
        draw_modal(f, modal, theme);
    }
}
