//! Browser view drawing functions
//!
//! This module handles rendering the main view:
//! - Category sidebar and search box
//! - Question list (cards)
//! - Pager and status bar

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus};
use crate::pager;
use crate::ui::question_card::{QuestionCard, CARD_HEIGHT};
use crate::ui::theme::Theme;

/// Sidebar width in columns
const SIDEBAR_WIDTH: u16 = 28;
/// Width of one page indicator (" 12 ")
const PAGE_SLOT_WIDTH: u16 = 4;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub(crate) fn draw_browser(f: &mut Frame, app: &App, theme: &Theme, tick: usize) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(f.area());

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Categories
            Constraint::Length(3), // Search box
        ])
        .split(columns[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Questions
            Constraint::Length(1), // Pager
            Constraint::Length(1), // Status bar
        ])
        .split(columns[1]);

    draw_categories(f, app, sidebar[0], theme);
    draw_search_box(f, app, sidebar[1], theme);
    draw_questions(f, app, main[0], theme);
    draw_pager(f, app, main[1], theme);
    draw_status_bar(f, app, main[2], theme, tick);
}

fn pane_border(focused: bool, theme: &Theme) -> Style {
    if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.faint)
    }
}

/// "All" heading followed by each category; the current view is bold.
/// The list scrolls to keep the cursor row on screen.
fn draw_categories(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let focused = app.focus() == Focus::Categories;
    let current = app.current_category();

    let entry = |label: &str, active: bool| {
        let mut style = Style::default().fg(theme.foreground).bg(theme.background);
        if active {
            style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
        }
        ListItem::new(Line::from(Span::styled(format!(" {}", label), style)))
    };

    let mut items = vec![entry("All questions", current.is_none())];
    items.extend(
        app.categories()
            .iter()
            .map(|(id, name)| entry(name.as_str(), current == Some(*id))),
    );

    let highlight = if focused {
        Style::default().bg(theme.selection_bg)
    } else {
        Style::default()
    };
    let list = List::new(items).highlight_style(highlight).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(pane_border(focused, theme))
            .title(" Categories ")
            .style(Style::default().bg(theme.background)),
    );

    let mut state = ListState::default().with_selected(Some(app.category_cursor()));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_search_box(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let text = if app.is_searching() || !app.search_text().is_empty() {
        app.search_text().to_string()
    } else {
        "/ to search".to_string()
    };
    let style = if app.is_searching() {
        Style::default().fg(theme.input).bg(theme.background)
    } else {
        Style::default().fg(theme.muted).bg(theme.background)
    };

    let search = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(pane_border(app.is_searching(), theme))
            .title(" Search ")
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(search, area);

    if app.is_searching() {
        // +1 for the left border
        let cursor_x = area.x + 1 + app.search_text().width() as u16;
        f.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_questions(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let focused = app.focus() == Focus::Questions;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border(focused, theme))
        .title(format!(" Questions ({}) ", app.total_questions()))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let questions = app.questions();
    if questions.is_empty() {
        let empty = Paragraph::new(" No questions")
            .style(Style::default().fg(theme.muted).bg(theme.background));
        f.render_widget(empty, inner);
        return;
    }

    // Scroll so the selected card stays visible
    let per_screen = (inner.height / CARD_HEIGHT).max(1) as usize;
    let selected = app.selected_index();
    let first = selected.saturating_sub(per_screen - 1);
    let prefixes = &app.config().appearance;

    for (row, (index, question)) in questions
        .iter()
        .enumerate()
        .skip(first)
        .take(per_screen)
        .enumerate()
    {
        let is_selected = index == selected;
        let card_area = Rect {
            x: inner.x,
            y: inner.y + row as u16 * CARD_HEIGHT,
            width: inner.width,
            height: CARD_HEIGHT.min(inner.bottom() - (inner.y + row as u16 * CARD_HEIGHT)),
        };
        let prefix = if is_selected && focused {
            prefixes.selected_prefix.as_str()
        } else {
            prefixes.unselected_prefix.as_str()
        };
        let card = QuestionCard::new(question, app.categories(), theme)
            .selected(is_selected && focused)
            .revealed(app.is_revealed(question.id))
            .prefix(prefix);
        f.render_widget(card, card_area);
    }
}

/// Page numbers with the current one highlighted
fn draw_pager(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let count = app.page_count();
    let slots = (area.width / PAGE_SLOT_WIDTH).saturating_sub(2) as u32;
    let pages = pager::visible_pages(app.page(), count, slots);

    let mut spans = vec![Span::raw(" ")];
    if count > 0 && *pages.start() > 1 {
        spans.push(Span::styled("… ", Style::default().fg(theme.faint)));
    }
    for n in pages.clone() {
        let style = if n == app.page() {
            Style::default()
                .fg(theme.background)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(format!(" {} ", n), style));
        spans.push(Span::raw(" "));
    }
    if count > 0 && *pages.end() < count {
        spans.push(Span::styled("…", Style::default().fg(theme.faint)));
    }

    let pager = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.background));
    f.render_widget(pager, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect, theme: &Theme, tick: usize) {
    let loading = if app.is_loading() {
        format!("{} ", SPINNER[tick % SPINNER.len()])
    } else {
        "  ".to_string()
    };

    let hints = if app.is_searching() {
        "Enter: search | ESC: cancel"
    } else {
        match app.focus() {
            Focus::Categories => "Enter: open | Tab: questions | /: search | a: add | q: quit",
            Focus::Questions => {
                "Space: answer | d: delete | ←→: page | Tab: categories | /: search | a: add | q: quit"
            }
        }
    };

    let mut spans = vec![Span::raw(format!(
        " {}Page {}/{} | ",
        loading,
        app.page(),
        app.page_count()
    ))];
    if let Some(notice) = app.notice() {
        spans.push(Span::styled(
            format!("{} | ", notice),
            Style::default().fg(theme.notice).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw(hints));

    let status_bar = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(theme.muted).bg(theme.background));
    f.render_widget(status_bar, area);
}
