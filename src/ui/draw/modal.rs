//! Dialogs drawn above the browser: add-question form, alerts, delete
//! confirmation.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{Modal, DELETE_PROMPT};
use crate::form::{Field, QuestionForm};
use crate::question::CategoryMap;
use crate::ui::theme::Theme;

/// Rect of `width` x `height` centered in `area`, clamped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub(crate) fn draw_modal(f: &mut Frame, modal: &Modal, theme: &Theme) {
    let (title, body, hint, color) = match modal {
        Modal::Alert(message) => (" Error ", message.as_str(), "press any key", theme.error),
        Modal::ConfirmDelete { .. } => (" Delete ", DELETE_PROMPT, "y: yes | n: no", theme.accent),
    };

    let area = centered(f.area(), 52, 7);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = vec![
        Line::from(Span::styled(body, Style::default().fg(theme.foreground))),
        Line::raw(""),
        Line::from(Span::styled(hint, Style::default().fg(theme.faint))),
    ];
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true });
    f.render_widget(paragraph, inner);
}

pub(crate) fn draw_form(f: &mut Frame, form: &QuestionForm, categories: &CategoryMap, theme: &Theme) {
    let area = centered(f.area(), 64, 14);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(" Add question ")
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Question
            Constraint::Length(3), // Answer
            Constraint::Length(1), // Category
            Constraint::Length(1), // Difficulty
            Constraint::Length(1), // Error
            Constraint::Min(1),    // Hints
        ])
        .split(inner);

    let category = form
        .category
        .map(|id| {
            categories
                .get(&id)
                .cloned()
                .unwrap_or_else(|| format!("category {}", id))
        })
        .unwrap_or_else(|| "none".to_string());
    let difficulty = form.difficulty.to_string();

    draw_text_field(f, rows[0], Field::Question, &form.question, form.focus(), theme);
    draw_text_field(f, rows[1], Field::Answer, &form.answer, form.focus(), theme);
    draw_choice_field(f, rows[2], Field::Category, &category, form.focus(), theme);
    draw_choice_field(f, rows[3], Field::Difficulty, &difficulty, form.focus(), theme);

    if let Some(err) = form.error() {
        let error = Paragraph::new(format!(" {}", err)).style(Style::default().fg(theme.error));
        f.render_widget(error, rows[4]);
    }

    let hints = Paragraph::new(" Tab: next field | ←→: change | Enter: save | ESC: cancel")
        .style(Style::default().fg(theme.faint));
    f.render_widget(hints, rows[5]);
}

fn field_style(field: Field, focus: Field, theme: &Theme) -> Style {
    if field == focus {
        Style::default().fg(theme.input)
    } else {
        Style::default().fg(theme.faint)
    }
}

fn draw_text_field(f: &mut Frame, area: Rect, field: Field, value: &str, focus: Field, theme: &Theme) {
    let input = Paragraph::new(value.to_string())
        .style(Style::default().fg(theme.foreground))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(field_style(field, focus, theme))
                .title(format!(" {} ", field.label())),
        );
    f.render_widget(input, area);
}

fn draw_choice_field(f: &mut Frame, area: Rect, field: Field, value: &str, focus: Field, theme: &Theme) {
    let style = field_style(field, focus, theme);
    let line = Line::from(vec![
        Span::styled(format!(" {:<11}", field.label()), style),
        Span::styled(
            format!("◂ {} ▸", value),
            Style::default()
                .fg(theme.foreground)
                .add_modifier(if field == focus { Modifier::BOLD } else { Modifier::empty() }),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 50, 10), Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn test_centered_clamps() {
        let area = Rect::new(2, 1, 30, 5);
        assert_eq!(centered(area, 50, 10), Rect::new(2, 1, 30, 5));
    }
}
