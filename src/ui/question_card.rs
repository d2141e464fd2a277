//! Question card widget
//!
//! Renders each question as a fixed-height card:
//! - Question text (bold)
//! - Category and difficulty (faint)
//! - Answer, or a hint to reveal it

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::question::{CategoryMap, Question};

/// Lines per card, including the blank spacer
pub const CARD_HEIGHT: u16 = 4;

/// Question card widget
pub struct QuestionCard<'a> {
    question: &'a Question,
    categories: &'a CategoryMap,
    theme: &'a Theme,
    selected: bool,
    revealed: bool,
    prefix: &'a str,
}

impl<'a> QuestionCard<'a> {
    pub fn new(question: &'a Question, categories: &'a CategoryMap, theme: &'a Theme) -> Self {
        Self {
            question,
            categories,
            theme,
            selected: false,
            revealed: false,
            prefix: "",
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn revealed(mut self, revealed: bool) -> Self {
        self.revealed = revealed;
        self
    }

    pub fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = prefix;
        self
    }
}

impl<'a> Widget for QuestionCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let bg = if self.selected { self.theme.selection_bg } else { self.theme.background };
        let fg = if self.selected { self.theme.selection_fg } else { self.theme.foreground };

        // Spacer line keeps the theme background
        let card_lines = area.height.min(CARD_HEIGHT - 1);
        for y in area.y..area.y + card_lines {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(bg);
                }
            }
        }

        let padding_x = 1u16;
        let inner_width = area.width.saturating_sub(padding_x * 2) as usize;
        if inner_width == 0 {
            return;
        }
        let x = area.x + padding_x;
        let max_y = area.y + card_lines;
        let mut y = area.y;

        // Line 1: prefix + question
        let title_style = Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD);
        let title = format!("{}{}", self.prefix, self.question.question);
        buf.set_string(x, y, truncate(&title, inner_width), title_style);
        y += 1;

        let indent = self.prefix.width() as u16;
        let sub_x = x + indent;
        let sub_width = inner_width.saturating_sub(indent as usize);

        // Line 2: category · difficulty
        if y < max_y {
            let category = self
                .question
                .category_name(self.categories)
                .map(str::to_string)
                .unwrap_or_else(|| format!("category {}", self.question.category));
            let meta = format!("{} · {}", category, difficulty_stars(self.question.difficulty));
            let style = Style::default().fg(self.theme.faint).bg(bg);
            buf.set_string(sub_x, y, truncate(&meta, sub_width), style);
            y += 1;
        }

        // Line 3: answer or hint
        if y < max_y {
            let (text, style) = if self.revealed {
                (
                    format!("Answer: {}", self.question.answer),
                    Style::default().fg(self.theme.muted).bg(bg),
                )
            } else {
                (
                    "Space: show answer".to_string(),
                    Style::default()
                        .fg(self.theme.faint)
                        .bg(bg)
                        .add_modifier(Modifier::ITALIC),
                )
            };
            buf.set_string(sub_x, y, truncate(&text, sub_width), style);
        }
    }
}

/// Difficulty as filled/empty stars, e.g. 3 → "★★★☆☆"
fn difficulty_stars(difficulty: u8) -> String {
    let filled = difficulty.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Truncate string to fit within max_width, adding ellipsis if needed
pub(crate) fn truncate(s: &str, max_width: usize) -> String {
    let width = s.width();
    if width <= max_width {
        s.to_string()
    } else if max_width <= 1 {
        "…".to_string()
    } else {
        let mut result = String::new();
        let mut current_width = 0;

        for c in s.chars() {
            let char_width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if current_width + char_width + 1 > max_width {
                result.push('…');
                break;
            }
            result.push(c);
            current_width += char_width;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question {
            id: 4,
            question: "What actor did author Anne Rice first denounce?".to_string(),
            answer: "Tom Cruise".to_string(),
            category: 5,
            difficulty: 3,
        }
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("hi", 2), "hi");
        assert_eq!(truncate("hello", 1), "…");
    }

    #[test]
    fn test_difficulty_stars() {
        assert_eq!(difficulty_stars(3), "★★★☆☆");
        assert_eq!(difficulty_stars(9), "★★★★★");
    }

    #[test]
    fn test_render_hidden_answer() {
        let q = sample();
        let mut categories = CategoryMap::new();
        categories.insert(5, "Entertainment".to_string());
        let theme = Theme::default();

        let area = Rect::new(0, 0, 60, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        QuestionCard::new(&q, &categories, &theme).render(area, &mut buf);

        assert!(row(&buf, 0).contains("What actor did author"));
        assert!(row(&buf, 1).contains("Entertainment"));
        assert!(row(&buf, 2).contains("show answer"));
        assert!(!row(&buf, 2).contains("Tom Cruise"));
    }

    #[test]
    fn test_render_revealed_unknown_category() {
        let q = sample();
        let theme = Theme::default();

        let area = Rect::new(0, 0, 60, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        QuestionCard::new(&q, &CategoryMap::new(), &theme)
            .revealed(true)
            .render(area, &mut buf);

        assert!(row(&buf, 1).contains("category 5"));
        assert!(row(&buf, 2).contains("Tom Cruise"));
    }
}
