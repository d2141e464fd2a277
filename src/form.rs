//! Add-question form.
//!
//! Holds the text being typed and the chosen category/difficulty, and turns
//! it into a [`NewQuestion`] once the local checks pass. The server still
//! has the final say.

use thiserror::Error;

use crate::question::{CategoryMap, NewQuestion, DIFFICULTY_RANGE};

/// Form fields in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Question,
    Answer,
    Category,
    Difficulty,
}

impl Field {
    const ORDER: [Field; 4] = [
        Field::Question,
        Field::Answer,
        Field::Category,
        Field::Difficulty,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Question => "Question",
            Field::Answer => "Answer",
            Field::Category => "Category",
            Field::Difficulty => "Difficulty",
        }
    }

    /// Whether typed characters go into this field
    pub fn is_text(self) -> bool {
        matches!(self, Field::Question | Field::Answer)
    }
}

/// Why a form can't be submitted yet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("question text is required")]
    MissingQuestion,
    #[error("answer text is required")]
    MissingAnswer,
    #[error("pick a category")]
    MissingCategory,
    #[error("difficulty must be between 1 and 5")]
    BadDifficulty,
}

#[derive(Debug, Clone)]
pub struct QuestionForm {
    pub question: String,
    pub answer: String,
    /// Chosen category id, from the map the form was opened with
    pub category: Option<u32>,
    pub difficulty: u8,
    focus: Field,
    /// Category ids in display order
    category_ids: Vec<u32>,
    /// Last validation failure, shown inline
    error: Option<FormError>,
}

impl QuestionForm {
    /// New empty form; preselects `preferred` (or the first category)
    pub fn new(categories: &CategoryMap, preferred: Option<u32>) -> Self {
        let category_ids: Vec<u32> = categories.keys().copied().collect();
        let category = preferred
            .filter(|id| categories.contains_key(id))
            .or_else(|| category_ids.first().copied());
        Self {
            question: String::new(),
            answer: String::new(),
            category,
            difficulty: *DIFFICULTY_RANGE.start(),
            focus: Field::Question,
            category_ids,
            error: None,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// Move focus to the next field (wraps)
    pub fn next_field(&mut self) {
        let i = (self.focus.index() + 1) % Field::ORDER.len();
        self.focus = Field::ORDER[i];
    }

    /// Move focus to the previous field (wraps)
    pub fn prev_field(&mut self) {
        let len = Field::ORDER.len();
        let i = (self.focus.index() + len - 1) % len;
        self.focus = Field::ORDER[i];
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
            self.error = None;
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Question => Some(&mut self.question),
            Field::Answer => Some(&mut self.answer),
            _ => None,
        }
    }

    /// Step the focused choice field forward (`delta = 1`) or back (`-1`)
    pub fn cycle(&mut self, delta: i32) {
        match self.focus {
            Field::Category => {
                if self.category_ids.is_empty() {
                    return;
                }
                let len = self.category_ids.len() as i32;
                let current = self
                    .category
                    .and_then(|id| self.category_ids.iter().position(|c| *c == id))
                    .map(|i| i as i32)
                    .unwrap_or(-1);
                let next = (current + delta).rem_euclid(len) as usize;
                self.category = Some(self.category_ids[next]);
            }
            Field::Difficulty => {
                let next = self.difficulty as i32 + delta;
                let (lo, hi) = (*DIFFICULTY_RANGE.start() as i32, *DIFFICULTY_RANGE.end() as i32);
                self.difficulty = next.clamp(lo, hi) as u8;
            }
            _ => {}
        }
        self.error = None;
    }

    /// Check the fields and build the payload
    pub fn validate(&self) -> Result<NewQuestion, FormError> {
        let question = self.question.trim();
        let answer = self.answer.trim();
        if question.is_empty() {
            return Err(FormError::MissingQuestion);
        }
        if answer.is_empty() {
            return Err(FormError::MissingAnswer);
        }
        let category = self.category.ok_or(FormError::MissingCategory)?;
        if !DIFFICULTY_RANGE.contains(&self.difficulty) {
            return Err(FormError::BadDifficulty);
        }
        Ok(NewQuestion {
            question: question.to_string(),
            answer: answer.to_string(),
            category,
            difficulty: self.difficulty,
        })
    }

    /// Validate, remembering the error for display
    pub fn submit(&mut self) -> Option<NewQuestion> {
        match self.validate() {
            Ok(q) => {
                self.error = None;
                Some(q)
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> CategoryMap {
        let mut map = CategoryMap::new();
        map.insert(1, "Science".to_string());
        map.insert(2, "Art".to_string());
        map.insert(3, "Geography".to_string());
        map
    }

    #[test]
    fn test_preselect() {
        assert_eq!(QuestionForm::new(&categories(), None).category, Some(1));
        assert_eq!(QuestionForm::new(&categories(), Some(3)).category, Some(3));
        // Unknown preference falls back to the first id
        assert_eq!(QuestionForm::new(&categories(), Some(42)).category, Some(1));
        assert_eq!(QuestionForm::new(&CategoryMap::new(), None).category, None);
    }

    #[test]
    fn test_field_wrap() {
        let mut form = QuestionForm::new(&categories(), None);
        form.prev_field();
        assert_eq!(form.focus(), Field::Difficulty);
        form.next_field();
        assert_eq!(form.focus(), Field::Question);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = QuestionForm::new(&categories(), None);
        for c in "Hue?".chars() {
            form.push_char(c);
        }
        form.next_field();
        form.push_char('x');
        form.pop_char();
        form.push_char('y');
        assert_eq!(form.question, "Hue?");
        assert_eq!(form.answer, "y");

        // Choice fields ignore typing
        form.next_field();
        form.push_char('z');
        assert_eq!(form.answer, "y");
    }

    #[test]
    fn test_cycle_category_and_difficulty() {
        let mut form = QuestionForm::new(&categories(), None);
        form.next_field();
        form.next_field();
        form.cycle(-1);
        assert_eq!(form.category, Some(3));
        form.cycle(1);
        assert_eq!(form.category, Some(1));

        form.next_field();
        form.cycle(-1);
        assert_eq!(form.difficulty, 1);
        for _ in 0..10 {
            form.cycle(1);
        }
        assert_eq!(form.difficulty, 5);
    }

    #[test]
    fn test_validate() {
        let mut form = QuestionForm::new(&categories(), Some(2));
        assert_eq!(form.submit(), None);
        assert_eq!(form.error(), Some(&FormError::MissingQuestion));

        form.question = "  Who painted the Mona Lisa? ".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingAnswer));

        form.answer = "Leonardo da Vinci".to_string();
        form.difficulty = 3;
        let q = form.submit().unwrap();
        assert_eq!(q.question, "Who painted the Mona Lisa?");
        assert_eq!(q.category, 2);
        assert_eq!(q.difficulty, 3);
        assert!(form.error().is_none());
    }

    #[test]
    fn test_validate_needs_category() {
        let mut form = QuestionForm::new(&CategoryMap::new(), None);
        form.question = "q".to_string();
        form.answer = "a".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingCategory));
    }
}
