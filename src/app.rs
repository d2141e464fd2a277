use std::collections::HashSet;

use crate::api::QuestionList;
use crate::config::Config;
use crate::dispatch::{Completion, Payload, Request};
use crate::form::QuestionForm;
use crate::pager;
use crate::question::{CategoryMap, Question};

/// Notice shown for every failed request
pub const LOAD_ERROR: &str = "Unable to load questions. Please try your request again";
/// Prompt shown before a delete
pub const DELETE_PROMPT: &str = "are you sure you want to delete the question?";

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Categories,
    Questions,
}

/// Blocking dialogs, drawn above everything and eating all input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Error notice; any key dismisses it
    Alert(String),
    /// Yes/no before deleting question `id`
    ConfirmDelete { id: u32 },
}

/// Application state
///
/// Reflects the most recently completed request. Every mutating operation
/// hands back the [`Request`] the caller must dispatch; responses come back
/// through [`App::apply`].
pub struct App {
    /// Questions on the current page, in server order
    questions: Vec<Question>,
    /// Current 1-based page
    page: u32,
    /// Total across all pages of the current view
    total_questions: u32,
    /// Category id → name, from the last unfiltered listing
    categories: CategoryMap,
    /// Category filter of the current view
    current_category: Option<u32>,
    /// Selected index in `questions`
    selected: usize,
    /// Sidebar cursor: 0 is "All", n is the n-th category
    category_cursor: usize,
    focus: Focus,
    /// Search input text
    search: String,
    /// Whether we're typing into the search box
    searching: bool,
    /// Question ids whose answer is shown
    revealed: HashSet<u32>,
    modal: Option<Modal>,
    /// Add-question form, when open
    form: Option<QuestionForm>,
    /// Requests sent but not yet applied
    in_flight: usize,
    /// Outcome of the last add or delete, shown in the status bar
    notice: Option<String>,
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            questions: Vec::new(),
            page: 1,
            total_questions: 0,
            categories: CategoryMap::new(),
            current_category: None,
            selected: 0,
            category_cursor: 0,
            focus: Focus::Questions,
            search: String::new(),
            searching: false,
            revealed: HashSet::new(),
            modal: None,
            form: None,
            in_flight: 0,
            notice: None,
            config,
        }
    }

    // ------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------

    /// Unfiltered listing of the current page
    pub fn load_page(&self) -> Request {
        Request::ListPage { page: self.page }
    }

    /// Category-filtered listing
    pub fn load_by_category(&self, category: u32, page: u32) -> Request {
        Request::ListByCategory { category, page }
    }

    /// Search for `term` in question text
    pub fn search(&self, term: &str) -> Request {
        Request::Search {
            term: term.to_string(),
        }
    }

    /// Re-request whatever view is current at `page`
    fn fetch_view(&self, page: u32) -> Request {
        match self.current_category {
            Some(category) => self.load_by_category(category, page),
            None => Request::ListPage { page },
        }
    }

    /// Re-fetch the current view at the current page
    pub fn refetch(&self) -> Request {
        self.fetch_view(self.page)
    }

    /// Jump to page `n` of the current view. Out-of-range pages are ignored.
    pub fn select_page(&self, n: u32) -> Option<Request> {
        if n == 0 || n > self.page_count() {
            return None;
        }
        Some(self.fetch_view(n))
    }

    pub fn next_page(&self) -> Option<Request> {
        self.select_page(self.page + 1)
    }

    pub fn prev_page(&self) -> Option<Request> {
        self.select_page(self.page.saturating_sub(1))
    }

    /// Activate the sidebar entry under the cursor
    pub fn select_category_at_cursor(&self) -> Request {
        match self.category_at_cursor() {
            Some(id) => self.load_by_category(id, 1),
            None => Request::ListPage { page: 1 },
        }
    }

    /// Start deleting the selected question.
    ///
    /// Opens the confirmation dialog unless confirmation is disabled, in
    /// which case the delete request comes back immediately.
    pub fn request_delete(&mut self) -> Option<Request> {
        let id = self.selected_question()?.id;
        if self.config.behavior.confirm_delete {
            self.modal = Some(Modal::ConfirmDelete { id });
            None
        } else {
            Some(Request::Delete { id })
        }
    }

    /// Answer the open confirmation dialog
    pub fn confirm(&mut self, yes: bool) -> Option<Request> {
        match self.modal.take() {
            Some(Modal::ConfirmDelete { id }) if yes => Some(Request::Delete { id }),
            Some(Modal::ConfirmDelete { .. }) => None,
            other => {
                self.modal = other;
                None
            }
        }
    }

    /// Submit the search box
    pub fn submit_search(&mut self) -> Request {
        self.searching = false;
        self.search(&self.search)
    }

    // ------------------------------------------------------------------
    // Responses
    // ------------------------------------------------------------------

    /// Record that a request went out
    pub fn request_sent(&mut self) {
        self.in_flight += 1;
    }

    /// Apply a finished request. Returns a follow-up fetch when one is due
    /// (after a delete or create).
    pub fn apply(&mut self, completion: Completion) -> Option<Request> {
        self.in_flight = self.in_flight.saturating_sub(1);
        let Completion {
            seq,
            request,
            result,
        } = completion;

        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(seq, kind = request.label(), "request failed: {}", e);
                self.notice = None;
                self.modal = Some(Modal::Alert(LOAD_ERROR.to_string()));
                return None;
            }
        };
        tracing::debug!(seq, kind = request.label(), "request completed");

        match (request, payload) {
            (Request::ListPage { page }, Payload::Questions(list)) => {
                if let Some(categories) = list.categories.clone() {
                    self.categories = categories;
                }
                self.current_category = list.current_category;
                self.replace_questions(list, page);
                None
            }
            (Request::ListByCategory { category, page }, Payload::Questions(list)) => {
                self.current_category = list.current_category.or(Some(category));
                self.replace_questions(list, page);
                None
            }
            (Request::Search { .. }, Payload::Questions(list)) => {
                self.current_category = list.current_category;
                self.replace_questions(list, 1);
                None
            }
            (Request::Delete { id }, Payload::Deleted) => {
                tracing::info!("Deleted question {}", id);
                self.revealed.remove(&id);
                // Drop it locally so a failed refetch doesn't leave it on screen
                self.questions.retain(|q| q.id != id);
                if self.selected >= self.questions.len() {
                    self.selected = self.questions.len().saturating_sub(1);
                }
                self.notice = Some(format!("Deleted question {}", id));
                let total_before = self.total_questions;
                self.total_questions = total_before.saturating_sub(1);
                self.page = pager::page_after_delete(self.page, total_before);
                Some(self.refetch())
            }
            (Request::Create { .. }, Payload::Created(id)) => {
                tracing::info!("Created question {:?}", id);
                self.form = None;
                self.notice = Some(match id {
                    Some(id) => format!("Created question {}", id),
                    None => "Question created".to_string(),
                });
                Some(self.refetch())
            }
            (request, payload) => {
                tracing::warn!("Mismatched response {:?} for {:?}", payload, request);
                None
            }
        }
    }

    fn replace_questions(&mut self, list: QuestionList, page: u32) {
        self.total_questions = list.total();
        self.questions = list.questions;
        self.page = page;
        if self.selected >= self.questions.len() {
            self.selected = self.questions.len().saturating_sub(1);
        }
        self.sync_category_cursor();
    }

    fn sync_category_cursor(&mut self) {
        self.category_cursor = self
            .current_category
            .and_then(|id| self.categories.keys().position(|k| *k == id))
            .map(|i| i + 1)
            .unwrap_or(0);
    }

    // ------------------------------------------------------------------
    // Navigation / local UI state
    // ------------------------------------------------------------------

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Categories => Focus::Questions,
            Focus::Questions => Focus::Categories,
        };
    }

    /// Move selection up in the focused pane
    pub fn previous(&mut self) {
        match self.focus {
            Focus::Questions => self.selected = self.selected.saturating_sub(1),
            Focus::Categories => self.category_cursor = self.category_cursor.saturating_sub(1),
        }
    }

    /// Move selection down in the focused pane
    pub fn next(&mut self) {
        match self.focus {
            Focus::Questions => {
                if self.selected + 1 < self.questions.len() {
                    self.selected += 1;
                }
            }
            Focus::Categories => {
                if self.category_cursor < self.categories.len() {
                    self.category_cursor += 1;
                }
            }
        }
    }

    /// Show or hide the selected question's answer
    pub fn toggle_answer(&mut self) {
        if let Some(id) = self.selected_question().map(|q| q.id) {
            if !self.revealed.remove(&id) {
                self.revealed.insert(id);
            }
        }
    }

    pub fn is_revealed(&self, id: u32) -> bool {
        self.config.behavior.reveal_answers || self.revealed.contains(&id)
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn start_search(&mut self) {
        self.searching = true;
    }

    /// Leave the search box, clearing it
    pub fn cancel_search(&mut self) {
        self.search.clear();
        self.searching = false;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Close an alert; confirmations must be answered with [`App::confirm`]
    pub fn dismiss_alert(&mut self) {
        if matches!(self.modal, Some(Modal::Alert(_))) {
            self.modal = None;
        }
    }

    pub fn open_form(&mut self) {
        self.form = Some(QuestionForm::new(&self.categories, self.current_category));
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn form(&self) -> Option<&QuestionForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut QuestionForm> {
        self.form.as_mut()
    }

    /// Validate the form and build the create request
    pub fn submit_form(&mut self) -> Option<Request> {
        let question = self.form.as_mut()?.submit()?;
        Some(Request::Create { question })
    }

    // ------------------------------------------------------------------
    // Render data
    // ------------------------------------------------------------------

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_question(&self) -> Option<&Question> {
        self.questions.get(self.selected)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self) -> u32 {
        pager::page_count(self.total_questions)
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    pub fn categories(&self) -> &CategoryMap {
        &self.categories
    }

    pub fn current_category(&self) -> Option<u32> {
        self.current_category
    }

    pub fn category_cursor(&self) -> usize {
        self.category_cursor
    }

    /// Category id under the sidebar cursor; `None` for "All"
    pub fn category_at_cursor(&self) -> Option<u32> {
        self.category_cursor
            .checked_sub(1)
            .and_then(|i| self.categories.keys().nth(i).copied())
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
