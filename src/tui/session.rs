//! Navigation state for the interactive browser.
//!
//! The session is a plain value. Key events go through
//! [`NavigationSession::handle`] and terminal size changes go through
//! [`NavigationSession::resize`]; drawing only reads it.

use crate::types::{ScanResultStore, Snippet};

/// Rows taken by the list view header (title, help, rule) and footer.
pub const LIST_CHROME_ROWS: usize = 4;

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Browsing targets.
    List,
    /// Browsing one target's findings, one pattern at a time.
    Detail,
}

/// Discrete inputs understood by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    /// Previous pattern.
    Left,
    /// Next pattern.
    Right,
    Confirm,
    Back,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSession {
    selected_target: usize,
    list_offset: usize,
    view: View,
    selected_pattern: usize,
    pattern_offset: usize,
    active_patterns: Vec<String>,
    viewport_height: usize,
    finished: bool,
}

impl NavigationSession {
    /// Start in the list view with the first target selected.
    pub fn new(viewport_height: usize) -> Self {
        Self {
            selected_target: 0,
            list_offset: 0,
            view: View::List,
            selected_pattern: 0,
            pattern_offset: 0,
            active_patterns: Vec::new(),
            viewport_height,
            finished: false,
        }
    }

    pub fn selected_target(&self) -> usize {
        self.selected_target
    }

    pub fn list_offset(&self) -> usize {
        self.list_offset
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_pattern(&self) -> usize {
        self.selected_pattern
    }

    pub fn pattern_offset(&self) -> usize {
        self.pattern_offset
    }

    /// Patterns of the target opened in the detail view, in findings order.
    pub fn active_patterns(&self) -> &[String] {
        &self.active_patterns
    }

    /// The pattern currently shown in the detail view.
    pub fn current_pattern(&self) -> Option<&str> {
        self.active_patterns
            .get(self.selected_pattern)
            .map(String::as_str)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of target rows the list view can show.
    pub fn list_rows(&self) -> usize {
        self.viewport_height
            .saturating_sub(LIST_CHROME_ROWS)
            .max(1)
    }

    /// Snippets of the current pattern for the selected target.
    pub fn current_snippets<'s>(&self, store: &'s ScanResultStore) -> &'s [Snippet] {
        self.current_pattern()
            .and_then(|pattern| {
                store
                    .get(self.selected_target)?
                    .outcome
                    .findings()?
                    .get(pattern)
            })
            .unwrap_or_default()
    }

    /// Apply one input.
    pub fn handle(&mut self, input: Input, store: &ScanResultStore) {
        if self.finished {
            return;
        }
        if input == Input::Quit {
            self.finished = true;
            return;
        }

        match self.view {
            View::List => self.handle_list(input, store),
            View::Detail => self.handle_detail(input, store),
        }
    }

    /// Record a new terminal height and pull offsets back into range.
    pub fn resize(&mut self, viewport_height: usize, store: &ScanResultStore) {
        self.viewport_height = viewport_height;

        let rows = self.list_rows();
        let max_offset = store.len().saturating_sub(rows);
        self.list_offset = self.list_offset.min(max_offset);
        if self.selected_target < self.list_offset {
            self.list_offset = self.selected_target;
        } else if self.selected_target >= self.list_offset + rows {
            self.list_offset = self.selected_target + 1 - rows;
        }
    }

    fn handle_list(&mut self, input: Input, store: &ScanResultStore) {
        let rows = self.list_rows();
        match input {
            Input::Down if self.selected_target + 1 < store.len() => {
                self.selected_target += 1;
                if self.selected_target - self.list_offset >= rows {
                    self.list_offset = self.selected_target + 1 - rows;
                }
            }
            Input::Up if self.selected_target > 0 => {
                self.selected_target -= 1;
                if self.selected_target < self.list_offset {
                    self.list_offset = self.selected_target;
                }
            }
            Input::Confirm if !store.is_empty() => {
                self.view = View::Detail;
                self.selected_pattern = 0;
                self.pattern_offset = 0;
                self.active_patterns = store
                    .get(self.selected_target)
                    .and_then(|entry| entry.outcome.findings())
                    .map(|findings| findings.patterns().map(str::to_string).collect())
                    .unwrap_or_default();
            }
            _ => {}
        }
    }

    fn handle_detail(&mut self, input: Input, store: &ScanResultStore) {
        match input {
            Input::Back => {
                self.view = View::List;
                self.active_patterns.clear();
                self.selected_pattern = 0;
                self.pattern_offset = 0;
            }
            Input::Right if self.selected_pattern + 1 < self.active_patterns.len() => {
                self.selected_pattern += 1;
                self.pattern_offset = 0;
            }
            Input::Left if self.selected_pattern > 0 => {
                self.selected_pattern -= 1;
                self.pattern_offset = 0;
            }
            Input::Down if self.pattern_offset + 1 < self.current_snippets(store).len() => {
                self.pattern_offset += 1;
            }
            Input::Up if self.pattern_offset > 0 => {
                self.pattern_offset -= 1;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Findings, ScanOutcome};
    use proptest::prelude::*;

    fn snippets(n: usize) -> Vec<Snippet> {
        (0..n)
            .map(|i| Snippet {
                text: format!("hit {i}"),
                highlight: 0..3,
            })
            .collect()
    }

    /// Targets: 0 has findings for "a" (3 snippets) and "b" (1), 1 is an
    /// error, the rest are clean.
    fn store(targets: usize) -> ScanResultStore {
        let mut store = ScanResultStore::new();
        for i in 0..targets {
            let outcome = match i {
                0 => {
                    let mut findings = Findings::new();
                    findings.insert("a", snippets(3));
                    findings.insert("b", snippets(1));
                    ScanOutcome::Findings { findings }
                }
                1 => ScanOutcome::Error {
                    message: "status 404".into(),
                },
                _ => ScanOutcome::Findings {
                    findings: Findings::new(),
                },
            };
            store.push(format!("https://t{i}.example"), outcome);
        }
        store
    }

    fn press(session: &mut NavigationSession, store: &ScanResultStore, inputs: &[Input]) {
        for input in inputs {
            session.handle(*input, store);
        }
    }

    #[test]
    fn test_initial_state() {
        let session = NavigationSession::new(24);
        assert_eq!(session.view(), View::List);
        assert_eq!(session.selected_target(), 0);
        assert!(session.active_patterns().is_empty());
        assert!(!session.is_finished());
    }

    #[test]
    fn test_list_selection_is_bounded() {
        let store = store(3);
        let mut session = NavigationSession::new(24);

        press(&mut session, &store, &[Input::Up]);
        assert_eq!(session.selected_target(), 0);

        press(&mut session, &store, &[Input::Down; 10]);
        assert_eq!(session.selected_target(), 2);
    }

    #[test]
    fn test_list_scrolls_with_selection() {
        let store = store(10);
        // 7 - 4 = 3 visible rows
        let mut session = NavigationSession::new(7);

        press(&mut session, &store, &[Input::Down; 3]);
        assert_eq!(session.selected_target(), 3);
        assert_eq!(session.list_offset(), 1);

        press(&mut session, &store, &[Input::Down; 20]);
        assert_eq!(session.selected_target(), 9);
        assert_eq!(session.list_offset(), 7);

        press(&mut session, &store, &[Input::Up; 3]);
        assert_eq!(session.list_offset(), 6);
    }

    #[test]
    fn test_confirm_loads_patterns() {
        let store = store(3);
        let mut session = NavigationSession::new(24);

        press(&mut session, &store, &[Input::Confirm]);
        assert_eq!(session.view(), View::Detail);
        assert_eq!(session.active_patterns(), ["a", "b"]);
        assert_eq!(session.current_pattern(), Some("a"));
        assert_eq!(session.current_snippets(&store).len(), 3);
    }

    #[test]
    fn test_error_target_has_no_patterns() {
        let store = store(3);
        let mut session = NavigationSession::new(24);

        press(&mut session, &store, &[Input::Down, Input::Confirm]);
        assert_eq!(session.view(), View::Detail);
        assert!(session.active_patterns().is_empty());
        assert!(session.current_snippets(&store).is_empty());

        press(&mut session, &store, &[Input::Right, Input::Down]);
        assert_eq!(session.selected_pattern(), 0);
        assert_eq!(session.pattern_offset(), 0);
    }

    #[test]
    fn test_pattern_navigation_resets_scroll() {
        let store = store(1);
        let mut session = NavigationSession::new(24);

        press(&mut session, &store, &[Input::Confirm, Input::Down, Input::Down]);
        assert_eq!(session.pattern_offset(), 2);

        // Offset stops at the last snippet
        press(&mut session, &store, &[Input::Down]);
        assert_eq!(session.pattern_offset(), 2);

        press(&mut session, &store, &[Input::Right]);
        assert_eq!(session.current_pattern(), Some("b"));
        assert_eq!(session.pattern_offset(), 0);

        press(&mut session, &store, &[Input::Right]);
        assert_eq!(session.selected_pattern(), 1);

        press(&mut session, &store, &[Input::Left, Input::Left]);
        assert_eq!(session.selected_pattern(), 0);
    }

    #[test]
    fn test_back_keeps_selected_target() {
        let store = store(10);
        let mut session = NavigationSession::new(7);

        press(&mut session, &store, &[Input::Down; 5]);
        let offset = session.list_offset();
        press(&mut session, &store, &[Input::Confirm, Input::Back]);

        assert_eq!(session.view(), View::List);
        assert_eq!(session.selected_target(), 5);
        assert_eq!(session.list_offset(), offset);
        assert!(session.active_patterns().is_empty());
        assert_eq!(session.selected_pattern(), 0);
    }

    #[test]
    fn test_back_is_ignored_in_list_view() {
        let store = store(3);
        let mut session = NavigationSession::new(24);
        press(&mut session, &store, &[Input::Down, Input::Back]);
        assert_eq!(session.view(), View::List);
        assert_eq!(session.selected_target(), 1);
    }

    #[test]
    fn test_quit_from_either_view() {
        let store = store(3);

        let mut session = NavigationSession::new(24);
        press(&mut session, &store, &[Input::Quit]);
        assert!(session.is_finished());

        let mut session = NavigationSession::new(24);
        press(&mut session, &store, &[Input::Confirm, Input::Quit]);
        assert!(session.is_finished());

        // Nothing moves after quitting
        press(&mut session, &store, &[Input::Back]);
        assert_eq!(session.view(), View::Detail);
    }

    #[test]
    fn test_empty_store() {
        let store = ScanResultStore::new();
        let mut session = NavigationSession::new(24);
        press(&mut session, &store, &[Input::Down, Input::Up, Input::Confirm]);
        assert_eq!(session.view(), View::List);
        assert_eq!(session.selected_target(), 0);
    }

    #[test]
    fn test_resize_keeps_selection_visible() {
        let store = store(20);
        let mut session = NavigationSession::new(30);
        press(&mut session, &store, &[Input::Down; 15]);
        assert_eq!(session.list_offset(), 0);

        session.resize(8, &store);
        assert_eq!(session.list_rows(), 4);
        assert_eq!(session.list_offset(), 12);

        session.resize(100, &store);
        assert_eq!(session.list_offset(), 0);
    }

    fn any_input() -> impl Strategy<Value = Input> {
        prop_oneof![
            Just(Input::Up),
            Just(Input::Down),
            Just(Input::Left),
            Just(Input::Right),
            Just(Input::Confirm),
            Just(Input::Back),
        ]
    }

    proptest! {
        #[test]
        fn prop_indices_stay_in_bounds(
            targets in 0usize..12,
            height in 1usize..20,
            inputs in prop::collection::vec(any_input(), 0..200),
        ) {
            let store = store(targets);
            let mut session = NavigationSession::new(height);
            for input in inputs {
                session.handle(input, &store);

                if targets > 0 {
                    prop_assert!(session.selected_target() < targets);
                }
                let rows = session.list_rows();
                prop_assert!(session.list_offset() <= targets.saturating_sub(rows));
                prop_assert!(session.selected_target() >= session.list_offset());
                prop_assert!(targets == 0 || session.selected_target() < session.list_offset() + rows);

                let patterns = session.active_patterns().len();
                if patterns > 0 {
                    prop_assert!(session.selected_pattern() < patterns);
                } else {
                    prop_assert_eq!(session.selected_pattern(), 0);
                }
                let snippets = session.current_snippets(&store).len();
                prop_assert!(session.pattern_offset() <= snippets.saturating_sub(1));
            }
        }

        #[test]
        fn prop_back_restores_target(
            moves in prop::collection::vec(any_input(), 0..40),
        ) {
            let store = store(6);
            let mut session = NavigationSession::new(10);
            for input in moves {
                session.handle(input, &store);
            }
            if session.view() == View::List {
                session.handle(Input::Confirm, &store);
            }
            let selected = session.selected_target();
            session.handle(Input::Back, &store);
            prop_assert_eq!(session.view(), View::List);
            prop_assert_eq!(session.selected_target(), selected);
        }
    }
}
