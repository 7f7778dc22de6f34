use crate::theme::{Theme, ThemeChoice};
use crossterm::event::{KeyCode, KeyEvent};
use cxn_core::{
    Board, BundledProvider, Feedback, GuessOutcome, ProviderError, PuzzleSource, Session,
};
use std::time::Duration;

/// How long app-level status messages stay up
const STATUS_DELAY: Duration = Duration::from_millis(3000);

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Every category found
    Complete,
}

/// The main application state
pub struct App {
    /// Active puzzle and its session
    pub board: Board<BundledProvider>,
    /// Cursor over the remaining word grid (row, col)
    pub cursor: (usize, usize),
    /// Color theme
    pub theme: Theme,
    /// Load errors and navigation notices
    pub status: Feedback,
    /// Current screen state
    pub screen_state: ScreenState,
}

impl App {
    /// Create the app and open the starting puzzle
    pub fn new(
        board: Board<BundledProvider>,
        theme: ThemeChoice,
        index: u32,
        source: PuzzleSource,
    ) -> Self {
        let mut app = Self {
            board,
            cursor: (0, 0),
            theme: Theme::from_choice(theme),
            status: Feedback::new(STATUS_DELAY),
            screen_state: ScreenState::Playing,
        };
        let result = app.board.open(index, source);
        app.after_load(result);
        app
    }

    /// Get the tick rate
    pub fn get_tick_rate(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Update timers (called every tick)
    pub fn tick(&mut self, elapsed: Duration) {
        self.status.advance(elapsed);
        if let Some(session) = self.board.session_mut() {
            session.advance(elapsed);
        }
    }

    /// The message for the top line: session feedback wins over status
    pub fn message(&self) -> Option<&str> {
        self.board
            .session()
            .and_then(Session::feedback)
            .or_else(|| self.status.message())
    }

    /// Word under the cursor, if any
    pub fn cursor_word(&self) -> Option<&str> {
        let session = self.board.session()?;
        let (row, col) = self.cursor;
        session
            .remaining_words()
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),

            // Puzzle selection
            KeyCode::Char('n') => {
                let result = self.board.next_puzzle();
                self.after_navigation(result, "Already at the last puzzle");
            }
            KeyCode::Char('p') => {
                let result = self.board.previous_puzzle();
                self.after_navigation(result, "Already at the first puzzle");
            }
            KeyCode::Char('o') => {
                let result = self.board.switch_source();
                self.after_load(result);
            }
            KeyCode::Char('r') => {
                let result = self.board.restart();
                self.after_load(result);
            }

            KeyCode::Char('t') => {
                self.theme = Theme::from_choice(self.theme.choice.next());
            }

            _ => self.handle_play_key(key),
        }
        AppAction::Continue
    }

    fn handle_play_key(&mut self, key: KeyEvent) {
        if self.screen_state != ScreenState::Playing {
            return;
        }
        let word = self.cursor_word().map(str::to_string);
        let Some(session) = self.board.session_mut() else {
            return;
        };

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(word) = word {
                    session.toggle_cell(&word);
                }
            }
            KeyCode::Char('g') => {
                if let GuessOutcome::Correct(_) = session.submit_guess() {
                    if session.is_complete() {
                        self.screen_state = ScreenState::Complete;
                    }
                    self.clamp_cursor();
                }
            }
            KeyCode::Char('s') => session.shuffle(),
            KeyCode::Char('d') | KeyCode::Esc => session.deselect_all(),
            _ => {}
        }
    }

    fn after_navigation(&mut self, result: Result<bool, ProviderError>, at_edge: &str) {
        match result {
            Ok(false) => {
                self.status.show(at_edge);
            }
            other => self.after_load(other),
        }
    }

    fn after_load(&mut self, result: Result<bool, ProviderError>) {
        self.cursor = (0, 0);
        self.screen_state = ScreenState::Playing;
        if let Err(err) = result {
            self.status.show(&err.to_string());
        } else {
            self.status.clear();
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let Some(session) = self.board.session() else {
            return;
        };
        let rows = session.remaining_words();
        if rows.is_empty() {
            return;
        }
        let row = (self.cursor.0 as isize + d_row).clamp(0, rows.len() as isize - 1) as usize;
        let width = rows[row].len().max(1);
        let col = (self.cursor.1 as isize + d_col).clamp(0, width as isize - 1) as usize;
        self.cursor = (row, col);
    }

    /// Keep the cursor inside the grid after it shrinks
    fn clamp_cursor(&mut self) {
        self.move_cursor(0, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use cxn_core::session::{ONE_AWAY, SORRY};
    use cxn_core::SessionConfig;

    fn app() -> App {
        let board =
            Board::new(BundledProvider::new().unwrap(), SessionConfig::default()).with_seed(5);
        App::new(board, ThemeChoice::Dark, 1, PuzzleSource::Orig)
    }

    fn press(app: &mut App, code: KeyCode) -> AppAction {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Move the cursor onto `word` and toggle it
    fn pick(app: &mut App, word: &str) {
        let rows = app.board.session().unwrap().remaining_words().to_vec();
        let (row, col) = rows
            .iter()
            .enumerate()
            .find_map(|(r, cells)| cells.iter().position(|w| w == word).map(|c| (r, c)))
            .unwrap();
        app.cursor = (row, col);
        press(app, KeyCode::Char(' '));
    }

    #[test]
    fn test_app_new() {
        let app = app();
        assert_eq!(app.screen_state, ScreenState::Playing);
        assert_eq!(app.cursor, (0, 0));
        assert_eq!(app.cursor_word(), Some("NAVY"));
        assert_eq!(app.message(), None);
    }

    #[test]
    fn test_cursor_navigation() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor, (1, 1));

        // Clamped at the edges
        for _ in 0..10 {
            press(&mut app, KeyCode::Char('l'));
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.cursor, (3, 3));
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor, (2, 2));
    }

    #[test]
    fn test_select_and_guess() {
        let mut app = app();
        for w in ["APPLE", "BANANA", "CHERRY", "NAVY"] {
            pick(&mut app, w);
        }
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.message(), Some(ONE_AWAY));

        press(&mut app, KeyCode::Char('d'));
        assert!(app.board.session().unwrap().selected_cells().is_empty());
        assert_eq!(app.message(), None);

        for w in ["APPLE", "NAVY", "POKER", "CAT"] {
            pick(&mut app, w);
        }
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.message(), Some(SORRY));
        assert_eq!(app.board.session().unwrap().mistakes(), 2);
    }

    #[test]
    fn test_solving_every_category_completes() {
        let mut app = app();
        let groups = app.board.session().unwrap().puzzle().groups.clone();
        for group in groups {
            for w in &group.members {
                pick(&mut app, w);
            }
            press(&mut app, KeyCode::Char('g'));
        }
        assert_eq!(app.screen_state, ScreenState::Complete);
        assert!(app.board.session().unwrap().remaining_words().is_empty());

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.screen_state, ScreenState::Playing);
        assert_eq!(app.board.index(), 2);
    }

    #[test]
    fn test_feedback_expires_on_tick() {
        let mut app = app();
        for w in ["APPLE", "BANANA", "CHERRY", "NAVY"] {
            pick(&mut app, w);
        }
        press(&mut app, KeyCode::Char('g'));
        for _ in 0..49 {
            app.tick(app.get_tick_rate());
        }
        assert!(app.message().is_some());
        app.tick(app.get_tick_rate());
        assert_eq!(app.message(), None);
    }

    #[test]
    fn test_navigation_edges_and_source_switch() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.message(), Some("Already at the first puzzle"));
        assert_eq!(app.board.index(), 1);

        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.board.source(), PuzzleSource::Nyt);
        assert_eq!(app.cursor_word(), Some("SNOW"));
        assert_eq!(app.message(), None);
    }

    #[test]
    fn test_out_of_range_start_recovers_with_previous() {
        let board =
            Board::new(BundledProvider::new().unwrap(), SessionConfig::default()).with_seed(5);
        let mut app = App::new(board, ThemeChoice::Dark, 99, PuzzleSource::Orig);
        assert!(app.board.session().is_none());
        assert_eq!(app.message(), Some("no orig puzzle with id 99"));

        press(&mut app, KeyCode::Char('p'));
        let last = app.board.count_puzzles() as u32;
        assert_eq!(app.board.index(), last);
        assert!(app.board.session().is_some());
        assert_eq!(app.message(), None);
    }

    #[test]
    fn test_shuffle_keeps_selection() {
        let mut app = app();
        pick(&mut app, "TEAL");
        press(&mut app, KeyCode::Char('s'));
        let session = app.board.session().unwrap();
        assert_eq!(session.selected_cells(), &["TEAL"]);
        assert_eq!(session.remaining_words().iter().flatten().count(), 16);
    }

    #[test]
    fn test_theme_cycle_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme.choice, ThemeChoice::Light);
        assert!(matches!(press(&mut app, KeyCode::Char('q')), AppAction::Quit));
    }
}
