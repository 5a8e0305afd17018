//! Search form TUI main loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use moviesearch_api::omdb::{LookupError, MovieRecord, OmdbApi};

use super::state::{InputMode, SearchState};
use super::ui;

/// Redraw interval while waiting for input or a lookup.
const TICK: Duration = Duration::from_millis(50);

/// Outcome of one lookup, delivered back to the event loop.
type LookupOutcome = Result<MovieRecord, LookupError>;

/// What the event loop must do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Nothing beyond the state change already applied.
    None,
    /// Trigger a search.
    Search,
    /// Open the IMDb page of the current result.
    OpenImdb,
    /// Open the poster of the current result.
    OpenPoster,
    /// Leave the form.
    Quit,
}

/// Runs the search form TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails. Lookup
/// failures never surface here; they are shown in the form.
pub async fn run_search_form<A>(api: Arc<A>, mut state: SearchState) -> Result<()>
where
    A: OmdbApi + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, &api).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
///
/// Terminal events are drained without blocking so the spawned lookup task
/// keeps making progress on the same runtime thread.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut SearchState,
    api: &Arc<A>,
) -> Result<()>
where
    A: OmdbApi + Sync + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<LookupOutcome>();

    loop {
        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            if let Event::Key(key) = event::read().context("failed to read event")?
                && key.kind == KeyEventKind::Press
            {
                match handle_key(state, key.code, key.modifiers) {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::Search => start_lookup(state, api, &tx),
                    KeyAction::OpenImdb => open_link(state.result().and_then(MovieRecord::imdb_url)),
                    KeyAction::OpenPoster => open_link(
                        state
                            .result()
                            .and_then(MovieRecord::poster_url)
                            .map(String::from),
                    ),
                    KeyAction::None => {}
                }
            }
        }

        tokio::select! {
            Some(outcome) = rx.recv() => {
                state.complete(outcome);
            }
            () = tokio::time::sleep(TICK) => {}
        }
    }
}

/// Dispatches a search and spawns its single lookup.
fn start_lookup<A>(
    state: &mut SearchState,
    api: &Arc<A>,
    tx: &mpsc::UnboundedSender<LookupOutcome>,
)
where
    A: OmdbApi + Sync + 'static,
{
    let Some(query) = state.dispatch() else {
        return;
    };
    tracing::debug!(title = %query.title, "dispatching lookup");

    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = api.lookup_title(&query).await;
        if tx.send(outcome).is_err() {
            tracing::debug!("search form closed before lookup finished");
        }
    });
}

/// Opens a URL in the default browser, if there is one.
fn open_link(url: Option<String>) {
    let Some(url) = url else {
        return;
    };
    if let Err(err) = open::that(&url) {
        tracing::debug!(%url, error = %err, "failed to open link");
    }
}

/// Applies a key press to the form and returns the follow-up action.
pub fn handle_key(state: &mut SearchState, key: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    match state.input_mode {
        InputMode::Editing => handle_editing_input(state, key, modifiers),
        InputMode::Normal => handle_normal_input(state, key),
    }
}

/// Handles key input in editing mode.
///
/// Control and Alt chords are not text and leave the query alone.
fn handle_editing_input(
    state: &mut SearchState,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> KeyAction {
    match key {
        KeyCode::Enter => return KeyAction::Search,
        KeyCode::Esc => state.input_mode = InputMode::Normal,
        KeyCode::Backspace => state.query_pop(),
        KeyCode::Char(_)
            if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
        KeyCode::Char(c) => state.query_push(c),
        _ => {}
    }
    KeyAction::None
}

/// Handles key input in normal mode.
fn handle_normal_input(state: &mut SearchState, key: KeyCode) -> KeyAction {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Enter => KeyAction::Search,
        KeyCode::Char('i' | '/') => {
            state.input_mode = InputMode::Editing;
            KeyAction::None
        }
        KeyCode::Char('o') => KeyAction::OpenImdb,
        KeyCode::Char('p') => KeyAction::OpenPoster,
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::atomic::{AtomicUsize, Ordering};

    use moviesearch_api::omdb::TitleQuery;

    use super::*;

    /// Fake API echoing the queried title back as a record.
    #[derive(Default)]
    struct EchoApi {
        calls: AtomicUsize,
    }

    impl OmdbApi for EchoApi {
        async fn lookup_title(&self, query: &TitleQuery) -> Result<MovieRecord, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(MovieRecord {
                title: query.title.clone(),
                ..MovieRecord::default()
            })
        }
    }

    fn press(state: &mut SearchState, key: KeyCode) -> KeyAction {
        handle_key(state, key, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_edits_query() {
        // Arrange
        let mut state = SearchState::new();

        // Act
        for c in "Heaq".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        press(&mut state, KeyCode::Backspace);
        press(&mut state, KeyCode::Char('t'));

        // Assert
        assert_eq!(state.query, "Heat");
    }

    #[test]
    fn test_enter_triggers_search() {
        // Arrange
        let mut state = SearchState::new();

        // Act
        let action = press(&mut state, KeyCode::Enter);

        // Assert
        assert_eq!(action, KeyAction::Search);
    }

    #[test]
    fn test_q_while_editing_is_text() {
        // Arrange
        let mut state = SearchState::new();

        // Act
        let action = press(&mut state, KeyCode::Char('q'));

        // Assert
        assert_eq!(action, KeyAction::None);
        assert_eq!(state.query, "q");
    }

    #[test]
    fn test_escape_then_q_quits() {
        // Arrange
        let mut state = SearchState::new();

        // Act
        press(&mut state, KeyCode::Esc);
        let action = press(&mut state, KeyCode::Char('q'));

        // Assert
        assert_eq!(action, KeyAction::Quit);
    }

    #[test]
    fn test_normal_mode_commands() {
        // Arrange
        let mut state = SearchState::new();
        press(&mut state, KeyCode::Esc);

        // Act & Assert
        assert_eq!(press(&mut state, KeyCode::Char('o')), KeyAction::OpenImdb);
        assert_eq!(press(&mut state, KeyCode::Char('p')), KeyAction::OpenPoster);
        assert_eq!(press(&mut state, KeyCode::Char('/')), KeyAction::None);
        assert_eq!(state.input_mode, InputMode::Editing);
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        // Arrange
        let mut state = SearchState::new();

        // Act
        let action = handle_key(&mut state, KeyCode::Char('c'), KeyModifiers::CONTROL);

        // Assert
        assert_eq!(action, KeyAction::Quit);
        assert!(state.query.is_empty());
    }

    #[test]
    fn test_control_and_alt_chords_are_not_text() {
        // Arrange
        let mut state = SearchState::new();
        state.set_query("Heat");

        // Act
        let ctrl_u = handle_key(&mut state, KeyCode::Char('u'), KeyModifiers::CONTROL);
        let alt_x = handle_key(&mut state, KeyCode::Char('x'), KeyModifiers::ALT);
        handle_key(&mut state, KeyCode::Char('S'), KeyModifiers::SHIFT);

        // Assert
        assert_eq!(ctrl_u, KeyAction::None);
        assert_eq!(alt_x, KeyAction::None);
        assert_eq!(state.query, "HeatS");
    }

    #[tokio::test]
    async fn test_start_lookup_delivers_one_outcome() {
        // Arrange
        let api = Arc::new(EchoApi::default());
        let (tx, mut rx) = mpsc::unbounded_channel::<LookupOutcome>();
        let mut state = SearchState::new();
        state.set_query("Inception");

        // Act
        start_lookup(&mut state, &api, &tx);
        let loading_after_first = state.is_loading();
        start_lookup(&mut state, &api, &tx);
        drop(tx);
        let outcome = rx.recv().await.unwrap();
        let applied = state.complete(outcome);
        let extra = rx.recv().await;

        // Assert
        assert!(loading_after_first);
        assert!(applied);
        assert_eq!(state.result().unwrap().title, "Inception");
        assert!(extra.is_none());
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_start_lookup_blank_query_spawns_nothing() {
        // Arrange
        let api = Arc::new(EchoApi::default());
        let (tx, mut rx) = mpsc::unbounded_channel::<LookupOutcome>();
        let mut state = SearchState::new();
        state.set_query("   ");

        // Act
        start_lookup(&mut state, &api, &tx);
        drop(tx);
        let outcome = rx.recv().await;

        // Assert
        assert!(outcome.is_none());
        assert!(!state.is_loading());
        assert_eq!(
            state.error_message(),
            Some("Please enter a movie title to search.")
        );
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }
}
