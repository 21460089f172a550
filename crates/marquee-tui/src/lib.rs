//! marquee-tui: Terminal UI for marquee text animations
//!
//! This crate provides the rendering surface for marquee, including:
//! - Home screen with the rotating typewriter hero
//! - Boot-log screens (about, contact, blog) with replay and pause
//! - Fuzzy blog search with a tag filter
//! - The ROI calculator
//! - Shared widgets (tabs, log viewer, status bar, search input)

mod app;
mod event;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod ui;

pub use app::{App, Screen};
pub use event::{Action, Event, EventHandler};
pub use marquee_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use marquee_engine::{Clock, Config, SystemClock};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};

/// Poll interval of the event thread. Finer than the fastest animation step.
const TICK_RATE_MS: u64 = 25;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // The app's animations are timed from the clock's epoch
    let clock = SystemClock::new();
    let mut app = App::new(config);
    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = run_loop(&mut terminal, &mut app, &mut events, &clock).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    clock: &impl Clock,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|frame| {
                let area = frame.area();
                screens::render_app(app, area, frame.buffer_mut());
            })?;
        }

        let Some(event) = events.next().await else {
            break;
        };

        dirty = match event {
            Event::Key(key) => {
                app.tick(clock.now_ms());
                if !handle_search_key(app, key) {
                    app.handle_action(event::key_to_action(key));
                }
                true
            }
            Event::Tick => app.tick(clock.now_ms()),
            Event::Resize => true,
        };

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Route typing into the blog search box while it has focus.
/// Returns true if the key was consumed.
fn handle_search_key(app: &mut App, key: KeyEvent) -> bool {
    if app.screen != Screen::Blog || !app.blog.focused {
        return false;
    }

    // Leave Ctrl+C and friends to the action handler
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    let input = &mut app.blog.query;
    match key.code {
        // Esc clears through the Back action; arrows move the list
        KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            return false;
        }
        KeyCode::Enter => {
            app.blog.focused = false;
            return true;
        }
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    app.search_edited();
    true
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}



/// Navigation tests that drive event handling and screen transitions.
#[cfg(test)]
mod navigation_tests {
    use super::handle_search_key;
    use crate::app::Screen;
    use crate::event::Action;
    use crate::test_utils::{create_test_app, create_test_app_at_screen};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_number_keys_navigate() {
        let mut app = create_test_app();
        assert_eq!(app.screen, Screen::Home);

        app.handle_action(Action::Tab(2));
        assert_eq!(app.screen, Screen::Blog);

        app.handle_action(Action::Tab(4));
        assert_eq!(app.screen, Screen::Roi);

        // Out of range is ignored
        app.handle_action(Action::Tab(9));
        assert_eq!(app.screen, Screen::Roi);
    }

    #[test]
    fn test_back_returns_home() {
        let mut app = create_test_app_at_screen(Screen::Contact);
        app.handle_action(Action::Back);
        assert_eq!(app.screen, Screen::Home);

        app.handle_action(Action::Back);
        assert_eq!(app.screen, Screen::Home);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_help_overlay_toggle() {
        let mut app = create_test_app();
        assert!(!app.show_help);

        app.handle_action(Action::Help);
        assert!(app.show_help);

        app.handle_action(Action::Back);
        assert!(!app.show_help);
    }

    #[test]
    fn test_help_closes_before_quit() {
        let mut app = create_test_app();
        app.show_help = true;

        app.handle_action(Action::Quit);
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_any_key_closes_help_without_acting() {
        let mut app = create_test_app();
        app.show_help = true;
        app.handle_action(Action::Tab(1));
        assert!(!app.show_help);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_action_none_does_nothing() {
        let mut app = create_test_app();
        let initial_screen = app.screen;

        app.handle_action(Action::None);
        assert_eq!(app.screen, initial_screen);
    }

    #[test]
    fn test_search_keys_only_when_focused() {
        let mut app = create_test_app_at_screen(Screen::Blog);
        assert!(!handle_search_key(&mut app, key(KeyCode::Char('q'))));

        app.handle_action(Action::Search);
        for c in "ctf".chars() {
            assert!(handle_search_key(&mut app, key(KeyCode::Char(c))));
        }
        // 'q' is text while typing, not quit
        assert!(handle_search_key(&mut app, key(KeyCode::Char('q'))));
        assert_eq!(app.blog.query.content(), "ctfq");
        assert!(handle_search_key(&mut app, key(KeyCode::Backspace)));
        assert_eq!(app.results()[0].slug, "building-ctf-challenges");

        assert!(handle_search_key(&mut app, key(KeyCode::Enter)));
        assert!(!app.blog.focused);
        assert_eq!(app.blog.query.content(), "ctf");
    }

    #[test]
    fn test_ctrl_c_passes_through_search() {
        let mut app = create_test_app_at_screen(Screen::Blog);
        app.handle_action(Action::Search);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!handle_search_key(&mut app, ctrl_c));
        assert!(!handle_search_key(&mut app, key(KeyCode::Esc)));
    }
}
