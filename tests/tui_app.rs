//! TUI application logic driven by key events

mod common;

use common::ScriptedApi;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use wordle_client::core::Mode;
use wordle_client::game::{Controller, Status};
use wordle_client::interactive::App;
use wordle_client::interactive::app::{Action, DEFAULT_AUTO_GAMES, MessageStyle};

fn modes() -> Vec<Mode> {
    Mode::cycle(&["entropy".to_string(), "tfidf".to_string()])
}

fn app(api: ScriptedApi) -> App<ScriptedApi> {
    App::new(Controller::new(api, Mode::User), modes())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

async fn type_word(app: &mut App<ScriptedApi>, word: &str) {
    for c in word.chars() {
        app.handle_key(key(KeyCode::Char(c))).await;
    }
}

#[tokio::test]
async fn starts_a_user_game() {
    let app = app(ScriptedApi::new());

    assert_eq!(app.selected, 0);
    assert!(app.controller.mode().is_user());
    assert_eq!(app.controller.state().generation(), 1);
    assert_eq!(app.auto_games, DEFAULT_AUTO_GAMES);
    assert!(!app.messages.is_empty());
}

#[tokio::test]
async fn typing_and_submitting_a_guess() {
    let mut app = app(ScriptedApi::new().solution(42).checks(&["MWWCM"]));

    type_word(&mut app, "cr4ane!s").await;
    assert_eq!(app.input_buffer, "CRANE");

    app.handle_key(key(KeyCode::Enter)).await;

    assert!(app.input_buffer.is_empty());
    assert_eq!(app.controller.state().guess_count(), 1);
    assert_eq!(
        app.controller.api().check_calls(),
        vec![(42, "CRANE".to_string())]
    );
}

#[tokio::test]
async fn backspace_edits_the_input() {
    let mut app = app(ScriptedApi::new());

    type_word(&mut app, "crab").await;
    app.handle_key(key(KeyCode::Backspace)).await;
    type_word(&mut app, "ne").await;

    assert_eq!(app.input_buffer, "CRANE");
}

#[tokio::test]
async fn command_letters_are_typed_in_user_mode() {
    let mut app = app(ScriptedApi::new());

    type_word(&mut app, "qns").await;

    assert_eq!(app.input_buffer, "QNS");
    assert!(!app.should_quit);
    assert_eq!(app.controller.state().generation(), 1);
}

#[tokio::test]
async fn invalid_word_shows_message_and_clears_input() {
    let mut app = app(ScriptedApi::new().checks(&["INVALID"]));

    type_word(&mut app, "qzxjk").await;
    app.handle_key(key(KeyCode::Enter)).await;

    assert!(app.input_buffer.is_empty());
    assert_eq!(app.controller.state().guess_count(), 0);
    let last = app.messages.last().unwrap();
    assert_eq!(last.text, "INVALID");
    assert_eq!(last.style, MessageStyle::Error);
}

#[tokio::test]
async fn failed_check_keeps_input_for_retry() {
    let mut app = app(ScriptedApi::new().failing_check());

    type_word(&mut app, "crane").await;
    app.handle_key(key(KeyCode::Enter)).await;

    assert_eq!(app.input_buffer, "CRANE");
    assert_eq!(app.controller.state().guess_count(), 0);

    app.handle_key(key(KeyCode::Enter)).await;
    assert!(app.input_buffer.is_empty());
    assert_eq!(app.controller.state().guess_count(), 1);
}

#[tokio::test]
async fn solving_shows_success() {
    let mut app = app(ScriptedApi::new().checks(&["CCCCC"]));

    type_word(&mut app, "moist").await;
    app.handle_key(key(KeyCode::Enter)).await;

    assert_eq!(app.controller.state().status(), Status::Won);
    let last = app.messages.last().unwrap();
    assert_eq!(last.text, "CORRECTLY GUESSED");
    assert_eq!(last.style, MessageStyle::Success);
}

#[tokio::test]
async fn ctrl_n_starts_a_new_game() {
    let mut app = app(ScriptedApi::new());

    type_word(&mut app, "cra").await;
    app.handle_key(ctrl('n')).await;

    assert!(app.input_buffer.is_empty());
    assert_eq!(app.controller.state().generation(), 2);
}

#[tokio::test]
async fn other_ctrl_chords_are_ignored() {
    let mut app = app(ScriptedApi::new());

    type_word(&mut app, "cr").await;
    app.handle_key(ctrl('a')).await;
    app.handle_key(ctrl('q')).await;
    assert_eq!(app.input_buffer, "CR");
    assert!(!app.should_quit);

    app.handle_key(key(KeyCode::Tab)).await;
    assert_eq!(app.handle_key(ctrl('s')).await, Action::None);
    app.handle_key(ctrl('q')).await;
    assert!(!app.should_quit);
}

#[tokio::test]
async fn esc_and_ctrl_c_quit() {
    let mut first = app(ScriptedApi::new());
    first.handle_key(key(KeyCode::Esc)).await;
    assert!(first.should_quit);

    let mut second = app(ScriptedApi::new());
    second.handle_key(ctrl('c')).await;
    assert!(second.should_quit);
}

#[tokio::test]
async fn tab_cycles_through_modes() {
    let mut app = app(ScriptedApi::new());

    app.handle_key(key(KeyCode::Tab)).await;
    assert_eq!(app.controller.mode().name(), "entropy");
    assert_eq!(app.controller.state().generation(), 2);

    app.handle_key(key(KeyCode::Tab)).await;
    assert_eq!(app.controller.mode().name(), "tfidf");

    app.handle_key(key(KeyCode::Tab)).await;
    assert!(app.controller.mode().is_user());
    assert_eq!(app.selected, 0);
}

#[tokio::test]
async fn strategy_mode_keys() {
    let mut app = app(ScriptedApi::new());
    app.handle_key(key(KeyCode::Tab)).await;

    assert_eq!(app.handle_key(key(KeyCode::Char('+'))).await, Action::None);
    assert_eq!(app.auto_games, DEFAULT_AUTO_GAMES + 1);
    app.handle_key(key(KeyCode::Char('-'))).await;
    app.handle_key(key(KeyCode::Char('-'))).await;
    assert_eq!(app.auto_games, DEFAULT_AUTO_GAMES - 1);

    assert_eq!(app.handle_key(key(KeyCode::Char('s'))).await, Action::AutoPlay);
    assert_eq!(app.handle_key(key(KeyCode::Enter)).await, Action::AutoPlay);
    assert!(app.input_buffer.is_empty());

    app.handle_key(key(KeyCode::Char('n'))).await;
    assert_eq!(app.controller.state().generation(), 3);

    app.handle_key(key(KeyCode::Char('q'))).await;
    assert!(app.should_quit);
}

#[tokio::test]
async fn auto_game_count_stays_positive() {
    let mut app = app(ScriptedApi::new());
    for _ in 0..(DEFAULT_AUTO_GAMES + 5) {
        app.adjust_auto_games(-1);
    }
    assert_eq!(app.auto_games, 1);
}

#[tokio::test]
async fn release_events_are_ignored() {
    let mut app = app(ScriptedApi::new());
    let mut release = key(KeyCode::Char('a'));
    release.kind = KeyEventKind::Release;

    app.handle_key(release).await;
    assert!(app.input_buffer.is_empty());
}

#[tokio::test]
async fn auto_play_redraws_and_summarizes() {
    let api = ScriptedApi::new().checks(&["WWWWW", "CCCCC"]);
    let mut app = app(api);
    app.handle_key(key(KeyCode::Tab)).await;
    app.auto_games = 2;

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    app.auto_play(&mut terminal).await.unwrap();

    let summary = app.messages.iter().find(|m| m.style == MessageStyle::Success);
    assert_eq!(
        summary.map(|m| m.text.as_str()),
        Some("entropy: won 1/2 (50%), 2.00 guesses on average")
    );
    assert_eq!(app.controller.state().status(), Status::Exhausted);
}

#[tokio::test]
async fn auto_play_in_user_mode_is_refused() {
    let mut app = app(ScriptedApi::new());
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

    app.auto_play(&mut terminal).await.unwrap();

    assert_eq!(app.controller.state().generation(), 1);
    assert_eq!(app.messages.last().unwrap().style, MessageStyle::Error);
}
