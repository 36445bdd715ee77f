use airdrop_core::{AppConfig, FixedClock, KeyValueStore};
use airdrop_domain::{NotificationPermission, Reminder, ToastLevel};
use airdrop_persistence::keys::{LANGUAGE_KEY, NOTIFICATION_PERMISSION_KEY};
use airdrop_persistence::{FileStore, MemoryStore};
use airdrop_tui::{ui, App, AppMode};
use chrono::{Duration, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;
use tempfile::tempdir;

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()))
}

fn english_store() -> Arc<MemoryStore> {
    let kv = Arc::new(MemoryStore::new());
    kv.set(LANGUAGE_KEY, "\"en\"").unwrap();
    kv.set(NOTIFICATION_PERMISSION_KEY, "\"denied\"").unwrap();
    kv
}

fn app_over(kv: Arc<dyn KeyValueStore>) -> App {
    App::new(AppConfig::default(), kv, clock(), None)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn add_column(app: &mut App, name: &str) {
    press(app, KeyCode::Char('C'));
    type_text(app, name);
    press(app, KeyCode::Enter);
}

fn add_card(app: &mut App, title: &str) {
    press(app, KeyCode::Char('n'));
    type_text(app, title);
    press(app, KeyCode::Enter);
}

fn screen_text(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
    terminal.draw(|frame| ui::render(app, frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_permission_is_asked_once_and_remembered() {
    let kv = Arc::new(MemoryStore::new());
    let mut app = app_over(kv.clone());
    assert_eq!(app.mode, AppMode::PermissionPrompt);

    press(&mut app, KeyCode::Char('y'));

    assert_eq!(app.mode, AppMode::Normal);
    assert_eq!(app.permission, NotificationPermission::Granted);
    let again = app_over(kv);
    assert_eq!(again.mode, AppMode::Normal);
}

#[test]
fn test_create_column_and_card_from_keyboard() {
    let mut app = app_over(english_store());

    add_column(&mut app, "Testnets");
    add_card(&mut app, "Bridge to Scroll");

    assert_eq!(app.view.columns.len(), 1);
    assert_eq!(app.selected_card().unwrap().title, "Bridge to Scroll");
    assert_eq!(app.mode, AppMode::Normal);
    assert_eq!(app.banner.as_ref().unwrap().message, "Column \"Testnets\" added!");

    let screen = screen_text(&app);
    assert!(screen.contains("Testnets"));
    assert!(screen.contains("Bridge to Scroll"));
}

#[test]
fn test_rejected_card_keeps_form_open() {
    let mut app = app_over(english_store());
    add_column(&mut app, "Todo");

    press(&mut app, KeyCode::Char('n'));
    press(&mut app, KeyCode::Enter);

    assert!(matches!(app.mode, AppMode::CardForm(_)));
    assert_eq!(app.model.board().total_cards(), 0);
}

#[test]
fn test_move_card_between_columns() {
    let mut app = app_over(english_store());
    add_column(&mut app, "Todo");
    add_column(&mut app, "Done");
    press(&mut app, KeyCode::Left);
    add_card(&mut app, "Claim");

    press(&mut app, KeyCode::Char('>'));

    let done = &app.view.columns[1];
    assert_eq!(done.cards.len(), 1);
    assert!(app.view.columns[0].cards.is_empty());
    assert_eq!(app.column_index, 1);
    assert_eq!(app.selected_card().unwrap().title, "Claim");
}

#[test]
fn test_delete_requires_confirmation() {
    let mut app = app_over(english_store());
    add_column(&mut app, "Todo");
    add_card(&mut app, "Doomed");

    press(&mut app, KeyCode::Char('d'));
    assert!(matches!(app.mode, AppMode::Confirm(_)));
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.model.board().total_cards(), 1);

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.model.board().total_cards(), 0);
    assert_eq!(app.mode, AppMode::Normal);
}

#[test]
fn test_search_applies_on_enter() {
    let mut app = app_over(english_store());
    add_column(&mut app, "Todo");
    add_card(&mut app, "Alpha Drop");
    add_card(&mut app, "Beta");

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "alpha");
    assert_eq!(app.view.visible_cards, 2, "query waits for the debounce");

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.filters.query, "alpha");
    assert_eq!(app.view.visible_cards, 1);
    assert_eq!(app.view.columns[0].cards[0].title, "Alpha Drop");

    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.view.visible_cards, 2);
}

#[test]
fn test_search_applies_on_tick_after_debounce() {
    let mut config = AppConfig::default();
    config.ui.debounce_ms = 0;
    let mut app = App::new(config, english_store(), clock(), None);
    add_column(&mut app, "Todo");
    add_card(&mut app, "Alpha Drop");
    add_card(&mut app, "Beta");

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "alpha");
    app.on_tick();

    assert_eq!(app.mode, AppMode::Search);
    assert_eq!(app.filters.query, "alpha");
    assert_eq!(app.view.visible_cards, 1);
    assert_eq!(app.view.columns[0].cards[0].title, "Alpha Drop");
}

#[test]
fn test_checklist_toggle_from_detail() {
    let mut app = app_over(english_store());
    add_column(&mut app, "Todo");
    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "Farm");
    for _ in 0..7 {
        press(&mut app, KeyCode::Tab);
    }
    type_text(&mut app, "bridge; swap");
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Enter);
    assert!(matches!(app.mode, AppMode::CardDetail { .. }));
    press(&mut app, KeyCode::Char(' '));

    let card = app.model.board().cards().next().unwrap();
    assert!(card.checklist[0].done);
    assert!(!card.checklist[1].done);
}

#[test]
fn test_invalid_import_leaves_board() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("backup.json");
    std::fs::write(&path, r#"{"columns": []}"#).unwrap();
    let mut app = app_over(english_store());
    add_column(&mut app, "Keep");
    app.banner = None;

    press(&mut app, KeyCode::Char('I'));
    type_text(&mut app, path.to_str().unwrap());
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.model.board().columns.len(), 1);
    let banner = app.banner.as_ref().unwrap();
    assert_eq!(banner.level, ToastLevel::Danger);
    assert_eq!(banner.message, "Invalid import file!");
}

#[test]
fn test_export_then_import_through_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("export.json");
    let mut source = app_over(english_store());
    add_column(&mut source, "Mainnet");
    add_card(&mut source, "Zora");

    press(&mut source, KeyCode::Char('X'));
    if let AppMode::ExportPath(input) = &mut source.mode {
        input.set(path.to_str().unwrap());
    }
    press(&mut source, KeyCode::Enter);
    assert!(path.exists());

    let mut target = app_over(english_store());
    press(&mut target, KeyCode::Char('I'));
    type_text(&mut target, path.to_str().unwrap());
    press(&mut target, KeyCode::Enter);

    assert_eq!(target.model.board(), source.model.board());
}

#[test]
fn test_due_reminder_becomes_toast() {
    let mut app = app_over(english_store());
    let now = app.model.now();
    app.scheduler
        .schedule(Reminder::new(
            None,
            "Snapshot",
            "hold tokens",
            now - Duration::minutes(5),
            now - Duration::hours(1),
        ))
        .unwrap();

    app.check_notifications();

    assert_eq!(app.banner.as_ref().unwrap().message, "Snapshot: hold tokens");
    assert!(app.scheduler.reminders()[0].sent);
}

#[test]
fn test_theme_and_language_persist() {
    let kv = english_store();
    let mut app = app_over(kv.clone());
    press(&mut app, KeyCode::Char('t'));
    press(&mut app, KeyCode::Char('g'));

    let reopened = app_over(kv);
    assert_eq!(reopened.theme, app.theme);
    assert_eq!(reopened.language(), app.language());
    assert_ne!(reopened.language(), airdrop_domain::Language::En);
}

#[test]
fn test_external_write_reloads_view() {
    let dir = tempdir().unwrap();
    let shared: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
    shared.set(LANGUAGE_KEY, "\"en\"").unwrap();
    shared.set(NOTIFICATION_PERMISSION_KEY, "\"denied\"").unwrap();
    let mut viewer = app_over(shared.clone());
    let mut writer = app_over(Arc::new(FileStore::new(dir.path())));

    add_column(&mut writer, "From CLI");
    viewer.reload_from_storage();

    assert_eq!(viewer.view.columns[0].name, "From CLI");
    assert_eq!(viewer.banner.as_ref().unwrap().message, "Board reloaded");
}

#[test]
fn test_clock_drives_overdue_flag() {
    let kv = english_store();
    let clock = clock();
    let mut app = App::new(AppConfig::default(), kv, clock.clone(), None);
    add_column(&mut app, "Todo");
    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "Claim");
    for _ in 0..4 {
        press(&mut app, KeyCode::Tab);
    }
    type_text(&mut app, "2024-06-02");
    press(&mut app, KeyCode::Enter);
    assert!(!app.selected_card().unwrap().is_overdue());

    clock.advance(Duration::days(3));
    app.refresh_view();
    assert!(app.selected_card().unwrap().is_overdue());
}
