use airdrop_core::{AppConfig, BoardError, Clock, InputState, KeyValueStore};
use airdrop_domain::{
    visible_board, BoardEvent, BoardModel, BoardView, CardId, CardView, ColumnView,
    ConfirmRequest, Controller, Effect, FilterSet, Intent, Label, Language,
    NotificationPermission, NotificationScheduler, Outcome, Theme, Toast,
};
use airdrop_persistence::{
    AtomicWriter, BoardStore, ChangeDetector, FileWatcher, PreferenceStore, ReminderStore,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::cell::Cell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clipboard::copy_to_clipboard;
use crate::components::Banner;
use crate::events::{Event, EventHandler};
use crate::form::{CardForm, ColumnField, ColumnForm};
use crate::notifier::{ring_bell, TerminalNotifier};
use crate::selection::SelectionState;
use crate::theme::Palette;
use crate::ui;

#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Search,
    ColumnForm(ColumnForm),
    CardForm(CardForm),
    CardDetail {
        card_id: CardId,
        checklist: SelectionState,
    },
    Confirm(ConfirmRequest),
    Dashboard,
    Calendar,
    ExportPath(InputState),
    ImportPath(InputState),
    PermissionPrompt,
}

pub struct App {
    pub model: BoardModel,
    pub controller: Controller,
    pub scheduler: NotificationScheduler,
    preferences: PreferenceStore,
    pub config: AppConfig,
    pub theme: Theme,
    pub permission: NotificationPermission,
    /// Filters the view is currently derived from.
    pub filters: FilterSet,
    /// Search box contents; copied into `filters` once typing pauses.
    pub search: InputState,
    search_edited_at: Option<Instant>,
    pub view: BoardView,
    view_stale: Rc<Cell<bool>>,
    pub mode: AppMode,
    pub column_index: usize,
    pub card_selection: SelectionState,
    pub banner: Option<Banner>,
    pending_toasts: VecDeque<Toast>,
    pub should_quit: bool,
    board_file: Option<PathBuf>,
}

impl App {
    /// Wires stores, model, scheduler and controller over one key/value store.
    /// `board_file` is watched for writes made by other processes.
    pub fn new(
        config: AppConfig,
        kv: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        board_file: Option<PathBuf>,
    ) -> Self {
        let preferences = PreferenceStore::new(kv.clone(), &config.defaults);
        let theme = preferences.theme();
        let language = preferences.language();
        let permission = preferences.notification_permission();

        let mut model = BoardModel::new(
            Box::new(BoardStore::new(kv.clone(), clock.clone())),
            clock.clone(),
        );
        let view_stale = Rc::new(Cell::new(false));
        let stale = view_stale.clone();
        model.subscribe(move |event: BoardEvent<'_>| {
            tracing::trace!(change = ?event.change, "board changed");
            stale.set(true);
        });

        let scheduler = NotificationScheduler::new(
            Box::new(ReminderStore::new(kv, clock)),
            language,
            config.notifications.prune_after_days,
        );
        let controller = Controller::new(&config, language);
        let filters = FilterSet::new();
        let view = visible_board(model.board(), &filters, model.today());
        let mode = if permission.is_undetermined() {
            AppMode::PermissionPrompt
        } else {
            AppMode::Normal
        };

        let mut app = Self {
            model,
            controller,
            scheduler,
            preferences,
            config,
            theme,
            permission,
            filters,
            search: InputState::new(),
            search_edited_at: None,
            view,
            view_stale,
            mode,
            column_index: 0,
            card_selection: SelectionState::new(),
            banner: None,
            pending_toasts: VecDeque::new(),
            should_quit: false,
            board_file,
        };
        app.card_selection.clamp(app.visible_card_count());
        app
    }

    pub fn language(&self) -> Language {
        self.controller.language()
    }

    pub fn label(&self, label: Label) -> &'static str {
        self.controller.label(label)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    pub fn selected_column(&self) -> Option<&ColumnView> {
        self.view.columns.get(self.column_index)
    }

    pub fn selected_card(&self) -> Option<&CardView> {
        let column = self.selected_column()?;
        column.cards.get(self.card_selection.get()?)
    }

    fn visible_card_count(&self) -> usize {
        self.selected_column().map_or(0, |c| c.cards.len())
    }

    /// Recomputes the projection from the model and keeps the cursor in range.
    pub fn refresh_view(&mut self) {
        self.view = visible_board(self.model.board(), &self.filters, self.model.today());
        self.view_stale.set(false);
        if self.column_index >= self.view.columns.len() {
            self.column_index = self.view.columns.len().saturating_sub(1);
        }
        self.card_selection.clamp(self.visible_card_count());
    }

    fn refresh_if_stale(&mut self) {
        if self.view_stale.get() {
            self.refresh_view();
        }
    }

    fn select_card(&mut self, card_id: CardId) {
        for (column_index, column) in self.view.columns.iter().enumerate() {
            if let Some(pos) = column.cards.iter().position(|c| c.id == card_id) {
                self.column_index = column_index;
                self.card_selection.set(Some(pos));
                return;
            }
        }
    }

    pub fn show(&mut self, toast: Toast) {
        if self.banner.is_none() {
            self.banner = Some(Banner::new(toast));
        } else {
            self.pending_toasts.push_back(toast);
        }
    }

    /// Runs an intent and reports whether it was applied.
    /// A destructive intent switches to the confirmation popup instead.
    fn run_intent(&mut self, intent: Intent) -> bool {
        let outcome = self.controller.handle(&mut self.model, intent);
        self.apply_outcome(outcome)
    }

    fn apply_outcome(&mut self, outcome: Outcome) -> bool {
        let applied = match outcome {
            Outcome::Applied { toast, effect } => {
                self.show(toast);
                self.refresh_if_stale();
                match effect {
                    Effect::CardAdded(id) | Effect::CardChanged(id) => self.select_card(id),
                    Effect::ColumnAdded(_) => {
                        self.column_index = self.view.columns.len().saturating_sub(1);
                        self.card_selection.clamp(self.visible_card_count());
                    }
                    _ => {}
                }
                true
            }
            Outcome::Rejected { toast, error } => {
                tracing::debug!(%error, "intent rejected");
                self.show(toast);
                false
            }
            Outcome::NeedsConfirmation(request) => {
                self.mode = AppMode::Confirm(request);
                false
            }
        };
        self.refresh_if_stale();
        applied
    }

    /// Applies a pending search query and expires the banner.
    pub fn on_tick(&mut self) {
        let debounce = Duration::from_millis(self.config.ui.debounce_ms);
        if self.search_edited_at.is_some_and(|at| at.elapsed() >= debounce) {
            self.apply_search();
        }
        let ttl = Duration::from_millis(self.config.ui.toast_ms);
        if self.banner.as_ref().is_some_and(|b| b.is_expired(ttl)) {
            self.banner = self.pending_toasts.pop_front().map(Banner::new);
        }
    }

    pub fn apply_search(&mut self) {
        self.search_edited_at = None;
        if self.filters.query != self.search.as_str() {
            self.filters.query = self.search.as_str().to_string();
            self.refresh_view();
        }
    }

    pub fn check_notifications(&mut self) {
        let mut notifier = TerminalNotifier::new(self.permission);
        let result = self.scheduler.check(
            self.model.board(),
            self.model.now(),
            self.model.today(),
            &mut notifier,
        );
        if let Err(e) = result {
            tracing::error!("Reminder check failed: {}", e);
            let toast = self.controller.error_toast(&e);
            self.show(toast);
        }
        for toast in notifier.toasts {
            self.show(toast);
        }
        if notifier.bells > 0 {
            ring_bell();
        }
    }

    pub fn reload_from_storage(&mut self) {
        if self.model.reload() {
            let toast = Toast::info(self.label(Label::BoardReloaded));
            self.show(toast);
            self.refresh_view();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match std::mem::replace(&mut self.mode, AppMode::Normal) {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Search => self.handle_search_key(key),
            AppMode::ColumnForm(form) => self.handle_column_form_key(form, key),
            AppMode::CardForm(form) => self.handle_card_form_key(form, key),
            AppMode::CardDetail { card_id, checklist } => {
                self.handle_detail_key(card_id, checklist, key)
            }
            AppMode::Confirm(request) => self.handle_confirm_key(request, key),
            overlay @ (AppMode::Dashboard | AppMode::Calendar) => {
                self.handle_overlay_key(overlay, key)
            }
            AppMode::ExportPath(input) => self.handle_path_key(input, key, true),
            AppMode::ImportPath(input) => self.handle_path_key(input, key, false),
            AppMode::PermissionPrompt => self.handle_permission_key(key),
        }
    }

    fn handle_overlay_key(&mut self, overlay: AppMode, key: KeyEvent) {
        self.mode = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => AppMode::Normal,
            KeyCode::Char('b') => AppMode::Dashboard,
            KeyCode::Char('a') => AppMode::Calendar,
            _ => overlay,
        };
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => {
                self.column_index = self.column_index.saturating_sub(1);
                self.card_selection.clamp(self.visible_card_count());
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.column_index + 1 < self.view.columns.len() {
                    self.column_index += 1;
                }
                self.card_selection.clamp(self.visible_card_count());
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.card_selection.next(self.visible_card_count());
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.card_selection.prev(self.visible_card_count());
            }
            KeyCode::Char('/') => self.mode = AppMode::Search,
            KeyCode::Char('s') => {
                self.filters.cycle_status();
                self.refresh_view();
            }
            KeyCode::Char('p') => {
                self.filters.cycle_priority();
                self.refresh_view();
            }
            KeyCode::Char('x') => {
                self.filters.clear();
                self.search.clear();
                self.search_edited_at = None;
                self.refresh_view();
            }
            KeyCode::Char('C') => {
                let color = self.config.defaults.column_color.clone();
                self.mode = AppMode::ColumnForm(ColumnForm::create(&color));
            }
            KeyCode::Char('E') => {
                if let Some(id) = self.selected_column().map(|c| c.id) {
                    if let Some(column) = self.model.column(id) {
                        self.mode = AppMode::ColumnForm(ColumnForm::edit(column));
                    }
                }
            }
            KeyCode::Char('D') => {
                if let Some(id) = self.selected_column().map(|c| c.id) {
                    self.run_intent(Intent::RemoveColumn { id });
                }
            }
            KeyCode::Char('[') => self.shift_column(false),
            KeyCode::Char(']') => self.shift_column(true),
            KeyCode::Char('n') => {
                if let Some(id) = self.selected_column().map(|c| c.id) {
                    self.mode = AppMode::CardForm(CardForm::create(id));
                }
            }
            KeyCode::Char('e') => self.open_card_form(),
            KeyCode::Char('d') => {
                if let Some(card) = self.selected_card() {
                    let intent = Intent::RemoveCard {
                        column_id: card.column_id,
                        card_id: card.id,
                    };
                    self.run_intent(intent);
                }
            }
            KeyCode::Char('y') => {
                if let Some(card) = self.selected_card() {
                    let intent = Intent::DuplicateCard {
                        column_id: card.column_id,
                        card_id: card.id,
                    };
                    self.run_intent(intent);
                }
            }
            KeyCode::Char('<') => self.move_selected_card(false),
            KeyCode::Char('>') => self.move_selected_card(true),
            KeyCode::Enter => {
                if let Some(card_id) = self.selected_card().map(|c| c.id) {
                    let mut checklist = SelectionState::new();
                    checklist.clamp(self.checklist_len(card_id));
                    self.mode = AppMode::CardDetail { card_id, checklist };
                }
            }
            KeyCode::Char('o') => {
                if let Some(link) = self.selected_card().and_then(|c| c.link.clone()) {
                    self.copy_link(&link);
                }
            }
            KeyCode::Char('b') => self.mode = AppMode::Dashboard,
            KeyCode::Char('a') => self.mode = AppMode::Calendar,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('g') => self.cycle_language(),
            KeyCode::Char('X') => {
                let filename = self.config.export_filename(self.model.today());
                self.mode = AppMode::ExportPath(InputState::with_text(filename));
            }
            KeyCode::Char('I') => self.mode = AppMode::ImportPath(InputState::new()),
            KeyCode::Char('r') => self.reload_from_storage(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.apply_search(),
            _ => {
                if edit_input(&mut self.search, key) {
                    self.search_edited_at = Some(Instant::now());
                }
                self.mode = AppMode::Search;
            }
        }
    }

    fn handle_column_form_key(&mut self, mut form: ColumnForm, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {}
            KeyCode::Enter => {
                if !self.run_intent(form.clone().into_intent()) {
                    self.mode = AppMode::ColumnForm(form);
                }
            }
            KeyCode::Tab | KeyCode::BackTab => {
                form.toggle_field();
                self.mode = AppMode::ColumnForm(form);
            }
            KeyCode::Up | KeyCode::Down if form.focus == ColumnField::Color => {
                form.cycle_color();
                self.mode = AppMode::ColumnForm(form);
            }
            _ => {
                edit_input(form.input_mut(), key);
                self.mode = AppMode::ColumnForm(form);
            }
        }
    }

    fn handle_card_form_key(&mut self, mut form: CardForm, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {}
            KeyCode::Enter => match form.clone().into_intent() {
                Ok(intent) => {
                    if !self.run_intent(intent) {
                        self.mode = AppMode::CardForm(form);
                    }
                }
                Err(detail) => {
                    let toast = self.controller.error_toast(&BoardError::Validation(detail));
                    self.show(toast);
                    self.mode = AppMode::CardForm(form);
                }
            },
            KeyCode::Tab | KeyCode::Down => {
                form.next_field();
                self.mode = AppMode::CardForm(form);
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.prev_field();
                self.mode = AppMode::CardForm(form);
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if form.focus.is_choice() => {
                form.cycle_choice(key.code != KeyCode::Left);
                self.mode = AppMode::CardForm(form);
            }
            _ => {
                if let Some(input) = form.input_mut() {
                    edit_input(input, key);
                }
                self.mode = AppMode::CardForm(form);
            }
        }
    }

    fn handle_detail_key(&mut self, card_id: CardId, mut checklist: SelectionState, key: KeyEvent) {
        let Some((column_id, card)) = self.model.card(card_id) else {
            return;
        };
        let items = card.checklist.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {}
            KeyCode::Down | KeyCode::Char('j') => {
                checklist.next(items);
                self.mode = AppMode::CardDetail { card_id, checklist };
            }
            KeyCode::Up | KeyCode::Char('k') => {
                checklist.prev(items);
                self.mode = AppMode::CardDetail { card_id, checklist };
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                let item_id = checklist.get().and_then(|i| card.checklist.get(i)).map(|i| i.id);
                if let Some(item_id) = item_id {
                    self.run_intent(Intent::ToggleChecklistItem {
                        column_id,
                        card_id,
                        item_id,
                    });
                }
                self.mode = AppMode::CardDetail { card_id, checklist };
            }
            KeyCode::Char('e') => {
                self.mode = AppMode::CardForm(CardForm::edit(column_id, card));
            }
            KeyCode::Char('o') => {
                if let Some(link) = card.link.clone() {
                    self.copy_link(&link);
                }
                self.mode = AppMode::CardDetail { card_id, checklist };
            }
            KeyCode::Char('d') => {
                self.run_intent(Intent::RemoveCard { column_id, card_id });
            }
            _ => self.mode = AppMode::CardDetail { card_id, checklist },
        }
    }

    fn handle_confirm_key(&mut self, request: ConfirmRequest, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let outcome = self.controller.confirm(&mut self.model, request.action);
                self.apply_outcome(outcome);
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {}
            _ => self.mode = AppMode::Confirm(request),
        }
    }

    fn handle_path_key(&mut self, mut input: InputState, key: KeyEvent, export: bool) {
        match key.code {
            KeyCode::Esc => {}
            KeyCode::Enter => {
                let path = PathBuf::from(input.as_str().trim());
                if export {
                    self.export_to(&path);
                } else {
                    self.import_from(&path);
                }
            }
            _ => {
                edit_input(&mut input, key);
                self.mode = if export {
                    AppMode::ExportPath(input)
                } else {
                    AppMode::ImportPath(input)
                };
            }
        }
    }

    fn handle_permission_key(&mut self, key: KeyEvent) {
        let permission = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                NotificationPermission::Granted
            }
            KeyCode::Char('n') | KeyCode::Char('N') => NotificationPermission::Denied,
            // Undecided: ask again next start
            KeyCode::Esc => return,
            _ => {
                self.mode = AppMode::PermissionPrompt;
                return;
            }
        };
        self.permission = permission;
        if let Err(e) = self.preferences.set_notification_permission(permission) {
            tracing::warn!("Failed to save notification permission: {}", e);
        }
    }

    fn open_card_form(&mut self) {
        let Some(card_id) = self.selected_card().map(|c| c.id) else {
            return;
        };
        if let Some((column_id, card)) = self.model.card(card_id) {
            self.mode = AppMode::CardForm(CardForm::edit(column_id, card));
        }
    }

    fn checklist_len(&self, card_id: CardId) -> usize {
        self.model.card(card_id).map_or(0, |(_, card)| card.checklist.len())
    }

    fn move_selected_card(&mut self, forward: bool) {
        let Some(card) = self.selected_card() else {
            return;
        };
        let (card_id, from) = (card.id, card.column_id);
        let target = if forward {
            self.view.columns.get(self.column_index + 1)
        } else {
            self.column_index
                .checked_sub(1)
                .and_then(|i| self.view.columns.get(i))
        };
        if let Some(to) = target.map(|c| c.id) {
            self.run_intent(Intent::MoveCard { card_id, from, to });
        }
    }

    fn shift_column(&mut self, forward: bool) {
        let Some(id) = self.selected_column().map(|c| c.id) else {
            return;
        };
        // Positions are 1-based
        let position = if forward {
            self.column_index + 2
        } else if self.column_index == 0 {
            return;
        } else {
            self.column_index
        };
        if position > self.view.columns.len() {
            return;
        }
        if self.run_intent(Intent::ReorderColumn { id, position }) {
            if let Some(index) = self.view.columns.iter().position(|c| c.id == id) {
                self.column_index = index;
            }
        }
    }

    fn copy_link(&mut self, link: &str) {
        match copy_to_clipboard(link) {
            Ok(()) => {
                let toast = Toast::success(self.label(Label::LinkCopied));
                self.show(toast);
            }
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                self.show(Toast::danger(e.to_string()));
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(e) = self.preferences.set_theme(self.theme) {
            tracing::warn!("Failed to save theme: {}", e);
        }
        let toast = self.controller.theme_changed(self.theme);
        self.show(toast);
    }

    pub fn cycle_language(&mut self) {
        let language = self.language().next();
        let toast = self.controller.set_language(language);
        self.scheduler.set_language(language);
        if let Err(e) = self.preferences.set_language(language) {
            tracing::warn!("Failed to save language: {}", e);
        }
        self.show(toast);
    }

    fn export_to(&mut self, path: &Path) {
        let result = self
            .controller
            .export(&self.model, self.model.today())
            .and_then(|file| AtomicWriter::write_atomic(path, file.payload.as_bytes()));
        match result {
            Ok(()) => {
                tracing::info!("Exported board to {}", path.display());
                let toast = Toast::success(self.label(Label::Exported));
                self.show(toast);
            }
            Err(e) => {
                tracing::error!("Export to {} failed: {}", path.display(), e);
                let toast = self.controller.error_toast(&e);
                self.show(toast);
            }
        }
    }

    fn import_from(&mut self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(payload) => {
                self.run_intent(Intent::Import { payload });
            }
            Err(e) => {
                tracing::warn!("Cannot read import file {}: {}", path.display(), e);
                let toast = self
                    .controller
                    .error_toast(&BoardError::InvalidImport(e.to_string()));
                self.show(toast);
            }
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let watcher = FileWatcher::new();
        let changes = match &self.board_file {
            Some(path) => {
                let rx = watcher.subscribe();
                match watcher.start_watching(path.clone()).await {
                    Ok(()) => Some(rx),
                    Err(e) => {
                        tracing::warn!("File watching disabled: {}", e);
                        None
                    }
                }
            }
            None => None,
        };

        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal, changes).await;
        restore_terminal(&mut terminal)?;
        watcher.stop_watching().await?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        changes: Option<tokio::sync::broadcast::Receiver<airdrop_persistence::ChangeEvent>>,
    ) -> anyhow::Result<()> {
        let mut events = EventHandler::new(
            Duration::from_millis(self.config.ui.tick_ms),
            Duration::from_secs(self.config.notifications.check_interval_secs.max(1)),
            changes,
        );

        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            match events.next().await {
                Some(Event::Key(key)) => self.handle_key(key),
                Some(Event::Tick) => self.on_tick(),
                Some(Event::ReminderCheck) => self.check_notifications(),
                Some(Event::StorageChanged) => self.reload_from_storage(),
                None => break,
            }
        }

        events.stop();
        Ok(())
    }
}

/// Applies an editing key to a text buffer; returns whether the text changed.
pub fn edit_input(input: &mut InputState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.insert_char(c);
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.move_left();
            false
        }
        KeyCode::Right => {
            input.move_right();
            false
        }
        KeyCode::Home => {
            input.move_home();
            false
        }
        KeyCode::End => {
            input.move_end();
            false
        }
        _ => false,
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
