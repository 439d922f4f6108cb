use crate::config::Config;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use duenotes_core::{remaining_for, EditOutcome, EditSession, Field, Note, NoteStore, Remaining};
use tracing::{debug, info, warn};
use unicode_segmentation::UnicodeSegmentation;

/// Countdown shown for one note
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Countdown {
    Left(Remaining),
    InvalidDeadline,
}

impl Countdown {
    pub fn for_note(note: &Note, now: NaiveDateTime) -> Self {
        match remaining_for(note, now) {
            Ok(left) => Countdown::Left(left),
            Err(_) => Countdown::InvalidDeadline,
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, Countdown::Left(left) if left.is_overdue())
    }
}

/// Main application state
pub struct App {
    pub should_quit: bool,
    pub store: NoteStore,
    pub config: Config,
    /// Position in the note list, if any
    pub selected: Option<usize>,
    /// Clock used for countdowns; advanced on every tick
    pub now: NaiveDateTime,
    // Edit dialog
    pub editor: Option<EditSession>,
    // Delete confirmation
    pub confirming_delete: bool,
    pub pending_delete_id: Option<String>,
    // Blocking notification, dismissed by any key
    pub message: Option<String>,
}

impl App {
    /// Create a new App instance, loading the store named in `config`
    pub fn new(config: Config) -> Result<Self> {
        let store = NoteStore::open(&config.store_path)
            .with_context(|| format!("Failed to open notes at {}", config.store_path.display()))?;
        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: NoteStore, config: Config) -> Self {
        Self {
            should_quit: false,
            store,
            config,
            selected: None,
            now: Local::now().naive_local(),
            editor: None,
            confirming_delete: false,
            pending_delete_id: None,
            message: None,
        }
    }

    /// Handle tick events
    pub fn tick(&mut self) {
        self.now = Local::now().naive_local();
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn notes(&self) -> &[Note] {
        self.store.list()
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.selected.and_then(|i| self.store.get(i))
    }

    pub fn countdown(&self, note: &Note) -> Countdown {
        Countdown::for_note(note, self.now)
    }

    // =========================
    // Selection
    // =========================

    pub fn select_up(&mut self) {
        if self.store.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i > 0 => i - 1,
            Some(i) => i,
            None => self.store.len() - 1,
        });
    }

    pub fn select_down(&mut self) {
        if self.store.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.store.len() - 1;
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(last),
            None => 0,
        });
    }

    fn clamp_selection(&mut self) {
        self.selected = match (self.selected, self.store.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => None,
        };
    }

    fn select_id(&mut self, id: &str) {
        if let Some(index) = self.store.position_of(id) {
            self.selected = Some(index);
        }
    }

    // =========================
    // Edit dialog
    // =========================

    /// Open the editor for a new note
    pub fn start_adding(&mut self) {
        self.editor = Some(EditSession::create(self.now));
    }

    /// Open the editor for the selected note
    pub fn start_editing(&mut self) {
        if let Some(note) = self.selected_note() {
            self.editor = Some(EditSession::edit(note));
        }
    }

    pub fn editor_next_field(&mut self) {
        if let Some(session) = &mut self.editor {
            session.focus = session.focus.next();
        }
    }

    pub fn editor_prev_field(&mut self) {
        if let Some(session) = &mut self.editor {
            session.focus = session.focus.prev();
        }
    }

    pub fn editor_insert(&mut self, ch: char) {
        if let Some(session) = &mut self.editor {
            if ch == '\n' && session.focus != Field::Content {
                return;
            }
            session.fields.get_mut(session.focus).push(ch);
        }
    }

    pub fn editor_backspace(&mut self) {
        if let Some(session) = &mut self.editor {
            let text = session.fields.get_mut(session.focus);
            if let Some((idx, _)) = text.grapheme_indices(true).next_back() {
                text.truncate(idx);
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.finish_edit(EditOutcome::Cancelled);
    }

    /// Accept the editor contents. On invalid input the editor stays open.
    pub fn commit_edit(&mut self) {
        if let Some(outcome) = self.editor.as_ref().map(EditSession::accept) {
            self.finish_edit(outcome);
        }
    }

    fn finish_edit(&mut self, outcome: EditOutcome) {
        let Some(session) = self.editor.take() else {
            return;
        };

        let note = match session.resolve(outcome) {
            Ok(Some(note)) => note,
            Ok(None) => {
                debug!(id = ?session.target_id(), "edit cancelled");
                return;
            }
            Err(err) => {
                self.editor = Some(session);
                self.report(err.into());
                return;
            }
        };

        if let Err(err) = self.persist_edit(&session, note) {
            self.report(err);
        }
    }

    fn persist_edit(&mut self, session: &EditSession, note: Note) -> Result<()> {
        let id = note.id.clone();
        match session.target_id() {
            None => {
                self.store.add(note)?;
                info!(id = %id, "note added");
            }
            Some(target) => {
                let Some(index) = self.store.position_of(target) else {
                    anyhow::bail!("The note being edited no longer exists");
                };
                self.store.update_at(index, note)?;
                info!(id = %id, index, "note updated");
            }
        }
        self.select_id(&id);
        Ok(())
    }

    // =========================
    // Delete confirmation
    // =========================

    pub fn initiate_delete(&mut self) {
        if let Some(note) = self.selected_note() {
            self.pending_delete_id = Some(note.id.clone());
            self.confirming_delete = true;
        }
    }

    /// Title of the note awaiting confirmation
    pub fn pending_delete_title(&self) -> Option<&str> {
        let id = self.pending_delete_id.as_deref()?;
        let index = self.store.position_of(id)?;
        self.store.get(index).map(|n| n.title.as_str())
    }

    pub fn confirm_delete(&mut self) {
        self.confirming_delete = false;
        let Some(id) = self.pending_delete_id.take() else {
            return;
        };

        let result = match self.store.position_of(&id) {
            Some(index) => self.store.delete_at(index).map_err(anyhow::Error::from),
            None => Err(anyhow::anyhow!("The selected note no longer exists")),
        };

        match result {
            Ok(removed) => info!(id = %removed.id, "note deleted"),
            Err(err) => self.report(err),
        }
        self.clamp_selection();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete_id = None;
        self.confirming_delete = false;
    }

    // =========================
    // Notifications
    // =========================

    pub fn report(&mut self, err: anyhow::Error) {
        let text = format!("{:#}", err);
        warn!(error = %text, "operation failed");
        self.message = Some(text);
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duenotes_core::session::from_fields;
    use tempfile::tempdir;

    fn setup_app() -> (tempfile::TempDir, App) {
        let dir = tempdir().unwrap();
        let config = Config {
            store_path: dir.path().join("notes.json"),
            ..Config::default()
        };
        let mut app = App::new(config).unwrap();
        app.now = NaiveDateTime::parse_from_str("2024-05-01 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        (dir, app)
    }

    fn add(app: &mut App, title: &str, deadline: &str) {
        let note = from_fields(title.to_string(), String::new(), deadline).unwrap();
        app.store.add(note).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.editor_insert(ch);
        }
    }

    #[test]
    fn test_app_creation() {
        let (_dir, app) = setup_app();
        assert!(!app.should_quit);
        assert!(app.notes().is_empty());
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_add_through_editor() {
        let (dir, mut app) = setup_app();
        app.start_adding();
        type_text(&mut app, "Report");
        app.editor_next_field();
        type_text(&mut app, "line one\nline two");
        app.editor_next_field();
        let deadline = app.editor.as_mut().unwrap().fields.get_mut(Field::Deadline);
        deadline.clear();
        deadline.push_str("2024-05-02 10:00:00");
        app.commit_edit();

        assert!(app.editor.is_none());
        assert!(app.message.is_none());
        assert_eq!(app.notes().len(), 1);
        assert_eq!(app.notes()[0].content, "line one\nline two");
        assert_eq!(app.selected, Some(0));

        let reloaded = NoteStore::open(dir.path().join("notes.json")).unwrap();
        assert_eq!(reloaded.list(), app.notes());
    }

    #[test]
    fn test_new_note_defaults_to_now() {
        let (_dir, mut app) = setup_app();
        app.start_adding();
        app.commit_edit();
        assert_eq!(app.notes()[0].deadline, "2024-05-01 10:00:00");
        assert_eq!(app.countdown(&app.notes()[0]), Countdown::Left(Remaining::from_seconds(0)));
    }

    #[test]
    fn test_newline_only_in_content() {
        let (_dir, mut app) = setup_app();
        app.start_adding();
        app.editor_insert('\n');
        assert_eq!(app.editor.as_ref().unwrap().fields.title, "");
    }

    #[test]
    fn test_invalid_deadline_keeps_editor_open() {
        let (_dir, mut app) = setup_app();
        app.start_adding();
        app.editor_prev_field();
        for _ in 0..3 {
            app.editor_backspace();
        }
        app.commit_edit();

        assert!(app.editor.is_some());
        assert!(app.message.is_some());
        assert!(app.notes().is_empty());
    }

    #[test]
    fn test_backspace_removes_grapheme() {
        let (_dir, mut app) = setup_app();
        app.start_adding();
        type_text(&mut app, "ae\u{301}");
        app.editor_backspace();
        assert_eq!(app.editor.as_ref().unwrap().fields.title, "a");
    }

    #[test]
    fn test_cancel_edit() {
        let (_dir, mut app) = setup_app();
        app.start_adding();
        type_text(&mut app, "draft");
        app.cancel_edit();
        assert!(app.editor.is_none());
        assert!(app.notes().is_empty());
    }

    #[test]
    fn test_cancel_edit_ignores_invalid_fields() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "A", "2099-01-01 00:00:00");
        app.selected = Some(0);

        app.start_editing();
        if let Some(session) = &mut app.editor {
            session.fields.deadline = "not a date".to_string();
        }
        app.cancel_edit();

        assert!(app.editor.is_none());
        assert!(app.message.is_none());
        assert_eq!(app.notes()[0].deadline, "2099-01-01 00:00:00");
    }

    #[test]
    fn test_edit_selected() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "A", "2099-01-01 00:00:00");
        add(&mut app, "B", "2099-01-01 00:00:00");
        app.selected = Some(1);

        app.start_editing();
        type_text(&mut app, "!");
        app.commit_edit();

        assert_eq!(app.notes()[0].title, "A");
        assert_eq!(app.notes()[1].title, "B!");
        assert_eq!(app.selected, Some(1));
    }

    #[test]
    fn test_edit_without_selection_is_noop() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "A", "2099-01-01 00:00:00");
        app.start_editing();
        assert!(app.editor.is_none());
    }

    #[test]
    fn test_edit_of_deleted_note_reports() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "A", "2099-01-01 00:00:00");
        app.selected = Some(0);
        app.start_editing();
        app.store.delete_at(0).unwrap();

        app.commit_edit();
        assert!(app.message.is_some());
        assert!(app.notes().is_empty());
    }

    #[test]
    fn test_delete_flow() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "A", "2099-01-01 00:00:00");
        add(&mut app, "B", "2099-01-01 00:00:00");
        app.selected = Some(1);

        app.initiate_delete();
        assert!(app.confirming_delete);
        assert_eq!(app.pending_delete_title(), Some("B"));

        app.confirm_delete();
        assert!(!app.confirming_delete);
        assert_eq!(app.notes().len(), 1);
        assert_eq!(app.notes()[0].title, "A");
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn test_delete_last_clears_selection() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "A", "2099-01-01 00:00:00");
        app.selected = Some(0);
        app.initiate_delete();
        app.confirm_delete();
        assert!(app.notes().is_empty());
        assert_eq!(app.selected, None);
    }

    #[test]
    fn test_cancel_delete() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "A", "2099-01-01 00:00:00");
        app.selected = Some(0);
        app.initiate_delete();
        app.cancel_delete();
        assert!(!app.confirming_delete);
        assert_eq!(app.notes().len(), 1);
    }

    #[test]
    fn test_stale_delete_reports() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "A", "2099-01-01 00:00:00");
        app.selected = Some(0);
        app.initiate_delete();
        app.store.delete_at(0).unwrap();

        app.confirm_delete();
        assert!(app.message.is_some());
        app.dismiss_message();
        assert!(app.message.is_none());
    }

    #[test]
    fn test_selection_moves_within_bounds() {
        let (_dir, mut app) = setup_app();
        app.select_down();
        assert_eq!(app.selected, None);

        add(&mut app, "A", "2099-01-01 00:00:00");
        add(&mut app, "B", "2099-01-01 00:00:00");
        app.select_down();
        assert_eq!(app.selected, Some(0));
        app.select_down();
        app.select_down();
        assert_eq!(app.selected, Some(1));
        app.select_up();
        app.select_up();
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn test_countdowns() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "future", "2024-05-01 11:01:01");
        add(&mut app, "past", "2024-05-01 09:59:00");
        let mut broken = from_fields("broken".to_string(), String::new(), "2099-01-01 00:00:00").unwrap();
        broken.deadline = "someday".to_string();
        app.store.add(broken).unwrap();

        let countdowns: Vec<Countdown> = app.notes().iter().map(|n| app.countdown(n)).collect();
        assert_eq!(countdowns[0], Countdown::Left(Remaining::from_seconds(3661)));
        assert!(countdowns[1].is_overdue());
        assert_eq!(countdowns[2], Countdown::InvalidDeadline);
    }
}
