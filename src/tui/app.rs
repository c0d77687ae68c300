use std::path::PathBuf;
use std::time::Instant;

use crate::grades::{Field, FormState, FormStatus};
use crate::session::{submit, SubmitError, Submission};
use crate::tui::theme::ThemeColors;

/// Seconds a flash message stays in the status bar
const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Editing,
    Help,
}

pub struct App {
    pub form: FormState,
    pub status: FormStatus,
    /// Index into `fields()`; 0 is the count field
    pub focus: usize,
    pub output_path: PathBuf,
    pub last_submission: Option<Submission>,
    pub saved_count: usize,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub verbose: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(output_path: PathBuf, theme: ThemeColors, verbose: bool) -> Self {
        let form = FormState::new();
        let status = form.evaluate();
        Self {
            form,
            status,
            focus: 0,
            output_path,
            last_submission: None,
            saved_count: 0,
            input_mode: InputMode::Editing,
            flash_message: None,
            should_quit: false,
            verbose,
            theme,
        }
    }

    /// Fields currently on screen, in tab order
    pub fn fields(&self) -> Vec<Field> {
        std::iter::once(Field::Count)
            .chain((0..self.form.active_scores()).map(Field::Score))
            .collect()
    }

    pub fn focused_field(&self) -> Field {
        self.fields()
            .get(self.focus)
            .copied()
            .unwrap_or(Field::Count)
    }

    pub fn next_field(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + 1) % len;
    }

    pub fn previous_field(&mut self) {
        let len = self.fields().len();
        self.focus = if self.focus == 0 { len - 1 } else { self.focus - 1 };
    }

    pub fn insert_char(&mut self, c: char) {
        let mut text = self.focused_text();
        text.push(c);
        self.set_focused_text(text);
    }

    pub fn delete_char(&mut self) {
        let mut text = self.focused_text();
        if text.pop().is_some() {
            self.set_focused_text(text);
        }
    }

    pub fn clear_field(&mut self) {
        self.set_focused_text(String::new());
    }

    fn focused_text(&self) -> String {
        self.form
            .text(self.focused_field())
            .unwrap_or_default()
            .to_string()
    }

    /// Replace the focused field's text and re-validate the whole form
    fn set_focused_text(&mut self, text: String) {
        self.form = match self.focused_field() {
            Field::Count => self.form.with_count(text),
            Field::Score(i) => self.form.with_score(i, text),
        };
        self.status = self.form.evaluate();

        // Score fields may have disappeared under the cursor
        let len = self.fields().len();
        if self.focus >= len {
            self.focus = len - 1;
        }
    }

    /// Whether every field is filled and valid
    pub fn can_submit(&self) -> bool {
        self.status.ready_scores().is_some()
    }

    /// Compute, save and show the result. Blocked until the form is ready.
    pub fn submit(&mut self) {
        if !self.can_submit() {
            self.show_flash("Fill in every score before saving".to_string());
            return;
        }

        match submit(&self.form, &self.output_path) {
            Ok(submission) => {
                self.saved_count += 1;
                if self.verbose {
                    crate::buffered_eprintln!(
                        "Saved row {} to {}",
                        crate::output::format_csv_row(&submission.record),
                        self.output_path.display()
                    );
                }
                self.show_flash(format!("Saved to {}", self.output_path.display()));
                self.last_submission = Some(submission);
            }
            Err(SubmitError::Io(e)) => {
                if self.verbose {
                    crate::buffered_eprintln!("Save failed: {:?}", e);
                }
                self.show_flash(format!("Failed to save grades: {}", e));
            }
            Err(e) => self.show_flash(e.to_string()),
        }
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grades::ValidationError;

    fn test_app(dir: &tempfile::TempDir) -> App {
        App::new(dir.path().join("grades.csv"), ThemeColors::dark(), false)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn test_count_creates_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        type_text(&mut app, "3");
        assert_eq!(app.fields().len(), 4);
        assert!(app.status.is_valid());
        assert!(!app.can_submit());
    }

    #[test]
    fn test_revalidates_on_every_keystroke() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        type_text(&mut app, "1");
        app.next_field();
        type_text(&mut app, "10");
        assert!(app.can_submit());
        type_text(&mut app, "1");
        assert_eq!(
            app.status.error_for(Field::Score(0)),
            Some(&ValidationError::OutOfRange { min: 0, max: 100 })
        );
        app.delete_char();
        assert!(app.can_submit());
    }

    #[test]
    fn test_focus_clamped_when_fields_removed() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        type_text(&mut app, "4");
        app.previous_field();
        assert_eq!(app.focused_field(), Field::Score(3));

        // Shrink the count from the count field; focus stays in range
        app.focus = 0;
        app.clear_field();
        assert_eq!(app.fields(), vec![Field::Count]);
        app.focus = 3;
        app.clear_field();
        assert_eq!(app.focus, 0);
    }

    #[test]
    fn test_submit_blocked_until_ready() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        type_text(&mut app, "2");
        app.submit();
        assert!(app.last_submission.is_none());
        assert!(!app.output_path.exists());
    }

    #[test]
    fn test_submit_saves_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        type_text(&mut app, "2");
        app.next_field();
        type_text(&mut app, "80");
        app.next_field();
        type_text(&mut app, "0");
        app.submit();

        let submission = app.last_submission.as_ref().unwrap();
        assert_eq!(submission.record.scores(), &[80, 0, 0, 0]);
        assert_eq!(app.saved_count, 1);
        let saved = std::fs::read_to_string(&app.output_path).unwrap();
        assert_eq!(saved, "80,0,0,0,80.0\r\n");
    }
}
