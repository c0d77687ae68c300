use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::grades::{Average, Field};
use crate::tui::app::{App, InputMode};

/// Width of the label column, fits "Number of Students (1-4):"
const LABEL_WIDTH: u16 = 27;
/// Width of each input box
const INPUT_WIDTH: u16 = 8;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let fields = app.fields();
    // Each field takes an input row and an error row
    let form_height = fields.len() as u16 * 2;

    // Layout: Title(1) + Form(2 per field) + Save hint(1) + Result(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(form_height),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_form(frame, chunks[1], app, &fields);
    render_save_hint(frame, chunks[2], app);
    render_result(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled("Student Grading", app.theme.title_style)];

    if app.saved_count > 0 {
        let saved_text = format!("{} saved", app.saved_count);
        let left_len = "Student Grading".len();
        let padding_len = (area.width as usize).saturating_sub(left_len + saved_text.len());
        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.push(Span::styled(saved_text, Style::default().fg(app.theme.muted)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn field_label(field: Field) -> String {
    match field {
        Field::Count => format!("{} (1-4):", field),
        Field::Score(_) => format!("{}:", field),
    }
}

fn render_form(frame: &mut Frame, area: Rect, app: &App, fields: &[Field]) {
    let rows = Layout::vertical(fields.iter().map(|_| Constraint::Length(2))).split(area);
    let focused = app.focused_field();

    for (field, row) in fields.iter().zip(rows.iter()) {
        let [input_row, error_row] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(*row);
        let [label_area, input_area] = Layout::horizontal([
            Constraint::Length(LABEL_WIDTH),
            Constraint::Length(INPUT_WIDTH),
        ])
        .areas(input_row);

        let label = Paragraph::new(field_label(*field)).style(Style::default().fg(app.theme.label));
        frame.render_widget(label, label_area);

        let text = app.form.text(*field).unwrap_or_default();
        let style = if *field == focused {
            app.theme.input_focused
        } else {
            app.theme.input
        };
        frame.render_widget(Paragraph::new(text).style(style), input_area);

        if *field == focused && app.input_mode == InputMode::Editing {
            let offset = (text.chars().count() as u16).min(INPUT_WIDTH.saturating_sub(1));
            frame.set_cursor_position((input_area.x + offset, input_area.y));
        }

        if let Some(error) = app.status.error_for(*field) {
            let msg = Paragraph::new(error.to_string()).style(Style::default().fg(app.theme.error));
            frame.render_widget(msg, error_row);
        }
    }
}

fn render_save_hint(frame: &mut Frame, area: Rect, app: &App) {
    // Saving is only offered once every field is valid and filled
    if !app.can_submit() {
        return;
    }
    let hint = Line::from(vec![
        Span::styled("Enter", Style::default().fg(app.theme.status_key_color).bold()),
        Span::raw(": Save Grades to CSV"),
    ]);
    frame.render_widget(Paragraph::new(hint), area);
}

fn render_result(frame: &mut Frame, area: Rect, app: &App) {
    let Some(submission) = &app.last_submission else {
        return;
    };

    let block = Block::bordered()
        .title(" Result ")
        .border_style(Style::default().fg(app.theme.result_border));

    let mut lines: Vec<Line> = submission
        .display
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();

    // Restyle the trailing "Average: <value>" line
    if let Some(last) = lines.last_mut() {
        let average = submission.record.average();
        let style = match average {
            Average::None => Style::default().fg(app.theme.muted),
            Average::Mean(_) => app.theme.average,
        };
        *last = Line::from(vec![
            Span::raw("Average: "),
            Span::styled(average.to_string(), style),
        ]);
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Invalid") {
            app.theme.flash_error
        } else if msg.starts_with("Saved") {
            app.theme.flash_success
        } else {
            app.theme.muted
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints = [
            ("Tab", ":next "),
            ("S-Tab", ":prev "),
            ("Enter", ":save "),
            ("?", ":help "),
            ("Esc", ":quit"),
        ];

        let mut spans = vec![
            Span::styled(
                app.output_path.display().to_string(),
                Style::default().fg(app.theme.muted),
            ),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(app.theme.status_key_color),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(app.theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(48, 11, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(app.theme.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let entries = [
        ("Tab / Down    ", "Next field"),
        ("S-Tab / Up    ", "Previous field"),
        ("Backspace     ", "Delete last character"),
        ("Ctrl-u        ", "Clear field"),
        ("Enter         ", "Save grades (when complete)"),
        ("?             ", "Show/hide this help"),
        ("Esc / Ctrl-c  ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(*key, app.theme.popup_key),
                Span::raw(*desc),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
