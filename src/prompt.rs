use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::grades::{validate_count, validate_score, Field, FormState};

/// Prompt with a message and return the line without its line ending.
/// Returns None at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(out, "{}", message).context("Failed to write prompt")?;
    out.flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Ask for the student count, then one score per student.
///
/// Each answer goes through the same validators as every other front end; a
/// rejected answer prints its message and the same question is asked again.
/// A score must be given before moving on. The returned form is complete.
pub fn collect_form<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<FormState> {
    let count_label = format!("{} (1-4): ", Field::Count);
    let (form, count) = loop {
        let Some(text) = prompt(input, out, &count_label)? else {
            anyhow::bail!("Input ended before the student count was entered");
        };
        match validate_count(&text) {
            Ok(count) => break (FormState::new().with_count(text), count),
            Err(e) => writeln!(out, "  {}", e)?,
        }
    };

    let mut form = form;
    for i in 0..count.get() {
        let field = Field::Score(i);
        let label = format!("{}: ", field);
        loop {
            let Some(text) = prompt(input, out, &label)? else {
                anyhow::bail!("Input ended before {} was entered", field);
            };
            match validate_score(&text) {
                Ok(Some(_)) => {
                    form = form.with_score(i, text);
                    break;
                }
                Ok(None) => writeln!(out, "  A score is required.")?,
                Err(e) => writeln!(out, "  {}", e)?,
            }
        }
    }

    Ok(form)
}
