use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::grades::ResultRecord;
use crate::output::format_csv_row;

/// Default CSV file, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "grades.csv";

/// Row terminator (RFC 4180)
const ROW_TERMINATOR: &str = "\r\n";

/// Get the default output path (./grades.csv)
pub fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

/// Append one record as a CSV row.
///
/// Creates the file if it doesn't exist and never touches existing rows. The
/// row goes out in a single unbuffered `write_all`, so nothing is left to be
/// written later once an error has been returned. The handle is dropped on
/// every path. Any I/O error is returned unmodified and nothing is retried.
pub fn save_grades_to_csv(record: &ResultRecord, destination: &Path) -> io::Result<()> {
    let row = format!("{}{}", format_csv_row(record), ROW_TERMINATOR);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(destination)?;
    file.write_all(row.as_bytes())
}
