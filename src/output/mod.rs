pub mod formatter;

pub use formatter::{
    format_csv_row, format_field_errors, format_result, format_result_colored, should_use_colors,
};
