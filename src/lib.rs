pub mod config;
pub mod grades;
pub mod output;
pub mod prompt;
pub mod recorder;
pub mod session;
pub mod stderr_buffer;
pub mod tui;
