use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use gradebook::session::{SubmitError, Submission};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_VALIDATION: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive grading form (default if no subcommand)
    Form,
    /// Enter the student count and scores line by line
    Prompt,
    /// Grade without prompting: COUNT followed by one score per student
    Record {
        /// Number of students (1-4)
        #[arg(allow_negative_numbers = true)]
        count: String,

        /// One score (0-100) per student
        #[arg(allow_negative_numbers = true)]
        scores: Vec<String>,

        /// Print the saved record as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Write a config file with the current settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "gradebook")]
#[command(about = "Average student scores and append them to a CSV log", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/gradebook/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// CSV file to append records to (overrides config; default ./grades.csv)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Form);

    let code = match command {
        Commands::Init { force } => run_init(cli.config, cli.output, force, cli.verbose),
        Commands::Form => {
            let (config, output_path) = load_settings(cli.config, cli.output, cli.verbose);
            if !std::io::stdout().is_terminal() {
                eprintln!(
                    "The grading form needs a terminal. \
                     Use `gradebook prompt` or `gradebook record` instead."
                );
                std::process::exit(EXIT_CONFIG);
            }
            let theme = gradebook::tui::resolve_theme(config.theme);
            let app = gradebook::tui::App::new(output_path, theme, cli.verbose);
            match gradebook::tui::run_tui(app).await {
                Ok(()) => EXIT_SUCCESS,
                Err(e) => {
                    eprintln!("Terminal error: {:#}", e);
                    EXIT_IO
                }
            }
        }
        Commands::Prompt => {
            let (_, output_path) = load_settings(cli.config, cli.output, cli.verbose);
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();
            match gradebook::prompt::collect_form(&mut input, &mut out) {
                Ok(form) => {
                    let result = gradebook::session::submit(&form, &output_path);
                    report(result, &output_path, false)
                }
                Err(e) => {
                    eprintln!("{:#}", e);
                    EXIT_VALIDATION
                }
            }
        }
        Commands::Record {
            count,
            scores,
            json,
        } => {
            let (_, output_path) = load_settings(cli.config, cli.output, cli.verbose);
            // Extra scores would be silently dropped by the form; reject them here
            if let Ok(n) = gradebook::grades::validate_count(&count) {
                if scores.len() > n.get() {
                    eprintln!(
                        "Expected at most {} scores for {} students, got {}.",
                        n.get(),
                        n,
                        scores.len()
                    );
                    std::process::exit(EXIT_VALIDATION);
                }
            }
            let result = gradebook::session::submit_raw(&count, &scores, &output_path);
            report(result, &output_path, json)
        }
    };

    std::process::exit(code);
}

/// Load and validate config, then pick the CSV destination.
/// Exits with EXIT_CONFIG on any config problem.
fn load_settings(
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    verbose: bool,
) -> (gradebook::config::Config, PathBuf) {
    let config = match gradebook::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = gradebook::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let output_path = gradebook::config::resolve_output_path(output, &config);
    if verbose {
        eprintln!("Appending records to {}", output_path.display());
    }

    (config, output_path)
}

/// Print the outcome of a submit and return the exit code
fn report(result: Result<Submission, SubmitError>, output_path: &Path, json: bool) -> i32 {
    let use_colors = gradebook::output::should_use_colors();
    match result {
        Ok(submission) => {
            if json {
                match serde_json::to_string(&submission.record) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Failed to serialize record: {}", e);
                        return EXIT_IO;
                    }
                }
            } else {
                println!(
                    "{}",
                    gradebook::output::format_result_colored(&submission.record, use_colors)
                );
            }
            EXIT_SUCCESS
        }
        Err(SubmitError::Invalid(errors)) => {
            eprintln!("{}", gradebook::output::format_field_errors(&errors, false));
            EXIT_VALIDATION
        }
        Err(e @ SubmitError::Incomplete { .. }) => {
            eprintln!("{}", e);
            EXIT_VALIDATION
        }
        Err(SubmitError::Io(e)) => {
            eprintln!("Failed to save grades to {}: {}", output_path.display(), e);
            EXIT_IO
        }
    }
}

fn run_init(
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    force: bool,
    verbose: bool,
) -> i32 {
    let path = match config_path.map_or_else(gradebook::config::get_config_path, Ok) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    let config = gradebook::config::Config {
        output,
        ..Default::default()
    };

    if let Err(errors) = gradebook::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return EXIT_CONFIG;
    }

    match gradebook::config::write_default_config(&path, &config, force) {
        Ok(()) => {
            println!("Config written to {}", path.display());
            if verbose {
                let output_path = gradebook::config::resolve_output_path(None, &config);
                eprintln!("Records will be appended to {}", output_path.display());
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            EXIT_CONFIG
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_form() {
        let cli = Cli::try_parse_from(["gradebook"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_record_args() {
        let cli = Cli::try_parse_from([
            "gradebook", "-o", "out.csv", "record", "2", "80", "90", "--json",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
        match cli.command {
            Some(Commands::Record { count, scores, json }) => {
                assert_eq!(count, "2");
                assert_eq!(scores, vec!["80", "90"]);
                assert!(json);
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_record_flags_around_scores() {
        let cli = Cli::try_parse_from(["gradebook", "record", "2", "-v", "80", "90", "--json"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Record { scores, json, .. }) => {
                assert_eq!(scores, vec!["80", "90"]);
                assert!(json);
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_record_negative_count() {
        let cli = Cli::try_parse_from(["gradebook", "record", "-1"]).unwrap();
        match cli.command {
            Some(Commands::Record { count, scores, .. }) => {
                assert_eq!(count, "-1");
                assert!(scores.is_empty());
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_record_accepts_negative_looking_values() {
        let cli = Cli::try_parse_from(["gradebook", "record", "1", "-5"]).unwrap();
        match cli.command {
            Some(Commands::Record { scores, .. }) => assert_eq!(scores, vec!["-5"]),
            other => panic!("expected record, got {:?}", other),
        }
    }
}
