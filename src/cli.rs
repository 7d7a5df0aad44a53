//! Command-line interface implementation for the Sheetbase project generator.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};

use crate::constants::DEFAULT_ORG;

/// Command-line arguments structure.
#[derive(Parser, Debug)]
#[command(author, version, about = "Sheetbase: create a new project from a template", long_about = None)]
pub struct Args {
    /// Template name (e.g. `angular`), git repository URL or local directory
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Name of the project directory to create
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Attach a git remote. Without a value the URL is asked interactively
    #[arg(short, long, value_name = "URL", num_args = 0..=1, default_missing_value = "")]
    pub remote: Option<String>,

    /// GitHub organisation used to expand short template names
    #[arg(long, default_value = DEFAULT_ORG)]
    pub org: String,

    /// Never prompt or open the browser
    #[arg(long)]
    pub non_interactive: bool,

    /// Do not run the package installer
    #[arg(long)]
    pub skip_install: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
