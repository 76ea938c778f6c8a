use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use classified::audit::{AuditLogger, DEFAULT_LOG_ENTRIES};
use classified::cli::{logging, open_session, run_interactive, run_once, TerminalPrompter};
use classified::command::{provision_new, Command, Interpreter, HELP};
use classified::config::{paths::ClassifiedPaths, settings::Settings};
use classified::crypto::SecureString;
use classified::storage::Carrier;

#[derive(Parser)]
#[command(
    name = "classified",
    author = "Kaylee Beyene",
    version,
    about = "Password protected, row editable text document",
    long_about = "classified keeps a text document encrypted inside a carrier file. \
                  Run it without a command for the interactive editor, or pass a \
                  command such as 'show row email' to run it once and exit. \
                  Run 'classified help' for the list of commands."
)]
struct Cli {
    /// Document to open (defaults to the configured document)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// PBKDF2 iterations for a newly created document
    #[arg(long, value_name = "N")]
    iterations: Option<u32>,

    /// Keep the screen and print diagnostics
    #[arg(long)]
    debug: bool,

    /// Document password; prompted for when absent
    #[arg(long, env = "CLASSIFIED_PASSWORD", hide = true, hide_env_values = true)]
    password: Option<String>,

    /// Command to run once: COMMAND [TARGET [DATA...]]
    #[arg(
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut words = cli.command;
    let debug_word = words.first().map(String::as_str) == Some("debug");
    if debug_word {
        words.remove(0);
    }
    let debug = cli.debug || debug_word;
    logging::init(debug);

    let paths = ClassifiedPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let clear = settings.clear_screen && !debug;
    let mut prompter = TerminalPrompter::new();

    let command = if words.is_empty() {
        None
    } else {
        Some(Command::parse(&words.join(" ")))
    };

    // Commands that do not need a password
    match &command {
        Some(Command::Help) => {
            println!("{}", HELP);
            return Ok(());
        }
        Some(Command::New { path }) => {
            let default_dir = std::env::current_dir()?;
            println!("{}", provision_new(path.clone(), &default_dir, &mut prompter));
            return Ok(());
        }
        Some(Command::Log { count }) => {
            let logger = AuditLogger::new(paths.audit_log());
            println!("{}", logger.format_recent(count.unwrap_or(DEFAULT_LOG_ENTRIES))?);
            return Ok(());
        }
        _ => {}
    }

    let path = match cli.file {
        Some(file) => {
            if !file.exists() {
                bail!(
                    "{} does not exist, create it with 'classified new {}'",
                    file.display(),
                    file.display()
                );
            }
            file
        }
        None => {
            let path = settings.document_path(&paths);
            if !path.exists() {
                paths.ensure_directories()?;
                Carrier::provision(&path)?;
                println!("Created new document at {}", path.display());
            }
            path
        }
    };

    let audit = if settings.audit_enabled {
        paths.ensure_directories()?;
        Some(AuditLogger::new(paths.audit_log()))
    } else {
        None
    };

    let iterations = cli.iterations.unwrap_or(settings.default_iterations);
    let password = cli.password.map(SecureString::new);
    let mut session = open_session(&path, password, iterations, &mut prompter, audit.as_ref())?;

    let mut interpreter = Interpreter::new(settings.save_attempts);
    if let Some(logger) = audit {
        interpreter = interpreter.with_audit(logger);
    }

    match command {
        Some(command) => {
            if !run_once(&mut session, &interpreter, &mut prompter, command, clear)? {
                bail!("could not handle command");
            }
        }
        None => {
            run_interactive(&mut session, &interpreter, &mut prompter, clear)?;
        }
    }

    Ok(())
}
