//! Scene editor console
//!
//! Reads editor commands line by line from stdin or a script file and
//! applies them to one scene. Type `help` for the command list.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use scene_engine::foundation::logging;
use scene_engine::prelude::*;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG: &str = "scene_editor.toml";

#[derive(Parser, Debug)]
#[command(name = "scene_editor", about = "Edit a scene graph from the command line")]
struct Args {
    /// Configuration file (.toml or .ron)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Keep going after a line fails to parse
    #[arg(long)]
    keep_going: bool,
}

#[derive(Error, Debug)]
enum EditorError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] log::SetLoggerError),

    #[error("Line {line}: {source}")]
    Command {
        line: usize,
        #[source]
        source: CommandError,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("scene_editor: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), EditorError> {
    let config = load_config(args.config.as_deref())?;
    logging::init_with_level(&config.logging.log_level)?;
    log::info!("Starting scene editor");

    let mut editor = Editor::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.script {
        Some(path) => {
            log::info!("Running script {}", path.display());
            let reader = BufReader::new(File::open(path)?);
            run_session(&mut editor, reader, &mut out, false, args.keep_going)
        }
        None => {
            let stdin = io::stdin();
            run_session(&mut editor, stdin.lock(), &mut out, true, true)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig, EditorError> {
    let config = match path {
        Some(path) => EditorConfig::load_from_file(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => EditorConfig::load_from_file(DEFAULT_CONFIG)?,
        None => EditorConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Feed every line of `input` to the editor until EOF or `quit`
fn run_session<R: BufRead, W: Write>(
    editor: &mut Editor,
    input: R,
    out: &mut W,
    interactive: bool,
    keep_going: bool,
) -> Result<(), EditorError> {
    if interactive {
        writeln!(out, "Scene editor ready; type 'help' for commands")?;
        prompt(out)?;
    }

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        match EditorCommand::parse_line(&line) {
            Ok(Some(command)) => {
                if editor.execute(&command, out)? == EditorOutcome::Quit {
                    log::info!("Quit requested");
                    return Ok(());
                }
            }
            Ok(None) => {}
            Err(source) if keep_going => {
                log::warn!("Line {}: {source}", index + 1);
                writeln!(out, "{source}")?;
            }
            Err(source) => return Err(EditorError::Command { line: index + 1, source }),
        }

        if interactive {
            prompt(out)?;
        }
    }

    log::info!("End of input");
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(script: &str, keep_going: bool) -> (Result<(), EditorError>, String) {
        let mut editor = Editor::default();
        let mut out = Vec::new();
        let result = run_session(&mut editor, script.as_bytes(), &mut out, false, keep_going);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_script_stops_at_quit() {
        let (result, output) = session("# demo\nadd cone\nprint\nquit\nprint\n", false);
        assert!(result.is_ok());
        assert_eq!(output, "Current Scene Graph\nRoot\n\tCone\n");
    }

    #[test]
    fn test_script_fails_on_bad_line() {
        let (result, _) = session("add cone\nadd cube\n", false);
        match result {
            Err(EditorError::Command { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(source, CommandError::UnknownPrimitive("cube".to_string()));
            }
            other => panic!("expected a command error, got {other:?}"),
        }
    }

    #[test]
    fn test_keep_going_reports_and_continues() {
        let (result, output) = session("fly\nadd torus\nprint\n", true);
        assert!(result.is_ok());
        assert!(output.starts_with("Unknown command 'fly'"));
        assert!(output.ends_with("Root\n\tTorus\n"));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["scene_editor", "--script", "demo.txt", "-c", "editor.ron"]).unwrap();
        assert_eq!(args.script, Some(PathBuf::from("demo.txt")));
        assert_eq!(args.config, Some(PathBuf::from("editor.ron")));
        assert!(!args.keep_going);
    }
}
