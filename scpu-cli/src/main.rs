//! scpu: assemble, check and run SCPU programs

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use scpu_assembler::{assemble_file, check, Listing};
use scpu_runtime::{
    CancelToken, RunOutcome, RuntimeError, TraceRenderer, VMConfig, DEFAULT_MAX_STEPS, VM,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scpu", version, about = "Minimal 8-bit register CPU emulator")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble and run a program
    Run(RunArgs),
    /// Report every line that would fault when fetched
    Check {
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    file: PathBuf,

    /// Print machine state after every step
    #[arg(short, long)]
    trace: bool,

    /// Stop after this many steps
    #[arg(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: u64,

    /// Pause between steps, in milliseconds
    #[arg(short, long, default_value_t = 0)]
    delay_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run(args) => run(args),
        Command::Check { file } => check_file(&file),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load(path: &Path) -> anyhow::Result<Listing> {
    assemble_file(path).with_context(|| format!("failed to assemble {}", path.display()))
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let listing = load(&args.file)?;
    let config = VMConfig::default()
        .with_max_steps(args.max_steps)
        .with_trace(args.trace)
        .with_step_delay(Duration::from_millis(args.delay_ms));

    let mut vm = VM::with_program(listing.program.clone(), config);
    tracing::info!(file = %args.file.display(), config = ?vm.config(), "running");

    // Ctrl-C stops the run between steps instead of killing the process
    let cancel = CancelToken::new();
    let handler = cancel.clone();
    ctrlc::set_handler(move || handler.cancel()).context("failed to install Ctrl-C handler")?;

    let mut renderer = TraceRenderer::new(io::stdout().lock());
    let result = vm.run_with(&mut renderer, &cancel);
    let written = renderer.finish().map(drop);

    let outcome = finish_run(result, written, &listing, &args.file)?;
    tracing::info!(steps = outcome.steps, reason = %outcome.halt_reason, "done");
    Ok(())
}

/// Combine the run result with the output flush. A fault outranks a write
/// failure.
fn finish_run(
    result: Result<RunOutcome, RuntimeError>,
    written: io::Result<()>,
    listing: &Listing,
    file: &Path,
) -> anyhow::Result<RunOutcome> {
    match result {
        Ok(outcome) => {
            written.context("failed to write output")?;
            Ok(outcome)
        }
        Err(err) => {
            if let Err(io_err) = written {
                tracing::warn!(%io_err, "output lost");
            }
            let location = match listing.source_line(err.pc()) {
                Some(line) => format!("{}:{}", file.display(), line),
                None => file.display().to_string(),
            };
            Err(err).with_context(|| format!("program faulted at {}", location))
        }
    }
}

fn check_file(path: &Path) -> anyhow::Result<()> {
    let listing = load(path)?;
    let diagnostics = check(&listing);

    for diagnostic in &diagnostics {
        eprintln!("{}: {}", path.display(), diagnostic);
    }

    if !diagnostics.is_empty() {
        bail!("{} problem(s) found in {}", diagnostics.len(), path.display());
    }

    println!(
        "{}: {} instruction(s), {} label(s), ok",
        path.display(),
        listing.program.len(),
        listing.program.labels().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::parse_from(["scpu", "run", "prog.scpu"]);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.file, PathBuf::from("prog.scpu"));
                assert!(!args.trace);
                assert_eq!(args.max_steps, DEFAULT_MAX_STEPS);
                assert_eq!(args.delay_ms, 0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::parse_from([
            "scpu", "-vv", "run", "prog.scpu", "--trace", "--max-steps", "20", "--delay-ms", "5",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Run(args) => {
                assert!(args.trace);
                assert_eq!(args.max_steps, 20);
                assert_eq!(args.delay_ms, 5);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    fn faulting_listing() -> Listing {
        scpu_assembler::assemble_listing("LOAD 1 A\n\nDIV A B").unwrap()
    }

    fn broken_pipe() -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    #[test]
    fn test_fault_wins_over_write_failure() {
        let listing = faulting_listing();
        let mut vm = VM::with_program(listing.program.clone(), VMConfig::default());
        let result = vm.run();

        let err = finish_run(result, broken_pipe(), &listing, Path::new("prog.scpu")).unwrap_err();
        assert_eq!(err.to_string(), "program faulted at prog.scpu:3");
        assert!(matches!(
            err.downcast_ref::<RuntimeError>(),
            Some(RuntimeError::DivisionByZero { pc: 1, .. })
        ));
    }

    #[test]
    fn test_write_failure_after_clean_run() {
        let listing = scpu_assembler::assemble_listing("PRINT A").unwrap();
        let mut vm = VM::with_program(listing.program.clone(), VMConfig::default());
        let result = vm.run();

        let err = finish_run(result, broken_pipe(), &listing, Path::new("prog.scpu")).unwrap_err();
        assert_eq!(err.to_string(), "failed to write output");
    }

    #[test]
    fn test_clean_run() {
        let listing = scpu_assembler::assemble_listing("LOAD 2 B\nPRINT B").unwrap();
        let mut vm = VM::with_program(listing.program.clone(), VMConfig::default());
        let result = vm.run();

        let outcome = finish_run(result, Ok(()), &listing, Path::new("prog.scpu")).unwrap();
        assert_eq!(outcome.steps, 2);
    }

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from(["scpu", "check", "prog.scpu"]);
        assert!(matches!(cli.command, Command::Check { .. }));
    }
}
