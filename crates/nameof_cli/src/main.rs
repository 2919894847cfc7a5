//! nameof: Replaces `nameof` calls in TypeScript and JavaScript files.
//!
//! Usage:
//!   nameof [options] [file...]
//!
//! Without files, sources are discovered from the include/exclude globs of
//! `nameof.json`.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Severity};
use nameof_diagnostics::{Diagnostic, DiagnosticCategory};
use nameof_options::{discover_files, parse_config_file, NameofOptions, OptionsError, CONFIG_FILE_NAME};
use nameof_transformer::{replace_in_files, FileResult, OutputMode, TransformError};
use thiserror::Error;

#[derive(ClapParser, Debug)]
#[command(name = "nameof", version, about = "Replace nameof calls with the names they refer to")]
struct Cli {
    /// Files to transform.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Path to nameof.json.
    #[arg(short = 'p', long = "project", value_name = "nameof.json")]
    project: Option<PathBuf>,

    /// Identifier that marks a call.
    #[arg(long = "nameof-name", value_name = "NAME")]
    nameof_name: Option<String>,

    /// Write transformed files to this directory.
    #[arg(long = "out-dir", value_name = "DIR", conflicts_with_all = ["stdout", "check"])]
    out_dir: Option<PathBuf>,

    /// Print transformed text instead of writing files.
    #[arg(long, conflicts_with = "check")]
    stdout: bool,

    /// Report diagnostics without writing anything.
    #[arg(long)]
    check: bool,

    /// Enable debug logging.
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Failures that stop the run before or outside of a file's diagnostics.
#[derive(Error, Debug, miette::Diagnostic)]
enum CliError {
    #[error(transparent)]
    #[diagnostic(code(nameof::config))]
    Options(#[from] OptionsError),

    #[error(transparent)]
    #[diagnostic(code(nameof::io))]
    Transform(#[from] TransformError),

    #[error("no input files found")]
    #[diagnostic(
        code(nameof::no_input),
        help("pass files on the command line or add include patterns to nameof.json")
    )]
    NoInput,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const GRAY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    process::exit(run(&cli));
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> i32 {
    let start = Instant::now();

    let (options, root) = match load_options(cli) {
        Ok(loaded) => loaded,
        Err(error) => return report_failure(error),
    };
    let files = match input_files(cli, &options, &root) {
        Ok(files) => files,
        Err(error) => return report_failure(error),
    };
    log::debug!("transforming {} file(s)", files.len());

    let mode = output_mode(cli, &options, &root);
    let results = replace_in_files(&files, &options, &mode);

    let use_color = io::stderr().is_terminal();
    let mut failed = false;
    let mut error_count = 0;
    for file in results {
        match print_file_result(file, &mode, cli.verbose, use_color) {
            Ok(errors) => error_count += errors,
            Err(error) => {
                report_failure(error);
                failed = true;
            }
        }
    }

    if error_count > 0 {
        let plural = if error_count == 1 { "" } else { "s" };
        if use_color {
            eprintln!("\n{}Found {} error{}.{}", RED, error_count, plural, RESET);
        } else {
            eprintln!("\nFound {} error{}.", error_count, plural);
        }
    } else if use_color && cli.verbose {
        eprintln!("{}Done in {:.2}s.{}", GRAY, start.elapsed().as_secs_f64(), RESET);
    }

    if failed {
        1
    } else if error_count > 0 {
        2
    } else {
        0
    }
}

/// Options from `--project`, else from `nameof.json` when present, with
/// command line overrides applied. Also returns the project root.
fn load_options(cli: &Cli) -> Result<(NameofOptions, PathBuf), CliError> {
    let config = match &cli.project {
        Some(path) => Some(path.clone()),
        None => Some(PathBuf::from(CONFIG_FILE_NAME)).filter(|path| path.is_file()),
    };

    let (mut options, root) = match config {
        Some(path) => {
            let options = parse_config_file(&path)?;
            (options, project_root(&path))
        }
        None => (NameofOptions::default(), PathBuf::from(".")),
    };

    if let Some(name) = &cli.nameof_name {
        options.nameof_name = name.clone();
    }
    options.validate()?;
    Ok((options, root))
}

fn project_root(config: &Path) -> PathBuf {
    match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn input_files(cli: &Cli, options: &NameofOptions, root: &Path) -> Result<Vec<PathBuf>, CliError> {
    let files = if cli.files.is_empty() {
        discover_files(root, options)?
    } else {
        cli.files.clone()
    };
    if files.is_empty() {
        return Err(CliError::NoInput);
    }
    Ok(files)
}

/// `--check` and `--stdout` win over any output directory; a directory from
/// the config file is relative to the project root.
fn output_mode(cli: &Cli, options: &NameofOptions, root: &Path) -> OutputMode {
    if cli.check {
        OutputMode::Check
    } else if cli.stdout {
        OutputMode::Stdout
    } else if let Some(dir) = &cli.out_dir {
        OutputMode::OutDir(dir.clone())
    } else if let Some(dir) = &options.out_dir {
        OutputMode::OutDir(root.join(dir))
    } else {
        OutputMode::InPlace
    }
}

/// Print one file's diagnostics (and its text with `--stdout`). Returns the
/// number of error diagnostics.
fn print_file_result(file: FileResult, mode: &OutputMode, verbose: bool, use_color: bool) -> Result<usize, CliError> {
    let result = file.result?;

    // Spans refer to the text before any in-place rewrite.
    let overwritten = file.written_to.as_deref() == Some(file.path.as_path());
    let source = if (use_color || *mode == OutputMode::Stdout) && !overwritten {
        fs::read_to_string(&file.path).ok()
    } else {
        None
    };

    for diagnostic in result.diagnostics.diagnostics() {
        if diagnostic.category == DiagnosticCategory::Message && !verbose {
            continue;
        }
        if use_color {
            eprintln!("{:?}", to_report(diagnostic, source.as_deref()));
        } else {
            eprintln!("{}", diagnostic);
        }
    }

    if *mode == OutputMode::Stdout {
        let text = result.output.as_deref().or(source.as_deref()).unwrap_or_default();
        let mut stdout = io::stdout().lock();
        // Ignore a closed pipe.
        let _ = stdout.write_all(text.as_bytes());
    }
    if let Some(target) = &file.written_to {
        log::info!("{} -> {}", file.path.display(), target.display());
    }
    Ok(result.diagnostics.error_count())
}

fn to_report(diagnostic: &Diagnostic, source: Option<&str>) -> miette::Report {
    let severity = match diagnostic.category {
        DiagnosticCategory::Error => Severity::Error,
        DiagnosticCategory::Warning => Severity::Warning,
        DiagnosticCategory::Message => Severity::Advice,
    };
    let mut rendered = MietteDiagnostic::new(diagnostic.message_text.clone())
        .with_code(format!("{}{}", diagnostic.code_prefix(), diagnostic.code))
        .with_severity(severity);

    match (&diagnostic.file, diagnostic.span, source) {
        (Some(file), Some(span), Some(text)) if span.end() as usize <= text.len() => {
            rendered = rendered.with_label(LabeledSpan::at(span.to_range(), "here"));
            miette::Report::new(rendered).with_source_code(NamedSource::new(file, text.to_string()))
        }
        (Some(file), _, _) => miette::Report::new(rendered.with_help(format!("in {}", file))),
        _ => miette::Report::new(rendered),
    }
}

fn report_failure(error: CliError) -> i32 {
    if io::stderr().is_terminal() {
        eprintln!("{:?}", miette::Report::new(error));
    } else {
        eprintln!("error: {}", error);
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use nameof_core::TextSpan;

    /// Helper: parse a command line.
    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nameof").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_flags() {
        let cli = cli(&["-p", "cfg/nameof.json", "--nameof-name", "nm", "-v", "a.ts", "b.ts"]);
        assert_eq!(cli.project, Some(PathBuf::from("cfg/nameof.json")));
        assert_eq!(cli.nameof_name.as_deref(), Some("nm"));
        assert!(cli.verbose);
        assert_eq!(cli.files, vec![PathBuf::from("a.ts"), PathBuf::from("b.ts")]);
    }

    #[test]
    fn test_conflicting_modes_are_rejected() {
        assert!(Cli::try_parse_from(["nameof", "--stdout", "--check"]).is_err());
        assert!(Cli::try_parse_from(["nameof", "--out-dir", "out", "--stdout"]).is_err());
    }

    #[test]
    fn test_output_mode() {
        let options = NameofOptions {
            out_dir: Some("dist".to_string()),
            ..NameofOptions::default()
        };
        let root = Path::new("proj");
        assert_eq!(output_mode(&cli(&[]), &NameofOptions::default(), root), OutputMode::InPlace);
        assert_eq!(output_mode(&cli(&[]), &options, root), OutputMode::OutDir(PathBuf::from("proj/dist")));
        assert_eq!(
            output_mode(&cli(&["--out-dir", "out"]), &options, root),
            OutputMode::OutDir(PathBuf::from("out"))
        );
        assert_eq!(output_mode(&cli(&["--check"]), &options, root), OutputMode::Check);
        assert_eq!(output_mode(&cli(&["--stdout"]), &options, root), OutputMode::Stdout);
    }

    #[test]
    fn test_project_root() {
        assert_eq!(project_root(Path::new("nameof.json")), PathBuf::from("."));
        assert_eq!(project_root(Path::new("app/nameof.json")), PathBuf::from("app"));
    }

    #[test]
    fn test_marker_override_is_validated() {
        let cli = cli(&["--nameof-name", "not valid", "-p", "/nonexistent/nameof.json"]);
        assert!(matches!(load_options(&cli), Err(CliError::Options(OptionsError::Read { .. }))));

        let cli = Cli {
            project: None,
            ..cli
        };
        assert!(matches!(
            load_options(&cli),
            Err(CliError::Options(OptionsError::InvalidNameofName { .. }))
        ));
    }

    #[test]
    fn test_report_has_code() {
        let diagnostic = Diagnostic::from_text(
            Some("a.ts".to_string()),
            Some(TextSpan::new(0, 6)),
            9005,
            DiagnosticCategory::Error,
            "bad call".to_string(),
        );
        let report = to_report(&diagnostic, Some("nameof();"));
        assert_eq!(report.to_string(), "bad call");
        assert_eq!(report.code().map(|code| code.to_string()).as_deref(), Some("NAMEOF9005"));
    }
}
