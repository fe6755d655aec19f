use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use voidnorm_core::{
    process_file, walk, Error, FileOutcome, SkipSet, TextEncoding, WalkConfig, WalkEntry,
    WalkReport, WriteMode, DEFAULT_ENCODINGS, DEFAULT_SKIP_DIRS,
};

/// voidnorm — rewrite `(void)` and `( )` parameter lists to `()`
///
/// Walks a C/C++ source tree and normalizes empty parameter lists in
/// .c, .cpp and .h files, in place.
#[derive(Parser)]
#[command(name = "voidnorm", version, about, long_about = None)]
struct Cli {
    /// Suppress non-error text output
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize every source file under a directory
    Walk {
        /// Root directory (defaults to the current directory)
        root: Option<PathBuf>,
        /// Additional directory name to skip (case-insensitive, repeatable)
        #[arg(long = "skip-dir", value_name = "NAME")]
        skip_dirs: Vec<String>,
        /// Do not skip extern/, libs/ and thirdparty/ by default
        #[arg(long)]
        no_default_skips: bool,
        /// File to leave untouched (case-insensitive, repeatable)
        #[arg(long = "skip-file", value_name = "PATH")]
        skip_files: Vec<PathBuf>,
        #[command(flatten)]
        opts: RunOpts,
        /// Report without writing; exit 1 if any file would change
        #[arg(long)]
        check: bool,
    },

    /// Normalize a single file, ignoring skip rules
    File {
        /// Path to a source file
        file: PathBuf,
        #[command(flatten)]
        opts: RunOpts,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct RunOpts {
    /// Decoding order (repeatable): utf-8, latin1, windows-1252
    #[arg(long = "encoding", value_name = "ENCODING")]
    encodings: Vec<TextEncoding>,
    /// Report what would change without writing
    #[arg(long)]
    dry_run: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl RunOpts {
    fn encodings(&self) -> Vec<TextEncoding> {
        if self.encodings.is_empty() {
            DEFAULT_ENCODINGS.to_vec()
        } else {
            self.encodings.clone()
        }
    }

    fn mode(&self, check: bool) -> WriteMode {
        if self.dry_run || check {
            WriteMode::DryRun
        } else {
            WriteMode::Write
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Walk {
            root,
            skip_dirs,
            no_default_skips,
            skip_files,
            opts,
            check,
        } => cmd_walk(
            root,
            skip_dirs,
            no_default_skips,
            skip_files,
            &opts,
            check,
            cli.quiet,
        ),
        Commands::File { file, opts } => cmd_file(&file, &opts, cli.quiet),
        Commands::Version => {
            if !cli.quiet {
                println!(
                    "voidnorm {} (voidnorm-core {})",
                    env!("CARGO_PKG_VERSION"),
                    env!("CARGO_PKG_VERSION")
                );
            }
            0
        }
    };

    process::exit(exit_code);
}

// ── Commands ──────────────────────────────────────────────

fn cmd_walk(
    root: Option<PathBuf>,
    skip_dirs: Vec<String>,
    no_default_skips: bool,
    skip_files: Vec<PathBuf>,
    opts: &RunOpts,
    check: bool,
    quiet: bool,
) -> i32 {
    let mut dirs: Vec<String> = if no_default_skips {
        Vec::new()
    } else {
        DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect()
    };
    dirs.extend(skip_dirs);

    let skip = match SkipSet::new(dirs, skip_files) {
        Ok(skip) => skip,
        Err(e) => return report_fatal(&e),
    };

    let config = WalkConfig::new(root.unwrap_or_else(|| PathBuf::from(".")))
        .with_skip(skip)
        .with_encodings(opts.encodings())
        .with_mode(opts.mode(check));

    let report = match walk(&config) {
        Ok(report) => report,
        Err(e) => return report_fatal(&e),
    };

    if opts.json {
        print_json(&report.to_json());
    } else {
        render_report(&report, quiet);
    }

    if check && report.files_changed() > 0 {
        1
    } else {
        0
    }
}

fn cmd_file(file: &Path, opts: &RunOpts, quiet: bool) -> i32 {
    match process_file(file, &opts.encodings(), opts.mode(false)) {
        Ok(outcome) => {
            if opts.json {
                print_json(&serde_json::json!({
                    "path": file,
                    "outcome": outcome,
                }));
            } else if !quiet {
                render_outcome(file, &outcome);
            }
            0
        }
        Err(e) => report_fatal(&e),
    }
}

// ── Output ────────────────────────────────────────────────

fn render_report(report: &WalkReport, quiet: bool) {
    for entry in &report.entries {
        match entry {
            WalkEntry::SkippedDir { path } if !quiet => {
                println!("{} {}", "Skipping directory:".yellow(), path.display());
            }
            WalkEntry::SkippedFile { path } if !quiet => {
                println!("{} {}", "Skipping file:".yellow(), path.display());
            }
            WalkEntry::Processed { path, outcome } if !quiet => render_outcome(path, outcome),
            WalkEntry::Failed { path, message } => {
                eprintln!("{} {}: {}", "Skipping".red(), path.display(), message.red());
            }
            _ => {}
        }
    }

    if quiet {
        return;
    }

    let summary = format!(
        "{} files scanned, {} changed, {} substitutions",
        report.files_scanned(),
        report.files_changed(),
        report.substitutions()
    );
    if report.failures() > 0 {
        println!(
            "{} ({} failed)",
            summary.green(),
            report.failures().to_string().red()
        );
    } else {
        println!("{}", summary.green());
    }
}

fn render_outcome(path: &Path, outcome: &FileOutcome) {
    let verb = match outcome {
        FileOutcome::Unchanged { .. } => return,
        FileOutcome::Rewritten { .. } => "simplified",
        FileOutcome::WouldRewrite { .. } => "would simplify",
    };
    let mut line = format!(
        "  › {} {} empty parameter list(s) in {}",
        verb,
        outcome.substitutions(),
        path.display()
    );
    // Rewrites are always saved as UTF-8
    if outcome.encoding() != TextEncoding::Utf8 {
        line.push_str(&format!(" (from {})", outcome.encoding()));
    }
    println!("{}", line.cyan());
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
    }
}

fn report_fatal(err: &Error) -> i32 {
    eprintln!("{} {}", "error:".red().bold(), err);
    2
}
