//! CLI entry point for colorls

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use colorls::{
    DEFAULT_TREE_DEPTH, DisplayMode, EntryFilter, ListError, ListingFormatter, ListingOutput,
    RunConfig, Selection, Theme, Walker, write_summary,
};
use termcolor::{ColorChoice, StandardStream};
use terminal_size::{Width, terminal_size};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine the color choice for stdout based on mode and environment.
fn color_choice(mode: ColorMode) -> ColorChoice {
    match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return ColorChoice::Never;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return ColorChoice::Always;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return ColorChoice::Never;
            }
            if io::stdout().is_terminal() {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            }
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "colorls")]
#[command(about = "List information about the FILEs, with colors and icons")]
#[command(version)]
struct Args {
    /// List items on individual lines
    #[arg(short = '1')]
    one_per_line: bool,

    /// Do not ignore entries starting with .
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Do not list implied entries ending with ~
    #[arg(short = 'B', long = "ignore-backups")]
    ignore_backups: bool,

    /// List directories only (wins over --file)
    #[arg(short = 'd', long = "directory")]
    directory: bool,

    /// List files only, not directories
    #[arg(short = 'f', long = "file")]
    file: bool,

    /// Append indicator (one of /@*) to entries
    #[arg(short = 'F', long = "classify")]
    classify: bool,

    /// Do not list implied entries matching shell PATTERN
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN")]
    ignore: Option<String>,

    /// Use a long listing format
    #[arg(short = 'l', long = "long")]
    long: bool,

    /// Like -l, but list numeric user and group IDs
    #[arg(short = 'n', long = "numeric-uid-gid")]
    numeric_uid_gid: bool,

    /// List subdirectories recursively
    #[arg(short = 'R', long = "recursive")]
    recursive: bool,

    /// Tree listing, expanding up to DEPTH levels (default 3)
    #[arg(
        short = 't',
        long = "tree",
        value_name = "DEPTH",
        num_args = 0..=1,
        require_equals = true
    )]
    tree: Option<Option<usize>>,

    /// Brief report about the number of files and directories
    #[arg(long = "report")]
    report: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Terminal width used to pack short listings (0 disables packing)
    #[arg(short = 'w', long = "width", value_name = "COLS")]
    width: Option<usize>,

    /// Theme file with color and glyph overrides
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// List information about the FILEs (the current directory by default)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

/// Pick the display mode; long wins over tree, and a zero-depth tree is a
/// short listing.
fn display_mode(args: &Args) -> DisplayMode {
    if args.long || args.numeric_uid_gid {
        DisplayMode::Long
    } else {
        match args.tree {
            Some(None) => DisplayMode::Tree {
                depth: DEFAULT_TREE_DEPTH,
            },
            Some(Some(depth)) if depth > 0 => DisplayMode::Tree { depth },
            _ => DisplayMode::Short,
        }
    }
}

fn build_config(args: &Args) -> Result<RunConfig, ListError> {
    let mut filter = EntryFilter::new(args.all, args.ignore_backups);
    if let Some(ref pattern) = args.ignore {
        filter = filter.with_ignore(pattern)?;
    }

    let selection = if args.directory {
        Selection::DirsOnly
    } else if args.file {
        Selection::FilesOnly
    } else {
        Selection::All
    };

    let terminal_width = args
        .width
        .or_else(|| terminal_size().map(|(Width(w), _)| w as usize));

    Ok(RunConfig {
        mode: display_mode(args),
        selection,
        filter,
        recursive: args.recursive,
        classify: args.classify,
        numeric_ids: args.numeric_uid_gid,
        one_per_line: args.one_per_line,
        terminal_width,
        theme: Theme::discover(args.config.as_deref())?,
    })
}

fn main() {
    let args = Args::parse();

    let config = build_config(&args).unwrap_or_else(|e| {
        eprintln!("colorls: {}", e);
        process::exit(1);
    });

    let roots = if args.files.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.files.clone()
    };

    let stdout = StandardStream::stdout(color_choice(args.color));
    let mut formatter = ListingFormatter::new(stdout, io::stderr(), &config);
    let walker = Walker::new(&config);

    let mut reports = Vec::new();
    let mut missing = Vec::new();
    for root in &roots {
        match walker.walk(root, &mut formatter) {
            Ok(report) => reports.push(report),
            Err(e) if e.is_fatal() => {
                eprintln!("colorls: {}", e);
                process::exit(1);
            }
            Err(e) => {
                formatter.skipped(&e);
                if let ListError::NotFound(path) = e {
                    missing.push(path);
                }
            }
        }
    }

    let result = if args.report && !(reports.is_empty() && missing.is_empty()) {
        write_summary(formatter.out_mut(), &reports, &missing)
    } else {
        Ok(())
    }
    .and_then(|_| formatter.out_mut().flush());

    if let Err(e) = result {
        eprintln!("colorls: error writing output: {}", e);
        process::exit(1);
    }

    if reports.is_empty() {
        process::exit(1);
    }
}
