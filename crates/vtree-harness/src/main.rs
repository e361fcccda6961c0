#![forbid(unsafe_code)]

//! Inspector harness.
//!
//! Opens an inspector session over a sample screen, runs the scripted steps
//! from the command line, and prints the resulting list.
//!
//! # Running
//!
//! ```sh
//! cargo run -p vtree-harness -- --tap=0,1 --print=2
//! RUST_LOG=vtree_inspector=debug cargo run -p vtree-harness -- --expand-all
//! ```

mod cli;
mod sample;

use std::io::{self, Write};
use std::process;

use tracing_subscriber::EnvFilter;
use vtree_core::{NodeId, ViewTree};
use vtree_inspector::print::WriterSink;
use vtree_inspector::{
    ConfigError, InspectorConfig, InspectorSession, ListError, dump_tree, find_by_name,
    outline_regions,
};

use cli::{Command, HELP_TEXT, Opts, Step, VERSION};

/// Why a scripted run stopped.
#[derive(Debug)]
enum HarnessError {
    Config(ConfigError),
    Row(ListError),
    Io(io::Error),
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration: {err}"),
            Self::Row(err) => write!(f, "step failed: {err}"),
            Self::Io(err) => write!(f, "output: {err}"),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Row(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for HarnessError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ListError> for HarnessError {
    fn from(err: ListError) -> Self {
        Self::Row(err)
    }
}

impl From<io::Error> for HarnessError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

fn main() {
    let opts = match Opts::parse_from(std::env::args().skip(1)) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{HELP_TEXT}");
            return;
        }
        Ok(Command::Version) => {
            println!("vtree-harness {VERSION}");
            return;
        }
        Err(msg) => {
            eprintln!("{msg}");
            process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let result = InspectorConfig::from_env()
        .map_err(HarnessError::from)
        .and_then(|config| {
            let (arena, root) = sample::sample_screen();
            run(&arena, root, config, &opts, &mut io::stdout().lock())
        });
    if let Err(err) = result {
        tracing::error!(%err, "harness run failed");
        eprintln!("vtree-harness: {err}");
        process::exit(1);
    }
}

fn run<T: ViewTree + ?Sized, W: Write>(
    tree: &T,
    root: NodeId,
    config: InspectorConfig,
    opts: &Opts,
    out: &mut W,
) -> Result<(), HarnessError> {
    let guard = config.guard_childless_expand || opts.guard_childless;
    let diagnostics = config.diagnostics || opts.diagnostics;
    let config = config
        .with_childless_guard(guard)
        .with_diagnostics(diagnostics);

    if opts.dump {
        write!(out, "{}", dump_tree(tree, root))?;
        writeln!(out)?;
    }
    if let Some(name) = &opts.find {
        for node in find_by_name(tree, root, name) {
            writeln!(out, "found {name} at {node}")?;
        }
    }
    if opts.outlines {
        for region in outline_regions(tree, root) {
            writeln!(
                out,
                "{}{} {}",
                "  ".repeat(region.depth),
                tree.display_name(region.node),
                region.frame
            )?;
        }
    }

    let mut session = InspectorSession::open(tree, root, config);
    if !opts.no_delay {
        std::thread::sleep(session.open_delay());
    }

    let mut printed = WriterSink(Vec::<u8>::new());
    for step in &opts.steps {
        match *step {
            Step::Tap(index) => {
                check_row(&session, index)?;
                let outcome = session.tap(index);
                tracing::debug!(index, ?outcome, "tap");
            }
            Step::Toggle(index) => {
                let outcome = session.try_toggle(index)?;
                tracing::debug!(index, outcome = outcome.as_str(), "toggle");
            }
            Step::Print(index) => {
                check_row(&session, index)?;
                session.print_to(index, &mut printed);
            }
            Step::ExpandAll => expand_all(&mut session),
        }
    }

    write!(out, "{}", session.render_text())?;
    out.write_all(&printed.0)?;

    if let Some(log) = session.close() {
        writeln!(out, "{}", log.to_jsonl())?;
    }
    Ok(())
}

fn check_row<T: ViewTree + ?Sized>(
    session: &InspectorSession<'_, T>,
    index: usize,
) -> Result<(), ListError> {
    let len = session.count();
    if index < len {
        Ok(())
    } else {
        Err(ListError::IndexOutOfRange { index, len })
    }
}

/// Expand every collapsed row that has children, front to back.
fn expand_all<T: ViewTree + ?Sized>(session: &mut InspectorSession<'_, T>) {
    let mut index = 0;
    while index < session.count() {
        let view = session.entry(index);
        if view.has_children() && !view.is_expanded() {
            session.toggle(index);
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(args: &[&str]) -> Result<String, HarnessError> {
        let opts = match Opts::parse_from(args) {
            Ok(Command::Run(opts)) => opts,
            other => panic!("expected run, got {other:?}"),
        };
        let (arena, root) = sample::sample_screen();
        let config = InspectorConfig::default().with_open_delay(std::time::Duration::ZERO);
        let mut out = Vec::new();
        run(&arena, root, config, &opts, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn default_run_shows_root() {
        let out = run_with(&[]).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("\u{25B6} UIView"));
    }

    #[test]
    fn taps_expand_and_print_appends() {
        let out = run_with(&["--tap=0,1", "--print=3"]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5, "{out}");
        assert!(lines[1].starts_with("  \u{25BC} UIView"));
        assert!(lines[2].starts_with("    \u{25B6} UIView"));
        assert_eq!(
            lines[4],
            "[vtree] UIButton -- Frame: (87.5, 712.0, 200.0, 50.0) -- Hidden: false, Alpha: 1.0"
        );
    }

    #[test]
    fn expand_all_reaches_every_view() {
        let out = run_with(&["--no-delay", "--expand-all"]).unwrap();
        assert_eq!(out.lines().count(), 6);
        assert!(out.contains("[hidden]"));
    }

    #[test]
    fn guard_flag_applies() {
        let out = run_with(&["--no-delay", "--tap=0", "--toggle=1,2", "--diagnostics"]).unwrap();
        // Row 2 after expanding the card is its inner view, which has children.
        assert!(out.contains("row_expanded"));

        let guarded = run_with(&[
            "--no-delay",
            "--expand-all",
            "--toggle=3",
            "--guard-childless",
            "--diagnostics",
        ])
        .unwrap();
        assert!(guarded.contains("expand_ignored"), "{guarded}");
    }

    #[test]
    fn utilities_print_before_session() {
        let out = run_with(&["--no-delay", "--dump", "--find=UILabel", "--outlines"]).unwrap();
        assert!(out.starts_with("UIView (0.0, 0.0, 375.0, 812.0)\n"));
        assert_eq!(out.matches("found UILabel").count(), 2);
        assert!(out.contains("      UILabel (80.0, 150.0, 80.0, 20.0)"));
    }

    #[test]
    fn out_of_range_step_fails() {
        let err = run_with(&["--no-delay", "--tap=4"]).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Row(ListError::IndexOutOfRange { index: 4, len: 1 })
        ));
        assert!(run_with(&["--no-delay", "--print=1"]).is_err());
        assert!(run_with(&["--no-delay", "--toggle=9"]).is_err());
    }
}
