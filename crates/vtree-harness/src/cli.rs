#![forbid(unsafe_code)]

//! Command-line argument parsing for the harness.
//!
//! Parsed by hand. Inspector settings come from `VTREE_*` environment
//! variables first; the flags below override them.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
vtree-harness: drive an inspector session over a sample screen

USAGE:
    vtree-harness [OPTIONS]

OPTIONS:
    --tap=N[,N...]       Tap rows (toggles rows with children, selects leaves)
    --toggle=N[,N...]    Toggle rows unconditionally
    --print=N[,N...]     Print rows to the log
    --expand-all         Expand every row with children
    --guard-childless    Ignore expands of rows without children
    --dump               Print the whole hierarchy before the session
    --outlines           Print visible outlines in screen coordinates
    --find=NAME          List views named NAME
    --diagnostics        Record a diagnostic log and write it as JSONL
    --no-delay           Present immediately instead of waiting open_delay
    --help, -h           Show this help message
    --version, -V        Show version

Steps run in the order given. Row numbers are 0-based and refer to the
list as it stands when the step runs.

ENVIRONMENT VARIABLES:
    RUST_LOG                 Log filter (e.g. vtree_inspector=debug)
    VTREE_ROW_HEIGHT         Row height in points (default: 50)
    VTREE_INDENT             Indent per depth level (default: 20)
    VTREE_OPEN_DELAY_MS      Presentation delay (default: 100)
    VTREE_GUARD_CHILDLESS    Same as --guard-childless (1|true|0|false)
    VTREE_DIAGNOSTICS        Same as --diagnostics (1|true|0|false)
    VTREE_DIAGNOSTICS_STDERR Mirror diagnostic entries to stderr (1|true|0|false)
    VTREE_PRINT_PREFIX       Prefix for printed rows (default: [vtree])";

/// One scripted interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Tap(usize),
    Toggle(usize),
    Print(usize),
    ExpandAll,
}

/// Parsed command-line options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Opts {
    pub steps: Vec<Step>,
    pub guard_childless: bool,
    pub dump: bool,
    pub outlines: bool,
    pub find: Option<String>,
    pub diagnostics: bool,
    pub no_delay: bool,
}

/// What the harness was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse arguments (without the program name).
    pub fn parse_from<I, S>(args: I) -> Result<Command, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = Self::default();
        for arg in args {
            match arg.as_ref() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--expand-all" => opts.steps.push(Step::ExpandAll),
                "--guard-childless" => opts.guard_childless = true,
                "--dump" => opts.dump = true,
                "--outlines" => opts.outlines = true,
                "--diagnostics" => opts.diagnostics = true,
                "--no-delay" => opts.no_delay = true,
                other => {
                    if let Some(val) = other.strip_prefix("--tap=") {
                        opts.steps
                            .extend(rows("--tap", val)?.into_iter().map(Step::Tap));
                    } else if let Some(val) = other.strip_prefix("--toggle=") {
                        opts.steps
                            .extend(rows("--toggle", val)?.into_iter().map(Step::Toggle));
                    } else if let Some(val) = other.strip_prefix("--print=") {
                        opts.steps
                            .extend(rows("--print", val)?.into_iter().map(Step::Print));
                    } else if let Some(val) = other.strip_prefix("--find=") {
                        opts.find = Some(val.to_string());
                    } else {
                        return Err(format!(
                            "Unknown argument: {other}\nRun with --help for usage information."
                        ));
                    }
                }
            }
        }
        Ok(Command::Run(opts))
    }
}

fn rows(flag: &str, val: &str) -> Result<Vec<usize>, String> {
    val.split(',')
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| format!("Invalid {flag} value: {val}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Opts {
        match Opts::parse_from(args) {
            Ok(Command::Run(opts)) => opts,
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = run(&[]);
        assert!(opts.steps.is_empty());
        assert!(!opts.guard_childless);
        assert!(!opts.diagnostics);
        assert_eq!(opts.find, None);
    }

    #[test]
    fn steps_keep_argument_order() {
        let opts = run(&[
            "--tap=0",
            "--toggle=2,1",
            "--print=3",
            "--expand-all",
            "--tap=0",
        ]);
        assert_eq!(
            opts.steps,
            [
                Step::Tap(0),
                Step::Toggle(2),
                Step::Toggle(1),
                Step::Print(3),
                Step::ExpandAll,
                Step::Tap(0),
            ]
        );
    }

    #[test]
    fn flags() {
        let opts = run(&[
            "--guard-childless",
            "--dump",
            "--outlines",
            "--find=UILabel",
            "--diagnostics",
            "--no-delay",
        ]);
        assert!(opts.guard_childless && opts.dump && opts.outlines);
        assert!(opts.diagnostics && opts.no_delay);
        assert_eq!(opts.find.as_deref(), Some("UILabel"));
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(Opts::parse_from(["--tap=0", "-h"]), Ok(Command::Help));
        assert_eq!(Opts::parse_from(["--version"]), Ok(Command::Version));
    }

    #[test]
    fn bad_arguments_are_errors() {
        assert_eq!(
            Opts::parse_from(["--tap=1,x"]),
            Err("Invalid --tap value: 1,x".to_string())
        );
        let err = Opts::parse_from(["--bogus"]).unwrap_err();
        assert!(err.contains("--bogus"));
        assert!(Opts::parse_from(["--print="]).is_err());
    }

    #[test]
    fn help_mentions_environment() {
        assert!(HELP_TEXT.contains("VTREE_OPEN_DELAY_MS"));
        assert!(HELP_TEXT.contains("VTREE_DIAGNOSTICS_STDERR"));
        assert!(HELP_TEXT.contains("RUST_LOG"));
        assert!(!VERSION.is_empty());
    }
}
