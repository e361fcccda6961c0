#![forbid(unsafe_code)]

//! Inspector configuration.
//!
//! Defaults match the stock overlay. Each field can be overridden from the
//! environment:
//!
//! | Variable                   | Field                    | Default   |
//! |----------------------------|--------------------------|-----------|
//! | `VTREE_ROW_HEIGHT`         | `row_height`             | `50`      |
//! | `VTREE_INDENT`             | `indent_per_level`       | `20`      |
//! | `VTREE_OPEN_DELAY_MS`      | `open_delay`             | `100`     |
//! | `VTREE_GUARD_CHILDLESS`    | `guard_childless_expand` | `false`   |
//! | `VTREE_DIAGNOSTICS`        | `diagnostics`            | `false`   |
//! | `VTREE_DIAGNOSTICS_STDERR` | `diagnostics_stderr`     | `false`   |
//! | `VTREE_PRINT_PREFIX`       | `print_prefix`           | `[vtree]` |

use std::env;
use std::time::Duration;

use crate::print::DEFAULT_PRINT_PREFIX;

/// Invalid configuration override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The variable `key` holds a value that does not parse.
    InvalidValue { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => write!(f, "invalid value for {key}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Inspector behavior and row-metric settings.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectorConfig {
    /// Uniform row height in points.
    pub row_height: f64,
    /// Horizontal indent added per depth level.
    pub indent_per_level: f64,
    /// Leading offset before the first indent level.
    pub base_indent: f64,
    /// How long the host should defer presenting the overlay after opening,
    /// so the inspected screen finishes its own first layout pass.
    pub open_delay: Duration,
    /// Ignore expand requests on rows without children.
    pub guard_childless_expand: bool,
    /// Record a diagnostic event log for the session.
    pub diagnostics: bool,
    /// Mirror each diagnostic entry to stderr as it is recorded.
    pub diagnostics_stderr: bool,
    /// Prefix for printed rows.
    pub print_prefix: String,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            row_height: 50.0,
            indent_per_level: 20.0,
            base_indent: 8.0,
            open_delay: Duration::from_millis(100),
            guard_childless_expand: false,
            diagnostics: false,
            diagnostics_stderr: false,
            print_prefix: DEFAULT_PRINT_PREFIX.to_owned(),
        }
    }
}

impl InspectorConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `VTREE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = lookup("VTREE_ROW_HEIGHT") {
            config.row_height = parse_points("VTREE_ROW_HEIGHT", &v)?;
        }
        if let Some(v) = lookup("VTREE_INDENT") {
            config.indent_per_level = parse_points("VTREE_INDENT", &v)?;
        }
        if let Some(v) = lookup("VTREE_OPEN_DELAY_MS") {
            let ms = v
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("VTREE_OPEN_DELAY_MS", &v))?;
            config.open_delay = Duration::from_millis(ms);
        }
        if let Some(v) = lookup("VTREE_GUARD_CHILDLESS") {
            config.guard_childless_expand = parse_flag("VTREE_GUARD_CHILDLESS", &v)?;
        }
        if let Some(v) = lookup("VTREE_DIAGNOSTICS") {
            config.diagnostics = parse_flag("VTREE_DIAGNOSTICS", &v)?;
        }
        if let Some(v) = lookup("VTREE_DIAGNOSTICS_STDERR") {
            config.diagnostics_stderr = parse_flag("VTREE_DIAGNOSTICS_STDERR", &v)?;
        }
        if let Some(v) = lookup("VTREE_PRINT_PREFIX") {
            config.print_prefix = v;
        }

        Ok(config)
    }

    /// Set the row height.
    #[must_use]
    pub fn with_row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    /// Set the indent per depth level.
    #[must_use]
    pub fn with_indent_per_level(mut self, indent: f64) -> Self {
        self.indent_per_level = indent;
        self
    }

    /// Set the leading offset.
    #[must_use]
    pub fn with_base_indent(mut self, indent: f64) -> Self {
        self.base_indent = indent;
        self
    }

    /// Set the presentation delay.
    #[must_use]
    pub fn with_open_delay(mut self, delay: Duration) -> Self {
        self.open_delay = delay;
        self
    }

    /// Enable or disable the childless-expand guard.
    #[must_use]
    pub fn with_childless_guard(mut self, guard: bool) -> Self {
        self.guard_childless_expand = guard;
        self
    }

    /// Enable or disable the diagnostic log.
    #[must_use]
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Mirror diagnostic entries to stderr.
    #[must_use]
    pub fn with_diagnostics_stderr(mut self, enabled: bool) -> Self {
        self.diagnostics_stderr = enabled;
        self
    }

    /// Set the print prefix.
    #[must_use]
    pub fn with_print_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.print_prefix = prefix.into();
        self
    }

    /// Horizontal offset of a row's content at `depth`.
    #[inline]
    pub fn indent_for(&self, depth: usize) -> f64 {
        self.base_indent + depth as f64 * self.indent_per_level
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_owned(),
    }
}

fn parse_points(key: &'static str, value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(invalid(key, value)),
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    let v = value.trim();
    if v == "1" || v.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if v == "0" || v.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(invalid(key, value))
    }
}
