use std::env;
use std::sync::OnceLock;

pub const DIAGNOSTICS_ENV: &str = "YAR_DIAGNOSTICS";

/// How fatal runtime errors are rendered on stderr.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiagnosticStyle {
    /// A single `Runtime error: ...` line.
    #[default]
    Plain,
    /// A full miette report with error code and help.
    Fancy,
}

impl DiagnosticStyle {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fancy" | "rich" => DiagnosticStyle::Fancy,
            _ => DiagnosticStyle::Plain,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub diagnostics: DiagnosticStyle,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let diagnostics = lookup(DIAGNOSTICS_ENV)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| DiagnosticStyle::parse(&raw))
            .unwrap_or_default();
        Self { diagnostics }
    }
}

static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

/// Read from the environment on first use, then fixed for the process.
pub fn config() -> &'static RuntimeConfig {
    CONFIG.get_or_init(RuntimeConfig::from_env)
}
