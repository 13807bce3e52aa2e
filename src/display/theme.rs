//! Terminal styling for CLI output.

use console::Style;
use owo_colors::OwoColorize;
use std::fmt::Display;
use std::sync::LazyLock;

pub static THEME: LazyLock<Theme> = LazyLock::new(Theme::default);

/// How one class or run ended, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    Ignored,
    Failed,
}

impl Outcome {
    pub fn icon(&self) -> &'static str {
        match self {
            Outcome::Written => "✓",
            Outcome::Ignored => "-",
            Outcome::Failed => "✗",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Written => "written",
            Outcome::Ignored => "ignored",
            Outcome::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub written: Style,
    pub ignored: Style,
    pub failed: Style,
    /// Resolver diagnostics echoed after a failure
    pub diagnostic: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            written: Style::new().green().bright(),
            ignored: Style::new().yellow(),
            failed: Style::new().red().bright(),
            diagnostic: Style::new().dim(),
        }
    }
}

impl Theme {
    /// Colors are off under `NO_COLOR` or when stdout is not a terminal
    pub fn colors_enabled() -> bool {
        use is_terminal::IsTerminal;
        std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
    }

    pub fn outcome(&self, outcome: Outcome, text: impl Display) -> String {
        if !Self::colors_enabled() {
            return format!("{} {text}", outcome.icon());
        }

        let (icon, style) = match outcome {
            Outcome::Written => (outcome.icon().green().to_string(), &self.written),
            Outcome::Ignored => (outcome.icon().yellow().to_string(), &self.ignored),
            Outcome::Failed => (outcome.icon().red().to_string(), &self.failed),
        };
        format!("{icon} {}", style.apply_to(text))
    }

    pub fn diagnostic(&self, text: impl Display) -> String {
        self.styled(&self.diagnostic, text)
    }

    fn styled(&self, style: &Style, text: impl Display) -> String {
        if Self::colors_enabled() {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
