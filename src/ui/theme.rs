use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles of the tracking and boundary reports
#[derive(Debug, Clone)]
pub struct Theme {
    pub heading: Style,
    pub label: Style,
    /// A row exists / a value came back from the boundary service
    pub recorded: Style,
    /// No row yet / nothing came back
    pub missing: Style,
    pub done: Style,
    pub degraded: Style,
    pub accent: Style,
}

impl Theme {
    pub fn for_stdout() -> Self {
        if console::Term::stdout().is_term() {
            Self::terminal()
        } else {
            Self::piped()
        }
    }

    fn terminal() -> Self {
        Self {
            heading: Style::new().cyan().bold(),
            label: Style::new().dimmed(),
            recorded: Style::new().green(),
            missing: Style::new().bright_black().italic(),
            done: Style::new().green().bold(),
            degraded: Style::new().yellow().bold(),
            accent: Style::new().magenta(),
        }
    }

    /// No escape codes when the report is redirected to a file or a pipe
    fn piped() -> Self {
        Self {
            heading: Style::new(),
            label: Style::new(),
            recorded: Style::new(),
            missing: Style::new(),
            done: Style::new(),
            degraded: Style::new(),
            accent: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::for_stdout)
}
