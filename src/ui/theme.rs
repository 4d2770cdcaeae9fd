use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for each kind of text the portal prints
#[derive(Debug, Clone)]
pub struct Theme {
    /// Menu title and section headings
    pub title: Style,
    /// `ID:` / `Name:` / `Age:` labels in record lines, and info labels
    pub field: Style,
    /// Questions asked of the user
    pub prompt: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
}

impl Theme {
    /// Colored on an interactive stdout, plain when piped or when colors are off
    pub fn detect() -> Self {
        if console::Term::stdout().is_term() && console::colors_enabled() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Same palette as the classic portal: green for success, red for
    /// failures, yellow for notices
    pub fn colored() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            field: Style::new().bright_black(),
            prompt: Style::new().bold(),
            success: Style::new().green(),
            error: Style::new().red(),
            warn: Style::new().yellow(),
            info: Style::new().magenta(),
        }
    }

    pub fn plain() -> Self {
        Self {
            title: Style::new(),
            field: Style::new(),
            prompt: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_plain_theme_adds_no_escapes() {
        let plain = Theme::plain();
        assert_eq!("ID:".style(plain.field.clone()).to_string(), "ID:");
        assert_eq!("Enter: ".style(plain.prompt.clone()).to_string(), "Enter: ");
    }

    #[test]
    fn test_colored_record_labels_are_styled() {
        let colored = Theme::colored();
        assert_ne!("ID:".style(colored.field.clone()).to_string(), "ID:");
    }
}
