use console::Style;

/// Terminal color handling
pub struct Terminal {
    pub supports_color: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            supports_color: console::colors_enabled(),
        }
    }

    /// Plain terminal, used when output is piped
    pub fn plain() -> Self {
        Self {
            supports_color: false,
        }
    }

    fn style(&self, style: Style) -> Style {
        if self.supports_color {
            style
        } else {
            Style::new()
        }
    }

    pub fn header_style(&self) -> Style {
        self.style(Style::new().bold())
    }

    pub fn value_style(&self) -> Style {
        self.style(Style::new().cyan())
    }

    pub fn error_style(&self) -> Style {
        self.style(Style::new().red().bold())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}
