use colored::*;

pub struct ColorScheme;

impl ColorScheme {
    pub fn new(use_colors: bool) -> Self {
        if !use_colors {
            colored::control::set_override(false);
        }
        Self
    }

    pub fn node(&self, text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn path(&self, text: &str) -> ColoredString {
        text.yellow().bold()
    }

    pub fn wall(&self, text: &str) -> ColoredString {
        text.bright_black()
    }

    pub fn endpoint(&self, text: &str) -> ColoredString {
        text.cyan().bold()
    }

    pub fn success(&self, text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(&self, text: &str) -> ColoredString {
        text.red()
    }

    pub fn step_number(&self, text: &str) -> ColoredString {
        text.blue()
    }

    pub fn number(&self, text: &str) -> ColoredString {
        text.green()
    }

    pub fn stats(&self, text: &str) -> ColoredString {
        text.blue()
    }
}
