use crate::core::Category;
use colored::Colorize;
use serde::Serialize;

/// Renders command results as coloured text or JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    #[must_use]
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Print a success message (suppressed in JSON mode)
    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{} {message}", "✓".green().bold());
        }
    }

    /// Print an informational message (suppressed in JSON mode)
    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {message}", "warning:".yellow().bold());
    }

    pub fn error(&self, message: &str) {
        if self.json {
            let body = serde_json::json!({ "error": message });
            eprintln!("{body}");
        } else {
            eprintln!("{} {message}", "error:".red().bold());
        }
    }

    /// Print any serializable value as pretty JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> crate::error::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print one category per line, or a JSON array
    pub fn print_categories(&self, categories: &[Category]) -> crate::error::Result<()> {
        if self.json {
            return self.print_json(categories);
        }

        if categories.is_empty() {
            self.info("No categories");
            return Ok(());
        }
        for category in categories {
            let state = if category.is_active {
                "active".green()
            } else {
                "inactive".dimmed()
            };
            println!("{}  {:<30} {state}", category.id, category.name.bold());
        }
        Ok(())
    }
}
