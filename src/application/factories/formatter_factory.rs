use crate::adapters::outbound::formatters::{DepGraphJsonFormatter, TreeFormatter};
use crate::application::dto::FormatterType;
use crate::ports::outbound::GraphFormatter;

/// Factory for creating graph formatters
///
/// Keeps the choice of formatter adapter out of the CLI entry point.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use gradle_dep_graph::application::dto::FormatterType;
    /// use gradle_dep_graph::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(FormatterType::Json);
    /// ```
    pub fn create(format: FormatterType) -> Box<dyn GraphFormatter> {
        Self::create_with_color(format, false)
    }

    /// Like [`FormatterFactory::create`], but lets text formats emit ANSI
    /// colors. JSON output is never colored.
    pub fn create_with_color(format: FormatterType, colored: bool) -> Box<dyn GraphFormatter> {
        match format {
            FormatterType::Json => Box::new(DepGraphJsonFormatter::new()),
            FormatterType::Tree => Box::new(TreeFormatter::new().with_color(colored)),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: FormatterType) -> &'static str {
        match format {
            FormatterType::Json => "📝 Generating dep-graph JSON output...",
            FormatterType::Tree => "📝 Generating dependency tree output...",
        }
    }
}
