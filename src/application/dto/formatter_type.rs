use std::str::FromStr;

/// Output formats the graph can be rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatterType {
    /// dep-graph JSON wrapped with run metadata
    #[default]
    Json,
    /// Indented text tree
    Tree,
}

impl FromStr for FormatterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(FormatterType::Json),
            "tree" | "text" => Ok(FormatterType::Tree),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json' or 'tree'",
                s
            )),
        }
    }
}
