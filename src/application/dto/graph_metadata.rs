use chrono::Utc;
use uuid::Uuid;

const TOOL_NAME: &str = "gradle-dep-graph";

/// Run metadata attached to rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    serial_number: String,
}

impl GraphMetadata {
    pub fn new(
        timestamp: String,
        tool_name: String,
        tool_version: String,
        serial_number: String,
    ) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            serial_number,
        }
    }

    /// Metadata stamped with the current time, a fresh UUID serial and this
    /// crate's name and version.
    pub fn generate() -> Self {
        Self::new(
            Utc::now().to_rfc3339(),
            TOOL_NAME.to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
            format!("urn:uuid:{}", Uuid::new_v4()),
        )
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }
}
