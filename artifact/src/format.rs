use serde::{Deserialize, Serialize};

/// Supported artifact serialization formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFormat {
    /// Compact header plus raw little-endian `f32` payload.
    #[default]
    Native,

    /// SafeTensors, readable by other tooling.
    SafeTensors,
}

impl ModelFormat {
    pub const ALL: [ModelFormat; 2] = [ModelFormat::Native, ModelFormat::SafeTensors];

    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ModelFormat::Native => "lmod",
            ModelFormat::SafeTensors => "safetensors",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "lmod" => Some(ModelFormat::Native),
            "safetensors" => Some(ModelFormat::SafeTensors),
            _ => None,
        }
    }
}
