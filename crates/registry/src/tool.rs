use serde::{Deserialize, Serialize};

/// Model used when a tool does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature used when a tool does not set one.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Output token bound used when a tool does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// A tool entry as written in registry data, before defaults are applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub prompt_template: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// A registered clinical document tool with every parameter resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub prompt_template: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ToolSpec {
    /// Resolve optional parameters against the registry defaults.
    pub fn with_defaults(self) -> ToolDefinition {
        ToolDefinition {
            id: self.id,
            display_name: self.name,
            description: self.description,
            prompt_template: self.prompt_template,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        }
    }
}
