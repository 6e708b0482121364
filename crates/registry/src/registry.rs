//! Tool registry loading and lookup.

use crate::tool::{ToolDefinition, ToolSpec};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Registry data compiled into the binary.
const BUILTIN_TOOLS: &str = include_str!("../tools.toml");

/// On-disk layout of a registry file.
#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default, rename = "tool")]
    tools: Vec<ToolSpec>,
}

/// Immutable set of tool definitions, in declaration order.
///
/// Built once at startup and shared read-only; there are no mutation
/// operations.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// The registry shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_TOOLS)
    }

    /// Load a registry from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a registry from a TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        let file: RegistryFile = toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))?;
        Self::from_specs(file.tools)
    }

    /// Build a registry, applying defaults and rejecting invalid entries.
    pub fn from_specs(specs: impl IntoIterator<Item = ToolSpec>) -> Result<Self> {
        let mut tools = Vec::new();
        let mut index = HashMap::new();

        for spec in specs {
            let tool = spec.with_defaults();
            validate(&tool)?;
            if index.contains_key(&tool.id) {
                return Err(Error::Invalid(format!("duplicate tool id '{}'", tool.id)));
            }
            index.insert(tool.id.clone(), tools.len());
            tools.push(tool);
        }

        Ok(Self { tools, index })
    }

    /// Find the tool registered under `id`.
    pub fn lookup(&self, id: &str) -> Result<&ToolDefinition> {
        self.index
            .get(id)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Registered ids in declaration order.
    pub fn list_ids(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn validate(tool: &ToolDefinition) -> Result<()> {
    if tool.id.trim().is_empty() {
        return Err(Error::Invalid("tool id must not be empty".into()));
    }
    if !tool.temperature.is_finite() || !(0.0..=1.0).contains(&tool.temperature) {
        return Err(Error::Invalid(format!(
            "tool '{}': temperature {} outside 0.0..=1.0",
            tool.id, tool.temperature
        )));
    }
    if tool.max_tokens == 0 {
        return Err(Error::Invalid(format!(
            "tool '{}': max_tokens must be positive",
            tool.id
        )));
    }
    Ok(())
}
