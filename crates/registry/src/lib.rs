//! Clinical tool registry and prompt compiler.
//!
//! A tool is a named document-generation task backed by one prompt template.
//! The registry is built once from TOML data (the built-in set is embedded in
//! the binary) and never changes afterwards. Adding a tool is a data change:
//! a new `[[tool]]` entry, with no dispatch code involved.
//!
//! # Example
//!
//! ```
//! use registry::{ToolRegistry, compile};
//!
//! # fn example() -> registry::Result<()> {
//! let registry = ToolRegistry::builtin()?;
//! let tool = registry.lookup("mental-health")?;
//! let input = serde_json::json!({ "condition": "anxiety" });
//! let prompt = compile(&tool.prompt_template, &input, chrono::Utc::now())?;
//! assert!(prompt.contains("\"condition\": \"anxiety\""));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod error;
mod prompt;
mod registry;
mod tool;

pub use error::{Error, Result};
pub use prompt::{DATE_TOKEN, INPUT_TOKEN, compile, format_date, render_input};
pub use registry::ToolRegistry;
pub use tool::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, ToolDefinition, ToolSpec};
