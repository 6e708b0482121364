//! Completion gateway — the outbound call to the language model provider.
//!
//! The [`Gateway`] trait is the whole contract the rest of the service sees:
//! one prompt in, generated text or a [`GatewayError`] out. [`OpenAiGateway`]
//! implements it against an OpenAI-compatible `/chat/completions` endpoint.
//!
//! # Example
//!
//! ```ignore
//! use gateway::{CompletionRequest, Gateway, OpenAiGateway};
//!
//! # async fn example() -> gateway::Result<()> {
//! let gateway = OpenAiGateway::builder("sk-...").build()?;
//! let response = gateway
//!     .complete(CompletionRequest {
//!         model: "gpt-4o-mini".into(),
//!         prompt: "Summarize this spirometry result: ...".into(),
//!         temperature: 0.2,
//!         max_tokens: 3000,
//!     })
//!     .await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

mod error;
mod openai;
mod types;

pub use error::{GatewayError, Result};
pub use openai::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, OpenAiGateway, OpenAiGatewayBuilder};
pub use types::{CompletionRequest, CompletionResponse, Gateway, Usage};
