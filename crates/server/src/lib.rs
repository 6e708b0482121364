//! The clinical tool endpoint: request dispatch and its HTTP binding.
//!
//! A single endpoint serves three methods:
//!
//! - `OPTIONS` answers CORS preflight with an empty body.
//! - `GET` probes the service and lists the registered tools.
//! - `POST {toolType, inputData}` compiles the tool's prompt and relays it to
//!   the completion gateway.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use gateway::OpenAiGateway;
//! use registry::ToolRegistry;
//! use server::{Dispatcher, router};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(ToolRegistry::builtin()?);
//! let gateway = OpenAiGateway::builder("sk-...").build()?;
//! let dispatcher = Arc::new(Dispatcher::new(registry, Some(gateway)));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, router(dispatcher)).await?;
//! # Ok(())
//! # }
//! ```

mod dispatch;
mod http;

pub use dispatch::{
    DEFAULT_STATUS, Dispatcher, Failure, Generated, Operation, Outcome, ProbeReport,
    SubmitRequest, completion_request, timestamp,
};
pub use http::router;
