//! native-feedback
//!
//! An MCP server that exposes human-in-the-loop tools (collect feedback,
//! pick an image, inspect an image, take a screenshot) by delegating the
//! actual interaction to native macOS dialogs and screen capture.
//!
//! Layers, leaves first:
//! - [`interaction`]: the native dialog / picker / capture subsystem
//! - [`inspect`]: read-only image metadata and byte loading
//! - [`tools`]: one handler per tool over the two layers above
//! - [`mcp`]: tool catalog, dispatch core, and stdio JSON-RPC transport

pub mod inspect;
pub mod interaction;
pub mod mcp;
pub mod tools;

pub use interaction::{InteractionOutcome, NativeInteraction, OsaScriptInteraction};
pub use mcp::{serve_stdio, FeedbackServer, ToolError};
pub use tools::FeedbackToolProvider;
