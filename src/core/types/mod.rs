//! Core type definition module
//!
//! Records the gateway hands to the post-call hooks.

pub mod call;
pub mod exception;
pub mod message;
pub mod usage;

pub use call::{
    CallOutcome, CallParameters, CallResult, ErrorPayload, ModelResponse, ProviderParams,
    ProxyServerRequest, elapsed_seconds,
};
pub use exception::{CallerContext, ExceptionKind, HookException};
pub use message::{Message, MessageContent, MessageRole};
pub use usage::Usage;
