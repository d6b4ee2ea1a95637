//! Reasoning service implementations for Advisor.
//!
//! All services implement the `advisor_core::ReasoningService` trait, so
//! the workflow crate never knows which backend is in use.

pub mod anthropic;

pub use anthropic::AnthropicService;
