//! # Advisor Core
//!
//! Domain types, traits, and error definitions for the Advisor consulting
//! workflow runtime. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator is defined as a trait here. Implementations live in
//! their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with scripted/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod service;
pub mod state;
pub mod step;

// Re-export key types at crate root for ergonomics
pub use error::{Error, KnowledgeError, ReasoningError, Result, StorageError};
pub use message::{Message, Role, SessionId};
pub use service::{KnowledgeBase, ReasoningService};
pub use state::{ConversationState, Deliverable, Finding, StateUpdate};
pub use step::{NextStep, Step, StepId};
