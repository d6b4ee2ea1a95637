//! Supervisor-routed consulting workflow graph.
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌────────────┐  classify + route        ┌──────────┐
//! │ Supervisor  │─────────────────────────► Research  │
//! └──┬─────┬────┘                          └──┬───┬───┘
//!    │     │                                  │   │
//!    ▼     ▼                                  │   ▼
//! ┌──────┐ ┌──────┐◄──────────────────────────┘  (end)
//! │ App  │ │ BC/DR│     deliverable request
//! │ Rat. │ │      │
//! └──┬───┘ └──┬───┘
//!    ▼        ▼
//!  (end)    (end)
//! ```
//!
//! Each step receives an immutable [`ConversationState`](advisor_core::ConversationState)
//! snapshot and returns a partial update. The executor owns the single
//! mutation point: it merges the update, consults the router, and invokes
//! the next step until the terminal marker is reached. The supervisor's
//! iteration ceiling is the only bound on total work.

pub mod checkpoint;
pub mod classifier;
pub mod executor;
pub mod router;
pub mod steps;

pub use checkpoint::{InMemorySessionStore, SessionStore};
pub use classifier::{Intent, IntentClassifier, KeywordClassifier};
pub use executor::{ConsultantGraph, GraphBuilder};
pub use router::route;
pub use steps::{ProducerStep, ResearchStep, SupervisorStep};

#[cfg(test)]
pub(crate) mod test_helpers;
