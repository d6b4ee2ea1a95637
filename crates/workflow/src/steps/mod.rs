//! Step implementations for the consulting workflow graph.

pub mod producer;
pub mod research;
pub mod supervisor;

pub use producer::ProducerStep;
pub use research::ResearchStep;
pub use supervisor::SupervisorStep;
