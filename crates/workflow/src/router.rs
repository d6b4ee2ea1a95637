//! The routing function.
//!
//! Pure, total, and side-effect-free: a given state always routes
//! identically. The executor is responsible for rejecting targets that
//! are not edges of the compiled graph — that is a configuration error,
//! not a runtime data error.

use advisor_core::{ConversationState, NextStep};

/// Map the state's declared routing field to the next target.
///
/// An absent field means the terminal marker: nothing has asked for more
/// work. A self-loop request (the supervisor naming itself) is returned
/// verbatim like any other label.
pub fn route(state: &ConversationState) -> NextStep {
    match state.next_step {
        None => NextStep::End,
        Some(next) => next,
    }
}
