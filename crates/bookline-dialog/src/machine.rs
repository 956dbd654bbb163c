// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dialogue state machine: a fixed four-step booking script.
//!
//! The script is a static transition table; adding a step is a data
//! change, not new branching code. [`advance_state`] is a pure
//! (state, input) → (state, output) transformer with no store access and
//! no deletion side effects, so tests can drive it directly. [`Dialogue`]
//! wraps it with the store's implicit-initialization behavior; committing
//! or rolling back the advanced state is the dispatcher's job.

use std::sync::Arc;

use bookline_core::{ConversationState, OutboundMessage};
use chrono::NaiveDate;
use tracing::debug;

use crate::composer;
use crate::store::ConversationStore;

/// Which collected field a step consumes its response into.
#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    Date,
    Time,
}

/// Which prompt a step produces after consuming its response.
#[derive(Debug, Clone, Copy)]
enum Prompt {
    AskName,
    AskDate,
    AskTime,
    Confirm,
}

struct StepSpec {
    consumes: Option<Field>,
    produces: Prompt,
}

/// The booking script, indexed by the step value before the turn.
const SCRIPT: [StepSpec; 4] = [
    StepSpec { consumes: None, produces: Prompt::AskName },
    StepSpec { consumes: Some(Field::Name), produces: Prompt::AskDate },
    StepSpec { consumes: Some(Field::Date), produces: Prompt::AskTime },
    StepSpec { consumes: Some(Field::Time), produces: Prompt::Confirm },
];

/// Step value at which the dialogue is complete.
pub const TERMINAL_STEP: u8 = SCRIPT.len() as u8;

/// The outcome of one dialogue turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// The message to deliver for this turn.
    pub message: OutboundMessage,
    /// True once the confirmation has been produced. The dispatcher
    /// removes the conversation after delivering a completed turn.
    pub completed: bool,
}

/// Advances one conversation by a single turn.
///
/// Consumes `response` into the field named by the script for the current
/// step, increments the step, and produces that step's message. At or
/// beyond [`TERMINAL_STEP`] the call is idempotent: the confirmation is
/// re-produced and neither step nor fields change.
pub fn advance_state(
    state: &mut ConversationState,
    response: Option<&str>,
    today: NaiveDate,
) -> Turn {
    if state.step >= TERMINAL_STEP {
        return Turn {
            message: composer::confirmation(&state.fields),
            completed: true,
        };
    }

    let spec = &SCRIPT[state.step as usize];

    match (spec.consumes, response) {
        (Some(field), Some(value)) => {
            let slot = match field {
                Field::Name => &mut state.fields.name,
                Field::Date => &mut state.fields.date,
                Field::Time => &mut state.fields.time,
            };
            *slot = Some(value.to_string());
        }
        (Some(field), None) => {
            // A missing response leaves the field unset rather than
            // writing an empty value.
            debug!(step = state.step, ?field, "turn arrived without a response");
        }
        (None, _) => {}
    }

    state.step += 1;

    let message = match spec.produces {
        Prompt::AskName => composer::ask_name(),
        Prompt::AskDate => composer::ask_date(today),
        Prompt::AskTime => composer::ask_time(),
        Prompt::Confirm => composer::confirmation(&state.fields),
    };

    Turn {
        message,
        completed: state.step >= TERMINAL_STEP,
    }
}

/// Store-backed dialogue front end.
///
/// Looks up (or implicitly initializes) the caller's conversation,
/// advances it, and commits the new state. Never deletes state: removal
/// after a delivered confirmation belongs to the dispatcher, as does
/// restoring the prior state when delivery fails.
pub struct Dialogue {
    store: Arc<ConversationStore>,
}

impl Dialogue {
    pub fn new(store: Arc<ConversationStore>) -> Self {
        Self { store }
    }

    /// Advances the user's conversation by one turn.
    ///
    /// First contact (no stored state) behaves identically to a
    /// conversation explicitly initialized by the dispatcher.
    pub fn advance(&self, user_id: &str, response: Option<&str>) -> Turn {
        let mut state = self
            .store
            .get(user_id)
            .unwrap_or_else(|| self.store.initialize(user_id));

        let turn = advance_state(&mut state, response, chrono::Local::now().date_naive());
        self.store.put(user_id, state);
        turn
    }
}
