//! Form-page creation workflow
//!
//! A closed state machine that sequences the data-collection steps for a new
//! form page: organization, process (with a create-on-miss branch), event,
//! page title, fields (with a three-state create-on-miss sub-flow), and
//! finally SQL generation. One user utterance is fully processed per step,
//! including any tool calls it triggers.

pub mod input;
pub mod memory;
pub mod state;
pub(crate) mod step;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub(crate) mod testing;

pub use memory::{FieldEntry, SessionMemory};
pub use state::{DisplayType, PendingField, WorkflowState};
pub use step::{step, Action, StepOutcome};
