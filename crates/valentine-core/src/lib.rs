//! Core logic for the valentine proposal card.
//!
//! Holds the two button phase tracks, the state machine that moves them, the
//! timed countdown script with its cancellable scheduler, and the pure view
//! derivation the card renders from. No UI toolkit types appear here.

pub mod error;
pub mod phase;
pub mod proposal;
pub mod scheduler;
pub mod sequence;
pub mod view;

pub use error::{PolicyParseError, ScriptError};
pub use phase::{AfterApology, NoButtonPhase, OrangePhase, AFTER_APOLOGY_POLICY};
pub use proposal::{Proposal, ProposalConfig};
pub use scheduler::{RunId, Scheduler, SequenceTick, TimerId, TokioScheduler, VirtualScheduler};
pub use sequence::{Script, ScriptStep, SequenceRun, SequenceRunner, THINK_IT_OVER_STEPS};
pub use view::{ButtonVariant, ButtonView, CardView, ModalView};
