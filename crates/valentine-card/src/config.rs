//! Launch configuration for the card.

use valentine_core::{AfterApology, ProposalConfig, Script, AFTER_APOLOGY_POLICY};

use crate::theme::Theme;

/// Name used in the headline when none is given.
pub const DEFAULT_RECIPIENT: &str = "My Valentine";

/// Settings chosen at launch and fixed for the window's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardConfig {
    /// Who the card is addressed to.
    pub recipient: String,
    pub after_apology: AfterApology,
    pub theme: Theme,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT.to_string(),
            after_apology: AFTER_APOLOGY_POLICY,
            theme: Theme::default(),
        }
    }
}

impl CardConfig {
    /// State machine settings for this card.
    pub fn proposal_config(&self) -> ProposalConfig {
        ProposalConfig {
            after_apology: self.after_apology,
            script: Script::think_it_over(),
        }
    }
}
