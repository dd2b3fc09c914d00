//! Phase enumerations for the two button tracks.

use std::fmt;
use std::str::FromStr;

use crate::error::PolicyParseError;

/// Progress through the scripted "let me think about it" conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrangePhase {
    /// Nothing said yet.
    #[default]
    Initial,
    /// "I'm your husband..." has been shown.
    Husband,
    /// The countdown script is playing; the button is inert.
    TimerActive,
    /// Countdown finished with "How about now?".
    LeaningNo,
    /// Leaning towards no while the No button was still on screen.
    Sad,
    /// Leaning towards no after the No button had been chased away.
    RestoreNo,
    /// Conversation over; the button is gone.
    Hidden,
}

impl OrangePhase {
    /// Whether the button is rendered at all.
    pub fn is_visible(self) -> bool {
        self != Self::Hidden
    }

    /// Whether the button accepts clicks.
    pub fn is_interactive(self) -> bool {
        !matches!(self, Self::TimerActive | Self::Hidden)
    }
}

impl fmt::Display for OrangePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "Initial"),
            Self::Husband => write!(f, "Husband"),
            Self::TimerActive => write!(f, "TimerActive"),
            Self::LeaningNo => write!(f, "LeaningNo"),
            Self::Sad => write!(f, "Sad"),
            Self::RestoreNo => write!(f, "RestoreNo"),
            Self::Hidden => write!(f, "Hidden"),
        }
    }
}

/// Visibility and identity of the No button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoButtonPhase {
    #[default]
    Visible,
    /// Dodged a hover; invisible and ignores the pointer.
    Hidden,
    /// Brought back by the conversation; now clickable.
    Restored,
    /// Clicked after being restored, turning into a yes.
    ClickedSike,
}

impl fmt::Display for NoButtonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visible => write!(f, "Visible"),
            Self::Hidden => write!(f, "Hidden"),
            Self::Restored => write!(f, "Restored"),
            Self::ClickedSike => write!(f, "ClickedSike"),
        }
    }
}

/// What the Orange button does once its final acknowledgement is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AfterApology {
    /// Remove the button for good.
    #[default]
    Hide,
    /// Start the conversation over from the first line.
    ResetToInitial,
}

/// The after-apology policy the card ships with.
pub const AFTER_APOLOGY_POLICY: AfterApology = AfterApology::Hide;

impl AfterApology {
    /// The phase the Orange button lands in under this policy.
    pub fn terminal_phase(self) -> OrangePhase {
        match self {
            Self::Hide => OrangePhase::Hidden,
            Self::ResetToInitial => OrangePhase::Initial,
        }
    }

    /// Returns the command line spelling of this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hide => "hide",
            Self::ResetToInitial => "reset",
        }
    }
}

impl fmt::Display for AfterApology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AfterApology {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hide" | "hidden" => Ok(Self::Hide),
            "reset" | "initial" => Ok(Self::ResetToInitial),
            other => Err(PolicyParseError(other.to_string())),
        }
    }
}
