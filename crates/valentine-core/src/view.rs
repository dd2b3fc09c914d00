//! Pure projection of [`Proposal`] state into what the card shows.
//!
//! Nothing here holds state; the card re-derives a [`CardView`] on every
//! render.

use crate::phase::{NoButtonPhase, OrangePhase};
use crate::proposal::Proposal;

/// Title of the confirmation modal.
pub const MODAL_TITLE: &str = "Yay! Happy Valentine's Day! ❤️";

/// Body of the confirmation modal.
pub const MODAL_BODY: &str = "You've made the right choice!";

/// Aside shown under the modal body.
pub const MODAL_ASIDE: &str = "(Eventually 😉)";

/// Color variants a card button can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Green,
    Red,
    Orange,
    Gray,
}

impl ButtonVariant {
    /// Returns the CSS class for this variant.
    pub fn css_class(&self) -> &'static str {
        match self {
            ButtonVariant::Green => "btn-green",
            ButtonVariant::Red => "btn-red",
            ButtonVariant::Orange => "btn-orange",
            ButtonVariant::Gray => "btn-gray",
        }
    }
}

/// Everything needed to render one button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub variant: ButtonVariant,
    pub enabled: bool,
    /// Invisible buttons keep their layout slot unless `rendered` is false.
    pub visible: bool,
    /// Whether the button exists in the layout at all.
    pub rendered: bool,
}

/// The heart modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub open: bool,
    pub title: &'static str,
    pub body: &'static str,
    pub aside: &'static str,
}

/// The whole card for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Line shown above the buttons.
    pub message: Option<String>,
    pub yes: ButtonView,
    pub no: ButtonView,
    pub orange: ButtonView,
    pub modal: ModalView,
}

impl CardView {
    pub fn derive(proposal: &Proposal) -> Self {
        Self {
            message: orange_message(proposal.orange_phase(), proposal.override_text())
                .map(str::to_string),
            yes: yes_button(),
            no: no_button(proposal.no_phase()),
            orange: orange_button(proposal.orange_phase()),
            modal: ModalView {
                open: proposal.is_modal_open(),
                title: MODAL_TITLE,
                body: MODAL_BODY,
                aside: MODAL_ASIDE,
            },
        }
    }
}

/// Conversational line above the buttons. Script text wins over the phase.
pub fn orange_message<'a>(phase: OrangePhase, override_text: Option<&'a str>) -> Option<&'a str> {
    if let Some(text) = override_text {
        return Some(text);
    }

    match phase {
        OrangePhase::Husband => Some("I'm your husband. There’s really nothing to think about."),
        OrangePhase::LeaningNo => Some("How about now?"),
        OrangePhase::Sad => Some(":( ..."),
        OrangePhase::RestoreNo => Some(":( ... Okay, I'll bring the no back...."),
        OrangePhase::Initial | OrangePhase::TimerActive | OrangePhase::Hidden => None,
    }
}

/// Text inside the Orange button.
pub fn orange_label(phase: OrangePhase) -> &'static str {
    match phase {
        OrangePhase::Initial | OrangePhase::Hidden => "Let me think about it",
        OrangePhase::Husband => "I still want to think about it",
        OrangePhase::TimerActive => "...",
        OrangePhase::LeaningNo => "Actually, I’m starting to lean towards no.",
        OrangePhase::Sad => "Sorry...",
        OrangePhase::RestoreNo => "Thanks",
    }
}

pub fn yes_button() -> ButtonView {
    ButtonView {
        label: "Yes",
        variant: ButtonVariant::Green,
        enabled: true,
        visible: true,
        rendered: true,
    }
}

pub fn no_button(phase: NoButtonPhase) -> ButtonView {
    let (label, variant) = match phase {
        NoButtonPhase::ClickedSike => ("Yes — Sike!", ButtonVariant::Green),
        _ => ("No", ButtonVariant::Red),
    };
    let hidden = phase == NoButtonPhase::Hidden;

    ButtonView {
        label,
        variant,
        enabled: !hidden,
        visible: !hidden,
        rendered: true,
    }
}

pub fn orange_button(phase: OrangePhase) -> ButtonView {
    let enabled = phase.is_interactive();

    ButtonView {
        label: orange_label(phase),
        // Gray only while the countdown runs; the Orange variant has no
        // disabled look of its own
        variant: if phase == OrangePhase::TimerActive {
            ButtonVariant::Gray
        } else {
            ButtonVariant::Orange
        },
        enabled,
        visible: phase.is_visible(),
        rendered: phase.is_visible(),
    }
}
