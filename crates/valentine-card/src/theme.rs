//! Card color themes, selected with `--theme`.

use clap::ValueEnum;
use dioxus::prelude::*;

/// Available card themes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    /// Pink gradient with white card
    #[default]
    Blush,
    /// Dark plum background for evening viewing
    Midnight,
}

impl Theme {
    /// Returns the CSS data-theme attribute value.
    pub fn css_value(&self) -> &'static str {
        match self {
            Theme::Blush => "blush",
            Theme::Midnight => "midnight",
        }
    }

    /// Returns the display name for the theme.
    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Blush => "Blush",
            Theme::Midnight => "Midnight",
        }
    }
}

/// Wraps the card in an element carrying the theme's `data-theme` value.
#[component]
pub fn ThemedRoot(theme: Theme, children: Element) -> Element {
    rsx! {
        div {
            class: "themed-root",
            "data-theme": theme.css_value(),
            {children}
        }
    }
}
