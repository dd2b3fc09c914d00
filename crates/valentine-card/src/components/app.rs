//! Root card component.

use dioxus::prelude::*;

use valentine_core::{CardView, Proposal, TokioScheduler};

use crate::theme::{Theme, ThemedRoot};

use super::{CardButton, HeartModal};

/// The proposal card: headline, conversation line, three buttons and the
/// heart modal. Everything shown is derived from `proposal` on each render.
#[component]
pub fn App(
    proposal: Signal<Proposal>,
    scheduler: Signal<TokioScheduler>,
    recipient: String,
    theme: Theme,
) -> Element {
    let mut proposal_write = proposal;
    let mut scheduler_write = scheduler;

    let view = CardView::derive(&proposal.read());

    rsx! {
        ThemedRoot {
            theme,
            div {
                class: "card-page",

                // Background decoration
                div { class: "bee bee-top", "🐝" }
                div { class: "bee bee-bottom", "🐝" }

                div {
                    class: "card",

                    h1 {
                        class: "card-headline",
                        "{recipient}"
                        br {}
                        "Will you "
                        span { class: "headline-bee", "🐝" }
                        " my valentine?"
                    }

                    MessageLine { message: view.message.clone() }

                    div {
                        class: "button-row",

                        CardButton {
                            view: view.yes.clone(),
                            onclick: move |_| proposal_write.write().on_yes_click(),
                        }

                        CardButton {
                            view: view.no.clone(),
                            onmouseenter: move |_| proposal_write.write().on_no_hover(),
                            onclick: move |_| proposal_write.write().on_no_click(),
                        }

                        CardButton {
                            view: view.orange.clone(),
                            wide: true,
                            onclick: move |_| {
                                let mut scheduler = scheduler_write.write();
                                proposal_write.write().on_orange_click(&mut *scheduler);
                            },
                        }
                    }
                }

                HeartModal {
                    modal: view.modal.clone(),
                    onclose: move |_| proposal_write.write().on_modal_close(),
                }

                footer {
                    class: "card-footer",
                    "Made with ❤️ for my Valentine"
                }
            }
        }
    }
}

/// Conversation line above the buttons. Holds its height when empty.
#[component]
fn MessageLine(message: Option<String>) -> Element {
    let class = if message.is_some() {
        "message-line"
    } else {
        "message-line message-line-empty"
    };
    let text = message.unwrap_or_else(|| "...".to_string());

    rsx! {
        div {
            class: "{class}",
            p {
                class: "message-text",
                "{text}"
            }
        }
    }
}
