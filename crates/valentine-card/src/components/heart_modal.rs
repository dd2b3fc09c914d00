//! Confirmation modal shown once the proposal is accepted.

use dioxus::prelude::*;

use valentine_core::ModalView;

#[component]
pub fn HeartModal(modal: ModalView, onclose: EventHandler<()>) -> Element {
    if !modal.open {
        return rsx! {};
    }

    rsx! {
        div {
            class: "modal-backdrop",
            div {
                class: "modal-card",

                // Decoration
                div {
                    class: "modal-confetti",
                    span { class: "confetti confetti-a", "❤️" }
                    span { class: "confetti confetti-b", "💖" }
                    span { class: "confetti confetti-c", "💕" }
                }

                div {
                    class: "modal-content",
                    div { class: "modal-heart", "💖" }
                    h2 { class: "modal-title", "{modal.title}" }
                    p {
                        class: "modal-body",
                        "{modal.body}"
                        br {}
                        "{modal.aside}"
                    }
                    button {
                        class: "modal-close",
                        onclick: move |_| onclose.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}
