//! A single card button.

use dioxus::prelude::*;

use valentine_core::ButtonView;

/// Renders a button from its derived view.
///
/// Invisible buttons keep their slot so the row doesn't jump when the No
/// button dodges the pointer.
#[component]
pub fn CardButton(
    view: ButtonView,
    onclick: EventHandler<MouseEvent>,
    onmouseenter: Option<EventHandler<MouseEvent>>,
    #[props(default)] wide: bool,
) -> Element {
    if !view.rendered {
        return rsx! {};
    }

    let slot_class = match (view.visible, wide) {
        (true, true) => "button-slot button-slot-wide",
        (true, false) => "button-slot",
        (false, _) => "button-slot button-slot-hidden",
    };

    rsx! {
        div {
            class: "{slot_class}",
            button {
                class: "card-btn {view.variant.css_class()}",
                disabled: !view.enabled,
                onmouseenter: move |evt| {
                    if let Some(handler) = onmouseenter {
                        handler.call(evt);
                    }
                },
                onclick: move |evt| onclick.call(evt),
                "{view.label}"
            }
        }
    }
}
