//! Modal frame and footer buttons shared by every dialog.

use dioxus::prelude::*;

/// Modal frame shared by every dialog.
#[component]
pub fn Modal(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal", role: "dialog",
                div { class: "modal-header",
                    h3 { class: "modal-title", "{title}" }
                    button {
                        class: "modal-close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                div { class: "modal-body", {children} }
            }
        }
    }
}

/// Save/Cancel footer. `error` is shown above the buttons.
#[component]
pub fn DialogActions(
    error: Option<String>,
    #[props(default = "Save".to_string())] submit_label: String,
    #[props(default)] busy: bool,
    on_submit: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    rsx! {
        if let Some(err) = error {
            div { class: "error-message", "{err}" }
        }
        div { class: "form-actions",
            button {
                class: "btn btn-primary",
                disabled: busy,
                onclick: move |_| on_submit.call(()),
                "{submit_label}"
            }
            button {
                class: "btn btn-secondary",
                onclick: move |_| on_close.call(()),
                "Cancel"
            }
        }
    }
}
