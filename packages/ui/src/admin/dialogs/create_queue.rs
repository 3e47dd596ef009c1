//! Create queue form component.

use console_core::{GridEntity, Queue};
use dioxus::prelude::*;

use super::{DialogActions, Modal};

/// Form for a new queue. The queue is validated before `on_submit` fires.
#[component]
pub fn CreateQueueDialog(
    busy: bool,
    on_submit: EventHandler<Queue>,
    on_close: EventHandler<()>,
) -> Element {
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut default_queue = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let submit = move |_| {
        let mut queue = Queue::new(name().trim(), description());
        queue.default_queue = default_queue();
        match queue.validate() {
            Ok(()) => {
                error.set(None);
                on_submit.call(queue);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        Modal { title: "New queue", on_close,
            div { class: "form-group",
                label { "Name" }
                input {
                    value: "{name}",
                    oninput: move |e| name.set(e.value()),
                }
            }
            div { class: "form-group",
                label { "Description" }
                input {
                    value: "{description}",
                    oninput: move |e| description.set(e.value()),
                }
            }
            div { class: "form-group form-check",
                input {
                    r#type: "checkbox",
                    id: "default-queue",
                    checked: default_queue(),
                    onchange: move |e| default_queue.set(e.checked()),
                }
                label { r#for: "default-queue", "Default queue" }
            }
            DialogActions {
                error: error(),
                submit_label: if busy { "Creating...".to_string() } else { "Create queue".to_string() },
                busy,
                on_submit: submit,
                on_close,
            }
        }
    }
}
