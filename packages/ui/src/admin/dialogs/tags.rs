//! Job tags editor.

use console_core::JobTags;
use dioxus::prelude::*;

use super::{DialogActions, Modal};

#[component]
pub fn TagsDialog(
    tags: JobTags,
    on_save: EventHandler<JobTags>,
    on_close: EventHandler<()>,
) -> Element {
    let mut draft = use_signal(|| tags.clone());

    let current = draft();

    rsx! {
        Modal { title: "Tags", on_close,
            div { class: "form-group",
                label { "Application" }
                input {
                    value: current.application.clone().unwrap_or_default(),
                    oninput: move |e| draft.write().application = Some(e.value()),
                }
            }
            div { class: "form-group",
                label { "Module" }
                input {
                    value: current.module.clone().unwrap_or_default(),
                    oninput: move |e| draft.write().module = Some(e.value()),
                }
            }
            div { class: "form-group",
                label { "Keyword 1" }
                input {
                    value: current.keyword1.clone().unwrap_or_default(),
                    oninput: move |e| draft.write().keyword1 = Some(e.value()),
                }
            }
            div { class: "form-group",
                label { "Keyword 2" }
                input {
                    value: current.keyword2.clone().unwrap_or_default(),
                    oninput: move |e| draft.write().keyword2 = Some(e.value()),
                }
            }
            div { class: "form-group",
                label { "Keyword 3" }
                input {
                    value: current.keyword3.clone().unwrap_or_default(),
                    oninput: move |e| draft.write().keyword3 = Some(e.value()),
                }
            }
            DialogActions {
                on_submit: move |_| on_save.call(draft().normalized()),
                on_close,
            }
        }
    }
}
