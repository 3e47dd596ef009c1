//! Create JNDI resource form, pre-filled from a resource template.

use console_core::{GridEntity, JNDI_TEMPLATES, JndiResource, JndiResourceTemplate, summarize_parameters};
use dioxus::prelude::*;

use super::{DialogActions, Modal};

/// Form for a new JNDI resource, pre-filled from a template.
#[component]
pub fn CreateJndiDialog(
    busy: bool,
    on_submit: EventHandler<JndiResource>,
    on_close: EventHandler<()>,
) -> Element {
    let mut template = use_signal(|| JNDI_TEMPLATES[0]);
    let mut draft = use_signal(|| JNDI_TEMPLATES[0].instantiate(JNDI_TEMPLATES[0].name_hint));
    let mut error = use_signal(|| None::<String>);

    let submit = move |_| {
        let resource = draft();
        match resource.validate() {
            Ok(()) => {
                error.set(None);
                on_submit.call(resource);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let current = draft();
    let selected = template();
    let parameters = summarize_parameters(&current.parameters);

    rsx! {
        Modal { title: "New JNDI resource", on_close,
            div { class: "form-group",
                label { "Template" }
                select {
                    onchange: move |e| {
                        if let Some(found) = JndiResourceTemplate::find(&e.value()) {
                            template.set(*found);
                            draft.set(found.instantiate(found.name_hint));
                        }
                    },
                    for t in JNDI_TEMPLATES {
                        option { value: t.key, selected: t.key == selected.key, {t.label} }
                    }
                }
            }
            div { class: "form-group",
                label { "JNDI alias" }
                input {
                    value: "{current.name}",
                    placeholder: selected.name_hint,
                    oninput: move |e| draft.write().name = e.value(),
                }
            }
            div { class: "form-group",
                label { "Type" }
                input {
                    value: "{current.resource_type}",
                    oninput: move |e| draft.write().resource_type = e.value(),
                }
            }
            div { class: "form-group",
                label { "Factory" }
                input {
                    value: "{current.factory}",
                    oninput: move |e| draft.write().factory = e.value(),
                }
            }
            div { class: "form-group",
                label { "Description" }
                input {
                    value: "{current.description}",
                    oninput: move |e| draft.write().description = e.value(),
                }
            }
            div { class: "form-group form-check",
                input {
                    r#type: "checkbox",
                    id: "singleton",
                    checked: current.singleton,
                    onchange: move |e| draft.write().singleton = e.checked(),
                }
                label { r#for: "singleton", "Singleton" }
            }
            if !parameters.is_empty() {
                p { class: "hint",
                    "Parameters: "
                    for line in parameters {
                        span { "{line}" }
                    }
                }
            }
            DialogActions {
                error: error(),
                submit_label: if busy { "Creating...".to_string() } else { "Create resource".to_string() },
                busy,
                on_submit: submit,
                on_close,
            }
        }
    }
}
