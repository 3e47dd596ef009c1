//! Create job definition form component.

use console_core::{GridEntity, JobDefinition, JobSpecificProperties, Queue, QueueId};
use dioxus::prelude::*;

use super::{DialogActions, Modal, PropertiesForm};

/// Form for a new job definition. Tags, parameters and schedules are edited
/// from the grid once the definition exists.
#[component]
pub fn CreateJobDefinitionDialog(
    queues: Vec<Queue>,
    busy: bool,
    on_submit: EventHandler<JobDefinition>,
    on_close: EventHandler<()>,
) -> Element {
    let default_queue = queues
        .iter()
        .find(|q| q.default_queue)
        .or(queues.first())
        .and_then(|q| q.id);

    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut queue_id = use_signal(|| default_queue);
    let mut highlander = use_signal(|| false);
    let properties = use_signal(JobSpecificProperties::default);
    let mut error = use_signal(|| None::<String>);

    let submit = move |_| {
        let mut definition = JobDefinition::new(name().trim(), QueueId::default(), properties())
            .with_description(description());
        // Validation reports a missing queue.
        definition.queue_id = queue_id();
        definition.highlander = highlander();
        match definition.validate() {
            Ok(()) => {
                error.set(None);
                on_submit.call(definition);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        Modal { title: "New job definition", on_close,
            div { class: "form-group",
                label { "Application name" }
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
            div { class: "form-group",
                label { "Queue" }
                select {
                    onchange: move |e| queue_id.set(QueueId::parse(&e.value()).ok()),
                    option { value: "", selected: queue_id().is_none(), "—" }
                    for queue in queues.iter().filter(|q| q.id().is_some()) {
                        option {
                            value: queue.id.map(|id| id.to_string()).unwrap_or_default(),
                            selected: queue.id == queue_id(),
                            "{queue.name}"
                        }
                    }
                }
            }
            div { class: "form-group form-check",
                input {
                    r#type: "checkbox",
                    id: "highlander",
                    checked: highlander(),
                    onchange: move |e| highlander.set(e.checked()),
                }
                label { r#for: "highlander", "Highlander (one instance at a time)" }
            }
            PropertiesForm { properties }
            DialogActions {
                error: error(),
                submit_label: if busy { "Creating...".to_string() } else { "Create job definition".to_string() },
                busy,
                on_submit: submit,
                on_close,
            }
        }
    }
}
