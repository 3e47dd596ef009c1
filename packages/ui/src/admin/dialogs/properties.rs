//! Job-type specific properties editor.

use console_core::{JobSpecificProperties, JobType, ShellKind};
use dioxus::prelude::*;

use super::{DialogActions, Modal};

fn edit(
    mut properties: Signal<JobSpecificProperties>,
    f: impl FnOnce(&mut JobSpecificProperties),
) {
    f(&mut *properties.write());
}

/// Job type selector plus the fields of the selected type. Switching type
/// starts from empty fields.
#[component]
pub fn PropertiesForm(properties: Signal<JobSpecificProperties>) -> Element {
    let current = properties();
    let job_type = current.job_type();

    let fields = match current {
        JobSpecificProperties::Java {
            jar_path,
            java_class_name,
        } => rsx! {
            div { class: "form-group",
                label { "Path to the jar file" }
                input {
                    value: "{jar_path}",
                    oninput: move |e| edit(properties, |p| {
                        if let JobSpecificProperties::Java { jar_path, .. } = p {
                            *jar_path = e.value();
                        }
                    }),
                }
            }
            div { class: "form-group",
                label { "Class to launch" }
                input {
                    value: "{java_class_name}",
                    oninput: move |e| edit(properties, |p| {
                        if let JobSpecificProperties::Java { java_class_name, .. } = p {
                            *java_class_name = e.value();
                        }
                    }),
                }
            }
        },
        JobSpecificProperties::Shell { shell, command } => rsx! {
            div { class: "form-group",
                label { "Shell" }
                select {
                    onchange: move |e| {
                        let kind = if e.value() == "powershell" {
                            ShellKind::Powershell
                        } else {
                            ShellKind::Default
                        };
                        edit(properties, |p| {
                            if let JobSpecificProperties::Shell { shell, .. } = p {
                                *shell = kind;
                            }
                        });
                    },
                    option { value: "default", selected: shell == ShellKind::Default, {ShellKind::Default.label()} }
                    option { value: "powershell", selected: shell == ShellKind::Powershell, {ShellKind::Powershell.label()} }
                }
            }
            div { class: "form-group",
                label { "Shell command" }
                textarea {
                    rows: 3,
                    value: "{command}",
                    oninput: move |e| edit(properties, |p| {
                        if let JobSpecificProperties::Shell { command, .. } = p {
                            *command = e.value();
                        }
                    }),
                }
            }
        },
        JobSpecificProperties::Native { executable_path } => rsx! {
            div { class: "form-group",
                label { "Path to executable" }
                input {
                    value: "{executable_path}",
                    oninput: move |e| edit(properties, |p| {
                        if let JobSpecificProperties::Native { executable_path } = p {
                            *executable_path = e.value();
                        }
                    }),
                }
            }
        },
    };

    rsx! {
        div { class: "form-group",
            label { "Job type" }
            select {
                onchange: move |e| {
                    if let Some(selected) = JobType::parse(&e.value())
                        && selected != properties.peek().job_type()
                    {
                        let mut properties = properties;
                        properties.set(JobSpecificProperties::empty(selected));
                    }
                },
                for t in JobType::ALL {
                    option { value: t.as_str(), selected: t == job_type, {t.as_str()} }
                }
            }
        }
        {fields}
    }
}

#[component]
pub fn PropertiesDialog(
    properties: JobSpecificProperties,
    on_save: EventHandler<JobSpecificProperties>,
    on_close: EventHandler<()>,
) -> Element {
    let draft = use_signal(|| properties.clone());
    let mut error = use_signal(|| None::<String>);

    rsx! {
        Modal { title: "Specific properties", on_close,
            PropertiesForm { properties: draft }
            DialogActions {
                error: error(),
                on_submit: move |_| {
                    let properties = draft();
                    match properties.validate() {
                        Ok(()) => on_save.call(properties),
                        Err(e) => error.set(Some(e.to_string())),
                    }
                },
                on_close,
            }
        }
    }
}
