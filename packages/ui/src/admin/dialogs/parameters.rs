//! Key/value parameter list editor.

use console_core::{Parameter, validate_parameters};
use dioxus::prelude::*;

use super::{DialogActions, Modal, edit_row, remove_row};

/// Key/value parameter list editor, shared by job definitions and JNDI
/// resources.
#[component]
pub fn ParametersDialog(
    title: String,
    parameters: Vec<Parameter>,
    on_save: EventHandler<Vec<Parameter>>,
    on_close: EventHandler<()>,
) -> Element {
    let mut rows = use_signal(|| parameters.clone());
    let mut error = use_signal(|| None::<String>);

    let submit = move |_| {
        let parameters: Vec<Parameter> = rows()
            .into_iter()
            .filter(|p| !(p.key.trim().is_empty() && p.value.is_empty()))
            .map(|p| Parameter::new(p.key.trim(), p.value))
            .collect();
        match validate_parameters(&parameters) {
            Ok(()) => on_save.call(parameters),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        Modal { title, on_close,
            table { class: "data-table dialog-table",
                thead {
                    tr {
                        th { "Key" }
                        th { "Value" }
                        th {}
                    }
                }
                tbody {
                    for (i, param) in rows().into_iter().enumerate() {
                        tr { key: "{i}",
                            td {
                                input {
                                    value: "{param.key}",
                                    oninput: move |e| edit_row(&mut rows.write(), i, |row| row.key = e.value()),
                                }
                            }
                            td {
                                input {
                                    value: "{param.value}",
                                    oninput: move |e| edit_row(&mut rows.write(), i, |row| row.value = e.value()),
                                }
                            }
                            td {
                                button {
                                    class: "btn btn-small btn-danger",
                                    onclick: move |_| remove_row(&mut rows.write(), i),
                                    "Remove"
                                }
                            }
                        }
                    }
                }
            }
            button {
                class: "btn btn-small btn-secondary",
                onclick: move |_| rows.write().push(Parameter::new("", "")),
                "Add parameter"
            }
            DialogActions { error: error(), on_submit: submit, on_close }
        }
    }
}
