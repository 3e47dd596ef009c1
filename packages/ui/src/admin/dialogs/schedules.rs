//! Cron schedules editor with optional queue overrides.

use console_core::{GridEntity, JobSchedule, Queue, QueueId};
use dioxus::prelude::*;

use super::{DialogActions, Modal, edit_row, remove_row};

/// Cron schedules of a job definition, each with an optional queue override.
#[component]
pub fn SchedulesDialog(
    schedules: Vec<JobSchedule>,
    queues: Vec<Queue>,
    on_save: EventHandler<Vec<JobSchedule>>,
    on_close: EventHandler<()>,
) -> Element {
    let mut rows = use_signal(|| schedules.clone());
    let mut error = use_signal(|| None::<String>);

    let submit = move |_| {
        let schedules: Vec<JobSchedule> = rows()
            .into_iter()
            .map(|s| JobSchedule {
                cron_expression: s.cron_expression.trim().to_string(),
                queue_id: s.queue_id,
            })
            .collect();
        match schedules.iter().try_for_each(JobSchedule::validate) {
            Ok(()) => on_save.call(schedules),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let queue_options: Vec<(String, String)> = queues
        .iter()
        .filter_map(|q| q.id().map(|id| (id.to_string(), q.name.clone())))
        .collect();

    rsx! {
        Modal { title: "Schedules", on_close,
            p { class: "hint", "Cron format: minute hour day-of-month month day-of-week" }
            table { class: "data-table dialog-table",
                thead {
                    tr {
                        th { "Cron expression" }
                        th { "Queue override" }
                        th {}
                    }
                }
                tbody {
                    for (i, schedule) in rows().into_iter().enumerate() {
                        tr { key: "{i}",
                            td {
                                input {
                                    value: "{schedule.cron_expression}",
                                    placeholder: "0 2 * * *",
                                    oninput: move |e| {
                                        edit_row(&mut rows.write(), i, |row| row.cron_expression = e.value());
                                    },
                                }
                            }
                            td {
                                select {
                                    onchange: move |e| {
                                        let queue_id = QueueId::parse(&e.value()).ok();
                                        edit_row(&mut rows.write(), i, |row| row.queue_id = queue_id);
                                    },
                                    option { value: "", selected: schedule.queue_id.is_none(), "Definition default" }
                                    for (value, label) in queue_options.clone() {
                                        option {
                                            selected: schedule.queue_id.is_some_and(|id| id.to_string() == value),
                                            value: "{value}",
                                            "{label}"
                                        }
                                    }
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
                onclick: move |_| rows.write().push(JobSchedule::new("")),
                "Add schedule"
            }
            DialogActions { error: error(), on_submit: submit, on_close }
        }
    }
}
