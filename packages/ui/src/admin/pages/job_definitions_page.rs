//! Job definitions page: editable grid over `/api/jobdefs`, with dialogs for
//! the composite columns.

use api::{JobDefinitionApi, QueueApi};
use console_core::cells::{
    Cell, CellEvent, SelectOption, render_actions_cell, render_array_cell, render_boolean_cell,
    render_dialog_cell, render_input_cell,
};
use console_core::{
    GridController, JobDefinition, JobDefinitionField as F, JobSpecificProperties, JobTags,
    Queue, summarize_parameters, summarize_schedules,
};
use dioxus::prelude::*;

use crate::admin::dialogs::{
    CreateJobDefinitionDialog, ParametersDialog, PropertiesDialog, SchedulesDialog, TagsDialog,
};
use crate::admin::{
    ErrorBanner, GridToolbar, grid_rows, render_grid, use_entity_grid, use_session_dialog,
};

const HEADERS: &[&str] = &[
    "Application",
    "Description",
    "Queue",
    "Type",
    "Enabled",
    "Highlander",
    "Restartable",
    "Specific properties",
    "Tags",
    "Parameters",
    "Schedules",
    "",
];

fn queue_options(queues: &[Queue]) -> Vec<SelectOption> {
    queues
        .iter()
        .filter_map(|q| q.id.map(|id| SelectOption::new(id.to_string(), q.name.clone())))
        .collect()
}

fn job_definition_cells(
    row: &JobDefinition,
    index: usize,
    grid: &GridController<JobDefinition>,
    queues: &[SelectOption],
) -> Vec<Cell<F>> {
    let draft = grid.draft_for(index);
    let committed_queue = row.queue_id.map(|id| id.to_string());
    let staged_queue = draft.map(|d| d.queue_id.map(|id| id.to_string()));
    let job_type = draft.map_or(row.job_type(), |d| d.properties.job_type());

    vec![
        render_input_cell(
            F::ApplicationName,
            &row.application_name,
            draft.map(|d| d.application_name.as_str()),
            true,
        ),
        render_input_cell(
            F::Description,
            &row.description,
            draft.map(|d| d.description.as_str()),
            false,
        ),
        render_array_cell(
            F::Queue,
            committed_queue.as_deref(),
            staged_queue.as_ref().map(|q| q.as_deref()),
            queues,
        ),
        Cell::Text(job_type.to_string()),
        render_boolean_cell(F::Enabled, row.enabled, draft.map(|d| d.enabled)),
        render_boolean_cell(F::Highlander, row.highlander, draft.map(|d| d.highlander)),
        Cell::Indicator(row.can_be_restarted),
        render_dialog_cell(
            F::Properties,
            &row.properties,
            draft.map(|d| &d.properties),
            "Edit properties",
            JobSpecificProperties::summary,
        ),
        render_dialog_cell(
            F::Tags,
            &row.tags,
            draft.map(|d| &d.tags),
            "Edit tags",
            JobTags::summary,
        ),
        render_dialog_cell(
            F::Parameters,
            row.parameters.as_slice(),
            draft.map(|d| d.parameters.as_slice()),
            "Edit parameters",
            summarize_parameters,
        ),
        render_dialog_cell(
            F::Schedules,
            row.schedules.as_slice(),
            draft.map(|d| d.schedules.as_slice()),
            "Edit schedules",
            summarize_schedules,
        ),
        render_actions_cell(index, grid.editing_index(), grid.is_busy()),
    ]
}

/// Job definitions list page component.
#[component]
pub fn AdminJobDefinitionsPage() -> Element {
    let grid = use_entity_grid::<JobDefinition, _>(JobDefinitionApi);
    // Read-only: feeds the queue column and the dialogs.
    let queue_grid = use_entity_grid::<Queue, _>(QueueApi);
    let mut dialog = use_session_dialog::<_, _, F>(grid);
    let mut creating = use_signal(|| false);

    let queues: Vec<Queue> = queue_grid
        .controller
        .read()
        .rows()
        .map(<[Queue]>::to_vec)
        .unwrap_or_default();
    let options = queue_options(&queues);

    let (rows, busy, error, selected, draft) = {
        let controller = grid.controller.read();
        (
            grid_rows(&*controller, |row, index, ctl| {
                job_definition_cells(row, index, ctl, &options)
            }),
            controller.is_busy(),
            controller.error().cloned(),
            controller.selected_ids().len(),
            controller.draft().cloned(),
        )
    };
    let error = error.or_else(|| queue_grid.controller.read().error().cloned());

    let on_event = move |event: CellEvent<F>| {
        if let Some(field) = grid.dispatch(event) {
            let mut dialog = dialog;
            dialog.set(Some(field));
        }
    };

    let editor = match (dialog(), draft) {
        (Some(F::Properties), Some(draft)) => rsx! {
            PropertiesDialog {
                properties: draft.properties,
                on_save: move |properties| {
                    if grid.update_draft(|d| d.properties = properties) {
                        dialog.set(None);
                    }
                },
                on_close: move |_| dialog.set(None),
            }
        },
        (Some(F::Tags), Some(draft)) => rsx! {
            TagsDialog {
                tags: draft.tags,
                on_save: move |tags| {
                    if grid.update_draft(|d| d.tags = tags) {
                        dialog.set(None);
                    }
                },
                on_close: move |_| dialog.set(None),
            }
        },
        (Some(F::Parameters), Some(draft)) => rsx! {
            ParametersDialog {
                title: "Parameters",
                parameters: draft.parameters,
                on_save: move |parameters| {
                    if grid.update_draft(|d| d.parameters = parameters) {
                        dialog.set(None);
                    }
                },
                on_close: move |_| dialog.set(None),
            }
        },
        (Some(F::Schedules), Some(draft)) => rsx! {
            SchedulesDialog {
                schedules: draft.schedules,
                queues: queues.clone(),
                on_save: move |schedules| {
                    if grid.update_draft(|d| d.schedules = schedules) {
                        dialog.set(None);
                    }
                },
                on_close: move |_| dialog.set(None),
            }
        },
        _ => rsx! {},
    };

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Job definitions" }
                    p { class: "page-description",
                        "Payloads the engines may launch, with their default queue and parameters."
                    }
                }
            }

            ErrorBanner {
                error,
                on_dismiss: move |_| {
                    grid.dismiss_error();
                    queue_grid.dismiss_error();
                },
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "All Job Definitions" }
                    GridToolbar {
                        create_label: "New job definition",
                        selected,
                        busy,
                        on_create: move |_| creating.set(true),
                        on_refresh: move |_| {
                            queue_grid.refresh();
                            grid.refresh();
                        },
                        on_delete_selected: move |_| grid.delete_selected(),
                    }
                }
                {render_grid(grid, HEADERS, rows, "No job definitions yet", on_event)}
            }

            {editor}

            if creating() {
                CreateJobDefinitionDialog {
                    queues,
                    busy,
                    on_submit: move |definition| grid.create(definition, move |_| creating.set(false)),
                    on_close: move |_| creating.set(false),
                }
            }
        }
    }
}
