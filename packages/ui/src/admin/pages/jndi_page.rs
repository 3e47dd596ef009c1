//! JNDI resources page.

use api::JndiApi;
use console_core::cells::{
    Cell, CellEvent, render_actions_cell, render_boolean_cell, render_dialog_cell,
    render_input_cell,
};
use console_core::{GridController, JndiField, JndiResource, summarize_parameters};
use dioxus::prelude::*;

use crate::admin::dialogs::{CreateJndiDialog, ParametersDialog};
use crate::admin::{
    ErrorBanner, GridToolbar, grid_rows, render_grid, use_entity_grid, use_session_dialog,
};

const HEADERS: &[&str] = &[
    "JNDI alias",
    "Type",
    "Factory",
    "Description",
    "Singleton",
    "Auth",
    "Parameters",
    "",
];

fn jndi_cells(
    row: &JndiResource,
    index: usize,
    grid: &GridController<JndiResource>,
) -> Vec<Cell<JndiField>> {
    let draft = grid.draft_for(index);
    vec![
        render_input_cell(JndiField::Name, &row.name, draft.map(|d| d.name.as_str()), true),
        render_input_cell(
            JndiField::ResourceType,
            &row.resource_type,
            draft.map(|d| d.resource_type.as_str()),
            true,
        ),
        render_input_cell(
            JndiField::Factory,
            &row.factory,
            draft.map(|d| d.factory.as_str()),
            true,
        ),
        render_input_cell(
            JndiField::Description,
            &row.description,
            draft.map(|d| d.description.as_str()),
            false,
        ),
        render_boolean_cell(JndiField::Singleton, row.singleton, draft.map(|d| d.singleton)),
        Cell::Text(row.auth.to_string()),
        render_dialog_cell(
            JndiField::Parameters,
            row.parameters.as_slice(),
            draft.map(|d| d.parameters.as_slice()),
            "Edit parameters",
            summarize_parameters,
        ),
        render_actions_cell(index, grid.editing_index(), grid.is_busy()),
    ]
}

#[component]
pub fn AdminJndiPage() -> Element {
    let grid = use_entity_grid::<JndiResource, _>(JndiApi);
    // Parameters is the only dialog column.
    let mut dialog = use_session_dialog::<_, _, JndiField>(grid);
    let mut creating = use_signal(|| false);

    let (rows, busy, error, selected, parameters) = {
        let controller = grid.controller.read();
        (
            grid_rows(&*controller, jndi_cells),
            controller.is_busy(),
            controller.error().cloned(),
            controller.selected_ids().len(),
            controller.draft().map(|d| d.parameters.clone()),
        )
    };

    let on_event = move |event: CellEvent<JndiField>| {
        if let Some(field) = grid.dispatch(event) {
            let mut dialog = dialog;
            dialog.set(Some(field));
        }
    };

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "JNDI resources" }
                    p { class: "page-description",
                        "Resources bound in the engines' JNDI directory and available to every payload."
                    }
                }
            }

            ErrorBanner { error, on_dismiss: move |_| grid.dismiss_error() }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "All Resources" }
                    GridToolbar {
                        create_label: "New resource",
                        selected,
                        busy,
                        on_create: move |_| creating.set(true),
                        on_refresh: move |_| {
                            grid.refresh();
                        },
                        on_delete_selected: move |_| grid.delete_selected(),
                    }
                }
                {render_grid(grid, HEADERS, rows, "No JNDI resources defined", on_event)}
            }

            if let Some(parameters) = parameters.filter(|_| dialog().is_some()) {
                ParametersDialog {
                    title: "Resource parameters",
                    parameters,
                    on_save: move |parameters| {
                        if grid.update_draft(|d| d.parameters = parameters) {
                            dialog.set(None);
                        }
                    },
                    on_close: move |_| dialog.set(None),
                }
            }

            if creating() {
                CreateJndiDialog {
                    busy,
                    on_submit: move |resource| grid.create(resource, move |_| creating.set(false)),
                    on_close: move |_| creating.set(false),
                }
            }
        }
    }
}
