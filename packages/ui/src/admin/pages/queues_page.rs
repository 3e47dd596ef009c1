//! Queues page: editable grid over `/api/queues`.

use api::QueueApi;
use console_core::cells::{Cell, CellEvent, render_actions_cell, render_boolean_cell, render_input_cell};
use console_core::{GridController, Queue, QueueField};
use dioxus::prelude::*;

use crate::admin::dialogs::CreateQueueDialog;
use crate::admin::{ErrorBanner, GridToolbar, grid_rows, render_grid, use_entity_grid};

const HEADERS: &[&str] = &["Name", "Description", "Default", ""];

fn queue_cells(row: &Queue, index: usize, grid: &GridController<Queue>) -> Vec<Cell<QueueField>> {
    let draft = grid.draft_for(index);
    vec![
        render_input_cell(QueueField::Name, &row.name, draft.map(|d| d.name.as_str()), true),
        render_input_cell(
            QueueField::Description,
            &row.description,
            draft.map(|d| d.description.as_str()),
            true,
        ),
        render_boolean_cell(
            QueueField::DefaultQueue,
            row.default_queue,
            draft.map(|d| d.default_queue),
        ),
        render_actions_cell(index, grid.editing_index(), grid.is_busy()),
    ]
}

/// Queues list page component.
#[component]
pub fn AdminQueuesPage() -> Element {
    let grid = use_entity_grid::<Queue, _>(QueueApi);
    let mut creating = use_signal(|| false);

    let (rows, busy, error, selected) = {
        let controller = grid.controller.read();
        (
            grid_rows(&*controller, queue_cells),
            controller.is_busy(),
            controller.error().cloned(),
            controller.selected_ids().len(),
        )
    };

    let on_event = move |event: CellEvent<QueueField>| {
        grid.dispatch(event);
    };

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Queues" }
                    p { class: "page-description",
                        "Queues receive job requests. The default queue is used when a request names none."
                    }
                }
            }

            ErrorBanner { error, on_dismiss: move |_| grid.dismiss_error() }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "All Queues" }
                    GridToolbar {
                        create_label: "New queue",
                        selected,
                        busy,
                        on_create: move |_| creating.set(true),
                        on_refresh: move |_| {
                            grid.refresh();
                        },
                        on_delete_selected: move |_| grid.delete_selected(),
                    }
                }
                {render_grid(grid, HEADERS, rows, "No queues defined", on_event)}
            }

            if creating() {
                CreateQueueDialog {
                    busy,
                    on_submit: move |queue| grid.create(queue, move |_| creating.set(false)),
                    on_close: move |_| creating.set(false),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::QueueId;

    #[test]
    fn only_the_edited_row_has_inputs() {
        let rows = vec![
            Queue::new("A", "a").with_id(QueueId::new()),
            Queue::new("B", "b").with_id(QueueId::new()),
        ];
        let mut grid = GridController::with_rows(rows);
        grid.begin_edit(1).unwrap();

        let cells = grid_rows(&grid, queue_cells).unwrap();
        assert_eq!(cells[0].cells[0], Cell::Text("A".into()));
        assert!(matches!(cells[1].cells[0], Cell::Input { ref value, .. } if value == "B"));
        assert!(cells[1].editing);
    }
}
