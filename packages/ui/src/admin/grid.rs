//! Dioxus glue for [`GridController`]: the `use_entity_grid` hook and the
//! markup for each [`Cell`].

use console_core::cells::{Cell, CellEvent, RowAction};
use console_core::{CrudApi, Draft, FieldValue, GridController, GridEntity};
use dioxus::core::Task;
use dioxus::prelude::*;

/// Field key of an entity's draft.
pub type FieldOf<E> = <<E as GridEntity>::Draft as Draft>::Field;

/// Handle returned by [`use_entity_grid`].
///
/// Every mutation runs the controller's synchronous `prepare_*` step, awaits
/// the API call in a spawned task, then applies `complete_*`. Failures are
/// stored on the controller and rendered by the page's error banner.
pub struct EntityGrid<E: GridEntity, A: 'static> {
    pub controller: Signal<GridController<E>>,
    api: A,
}

impl<E: GridEntity, A: Copy + 'static> Clone for EntityGrid<E, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: GridEntity, A: Copy + 'static> Copy for EntityGrid<E, A> {}

/// Own a grid controller for `E` and fetch the collection on mount.
pub fn use_entity_grid<E, A>(api: A) -> EntityGrid<E, A>
where
    E: GridEntity,
    A: CrudApi<E> + Copy + 'static,
{
    let controller = use_signal(GridController::<E>::new);
    let grid = EntityGrid { controller, api };
    use_hook(move || grid.refresh());
    grid
}

/// Which editor dialog is open, scoped to the current edit session.
///
/// Resets to `None` whenever the edited row changes or editing ends, so a
/// dialog never outlives the draft it writes into.
pub fn use_session_dialog<E, A, T>(grid: EntityGrid<E, A>) -> Signal<Option<T>>
where
    E: GridEntity,
    A: CrudApi<E> + Copy + 'static,
    T: 'static,
{
    let mut dialog = use_signal(|| None::<T>);
    let session = use_memo(move || grid.controller.read().editing_id());
    use_effect(move || {
        session.read();
        dialog.set(None);
    });
    dialog
}

impl<E, A> EntityGrid<E, A>
where
    E: GridEntity,
    A: CrudApi<E> + Copy + 'static,
{
    /// Re-fetch the collection.
    pub fn refresh(self) -> Task {
        let mut controller = self.controller;
        tracing::debug!(resource = E::RESOURCE, "refreshing grid");
        spawn(async move {
            match self.api.fetch().await {
                Ok(rows) => controller.write().replace_rows(rows),
                Err(e) => controller.write().fail(e),
            }
        })
    }

    pub fn begin_edit(self, index: usize) {
        let mut controller = self.controller;
        // Refusals are recorded on the controller.
        let _ = controller.write().begin_edit(index);
    }

    pub fn cancel(self) {
        let mut controller = self.controller;
        controller.write().cancel();
    }

    pub fn set_field(self, field: FieldOf<E>, value: FieldValue) {
        let mut controller = self.controller;
        controller.write().set_field(field, value);
    }

    /// Replace part of the draft, e.g. with the result of a dialog. Returns
    /// `false` when the controller refused the write.
    pub fn update_draft(self, f: impl FnOnce(&mut E::Draft)) -> bool {
        let mut controller = self.controller;
        controller.write().update_draft(f)
    }

    pub fn toggle_selected(self, id: E::Id) {
        let mut controller = self.controller;
        controller.write().toggle_selected(id);
    }

    pub fn save(self) {
        let mut controller = self.controller;
        let Ok(entity) = controller.write().prepare_save() else {
            return;
        };
        spawn(async move {
            let result = self.api.update(entity).await;
            controller.write().complete_save(result);
        });
    }

    /// Create `entity`; `on_created` runs once the server returned it.
    pub fn create(self, entity: E, on_created: impl FnOnce(E) + 'static) {
        let mut controller = self.controller;
        let Ok(entity) = controller.write().prepare_create(entity) else {
            return;
        };
        spawn(async move {
            let result = self.api.create(entity).await;
            controller.write().complete_create(result.clone());
            if let Ok(created) = result {
                on_created(created);
            }
        });
    }

    pub fn delete(self, ids: Vec<E::Id>) {
        let mut controller = self.controller;
        let Ok(batch) = controller.write().prepare_delete(ids) else {
            return;
        };
        spawn(async move {
            let result = self.api.delete(batch.clone()).await;
            controller.write().complete_delete(&batch, result);
        });
    }

    pub fn delete_selected(self) {
        let ids = self.controller.read().selected_ids();
        self.delete(ids);
    }

    pub fn dismiss_error(self) {
        let mut controller = self.controller;
        controller.write().dismiss_error();
    }

    /// Apply a cell event. Returns the field whose editor dialog should open.
    pub fn dispatch(self, event: CellEvent<FieldOf<E>>) -> Option<FieldOf<E>> {
        if let Some((field, value)) = event.field_value() {
            self.set_field(field, value);
            return None;
        }
        match event {
            CellEvent::OpenDialog(field) => return Some(field),
            CellEvent::Action(RowAction::Edit(index)) => self.begin_edit(index),
            CellEvent::Action(RowAction::Save) => self.save(),
            CellEvent::Action(RowAction::Cancel) => self.cancel(),
            CellEvent::Action(RowAction::Delete(index)) => {
                let id = self
                    .controller
                    .read()
                    .rows()
                    .and_then(|rows| rows.get(index))
                    .and_then(|row| row.id());
                if let Some(id) = id {
                    self.delete(vec![id]);
                }
            }
            CellEvent::Input(..) | CellEvent::Toggle(..) | CellEvent::Choose(..) => {}
        }
        None
    }
}

/// Markup for one cell. `on_event` receives every interaction.
pub fn render_cell<F>(cell: Cell<F>, on_event: impl Fn(CellEvent<F>) + Copy + 'static) -> Element
where
    F: Copy + 'static,
{
    match cell {
        Cell::Text(text) => rsx! {
            span { class: "cell-text", "{text}" }
        },
        Cell::Input {
            field,
            value,
            required,
        } => {
            let class = if required && value.trim().is_empty() {
                "cell-input invalid"
            } else {
                "cell-input"
            };
            rsx! {
                input {
                    class,
                    value: "{value}",
                    required,
                    oninput: move |e| on_event(CellEvent::Input(field, e.value())),
                }
            }
        }
        Cell::Indicator(done) => {
            let (class, icon) = if done {
                ("indicator indicator-done", "✔")
            } else {
                ("indicator indicator-blocked", "✖")
            };
            rsx! {
                span { class, "{icon}" }
            }
        }
        Cell::Toggle { field, checked } => rsx! {
            input {
                r#type: "checkbox",
                checked,
                onchange: move |e| on_event(CellEvent::Toggle(field, e.checked())),
            }
        },
        Cell::Select {
            field,
            selected,
            options,
        } => rsx! {
            select {
                class: "cell-select",
                onchange: move |e| {
                    let value = e.value();
                    on_event(CellEvent::Choose(field, (!value.is_empty()).then_some(value)));
                },
                option { value: "", selected: selected.is_none(), "—" }
                for opt in options {
                    option {
                        value: "{opt.value}",
                        selected: selected.as_deref() == Some(opt.value.as_str()),
                        "{opt.label}"
                    }
                }
            }
        },
        Cell::Summary(lines) => rsx! {
            div { class: "cell-summary",
                for line in lines {
                    div { "{line}" }
                }
            }
        },
        Cell::DialogTrigger {
            field,
            prompt,
            summary,
        } => rsx! {
            button {
                class: "cell-dialog",
                title: "{prompt}",
                onclick: move |_| on_event(CellEvent::OpenDialog(field)),
                if summary.is_empty() {
                    span { class: "hint", "{prompt}" }
                } else {
                    for line in summary {
                        div { "{line}" }
                    }
                }
            }
        },
        Cell::Actions(buttons) => rsx! {
            div { class: "row-actions",
                for b in buttons {
                    {
                        let action = b.action;
                        let class = match action {
                            RowAction::Save => "btn btn-small btn-primary",
                            RowAction::Delete(_) => "btn btn-small btn-danger",
                            RowAction::Edit(_) | RowAction::Cancel => "btn btn-small btn-secondary",
                        };
                        rsx! {
                            button {
                                class,
                                disabled: !b.enabled,
                                onclick: move |_| on_event(CellEvent::Action(action)),
                                {action.label()}
                            }
                        }
                    }
                }
            }
        },
    }
}

/// One rendered row of a grid.
pub struct GridRow<E: GridEntity> {
    pub id: Option<E::Id>,
    pub selected: bool,
    pub editing: bool,
    pub cells: Vec<Cell<FieldOf<E>>>,
}

/// Build the rows of a loaded grid; `None` until the first fetch completes.
///
/// Editable cells are locked while a mutation is in flight.
pub fn grid_rows<E: GridEntity>(
    controller: &GridController<E>,
    cells: impl Fn(&E, usize, &GridController<E>) -> Vec<Cell<FieldOf<E>>>,
) -> Option<Vec<GridRow<E>>> {
    let rows = controller.rows()?;
    let busy = controller.is_busy();
    Some(
        rows.iter()
            .enumerate()
            .map(|(index, row)| {
                let cells = cells(row, index, controller);
                GridRow {
                    id: row.id(),
                    selected: row.id().is_some_and(|id| controller.is_selected(id)),
                    editing: controller.editing_index() == Some(index),
                    cells: if busy {
                        cells.into_iter().map(Cell::locked).collect()
                    } else {
                        cells
                    },
                }
            })
            .collect(),
    )
}

/// Table with a selection column, or a loading/empty state.
pub fn render_grid<E, A>(
    grid: EntityGrid<E, A>,
    headers: &'static [&'static str],
    rows: Option<Vec<GridRow<E>>>,
    empty: &'static str,
    on_event: impl Fn(CellEvent<FieldOf<E>>) + Copy + 'static,
) -> Element
where
    E: GridEntity,
    A: CrudApi<E> + Copy + 'static,
{
    let Some(rows) = rows else {
        return rsx! {
            div { class: "empty-state",
                p { "Loading..." }
            }
        };
    };
    if rows.is_empty() {
        return rsx! {
            div { class: "empty-state",
                div { class: "empty-state-icon", "▦" }
                p { "{empty}" }
            }
        };
    }

    rsx! {
        div { class: "table-container",
            table { class: "data-table",
                thead {
                    tr {
                        th { class: "select-column" }
                        for header in headers {
                            th { "{header}" }
                        }
                    }
                }
                tbody {
                    for (index, row) in rows.into_iter().enumerate() {
                        tr {
                            key: "{index}",
                            class: if row.editing { "data-row editing" } else { "data-row" },
                            td { class: "select-column",
                                if let Some(id) = row.id {
                                    input {
                                        r#type: "checkbox",
                                        checked: row.selected,
                                        onchange: move |_| grid.toggle_selected(id),
                                    }
                                }
                            }
                            for cell in row.cells {
                                td { {render_cell(cell, on_event)} }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Page toolbar: create, refresh and batch delete.
#[component]
pub fn GridToolbar(
    create_label: String,
    selected: usize,
    busy: bool,
    on_create: EventHandler<()>,
    on_refresh: EventHandler<()>,
    on_delete_selected: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "grid-toolbar",
            button {
                class: "btn btn-primary",
                disabled: busy,
                onclick: move |_| on_create.call(()),
                "{create_label}"
            }
            button {
                class: "btn btn-secondary",
                onclick: move |_| on_refresh.call(()),
                "Refresh"
            }
            button {
                class: "btn btn-danger",
                disabled: busy || selected == 0,
                onclick: move |_| on_delete_selected.call(()),
                "Delete selected ({selected})"
            }
        }
    }
}
