//! Editable-grid controller shared by every entity page.
//!
//! A grid is either viewing its rows or editing exactly one of them. Edits go
//! into a typed draft held by the controller; the backend only sees a change
//! when the row is saved. Mutations are split into a synchronous `prepare_*`
//! step and a `complete_*` step so callers never hold the controller across
//! an await point.

use std::collections::BTreeSet;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::error::{ConsoleError, ValidationError};

/// A value written into a draft field from an input cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Choice(Option<String>),
}

/// Staged copy of an entity's editable fields.
pub trait Draft: Clone + Debug + PartialEq + 'static {
    /// Key naming one editable column.
    type Field: Copy + Eq + Debug + 'static;

    /// Write `value` into `field`. Returns `false` when the value kind does
    /// not fit the field.
    fn set(&mut self, field: Self::Field, value: FieldValue) -> bool;
}

/// A backend record shown as one grid row.
pub trait GridEntity: Clone + Debug + PartialEq + 'static {
    type Id: Copy + Eq + Ord + Hash + Debug + Display + 'static;
    type Draft: Draft;

    /// Name of the REST resource, used in logs and error messages.
    const RESOURCE: &'static str;

    /// Server-assigned id, `None` until created.
    fn id(&self) -> Option<Self::Id>;

    /// Check required fields and field combinations.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Stage the editable fields.
    fn to_draft(&self) -> Self::Draft;

    /// Full record built from this row and a staged draft. Fields that are
    /// not part of the draft keep their current value.
    fn merge_draft(&self, draft: &Self::Draft) -> Self;
}

/// CRUD access to one REST resource.
#[allow(async_fn_in_trait)]
pub trait CrudApi<E: GridEntity> {
    /// Current server-side collection.
    async fn fetch(&self) -> Result<Vec<E>, ConsoleError>;

    /// Create `draft` (which has no id) and return the stored entity.
    async fn create(&self, draft: E) -> Result<E, ConsoleError>;

    /// Replace the whole record identified by `entity.id()`.
    async fn update(&self, entity: E) -> Result<E, ConsoleError>;

    /// Delete every id in a single batch.
    async fn delete(&self, ids: Vec<E::Id>) -> Result<(), ConsoleError>;
}

/// Edit state of a grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridMode<E: GridEntity> {
    Viewing,
    EditingRow {
        index: usize,
        id: E::Id,
        draft: E::Draft,
    },
}

/// A mutating call that is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Save,
    Create,
    Delete,
}

/// State of one editable grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridController<E: GridEntity> {
    rows: Option<Vec<E>>,
    mode: GridMode<E>,
    pending: Option<Mutation>,
    selection: BTreeSet<E::Id>,
    error: Option<ConsoleError>,
}

impl<E: GridEntity> Default for GridController<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GridEntity> GridController<E> {
    /// A grid with nothing loaded yet.
    pub fn new() -> Self {
        Self {
            rows: None,
            mode: GridMode::Viewing,
            pending: None,
            selection: BTreeSet::new(),
            error: None,
        }
    }

    /// A grid already holding `rows`.
    pub fn with_rows(rows: Vec<E>) -> Self {
        let mut grid = Self::new();
        grid.rows = Some(rows);
        grid
    }

    /// Rows from the last fetch, `None` while not loaded.
    pub fn rows(&self) -> Option<&[E]> {
        self.rows.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.rows.is_some()
    }

    pub fn mode(&self) -> &GridMode<E> {
        &self.mode
    }

    pub fn editing_index(&self) -> Option<usize> {
        match &self.mode {
            GridMode::Viewing => None,
            GridMode::EditingRow { index, .. } => Some(*index),
        }
    }

    /// Id of the row being edited. Unlike the index, it does not move when
    /// a refresh reorders the rows.
    pub fn editing_id(&self) -> Option<E::Id> {
        match &self.mode {
            GridMode::Viewing => None,
            GridMode::EditingRow { id, .. } => Some(*id),
        }
    }

    /// The active draft, if a row is being edited.
    pub fn draft(&self) -> Option<&E::Draft> {
        match &self.mode {
            GridMode::Viewing => None,
            GridMode::EditingRow { draft, .. } => Some(draft),
        }
    }

    /// The draft for `index`, only when that row is the one being edited.
    pub fn draft_for(&self, index: usize) -> Option<&E::Draft> {
        match &self.mode {
            GridMode::EditingRow { index: i, draft, .. } if *i == index => Some(draft),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<Mutation> {
        self.pending
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Last failure not yet dismissed.
    pub fn error(&self) -> Option<&ConsoleError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Record a failure for display.
    pub fn fail(&mut self, error: ConsoleError) {
        tracing::warn!(resource = E::RESOURCE, "{}", error);
        self.error = Some(error);
    }

    /// Replace the collection with a fresh fetch.
    ///
    /// An edit session survives when its row is still present (its index
    /// follows the row); otherwise the grid falls back to viewing.
    pub fn replace_rows(&mut self, rows: Vec<E>) {
        self.selection
            .retain(|id| rows.iter().any(|row| row.id() == Some(*id)));
        self.rows = Some(rows);
        self.reconcile_edit();
    }

    /// Enter edit mode on row `index`, discarding any other edit session.
    pub fn begin_edit(&mut self, index: usize) -> Result<(), ConsoleError> {
        if self.pending.is_some() {
            return Err(self.reject(ConsoleError::Busy));
        }
        let staged = self
            .rows
            .as_ref()
            .and_then(|rows| rows.get(index))
            .map(|row| (row.id(), row.to_draft()));
        let Some((id, draft)) = staged else {
            return Err(self.reject(ConsoleError::NotFound(format!(
                "{} row {}",
                E::RESOURCE,
                index
            ))));
        };
        let Some(id) = id else {
            return Err(self.reject(ConsoleError::validation(
                "id",
                "row has not been created yet",
            )));
        };

        if let Some(previous) = self.editing_index()
            && previous != index
        {
            tracing::debug!(
                resource = E::RESOURCE,
                previous,
                index,
                "discarding draft of previously edited row"
            );
        }

        self.mode = GridMode::EditingRow { index, id, draft };
        Ok(())
    }

    /// Write one field of the active draft.
    ///
    /// Refused with `Busy` while a mutation is in flight: a pending save
    /// already carries the draft it was prepared from.
    pub fn set_field(&mut self, field: <E::Draft as Draft>::Field, value: FieldValue) -> bool {
        if self.refuse_while_pending() {
            return false;
        }
        match &mut self.mode {
            GridMode::EditingRow { draft, .. } => {
                let accepted = draft.set(field, value);
                if !accepted {
                    tracing::warn!(resource = E::RESOURCE, ?field, "value does not fit field");
                }
                accepted
            }
            GridMode::Viewing => false,
        }
    }

    /// Mutate the active draft in place (used by nested editor dialogs).
    pub fn update_draft(&mut self, f: impl FnOnce(&mut E::Draft)) -> bool {
        if self.refuse_while_pending() {
            return false;
        }
        match &mut self.mode {
            GridMode::EditingRow { draft, .. } => {
                f(draft);
                true
            }
            GridMode::Viewing => false,
        }
    }

    /// Discard the active draft.
    pub fn cancel(&mut self) {
        self.mode = GridMode::Viewing;
    }

    /// Validate the draft and mark a save as in flight.
    ///
    /// Returns the full record to send with `update`.
    pub fn prepare_save(&mut self) -> Result<E, ConsoleError> {
        if self.pending.is_some() {
            return Err(self.reject(ConsoleError::Busy));
        }
        let Some((index, draft)) = self.editing_index().zip(self.draft().cloned()) else {
            return Err(self.reject(ConsoleError::validation("row", "no row is being edited")));
        };
        let Some(original) = self.rows.as_ref().and_then(|rows| rows.get(index)) else {
            return Err(self.reject(ConsoleError::NotFound(format!(
                "{} row {}",
                E::RESOURCE,
                index
            ))));
        };

        let entity = original.merge_draft(&draft);
        if let Err(e) = entity.validate() {
            return Err(self.reject(e.into()));
        }

        self.pending = Some(Mutation::Save);
        self.error = None;
        Ok(entity)
    }

    /// Apply the outcome of an `update` call.
    pub fn complete_save(&mut self, result: Result<E, ConsoleError>) {
        self.pending = None;
        match result {
            Ok(saved) => {
                self.merge_row(saved);
                self.mode = GridMode::Viewing;
            }
            Err(e) => self.fail(e),
        }
    }

    /// Validate a new record and mark a create as in flight.
    pub fn prepare_create(&mut self, entity: E) -> Result<E, ConsoleError> {
        if self.pending.is_some() {
            return Err(self.reject(ConsoleError::Busy));
        }
        if entity.id().is_some() {
            return Err(self.reject(ConsoleError::validation(
                "id",
                "is assigned by the server",
            )));
        }
        if let Err(e) = entity.validate() {
            return Err(self.reject(e.into()));
        }
        self.pending = Some(Mutation::Create);
        self.error = None;
        Ok(entity)
    }

    /// Apply the outcome of a `create` call.
    pub fn complete_create(&mut self, result: Result<E, ConsoleError>) {
        self.pending = None;
        match result {
            Ok(created) => self.merge_row(created),
            Err(e) => self.fail(e),
        }
    }

    pub fn is_selected(&self, id: E::Id) -> bool {
        self.selection.contains(&id)
    }

    /// Add `id` to the multi-row selection, or remove it if present.
    pub fn toggle_selected(&mut self, id: E::Id) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// Selected ids in ascending order.
    pub fn selected_ids(&self) -> Vec<E::Id> {
        self.selection.iter().copied().collect()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Build the batch for a delete call and mark it as in flight.
    ///
    /// Ids are deduplicated and sorted, so the batch does not depend on the
    /// order rows were picked in.
    pub fn prepare_delete(
        &mut self,
        ids: impl IntoIterator<Item = E::Id>,
    ) -> Result<Vec<E::Id>, ConsoleError> {
        if self.pending.is_some() {
            return Err(self.reject(ConsoleError::Busy));
        }
        let batch: Vec<E::Id> = ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        if batch.is_empty() {
            return Err(self.reject(ConsoleError::validation("ids", "no rows selected")));
        }
        self.pending = Some(Mutation::Delete);
        self.error = None;
        Ok(batch)
    }

    /// Apply the outcome of a batch delete. Deletes are all-or-nothing, so a
    /// failure leaves every row in place.
    pub fn complete_delete(&mut self, ids: &[E::Id], result: Result<(), ConsoleError>) {
        self.pending = None;
        match result {
            Ok(()) => {
                if let Some(rows) = &mut self.rows {
                    rows.retain(|row| row.id().is_none_or(|id| !ids.contains(&id)));
                }
                for id in ids {
                    self.selection.remove(id);
                }
                self.reconcile_edit();
            }
            Err(e) => self.fail(e),
        }
    }

    /// Fetch the collection from `api`.
    pub async fn refresh<A: CrudApi<E>>(&mut self, api: &A) -> Result<(), ConsoleError> {
        match api.fetch().await {
            Ok(rows) => {
                tracing::debug!(resource = E::RESOURCE, count = rows.len(), "fetched rows");
                self.replace_rows(rows);
                Ok(())
            }
            Err(e) => {
                self.fail(e.clone());
                Err(e)
            }
        }
    }

    /// Save the row being edited through `api`.
    pub async fn save<A: CrudApi<E>>(&mut self, api: &A) -> Result<(), ConsoleError> {
        let entity = self.prepare_save()?;
        let result = api.update(entity).await;
        let outcome = result.as_ref().map(|_| ()).map_err(|e| e.clone());
        self.complete_save(result);
        outcome
    }

    /// Create `entity` through `api`.
    pub async fn create<A: CrudApi<E>>(&mut self, api: &A, entity: E) -> Result<E, ConsoleError> {
        let entity = self.prepare_create(entity)?;
        let result = api.create(entity).await;
        self.complete_create(result.clone());
        result
    }

    /// Delete `ids` through `api` in one batch.
    pub async fn delete<A: CrudApi<E>>(
        &mut self,
        api: &A,
        ids: impl IntoIterator<Item = E::Id>,
    ) -> Result<(), ConsoleError> {
        let batch = self.prepare_delete(ids)?;
        let result = api.delete(batch.clone()).await;
        self.complete_delete(&batch, result.clone());
        result
    }

    fn refuse_while_pending(&mut self) -> bool {
        if self.pending.is_none() {
            return false;
        }
        self.fail(ConsoleError::Busy);
        true
    }

    fn reject(&mut self, error: ConsoleError) -> ConsoleError {
        self.fail(error.clone());
        error
    }

    /// Replace the row with the same id, or append it.
    fn merge_row(&mut self, entity: E) {
        let rows = self.rows.get_or_insert_with(Vec::new);
        match rows.iter_mut().find(|row| row.id().is_some() && row.id() == entity.id()) {
            Some(row) => *row = entity,
            None => rows.push(entity),
        }
    }

    fn reconcile_edit(&mut self) {
        let GridMode::EditingRow { id, .. } = &self.mode else {
            return;
        };
        let id = *id;
        let position = self
            .rows
            .as_ref()
            .and_then(|rows| rows.iter().position(|row| row.id() == Some(id)));
        match position {
            Some(new_index) => {
                if let GridMode::EditingRow { index, .. } = &mut self.mode {
                    *index = new_index;
                }
            }
            None => self.mode = GridMode::Viewing,
        }
    }
}
