#![allow(clippy::disallowed_methods)]

use std::sync::Mutex;

use console_core::cells::{Cell, render_actions_cell, render_input_cell};
use console_core::{
    ConsoleError, CrudApi, FieldValue, GridController, GridEntity, GridMode, JndiField,
    JndiResource, JndiResourceId, JobDefinition, JobDefinitionId, JobSchedule,
    JobSpecificProperties, JobTags, Mutation, Parameter, Queue, QueueField, QueueId,
};

/// Entities the recording backend can store.
trait Stored: GridEntity {
    fn assign_id(self) -> Self;
}

impl Stored for Queue {
    fn assign_id(self) -> Self {
        self.with_id(QueueId::new())
    }
}

impl Stored for JobDefinition {
    fn assign_id(mut self) -> Self {
        self.id = Some(JobDefinitionId::new());
        self
    }
}

impl Stored for JndiResource {
    fn assign_id(mut self) -> Self {
        self.id = Some(JndiResourceId::new());
        self
    }
}

/// In-memory backend recording every call it receives.
struct RecordingApi<E: GridEntity> {
    rows: Mutex<Vec<E>>,
    calls: Mutex<Vec<Call<E>>>,
    fail_updates: Mutex<Option<ConsoleError>>,
}

#[derive(Debug, Clone, PartialEq)]
enum Call<E: GridEntity> {
    Fetch,
    Create(E),
    Update(E),
    Delete(Vec<E::Id>),
}

impl<E: Stored> RecordingApi<E> {
    fn with(rows: Vec<E>) -> Self {
        Self {
            rows: Mutex::new(rows),
            calls: Mutex::new(Vec::new()),
            fail_updates: Mutex::new(None),
        }
    }

    fn calls(&self) -> Vec<Call<E>> {
        self.calls.lock().unwrap().clone()
    }

    fn updates(&self) -> Vec<E> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Update(entity) => Some(entity),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call<E>) {
        self.calls.lock().unwrap().push(call);
    }
}

impl<E: Stored> CrudApi<E> for RecordingApi<E> {
    async fn fetch(&self) -> Result<Vec<E>, ConsoleError> {
        self.record(Call::Fetch);
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(&self, draft: E) -> Result<E, ConsoleError> {
        self.record(Call::Create(draft.clone()));
        let created = draft.assign_id();
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, entity: E) -> Result<E, ConsoleError> {
        self.record(Call::Update(entity.clone()));
        if let Some(e) = self.fail_updates.lock().unwrap().clone() {
            return Err(e);
        }
        let mut rows = self.rows.lock().unwrap();
        let stored = rows
            .iter_mut()
            .find(|row| row.id() == entity.id())
            .ok_or_else(|| ConsoleError::NotFound(E::RESOURCE.into()))?;
        *stored = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, ids: Vec<E::Id>) -> Result<(), ConsoleError> {
        self.record(Call::Delete(ids.clone()));
        self.rows
            .lock()
            .unwrap()
            .retain(|row| row.id().is_none_or(|id| !ids.contains(&id)));
        Ok(())
    }
}

fn stored(name: &str) -> Queue {
    Queue::new(name, format!("{} queue", name)).with_id(QueueId::new())
}

async fn loaded<E: Stored>(api: &RecordingApi<E>) -> GridController<E> {
    let mut grid = GridController::new();
    grid.refresh(api).await.unwrap();
    grid
}

#[tokio::test]
async fn rename_and_save_issues_one_update() {
    let q1 = stored("Q1");
    let api = RecordingApi::with(vec![q1.clone()]);
    let mut grid = loaded(&api).await;

    grid.begin_edit(0).unwrap();
    assert!(grid.set_field(QueueField::Name, FieldValue::Text("Q1-renamed".into())));
    grid.save(&api).await.unwrap();

    assert_eq!(
        api.updates(),
        vec![Queue {
            name: "Q1-renamed".into(),
            ..q1.clone()
        }]
    );
    assert_eq!(grid.mode(), &GridMode::Viewing);
    assert_eq!(grid.rows().unwrap()[0].name, "Q1-renamed");
    assert_eq!(
        render_input_cell(QueueField::Name, &grid.rows().unwrap()[0].name, None, true),
        Cell::Text("Q1-renamed".into())
    );
}

#[tokio::test]
async fn missing_required_field_blocks_save() {
    let api = RecordingApi::with(vec![stored("Q1")]);
    let mut grid = loaded(&api).await;

    grid.begin_edit(0).unwrap();
    grid.set_field(QueueField::Description, FieldValue::Text("   ".into()));
    let err = grid.save(&api).await.unwrap_err();

    assert!(matches!(err, ConsoleError::Validation(ref v) if v.field == "description"));
    assert_eq!(api.calls(), vec![Call::Fetch]);
    assert_eq!(grid.editing_index(), Some(0));
    assert_eq!(grid.error(), Some(&err));
    assert!(!grid.is_busy());
}

#[tokio::test]
async fn cancel_restores_committed_values() {
    let api = RecordingApi::with(vec![stored("Q1")]);
    let mut grid = loaded(&api).await;
    let before = grid.rows().unwrap().to_vec();

    grid.begin_edit(0).unwrap();
    grid.set_field(QueueField::Name, FieldValue::Text("changed".into()));
    grid.set_field(QueueField::DefaultQueue, FieldValue::Flag(true));
    grid.cancel();

    assert_eq!(grid.mode(), &GridMode::Viewing);
    assert_eq!(grid.rows().unwrap(), before.as_slice());
    assert_eq!(api.calls(), vec![Call::Fetch]);

    // A new session starts from the committed row, not the discarded draft.
    grid.begin_edit(0).unwrap();
    assert_eq!(grid.draft().unwrap().name, "Q1");
}

#[tokio::test]
async fn editing_another_row_is_last_wins() {
    let api = RecordingApi::with(vec![stored("A"), stored("B"), stored("C")]);
    let mut grid = loaded(&api).await;

    grid.begin_edit(0).unwrap();
    grid.set_field(QueueField::Name, FieldValue::Text("A-draft".into()));
    grid.begin_edit(2).unwrap();

    assert_eq!(grid.editing_index(), Some(2));
    assert_eq!(grid.draft().unwrap().name, "C");
    let editable: Vec<usize> = (0..3).filter(|i| grid.draft_for(*i).is_some()).collect();
    assert_eq!(editable, vec![2]);

    let actions: Vec<_> = (0..3)
        .map(|i| render_actions_cell::<QueueField>(i, grid.editing_index(), grid.is_busy()))
        .collect();
    let save_rows = actions
        .iter()
        .filter(|cell| {
            matches!(cell, Cell::Actions(buttons)
                if buttons.iter().any(|b| b.action == console_core::cells::RowAction::Save))
        })
        .count();
    assert_eq!(save_rows, 1);
}

#[tokio::test]
async fn batch_delete_is_order_independent() {
    let rows: Vec<Queue> = (0..10).map(|i| stored(&format!("Q{}", i))).collect();
    let ids: Vec<QueueId> = rows.iter().filter_map(|q| q.id).collect();
    let api = RecordingApi::with(rows);
    let mut grid = loaded(&api).await;

    for i in [9, 2, 5] {
        grid.toggle_selected(ids[i]);
    }
    let selected = grid.selected_ids();
    grid.delete(&api, selected).await.unwrap();

    let mut expected = vec![ids[2], ids[5], ids[9]];
    expected.sort();
    let deletes: Vec<_> = api
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Delete(_)))
        .collect();
    assert_eq!(deletes, vec![Call::Delete(expected)]);
    assert_eq!(grid.rows().unwrap().len(), 7);
    assert!(grid.selected_ids().is_empty());
}

#[tokio::test]
async fn duplicate_ids_collapse_into_one_batch() {
    let rows = vec![stored("A"), stored("B")];
    let a = rows[0].id.unwrap();
    let api = RecordingApi::with(rows);
    let mut grid = loaded(&api).await;

    grid.delete(&api, [a, a]).await.unwrap();
    assert_eq!(api.calls().last(), Some(&Call::Delete(vec![a])));
}

#[tokio::test]
async fn deleting_the_edited_row_leaves_edit_mode() {
    let rows = vec![stored("A"), stored("B"), stored("C")];
    let a = rows[0].id.unwrap();
    let api = RecordingApi::with(rows);
    let mut grid = loaded(&api).await;

    grid.begin_edit(2).unwrap();
    grid.delete(&api, [a]).await.unwrap();
    // Row C moved up but is still the one being edited.
    assert_eq!(grid.editing_index(), Some(1));
    assert_eq!(grid.draft().unwrap().name, "C");

    let c = grid.rows().unwrap()[1].id.unwrap();
    grid.delete(&api, [c]).await.unwrap();
    assert_eq!(grid.mode(), &GridMode::Viewing);
}

#[tokio::test]
async fn created_entity_gets_an_id() {
    let api = RecordingApi::<Queue>::with(Vec::new());
    let mut grid = loaded(&api).await;

    let created = grid
        .create(&api, Queue::new("batch", "Nightly batch"))
        .await
        .unwrap();

    assert!(created.id.is_some());
    let rows = grid.rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, created.id);
}

#[tokio::test]
async fn create_rejects_incomplete_drafts() {
    let api = RecordingApi::<Queue>::with(Vec::new());
    let mut grid = loaded(&api).await;

    let err = grid.create(&api, Queue::new("", "x")).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(_)));
    assert_eq!(api.calls(), vec![Call::Fetch]);
}

#[tokio::test]
async fn second_save_while_pending_is_rejected() {
    let api = RecordingApi::with(vec![stored("Q1")]);
    let mut grid = loaded(&api).await;

    grid.begin_edit(0).unwrap();
    let first = grid.prepare_save().unwrap();
    assert_eq!(grid.pending(), Some(Mutation::Save));

    assert_eq!(grid.prepare_save(), Err(ConsoleError::Busy));
    assert_eq!(grid.begin_edit(0), Err(ConsoleError::Busy));
    assert!(matches!(
        render_actions_cell::<QueueField>(0, grid.editing_index(), grid.is_busy()),
        Cell::Actions(ref b) if !b[0].enabled
    ));

    let result = api.update(first).await;
    grid.complete_save(result);
    assert_eq!(grid.pending(), None);
    assert_eq!(grid.mode(), &GridMode::Viewing);
    assert_eq!(api.updates().len(), 1);
}

#[tokio::test]
async fn failed_update_keeps_row_in_edit_mode() {
    let api = RecordingApi::with(vec![stored("Q1")]);
    *api.fail_updates.lock().unwrap() = Some(ConsoleError::NotFound("queue Q1".into()));
    let mut grid = loaded(&api).await;

    grid.begin_edit(0).unwrap();
    grid.set_field(QueueField::Name, FieldValue::Text("renamed".into()));
    let err = grid.save(&api).await.unwrap_err();

    assert_eq!(err, ConsoleError::NotFound("queue Q1".into()));
    assert_eq!(grid.editing_index(), Some(0));
    assert_eq!(grid.draft().unwrap().name, "renamed");
    assert_eq!(grid.rows().unwrap()[0].name, "Q1");
    assert_eq!(grid.error(), Some(&err));
    assert!(!grid.is_busy());

    grid.dismiss_error();
    assert!(grid.error().is_none());
}

#[tokio::test]
async fn refresh_keeps_edit_session_on_surviving_row() {
    let rows = vec![stored("A"), stored("B")];
    let b = rows[1].clone();
    let api = RecordingApi::with(rows);
    let mut grid = loaded(&api).await;

    grid.begin_edit(1).unwrap();
    grid.set_field(QueueField::Name, FieldValue::Text("B2".into()));
    grid.replace_rows(vec![b.clone()]);

    assert_eq!(grid.editing_index(), Some(0));
    assert_eq!(grid.draft().unwrap().name, "B2");
    assert_eq!(Queue::RESOURCE, "queues");
}

#[tokio::test]
async fn edits_during_pending_save_are_refused() {
    let api = RecordingApi::with(vec![stored("Q1")]);
    let mut grid = loaded(&api).await;

    grid.begin_edit(0).unwrap();
    let sent = grid.prepare_save().unwrap();

    assert!(!grid.set_field(QueueField::Name, FieldValue::Text("typed-during-save".into())));
    assert_eq!(grid.error(), Some(&ConsoleError::Busy));
    grid.dismiss_error();
    assert!(!grid.update_draft(|d| d.description = "changed-during-save".into()));
    assert_eq!(grid.error(), Some(&ConsoleError::Busy));
    assert_eq!(grid.draft().unwrap().name, "Q1");

    let cells = [render_input_cell(
        QueueField::Name,
        "Q1",
        grid.draft_for(0).map(|d| d.name.as_str()),
        true,
    )];
    let shown: Vec<_> = cells
        .into_iter()
        .map(|cell| if grid.is_busy() { cell.locked() } else { cell })
        .collect();
    assert_eq!(shown, vec![Cell::Text("Q1".into())]);

    let result = api.update(sent).await;
    grid.complete_save(result);
    assert_eq!(grid.mode(), &GridMode::Viewing);
    assert_eq!(grid.rows().unwrap()[0].name, "Q1");
    assert!(!grid.set_field(QueueField::Name, FieldValue::Text("x".into())));
}

#[tokio::test]
async fn edit_session_is_keyed_by_row_id() {
    let rows = vec![stored("A"), stored("B")];
    let b = rows[1].clone();
    let api = RecordingApi::with(rows);
    let mut grid = loaded(&api).await;
    assert_eq!(grid.editing_id(), None);

    grid.begin_edit(1).unwrap();
    assert_eq!(grid.editing_id(), b.id);
    grid.replace_rows(vec![b.clone()]);
    assert_eq!(grid.editing_id(), b.id);

    grid.save(&api).await.unwrap();
    assert_eq!(grid.editing_id(), None);
}

fn report(queue: QueueId) -> JobDefinition {
    JobDefinition::new(
        "report",
        queue,
        JobSpecificProperties::Java {
            jar_path: "payloads/report.jar".into(),
            java_class_name: "com.acme.Report".into(),
        },
    )
    .assign_id()
}

#[tokio::test]
async fn dialog_commit_stages_without_api_call() {
    let queue = QueueId::new();
    let original = report(queue);
    let api = RecordingApi::with(vec![original.clone()]);
    let mut grid = loaded(&api).await;

    grid.begin_edit(0).unwrap();
    let tags = JobTags {
        application: Some("billing".into()),
        ..Default::default()
    };
    let parameters = vec![Parameter::new("mode", "full")];
    let schedules = vec![JobSchedule::new("0 2 * * *")];
    assert!(grid.update_draft(|d| d.tags = tags.clone()));
    assert!(grid.update_draft(|d| d.parameters = parameters.clone()));
    assert!(grid.update_draft(|d| d.schedules = schedules.clone()));

    assert_eq!(api.calls(), vec![Call::Fetch]);
    assert_eq!(grid.editing_index(), Some(0));
    assert_eq!(grid.rows().unwrap()[0], original);

    grid.save(&api).await.unwrap();
    assert_eq!(
        api.updates(),
        vec![JobDefinition {
            tags,
            parameters,
            schedules,
            ..original
        }]
    );
    assert_eq!(grid.mode(), &GridMode::Viewing);
}

#[tokio::test]
async fn invalid_cron_in_draft_blocks_save() {
    let api = RecordingApi::with(vec![report(QueueId::new())]);
    let mut grid = loaded(&api).await;

    grid.begin_edit(0).unwrap();
    grid.update_draft(|d| d.schedules = vec![JobSchedule::new("0 2 * *")]);
    let err = grid.save(&api).await.unwrap_err();

    assert!(
        matches!(err, ConsoleError::Validation(ref v) if v.field == "schedules.cron_expression")
    );
    assert!(api.updates().is_empty());
    assert_eq!(grid.draft().unwrap().schedules[0].cron_expression, "0 2 * *");
}

#[tokio::test]
async fn duplicate_parameter_key_blocks_jndi_save() {
    let resource = JndiResource::new(
        "jdbc/main",
        "javax.sql.DataSource",
        "org.apache.tomcat.jdbc.pool.DataSourceFactory",
    )
    .assign_id();
    let api = RecordingApi::with(vec![resource.clone()]);
    let mut grid = loaded(&api).await;

    grid.begin_edit(0).unwrap();
    grid.update_draft(|d| {
        d.parameters = vec![Parameter::new("url", "a"), Parameter::new("url", "b")]
    });
    let err = grid.save(&api).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(ref v) if v.field == "parameters.key"));
    assert!(api.updates().is_empty());

    grid.update_draft(|d| d.parameters = vec![Parameter::new("url", "a")]);
    assert!(grid.set_field(JndiField::Singleton, FieldValue::Flag(true)));
    grid.save(&api).await.unwrap();
    let saved = &api.updates()[0];
    assert_eq!(saved.parameters, vec![Parameter::new("url", "a")]);
    assert!(saved.singleton);
    assert_eq!(saved.id, resource.id);
}
