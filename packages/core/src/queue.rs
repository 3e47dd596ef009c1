//! Queue configuration entity.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, require_text};
use crate::grid::{Draft, FieldValue, GridEntity};
use crate::ids::QueueId;

/// A queue job requests are submitted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    /// Assigned by the server on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<QueueId>,
    pub name: String,
    pub description: String,
    /// Queue used when a request does not name one. At most one per cluster.
    #[serde(default)]
    pub default_queue: bool,
}

impl Queue {
    /// A queue that has not been created yet.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            default_queue: false,
        }
    }

    /// Mark this queue as the default one.
    pub fn as_default(mut self) -> Self {
        self.default_queue = true;
        self
    }

    pub fn with_id(mut self, id: QueueId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Editable columns of the queue grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueField {
    Name,
    Description,
    DefaultQueue,
}

/// Staged queue fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueDraft {
    pub name: String,
    pub description: String,
    pub default_queue: bool,
}

impl Draft for QueueDraft {
    type Field = QueueField;

    fn set(&mut self, field: QueueField, value: FieldValue) -> bool {
        match (field, value) {
            (QueueField::Name, FieldValue::Text(v)) => self.name = v,
            (QueueField::Description, FieldValue::Text(v)) => self.description = v,
            (QueueField::DefaultQueue, FieldValue::Flag(v)) => self.default_queue = v,
            _ => return false,
        }
        true
    }
}

impl GridEntity for Queue {
    type Id = QueueId;
    type Draft = QueueDraft;

    const RESOURCE: &'static str = "queues";

    fn id(&self) -> Option<QueueId> {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)
    }

    fn to_draft(&self) -> QueueDraft {
        QueueDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            default_queue: self.default_queue,
        }
    }

    fn merge_draft(&self, draft: &QueueDraft) -> Self {
        Self {
            id: self.id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            default_queue: draft.default_queue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_description_are_required() {
        assert!(Queue::new("q", "d").validate().is_ok());
        let err = Queue::new("  ", "d").validate().unwrap_err();
        assert_eq!(err.field, "name");
        let err = Queue::new("q", "").validate().unwrap_err();
        assert_eq!(err.field, "description");
    }

    #[test]
    fn draft_rejects_mismatched_values() {
        let mut draft = Queue::new("q", "d").to_draft();
        assert!(draft.set(QueueField::Name, FieldValue::Text("r".into())));
        assert!(!draft.set(QueueField::Name, FieldValue::Flag(true)));
        assert!(draft.set(QueueField::DefaultQueue, FieldValue::Flag(true)));
        assert_eq!(draft.name, "r");
        assert!(draft.default_queue);
    }
}
