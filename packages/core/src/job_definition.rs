//! Job definition entity: the payloads an engine may run, with their
//! defaults.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, require_text};
use crate::grid::{Draft, FieldValue, GridEntity};
use crate::ids::{JobDefinitionId, QueueId};
use crate::parameter::{Parameter, summarize_parameters, validate_parameters};

/// Kind of payload a job definition launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Java,
    Shell,
    Native,
}

impl JobType {
    pub const ALL: [JobType; 3] = [JobType::Java, JobType::Shell, JobType::Native];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Java => "java",
            JobType::Shell => "shell",
            JobType::Native => "native",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shell used to run a shell job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellKind {
    /// Platform default shell.
    #[default]
    Default,
    Powershell,
}

impl ShellKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShellKind::Default => "Default OS shell",
            ShellKind::Powershell => "Powershell",
        }
    }
}

/// Properties that depend on the job type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "job_type", rename_all = "lowercase")]
pub enum JobSpecificProperties {
    Java {
        jar_path: String,
        java_class_name: String,
    },
    Shell {
        #[serde(default)]
        shell: ShellKind,
        command: String,
    },
    Native {
        executable_path: String,
    },
}

impl Default for JobSpecificProperties {
    fn default() -> Self {
        Self::empty(JobType::Java)
    }
}

impl JobSpecificProperties {
    /// Blank properties for `job_type`.
    pub fn empty(job_type: JobType) -> Self {
        match job_type {
            JobType::Java => Self::Java {
                jar_path: String::new(),
                java_class_name: String::new(),
            },
            JobType::Shell => Self::Shell {
                shell: ShellKind::Default,
                command: String::new(),
            },
            JobType::Native => Self::Native {
                executable_path: String::new(),
            },
        }
    }

    pub fn job_type(&self) -> JobType {
        match self {
            Self::Java { .. } => JobType::Java,
            Self::Shell { .. } => JobType::Shell,
            Self::Native { .. } => JobType::Native,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Java {
                jar_path,
                java_class_name,
            } => {
                require_text("properties.jar_path", jar_path)?;
                require_text("properties.java_class_name", java_class_name)
            }
            Self::Shell { command, .. } => require_text("properties.command", command),
            Self::Native { executable_path } => {
                require_text("properties.executable_path", executable_path)
            }
        }
    }

    pub fn summary(&self) -> Vec<String> {
        match self {
            Self::Java {
                jar_path,
                java_class_name,
            } => vec![
                format!("Path to the jar file: {}", jar_path),
                format!("Class to launch: {}", java_class_name),
            ],
            Self::Shell { shell, command } => vec![
                format!("Shell: {}", shell.label()),
                format!("Shell command: {}", command),
            ],
            Self::Native { executable_path } => {
                vec![format!("Path to executable: {}", executable_path)]
            }
        }
    }
}

/// Optional classification tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobTags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword3: Option<String>,
}

impl JobTags {
    /// One line per tag that is set.
    pub fn summary(&self) -> Vec<String> {
        [
            ("Application", &self.application),
            ("Module", &self.module),
            ("Keyword 1", &self.keyword1),
            ("Keyword 2", &self.keyword2),
            ("Keyword 3", &self.keyword3),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| format!("{}: {}", label, v))
        })
        .collect()
    }

    /// Empty strings count as unset.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        Self {
            application: clean(self.application),
            module: clean(self.module),
            keyword1: clean(self.keyword1),
            keyword2: clean(self.keyword2),
            keyword3: clean(self.keyword3),
        }
    }
}

/// A recurring launch of the job definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSchedule {
    /// Standard five-field cron expression.
    pub cron_expression: String,
    /// Queue to submit to instead of the definition's default queue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_id: Option<QueueId>,
}

impl JobSchedule {
    pub fn new(cron_expression: impl Into<String>) -> Self {
        Self {
            cron_expression: cron_expression.into(),
            queue_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("schedules.cron_expression", &self.cron_expression)?;
        let fields = self.cron_expression.split_whitespace().count();
        if fields != 5 {
            return Err(ValidationError::new(
                "schedules.cron_expression",
                format!(
                    "'{}' must have 5 fields, found {}",
                    self.cron_expression, fields
                ),
            ));
        }
        Ok(())
    }
}

pub fn summarize_schedules(schedules: &[JobSchedule]) -> Vec<String> {
    if schedules.is_empty() {
        return Vec::new();
    }
    vec![
        schedules
            .iter()
            .map(|s| s.cron_expression.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    ]
}

/// Definition of a runnable payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDefinition {
    /// Assigned by the server on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<JobDefinitionId>,
    /// Key used to designate the definition in the APIs.
    pub application_name: String,
    #[serde(default)]
    pub description: String,
    /// Queue used when a request does not name one.
    pub queue_id: Option<QueueId>,
    /// Disabled definitions succeed instantly without running.
    pub enabled: bool,
    /// At most one instance running and one waiting at any time.
    pub highlander: bool,
    pub can_be_restarted: bool,
    pub properties: JobSpecificProperties,
    #[serde(default)]
    pub tags: JobTags,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub schedules: Vec<JobSchedule>,
}

impl JobDefinition {
    /// A definition that has not been created yet.
    pub fn new(
        application_name: impl Into<String>,
        queue_id: QueueId,
        properties: JobSpecificProperties,
    ) -> Self {
        Self {
            id: None,
            application_name: application_name.into(),
            description: String::new(),
            queue_id: Some(queue_id),
            enabled: true,
            highlander: false,
            can_be_restarted: true,
            properties,
            tags: JobTags::default(),
            parameters: Vec::new(),
            schedules: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_schedules(mut self, schedules: Vec<JobSchedule>) -> Self {
        self.schedules = schedules;
        self
    }

    pub fn with_tags(mut self, tags: JobTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn job_type(&self) -> JobType {
        self.properties.job_type()
    }
}

/// Editable columns of the job definition grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobDefinitionField {
    ApplicationName,
    Description,
    Queue,
    Enabled,
    Highlander,
    Properties,
    Tags,
    Parameters,
    Schedules,
}

/// Staged job definition fields, including the composite ones edited in
/// dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDefinitionDraft {
    pub application_name: String,
    pub description: String,
    pub queue_id: Option<QueueId>,
    pub enabled: bool,
    pub highlander: bool,
    pub properties: JobSpecificProperties,
    pub tags: JobTags,
    pub parameters: Vec<Parameter>,
    pub schedules: Vec<JobSchedule>,
}

impl Draft for JobDefinitionDraft {
    type Field = JobDefinitionField;

    fn set(&mut self, field: JobDefinitionField, value: FieldValue) -> bool {
        use JobDefinitionField as F;

        match (field, value) {
            (F::ApplicationName, FieldValue::Text(v)) => self.application_name = v,
            (F::Description, FieldValue::Text(v)) => self.description = v,
            (F::Enabled, FieldValue::Flag(v)) => self.enabled = v,
            (F::Highlander, FieldValue::Flag(v)) => self.highlander = v,
            (F::Queue, FieldValue::Choice(None)) => self.queue_id = None,
            (F::Queue, FieldValue::Choice(Some(v))) => match QueueId::parse(&v) {
                Ok(id) => self.queue_id = Some(id),
                Err(_) => return false,
            },
            _ => return false,
        }
        true
    }
}

impl GridEntity for JobDefinition {
    type Id = JobDefinitionId;
    type Draft = JobDefinitionDraft;

    const RESOURCE: &'static str = "jobdefs";

    fn id(&self) -> Option<JobDefinitionId> {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("application_name", &self.application_name)?;
        if self.queue_id.is_none() {
            return Err(ValidationError::required("queue_id"));
        }
        self.properties.validate()?;
        validate_parameters(&self.parameters)?;
        self.schedules.iter().try_for_each(JobSchedule::validate)
    }

    fn to_draft(&self) -> JobDefinitionDraft {
        JobDefinitionDraft {
            application_name: self.application_name.clone(),
            description: self.description.clone(),
            queue_id: self.queue_id,
            enabled: self.enabled,
            highlander: self.highlander,
            properties: self.properties.clone(),
            tags: self.tags.clone(),
            parameters: self.parameters.clone(),
            schedules: self.schedules.clone(),
        }
    }

    fn merge_draft(&self, draft: &JobDefinitionDraft) -> Self {
        Self {
            id: self.id,
            application_name: draft.application_name.clone(),
            description: draft.description.clone(),
            queue_id: draft.queue_id,
            enabled: draft.enabled,
            highlander: draft.highlander,
            can_be_restarted: self.can_be_restarted,
            properties: draft.properties.clone(),
            tags: draft.tags.clone(),
            parameters: draft.parameters.clone(),
            schedules: draft.schedules.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn java() -> JobSpecificProperties {
        JobSpecificProperties::Java {
            jar_path: "payloads/report.jar".into(),
            java_class_name: "com.acme.Report".into(),
        }
    }

    #[test]
    fn properties_summary_depends_on_job_type() {
        assert_eq!(
            java().summary(),
            vec![
                "Path to the jar file: payloads/report.jar".to_string(),
                "Class to launch: com.acme.Report".to_string(),
            ]
        );
        let shell = JobSpecificProperties::Shell {
            shell: ShellKind::Powershell,
            command: "Get-Date".into(),
        };
        assert_eq!(shell.summary()[0], "Shell: Powershell");
        let native = JobSpecificProperties::Native {
            executable_path: "/usr/bin/true".into(),
        };
        assert_eq!(native.summary(), vec!["Path to executable: /usr/bin/true".to_string()]);
    }

    #[test]
    fn tags_summary_skips_unset_slots() {
        let tags = JobTags {
            application: Some("billing".into()),
            keyword2: Some("nightly".into()),
            keyword3: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            tags.summary(),
            vec!["Application: billing".to_string(), "Keyword 2: nightly".to_string()]
        );
        assert_eq!(tags.normalized().keyword3, None);
    }

    #[test]
    fn validation_requires_queue_and_complete_properties() {
        let queue = QueueId::new();
        let mut def = JobDefinition::new("report", queue, java());
        assert!(def.validate().is_ok());

        def.queue_id = None;
        assert_eq!(def.validate().unwrap_err().field, "queue_id");

        let def = JobDefinition::new("report", queue, JobSpecificProperties::empty(JobType::Shell));
        assert_eq!(def.validate().unwrap_err().field, "properties.command");
    }

    #[test]
    fn cron_expressions_need_five_fields() {
        assert!(JobSchedule::new("0 2 * * *").validate().is_ok());
        assert!(JobSchedule::new("0 2 * *").validate().is_err());
        assert_eq!(
            summarize_schedules(&[JobSchedule::new("0 2 * * *"), JobSchedule::new("*/5 * * * *")]),
            vec!["0 2 * * *, */5 * * * *".to_string()]
        );
    }

    #[test]
    fn queue_choice_parses_ids() {
        let queue = QueueId::new();
        let mut draft = JobDefinition::new("report", queue, java()).to_draft();
        let other = QueueId::new();
        assert!(draft.set(JobDefinitionField::Queue, FieldValue::Choice(Some(other.to_string()))));
        assert_eq!(draft.queue_id, Some(other));
        assert!(!draft.set(JobDefinitionField::Queue, FieldValue::Choice(Some("nope".into()))));
        assert_eq!(draft.queue_id, Some(other));
    }

    #[test]
    fn properties_serialize_with_job_type_tag() {
        let value = serde_json::to_value(java()).unwrap();
        assert_eq!(value["job_type"], "java");
        let back: JobSpecificProperties = serde_json::from_value(value).unwrap();
        assert_eq!(back.job_type(), JobType::Java);
    }
}
