//! JNDI resources exposed to running payloads.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, require_text};
use crate::grid::{Draft, FieldValue, GridEntity};
use crate::ids::JndiResourceId;
use crate::parameter::{Parameter, validate_parameters};

/// Who authenticates against the resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JndiAuth {
    #[default]
    Container,
    Application,
}

impl std::fmt::Display for JndiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JndiAuth::Container => write!(f, "container"),
            JndiAuth::Application => write!(f, "application"),
        }
    }
}

/// A named resource bound in the engines' JNDI directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JndiResource {
    /// Assigned by the server on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<JndiResourceId>,
    /// JNDI alias, e.g. `jdbc/main`.
    pub name: String,
    /// Class of the object returned by the factory.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Factory class creating the resource.
    pub factory: String,
    #[serde(default)]
    pub description: String,
    /// Created once and shared by all payloads.
    #[serde(default)]
    pub singleton: bool,
    #[serde(default)]
    pub auth: JndiAuth,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl JndiResource {
    /// A resource that has not been created yet.
    pub fn new(
        name: impl Into<String>,
        resource_type: impl Into<String>,
        factory: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            resource_type: resource_type.into(),
            factory: factory.into(),
            description: String::new(),
            singleton: false,
            auth: JndiAuth::default(),
            parameters: Vec::new(),
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
}

/// Editable columns of the JNDI grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JndiField {
    Name,
    ResourceType,
    Factory,
    Description,
    Singleton,
    Parameters,
}

/// Staged JNDI resource fields. `auth` is not editable inline and is kept
/// from the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JndiResourceDraft {
    pub name: String,
    pub resource_type: String,
    pub factory: String,
    pub description: String,
    pub singleton: bool,
    pub parameters: Vec<Parameter>,
}

impl Draft for JndiResourceDraft {
    type Field = JndiField;

    fn set(&mut self, field: JndiField, value: FieldValue) -> bool {
        match (field, value) {
            (JndiField::Name, FieldValue::Text(v)) => self.name = v,
            (JndiField::ResourceType, FieldValue::Text(v)) => self.resource_type = v,
            (JndiField::Factory, FieldValue::Text(v)) => self.factory = v,
            (JndiField::Description, FieldValue::Text(v)) => self.description = v,
            (JndiField::Singleton, FieldValue::Flag(v)) => self.singleton = v,
            _ => return false,
        }
        true
    }
}

impl GridEntity for JndiResource {
    type Id = JndiResourceId;
    type Draft = JndiResourceDraft;

    const RESOURCE: &'static str = "jndi";

    fn id(&self) -> Option<JndiResourceId> {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("type", &self.resource_type)?;
        require_text("factory", &self.factory)?;
        validate_parameters(&self.parameters)
    }

    fn to_draft(&self) -> JndiResourceDraft {
        JndiResourceDraft {
            name: self.name.clone(),
            resource_type: self.resource_type.clone(),
            factory: self.factory.clone(),
            description: self.description.clone(),
            singleton: self.singleton,
            parameters: self.parameters.clone(),
        }
    }

    fn merge_draft(&self, draft: &JndiResourceDraft) -> Self {
        Self {
            id: self.id,
            name: draft.name.clone(),
            resource_type: draft.resource_type.clone(),
            factory: draft.factory.clone(),
            description: draft.description.clone(),
            singleton: draft.singleton,
            auth: self.auth,
            parameters: draft.parameters.clone(),
        }
    }
}

/// Preset for a common kind of resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JndiResourceTemplate {
    pub key: &'static str,
    pub label: &'static str,
    pub name_hint: &'static str,
    pub resource_type: &'static str,
    pub factory: &'static str,
    pub singleton: bool,
    pub parameters: &'static [(&'static str, &'static str)],
}

impl JndiResourceTemplate {
    /// A new resource pre-filled from this template.
    pub fn instantiate(&self, name: impl Into<String>) -> JndiResource {
        let mut resource = JndiResource::new(name, self.resource_type, self.factory)
            .with_description(self.label)
            .with_parameters(
                self.parameters
                    .iter()
                    .map(|(k, v)| Parameter::new(*k, *v))
                    .collect(),
            );
        resource.singleton = self.singleton;
        resource
    }

    pub fn find(key: &str) -> Option<&'static JndiResourceTemplate> {
        JNDI_TEMPLATES.iter().find(|t| t.key == key)
    }
}

pub const JNDI_TEMPLATES: &[JndiResourceTemplate] = &[
    JndiResourceTemplate {
        key: "file",
        label: "File directory",
        name_hint: "fs/directory",
        resource_type: "java.io.File",
        factory: "com.enioka.jqm.providers.FileFactory",
        singleton: false,
        parameters: &[("PATH", "/tmp")],
    },
    JndiResourceTemplate {
        key: "url",
        label: "URL",
        name_hint: "url/site",
        resource_type: "java.net.URL",
        factory: "com.enioka.jqm.providers.UrlFactory",
        singleton: false,
        parameters: &[("URL", "https://example.com")],
    },
    JndiResourceTemplate {
        key: "jdbc",
        label: "JDBC connection pool",
        name_hint: "jdbc/main",
        resource_type: "javax.sql.DataSource",
        factory: "org.apache.tomcat.jdbc.pool.DataSourceFactory",
        singleton: true,
        parameters: &[
            ("url", "jdbc:postgresql://localhost:5432/db"),
            ("username", "user"),
            ("password", ""),
            ("driverClassName", "org.postgresql.Driver"),
            ("maxActive", "10"),
        ],
    },
    JndiResourceTemplate {
        key: "mail",
        label: "Mail session",
        name_hint: "mail/default",
        resource_type: "javax.mail.Session",
        factory: "com.enioka.jqm.providers.MailSessionFactory",
        singleton: true,
        parameters: &[("smtpServerHost", "localhost"), ("smtpServerPort", "25")],
    },
    JndiResourceTemplate {
        key: "generic",
        label: "Generic resource",
        name_hint: "resource/name",
        resource_type: "",
        factory: "",
        singleton: false,
        parameters: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_prefill_resources() {
        let template = JndiResourceTemplate::find("jdbc").unwrap();
        let resource = template.instantiate("jdbc/main");
        assert_eq!(resource.resource_type, "javax.sql.DataSource");
        assert!(resource.singleton);
        assert_eq!(resource.parameters.len(), 5);
        assert!(resource.validate().is_ok());
    }

    #[test]
    fn generic_template_needs_type_and_factory() {
        let resource = JndiResourceTemplate::find("generic").unwrap().instantiate("x");
        assert_eq!(resource.validate().unwrap_err().field, "type");
    }

    #[test]
    fn merge_keeps_auth() {
        let mut resource = JndiResource::new("a", "t", "f");
        resource.auth = JndiAuth::Application;
        let mut draft = resource.to_draft();
        assert!(draft.set(JndiField::Name, FieldValue::Text("b".into())));
        let merged = resource.merge_draft(&draft);
        assert_eq!(merged.name, "b");
        assert_eq!(merged.auth, JndiAuth::Application);
    }
}
