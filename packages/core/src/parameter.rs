//! Key/value parameters attached to job definitions and JNDI resources.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, require_text};

/// A single named parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub key: String,
    pub value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Every parameter needs a key, and keys must be unique within the list.
pub fn validate_parameters(parameters: &[Parameter]) -> Result<(), ValidationError> {
    for (i, parameter) in parameters.iter().enumerate() {
        require_text("parameters.key", &parameter.key)?;
        if parameters[..i].iter().any(|p| p.key == parameter.key) {
            return Err(ValidationError::new(
                "parameters.key",
                format!("duplicate key '{}'", parameter.key),
            ));
        }
    }
    Ok(())
}

/// One-line summary, `key: value` pairs joined by commas.
pub fn summarize_parameters(parameters: &[Parameter]) -> Vec<String> {
    if parameters.is_empty() {
        return Vec::new();
    }
    vec![
        parameters
            .iter()
            .map(|p| format!("{}: {}", p.key, p.value))
            .collect::<Vec<_>>()
            .join(", "),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_joins_pairs() {
        let params = vec![Parameter::new("a", "1"), Parameter::new("b", "2")];
        assert_eq!(summarize_parameters(&params), vec!["a: 1, b: 2".to_string()]);
        assert!(summarize_parameters(&[]).is_empty());
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let params = vec![Parameter::new("a", "1"), Parameter::new("a", "2")];
        assert!(validate_parameters(&params).is_err());
        assert!(validate_parameters(&[Parameter::new(" ", "x")]).is_err());
    }
}
