//! Pure cell renderers for the editable grid.
//!
//! Each renderer takes the committed value of a column and, when the row is
//! being edited, the staged value from the draft. It returns a [`Cell`]
//! describing what to show; the UI layer turns that into markup.

/// One option of a select cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Row-level action triggered from the actions column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit(usize),
    Delete(usize),
    Save,
    Cancel,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit(_) => "Edit",
            RowAction::Delete(_) => "Delete",
            RowAction::Save => "Save",
            RowAction::Cancel => "Cancel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionButton {
    pub action: RowAction,
    pub enabled: bool,
}

/// What a grid cell displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell<F> {
    Text(String),
    Input {
        field: F,
        value: String,
        required: bool,
    },
    /// Done/blocked icon for a boolean.
    Indicator(bool),
    Toggle {
        field: F,
        checked: bool,
    },
    Select {
        field: F,
        selected: Option<String>,
        options: Vec<SelectOption>,
    },
    /// Read-only summary of a composite value, one entry per line.
    Summary(Vec<String>),
    /// Clickable summary opening the editor dialog for `field`.
    DialogTrigger {
        field: F,
        prompt: String,
        summary: Vec<String>,
    },
    Actions(Vec<ActionButton>),
}

impl<F> Cell<F> {
    /// Read-only form of an editable cell, showing the staged value. Used
    /// while a mutation is in flight so nothing can change the draft.
    pub fn locked(self) -> Self {
        match self {
            Cell::Input { value, .. } => Cell::Text(value),
            Cell::Toggle { checked, .. } => Cell::Indicator(checked),
            Cell::Select {
                selected, options, ..
            } => Cell::Text(
                selected
                    .and_then(|v| options.into_iter().find(|o| o.value == v))
                    .map(|o| o.label)
                    .unwrap_or_default(),
            ),
            Cell::DialogTrigger { summary, .. } => Cell::Summary(summary),
            other => other,
        }
    }
}

/// User interaction with a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellEvent<F> {
    Input(F, String),
    Toggle(F, bool),
    Choose(F, Option<String>),
    OpenDialog(F),
    Action(RowAction),
}

impl<F: Copy> CellEvent<F> {
    /// The draft write carried by this event, if any.
    pub fn field_value(&self) -> Option<(F, crate::grid::FieldValue)> {
        use crate::grid::FieldValue;

        match self {
            CellEvent::Input(field, value) => Some((*field, FieldValue::Text(value.clone()))),
            CellEvent::Toggle(field, value) => Some((*field, FieldValue::Flag(*value))),
            CellEvent::Choose(field, value) => Some((*field, FieldValue::Choice(value.clone()))),
            CellEvent::OpenDialog(_) | CellEvent::Action(_) => None,
        }
    }
}

/// Text input while editing, plain text otherwise.
pub fn render_input_cell<F>(field: F, value: &str, staged: Option<&str>, required: bool) -> Cell<F> {
    match staged {
        Some(staged) => Cell::Input {
            field,
            value: staged.to_string(),
            required,
        },
        None => Cell::Text(value.to_string()),
    }
}

/// Toggle while editing, done/blocked indicator otherwise.
pub fn render_boolean_cell<F>(field: F, value: bool, staged: Option<bool>) -> Cell<F> {
    match staged {
        Some(checked) => Cell::Toggle { field, checked },
        None => Cell::Indicator(value),
    }
}

/// Select among `options` while editing, the selected option's label
/// otherwise. `staged` is `Some(selection)` while the row is edited.
pub fn render_array_cell<F>(
    field: F,
    value: Option<&str>,
    staged: Option<Option<&str>>,
    options: &[SelectOption],
) -> Cell<F> {
    match staged {
        Some(selected) => Cell::Select {
            field,
            selected: selected.map(str::to_string),
            options: options.to_vec(),
        },
        None => Cell::Text(
            value
                .and_then(|v| options.iter().find(|o| o.value == v))
                .map(|o| o.label.clone())
                .unwrap_or_default(),
        ),
    }
}

/// Dialog opener while editing, computed summary otherwise.
pub fn render_dialog_cell<F, T: ?Sized>(
    field: F,
    value: &T,
    staged: Option<&T>,
    prompt: &str,
    summarize: impl Fn(&T) -> Vec<String>,
) -> Cell<F> {
    match staged {
        Some(staged) => Cell::DialogTrigger {
            field,
            prompt: prompt.to_string(),
            summary: summarize(staged),
        },
        None => Cell::Summary(summarize(value)),
    }
}

/// Edit/Delete in view mode, Save/Cancel on the edited row. Save is disabled
/// while a mutation is in flight; other rows cannot be edited meanwhile.
pub fn render_actions_cell<F>(row: usize, editing: Option<usize>, busy: bool) -> Cell<F> {
    let buttons = if editing == Some(row) {
        vec![
            ActionButton {
                action: RowAction::Save,
                enabled: !busy,
            },
            ActionButton {
                action: RowAction::Cancel,
                enabled: true,
            },
        ]
    } else {
        vec![
            ActionButton {
                action: RowAction::Edit(row),
                enabled: !busy,
            },
            ActionButton {
                action: RowAction::Delete(row),
                enabled: !busy,
            },
        ]
    };
    Cell::Actions(buttons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Name,
        Flag,
        Queue,
        Tags,
    }

    #[test]
    fn input_cell_follows_edit_state() {
        assert_eq!(
            render_input_cell(Field::Name, "Q1", None, true),
            Cell::Text("Q1".into())
        );
        assert_eq!(
            render_input_cell(Field::Name, "Q1", Some("Q1-renamed"), true),
            Cell::Input {
                field: Field::Name,
                value: "Q1-renamed".into(),
                required: true
            }
        );
    }

    #[test]
    fn boolean_cell_shows_indicator_or_toggle() {
        assert_eq!(render_boolean_cell(Field::Flag, true, None), Cell::Indicator(true));
        assert_eq!(
            render_boolean_cell(Field::Flag, true, Some(false)),
            Cell::Toggle {
                field: Field::Flag,
                checked: false
            }
        );
    }

    #[test]
    fn array_cell_resolves_label() {
        let options = vec![SelectOption::new("a", "Alpha"), SelectOption::new("b", "Beta")];
        assert_eq!(
            render_array_cell(Field::Queue, Some("b"), None, &options),
            Cell::Text("Beta".into())
        );
        assert_eq!(
            render_array_cell(Field::Queue, Some("missing"), None, &options),
            Cell::Text(String::new())
        );
        let Cell::Select { selected, options: shown, .. } =
            render_array_cell(Field::Queue, Some("b"), Some(Some("a")), &options)
        else {
            panic!("expected select");
        };
        assert_eq!(selected.as_deref(), Some("a"));
        assert_eq!(shown.len(), 2);
    }

    #[test]
    fn dialog_cell_summarizes_staged_value_while_editing() {
        let summarize = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let committed: &[&str] = &["a"];
        let staged: &[&str] = &["a", "b"];
        assert_eq!(
            render_dialog_cell(Field::Tags, committed, None, "Click to edit tags", summarize),
            Cell::Summary(vec!["a".into()])
        );
        assert_eq!(
            render_dialog_cell(Field::Tags, committed, Some(staged), "Click to edit tags", summarize),
            Cell::DialogTrigger {
                field: Field::Tags,
                prompt: "Click to edit tags".into(),
                summary: vec!["a".into(), "b".into()],
            }
        );
    }

    #[test]
    fn locked_cells_show_staged_values_read_only() {
        let options = vec![SelectOption::new("a", "Alpha")];
        assert_eq!(
            render_input_cell(Field::Name, "Q1", Some("Q1-draft"), true).locked(),
            Cell::Text("Q1-draft".into())
        );
        assert_eq!(
            render_boolean_cell(Field::Flag, false, Some(true)).locked(),
            Cell::Indicator(true)
        );
        assert_eq!(
            render_array_cell(Field::Queue, None, Some(Some("a")), &options).locked(),
            Cell::Text("Alpha".into())
        );
        let summarize = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let staged: &[&str] = &["x"];
        assert_eq!(
            render_dialog_cell(Field::Tags, staged, Some(staged), "Edit", summarize).locked(),
            Cell::Summary(vec!["x".into()])
        );
        assert_eq!(
            Cell::<Field>::Text("plain".into()).locked(),
            Cell::Text("plain".into())
        );
    }

    #[test]
    fn actions_cell_switches_buttons() {
        let Cell::<Field>::Actions(view) = render_actions_cell(2, None, false) else {
            panic!("expected actions");
        };
        assert_eq!(
            view.iter().map(|b| b.action).collect::<Vec<_>>(),
            vec![RowAction::Edit(2), RowAction::Delete(2)]
        );

        let Cell::<Field>::Actions(edit) = render_actions_cell(2, Some(2), true) else {
            panic!("expected actions");
        };
        assert_eq!(edit[0].action, RowAction::Save);
        assert!(!edit[0].enabled);
        assert!(edit[1].enabled);
    }
}
