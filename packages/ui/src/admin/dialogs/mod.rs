//! Modal editors for composite draft fields and for creating entities.

mod create_jndi;
mod create_job_definition;
mod create_queue;
mod modal;
mod parameters;
mod properties;
mod schedules;
mod tags;

pub use create_jndi::CreateJndiDialog;
pub use create_job_definition::CreateJobDefinitionDialog;
pub use create_queue::CreateQueueDialog;
pub use modal::{DialogActions, Modal};
pub use parameters::ParametersDialog;
pub use properties::{PropertiesDialog, PropertiesForm};
pub use schedules::SchedulesDialog;
pub use tags::TagsDialog;

/// Apply `f` to row `i` of a list being edited. Row events can arrive after
/// the row was removed; those are ignored.
fn edit_row<T>(rows: &mut [T], i: usize, f: impl FnOnce(&mut T)) {
    if let Some(row) = rows.get_mut(i) {
        f(row);
    }
}

/// Remove row `i` if it is still present.
fn remove_row<T>(rows: &mut Vec<T>, i: usize) {
    if i < rows.len() {
        rows.remove(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_row_events_are_ignored() {
        let mut rows = vec!["a".to_string(), "b".to_string()];
        remove_row(&mut rows, 1);
        edit_row(&mut rows, 1, |row| *row = "late".to_string());
        remove_row(&mut rows, 1);
        assert_eq!(rows, vec!["a".to_string()]);

        edit_row(&mut rows, 0, |row| row.push('!'));
        assert_eq!(rows, vec!["a!".to_string()]);
    }
}
