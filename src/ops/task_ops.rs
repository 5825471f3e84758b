use chrono::NaiveDateTime;

use crate::model::list::TaskList;
use crate::model::task::{Priority, Status, Task, TaskId};

/// Error type for task operations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task name cannot be empty")]
    EmptyName,
    #[error("no task {0}")]
    NotFound(TaskId),
}

// ---------------------------------------------------------------------------
// Task CRUD
// ---------------------------------------------------------------------------

/// Add a task to the end of the list with status Pending.
/// Returns the assigned id.
pub fn add_task(
    list: &mut TaskList,
    name: &str,
    due: NaiveDateTime,
    priority: Priority,
    reminder: bool,
) -> Result<TaskId, TaskError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TaskError::EmptyName);
    }
    let id = list.allocate_id();
    list.push(Task {
        id,
        name: name.to_string(),
        due,
        status: Status::Pending,
        priority,
        reminder,
    });
    Ok(id)
}

/// Replace a task wholesale: the old record is removed and a new one built
/// from the given fields is appended at the end, keeping the same id.
/// Fields are never merged; the edit form carries no reminder, so the
/// replacement's reminder is always off.
pub fn edit_task(
    list: &mut TaskList,
    id: TaskId,
    name: &str,
    due: NaiveDateTime,
    status: Status,
    priority: Priority,
) -> Result<TaskId, TaskError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TaskError::EmptyName);
    }
    let index = list.position(id).ok_or(TaskError::NotFound(id))?;
    list.remove_at(index);
    list.push(Task {
        id,
        name: name.to_string(),
        due,
        status,
        priority,
        reminder: false,
    });
    Ok(id)
}

/// Delete a task, returning the removed record.
pub fn remove_task(list: &mut TaskList, id: TaskId) -> Result<Task, TaskError> {
    let index = list.position(id).ok_or(TaskError::NotFound(id))?;
    Ok(list.remove_at(index))
}

/// Delete every task. Returns how many were removed.
pub fn remove_all(list: &mut TaskList) -> usize {
    let count = list.len();
    list.clear();
    count
}

/// Mark a task completed. One-way and idempotent: completing a completed
/// task changes nothing.
pub fn mark_done(list: &mut TaskList, id: TaskId) -> Result<(), TaskError> {
    let task = list.get_mut(id).ok_or(TaskError::NotFound(id))?;
    task.status = Status::Completed;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn due(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn add_starts_pending() {
        let mut list = TaskList::new();
        let id = add_task(&mut list, "Buy milk", due(1), Priority::High, false).unwrap();
        let task = list.get(id).unwrap();
        assert_eq!(task.status, Status::Pending);
        assert_eq!(task.name, "Buy milk");
    }

    #[test]
    fn add_rejects_empty_name() {
        let mut list = TaskList::new();
        assert_eq!(
            add_task(&mut list, "", due(1), Priority::Low, false),
            Err(TaskError::EmptyName)
        );
        assert_eq!(
            add_task(&mut list, "   ", due(1), Priority::Low, false),
            Err(TaskError::EmptyName)
        );
        assert!(list.is_empty());
    }

    #[test]
    fn add_trims_name() {
        let mut list = TaskList::new();
        let id = add_task(&mut list, "  Buy milk  ", due(1), Priority::Low, false).unwrap();
        assert_eq!(list.get(id).unwrap().name, "Buy milk");
    }

    #[test]
    fn mark_done_is_idempotent() {
        let mut list = TaskList::new();
        let id = add_task(&mut list, "Buy milk", due(1), Priority::Low, false).unwrap();
        mark_done(&mut list, id).unwrap();
        let once: Vec<Task> = list.tasks().to_vec();
        mark_done(&mut list, id).unwrap();
        assert_eq!(list.tasks(), &once[..]);
        assert_eq!(list.get(id).unwrap().status, Status::Completed);
    }

    #[test]
    fn edit_replaces_instead_of_duplicating() {
        let mut list = TaskList::new();
        let id = add_task(&mut list, "Buy milk", due(1), Priority::High, false).unwrap();
        edit_task(
            &mut list,
            id,
            "Buy bread",
            due(1),
            Status::Pending,
            Priority::Medium,
        )
        .unwrap();
        assert_eq!(list.len(), 1);
        let task = list.get(id).unwrap();
        assert_eq!(task.name, "Buy bread");
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn edit_moves_task_to_end_of_insertion_order() {
        let mut list = TaskList::new();
        let a = add_task(&mut list, "A", due(1), Priority::Low, false).unwrap();
        let b = add_task(&mut list, "B", due(2), Priority::Low, false).unwrap();
        edit_task(&mut list, a, "A2", due(1), Status::Pending, Priority::Low).unwrap();
        assert_eq!(list.position(b), Some(0));
        assert_eq!(list.position(a), Some(1));
    }

    #[test]
    fn edit_drops_reminder() {
        let mut list = TaskList::new();
        let id = add_task(&mut list, "Call home", due(1), Priority::Low, true).unwrap();
        edit_task(
            &mut list,
            id,
            "Call home",
            due(2),
            Status::Pending,
            Priority::Low,
        )
        .unwrap();
        assert!(!list.get(id).unwrap().reminder);
    }

    #[test]
    fn edit_can_set_status_both_ways() {
        let mut list = TaskList::new();
        let id = add_task(&mut list, "Buy milk", due(1), Priority::Low, false).unwrap();
        edit_task(
            &mut list,
            id,
            "Buy milk",
            due(1),
            Status::Completed,
            Priority::Low,
        )
        .unwrap();
        assert_eq!(list.get(id).unwrap().status, Status::Completed);
        edit_task(
            &mut list,
            id,
            "Buy milk",
            due(1),
            Status::Pending,
            Priority::Low,
        )
        .unwrap();
        assert_eq!(list.get(id).unwrap().status, Status::Pending);
    }

    #[test]
    fn remove_returns_the_task() {
        let mut list = TaskList::new();
        let id = add_task(&mut list, "Buy milk", due(1), Priority::Low, false).unwrap();
        let removed = remove_task(&mut list, id).unwrap();
        assert_eq!(removed.name, "Buy milk");
        assert!(list.is_empty());
        assert_eq!(remove_task(&mut list, id), Err(TaskError::NotFound(id)));
    }

    #[test]
    fn remove_all_empties_the_list() {
        let mut list = TaskList::new();
        add_task(&mut list, "A", due(1), Priority::Low, false).unwrap();
        add_task(&mut list, "B", due(2), Priority::Low, false).unwrap();
        assert_eq!(remove_all(&mut list), 2);
        assert!(list.is_empty());
        assert_eq!(remove_all(&mut list), 0);
    }

    #[test]
    fn unknown_id_errors() {
        let mut list = TaskList::new();
        let bogus = TaskId(99);
        assert_eq!(mark_done(&mut list, bogus), Err(TaskError::NotFound(bogus)));
        assert_eq!(
            edit_task(
                &mut list,
                bogus,
                "X",
                due(1),
                Status::Pending,
                Priority::Low
            ),
            Err(TaskError::NotFound(bogus))
        );
    }
}
