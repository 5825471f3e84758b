use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::model::list::TaskList;
use crate::model::task::{Status, Task, TaskId};

/// Sort key for the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    DueDate,
    Priority,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::DueDate => "due date",
            SortKey::Priority => "priority",
        }
    }
}

/// Case-insensitive substring filter over task names.
///
/// Yields positions in insertion order; the empty query matches everything.
/// The iterator is lazy and cheap to rebuild, so callers re-run it on every
/// keystroke.
pub fn filter_indices<'a>(list: &'a TaskList, query: &str) -> impl Iterator<Item = usize> + 'a {
    let needle = query.to_lowercase();
    list.tasks()
        .iter()
        .enumerate()
        .filter(move |(_, task)| needle.is_empty() || task.name.to_lowercase().contains(&needle))
        .map(|(index, _)| index)
}

/// Order borrowed rows by the given key. The sort is stable, so equal keys
/// keep insertion order (the tie rule for the fixed priority ranking).
pub fn sort_rows(rows: &mut [&Task], key: SortKey) {
    match key {
        SortKey::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::DueDate => rows.sort_by(|a, b| a.due.cmp(&b.due)),
        SortKey::Priority => rows.sort_by_key(|task| task.priority.rank()),
    }
}

/// The whole list ordered by the given key, without touching the model.
pub fn sorted_view(list: &TaskList, key: SortKey) -> Vec<&Task> {
    let mut rows: Vec<&Task> = list.tasks().iter().collect();
    sort_rows(&mut rows, key);
    rows
}

/// All completed tasks, in insertion order
pub fn completed_view(list: &TaskList) -> impl Iterator<Item = &Task> {
    list.tasks()
        .iter()
        .filter(|task| task.status == Status::Completed)
}

/// All pending tasks, in insertion order
pub fn upcoming_view(list: &TaskList) -> impl Iterator<Item = &Task> {
    list.tasks()
        .iter()
        .filter(|task| task.status == Status::Pending)
}

/// Pending tasks whose reminder should fire: reminder set, due at or before
/// `now`, and not in `notified`. Callers record fired ids in `notified` so
/// each task alerts at most once per session.
pub fn due_reminders<'a>(
    list: &'a TaskList,
    now: NaiveDateTime,
    notified: &'a HashSet<TaskId>,
) -> impl Iterator<Item = &'a Task> {
    list.tasks().iter().filter(move |task| {
        task.reminder && task.status == Status::Pending && task.due <= now
            && !notified.contains(&task.id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use crate::ops::task_ops::{add_task, mark_done, remove_all};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn due(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn sample_list() -> TaskList {
        let mut list = TaskList::new();
        add_task(&mut list, "Buy milk", due(3), Priority::Low, false).unwrap();
        add_task(&mut list, "water plants", due(1), Priority::High, false).unwrap();
        add_task(&mut list, "Call the bank", due(2), Priority::Medium, false).unwrap();
        list
    }

    #[test]
    fn empty_filter_matches_all_in_order() {
        let list = sample_list();
        let indices: Vec<usize> = filter_indices(&list, "").collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let list = sample_list();
        let indices: Vec<usize> = filter_indices(&list, "MILK").collect();
        assert_eq!(indices, vec![0]);
        let indices: Vec<usize> = filter_indices(&list, "a").collect();
        assert_eq!(indices, vec![1, 2]);
        let indices: Vec<usize> = filter_indices(&list, "nothing here").collect();
        assert!(indices.is_empty());
    }

    #[test]
    fn filter_is_restartable() {
        let list = sample_list();
        let first: Vec<usize> = filter_indices(&list, "l").collect();
        let second: Vec<usize> = filter_indices(&list, "l").collect();
        assert_eq!(first, second);
    }

    #[test]
    fn sorted_by_name_and_due() {
        let list = sample_list();
        let names: Vec<&str> = sorted_view(&list, SortKey::Name)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Buy milk", "Call the bank", "water plants"]);

        let names: Vec<&str> = sorted_view(&list, SortKey::DueDate)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["water plants", "Call the bank", "Buy milk"]);
    }

    #[test]
    fn priority_sort_is_ranked_and_stable() {
        let mut list = TaskList::new();
        add_task(&mut list, "A", due(1), Priority::Low, false).unwrap();
        add_task(&mut list, "B", due(1), Priority::High, false).unwrap();
        add_task(&mut list, "C", due(1), Priority::Low, false).unwrap();
        add_task(&mut list, "D", due(1), Priority::High, false).unwrap();

        let view = sorted_view(&list, SortKey::Priority);
        let names: Vec<&str> = view.iter().map(|t| t.name.as_str()).collect();
        // High before Low, insertion order within each rank
        assert_eq!(names, vec!["B", "D", "A", "C"]);
        for pair in view.windows(2) {
            assert!(pair[0].priority.rank() <= pair[1].priority.rank());
        }
    }

    #[test]
    fn status_partitions_are_pure() {
        let mut list = sample_list();
        let id = list.tasks()[0].id;
        mark_done(&mut list, id).unwrap();

        let completed: Vec<&str> = completed_view(&list).map(|t| t.name.as_str()).collect();
        let upcoming: Vec<&str> = upcoming_view(&list).map(|t| t.name.as_str()).collect();
        assert_eq!(completed, vec!["Buy milk"]);
        assert_eq!(upcoming, vec!["water plants", "Call the bank"]);
        // The model itself is untouched by the views
        assert_eq!(list.len(), 3);
        assert_eq!(list.position(id), Some(0));
    }

    #[test]
    fn views_are_empty_after_remove_all() {
        let mut list = sample_list();
        remove_all(&mut list);
        assert_eq!(filter_indices(&list, "").count(), 0);
        assert_eq!(sorted_view(&list, SortKey::Priority).len(), 0);
        assert_eq!(completed_view(&list).count(), 0);
        assert_eq!(upcoming_view(&list).count(), 0);
    }

    #[test]
    fn due_reminders_fire_once_for_pending_reminder_tasks() {
        let mut list = TaskList::new();
        let quiet = add_task(&mut list, "no reminder", due(1), Priority::Low, false).unwrap();
        let armed = add_task(&mut list, "with reminder", due(1), Priority::Low, true).unwrap();
        let future = add_task(&mut list, "later", due(20), Priority::Low, true).unwrap();
        let finished = add_task(&mut list, "done", due(1), Priority::Low, true).unwrap();
        mark_done(&mut list, finished).unwrap();

        let mut notified = HashSet::new();
        let now = due(10);
        let ids: Vec<TaskId> = due_reminders(&list, now, &notified)
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![armed]);
        assert!(!ids.contains(&quiet));
        assert!(!ids.contains(&future));

        notified.insert(armed);
        assert_eq!(due_reminders(&list, now, &notified).count(), 0);
    }
}
