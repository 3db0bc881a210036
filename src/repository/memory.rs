use chrono::NaiveDateTime;
use std::sync::{Mutex, MutexGuard};

use crate::errors::RepositoryError;
use crate::models::todo::{NewTodo, Todo};
use crate::repository::TodoRepository;

#[derive(Debug, Default)]
struct Table {
    last_id: i32,
    rows: Vec<Todo>,
}

/// Process-local todo store. Ids come from a counter that only moves forward,
/// so deleted ids are never handed out again.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    table: Mutex<Table>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Result<MutexGuard<'_, Table>, RepositoryError> {
        self.table.lock().map_err(|_| RepositoryError::Poisoned)
    }
}

impl TodoRepository for MemoryDatabase {
    fn list_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        Ok(self.table()?.rows.clone())
    }

    fn get_by_id(&self, id: i32) -> Result<Option<Todo>, RepositoryError> {
        let table = self.table()?;
        Ok(table.rows.iter().find(|todo| todo.id == id).cloned())
    }

    fn list_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Todo>, RepositoryError> {
        let table = self.table()?;
        let mut todos: Vec<Todo> = table
            .rows
            .iter()
            .filter(|todo| !todo.is_done && todo.expiry_date >= start && todo.expiry_date <= end)
            .cloned()
            .collect();
        todos.sort_by_key(|todo| todo.expiry_date);
        Ok(todos)
    }

    fn add(&self, todo: NewTodo) -> Result<Todo, RepositoryError> {
        let mut table = self.table()?;
        table.last_id += 1;
        let todo = Todo {
            id: table.last_id,
            title: todo.title,
            description: todo.description,
            expiry_date: todo.expiry_date,
            percent_complete: 0,
            is_done: todo.is_done,
        };
        table.rows.push(todo.clone());
        Ok(todo)
    }

    fn update(&self, todo: &Todo) -> Result<(), RepositoryError> {
        let mut table = self.table()?;
        if let Some(existing) = table.rows.iter_mut().find(|t| t.id == todo.id) {
            *existing = todo.clone();
        }
        Ok(())
    }

    fn remove(&self, id: i32) -> Result<(), RepositoryError> {
        let mut table = self.table()?;
        table.rows.retain(|todo| todo.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn day(offset: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::days(offset)
    }

    fn new_todo(title: &str, expiry_date: NaiveDateTime) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            description: None,
            expiry_date,
            is_done: false,
        }
    }

    #[test]
    fn add_assigns_increasing_ids_and_defaults() {
        let db = MemoryDatabase::new();
        let first = db.add(new_todo("first", day(0))).unwrap();
        let second = db.add(new_todo("second", day(1))).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.percent_complete, 0);
        assert!(!first.is_done);
        assert_eq!(db.list_all().unwrap().len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_remove() {
        let db = MemoryDatabase::new();
        let first = db.add(new_todo("first", day(0))).unwrap();
        db.remove(first.id).unwrap();
        let second = db.add(new_todo("second", day(0))).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(db.get_by_id(first.id).unwrap(), None);
    }

    #[test]
    fn remove_of_missing_id_is_a_no_op() {
        let db = MemoryDatabase::new();
        db.add(new_todo("kept", day(0))).unwrap();
        db.remove(99).unwrap();
        assert_eq!(db.list_all().unwrap().len(), 1);
    }

    #[test]
    fn update_replaces_the_stored_row() {
        let db = MemoryDatabase::new();
        let mut todo = db.add(new_todo("before", day(0))).unwrap();
        todo.title = "after".to_string();
        todo.percent_complete = 60;
        todo.is_done = true;
        db.update(&todo).unwrap();
        assert_eq!(db.get_by_id(todo.id).unwrap(), Some(todo));
    }

    #[test]
    fn range_is_inclusive_and_skips_done_todos() {
        let db = MemoryDatabase::new();
        let before = db.add(new_todo("before", day(-1))).unwrap();
        let at_start = db.add(new_todo("at start", day(0))).unwrap();
        let inside = db.add(new_todo("inside", day(0) + Duration::hours(12))).unwrap();
        let at_end = db.add(new_todo("at end", day(1))).unwrap();
        let after = db.add(new_todo("after", day(1) + Duration::seconds(1))).unwrap();
        let mut done = db.add(new_todo("done", day(0) + Duration::hours(1))).unwrap();
        done.is_done = true;
        db.update(&done).unwrap();

        let ids: Vec<i32> = db
            .list_in_range(day(0), day(1))
            .unwrap()
            .iter()
            .map(|todo| todo.id)
            .collect();

        assert_eq!(ids, vec![at_start.id, inside.id, at_end.id]);
        assert!(!ids.contains(&before.id));
        assert!(!ids.contains(&after.id));
        assert!(!ids.contains(&done.id));
    }
}
