use chrono::NaiveDateTime;

use crate::errors::RepositoryError;
use crate::models::todo::{NewTodo, Todo};

pub mod database;
pub mod memory;
pub mod schema;

/// Storage of todo rows. Implementations are synchronous; the HTTP layer moves
/// calls onto the blocking pool.
#[cfg_attr(test, mockall::automock)]
pub trait TodoRepository: Send + Sync {
    fn list_all(&self) -> Result<Vec<Todo>, RepositoryError>;

    /// `Ok(None)` when no row has this id.
    fn get_by_id(&self, id: i32) -> Result<Option<Todo>, RepositoryError>;

    /// Todos that are not done and expire within `[start, end]`, both ends included.
    fn list_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Todo>, RepositoryError>;

    /// Stores the todo under a fresh id and returns the stored row.
    fn add(&self, todo: NewTodo) -> Result<Todo, RepositoryError>;

    /// Replaces every mutable column of the row with `todo.id`. The row must exist.
    fn update(&self, todo: &Todo) -> Result<(), RepositoryError>;

    /// Deletes the row if present.
    fn remove(&self, id: i32) -> Result<(), RepositoryError>;
}
