use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::sync::Arc;

use crate::errors::ServiceError;
use crate::models::todo::{NewTodo, Todo, TodoRequest};
use crate::repository::TodoRepository;

/// Midnight `from_days` after `today` up to, but excluding, midnight `to_days`
/// after `today`. The end is the last representable instant before that
/// midnight (timestamps are stored with microsecond precision), since the
/// store's range query includes both bounds.
pub fn day_range(today: NaiveDate, from_days: i64, to_days: i64) -> (NaiveDateTime, NaiveDateTime) {
    let midnight = today.and_time(NaiveTime::MIN);
    (
        midnight + Duration::days(from_days),
        midnight + Duration::days(to_days) - Duration::microseconds(1),
    )
}

/// Business rules on top of a [`TodoRepository`].
///
/// Every mutation reads the current row and writes it back in two separate
/// store calls, so concurrent writers to the same id are last-write-wins.
#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub fn get_all(&self) -> Result<Vec<Todo>, ServiceError> {
        Ok(self.repository.list_all()?)
    }

    pub fn get_by_id(&self, id: i32) -> Result<Todo, ServiceError> {
        self.repository
            .get_by_id(id)?
            .ok_or(ServiceError::NotFound(id))
    }

    pub fn get_due_today(&self) -> Result<Vec<Todo>, ServiceError> {
        self.get_due_on(Self::today(), 0, 1)
    }

    pub fn get_due_next_day(&self) -> Result<Vec<Todo>, ServiceError> {
        self.get_due_on(Self::today(), 1, 2)
    }

    pub fn get_due_this_week(&self) -> Result<Vec<Todo>, ServiceError> {
        self.get_due_on(Self::today(), 0, 7)
    }

    /// Open todos due between midnight `from_days` and midnight `to_days` after `today`.
    pub fn get_due_on(
        &self,
        today: NaiveDate,
        from_days: i64,
        to_days: i64,
    ) -> Result<Vec<Todo>, ServiceError> {
        let (start, end) = day_range(today, from_days, to_days);
        tracing::debug!(%start, %end, "listing todos due in range");
        Ok(self.repository.list_in_range(start, end)?)
    }

    pub fn create(&self, request: TodoRequest) -> Result<Todo, ServiceError> {
        let todo = self.repository.add(NewTodo::from(request))?;
        tracing::debug!(id = todo.id, "todo created");
        Ok(todo)
    }

    pub fn update(&self, id: i32, request: TodoRequest) -> Result<(), ServiceError> {
        let mut todo = self.get_by_id(id)?;
        todo.apply(request);
        self.repository.update(&todo)?;
        Ok(())
    }

    pub fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.get_by_id(id)?;
        self.repository.remove(id)?;
        Ok(())
    }

    /// `percent_complete` must already be within `0..=100`.
    pub fn set_percent_complete(&self, id: i32, percent_complete: i32) -> Result<(), ServiceError> {
        let mut todo = self.get_by_id(id)?;
        todo.percent_complete = percent_complete;
        self.repository.update(&todo)?;
        Ok(())
    }

    pub fn mark_done(&self, id: i32) -> Result<(), ServiceError> {
        let mut todo = self.get_by_id(id)?;
        todo.is_done = true;
        self.repository.update(&todo)?;
        Ok(())
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}
