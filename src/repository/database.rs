use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PooledConnection};

use crate::config::Config;
use crate::errors::RepositoryError;
use crate::models::todo::{NewTodo, Todo};
use crate::repository::schema::todos;
use crate::repository::TodoRepository;

type DBPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Clone)]
pub struct Database {
    pool: DBPool,
}

impl Database {
    pub fn new(config: &Config) -> Result<Self, RepositoryError> {
        let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
        let pool: DBPool = r2d2::Pool::builder()
            .max_size(config.pool_size)
            .build(manager)
            .map_err(RepositoryError::Pool)?;
        Ok(Database { pool })
    }

    fn connection(
        &self,
    ) -> Result<PooledConnection<ConnectionManager<PgConnection>>, RepositoryError> {
        self.pool.get().map_err(RepositoryError::Connection)
    }
}

impl TodoRepository for Database {
    fn list_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        let todos = todos::table
            .order(todos::id)
            .load::<Todo>(&mut self.connection()?)?;
        Ok(todos)
    }

    fn get_by_id(&self, todo_id: i32) -> Result<Option<Todo>, RepositoryError> {
        let todo = todos::table
            .find(todo_id)
            .first::<Todo>(&mut self.connection()?)
            .optional()?;
        Ok(todo)
    }

    fn list_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Todo>, RepositoryError> {
        let todos = todos::table
            .filter(todos::expiry_date.ge(start))
            .filter(todos::expiry_date.le(end))
            .filter(todos::is_done.eq(false))
            .order(todos::expiry_date)
            .load::<Todo>(&mut self.connection()?)?;
        Ok(todos)
    }

    fn add(&self, todo: NewTodo) -> Result<Todo, RepositoryError> {
        let todo = diesel::insert_into(todos::table)
            .values(&todo)
            .get_result::<Todo>(&mut self.connection()?)?;
        Ok(todo)
    }

    fn update(&self, todo: &Todo) -> Result<(), RepositoryError> {
        diesel::update(todo)
            .set(todo)
            .execute(&mut self.connection()?)?;
        Ok(())
    }

    fn remove(&self, todo_id: i32) -> Result<(), RepositoryError> {
        diesel::delete(todos::table.find(todo_id)).execute(&mut self.connection()?)?;
        Ok(())
    }
}
