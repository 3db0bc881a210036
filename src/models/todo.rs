use chrono::{DateTime, Local, NaiveDateTime};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Queryable, AsChangeset, Identifiable)]
#[diesel(table_name = crate::repository::schema::todos)]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub expiry_date: NaiveDateTime,
    pub percent_complete: i32,
    pub is_done: bool,
}

/// A todo that has not been stored yet. `percent_complete` is left to the
/// store default.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = crate::repository::schema::todos)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub expiry_date: NaiveDateTime,
    pub is_done: bool,
}

/// Body of `POST /todos/create` and `PUT /todos/update/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TodoRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters."),
        custom(function = "not_blank", message = "Title is required.")
    )]
    pub title: String,
    #[validate(length(max = 500, message = "Description cannot be longer than 500 characters."))]
    pub description: Option<String>,
    #[serde(deserialize_with = "local_date_time")]
    pub expiry_date: NaiveDateTime,
}

/// Accepts RFC 3339 timestamps with an offset (converted to server local time)
/// as well as offset-less ones, which are taken as local already.
fn local_date_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if let Ok(moment) = DateTime::parse_from_rfc3339(&value) {
        return Ok(moment.with_timezone(&Local).naive_local());
    }
    value.parse::<NaiveDateTime>().map_err(serde::de::Error::custom)
}

impl From<TodoRequest> for NewTodo {
    fn from(value: TodoRequest) -> Self {
        Self {
            title: value.title,
            description: value.description,
            expiry_date: value.expiry_date,
            is_done: false,
        }
    }
}

impl Todo {
    /// Overwrites the fields a client may edit. Progress, completion and id stay as they are.
    pub fn apply(&mut self, request: TodoRequest) {
        self.title = request.title;
        self.description = request.description;
        self.expiry_date = request.expiry_date;
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
