use actix_web::http::header;
use actix_web::{delete, error, get, patch, post, put, web, HttpResponse};
use validator::Validate;

use crate::errors::{ApiError, ErrorResponse, ServiceError};
use crate::models::todo::TodoRequest;
use crate::service::todo_service::TodoService;

/// Runs a service call on the blocking pool; the store underneath is synchronous.
async fn run<T, F>(service: web::Data<TodoService>, call: F) -> Result<T, ApiError>
where
    F: FnOnce(&TodoService) -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    let service = service.into_inner();
    Ok(web::block(move || call(service.as_ref())).await??)
}

#[get("/todos")]
pub async fn get_todos(service: web::Data<TodoService>) -> Result<HttpResponse, ApiError> {
    let todos = run(service, |service| service.get_all()).await?;
    tracing::info!(count = todos.len(), "listed todos");
    Ok(HttpResponse::Ok().json(todos))
}

#[get("/todos/id/{id}")]
pub async fn get_todo_by_id(
    service: web::Data<TodoService>,
    id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let todo = run(service, move |service| service.get_by_id(id)).await?;
    tracing::info!(id, "fetched todo");
    Ok(HttpResponse::Ok().json(todo))
}

#[get("/todos/today")]
pub async fn get_todos_due_today(
    service: web::Data<TodoService>,
) -> Result<HttpResponse, ApiError> {
    let todos = run(service, |service| service.get_due_today()).await?;
    tracing::info!(count = todos.len(), "listed todos due today");
    Ok(HttpResponse::Ok().json(todos))
}

#[get("/todos/nextDay")]
pub async fn get_todos_due_next_day(
    service: web::Data<TodoService>,
) -> Result<HttpResponse, ApiError> {
    let todos = run(service, |service| service.get_due_next_day()).await?;
    tracing::info!(count = todos.len(), "listed todos due tomorrow");
    Ok(HttpResponse::Ok().json(todos))
}

#[get("/todos/week")]
pub async fn get_todos_due_this_week(
    service: web::Data<TodoService>,
) -> Result<HttpResponse, ApiError> {
    let todos = run(service, |service| service.get_due_this_week()).await?;
    tracing::info!(count = todos.len(), "listed todos due this week");
    Ok(HttpResponse::Ok().json(todos))
}

#[post("/todos/create")]
pub async fn create_todo(
    service: web::Data<TodoService>,
    new_todo: web::Json<TodoRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = new_todo.into_inner();
    request.validate()?;
    let todo = run(service, move |service| service.create(request)).await?;
    tracing::info!(id = todo.id, "created todo");
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/todos/id/{}", todo.id)))
        .json(todo))
}

#[put("/todos/update/{id}")]
pub async fn update_todo_by_id(
    service: web::Data<TodoService>,
    id: web::Path<i32>,
    updated_todo: web::Json<TodoRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let request = updated_todo.into_inner();
    request.validate()?;
    run(service, move |service| service.update(id, request)).await?;
    tracing::info!(id, "updated todo");
    Ok(HttpResponse::Ok().body(format!("Todo with ID {id} has been updated successfully.")))
}

#[delete("/todos/delete/{id}")]
pub async fn delete_todo_by_id(
    service: web::Data<TodoService>,
    id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    run(service, move |service| service.delete(id)).await?;
    tracing::info!(id, "deleted todo");
    Ok(HttpResponse::Ok().body(format!("Todo with ID {id} has been deleted successfully.")))
}

#[patch("/todos/{id}/percentComplete/{value}")]
pub async fn set_percent_complete(
    service: web::Data<TodoService>,
    path: web::Path<(i32, String)>,
) -> Result<HttpResponse, ApiError> {
    let (id, raw) = path.into_inner();
    let value = match raw.parse::<i32>() {
        Ok(value) if (0..=100).contains(&value) => value,
        _ => return Err(ApiError::PercentOutOfRange(raw)),
    };
    run(service, move |service| service.set_percent_complete(id, value)).await?;
    tracing::info!(id, percent_complete = value, "updated todo progress");
    Ok(HttpResponse::Ok().body("Percent complete has been updated."))
}

#[patch("/todos/{id}/markAsDone")]
pub async fn mark_todo_as_done(
    service: web::Data<TodoService>,
    id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    run(service, move |service| service.mark_done(id)).await?;
    tracing::info!(id, "marked todo as done");
    Ok(HttpResponse::Ok().body(format!("Todo with ID {id} has been marked as done.")))
}

/// Renders body parse failures (missing fields, bad dates) as JSON 400s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        tracing::warn!(error = %message, "rejected malformed todo payload");
        let response = HttpResponse::BadRequest().json(ErrorResponse { error: message });
        error::InternalError::from_response(err, response).into()
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(get_todos)
        .service(get_todo_by_id)
        .service(get_todos_due_today)
        .service(get_todos_due_next_day)
        .service(get_todos_due_this_week)
        .service(create_todo)
        .service(update_todo_by_id)
        .service(delete_todo_by_id)
        .service(set_percent_complete)
        .service(mark_todo_as_done);
}
