use super::{ApiError, AppState, Authenticated};
use crate::core::{Category, CategoryId, Comment, Ticket, TicketId};
use crate::error::HelpdeskError;
use crate::handlers::{
    CategoryPatchRequest, CategoryRequest, ChangeStatusRequest, CreateCommentRequest,
    CreateTicketRequest, UpdateTicketRequest, categories, comments, tickets,
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

type ApiResult<T> = Result<T, ApiError>;
type Body<T> = Result<Json<T>, JsonRejection>;

// Malformed ids can never match a record
fn ticket_id(raw: &str) -> ApiResult<TicketId> {
    TicketId::parse_str(raw).map_err(|_| HelpdeskError::not_found("Ticket", raw).into())
}

fn category_id(raw: &str) -> ApiResult<CategoryId> {
    CategoryId::parse_str(raw).map_err(|_| HelpdeskError::not_found("Category", raw).into())
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
) -> ApiResult<Json<Vec<Category>>> {
    state
        .run(move |ctx| categories::list_categories(ctx, &identity))
        .await
        .map(Json)
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
    body: Body<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(request) = body?;
    let category = state
        .run(move |ctx| categories::create_category(ctx, &identity, request))
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    let id = category_id(&id)?;
    state
        .run(move |ctx| categories::get_category(ctx, &identity, &id))
        .await
        .map(Json)
}

pub async fn replace_category(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
    body: Body<CategoryRequest>,
) -> ApiResult<Json<Category>> {
    let id = category_id(&id)?;
    let Json(request) = body?;
    state
        .run(move |ctx| categories::replace_category(ctx, &identity, &id, request))
        .await
        .map(Json)
}

pub async fn patch_category(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
    body: Body<CategoryPatchRequest>,
) -> ApiResult<Json<Category>> {
    let id = category_id(&id)?;
    let Json(request) = body?;
    state
        .run(move |ctx| categories::patch_category(ctx, &identity, &id, request))
        .await
        .map(Json)
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = category_id(&id)?;
    state
        .run(move |ctx| categories::delete_category(ctx, &identity, &id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
) -> ApiResult<Json<Vec<Ticket>>> {
    state
        .run(move |ctx| tickets::list_tickets(ctx, &identity))
        .await
        .map(Json)
}

pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
    body: Body<CreateTicketRequest>,
) -> ApiResult<(StatusCode, Json<Ticket>)> {
    let Json(request) = body?;
    let ticket = state
        .run(move |ctx| tickets::create_ticket(ctx, &identity, request))
        .await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
) -> ApiResult<Json<Ticket>> {
    let id = ticket_id(&id)?;
    state
        .run(move |ctx| tickets::get_ticket(ctx, &identity, &id))
        .await
        .map(Json)
}

pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
    body: Body<UpdateTicketRequest>,
) -> ApiResult<Json<Ticket>> {
    let id = ticket_id(&id)?;
    let Json(request) = body?;
    state
        .run(move |ctx| tickets::update_ticket(ctx, &identity, &id, request))
        .await
        .map(Json)
}

pub async fn assign_to_me(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
) -> ApiResult<Json<Ticket>> {
    let id = ticket_id(&id)?;
    state
        .run(move |ctx| tickets::assign_to_me(ctx, &identity, &id))
        .await
        .map(Json)
}

pub async fn change_status(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
    body: Body<ChangeStatusRequest>,
) -> ApiResult<Json<Ticket>> {
    let id = ticket_id(&id)?;
    // A missing or undecodable body is an invalid status, reported after the
    // existence check like any other bad value
    let request = body.map(|Json(request)| request).unwrap_or_default();
    state
        .run(move |ctx| tickets::change_status(ctx, &identity, &id, &request))
        .await
        .map(Json)
}

pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Comment>>> {
    let id = ticket_id(&id)?;
    state
        .run(move |ctx| comments::list_comments(ctx, &identity, &id))
        .await
        .map(Json)
}

pub async fn post_comment(
    State(state): State<Arc<AppState>>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
    body: Body<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let id = ticket_id(&id)?;
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let comment = state
        .run(move |ctx| comments::post_comment(ctx, &identity, &id, request))
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
