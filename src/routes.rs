use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::{Contact, ContactRequest, ListQuery, Outcome, UpdateResponse};
use crate::store::{NewContact, Page};
use crate::AppState;

/// Contact routes. `/contacts/` is canonical; the bare form is accepted too.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/", get(list_contacts).post(create_contact))
        .route(
            "/contacts/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}

async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.store.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}

async fn create_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<Contact>, ApiError> {
    let new_contact = NewContact::from(payload);
    let row = state.store.create(&new_contact).await?;
    tracing::info!(id = row.id, "contact created");
    Ok(Json(Contact::from(row)))
}

async fn list_contacts(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let page = Page::from(params);
    let rows = state.store.list(page).await?;
    tracing::debug!(skip = page.skip, limit = page.limit, count = rows.len(), "contacts listed");
    Ok(Json(rows.into_iter().map(Contact::from).collect()))
}

async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Option<Contact>>, ApiError> {
    let row = state.store.get(id).await?;
    tracing::debug!(id, found = row.is_some(), "contact fetched");
    Ok(Json(row.map(Contact::from)))
}

async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let new_contact = NewContact::from(payload);
    match state.store.update(id, &new_contact).await? {
        Some(row) => {
            tracing::info!(id, "contact updated");
            Ok(Json(UpdateResponse::Updated(Contact::from(row))))
        }
        None => {
            tracing::debug!(id, "update of missing contact");
            Ok(Json(UpdateResponse::Missing(Outcome::not_found())))
        }
    }
}

async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Outcome>, ApiError> {
    if state.store.delete(id).await? {
        tracing::info!(id, "contact deleted");
        Ok(Json(Outcome::deleted()))
    } else {
        tracing::debug!(id, "delete of missing contact");
        Ok(Json(Outcome::not_found()))
    }
}
