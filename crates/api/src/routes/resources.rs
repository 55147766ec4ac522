//! Generic CRUD handlers.
//!
//! Each handler is instantiated once per resource type, e.g.
//! `create::<User, S>`. Everything that differs between resources comes from
//! the [`Resource`] implementation.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use stockroom_core::ResourceId;

use crate::codec::{self, Resource};
use crate::db::{DocumentStore, RepositoryError, ResourceRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

fn repository<R: Resource, S: DocumentStore>(state: &AppState<S>) -> ResourceRepository<'_, R, S> {
    ResourceRepository::new(state.store(), state.store_timeout())
}

/// Parse a path identifier. Failure never reaches the store.
fn parse_id<R: Resource>(raw: &str) -> Result<ResourceId> {
    ResourceId::parse(raw).map_err(|e| {
        tracing::debug!(kind = R::KIND, id = raw, error = %e, "Rejected identifier");
        AppError::BadRequest(format!("Invalid {} ID format", R::KIND))
    })
}

/// Create a record.
///
/// `POST /{collection}`
///
/// Any identifier in the body is discarded and the server timestamp is
/// stamped before insertion. Responds 201 with the stored record.
#[tracing::instrument(skip(state, body), fields(kind = R::KIND))]
pub async fn create<R: Resource, S: DocumentStore>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<R>)> {
    let mut record: R = codec::decode(&body)?;
    record.validate()?;
    record.set_id(None);
    record.stamp(codec::now());

    let id = repository::<R, S>(&state)
        .insert(&record)
        .await
        .map_err(|e| AppError::storage(format!("Could not create {}", R::KIND), e))?;
    record.set_id(Some(id));

    tracing::info!(%id, "Created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Fetch a record by identifier.
///
/// `GET /{collection}/{id}`
#[tracing::instrument(skip(state), fields(kind = R::KIND))]
pub async fn read<R: Resource, S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<R>> {
    let id = parse_id::<R>(&id)?;

    match repository::<R, S>(&state).get(id).await {
        Ok(record) => Ok(Json(record)),
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!(
            "The requested {} could not be found",
            R::KIND
        ))),
        Err(e) => Err(AppError::storage(format!("Error retrieving {}", R::KIND), e)),
    }
}

/// Overwrite every field of a record except its identifier.
///
/// `PUT /{collection}/{id}`
///
/// Fields missing from the body, `created_at` included, are written as zero
/// values. Responds 200 with an empty body whether or not a record matched.
#[tracing::instrument(skip(state, body), fields(kind = R::KIND))]
pub async fn update<R: Resource, S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode> {
    let id = parse_id::<R>(&id)?;
    let record: R = codec::decode(&body)?;

    let outcome = repository::<R, S>(&state)
        .replace(id, &record)
        .await
        .map_err(|e| AppError::storage(format!("Failed to update {}", R::KIND), e))?;

    tracing::info!(matched = outcome.matched, modified = outcome.modified, "Updated");
    Ok(StatusCode::OK)
}

/// Delete a record.
///
/// `DELETE /{collection}/{id}`
///
/// Responds 204 whether or not a record matched.
#[tracing::instrument(skip(state), fields(kind = R::KIND))]
pub async fn delete<R: Resource, S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id::<R>(&id)?;

    let deleted = repository::<R, S>(&state)
        .delete(id)
        .await
        .map_err(|e| AppError::storage(format!("Failed to delete {}", R::KIND), e))?;

    tracing::info!(deleted, "Deleted");
    Ok(StatusCode::NO_CONTENT)
}
