//! Collection and item handlers shared by every entity.
//!
//! Handlers are generic over the record type; [`entity_router`] mounts them
//! under `/api/<path segment>` with the entity's service as router state.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use keystone_core::{EntityService, Record};
use keystone_domain::CrmError;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{ApiError, Operation};

type Envelope = Json<Value>;

/// Routes for one entity: `/api/<entities>` and `/api/<entities>/{id}`.
pub fn entity_router<R: Record>(service: EntityService<R>) -> Router {
    let collection = format!("/api/{}", R::KIND.path_segment());
    let item = format!("{collection}/{{id}}");

    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(
            &item,
            get(show::<R>).put(update::<R>).patch(update::<R>).delete(destroy::<R>),
        )
        .with_state(service)
}

async fn list<R: Record>(
    State(service): State<EntityService<R>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Envelope, ApiError> {
    let records = service.list_by_params(&params).await.map_err(failed::<R>(Operation::FetchAll))?;
    envelope::<R, _>(Operation::FetchAll, R::KIND.collection_key(), records)
}

async fn show<R: Record>(
    State(service): State<EntityService<R>>,
    Path(id): Path<String>,
) -> Result<Envelope, ApiError> {
    let record = service.get(&id).await.map_err(failed::<R>(Operation::Fetch))?;
    envelope::<R, _>(Operation::Fetch, R::KIND.item_key(), record)
}

async fn create<R: Record>(
    State(service): State<EntityService<R>>,
    payload: Result<Json<R::Input>, JsonRejection>,
) -> Result<(StatusCode, Envelope), ApiError> {
    let Json(input) = payload.map_err(|rejection| ApiError::from_rejection(&rejection))?;
    let record = service.create(input).await.map_err(failed::<R>(Operation::Create))?;
    Ok((StatusCode::CREATED, envelope::<R, _>(Operation::Create, R::KIND.item_key(), record)?))
}

async fn update<R: Record>(
    State(service): State<EntityService<R>>,
    Path(id): Path<String>,
    payload: Result<Json<R::Patch>, JsonRejection>,
) -> Result<Envelope, ApiError> {
    let Json(patch) = payload.map_err(|rejection| ApiError::from_rejection(&rejection))?;
    let record = service.update(&id, patch).await.map_err(failed::<R>(Operation::Update))?;
    envelope::<R, _>(Operation::Update, R::KIND.item_key(), record)
}

async fn destroy<R: Record>(
    State(service): State<EntityService<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete(&id).await.map_err(failed::<R>(Operation::Delete))?;
    Ok(StatusCode::NO_CONTENT)
}

fn failed<R: Record>(op: Operation) -> impl FnOnce(CrmError) -> ApiError {
    move |err| ApiError::from_crm(R::KIND, op, err)
}

/// `{ <key>: payload }`
fn envelope<R: Record, T: Serialize>(
    op: Operation,
    key: &str,
    payload: T,
) -> Result<Envelope, ApiError> {
    let value = serde_json::to_value(payload)
        .map_err(|e| ApiError::from_crm(R::KIND, op, CrmError::Internal(e.to_string())))?;

    let mut body = Map::with_capacity(1);
    body.insert(key.to_string(), value);
    Ok(Json(Value::Object(body)))
}
