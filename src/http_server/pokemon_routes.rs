//! Pokémon HTTP Routes
//!
//! Listing, lookup, categories, random sampling, update and create over the
//! shared in-memory dataset.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::store::coerce::{is_present, number_value, to_key, to_number};
use crate::store::record::{ID_FIELD, NAME_FIELD, TYPE_FIELD};
use crate::store::{normalize_types, Dataset, Record, RecordFilter, StoreError};

use super::body::{read_fields, BodyEncoding, BodyError};
use super::errors::{ApiError, ApiResult};
use super::query::QueryParams;
use super::response::{write_head_only, write_json};
use super::routes::{not_found, Verb};

const CONTENT_TYPE_MESSAGE: &str =
    "Content-Type must be application/json or application/x-www-form-urlencoded.";

// ==================
// Shared State
// ==================

/// Dataset shared across handlers
pub struct PokemonState {
    dataset: RwLock<Dataset>,
    max_body_bytes: usize,
}

impl PokemonState {
    pub fn new(dataset: Dataset, max_body_bytes: usize) -> Self {
        Self {
            dataset: RwLock::new(dataset),
            max_body_bytes,
        }
    }

    pub fn read(&self) -> ApiResult<RwLockReadGuard<'_, Dataset>> {
        self.dataset
            .read()
            .map_err(|_| ApiError::from(StoreError::LockPoisoned))
    }

    pub fn write(&self) -> ApiResult<RwLockWriteGuard<'_, Dataset>> {
        self.dataset
            .write()
            .map_err(|_| ApiError::from(StoreError::LockPoisoned))
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub count: usize,
    pub offset: Value,
    pub limit: Value,
    pub data: Vec<Record>,
}

#[derive(Debug, Serialize)]
pub struct TypesResponse {
    pub count: usize,
    pub types: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SampleResponse {
    pub count: usize,
    pub data: Vec<Record>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub data: Record,
}

// ==================
// Pokémon Routes
// ==================

/// Create Pokémon routes
pub fn pokemon_routes(state: Arc<PokemonState>) -> Router {
    Router::new()
        .route("/pokemon", any(list_endpoint))
        .route("/pokemon/by", any(lookup_endpoint))
        .route("/pokemon/random", any(random_endpoint))
        .route("/pokemon/update", any(update_endpoint))
        .route("/pokemon/add", any(create_endpoint))
        .route("/types", any(types_endpoint))
        .with_state(state)
}

// ==================
// Method Dispatch
// ==================

async fn list_endpoint(
    State(state): State<Arc<PokemonState>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    match Verb::classify(&method) {
        Verb::Get => list_pokemon(&state, &QueryParams::parse(query.as_deref())).into_response(),
        Verb::Head => write_head_only(StatusCode::OK),
        _ => not_found(&method),
    }
}

async fn lookup_endpoint(
    State(state): State<Arc<PokemonState>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    match Verb::classify(&method) {
        Verb::Get => lookup_pokemon(&state, &QueryParams::parse(query.as_deref())).into_response(),
        // HEAD answers 200 without validating the lookup
        Verb::Head => write_head_only(StatusCode::OK),
        _ => not_found(&method),
    }
}

async fn types_endpoint(State(state): State<Arc<PokemonState>>, method: Method) -> Response {
    match Verb::classify(&method) {
        Verb::Get => list_types(&state).into_response(),
        Verb::Head => write_head_only(StatusCode::OK),
        _ => not_found(&method),
    }
}

async fn random_endpoint(
    State(state): State<Arc<PokemonState>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    match Verb::classify(&method) {
        Verb::Get => {
            random_pokemon(&state, &QueryParams::parse(query.as_deref())).into_response()
        }
        Verb::Head => write_head_only(StatusCode::OK),
        _ => not_found(&method),
    }
}

async fn update_endpoint(
    State(state): State<Arc<PokemonState>>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Response {
    match Verb::classify(&method) {
        Verb::Post => update_pokemon(&state, &headers, body).await.into_response(),
        _ => not_found(&method),
    }
}

async fn create_endpoint(
    State(state): State<Arc<PokemonState>>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Response {
    match Verb::classify(&method) {
        Verb::Post => create_pokemon(&state, &headers, body).await.into_response(),
        _ => not_found(&method),
    }
}

// ==================
// Read Handlers
// ==================

/// Filter by category and name, count, then window by offset/limit
fn list_pokemon(state: &PokemonState, params: &QueryParams) -> ApiResult<Response> {
    let filter = RecordFilter {
        category: params.non_empty("type"),
        search: params.non_empty("search"),
    };
    let offset = params.offset();
    let limit = params.limit();

    let page = state.read()?.page(&filter, offset, limit);

    Ok(write_json(
        StatusCode::OK,
        &ListResponse {
            count: page.count,
            offset: number_value(offset).unwrap_or(Value::Null),
            limit: number_value(limit).unwrap_or(Value::Null),
            data: page.data,
        },
    ))
}

/// Find one record by `id`, or by `name` when no id is given
fn lookup_pokemon(state: &PokemonState, params: &QueryParams) -> ApiResult<Response> {
    let id = params.get("id");
    let name = params.non_empty("name");

    let dataset = state.read()?;
    let found = match (id, name) {
        (Some(id), _) => dataset.find_by_id(&id),
        (None, Some(name)) => dataset.find_by_name(&name),
        (None, None) => return Err(ApiError::bad_request("Provide id or name")),
    };

    found
        .map(|record| write_json(StatusCode::OK, record))
        .ok_or_else(|| ApiError::not_found("Not found"))
}

fn list_types(state: &PokemonState) -> ApiResult<Response> {
    let types = state.read()?.distinct_types();
    Ok(write_json(
        StatusCode::OK,
        &TypesResponse {
            count: types.len(),
            types,
        },
    ))
}

fn random_pokemon(state: &PokemonState, params: &QueryParams) -> ApiResult<Response> {
    let size = params.sample_size();
    let data = state.read()?.sample(size, &mut rand::thread_rng());
    Ok(write_json(
        StatusCode::OK,
        &SampleResponse {
            count: data.len(),
            data,
        },
    ))
}

// ==================
// Mutation Handlers
// ==================

/// Partial update of the record named by `id` in the body
async fn update_pokemon(
    state: &PokemonState,
    headers: &HeaderMap,
    body: Body,
) -> ApiResult<Response> {
    let encoding = BodyEncoding::sniff(headers).ok_or_else(|| {
        tracing::debug!("update rejected: unsupported content type");
        ApiError::bad_request(CONTENT_TYPE_MESSAGE)
    })?;

    let mut updates = match read_fields(encoding, body, state.max_body_bytes).await {
        Ok(fields) => fields,
        Err(BodyError::Read(reason)) => {
            tracing::debug!(%reason, "update rejected: body read failed");
            return Err(ApiError::bad_request("Unable to read request body :("));
        }
        Err(BodyError::Decode(reason)) => {
            tracing::debug!(%reason, "update rejected: body did not parse");
            return Err(ApiError::bad_request(
                "Body could not be parsed as valid JSON/urlencoded.",
            ));
        }
    };

    let id = match updates.remove(ID_FIELD) {
        Some(value) if is_present(&value) && !to_key(&value).trim().is_empty() => to_key(&value),
        _ => return Err(ApiError::bad_request("Missing required field: id")),
    };

    // Check and mutate under one write lock
    let mut dataset = state.write()?;
    if !dataset.contains_id(&id) {
        return Err(ApiError::not_found("No Pokémon found with that id :("));
    }
    if updates.is_empty() {
        return Err(ApiError::bad_request(
            "Provide at least one field to update besides the id.",
        ));
    }

    let fields: Vec<String> = updates.keys().cloned().collect();
    dataset.merge(&id, updates)?;
    tracing::info!(%id, ?fields, "pokemon updated");

    Ok(write_head_only(StatusCode::NO_CONTENT))
}

/// Create a record from `id`, `name` and optional `type`
async fn create_pokemon(
    state: &PokemonState,
    headers: &HeaderMap,
    body: Body,
) -> ApiResult<Response> {
    let encoding = BodyEncoding::sniff(headers).ok_or_else(|| {
        tracing::debug!("create rejected: unsupported content type");
        ApiError::bad_request(CONTENT_TYPE_MESSAGE)
    })?;

    let fields = read_fields(encoding, body, state.max_body_bytes)
        .await
        .map_err(|err| {
            tracing::debug!(error = %err, "create rejected");
            ApiError::bad_request("Unable to read request body.")
        })?;

    let raw_id = fields.get(ID_FIELD).filter(|v| is_present(v));
    let name = fields
        .get(NAME_FIELD)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("");
    let raw_id = match raw_id {
        Some(raw_id) if !name.is_empty() => raw_id,
        _ => return Err(ApiError::bad_request("Missing required fields: id and name")),
    };

    let id = to_number(raw_id)
        .filter(|n| n.is_finite())
        .and_then(number_value)
        .ok_or_else(|| ApiError::bad_request("Field 'id' must be a number."))?;

    let types = fields.get(TYPE_FIELD).map(normalize_types).unwrap_or_default();
    let record = Record::new(id, name).with_types(types);

    let created = {
        let mut dataset = state.write()?;
        match dataset.insert(record) {
            Ok(created) => created.clone(),
            Err(StoreError::DuplicateId(id)) => {
                tracing::debug!(%id, "create rejected: duplicate id");
                return Err(ApiError::bad_request(
                    "A Pokémon with that id already exists.",
                ));
            }
            Err(err) => return Err(err.into()),
        }
    };
    tracing::info!(id = ?created.id_key(), name = ?created.name(), "pokemon created");

    Ok(write_json(
        StatusCode::CREATED,
        &CreatedResponse {
            message: "Pokémon created successfully!",
            data: created,
        },
    ))
}
