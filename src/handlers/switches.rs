use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::models::*;
use crate::topology::SearchQuery;
use crate::AppState;

use super::{created, ApiError};

/// List all switches, enriched with derived port/child counts. An optional
/// `q` filters by switch name, location, or port assignment metadata.
pub async fn list_switches(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SwitchView>>, ApiError> {
    let views = state.topology.switch_views(&query.q).await?;
    Ok(Json(views))
}

/// Get a single switch by ID, with derived counts
pub async fn get_switch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SwitchView>, ApiError> {
    let view = state
        .topology
        .switch_view(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("switch"))?;
    Ok(Json(view))
}

/// Create a new root switch with its auto-provisioned port batch
pub async fn create_switch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSwitchRequest>,
) -> Result<(StatusCode, Json<Switch>), ApiError> {
    let switch = state.topology.create_switch(&req).await?;
    Ok(created(switch))
}

/// Update a switch's name and location
pub async fn update_switch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSwitchRequest>,
) -> Result<Json<Switch>, ApiError> {
    let switch = state.topology.update_switch(&id, &req).await?;
    Ok(Json(switch))
}

/// Delete a switch (refused while child switches are attached)
pub async fn delete_switch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.topology.delete_switch(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the child switches attached to a switch's uplink ports
pub async fn list_children(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Switch>>, ApiError> {
    let children = state.topology.child_switches(&id).await?;
    Ok(Json(children))
}

/// List a switch's ports, ordered by port number
pub async fn list_ports(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Port>>, ApiError> {
    let ports = state.topology.ports_of(&id).await?;
    Ok(Json(ports))
}

/// Provision a child switch on one of this switch's ports
pub async fn create_child_switch(
    State(state): State<Arc<AppState>>,
    Path((id, port_id)): Path<(String, String)>,
    Json(req): Json<CreateChildSwitchRequest>,
) -> Result<(StatusCode, Json<Switch>), ApiError> {
    let child = state
        .topology
        .create_child_switch(&id, &port_id, &req)
        .await?;
    Ok(created(child))
}

/// Dashboard aggregate counts
pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TopologyStats>, ApiError> {
    let stats = state.topology.stats().await?;
    Ok(Json(stats))
}
