use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::ApiError;

/// Get a single port by ID
pub async fn get_port(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Port>, ApiError> {
    let port = state
        .topology
        .store()
        .get_port(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("port"))?;
    Ok(Json(port))
}

/// Assign a free port to a user, location or switch
pub async fn assign_port(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AssignPortRequest>,
) -> Result<Json<Port>, ApiError> {
    let port = state.topology.assign_port(&id, &req).await?;
    Ok(Json(port))
}

/// Update the display fields of an already-assigned port
pub async fn edit_port_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<EditPortAssignmentRequest>,
) -> Result<Json<Port>, ApiError> {
    let port = state.topology.edit_port_assignment(&id, &req).await?;
    Ok(Json(port))
}

/// Reset a port back to free/unassigned (idempotent)
pub async fn unassign_port(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Port>, ApiError> {
    let port = state.topology.unassign_port(&id).await?;
    Ok(Json(port))
}
