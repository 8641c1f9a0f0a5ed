use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a port slot: Uplink exactly while a switch hangs off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortRole {
    Access,
    Uplink,
}

/// Port assignment state.
///
/// Issue and Disabled are manual states: valid values the engine preserves
/// but never produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortStatus {
    Free,
    Active,
    Issue,
    Disabled,
}

/// What a port is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssignType {
    User,
    Location,
    Switch,
}

/// Port represents one physical port slot on a switch.
///
/// Ports are created in a batch of exactly `total_ports` entries alongside
/// their owning switch and only destroyed when it is deleted. The
/// status/role/assignment fields change as one atomic unit on assign and
/// unassign: a port is Free iff it is unassigned iff its role is Access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub id: String,
    pub switch_id: String,
    pub port_number: i32,
    pub port_role: PortRole,
    pub status: PortStatus,
    pub assign_type: Option<AssignType>,
    pub assign_id: Option<String>,
    pub assign_name: Option<String>,
    pub user_location: Option<String>,
    pub device_name: Option<String>,
    #[serde(default)]
    pub remarks: String,
    pub last_updated: DateTime<Utc>,
}

impl Port {
    /// A fresh unassigned port slot for the given switch.
    pub fn fresh(switch_id: &str, port_number: i32, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            switch_id: switch_id.to_string(),
            port_number,
            port_role: PortRole::Access,
            status: PortStatus::Free,
            assign_type: None,
            assign_id: None,
            assign_name: None,
            user_location: None,
            device_name: None,
            remarks: String::new(),
            last_updated: now,
        }
    }

    /// Clear every assignment field back to the Free/Access defaults.
    pub fn clear_assignment(&mut self, now: DateTime<Utc>) {
        self.port_role = PortRole::Access;
        self.status = PortStatus::Free;
        self.assign_type = None;
        self.assign_id = None;
        self.assign_name = None;
        self.user_location = None;
        self.device_name = None;
        self.remarks.clear();
        self.last_updated = now;
    }
}

/// AssignPortRequest for assigning a free port to a user, location or switch
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPortRequest {
    pub assign_type: AssignType,
    pub assign_name: String,
    #[serde(default)]
    pub user_location: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// EditPortAssignmentRequest for updating display fields of an active port
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPortAssignmentRequest {
    pub assign_name: String,
    #[serde(default)]
    pub user_location: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}
