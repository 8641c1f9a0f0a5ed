use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a switch within the topology.
///
/// Informational only: every switch is created as `Access` and no engine
/// operation changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwitchType {
    Core,
    Distribution,
    Access,
}

/// Switch represents one physical or logical network switch.
///
/// Switches form a tree purely through `parent_switch_id` back-references
/// over the flat "switches" collection; there is no in-memory child list.
/// `parent_switch_id` and `parent_port_number` are a single atomic parent
/// link: both null for a root switch, both set for a child. The link is by
/// port *number*, not port id, since numbers are the durable human-facing
/// handle.
///
/// Field names serialize camelCase to stay byte-compatible with exported
/// JSON snapshots of the collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Switch {
    pub id: String,
    pub switch_name: String,
    #[serde(default)]
    pub location: String,
    pub total_ports: i32,
    pub parent_switch_id: Option<String>,
    pub parent_port_number: Option<i32>,
    pub switch_type: SwitchType,
    pub created_at: DateTime<Utc>,
}

impl Switch {
    /// True for switches with no uplink parent.
    pub fn is_root(&self) -> bool {
        self.parent_switch_id.is_none()
    }
}

/// CreateSwitchRequest for creating a new root switch
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSwitchRequest {
    pub switch_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub total_ports: Option<i32>,
}

/// UpdateSwitchRequest — only name and location are mutable post-creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSwitchRequest {
    pub switch_name: String,
    #[serde(default)]
    pub location: String,
}

/// CreateChildSwitchRequest for provisioning a switch off a parent uplink port
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChildSwitchRequest {
    pub switch_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub total_ports: Option<i32>,
}

/// SwitchView is a Switch enriched with derived counts for list responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchView {
    #[serde(flatten)]
    pub switch: Switch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_switch_name: Option<String>,
    pub active_ports: i32,
    pub free_ports: i32,
    pub child_count: i32,
}

/// TopologyStats holds the dashboard aggregate counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyStats {
    pub total_switches: i64,
    pub total_ports: i64,
    pub active_ports: i64,
    pub free_ports: i64,
}
