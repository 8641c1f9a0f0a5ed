mod views;

pub use views::SearchQuery;

use anyhow::Result;
use chrono::Utc;

use crate::db::{DeleteBlockedError, NotFoundError, Store, ValidationError};
use crate::models::*;

/// TopologyService owns every mutation of the switch/port topology.
///
/// Multi-entity operations (switch + port batch creation, delete cascade,
/// child-switch provisioning) are sequential awaited store calls with no
/// transaction around them; a failure mid-sequence propagates and leaves
/// whatever was already written. Handlers never touch the collections
/// directly.
#[derive(Clone)]
pub struct TopologyService {
    store: Store,
}

impl TopologyService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Normalize a requested port count: anything missing or non-positive
    /// falls back to the 24-port default rather than creating a zero-port
    /// switch.
    fn port_count_or_default(requested: Option<i32>) -> i32 {
        match requested {
            Some(n) if n > 0 => n,
            _ => DEFAULT_PORT_COUNT,
        }
    }

    /// Create a root switch and auto-provision its port batch.
    ///
    /// Ports are numbered 1..=totalPorts, all Free/Access/unassigned.
    pub async fn create_switch(&self, req: &CreateSwitchRequest) -> Result<Switch> {
        let name = req.switch_name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("switch name is required").into());
        }

        let total_ports = Self::port_count_or_default(req.total_ports);
        let now = Utc::now();
        let switch = Switch {
            id: uuid::Uuid::new_v4().to_string(),
            switch_name: name.to_string(),
            location: req.location.trim().to_string(),
            total_ports,
            parent_switch_id: None,
            parent_port_number: None,
            switch_type: SwitchType::Access,
            created_at: now,
        };

        self.store.put_switch(&switch).await?;
        self.provision_ports(&switch.id, total_ports).await?;

        tracing::info!(
            "Created switch '{}' with {} ports",
            switch.switch_name,
            total_ports
        );
        Ok(switch)
    }

    /// Write the fresh port batch for a newly created switch
    async fn provision_ports(&self, switch_id: &str, total_ports: i32) -> Result<()> {
        let now = Utc::now();
        for port_number in 1..=total_ports {
            let port = Port::fresh(switch_id, port_number, now);
            self.store.put_port(&port).await?;
        }
        Ok(())
    }

    /// Update switch name/location. Port count, parent link and type are
    /// immutable post-creation.
    pub async fn update_switch(&self, id: &str, req: &UpdateSwitchRequest) -> Result<Switch> {
        let name = req.switch_name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("switch name is required").into());
        }

        let mut switch = self
            .store
            .get_switch(id)
            .await?
            .ok_or_else(|| NotFoundError::new("Switch", id))?;

        switch.switch_name = name.to_string();
        switch.location = req.location.trim().to_string();
        self.store.put_switch(&switch).await?;
        Ok(switch)
    }

    /// Delete a switch, its port batch, and free its uplink port on the
    /// parent. Refused while any child switch still hangs off this one.
    pub async fn delete_switch(&self, id: &str) -> Result<()> {
        let switch = self
            .store
            .get_switch(id)
            .await?
            .ok_or_else(|| NotFoundError::new("Switch", id))?;

        let child_count = self
            .store
            .list_switches()
            .await?
            .iter()
            .filter(|s| s.parent_switch_id.as_deref() == Some(id))
            .count();
        if child_count > 0 {
            tracing::warn!(
                "Refusing to delete switch '{}': {} child switch(es) attached",
                switch.switch_name,
                child_count
            );
            return Err(DeleteBlockedError {
                switch_name: switch.switch_name,
                child_count,
            }
            .into());
        }

        for port in self.store.list_ports_for_switch(id).await? {
            self.store.delete_port(&port.id).await?;
        }

        // Child deletion frees the parent's uplink port. The parent link is
        // by port number; a dangling link (parent or port already gone) is
        // tolerated silently.
        if let (Some(parent_id), Some(port_number)) =
            (&switch.parent_switch_id, switch.parent_port_number)
        {
            self.free_uplink_port(parent_id, port_number).await?;
        }

        self.store.delete_switch(id).await?;
        tracing::info!("Deleted switch '{}'", switch.switch_name);
        Ok(())
    }

    /// Reset the uplink port a deleted child was attached through
    async fn free_uplink_port(&self, parent_id: &str, port_number: i32) -> Result<()> {
        let parent_ports = self.store.list_ports_for_switch(parent_id).await?;
        if let Some(mut port) = parent_ports
            .into_iter()
            .find(|p| p.port_number == port_number)
        {
            port.clear_assignment(Utc::now());
            self.store.put_port(&port).await?;
        }
        Ok(())
    }

    /// Provision a child switch hanging off a parent's port.
    ///
    /// Three coordinated writes: the child switch, its fresh port batch,
    /// then the parent port's transition to Uplink/Active/Switch-assigned.
    /// The child records the parent's port *number* as its uplink handle.
    /// This is the only path that sets a non-null assignId on a port.
    pub async fn create_child_switch(
        &self,
        parent_switch_id: &str,
        parent_port_id: &str,
        req: &CreateChildSwitchRequest,
    ) -> Result<Switch> {
        let name = req.switch_name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("switch name is required").into());
        }

        let parent = self
            .store
            .get_switch(parent_switch_id)
            .await?
            .ok_or_else(|| NotFoundError::new("Switch", parent_switch_id))?;
        let mut parent_port = self
            .store
            .get_port(parent_port_id)
            .await?
            .ok_or_else(|| NotFoundError::new("Port", parent_port_id))?;
        if parent_port.switch_id != parent.id {
            return Err(ValidationError::new("port does not belong to the given switch").into());
        }

        let total_ports = Self::port_count_or_default(req.total_ports);
        let now = Utc::now();
        let child = Switch {
            id: uuid::Uuid::new_v4().to_string(),
            switch_name: name.to_string(),
            location: req.location.trim().to_string(),
            total_ports,
            parent_switch_id: Some(parent.id.clone()),
            parent_port_number: Some(parent_port.port_number),
            switch_type: SwitchType::Access,
            created_at: now,
        };

        self.store.put_switch(&child).await?;
        self.provision_ports(&child.id, total_ports).await?;

        parent_port.port_role = PortRole::Uplink;
        parent_port.status = PortStatus::Active;
        parent_port.assign_type = Some(AssignType::Switch);
        parent_port.assign_id = Some(child.id.clone());
        parent_port.assign_name = Some(child.switch_name.clone());
        parent_port.user_location = if child.location.is_empty() {
            None
        } else {
            Some(child.location.clone())
        };
        parent_port.device_name = None;
        parent_port.last_updated = Utc::now();
        self.store.put_port(&parent_port).await?;

        tracing::info!(
            "Created child switch '{}' on {} port {}",
            child.switch_name,
            parent.switch_name,
            parent_port.port_number
        );
        Ok(child)
    }

    /// Assign a port to a user, location or switch.
    ///
    /// Callers only offer this for Free ports; an already-Active port goes
    /// through edit_port_assignment instead, and the current status is not
    /// re-checked here. A Switch-type assignment made through this path
    /// does not provision a child switch — that is create_child_switch.
    pub async fn assign_port(&self, port_id: &str, req: &AssignPortRequest) -> Result<Port> {
        let name = req.assign_name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("assignment name is required").into());
        }

        let mut port = self
            .store
            .get_port(port_id)
            .await?
            .ok_or_else(|| NotFoundError::new("Port", port_id))?;

        port.port_role = match req.assign_type {
            AssignType::Switch => PortRole::Uplink,
            _ => PortRole::Access,
        };
        port.status = PortStatus::Active;
        port.assign_type = Some(req.assign_type);
        port.assign_id = None;
        port.assign_name = Some(name.to_string());
        port.user_location = req.user_location.clone();
        port.device_name = req.device_name.clone();
        port.remarks = req.remarks.clone().unwrap_or_default();
        port.last_updated = Utc::now();

        self.store.put_port(&port).await?;
        Ok(port)
    }

    /// Update the display fields of an already-assigned port. Role, status
    /// and assignment type are untouched.
    pub async fn edit_port_assignment(
        &self,
        port_id: &str,
        req: &EditPortAssignmentRequest,
    ) -> Result<Port> {
        let name = req.assign_name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("assignment name is required").into());
        }

        let mut port = self
            .store
            .get_port(port_id)
            .await?
            .ok_or_else(|| NotFoundError::new("Port", port_id))?;

        port.assign_name = Some(name.to_string());
        port.user_location = req.user_location.clone();
        port.device_name = req.device_name.clone();
        port.remarks = req.remarks.clone().unwrap_or_default();
        port.last_updated = Utc::now();

        self.store.put_port(&port).await?;
        Ok(port)
    }

    /// Reset a port to Free/Access/unassigned. Idempotent: unassigning an
    /// already-free port lands on the same state.
    pub async fn unassign_port(&self, port_id: &str) -> Result<Port> {
        let mut port = self
            .store
            .get_port(port_id)
            .await?
            .ok_or_else(|| NotFoundError::new("Port", port_id))?;

        port.clear_assignment(Utc::now());
        self.store.put_port(&port).await?;
        Ok(port)
    }
}
