use std::collections::HashMap;

use anyhow::Result;
use serde::Deserialize;

use crate::models::*;

use super::TopologyService;

/// Query string for the switch search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Derived read-only views over the switch and port collections. Everything
/// here is recomputed from a fresh read on each call; nothing is cached.
impl TopologyService {
    /// Switches with no parent link
    pub async fn root_switches(&self) -> Result<Vec<Switch>> {
        Ok(self
            .store()
            .list_switches()
            .await?
            .into_iter()
            .filter(|s| s.is_root())
            .collect())
    }

    /// Switches hanging off the given switch's uplink ports
    pub async fn child_switches(&self, switch_id: &str) -> Result<Vec<Switch>> {
        Ok(self
            .store()
            .list_switches()
            .await?
            .into_iter()
            .filter(|s| s.parent_switch_id.as_deref() == Some(switch_id))
            .collect())
    }

    /// Ports of one switch, ordered by port number
    pub async fn ports_of(&self, switch_id: &str) -> Result<Vec<Port>> {
        self.store().list_ports_for_switch(switch_id).await
    }

    /// Resolve a parent switch id to its current display name. A dangling
    /// or absent reference resolves to None, never an error.
    pub async fn parent_switch_name(&self, parent_switch_id: Option<&str>) -> Result<Option<String>> {
        let Some(id) = parent_switch_id else {
            return Ok(None);
        };
        Ok(self.store().get_switch(id).await?.map(|s| s.switch_name))
    }

    /// Dashboard aggregate counts over the full collections
    pub async fn stats(&self) -> Result<TopologyStats> {
        let switches = self.store().list_switches().await?;
        let ports = self.store().list_ports().await?;
        Ok(TopologyStats {
            total_switches: switches.len() as i64,
            total_ports: ports.len() as i64,
            active_ports: ports
                .iter()
                .filter(|p| p.status == PortStatus::Active)
                .count() as i64,
            free_ports: ports
                .iter()
                .filter(|p| p.status == PortStatus::Free)
                .count() as i64,
        })
    }

    /// All switches enriched with derived counts and parent names,
    /// optionally filtered by a search term.
    ///
    /// A switch matches when its own name/location contains the term, or
    /// any of its ports' assignment name/location/device does — so a switch
    /// still surfaces because of who is plugged into it.
    pub async fn switch_views(&self, search: &str) -> Result<Vec<SwitchView>> {
        let switches = self.store().list_switches().await?;
        let ports = self.store().list_ports().await?;

        let names: HashMap<&str, &str> = switches
            .iter()
            .map(|s| (s.id.as_str(), s.switch_name.as_str()))
            .collect();
        let mut child_counts: HashMap<&str, i32> = HashMap::new();
        for s in &switches {
            if let Some(parent_id) = s.parent_switch_id.as_deref() {
                *child_counts.entry(parent_id).or_default() += 1;
            }
        }

        let mut ports_by_switch: HashMap<&str, Vec<&Port>> = HashMap::new();
        for p in &ports {
            ports_by_switch.entry(p.switch_id.as_str()).or_default().push(p);
        }

        let term = search.trim().to_lowercase();
        let mut views = Vec::new();
        for switch in &switches {
            let own_ports = ports_by_switch
                .get(switch.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            if !term.is_empty() && !switch_matches(switch, own_ports, &term) {
                continue;
            }
            views.push(SwitchView {
                parent_switch_name: switch
                    .parent_switch_id
                    .as_deref()
                    .and_then(|id| names.get(id).map(|n| n.to_string())),
                active_ports: own_ports
                    .iter()
                    .filter(|p| p.status == PortStatus::Active)
                    .count() as i32,
                free_ports: own_ports
                    .iter()
                    .filter(|p| p.status == PortStatus::Free)
                    .count() as i32,
                child_count: child_counts.get(switch.id.as_str()).copied().unwrap_or(0),
                switch: switch.clone(),
            });
        }
        Ok(views)
    }

    /// One switch enriched with its derived counts, or None if unknown
    pub async fn switch_view(&self, id: &str) -> Result<Option<SwitchView>> {
        let Some(switch) = self.store().get_switch(id).await? else {
            return Ok(None);
        };
        let ports = self.ports_of(id).await?;
        let child_count = self.child_switches(id).await?.len() as i32;
        let parent_switch_name = self
            .parent_switch_name(switch.parent_switch_id.as_deref())
            .await?;
        Ok(Some(SwitchView {
            parent_switch_name,
            active_ports: ports
                .iter()
                .filter(|p| p.status == PortStatus::Active)
                .count() as i32,
            free_ports: ports
                .iter()
                .filter(|p| p.status == PortStatus::Free)
                .count() as i32,
            child_count,
            switch,
        }))
    }
}

/// Case-insensitive substring match over a switch and its ports' assignment
/// metadata. `term` must already be lowercased.
fn switch_matches(switch: &Switch, ports: &[&Port], term: &str) -> bool {
    if switch.switch_name.to_lowercase().contains(term)
        || switch.location.to_lowercase().contains(term)
    {
        return true;
    }
    ports.iter().any(|p| {
        field_matches(&p.assign_name, term)
            || field_matches(&p.user_location, term)
            || field_matches(&p.device_name, term)
    })
}

fn field_matches(field: &Option<String>, term: &str) -> bool {
    field
        .as_deref()
        .is_some_and(|v| v.to_lowercase().contains(term))
}
