use switchmap::db::{DeleteBlockedError, NotFoundError, Store, ValidationError};
use switchmap::models::*;
use switchmap::topology::TopologyService;

async fn service() -> TopologyService {
    let store = Store::in_memory().await.expect("in-memory store");
    TopologyService::new(store)
}

fn create_req(name: &str, location: &str, total_ports: Option<i32>) -> CreateSwitchRequest {
    CreateSwitchRequest {
        switch_name: name.to_string(),
        location: location.to_string(),
        total_ports,
    }
}

fn child_req(name: &str, location: &str, total_ports: Option<i32>) -> CreateChildSwitchRequest {
    CreateChildSwitchRequest {
        switch_name: name.to_string(),
        location: location.to_string(),
        total_ports,
    }
}

fn assign_user_req(name: &str, location: &str, device: &str) -> AssignPortRequest {
    AssignPortRequest {
        assign_type: AssignType::User,
        assign_name: name.to_string(),
        user_location: Some(location.to_string()),
        device_name: Some(device.to_string()),
        remarks: None,
    }
}

#[tokio::test]
async fn create_switch_provisions_full_port_batch() {
    let svc = service().await;
    let sw = svc
        .create_switch(&create_req("CORE-SW-01", "Server Room", Some(24)))
        .await
        .unwrap();

    assert_eq!(sw.total_ports, 24);
    assert_eq!(sw.switch_type, SwitchType::Access);
    assert!(sw.is_root());

    let ports = svc.ports_of(&sw.id).await.unwrap();
    assert_eq!(ports.len(), 24);

    // Numbers are exactly 1..=24 with no duplicates or gaps, all free.
    let numbers: Vec<i32> = ports.iter().map(|p| p.port_number).collect();
    assert_eq!(numbers, (1..=24).collect::<Vec<i32>>());
    for port in &ports {
        assert_eq!(port.status, PortStatus::Free);
        assert_eq!(port.port_role, PortRole::Access);
        assert!(port.assign_type.is_none());
        assert_eq!(port.switch_id, sw.id);
    }
}

#[tokio::test]
async fn non_positive_port_count_falls_back_to_default() {
    let svc = service().await;

    let sw = svc
        .create_switch(&create_req("SW-A", "", Some(0)))
        .await
        .unwrap();
    assert_eq!(sw.total_ports, 24);
    assert_eq!(svc.ports_of(&sw.id).await.unwrap().len(), 24);

    let sw = svc.create_switch(&create_req("SW-B", "", None)).await.unwrap();
    assert_eq!(sw.total_ports, 24);

    let sw = svc
        .create_switch(&create_req("SW-C", "", Some(-8)))
        .await
        .unwrap();
    assert_eq!(sw.total_ports, 24);
}

#[tokio::test]
async fn create_switch_rejects_empty_name() {
    let svc = service().await;
    let err = svc
        .create_switch(&create_req("   ", "Server Room", Some(8)))
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<ValidationError>().is_some());

    // No partial state was written.
    assert!(svc.store().list_switches().await.unwrap().is_empty());
    assert!(svc.store().list_ports().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_switch_changes_only_name_and_location() {
    let svc = service().await;
    let sw = svc
        .create_switch(&create_req("SW-OLD", "Basement", Some(8)))
        .await
        .unwrap();

    let updated = svc
        .update_switch(
            &sw.id,
            &UpdateSwitchRequest {
                switch_name: "SW-NEW".to_string(),
                location: "Floor 2".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.switch_name, "SW-NEW");
    assert_eq!(updated.location, "Floor 2");
    assert_eq!(updated.total_ports, sw.total_ports);
    assert_eq!(updated.created_at, sw.created_at);
    assert!(updated.is_root());

    let err = svc
        .update_switch(
            &sw.id,
            &UpdateSwitchRequest {
                switch_name: "".to_string(),
                location: "".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<ValidationError>().is_some());

    let err = svc
        .update_switch(
            "missing-id",
            &UpdateSwitchRequest {
                switch_name: "X".to_string(),
                location: "".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<NotFoundError>().is_some());
}

#[tokio::test]
async fn child_switch_uplink_symmetry() {
    let svc = service().await;
    let parent = svc
        .create_switch(&create_req("CORE-SW-01", "Server Room", Some(24)))
        .await
        .unwrap();
    let port5 = svc.ports_of(&parent.id).await.unwrap()[4].clone();
    assert_eq!(port5.port_number, 5);

    let child = svc
        .create_child_switch(&parent.id, &port5.id, &child_req("SW-FLOOR-1", "Floor 1", Some(24)))
        .await
        .unwrap();

    assert_eq!(child.parent_switch_id.as_deref(), Some(parent.id.as_str()));
    assert_eq!(child.parent_port_number, Some(5));
    assert_eq!(svc.ports_of(&child.id).await.unwrap().len(), 24);

    let port5 = svc.store().get_port(&port5.id).await.unwrap().unwrap();
    assert_eq!(port5.status, PortStatus::Active);
    assert_eq!(port5.port_role, PortRole::Uplink);
    assert_eq!(port5.assign_type, Some(AssignType::Switch));
    assert_eq!(port5.assign_id.as_deref(), Some(child.id.as_str()));
    assert_eq!(port5.assign_name.as_deref(), Some("SW-FLOOR-1"));
    assert_eq!(port5.user_location.as_deref(), Some("Floor 1"));
    assert!(port5.device_name.is_none());

    let children = svc.child_switches(&parent.id).await.unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, child.id);

    // The child is not a root; the parent still is.
    let roots = svc.root_switches().await.unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].id, parent.id);
    assert_eq!(
        svc.parent_switch_name(child.parent_switch_id.as_deref())
            .await
            .unwrap()
            .as_deref(),
        Some("CORE-SW-01")
    );
}

#[tokio::test]
async fn child_switch_rejects_foreign_port() {
    let svc = service().await;
    let a = svc.create_switch(&create_req("SW-A", "", Some(4))).await.unwrap();
    let b = svc.create_switch(&create_req("SW-B", "", Some(4))).await.unwrap();
    let b_port = svc.ports_of(&b.id).await.unwrap()[0].clone();

    let err = svc
        .create_child_switch(&a.id, &b_port.id, &child_req("SW-C", "", None))
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<ValidationError>().is_some());
}

#[tokio::test]
async fn assign_port_sets_all_fields_atomically() {
    let svc = service().await;
    let sw = svc
        .create_switch(&create_req("SW-FLOOR-1", "Floor 1", Some(8)))
        .await
        .unwrap();
    let port1 = svc.ports_of(&sw.id).await.unwrap()[0].clone();

    let port = svc
        .assign_port(&port1.id, &assign_user_req("Rakib", "Room 101", "PC-HR-01"))
        .await
        .unwrap();

    assert_eq!(port.status, PortStatus::Active);
    assert_eq!(port.port_role, PortRole::Access);
    assert_eq!(port.assign_type, Some(AssignType::User));
    assert_eq!(port.assign_name.as_deref(), Some("Rakib"));
    assert_eq!(port.user_location.as_deref(), Some("Room 101"));
    assert_eq!(port.device_name.as_deref(), Some("PC-HR-01"));
    // Direct assignment never populates assignId.
    assert!(port.assign_id.is_none());
    assert!(port.last_updated >= port1.last_updated);
}

#[tokio::test]
async fn assign_switch_type_sets_uplink_role_without_creating_child() {
    let svc = service().await;
    let sw = svc.create_switch(&create_req("SW-A", "", Some(4))).await.unwrap();
    let port = svc.ports_of(&sw.id).await.unwrap()[0].clone();

    let port = svc
        .assign_port(
            &port.id,
            &AssignPortRequest {
                assign_type: AssignType::Switch,
                assign_name: "SW-EXTERNAL".to_string(),
                user_location: None,
                device_name: None,
                remarks: Some("tracked elsewhere".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(port.port_role, PortRole::Uplink);
    assert_eq!(port.assign_type, Some(AssignType::Switch));
    assert!(port.assign_id.is_none());
    assert_eq!(port.remarks, "tracked elsewhere");
    // No child switch entity was provisioned.
    assert_eq!(svc.store().list_switches().await.unwrap().len(), 1);
}

#[tokio::test]
async fn assign_port_rejects_empty_name() {
    let svc = service().await;
    let sw = svc.create_switch(&create_req("SW-A", "", Some(4))).await.unwrap();
    let port = svc.ports_of(&sw.id).await.unwrap()[0].clone();

    let err = svc
        .assign_port(&port.id, &assign_user_req("  ", "", ""))
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<ValidationError>().is_some());

    let unchanged = svc.store().get_port(&port.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, PortStatus::Free);
}

#[tokio::test]
async fn edit_assignment_keeps_type_role_and_status() {
    let svc = service().await;
    let sw = svc.create_switch(&create_req("SW-A", "", Some(4))).await.unwrap();
    let port = svc.ports_of(&sw.id).await.unwrap()[0].clone();
    svc.assign_port(&port.id, &assign_user_req("Rakib", "Room 101", "PC-HR-01"))
        .await
        .unwrap();

    let port = svc
        .edit_port_assignment(
            &port.id,
            &EditPortAssignmentRequest {
                assign_name: "Karim".to_string(),
                user_location: Some("Room 202".to_string()),
                device_name: Some("PC-ACC-02".to_string()),
                remarks: Some("moved desks".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(port.assign_name.as_deref(), Some("Karim"));
    assert_eq!(port.user_location.as_deref(), Some("Room 202"));
    assert_eq!(port.device_name.as_deref(), Some("PC-ACC-02"));
    assert_eq!(port.remarks, "moved desks");
    assert_eq!(port.status, PortStatus::Active);
    assert_eq!(port.port_role, PortRole::Access);
    assert_eq!(port.assign_type, Some(AssignType::User));
}

#[tokio::test]
async fn unassign_port_is_idempotent() {
    let svc = service().await;
    let sw = svc.create_switch(&create_req("SW-A", "", Some(4))).await.unwrap();
    let port = svc.ports_of(&sw.id).await.unwrap()[0].clone();
    svc.assign_port(&port.id, &assign_user_req("Rakib", "Room 101", "PC-HR-01"))
        .await
        .unwrap();

    let once = svc.unassign_port(&port.id).await.unwrap();
    assert_eq!(once.status, PortStatus::Free);
    assert_eq!(once.port_role, PortRole::Access);
    assert!(once.assign_type.is_none());
    assert!(once.assign_id.is_none());
    assert!(once.assign_name.is_none());
    assert!(once.user_location.is_none());
    assert!(once.device_name.is_none());
    assert_eq!(once.remarks, "");

    let twice = svc.unassign_port(&port.id).await.unwrap();
    assert_eq!(twice.status, PortStatus::Free);
    assert_eq!(twice.port_role, PortRole::Access);
    assert!(twice.assign_type.is_none());
    assert!(twice.assign_name.is_none());
}

#[tokio::test]
async fn delete_guard_blocks_switch_with_children() {
    let svc = service().await;
    let parent = svc
        .create_switch(&create_req("CORE-SW-01", "Server Room", Some(24)))
        .await
        .unwrap();
    let port = svc.ports_of(&parent.id).await.unwrap()[0].clone();
    svc.create_child_switch(&parent.id, &port.id, &child_req("SW-FLOOR-1", "Floor 1", Some(8)))
        .await
        .unwrap();

    let err = svc.delete_switch(&parent.id).await.unwrap_err();
    let blocked = err.downcast_ref::<DeleteBlockedError>().expect("delete guard");
    assert_eq!(blocked.child_count, 1);

    // Nothing was removed.
    assert_eq!(svc.store().list_switches().await.unwrap().len(), 2);
    assert_eq!(svc.ports_of(&parent.id).await.unwrap().len(), 24);
}

#[tokio::test]
async fn deleting_child_frees_parent_uplink_port() {
    let svc = service().await;
    let parent = svc
        .create_switch(&create_req("CORE-SW-01", "Server Room", Some(24)))
        .await
        .unwrap();
    let port5 = svc.ports_of(&parent.id).await.unwrap()[4].clone();
    let child = svc
        .create_child_switch(&parent.id, &port5.id, &child_req("SW-FLOOR-1", "Floor 1", Some(24)))
        .await
        .unwrap();

    svc.delete_switch(&child.id).await.unwrap();

    // All child ports gone, child gone, parent port reset.
    assert!(svc.store().get_switch(&child.id).await.unwrap().is_none());
    assert!(svc.ports_of(&child.id).await.unwrap().is_empty());

    let port5 = svc.store().get_port(&port5.id).await.unwrap().unwrap();
    assert_eq!(port5.status, PortStatus::Free);
    assert_eq!(port5.port_role, PortRole::Access);
    assert!(port5.assign_type.is_none());
    assert!(port5.assign_id.is_none());
    assert!(port5.assign_name.is_none());
    assert!(port5.user_location.is_none());
    assert!(port5.device_name.is_none());
}

#[tokio::test]
async fn delete_root_switch_removes_port_batch() {
    let svc = service().await;
    let sw = svc.create_switch(&create_req("SW-A", "", Some(8))).await.unwrap();
    svc.delete_switch(&sw.id).await.unwrap();

    assert!(svc.store().list_switches().await.unwrap().is_empty());
    assert!(svc.store().list_ports().await.unwrap().is_empty());

    let err = svc.delete_switch(&sw.id).await.unwrap_err();
    assert!(err.downcast_ref::<NotFoundError>().is_some());
}

#[tokio::test]
async fn dangling_parent_reference_resolves_to_none() {
    let svc = service().await;
    assert!(svc.parent_switch_name(None).await.unwrap().is_none());
    assert!(svc
        .parent_switch_name(Some("no-such-switch"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn stats_counts_recomputed_from_collections() {
    let svc = service().await;
    let parent = svc
        .create_switch(&create_req("CORE-SW-01", "Server Room", Some(10)))
        .await
        .unwrap();
    let ports = svc.ports_of(&parent.id).await.unwrap();
    svc.create_child_switch(&parent.id, &ports[0].id, &child_req("SW-FLOOR-1", "Floor 1", Some(5)))
        .await
        .unwrap();
    svc.assign_port(&ports[1].id, &assign_user_req("Rakib", "Room 101", "PC-HR-01"))
        .await
        .unwrap();

    let stats = svc.stats().await.unwrap();
    assert_eq!(stats.total_switches, 2);
    assert_eq!(stats.total_ports, 15);
    assert_eq!(stats.active_ports, 2); // uplink + user assignment
    assert_eq!(stats.free_ports, 13);
}

#[tokio::test]
async fn search_matches_switch_and_port_metadata() {
    let svc = service().await;
    let a = svc
        .create_switch(&create_req("CORE-SW-01", "Server Room", Some(4)))
        .await
        .unwrap();
    let b = svc
        .create_switch(&create_req("SW-FLOOR-1", "Floor 1", Some(4)))
        .await
        .unwrap();
    let b_port = svc.ports_of(&b.id).await.unwrap()[0].clone();
    svc.assign_port(&b_port.id, &assign_user_req("Rakib", "Room 101", "PC-HR-01"))
        .await
        .unwrap();

    // Match on switch name.
    let views = svc.switch_views("core-sw").await.unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].switch.id, a.id);

    // Match through a port's assignment metadata.
    let views = svc.switch_views("rakib").await.unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].switch.id, b.id);

    // Empty query returns everything with derived counts.
    let views = svc.switch_views("").await.unwrap();
    assert_eq!(views.len(), 2);
    let b_view = views.iter().find(|v| v.switch.id == b.id).unwrap();
    assert_eq!(b_view.active_ports, 1);
    assert_eq!(b_view.free_ports, 3);
}

#[tokio::test]
async fn switch_view_enriches_parent_name_and_counts() {
    let svc = service().await;
    let parent = svc
        .create_switch(&create_req("CORE-SW-01", "Server Room", Some(4)))
        .await
        .unwrap();
    let port = svc.ports_of(&parent.id).await.unwrap()[0].clone();
    let child = svc
        .create_child_switch(&parent.id, &port.id, &child_req("SW-FLOOR-1", "Floor 1", Some(4)))
        .await
        .unwrap();

    let parent_view = svc.switch_view(&parent.id).await.unwrap().unwrap();
    assert_eq!(parent_view.child_count, 1);
    assert_eq!(parent_view.active_ports, 1);
    assert!(parent_view.parent_switch_name.is_none());

    let child_view = svc.switch_view(&child.id).await.unwrap().unwrap();
    assert_eq!(child_view.parent_switch_name.as_deref(), Some("CORE-SW-01"));
    assert_eq!(child_view.child_count, 0);

    assert!(svc.switch_view("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn collections_round_trip_reproduces_topology() {
    let svc = service().await;
    let parent = svc
        .create_switch(&create_req("CORE-SW-01", "Server Room", Some(6)))
        .await
        .unwrap();
    let port = svc.ports_of(&parent.id).await.unwrap()[2].clone();
    svc.create_child_switch(&parent.id, &port.id, &child_req("SW-FLOOR-1", "Floor 1", Some(4)))
        .await
        .unwrap();

    // Export both collections as raw records and re-import into a fresh store.
    let target = Store::in_memory().await.unwrap();
    for collection in [collections::SWITCHES, collections::SWITCH_PORTS] {
        for record in svc.store().get_all(collection).await.unwrap() {
            let id = record["id"].as_str().expect("record id").to_string();
            target.put(collection, &id, &record).await.unwrap();
        }
    }

    let restored = TopologyService::new(target);
    let mut original_switches = svc.store().list_switches().await.unwrap();
    let mut restored_switches = restored.store().list_switches().await.unwrap();
    original_switches.sort_by(|a, b| a.id.cmp(&b.id));
    restored_switches.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(
        serde_json::to_value(&original_switches).unwrap(),
        serde_json::to_value(&restored_switches).unwrap()
    );

    let mut original_ports = svc.store().list_ports().await.unwrap();
    let mut restored_ports = restored.store().list_ports().await.unwrap();
    original_ports.sort_by(|a, b| a.id.cmp(&b.id));
    restored_ports.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(
        serde_json::to_value(&original_ports).unwrap(),
        serde_json::to_value(&restored_ports).unwrap()
    );
}

#[tokio::test]
async fn stored_records_use_stable_camel_case_field_names() {
    let svc = service().await;
    let sw = svc
        .create_switch(&create_req("CORE-SW-01", "Server Room", Some(2)))
        .await
        .unwrap();

    let records = svc.store().get_all(collections::SWITCHES).await.unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["switchName"], "CORE-SW-01");
    assert_eq!(record["totalPorts"], 2);
    assert_eq!(record["switchType"], "ACCESS");
    assert!(record["parentSwitchId"].is_null());
    assert!(record["parentPortNumber"].is_null());
    assert!(record.get("createdAt").is_some());

    let ports = svc.store().get_all(collections::SWITCH_PORTS).await.unwrap();
    let record = ports.iter().find(|p| p["portNumber"] == 1).unwrap();
    assert_eq!(record["switchId"], sw.id.as_str());
    assert_eq!(record["status"], "FREE");
    assert_eq!(record["portRole"], "ACCESS");
    assert!(record["assignType"].is_null());
    assert!(record.get("lastUpdated").is_some());
}
