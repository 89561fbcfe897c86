//! Debounced autosave behavior, driven on a paused clock

use pagecraft_editor::{EditorError, EditorOptions, OrderingCoordinator, Page, StaticCatalog};
use pagecraft_store::{GatewayOp, MemoryGateway, StoreError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn catalog() -> Arc<StaticCatalog> {
    Arc::new(StaticCatalog::new().with_entry(
        "hero",
        json!({ "title": "Welcome", "subtitle": "" }),
    ))
}

/// Persisted page with one hero block already created.
async fn editor_with_block(gateway: &Arc<MemoryGateway>) -> OrderingCoordinator {
    let page_id = gateway.seed_page("Home", "home").await;
    let mut page = Page::new();
    page.id = Some(page_id);
    page.name = "Home".to_string();
    page.slug = "home".to_string();

    let mut editor = OrderingCoordinator::new(
        page,
        gateway.clone(),
        catalog(),
        EditorOptions::default(),
    );
    editor.add("hero").await.unwrap();
    editor
}

async fn stored_content(gateway: &MemoryGateway, component_id: i64) -> Value {
    let record = gateway.component(component_id).await.unwrap();
    serde_json::from_str(&record.content_json).unwrap()
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_coalesce_into_one_update_with_latest_value() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = editor_with_block(&gateway).await;
    let component_id = editor.component(0).unwrap().id.remote().unwrap();

    editor
        .update_field(0, "title", json!("First draft"))
        .await
        .unwrap();
    tokio::time::advance(Duration::from_millis(1000)).await;
    editor
        .update_field(0, "title", json!("Second draft"))
        .await
        .unwrap();
    editor
        .update_field(0, "subtitle", json!("Also edited"))
        .await
        .unwrap();

    assert!(editor.has_pending_saves());
    assert_eq!(gateway.calls(GatewayOp::UpdateComponent).await, 0);

    editor.flush_due().await.unwrap();

    assert_eq!(gateway.calls(GatewayOp::UpdateComponent).await, 1);
    assert!(!editor.has_pending_saves());

    let stored = stored_content(&gateway, component_id).await;
    assert_eq!(stored["title"], "Second draft");
    assert_eq!(stored["subtitle"], "Also edited");
}

#[tokio::test(start_paused = true)]
async fn failed_autosave_rolls_content_back_to_last_confirmed() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = editor_with_block(&gateway).await;
    let component_id = editor.component(0).unwrap().id.remote().unwrap();

    editor
        .update_field(0, "title", json!("Edited once"))
        .await
        .unwrap();
    editor
        .update_field(0, "title", json!("Edited twice"))
        .await
        .unwrap();

    gateway
        .fail_next(
            GatewayOp::UpdateComponent,
            StoreError::Server {
                status: 500,
                message: "boom".into(),
            },
        )
        .await;

    let err = editor.flush_all().await.unwrap_err();
    assert!(matches!(err, EditorError::Store(StoreError::Server { .. })));

    // the whole coalesced batch rolls back together
    assert_eq!(editor.component(0).unwrap().content["title"], "Welcome");
    let stored = stored_content(&gateway, component_id).await;
    assert_eq!(stored["title"], "Welcome");
}

#[tokio::test(start_paused = true)]
async fn structural_updates_bypass_the_debounce() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = editor_with_block(&gateway).await;

    editor
        .update_field(0, "isVisible", json!(false))
        .await
        .unwrap();

    assert_eq!(gateway.calls(GatewayOp::UpdateComponent).await, 1);
    assert!(!editor.has_pending_saves());
    assert!(!editor.component(0).unwrap().is_visible);
}

#[tokio::test(start_paused = true)]
async fn theme_updates_go_out_immediately() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = editor_with_block(&gateway).await;
    let component_id = editor.component(0).unwrap().id.remote().unwrap();

    editor.update_field(0, "theme", json!(2)).await.unwrap();

    assert_eq!(gateway.calls(GatewayOp::UpdateComponent).await, 1);
    let record = gateway.component(component_id).await.unwrap();
    assert_eq!(record.theme, 2);
}

#[tokio::test(start_paused = true)]
async fn removing_a_component_cancels_its_pending_save() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = editor_with_block(&gateway).await;

    editor
        .update_field(0, "title", json!("Never saved"))
        .await
        .unwrap();
    assert!(editor.has_pending_saves());

    editor.remove(0).await.unwrap();

    assert!(!editor.has_pending_saves());
    editor.flush_all().await.unwrap();
    assert_eq!(gateway.calls(GatewayOp::UpdateComponent).await, 0);
}

#[tokio::test(start_paused = true)]
async fn draft_edits_on_unpersisted_page_schedule_nothing() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = OrderingCoordinator::new(
        Page::new(),
        gateway.clone(),
        catalog(),
        EditorOptions::default(),
    );
    editor.add("hero").await.unwrap();

    editor
        .update_field(0, "title", json!("Local only"))
        .await
        .unwrap();

    assert!(!editor.has_pending_saves());
    editor.flush_all().await.unwrap();
    assert_eq!(gateway.calls(GatewayOp::UpdateComponent).await, 0);
    assert_eq!(editor.component(0).unwrap().content["title"], "Local only");
}

#[tokio::test(start_paused = true)]
async fn flush_due_with_empty_queue_returns_immediately() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = editor_with_block(&gateway).await;

    editor.flush_due().await.unwrap();
    assert_eq!(gateway.calls(GatewayOp::UpdateComponent).await, 0);
}
