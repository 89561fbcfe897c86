//! Coordinator behavior against the in-memory store

use pagecraft_editor::{
    ComponentId, EditorError, EditorOptions, OrderingCoordinator, Page, PageDetails, StaticCatalog,
};
use pagecraft_store::{GatewayOp, MemoryGateway, PersistenceGateway, StoreError};
use serde_json::json;
use std::sync::Arc;

fn catalog() -> Arc<StaticCatalog> {
    Arc::new(
        StaticCatalog::new()
            .with_entry("hero", json!({ "title": "Welcome", "tags": ["new"] }))
            .with_entry("text", json!({ "body": "" })),
    )
}

fn unpersisted_editor(gateway: &Arc<MemoryGateway>) -> OrderingCoordinator {
    OrderingCoordinator::new(
        Page::new(),
        gateway.clone(),
        catalog(),
        EditorOptions::default(),
    )
}

/// A persisted page with `blocks` hero components already created.
async fn persisted_editor(
    gateway: &Arc<MemoryGateway>,
    blocks: usize,
) -> OrderingCoordinator {
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
    for _ in 0..blocks {
        editor.add("hero").await.unwrap();
    }
    editor
}

#[tokio::test]
async fn draft_page_saves_all_components_in_one_call() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = unpersisted_editor(&gateway);

    editor.add("hero").await.unwrap();
    editor.add("text").await.unwrap();
    editor.add("text").await.unwrap();

    // unpersisted page: everything stays local
    assert_eq!(gateway.calls(GatewayOp::CreateComponent).await, 0);
    assert_eq!(editor.page().order_indices(), vec![1, 2, 3]);

    editor
        .save_page(PageDetails {
            name: "Home".to_string(),
            slug: "home".to_string(),
            is_published: false,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(gateway.calls(GatewayOp::CreatePage).await, 1);
    assert_eq!(gateway.calls(GatewayOp::CreateComponent).await, 0);

    let page = editor.page();
    assert!(page.is_persisted());
    assert!(!page.is_published);
    assert_eq!(page.order_indices(), vec![1, 2, 3]);
    assert!(page
        .components
        .iter()
        .all(|component| matches!(component.id, ComponentId::Remote(_))));
}

#[tokio::test]
async fn add_on_persisted_page_creates_remotely() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 0).await;

    let added = editor.add("hero").await.unwrap();

    assert!(matches!(added.id, ComponentId::Remote(_)));
    assert_eq!(added.order_index, 1);
    assert_eq!(added.content, json!({ "title": "Welcome", "tags": ["new"] }));
    assert_eq!(gateway.calls(GatewayOp::CreateComponent).await, 1);
}

#[tokio::test]
async fn unknown_block_type_starts_from_empty_content() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 0).await;

    let added = editor.add("not-in-catalog").await.unwrap();
    assert_eq!(added.content, json!({}));
    assert_eq!(added.component_name, "Not In Catalog");
}

#[tokio::test]
async fn create_conflict_retries_and_succeeds_on_third_attempt() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 0).await;

    gateway
        .fail_next(
            GatewayOp::CreateComponent,
            StoreError::Conflict("order index taken".into()),
        )
        .await;
    gateway
        .fail_next(
            GatewayOp::CreateComponent,
            StoreError::Conflict("order index taken".into()),
        )
        .await;

    let added = editor.add("hero").await.unwrap();

    assert_eq!(gateway.calls(GatewayOp::CreateComponent).await, 3);
    assert!(matches!(added.id, ComponentId::Remote(_)));
    assert_eq!(editor.page().components.len(), 1);
    assert!(editor.page().order_is_contiguous());
}

#[tokio::test]
async fn persistent_conflict_exhausts_retries_and_removes_draft() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 0).await;

    for _ in 0..3 {
        gateway
            .fail_next(
                GatewayOp::CreateComponent,
                StoreError::Conflict("order index taken".into()),
            )
            .await;
    }

    let err = editor.add("hero").await.unwrap_err();

    assert!(matches!(err, EditorError::CreateExhausted { attempts: 3 }));
    assert_eq!(gateway.calls(GatewayOp::CreateComponent).await, 3);
    assert!(editor.page().components.is_empty());
}

#[tokio::test]
async fn non_conflict_create_error_aborts_immediately() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 0).await;

    gateway
        .fail_next(
            GatewayOp::CreateComponent,
            StoreError::Transport("connection reset".into()),
        )
        .await;

    let err = editor.add("hero").await.unwrap_err();

    assert!(matches!(err, EditorError::Store(StoreError::Transport(_))));
    assert_eq!(gateway.calls(GatewayOp::CreateComponent).await, 1);
    assert!(editor.page().components.is_empty());
}

#[tokio::test]
async fn move_issues_one_reorder_and_renumbers() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 3).await;
    let first_id = editor.component(0).unwrap().id.clone();

    editor.move_component(0, 2).await.unwrap();

    assert_eq!(gateway.calls(GatewayOp::ReorderComponents).await, 1);
    assert_eq!(editor.page().order_indices(), vec![1, 2, 3]);
    assert_eq!(editor.component(2).unwrap().id, first_id);

    // remote agrees with the new arrangement
    let page_id = editor.page().id.unwrap();
    let remote = gateway.list_components(page_id).await.unwrap();
    assert_eq!(remote[2].id, first_id.remote().unwrap());
}

#[tokio::test]
async fn move_to_same_position_is_a_no_op() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 3).await;
    let before: Vec<ComponentId> = editor
        .page()
        .components
        .iter()
        .map(|component| component.id.clone())
        .collect();

    editor.move_component(1, 1).await.unwrap();

    let after: Vec<ComponentId> = editor
        .page()
        .components
        .iter()
        .map(|component| component.id.clone())
        .collect();
    assert_eq!(before, after);
    assert_eq!(editor.page().order_indices(), vec![1, 2, 3]);
    assert_eq!(gateway.calls(GatewayOp::ReorderComponents).await, 0);
}

#[tokio::test]
async fn failed_reorder_reloads_authoritative_sequence() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 3).await;
    let original: Vec<ComponentId> = editor
        .page()
        .components
        .iter()
        .map(|component| component.id.clone())
        .collect();

    gateway
        .fail_next(
            GatewayOp::ReorderComponents,
            StoreError::Server {
                status: 500,
                message: "boom".into(),
            },
        )
        .await;

    let err = editor.move_component(0, 2).await.unwrap_err();
    assert!(matches!(err, EditorError::Store(StoreError::Server { .. })));

    // local state was discarded for the store's ordering
    let after: Vec<ComponentId> = editor
        .page()
        .components
        .iter()
        .map(|component| component.id.clone())
        .collect();
    assert_eq!(after, original);
    assert_eq!(editor.page().order_indices(), vec![1, 2, 3]);
}

#[tokio::test]
async fn deleting_middle_component_renumbers_survivors() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 3).await;
    let removed_id = editor.component(1).unwrap().id.remote().unwrap();

    editor.remove(1).await.unwrap();

    assert_eq!(gateway.calls(GatewayOp::DeleteComponent).await, 1);
    assert_eq!(editor.page().components.len(), 2);
    assert_eq!(editor.page().order_indices(), vec![1, 2]);
    assert!(gateway.component(removed_id).await.is_none());
}

#[tokio::test]
async fn failed_delete_leaves_local_state_untouched() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 3).await;

    gateway
        .fail_next(
            GatewayOp::DeleteComponent,
            StoreError::Transport("connection reset".into()),
        )
        .await;

    let err = editor.remove(1).await.unwrap_err();
    assert!(matches!(err, EditorError::Store(StoreError::Transport(_))));
    assert_eq!(editor.page().components.len(), 3);
    assert_eq!(editor.page().order_indices(), vec![1, 2, 3]);
}

#[tokio::test]
async fn duplicate_clones_content_as_new_draft() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 1).await;
    editor
        .update_field(0, "title", json!("Customized"))
        .await
        .unwrap();

    let clone = editor.duplicate(0).unwrap();

    assert!(clone.id.is_temp());
    assert_eq!(clone.order_index, 2);
    assert_eq!(clone.content["title"], json!("Customized"));
    // no remote create until explicitly persisted
    assert_eq!(gateway.calls(GatewayOp::CreateComponent).await, 1);

    editor.persist_draft(1).await.unwrap();
    assert_eq!(gateway.calls(GatewayOp::CreateComponent).await, 2);
    assert!(matches!(
        editor.component(1).unwrap().id,
        ComponentId::Remote(_)
    ));
    assert!(editor.page().order_is_contiguous());
}

#[tokio::test]
async fn structural_update_failure_rolls_back() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 1).await;
    assert!(editor.component(0).unwrap().is_visible);

    gateway
        .fail_next(
            GatewayOp::UpdateComponent,
            StoreError::Transport("connection reset".into()),
        )
        .await;

    let err = editor
        .update_field(0, "isVisible", json!(false))
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::Store(StoreError::Transport(_))));
    assert!(editor.component(0).unwrap().is_visible);
}

#[tokio::test]
async fn raw_text_edit_rejects_invalid_json_and_keeps_last_valid() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 1).await;

    editor
        .update_content_text(0, r#"{ "title": "From text" }"#)
        .unwrap();
    assert_eq!(editor.component(0).unwrap().content["title"], "From text");

    let err = editor.update_content_text(0, "{ not json").unwrap_err();
    assert!(matches!(err, EditorError::Validation(_)));
    assert_eq!(editor.component(0).unwrap().content["title"], "From text");
}

#[tokio::test]
async fn save_page_validates_before_any_remote_call() {
    let gateway = Arc::new(MemoryGateway::new());

    let mut editor = unpersisted_editor(&gateway);
    let err = editor
        .save_page(PageDetails {
            name: "Home".to_string(),
            slug: "Not A Slug".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::Validation(_)));

    let err = editor
        .save_page(PageDetails {
            name: "   ".to_string(),
            slug: "home".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::Validation(_)));

    assert_eq!(gateway.calls(GatewayOp::CreatePage).await, 0);
}

#[tokio::test]
async fn save_page_rejects_taken_slug() {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.seed_page("Existing", "home").await;

    let mut editor = unpersisted_editor(&gateway);
    let err = editor
        .save_page(PageDetails {
            name: "Home".to_string(),
            slug: "home".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, EditorError::Validation(_)));
    assert_eq!(gateway.calls(GatewayOp::CheckSlugExists).await, 1);
    assert_eq!(gateway.calls(GatewayOp::CreatePage).await, 0);
}

#[tokio::test]
async fn order_invariant_holds_across_mixed_operations() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 2).await;

    editor.add("text").await.unwrap();
    editor.move_component(2, 0).await.unwrap();
    editor.duplicate(1).unwrap();
    editor.remove(0).await.unwrap();
    editor.add("hero").await.unwrap();

    assert!(editor.page().order_is_contiguous());
    let indices = editor.page().order_indices();
    assert_eq!(indices, (1..=indices.len() as u32).collect::<Vec<_>>());
}

#[tokio::test]
async fn out_of_bounds_indices_are_rejected() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut editor = persisted_editor(&gateway, 1).await;

    assert!(matches!(
        editor.remove(5).await.unwrap_err(),
        EditorError::OutOfBounds { index: 5, len: 1 }
    ));
    assert!(matches!(
        editor.move_component(0, 9).await.unwrap_err(),
        EditorError::OutOfBounds { index: 9, len: 1 }
    ));
    assert!(matches!(
        editor.duplicate(3).unwrap_err(),
        EditorError::OutOfBounds { index: 3, len: 1 }
    ));
}
