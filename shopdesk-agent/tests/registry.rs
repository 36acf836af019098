use std::sync::Arc;

use async_trait::async_trait;
use shopdesk_agent::{
    ToolDispatchError, ToolRegistry, ToolRegistryError, CLARIFY_TOOL_NAME,
};
use shopdesk_core::{FieldSpec, InputSchema, Tool, ToolError, ToolInput};
use shopdesk_tools::{default_tools, ShopData};

struct NamedTool(&'static str);

#[async_trait]
impl Tool for NamedTool {
    fn name(&self) -> &str {
        self.0
    }

    fn description(&self) -> &str {
        "test tool"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
    }

    async fn invoke(&self, _input: ToolInput) -> Result<String, ToolError> {
        Ok(format!("RESULT: {} ran", self.0))
    }
}

struct BrokenTool;

#[async_trait]
impl Tool for BrokenTool {
    fn name(&self) -> &str {
        "broken"
    }

    fn description(&self) -> &str {
        "always fails"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::string("order_id", "order to inspect"))
            .field(FieldSpec::string("reason", "why").optional())
    }

    async fn invoke(&self, _input: ToolInput) -> Result<String, ToolError> {
        Err(ToolError::ExecutionFailed("store offline".to_string()))
    }
}

fn shop_registry() -> ToolRegistry {
    ToolRegistry::builder()
        .register_all(default_tools(&ShopData::seeded(), None))
        .build()
        .expect("registry")
}

#[test]
fn clarify_tool_is_always_registered_last() {
    let registry = shop_registry();
    let names = registry.names();
    assert_eq!(names.len(), 12);
    assert_eq!(names.first(), Some(&"order_status"));
    assert_eq!(names.last(), Some(&CLARIFY_TOOL_NAME));

    let empty = ToolRegistry::builder().build().unwrap();
    assert_eq!(empty.names(), [CLARIFY_TOOL_NAME]);
}

#[test]
fn registering_a_tool_named_like_the_clarify_tool_is_a_duplicate() {
    let err = ToolRegistry::builder()
        .register(Arc::new(NamedTool(CLARIFY_TOOL_NAME)))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ToolRegistryError::DuplicateName {
            name: CLARIFY_TOOL_NAME.to_string()
        }
    );
}

#[test]
fn builder_rejects_duplicate_and_blank_names() {
    let duplicate = ToolRegistry::builder()
        .register(Arc::new(NamedTool("lookup")))
        .register(Arc::new(NamedTool("lookup")))
        .build()
        .unwrap_err();
    assert_eq!(
        duplicate,
        ToolRegistryError::DuplicateName {
            name: "lookup".to_string()
        }
    );

    let blank = ToolRegistry::builder()
        .register(Arc::new(NamedTool("  ")))
        .build()
        .unwrap_err();
    assert!(matches!(blank, ToolRegistryError::InvalidName { .. }));
}

#[test]
fn catalog_lists_every_tool_in_order() {
    let registry = shop_registry();
    let catalog = registry.catalog();
    let lines: Vec<&str> = catalog.lines().collect();
    assert_eq!(lines.len(), registry.len());
    assert!(lines[0].starts_with("order_status: "));
    assert!(lines[0].ends_with("(input: order_id)"), "{}", lines[0]);
    assert!(lines[11].ends_with("(no input)"));
    assert!(registry.tool_names().starts_with("order_status, cancel_order, "));

    let broken = ToolRegistry::builder()
        .register(Arc::new(BrokenTool))
        .build()
        .unwrap();
    assert_eq!(
        broken.catalog().lines().next(),
        Some("broken: always fails (input: JSON object with order_id, reason?)")
    );
}

#[test]
fn resolve_is_exact_and_case_sensitive() {
    let registry = shop_registry();
    assert_eq!(registry.resolve("order_status").unwrap().name(), "order_status");

    let err = registry.resolve("Order_Status").unwrap_err();
    let ToolDispatchError::UnknownTool { name, available } = &err;
    assert_eq!(name, "Order_Status");
    assert_eq!(available.len(), 12);
    assert!(err.to_string().starts_with("Tool 'Order_Status' not found. Available tools: order_status, "));
}

#[tokio::test]
async fn dispatch_to_a_known_order_returns_details() {
    let registry = shop_registry();
    let observation = registry.dispatch("order_status", "ORD001").await;
    assert!(!observation.is_empty());
    assert!(observation.contains("Order ID: ORD001"), "{observation}");
}

#[tokio::test]
async fn unknown_tool_becomes_an_observation() {
    let registry = shop_registry();
    let observation = registry.dispatch("nonexistent_tool", "x").await;
    assert!(observation.contains("not found"), "{observation}");
    assert!(observation.contains(CLARIFY_TOOL_NAME));
}

#[tokio::test]
async fn validation_and_execution_failures_become_observations() {
    let registry = ToolRegistry::builder()
        .register(Arc::new(BrokenTool))
        .register_all(default_tools(&ShopData::seeded(), None))
        .build()
        .unwrap();

    let missing = registry.dispatch("broken", "").await;
    assert!(
        missing.starts_with("Invalid input for tool 'broken': "),
        "{missing}"
    );
    assert!(missing.contains("order_id"));

    let failed = registry.dispatch("broken", "ORD001").await;
    assert_eq!(failed, "Tool 'broken' failed: store offline");

    let bad_patch = registry
        .dispatch("update_preferences", r#"{"customer_id": "CUST001"}"#)
        .await;
    assert!(bad_patch.starts_with("Invalid input for tool 'update_preferences': "));
}

#[tokio::test]
async fn clarify_tool_asks_for_details() {
    let registry = ToolRegistry::builder().build().unwrap();
    let observation = registry.dispatch(CLARIFY_TOOL_NAME, "").await;
    assert_eq!(
        observation,
        "RESULT: Could you please provide more details or clarify your request so I can assist you better?"
    );
}
