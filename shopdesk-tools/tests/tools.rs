use std::sync::Arc;

use httpmock::prelude::*;
use secrecy::SecretString;
use serde_json::json;
use shopdesk_core::{Tool, ToolError};
use shopdesk_tools::records::OrderStatus;
use shopdesk_tools::{default_tools, ShopData, WeatherTool};

async fn run(tool: &dyn Tool, raw: &str) -> Result<String, ToolError> {
    let input = tool.input_schema().parse(raw)?;
    tool.invoke(input).await
}

fn tool_named(tools: &[Arc<dyn Tool>], name: &str) -> Arc<dyn Tool> {
    tools
        .iter()
        .find(|tool| tool.name() == name)
        .cloned()
        .unwrap_or_else(|| panic!("tool {name} missing"))
}

#[test]
fn default_tool_set_is_complete_and_unique() {
    let tools = default_tools(&ShopData::seeded(), None);
    let names: Vec<&str> = tools.iter().map(|tool| tool.name()).collect();
    assert_eq!(
        names,
        [
            "order_status",
            "cancel_order",
            "process_return",
            "search_products",
            "product_details",
            "customer_info",
            "get_customer_orders",
            "search_orders_by_email",
            "update_preferences",
            "get_weather",
            "product_recommendations",
        ]
    );
    assert!(tools.iter().all(|tool| !tool.description().is_empty()));
}

#[tokio::test]
async fn order_status_reports_known_and_unknown_orders() {
    let tools = default_tools(&ShopData::seeded(), None);
    let status = tool_named(&tools, "order_status");

    let found = run(status.as_ref(), "ORD001").await.unwrap();
    assert!(found.contains("Order ID: ORD001"), "{found}");
    assert!(found.contains("Status: Shipped"));
    assert!(found.contains("  - Wireless Headphones (Qty: 1) - $99.99"));
    assert!(found.contains("Tracking Number: TRK123456789"));

    let json_input = run(status.as_ref(), r#"{"order_id": "ORD002"}"#).await.unwrap();
    assert!(json_input.contains("Total: $289.97"));
    assert!(!json_input.contains("Tracking Number"));

    let missing = run(status.as_ref(), "ORD999").await.unwrap();
    assert!(missing.starts_with("RESULT: Order ORD999 not found."));
}

#[tokio::test]
async fn cancel_then_status_shows_the_change() {
    let data = ShopData::seeded();
    let tools = default_tools(&data, None);
    let cancel = tool_named(&tools, "cancel_order");

    assert_eq!(
        run(cancel.as_ref(), "\"ORD004\"").await.unwrap(),
        "RESULT: Order cancelled successfully"
    );
    assert_eq!(
        run(cancel.as_ref(), "ORD004").await.unwrap(),
        "RESULT: Order cannot be cancelled (already shipped/delivered)"
    );
    assert_eq!(
        run(cancel.as_ref(), "ORD404").await.unwrap(),
        "RESULT: Order not found"
    );
    assert_eq!(
        data.orders.get("ORD004").await.unwrap().status,
        OrderStatus::Cancelled
    );
}

#[tokio::test]
async fn process_return_needs_a_delivered_order() {
    let tools = default_tools(&ShopData::seeded(), None);
    let returns = tool_named(&tools, "process_return");

    let accepted = run(
        returns.as_ref(),
        r#"{"order_id": "ORD003", "reason": "arrived scratched"}"#,
    )
    .await
    .unwrap();
    assert_eq!(
        accepted,
        "RESULT: Return request processed. Return ID: RET1001. Please ship items back within 30 days."
    );

    let refused = run(returns.as_ref(), "ORD002").await.unwrap();
    assert_eq!(refused, "RESULT: Order must be delivered to process return");
}

#[tokio::test]
async fn product_search_and_details() {
    let tools = default_tools(&ShopData::seeded(), None);
    let search = tool_named(&tools, "search_products");
    let details = tool_named(&tools, "product_details");

    let found = run(search.as_ref(), "headphones").await.unwrap();
    assert!(found.starts_with("RESULT: Found 1 product(s):"));
    assert!(found.contains("**Wireless Headphones** (ID: PROD001)"));
    assert!(found.contains("Availability: In Stock"));

    let none = run(
        search.as_ref(),
        r#"{"query": "watch", "category": "Clothing"}"#,
    )
    .await
    .unwrap();
    assert_eq!(
        none,
        "RESULT: No products found for 'watch' in category 'Clothing'. You might want to try different search terms or browse our categories."
    );

    let stand = run(details.as_ref(), "PROD004").await.unwrap();
    assert!(stand.contains("Availability: Low Stock"));
    assert!(stand.contains("Stock: 3 units"));
    assert!(stand.contains("  • Foldable"));

    let missing = run(details.as_ref(), "PROD999").await.unwrap();
    assert!(missing.contains("not found"));
}

#[tokio::test]
async fn recommendations_default_to_top_rated() {
    let tools = default_tools(&ShopData::seeded(), None);
    let recommend = tool_named(&tools, "product_recommendations");

    let top = run(recommend.as_ref(), "").await.unwrap();
    let first = top.find("Laptop Stand").unwrap();
    let second = top.find("Gaming Mouse").unwrap();
    let third = top.find("Wireless Headphones").unwrap();
    assert!(first < second && second < third, "{top}");

    let cold = run(recommend.as_ref(), r#"{"weather_condition": "cold"}"#)
        .await
        .unwrap();
    assert!(cold.contains("**Winter Jacket** - $89.99"));
    assert!(cold.contains("**Running Shoes** - $75.99"));
}

#[tokio::test]
async fn customer_lookups() {
    let tools = default_tools(&ShopData::seeded(), None);
    let info = tool_named(&tools, "customer_info");
    let orders = tool_named(&tools, "get_customer_orders");
    let by_email = tool_named(&tools, "search_orders_by_email");

    let john = run(info.as_ref(), "CUST001").await.unwrap();
    assert!(john.contains("Name: John Doe"));
    assert!(john.contains("Loyalty Points: 1250"));
    assert!(john.contains("Recent Orders: ORD001, ORD002"));

    let jane = run(info.as_ref(), "jane.smith@email.com").await.unwrap();
    assert!(jane.contains("Name: Jane Smith"));

    let neither = run(info.as_ref(), "{}").await.unwrap();
    assert_eq!(
        neither,
        "RESULT: Error - Please provide either customer ID or email address."
    );

    let listed = run(orders.as_ref(), "CUST001").await.unwrap();
    assert!(listed.starts_with("RESULT: Orders found for John Doe (ID: CUST001):"));
    assert!(listed.contains("Order ORD002: Processing - $289.97 (Date: 2024-01-20)"));
    assert!(listed.ends_with("Total orders: 2"));

    let missing = run(by_email.as_ref(), "ghost@email.com").await.unwrap();
    assert!(missing.contains("No customer found with email ghost@email.com"));
}

#[tokio::test]
async fn update_preferences_validates_and_merges() {
    let data = ShopData::seeded();
    let tools = default_tools(&data, None);
    let update = tool_named(&tools, "update_preferences");

    let raw = json!({
        "customer_id": "CUST002",
        "preferences": {"categories": ["Office", "Books"], "communication": "email"}
    })
    .to_string();
    let reply = run(update.as_ref(), &raw).await.unwrap();
    assert!(reply.starts_with("RESULT: Preferences updated for Jane Smith"), "{reply}");

    let jane = data.customers.get("CUST002").await.unwrap();
    assert_eq!(jane.preferences.categories, ["Office", "Books"]);
    assert_eq!(jane.preferences.brands, ["HomePlus", "OfficeMax"]);
    assert_eq!(jane.preferences.communication, "email");

    let missing_field = run(update.as_ref(), "CUST002").await.unwrap_err();
    assert!(matches!(missing_field, ToolError::InvalidInput(ref msg) if msg.contains("preferences")));

    let empty_patch = run(
        update.as_ref(),
        r#"{"customer_id": "CUST002", "preferences": {}}"#,
    )
    .await
    .unwrap_err();
    assert!(matches!(empty_patch, ToolError::InvalidInput(_)));
}

#[tokio::test]
async fn weather_without_key_uses_mock() {
    let weather = WeatherTool::mock();
    let reply = run(&weather, "Chicago").await.unwrap();
    assert!(reply.starts_with("RESULT: Weather in Chicago: "), "{reply}");
    assert_eq!(reply, run(&weather, "Chicago").await.unwrap());
}

#[tokio::test]
async fn weather_with_key_calls_the_api() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/data/2.5/weather")
            .query_param("q", "London")
            .query_param("appid", "owm-key")
            .query_param("units", "metric");
        then.status(200).json_body(json!({
            "weather": [{"description": "light rain"}],
            "main": {"temp": 11.5}
        }));
    });

    let weather = WeatherTool::new(Some(SecretString::new("owm-key".to_string())))
        .with_base_url(server.base_url());
    let reply = run(&weather, "London").await.unwrap();
    assert_eq!(
        reply,
        "RESULT: Weather in London: Light Rain, 11.5°C. Potential shipping delays due to weather."
    );
    mock.assert();
}

#[tokio::test]
async fn weather_api_rejection_is_reported_as_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/2.5/weather");
        then.status(404).json_body(json!({"cod": "404", "message": "city not found"}));
    });

    let weather = WeatherTool::new(Some(SecretString::new("owm-key".to_string())))
        .with_base_url(server.base_url());
    let reply = run(&weather, "Atlantis").await.unwrap();
    assert_eq!(reply, "RESULT: Could not get weather information for Atlantis.");
}
