use async_trait::async_trait;
use serde::Deserialize;
use shopdesk_core::{FieldSpec, InputSchema, Tool, ToolError, ToolInput};

use crate::format;
use crate::store::OrderStore;

#[derive(Debug, Deserialize)]
struct OrderIdArgs {
    order_id: String,
}

#[derive(Debug, Deserialize)]
struct ReturnArgs {
    order_id: String,
    #[serde(default)]
    reason: String,
}

fn order_id_schema(description: &str) -> InputSchema {
    InputSchema::new().field(FieldSpec::string("order_id", description))
}

pub struct OrderStatusTool {
    orders: OrderStore,
}

impl OrderStatusTool {
    pub fn new(orders: OrderStore) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl Tool for OrderStatusTool {
    fn name(&self) -> &str {
        "order_status"
    }

    fn description(&self) -> &str {
        "Check the status of an order by order ID. Use this when customers ask about their order status, tracking, or delivery information."
    }

    fn input_schema(&self) -> InputSchema {
        order_id_schema("The order ID to check status for")
    }

    async fn invoke(&self, input: ToolInput) -> Result<String, ToolError> {
        let args: OrderIdArgs = input.deserialize()?;
        let order_id = args.order_id.trim();
        Ok(match self.orders.get(order_id).await {
            Some(order) => format::order_details(&order),
            None => format!(
                "RESULT: Order {order_id} not found. This order ID does not exist in our system. Please verify the order ID or ask the customer for their email to search for orders differently."
            ),
        })
    }
}

pub struct CancelOrderTool {
    orders: OrderStore,
}

impl CancelOrderTool {
    pub fn new(orders: OrderStore) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl Tool for CancelOrderTool {
    fn name(&self) -> &str {
        "cancel_order"
    }

    fn description(&self) -> &str {
        "Cancel an order if it's still possible. Use this when customers want to cancel their orders."
    }

    fn input_schema(&self) -> InputSchema {
        order_id_schema("The order ID to cancel")
    }

    async fn invoke(&self, input: ToolInput) -> Result<String, ToolError> {
        let args: OrderIdArgs = input.deserialize()?;
        let outcome = self.orders.cancel(args.order_id.trim()).await;
        Ok(format!("RESULT: {}", outcome.message()))
    }
}

pub struct ProcessReturnTool {
    orders: OrderStore,
}

impl ProcessReturnTool {
    pub fn new(orders: OrderStore) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl Tool for ProcessReturnTool {
    fn name(&self) -> &str {
        "process_return"
    }

    fn description(&self) -> &str {
        "Process a return request for a delivered order. Use this when customers want to return items."
    }

    fn input_schema(&self) -> InputSchema {
        order_id_schema("The order ID to process return for")
            .field(FieldSpec::string("reason", "Reason for return").with_default(""))
    }

    async fn invoke(&self, input: ToolInput) -> Result<String, ToolError> {
        let args: ReturnArgs = input.deserialize()?;
        let outcome = self
            .orders
            .process_return(args.order_id.trim(), args.reason.trim())
            .await;
        Ok(format!("RESULT: {}", outcome.message()))
    }
}
