use async_trait::async_trait;
use serde::Deserialize;
use shopdesk_core::{FieldSpec, InputSchema, Tool, ToolError, ToolInput};

use crate::format;
use crate::records::Customer;
use crate::store::{CustomerStore, OrderStore, PreferenceUpdate};

#[derive(Debug, Deserialize)]
struct CustomerLookupArgs {
    customer_id: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CustomerIdArgs {
    customer_id: String,
}

#[derive(Debug, Deserialize)]
struct EmailArgs {
    email: String,
}

#[derive(Debug, Deserialize)]
struct UpdatePreferencesArgs {
    customer_id: String,
    preferences: PreferencesPatch,
}

#[derive(Debug, Deserialize)]
struct PreferencesPatch {
    categories: Option<OneOrMany>,
    brands: Option<OneOrMany>,
    communication: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => value
                .split(',')
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect(),
            OneOrMany::Many(values) => values,
        }
    }
}

impl From<PreferencesPatch> for PreferenceUpdate {
    fn from(patch: PreferencesPatch) -> Self {
        PreferenceUpdate {
            categories: patch.categories.map(OneOrMany::into_vec),
            brands: patch.brands.map(OneOrMany::into_vec),
            communication: patch.communication,
        }
    }
}

async fn order_lines(orders: &OrderStore, customer: &Customer) -> Vec<String> {
    let mut lines = Vec::with_capacity(customer.order_history.len());
    for order_id in &customer.order_history {
        match orders.get(order_id).await {
            Some(order) => lines.push(format::order_line(&order)),
            None => lines.push(format!("Order {order_id}: Status unknown")),
        }
    }
    lines
}

pub struct CustomerInfoTool {
    customers: CustomerStore,
}

impl CustomerInfoTool {
    pub fn new(customers: CustomerStore) -> Self {
        Self { customers }
    }
}

#[async_trait]
impl Tool for CustomerInfoTool {
    fn name(&self) -> &str {
        "customer_info"
    }

    fn description(&self) -> &str {
        "Get customer information by customer ID or email. Use this when customers ask about their account details, preferences, or loyalty points or forget their customer ID."
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::string("customer_id", "Customer ID").optional())
            .field(FieldSpec::string("email", "Customer email").optional())
    }

    async fn invoke(&self, input: ToolInput) -> Result<String, ToolError> {
        let args: CustomerLookupArgs = input.deserialize()?;
        let mut customer_id = args.customer_id.filter(|id| !id.trim().is_empty());
        let mut email = args.email.filter(|e| !e.trim().is_empty());

        // A bare email given as the whole input lands in the first field.
        if email.is_none() && customer_id.as_deref().is_some_and(|id| id.contains('@')) {
            email = customer_id.take();
        }

        let found = match (&customer_id, &email) {
            (Some(id), _) => self.customers.get(id.trim()).await,
            (None, Some(email)) => self.customers.by_email(email).await,
            (None, None) => {
                return Ok(
                    "RESULT: Error - Please provide either customer ID or email address."
                        .to_string(),
                )
            }
        };

        Ok(match (found, customer_id, email) {
            (Some(customer), _, _) => format::customer_details(&customer),
            (None, Some(id), _) => format!(
                "RESULT: Customer ID {} not found in our system. This customer ID does not exist. Try asking the customer for their email address instead or use the get_customer_orders tool to search for their orders directly.",
                id.trim()
            ),
            (None, None, email) => format!(
                "RESULT: No customer found with email {}. This email is not registered in our system.",
                email.unwrap_or_default().trim()
            ),
        })
    }
}

pub struct CustomerOrdersTool {
    customers: CustomerStore,
    orders: OrderStore,
}

impl CustomerOrdersTool {
    pub fn new(customers: CustomerStore, orders: OrderStore) -> Self {
        Self { customers, orders }
    }
}

#[async_trait]
impl Tool for CustomerOrdersTool {
    fn name(&self) -> &str {
        "get_customer_orders"
    }

    fn description(&self) -> &str {
        "Get all orders for a customer by customer ID. Use this when a customer forgets their order IDs or wants to see all their orders."
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new().field(FieldSpec::string(
            "customer_id",
            "Customer ID to get orders for",
        ))
    }

    async fn invoke(&self, input: ToolInput) -> Result<String, ToolError> {
        let args: CustomerIdArgs = input.deserialize()?;
        let customer_id = args.customer_id.trim();
        let Some(customer) = self.customers.get(customer_id).await else {
            return Ok(format!(
                "RESULT: Customer ID {customer_id} not found. Cannot retrieve orders for non-existent customer. Ask customer for email address to search alternatively."
            ));
        };
        if customer.order_history.is_empty() {
            return Ok(format!(
                "RESULT: No orders found for customer {customer_id} ({}). This customer has not placed any orders yet.",
                customer.name
            ));
        }

        let lines = order_lines(&self.orders, &customer).await;
        Ok(format!(
            "RESULT: Orders found for {} (ID: {customer_id}):\n\n{}\n\nTotal orders: {}",
            customer.name,
            lines.join("\n"),
            customer.order_history.len()
        ))
    }
}

pub struct SearchOrdersByEmailTool {
    customers: CustomerStore,
    orders: OrderStore,
}

impl SearchOrdersByEmailTool {
    pub fn new(customers: CustomerStore, orders: OrderStore) -> Self {
        Self { customers, orders }
    }
}

#[async_trait]
impl Tool for SearchOrdersByEmailTool {
    fn name(&self) -> &str {
        "search_orders_by_email"
    }

    fn description(&self) -> &str {
        "Search for orders using customer email when customer ID lookup fails. Alternative way to find customer orders."
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new().field(FieldSpec::string("email", "Customer email to search orders"))
    }

    async fn invoke(&self, input: ToolInput) -> Result<String, ToolError> {
        let args: EmailArgs = input.deserialize()?;
        let email = args.email.trim();
        let Some(customer) = self.customers.by_email(email).await else {
            return Ok(format!(
                "RESULT: No customer found with email {email}. This email is not registered in our system."
            ));
        };
        if customer.order_history.is_empty() {
            return Ok(format!(
                "RESULT: Customer with email {email} exists but has no orders yet."
            ));
        }

        let lines = order_lines(&self.orders, &customer).await;
        Ok(format!(
            "RESULT: Orders found for {email}:\n\n{}\n\nTotal orders: {}",
            lines.join("\n"),
            customer.order_history.len()
        ))
    }
}

pub struct UpdatePreferencesTool {
    customers: CustomerStore,
}

impl UpdatePreferencesTool {
    pub fn new(customers: CustomerStore) -> Self {
        Self { customers }
    }
}

#[async_trait]
impl Tool for UpdatePreferencesTool {
    fn name(&self) -> &str {
        "update_preferences"
    }

    fn description(&self) -> &str {
        "Update customer preferences such as preferred categories, brands, or communication methods."
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::string("customer_id", "Customer ID"))
            .field(FieldSpec::object(
                "preferences",
                "Preferences to update: categories, brands, communication",
            ))
    }

    async fn invoke(&self, input: ToolInput) -> Result<String, ToolError> {
        let args: UpdatePreferencesArgs = input.deserialize()?;
        let update = PreferenceUpdate::from(args.preferences);
        if update.is_empty() {
            return Err(ToolError::InvalidInput(
                "preferences must set at least one of categories, brands, communication"
                    .to_string(),
            ));
        }

        let customer_id = args.customer_id.trim();
        Ok(
            match self.customers.update_preferences(customer_id, update).await {
                Some(customer) => format!(
                    "RESULT: Preferences updated for {} ({customer_id}). Categories: {}; Brands: {}; Communication: {}",
                    customer.name,
                    customer.preferences.categories.join(", "),
                    customer.preferences.brands.join(", "),
                    customer.preferences.communication,
                ),
                None => format!("RESULT: Customer {customer_id} not found"),
            },
        )
    }
}
