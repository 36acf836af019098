//! E-commerce tools for the shopdesk agent.
//!
//! Orders, products and customers live in shared in-memory stores seeded with
//! a demo catalog. Every tool reports domain outcomes ("order not found",
//! "cannot be cancelled") as `RESULT: ...` text for the backend to read.

mod customers;
mod format;
mod orders;
mod products;
pub mod records;
mod seed;
mod store;
mod weather;

use std::sync::Arc;

use secrecy::SecretString;
use shopdesk_core::Tool;

pub use customers::{
    CustomerInfoTool, CustomerOrdersTool, SearchOrdersByEmailTool, UpdatePreferencesTool,
};
pub use orders::{CancelOrderTool, OrderStatusTool, ProcessReturnTool};
pub use products::{ProductDetailsTool, ProductRecommendationsTool, SearchProductsTool};
pub use store::{
    CancelOutcome, CustomerStore, OrderStore, PreferenceUpdate, ProductStore, ReturnOutcome,
    ShopData,
};
pub use weather::WeatherTool;

/// The full e-commerce tool set over `data`, in catalog order.
pub fn default_tools(data: &ShopData, weather_api_key: Option<SecretString>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(OrderStatusTool::new(data.orders.clone())),
        Arc::new(CancelOrderTool::new(data.orders.clone())),
        Arc::new(ProcessReturnTool::new(data.orders.clone())),
        Arc::new(SearchProductsTool::new(data.products.clone())),
        Arc::new(ProductDetailsTool::new(data.products.clone())),
        Arc::new(CustomerInfoTool::new(data.customers.clone())),
        Arc::new(CustomerOrdersTool::new(
            data.customers.clone(),
            data.orders.clone(),
        )),
        Arc::new(SearchOrdersByEmailTool::new(
            data.customers.clone(),
            data.orders.clone(),
        )),
        Arc::new(UpdatePreferencesTool::new(data.customers.clone())),
        Arc::new(WeatherTool::new(weather_api_key)),
        Arc::new(ProductRecommendationsTool::new(data.products.clone())),
    ]
}
