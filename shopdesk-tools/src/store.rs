use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::records::{Customer, Order, OrderStatus, Preferences, Product};
use crate::seed;

const FIRST_RETURN_ID: u32 = 1001;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    NotFound,
    NotCancellable,
}

impl CancelOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            CancelOutcome::Cancelled => "Order cancelled successfully",
            CancelOutcome::NotFound => "Order not found",
            CancelOutcome::NotCancellable => {
                "Order cannot be cancelled (already shipped/delivered)"
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReturnOutcome {
    Accepted { return_id: String },
    NotFound,
    NotDelivered,
}

impl ReturnOutcome {
    pub fn message(&self) -> String {
        match self {
            ReturnOutcome::Accepted { return_id } => format!(
                "Return request processed. Return ID: {return_id}. Please ship items back within 30 days."
            ),
            ReturnOutcome::NotFound => "Order not found".to_string(),
            ReturnOutcome::NotDelivered => "Order must be delivered to process return".to_string(),
        }
    }
}

/// Orders keyed by id. Clones share the same underlying data.
#[derive(Clone)]
pub struct OrderStore {
    orders: Arc<RwLock<BTreeMap<String, Order>>>,
    next_return: Arc<AtomicU32>,
}

impl OrderStore {
    pub fn new(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(
                orders
                    .into_iter()
                    .map(|order| (order.order_id.clone(), order))
                    .collect(),
            )),
            next_return: Arc::new(AtomicU32::new(FIRST_RETURN_ID)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::orders())
    }

    pub async fn get(&self, order_id: &str) -> Option<Order> {
        self.orders.read().await.get(order_id).cloned()
    }

    pub async fn cancel(&self, order_id: &str) -> CancelOutcome {
        let mut orders = self.orders.write().await;
        let Some(order) = orders.get_mut(order_id) else {
            return CancelOutcome::NotFound;
        };
        if !order.can_cancel {
            return CancelOutcome::NotCancellable;
        }
        order.status = OrderStatus::Cancelled;
        order.can_cancel = false;
        tracing::info!(order_id, "order cancelled");
        CancelOutcome::Cancelled
    }

    pub async fn process_return(&self, order_id: &str, reason: &str) -> ReturnOutcome {
        let orders = self.orders.read().await;
        let Some(order) = orders.get(order_id) else {
            return ReturnOutcome::NotFound;
        };
        if order.status != OrderStatus::Delivered {
            return ReturnOutcome::NotDelivered;
        }
        let number = self.next_return.fetch_add(1, Ordering::Relaxed);
        let return_id = format!("RET{number:04}");
        tracing::info!(order_id, %return_id, reason, "return accepted");
        ReturnOutcome::Accepted { return_id }
    }
}

#[derive(Clone)]
pub struct ProductStore {
    products: Arc<RwLock<BTreeMap<String, Product>>>,
}

impl ProductStore {
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(
                products
                    .into_iter()
                    .map(|product| (product.product_id.clone(), product))
                    .collect(),
            )),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::products())
    }

    pub async fn get(&self, product_id: &str) -> Option<Product> {
        self.products.read().await.get(product_id).cloned()
    }

    /// Case-insensitive name substring match, optionally restricted to a
    /// category.
    pub async fn search(&self, query: &str, category: Option<&str>) -> Vec<Product> {
        let query = query.to_lowercase();
        self.products
            .read()
            .await
            .values()
            .filter(|product| product.name.to_lowercase().contains(&query))
            .filter(|product| {
                category.map_or(true, |category| {
                    product.category.eq_ignore_ascii_case(category)
                })
            })
            .cloned()
            .collect()
    }

    /// Weather first (cold or winter → clothing, rain → waterproof), then
    /// category, then the three best rated products.
    pub async fn recommendations(
        &self,
        category: Option<&str>,
        weather_condition: Option<&str>,
    ) -> Vec<Product> {
        let products = self.products.read().await;
        let mut picks: Vec<Product> = Vec::new();

        if let Some(condition) = weather_condition.map(str::to_lowercase) {
            if condition.contains("cold") || condition.contains("winter") {
                picks = products
                    .values()
                    .filter(|p| {
                        p.name.to_lowercase().contains("winter")
                            || p.category.eq_ignore_ascii_case("clothing")
                    })
                    .cloned()
                    .collect();
            } else if condition.contains("rain") {
                picks = products
                    .values()
                    .filter(|p| {
                        p.features
                            .iter()
                            .any(|f| f.to_lowercase().contains("waterproof"))
                    })
                    .cloned()
                    .collect();
            }
        }

        if picks.is_empty() {
            if let Some(category) = category {
                picks = products
                    .values()
                    .filter(|p| p.category.eq_ignore_ascii_case(category))
                    .cloned()
                    .collect();
            }
        }

        if picks.is_empty() {
            picks = products.values().cloned().collect();
            picks.sort_by(|a, b| b.rating.total_cmp(&a.rating));
            picks.truncate(3);
        }

        picks
    }
}

#[derive(Clone)]
pub struct CustomerStore {
    customers: Arc<RwLock<BTreeMap<String, Customer>>>,
}

/// Partial preference change; absent fields are left as they are.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreferenceUpdate {
    pub categories: Option<Vec<String>>,
    pub brands: Option<Vec<String>>,
    pub communication: Option<String>,
}

impl PreferenceUpdate {
    pub fn is_empty(&self) -> bool {
        self.categories.is_none() && self.brands.is_none() && self.communication.is_none()
    }

    fn apply(self, preferences: &mut Preferences) {
        if let Some(categories) = self.categories {
            preferences.categories = categories;
        }
        if let Some(brands) = self.brands {
            preferences.brands = brands;
        }
        if let Some(communication) = self.communication {
            preferences.communication = communication;
        }
    }
}

impl CustomerStore {
    pub fn new(customers: impl IntoIterator<Item = Customer>) -> Self {
        Self {
            customers: Arc::new(RwLock::new(
                customers
                    .into_iter()
                    .map(|customer| (customer.customer_id.clone(), customer))
                    .collect(),
            )),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::customers())
    }

    pub async fn get(&self, customer_id: &str) -> Option<Customer> {
        self.customers.read().await.get(customer_id).cloned()
    }

    pub async fn by_email(&self, email: &str) -> Option<Customer> {
        self.customers
            .read()
            .await
            .values()
            .find(|customer| customer.email.eq_ignore_ascii_case(email.trim()))
            .cloned()
    }

    /// Returns the updated customer, or `None` when the id is unknown.
    pub async fn update_preferences(
        &self,
        customer_id: &str,
        update: PreferenceUpdate,
    ) -> Option<Customer> {
        let mut customers = self.customers.write().await;
        let customer = customers.get_mut(customer_id)?;
        update.apply(&mut customer.preferences);
        tracing::info!(customer_id, "customer preferences updated");
        Some(customer.clone())
    }
}

/// The three stores the e-commerce tools operate on.
#[derive(Clone)]
pub struct ShopData {
    pub orders: OrderStore,
    pub products: ProductStore,
    pub customers: CustomerStore,
}

impl ShopData {
    pub fn seeded() -> Self {
        Self {
            orders: OrderStore::seeded(),
            products: ProductStore::seeded(),
            customers: CustomerStore::seeded(),
        }
    }
}

impl Default for ShopData {
    fn default() -> Self {
        Self::seeded()
    }
}
