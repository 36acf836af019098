use crate::records::{Customer, Order, Product};

/// `in_stock` → `In Stock`, `light rain` → `Light Rain`.
pub(crate) fn title_case(text: &str) -> String {
    text.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub(crate) fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

pub(crate) fn order_details(order: &Order) -> String {
    let mut out = format!(
        "RESULT: Order Details Found\nOrder ID: {}\nStatus: {}\nOrder Date: {}\nTotal: {}\nItems:\n",
        order.order_id,
        title_case(order.status.as_str()),
        order.order_date,
        money(order.total),
    );
    for item in &order.items {
        out.push_str(&format!(
            "  - {} (Qty: {}) - {}\n",
            item.name,
            item.quantity,
            money(item.price)
        ));
    }
    out.push_str(&format!("Shipping Address: {}\n", order.shipping_address));
    if let Some(tracking) = &order.tracking_number {
        out.push_str(&format!("Tracking Number: {tracking}\n"));
    }
    out.trim_end().to_string()
}

pub(crate) fn order_line(order: &Order) -> String {
    format!(
        "Order {}: {} - {} (Date: {})",
        order.order_id,
        title_case(order.status.as_str()),
        money(order.total),
        order.order_date
    )
}

pub(crate) fn product_summary(product: &Product) -> String {
    format!(
        "**{}** (ID: {})\nCategory: {}\nPrice: {}\nAvailability: {}\nRating: {:.1}/5.0\nDescription: {}",
        product.name,
        product.product_id,
        product.category,
        money(product.price),
        title_case(product.availability.as_str()),
        product.rating,
        product.description,
    )
}

pub(crate) fn product_details(product: &Product) -> String {
    let mut out = format!(
        "RESULT: Product Details Found\n**{}** (ID: {})\nCategory: {}\nPrice: {}\nAvailability: {}\nStock: {} units\nRating: {:.1}/5.0\nDescription: {}\n\nFeatures:\n",
        product.name,
        product.product_id,
        product.category,
        money(product.price),
        title_case(product.availability.as_str()),
        product.stock_count,
        product.rating,
        product.description,
    );
    for feature in &product.features {
        out.push_str(&format!("  • {feature}\n"));
    }
    out.trim_end().to_string()
}

pub(crate) fn customer_details(customer: &Customer) -> String {
    format!(
        "RESULT: Customer Information Found\nName: {}\nEmail: {}\nPhone: {}\nAddress: {}\nLoyalty Points: {}\nTier: {}\n\nPreferences:\n  Categories: {}\n  Brands: {}\n  Communication: {}\n\nRecent Orders: {}",
        customer.name,
        customer.email,
        customer.phone,
        customer.address,
        customer.loyalty_points,
        customer.tier,
        customer.preferences.categories.join(", "),
        customer.preferences.brands.join(", "),
        customer.preferences.communication,
        customer.order_history.join(", "),
    )
}
