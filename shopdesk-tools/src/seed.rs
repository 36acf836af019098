//! Demo catalog the stores start with.

use crate::records::{
    Availability, Customer, Order, OrderItem, OrderStatus, Preferences, Product,
};

fn item(product_id: &str, name: &str, quantity: u32, price: f64) -> OrderItem {
    OrderItem {
        product_id: product_id.to_string(),
        name: name.to_string(),
        quantity,
        price,
    }
}

#[allow(clippy::too_many_arguments)]
fn order(
    order_id: &str,
    customer_id: &str,
    status: OrderStatus,
    items: Vec<OrderItem>,
    total: f64,
    order_date: &str,
    shipping_address: &str,
    tracking_number: Option<&str>,
) -> Order {
    Order {
        order_id: order_id.to_string(),
        customer_id: customer_id.to_string(),
        status,
        items,
        total,
        order_date: order_date.to_string(),
        shipping_address: shipping_address.to_string(),
        tracking_number: tracking_number.map(str::to_string),
        can_cancel: status == OrderStatus::Processing,
    }
}

pub fn orders() -> Vec<Order> {
    vec![
        order(
            "ORD001",
            "CUST001",
            OrderStatus::Shipped,
            vec![item("PROD001", "Wireless Headphones", 1, 99.99)],
            99.99,
            "2024-01-15",
            "123 Main St, New York, NY",
            Some("TRK123456789"),
        ),
        order(
            "ORD002",
            "CUST001",
            OrderStatus::Processing,
            vec![
                item("PROD002", "Smart Watch", 1, 249.99),
                item("PROD003", "Phone Case", 2, 19.99),
            ],
            289.97,
            "2024-01-20",
            "123 Main St, New York, NY",
            None,
        ),
        order(
            "ORD003",
            "CUST002",
            OrderStatus::Delivered,
            vec![item("PROD004", "Laptop Stand", 1, 45.99)],
            45.99,
            "2024-01-10",
            "456 Oak Ave, Los Angeles, CA",
            Some("TRK987654321"),
        ),
        order(
            "ORD004",
            "CUST003",
            OrderStatus::Processing,
            vec![item("PROD005", "Winter Jacket", 1, 89.99)],
            89.99,
            "2024-01-22",
            "789 Pine Rd, Chicago, IL",
            None,
        ),
        order(
            "ORD005",
            "CUST004",
            OrderStatus::Delivered,
            vec![item("PROD006", "Gaming Mouse", 1, 59.99)],
            59.99,
            "2024-01-18",
            "321 Elm St, Houston, TX",
            Some("TRK2468101214"),
        ),
        order(
            "ORD006",
            "CUST005",
            OrderStatus::Processing,
            vec![item("PROD007", "Bluetooth Speaker", 2, 34.99)],
            69.98,
            "2024-01-21",
            "654 Maple Ln, Miami, Florida",
            None,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn product(
    product_id: &str,
    name: &str,
    category: &str,
    price: f64,
    availability: Availability,
    stock_count: u32,
    description: &str,
    rating: f64,
    features: &[&str],
) -> Product {
    Product {
        product_id: product_id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price,
        availability,
        stock_count,
        description: description.to_string(),
        rating,
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}

pub fn products() -> Vec<Product> {
    use Availability::{InStock, LowStock};
    vec![
        product(
            "PROD001",
            "Wireless Headphones",
            "Electronics",
            99.99,
            InStock,
            25,
            "High-quality wireless headphones with noise cancellation",
            4.5,
            &["Bluetooth 5.0", "30-hour battery", "Active noise cancellation"],
        ),
        product(
            "PROD002",
            "Smart Watch",
            "Electronics",
            249.99,
            InStock,
            12,
            "Feature-rich smartwatch with health monitoring",
            4.3,
            &["Heart rate monitor", "GPS", "Water resistant", "7-day battery"],
        ),
        product(
            "PROD003",
            "Phone Case",
            "Accessories",
            19.99,
            InStock,
            100,
            "Durable protective phone case",
            4.1,
            &["Drop protection", "Wireless charging compatible", "Clear design"],
        ),
        product(
            "PROD004",
            "Laptop Stand",
            "Office",
            45.99,
            LowStock,
            3,
            "Adjustable laptop stand for ergonomic working",
            4.7,
            &[
                "Adjustable height",
                "Foldable",
                "Heat dissipation",
                "Universal compatibility",
            ],
        ),
        product(
            "PROD005",
            "Winter Jacket",
            "Clothing",
            89.99,
            InStock,
            15,
            "Warm and waterproof winter jacket",
            4.4,
            &["Waterproof", "Insulated", "Multiple pockets", "Wind resistant"],
        ),
        product(
            "PROD006",
            "Gaming Mouse",
            "Electronics",
            59.99,
            InStock,
            40,
            "Ergonomic gaming mouse with customizable buttons",
            4.6,
            &["RGB lighting", "High precision sensor", "Wireless and wired modes"],
        ),
        product(
            "PROD007",
            "Bluetooth Speaker",
            "Electronics",
            34.99,
            InStock,
            50,
            "Portable Bluetooth speaker with rich bass",
            4.2,
            &["Water resistant", "12-hour battery", "Compact design"],
        ),
        product(
            "PROD008",
            "Desk Lamp",
            "Office",
            29.99,
            InStock,
            20,
            "LED desk lamp with adjustable brightness",
            4.0,
            &["Adjustable brightness", "Touch control", "Energy efficient"],
        ),
        product(
            "PROD009",
            "Running Shoes",
            "Clothing",
            75.99,
            InStock,
            30,
            "Lightweight running shoes for everyday use",
            4.3,
            &["Breathable material", "Cushioned sole", "Durable outsole"],
        ),
        product(
            "PROD010",
            "Coffee Mug",
            "Accessories",
            14.99,
            InStock,
            60,
            "Ceramic coffee mug with a sleek design",
            4.5,
            &["Microwave safe", "Dishwasher safe", "350ml capacity"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn customer(
    customer_id: &str,
    name: &str,
    email: &str,
    phone: &str,
    address: &str,
    loyalty_points: u32,
    tier: &str,
    categories: &[&str],
    brands: &[&str],
    communication: &str,
    order_history: &[&str],
) -> Customer {
    Customer {
        customer_id: customer_id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        loyalty_points,
        tier: tier.to_string(),
        preferences: Preferences {
            categories: categories.iter().map(|c| c.to_string()).collect(),
            brands: brands.iter().map(|b| b.to_string()).collect(),
            communication: communication.to_string(),
        },
        order_history: order_history.iter().map(|o| o.to_string()).collect(),
    }
}

pub fn customers() -> Vec<Customer> {
    vec![
        customer(
            "CUST001",
            "John Doe",
            "john.doe@email.com",
            "+1-555-0123",
            "123 Main St, New York, NY",
            1250,
            "Gold",
            &["Electronics", "Books"],
            &["TechBrand", "BookCorp"],
            "email",
            &["ORD001", "ORD002"],
        ),
        customer(
            "CUST002",
            "Jane Smith",
            "jane.smith@email.com",
            "+1-555-0456",
            "456 Oak Ave, Los Angeles, CA",
            750,
            "Silver",
            &["Home", "Office"],
            &["HomePlus", "OfficeMax"],
            "sms",
            &["ORD003"],
        ),
        customer(
            "CUST003",
            "Alice Johnson",
            "alice.johnson@email.com",
            "+1-555-0789",
            "789 Pine Rd, Chicago, Illinois",
            300,
            "Bronze",
            &["Clothing", "Accessories"],
            &["Fashionista", "Accents"],
            "email",
            &["ORD004"],
        ),
        customer(
            "CUST004",
            "Bob Brown",
            "bob.brown@email.com",
            "+1-555-0110",
            "321 Elm St, Houston, Texas",
            980,
            "Gold",
            &["Electronics", "Gaming"],
            &["GamePro", "TechBrand"],
            "sms",
            &["ORD005"],
        ),
        customer(
            "CUST005",
            "Carol White",
            "carol.white@email.com",
            "+1-555-0222",
            "654 Maple Ln, Miami, Florida",
            450,
            "Silver",
            &["Electronics", "Home"],
            &["HomePlus", "SoundMaster"],
            "email",
            &["ORD006"],
        ),
    ]
}
