use async_trait::async_trait;
use serde::Deserialize;
use shopdesk_core::{FieldSpec, InputSchema, Tool, ToolError, ToolInput};

use crate::format;
use crate::store::ProductStore;

const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductIdArgs {
    product_id: String,
}

#[derive(Debug, Deserialize)]
struct RecommendationArgs {
    category: Option<String>,
    weather_condition: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct SearchProductsTool {
    products: ProductStore,
}

impl SearchProductsTool {
    pub fn new(products: ProductStore) -> Self {
        Self { products }
    }
}

#[async_trait]
impl Tool for SearchProductsTool {
    fn name(&self) -> &str {
        "search_products"
    }

    fn description(&self) -> &str {
        "Search for products by name or category. Use this when customers are looking for specific products or browsing categories."
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::string("query", "Search query for products"))
            .field(FieldSpec::string("category", "Optional category filter").optional())
    }

    async fn invoke(&self, input: ToolInput) -> Result<String, ToolError> {
        let args: SearchArgs = input.deserialize()?;
        let category = non_blank(args.category);
        let query = args.query.trim();
        let found = self.products.search(query, category.as_deref()).await;

        if found.is_empty() {
            let scope = category
                .map(|c| format!(" in category '{c}'"))
                .unwrap_or_default();
            return Ok(format!(
                "RESULT: No products found for '{query}'{scope}. You might want to try different search terms or browse our categories."
            ));
        }

        let listing = found
            .iter()
            .map(format::product_summary)
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(format!(
            "RESULT: Found {} product(s):\n\n{listing}",
            found.len()
        ))
    }
}

pub struct ProductDetailsTool {
    products: ProductStore,
}

impl ProductDetailsTool {
    pub fn new(products: ProductStore) -> Self {
        Self { products }
    }
}

#[async_trait]
impl Tool for ProductDetailsTool {
    fn name(&self) -> &str {
        "product_details"
    }

    fn description(&self) -> &str {
        "Get detailed information about a specific product by product ID. Use this when customers need detailed product information."
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new().field(FieldSpec::string(
            "product_id",
            "Product ID to get details for",
        ))
    }

    async fn invoke(&self, input: ToolInput) -> Result<String, ToolError> {
        let args: ProductIdArgs = input.deserialize()?;
        let product_id = args.product_id.trim();
        Ok(match self.products.get(product_id).await {
            Some(product) => format::product_details(&product),
            None => format!(
                "RESULT: Product {product_id} not found. This product ID does not exist in our catalog."
            ),
        })
    }
}

pub struct ProductRecommendationsTool {
    products: ProductStore,
}

impl ProductRecommendationsTool {
    pub fn new(products: ProductStore) -> Self {
        Self { products }
    }
}

#[async_trait]
impl Tool for ProductRecommendationsTool {
    fn name(&self) -> &str {
        "product_recommendations"
    }

    fn description(&self) -> &str {
        "Get product recommendations based on category or weather conditions. Use this to suggest products to customers."
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::string("category", "Product category").optional())
            .field(
                FieldSpec::string("weather_condition", "Current weather condition").optional(),
            )
    }

    async fn invoke(&self, input: ToolInput) -> Result<String, ToolError> {
        let args: RecommendationArgs = input.deserialize()?;
        let category = non_blank(args.category);
        let weather = non_blank(args.weather_condition);
        let picks = self
            .products
            .recommendations(category.as_deref(), weather.as_deref())
            .await;

        if picks.is_empty() {
            return Ok("RESULT: No recommendations available at the moment.".to_string());
        }

        let listing = picks
            .iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|p| {
                format!(
                    "**{}** - {}\n{}\nRating: {:.1}/5.0",
                    p.name,
                    format::money(p.price),
                    p.description,
                    p.rating
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(format!(
            "RESULT: Here are some recommended products:\n\n{listing}"
        ))
    }
}
