//! Product service contract checks.

use gateprobe_core::{Category, Collection, Product, ProductId};
use reqwest::StatusCode;
use tracing::info;

use super::{CREATE_OK, READ_OK, UPDATE_OK, ensure_echo, expect_status, read_json};
use crate::client::GatewayClient;
use crate::error::HarnessError;

/// Create a product; the response must echo the title.
///
/// # Errors
///
/// Returns an error on unexpected status, undecodable body, or when the
/// submitted title is not echoed.
pub async fn create(client: &GatewayClient, product: &Product) -> Result<Product, HarnessError> {
    let context = "POST /product-service/api/products";
    let response = client.create_product(product).await?;
    expect_status(&response, CREATE_OK, context)?;
    let created: Product = read_json(response, context).await?;
    ensure_echo(
        context,
        "productTitle",
        &product.product_title,
        &created.product_title,
    )?;
    info!(product_id = %created.product_id, "product created");
    Ok(created)
}

/// List all products; the `collection` envelope must be present.
///
/// # Errors
///
/// Returns an error on unexpected status or a body without the envelope.
pub async fn list(client: &GatewayClient) -> Result<Collection<Product>, HarnessError> {
    let context = "GET /product-service/api/products";
    let response = client.list_products().await?;
    expect_status(&response, READ_OK, context)?;
    let products: Collection<Product> = read_json(response, context).await?;
    info!(count = products.len(), "products listed");
    Ok(products)
}

/// List all products and require at least one (the catalog is seeded).
///
/// # Errors
///
/// Returns [`HarnessError::EmptyCollection`] when the catalog is empty.
pub async fn list_non_empty(client: &GatewayClient) -> Result<Collection<Product>, HarnessError> {
    let products = list(client).await?;
    if products.is_empty() {
        return Err(HarnessError::EmptyCollection {
            context: "GET /product-service/api/products".to_string(),
        });
    }
    Ok(products)
}

/// Fetch one product by id; the response must carry that id.
///
/// # Errors
///
/// Returns an error on unexpected status, undecodable body, or id mismatch.
pub async fn get_by_id(client: &GatewayClient, id: ProductId) -> Result<Product, HarnessError> {
    let context = "GET /product-service/api/products/{id}";
    let response = client.get_product(id).await?;
    expect_status(&response, READ_OK, context)?;
    let product: Product = read_json(response, context).await?;
    ensure_echo(context, "productId", &id, &product.product_id)?;
    info!(product_id = %id, "product retrieved");
    Ok(product)
}

/// Update a product with a full resource body.
///
/// # Errors
///
/// Returns an error when the status is outside `{200, 204}`.
pub async fn update(client: &GatewayClient, product: &Product) -> Result<StatusCode, HarnessError> {
    let context = "PUT /product-service/api/products";
    let response = client.update_product(product).await?;
    expect_status(&response, UPDATE_OK, context)?;
    info!(product_id = %product.product_id, "product updated");
    Ok(response.status())
}

/// List all categories; the envelope must be present (may be empty).
///
/// # Errors
///
/// Returns an error on unexpected status or a body without the envelope.
pub async fn categories(client: &GatewayClient) -> Result<Collection<Category>, HarnessError> {
    let context = "GET /product-service/api/categories";
    let response = client.list_categories().await?;
    expect_status(&response, READ_OK, context)?;
    let categories: Collection<Category> = read_json(response, context).await?;
    info!(count = categories.len(), "categories listed");
    Ok(categories)
}
