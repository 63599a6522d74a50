//! Favourite service contract checks.
//!
//! The canonical favourite payload is the flat
//! `{userId, productId, likeDate}` shape. List responses may embed full user
//! and product representations, so the envelope check stays shape-agnostic.

use gateprobe_core::{Collection, Favourite, FavouriteId};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::info;

use super::{CREATE_OK, DELETE_OK, READ_OK, ensure_echo, expect_status, read_json};
use crate::client::GatewayClient;
use crate::error::HarnessError;

/// Create a favourite; the response must echo both identifiers.
///
/// # Errors
///
/// Returns an error on unexpected status, undecodable body, or identifier
/// mismatch.
pub async fn create(
    client: &GatewayClient,
    favourite: &Favourite,
) -> Result<Favourite, HarnessError> {
    let context = "POST /favourite-service/api/favourites";
    let response = client.create_favourite(favourite).await?;
    expect_status(&response, CREATE_OK, context)?;
    let created: Favourite = read_json(response, context).await?;
    ensure_echo(context, "userId", &favourite.user_id, &created.user_id)?;
    ensure_echo(
        context,
        "productId",
        &favourite.product_id,
        &created.product_id,
    )?;
    info!(user_id = %created.user_id, product_id = %created.product_id, "favourite created");
    Ok(created)
}

/// List all favourites; the `collection` envelope must be present.
///
/// # Errors
///
/// Returns an error on unexpected status or a body without the envelope.
pub async fn list(client: &GatewayClient) -> Result<Collection<Value>, HarnessError> {
    let context = "GET /favourite-service/api/favourites";
    let response = client.list_favourites().await?;
    expect_status(&response, READ_OK, context)?;
    let favourites: Collection<Value> = read_json(response, context).await?;
    info!(count = favourites.len(), "favourites listed");
    Ok(favourites)
}

/// Delete a favourite; already-deleted identifiers are tolerated.
///
/// # Errors
///
/// Returns an error when the status is outside `{200, 204, 404}` (a 5xx is
/// never accepted).
pub async fn delete(client: &GatewayClient, id: FavouriteId) -> Result<StatusCode, HarnessError> {
    let context = "DELETE /favourite-service/api/favourites/{id}";
    let response = client.delete_favourite(id).await?;
    expect_status(&response, DELETE_OK, context)?;
    info!(favourite_id = %id, status = %response.status(), "favourite delete processed");
    Ok(response.status())
}
