//! End-to-end user journeys.
//!
//! A flow is an ordered sequence of contract checks sharing local state:
//! identifiers from one step feed the next. Steps are strictly sequential
//! and fail-fast; the first failed assertion aborts the remaining steps.
//! Read-after-write boundaries go through [`poll_until`] rather than fixed
//! sleeps.

use chrono::Utc;
use gateprobe_core::Favourite;
use reqwest::StatusCode;
use tracing::info;

use crate::checks::{favourites, products, users};
use crate::client::GatewayClient;
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::fixtures;
use crate::poll::poll_until;

/// Registration and profile management: create a user, wait until the
/// profile is readable, update the name fields, verify the update landed.
///
/// # Errors
///
/// Fails fast on the first step whose assertion does not hold.
pub async fn user_registration(
    client: &GatewayClient,
    config: &HarnessConfig,
) -> Result<(), HarnessError> {
    let mut user = fixtures::registration_user();
    let user_id = user.user_id;

    info!(step = 1, %user_id, "creating user");
    let created = users::create(client, &user).await?;

    info!(step = 2, "waiting for the created profile to become readable");
    let created_id = created.user_id;
    let expected_email = user.email.clone();
    let retrieved = poll_until("created user to be readable", config.consistency_timeout, || {
        let expected_email = expected_email.clone();
        async move {
            match users::get_by_id(client, created_id).await {
                Ok(profile) if profile.email == expected_email => Ok(Some(profile)),
                Ok(_) => Ok(None),
                Err(HarnessError::UnexpectedStatus { status, .. })
                    if status == StatusCode::NOT_FOUND =>
                {
                    Ok(None)
                }
                Err(e) => Err(e),
            }
        }
    })
    .await?;
    info!(step = 2, first_name = %retrieved.first_name, last_name = %retrieved.last_name, "profile retrieved");

    info!(step = 3, "updating profile names");
    user.first_name = "María Updated".to_string();
    user.last_name = "García Updated".to_string();
    users::update(client, &user).await?;

    info!(step = 4, "verifying the profile update");
    let expected_first_name = user.first_name.clone();
    poll_until("profile update to be visible", config.consistency_timeout, || {
        let expected_first_name = expected_first_name.clone();
        async move {
            let profile = users::get_by_id(client, user_id).await?;
            Ok((profile.first_name == expected_first_name).then_some(()))
        }
    })
    .await?;

    info!("user registration journey passed");
    Ok(())
}

/// Authentication setup: create a user with a credential, then verify the
/// profile is readable and carries the credential's username.
///
/// # Errors
///
/// Fails fast on the first step whose assertion does not hold.
pub async fn user_authentication(
    client: &GatewayClient,
    config: &HarnessConfig,
) -> Result<(), HarnessError> {
    let user = fixtures::authentication_user();

    info!(step = 1, user_id = %user.user_id, "creating user with credential");
    let created = users::create(client, &user).await?;

    info!(step = 2, "verifying the profile is accessible");
    let created_id = created.user_id;
    let profile = poll_until("authenticated profile to be readable", config.consistency_timeout, || async move {
        match users::get_by_id(client, created_id).await {
            Ok(profile) => Ok(Some(profile)),
            Err(HarnessError::UnexpectedStatus { status, .. })
                if status == StatusCode::NOT_FOUND =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    })
    .await?;

    // The service omits the credential on some read paths; when it is
    // present, the username must match what was registered.
    if let (Some(sent), Some(echoed)) = (&user.credential, &profile.credential)
        && sent.username != echoed.username
    {
        return Err(HarnessError::FieldMismatch {
            context: "GET /user-service/api/users/{id}".to_string(),
            field: "credential.username",
            expected: sent.username.clone(),
            actual: echoed.username.clone(),
        });
    }

    info!("user authentication journey passed");
    Ok(())
}

/// Favouriting: create a user, browse the catalog, favourite the first
/// product found.
///
/// # Errors
///
/// Fails fast on the first step whose assertion does not hold, including an
/// empty product catalog.
pub async fn favourite_products(
    client: &GatewayClient,
    _config: &HarnessConfig,
) -> Result<(), HarnessError> {
    let user = fixtures::favourites_user();

    info!(step = 1, user_id = %user.user_id, "creating user");
    let created = users::create(client, &user).await?;

    info!(step = 2, "browsing the product catalog");
    let catalog = products::list_non_empty(client).await?;
    let first = catalog
        .collection
        .first()
        .ok_or_else(|| HarnessError::EmptyCollection {
            context: "GET /product-service/api/products".to_string(),
        })?;
    info!(step = 2, count = catalog.len(), product_id = %first.product_id, "product selected");

    info!(step = 3, "adding the product to favourites");
    let favourite = Favourite::new(created.user_id, first.product_id, Utc::now().naive_utc());
    favourites::create(client, &favourite).await?;

    info!("favourite products journey passed");
    Ok(())
}
