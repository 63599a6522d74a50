//! User service contract checks.

use gateprobe_core::{Collection, User, UserId};
use reqwest::StatusCode;
use tracing::info;

use super::{CREATE_OK, READ_OK, UPDATE_OK, ensure_echo, expect_status, read_json};
use crate::client::GatewayClient;
use crate::error::HarnessError;

/// Create a user; the response must echo the identifying fields.
///
/// # Errors
///
/// Returns an error on unexpected status, undecodable body, or when the
/// service does not echo the submitted email/first name.
pub async fn create(client: &GatewayClient, user: &User) -> Result<User, HarnessError> {
    let context = "POST /user-service/api/users";
    let response = client.create_user(user).await?;
    expect_status(&response, CREATE_OK, context)?;
    let created: User = read_json(response, context).await?;
    ensure_echo(context, "email", &user.email, &created.email)?;
    ensure_echo(context, "firstName", &user.first_name, &created.first_name)?;
    info!(user_id = %created.user_id, "user created");
    Ok(created)
}

/// List all users; the `collection` envelope must be present.
///
/// # Errors
///
/// Returns an error on unexpected status or a body without the envelope.
pub async fn list(client: &GatewayClient) -> Result<Collection<User>, HarnessError> {
    let context = "GET /user-service/api/users";
    let response = client.list_users().await?;
    expect_status(&response, READ_OK, context)?;
    let users: Collection<User> = read_json(response, context).await?;
    info!(count = users.len(), "users listed");
    Ok(users)
}

/// List all users and require at least one (the deployment seeds users).
///
/// # Errors
///
/// Returns [`HarnessError::EmptyCollection`] when no users exist.
pub async fn list_non_empty(client: &GatewayClient) -> Result<Collection<User>, HarnessError> {
    let users = list(client).await?;
    if users.is_empty() {
        return Err(HarnessError::EmptyCollection {
            context: "GET /user-service/api/users".to_string(),
        });
    }
    Ok(users)
}

/// Fetch one user by id; the response must carry that id.
///
/// # Errors
///
/// Returns an error on unexpected status, undecodable body, or id mismatch.
pub async fn get_by_id(client: &GatewayClient, id: UserId) -> Result<User, HarnessError> {
    let context = "GET /user-service/api/users/{id}";
    let response = client.get_user(id).await?;
    expect_status(&response, READ_OK, context)?;
    let user: User = read_json(response, context).await?;
    ensure_echo(context, "userId", &id, &user.user_id)?;
    info!(user_id = %id, "user retrieved");
    Ok(user)
}

/// Update a user with a full resource body.
///
/// # Errors
///
/// Returns an error when the status is outside `{200, 204}`.
pub async fn update(client: &GatewayClient, user: &User) -> Result<StatusCode, HarnessError> {
    let context = "PUT /user-service/api/users";
    let response = client.update_user(user).await?;
    expect_status(&response, UPDATE_OK, context)?;
    info!(user_id = %user.user_id, "user updated");
    Ok(response.status())
}
