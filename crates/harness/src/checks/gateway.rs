//! Gateway-level checks: health and routing to each backend service.

use gateprobe_core::HealthStatus;
use tracing::{info, warn};

use super::{READ_OK, expect_status, read_json};
use crate::client::{GatewayClient, Service};
use crate::error::HarnessError;

/// The gateway's own health endpoint must answer 200 with `status == "UP"`.
///
/// # Errors
///
/// Returns [`HarnessError::NotHealthy`] when the gateway answers but does not
/// report `UP`.
pub async fn health(client: &GatewayClient) -> Result<(), HarnessError> {
    let context = "GET /actuator/health";
    let response = client.gateway_health().await?;
    expect_status(&response, READ_OK, context)?;
    let health: HealthStatus = read_json(response, context).await?;
    if !health.is_up() {
        return Err(HarnessError::NotHealthy {
            component: "api-gateway".to_string(),
            status: health.status,
        });
    }
    info!("api gateway is healthy");
    Ok(())
}

/// A backend service's health endpoint, reached through the gateway.
///
/// # Errors
///
/// Returns [`HarnessError::NotHealthy`] when the service answers but does not
/// report `UP`.
pub async fn service_health(client: &GatewayClient, service: Service) -> Result<(), HarnessError> {
    let context = service.health_label();
    let response = client.service_health(service).await?;
    expect_status(&response, READ_OK, context)?;
    let health: HealthStatus = read_json(response, context).await?;
    if !health.is_up() {
        return Err(HarnessError::NotHealthy {
            component: service.prefix().to_string(),
            status: health.status,
        });
    }
    info!(service = %service, "service is healthy");
    Ok(())
}

/// The gateway routes list requests to the given service (status 200).
///
/// # Errors
///
/// Returns an error when the routed request fails or is not answered with
/// status 200.
pub async fn routes_to(client: &GatewayClient, service: Service) -> Result<(), HarnessError> {
    let response = match service {
        Service::User => client.list_users().await?,
        Service::Product => client.list_products().await?,
        Service::Favourite => client.list_favourites().await?,
    };
    let context = format!("GET /{}/api (routing)", service.prefix());
    expect_status(&response, READ_OK, &context)?;
    info!(service = %service, "gateway routes correctly");
    Ok(())
}

/// Smoke check: every backend service is reachable and healthy.
///
/// All services are probed even when an early one fails, so the log shows the
/// full picture; the first failure is then returned.
///
/// # Errors
///
/// Returns the first failing service's error.
pub async fn all_services_reachable(client: &GatewayClient) -> Result<(), HarnessError> {
    let mut first_failure = None;
    let mut reachable = 0_usize;

    for service in Service::ALL {
        match service_health(client, service).await {
            Ok(()) => reachable += 1,
            Err(e) => {
                warn!(service = %service, error = %e, "service is not reachable");
                first_failure.get_or_insert(e);
            }
        }
    }

    info!(reachable, total = Service::ALL.len(), "service reachability");
    match first_failure {
        None => Ok(()),
        Some(e) => Err(e),
    }
}
