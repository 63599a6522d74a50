//! `gateprobe check` - Run the contract checks.
//!
//! Checks run sequentially and are isolated from one another: a failing
//! check is logged and counted, the rest of the suite still runs. The
//! command fails when any check failed.

use chrono::Utc;
use clap::ValueEnum;
use gateprobe_core::{Favourite, FavouriteId, ProductId, UserId};
use gateprobe_harness::checks::{favourites, gateway, products, users};
use gateprobe_harness::{GatewayClient, HarnessConfig, HarnessError, Service, fixtures};
use rust_decimal::Decimal;
use tracing::{error, info};

/// Which surface to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Suite {
    Gateway,
    Users,
    Products,
    Favourites,
    All,
}

impl Suite {
    const fn includes(self, other: Self) -> bool {
        matches!(self, Self::All) || self as u8 == other as u8
    }
}

/// Outcome ledger shared by every check in the run.
struct Ledger {
    passed: u32,
    failed: u32,
}

impl Ledger {
    const fn new() -> Self {
        Self {
            passed: 0,
            failed: 0,
        }
    }

    fn record<T>(&mut self, name: &str, outcome: Result<T, HarnessError>) {
        match outcome {
            Ok(_) => {
                info!(check = name, "passed");
                self.passed += 1;
            }
            Err(e) => {
                error!(check = name, error = %e, "failed");
                self.failed += 1;
            }
        }
    }
}

/// Run the selected suite.
///
/// # Errors
///
/// Returns an error when any check in the suite failed.
pub async fn run(config: &HarnessConfig, suite: Suite) -> Result<(), Box<dyn std::error::Error>> {
    let client = GatewayClient::new(config)?;
    let mut ledger = Ledger::new();

    if suite.includes(Suite::Gateway) {
        run_gateway_suite(&client, &mut ledger).await;
    }
    if suite.includes(Suite::Users) {
        run_user_suite(&client, &mut ledger).await;
    }
    if suite.includes(Suite::Products) {
        run_product_suite(&client, &mut ledger).await;
    }
    if suite.includes(Suite::Favourites) {
        run_favourite_suite(&client, &mut ledger).await;
    }

    let total = ledger.passed + ledger.failed;
    info!(passed = ledger.passed, failed = ledger.failed, total, "check run finished");

    if ledger.failed > 0 {
        return Err(format!("{}/{total} checks failed", ledger.failed).into());
    }
    Ok(())
}

async fn run_gateway_suite(client: &GatewayClient, ledger: &mut Ledger) {
    ledger.record("gateway health", gateway::health(client).await);
    ledger.record(
        "gateway routes user-service",
        gateway::routes_to(client, Service::User).await,
    );
    ledger.record(
        "gateway routes product-service",
        gateway::routes_to(client, Service::Product).await,
    );
    ledger.record(
        "gateway routes favourite-service",
        gateway::routes_to(client, Service::Favourite).await,
    );
    ledger.record(
        "all services reachable",
        gateway::all_services_reachable(client).await,
    );
}

async fn run_user_suite(client: &GatewayClient, ledger: &mut Ledger) {
    let user = fixtures::sample_user();
    ledger.record("user create", users::create(client, &user).await);
    ledger.record("user list", users::list_non_empty(client).await);
    ledger.record(
        "user get by id",
        users::get_by_id(client, UserId::new(1)).await,
    );
    ledger.record("user update", update_user(client).await);
    ledger.record(
        "user service health",
        gateway::service_health(client, Service::User).await,
    );
}

/// Create the fixture user, then update its first name.
async fn update_user(client: &GatewayClient) -> Result<(), HarnessError> {
    let mut user = fixtures::sample_user();
    users::create(client, &user).await?;
    user.first_name = "Updated".to_string();
    users::update(client, &user).await?;
    Ok(())
}

async fn run_product_suite(client: &GatewayClient, ledger: &mut Ledger) {
    let product = fixtures::sample_product();
    ledger.record("product create", products::create(client, &product).await);
    ledger.record("product list", products::list_non_empty(client).await);
    ledger.record(
        "product get by id",
        products::get_by_id(client, ProductId::new(1)).await,
    );
    ledger.record("category list", products::categories(client).await);
    ledger.record("product update", update_product(client).await);
    ledger.record(
        "product service health",
        gateway::service_health(client, Service::Product).await,
    );
}

/// Create the fixture product, then update its title and price.
async fn update_product(client: &GatewayClient) -> Result<(), HarnessError> {
    let mut product = fixtures::sample_product();
    products::create(client, &product).await?;
    product.product_title = "Updated Product".to_string();
    product.price_unit = Decimal::new(14_999, 2);
    products::update(client, &product).await?;
    Ok(())
}

async fn run_favourite_suite(client: &GatewayClient, ledger: &mut Ledger) {
    let favourite = Favourite::new(UserId::new(2), ProductId::new(1), Utc::now().naive_utc());
    ledger.record(
        "favourite create",
        favourites::create(client, &favourite).await,
    );
    ledger.record("favourite list", favourites::list(client).await);
    ledger.record(
        "favourite delete",
        favourites::delete(client, FavouriteId::new(100)).await,
    );
    ledger.record(
        "favourite service health",
        gateway::service_health(client, Service::Favourite).await,
    );
}
