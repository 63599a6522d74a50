//! A single simulated client in the load generator.
//!
//! Each virtual user loops: pick a weighted action, execute it, report the
//! outcome, pause for a randomized think time. Failures are recorded and the
//! user keeps going; only the global stop signal ends the loop.

use std::sync::Arc;
use std::time::Duration;

use gateprobe_core::{Collection, Favourite, HealthStatus, Product, ProductId, User, UserId};
use chrono::Utc;
use rand::Rng;
use rand::rngs::StdRng;
use reqwest::StatusCode;
use tokio::sync::watch;
use tokio::time::{Instant, sleep};
use tracing::trace;

use super::sampler::WeightedSampler;
use super::stats::StatsCollector;
use crate::client::GatewayClient;

/// Upper bound on product ids remembered from a catalog browse.
pub(crate) const MAX_TRACKED_PRODUCTS: usize = 5;

/// Product detail views fall back to this id before any browse succeeded.
pub(crate) const FALLBACK_PRODUCT: ProductId = ProductId::new(1);

/// Registration ids are drawn from this range, clear of the seeded fixtures.
const REGISTRATION_ID_RANGE: std::ops::Range<i32> = 1_000..10_000;

/// One weighted action a virtual user can take per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    BrowseProducts,
    ViewProduct,
    ViewCategories,
    Register,
    ListUsers,
    ViewProfile,
    ListFavourites,
    AddFavourite,
    HealthCheck,
}

impl Action {
    /// Traffic mix: browsing dominates, writes are rare.
    pub(crate) const WEIGHTS: &'static [(Self, u32)] = &[
        (Self::BrowseProducts, 5),
        (Self::ViewProduct, 3),
        (Self::ViewCategories, 2),
        (Self::Register, 2),
        (Self::ListUsers, 2),
        (Self::ViewProfile, 1),
        (Self::ListFavourites, 1),
        (Self::AddFavourite, 1),
        (Self::HealthCheck, 1),
    ];

    /// Stable statistics label; path parameters stay templated so all ids
    /// aggregate under one name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BrowseProducts => "GET /products",
            Self::ViewProduct => "GET /products/{id}",
            Self::ViewCategories => "GET /categories",
            Self::Register => "POST /users (register)",
            Self::ListUsers => "GET /users",
            Self::ViewProfile => "GET /users/{id}",
            Self::ListFavourites => "GET /favourites",
            Self::AddFavourite => "POST /favourites",
            Self::HealthCheck => "GET /health",
        }
    }
}

/// State and behaviour of one virtual user.
pub(crate) struct VirtualUser {
    client: GatewayClient,
    stats: Arc<StatsCollector>,
    stop: watch::Receiver<bool>,
    rng: StdRng,
    sampler: WeightedSampler<Action>,
    wait_min: Duration,
    wait_max: Duration,
    /// Bounded sample of product ids seen in the last catalog browse.
    known_products: Vec<ProductId>,
    /// Own registered identity, once a registration succeeded.
    registered: Option<UserId>,
}

impl VirtualUser {
    pub(crate) fn new(
        client: GatewayClient,
        stats: Arc<StatsCollector>,
        stop: watch::Receiver<bool>,
        rng: StdRng,
        wait_min: Duration,
        wait_max: Duration,
    ) -> Self {
        Self {
            client,
            stats,
            stop,
            rng,
            sampler: WeightedSampler::new(Action::WEIGHTS),
            wait_min,
            wait_max,
            known_products: Vec::new(),
            registered: None,
        }
    }

    /// Run until the stop signal fires.
    pub(crate) async fn run(mut self) {
        loop {
            if *self.stop.borrow() {
                break;
            }

            let action = self.sampler.sample(&mut self.rng);
            self.perform(action).await;

            let think_time = self.think_time();
            tokio::select! {
                () = sleep(think_time) => {}
                _ = self.stop.changed() => break,
            }
        }
    }

    fn think_time(&mut self) -> Duration {
        if self.wait_max <= self.wait_min {
            return self.wait_min;
        }
        let span = self.wait_max - self.wait_min;
        self.wait_min + span.mul_f64(self.rng.random_range(0.0..=1.0))
    }

    /// Execute one action and report the outcome. Actions whose
    /// preconditions are unmet skip silently instead of recording a failure.
    async fn perform(&mut self, action: Action) {
        let started = Instant::now();
        let outcome = match action {
            Action::BrowseProducts => Some(self.browse_products().await),
            Action::ViewProduct => Some(self.view_product().await),
            Action::ViewCategories => Some(self.view_categories().await),
            Action::Register => Some(self.register().await),
            Action::ListUsers => Some(self.list_users().await),
            Action::ViewProfile => self.view_profile().await,
            Action::ListFavourites => Some(self.list_favourites().await),
            Action::AddFavourite => self.add_favourite().await,
            Action::HealthCheck => Some(self.health_check().await),
        };

        let Some(success) = outcome else {
            trace!(action = action.label(), "skipped: precondition unmet");
            return;
        };

        let latency = started.elapsed();
        if success {
            self.stats.record_success(action.label(), latency);
        } else {
            self.stats.record_failure(action.label(), latency);
        }
    }

    /// Browse the catalog and remember a bounded sample of product ids. An
    /// empty catalog counts as a failure: the journey-critical browse found
    /// nothing to show.
    async fn browse_products(&mut self) -> bool {
        let Ok(response) = self.client.list_products().await else {
            return false;
        };
        if response.status() != StatusCode::OK {
            return false;
        }
        match response.json::<Collection<Product>>().await {
            Ok(products) if !products.is_empty() => {
                self.known_products = products
                    .collection
                    .iter()
                    .take(MAX_TRACKED_PRODUCTS)
                    .map(|product| product.product_id)
                    .collect();
                true
            }
            _ => false,
        }
    }

    async fn view_product(&mut self) -> bool {
        let product_id = self.pick_known_product().unwrap_or(FALLBACK_PRODUCT);
        let Ok(response) = self.client.get_product(product_id).await else {
            return false;
        };
        response.status().is_success() && response.json::<Product>().await.is_ok()
    }

    async fn view_categories(&mut self) -> bool {
        let Ok(response) = self.client.list_categories().await else {
            return false;
        };
        response.status() == StatusCode::OK
            && response.json::<Collection<serde_json::Value>>().await.is_ok()
    }

    async fn register(&mut self) -> bool {
        let id = self.rng.random_range(REGISTRATION_ID_RANGE);
        let user = crate::fixtures::generated_user(id);
        let Ok(response) = self.client.create_user(&user).await else {
            return false;
        };
        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return false;
        }
        match response.json::<User>().await {
            Ok(created) => {
                self.registered = Some(created.user_id);
                true
            }
            Err(_) => false,
        }
    }

    async fn list_users(&mut self) -> bool {
        let Ok(response) = self.client.list_users().await else {
            return false;
        };
        response.status() == StatusCode::OK
            && response.json::<Collection<User>>().await.is_ok()
    }

    /// Requires an own registered identity; skips otherwise.
    async fn view_profile(&mut self) -> Option<bool> {
        let user_id = self.registered?;
        let Ok(response) = self.client.get_user(user_id).await else {
            return Some(false);
        };
        Some(response.status() == StatusCode::OK && response.json::<User>().await.is_ok())
    }

    async fn list_favourites(&mut self) -> bool {
        let Ok(response) = self.client.list_favourites().await else {
            return false;
        };
        response.status() == StatusCode::OK
            && response
                .json::<Collection<serde_json::Value>>()
                .await
                .is_ok()
    }

    /// Requires both an own identity and a known product; skips otherwise.
    async fn add_favourite(&mut self) -> Option<bool> {
        let user_id = self.registered?;
        let product_id = self.pick_known_product()?;
        let favourite = Favourite::new(user_id, product_id, Utc::now().naive_utc());
        let Ok(response) = self.client.create_favourite(&favourite).await else {
            return Some(false);
        };
        let status = response.status();
        Some(status == StatusCode::OK || status == StatusCode::CREATED)
    }

    async fn health_check(&mut self) -> bool {
        let Ok(response) = self.client.gateway_health().await else {
            return false;
        };
        if response.status() != StatusCode::OK {
            return false;
        }
        response
            .json::<HealthStatus>()
            .await
            .is_ok_and(|health| health.is_up())
    }

    fn pick_known_product(&mut self) -> Option<ProductId> {
        if self.known_products.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..self.known_products.len());
        self.known_products.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_labels_are_templated() {
        assert_eq!(Action::ViewProduct.label(), "GET /products/{id}");
        assert_eq!(Action::ViewProfile.label(), "GET /users/{id}");
    }

    #[test]
    fn test_weights_cover_every_action() {
        let sampler = WeightedSampler::new(Action::WEIGHTS);
        // 5+3+2+2+2+1+1+1+1
        assert_eq!(sampler.total_weight(), 18);
    }

    #[test]
    fn test_weighted_mix_favours_browsing() {
        let sampler = WeightedSampler::new(Action::WEIGHTS);
        let mut rng = StdRng::seed_from_u64(1);
        let mut browses = 0_u32;
        let mut favourites = 0_u32;
        for _ in 0..10_000 {
            match sampler.sample(&mut rng) {
                Action::BrowseProducts => browses += 1,
                Action::AddFavourite => favourites += 1,
                _ => {}
            }
        }
        assert!(browses > favourites * 3);
    }
}
