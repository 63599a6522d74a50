//! HTTP client for the API gateway.
//!
//! [`GatewayClient`] owns one `reqwest::Client` configured with the harness
//! timeout and exposes one typed method per remote endpoint. Methods return
//! the raw `reqwest::Response`; interpreting status codes and body shapes is
//! the job of the [`checks`](crate::checks) layer.

use gateprobe_core::{Favourite, FavouriteId, Product, ProductId, User, UserId};
use reqwest::Response;
use serde::Serialize;
use tracing::instrument;

use crate::config::HarnessConfig;
use crate::error::HarnessError;

/// Backend services routed by the gateway, identified by path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    User,
    Product,
    Favourite,
}

impl Service {
    /// Every service behind the gateway.
    pub const ALL: [Self; 3] = [Self::User, Self::Product, Self::Favourite];

    /// Gateway routing prefix for this service.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::User => "user-service",
            Self::Product => "product-service",
            Self::Favourite => "favourite-service",
        }
    }

    /// Stable label of this service's health endpoint.
    #[must_use]
    pub const fn health_label(self) -> &'static str {
        match self {
            Self::User => "GET /user-service/actuator/health",
            Self::Product => "GET /product-service/actuator/health",
            Self::Favourite => "GET /favourite-service/actuator/health",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// HTTP client for every endpoint the gateway exposes.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    gateway_url: String,
}

impl GatewayClient {
    /// Create a client for the configured gateway.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Client`] if the underlying HTTP client cannot
    /// be built.
    pub fn new(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(HarnessError::Client)?;

        Ok(Self {
            http,
            gateway_url: config.gateway_url.clone(),
        })
    }

    /// Base URL this client targets.
    #[must_use]
    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// GET `/actuator/health` on the gateway itself.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    #[instrument(skip(self))]
    pub async fn gateway_health(&self) -> Result<Response, HarnessError> {
        self.get("/actuator/health", "GET /actuator/health").await
    }

    /// GET `/{service}/actuator/health` through the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    #[instrument(skip(self))]
    pub async fn service_health(&self, service: Service) -> Result<Response, HarnessError> {
        self.get(
            &format!("/{}/actuator/health", service.prefix()),
            service.health_label(),
        )
        .await
    }

    // =========================================================================
    // User service
    // =========================================================================

    /// GET `/user-service/api/users`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    pub async fn list_users(&self) -> Result<Response, HarnessError> {
        self.get("/user-service/api/users", "GET /user-service/api/users")
            .await
    }

    /// GET `/user-service/api/users/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    pub async fn get_user(&self, id: UserId) -> Result<Response, HarnessError> {
        self.get(
            &format!("/user-service/api/users/{id}"),
            "GET /user-service/api/users/{id}",
        )
        .await
    }

    /// POST `/user-service/api/users`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    #[instrument(skip(self, user), fields(user_id = %user.user_id))]
    pub async fn create_user(&self, user: &User) -> Result<Response, HarnessError> {
        self.post_json("/user-service/api/users", "POST /user-service/api/users", user)
            .await
    }

    /// PUT `/user-service/api/users` with the full updated resource.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    #[instrument(skip(self, user), fields(user_id = %user.user_id))]
    pub async fn update_user(&self, user: &User) -> Result<Response, HarnessError> {
        self.put_json("/user-service/api/users", "PUT /user-service/api/users", user)
            .await
    }

    // =========================================================================
    // Product service
    // =========================================================================

    /// GET `/product-service/api/products`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    pub async fn list_products(&self) -> Result<Response, HarnessError> {
        self.get(
            "/product-service/api/products",
            "GET /product-service/api/products",
        )
        .await
    }

    /// GET `/product-service/api/products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    pub async fn get_product(&self, id: ProductId) -> Result<Response, HarnessError> {
        self.get(
            &format!("/product-service/api/products/{id}"),
            "GET /product-service/api/products/{id}",
        )
        .await
    }

    /// POST `/product-service/api/products`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    #[instrument(skip(self, product), fields(product_id = %product.product_id))]
    pub async fn create_product(&self, product: &Product) -> Result<Response, HarnessError> {
        self.post_json(
            "/product-service/api/products",
            "POST /product-service/api/products",
            product,
        )
        .await
    }

    /// PUT `/product-service/api/products` with the full updated resource.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    #[instrument(skip(self, product), fields(product_id = %product.product_id))]
    pub async fn update_product(&self, product: &Product) -> Result<Response, HarnessError> {
        self.put_json(
            "/product-service/api/products",
            "PUT /product-service/api/products",
            product,
        )
        .await
    }

    /// GET `/product-service/api/categories`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    pub async fn list_categories(&self) -> Result<Response, HarnessError> {
        self.get(
            "/product-service/api/categories",
            "GET /product-service/api/categories",
        )
        .await
    }

    // =========================================================================
    // Favourite service
    // =========================================================================

    /// GET `/favourite-service/api/favourites`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    pub async fn list_favourites(&self) -> Result<Response, HarnessError> {
        self.get(
            "/favourite-service/api/favourites",
            "GET /favourite-service/api/favourites",
        )
        .await
    }

    /// POST `/favourite-service/api/favourites`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    #[instrument(skip(self, favourite), fields(user_id = %favourite.user_id, product_id = %favourite.product_id))]
    pub async fn create_favourite(&self, favourite: &Favourite) -> Result<Response, HarnessError> {
        self.post_json(
            "/favourite-service/api/favourites",
            "POST /favourite-service/api/favourites",
            favourite,
        )
        .await
    }

    /// DELETE `/favourite-service/api/favourites/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure.
    #[instrument(skip(self))]
    pub async fn delete_favourite(&self, id: FavouriteId) -> Result<Response, HarnessError> {
        let context = "DELETE /favourite-service/api/favourites/{id}";
        self.http
            .delete(self.url(&format!("/favourite-service/api/favourites/{id}")))
            .send()
            .await
            .map_err(|source| HarnessError::Http {
                context: context.to_string(),
                source,
            })
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.gateway_url)
    }

    async fn get(&self, path: &str, context: &str) -> Result<Response, HarnessError> {
        self.http
            .get(self.url(path))
            .send()
            .await
            .map_err(|source| HarnessError::Http {
                context: context.to_string(),
                source,
            })
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        context: &str,
        body: &T,
    ) -> Result<Response, HarnessError> {
        self.http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|source| HarnessError::Http {
                context: context.to_string(),
                source,
            })
    }

    async fn put_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        context: &str,
        body: &T,
    ) -> Result<Response, HarnessError> {
        self.http
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|source| HarnessError::Http {
                context: context.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_prefixes() {
        assert_eq!(Service::User.prefix(), "user-service");
        assert_eq!(Service::Product.prefix(), "product-service");
        assert_eq!(Service::Favourite.prefix(), "favourite-service");
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = HarnessConfig::for_gateway("http://localhost:8080/").expect("valid config");
        let client = GatewayClient::new(&config).expect("client");
        assert_eq!(
            client.url("/actuator/health"),
            "http://localhost:8080/actuator/health"
        );
    }
}
