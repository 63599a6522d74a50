//! Canonical sample payloads for checks and flows.
//!
//! Deterministic: the same payload comes back on every call, so scenarios
//! stay idempotent-tolerant against a remote system that already holds the
//! fixture ids from an earlier run.

use gateprobe_core::{
    CartId, CartRef, Category, CategoryId, Credential, CredentialId, Order, OrderId, Product,
    ProductId, RoleAuthority, User, UserId,
};
use rust_decimal::Decimal;

/// Sample user (id 100) used by the user service contract checks.
#[must_use]
pub fn sample_user() -> User {
    User {
        user_id: UserId::new(100),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        image_url: Some("https://example.com/test.jpg".to_string()),
        email: "test.user@example.com".to_string(),
        phone: Some("+573001234567".to_string()),
        credential: Some(credential(100, "test.user", "TestPass123!")),
    }
}

/// Sample product (id 100, category 3 "Game") for product checks.
#[must_use]
pub fn sample_product() -> Product {
    Product {
        product_id: ProductId::new(100),
        product_title: "Test Product".to_string(),
        image_url: Some("https://example.com/product.jpg".to_string()),
        sku: "TEST-100".to_string(),
        price_unit: Decimal::new(9999, 2),
        quantity: 10,
        category: Some(Category {
            category_id: CategoryId::new(3),
            category_title: "Game".to_string(),
            image_url: None,
        }),
    }
}

/// Sample order (id 100); kept for payload-shape coverage, no order
/// endpoints are exercised through the gateway.
#[must_use]
pub fn sample_order() -> Order {
    Order {
        order_id: OrderId::new(100),
        order_desc: "Test Order".to_string(),
        order_fee: Decimal::new(9999, 2),
        cart: CartRef {
            cart_id: CartId::new(100),
        },
    }
}

/// User (id 200) driving the registration journey.
#[must_use]
pub fn registration_user() -> User {
    User {
        user_id: UserId::new(200),
        first_name: "María".to_string(),
        last_name: "García".to_string(),
        image_url: Some("https://example.com/maria.jpg".to_string()),
        email: "maria.garcia@example.com".to_string(),
        phone: Some("+573007654321".to_string()),
        credential: Some(credential(200, "maria.garcia", "SecurePass123!")),
    }
}

/// User (id 201) driving the authentication journey.
#[must_use]
pub fn authentication_user() -> User {
    User {
        user_id: UserId::new(201),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        image_url: Some("https://example.com/john.jpg".to_string()),
        email: "john.doe@example.com".to_string(),
        phone: Some("+573001111111".to_string()),
        credential: Some(credential(201, "john.doe", "JohnPass123!")),
    }
}

/// User (id 202) driving the favourite-products journey.
#[must_use]
pub fn favourites_user() -> User {
    User {
        user_id: UserId::new(202),
        first_name: "Jane".to_string(),
        last_name: "Smith".to_string(),
        image_url: Some("https://example.com/jane.jpg".to_string()),
        email: "jane.smith@example.com".to_string(),
        phone: Some("+573002222222".to_string()),
        credential: Some(credential(202, "jane.smith", "JanePass123!")),
    }
}

/// Synthetic registration payload keyed by a caller-chosen id; the load
/// generator feeds it randomized ids.
#[must_use]
pub fn generated_user(id: i32) -> User {
    User {
        user_id: UserId::new(id),
        first_name: format!("User{id}"),
        last_name: "Test".to_string(),
        image_url: Some("https://example.com/user.jpg".to_string()),
        email: format!("user{id}@example.com"),
        phone: Some(format!("+5730099{id}")),
        credential: Some(credential(id, &format!("user{id}"), "TestPass123!")),
    }
}

fn credential(id: i32, username: &str, password: &str) -> Credential {
    Credential {
        credential_id: CredentialId::new(id),
        username: username.to_string(),
        password: Some(password.to_string()),
        role_based_authority: RoleAuthority::RoleUser,
        is_enabled: true,
        is_account_non_expired: true,
        is_account_non_locked: true,
        is_credentials_non_expired: true,
    }
}
