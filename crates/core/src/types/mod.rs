//! Wire types for the remote e-commerce services.
//!
//! Field names follow the services' JSON contracts (camelCase on the wire,
//! snake_case in Rust).

pub mod envelope;
pub mod favourite;
pub mod id;
pub mod order;
pub mod product;
pub mod user;

pub use envelope::{Collection, HealthStatus};
pub use favourite::{Favourite, LIKE_DATE_FORMAT};
pub use id::*;
pub use order::{CartRef, Order};
pub use product::{Category, Product};
pub use user::{Credential, RoleAuthority, User};
