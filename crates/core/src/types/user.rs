//! User and credential wire types (user-service).

use serde::{Deserialize, Serialize};

use super::id::{CredentialId, UserId};

/// A user resource as exposed by the user service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Embedded credential; the service omits it on some read paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<Credential>,
}

/// Account credential embedded in a [`User`].
///
/// The four `is_*` flags mirror Spring Security's account-status booleans and
/// are part of the registration contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub credential_id: CredentialId,
    pub username: String,
    /// Secret; present on create requests, not echoed by every read path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role_based_authority: RoleAuthority,
    pub is_enabled: bool,
    pub is_account_non_expired: bool,
    pub is_account_non_locked: bool,
    pub is_credentials_non_expired: bool,
}

/// Role granted to a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleAuthority {
    #[default]
    RoleUser,
    RoleAdmin,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            user_id: UserId::new(100),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            image_url: Some("https://example.com/test.jpg".to_string()),
            email: "test.user@example.com".to_string(),
            phone: Some("+573001234567".to_string()),
            credential: Some(Credential {
                credential_id: CredentialId::new(100),
                username: "test.user".to_string(),
                password: Some("TestPass123!".to_string()),
                role_based_authority: RoleAuthority::RoleUser,
                is_enabled: true,
                is_account_non_expired: true,
                is_account_non_locked: true,
                is_credentials_non_expired: true,
            }),
        }
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let value = serde_json::to_value(sample_user()).expect("serialize");
        assert_eq!(value["userId"], 100);
        assert_eq!(value["firstName"], "Test");
        assert_eq!(value["credential"]["credentialId"], 100);
        assert_eq!(value["credential"]["roleBasedAuthority"], "ROLE_USER");
        assert_eq!(value["credential"]["isEnabled"], true);
        assert_eq!(value["credential"]["isCredentialsNonExpired"], true);
    }

    #[test]
    fn test_user_deserializes_without_credential() {
        let json = r#"{
            "userId": 1,
            "firstName": "Selim",
            "lastName": "Horri",
            "email": "selim@example.com"
        }"#;
        let user: User = serde_json::from_str(json).expect("deserialize");
        assert_eq!(user.user_id, UserId::new(1));
        assert!(user.credential.is_none());
        assert!(user.phone.is_none());
    }

    #[test]
    fn test_role_authority_wire_values() {
        assert_eq!(
            serde_json::to_string(&RoleAuthority::RoleAdmin).expect("serialize"),
            "\"ROLE_ADMIN\""
        );
        let role: RoleAuthority = serde_json::from_str("\"ROLE_USER\"").expect("deserialize");
        assert_eq!(role, RoleAuthority::RoleUser);
    }
}
