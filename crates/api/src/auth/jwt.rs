//! HS256 access-token validation.
//!
//! Tokens are minted by the identity service with a shared secret.
//! [`issue_access_token`] mints a token of the same shape; the test suite
//! uses it to act as an admin or a plain user.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use khcrf_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by an admin access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's id in the identity service.
    pub sub: DbId,
    /// Role name (`"admin"` or `"user"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier, logged on admin mutations.
    pub jti: String,
    /// Issuing service, checked when [`JwtConfig::issuer`] is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Token validation settings.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity service.
    pub secret: String,
    /// Expected `iss` claim. `None` accepts any issuer.
    pub issuer: Option<String>,
    /// Lifetime used by [`issue_access_token`], in minutes.
    pub access_token_expiry_mins: i64,
}

/// Default lifetime for locally issued tokens.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ISSUER`             | no       | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let issuer = std::env::var("JWT_ISSUER").ok().filter(|s| !s.is_empty());

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            issuer,
            access_token_expiry_mins,
        }
    }
}

/// Issue an HS256 access token for `user_id` with `role`.
pub fn issue_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: now + config.access_token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
        iss: config.issuer.clone(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate signature, expiry and (when configured) issuer, returning the
/// embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            issuer: None,
            access_token_expiry_mins: 15,
        }
    }

    #[test]
    fn issued_token_validates() {
        let config = test_config();
        let token = issue_access_token(7, "admin", &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: "admin".to_string(),
            exp: now - 300, // well past the default 60-second leeway
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
            iss: None,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn token_from_other_secret_fails() {
        let other = JwtConfig {
            secret: "a-different-secret".to_string(),
            ..test_config()
        };
        let token = issue_access_token(1, "admin", &other).unwrap();
        assert!(validate_token(&token, &test_config()).is_err());
    }

    #[test]
    fn issuer_is_enforced_when_configured() {
        let strict = JwtConfig {
            issuer: Some("khcrf-identity".to_string()),
            ..test_config()
        };
        let unscoped = issue_access_token(1, "admin", &test_config()).unwrap();
        assert!(validate_token(&unscoped, &strict).is_err());

        let scoped = issue_access_token(1, "admin", &strict).unwrap();
        assert_eq!(
            validate_token(&scoped, &strict).unwrap().iss.as_deref(),
            Some("khcrf-identity")
        );
    }
}
