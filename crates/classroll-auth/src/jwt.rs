//! Access token creation and verification.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use classroll_config::JwtConfig;
use classroll_core::AppError;

use crate::claims::{Claims, Role};

/// Builds the claim set for a student, stamped with the current time.
pub fn issue_claims(student_id: i32, email: &str, role: Role, jwt_config: &JwtConfig) -> Claims {
    let now = Utc::now().timestamp().max(0) as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    Claims {
        sub: student_id.to_string(),
        email: email.to_string(),
        role,
        iss: jwt_config.issuer.clone(),
        aud: jwt_config.audience.clone(),
        exp,
        iat: now,
    }
}

/// Signs an arbitrary claim set with the configured secret (HS256).
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Issues a signed access token embedding identity, email and role.
pub fn create_access_token(
    student_id: i32,
    email: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    encode_claims(&issue_claims(student_id, email, role, jwt_config), jwt_config)
}

/// Verifies signature, issuer, audience and expiry, returning the claims.
///
/// Every failure maps to the same `Unauthorized` error.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[jwt_config.issuer.as_str()]);
    validation.set_audience(&[jwt_config.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
    validation.leeway = 5;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use classroll_core::ErrorKind;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_for_testing_purposes".to_string(),
            issuer: "classroll".to_string(),
            audience: "classroll-web".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_round_trip() {
        let config = config();
        let token = create_access_token(7, "ana@classroll.dev", Role::Administrator, &config)
            .unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "ana@classroll.dev");
        assert_eq!(claims.role, Role::Administrator);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = config();
        let mut claims = issue_claims(7, "ana@classroll.dev", Role::Student, &config);
        claims.iat -= 7200;
        claims.exp = claims.iat + 60;
        let token = encode_claims(&claims, &config).unwrap();

        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let config = config();
        let mut claims = issue_claims(7, "ana@classroll.dev", Role::Student, &config);
        claims.iss = "someone-else".to_string();
        let token = encode_claims(&claims, &config).unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let config = config();
        let mut claims = issue_claims(7, "ana@classroll.dev", Role::Student, &config);
        claims.aud = "another-client".to_string();
        let token = encode_claims(&claims, &config).unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = config();
        let token = create_access_token(7, "ana@classroll.dev", Role::Student, &config).unwrap();

        let other = JwtConfig {
            secret: "a_completely_different_secret".to_string(),
            ..config
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(verify_token("invalid.token.here", &config()).is_err());
        assert!(verify_token("", &config()).is_err());
    }
}
