use crate::config::configuration::JwtSettings;
use crate::errors::custom::{AuthError, CustomError};
use crate::models::{timestamp_now, User};
use crate::store::UserStore;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Identity carried by an access token; handlers receive it as request data.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub uid: String,
    pub exp: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RefreshClaims {
    pub sub: String,
    pub exp: usize,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            access_ttl: Duration::hours(settings.access_ttl_hours),
            refresh_ttl: Duration::hours(settings.refresh_ttl_hours),
        }
    }

    /// Signs a fresh `(access_token, refresh_token)` pair for `user`.
    pub fn generate_tokens(&self, user: &User) -> Result<(String, String), AuthError> {
        let now = Utc::now();
        let claims = Claims {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            uid: user.user_id.clone(),
            exp: (now + self.access_ttl).timestamp() as usize,
        };
        let refresh_claims = RefreshClaims {
            sub: user.user_id.clone(),
            exp: (now + self.refresh_ttl).timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| AuthError::JwtAuthenticationError(err.to_string()))?;
        let refresh_token = encode(&Header::default(), &refresh_claims, &self.encoding_key)
            .map_err(|err| AuthError::JwtAuthenticationError(err.to_string()))?;
        Ok((token, refresh_token))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|err| AuthError::JwtAuthenticationError(err.to_string()))?;

        let exp = token_data.claims.exp;
        if Utc::now().timestamp() as usize > exp {
            return Err(AuthError::JwtAuthenticationError(
                "Token expired".to_string(),
            ));
        }
        Ok(token_data.claims)
    }
}

/// Persist a newly issued token pair on the user record.
#[instrument(name = "Update user tokens", skip(users, token, refresh_token))]
pub async fn update_tokens(
    users: &dyn UserStore,
    token: &str,
    refresh_token: &str,
    user_id: &str,
) -> Result<(), CustomError> {
    let updated = users
        .update_tokens(user_id, token, refresh_token, timestamp_now())
        .await?;
    if !updated {
        return Err(CustomError::NotFound(format!("user {} not found", user_id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validations::name_email::{UserEmail, UserName, UserPhone};
    use claim::{assert_err, assert_ok};

    fn settings(secret: &str, access_ttl_hours: i64) -> JwtSettings {
        JwtSettings {
            secret: secret.to_string(),
            access_ttl_hours,
            refresh_ttl_hours: 168,
        }
    }

    fn user() -> User {
        User::new(
            UserName::parse("Ada".to_string()).unwrap(),
            UserName::parse("Lovelace".to_string()).unwrap(),
            UserEmail::parse("ada@kitchen.io".to_string()).unwrap(),
            UserPhone::parse("5551234567".to_string()).unwrap(),
            None,
            "hash".to_string(),
        )
    }

    #[test]
    fn access_token_carries_the_user_identity() {
        let service = TokenService::new(&settings("secret", 24));
        let user = user();
        let (token, _) = service.generate_tokens(&user).unwrap();

        let claims = assert_ok!(service.validate_token(&token));
        assert_eq!(claims.uid, user.user_id);
        assert_eq!(claims.email, "ada@kitchen.io");
        assert_eq!(claims.first_name, "Ada");
        assert_eq!(claims.last_name, "Lovelace");
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let service = TokenService::new(&settings("secret", 24));
        let (_, refresh_token) = service.generate_tokens(&user()).unwrap();
        assert_err!(service.validate_token(&refresh_token));
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let issuer = TokenService::new(&settings("one", 24));
        let verifier = TokenService::new(&settings("two", 24));
        let (token, _) = issuer.generate_tokens(&user()).unwrap();
        assert_err!(verifier.validate_token(&token));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let service = TokenService::new(&settings("secret", -2));
        let (token, _) = service.generate_tokens(&user()).unwrap();
        assert_err!(service.validate_token(&token));
    }
}
