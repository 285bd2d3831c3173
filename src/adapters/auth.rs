use crate::adapters::credentials::{AuthorizedUserKey, Credentials, ServiceAccountKey};
use crate::utils::error::{Result, SeeFoodError};
use crate::utils::interrupt::until_interrupted;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: Option<u64>,
    pub token_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Builds the signed RS256 assertion a service account trades for an access token.
pub fn service_account_assertion(
    key: &ServiceAccountKey,
    scopes: &[String],
    issued_at: i64,
) -> Result<String> {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let claims = AssertionClaims {
        iss: &key.client_email,
        scope: scopes.join(" "),
        aud: &key.token_uri,
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME_SECS,
    };

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(jsonwebtoken::encode(&header, &claims, &signing_key)?)
}

/// Exchanges the credentials for a bearer token at their token URI.
pub async fn fetch_access_token(
    client: &Client,
    credentials: &Credentials,
    scopes: &[String],
) -> Result<AccessToken> {
    let request = match credentials {
        Credentials::ServiceAccount(key) => service_account_request(client, key, scopes)?,
        Credentials::AuthorizedUser(key) => authorized_user_request(client, key),
    };

    tracing::debug!("Requesting access token from {}", credentials.token_uri());
    let token = until_interrupted(exchange(request)).await?;
    tracing::debug!("Obtained access token (expires in {:?}s)", token.expires_in);
    Ok(token)
}

/// Sends the token request and reads the body.
async fn exchange(request: reqwest::RequestBuilder) -> Result<AccessToken> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SeeFoodError::AuthError {
            message: format!("token endpoint returned {}: {}", status, body.trim()),
        });
    }

    Ok(response.json().await?)
}

fn service_account_request(
    client: &Client,
    key: &ServiceAccountKey,
    scopes: &[String],
) -> Result<reqwest::RequestBuilder> {
    let assertion = service_account_assertion(key, scopes, chrono::Utc::now().timestamp())?;
    Ok(client.post(&key.token_uri).form(&[
        ("grant_type", JWT_BEARER_GRANT),
        ("assertion", assertion.as_str()),
    ]))
}

fn authorized_user_request(client: &Client, key: &AuthorizedUserKey) -> reqwest::RequestBuilder {
    client.post(&key.token_uri).form(&[
        ("grant_type", "refresh_token"),
        ("client_id", key.client_id.as_str()),
        ("client_secret", key.client_secret.as_str()),
        ("refresh_token", key.refresh_token.as_str()),
    ])
}
