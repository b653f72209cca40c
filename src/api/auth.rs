//! Token endpoint

use reqwest::{Method, StatusCode};
use tracing::{info, warn};

use super::client::{decode, ApiClient};
use super::models::{LoginRequest, TokenPair};
use crate::error::{Error, Result};

pub const TOKEN_PATH: &str = "/token/";

const CONNECTION_ERROR: &str = "Error de conexión con el servidor";

/// Exchange credentials for a bearer token and start a session.
///
/// Rejected credentials leave the current session untouched.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<TokenPair> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(Error::Validation(
            "Usuario y contraseña son obligatorios".to_string(),
        ));
    }

    let body = serde_json::to_value(LoginRequest { username, password })?;
    let response = client
        .request_public(Method::POST, TOKEN_PATH, Some(body))
        .await
        .map_err(|e| {
            warn!("Token request failed: {}", e);
            Error::RequestFailed(CONNECTION_ERROR.to_string())
        })?;

    match response.status() {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
            info!(username, "Credentials rejected");
            Err(Error::InvalidCredentials)
        }
        status if !status.is_success() => {
            warn!(status = status.as_u16(), "Token endpoint failed");
            Err(Error::RequestFailed(CONNECTION_ERROR.to_string()))
        }
        _ => {
            let pair: TokenPair = decode(response).await?;
            if pair.access.is_empty() {
                return Err(Error::RequestFailed(
                    "El servidor no devolvió un token".to_string(),
                ));
            }
            client.session().login(&pair.access, Some(username));
            Ok(pair)
        }
    }
}

/// End the session locally. The backend keeps no server-side session.
pub fn logout(client: &ApiClient) {
    client.session().logout();
}
