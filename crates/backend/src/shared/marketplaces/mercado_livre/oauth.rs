use crate::shared::config::MercadoLivreConfig;
use anyhow::Result;
use chrono::{Duration, Utc};
use contracts::domain::a006_marketplace_connection::aggregate::OAuthTokens;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;

const AUTH_URL: &str = "https://auth.mercadolivre.com.br/authorization";
const TOKEN_URL: &str = "https://api.mercadolibre.com/oauth/token";

/// Resposta do token exchange do Mercado Livre
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Segundos até expirar
    pub expires_in: i64,
    pub scope: Option<String>,
    pub user_id: Option<i64>,
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    pub fn into_tokens(self) -> OAuthTokens {
        OAuthTokens {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: Utc::now() + Duration::seconds(self.expires_in),
            scope: self.scope,
        }
    }
}

/// State anti-CSRF para o fluxo de autorização
pub fn generate_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// URL de autorização para redirecionar o usuário no fluxo de conexão
pub fn authorization_url(config: &MercadoLivreConfig, state: &str) -> String {
    format!(
        "{}?response_type=code&client_id={}&redirect_uri={}&state={}",
        AUTH_URL,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(&config.redirect_uri),
        urlencoding::encode(state),
    )
}

/// Troca o authorization code por tokens. Falha aqui propaga como erro ao
/// usuário - é o único ponto da integração em que o fluxo é interativo.
pub async fn exchange_code(
    http: &reqwest::Client,
    config: &MercadoLivreConfig,
    code: &str,
) -> Result<TokenResponse> {
    let params = [
        ("grant_type", "authorization_code"),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("code", code),
        ("redirect_uri", config.redirect_uri.as_str()),
    ];

    let response = http.post(TOKEN_URL).form(&params).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Token exchange failed: {} - {}", status, body);
    }

    Ok(response.json::<TokenResponse>().await?)
}

/// Renova o access token com o refresh token
pub async fn refresh_tokens(
    http: &reqwest::Client,
    config: &MercadoLivreConfig,
    refresh_token: &str,
) -> Result<TokenResponse> {
    let params = [
        ("grant_type", "refresh_token"),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("refresh_token", refresh_token),
    ];

    let response = http.post(TOKEN_URL).form(&params).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Token refresh failed: {} - {}", status, body);
    }

    Ok(response.json::<TokenResponse>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_url_encodes_params() {
        let config = MercadoLivreConfig {
            client_id: "123".into(),
            client_secret: "secret".into(),
            redirect_uri: "https://app.example.com/callback?x=1".into(),
        };
        let url = authorization_url(&config, "abc def");
        assert!(url.starts_with("https://auth.mercadolivre.com.br/authorization?"));
        assert!(url.contains("client_id=123"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback%3Fx%3D1"));
        assert!(url.contains("state=abc%20def"));
    }

    #[test]
    fn test_state_is_long_enough() {
        let state = generate_state();
        assert_eq!(state.len(), 32);
        assert_ne!(state, generate_state());
    }
}
