use axum::Json;
use contracts::domain::a004_transaction::aggregate::SalesChannel;
use contracts::domain::a006_marketplace_connection::aggregate::MarketplaceConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a006_marketplace_connection;
use crate::shared::marketplaces::mercado_livre::oauth;

#[derive(Debug, Deserialize)]
pub struct ListFilters {
    pub company_id: String,
}

pub async fn list(
    axum::extract::Query(filters): axum::extract::Query<ListFilters>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let connections =
        a006_marketplace_connection::service::list_by_company(&filters.company_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list connections: {}", e);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            })?;
    Ok(Json(serde_json::json!(connections)))
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(rename = "companyId")]
    pub company_id: String,
    pub description: String,
}

/// POST /api/connections - cria a conexão pendente e devolve a URL de
/// autorização para redirecionar o usuário
pub async fn create(
    Json(request): Json<CreateRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let connection = MarketplaceConnection::new_for_insert(
        format!("CON-{}", &Uuid::new_v4().to_string()[..8]),
        request.description,
        request.company_id,
        SalesChannel::MercadoLivre,
    );
    let id = a006_marketplace_connection::service::save(connection)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create connection: {}", e);
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        })?;

    let config = crate::shared::config::load_config()
        .map_err(|_| axum::http::StatusCode::INTERNAL_SERVER_ERROR)?;
    // o state carrega o id da conexão para o callback
    let state = format!("{}:{}", id, oauth::generate_state());
    let url = oauth::authorization_url(&config.mercado_livre, &state);

    Ok(Json(serde_json::json!({
        "id": id.to_string(),
        "authorizationUrl": url,
    })))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

/// GET /api/connections/oauth/callback - token exchange do fluxo
/// interativo. Falha AQUI propaga como erro ao usuário (único ponto da
/// integração em que isso acontece).
pub async fn oauth_callback(
    axum::extract::Query(params): axum::extract::Query<CallbackParams>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, String)> {
    let connection_id = params
        .state
        .split(':')
        .next()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or((
            axum::http::StatusCode::BAD_REQUEST,
            "state inválido".to_string(),
        ))?;

    let config = crate::shared::config::load_config().map_err(|e| {
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            e.to_string(),
        )
    })?;

    let http = reqwest::Client::new();
    let response = oauth::exchange_code(&http, &config.mercado_livre, &params.code)
        .await
        .map_err(|e| {
            tracing::error!("Token exchange failed: {}", e);
            (
                axum::http::StatusCode::BAD_GATEWAY,
                format!("Falha na autorização com o Mercado Livre: {}", e),
            )
        })?;

    let seller_id = response.user_id.map(|u| u.to_string());
    let tokens = response.into_tokens();

    let mut connection = a006_marketplace_connection::service::get_by_id(connection_id)
        .await
        .map_err(|e| {
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            )
        })?
        .ok_or((
            axum::http::StatusCode::NOT_FOUND,
            "Conexão não encontrada".to_string(),
        ))?;

    connection.store_tokens(tokens, seller_id);
    a006_marketplace_connection::service::save(connection)
        .await
        .map_err(|e| {
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            )
        })?;

    Ok(Json(serde_json::json!({"success": true})))
}

pub async fn delete(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    let deleted = a006_marketplace_connection::service::delete(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete connection: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    if !deleted {
        return Err(axum::http::StatusCode::NOT_FOUND);
    }
    Ok(Json(serde_json::json!({"success": true})))
}
