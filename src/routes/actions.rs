//! Action route handlers: discovery (GET/OPTIONS) and transaction build (POST).

use axum::{
    extract::{Host, Query, State},
    http::HeaderMap,
    Json,
};
use solana_sdk::native_token::sol_to_lamports;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::actions::{
    ActionGetResponse, ActionLinks, ActionParameter, ActionPostRequest, ActionPostResponse,
    LinkedAction,
};
use crate::app_state::AppState;
use crate::error::ActionError;
use crate::routes::ACTION_PATH;
use crate::transfer::{self, TransferQuery};

/// Origin of the incoming request, from the Host header and the forwarded
/// scheme (plain http when no proxy header is present).
fn origin_url(host: &str, headers: &HeaderMap) -> Result<url::Url, ActionError> {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    url::Url::parse(&format!("{}://{}", scheme, host))
        .map_err(|_| ActionError::InvalidInput(format!("Invalid request host: {}", host)))
}

/// GET /api/actions/talk-with-me
///
/// Static action descriptor. Icon and callback href are absolute URLs built
/// from the request's own origin.
pub async fn get_action(
    State(state): State<Arc<AppState>>,
    Host(host): Host,
    headers: HeaderMap,
) -> Result<Json<ActionGetResponse>, ActionError> {
    let origin = origin_url(&host, &headers)?;
    let icon = origin
        .join(&state.config.icon_path)
        .map_err(|e| ActionError::Upstream(anyhow::anyhow!("icon URL: {}", e)))?;
    let base_href = origin
        .join(ACTION_PATH)
        .map_err(|e| ActionError::Upstream(anyhow::anyhow!("action URL: {}", e)))?;

    // The advertised "email" input is not consumed by the POST handler; the
    // field is kept for wire compatibility with the deployed action.
    let payload = ActionGetResponse {
        title: "Talk with KOL".to_string(),
        icon: icon.to_string(),
        description: "Enter your email to talk with KOL".to_string(),
        label: "Talk".to_string(),
        links: ActionLinks {
            actions: vec![LinkedAction {
                label: "Send".to_string(),
                href: format!("{}?email={{email}}", base_href),
                parameters: vec![ActionParameter {
                    name: "email".to_string(),
                    label: "Enter email".to_string(),
                    required: true,
                }],
            }],
        },
    };

    Ok(Json(payload))
}

/// OPTIONS /api/actions/talk-with-me
///
/// Identical handling to GET; CORS headers come from the shared layer.
pub async fn options_action(
    state: State<Arc<AppState>>,
    host: Host,
    headers: HeaderMap,
) -> Result<Json<ActionGetResponse>, ActionError> {
    get_action(state, host, headers).await
}

/// POST /api/actions/talk-with-me?to=<address>&amount=<number>
///
/// Builds the unsigned transfer: validates the query parameters and the
/// client-supplied account, checks the amount against the node's
/// rent-exemption floor, then assembles one system transfer anchored to the
/// latest blockhash.
pub async fn post_action(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransferQuery>,
    Json(body): Json<ActionPostRequest>,
) -> Result<Json<ActionPostResponse>, ActionError> {
    let params = transfer::validate_query(&query, &state.config)?;

    let account = Pubkey::from_str(&body.account)
        .map_err(|_| ActionError::InvalidInput("Invalid account provided".to_string()))?;

    let minimum_balance = state.rpc.get_minimum_balance_for_rent_exemption(0).await?;
    let lamports = sol_to_lamports(params.amount_sol);
    if lamports < minimum_balance {
        return Err(ActionError::BusinessRule(format!(
            "account may not be rent exempt: {}",
            params.to
        )));
    }

    let recent_blockhash = state.rpc.get_latest_blockhash().await?;
    let transaction = transfer::build_transfer(&account, &params.to, lamports, recent_blockhash);

    info!(from = %account, to = %params.to, lamports = lamports, "built transfer transaction");

    let payload = ActionPostResponse::new(
        &transaction,
        format!("Send {} SOL to {}", params.amount_sol, params.to),
    )?;

    Ok(Json(payload))
}
