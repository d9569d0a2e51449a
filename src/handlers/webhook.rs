use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;

use crate::error::AppError;
use crate::factories::{EntityFactory, WebhookFactory};
use crate::services::WebhookResult;
use crate::AppState;

/// Receives a provider notification, e.g.
/// `{"id": "hook_...", "type": "order.paid", "data": {...}}`.
pub async fn receive(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WebhookResult>, AppError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid webhook body: {e}")))?;

    let webhook = WebhookFactory.create_from_post_data(&payload)?;
    tracing::info!(
        hook_id = %webhook.pagarme_id,
        webhook_type = %webhook.webhook_type,
        "Webhook received"
    );

    let result = state.receiver.handle(&webhook).await?;
    Ok(Json(result))
}
