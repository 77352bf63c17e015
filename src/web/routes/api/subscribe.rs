use axum::{extract::State, Json};
use serde_json::Value;
use tracing::info;

use crate::{
    web::{
        types::{SubscribeRequest, ValidEmail},
        WebResult,
    },
    AppState,
};

/// Re-validates the email and asks the provider to add it as a `pending` member.
/// Responds with the provider's member document.
#[tracing::instrument(
    name = "Subscribing to the newsletter",
    skip(app_state, req),
    fields(subscriber_email = %req.email)
)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    Json(req): Json<SubscribeRequest>,
) -> WebResult<Json<Value>> {
    let email = ValidEmail::try_from(req)?;

    // Single attempt, any provider failure ends the request.
    let member = app_state.list_client.add_member(&email).await?;

    info!("SUCCESS");
    Ok(Json(member))
}
