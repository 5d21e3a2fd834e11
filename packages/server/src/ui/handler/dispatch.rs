//! Inbound event dispatch.
//!
//! The transport hands every decoded client frame to [`dispatch`], which maps
//! the event name to its handler.

use thiserror::Error;

use crate::{
    domain::{ConnectionId, SentAt, ValueObjectError},
    infrastructure::dto::websocket::{
        ClientEvent, ReceiveMessagePayload, SendMessagePayload, ServerEvent,
    },
    ui::state::AppState,
    usecase::{SendMessageError, SendMessageUseCase},
};

/// Why an inbound frame was dropped
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Not JSON, unknown event name, or a required field is missing
    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),

    /// The outbound event could not be serialized
    #[error("failed to encode outbound event: {0}")]
    EncodeEvent(serde_json::Error),

    /// Fields are present but carry invalid values
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] ValueObjectError),

    #[error(transparent)]
    SendMessage(#[from] SendMessageError),
}

/// Decode a text frame into a client event
pub fn parse_frame(text: &str) -> Result<ClientEvent, DispatchError> {
    Ok(serde_json::from_str(text)?)
}

/// Route a client event from `connection_id` to its handler.
///
/// Returns the number of connections the resulting broadcast was queued on.
pub async fn dispatch(
    state: &AppState,
    connection_id: &ConnectionId,
    event: ClientEvent,
) -> Result<usize, DispatchError> {
    match event {
        ClientEvent::SendMessage(payload) => on_send_message(state, connection_id, payload).await,
    }
}

async fn on_send_message(
    state: &AppState,
    connection_id: &ConnectionId,
    payload: SendMessagePayload,
) -> Result<usize, DispatchError> {
    if let Some(claimed) = payload.user.as_ref().and_then(|u| u.id.as_deref())
        && claimed != connection_id.as_str()
    {
        tracing::debug!(
            "Ignoring client-supplied user id '{}' from '{}'",
            claimed,
            connection_id
        );
    }

    let timestamp = SentAt::try_from(payload.timestamp)?;

    let send_usecase = SendMessageUseCase::new(state.repository.clone());
    let broadcast = send_usecase
        .execute(connection_id, payload.content, timestamp)
        .await?;

    let event = ServerEvent::ReceiveMessage(ReceiveMessagePayload {
        extra: payload.extra,
        ..ReceiveMessagePayload::from(&broadcast.message)
    });
    let event_json = serde_json::to_string(&event).map_err(DispatchError::EncodeEvent)?;

    let delivered = state.deliver(&broadcast.recipients, &event_json).await;
    tracing::debug!(
        "Relayed message from '{}' to {} of {} client(s)",
        connection_id,
        delivered,
        broadcast.recipients.len()
    );

    Ok(delivered)
}
