use crate::{
    dto::{PacketRequest, PacketResponse},
    errors::ApiError,
    state::AppState,
};
use axum::{extract::State, Json};
use dnscope_domain::{DomainName, RecordType};
use tracing::{debug, instrument};

#[instrument(skip_all, name = "api_build_packet")]
pub async fn build_packet(
    State(state): State<AppState>,
    Json(request): Json<PacketRequest>,
) -> Result<Json<PacketResponse>, ApiError> {
    let domain = DomainName::parse(&request.domain)?;
    let record_type: RecordType = request.record_type.parse()?;

    let inspection = state
        .build_packet
        .execute(&domain, record_type, request.send)
        .await?;

    debug!(
        domain = %domain,
        id = inspection.transaction_id,
        length = inspection.length,
        sent = request.send,
        "Packet built"
    );

    Ok(Json(PacketResponse {
        transaction_id: inspection.transaction_id,
        length: inspection.length,
        hex_dump: inspection.hex_dump,
        response_length: inspection.response_length,
        response_hex_dump: inspection.response_hex_dump,
    }))
}
