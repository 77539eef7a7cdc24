use crate::{
    dto::{AnswerDto, OutcomeErrorResponse, ResolveRequest, ResolveResponse},
    errors::ApiError,
    state::AppState,
};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use dnscope_domain::config::{parse_socket_addr, resolver::DNS_PORT};
use dnscope_domain::{
    DnsQuery, DomainError, DomainName, RecordType, ResolutionMode, ResolutionOutcome,
};
use tracing::{debug, instrument};

#[instrument(skip_all, name = "api_resolve")]
pub async fn resolve(
    State(state): State<AppState>,
    Json(request): Json<ResolveRequest>,
) -> Result<Response, ApiError> {
    let query = build_query(&request, state.default_mode)?;
    let result = state.resolve.execute(&query).await?;

    debug!(
        domain = %query.domain,
        record_type = %query.record_type,
        outcome = result.outcome.kind(),
        source = result.source.as_str(),
        mode = %result.mode,
        duration_ms = result.duration_ms(),
        "Resolve request completed"
    );

    let response = match &result.outcome {
        ResolutionOutcome::Answer { records } => Json(ResolveResponse {
            duration_ms: result.duration_ms(),
            source: result.source,
            mode: result.mode,
            server: result.server.clone(),
            answers: records.iter().map(AnswerDto::from).collect(),
            dnssec: result.dnssec,
        })
        .into_response(),
        outcome => Json(OutcomeErrorResponse {
            error: outcome.describe(),
            kind: outcome.kind(),
            mode: result.mode,
            duration_ms: result.duration_ms(),
        })
        .into_response(),
    };
    Ok(response)
}

/// An upstream without an explicit mode implies recursive mode.
fn build_query(
    request: &ResolveRequest,
    default_mode: ResolutionMode,
) -> Result<DnsQuery, DomainError> {
    let domain = DomainName::parse(&request.domain)?;
    let record_type: RecordType = request.record_type.parse()?;

    let upstream = request
        .upstream
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            parse_socket_addr(raw, DNS_PORT).map_err(|e| DomainError::InvalidInput(e.to_string()))
        })
        .transpose()?;

    let mode = match (request.mode.as_deref(), upstream) {
        (Some(raw), _) if !raw.trim().is_empty() => raw.parse()?,
        (_, Some(_)) => ResolutionMode::Recursive,
        _ => default_mode,
    };

    let mut query = DnsQuery::new(domain, record_type, mode);
    if let Some(upstream) = upstream {
        query = query.with_upstream(upstream);
    }
    Ok(query)
}
