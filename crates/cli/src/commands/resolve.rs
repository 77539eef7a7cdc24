use crate::di::UseCases;
use dnscope_domain::config::{parse_socket_addr, resolver::DNS_PORT};
use dnscope_domain::{DnsQuery, DomainName, RecordType, ResolutionMode, ResolutionOutcome};

pub struct ResolveArgs {
    pub domain: String,
    pub record_type: RecordType,
    pub mode: ResolutionMode,
    pub upstream: Option<String>,
}

pub async fn run_resolve(use_cases: &UseCases, args: ResolveArgs) -> anyhow::Result<()> {
    let mut query = DnsQuery::new(DomainName::parse(&args.domain)?, args.record_type, args.mode);
    if let Some(raw) = args.upstream.as_deref() {
        query = query.with_upstream(parse_socket_addr(raw, DNS_PORT)?);
    }

    let result = use_cases.resolve.execute(&query).await?;

    println!(
        ";; {} {} via {} ({}, {:.2} ms{})",
        query.domain,
        query.record_type,
        result.mode,
        result.source.as_str(),
        result.duration_ms(),
        result
            .server
            .as_deref()
            .map(|s| format!(", server {}", s))
            .unwrap_or_default()
    );

    match &result.outcome {
        ResolutionOutcome::Answer { records } if records.is_empty() => {
            println!(";; no records (NODATA)");
        }
        ResolutionOutcome::Answer { records } => {
            for record in records {
                let type_name = record
                    .record_type()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| format!("TYPE{}", record.type_code()));
                println!("{}\t{}\t{}\t{}", record.name, record.ttl, type_name, record.data);
            }
        }
        outcome => println!(";; {}: {}", outcome.kind(), outcome.describe()),
    }

    let dnssec = result.dnssec;
    if dnssec.has_rrsig || dnssec.has_ds || dnssec.has_dnskey {
        println!(
            ";; dnssec: rrsig={} ds={} dnskey={}",
            dnssec.has_rrsig, dnssec.has_ds, dnssec.has_dnskey
        );
    }
    Ok(())
}
