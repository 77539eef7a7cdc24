use crate::di::UseCases;
use dnscope_domain::{DomainName, RecordType};

pub async fn run_packet(
    use_cases: &UseCases,
    domain: &str,
    record_type: RecordType,
    send: bool,
) -> anyhow::Result<()> {
    let domain = DomainName::parse(domain)?;
    let inspection = use_cases
        .build_packet
        .execute(&domain, record_type, send)
        .await?;

    println!(
        ";; query {} {} id={:#06x} length={}",
        domain, record_type, inspection.transaction_id, inspection.length
    );
    println!("{}", inspection.hex_dump);

    if let (Some(length), Some(dump)) = (inspection.response_length, inspection.response_hex_dump) {
        println!(";; response length={}", length);
        println!("{}", dump);
    }
    Ok(())
}
