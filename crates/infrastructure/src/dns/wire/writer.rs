use super::header::HEADER_LEN;
use super::message::{DnsMessage, CLASS_IN};
use dnscope_domain::dns_name::MAX_LABEL_LEN;
use dnscope_domain::{DomainError, DomainName, RecordData, ResourceRecord};

/// Encodes a full message. Names are written uncompressed.
pub fn encode_message(message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
    let mut out = Vec::with_capacity(512);

    out.extend_from_slice(&message.header.id.to_be_bytes());
    out.extend_from_slice(&message.header.flags().to_be_bytes());
    for count in [
        message.questions.len(),
        message.answers.len(),
        message.authority.len(),
        message.additional.len(),
    ] {
        let count = u16::try_from(count)
            .map_err(|_| DomainError::InvalidInput(format!("section too large: {}", count)))?;
        out.extend_from_slice(&count.to_be_bytes());
    }
    debug_assert_eq!(out.len(), HEADER_LEN);

    for question in &message.questions {
        write_name(&mut out, &question.name)?;
        out.extend_from_slice(&question.qtype.to_be_bytes());
        out.extend_from_slice(&question.qclass.to_be_bytes());
    }

    for record in message.all_records() {
        write_record(&mut out, record)?;
    }

    Ok(out)
}

fn write_name(out: &mut Vec<u8>, name: &DomainName) -> Result<(), DomainError> {
    let mut wire_len = 1;
    for label in name.labels() {
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidInput(format!(
                "label '{}' exceeds {} bytes",
                label, MAX_LABEL_LEN
            )));
        }
        wire_len += 1 + label.len();
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    if wire_len > 255 {
        return Err(DomainError::InvalidInput(format!(
            "name '{}' exceeds 255 octets on the wire",
            name
        )));
    }
    out.push(0);
    Ok(())
}

fn write_record(out: &mut Vec<u8>, record: &ResourceRecord) -> Result<(), DomainError> {
    write_name(out, &record.name)?;
    out.extend_from_slice(&record.type_code().to_be_bytes());
    out.extend_from_slice(&CLASS_IN.to_be_bytes());
    out.extend_from_slice(&record.ttl.to_be_bytes());

    let length_at = out.len();
    out.extend_from_slice(&[0, 0]);
    write_rdata(out, &record.data)?;

    let rdlength = out.len() - length_at - 2;
    let rdlength = u16::try_from(rdlength)
        .map_err(|_| DomainError::InvalidInput(format!("rdata too large: {} bytes", rdlength)))?;
    out[length_at..length_at + 2].copy_from_slice(&rdlength.to_be_bytes());
    Ok(())
}

fn write_rdata(out: &mut Vec<u8>, data: &RecordData) -> Result<(), DomainError> {
    match data {
        RecordData::A(addr) => out.extend_from_slice(&addr.octets()),
        RecordData::Aaaa(addr) => out.extend_from_slice(&addr.octets()),
        RecordData::Ns(name) | RecordData::Cname(name) | RecordData::Ptr(name) => {
            write_name(out, name)?
        }
        RecordData::Mx {
            preference,
            exchange,
        } => {
            out.extend_from_slice(&preference.to_be_bytes());
            write_name(out, exchange)?;
        }
        RecordData::Txt(strings) => {
            for text in strings {
                let len = u8::try_from(text.len()).map_err(|_| {
                    DomainError::InvalidInput(format!(
                        "TXT string of {} bytes exceeds 255",
                        text.len()
                    ))
                })?;
                out.push(len);
                out.extend_from_slice(text);
            }
        }
        RecordData::Soa(soa) => {
            write_name(out, &soa.mname)?;
            write_name(out, &soa.rname)?;
            for value in [soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum] {
                out.extend_from_slice(&value.to_be_bytes());
            }
        }
        RecordData::Unknown { bytes, .. } => out.extend_from_slice(bytes),
    }
    Ok(())
}
