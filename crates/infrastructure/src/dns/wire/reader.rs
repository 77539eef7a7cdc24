use super::header::{read_header, HEADER_LEN};
use super::message::{DnsMessage, Question};
use dnscope_domain::dns_name::MAX_LABEL_LEN;
use dnscope_domain::{DomainError, DomainName, RecordData, RecordType, ResourceRecord, SoaData};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Upper bound on compression pointers followed while reading one name.
pub const MAX_POINTER_HOPS: usize = 64;

const MAX_NAME_WIRE_LEN: usize = 255;

fn malformed(reason: impl Into<String>) -> DomainError {
    DomainError::MalformedPacket(reason.into())
}

/// Decodes a complete message. Bytes after the last declared record are
/// ignored.
pub fn decode_message(bytes: &[u8]) -> Result<DnsMessage, DomainError> {
    let (header, counts) = read_header(bytes)?;
    let mut reader = Reader {
        buf: bytes,
        pos: HEADER_LEN,
    };

    let mut questions = Vec::with_capacity(counts.questions.min(16) as usize);
    for _ in 0..counts.questions {
        questions.push(reader.read_question()?);
    }

    let answers = reader.read_records(counts.answers, "answer")?;
    let authority = reader.read_records(counts.authority, "authority")?;
    let additional = reader.read_records(counts.additional, "additional")?;

    Ok(DnsMessage {
        header,
        questions,
        answers,
        authority,
        additional,
    })
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8], DomainError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| {
                malformed(format!(
                    "truncated {} at offset {} (need {} bytes, have {})",
                    what,
                    self.pos,
                    len,
                    self.buf.len().saturating_sub(self.pos)
                ))
            })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u16(&mut self, what: &str) -> Result<u16, DomainError> {
        let b = self.take(2, what)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self, what: &str) -> Result<u32, DomainError> {
        let b = self.take(4, what)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn name(&mut self) -> Result<DomainName, DomainError> {
        let (name, next) = read_name(self.buf, self.pos)?;
        self.pos = next;
        Ok(name)
    }

    fn read_question(&mut self) -> Result<Question, DomainError> {
        let name = self.name()?;
        let qtype = self.u16("question type")?;
        let qclass = self.u16("question class")?;
        Ok(Question {
            name,
            qtype,
            qclass,
        })
    }

    fn read_records(
        &mut self,
        count: u16,
        section: &str,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let mut records = Vec::with_capacity(count.min(64) as usize);
        for _ in 0..count {
            records.push(self.read_record().map_err(|e| match e {
                DomainError::MalformedPacket(reason) => {
                    malformed(format!("{} section: {}", section, reason))
                }
                other => other,
            })?);
        }
        Ok(records)
    }

    fn read_record(&mut self) -> Result<ResourceRecord, DomainError> {
        let name = self.name()?;
        let rtype = self.u16("record type")?;
        let _class = self.u16("record class")?;
        let ttl = self.u32("record ttl")?;
        let rdlength = self.u16("rdata length")? as usize;
        let rdata_start = self.pos;
        self.take(rdlength, "rdata")?;

        let data = read_rdata(self.buf, rtype, rdata_start, rdata_start + rdlength)?;
        Ok(ResourceRecord::new(name, ttl, data))
    }
}

/// Parses rdata occupying exactly `buf[start..end]`. Names inside rdata may
/// point anywhere earlier in the message.
fn read_rdata(buf: &[u8], rtype: u16, start: usize, end: usize) -> Result<RecordData, DomainError> {
    let rdata = &buf[start..end];
    let Some(record_type) = RecordType::from_u16(rtype) else {
        return Ok(RecordData::Unknown {
            type_code: rtype,
            bytes: rdata.to_vec(),
        });
    };

    let mut reader = Reader {
        buf: &buf[..end],
        pos: start,
    };

    let data = match record_type {
        RecordType::A => {
            let b = reader.take(4, "A address")?;
            RecordData::A(Ipv4Addr::new(b[0], b[1], b[2], b[3]))
        }
        RecordType::AAAA => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(reader.take(16, "AAAA address")?);
            RecordData::Aaaa(Ipv6Addr::from(octets))
        }
        RecordType::NS => RecordData::Ns(reader.name()?),
        RecordType::CNAME => RecordData::Cname(reader.name()?),
        RecordType::PTR => RecordData::Ptr(reader.name()?),
        RecordType::MX => {
            let preference = reader.u16("MX preference")?;
            RecordData::Mx {
                preference,
                exchange: reader.name()?,
            }
        }
        RecordType::TXT => {
            let mut strings = Vec::new();
            while reader.pos < end {
                let len = reader.take(1, "TXT length")?[0] as usize;
                let text = reader.take(len, "TXT string")?;
                strings.push(text.to_vec());
            }
            RecordData::Txt(strings)
        }
        RecordType::SOA => RecordData::Soa(SoaData {
            mname: reader.name()?,
            rname: reader.name()?,
            serial: reader.u32("SOA serial")?,
            refresh: reader.u32("SOA refresh")?,
            retry: reader.u32("SOA retry")?,
            expire: reader.u32("SOA expire")?,
            minimum: reader.u32("SOA minimum")?,
        }),
    };

    if reader.pos != end {
        return Err(malformed(format!(
            "{} rdata declares {} bytes but content uses {}",
            record_type,
            end - start,
            reader.pos - start
        )));
    }
    Ok(data)
}

/// Reads a possibly compressed name starting at `start`. Returns the name and
/// the offset just past its in-place encoding.
///
/// Every pointer must target an offset strictly before the start of the label
/// run it terminates, so the chain of targets strictly decreases and cannot
/// loop. The hop cap is a second bound on top of that.
fn read_name(buf: &[u8], start: usize) -> Result<(DomainName, usize), DomainError> {
    let mut labels: Vec<&[u8]> = Vec::new();
    let mut pos = start;
    let mut run_start = start;
    let mut resume_at: Option<usize> = None;
    let mut hops = 0usize;
    let mut wire_len = 0usize;

    loop {
        let len = *buf
            .get(pos)
            .ok_or_else(|| malformed(format!("truncated name at offset {}", pos)))?;

        match len & 0xC0 {
            0x00 => {
                let len = len as usize;
                wire_len += 1 + len;
                if wire_len > MAX_NAME_WIRE_LEN {
                    return Err(malformed(format!(
                        "name at offset {} exceeds {} octets",
                        start, MAX_NAME_WIRE_LEN
                    )));
                }
                if len == 0 {
                    pos += 1;
                    break;
                }
                debug_assert!(len <= MAX_LABEL_LEN);
                let label = buf.get(pos + 1..pos + 1 + len).ok_or_else(|| {
                    malformed(format!("truncated label at offset {}", pos))
                })?;
                if let Some(bad) = label.iter().find(|b| !b.is_ascii_graphic() || **b == b'.') {
                    return Err(malformed(format!(
                        "label at offset {} contains byte 0x{:02X}",
                        pos, bad
                    )));
                }
                labels.push(label);
                pos += 1 + len;
            }
            0xC0 => {
                let low = *buf
                    .get(pos + 1)
                    .ok_or_else(|| malformed(format!("truncated pointer at offset {}", pos)))?;
                let target = (((len & 0x3F) as usize) << 8) | low as usize;

                if resume_at.is_none() {
                    resume_at = Some(pos + 2);
                }
                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(malformed(format!(
                        "too many compression pointers in name at offset {}",
                        start
                    )));
                }
                if target >= run_start {
                    return Err(malformed(format!(
                        "compression pointer at offset {} targets {} (must precede {})",
                        pos, target, run_start
                    )));
                }
                pos = target;
                run_start = target;
            }
            other => {
                return Err(malformed(format!(
                    "unsupported label type 0x{:02X} at offset {}",
                    other, pos
                )));
            }
        }
    }

    Ok((
        DomainName::from_wire_labels(labels),
        resume_at.unwrap_or(pos),
    ))
}
