use super::record_type::RecordType;
use crate::dns_name::DomainName;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaData {
    pub mname: DomainName,
    pub rname: DomainName,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

/// Typed rdata. Anything outside the supported set is kept as raw bytes so
/// authority and additional sections carrying OPT, RRSIG and friends still
/// decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(DomainName),
    Cname(DomainName),
    Ptr(DomainName),
    Mx {
        preference: u16,
        exchange: DomainName,
    },
    /// Character strings as raw bytes; they need not be UTF-8.
    Txt(Vec<Vec<u8>>),
    Soa(SoaData),
    Unknown {
        type_code: u16,
        bytes: Vec<u8>,
    },
}

impl RecordData {
    pub fn type_code(&self) -> u16 {
        match self {
            RecordData::A(_) => RecordType::A.to_u16(),
            RecordData::Aaaa(_) => RecordType::AAAA.to_u16(),
            RecordData::Ns(_) => RecordType::NS.to_u16(),
            RecordData::Cname(_) => RecordType::CNAME.to_u16(),
            RecordData::Ptr(_) => RecordType::PTR.to_u16(),
            RecordData::Mx { .. } => RecordType::MX.to_u16(),
            RecordData::Txt(_) => RecordType::TXT.to_u16(),
            RecordData::Soa(_) => RecordType::SOA.to_u16(),
            RecordData::Unknown { type_code, .. } => *type_code,
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{}", addr),
            RecordData::Aaaa(addr) => write!(f, "{}", addr),
            RecordData::Ns(name) | RecordData::Cname(name) | RecordData::Ptr(name) => {
                write!(f, "{}", name)
            }
            RecordData::Mx {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            RecordData::Txt(strings) => {
                let quoted: Vec<String> = strings
                    .iter()
                    .map(|s| format!("\"{}\"", String::from_utf8_lossy(s)))
                    .collect();
                f.write_str(&quoted.join(" "))
            }
            RecordData::Soa(soa) => write!(
                f,
                "{} {} {} {} {} {} {}",
                soa.mname, soa.rname, soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum
            ),
            RecordData::Unknown { bytes, .. } => {
                write!(f, "\\# {}", bytes.len())?;
                if !bytes.is_empty() {
                    f.write_str(" ")?;
                    for byte in bytes {
                        write!(f, "{:02X}", byte)?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,

    pub ttl: u32,

    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(name: DomainName, ttl: u32, data: RecordData) -> Self {
        Self { name, ttl, data }
    }

    pub fn type_code(&self) -> u16 {
        self.data.type_code()
    }

    /// `None` for types outside the supported enumeration.
    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_u16(self.type_code())
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }
}
