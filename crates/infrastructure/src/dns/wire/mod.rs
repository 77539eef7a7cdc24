//! DNS wire format (RFC 1035 §4).
//!
//! Decoding is strict: every length, count and compression pointer is
//! bounds-checked and any inconsistency is reported as
//! `DomainError::MalformedPacket`.

mod header;
mod hex;
mod message;
mod reader;
mod writer;

pub use header::{
    Header, FLAG_AA, FLAG_QR, FLAG_RA, FLAG_RD, FLAG_TC, HEADER_LEN, RCODE_FORMERR, RCODE_NOERROR,
    RCODE_NOTIMP, RCODE_NXDOMAIN, RCODE_SERVFAIL,
};
pub use hex::hex_dump;
pub use message::{encode_query, DnsMessage, Question, CLASS_IN};
pub use reader::{decode_message, MAX_POINTER_HOPS};
pub use writer::encode_message;
