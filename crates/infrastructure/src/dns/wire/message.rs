use super::header::Header;
use super::writer::encode_message;
use dnscope_application::ports::QueryPacket;
use dnscope_domain::{DomainError, DomainName, RecordType, ResourceRecord};

pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: DomainName,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: DomainName, record_type: RecordType) -> Self {
        Self {
            name,
            qtype: record_type.to_u16(),
            qclass: CLASS_IN,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsMessage {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

impl DnsMessage {
    pub fn query(id: u16, question: Question, recursion_desired: bool) -> Self {
        Self {
            header: Header::query(id, recursion_desired),
            questions: vec![question],
            ..Self::default()
        }
    }

    /// Empty response to `request` carrying its questions.
    pub fn response_to(request: &DnsMessage, rcode: u8) -> Self {
        Self {
            header: Header::response_to(&request.header, rcode),
            questions: request.questions.clone(),
            ..Self::default()
        }
    }

    pub fn all_records(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.answers
            .iter()
            .chain(self.authority.iter())
            .chain(self.additional.iter())
    }
}

/// Builds a single-question IN query with a fresh random id.
pub fn encode_query(
    domain: &DomainName,
    record_type: RecordType,
    recursion_desired: bool,
) -> Result<QueryPacket, DomainError> {
    let id = fastrand::u16(..);
    let message = DnsMessage::query(
        id,
        Question::new(domain.clone(), record_type),
        recursion_desired,
    );
    Ok(QueryPacket {
        id,
        bytes: encode_message(&message)?,
    })
}
