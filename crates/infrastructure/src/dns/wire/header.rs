use dnscope_domain::DomainError;

pub const HEADER_LEN: usize = 12;

pub const FLAG_QR: u16 = 0x8000;
pub const FLAG_AA: u16 = 0x0400;
pub const FLAG_TC: u16 = 0x0200;
pub const FLAG_RD: u16 = 0x0100;
pub const FLAG_RA: u16 = 0x0080;

pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_FORMERR: u8 = 1;
pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_NXDOMAIN: u8 = 3;
pub const RCODE_NOTIMP: u8 = 4;

/// Message header without the section counts, which are derived from the
/// sections when encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub rcode: u8,
}

impl Header {
    pub fn query(id: u16, recursion_desired: bool) -> Self {
        Self {
            id,
            rd: recursion_desired,
            ..Self::default()
        }
    }

    /// Response header echoing the id, opcode and RD bit of `request`.
    pub fn response_to(request: &Header, rcode: u8) -> Self {
        Self {
            id: request.id,
            qr: true,
            opcode: request.opcode,
            aa: false,
            tc: false,
            rd: request.rd,
            ra: true,
            rcode,
        }
    }

    pub fn flags(&self) -> u16 {
        let mut flags = ((self.opcode as u16 & 0x0F) << 11) | (self.rcode as u16 & 0x0F);
        if self.qr {
            flags |= FLAG_QR;
        }
        if self.aa {
            flags |= FLAG_AA;
        }
        if self.tc {
            flags |= FLAG_TC;
        }
        if self.rd {
            flags |= FLAG_RD;
        }
        if self.ra {
            flags |= FLAG_RA;
        }
        flags
    }

    pub fn from_flags(id: u16, flags: u16) -> Self {
        Self {
            id,
            qr: flags & FLAG_QR != 0,
            opcode: ((flags >> 11) & 0x0F) as u8,
            aa: flags & FLAG_AA != 0,
            tc: flags & FLAG_TC != 0,
            rd: flags & FLAG_RD != 0,
            ra: flags & FLAG_RA != 0,
            rcode: (flags & 0x0F) as u8,
        }
    }

    /// Reads the fixed header without touching the sections, so flags such as
    /// TC are visible even when the rest of the message is cut short.
    pub fn peek(bytes: &[u8]) -> Option<Self> {
        let b = bytes.get(..HEADER_LEN)?;
        Some(Self::from_flags(
            u16::from_be_bytes([b[0], b[1]]),
            u16::from_be_bytes([b[2], b[3]]),
        ))
    }

    /// Reads just the id, for replying to packets that fail to decode.
    pub fn peek_id(bytes: &[u8]) -> Option<u16> {
        bytes.get(..2).map(|b| u16::from_be_bytes([b[0], b[1]]))
    }
}

/// Section counts as they appear on the wire.
#[derive(Debug, Clone, Copy)]
pub(super) struct Counts {
    pub questions: u16,
    pub answers: u16,
    pub authority: u16,
    pub additional: u16,
}

pub(super) fn read_header(bytes: &[u8]) -> Result<(Header, Counts), DomainError> {
    if bytes.len() < HEADER_LEN {
        return Err(DomainError::MalformedPacket(format!(
            "truncated header: {} of {} bytes",
            bytes.len(),
            HEADER_LEN
        )));
    }
    let word = |i: usize| u16::from_be_bytes([bytes[i], bytes[i + 1]]);
    Ok((
        Header::from_flags(word(0), word(2)),
        Counts {
            questions: word(4),
            answers: word(6),
            authority: word(8),
            additional: word(10),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_bits() {
        let header = Header {
            id: 1,
            qr: true,
            opcode: 0,
            aa: true,
            tc: true,
            rd: true,
            ra: true,
            rcode: RCODE_NXDOMAIN,
        };
        assert_eq!(header.flags(), 0x8783);
        assert_eq!(Header::from_flags(1, 0x8783), header);
    }

    #[test]
    fn test_peek_reads_flags_of_a_cut_message() {
        let bytes = [0xAB, 0xCD, 0x83, 0x80, 0, 1, 0, 40, 0, 0, 0, 0, 0x07];
        let header = Header::peek(&bytes).unwrap();
        assert_eq!(header.id, 0xABCD);
        assert!(header.qr);
        assert!(header.tc);
        assert!(Header::peek(&bytes[..11]).is_none());
    }

    #[test]
    fn test_query_header_sets_only_rd() {
        assert_eq!(Header::query(7, true).flags(), FLAG_RD);
        assert_eq!(Header::query(7, false).flags(), 0);
    }

    #[test]
    fn test_short_header_is_malformed() {
        assert!(matches!(
            read_header(&[0; 11]),
            Err(DomainError::MalformedPacket(_))
        ));
    }
}
