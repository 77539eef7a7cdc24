#![allow(dead_code)]
use dnscope_domain::{DomainName, RecordData, ResourceRecord};
use std::net::Ipv4Addr;

pub struct RecordBuilder {
    name: DomainName,
    ttl: u32,
    data: RecordData,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            name: DomainName::parse("example.com").unwrap(),
            ttl: 300,
            data: RecordData::A(Ipv4Addr::new(93, 184, 216, 34)),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = DomainName::parse(name).unwrap();
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn a(mut self, addr: &str) -> Self {
        self.data = RecordData::A(addr.parse().unwrap());
        self
    }

    pub fn data(mut self, data: RecordData) -> Self {
        self.data = data;
        self
    }

    pub fn unknown(mut self, type_code: u16) -> Self {
        self.data = RecordData::Unknown {
            type_code,
            bytes: vec![0, 1, 2],
        };
        self
    }

    pub fn build(self) -> ResourceRecord {
        ResourceRecord::new(self.name, self.ttl, self.data)
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
