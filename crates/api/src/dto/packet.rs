use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct PacketRequest {
    pub domain: String,
    #[serde(rename = "type", default = "super::default_record_type")]
    pub record_type: String,
    #[serde(default)]
    pub send: bool,
}

#[derive(Serialize, Debug, Clone)]
pub struct PacketResponse {
    pub transaction_id: u16,
    pub length: usize,
    pub hex_dump: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_hex_dump: Option<String>,
}
