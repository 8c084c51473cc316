//! Data models returned by the RIPE Atlas API.
//!
//! Only the commonly used fields are typed; everything is optional where the
//! API may leave it out.

use serde::{Deserialize, Deserializer, Serialize};

/// Status of a measurement or probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Status {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    /// When the status last changed
    #[serde(default)]
    pub since: Option<String>,
}

/// A measurement definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    pub id: u64,

    /// Measurement type (`ping`, `traceroute`, `sslcert`, ...)
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<Status>,

    /// Address family, 4 or 6
    #[serde(default)]
    pub af: Option<u8>,

    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub target_ip: Option<String>,

    #[serde(default)]
    pub target_asn: Option<u32>,

    #[serde(default)]
    pub is_oneoff: bool,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default)]
    pub interval: Option<u64>,

    #[serde(default)]
    pub creation_time: Option<i64>,

    #[serde(default)]
    pub start_time: Option<i64>,

    #[serde(default)]
    pub stop_time: Option<i64>,

    #[serde(default)]
    pub participant_count: Option<u32>,

    /// URL of the results of this measurement
    #[serde(default)]
    pub result: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub slug: String,
}

/// A probe hosting measurements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Probe {
    pub id: u64,

    #[serde(default)]
    pub asn_v4: Option<u32>,

    #[serde(default)]
    pub asn_v6: Option<u32>,

    #[serde(default)]
    pub address_v4: Option<String>,

    #[serde(default)]
    pub address_v6: Option<String>,

    #[serde(default)]
    pub prefix_v4: Option<String>,

    #[serde(default)]
    pub prefix_v6: Option<String>,

    #[serde(default)]
    pub country_code: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub is_anchor: bool,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default)]
    pub status: Option<Status>,

    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// One result of an `sslcert` measurement: the certificate chain a probe
/// got from the target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SslCertResult {
    /// Measurement id
    pub msm_id: u64,

    /// Probe id
    pub prb_id: u64,

    #[serde(default)]
    pub af: Option<u8>,

    #[serde(default)]
    pub dst_name: Option<String>,

    #[serde(default)]
    pub dst_addr: Option<String>,

    #[serde(default, deserialize_with = "port")]
    pub dst_port: Option<u16>,

    #[serde(default)]
    pub src_addr: Option<String>,

    /// Protocol, e.g. `TLS`
    #[serde(default)]
    pub method: Option<String>,

    /// Protocol version
    #[serde(default)]
    pub ver: Option<String>,

    /// Round trip time in milliseconds
    #[serde(default)]
    pub rt: Option<f64>,

    /// Time to connect in milliseconds
    #[serde(default)]
    pub ttc: Option<f64>,

    #[serde(default)]
    pub timestamp: Option<i64>,

    /// PEM encoded certificates, leaf first
    #[serde(default)]
    pub cert: Vec<String>,
}

/// Ports come back either as a number or as a string.
fn port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Option::<Port>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Port::Number(n)) => Ok(Some(n)),
        Some(Port::Text(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
