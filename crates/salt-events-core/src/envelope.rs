use salt_events_types::Opaque;
use serde::{Deserialize, Serialize};

/// One tag/payload pair as framed by the salt-api event stream.
///
/// ```json
/// {"tag": "salt/auth", "data": {"id": "web01", "act": "accept", "result": true}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event tag.
    pub tag: String,
    /// Raw payload.
    #[serde(default)]
    pub data: Opaque,
}
