use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Identifier issued by the remote API.
///
/// The API may hand back numeric or textual keys; whichever it sends is kept
/// as-is and echoed back in dependent payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(untagged)]
pub enum RemoteId {
    #[display(fmt = "{}", _0)]
    Numeric(i64),
    #[display(fmt = "{}", _0)]
    Text(String),
}

impl From<i64> for RemoteId {
    fn from(id: i64) -> Self {
        RemoteId::Numeric(id)
    }
}

impl From<&str> for RemoteId {
    fn from(id: &str) -> Self {
        RemoteId::Text(id.to_string())
    }
}
