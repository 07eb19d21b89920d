// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::models::{DeviceId, UserId};

#[derive(Debug, thiserror::Error)]
pub enum OmemoError {
    #[error("Stanza carries no sender address")]
    MissingSender,
    #[error("Malformed device list: {msg}")]
    MalformedDeviceList { msg: String },
    #[error("Malformed bundle: {msg}")]
    MalformedBundle { msg: String },
    #[error("Malformed encrypted message: {msg}")]
    MalformedEnvelope { msg: String },
    #[error("No known OMEMO devices for {recipient}")]
    NoRecipientDevices { recipient: UserId },
    #[error("Failed to decrypt message from {sender}: {source}")]
    DecryptFailure {
        sender: UserId,
        #[source]
        source: anyhow::Error,
    },
    #[error("Failed to encrypt message for {recipient}: {source}")]
    EncryptFailure {
        recipient: UserId,
        #[source]
        source: anyhow::Error,
    },
    #[error("Failed to build session with {user_id}'s device {device_id}: {source}")]
    SessionBuildFailure {
        user_id: UserId,
        device_id: DeviceId,
        #[source]
        source: anyhow::Error,
    },
    #[error("Failed to load own bundle: {source}")]
    SelfBundleUnavailable {
        #[source]
        source: anyhow::Error,
    },
    /// The crate produced XML it cannot read back. This is a bug, not a runtime condition.
    #[error("Refusing to send malformed stanza: {msg}")]
    MalformedOutgoingStanza { msg: String },
    #[error("Connection error: {source}")]
    Connection {
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Jid(#[from] jid::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Parse error: {msg}")]
    Generic { msg: String },
    #[error(transparent)]
    ParseIntError(#[from] std::num::ParseIntError),
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Xml(#[from] minidom::Error),
    #[error(transparent)]
    Jid(#[from] jid::Error),
}

impl OmemoError {
    /// Whether the error stems from a single inbound stanza that could not be understood.
    /// These are dropped by the dispatcher without touching any state.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            OmemoError::MissingSender
                | OmemoError::MalformedDeviceList { .. }
                | OmemoError::MalformedBundle { .. }
                | OmemoError::MalformedEnvelope { .. }
                | OmemoError::Jid(_)
                | OmemoError::Parse(_)
        )
    }
}
