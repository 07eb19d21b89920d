// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

use base64::{engine::general_purpose, Engine as _};

use super::DeviceId;

/// The per-message structure carrying a content key for every recipient device, the IV and
/// the ciphertext.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedEnvelope {
    pub sender_device_id: DeviceId,
    pub iv: Box<[u8]>,
    /// Empty for key-transport messages.
    pub payload: Box<[u8]>,
    pub keys: BTreeMap<DeviceId, EncryptedKey>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedKey {
    pub data: Box<[u8]>,
    /// Set when the key was encrypted as a PreKeySignalMessage, i.e. it opens a new session.
    pub is_pre_key: bool,
}

impl EncryptedEnvelope {
    pub fn is_key_transport(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn recipient_device_ids(&self) -> impl Iterator<Item = &DeviceId> {
        self.keys.keys()
    }
}

impl EncryptedKey {
    pub fn new(data: impl Into<Box<[u8]>>) -> Self {
        Self {
            data: data.into(),
            is_pre_key: false,
        }
    }

    pub fn pre_key(data: impl Into<Box<[u8]>>) -> Self {
        Self {
            data: data.into(),
            is_pre_key: true,
        }
    }
}

impl Debug for EncryptedEnvelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedEnvelope")
            .field("sender_device_id", &self.sender_device_id)
            .field("iv", &general_purpose::STANDARD.encode(&self.iv))
            .field("payload", &general_purpose::STANDARD.encode(&self.payload))
            .field("keys", &self.keys)
            .finish()
    }
}

impl Debug for EncryptedKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EncryptedKey({}{})",
            general_purpose::STANDARD.encode(&self.data),
            if self.is_pre_key { ", prekey" } else { "" }
        )
    }
}
