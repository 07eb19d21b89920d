// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{DeviceBundle, DeviceId, EncryptedEnvelope, UserId};

/// Token for a session the engine established with one device. Only the engine knows what it
/// refers to.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(u64);

impl SessionHandle {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl Debug for SessionHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionHandle({})", self.0)
    }
}

/// The Signal ratchet implementation. It owns key material and session storage, the client
/// only tells it when to build sessions and what to encrypt or decrypt.
#[async_trait]
pub trait EncryptionEngine: Send + Sync {
    fn own_device_id(&self) -> DeviceId;

    /// The public part of the local key material, as published on the bundle node.
    async fn self_bundle(&self) -> Result<DeviceBundle>;

    async fn build_session(
        &self,
        user_id: &UserId,
        device_id: DeviceId,
        bundle: DeviceBundle,
    ) -> Result<SessionHandle>;

    /// Encrypts `plaintext` for every device in `recipient_devices` the engine has a session
    /// with.
    async fn create_message(
        &self,
        from: &UserId,
        to: &UserId,
        recipient_devices: &[DeviceId],
        plaintext: &str,
    ) -> Result<EncryptedEnvelope>;

    async fn decrypt_message(
        &self,
        sender: &UserId,
        envelope: &EncryptedEnvelope,
    ) -> Result<String>;
}
