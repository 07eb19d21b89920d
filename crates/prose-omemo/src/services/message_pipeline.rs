// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::anyhow;
use minidom::Element;
use tracing::{debug, info, warn};

use crate::context::{ClientContext, RequestCategory};
use crate::domain::models::{DeviceId, UserId};
use crate::stanza::{build_encrypted_message, parse_encrypted_message, StanzaKind};
use crate::{ns, OmemoError};

#[derive(Debug, Clone, PartialEq)]
pub enum DecryptOutcome {
    Decrypted {
        sender: UserId,
        sender_device_id: DeviceId,
        plaintext: String,
    },
    /// The stanza is not an encrypted chat message and should be handled elsewhere.
    NotAnOmemoMessage,
}

/// Turns plaintext into encrypted `<message/>` stanzas and back.
pub struct MessagePipeline {
    ctx: Arc<ClientContext>,
}

impl MessagePipeline {
    pub fn new(ctx: Arc<ClientContext>) -> Self {
        Self { ctx }
    }

    pub async fn encrypt(
        &self,
        from: &UserId,
        to: &UserId,
        plaintext: &str,
    ) -> Result<Element, OmemoError> {
        let request_id = self.ctx.next_request_id(RequestCategory::Msg);
        self.encrypt_with_id(from, to, plaintext, &request_id).await
    }

    pub(crate) async fn encrypt_with_id(
        &self,
        from: &UserId,
        to: &UserId,
        plaintext: &str,
        request_id: &str,
    ) -> Result<Element, OmemoError> {
        let directory = &self.ctx.directory;

        let recipient_devices = directory.devices_for(to);
        if recipient_devices.is_empty() {
            return Err(OmemoError::NoRecipientDevices {
                recipient: to.clone(),
            });
        }

        // Our other devices need to be able to read the message too.
        let mut target_devices = recipient_devices;
        if to != &self.ctx.account {
            target_devices.extend(directory.devices_for(&self.ctx.account));
        }
        target_devices.retain(|device_id| device_id != &self.ctx.own_device_id);
        target_devices.sort();
        target_devices.dedup();

        let mut envelope = self
            .ctx
            .engine
            .create_message(from, to, &target_devices, plaintext)
            .await
            .map_err(|source| OmemoError::EncryptFailure {
                recipient: to.clone(),
                source,
            })?;

        envelope.keys.retain(|device_id, _| {
            let is_known =
                directory.contains(to, *device_id) || directory.contains(&self.ctx.account, *device_id);
            if !is_known {
                warn!("Dropping key for unknown device {device_id} in message to {to}.");
            }
            is_known
        });

        if envelope.keys.is_empty() {
            return Err(OmemoError::EncryptFailure {
                recipient: to.clone(),
                source: anyhow!("No session with any of {to}'s devices"),
            });
        }

        debug!(
            "Encrypted message to {to} for devices {:?}.",
            envelope.keys.keys().collect::<Vec<_>>()
        );

        let mut stanza =
            build_encrypted_message(&self.ctx.account_jid(), to, request_id, envelope);

        if self.ctx.config.store_hint {
            stanza.append_child(Element::builder("store", ns::HINTS).build());
        }

        Ok(stanza)
    }

    pub async fn decrypt(&self, stanza: &Element) -> Result<DecryptOutcome, OmemoError> {
        if StanzaKind::classify(stanza) != StanzaKind::EncryptedMessage {
            return Ok(DecryptOutcome::NotAnOmemoMessage);
        }

        let sender =
            UserId::from_address(stanza.attr("from").ok_or(OmemoError::MissingSender)?)?;
        let envelope = parse_encrypted_message(stanza)?;

        if !envelope.keys.contains_key(&self.ctx.own_device_id) {
            warn!(
                "Message from {sender} was not encrypted for our device {}.",
                self.ctx.own_device_id
            );
            return Err(OmemoError::DecryptFailure {
                sender,
                source: anyhow!("Message carries no key for device {}", self.ctx.own_device_id),
            });
        }

        let plaintext = self
            .ctx
            .engine
            .decrypt_message(&sender, &envelope)
            .await
            .map_err(|source| {
                warn!("Could not decrypt message from {sender}. {source}");
                OmemoError::DecryptFailure {
                    sender: sender.clone(),
                    source,
                }
            })?;

        info!(
            "Decrypted message from {sender}'s device {}.",
            envelope.sender_device_id
        );

        Ok(DecryptOutcome::Decrypted {
            sender,
            sender_device_id: envelope.sender_device_id,
            plaintext,
        })
    }
}
