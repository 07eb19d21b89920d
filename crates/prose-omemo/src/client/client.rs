// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use jid::Jid;
use minidom::Element;
use tracing::{debug, info, instrument, warn};

use crate::client::builder::OmemoClientBuilder;
use crate::context::{ClientContext, MergeOutcome, RequestCategory};
use crate::domain::models::{DeviceId, UserId};
use crate::services::{
    BundleCoordinator, DecryptOutcome, MessagePipeline, SelfAnnouncer, SessionCoordinator,
};
use crate::stanza::{
    build_device_list_query, ensure_well_formed, parse_device_list_update, StanzaKind,
};
use crate::util::ParseError;
use crate::{ns, OmemoError};

/// Entry point for the host. Feed every inbound stanza to `handle_stanza`, send messages
/// through `send_message` and call `connect` once the connection is up.
#[derive(Clone)]
pub struct OmemoClient {
    pub(super) inner: Arc<OmemoClientInner>,
}

pub(super) struct OmemoClientInner {
    pub ctx: Arc<ClientContext>,
    pub sessions: Arc<SessionCoordinator>,
    pub bundles: BundleCoordinator,
    pub pipeline: MessagePipeline,
    pub announcer: SelfAnnouncer,
}

/// What happened to an inbound stanza.
#[derive(Debug, Clone, PartialEq)]
pub enum StanzaDisposition {
    /// The stanza was meant for OMEMO and must not be processed any further.
    Consumed,
    /// The stanza was an encrypted message.
    Decrypted(DecryptedMessage),
    /// Not an OMEMO stanza.
    NotHandled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecryptedMessage {
    pub sender: UserId,
    pub sender_device_id: DeviceId,
    pub plaintext: String,
    /// The inbound stanza with its `<encrypted/>` payload replaced by a `<body/>`.
    pub message: Element,
}

impl OmemoClient {
    pub fn builder() -> OmemoClientBuilder {
        OmemoClientBuilder::new()
    }
}

impl OmemoClient {
    /// Announces our device and bundle and asks for our own device list, depending on the
    /// configuration.
    #[instrument(skip(self), fields(account = %self.inner.ctx.account))]
    pub async fn connect(&self) -> Result<(), OmemoError> {
        let ctx = &self.inner.ctx;

        if ctx.config.announce_on_connect {
            self.inner.announcer.announce_self().await?;
        }

        if ctx.config.query_own_device_list_on_connect {
            self.query_device_list(&ctx.account)?;
        }

        Ok(())
    }

    /// Service discovery features the host needs to advertise so that the server pushes device
    /// list updates to us.
    pub fn disco_features(&self) -> Vec<&'static str> {
        vec![ns::LEGACY_OMEMO_DEVICELIST_NOTIFY]
    }

    pub fn account(&self) -> &UserId {
        &self.inner.ctx.account
    }

    pub fn full_jid(&self) -> &Jid {
        &self.inner.ctx.full_jid
    }

    pub fn device_id(&self) -> DeviceId {
        self.inner.ctx.own_device_id
    }

    pub fn show_devices(&self, user_id: &UserId) -> Vec<DeviceId> {
        self.inner.ctx.directory.devices_for(user_id)
    }

    pub fn has_session(&self, user_id: &UserId, device_id: DeviceId) -> bool {
        self.inner.sessions.has_session(user_id, device_id)
    }
}

impl OmemoClient {
    /// Parses `xml` and dispatches it like `handle_stanza`. Hosts often hand over stanzas
    /// stripped of the stream's namespace, so a root without `xmlns` is read as `jabber:client`.
    pub async fn handle_raw_stanza(&self, xml: &str) -> Result<StanzaDisposition, OmemoError> {
        let stanza =
            Element::from_reader_with_prefixes(xml.as_bytes(), ns::JABBER_CLIENT.to_string())
                .map_err(ParseError::from)?;
        self.handle_stanza(&stanza).await
    }

    pub async fn handle_stanza(&self, stanza: &Element) -> Result<StanzaDisposition, OmemoError> {
        let kind = StanzaKind::classify(stanza);

        let result = match kind {
            StanzaKind::DeviceListUpdate => self.handle_device_list_update(stanza).await,
            StanzaKind::BundleResponse => self
                .inner
                .bundles
                .handle_response(stanza)
                .await
                .map(|_| StanzaDisposition::Consumed),
            StanzaKind::EncryptedMessage => self.handle_encrypted_message(stanza).await,
            StanzaKind::Other => Ok(StanzaDisposition::NotHandled),
        };

        match result {
            Err(err) if err.is_parse_error() => {
                warn!("Dropping {kind:?} stanza. {err}");
                Ok(StanzaDisposition::Consumed)
            }
            result => result,
        }
    }

    async fn handle_device_list_update(
        &self,
        stanza: &Element,
    ) -> Result<StanzaDisposition, OmemoError> {
        let update = parse_device_list_update(stanza)?;
        info!(
            "Received device list of {}: {:?}",
            update.sender,
            update.device_ids()
        );

        let ctx = &self.inner.ctx;
        if ctx.directory.merge(&update.sender, update.device_ids()) == MergeOutcome::OwnDeviceMissing
        {
            info!("Our device is missing from our own device list.");
            self.inner.announcer.announce_self().await?;
        }

        self.inner.bundles.fetch_all(&update.sender)?;
        Ok(StanzaDisposition::Consumed)
    }

    async fn handle_encrypted_message(
        &self,
        stanza: &Element,
    ) -> Result<StanzaDisposition, OmemoError> {
        match self.inner.pipeline.decrypt(stanza).await? {
            DecryptOutcome::Decrypted {
                sender,
                sender_device_id,
                plaintext,
            } => Ok(StanzaDisposition::Decrypted(DecryptedMessage {
                message: replace_encrypted_with_body(stanza, &plaintext),
                sender,
                sender_device_id,
                plaintext,
            })),
            DecryptOutcome::NotAnOmemoMessage => Ok(StanzaDisposition::NotHandled),
        }
    }
}

impl OmemoClient {
    pub async fn encrypt_message(
        &self,
        to: &UserId,
        plaintext: &str,
    ) -> Result<Element, OmemoError> {
        let ctx = &self.inner.ctx;
        let stanza = self.inner.pipeline.encrypt(&ctx.account, to, plaintext).await?;
        ensure_well_formed(&stanza)?;
        Ok(stanza)
    }

    pub async fn send_message(&self, to: &UserId, plaintext: &str) -> Result<(), OmemoError> {
        let stanza = self.encrypt_message(to, plaintext).await?;
        self.inner.ctx.send_stanza(stanza)
    }

    /// Encrypts a plaintext `<message/>` prepared by the host. Returns `None` for stanzas that
    /// carry no body or are encrypted already. The stanza's id and any other payloads (chat
    /// states, receipts…) are kept.
    pub async fn encrypt_outgoing_stanza(
        &self,
        stanza: &Element,
    ) -> Result<Option<Element>, OmemoError> {
        if !stanza.is("message", ns::JABBER_CLIENT)
            || stanza.has_child("encrypted", ns::LEGACY_OMEMO)
        {
            return Ok(None);
        }
        let Some(body) = stanza.get_child("body", ns::JABBER_CLIENT) else {
            return Ok(None);
        };
        let Some(to) = stanza.attr("to") else {
            debug!("Not encrypting message without recipient.");
            return Ok(None);
        };

        let ctx = &self.inner.ctx;
        let to = UserId::from_address(to)?;
        let request_id = match stanza.attr("id") {
            Some(id) => id.to_string(),
            None => ctx.next_request_id(RequestCategory::Msg),
        };

        let mut encrypted = self
            .inner
            .pipeline
            .encrypt_with_id(&ctx.account, &to, &body.text(), &request_id)
            .await?;

        for child in stanza
            .children()
            .filter(|child| !child.is("body", ns::JABBER_CLIENT))
        {
            encrypted.append_child(child.clone());
        }

        ensure_well_formed(&encrypted)?;
        Ok(Some(encrypted))
    }
}

impl OmemoClient {
    /// Asks for the device list of `user_id` and requests the bundles of all devices we know
    /// about so far. Returns the number of bundle requests sent.
    #[instrument(skip(self))]
    pub fn start_session(&self, user_id: &UserId) -> Result<usize, OmemoError> {
        self.query_device_list(user_id)?;
        self.inner
            .bundles
            .fetch_all_with_category(user_id, RequestCategory::Bundle)
    }

    pub fn end_session(&self, user_id: &UserId) {
        self.inner.sessions.end(user_id)
    }

    pub async fn announce(&self) -> Result<(), OmemoError> {
        self.inner.announcer.announce_self().await
    }

    fn query_device_list(&self, user_id: &UserId) -> Result<(), OmemoError> {
        let ctx = &self.inner.ctx;
        let request_id = ctx.next_request_id(RequestCategory::DeviceList);
        ctx.send_stanza(build_device_list_query(
            &ctx.full_jid,
            user_id,
            &request_id,
        ))
    }
}

fn replace_encrypted_with_body(stanza: &Element, plaintext: &str) -> Element {
    let mut builder = Element::builder(stanza.name(), stanza.ns());
    for (name, value) in stanza.attrs() {
        builder = builder.attr(name, value);
    }

    builder
        .append_all(
            stanza
                .children()
                .filter(|child| {
                    !child.is("encrypted", ns::LEGACY_OMEMO)
                        && !child.is("body", ns::JABBER_CLIENT)
                })
                .cloned(),
        )
        .append(
            Element::builder("body", ns::JABBER_CLIENT)
                .append(plaintext)
                .build(),
        )
        .build()
}
