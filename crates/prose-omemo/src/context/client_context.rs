// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use jid::Jid;
use minidom::Element;
use tracing::{debug, error};

use crate::client::OmemoConfig;
use crate::connector::Connection;
use crate::context::{DeviceDirectory, RequestCategory, RequestIdAllocator};
use crate::domain::models::{DeviceId, UserId};
use crate::engine::EncryptionEngine;
use crate::stanza::ensure_well_formed;
use crate::OmemoError;

/// State shared by all services of one client session.
pub struct ClientContext {
    pub account: UserId,
    pub full_jid: Jid,
    pub own_device_id: DeviceId,
    pub config: OmemoConfig,
    pub directory: DeviceDirectory,
    pub request_ids: RequestIdAllocator,
    pub(crate) connection: Arc<dyn Connection>,
    pub(crate) engine: Arc<dyn EncryptionEngine>,
}

impl ClientContext {
    pub(crate) fn new(
        account: UserId,
        full_jid: Jid,
        config: OmemoConfig,
        connection: Arc<dyn Connection>,
        engine: Arc<dyn EncryptionEngine>,
    ) -> Self {
        let own_device_id = engine.own_device_id();

        Self {
            directory: DeviceDirectory::new(account.clone(), own_device_id),
            account,
            full_jid,
            own_device_id,
            config,
            request_ids: RequestIdAllocator::new(),
            connection,
            engine,
        }
    }

    /// The bare account address as a `Jid`, used as sender of bundle and message stanzas.
    pub fn account_jid(&self) -> Jid {
        Jid::from(self.account.clone())
    }

    pub fn next_request_id(&self, category: RequestCategory) -> String {
        self.request_ids.next(category)
    }

    /// Validates `stanza` and hands it to the connection.
    pub(crate) fn send_stanza(&self, stanza: Element) -> Result<(), OmemoError> {
        if let Err(err) = ensure_well_formed(&stanza) {
            error!("Not sending stanza {}. {}", stanza.name(), err);
            return Err(err);
        }

        debug!("Sending stanza: {}", String::from(&stanza));

        self.connection
            .send_stanza(stanza)
            .map_err(|source| OmemoError::Connection { source })
    }
}
