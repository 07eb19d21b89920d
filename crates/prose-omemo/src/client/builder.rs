// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use jid::Jid;

use crate::client::client::OmemoClientInner;
use crate::client::{OmemoClient, OmemoConfig};
use crate::connector::Connection;
use crate::context::ClientContext;
use crate::domain::models::UserId;
use crate::engine::EncryptionEngine;
use crate::services::{BundleCoordinator, MessagePipeline, SelfAnnouncer, SessionCoordinator};

#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    #[error("No JID was set")]
    MissingJid,
    #[error("No connection was set")]
    MissingConnection,
    #[error("No encryption engine was set")]
    MissingEngine,
    #[error(transparent)]
    InvalidJid(#[from] jid::Error),
}

#[derive(Default)]
pub struct OmemoClientBuilder {
    jid: Option<Jid>,
    connection: Option<Arc<dyn Connection>>,
    engine: Option<Arc<dyn EncryptionEngine>>,
    config: OmemoConfig,
}

impl OmemoClientBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// The address we're connected as. Device list stanzas are sent from it, everything else
    /// from its bare form.
    pub fn set_jid(mut self, jid: Jid) -> Self {
        self.jid = Some(jid);
        self
    }

    pub fn set_connection(mut self, connection: Arc<dyn Connection>) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn set_engine(mut self, engine: Arc<dyn EncryptionEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn set_config(mut self, config: OmemoConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<OmemoClient, BuilderError> {
        let jid = self.jid.ok_or(BuilderError::MissingJid)?;
        let connection = self.connection.ok_or(BuilderError::MissingConnection)?;
        let engine = self.engine.ok_or(BuilderError::MissingEngine)?;
        let account = UserId::from_address(jid.to_string())?;

        let ctx = Arc::new(ClientContext::new(
            account,
            jid,
            self.config,
            connection,
            engine,
        ));
        let sessions = Arc::new(SessionCoordinator::new(ctx.clone()));

        Ok(OmemoClient {
            inner: Arc::new(OmemoClientInner {
                bundles: BundleCoordinator::new(ctx.clone(), sessions.clone()),
                pipeline: MessagePipeline::new(ctx.clone()),
                announcer: SelfAnnouncer::new(ctx.clone()),
                sessions,
                ctx,
            }),
        })
    }
}
