// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use jid::{BareJid, Jid};

use crate::client::{OmemoClient, OmemoConfig};
use crate::test::{BareJidTestAdditions, Connection, FakeEngine};

pub const OWN_DEVICE_ID: u32 = 1000;

#[async_trait]
pub trait ClientTestAdditions {
    /// A client for `test@prose.org/test` with device 1000 that went through `connect`. The
    /// connection is reset afterwards.
    async fn connected_client() -> Result<ConnectedClient>;
    fn client_with_config(config: OmemoConfig) -> Result<ConnectedClient>;
}

pub struct ConnectedClient {
    pub client: OmemoClient,
    pub connection: Arc<Connection>,
    pub engine: Arc<FakeEngine>,
}

#[async_trait]
impl ClientTestAdditions for OmemoClient {
    async fn connected_client() -> Result<ConnectedClient> {
        let connected_client = Self::client_with_config(OmemoConfig::default())?;
        connected_client.client.connect().await?;
        connected_client.connection.reset();
        Ok(connected_client)
    }

    fn client_with_config(config: OmemoConfig) -> Result<ConnectedClient> {
        let connection = Arc::new(Connection::default());
        let engine = Arc::new(FakeEngine::new(OWN_DEVICE_ID));

        let client = OmemoClient::builder()
            .set_jid(format!("{}/test", BareJid::ours()).parse::<Jid>()?)
            .set_connection(connection.clone())
            .set_engine(engine.clone())
            .set_config(config)
            .build()?;

        Ok(ConnectedClient {
            client,
            connection,
            engine,
        })
    }
}
