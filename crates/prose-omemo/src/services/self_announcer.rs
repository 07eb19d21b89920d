// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use tracing::info;

use crate::context::{ClientContext, RequestCategory};
use crate::stanza::{build_bundle_announce, build_device_list_announce};
use crate::OmemoError;

/// Publishes our device id and bundle.
pub struct SelfAnnouncer {
    ctx: Arc<ClientContext>,
}

impl SelfAnnouncer {
    pub fn new(ctx: Arc<ClientContext>) -> Self {
        Self { ctx }
    }

    pub async fn announce_self(&self) -> Result<(), OmemoError> {
        let own_device_id = self.ctx.own_device_id;
        let bundle = self
            .ctx
            .engine
            .self_bundle()
            .await
            .map_err(|source| OmemoError::SelfBundleUnavailable { source })?;

        info!("Announcing device {own_device_id} of {}…", self.ctx.account);

        let request_id = self.ctx.next_request_id(RequestCategory::Announce);
        self.ctx.send_stanza(build_device_list_announce(
            &self.ctx.full_jid,
            own_device_id,
            &request_id,
        ))?;

        let request_id = self.ctx.next_request_id(RequestCategory::Announce);
        self.ctx.send_stanza(build_bundle_announce(
            &self.ctx.account_jid(),
            own_device_id,
            bundle,
            &request_id,
        ))?;

        self.ctx.directory.ensure_own_device();
        Ok(())
    }
}
