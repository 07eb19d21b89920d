// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use minidom::Element;
use tracing::{debug, info, warn};

use crate::context::{ClientContext, RequestCategory};
use crate::domain::models::UserId;
use crate::engine::SessionHandle;
use crate::services::SessionCoordinator;
use crate::stanza::{build_bundle_query, parse_bundle_response, BundleResponse};
use crate::OmemoError;

/// Requests the bundles of known devices and turns the responses into sessions.
pub struct BundleCoordinator {
    ctx: Arc<ClientContext>,
    sessions: Arc<SessionCoordinator>,
}

impl BundleCoordinator {
    pub fn new(ctx: Arc<ClientContext>, sessions: Arc<SessionCoordinator>) -> Self {
        Self { ctx, sessions }
    }

    /// Sends one bundle query per device currently known for `user_id` (except our own) and
    /// returns how many were sent. Responses arrive through `handle_response`.
    pub fn fetch_all(&self, user_id: &UserId) -> Result<usize, OmemoError> {
        self.fetch_all_with_category(user_id, RequestCategory::Fetch)
    }

    pub(crate) fn fetch_all_with_category(
        &self,
        user_id: &UserId,
        category: RequestCategory,
    ) -> Result<usize, OmemoError> {
        let mut device_ids = self.ctx.directory.devices_for(user_id);
        if user_id == &self.ctx.account {
            device_ids.retain(|device_id| device_id != &self.ctx.own_device_id);
        }

        if device_ids.is_empty() {
            debug!("No known devices for {user_id}. Not fetching any bundles.");
            return Ok(0);
        }

        let from = self.ctx.account_jid();
        for device_id in device_ids.iter() {
            debug!("Fetching bundle of {user_id}'s device {device_id}…");
            let request_id = self.ctx.next_request_id(category);
            self.ctx
                .send_stanza(build_bundle_query(&from, user_id, *device_id, &request_id))?;
        }

        Ok(device_ids.len())
    }

    /// Parses a bundle response and builds a session from it. Unparseable responses are
    /// dropped without touching any state.
    pub async fn handle_response(&self, stanza: &Element) -> Result<SessionHandle, OmemoError> {
        let BundleResponse {
            owner,
            device_id,
            bundle,
        } = parse_bundle_response(stanza).map_err(|err| {
            warn!("Ignoring invalid bundle response. {err}");
            err
        })?;

        info!("Received bundle of {owner}'s device {device_id}.");
        self.sessions.build(&owner, device_id, bundle).await
    }
}
