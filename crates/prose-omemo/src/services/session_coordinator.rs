// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::context::ClientContext;
use crate::domain::models::{DeviceBundle, DeviceId, UserId};
use crate::engine::SessionHandle;
use crate::OmemoError;

/// Decides when sessions are (re)built and remembers the handle of the most recent one per
/// device.
pub struct SessionCoordinator {
    ctx: Arc<ClientContext>,
    sessions: RwLock<HashMap<(UserId, DeviceId), SessionHandle>>,
}

impl SessionCoordinator {
    pub fn new(ctx: Arc<ClientContext>) -> Self {
        Self {
            ctx,
            sessions: Default::default(),
        }
    }

    /// Builds a session from a freshly fetched bundle. Building again for the same device
    /// replaces the previous session.
    pub async fn build(
        &self,
        user_id: &UserId,
        device_id: DeviceId,
        bundle: DeviceBundle,
    ) -> Result<SessionHandle, OmemoError> {
        info!("Building session with {user_id}'s device {device_id}…");

        let handle = self
            .ctx
            .engine
            .build_session(user_id, device_id, bundle)
            .await
            .map_err(|source| {
                warn!("Could not build session with {user_id}'s device {device_id}. {source}");
                OmemoError::SessionBuildFailure {
                    user_id: user_id.clone(),
                    device_id,
                    source,
                }
            })?;

        if let Some(previous) = self
            .sessions
            .write()
            .insert((user_id.clone(), device_id), handle)
        {
            debug!("Session {previous:?} with {user_id}'s device {device_id} superseded by {handle:?}");
        }

        Ok(handle)
    }

    /// Sessions belong to devices, not to conversations. Ending a conversation leaves them
    /// untouched.
    pub fn end(&self, user_id: &UserId) {
        debug!("Ending OMEMO conversation with {user_id}. Sessions are kept.");
    }

    pub fn current_session(&self, user_id: &UserId, device_id: DeviceId) -> Option<SessionHandle> {
        self.sessions
            .read()
            .get(&(user_id.clone(), device_id))
            .copied()
    }

    pub fn has_session(&self, user_id: &UserId, device_id: DeviceId) -> bool {
        self.current_session(user_id, device_id).is_some()
    }
}
