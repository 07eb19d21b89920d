// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use super::{IdentityKey, PublicPreKey, PublicSignedPreKey};

/// The public key material a device publishes so that others can start a session with it.
///
/// A bundle is immutable once fetched and is handed to the engine exactly once. Which device it
/// belongs to is tracked by whoever holds it (see `BundleResponse`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceBundle {
    pub signed_pre_key: PublicSignedPreKey,
    pub identity_key: IdentityKey,
    /// One-time prekeys in the order in which they were published.
    pub pre_keys: Vec<PublicPreKey>,
}
