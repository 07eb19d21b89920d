// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use device::{Device, DeviceList};
pub use device_bundle::DeviceBundle;
pub use device_id::DeviceId;
pub use encrypted_envelope::{EncryptedEnvelope, EncryptedKey};
pub use keys::*;
pub use user_id::UserId;

mod device;
mod device_bundle;
mod device_id;
mod encrypted_envelope;
mod keys;
mod user_id;
