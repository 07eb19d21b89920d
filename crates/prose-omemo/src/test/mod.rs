// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::BareJid;

pub use connected_client::{ClientTestAdditions, ConnectedClient, OWN_DEVICE_ID};
pub use connector::Connection;
pub use element_ext::ElementExt;
pub use fake_engine::FakeEngine;

mod connected_client;

#[macro_export]
macro_rules! jid {
    ($jid:expr) => {
        $jid.parse::<jid::Jid>().unwrap()
    };
}

#[macro_export]
macro_rules! user_id {
    ($jid:expr) => {
        $crate::domain::models::UserId::from_address($jid).unwrap()
    };
}

pub trait BareJidTestAdditions {
    fn ours() -> BareJid;
    fn theirs() -> BareJid;
}

impl BareJidTestAdditions for BareJid {
    fn ours() -> BareJid {
        "test@prose.org".parse().unwrap()
    }

    fn theirs() -> BareJid {
        "friend@prose.org".parse().unwrap()
    }
}
