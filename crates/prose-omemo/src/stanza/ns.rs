// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use xmpp_parsers::ns::*;

/// XEP-0384: OMEMO Encryption (0.3, Conversations' legacy namespace)
pub const LEGACY_OMEMO: &str = "eu.siacs.conversations.axolotl";

/// XEP-0384: OMEMO Encryption, PEP node holding a user's device list
pub const LEGACY_OMEMO_DEVICELIST: &str = "eu.siacs.conversations.axolotl.devicelist";

/// XEP-0163: Personal Eventing Protocol, interest in device list notifications
pub const LEGACY_OMEMO_DEVICELIST_NOTIFY: &str =
    "eu.siacs.conversations.axolotl.devicelist+notify";

/// XEP-0384: OMEMO Encryption, prefix of the per-device bundle nodes (`<prefix>:<device_id>`)
pub const LEGACY_OMEMO_BUNDLES: &str = "eu.siacs.conversations.axolotl.bundles";

/// XEP-0334: Message Processing Hints
pub const HINTS: &str = "urn:xmpp:hints";
