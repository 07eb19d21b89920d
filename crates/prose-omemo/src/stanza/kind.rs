// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;

use crate::ns;

use super::pubsub;

/// What an inbound stanza means to OMEMO. Computed once per stanza, before any parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StanzaKind {
    /// A PEP notification or an `<iq/>` result for the device-list node.
    DeviceListUpdate,
    /// An `<iq/>` result for a per-device bundle node.
    BundleResponse,
    /// A `<message/>` carrying an `<encrypted/>` payload.
    EncryptedMessage,
    Other,
}

impl StanzaKind {
    pub fn classify(stanza: &Element) -> Self {
        if !stanza.has_ns(ns::JABBER_CLIENT) {
            return StanzaKind::Other;
        }

        match stanza.name() {
            "message" => {
                if pubsub::items_node(stanza) == Some(ns::LEGACY_OMEMO_DEVICELIST) {
                    return StanzaKind::DeviceListUpdate;
                }
                if stanza.has_child("encrypted", ns::LEGACY_OMEMO) {
                    return StanzaKind::EncryptedMessage;
                }
                StanzaKind::Other
            }
            "iq" if stanza.attr("type") == Some("result") => {
                let Some(node) = pubsub::items_node(stanza) else {
                    return StanzaKind::Other;
                };
                if node == ns::LEGACY_OMEMO_DEVICELIST {
                    return StanzaKind::DeviceListUpdate;
                }
                match node.split_once(':') {
                    Some((prefix, _)) if prefix == ns::LEGACY_OMEMO_BUNDLES => {
                        StanzaKind::BundleResponse
                    }
                    _ => StanzaKind::Other,
                }
            }
            _ => StanzaKind::Other,
        }
    }
}
