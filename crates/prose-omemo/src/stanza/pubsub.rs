// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::Jid;
use minidom::Element;

use crate::domain::models::UserId;
use crate::ns;

/// https://xmpp.org/extensions/xep-0060.html#impl-singleton
const CURRENT_ITEM_ID: &str = "current";

/// XEP-0060 publish request for the account's own PEP service.
pub(super) fn publish_request(
    from: &Jid,
    request_id: &str,
    node: impl Into<String>,
    payload: Element,
) -> Element {
    let item = Element::builder("item", ns::PUBSUB)
        .attr("id", CURRENT_ITEM_ID)
        .append(payload)
        .build();

    let publish = Element::builder("publish", ns::PUBSUB)
        .attr("node", node.into())
        .append(item)
        .build();

    Element::builder("iq", ns::JABBER_CLIENT)
        .attr("from", from.to_string())
        .attr("id", request_id)
        .attr("type", "set")
        .append(Element::builder("pubsub", ns::PUBSUB).append(publish).build())
        .build()
}

/// XEP-0060 request for all items of `node` on `to`'s PEP service.
pub(super) fn items_request(
    from: &Jid,
    to: &UserId,
    request_id: &str,
    node: impl Into<String>,
) -> Element {
    let items = Element::builder("items", ns::PUBSUB)
        .attr("node", node.into())
        .build();

    Element::builder("iq", ns::JABBER_CLIENT)
        .attr("from", from.to_string())
        .attr("id", request_id)
        .attr("to", to.to_string())
        .attr("type", "get")
        .append(Element::builder("pubsub", ns::PUBSUB).append(items).build())
        .build()
}

/// Returns the node of the `<items/>` element carried either by a pubsub result (`<iq/>`)
/// or by a pubsub event notification (`<message/>`).
pub(super) fn items_node(stanza: &Element) -> Option<&str> {
    let items = match stanza.name() {
        "iq" => stanza
            .get_child("pubsub", ns::PUBSUB)?
            .get_child("items", ns::PUBSUB)?,
        "message" => stanza
            .get_child("event", ns::PUBSUB_EVENT)?
            .get_child("items", ns::PUBSUB_EVENT)?,
        _ => return None,
    };
    items.attr("node")
}
