// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use minidom::Element;

/// The host's outbound stanza channel. Delivery is fire-and-forget, responses come back
/// through `OmemoClient::handle_stanza`.
pub trait Connection: Send + Sync {
    fn send_stanza(&self, stanza: Element) -> Result<()>;
}
