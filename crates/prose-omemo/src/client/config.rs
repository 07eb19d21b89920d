// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OmemoConfig {
    /// Publish our device list and bundle in `OmemoClient::connect`.
    pub announce_on_connect: bool,
    /// Query our own device list in `OmemoClient::connect`, so that we learn about our other
    /// devices.
    pub query_own_device_list_on_connect: bool,
    /// Attach a `<store xmlns="urn:xmpp:hints"/>` hint to encrypted messages. Servers
    /// wouldn't archive them otherwise since they carry no `<body/>`.
    pub store_hint: bool,
}

impl Default for OmemoConfig {
    fn default() -> Self {
        Self {
            announce_on_connect: true,
            query_own_device_list_on_connect: true,
            store_hint: true,
        }
    }
}
