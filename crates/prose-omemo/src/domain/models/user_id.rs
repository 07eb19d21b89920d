// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use jid::{BareJid, Jid};

/// Represents an XMPP user identifier without resource specification.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserId(BareJid);

impl UserId {
    pub fn into_inner(self) -> BareJid {
        self.0
    }

    /// Parses any address, full or bare, and drops its resource.
    pub fn from_address(address: impl AsRef<str>) -> Result<Self, jid::Error> {
        let address = address.as_ref().trim();
        let bare = address
            .split_once('/')
            .map_or(address, |(bare, _resource)| bare);
        Ok(UserId(bare.parse::<BareJid>()?))
    }
}

impl From<BareJid> for UserId {
    fn from(value: BareJid) -> Self {
        UserId(value)
    }
}

impl From<UserId> for Jid {
    fn from(value: UserId) -> Self {
        Jid::from(value.0)
    }
}

impl AsRef<BareJid> for UserId {
    fn as_ref(&self) -> &BareJid {
        &self.0
    }
}

impl Debug for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = jid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_address(s)
    }
}
