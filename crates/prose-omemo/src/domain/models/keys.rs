// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(Box<[u8]>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(PublicKey);

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreKeyId(u32);

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedPreKeyId(u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicSignedPreKey {
    pub id: SignedPreKeyId,
    pub key: PublicKey,
    pub signature: Box<[u8]>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicPreKey {
    pub id: PreKeyId,
    pub key: PublicKey,
}

impl PublicKey {
    pub fn into_inner(self) -> Box<[u8]> {
        self.0
    }
}

impl IdentityKey {
    pub fn into_inner(self) -> Box<[u8]> {
        self.0.into_inner()
    }
}

impl From<&[u8]> for PublicKey {
    fn from(value: &[u8]) -> Self {
        Self(value.into())
    }
}

impl From<Box<[u8]>> for PublicKey {
    fn from(value: Box<[u8]>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for IdentityKey {
    fn from(value: &[u8]) -> Self {
        Self(PublicKey::from(value))
    }
}

impl From<Box<[u8]>> for IdentityKey {
    fn from(value: Box<[u8]>) -> Self {
        Self(PublicKey::from(value))
    }
}

impl From<PublicKey> for IdentityKey {
    fn from(value: PublicKey) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for IdentityKey {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<u32> for PreKeyId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl AsRef<u32> for PreKeyId {
    fn as_ref(&self) -> &u32 {
        &self.0
    }
}

impl PreKeyId {
    pub fn into_inner(self) -> u32 {
        self.0
    }
}

impl From<u32> for SignedPreKeyId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl AsRef<u32> for SignedPreKeyId {
    fn as_ref(&self) -> &u32 {
        &self.0
    }
}

impl SignedPreKeyId {
    pub fn into_inner(self) -> u32 {
        self.0
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PublicKey({})",
            general_purpose::STANDARD.encode(self.0.as_ref())
        )
    }
}
