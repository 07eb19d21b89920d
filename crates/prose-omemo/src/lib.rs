// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

//! Client-side OMEMO orchestration (legacy `eu.siacs.conversations.axolotl` namespace).
//!
//! The crate keeps track of which devices a contact owns, fetches their key bundles, asks an
//! [`EncryptionEngine`] to build sessions and frames encrypted messages. It neither does the
//! actual cryptography nor owns the socket, both are provided by the host.

pub use client::{
    BuilderError, Command, CommandError, DecryptedMessage, OmemoClient, OmemoClientBuilder,
    OmemoConfig, StanzaDisposition,
};
pub use connector::Connection;
pub use context::{
    ClientContext, DeviceDirectory, MergeOutcome, RequestCategory, RequestIdAllocator,
};
pub use engine::{EncryptionEngine, SessionHandle};
pub use stanza::ns;
pub use util::{parse_bool, ElementExt, OmemoError, ParseError};

pub mod client;
mod connector;
pub mod context;
pub mod domain;
mod engine;
pub mod services;
pub mod stanza;
mod util;

#[cfg(feature = "test")]
pub mod test;
