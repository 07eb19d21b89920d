// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use builder::{BuilderError, OmemoClientBuilder};
pub use client::{DecryptedMessage, OmemoClient, StanzaDisposition};
pub use command::{Command, CommandError};
pub use config::OmemoConfig;

mod builder;
mod client;
mod command;
mod config;
