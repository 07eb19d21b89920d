// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

//! Builders and parsers for the OMEMO wire shapes. Everything in here is stateless.

pub use bundle::{
    build_bundle_announce, build_bundle_query, bundle_node, parse_bundle_response, BundleResponse,
};
pub use device_list::{
    build_device_list_announce, build_device_list_query, parse_device_list_update,
    DeviceListUpdate,
};
pub use encrypted::{build_encrypted_message, parse_encrypted_message};
pub use kind::StanzaKind;
pub use well_formed::ensure_well_formed;

mod bundle;
mod device_list;
mod encrypted;
mod kind;
pub mod ns;
mod pubsub;
mod well_formed;
