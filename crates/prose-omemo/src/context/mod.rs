// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use client_context::ClientContext;
pub use device_directory::{DeviceDirectory, MergeOutcome};
pub use request_id_allocator::{RequestCategory, RequestIdAllocator};

mod client_context;
mod device_directory;
mod request_id_allocator;
