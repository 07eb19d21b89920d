// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use bundle_coordinator::BundleCoordinator;
pub use message_pipeline::{DecryptOutcome, MessagePipeline};
pub use self_announcer::SelfAnnouncer;
pub use session_coordinator::SessionCoordinator;

mod bundle_coordinator;
mod message_pipeline;
mod self_announcer;
mod session_coordinator;
