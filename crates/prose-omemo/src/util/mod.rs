// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use element_ext::{parse_bool, ElementBuilderExt, ElementExt};
pub use error::{OmemoError, ParseError};

pub mod element_ext;
mod error;
