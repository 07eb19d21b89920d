// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::str::FromStr;

use minidom::Element;

use crate::OmemoError;

/// Serializes `stanza` and reads it back. Every stanza passes through here before it is handed
/// to the connection.
pub fn ensure_well_formed(stanza: &Element) -> Result<(), OmemoError> {
    let mut buf = Vec::new();
    stanza
        .write_to(&mut buf)
        .map_err(|err| OmemoError::MalformedOutgoingStanza {
            msg: err.to_string(),
        })?;

    let xml = String::from_utf8(buf).map_err(|err| OmemoError::MalformedOutgoingStanza {
        msg: err.to_string(),
    })?;

    Element::from_str(&xml).map_err(|err| OmemoError::MalformedOutgoingStanza {
        msg: format!("{err} in {xml}"),
    })?;

    Ok(())
}
