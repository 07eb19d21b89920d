// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeMap;

use jid::Jid;
use minidom::Element;

use crate::domain::models::{DeviceId, EncryptedEnvelope, EncryptedKey, UserId};
use crate::util::{ElementBuilderExt, ParseError};
use crate::{ns, ElementExt, OmemoError};

impl TryFrom<&Element> for EncryptedEnvelope {
    type Error = ParseError;

    fn try_from(value: &Element) -> Result<Self, Self::Error> {
        value.expect_is("encrypted", ns::LEGACY_OMEMO)?;

        let header = value.child_req("header", ns::LEGACY_OMEMO)?;

        let keys = header
            .children()
            .filter(|child| child.is("key", ns::LEGACY_OMEMO))
            .map(|key| {
                let device_id = key.attr_parse::<DeviceId>("rid")?;
                let encrypted_key = EncryptedKey {
                    data: key.base64_text()?,
                    is_pre_key: key.attr_bool("prekey")?.unwrap_or(false),
                };
                Ok((device_id, encrypted_key))
            })
            .collect::<Result<BTreeMap<_, _>, ParseError>>()?;

        Ok(Self {
            sender_device_id: header.attr_parse("sid")?,
            iv: header.child_req("iv", ns::LEGACY_OMEMO)?.base64_text()?,
            payload: value
                .child_req("payload", ns::LEGACY_OMEMO)?
                .base64_text()?,
            keys,
        })
    }
}

impl From<EncryptedEnvelope> for Element {
    fn from(value: EncryptedEnvelope) -> Self {
        let keys = value.keys.into_iter().map(|(device_id, key)| {
            Element::builder("key", ns::LEGACY_OMEMO)
                .attr("rid", device_id)
                .attr_bool_opt("prekey", Some(key.is_pre_key))
                .append_base64(key.data)
                .build()
        });

        let header = Element::builder("header", ns::LEGACY_OMEMO)
            .attr("sid", value.sender_device_id)
            .append_all(keys)
            .append(
                Element::builder("iv", ns::LEGACY_OMEMO)
                    .append_base64(value.iv)
                    .build(),
            )
            .build();

        Element::builder("encrypted", ns::LEGACY_OMEMO)
            .append(header)
            .append(
                Element::builder("payload", ns::LEGACY_OMEMO)
                    .append_base64(value.payload)
                    .build(),
            )
            .build()
    }
}

pub fn build_encrypted_message(
    from: &Jid,
    to: &UserId,
    request_id: &str,
    envelope: EncryptedEnvelope,
) -> Element {
    Element::builder("message", ns::JABBER_CLIENT)
        .attr("from", from.to_string())
        .attr("id", request_id)
        .attr("to", to.to_string())
        .attr("type", "chat")
        .append(Element::from(envelope))
        .build()
}

/// Extracts the envelope from a message stanza (or from a bare `<encrypted/>` element).
pub fn parse_encrypted_message(stanza: &Element) -> Result<EncryptedEnvelope, OmemoError> {
    let encrypted = stanza
        .find_descendant("encrypted", ns::LEGACY_OMEMO)
        .ok_or_else(|| OmemoError::MalformedEnvelope {
            msg: "Missing <encrypted/> element".to_string(),
        })?;

    EncryptedEnvelope::try_from(encrypted).map_err(|err| OmemoError::MalformedEnvelope {
        msg: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use anyhow::Result;

    use super::*;

    #[test]
    fn test_parses_message() -> Result<()> {
        let stanza = Element::from_str(
            r#"<message xmlns="jabber:client" from="bascht@yakshed.org/dino" to="renevolution@yakshed.org" type="chat"><encrypted xmlns="eu.siacs.conversations.axolotl"><header sid="27183"><key rid="31415">AQID</key><key prekey="true" rid="12321">BAUG</key><iv>BwgJ</iv></header><payload>CgsM</payload></encrypted></message>"#,
        )?;

        let envelope = parse_encrypted_message(&stanza)?;

        assert_eq!(envelope.sender_device_id, DeviceId::from(27183));
        assert_eq!(envelope.iv.as_ref(), &[7u8, 8, 9]);
        assert_eq!(envelope.payload.as_ref(), &[10u8, 11, 12]);
        assert_eq!(
            envelope.keys.get(&DeviceId::from(31415)),
            Some(&EncryptedKey::new(vec![1u8, 2, 3]))
        );
        assert_eq!(
            envelope.keys.get(&DeviceId::from(12321)),
            Some(&EncryptedKey::pre_key(vec![4u8, 5, 6]))
        );
        Ok(())
    }

    #[test]
    fn test_parses_key_transport_message() -> Result<()> {
        let stanza = Element::from_str(
            r#"<message xmlns="jabber:client" from="bascht@yakshed.org"><encrypted xmlns="eu.siacs.conversations.axolotl"><header sid="1"><key rid="2">AQID</key><iv>BwgJ</iv></header><payload/></encrypted></message>"#,
        )?;

        let envelope = parse_encrypted_message(&stanza)?;
        assert!(envelope.is_key_transport());
        Ok(())
    }

    #[test]
    fn test_requires_header_iv_and_payload() -> Result<()> {
        let stanzas = [
            r#"<message xmlns="jabber:client"><encrypted xmlns="eu.siacs.conversations.axolotl"><payload>CgsM</payload></encrypted></message>"#,
            r#"<message xmlns="jabber:client"><encrypted xmlns="eu.siacs.conversations.axolotl"><header sid="1"><key rid="2">AQID</key></header><payload>CgsM</payload></encrypted></message>"#,
            r#"<message xmlns="jabber:client"><encrypted xmlns="eu.siacs.conversations.axolotl"><header sid="1"><iv>BwgJ</iv></header></encrypted></message>"#,
            r#"<message xmlns="jabber:client"><encrypted xmlns="eu.siacs.conversations.axolotl"><header><iv>BwgJ</iv></header><payload>CgsM</payload></encrypted></message>"#,
            r#"<message xmlns="jabber:client"><body>Hi</body></message>"#,
        ];

        for stanza in stanzas {
            let stanza = Element::from_str(stanza)?;
            assert!(
                matches!(
                    parse_encrypted_message(&stanza),
                    Err(OmemoError::MalformedEnvelope { .. })
                ),
                "Expected MalformedEnvelope for {}",
                String::from(&stanza)
            );
        }
        Ok(())
    }
}
