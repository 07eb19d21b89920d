// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::Jid;
use minidom::Element;

use crate::domain::models::{
    DeviceBundle, DeviceId, IdentityKey, PublicKey, PublicPreKey, PublicSignedPreKey, UserId,
};
use crate::util::{ElementBuilderExt, ParseError};
use crate::{ns, ElementExt, OmemoError};

use super::pubsub;

/// A bundle fetched from `owner`'s PEP service. The device is identified by the node the
/// bundle was published on, not by the request that asked for it.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleResponse {
    pub owner: UserId,
    pub device_id: DeviceId,
    pub bundle: DeviceBundle,
}

pub fn bundle_node(device_id: DeviceId) -> String {
    format!("{}:{device_id}", ns::LEGACY_OMEMO_BUNDLES)
}

impl TryFrom<&Element> for DeviceBundle {
    type Error = ParseError;

    fn try_from(value: &Element) -> Result<Self, Self::Error> {
        value.expect_is("bundle", ns::LEGACY_OMEMO)?;

        let signed_pre_key_public = value.child_req("signedPreKeyPublic", ns::LEGACY_OMEMO)?;
        let signed_pre_key = PublicSignedPreKey {
            id: signed_pre_key_public
                .attr_parse::<u32>("signedPreKeyId")?
                .into(),
            key: PublicKey::from(signed_pre_key_public.base64_text()?),
            signature: value
                .child_req("signedPreKeySignature", ns::LEGACY_OMEMO)?
                .base64_text()?,
        };

        let identity_key = IdentityKey::from(
            value
                .child_req("identityKey", ns::LEGACY_OMEMO)?
                .base64_text()?,
        );

        let pre_keys = value
            .child_req("prekeys", ns::LEGACY_OMEMO)?
            .children()
            .filter(|child| child.is("preKeyPublic", ns::LEGACY_OMEMO))
            .map(|child| {
                Ok(PublicPreKey {
                    id: child.attr_parse::<u32>("preKeyId")?.into(),
                    key: PublicKey::from(child.base64_text()?),
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        Ok(Self {
            signed_pre_key,
            identity_key,
            pre_keys,
        })
    }
}

impl From<DeviceBundle> for Element {
    fn from(value: DeviceBundle) -> Self {
        let signed_pre_key = value.signed_pre_key;

        Element::builder("bundle", ns::LEGACY_OMEMO)
            .append(
                Element::builder("signedPreKeyPublic", ns::LEGACY_OMEMO)
                    .attr("signedPreKeyId", signed_pre_key.id.into_inner())
                    .append_base64(signed_pre_key.key)
                    .build(),
            )
            .append(
                Element::builder("signedPreKeySignature", ns::LEGACY_OMEMO)
                    .append_base64(signed_pre_key.signature)
                    .build(),
            )
            .append(
                Element::builder("identityKey", ns::LEGACY_OMEMO)
                    .append_base64(value.identity_key)
                    .build(),
            )
            .append(
                Element::builder("prekeys", ns::LEGACY_OMEMO)
                    .append_all(value.pre_keys.into_iter().map(|pre_key| {
                        Element::builder("preKeyPublic", ns::LEGACY_OMEMO)
                            .attr("preKeyId", pre_key.id.into_inner())
                            .append_base64(pre_key.key)
                            .build()
                    }))
                    .build(),
            )
            .build()
    }
}

pub fn build_bundle_announce(
    self_identity: &Jid,
    own_device_id: DeviceId,
    bundle: DeviceBundle,
    request_id: &str,
) -> Element {
    pubsub::publish_request(
        self_identity,
        request_id,
        bundle_node(own_device_id),
        bundle.into(),
    )
}

pub fn build_bundle_query(
    from: &Jid,
    to: &UserId,
    device_id: DeviceId,
    request_id: &str,
) -> Element {
    pubsub::items_request(from, to, request_id, bundle_node(device_id))
}

pub fn parse_bundle_response(stanza: &Element) -> Result<BundleResponse, OmemoError> {
    let owner = UserId::from_address(stanza.attr("from").ok_or(OmemoError::MissingSender)?)?;

    let node = pubsub::items_node(stanza).ok_or_else(|| OmemoError::MalformedBundle {
        msg: "Missing <items/> node".to_string(),
    })?;

    let device_id = node
        .rsplit_once(':')
        .map(|(_, device_id)| device_id)
        .ok_or_else(|| OmemoError::MalformedBundle {
            msg: format!("Node '{node}' carries no device id"),
        })?
        .parse::<DeviceId>()
        .map_err(|err| OmemoError::MalformedBundle {
            msg: format!("Invalid device id in node '{node}': {err}"),
        })?;

    let bundle = stanza
        .find_descendant("bundle", ns::LEGACY_OMEMO)
        .ok_or_else(|| OmemoError::MalformedBundle {
            msg: format!("Missing <bundle/> for {owner}'s device {device_id}"),
        })
        .and_then(|bundle| {
            DeviceBundle::try_from(bundle).map_err(|err| OmemoError::MalformedBundle {
                msg: err.to_string(),
            })
        })?;

    Ok(BundleResponse {
        owner,
        device_id,
        bundle,
    })
}
