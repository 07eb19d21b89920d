// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeMap;

use anyhow::Result;
use insta::assert_snapshot;
use minidom::Element;
use pretty_assertions::assert_eq;

use prose_omemo::domain::models::{
    DeviceBundle, DeviceId, EncryptedEnvelope, EncryptedKey, IdentityKey, PreKeyId, PublicKey,
    PublicPreKey, PublicSignedPreKey,
};
use prose_omemo::stanza::{
    build_bundle_announce, build_bundle_query, build_device_list_announce,
    build_device_list_query, build_encrypted_message, bundle_node, parse_bundle_response,
    parse_device_list_update, parse_encrypted_message, StanzaKind,
};
use prose_omemo::test::{ElementExt, FakeEngine};
use prose_omemo::{jid, user_id};

#[test]
fn test_builds_device_list_announce() {
    let stanza = build_device_list_announce(
        &jid!("romeo@montague.lit/orchard"),
        31415u32.into(),
        "announce1",
    );

    assert_snapshot!(String::from(&stanza), @r###"<iq xmlns='jabber:client' from="romeo@montague.lit/orchard" id="announce1" type="set"><pubsub xmlns='http://jabber.org/protocol/pubsub'><publish node="eu.siacs.conversations.axolotl.devicelist"><item id="current"><list xmlns='eu.siacs.conversations.axolotl'><device id="31415"/></list></item></publish></pubsub></iq>"###);
}

#[test]
fn test_device_list_announce_can_be_read_back() -> Result<()> {
    let stanza = build_device_list_announce(
        &jid!("romeo@montague.lit/orchard"),
        31415u32.into(),
        "announce1",
    );

    let update = parse_device_list_update(&stanza)?;
    assert_eq!(update.sender, user_id!("romeo@montague.lit"));
    assert_eq!(update.device_ids(), vec![DeviceId::from(31415)]);
    Ok(())
}

#[test]
fn test_builds_device_list_query() {
    let stanza = build_device_list_query(
        &jid!("romeo@montague.lit/orchard"),
        &user_id!("juliet@capulet.lit"),
        "devicelist1",
    );

    assert_snapshot!(String::from(&stanza), @r###"<iq xmlns='jabber:client' from="romeo@montague.lit/orchard" id="devicelist1" to="juliet@capulet.lit" type="get"><pubsub xmlns='http://jabber.org/protocol/pubsub'><items node="eu.siacs.conversations.axolotl.devicelist"/></pubsub></iq>"###);
}

#[test]
fn test_builds_bundle_announce() {
    let stanza = build_bundle_announce(
        &jid!("romeo@montague.lit"),
        42u32.into(),
        FakeEngine::bundle_for(42u32.into()),
        "announce2",
    );

    assert_snapshot!(String::from(&stanza), @r###"<iq xmlns='jabber:client' from="romeo@montague.lit" id="announce2" type="set"><pubsub xmlns='http://jabber.org/protocol/pubsub'><publish node="eu.siacs.conversations.axolotl.bundles:42"><item id="current"><bundle xmlns='eu.siacs.conversations.axolotl'><signedPreKeyPublic signedPreKeyId="1">BQAAACo=</signedPreKeyPublic><signedPreKeySignature>BgAAACo=</signedPreKeySignature><identityKey>BwAAACo=</identityKey><prekeys><preKeyPublic preKeyId="1">AAAAAQAAACo=</preKeyPublic><preKeyPublic preKeyId="2">AAAAAgAAACo=</preKeyPublic><preKeyPublic preKeyId="3">AAAAAwAAACo=</preKeyPublic></prekeys></bundle></item></publish></pubsub></iq>"###);
}

#[test]
fn test_builds_bundle_query() {
    let stanza = build_bundle_query(
        &jid!("romeo@montague.lit"),
        &user_id!("juliet@capulet.lit"),
        42u32.into(),
        "fetch1",
    );

    assert_eq!(
        bundle_node(42u32.into()),
        "eu.siacs.conversations.axolotl.bundles:42"
    );
    assert_snapshot!(String::from(&stanza), @r###"<iq xmlns='jabber:client' from="romeo@montague.lit" id="fetch1" to="juliet@capulet.lit" type="get"><pubsub xmlns='http://jabber.org/protocol/pubsub'><items node="eu.siacs.conversations.axolotl.bundles:42"/></pubsub></iq>"###);
}

#[test]
fn test_parses_bundle_response() -> Result<()> {
    let stanza = Element::from_pretty_printed_xml(
        r#"
        <iq xmlns="jabber:client" from="juliet@capulet.lit/balcony" to="romeo@montague.lit" type="result" id="fetch1">
          <pubsub xmlns="http://jabber.org/protocol/pubsub">
            <items node="eu.siacs.conversations.axolotl.bundles:42">
              <item id="current">
                <bundle xmlns="eu.siacs.conversations.axolotl">
                  <signedPreKeyPublic signedPreKeyId="5">AQID</signedPreKeyPublic>
                  <signedPreKeySignature>BAUG</signedPreKeySignature>
                  <identityKey>BwgJ</identityKey>
                  <prekeys>
                    <preKeyPublic preKeyId="17">CgsM</preKeyPublic>
                    <preKeyPublic preKeyId="3">DQ4P</preKeyPublic>
                    <preKeyPublic preKeyId="9">EBES</preKeyPublic>
                  </prekeys>
                </bundle>
              </item>
            </items>
          </pubsub>
        </iq>
        "#,
    )?;

    assert_eq!(StanzaKind::classify(&stanza), StanzaKind::BundleResponse);

    let response = parse_bundle_response(&stanza)?;
    assert_eq!(response.owner, user_id!("juliet@capulet.lit"));
    assert_eq!(response.device_id, DeviceId::from(42));
    assert_eq!(
        response.bundle,
        DeviceBundle {
            signed_pre_key: PublicSignedPreKey {
                id: 5u32.into(),
                key: PublicKey::from(vec![1u8, 2, 3].into_boxed_slice()),
                signature: vec![4u8, 5, 6].into_boxed_slice(),
            },
            identity_key: IdentityKey::from(vec![7u8, 8, 9].into_boxed_slice()),
            pre_keys: vec![
                PublicPreKey {
                    id: 17u32.into(),
                    key: PublicKey::from(vec![10u8, 11, 12].into_boxed_slice()),
                },
                PublicPreKey {
                    id: 3u32.into(),
                    key: PublicKey::from(vec![13u8, 14, 15].into_boxed_slice()),
                },
                PublicPreKey {
                    id: 9u32.into(),
                    key: PublicKey::from(vec![16u8, 17, 18].into_boxed_slice()),
                },
            ],
        }
    );
    assert_eq!(
        response
            .bundle
            .pre_keys
            .iter()
            .map(|pre_key| pre_key.id)
            .collect::<Vec<_>>(),
        vec![PreKeyId::from(17), PreKeyId::from(3), PreKeyId::from(9)]
    );
    Ok(())
}

#[test]
fn test_announced_bundle_can_be_read_back() -> Result<()> {
    let bundle = FakeEngine::bundle_for(42u32.into());
    let announce = build_bundle_announce(
        &jid!("romeo@montague.lit"),
        42u32.into(),
        bundle.clone(),
        "announce2",
    );

    // A PEP service answers with the item that was published.
    let item = announce
        .get_child("pubsub", prose_omemo::ns::PUBSUB)
        .and_then(|pubsub| pubsub.get_child("publish", prose_omemo::ns::PUBSUB))
        .and_then(|publish| publish.get_child("item", prose_omemo::ns::PUBSUB))
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Missing item"))?;

    let response = Element::builder("iq", prose_omemo::ns::JABBER_CLIENT)
        .attr("from", "romeo@montague.lit")
        .attr("id", "fetch1")
        .attr("type", "result")
        .append(
            Element::builder("pubsub", prose_omemo::ns::PUBSUB)
                .append(
                    Element::builder("items", prose_omemo::ns::PUBSUB)
                        .attr("node", bundle_node(42u32.into()))
                        .append(item)
                        .build(),
                )
                .build(),
        )
        .build();

    assert_eq!(parse_bundle_response(&response)?.bundle, bundle);
    Ok(())
}

#[test]
fn test_builds_encrypted_message() {
    let stanza = build_encrypted_message(
        &jid!("romeo@montague.lit"),
        &user_id!("juliet@capulet.lit"),
        "msg1",
        EncryptedEnvelope {
            sender_device_id: 27183u32.into(),
            iv: vec![0u8; 12].into_boxed_slice(),
            payload: b"Hello Juliet".as_slice().into(),
            keys: BTreeMap::from([
                (DeviceId::from(8), EncryptedKey::pre_key(b"key-8".as_slice())),
                (DeviceId::from(7), EncryptedKey::new(b"key-7".as_slice())),
            ]),
        },
    );

    assert_snapshot!(String::from(&stanza), @r###"<message xmlns='jabber:client' from="romeo@montague.lit" id="msg1" to="juliet@capulet.lit" type="chat"><encrypted xmlns='eu.siacs.conversations.axolotl'><header sid="27183"><key rid="7">a2V5LTc=</key><key prekey="true" rid="8">a2V5LTg=</key><iv>AAAAAAAAAAAAAAAA</iv></header><payload>SGVsbG8gSnVsaWV0</payload></encrypted></message>"###);
}

#[test]
fn test_encrypted_message_can_be_read_back() -> Result<()> {
    let envelope = EncryptedEnvelope {
        sender_device_id: 27183u32.into(),
        iv: vec![1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12].into_boxed_slice(),
        payload: b"ciphertext".as_slice().into(),
        keys: BTreeMap::from([
            (DeviceId::from(1), EncryptedKey::new(b"first".as_slice())),
            (DeviceId::from(2), EncryptedKey::pre_key(b"second".as_slice())),
            (DeviceId::from(3), EncryptedKey::new(b"third".as_slice())),
        ]),
    };

    let stanza = build_encrypted_message(
        &jid!("romeo@montague.lit"),
        &user_id!("juliet@capulet.lit"),
        "msg1",
        envelope.clone(),
    );

    assert_eq!(StanzaKind::classify(&stanza), StanzaKind::EncryptedMessage);
    assert_eq!(parse_encrypted_message(&stanza)?, envelope);
    Ok(())
}

#[test]
fn test_key_transport_message_can_be_read_back() -> Result<()> {
    let envelope = EncryptedEnvelope {
        sender_device_id: 5u32.into(),
        iv: vec![9u8; 12].into_boxed_slice(),
        payload: Box::default(),
        keys: BTreeMap::from([(DeviceId::from(1), EncryptedKey::new(b"k".as_slice()))]),
    };

    let stanza = build_encrypted_message(
        &jid!("romeo@montague.lit"),
        &user_id!("juliet@capulet.lit"),
        "msg2",
        envelope.clone(),
    );

    let parsed = parse_encrypted_message(&stanza)?;
    assert!(parsed.is_key_transport());
    assert_eq!(parsed, envelope);
    Ok(())
}
