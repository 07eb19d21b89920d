// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::Jid;
use minidom::Element;

use crate::domain::models::{Device, DeviceId, DeviceList, UserId};
use crate::util::ParseError;
use crate::{ns, ElementExt, OmemoError};

use super::pubsub;

/// A device list received either as a PEP notification or as the result of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceListUpdate {
    pub sender: UserId,
    pub device_list: DeviceList,
}

impl DeviceListUpdate {
    pub fn device_ids(&self) -> Vec<DeviceId> {
        self.device_list.device_ids()
    }
}

impl TryFrom<Element> for Device {
    type Error = ParseError;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        value.expect_is("device", ns::LEGACY_OMEMO)?;

        Ok(Self {
            id: value.attr_parse::<u32>("id")?.into(),
            label: value.attr("label").map(ToString::to_string),
        })
    }
}

impl From<Device> for Element {
    fn from(value: Device) -> Self {
        Element::builder("device", ns::LEGACY_OMEMO)
            .attr("id", value.id)
            .attr("label", value.label)
            .build()
    }
}

impl TryFrom<Element> for DeviceList {
    type Error = ParseError;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        value.expect_is("list", ns::LEGACY_OMEMO)?;

        Ok(Self {
            devices: value
                .children()
                .map(|child| Device::try_from(child.clone()))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl From<DeviceList> for Element {
    fn from(value: DeviceList) -> Self {
        Element::builder("list", ns::LEGACY_OMEMO)
            .append_all(value.devices.into_iter().map(Element::from))
            .build()
    }
}

/// Publishes a device list containing only `own_device_id`. Other devices of the account are
/// expected to re-add themselves when they see the update.
pub fn build_device_list_announce(
    self_identity: &Jid,
    own_device_id: DeviceId,
    request_id: &str,
) -> Element {
    let device_list = DeviceList {
        devices: vec![Device::from(own_device_id)],
    };

    pubsub::publish_request(
        self_identity,
        request_id,
        ns::LEGACY_OMEMO_DEVICELIST,
        device_list.into(),
    )
}

pub fn build_device_list_query(from: &Jid, to: &UserId, request_id: &str) -> Element {
    pubsub::items_request(from, to, request_id, ns::LEGACY_OMEMO_DEVICELIST)
}

/// Extracts the sender and the device list from a `<message/>` notification or an `<iq/>`
/// result. An empty list is never a valid state and is rejected.
pub fn parse_device_list_update(stanza: &Element) -> Result<DeviceListUpdate, OmemoError> {
    let sender = stanza
        .attr("from")
        .or_else(|| {
            stanza
                .get_child("event", ns::PUBSUB_EVENT)
                .and_then(|event| event.attr("from"))
        })
        .ok_or(OmemoError::MissingSender)?;
    let sender = UserId::from_address(sender)?;

    let list = stanza
        .find_descendant("list", ns::LEGACY_OMEMO)
        .ok_or_else(|| OmemoError::MalformedDeviceList {
            msg: "Missing <list/> element".to_string(),
        })?;

    let device_list =
        DeviceList::try_from(list.clone()).map_err(|err| OmemoError::MalformedDeviceList {
            msg: err.to_string(),
        })?;

    if device_list.devices.is_empty() {
        return Err(OmemoError::MalformedDeviceList {
            msg: format!("Device list of {sender} is empty"),
        });
    }

    Ok(DeviceListUpdate {
        sender,
        device_list,
    })
}
