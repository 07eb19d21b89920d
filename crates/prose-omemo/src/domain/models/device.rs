// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use super::DeviceId;

#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: DeviceId,
    pub label: Option<String>,
}

/// The payload of a device list node. Always a full snapshot of the owner's devices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceList {
    pub devices: Vec<Device>,
}

impl DeviceList {
    pub fn device_ids(&self) -> Vec<DeviceId> {
        self.devices.iter().map(|device| device.id).collect()
    }
}

impl From<DeviceId> for Device {
    fn from(id: DeviceId) -> Self {
        Self { id, label: None }
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{} (\"{label}\")", self.id.as_ref())
        } else {
            write!(f, "{}", self.id.as_ref())
        }
    }
}
