// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::{BTreeSet, HashMap};

use parking_lot::RwLock;

use crate::domain::models::{DeviceId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Updated,
    /// Our own device list was published without our device. We need to announce ourselves
    /// again.
    OwnDeviceMissing,
}

/// Known devices per contact. Every update replaces the full set of its owner.
#[derive(Debug)]
pub struct DeviceDirectory {
    account: UserId,
    own_device_id: DeviceId,
    devices: RwLock<HashMap<UserId, BTreeSet<DeviceId>>>,
}

impl DeviceDirectory {
    pub fn new(account: UserId, own_device_id: DeviceId) -> Self {
        Self {
            account,
            own_device_id,
            devices: Default::default(),
        }
    }

    pub fn merge(
        &self,
        user_id: &UserId,
        device_ids: impl IntoIterator<Item = DeviceId>,
    ) -> MergeOutcome {
        let device_ids = device_ids.into_iter().collect::<BTreeSet<_>>();
        let own_device_missing =
            user_id == &self.account && !device_ids.contains(&self.own_device_id);

        self.devices.write().insert(user_id.clone(), device_ids);

        if own_device_missing {
            MergeOutcome::OwnDeviceMissing
        } else {
            MergeOutcome::Updated
        }
    }

    /// Known devices of `user_id` in ascending order.
    pub fn devices_for(&self, user_id: &UserId) -> Vec<DeviceId> {
        self.devices
            .read()
            .get(user_id)
            .map(|devices| devices.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, user_id: &UserId, device_id: DeviceId) -> bool {
        self.devices
            .read()
            .get(user_id)
            .map(|devices| devices.contains(&device_id))
            .unwrap_or(false)
    }

    /// Records the local device under the local account, e.g. after it was announced.
    pub fn ensure_own_device(&self) {
        self.devices
            .write()
            .entry(self.account.clone())
            .or_default()
            .insert(self.own_device_id);
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    fn directory() -> DeviceDirectory {
        DeviceDirectory::new(
            UserId::from_str("romeo@montague.lit").unwrap(),
            DeviceId::from(1),
        )
    }

    fn ids(ids: &[u32]) -> Vec<DeviceId> {
        ids.iter().copied().map(DeviceId::from).collect()
    }

    #[test]
    fn test_merge_replaces_previous_set() {
        let directory = directory();
        let juliet = UserId::from_str("juliet@capulet.lit").unwrap();

        assert_eq!(directory.merge(&juliet, ids(&[3, 2, 5])), MergeOutcome::Updated);
        assert_eq!(directory.devices_for(&juliet), ids(&[2, 3, 5]));

        assert_eq!(directory.merge(&juliet, ids(&[7, 2, 2])), MergeOutcome::Updated);
        assert_eq!(directory.devices_for(&juliet), ids(&[2, 7]));

        assert_eq!(directory.merge(&juliet, ids(&[7, 2])), MergeOutcome::Updated);
        assert_eq!(directory.devices_for(&juliet), ids(&[2, 7]));
    }

    #[test]
    fn test_unknown_user_has_no_devices() {
        let directory = directory();
        assert!(directory
            .devices_for(&UserId::from_str("mercutio@verona.lit").unwrap())
            .is_empty());
    }

    #[test]
    fn test_detects_missing_own_device() {
        let directory = directory();
        let romeo = UserId::from_str("romeo@montague.lit").unwrap();

        assert_eq!(
            directory.merge(&romeo, ids(&[4, 8])),
            MergeOutcome::OwnDeviceMissing
        );
        assert_eq!(directory.devices_for(&romeo), ids(&[4, 8]));

        directory.ensure_own_device();
        assert_eq!(directory.devices_for(&romeo), ids(&[1, 4, 8]));

        assert_eq!(directory.merge(&romeo, ids(&[1, 4])), MergeOutcome::Updated);
    }

    #[test]
    fn test_own_device_id_on_other_account_is_irrelevant() {
        let directory = directory();
        let juliet = UserId::from_str("juliet@capulet.lit").unwrap();

        assert_eq!(directory.merge(&juliet, ids(&[9])), MergeOutcome::Updated);
        assert!(!directory.contains(&juliet, DeviceId::from(1)));
        assert!(directory.contains(&juliet, DeviceId::from(9)));
    }
}
