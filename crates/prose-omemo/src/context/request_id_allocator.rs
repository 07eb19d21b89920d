// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use parking_lot::Mutex;
use strum_macros::{AsRefStr, Display, EnumIter};

/// Prefixes of the ids attached to outgoing stanzas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum RequestCategory {
    /// Device list queries.
    DeviceList,
    /// Device list and bundle publish requests.
    Announce,
    /// Bundle queries issued by `/omemo start`.
    Bundle,
    /// Bundle queries issued after a device list update.
    Fetch,
    /// Encrypted messages.
    Msg,
}

/// Hands out ids of the form `{category}{n}`. Counters start at 1, are kept per category and
/// live as long as the allocator.
#[derive(Debug, Default)]
pub struct RequestIdAllocator {
    counters: Mutex<HashMap<String, u64>>,
}

impl RequestIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, category: impl AsRef<str>) -> String {
        let category = category.as_ref();
        let mut counters = self.counters.lock();
        let counter = counters.entry(category.to_string()).or_insert(0);
        *counter += 1;
        format!("{category}{counter}")
    }

    /// The last number handed out for `category`, if any.
    pub fn last(&self, category: impl AsRef<str>) -> Option<u64> {
        self.counters.lock().get(category.as_ref()).copied()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_increments_per_category() {
        let allocator = RequestIdAllocator::new();

        let ids = (0..3)
            .map(|_| allocator.next(RequestCategory::Msg))
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["msg1", "msg2", "msg3"]);

        assert_eq!(allocator.next(RequestCategory::DeviceList), "devicelist1");
        assert_eq!(allocator.next("msg"), "msg4");
        assert_eq!(allocator.last(RequestCategory::Msg), Some(4));
        assert_eq!(allocator.last(RequestCategory::Fetch), None);
    }

    #[test]
    fn test_category_prefixes() {
        let prefixes = RequestCategory::iter()
            .map(|category| category.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            prefixes,
            vec!["devicelist", "announce", "bundle", "fetch", "msg"]
        );
    }

    #[test]
    fn test_concurrent_callers_never_share_an_id() {
        let allocator = Arc::new(RequestIdAllocator::new());

        let handles = (0..8)
            .map(|_| {
                let allocator = allocator.clone();
                std::thread::spawn(move || {
                    (0..100)
                        .map(|_| allocator.next(RequestCategory::Fetch))
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        let mut ids = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 800);
        assert_eq!(allocator.last(RequestCategory::Fetch), Some(800));
    }
}
