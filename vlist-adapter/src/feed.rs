use vlist::ListKey;

/// Who produced an item. Only user-originated items suppress follow-scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Origin {
    User,
    Assistant,
    System,
}

impl Origin {
    pub fn is_user(self) -> bool {
        matches!(self, Self::User)
    }
}

/// An item the [`crate::Controller`] can lay out: a stable identity plus its origin.
pub trait FeedItem {
    type Key: ListKey;

    fn key(&self) -> &Self::Key;

    fn origin(&self) -> Origin;
}

impl<K: ListKey> FeedItem for (K, Origin) {
    type Key = K;

    fn key(&self) -> &K {
        &self.0
    }

    fn origin(&self) -> Origin {
        self.1
    }
}

/// Source of post-layout heights.
///
/// Implemented by the host's layout engine; only call sites running after layout has been
/// committed may query it. Returns `None` for items that are not currently laid out.
pub trait MeasureLayout<K> {
    fn measure(&mut self, key: &K) -> Option<f64>;
}

impl<K, F: FnMut(&K) -> Option<f64>> MeasureLayout<K> for F {
    fn measure(&mut self, key: &K) -> Option<f64> {
        self(key)
    }
}
