/// The derived window for one pass: which items to render and how tall the track is.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start_index: usize,
    pub end_index: usize, // exclusive
    /// Sum of every item's measured-or-estimated height.
    pub total_height: f64,
}

impl Window {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
        total_height: 0.0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// Render instructions handed to the hosting shell after each recomputation.
///
/// The host sizes its scroll track to `total_height`, renders items `start_index..end_index`,
/// and translates the rendered block down by `offset_top`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderPlan {
    pub start_index: usize,
    pub end_index: usize, // exclusive
    pub offset_top: f64,
    pub total_height: f64,
}

impl RenderPlan {
    pub fn window(&self) -> Window {
        Window {
            start_index: self.start_index,
            end_index: self.end_index,
            total_height: self.total_height,
        }
    }
}

/// One item inside the current window.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedItem<K> {
    pub key: K,
    pub index: usize,
    /// Absolute offset of the item's top edge.
    pub start: f64,
    pub height: f64,
    /// `false` while `height` is still the configured estimate.
    pub measured: bool,
}

impl<K> RenderedItem<K> {
    pub fn end(&self) -> f64 {
        self.start + self.height
    }
}
