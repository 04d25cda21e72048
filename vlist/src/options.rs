use alloc::sync::Arc;

use crate::ConfigError;
use crate::list::HeightList;

/// A callback fired after an effective state change (see [`HeightList::batch_update`]).
pub type OnChangeCallback<K> = Arc<dyn Fn(&HeightList<K>) + Send + Sync>;

/// Configuration for [`crate::HeightList`].
///
/// Cheap to clone: the callback is stored in an `Arc`.
pub struct ListOptions<K> {
    /// Height used for items that have not been measured yet. Must be finite and positive.
    pub estimated_item_height: f64,
    /// Extra items rendered above and below the visible range.
    pub buffer_count: usize,
    /// Viewport height before the host reports one (`0.0` = not measured yet).
    pub initial_viewport_height: f64,
    pub initial_scroll_offset: f64,
    /// Optional callback fired when heights, items, or viewport state change.
    ///
    /// No-op writes (identical measurements, unchanged scroll offsets) never fire it.
    pub on_change: Option<OnChangeCallback<K>>,
}

impl<K> Clone for ListOptions<K> {
    fn clone(&self) -> Self {
        Self {
            estimated_item_height: self.estimated_item_height,
            buffer_count: self.buffer_count,
            initial_viewport_height: self.initial_viewport_height,
            initial_scroll_offset: self.initial_scroll_offset,
            on_change: self.on_change.clone(),
        }
    }
}

impl<K> Default for ListOptions<K> {
    fn default() -> Self {
        Self::new(50.0, 3)
    }
}

impl<K> ListOptions<K> {
    pub fn new(estimated_item_height: f64, buffer_count: usize) -> Self {
        Self {
            estimated_item_height,
            buffer_count,
            initial_viewport_height: 0.0,
            initial_scroll_offset: 0.0,
            on_change: None,
        }
    }

    pub fn with_estimated_item_height(mut self, height: f64) -> Self {
        self.estimated_item_height = height;
        self
    }

    pub fn with_buffer_count(mut self, buffer_count: usize) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn with_initial_viewport_height(mut self, height: f64) -> Self {
        self.initial_viewport_height = height;
        self
    }

    pub fn with_initial_scroll_offset(mut self, offset: f64) -> Self {
        self.initial_scroll_offset = offset;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&HeightList<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let h = self.estimated_item_height;
        if !h.is_finite() || h <= 0.0 {
            return Err(ConfigError::InvalidEstimatedHeight(h));
        }
        let vh = self.initial_viewport_height;
        if !vh.is_finite() || vh < 0.0 {
            return Err(ConfigError::InvalidViewportHeight(vh));
        }
        let off = self.initial_scroll_offset;
        if !off.is_finite() || off < 0.0 {
            return Err(ConfigError::InvalidScrollOffset(off));
        }
        Ok(())
    }
}

impl<K> core::fmt::Debug for ListOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("estimated_item_height", &self.estimated_item_height)
            .field("buffer_count", &self.buffer_count)
            .field("initial_viewport_height", &self.initial_viewport_height)
            .field("initial_scroll_offset", &self.initial_scroll_offset)
            .finish_non_exhaustive()
    }
}

/// Plain-data form of [`ListOptions`], e.g. for loading from a settings file.
///
/// The buffer count is signed so that a negative value in the source data surfaces as
/// [`ConfigError::NegativeBufferCount`] instead of failing deserialization opaquely.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListConfig {
    pub estimated_item_height: f64,
    pub buffer_count: i64,
    pub initial_viewport_height: f64,
    pub initial_scroll_offset: f64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            estimated_item_height: 50.0,
            buffer_count: 3,
            initial_viewport_height: 0.0,
            initial_scroll_offset: 0.0,
        }
    }
}

impl<K> TryFrom<ListConfig> for ListOptions<K> {
    type Error = ConfigError;

    fn try_from(config: ListConfig) -> Result<Self, Self::Error> {
        let buffer_count = usize::try_from(config.buffer_count)
            .map_err(|_| ConfigError::NegativeBufferCount(config.buffer_count))?;
        let options = ListOptions::new(config.estimated_item_height, buffer_count)
            .with_initial_viewport_height(config.initial_viewport_height)
            .with_initial_scroll_offset(config.initial_scroll_offset);
        options.validate()?;
        Ok(options)
    }
}
