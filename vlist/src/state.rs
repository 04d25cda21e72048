/// A snapshot of the viewport inputs to windowing.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, which lets a host
/// restore the scroll position of a conversation it re-opens.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: f64,
    /// `0.0` until the hosting container has been measured.
    pub viewport_height: f64,
}

impl ViewportState {
    pub fn bottom(&self) -> f64 {
        self.scroll_offset + self.viewport_height
    }
}
