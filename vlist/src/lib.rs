//! A headless windowing engine for long, variable-height lists such as chat transcripts.
//!
//! For hosting-shell utilities (post-layout measurement, autoscroll, smooth scrolling), see the
//! `vlist-adapter` crate.
//!
//! Only a bounded window of a potentially huge item sequence needs to exist in the render tree.
//! This crate computes that window: it keeps a ledger of measured heights keyed by item identity,
//! falls back to a configured estimate for items that were never rendered, and answers
//! "which items, at what offset, inside how tall a track" in `O(log n)` using prefix sums.
//!
//! It is UI-agnostic. The host is expected to provide:
//! - the ordered item identities
//! - viewport height and scroll offset
//! - real item heights, measured after layout
//!
//! ```
//! use vlist::{HeightList, ListOptions};
//!
//! let mut list = HeightList::new(ListOptions::new(100.0, 2))?;
//! list.set_items(0u32..10);
//! list.set_viewport_height(500.0);
//!
//! let plan = list.render_plan();
//! assert_eq!((plan.start_index, plan.end_index), (0, 7));
//! assert_eq!(plan.total_height, 1000.0);
//!
//! // After layout, item 3 turned out taller than estimated.
//! list.measure(3, 250.0);
//! assert_eq!(list.render_plan().total_height, 1150.0);
//! # Ok::<(), vlist::ConfigError>(())
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod fenwick;
mod key;
mod ledger;
mod list;
mod options;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use key::ListKey;
pub use ledger::{HeightLedger, is_valid_height};
pub use list::HeightList;
pub use options::{ListConfig, ListOptions, OnChangeCallback};
pub use state::ViewportState;
pub use types::{RenderPlan, RenderedItem, Window};
