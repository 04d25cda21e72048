//! Hosting-shell utilities for the `vlist` crate.
//!
//! `vlist` only does the arithmetic. A scroll container built on it also needs a post-layout
//! measurement pass, a rule for following new items, and smooth scrolling. This crate provides
//! those pieces without binding to any UI framework:
//!
//! - [`Controller`]: owns a [`vlist::HeightList`], runs the measure-after-layout loop and defers
//!   scroll-to-bottom until fresh heights are known
//! - [`Autoscroll`]: decides when an update should follow the newest item
//! - [`Tween`]: adapter-driven smooth scrolling
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod autoscroll;
mod controller;
mod feed;
mod tween;


pub use autoscroll::{Autoscroll, FeedSnapshot, ScrollBehavior, ScrollToBottom};
pub use controller::{Controller, ControllerOptions, LayoutPass, MountHandle};
pub use feed::{FeedItem, MeasureLayout, Origin};
pub use tween::{Easing, Tween};
