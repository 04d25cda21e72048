#[cfg(feature = "tracing")]
macro_rules! vlog {
    (trace, $($tt:tt)*) => {
        tracing::trace!(target: "vlist_adapter", $($tt)*)
    };
    (debug, $($tt:tt)*) => {
        tracing::debug!(target: "vlist_adapter", $($tt)*)
    };
    (warn, $($tt:tt)*) => {
        tracing::warn!(target: "vlist_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! vlog {
    ($level:ident, $($tt:tt)*) => {};
}
