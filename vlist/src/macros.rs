// `vlog!(level, fields..., "message")` forwards to `tracing` under the `tracing` feature and
// expands to nothing otherwise.
#[cfg(feature = "tracing")]
macro_rules! vlog {
    (trace, $($tt:tt)*) => {
        tracing::trace!(target: "vlist", $($tt)*)
    };
    (debug, $($tt:tt)*) => {
        tracing::debug!(target: "vlist", $($tt)*)
    };
    (warn, $($tt:tt)*) => {
        tracing::warn!(target: "vlist", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! vlog {
    ($level:ident, $($tt:tt)*) => {};
}
