#[cfg(feature = "tracing")]
macro_rules! rtrace {
    ($gate:expr, $($tt:tt)*) => {
        if $gate {
            tracing::trace!(target: "scroll_restorer", $($tt)*)
        }
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! rtrace {
    ($gate:expr, $($tt:tt)*) => {
        let _ = $gate;
    };
}

#[cfg(feature = "tracing")]
macro_rules! rdebug {
    ($gate:expr, $($tt:tt)*) => {
        if $gate {
            tracing::debug!(target: "scroll_restorer", $($tt)*)
        }
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! rdebug {
    ($gate:expr, $($tt:tt)*) => {
        let _ = $gate;
    };
}
