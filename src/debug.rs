// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Logging and error-reporting macros.
//!
//! With the `log` feature off, every macro here expands to nothing, format
//! strings included. With it on, they forward to the [`log`] crate, which
//! nothing else in `atap` may name directly.
//!
//! Nothing derived from a session secret, a decrypted payload, or a private
//! key may be passed to these macros. Log operations, curves, states, and
//! error values; never bytes.

#[cfg(doc)]
use __raw_log as log;

/// Returns early with `$error` unless `$cond` holds, logging the condition
/// that failed.
macro_rules! check {
    ($cond:expr, $error:expr) => {
        if !$cond {
            let error = $error;
            return fail!(
                error,
                "`{}` does not hold; returning {:?}",
                stringify!($cond),
                error,
            );
        }
    };
}

/// Logs an error as it is created and evaluates to `Err` of it.
///
/// Prefer `return fail!(Error::Foo)` over `return Err(Error::Foo)`, and
/// `.or_else(|_| fail!(Error::Foo))` over `.map_err(|_| Error::Foo)`, so that
/// every failure leaves a trace at the point it was decided.
macro_rules! fail {
    ($error:expr, $($format:tt)+) => {{
        error!($($format)+);
        Err($error)
    }};
    ($error:expr) => {{
        let error = $error;
        error!("failing with {:?}", error);
        Err(error)
    }};
}

/// [`log::trace!()`], compiled out without the `log` feature.
macro_rules! trace {
    ($($args:tt)*) => {
        #[cfg(feature = "log")]
        let _ = __raw_log::trace!($($args)*);
    }
}

/// [`log::info!()`], compiled out without the `log` feature.
macro_rules! info {
    ($($args:tt)*) => {
        #[cfg(feature = "log")]
        let _ = __raw_log::info!($($args)*);
    }
}

/// [`log::warn!()`], compiled out without the `log` feature.
macro_rules! warn {
    ($($args:tt)*) => {
        #[cfg(feature = "log")]
        let _ = __raw_log::warn!($($args)*);
    }
}

/// [`log::error!()`], compiled out without the `log` feature.
macro_rules! error {
    ($($args:tt)*) => {
        #[cfg(feature = "log")]
        let _ = __raw_log::error!($($args)*);
    }
}

/// Installs a logger for the unit test binary before any test runs.
///
/// Output goes through the test harness's capture, so only failing tests
/// show their logs. `RUST_LOG` selects the level, as usual.
#[cfg(test)]
#[ctor::ctor]
fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .format_timestamp(None)
        .try_init();
}
