//! Level macros logging through the root logger.
//!
//! ```ignore
//! linelog_core::info!("listening on {}", addr);
//! linelog_core::warn!(domain: "tls", "certificate expires in {} days", days);
//! ```

/// Log at an explicit level, optionally under a domain
#[macro_export]
macro_rules! log {
    ($level:expr, domain: $domain:expr, $($arg:tt)+) => {
        $crate::global::log($level, $domain, format_args!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::global::log($level, "", format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Trace, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Warn, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Error, $($arg)+) };
}

/// Log at fatal level; the line is terminated immediately
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Fatal, $($arg)+) };
}
