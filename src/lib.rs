//! Client for the AutoRest date test service.
//!
//! The crate root re-exports exactly the names in [`PUBLIC_EXPORTS`]: the
//! seven error kinds, the client and its configuration. The public modules
//! hold supporting items (credentials, retry policy, `Result`) and are not
//! part of that list.

pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

/// Re-exports each listed item from the crate root and records its name in
/// `PUBLIC_EXPORTS`, so the two cannot disagree.
macro_rules! facade {
    ($($($seg:ident)::+ => { $($name:ident),+ $(,)? })+) => {
        $(pub use $($seg::)+{$($name),+};)+

        /// Names re-exported from the crate root.
        pub const PUBLIC_EXPORTS: &[&str] = &[$($(stringify!($name)),+),+];
    };
}

facade! {
    utils::error => {
        ClientError,
        SerializationError,
        DeserializationError,
        TokenExpiredError,
        ClientRequestError,
        AuthenticationError,
        HttpOperationError,
    }
    client => { AutoRestDateTestService }
    config => { AutoRestDateTestServiceConfiguration }
}
