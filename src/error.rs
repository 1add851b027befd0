//! Contains error types and other error handling tools.

pub use crate::address::AddressError;
pub use crate::bech32::Error as Bech32Error;
pub use crate::checkpoint::Error as CheckpointError;
pub use crate::config::Error as ConfigError;
pub use crate::ledger::LedgerError;
pub use crate::pem::Error as PemError;

/// Impls std::error::Error for the specified type with appropriate attributes, possibly returning
/// source.
macro_rules! impl_std_error {
    // No source available
    ($type:ty) => {
        impl std::error::Error for $type {}
    };
    // Tuple variants listed with their inner error as source
    ($type:ty, $($variant:ident),+) => {
        impl std::error::Error for $type {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                match *self {
                    $(Self::$variant(ref e) => Some(e),)+
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }
        }
    };
}
pub(crate) use impl_std_error;

/// Formats error. The source is not appended because `e.source()` is available to callers
/// that want the whole chain.
macro_rules! write_err {
    ($writer:expr, $string:literal $(, $args:expr)*; $source:expr) => {
        {
            let _ = &$source;   // Prevents clippy warnings.
            write!($writer, $string $(, $args)*)
        }
    }
}
pub(crate) use write_err;
