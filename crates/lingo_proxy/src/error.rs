//! Errors surfaced by proxy construction and invocation.

use lingo_types::TypeDesc;

use crate::MethodId;

/// Result alias for proxy operations.
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Everything that can go wrong while describing or invoking a proxy.
///
/// Failures are per call: nothing is retried and no partial result is
/// returned. Caches filled before the failure stay filled.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProxyError {
    /// The key strategy produced no key for a translation method.
    #[error("no translation key for `{method}`")]
    MissingKey { method: MethodId },

    /// No result handler and no pass-through for the declared return type.
    #[error("unsupported return type `{ty}`")]
    UnsupportedReturnType { ty: TypeDesc },

    /// An argument is not assignable to its declared parameter type, or
    /// cannot be viewed as the type its handler expects.
    #[error("argument `{param}` of `{method}`: expected `{expected}`, got `{got}`")]
    TypeMismatch {
        method: MethodId,
        param: String,
        expected: TypeDesc,
        got: TypeDesc,
    },

    /// An identity-category method without a built-in meaning.
    #[error("`{method}` is not supported on a proxy")]
    UnsupportedOperation { method: MethodId },

    #[error("interface `{interface}` has no method `{method}`")]
    UnknownMethod { interface: String, method: String },

    #[error("`{method}` takes {expected} argument(s), got {got}")]
    ArityMismatch {
        method: MethodId,
        expected: usize,
        got: usize,
    },

    /// Rejected while building an `Interface`.
    #[error("invalid interface `{interface}`: {reason}")]
    InvalidInterface { interface: String, reason: String },

    /// `call_as` asked for a type the method did not produce.
    #[error("`{method}` returned `{got}`, not `{expected}`")]
    ResultTypeMismatch {
        method: MethodId,
        expected: TypeDesc,
        got: TypeDesc,
    },
}

impl ProxyError {
    pub(crate) fn invalid_interface(interface: &str, reason: impl Into<String>) -> Self {
        ProxyError::InvalidInterface {
            interface: interface.to_owned(),
            reason: reason.into(),
        }
    }
}
