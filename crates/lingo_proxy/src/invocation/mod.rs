//! A captured method call.

use smallvec::SmallVec;

use lingo_types::Value;

use crate::{MethodDesc, ParamDesc, Proxy};

/// One call argument paired with its declared parameter.
#[derive(Clone, Copy, Debug)]
pub struct Argument<'a> {
    param: &'a ParamDesc,
    value: Option<&'a Value>,
}

impl<'a> Argument<'a> {
    #[inline]
    pub fn param(&self) -> &'a ParamDesc {
        self.param
    }

    /// The supplied value; `None` when the caller passed nothing.
    #[inline]
    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }
}

/// Receiver, method and ordered arguments of a single call.
///
/// Lives only for the duration of the call.
#[derive(Debug)]
pub struct Invocation<'a> {
    receiver: &'a Proxy,
    method: &'a MethodDesc,
    arguments: SmallVec<[Argument<'a>; 4]>,
}

impl<'a> Invocation<'a> {
    /// Pair `values` with the method's parameters, position by position.
    ///
    /// Callers check arity first; surplus values or parameters are dropped.
    pub fn new(receiver: &'a Proxy, method: &'a MethodDesc, values: &'a [Option<Value>]) -> Self {
        let arguments = method
            .params()
            .iter()
            .zip(values)
            .map(|(param, value)| Argument {
                param,
                value: value.as_ref(),
            })
            .collect();
        Invocation {
            receiver,
            method,
            arguments,
        }
    }

    #[inline]
    pub fn receiver(&self) -> &'a Proxy {
        self.receiver
    }

    #[inline]
    pub fn method(&self) -> &'a MethodDesc {
        self.method
    }

    #[inline]
    pub fn arguments(&self) -> &[Argument<'a>] {
        &self.arguments
    }
}
