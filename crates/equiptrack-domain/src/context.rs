use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, comparable identity of a caller (e.g. an account address)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Principal {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Per-call execution context supplied by the caller on every operation.
///
/// `clock` is a monotonic logical counter owned by the execution
/// environment; the registries never advance it themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Principal,
    pub clock: u64,
}

impl CallContext {
    pub fn new(caller: impl Into<Principal>, clock: u64) -> Self {
        Self {
            caller: caller.into(),
            clock,
        }
    }
}
