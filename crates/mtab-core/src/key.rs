// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Method identity across a hierarchy.

use std::fmt;

use crate::facts::MethodFacts;

/// Name and signature of a method, independent of the type declaring it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodKey {
    pub name: String,
    pub signature: String,
}

impl MethodKey {
    pub fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
        }
    }

    pub fn of<M: MethodFacts>(m: &M) -> Self {
        Self::new(m.name(), m.signature())
    }

    pub fn matches<M: MethodFacts>(&self, m: &M) -> bool {
        self.name == m.name() && self.signature == m.signature()
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.signature)
    }
}
