// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Method table error types.

use thiserror::Error;

/// The linkage error a runtime raises for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkageErrorKind {
    IncompatibleClassChange,
    AbstractMethod,
}

/// A failure that aborts building the tables of a type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MethodTableError {
    /// Both methods are named with their owner, `Owner.name(sig)`.
    #[error("{method} overrides final method {overridden}")]
    FinalOverride { method: String, overridden: String },
}

impl MethodTableError {
    pub fn final_override(method: String, overridden: String) -> Self {
        Self::FinalOverride { method, overridden }
    }

    pub fn kind(&self) -> LinkageErrorKind {
        match self {
            Self::FinalOverride { .. } => LinkageErrorKind::IncompatibleClassChange,
        }
    }
}

/// A failure found when a call site selects a slot of a finished table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("conflicting default methods: {method}")]
    AmbiguousDefault { method: String },

    #[error("abstract method has no implementation: {method}")]
    AbstractMethod { method: String },

    #[error("class does not implement interface {interface}")]
    InterfaceNotImplemented { interface: String },

    #[error("slot {index} out of range (table has {len} slots)")]
    NoSuchSlot { index: usize, len: usize },
}

impl SelectionError {
    /// The linkage error to raise, `None` for a malformed call site.
    pub fn kind(&self) -> Option<LinkageErrorKind> {
        match self {
            Self::AmbiguousDefault { .. } | Self::InterfaceNotImplemented { .. } => {
                Some(LinkageErrorKind::IncompatibleClassChange)
            }
            Self::AbstractMethod { .. } => Some(LinkageErrorKind::AbstractMethod),
            Self::NoSuchSlot { .. } => None,
        }
    }
}

/// A finished table that breaks a size invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableInvariantError {
    #[error("vtable has {len} slots, fewer than the parent's {parent_len}")]
    VTableShrunk { len: usize, parent_len: usize },

    #[error("itable for {interface} has {len} slots, interface declares {expected}")]
    ITableSize {
        interface: String,
        len: usize,
        expected: usize,
    },

    #[error("no itable for implemented interface {interface}")]
    MissingITable { interface: String },
}
