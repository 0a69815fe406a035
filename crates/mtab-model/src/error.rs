// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Errors raised while loading or linking a class universe.

use mtab_core::{LinkageErrorKind, MethodTableError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid hierarchy file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown class {name}")]
    UnknownClass { name: String },

    #[error("class {name} is declared more than once")]
    DuplicateClass { name: String },

    #[error("{class} declares {method} more than once")]
    DuplicateMethod { class: String, method: String },

    #[error("class {name} is its own supertype")]
    Cycle { name: String },

    #[error("class {class} extends interface {superclass}")]
    SuperIsInterface { class: String, superclass: String },

    #[error("interface {name} declares a superclass")]
    InterfaceWithSuperclass { name: String },

    #[error("{class} lists {interface} as an interface, but it is a class")]
    NotAnInterface { class: String, interface: String },

    #[error("cannot link {class}: {source}")]
    Link {
        class: String,
        #[source]
        source: MethodTableError,
    },

    #[error("cannot link {class}: supertype {supertype} failed to link")]
    SupertypeFailed { class: String, supertype: String },
}

impl ModelError {
    /// The linkage error a runtime would raise, `None` for malformed input.
    pub fn kind(&self) -> Option<LinkageErrorKind> {
        match self {
            Self::Link { source, .. } => Some(source.kind()),
            Self::SupertypeFailed { .. }
            | Self::Cycle { .. }
            | Self::SuperIsInterface { .. }
            | Self::InterfaceWithSuperclass { .. }
            | Self::NotAnInterface { .. } => Some(LinkageErrorKind::IncompatibleClassChange),
            Self::Io { .. }
            | Self::Parse(_)
            | Self::UnknownClass { .. }
            | Self::DuplicateClass { .. }
            | Self::DuplicateMethod { .. } => None,
        }
    }
}
