// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! An in-memory host for the method table builder.
//!
//! Classes and interfaces are declared up front (in code or from a JSON
//! hierarchy file). Linking a class links its supertypes first, then runs
//! [`mtab_core::build`] and keeps the result so subclasses can inherit it.

mod decl;
mod error;
mod universe;

pub use decl::{Access, ClassDecl, HierarchyFile, MethodDecl};
pub use error::ModelError;
pub use universe::{ClassId, ClassRef, MethodId, MethodRef, Universe};
