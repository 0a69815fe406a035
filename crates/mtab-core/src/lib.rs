// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Method table construction for a managed runtime.
//!
//! Given a type's parent vtable, the tables of every interface it implements
//! and its own declared methods, computes:
//! - the vtable used for virtual calls
//! - one itable per implemented interface
//! - the mirandas: inherited interface methods without a class implementation
//!
//! The host runtime supplies facts through [`PartialType`], [`TypeFacts`] and
//! [`MethodFacts`]. Ambiguous and abstract resolutions are returned as data
//! ([`Resolved`]) for the runtime to raise when the slot is invoked; only an
//! override of a final method aborts the build.

mod builder;
mod error;
mod facts;
mod interface;
mod key;
mod ledger;
mod options;
mod resolve;
mod tables;

#[cfg(test)]
mod testing;

pub use builder::{build, overridden_slots};
pub use error::{LinkageErrorKind, MethodTableError, SelectionError, TableInvariantError};
pub use facts::{describe, is_virtual_entry, MethodFacts, Modifiers, PartialType, TypeFacts};
pub use interface::declare_interface_table;
pub use key::MethodKey;
pub use ledger::{Candidate, Ledger, Locations, TableKind};
pub use options::BuildOptions;
pub use resolve::{resolve_concrete, resolve_maximally_specific};
pub use tables::{MirandaKind, Resolved, Tables};
