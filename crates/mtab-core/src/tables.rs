// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Finished dispatch tables and call-time selection.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{SelectionError, TableInvariantError};
use crate::facts::{describe, MethodFacts, PartialType, TypeFacts};
use crate::key::MethodKey;

// ============================================================================
// Resolved entry
// ============================================================================

/// One table slot.
///
/// A `SelectionFailure` wraps one of several equally specific default
/// methods; invoking the slot must raise an incompatible class change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<M> {
    Ok(M),
    SelectionFailure(M),
}

impl<M> Resolved<M> {
    pub fn method(&self) -> &M {
        match self {
            Resolved::Ok(m) | Resolved::SelectionFailure(m) => m,
        }
    }

    pub fn is_selection_failure(&self) -> bool {
        matches!(self, Resolved::SelectionFailure(_))
    }

    /// Apply `f` to the wrapped method, keeping the tag.
    pub fn map<N>(self, f: impl FnOnce(M) -> N) -> Resolved<N> {
        match self {
            Resolved::Ok(m) => Resolved::Ok(f(m)),
            Resolved::SelectionFailure(m) => Resolved::SelectionFailure(f(m)),
        }
    }
}

impl<M: MethodFacts> Resolved<M> {
    /// The method a call through this slot runs, or the error it raises.
    pub fn select(&self) -> Result<&M, SelectionError> {
        match self {
            Resolved::SelectionFailure(m) => Err(SelectionError::AmbiguousDefault {
                method: describe(m),
            }),
            Resolved::Ok(m) if m.is_abstract() => Err(SelectionError::AbstractMethod {
                method: describe(m),
            }),
            Resolved::Ok(m) => Ok(m),
        }
    }

    pub fn miranda_kind(&self) -> MirandaKind {
        match self {
            Resolved::SelectionFailure(_) => MirandaKind::Ambiguous,
            Resolved::Ok(m) if m.is_abstract() => MirandaKind::Abstract,
            Resolved::Ok(_) => MirandaKind::Default,
        }
    }
}

/// How an inherited interface method without a class implementation resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirandaKind {
    /// A single maximally specific default method.
    Default,
    /// No non-abstract maximally specific method.
    Abstract,
    /// Several non-abstract maximally specific methods.
    Ambiguous,
}

// ============================================================================
// Tables
// ============================================================================

/// The vtable, itables and mirandas of one type.
#[derive(Clone)]
pub struct Tables<C: TypeFacts> {
    vtable: Vec<Resolved<C::Method>>,
    itables: IndexMap<C, Vec<Resolved<C::Method>>>,
    mirandas: Vec<Resolved<C::Method>>,
}

impl<C> fmt::Debug for Tables<C>
where
    C: TypeFacts + fmt::Debug,
    C::Method: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tables")
            .field("vtable", &self.vtable)
            .field("itables", &self.itables)
            .field("mirandas", &self.mirandas)
            .finish()
    }
}

impl<C> PartialEq for Tables<C>
where
    C: TypeFacts,
    C::Method: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.vtable == other.vtable
            && self.itables == other.itables
            && self.mirandas == other.mirandas
    }
}

impl<C> Eq for Tables<C>
where
    C: TypeFacts,
    C::Method: Eq,
{
}

impl<C: TypeFacts> Tables<C> {
    /// Reassemble tables, e.g. from a host's stored representation.
    pub fn from_parts(
        vtable: Vec<Resolved<C::Method>>,
        itables: IndexMap<C, Vec<Resolved<C::Method>>>,
        mirandas: Vec<Resolved<C::Method>>,
    ) -> Self {
        Self {
            vtable,
            itables,
            mirandas,
        }
    }

    pub fn vtable(&self) -> &[Resolved<C::Method>] {
        &self.vtable
    }

    pub fn itables(&self) -> &IndexMap<C, Vec<Resolved<C::Method>>> {
        &self.itables
    }

    pub fn itable(&self, interface: &C) -> Option<&[Resolved<C::Method>]> {
        self.itables.get(interface).map(Vec::as_slice)
    }

    pub fn mirandas(&self) -> &[Resolved<C::Method>] {
        &self.mirandas
    }

    /// Method run by a virtual call through `index`.
    pub fn select_virtual(&self, index: usize) -> Result<&C::Method, SelectionError> {
        self.vtable
            .get(index)
            .ok_or(SelectionError::NoSuchSlot {
                index,
                len: self.vtable.len(),
            })?
            .select()
    }

    /// Method run by an interface call through slot `index` of `interface`.
    pub fn select_interface(
        &self,
        interface: &C,
        index: usize,
    ) -> Result<&C::Method, SelectionError> {
        let table = self
            .itables
            .get(interface)
            .ok_or_else(|| SelectionError::InterfaceNotImplemented {
                interface: interface.name().to_string(),
            })?;
        table
            .get(index)
            .ok_or(SelectionError::NoSuchSlot {
                index,
                len: table.len(),
            })?
            .select()
    }

    /// First vtable slot holding `name`/`signature` that a type passing
    /// `same_package` may override.
    pub fn find_virtual_index(
        &self,
        name: &str,
        signature: &str,
        same_package: impl Fn(&C) -> bool,
    ) -> Option<usize> {
        let key = MethodKey::new(name, signature);
        self.vtable.iter().position(|entry| {
            let m = entry.method();
            key.matches(m)
                && !m.is_static()
                && !m.is_private()
                && (m.is_public() || m.is_protected() || same_package(&m.declaring_type()))
        })
    }

    pub fn lookup_miranda(&self, name: &str, signature: &str) -> Option<&Resolved<C::Method>> {
        let key = MethodKey::new(name, signature);
        self.mirandas.iter().find(|entry| key.matches(entry.method()))
    }

    /// Check the size invariants against the inputs the tables were built from.
    pub fn verify<T>(&self, target: &T) -> Result<(), TableInvariantError>
    where
        T: PartialType<Type = C, Method = C::Method>,
    {
        let parent_len = target.parent_table().len();
        if self.vtable.len() < parent_len {
            return Err(TableInvariantError::VTableShrunk {
                len: self.vtable.len(),
                parent_len,
            });
        }
        for (interface, table) in target.interfaces_data() {
            let itable = self.itables.get(interface).ok_or_else(|| {
                TableInvariantError::MissingITable {
                    interface: interface.name().to_string(),
                }
            })?;
            if itable.len() != table.len() {
                return Err(TableInvariantError::ITableSize {
                    interface: interface.name().to_string(),
                    len: itable.len(),
                    expected: table.len(),
                });
            }
        }
        Ok(())
    }
}
