// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Table builder: computes the vtable, itables and mirandas of one type.
//!
//! Passes, in order:
//! 1. Register the parent vtable and every interface table in the ledger.
//! 2. Attach declared virtual methods to the identities they share.
//! 3. Walk the parent vtable slot by slot (override, inherit, or re-resolve
//!    interface-origin slots), then append slots for new methods.
//! 4. Resolve every interface slot, recording new mirandas.
//! 5. Optionally append mirandas to the vtable.
//! 6. Assemble itables from the resolutions.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, debug_span, trace};

use crate::error::MethodTableError;
use crate::facts::{describe, is_virtual_entry, MethodFacts, PartialType, TypeFacts};
use crate::key::MethodKey;
use crate::ledger::{Ledger, TableKind};
use crate::options::BuildOptions;
use crate::resolve::{resolve_concrete, resolve_maximally_specific};
use crate::tables::{Resolved, Tables};

/// Build the tables of `target`.
///
/// Supertypes must be linked first. The result is deterministic for a given
/// input; on error nothing is produced.
pub fn build<T: PartialType>(
    target: &T,
    options: BuildOptions,
) -> Result<Tables<T::Type>, MethodTableError> {
    let _span = debug_span!("build_tables", target = target.name()).entered();
    let tables = TableBuilder::new(target, options).run()?;
    debug_assert!(tables.verify(target).is_ok(), "{:?}", tables.verify(target));
    debug!(
        vtable = tables.vtable().len(),
        itables = tables.itables().len(),
        mirandas = tables.mirandas().len(),
        "tables built"
    );
    Ok(tables)
}

/// Parent slots that `method`, declared by `target`, overrides.
///
/// Includes package-private slots reachable through an accessible ancestor
/// occupant of the same slot.
pub fn overridden_slots<T: PartialType>(target: &T, method: &T::Method) -> Vec<usize> {
    if !is_virtual_entry(method) {
        return Vec::new();
    }
    let key = MethodKey::of(method);
    target
        .parent_table()
        .iter()
        .enumerate()
        .filter(|(index, p)| is_virtual_entry(*p) && key.matches(*p) && can_override(target, p, *index))
        .map(|(index, _)| index)
        .collect()
}

/// Whether a method declared by `target` may take over parent slot `index`
/// holding `parent`.
fn can_override<T: PartialType>(target: &T, parent: &T::Method, index: usize) -> bool {
    let accessible = |m: &T::Method| {
        m.is_public() || m.is_protected() || target.same_runtime_package(&m.declaring_type())
    };
    if accessible(parent) {
        return true;
    }
    // An ancestor's occupant of the same slot may still be visible.
    let mut current = parent.declaring_type().superclass();
    while let Some(ty) = current {
        let Some(occupant) = ty.vtable_entry(index) else {
            break;
        };
        if accessible(&occupant) {
            return true;
        }
        current = ty.superclass();
    }
    false
}

/// Overrider and overridden share effective access, so one slot serves both.
fn same_override_access<T: PartialType>(target: &T, declared: &T::Method, parent: &T::Method) -> bool {
    let visible = |m: &T::Method| m.is_public() || m.is_protected();
    if visible(declared) && visible(parent) {
        return true;
    }
    declared.is_package_private()
        && parent.is_package_private()
        && target.same_runtime_package(&parent.declaring_type())
}

// ============================================================================
// Builder
// ============================================================================

/// A vtable slot during the parent walk.
enum Slot<M> {
    Filled(Resolved<M>),
    /// Taken over by a declared method whose final stamp is only known once
    /// the trailing slots are assigned.
    Overridden(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Private,
    Concrete,
    MaximallySpecific,
}

struct TableBuilder<'t, T: PartialType> {
    target: &'t T,
    options: BuildOptions,
    ledger: Ledger<T::Method>,
    /// Current value of each declared candidate; replaced when stamped.
    declared: Vec<T::Method>,
    /// Candidates placed in an equivalent slot. They get no trailing slot.
    consumed: Vec<bool>,
    /// First resolution of each identity without a declared target.
    memo: HashMap<MethodKey, Resolved<T::Method>>,
    /// Stamped value of a resolution once it holds a vtable slot.
    placed: HashMap<MethodKey, Resolved<T::Method>>,
    /// New mirandas in discovery order.
    mirandas: Vec<MethodKey>,
}

impl<'t, T: PartialType> TableBuilder<'t, T> {
    fn new(target: &'t T, options: BuildOptions) -> Self {
        let mut ledger = Ledger::new();
        ledger.register_table(target.parent_table(), TableKind::Virtual);
        for (interface, table) in target.interfaces_data() {
            trace!(interface = interface.name(), slots = table.len(), "register interface table");
            ledger.register_table(table, TableKind::Interface);
        }
        ledger.assign_candidates(target.declared_methods());

        let declared: Vec<_> = ledger.candidates().iter().map(|c| c.method.clone()).collect();
        let consumed = vec![false; declared.len()];
        Self {
            target,
            options,
            ledger,
            declared,
            consumed,
            memo: HashMap::new(),
            placed: HashMap::new(),
            mirandas: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Tables<T::Type>, MethodTableError> {
        let mut vtable = self.build_vtable()?;
        self.resolve_interface_slots();
        let mirandas = self.finish_mirandas(&mut vtable);
        let itables = self.assemble_itables();
        Ok(Tables::from_parts(vtable, itables, mirandas))
    }

    // ------------------------------------------------------------------------
    // Virtual table
    // ------------------------------------------------------------------------

    fn build_vtable(&mut self) -> Result<Vec<Resolved<T::Method>>, MethodTableError> {
        let target = self.target;
        let parent = target.parent_table();
        let mut slots = Vec::with_capacity(parent.len() + self.declared.len());
        for (index, p) in parent.iter().enumerate() {
            slots.push(self.parent_slot(index, p)?);
        }
        debug_assert_eq!(slots.len(), parent.len());

        for c in 0..self.declared.len() {
            if !self.options.verbose && self.consumed[c] {
                continue;
            }
            let index = slots.len();
            let stamped = self.declared[c].clone().with_vtable_index(index);
            trace!(method = %self.ledger.candidates()[c].key, index, "new slot");
            self.declared[c] = stamped.clone();
            slots.push(Slot::Filled(Resolved::Ok(stamped)));
        }

        Ok(slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Filled(entry) => entry,
                Slot::Overridden(c) => Resolved::Ok(self.declared[c].clone()),
            })
            .collect())
    }

    fn parent_slot(&mut self, index: usize, p: &T::Method) -> Result<Slot<T::Method>, MethodTableError> {
        if !is_virtual_entry(p) {
            return Ok(Slot::Filled(Resolved::Ok(p.clone())));
        }
        let key = MethodKey::of(p);

        if let Some(c) = self.ledger.target_of(&key) {
            if can_override(self.target, p, index) {
                if p.is_final() {
                    debug!(method = %key, index, overridden = %describe(p), "override of final method");
                    return Err(MethodTableError::final_override(
                        describe(&self.declared[c]),
                        describe(p),
                    ));
                }
                if !self.options.verbose && same_override_access(self.target, &self.declared[c], p) {
                    if !self.consumed[c] {
                        self.declared[c] = self.declared[c].clone().with_vtable_index(index);
                        self.consumed[c] = true;
                    }
                    trace!(method = %key, index, "equivalent slot");
                    return Ok(Slot::Filled(Resolved::Ok(self.declared[c].clone())));
                }
                trace!(method = %key, index, "overridden");
                return Ok(Slot::Overridden(c));
            }
            trace!(method = %key, index, "declared method cannot override slot");
        }

        if p.declaring_type().is_interface() {
            return Ok(Slot::Filled(self.reresolve_interface_slot(index, &key, p)));
        }
        trace!(method = %key, index, "inherited");
        Ok(Slot::Filled(Resolved::Ok(p.clone())))
    }

    /// A parent slot filled from an interface may resolve differently once
    /// this type adds more specific interfaces.
    fn reresolve_interface_slot(&mut self, index: usize, key: &MethodKey, p: &T::Method) -> Resolved<T::Method> {
        if let Some(entry) = self.placed.get(key) {
            return entry.clone();
        }
        let resolved = self
            .resolve(key, true)
            .unwrap_or_else(|| Resolved::Ok(p.clone()));
        let entry = if resolved.method().declaring_type() == p.declaring_type() {
            resolved.map(|_| p.clone())
        } else {
            trace!(method = %key, index, "re-resolved interface slot");
            resolved.map(|m| m.with_vtable_index(index))
        };
        self.placed.insert(key.clone(), entry.clone());
        entry
    }

    // ------------------------------------------------------------------------
    // Interface resolution
    // ------------------------------------------------------------------------

    /// Resolve an identity that has no declared target. Memoized.
    fn resolve(&mut self, key: &MethodKey, in_vtable: bool) -> Option<Resolved<T::Method>> {
        if let Some(entry) = self.memo.get(key) {
            return Some(entry.clone());
        }
        let loc = self.ledger.get(key)?;
        let inherited = loc.is_inherited();

        let private = if self.options.allow_private_interface_resolution && !in_vtable {
            self.target
                .lookup_override_with_private(&key.name, &key.signature)
        } else {
            None
        };
        let (entry, source) = if let Some(m) = private {
            (Resolved::Ok(m), Source::Private)
        } else if let Some(m) = resolve_concrete(&loc.v_locations) {
            (Resolved::Ok(m), Source::Concrete)
        } else {
            let from_interfaces = if loc.i_locations.is_empty() {
                resolve_maximally_specific(
                    loc.v_locations
                        .iter()
                        .map(|(_, m)| m)
                        .filter(|m| m.declaring_type().is_interface()),
                )
            } else {
                resolve_maximally_specific(loc.i_locations.iter().map(|(_, m)| m))
            };
            (from_interfaces?, Source::MaximallySpecific)
        };

        trace!(method = %key, ?source, failure = entry.is_selection_failure(), "resolved");
        if source == Source::MaximallySpecific && !in_vtable && !inherited {
            trace!(method = %key, "miranda");
            self.mirandas.push(key.clone());
        }
        self.memo.insert(key.clone(), entry.clone());
        Some(entry)
    }

    fn resolve_interface_slots(&mut self) {
        let target = self.target;
        for (_, table) in target.interfaces_data() {
            for m in table.iter().filter(|m| is_virtual_entry(*m)) {
                let key = MethodKey::of(m);
                if self.ledger.target_of(&key).is_some() || self.placed.contains_key(&key) {
                    continue;
                }
                self.resolve(&key, false);
            }
        }
    }

    fn finish_mirandas(&mut self, vtable: &mut Vec<Resolved<T::Method>>) -> Vec<Resolved<T::Method>> {
        let keys = std::mem::take(&mut self.mirandas);
        let mut mirandas = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(entry) = self.memo.get(&key).cloned() else {
                continue;
            };
            if !self.options.materialize_mirandas || self.placed.contains_key(&key) {
                mirandas.push(entry);
                continue;
            }
            let index = vtable.len();
            let stamped = entry.map(|m| m.with_vtable_index(index));
            trace!(method = %key, index, "miranda slot");
            vtable.push(stamped.clone());
            self.placed.insert(key, stamped.clone());
            mirandas.push(stamped);
        }
        mirandas
    }

    fn assemble_itables(&self) -> IndexMap<T::Type, Vec<Resolved<T::Method>>> {
        let mut itables = IndexMap::with_capacity(self.target.interfaces_data().len());
        for (interface, table) in self.target.interfaces_data() {
            let entries = table.iter().map(|m| self.itable_entry(m)).collect();
            let previous = itables.insert(interface.clone(), entries);
            debug_assert!(previous.is_none(), "interface {} listed twice", interface.name());
        }
        itables
    }

    fn itable_entry(&self, m: &T::Method) -> Resolved<T::Method> {
        if !is_virtual_entry(m) {
            return Resolved::Ok(m.clone());
        }
        let key = MethodKey::of(m);
        if let Some(c) = self.ledger.target_of(&key) {
            return Resolved::Ok(self.declared[c].clone());
        }
        self.placed
            .get(&key)
            .or_else(|| self.memo.get(&key))
            .cloned()
            .unwrap_or_else(|| Resolved::Ok(m.clone()))
    }
}
