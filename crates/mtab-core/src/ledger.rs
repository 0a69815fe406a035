// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Slot ledger: every place a method identity occurs while building one type.
//!
//! The ledger is filled once, before any resolution happens, and is read-only
//! afterwards. Resolution results live in a separate memo owned by the
//! builder.

use std::collections::HashMap;

use crate::facts::{is_virtual_entry, MethodFacts};
use crate::key::MethodKey;

/// Which kind of table a registered entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// The parent's vtable.
    Virtual,
    /// One interface's own table.
    Interface,
}

/// All occurrences of one method identity.
#[derive(Debug, Clone)]
pub struct Locations<M> {
    /// Parent vtable occurrences, strictly increasing by slot.
    pub v_locations: Vec<(usize, M)>,
    /// Occurrences across all interface tables.
    pub i_locations: Vec<(usize, M)>,
    /// Index into the declared candidates of the type being built.
    pub target: Option<usize>,
}

impl<M> Locations<M> {
    fn new() -> Self {
        Self {
            v_locations: Vec::new(),
            i_locations: Vec::new(),
            target: None,
        }
    }

    /// True if the parent vtable already has a slot for this identity.
    pub fn is_inherited(&self) -> bool {
        !self.v_locations.is_empty()
    }
}

/// A declared virtual method of the type being built.
#[derive(Debug, Clone)]
pub struct Candidate<M> {
    pub key: MethodKey,
    pub method: M,
}

#[derive(Debug)]
pub struct Ledger<M> {
    locations: HashMap<MethodKey, Locations<M>>,
    candidates: Vec<Candidate<M>>,
}

impl<M: MethodFacts> Ledger<M> {
    pub fn new() -> Self {
        Self {
            locations: HashMap::new(),
            candidates: Vec::new(),
        }
    }

    /// Record every virtual entry of `table`.
    pub fn register_table(&mut self, table: &[M], kind: TableKind) {
        for (index, m) in table.iter().enumerate() {
            if !is_virtual_entry(m) {
                continue;
            }
            let loc = self
                .locations
                .entry(MethodKey::of(m))
                .or_insert_with(Locations::new);
            match kind {
                TableKind::Virtual => {
                    debug_assert!(
                        loc.v_locations.last().map_or(true, |(last, _)| *last < index),
                        "parent vtable registered out of order"
                    );
                    loc.v_locations.push((index, m.clone()));
                }
                TableKind::Interface => loc.i_locations.push((index, m.clone())),
            }
        }
    }

    /// Collect the declared virtual methods and attach each to the identity
    /// it shares with a supertype, if any.
    pub fn assign_candidates(&mut self, declared: &[M]) {
        for m in declared {
            if !is_virtual_entry(m) {
                continue;
            }
            let key = MethodKey::of(m);
            let index = self.candidates.len();
            if let Some(loc) = self.locations.get_mut(&key) {
                debug_assert!(loc.target.is_none(), "duplicate declared method {}", key);
                if loc.target.is_none() {
                    loc.target = Some(index);
                }
            }
            self.candidates.push(Candidate {
                key,
                method: m.clone(),
            });
        }
    }

    pub fn get(&self, key: &MethodKey) -> Option<&Locations<M>> {
        self.locations.get(key)
    }

    pub fn candidates(&self) -> &[Candidate<M>] {
        &self.candidates
    }

    /// The declared candidate targeting `key`, if any.
    pub fn target_of(&self, key: &MethodKey) -> Option<usize> {
        self.locations.get(key).and_then(|loc| loc.target)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl<M: MethodFacts> Default for Ledger<M> {
    fn default() -> Self {
        Self::new()
    }
}
