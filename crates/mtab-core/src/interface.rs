// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tables of interfaces themselves.
//!
//! An interface's own table lists the virtual methods it declares, in
//! declaration order. Classes implementing it get one itable aligned with
//! this table.

use crate::facts::{is_virtual_entry, MethodFacts};

/// Stamp each declared virtual method with its position.
pub fn declare_interface_table<M: MethodFacts>(declared: &[M]) -> Vec<M> {
    declared
        .iter()
        .filter(|m| is_virtual_entry(*m))
        .enumerate()
        .map(|(index, m)| m.clone().with_vtable_index(index))
        .collect()
}
