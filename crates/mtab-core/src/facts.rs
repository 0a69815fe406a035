// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Capability traits the host runtime implements so the builder can reason
//! about its types and methods.
//!
//! The builder never sees a class file. Everything it knows comes through
//! these traits: access modifiers, declaring types, subtyping, the parent's
//! finished vtable and the finished tables of every implemented interface.

use std::hash::Hash;

// ============================================================================
// Modifiers
// ============================================================================

/// Access and kind modifiers of a method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u16);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const PUBLIC: Self = Self(1 << 0);
    pub const PRIVATE: Self = Self(1 << 1);
    pub const PROTECTED: Self = Self(1 << 2);
    pub const STATIC: Self = Self(1 << 3);
    pub const FINAL: Self = Self(1 << 4);
    pub const ABSTRACT: Self = Self(1 << 5);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Neither public, protected nor private.
    pub const fn is_package_private(self) -> bool {
        self.0 & (Self::PUBLIC.0 | Self::PROTECTED.0 | Self::PRIVATE.0) == 0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

// ============================================================================
// Type facts
// ============================================================================

/// A fully linked type (class or interface) of the host runtime.
///
/// Equality and hashing must follow the identity of the runtime type, since
/// interface tables are keyed by it.
pub trait TypeFacts: Clone + Eq + Hash {
    type Method: MethodFacts<Type = Self>;

    fn name(&self) -> &str;

    fn is_interface(&self) -> bool;

    /// Direct superclass, `None` for the root and for interfaces.
    fn superclass(&self) -> Option<Self>;

    /// True if `other` is `self` or a subtype of `self`.
    fn is_assignable_from(&self, other: &Self) -> bool;

    /// The method occupying slot `index` of this type's finished vtable.
    fn vtable_entry(&self, index: usize) -> Option<Self::Method>;
}

// ============================================================================
// Method facts
// ============================================================================

/// A method as the host runtime represents it.
pub trait MethodFacts: Clone {
    type Type: TypeFacts<Method = Self>;

    fn name(&self) -> &str;

    fn signature(&self) -> &str;

    fn modifiers(&self) -> Modifiers;

    fn declaring_type(&self) -> Self::Type;

    /// Attach the chosen vtable slot. The returned value replaces `self`
    /// from then on.
    fn with_vtable_index(self, index: usize) -> Self;

    fn is_constructor(&self) -> bool {
        self.name() == "<init>"
    }

    fn is_class_initializer(&self) -> bool {
        self.name() == "<clinit>"
    }

    fn is_public(&self) -> bool {
        self.modifiers().contains(Modifiers::PUBLIC)
    }

    fn is_protected(&self) -> bool {
        self.modifiers().contains(Modifiers::PROTECTED)
    }

    fn is_private(&self) -> bool {
        self.modifiers().contains(Modifiers::PRIVATE)
    }

    fn is_package_private(&self) -> bool {
        self.modifiers().is_package_private()
    }

    fn is_static(&self) -> bool {
        self.modifiers().contains(Modifiers::STATIC)
    }

    fn is_abstract(&self) -> bool {
        self.modifiers().contains(Modifiers::ABSTRACT)
    }

    fn is_final(&self) -> bool {
        self.modifiers().contains(Modifiers::FINAL)
    }
}

/// Only these methods may occupy vtable or itable slots.
pub fn is_virtual_entry<M: MethodFacts>(m: &M) -> bool {
    !m.is_private() && !m.is_static() && !m.is_constructor() && !m.is_class_initializer()
}

/// `Owner.name(sig)` for diagnostics.
pub fn describe<M: MethodFacts>(m: &M) -> String {
    format!("{}.{}{}", m.declaring_type().name(), m.name(), m.signature())
}

// ============================================================================
// Partial type
// ============================================================================

/// The type whose tables are being built.
///
/// Its supertypes must already be linked: `parent_table` and every entry of
/// `interfaces_data` are finished and immutable.
pub trait PartialType {
    type Type: TypeFacts<Method = Self::Method>;
    type Method: MethodFacts<Type = Self::Type>;

    fn name(&self) -> &str;

    /// The superclass's finished vtable, empty for a root type.
    fn parent_table(&self) -> &[Self::Method];

    /// Every implemented interface, direct or inherited, with that
    /// interface's own table. Keys are unique.
    fn interfaces_data(&self) -> &[(Self::Type, Vec<Self::Method>)];

    fn declared_methods(&self) -> &[Self::Method];

    fn same_runtime_package(&self, other: &Self::Type) -> bool;

    /// Legacy lookup that lets a private instance method satisfy an
    /// interface slot.
    fn lookup_override_with_private(&self, _name: &str, _signature: &str) -> Option<Self::Method> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_private_means_no_access_bit() {
        assert!(Modifiers::NONE.is_package_private());
        assert!((Modifiers::FINAL | Modifiers::ABSTRACT).is_package_private());
        assert!(!Modifiers::PUBLIC.is_package_private());
        assert!(!Modifiers::PROTECTED.is_package_private());
        assert!(!(Modifiers::PRIVATE | Modifiers::STATIC).is_package_private());
    }

    #[test]
    fn contains_checks_every_bit() {
        let m = Modifiers::PUBLIC | Modifiers::FINAL;
        assert!(m.contains(Modifiers::PUBLIC));
        assert!(m.contains(Modifiers::PUBLIC | Modifiers::FINAL));
        assert!(!m.contains(Modifiers::PUBLIC | Modifiers::STATIC));
    }
}
