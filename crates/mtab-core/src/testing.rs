// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Minimal fact provider for unit tests.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::facts::{MethodFacts, Modifiers, PartialType, TypeFacts};

pub struct Universe {
    next_id: Cell<u32>,
}

impl Universe {
    pub fn new() -> Self {
        Self { next_id: Cell::new(0) }
    }

    fn make(
        &self,
        name: &str,
        package: &str,
        is_interface: bool,
        superclass: Option<&Type>,
        interfaces: &[&Type],
    ) -> Type {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Type(Rc::new(TypeData {
            id,
            name: name.to_string(),
            package: package.to_string(),
            is_interface,
            superclass: superclass.cloned(),
            interfaces: interfaces.iter().map(|t| (*t).clone()).collect(),
            vtable: RefCell::new(Vec::new()),
        }))
    }

    pub fn class(&self, name: &str, package: &str, superclass: Option<&Type>) -> Type {
        self.make(name, package, false, superclass, &[])
    }

    pub fn class_implementing(
        &self,
        name: &str,
        package: &str,
        superclass: Option<&Type>,
        interfaces: &[&Type],
    ) -> Type {
        self.make(name, package, false, superclass, interfaces)
    }

    pub fn interface(&self, name: &str, package: &str, superinterfaces: &[&Type]) -> Type {
        self.make(name, package, true, None, superinterfaces)
    }
}

struct TypeData {
    id: u32,
    name: String,
    package: String,
    is_interface: bool,
    superclass: Option<Type>,
    interfaces: Vec<Type>,
    vtable: RefCell<Vec<Method>>,
}

#[derive(Clone)]
pub struct Type(Rc<TypeData>);

impl Type {
    pub fn package(&self) -> &str {
        &self.0.package
    }

    pub fn set_vtable(&self, vtable: Vec<Method>) {
        *self.0.vtable.borrow_mut() = vtable;
    }

    pub fn vtable(&self) -> Vec<Method> {
        self.0.vtable.borrow().clone()
    }

    /// Every interface reachable through superclasses and superinterfaces,
    /// each once, in discovery order.
    pub fn all_interfaces(&self) -> Vec<Type> {
        let mut out: Vec<Type> = Vec::new();
        let mut stack: Vec<Type> = vec![self.clone()];
        while let Some(ty) = stack.pop() {
            for i in ty.0.interfaces.iter().rev() {
                stack.push(i.clone());
            }
            if let Some(s) = &ty.0.superclass {
                stack.push(s.clone());
            }
            if ty.0.is_interface && !out.contains(&ty) && ty != *self {
                out.push(ty);
            }
        }
        out
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

impl TypeFacts for Type {
    type Method = Method;

    fn name(&self) -> &str {
        &self.0.name
    }

    fn is_interface(&self) -> bool {
        self.0.is_interface
    }

    fn superclass(&self) -> Option<Self> {
        self.0.superclass.clone()
    }

    fn is_assignable_from(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }
        if let Some(s) = &other.0.superclass {
            if self.is_assignable_from(s) {
                return true;
            }
        }
        other.0.interfaces.iter().any(|i| self.is_assignable_from(i))
    }

    fn vtable_entry(&self, index: usize) -> Option<Method> {
        self.0.vtable.borrow().get(index).cloned()
    }
}

#[derive(Clone)]
pub struct Method {
    name: Rc<str>,
    signature: Rc<str>,
    modifiers: Modifiers,
    declaring: Type,
    pub index: Option<usize>,
    /// Shared by every value derived from the same declaration.
    stamps: Rc<RefCell<Vec<usize>>>,
}

impl Method {
    pub fn new(name: &str, signature: &str, modifiers: Modifiers, declaring: &Type) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
            modifiers,
            declaring: declaring.clone(),
            index: None,
            stamps: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn stamps(&self) -> Vec<usize> {
        self.stamps.borrow().clone()
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.signature == other.signature
            && self.modifiers == other.modifiers
            && self.declaring == other.declaring
            && self.index == other.index
    }
}

impl Eq for Method {}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}.{}{}", self.declaring, self.name, self.signature)?;
        if let Some(i) = self.index {
            write!(f, "@{}", i)?;
        }
        Ok(())
    }
}

impl MethodFacts for Method {
    type Type = Type;

    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> &str {
        &self.signature
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn declaring_type(&self) -> Type {
        self.declaring.clone()
    }

    fn with_vtable_index(mut self, index: usize) -> Self {
        self.stamps.borrow_mut().push(index);
        self.index = Some(index);
        self
    }
}

/// A type under construction, assembled from its already-linked supertypes.
pub struct Target {
    ty: Type,
    parent: Vec<Method>,
    interfaces: Vec<(Type, Vec<Method>)>,
    declared: Vec<Method>,
    private_lookup: bool,
}

impl Target {
    pub fn new(ty: &Type, declared: Vec<Method>) -> Self {
        let parent = ty.superclass().map(|s| s.vtable()).unwrap_or_default();
        let interfaces = ty
            .all_interfaces()
            .into_iter()
            .map(|i| {
                let table = i.vtable();
                (i, table)
            })
            .collect();
        Self {
            ty: ty.clone(),
            parent,
            interfaces,
            declared,
            private_lookup: false,
        }
    }

    pub fn with_private_lookup(mut self) -> Self {
        self.private_lookup = true;
        self
    }
}

impl PartialType for Target {
    type Type = Type;
    type Method = Method;

    fn name(&self) -> &str {
        self.ty.name()
    }

    fn parent_table(&self) -> &[Method] {
        &self.parent
    }

    fn interfaces_data(&self) -> &[(Type, Vec<Method>)] {
        &self.interfaces
    }

    fn declared_methods(&self) -> &[Method] {
        &self.declared
    }

    fn same_runtime_package(&self, other: &Type) -> bool {
        self.ty.package() == other.package()
    }

    fn lookup_override_with_private(&self, name: &str, signature: &str) -> Option<Method> {
        if !self.private_lookup {
            return None;
        }
        self.declared
            .iter()
            .find(|m| m.is_private() && !m.is_static() && m.name() == name && m.signature() == signature)
            .cloned()
    }
}
