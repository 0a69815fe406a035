// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Class universe: declared types, their links, and the fact views handed
//! to the table builder.

use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

use indexmap::IndexMap;
use mtab_core::{
    build, declare_interface_table, BuildOptions, MethodFacts, MethodTableError, Modifiers,
    PartialType, Resolved, Tables, TypeFacts,
};
use tracing::{debug, debug_span};

use crate::decl::{ClassDecl, HierarchyFile, MethodDecl};
use crate::ModelError;

/// Index of a class or interface in its universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A declared method: its class and position among that class's methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId {
    pub class: ClassId,
    pub index: usize,
}

struct ClassInfo {
    name: String,
    package: String,
    is_interface: bool,
    superclass: Option<ClassId>,
    interfaces: Vec<ClassId>,
    methods: Vec<MethodInfo>,
}

struct MethodInfo {
    name: String,
    signature: String,
    modifiers: Modifiers,
}

impl MethodInfo {
    fn from_decl(decl: &MethodDecl, in_interface: bool) -> Self {
        let mut modifiers = decl.modifiers();
        // Interface members are implicitly public.
        if in_interface && modifiers.is_package_private() {
            modifiers = modifiers | Modifiers::PUBLIC;
        }
        Self {
            name: decl.name.clone(),
            signature: decl.signature.clone(),
            modifiers,
        }
    }
}

// ============================================================================
// Linked state
// ============================================================================

/// A stored table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotEntry {
    method: MethodId,
    vtable_index: Option<usize>,
    selection_failure: bool,
}

impl SlotEntry {
    fn of(m: &MethodRef<'_>) -> Self {
        Self {
            method: m.id,
            vtable_index: m.vtable_index,
            selection_failure: false,
        }
    }

    fn from_resolved(entry: &Resolved<MethodRef<'_>>) -> Self {
        Self {
            selection_failure: entry.is_selection_failure(),
            ..Self::of(entry.method())
        }
    }

    fn method_ref<'u>(&self, universe: &'u Universe) -> MethodRef<'u> {
        MethodRef {
            universe,
            id: self.method,
            vtable_index: self.vtable_index,
        }
    }

    fn to_resolved<'u>(self, universe: &'u Universe) -> Resolved<MethodRef<'u>> {
        let m = self.method_ref(universe);
        if self.selection_failure {
            Resolved::SelectionFailure(m)
        } else {
            Resolved::Ok(m)
        }
    }
}

#[derive(Debug, Default)]
struct LinkedClass {
    vtable: Vec<SlotEntry>,
    itables: IndexMap<ClassId, Vec<SlotEntry>>,
    mirandas: Vec<SlotEntry>,
}

impl LinkedClass {
    fn from_tables(tables: &Tables<ClassRef<'_>>) -> Self {
        fn entries(slots: &[Resolved<MethodRef<'_>>]) -> Vec<SlotEntry> {
            slots.iter().map(SlotEntry::from_resolved).collect()
        }
        Self {
            vtable: entries(tables.vtable()),
            itables: tables
                .itables()
                .iter()
                .map(|(interface, slots)| (interface.id, entries(slots)))
                .collect(),
            mirandas: entries(tables.mirandas()),
        }
    }

    fn to_tables<'u>(&self, universe: &'u Universe) -> Tables<ClassRef<'u>> {
        let resolved = |slots: &[SlotEntry]| -> Vec<Resolved<MethodRef<'u>>> {
            slots.iter().map(|e| e.to_resolved(universe)).collect()
        };
        Tables::from_parts(
            resolved(&self.vtable),
            self.itables
                .iter()
                .map(|(id, slots)| (universe.class_ref(*id), resolved(slots)))
                .collect(),
            resolved(&self.mirandas),
        )
    }

    fn table<'u>(&self, universe: &'u Universe) -> Vec<MethodRef<'u>> {
        self.vtable.iter().map(|e| e.method_ref(universe)).collect()
    }
}

#[derive(Debug, Clone)]
enum LinkFailure {
    Own(MethodTableError),
    Supertype(ClassId),
}

// ============================================================================
// Universe
// ============================================================================

/// Every declared type, linked on demand.
pub struct Universe {
    classes: Vec<ClassInfo>,
    by_name: HashMap<String, ClassId>,
    options: BuildOptions,
    linked: Vec<OnceCell<Result<LinkedClass, LinkFailure>>>,
}

impl Universe {
    /// Check the declarations and set up an unlinked universe.
    pub fn new(decls: Vec<ClassDecl>, options: BuildOptions) -> Result<Self, ModelError> {
        let mut by_name = HashMap::with_capacity(decls.len());
        for (index, decl) in decls.iter().enumerate() {
            if by_name.insert(decl.name.clone(), ClassId(index as u32)).is_some() {
                return Err(ModelError::DuplicateClass {
                    name: decl.name.clone(),
                });
            }
        }

        let lookup = |name: &str| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| ModelError::UnknownClass {
                    name: name.to_string(),
                })
        };
        let mut classes = Vec::with_capacity(decls.len());
        for decl in decls {
            let superclass = decl.superclass.as_deref().map(lookup).transpose()?;
            let interfaces = decl
                .interfaces
                .iter()
                .map(|name| lookup(name))
                .collect::<Result<Vec<_>, _>>()?;
            let methods = decl
                .methods
                .iter()
                .map(|m| MethodInfo::from_decl(m, decl.is_interface))
                .collect();
            classes.push(ClassInfo {
                name: decl.name,
                package: decl.package,
                is_interface: decl.is_interface,
                superclass,
                interfaces,
                methods,
            });
        }

        let linked = classes.iter().map(|_| OnceCell::new()).collect();
        let universe = Self {
            classes,
            by_name,
            options,
            linked,
        };
        universe.validate()?;
        debug!(classes = universe.classes.len(), "universe loaded");
        Ok(universe)
    }

    pub fn from_file(file: HierarchyFile) -> Result<Self, ModelError> {
        Self::new(file.classes, file.options)
    }

    pub fn from_json(source: &str) -> Result<Self, ModelError> {
        Self::from_file(HierarchyFile::from_json(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        Self::from_file(HierarchyFile::read(path)?)
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Replace the build options. Drops every table linked so far.
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self.linked.iter_mut().for_each(|cell| *cell = OnceCell::new());
        self
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Every type in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = ClassRef<'_>> {
        (0..self.classes.len()).map(move |index| self.class_ref(ClassId(index as u32)))
    }

    pub fn class(&self, name: &str) -> Result<ClassRef<'_>, ModelError> {
        self.by_name
            .get(name)
            .map(|id| self.class_ref(*id))
            .ok_or_else(|| ModelError::UnknownClass {
                name: name.to_string(),
            })
    }

    /// Link `name` and, first, every supertype it depends on.
    pub fn link(&self, name: &str) -> Result<ClassRef<'_>, ModelError> {
        let class = self.class(name)?;
        self.link_id(class.id)
            .map_err(|failure| self.failure_error(class.id, failure))?;
        Ok(class)
    }

    /// Link `name` and return its tables. An interface's vtable is its own
    /// declared table.
    pub fn tables(&self, name: &str) -> Result<Tables<ClassRef<'_>>, ModelError> {
        let class = self.class(name)?;
        let linked = self
            .link_id(class.id)
            .map_err(|failure| self.failure_error(class.id, failure))?;
        Ok(linked.to_tables(self))
    }

    /// Link every type in declaration order, collecting one error per type
    /// that fails.
    pub fn link_all(&self) -> Vec<ModelError> {
        self.classes()
            .filter_map(|class| {
                self.link_id(class.id)
                    .err()
                    .map(|failure| self.failure_error(class.id, failure))
            })
            .collect()
    }

    fn class_ref(&self, id: ClassId) -> ClassRef<'_> {
        ClassRef { universe: self, id }
    }

    fn info(&self, id: ClassId) -> &ClassInfo {
        &self.classes[id.index()]
    }

    fn supertypes(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        let info = self.info(id);
        info.superclass.into_iter().chain(info.interfaces.iter().copied())
    }

    fn is_subtype(&self, sub: ClassId, sup: ClassId) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![sub];
        while let Some(id) = stack.pop() {
            if id == sup {
                return true;
            }
            if seen.insert(id) {
                stack.extend(self.supertypes(id));
            }
        }
        false
    }

    /// Every interface `id` implements, directly or through a supertype.
    /// Superclass interfaces come first; a superinterface precedes the
    /// interfaces extending it.
    fn all_interfaces(&self, id: ClassId) -> Vec<ClassId> {
        let mut out = Vec::new();
        self.collect_interfaces(id, &mut out);
        out
    }

    fn collect_interfaces(&self, id: ClassId, out: &mut Vec<ClassId>) {
        let info = self.info(id);
        if let Some(superclass) = info.superclass {
            self.collect_interfaces(superclass, out);
        }
        for &interface in &info.interfaces {
            // Already listed means its superinterfaces are listed too.
            if out.contains(&interface) {
                continue;
            }
            self.collect_interfaces(interface, out);
            out.push(interface);
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        for info in &self.classes {
            let mut seen = HashSet::with_capacity(info.methods.len());
            for m in &info.methods {
                if !seen.insert((m.name.as_str(), m.signature.as_str())) {
                    return Err(ModelError::DuplicateMethod {
                        class: info.name.clone(),
                        method: format!("{}{}", m.name, m.signature),
                    });
                }
            }
            if info.is_interface && info.superclass.is_some() {
                return Err(ModelError::InterfaceWithSuperclass {
                    name: info.name.clone(),
                });
            }
            if let Some(superclass) = info.superclass {
                let sup = self.info(superclass);
                if sup.is_interface {
                    return Err(ModelError::SuperIsInterface {
                        class: info.name.clone(),
                        superclass: sup.name.clone(),
                    });
                }
            }
            for &interface in &info.interfaces {
                let iface = self.info(interface);
                if !iface.is_interface {
                    return Err(ModelError::NotAnInterface {
                        class: info.name.clone(),
                        interface: iface.name.clone(),
                    });
                }
            }
        }
        self.check_acyclic()
    }

    fn check_acyclic(&self) -> Result<(), ModelError> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            New,
            Active,
            Done,
        }

        let mut marks = vec![Mark::New; self.classes.len()];
        for start in 0..self.classes.len() {
            if marks[start] != Mark::New {
                continue;
            }
            marks[start] = Mark::Active;
            let mut stack = vec![(ClassId(start as u32), 0usize)];
            while let Some(top) = stack.last_mut() {
                let (id, edge) = *top;
                top.1 += 1;
                match self.supertypes(id).nth(edge) {
                    Some(next) => match marks[next.index()] {
                        Mark::Active => {
                            return Err(ModelError::Cycle {
                                name: self.info(next).name.clone(),
                            })
                        }
                        Mark::New => {
                            marks[next.index()] = Mark::Active;
                            stack.push((next, 0));
                        }
                        Mark::Done => {}
                    },
                    None => {
                        marks[id.index()] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Linking
    // ------------------------------------------------------------------------

    fn link_id(&self, id: ClassId) -> Result<&LinkedClass, LinkFailure> {
        let cell = &self.linked[id.index()];
        if let Some(state) = cell.get() {
            return state.as_ref().map_err(Clone::clone);
        }
        let state = self.link_uncached(id);
        cell.get_or_init(|| state).as_ref().map_err(Clone::clone)
    }

    fn link_uncached(&self, id: ClassId) -> Result<LinkedClass, LinkFailure> {
        let class = self.class_ref(id);
        let _span = debug_span!("link", class = class.name()).entered();

        if class.is_interface() {
            let table = declare_interface_table(&class.declared_methods());
            debug!(slots = table.len(), "interface linked");
            return Ok(LinkedClass {
                vtable: table.iter().map(SlotEntry::of).collect(),
                ..LinkedClass::default()
            });
        }

        let parent = match self.info(id).superclass {
            Some(superclass) => self
                .link_id(superclass)
                .map_err(|_| LinkFailure::Supertype(superclass))?
                .table(self),
            None => Vec::new(),
        };
        let mut interfaces = Vec::new();
        for interface in self.all_interfaces(id) {
            let linked = self
                .link_id(interface)
                .map_err(|_| LinkFailure::Supertype(interface))?;
            interfaces.push((self.class_ref(interface), linked.table(self)));
        }

        let pending = PendingClass {
            class,
            parent,
            interfaces,
            declared: class.declared_methods(),
        };
        let tables = build(&pending, self.options).map_err(|e| {
            debug!(error = %e, "link failed");
            LinkFailure::Own(e)
        })?;
        debug!(
            vtable = tables.vtable().len(),
            mirandas = tables.mirandas().len(),
            "class linked"
        );
        Ok(LinkedClass::from_tables(&tables))
    }

    fn failure_error(&self, id: ClassId, failure: LinkFailure) -> ModelError {
        let class = self.info(id).name.clone();
        match failure {
            LinkFailure::Own(source) => ModelError::Link { class, source },
            LinkFailure::Supertype(supertype) => ModelError::SupertypeFailed {
                class,
                supertype: self.info(supertype).name.clone(),
            },
        }
    }
}

impl fmt::Debug for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Universe")
            .field("classes", &self.classes.len())
            .field("options", &self.options)
            .finish()
    }
}

// ============================================================================
// Fact views
// ============================================================================

/// A type of a [`Universe`].
#[derive(Clone, Copy)]
pub struct ClassRef<'u> {
    universe: &'u Universe,
    id: ClassId,
}

impl<'u> ClassRef<'u> {
    fn info(&self) -> &'u ClassInfo {
        self.universe.info(self.id)
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn package(&self) -> &'u str {
        &self.info().package
    }

    /// Every interface this type implements, in itable order.
    pub fn interfaces(&self) -> Vec<ClassRef<'u>> {
        self.universe
            .all_interfaces(self.id)
            .into_iter()
            .map(|id| self.universe.class_ref(id))
            .collect()
    }

    /// Declared methods, without a vtable index.
    pub fn declared_methods(&self) -> Vec<MethodRef<'u>> {
        (0..self.info().methods.len())
            .map(|index| MethodRef {
                universe: self.universe,
                id: MethodId {
                    class: self.id,
                    index,
                },
                vtable_index: None,
            })
            .collect()
    }
}

impl PartialEq for ClassRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.universe, other.universe) && self.id == other.id
    }
}

impl Eq for ClassRef<'_> {}

impl Hash for ClassRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ClassRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.info().name)
    }
}

impl fmt::Display for ClassRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.info().name)
    }
}

impl<'u> TypeFacts for ClassRef<'u> {
    type Method = MethodRef<'u>;

    fn name(&self) -> &str {
        &self.info().name
    }

    fn is_interface(&self) -> bool {
        self.info().is_interface
    }

    fn superclass(&self) -> Option<Self> {
        self.info().superclass.map(|id| self.universe.class_ref(id))
    }

    fn is_assignable_from(&self, other: &Self) -> bool {
        self.universe.is_subtype(other.id, self.id)
    }

    fn vtable_entry(&self, index: usize) -> Option<MethodRef<'u>> {
        match self.universe.linked[self.id.index()].get() {
            Some(Ok(linked)) => linked
                .vtable
                .get(index)
                .map(|e| e.method_ref(self.universe)),
            _ => None,
        }
    }
}

/// A method of a [`Universe`], possibly stamped with a vtable index.
#[derive(Clone, Copy)]
pub struct MethodRef<'u> {
    universe: &'u Universe,
    id: MethodId,
    vtable_index: Option<usize>,
}

impl<'u> MethodRef<'u> {
    fn info(&self) -> &'u MethodInfo {
        &self.universe.info(self.id.class).methods[self.id.index]
    }

    pub fn id(&self) -> MethodId {
        self.id
    }

    pub fn vtable_index(&self) -> Option<usize> {
        self.vtable_index
    }
}

impl PartialEq for MethodRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.universe, other.universe)
            && self.id == other.id
            && self.vtable_index == other.vtable_index
    }
}

impl Eq for MethodRef<'_> {}

impl fmt::Display for MethodRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.info();
        write!(
            f,
            "{}.{}{}",
            self.universe.info(self.id.class).name,
            info.name,
            info.signature
        )
    }
}

impl fmt::Debug for MethodRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)?;
        if let Some(index) = self.vtable_index {
            write!(f, "@{}", index)?;
        }
        Ok(())
    }
}

impl<'u> MethodFacts for MethodRef<'u> {
    type Type = ClassRef<'u>;

    fn name(&self) -> &str {
        &self.info().name
    }

    fn signature(&self) -> &str {
        &self.info().signature
    }

    fn modifiers(&self) -> Modifiers {
        self.info().modifiers
    }

    fn declaring_type(&self) -> ClassRef<'u> {
        self.universe.class_ref(self.id.class)
    }

    fn with_vtable_index(self, index: usize) -> Self {
        Self {
            vtable_index: Some(index),
            ..self
        }
    }
}

/// A class whose supertypes are linked and whose own tables are being built.
struct PendingClass<'u> {
    class: ClassRef<'u>,
    parent: Vec<MethodRef<'u>>,
    interfaces: Vec<(ClassRef<'u>, Vec<MethodRef<'u>>)>,
    declared: Vec<MethodRef<'u>>,
}

impl<'u> PartialType for PendingClass<'u> {
    type Type = ClassRef<'u>;
    type Method = MethodRef<'u>;

    fn name(&self) -> &str {
        self.class.name()
    }

    fn parent_table(&self) -> &[MethodRef<'u>] {
        &self.parent
    }

    fn interfaces_data(&self) -> &[(ClassRef<'u>, Vec<MethodRef<'u>>)] {
        &self.interfaces
    }

    fn declared_methods(&self) -> &[MethodRef<'u>] {
        &self.declared
    }

    fn same_runtime_package(&self, other: &ClassRef<'u>) -> bool {
        self.class.package() == other.package()
    }

    fn lookup_override_with_private(&self, name: &str, signature: &str) -> Option<MethodRef<'u>> {
        let mut current = Some(self.class);
        while let Some(class) = current {
            let found = class.declared_methods().into_iter().find(|m| {
                m.is_private() && !m.is_static() && m.name() == name && m.signature() == signature
            });
            if found.is_some() {
                return found;
            }
            current = class.superclass();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::MethodDecl;

    fn universe(decls: Vec<ClassDecl>) -> Result<Universe, ModelError> {
        Universe::new(decls, BuildOptions::default())
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = universe(vec![ClassDecl::class("A"), ClassDecl::class("A")]).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateClass { name } if name == "A"));
    }

    #[test]
    fn rejects_unknown_supertype() {
        let err = universe(vec![ClassDecl::class("B").extends("A")]).unwrap_err();
        assert!(matches!(err, ModelError::UnknownClass { name } if name == "A"));
    }

    #[test]
    fn rejects_duplicate_methods() {
        let err = universe(vec![ClassDecl::class("A")
            .method(MethodDecl::public("f", "()V"))
            .method(MethodDecl::private("f", "()V"))])
        .unwrap_err();
        assert_eq!(err.to_string(), "A declares f()V more than once");
    }

    #[test]
    fn rejects_cycles() {
        let err = universe(vec![
            ClassDecl::class("A").extends("B"),
            ClassDecl::class("B").extends("A"),
        ])
        .unwrap_err();
        assert!(matches!(err, ModelError::Cycle { .. }));

        let err = universe(vec![
            ClassDecl::interface("I").implements("J"),
            ClassDecl::interface("J").implements("I"),
        ])
        .unwrap_err();
        assert!(matches!(err, ModelError::Cycle { .. }));
    }

    #[test]
    fn rejects_misused_kinds() {
        let err = universe(vec![
            ClassDecl::interface("I"),
            ClassDecl::class("A").extends("I"),
        ])
        .unwrap_err();
        assert!(matches!(err, ModelError::SuperIsInterface { .. }));

        let err = universe(vec![
            ClassDecl::class("A"),
            ClassDecl::class("B").implements("A"),
        ])
        .unwrap_err();
        assert!(matches!(err, ModelError::NotAnInterface { .. }));

        let err = universe(vec![
            ClassDecl::class("A"),
            ClassDecl::interface("I").extends("A"),
        ])
        .unwrap_err();
        assert!(matches!(err, ModelError::InterfaceWithSuperclass { .. }));
    }

    #[test]
    fn interface_members_default_to_public() {
        let u = universe(vec![ClassDecl::interface("I")
            .method(MethodDecl::package_private("run", "()V").with_abstract())])
        .unwrap();
        let run = u.class("I").unwrap().declared_methods()[0];
        assert!(run.is_public());
        assert!(run.is_abstract());
    }

    #[test]
    fn interfaces_are_listed_supertypes_first() {
        let u = universe(vec![
            ClassDecl::interface("I1"),
            ClassDecl::interface("I2").implements("I1"),
            ClassDecl::interface("J"),
            ClassDecl::class("A").implements("J"),
            ClassDecl::class("B").extends("A").implements("I2"),
        ])
        .unwrap();
        let names: Vec<_> = u
            .class("B")
            .unwrap()
            .interfaces()
            .iter()
            .map(|i| i.to_string())
            .collect();
        assert_eq!(names, vec!["J", "I1", "I2"]);
    }

    #[test]
    fn private_lookup_searches_superclasses() {
        let u = universe(vec![
            ClassDecl::class("A").method(MethodDecl::private("run", "()V")),
            ClassDecl::class("B").extends("A"),
        ])
        .unwrap();
        let b = u.class("B").unwrap();
        let pending = PendingClass {
            class: b,
            parent: Vec::new(),
            interfaces: Vec::new(),
            declared: b.declared_methods(),
        };
        let found = pending.lookup_override_with_private("run", "()V").unwrap();
        assert_eq!(found.declaring_type(), u.class("A").unwrap());
        assert!(pending.lookup_override_with_private("run", "()I").is_none());
    }

    #[test]
    fn link_is_memoized() {
        let u = universe(vec![
            ClassDecl::class("A").method(MethodDecl::public("f", "()V")),
            ClassDecl::class("B").extends("A"),
        ])
        .unwrap();
        let first = u.tables("B").unwrap();
        let second = u.tables("B").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            u.class("A").unwrap().vtable_entry(0).as_ref(),
            Some(first.vtable()[0].method())
        );
    }
}
