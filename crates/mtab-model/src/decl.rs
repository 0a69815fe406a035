// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Class and method declarations, as read from a hierarchy file.

use std::path::Path;

use mtab_core::{BuildOptions, Modifiers};
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// A whole hierarchy: build options plus every class and interface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HierarchyFile {
    #[serde(default)]
    pub options: BuildOptions,
    pub classes: Vec<ClassDecl>,
}

impl HierarchyFile {
    pub fn from_json(source: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&source)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    /// Runtime package. Types in the same package see each other's
    /// package-private methods.
    #[serde(default)]
    pub package: String,
    #[serde(default, rename = "super")]
    pub superclass: Option<String>,
    /// Direct superinterfaces.
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default, rename = "interface")]
    pub is_interface: bool,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_interface: true,
            ..Self::default()
        }
    }

    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Protected,
    #[default]
    Package,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub signature: String,
    #[serde(default)]
    pub access: Access,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, signature: impl Into<String>, access: Access) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
            access,
            is_static: false,
            is_abstract: false,
            is_final: false,
        }
    }

    pub fn public(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self::new(name, signature, Access::Public)
    }

    pub fn protected(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self::new(name, signature, Access::Protected)
    }

    pub fn package_private(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self::new(name, signature, Access::Package)
    }

    pub fn private(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self::new(name, signature, Access::Private)
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn modifiers(&self) -> Modifiers {
        let mut m = match self.access {
            Access::Public => Modifiers::PUBLIC,
            Access::Protected => Modifiers::PROTECTED,
            Access::Package => Modifiers::NONE,
            Access::Private => Modifiers::PRIVATE,
        };
        if self.is_static {
            m = m | Modifiers::STATIC;
        }
        if self.is_abstract {
            m = m | Modifiers::ABSTRACT;
        }
        if self.is_final {
            m = m | Modifiers::FINAL;
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_file() {
        let file = HierarchyFile::from_json(
            r#"{
                "classes": [
                    { "name": "I", "interface": true,
                      "methods": [{ "name": "run", "signature": "()V", "access": "public", "abstract": true }] },
                    { "name": "A", "package": "p", "interfaces": ["I"],
                      "methods": [{ "name": "run", "signature": "()V", "access": "public" }] },
                    { "name": "B", "package": "p", "super": "A" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(file.options, BuildOptions::default());
        assert_eq!(file.classes.len(), 3);
        assert!(file.classes[0].is_interface);
        assert_eq!(
            file.classes[0].methods[0].modifiers(),
            Modifiers::PUBLIC | Modifiers::ABSTRACT
        );
        assert_eq!(file.classes[2].superclass.as_deref(), Some("A"));
        assert_eq!(
            file.classes[1],
            ClassDecl::class("A")
                .in_package("p")
                .implements("I")
                .method(MethodDecl::public("run", "()V"))
        );
    }

    #[test]
    fn access_defaults_to_package() {
        let m: MethodDecl = serde_json::from_str(r#"{ "name": "f", "signature": "()V" }"#).unwrap();
        assert_eq!(m.access, Access::Package);
        assert!(m.modifiers().is_package_private());
    }

    #[test]
    fn options_section_is_read() {
        let file = HierarchyFile::from_json(
            r#"{ "options": { "verbose": true, "materialize_mirandas": false }, "classes": [] }"#,
        )
        .unwrap();
        assert!(file.options.verbose);
        assert!(!file.options.materialize_mirandas);
    }

    #[test]
    fn rejects_unknown_access() {
        let err = HierarchyFile::from_json(
            r#"{ "classes": [{ "name": "A", "methods": [{ "name": "f", "signature": "()V", "access": "friend" }] }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }
}
