// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Build configuration.

use serde::{Deserialize, Serialize};

/// Flags that select between the runtime's table-building policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Give every declared virtual method its own trailing slot instead of
    /// reusing equivalent parent slots.
    pub verbose: bool,
    /// Let a private instance method satisfy an interface slot.
    pub allow_private_interface_resolution: bool,
    /// Append mirandas to the end of the vtable.
    pub materialize_mirandas: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            allow_private_interface_resolution: false,
            materialize_mirandas: true,
        }
    }
}

impl BuildOptions {
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_private_interface_resolution(mut self, allow: bool) -> Self {
        self.allow_private_interface_resolution = allow;
        self
    }

    pub fn with_materialized_mirandas(mut self, materialize: bool) -> Self {
        self.materialize_mirandas = materialize;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let opts: BuildOptions = serde_json::from_str(r#"{ "verbose": true }"#).unwrap();
        assert!(opts.verbose);
        assert!(!opts.allow_private_interface_resolution);
        assert!(opts.materialize_mirandas);
    }

    #[test]
    fn setters_chain() {
        let opts = BuildOptions::default()
            .with_verbose(true)
            .with_private_interface_resolution(true)
            .with_materialized_mirandas(false);
        assert_eq!(
            opts,
            BuildOptions {
                verbose: true,
                allow_private_interface_resolution: true,
                materialize_mirandas: false,
            }
        );
    }
}
