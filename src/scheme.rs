/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/scheme.rs
*
* This file implements the scheme: a process-wide table mapping a kind
* identifier to the `ApiResource` metadata a generic (de)serialization layer
* needs to encode and decode objects by kind.
*
* Architecture:
* - `Scheme` is an explicit registration table. Registering a root kind also
*   registers its `List` companion, so a single call covers both
*   `ClusterPermission` and `ClusterPermissionList`.
* - The process-wide instance `SCHEME` is a `LazyLock`: the registration
*   side effect runs exactly once, on first access. Thread-safety of that
*   initialization belongs to `LazyLock`, not this code.
* - Duplicate registrations and unknown lookups are typed errors rather
*   than panics, so callers embedding the scheme elsewhere can react.
*
* SPDX-License-Identifier: Apache-2.0
*/

use std::collections::BTreeMap;
use std::sync::LazyLock;

use kube::api::ApiResource;
use kube::Resource;
use thiserror::Error;

use crate::crd::ClusterPermission;

#[derive(Error, Debug)]
pub enum SchemeError {
    #[error("kind '{0}' is already registered in the scheme")]
    AlreadyRegistered(String),

    #[error("kind '{0}' is not registered in the scheme")]
    UnknownKind(String),
}

/// A registry of API kinds known to this process.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    kinds: BTreeMap<String, ApiResource>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a single kind. Registering the same kind twice is an error.
    pub fn register(&mut self, resource: ApiResource) -> Result<(), SchemeError> {
        if self.kinds.contains_key(&resource.kind) {
            return Err(SchemeError::AlreadyRegistered(resource.kind));
        }
        self.kinds.insert(resource.kind.clone(), resource);
        Ok(())
    }

    /// Registers a root resource together with its `List` companion kind.
    pub fn register_root<K>(&mut self) -> Result<(), SchemeError>
    where
        K: Resource<DynamicType = ()>,
    {
        let root = ApiResource::erase::<K>(&());
        let list = ApiResource {
            group: root.group.clone(),
            version: root.version.clone(),
            api_version: root.api_version.clone(),
            kind: format!("{}List", root.kind),
            plural: root.plural.clone(),
        };
        self.register(root)?;
        self.register(list)
    }

    /// Resolves a kind identifier to its API metadata.
    pub fn resolve(&self, kind: &str) -> Result<&ApiResource, SchemeError> {
        self.kinds
            .get(kind)
            .ok_or_else(|| SchemeError::UnknownKind(kind.to_string()))
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// The registered kind identifiers, in sorted order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.kinds.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// The process-wide scheme, populated once on first access with the two
/// root kinds this crate defines.
pub static SCHEME: LazyLock<Scheme> = LazyLock::new(|| {
    let mut scheme = Scheme::new();
    scheme
        .register_root::<ClusterPermission>()
        .expect("registering ClusterPermission kinds into an empty scheme cannot collide");
    scheme
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_root_adds_both_kinds() {
        let mut scheme = Scheme::new();
        assert!(scheme.is_empty());

        scheme.register_root::<ClusterPermission>().unwrap();
        assert_eq!(scheme.len(), 2);
        assert!(scheme.contains("ClusterPermission"));
        assert!(scheme.contains("ClusterPermissionList"));
    }

    #[test]
    fn test_resolve_returns_api_metadata() {
        let mut scheme = Scheme::new();
        scheme.register_root::<ClusterPermission>().unwrap();

        let resource = scheme.resolve("ClusterPermission").unwrap();
        assert_eq!(resource.group, "rbac.open-cluster-management.io");
        assert_eq!(resource.version, "v1alpha1");
        assert_eq!(
            resource.api_version,
            "rbac.open-cluster-management.io/v1alpha1"
        );
        assert_eq!(resource.plural, "clusterpermissions");

        let list = scheme.resolve("ClusterPermissionList").unwrap();
        assert_eq!(list.api_version, resource.api_version);
        assert_eq!(list.kind, "ClusterPermissionList");
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut scheme = Scheme::new();
        scheme.register_root::<ClusterPermission>().unwrap();

        let err = scheme.register_root::<ClusterPermission>().unwrap_err();
        assert!(matches!(err, SchemeError::AlreadyRegistered(kind) if kind == "ClusterPermission"));
    }

    #[test]
    fn test_unknown_kind_fails() {
        let scheme = Scheme::new();
        let err = scheme.resolve("ClusterPermission").unwrap_err();
        assert!(matches!(err, SchemeError::UnknownKind(kind) if kind == "ClusterPermission"));
    }

    #[test]
    fn test_process_scheme_holds_exactly_the_root_kinds() {
        assert_eq!(SCHEME.len(), 2);
        let kinds: Vec<&str> = SCHEME.kinds().collect();
        assert_eq!(kinds, vec!["ClusterPermission", "ClusterPermissionList"]);
        assert!(SCHEME.resolve("ClusterPermission").is_ok());
        assert!(SCHEME.resolve("ClusterPermissionList").is_ok());
    }
}
