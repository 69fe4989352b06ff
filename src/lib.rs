/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/lib.rs
*
* Crate root for the ClusterPermission API. The crate exposes the typed
* schema for the `ClusterPermission` custom resource and the scheme that
* registers its kinds for generic (de)serialization. There is no controller
* logic here; reconciliation lives in the operator that consumes this API.
*
* SPDX-License-Identifier: Apache-2.0
*/

pub mod crd;
pub mod scheme;

pub use crd::{
    new_condition, ClusterPermission, ClusterPermissionList, ClusterPermissionSpec,
    ClusterPermissionStatus, ClusterRole, ClusterRoleBinding, Role, RoleBinding, RoleRef,
    CONDITION_TYPE_APPLIED_RBAC_MANIFEST_WORK, CONDITION_TYPE_VALIDATION,
};
pub use scheme::{Scheme, SchemeError, SCHEME};
