/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/crd.rs
*
* This file defines the Rust data structures for the `ClusterPermission`
* Custom Resource Definition (CRD). A `ClusterPermission` describes RBAC
* objects (ClusterRole, ClusterRoleBinding, Roles, RoleBindings) that a hub
* cluster provisions on a remote managed cluster.
*
* Architecture:
* - `ClusterPermissionSpec`, decorated with `#[derive(CustomResource)]`,
*   produces the top-level `ClusterPermission` API Kind. The `#[kube(...)]`
*   attribute carries the group/version/kind metadata and declares the
*   status subresource.
* - Every spec field is optional: an empty spec is a valid resource that
*   provisions nothing on the managed cluster.
* - `Role` and `RoleBinding` can target a namespace directly, through a
*   label selector, with both, or with neither. The types impose no
*   exclusivity; interpretation belongs to the controller.
* - Externally defined types (`PolicyRule`, `Subject`, `Condition`,
*   `LabelSelector`, `ListMeta`) come from `k8s-openapi` so that the wire
*   format matches the upstream Kubernetes API exactly.
* - `serde` attributes map between idiomatic Rust `snake_case` and
*   idiomatic Kubernetes `camelCase`.
* - `schemars` is leveraged to automatically generate an OpenAPI v3 schema
*   from the Rust types, which is embedded into the CRD manifest for
*   server-side validation.
*
* SPDX-License-Identifier: Apache-2.0
*/

use chrono::Utc;
use k8s_openapi::api::rbac::v1::{PolicyRule, Subject};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    Condition, LabelSelector, ListMeta, Time,
};
use kube::core::TypeMeta;
use kube::{CustomResource, Resource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Condition type recorded once the RBAC manifest work has been applied to
/// the managed cluster.
pub const CONDITION_TYPE_APPLIED_RBAC_MANIFEST_WORK: &str = "AppliedRBACManifestWork";

/// Condition type recording the outcome of spec validation.
pub const CONDITION_TYPE_VALIDATION: &str = "Validation";

// --- ClusterPermission Custom Resource Definition ---

/// The desired RBAC state to provision on a managed cluster. All fields are
/// optional; an empty spec provisions nothing.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq)]
#[kube(
    group = "rbac.open-cluster-management.io",
    version = "v1alpha1",
    kind = "ClusterPermission",
    plural = "clusterpermissions",
    namespaced,
    status = "ClusterPermissionStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterPermissionSpec {
    /// The ClusterRole to create on the managed cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_role: Option<ClusterRole>,

    /// The ClusterRoleBinding to create on the managed cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_role_binding: Option<ClusterRoleBinding>,

    /// The Roles to create on the managed cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,

    /// The RoleBindings to create on the managed cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_bindings: Option<Vec<RoleBinding>>,
}

/// A ClusterRole to be provisioned: an ordered list of policy rules. Rule
/// order is significant to the consumer evaluating the policy, not to this
/// schema.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRole {
    pub rules: Vec<PolicyRule>,
}

/// A ClusterRoleBinding granting a subject the permissions of a referenced
/// role, cluster-wide.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRoleBinding {
    /// The identity being granted access.
    pub subject: Subject,

    /// The role to bind. When absent, the controller binds the spec's own
    /// ClusterRole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_ref: Option<RoleRef>,
}

/// A namespaced Role to be provisioned. The target is either a single
/// namespace, a set of namespaces matched by a label selector, or both.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// The namespace to apply the rules to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// A selector matching the set of namespaces to apply the rules to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_selector: Option<LabelSelector>,

    pub rules: Vec<PolicyRule>,
}

/// A RoleBinding granting a subject the permissions of a referenced role
/// within the targeted namespace(s).
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleBinding {
    /// The namespace to create the binding in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// A selector matching the set of namespaces to create the binding in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_selector: Option<LabelSelector>,

    /// The identity being granted access.
    pub subject: Subject,

    /// The role to bind.
    pub role_ref: RoleRef,
}

/// Identifies an existing role resource by kind and name. No referential
/// integrity is enforced at this layer.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    /// "Role" or "ClusterRole".
    pub kind: String,

    /// The name of the referenced role. Always present on the wire; an
    /// absent name decodes to the empty string.
    #[serde(default)]
    pub name: String,
}

/// The observed state of a ClusterPermission, written by the controller.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterPermissionStatus {
    /// Observed conditions, keyed by condition type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl ClusterPermissionSpec {
    /// True when every optional field is absent, i.e. the resource
    /// provisions nothing.
    pub fn is_empty(&self) -> bool {
        self.cluster_role.is_none()
            && self.cluster_role_binding.is_none()
            && self.roles.is_none()
            && self.role_bindings.is_none()
    }
}

impl ClusterPermissionStatus {
    /// Looks up a condition by its type.
    pub fn condition(&self, condition_type: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.type_ == condition_type)
    }

    /// Upserts a condition, keyed by type. When the replaced condition has
    /// the same status value, the previous `lastTransitionTime` is kept so
    /// the transition timestamp only moves on actual transitions.
    pub fn set_condition(&mut self, condition: Condition) {
        match self
            .conditions
            .iter_mut()
            .find(|c| c.type_ == condition.type_)
        {
            Some(existing) => {
                let unchanged = existing.status == condition.status;
                let previous_transition = existing.last_transition_time.clone();
                *existing = condition;
                if unchanged {
                    existing.last_transition_time = previous_transition;
                }
            }
            None => self.conditions.push(condition),
        }
    }
}

/// Builds a condition stamped with the current UTC time.
pub fn new_condition(
    condition_type: &str,
    status: &str,
    reason: &str,
    message: &str,
) -> Condition {
    Condition {
        type_: condition_type.to_string(),
        status: status.to_string(),
        reason: reason.to_string(),
        message: message.to_string(),
        last_transition_time: Time(Utc::now()),
        observed_generation: None,
    }
}

// --- ClusterPermissionList ---

/// A list of ClusterPermission resources, as returned by bulk retrieval.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ClusterPermissionList {
    #[serde(flatten)]
    pub types: TypeMeta,
    pub metadata: ListMeta,
    pub items: Vec<ClusterPermission>,
}

impl ClusterPermissionList {
    /// Builds a list with its apiVersion/kind stamped from the registered
    /// root kind.
    pub fn new(items: Vec<ClusterPermission>) -> Self {
        Self {
            types: TypeMeta {
                api_version: ClusterPermission::api_version(&()).into_owned(),
                kind: format!("{}List", ClusterPermission::kind(&())),
            },
            metadata: ListMeta::default(),
            items,
        }
    }
}
