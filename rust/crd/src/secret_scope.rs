use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A Databricks secret scope with its initial secrets and ACLs. Secret
/// values are either inlined (string or base64 bytes) or pulled from a
/// Kubernetes Secret at reconcile time.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    group = "databricks.microsoft.com",
    version = "v1alpha1",
    kind = "SecretScope",
    plural = "secretscopes",
    status = "SecretScopeStatus",
    namespaced
)]
pub struct SecretScopeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_manage_permission: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<SecretScopeSecret>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acls: Vec<SecretScopeAcl>,
}

/// One secret in the scope. Exactly one of `string_value`, `byte_value`,
/// or `value_from` is expected to be set.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct SecretScopeSecret {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<SecretScopeValueFrom>,
}

#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct SecretScopeValueFrom {
    pub secret_key_ref: SecretKeyRef,
}

#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct SecretKeyRef {
    pub name: String,
    pub key: String,
}

#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct SecretScopeAcl {
    pub principal: String,
    /// One of `READ`, `WRITE`, `MANAGE`.
    pub permission: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct SecretScopeStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secretscope: Option<SecretScopeInfo>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct SecretScopeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_type: Option<String>,
}
