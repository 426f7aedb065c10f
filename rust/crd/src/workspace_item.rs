use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A notebook or directory imported into a Databricks workspace. `content`
/// carries the base64-encoded source, capped at 10 MB by the workspace API.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    group = "databricks.microsoft.com",
    version = "v1alpha1",
    kind = "WorkspaceItem",
    plural = "workspaceitems",
    status = "WorkspaceItemStatus",
    namespaced
)]
pub struct WorkspaceItemSpec {
    pub content: String,
    /// Absolute workspace path of the notebook or directory.
    pub path: String,
    /// Required when `format` is `SOURCE`, ignored otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// One of `SOURCE`, `HTML`, `JUPYTER`, `DBC` (case sensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct WorkspaceItemStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_info: Option<ObjectInfo>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct ObjectInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
}
