pub mod dcluster;
pub mod djob;
pub mod resource_op;
pub mod run;
pub mod secret_scope;
pub mod workspace_item;

use const_format::concatcp;
use kube::core::{ApiResource, GroupVersionKind};
use strum::{Display, EnumIter, EnumString};

pub const APP_NAME: &str = "databricks-pipelines";
pub const API_GROUP: &str = "databricks.microsoft.com";
pub const API_VERSION: &str = "v1alpha1";
pub const API_VERSION_FULL: &str = concatcp!(API_GROUP, '/', API_VERSION);

/// Namespace the Databricks operator watches in a default Kubeflow install.
pub const DEFAULT_NAMESPACE: &str = "kubeflow";

/// The custom resource kinds reconciled by the Azure Databricks operator.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
pub enum DatabricksKind {
    Dcluster,
    Djob,
    WorkspaceItem,
    SecretScope,
    Run,
}

/// Fixed per-kind data consumed by the resource-operation builder.
///
/// The success-condition strings and output-binding paths are matched
/// verbatim by the pipeline executor against the operator's status fields
/// and must not be reformatted.
pub struct KindConfig {
    pub kind: &'static str,
    pub plural: &'static str,
    /// Whether a create operation must carry a non-empty spec.
    pub requires_spec: bool,
    pub success_condition: Option<&'static str>,
    pub attribute_outputs: &'static [(&'static str, &'static str)],
}

const DCLUSTER_CONFIG: KindConfig = KindConfig {
    kind: "Dcluster",
    plural: "dclusters",
    requires_spec: true,
    success_condition: Some("status.cluster_info.cluster_id != "),
    attribute_outputs: &[
        ("name", "{.status.cluster_info.cluster_id}"),
        ("cluster_id", "{.status.cluster_info.cluster_id}"),
        ("cluster_name", "{.metadata.name}"),
    ],
};

const DJOB_CONFIG: KindConfig = KindConfig {
    kind: "Djob",
    plural: "djobs",
    requires_spec: true,
    success_condition: Some("status.job_status.job_id > 0"),
    attribute_outputs: &[
        ("name", "{.status.job_status.job_id}"),
        ("job_id", "{.status.job_status.job_id}"),
        ("job_name", "{.metadata.name}"),
    ],
};

const WORKSPACE_ITEM_CONFIG: KindConfig = KindConfig {
    kind: "WorkspaceItem",
    plural: "workspaceitems",
    requires_spec: false,
    success_condition: Some("status.object_hash"),
    attribute_outputs: &[
        ("name", "{.metadata.name}"),
        ("object_hash", "{.status.object_hash}"),
        ("object_language", "{.status.object_info.language}"),
        ("object_type", "{.status.object_info.object_type}"),
        ("object_path", "{.status.object_info.path}"),
    ],
};

// The truncated right-hand side is what the operator ships with; the
// executor treats it as a non-empty check.
const SECRET_SCOPE_CONFIG: KindConfig = KindConfig {
    kind: "SecretScope",
    plural: "secretscopes",
    requires_spec: false,
    success_condition: Some("status.secretscope.name !="),
    attribute_outputs: &[
        ("name", "{.metadata.name}"),
        ("secretscope_name", "{.status.secretscope.name}"),
        ("backend_type", "{.status.secretscope.backend_type}"),
    ],
};

// Runs are submitted imperatively and never awaited, so there is no
// condition to poll and nothing to extract.
const RUN_CONFIG: KindConfig = KindConfig {
    kind: "Run",
    plural: "runs",
    requires_spec: true,
    success_condition: None,
    attribute_outputs: &[],
};

impl DatabricksKind {
    pub fn config(&self) -> &'static KindConfig {
        match self {
            DatabricksKind::Dcluster => &DCLUSTER_CONFIG,
            DatabricksKind::Djob => &DJOB_CONFIG,
            DatabricksKind::WorkspaceItem => &WORKSPACE_ITEM_CONFIG,
            DatabricksKind::SecretScope => &SECRET_SCOPE_CONFIG,
            DatabricksKind::Run => &RUN_CONFIG,
        }
    }

    /// The `ApiResource` needed to address this kind through a dynamic API.
    pub fn api_resource(&self) -> ApiResource {
        let config = self.config();
        ApiResource::from_gvk_with_plural(
            &GroupVersionKind::gvk(API_GROUP, API_VERSION, config.kind),
            config.plural,
        )
    }
}
