//! Builds the declarative resource operations consumed by the pipeline
//! compiler: a manifest for the Databricks operator, the condition the
//! executor polls for, and the status paths it exposes to downstream steps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::{ensure, ResultExt, Snafu};
use strum::{Display, EnumString};

use crate::{DatabricksKind, API_VERSION_FULL};

#[derive(Snafu, Debug)]
pub enum ValidationError {
    #[snafu(display("resource name must not be empty"))]
    EmptyName,

    #[snafu(display("a create operation for kind {kind} requires a non-empty spec"))]
    MissingSpec { kind: DatabricksKind },

    #[snafu(display("failed to serialize the {kind} spec"))]
    SerializeSpec {
        source: serde_json::Error,
        kind: DatabricksKind,
    },
}

type Result<T, E = ValidationError> = std::result::Result<T, E>;

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceAction {
    Create,
    Delete,
}

/// The document applied to the cluster for one resource operation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub api_version: String,
    pub kind: String,
    pub metadata: ManifestMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<Value>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ManifestMetadata {
    pub name: String,
}

/// A fully validated resource operation.
///
/// For create operations the success condition and attribute outputs are
/// taken from the kind's fixed configuration; delete operations are
/// fire-and-forget and carry neither, nor a spec.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceOp {
    #[serde(skip)]
    pub kind: DatabricksKind,
    pub action: ResourceAction,
    pub manifest: Manifest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_condition: Option<&'static str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attribute_outputs: BTreeMap<&'static str, &'static str>,
}

impl ResourceOp {
    /// Builds the operation for the given action. The spec payload is
    /// attached verbatim on create and always dropped on delete.
    pub fn build(
        action: ResourceAction,
        kind: DatabricksKind,
        name: &str,
        spec: Option<Value>,
    ) -> Result<Self> {
        ensure!(!name.is_empty(), EmptyNameSnafu);

        let config = kind.config();
        let spec = match action {
            ResourceAction::Create => {
                let spec = spec.filter(|spec| !is_empty_document(spec));
                ensure!(spec.is_some() || !config.requires_spec, MissingSpecSnafu { kind });
                spec
            }
            ResourceAction::Delete => None,
        };

        let (success_condition, attribute_outputs) = match action {
            ResourceAction::Create => (
                config.success_condition,
                config.attribute_outputs.iter().copied().collect(),
            ),
            ResourceAction::Delete => (None, BTreeMap::new()),
        };

        Ok(ResourceOp {
            kind,
            action,
            manifest: Manifest {
                api_version: API_VERSION_FULL.to_string(),
                kind: config.kind.to_string(),
                metadata: ManifestMetadata {
                    name: name.to_string(),
                },
                spec,
            },
            success_condition,
            attribute_outputs,
        })
    }

    pub fn create(kind: DatabricksKind, name: &str, spec: Value) -> Result<Self> {
        Self::build(ResourceAction::Create, kind, name, Some(spec))
    }

    /// Like [`ResourceOp::create`], but takes one of the typed specs.
    pub fn create_with<S: Serialize>(kind: DatabricksKind, name: &str, spec: &S) -> Result<Self> {
        let spec = serde_json::to_value(spec).context(SerializeSpecSnafu { kind })?;
        Self::build(ResourceAction::Create, kind, name, Some(spec))
    }

    pub fn delete(kind: DatabricksKind, name: &str) -> Result<Self> {
        Self::build(ResourceAction::Delete, kind, name, None)
    }

    pub fn name(&self) -> &str {
        &self.manifest.metadata.name
    }
}

fn is_empty_document(spec: &Value) -> bool {
    match spec {
        Value::Null => true,
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn create_cluster_builds_the_expected_operation() {
        let spec = json!({"spark_version": "5.3.x-scala2.11", "num_workers": 2});
        let op = ResourceOp::create(DatabricksKind::Dcluster, "test-cluster", spec).unwrap();

        assert_eq!(
            serde_json::to_value(&op.manifest).unwrap(),
            json!({
                "apiVersion": "databricks.microsoft.com/v1alpha1",
                "kind": "Dcluster",
                "metadata": {"name": "test-cluster"},
                "spec": {"spark_version": "5.3.x-scala2.11", "num_workers": 2},
            })
        );
        assert_eq!(op.success_condition, Some("status.cluster_info.cluster_id != "));
        assert_eq!(
            op.attribute_outputs,
            BTreeMap::from([
                ("name", "{.status.cluster_info.cluster_id}"),
                ("cluster_id", "{.status.cluster_info.cluster_id}"),
                ("cluster_name", "{.metadata.name}"),
            ])
        );
    }

    #[test]
    fn delete_job_carries_neither_spec_nor_outputs() {
        let op = ResourceOp::build(
            ResourceAction::Delete,
            DatabricksKind::Djob,
            "test-job",
            Some(json!({"leftover": true})),
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&op.manifest).unwrap(),
            json!({
                "apiVersion": "databricks.microsoft.com/v1alpha1",
                "kind": "Djob",
                "metadata": {"name": "test-job"},
            })
        );
        assert_eq!(op.success_condition, None);
        assert!(op.attribute_outputs.is_empty());
    }

    #[rstest]
    #[case(ResourceAction::Create)]
    #[case(ResourceAction::Delete)]
    fn empty_names_are_rejected_for_every_kind(#[case] action: ResourceAction) {
        for kind in DatabricksKind::iter() {
            let result = ResourceOp::build(action, kind, "", Some(json!({"a": 1})));
            assert!(matches!(result, Err(ValidationError::EmptyName)));
        }
    }

    #[rstest]
    #[case(DatabricksKind::Dcluster, None)]
    #[case(DatabricksKind::Dcluster, Some(json!(null)))]
    #[case(DatabricksKind::Dcluster, Some(json!({})))]
    #[case(DatabricksKind::Djob, None)]
    #[case(DatabricksKind::Djob, Some(json!({})))]
    #[case(DatabricksKind::Run, None)]
    fn create_without_a_spec_is_rejected_where_required(
        #[case] kind: DatabricksKind,
        #[case] spec: Option<Value>,
    ) {
        let result = ResourceOp::build(ResourceAction::Create, kind, "some-name", spec);
        assert!(matches!(result, Err(ValidationError::MissingSpec { .. })));
    }

    #[test]
    fn workspace_item_and_secret_scope_create_without_a_spec() {
        for kind in [DatabricksKind::WorkspaceItem, DatabricksKind::SecretScope] {
            let op = ResourceOp::build(ResourceAction::Create, kind, "some-name", None).unwrap();
            assert_eq!(op.manifest.spec, None);
            assert!(op.success_condition.is_some());
        }
    }

    #[test]
    fn spec_payload_passes_through_untouched() {
        let spec = json!({
            "initial_manage_permission": "users",
            "secrets": [{"key": "string-secret", "string_value": "helloworld"}],
            "acls": [{"principal": "someone@example.com", "permission": "READ"}],
        });
        let op =
            ResourceOp::create(DatabricksKind::SecretScope, "test-secretscope", spec.clone())
                .unwrap();
        assert_eq!(op.manifest.spec, Some(spec));
    }

    #[test]
    fn serialized_op_uses_the_resource_template_field_names() {
        let op = ResourceOp::create(
            DatabricksKind::Djob,
            "test-job",
            json!({"timeout_seconds": 3600}),
        )
        .unwrap();
        let rendered = serde_json::to_value(&op).unwrap();

        assert_eq!(rendered["action"], json!("create"));
        assert_eq!(rendered["successCondition"], json!("status.job_status.job_id > 0"));
        assert_eq!(
            rendered["attributeOutputs"]["job_id"],
            json!("{.status.job_status.job_id}")
        );
        assert_eq!(rendered["manifest"]["apiVersion"], json!("databricks.microsoft.com/v1alpha1"));
    }
}
