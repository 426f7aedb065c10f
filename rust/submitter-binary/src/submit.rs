//! The imperative submission path: one `create` call against the cluster,
//! result logged, no retries. Callers own any retry policy.

use databricks_pipelines_crd::resource_op::{Manifest, ResourceOp};
use kube::api::{Api, DynamicObject, PostParams};
use kube::{Client, ResourceExt};
use snafu::{ResultExt, Snafu};

#[derive(Snafu, Debug)]
pub enum SubmissionError {
    #[snafu(display("the {kind} manifest is not a valid Kubernetes object"))]
    InvalidManifest {
        source: serde_json::Error,
        kind: String,
    },

    #[snafu(display("failed to create the {kind} object [{name}]"))]
    CreateObject {
        source: kube::Error,
        kind: String,
        name: String,
    },
}

type Result<T, E = SubmissionError> = std::result::Result<T, E>;

pub async fn create_resource(
    client: Client,
    namespace: &str,
    op: &ResourceOp,
) -> Result<DynamicObject> {
    let object = to_dynamic_object(&op.manifest)?;
    let api: Api<DynamicObject> = Api::namespaced_with(client, namespace, &op.kind.api_resource());

    let created = api
        .create(&PostParams::default(), &object)
        .await
        .with_context(|_| CreateObjectSnafu {
            kind: op.manifest.kind.clone(),
            name: op.name().to_string(),
        })?;

    tracing::info!(
        kind = %op.manifest.kind,
        name = %created.name_any(),
        namespace,
        "created custom object"
    );
    Ok(created)
}

fn to_dynamic_object(manifest: &Manifest) -> Result<DynamicObject> {
    let value = serde_json::to_value(manifest).with_context(|_| InvalidManifestSnafu {
        kind: manifest.kind.clone(),
    })?;
    serde_json::from_value(value).with_context(|_| InvalidManifestSnafu {
        kind: manifest.kind.clone(),
    })
}

#[cfg(test)]
mod tests {
    use databricks_pipelines_crd::DatabricksKind;
    use serde_json::json;

    use super::*;

    #[test]
    fn manifest_converts_to_a_dynamic_object() {
        let op = ResourceOp::create(
            DatabricksKind::Run,
            "test-run",
            json!({
                "new_cluster": {"spark_version": "5.3.x-scala2.11", "num_workers": 10},
                "spark_jar_task": {"main_class_name": "com.databricks.ComputeModels"},
            }),
        )
        .unwrap();

        let object = to_dynamic_object(&op.manifest).unwrap();
        let types = object.types.as_ref().unwrap();
        assert_eq!(types.api_version, "databricks.microsoft.com/v1alpha1");
        assert_eq!(types.kind, "Run");
        assert_eq!(object.name_any(), "test-run");
        assert_eq!(
            object.data["spec"]["new_cluster"]["num_workers"],
            json!(10)
        );
    }

    #[test]
    fn delete_manifests_convert_without_a_spec() {
        let op = ResourceOp::delete(DatabricksKind::Dcluster, "test-cluster").unwrap();
        let object = to_dynamic_object(&op.manifest).unwrap();
        assert_eq!(object.data.get("spec"), None);
    }
}
