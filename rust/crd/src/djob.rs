use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dcluster::DclusterSpec;

/// A scheduled or on-demand Databricks job. The spec mirrors the
/// `JobSettings` document of the Databricks Jobs REST API; runs reuse the
/// same payload types for their one-time submissions.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    group = "databricks.microsoft.com",
    version = "v1alpha1",
    kind = "Djob",
    plural = "djobs",
    status = "DjobStatus",
    namespaced
)]
pub struct DjobSpec {
    /// Cluster to run on; mutually exclusive with `existing_cluster_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_cluster: Option<DclusterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_cluster_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<Library>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_retry_interval_millis: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_on_timeout: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_runs: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<CronSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spark_jar_task: Option<SparkJarTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook_task: Option<NotebookTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spark_python_task: Option<SparkPythonTask>,
}

/// One library to install on the cluster before the job starts. Exactly one
/// field is expected to be set.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
pub struct Library {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maven: Option<MavenLibrary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pypi: Option<PypiLibrary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cran: Option<CranLibrary>,
}

#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct MavenLibrary {
    pub coordinates: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct PypiLibrary {
    pub package: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct CranLibrary {
    pub package: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct CronSchedule {
    pub quartz_cron_expression: String,
    pub timezone_id: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct SparkJarTask {
    pub main_class_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct NotebookTask {
    pub notebook_path: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub base_parameters: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct SparkPythonTask {
    pub python_file: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
pub struct DjobStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_status: Option<JobStatus>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct JobStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn deserializes_an_operator_manifest() {
        let manifest = indoc! {"
            apiVersion: databricks.microsoft.com/v1alpha1
            kind: Djob
            metadata:
              name: test-job
            spec:
              new_cluster:
                spark_version: 5.3.x-scala2.11
                node_type_id: Standard_D3_v2
                num_workers: 2
              libraries:
                - jar: dbfs:/my-jar.jar
                - maven:
                    coordinates: org.jsoup:jsoup:1.7.2
              timeout_seconds: 3600
              max_retries: 1
              schedule:
                quartz_cron_expression: 0 15 22 ? * *
                timezone_id: America/Los_Angeles
              spark_jar_task:
                main_class_name: com.databricks.ComputeModels
            status:
              job_status:
                job_id: 42
        "};

        let job: Djob = serde_yaml::from_str(manifest).unwrap();
        assert_eq!(job.spec.libraries.len(), 2);
        assert_eq!(job.spec.libraries[0].jar.as_deref(), Some("dbfs:/my-jar.jar"));
        assert_eq!(
            job.spec.libraries[1].maven.as_ref().unwrap().coordinates,
            "org.jsoup:jsoup:1.7.2"
        );
        assert_eq!(
            job.spec.new_cluster.as_ref().unwrap().spark_version,
            "5.3.x-scala2.11"
        );
        assert_eq!(
            job.status.as_ref().unwrap().job_status.as_ref().unwrap().job_id,
            Some(42)
        );
    }
}
