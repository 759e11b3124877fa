//! Manifest data source for the `Kafka` custom resource.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use strimzi_manifest_crd::{Kafka, KafkaSpec};

use crate::datasource::{MarshalYamlSnafu, RenderError, RenderedManifest};

/// Type name identifying this data source.
pub const TYPE_NAME: &str = "k8s_kafka_strimzi_io_kafka_v1beta2_manifest";

/// User configuration accepted by the Kafka manifest data source.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KafkaManifestConfig {
    /// Object metadata of the generated manifest.
    pub metadata: ManifestMetadata,

    /// The `spec` tree of the generated manifest. Validated against the CRD
    /// schema constraints while the configuration is deserialized.
    pub spec: KafkaSpec,
}

/// The subset of Kubernetes object metadata a manifest can be configured
/// with.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestMetadata {
    /// Name of the described resource.
    pub name: String,

    /// Namespace the resource is scoped to.
    pub namespace: String,

    /// Labels to attach to the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    /// Annotations to attach to the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

/// Renders the manifest for one Kafka cluster configuration.
///
/// The id is `<name>/<namespace>`. `apiVersion` and `kind` are constants of
/// the [`Kafka`] resource type and are always present in the output.
/// Configured fields are carried over unchanged, absent optional fields are
/// omitted from the document.
pub fn render(config: KafkaManifestConfig) -> Result<RenderedManifest, RenderError> {
    let KafkaManifestConfig { metadata, spec } = config;
    let id = format!("{}/{}", metadata.name, metadata.namespace);

    let kafka = Kafka {
        metadata: ObjectMeta {
            name: Some(metadata.name),
            namespace: Some(metadata.namespace),
            labels: metadata.labels,
            annotations: metadata.annotations,
            ..ObjectMeta::default()
        },
        spec,
    };
    let yaml = serde_yaml::to_string(&kafka).context(MarshalYamlSnafu)?;

    Ok(RenderedManifest { id, yaml })
}

#[cfg(test)]
mod test {
    use super::{render, KafkaManifestConfig};
    use strimzi_manifest_crd::Kafka;

    fn cluster_config() -> KafkaManifestConfig {
        serde_yaml::from_str(
            r#"
            metadata:
              name: my-cluster
              namespace: kafka
              labels:
                app.kubernetes.io/part-of: my-platform
            spec:
              kafka:
                replicas: 3
                listeners:
                  - name: plain
                    port: 9092
                    type: internal
                    tls: false
            "#,
        )
        .unwrap()
    }

    #[test]
    fn id_is_name_slash_namespace() {
        let manifest = render(cluster_config()).unwrap();
        assert_eq!(manifest.id, "my-cluster/kafka");
    }

    #[test]
    fn stamps_api_version_and_kind() {
        let manifest = render(cluster_config()).unwrap();
        assert!(
            manifest.yaml.contains("apiVersion: kafka.strimzi.io/v1beta2"),
            "{}",
            manifest.yaml
        );
        assert!(manifest.yaml.contains("kind: Kafka"), "{}", manifest.yaml);
    }

    #[test]
    fn carries_configured_fields_over_unchanged() {
        let manifest = render(cluster_config()).unwrap();

        let value: serde_yaml::Value = serde_yaml::from_str(&manifest.yaml).unwrap();
        assert_eq!(
            value["metadata"]["name"].as_str(),
            Some("my-cluster")
        );
        assert_eq!(value["metadata"]["namespace"].as_str(), Some("kafka"));
        assert_eq!(value["spec"]["kafka"]["replicas"].as_i64(), Some(3));

        let listener = &value["spec"]["kafka"]["listeners"][0];
        assert_eq!(listener["name"].as_str(), Some("plain"));
        assert_eq!(listener["port"].as_i64(), Some(9092));
        assert_eq!(listener["type"].as_str(), Some("internal"));
        assert_eq!(listener["tls"].as_bool(), Some(false));
    }

    #[test]
    fn round_trips_through_the_emitted_yaml() {
        let config = cluster_config();
        let manifest = render(config.clone()).unwrap();

        let reparsed: Kafka = serde_yaml::from_str(&manifest.yaml).unwrap();
        assert_eq!(reparsed.metadata.name.as_deref(), Some("my-cluster"));
        assert_eq!(reparsed.metadata.namespace.as_deref(), Some("kafka"));
        assert_eq!(
            reparsed
                .metadata
                .labels
                .as_ref()
                .and_then(|labels| labels.get("app.kubernetes.io/part-of"))
                .map(String::as_str),
            Some("my-platform")
        );
        assert_eq!(reparsed.spec, config.spec);
    }

    #[test]
    fn omits_fields_absent_from_the_configuration() {
        let manifest = render(cluster_config()).unwrap();
        for field in ["zookeeper", "entityOperator", "storage", "annotations", "null"] {
            assert!(
                !manifest.yaml.contains(field),
                "{field} should not appear in:\n{}",
                manifest.yaml
            );
        }
    }
}
