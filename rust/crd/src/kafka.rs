//! The `Kafka` custom resource and the broker cluster sub-tree of its spec.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ResourceRequirements;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    common::{CertSecretSource, JvmOptions, Logging, MetricsConfig, Probe},
    components::{CertificateAuthority, CruiseControlSpec, KafkaExporterSpec},
    entity_operator::EntityOperatorSpec,
    listener::GenericKafkaListener,
    storage::KafkaStorage,
    zookeeper::ZookeeperClusterSpec,
};

/// A `Kafka` resource describes a Kafka cluster deployment managed by the
/// Strimzi cluster operator: the broker configuration, the listeners
/// exposing it, and the supporting components deployed next to it.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[kube(
    group = "kafka.strimzi.io",
    version = "v1beta2",
    kind = "Kafka",
    plural = "kafkas",
    shortname = "k",
    namespaced,
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct KafkaSpec {
    /// Configuration of the Kafka cluster.
    pub kafka: KafkaClusterSpec,

    /// Configuration of the ZooKeeper cluster. Required for ZooKeeper-based
    /// clusters, unused in KRaft mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zookeeper: Option<ZookeeperClusterSpec>,

    /// Configuration of the Entity Operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_operator: Option<EntityOperatorSpec>,

    /// Configuration for Cruise Control deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cruise_control: Option<CruiseControlSpec>,

    /// Configuration of the Kafka Exporter. When specified, the Kafka
    /// Exporter is deployed to extract additional consumer lag metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kafka_exporter: Option<KafkaExporterSpec>,

    /// Configuration of the cluster certificate authority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_ca: Option<CertificateAuthority>,

    /// Configuration of the clients certificate authority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients_ca: Option<CertificateAuthority>,

    /// A list of time windows for maintenance tasks such as certificates
    /// renewal. Each time window is defined by a cron expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_time_windows: Option<Vec<String>>,
}

/// Configuration of the Kafka broker cluster.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KafkaClusterSpec {
    /// The Kafka broker version. Defaults to the latest version supported by
    /// the cluster operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Added to the brokers' `metadata.version` configuration and used in
    /// KRaft mode. Defaults to the metadata version of the selected Kafka
    /// version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_version: Option<String>,

    /// The number of pods in the cluster. Required when node pools are not
    /// used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub replicas: Option<i32>,

    /// The container image used for Kafka pods. Overriding this value is
    /// only recommended in special situations such as air-gapped
    /// environments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Configures listeners to provide access to Kafka brokers.
    #[schemars(length(min = 1))]
    pub listeners: Vec<GenericKafkaListener>,

    /// Kafka broker config properties with the following prefixes cannot be
    /// set: listeners, advertised., broker., listener., host.name, port,
    /// inter.broker.listener.name, sasl., ssl., security.,
    /// password., log.dir, zookeeper.connect, zookeeper.set.acl,
    /// authorizer., super.user (with the exception of a curated list of
    /// ssl and cruise control properties).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, serde_json::Value>>,

    /// Storage configuration (disk). Cannot be updated. Required when node
    /// pools are not used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<KafkaStorage>,

    /// Authorization configuration for Kafka brokers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<KafkaAuthorization>,

    /// Configuration of the broker rack awareness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack: Option<Rack>,

    /// The image of the init container used for initializing the
    /// `broker.rack`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_rack_init_image: Option<String>,

    /// CPU and memory resources to reserve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// JVM Options for pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_options: Option<JvmOptions>,

    /// Metrics configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_config: Option<MetricsConfig>,

    /// Logging configuration for Kafka.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,

    /// Pod readiness checking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,

    /// Pod liveness checking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,
}

/// Authorization configuration for Kafka brokers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(tag = "type")]
pub enum KafkaAuthorization {
    /// Simple authorization backed by the `StandardAuthorizer` built into
    /// Kafka.
    #[serde(rename = "simple", rename_all = "camelCase")]
    Simple {
        /// List of super users, who are able to perform all operations
        /// regardless of any configured ACLs.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        super_users: Option<Vec<String>>,
    },

    /// Authorization delegated to an Open Policy Agent server.
    #[serde(rename = "opa", rename_all = "camelCase")]
    Opa {
        /// The URL used to connect to the Open Policy Agent server. The URL
        /// has to include the policy which will be queried by the
        /// authorizer. This is a required option.
        url: String,

        /// Defines whether a Kafka client should be allowed or denied by
        /// default when the authorizer fails to query the Open Policy Agent.
        /// Defaults to false.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        allow_on_error: Option<bool>,

        /// Initial capacity of the local cache used by the authorizer to
        /// avoid querying the Open Policy Agent for every request. Defaults
        /// to 5000.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initial_cache_capacity: Option<i32>,

        /// Maximum capacity of the local cache used by the authorizer.
        /// Defaults to 50000.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maximum_cache_size: Option<i32>,

        /// The expiration of the records kept in the local cache to avoid
        /// querying the Open Policy Agent for every request. Defines how
        /// often the cached authorization decisions are reloaded from the
        /// Open Policy Agent server. In milliseconds. Defaults to 3600000.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expire_after_ms: Option<i64>,

        /// List of super users, who are able to perform all operations
        /// regardless of any configured ACLs.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        super_users: Option<Vec<String>>,
    },

    /// Authorization backed by Keycloak Authorization Services.
    #[serde(rename = "keycloak", rename_all = "camelCase")]
    Keycloak {
        /// OAuth Client ID which the Kafka client can use to authenticate
        /// against the OAuth server.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_id: Option<String>,

        /// Authorization server token endpoint URI.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token_endpoint_uri: Option<String>,

        /// Whether authorization decision should be delegated to the
        /// 'Simple' authorizer if DENIED by Keycloak Authorization Services
        /// policies. Default value is false.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delegate_to_kafka_acls: Option<bool>,

        /// Trusted certificates for TLS connection to the OAuth server.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tls_trusted_certificates: Option<Vec<CertSecretSource>>,

        /// List of super users, who are able to perform all operations
        /// regardless of any configured ACLs.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        super_users: Option<Vec<String>>,
    },

    /// Authorization implemented by a user-provided authorizer class.
    #[serde(rename = "custom", rename_all = "camelCase")]
    Custom {
        /// Authorization implementation class, which must be available in
        /// classpath.
        authorizer_class: String,

        /// Whether the custom authorizer supports the APIs for managing
        /// ACLs using the Kafka Admin API. Defaults to false.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        supports_admin_api: Option<bool>,

        /// List of super users, who are able to perform all operations
        /// regardless of any configured ACLs.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        super_users: Option<Vec<String>>,
    },
}

/// Configuration of the broker rack awareness.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rack {
    /// A key that matches labels assigned to the Kubernetes cluster nodes.
    /// The value of the label is used to set a broker's `broker.rack` config.
    pub topology_key: String,
}

#[cfg(test)]
mod test {
    use crate::{
        kafka::{Kafka, KafkaAuthorization, KafkaClusterSpec, KafkaSpec},
        listener::KafkaListenerType,
        storage::{KafkaStorage, PersistentClaimStorage, SingleVolumeStorage},
    };

    #[test]
    fn deserializes_a_full_cluster_definition() {
        let input = r#"
        apiVersion: kafka.strimzi.io/v1beta2
        kind: Kafka
        metadata:
          name: my-cluster
          namespace: kafka
        spec:
          kafka:
            version: 3.7.0
            replicas: 3
            listeners:
              - name: plain
                port: 9092
                type: internal
                tls: false
              - name: tls
                port: 9093
                type: internal
                tls: true
                authentication:
                  type: tls
            config:
              offsets.topic.replication.factor: 3
              default.replication.factor: 3
              min.insync.replicas: 2
            storage:
              type: jbod
              volumes:
                - type: persistent-claim
                  id: 0
                  size: 100Gi
                  deleteClaim: false
            authorization:
              type: simple
              superUsers:
                - CN=admin
          zookeeper:
            replicas: 3
            storage:
              type: persistent-claim
              size: 10Gi
          entityOperator:
            topicOperator: {}
            userOperator: {}
        "#;
        let kafka: Kafka = serde_yaml::from_str(input).unwrap();

        let cluster = &kafka.spec.kafka;
        assert_eq!(cluster.version.as_deref(), Some("3.7.0"));
        assert_eq!(cluster.replicas, Some(3));
        assert_eq!(cluster.listeners.len(), 2);
        assert_eq!(&*cluster.listeners[0].name, "plain");
        assert_eq!(cluster.listeners[1].listener_type, KafkaListenerType::Internal);
        assert!(cluster.listeners[1].tls);
        assert_eq!(
            cluster.authorization,
            Some(KafkaAuthorization::Simple {
                super_users: Some(vec!["CN=admin".to_string()]),
            })
        );
        assert!(matches!(
            cluster.storage,
            Some(KafkaStorage::Jbod(_))
        ));

        let zookeeper = kafka.spec.zookeeper.as_ref().unwrap();
        assert_eq!(zookeeper.replicas, 3);
        assert_eq!(
            zookeeper.storage,
            SingleVolumeStorage::PersistentClaim(PersistentClaimStorage {
                size: "10Gi".to_string(),
                class: None,
                selector: None,
                delete_claim: None,
                overrides: None,
                id: None,
            })
        );

        let entity_operator = kafka.spec.entity_operator.as_ref().unwrap();
        assert!(entity_operator.topic_operator.is_some());
        assert!(entity_operator.user_operator.is_some());
        assert!(entity_operator.tls_sidecar.is_none());
    }

    #[test]
    fn spec_requires_the_kafka_block() {
        let input = r#"
        zookeeper:
          replicas: 3
          storage:
            type: ephemeral
        "#;
        serde_yaml::from_str::<KafkaSpec>(input)
            .expect_err("a spec without the kafka block should be rejected");
    }

    #[test]
    fn rejects_invalid_listener_names_during_deserialization() {
        let input = r#"
        listeners:
          - name: external-tls
            port: 9094
            type: nodeport
            tls: true
        "#;
        serde_yaml::from_str::<KafkaClusterSpec>(input)
            .expect_err("listener names with dashes should be rejected");
    }

    #[test]
    fn generates_the_crd_for_the_expected_group_and_version() {
        use kube::CustomResourceExt;

        let crd = Kafka::crd();
        assert_eq!(crd.spec.group, "kafka.strimzi.io");
        assert_eq!(crd.spec.names.kind, "Kafka");
        assert_eq!(crd.spec.versions.len(), 1);
        assert_eq!(crd.spec.versions[0].name, "v1beta2");
    }
}
