//! Configuration of the Entity Operator, which manages topics and users
//! inside the Kafka cluster.

use k8s_openapi::api::core::v1::ResourceRequirements;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{JvmOptions, Logging, Probe};

/// Configuration of the Entity Operator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityOperatorSpec {
    /// Configuration of the Topic Operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_operator: Option<EntityTopicOperatorSpec>,

    /// Configuration of the User Operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_operator: Option<EntityUserOperatorSpec>,

    /// TLS sidecar configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_sidecar: Option<TlsSidecar>,
}

/// Configuration of the Topic Operator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityTopicOperatorSpec {
    /// The namespace the Topic Operator should watch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watched_namespace: Option<String>,

    /// The image to use for the Topic Operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Interval between periodic reconciliations in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub reconciliation_interval_seconds: Option<i32>,

    /// Timeout for the ZooKeeper session in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub zookeeper_session_timeout_seconds: Option<i32>,

    /// The number of attempts at getting topic metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub topic_metadata_max_attempts: Option<i32>,

    /// CPU and memory resources to reserve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Logging configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,

    /// JVM Options for pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_options: Option<JvmOptions>,

    /// Pod readiness checking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,

    /// Pod liveness checking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,
}

/// Configuration of the User Operator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityUserOperatorSpec {
    /// The namespace the User Operator should watch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watched_namespace: Option<String>,

    /// The image to use for the User Operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Interval between periodic reconciliations in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub reconciliation_interval_seconds: Option<i32>,

    /// The prefix that will be added to the KafkaUser name to be used as the
    /// Secret name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_prefix: Option<String>,

    /// CPU and memory resources to reserve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Logging configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,

    /// JVM Options for pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_options: Option<JvmOptions>,
}

/// TLS sidecar container deployed next to the Entity Operator to talk to
/// ZooKeeper over TLS.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TlsSidecar {
    /// The docker image for the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// CPU and memory resources to reserve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// The log level for the TLS sidecar. Default value is `notice`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<TlsSidecarLogLevel>,

    /// Pod readiness checking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,

    /// Pod liveness checking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum TlsSidecarLogLevel {
    #[serde(rename = "emerg")]
    Emerg,
    #[serde(rename = "alert")]
    Alert,
    #[serde(rename = "crit")]
    Crit,
    #[serde(rename = "err")]
    Err,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "notice")]
    Notice,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "debug")]
    Debug,
}
