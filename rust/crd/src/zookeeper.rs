//! Configuration of the ZooKeeper ensemble deployed next to the Kafka
//! cluster.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ResourceRequirements;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    common::{JvmOptions, Logging, MetricsConfig, Probe},
    storage::SingleVolumeStorage,
};

/// Configuration of the ZooKeeper cluster.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZookeeperClusterSpec {
    /// The number of pods in the cluster.
    #[schemars(range(min = 1))]
    pub replicas: i32,

    /// Storage configuration (disk). Cannot be updated. JBOD storage is not
    /// supported for ZooKeeper.
    pub storage: SingleVolumeStorage,

    /// The container image used for ZooKeeper pods. Overriding this value is
    /// only recommended in special situations such as air-gapped
    /// environments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// The ZooKeeper broker config. Properties managed directly by the
    /// cluster operator (server., dataDir, clientPort, authentication and
    /// quorum settings) cannot be set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, serde_json::Value>>,

    /// CPU and memory resources to reserve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// JVM Options for pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_options: Option<JvmOptions>,

    /// Metrics configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_config: Option<MetricsConfig>,

    /// Logging configuration for ZooKeeper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,

    /// Pod readiness checking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,

    /// Pod liveness checking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,
}
