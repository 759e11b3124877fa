//! Supporting components deployed next to the Kafka cluster, and the
//! certificate authorities securing it.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ResourceRequirements;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{JvmOptions, Logging, MetricsConfig, Probe};

/// Configuration for Cruise Control deployment. Deploys a Cruise Control
/// instance when specified.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CruiseControlSpec {
    /// The container image used for Cruise Control pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// The Cruise Control configuration. Properties managed directly by the
    /// cluster operator (bootstrap.servers, security and capacity settings)
    /// cannot be set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, serde_json::Value>>,

    /// The Cruise Control `brokerCapacity` configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_capacity: Option<BrokerCapacity>,

    /// CPU and memory resources to reserve for the Cruise Control container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// JVM Options for the Cruise Control container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_options: Option<JvmOptions>,

    /// Logging configuration (Log4j 2) for Cruise Control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,

    /// Metrics configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_config: Option<MetricsConfig>,

    /// Pod readiness checking for the Cruise Control container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,

    /// Pod liveness checking for the Cruise Control container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,
}

/// Capacity limits Cruise Control assumes for each broker.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrokerCapacity {
    /// Broker capacity for disk in bytes. Use a number value with standard
    /// Kubernetes byte units suffix, for example `100Gi`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<String>,

    /// Broker capacity for CPU resource utilization as a percentage (0-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 100))]
    pub cpu_utilization: Option<i32>,

    /// Broker capacity for CPU resources in cores or millicores, for example
    /// `1`, `1.500` or `1500m`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,

    /// Broker capacity for inbound network throughput in bytes per second,
    /// for example `10000KiB/s`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_network: Option<String>,

    /// Broker capacity for outbound network throughput in bytes per second,
    /// for example `10000KiB/s`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbound_network: Option<String>,
}

/// Configuration of the Kafka Exporter. When specified, the Kafka Exporter
/// is deployed to extract additional consumer lag metrics.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KafkaExporterSpec {
    /// The container image used for the Kafka Exporter pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Regular expression to specify which consumer groups to collect.
    /// Default value is `.*`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_regex: Option<String>,

    /// Regular expression to specify which topics to collect.
    /// Default value is `.*`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_regex: Option<String>,

    /// Regular expression to specify which consumer groups to exclude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_exclude_regex: Option<String>,

    /// Regular expression to specify which topics to exclude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_exclude_regex: Option<String>,

    /// Only log messages with the given severity or above.
    /// Default log level is `info`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<ExporterLogLevel>,

    /// Enable Sarama logging, a Go client library used by the Kafka
    /// Exporter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_sarama_logging: Option<bool>,

    /// Whether show the offset/lag for all consumer group, otherwise, only
    /// show connected consumer groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_all_offsets: Option<bool>,

    /// CPU and memory resources to reserve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Pod readiness check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,

    /// Pod liveness check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum ExporterLogLevel {
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "trace")]
    Trace,
}

/// Configuration of how TLS certificates are used within the cluster,
/// applied to the cluster or the clients certificate authority.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAuthority {
    /// If true then Certificate Authority certificates will be generated
    /// automatically. Otherwise the user will need to provide a Secret with
    /// the CA certificate. Default is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_certificate_authority: Option<bool>,

    /// The number of days generated certificates should be valid for.
    /// The default is 365.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub validity_days: Option<i32>,

    /// The number of days in the certificate renewal period. This is the
    /// number of days before the a certificate expires during which renewal
    /// actions may be performed. The default is 30.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub renewal_days: Option<i32>,

    /// How should CA certificate expiration be handled when
    /// `generateCertificateAuthority=true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_expiration_policy: Option<CertificateExpirationPolicy>,

    /// If true, the Cluster and Client CA Secrets are configured with the
    /// ownerReference set to the Kafka resource. Default is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_secret_owner_reference: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum CertificateExpirationPolicy {
    /// A new CA certificate will be generated reusing the existing private
    /// key.
    #[serde(rename = "renew-certificate")]
    RenewCertificate,

    /// A new CA certificate and private key will be generated.
    #[serde(rename = "replace-key")]
    ReplaceKey,
}
