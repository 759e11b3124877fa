//! Types shared between several component sub-trees of the `Kafka` spec.

use std::{collections::BTreeMap, fmt::Display, ops::Deref};

use k8s_openapi::api::core::v1::ConfigMapKeySelector;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// Probe timings, mirroring the subset of the Kubernetes container probe
/// fields accepted by the CRD.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    /// The initial delay before first the health is first checked.
    /// Default to 15 seconds. Minimum value is 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub initial_delay_seconds: Option<i32>,

    /// The timeout for each attempted health check.
    /// Default to 5 seconds. Minimum value is 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub timeout_seconds: Option<i32>,

    /// How often (in seconds) to perform the probe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub period_seconds: Option<i32>,

    /// Minimum consecutive successes for the probe to be considered
    /// successful after having failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub success_threshold: Option<i32>,

    /// Minimum consecutive failures for the probe to be considered failed
    /// after having succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub failure_threshold: Option<i32>,
}

/// JVM heap sizes such as `512m`, `4G` or plain byte counts.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(try_from = "String", into = "String")]
pub struct JvmHeapSize(String);

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum InvalidJvmHeapSize {
    #[snafu(display("heap size must be a number optionally suffixed with m, M, g or G"))]
    InvalidFormat,
}

impl TryFrom<String> for JvmHeapSize {
    type Error = InvalidJvmHeapSize;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let digits = value
            .strip_suffix(&['m', 'M', 'g', 'G'][..])
            .unwrap_or(&value);
        if digits.is_empty() || digits.contains(|chr: char| !chr.is_ascii_digit()) {
            invalid_jvm_heap_size::InvalidFormatSnafu.fail()
        } else {
            Ok(JvmHeapSize(value))
        }
    }
}

impl From<JvmHeapSize> for String {
    fn from(value: JvmHeapSize) -> Self {
        value.0
    }
}

impl Display for JvmHeapSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for JvmHeapSize {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// JVM configuration of a component's pods.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JvmOptions {
    /// -Xms option to the JVM: the initial heap size.
    #[serde(rename = "-Xms", default, skip_serializing_if = "Option::is_none")]
    pub xms: Option<JvmHeapSize>,

    /// -Xmx option to the JVM: the maximum heap size.
    #[serde(rename = "-Xmx", default, skip_serializing_if = "Option::is_none")]
    pub xmx: Option<JvmHeapSize>,

    /// A map of -XX options to the JVM.
    #[serde(rename = "-XX", default, skip_serializing_if = "Option::is_none")]
    pub jvm_xx: Option<BTreeMap<String, String>>,

    /// Specifies whether the Garbage Collection logging is enabled.
    /// The default is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gc_logging_enabled: Option<bool>,

    /// A map of additional system properties which will be passed using the
    /// `-D` option to the JVM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_system_properties: Option<Vec<SystemProperty>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemProperty {
    /// The system property name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The system property value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Metrics configuration of a component.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(tag = "type")]
pub enum MetricsConfig {
    /// Prometheus JMX Exporter configuration, loaded from a ConfigMap.
    /// An empty referenced file enables all metrics with their default names.
    #[serde(rename = "jmxPrometheusExporter", rename_all = "camelCase")]
    JmxPrometheusExporter {
        /// ConfigMap entry where the metrics configuration is stored.
        value_from: ExternalConfigurationReference,
    },
}

/// Logging configuration of a component.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(tag = "type")]
pub enum Logging {
    /// Loggers and their levels configured inline.
    #[serde(rename = "inline")]
    Inline {
        /// A map from logger name to logger level.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        loggers: Option<BTreeMap<String, String>>,
    },

    /// Logging configuration provided by a ConfigMap.
    #[serde(rename = "external", rename_all = "camelCase")]
    External {
        /// ConfigMap entry where the logging configuration is stored.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value_from: Option<ExternalConfigurationReference>,
    },
}

/// Reference to a piece of configuration held outside the resource.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalConfigurationReference {
    /// Reference to the key in the ConfigMap containing the configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_key_ref: Option<ConfigMapKeySelector>,
}

/// Reference to a certificate stored in a Kubernetes Secret.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertSecretSource {
    /// The name of the Secret containing the certificate.
    pub secret_name: String,

    /// The name of the file certificate in the Secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
}

/// Reference to a certificate and the matching private key, both stored in
/// the same Kubernetes Secret.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertAndKeySecretSource {
    /// The name of the Secret containing the certificate.
    pub secret_name: String,

    /// The name of the file certificate in the Secret.
    pub certificate: String,

    /// The name of the private key in the Secret.
    pub key: String,
}

#[cfg(test)]
mod test {
    use super::JvmHeapSize;

    #[test]
    fn heap_size_accepts_plain_and_suffixed_values() {
        for input in ["1024", "512m", "4G", "2048M", "1g"] {
            JvmHeapSize::try_from(input.to_string())
                .unwrap_or_else(|_| panic!("{input} should be a valid heap size"));
        }
    }

    #[test]
    fn heap_size_rejects_malformed_values() {
        for input in ["", "m", "4Gi", "1.5G", "-512m", "12k"] {
            JvmHeapSize::try_from(input.to_string())
                .expect_err(&format!("{input:?} should be rejected"));
        }
    }
}
