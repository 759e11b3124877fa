//! Listener configuration providing access to the Kafka brokers.

use std::{collections::BTreeMap, fmt::Display, ops::Deref};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use snafu::Snafu;

use crate::common::{CertAndKeySecretSource, CertSecretSource};

/// Listener names are used both as Kafka listener identifiers and as
/// fragments of Kubernetes service names.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(try_from = "String", into = "String")]
pub struct ListenerName(String);

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum InvalidListenerName {
    #[snafu(display(
        "listener name contains illegal characters (allowed: lowercase letters and digits)"
    ))]
    IllegalCharacter,

    #[snafu(display("listener name must be between 1 and 11 characters long"))]
    InvalidLength,
}

impl TryFrom<String> for ListenerName {
    type Error = InvalidListenerName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() || value.len() > 11 {
            invalid_listener_name::InvalidLengthSnafu.fail()
        } else if value.contains(|chr: char| !chr.is_ascii_lowercase() && !chr.is_ascii_digit()) {
            invalid_listener_name::IllegalCharacterSnafu.fail()
        } else {
            Ok(ListenerName(value))
        }
    }
}

impl From<ListenerName> for String {
    fn from(value: ListenerName) -> Self {
        value.0
    }
}

impl Display for ListenerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for ListenerName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Configures a listener to provide access to Kafka brokers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenericKafkaListener {
    /// Name of the listener. The name will be used to identify the listener
    /// and the related Kubernetes objects. The name has to be unique within
    /// given a Kafka cluster.
    pub name: ListenerName,

    /// Port number used by the listener inside Kafka. The port number has to
    /// be unique within a given Kafka cluster. Allowed port numbers are 9092
    /// and higher with the exception of ports already used by Prometheus and
    /// JMX.
    #[schemars(range(min = 9092, max = 65535))]
    pub port: i32,

    /// Type of the listener, which defines how the listener is exposed
    /// inside or outside of the Kubernetes cluster.
    #[serde(rename = "type")]
    pub listener_type: KafkaListenerType,

    /// Enables TLS encryption on the listener. This is a required property.
    pub tls: bool,

    /// Authentication configuration for this listener.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<KafkaListenerAuthentication>,

    /// Additional listener configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<GenericKafkaListenerConfiguration>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum KafkaListenerType {
    /// Exposed only inside the Kubernetes cluster.
    #[serde(rename = "internal")]
    Internal,

    /// Exposed using OpenShift Routes and the default HAProxy router.
    #[serde(rename = "route")]
    Route,

    /// Exposed using a LoadBalancer-type Service.
    #[serde(rename = "loadbalancer")]
    Loadbalancer,

    /// Exposed using a NodePort-type Service.
    #[serde(rename = "nodeport")]
    NodePort,

    /// Exposed using Kubernetes Ingress and the NGINX Ingress Controller.
    #[serde(rename = "ingress")]
    Ingress,

    /// Exposed using a per-broker ClusterIP-type Service.
    #[serde(rename = "cluster-ip")]
    ClusterIp,
}

/// Authentication mechanism enabled on a listener.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(tag = "type")]
pub enum KafkaListenerAuthentication {
    /// Mutual TLS authentication using client certificates.
    #[serde(rename = "tls")]
    Tls {},

    /// SASL/SCRAM-SHA-512 authentication.
    #[serde(rename = "scram-sha-512")]
    ScramSha512 {},

    /// Token-based OAuth 2.0 authentication.
    #[serde(rename = "oauth", rename_all = "camelCase")]
    Oauth {
        /// OAuth Client ID which the Kafka broker can use to authenticate
        /// against the authorization server and use the introspect endpoint
        /// URI.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_id: Option<String>,

        /// URI of the token issuer used for authentication.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        valid_issuer_uri: Option<String>,

        /// URI of the JWKS certificate endpoint, which can be used for local
        /// JWT validation.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        jwks_endpoint_uri: Option<String>,

        /// URI of the token introspection endpoint which can be used to
        /// validate opaque non-JWT tokens.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        introspection_endpoint_uri: Option<String>,

        /// Name of the claim from the JWT authentication token which will be
        /// used as the user principal.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_name_claim: Option<String>,

        /// Enable or disable issuer checking. Default value is true.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        check_issuer: Option<bool>,

        /// Enable or disable the SASL/PLAIN mechanism carrying the access
        /// token. Default value is false.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enable_plain: Option<bool>,

        /// Trusted certificates for TLS connection to the OAuth server.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tls_trusted_certificates: Option<Vec<CertSecretSource>>,
    },

    /// Custom authentication using a user-provided implementation.
    #[serde(rename = "custom", rename_all = "camelCase")]
    Custom {
        /// Enable or disable SASL on this listener.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sasl: Option<bool>,

        /// Configuration to be used for a specific listener. All values are
        /// prefixed with `listener.name.<listener_name>`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        listener_config: Option<BTreeMap<String, serde_json::Value>>,
    },
}

/// Additional configuration of a listener: custom certificates, controller
/// classes and per-broker overrides of the exposed addresses.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenericKafkaListenerConfiguration {
    /// Reference to the Secret which holds the certificate and private key
    /// pair which will be used for this listener instead of the certificate
    /// signed by the clients CA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_cert_chain_and_key: Option<CertAndKeySecretSource>,

    /// Configures a specific class for Ingress and LoadBalancer that defines
    /// which controller will be used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Configures whether the Kubernetes service DNS domain should be used
    /// or not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_service_dns_domain: Option<bool>,

    /// The maximum number of connections we allow for this listener in the
    /// broker at any time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<i32>,

    /// The maximum connection creation rate we allow in this listener at any
    /// time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connection_creation_rate: Option<i32>,

    /// Bootstrap service configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<GenericKafkaListenerConfigurationBootstrap>,

    /// Per-broker configurations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brokers: Option<Vec<GenericKafkaListenerConfigurationBroker>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenericKafkaListenerConfigurationBootstrap {
    /// Additional alternative names for the bootstrap service. The
    /// alternative names will be added to the list of subject alternative
    /// names of the TLS certificates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_names: Option<Vec<String>>,

    /// The bootstrap host. This field will be used in the Ingress resource
    /// or in the Route resource to specify the desired hostname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Node port for the bootstrap service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_port: Option<i32>,

    /// The loadbalancer is requested with the IP address specified in this
    /// field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer_ip: Option<String>,

    /// Annotations that will be added to the Ingress, Route, or Service
    /// resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    /// Labels that will be added to the Ingress, Route, or Service resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenericKafkaListenerConfigurationBroker {
    /// ID of the kafka broker (broker identifier).
    pub broker: i32,

    /// The host name which will be used in the brokers' `advertised.listeners`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertised_host: Option<String>,

    /// The port number which will be used in the brokers' `advertised.listeners`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertised_port: Option<i32>,

    /// The broker host. This field will be used in the Ingress resource or
    /// in the Route resource to specify the desired hostname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Node port for the per-broker service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_port: Option<i32>,

    /// The loadbalancer is requested with the IP address specified in this
    /// field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer_ip: Option<String>,

    /// Annotations that will be added to the Ingress or Service resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    /// Labels that will be added to the Ingress or Service resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod test {
    use super::{GenericKafkaListener, KafkaListenerAuthentication, ListenerName};

    #[test]
    fn listener_name_accepts_lowercase_alphanumerics() {
        for input in ["plain", "tls", "external9094", "a"] {
            ListenerName::try_from(input.to_string())
                .unwrap_or_else(|_| panic!("{input} should be a valid listener name"));
        }
    }

    #[test]
    fn listener_name_rejects_illegal_values() {
        for input in ["", "external-tls", "PLAIN", "waytoolongname", "pl.ain"] {
            ListenerName::try_from(input.to_string())
                .expect_err(&format!("{input:?} should be rejected"));
        }
    }

    #[test]
    fn parses_listener_with_tagged_authentication() {
        let input = r#"
        name: external
        port: 9094
        type: nodeport
        tls: true
        authentication:
          type: scram-sha-512
        "#;
        let listener: GenericKafkaListener = serde_yaml::from_str(input).unwrap();
        assert_eq!(&*listener.name, "external");
        assert_eq!(
            listener.authentication,
            Some(KafkaListenerAuthentication::ScramSha512 {})
        );
    }
}
