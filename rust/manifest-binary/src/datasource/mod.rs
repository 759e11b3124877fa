//! Read-only manifest data sources.
//!
//! Each data source accepts user configuration for one custom resource kind
//! and produces the equivalent Kubernetes manifest as a YAML string, plus a
//! stable id derived from the resource coordinates. Rendering is a single
//! synchronous transformation with no side effects.

use snafu::Snafu;

pub mod kafka;

/// Type names of all manifest data sources compiled into this binary.
pub const TYPE_NAMES: &[&str] = &[kafka::TYPE_NAME];

#[derive(Debug, Snafu)]
pub enum RenderError {
    #[snafu(display("failed to marshal resource to YAML"))]
    MarshalYaml { source: serde_yaml::Error },
}

/// A rendered manifest: the computed id and the YAML document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedManifest {
    /// `<name>/<namespace>` of the described resource.
    pub id: String,

    /// The manifest serialized as YAML.
    pub yaml: String,
}
