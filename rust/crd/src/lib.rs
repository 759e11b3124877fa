//! Typed model of the Strimzi `Kafka` custom resource (`kafka.strimzi.io/v1beta2`).
//!
//! The declarations mirror the upstream CRD schema: field names and
//! descriptions follow the OpenAPI properties, unions discriminated by the
//! CRD's `type` field are internally tagged enums, and string patterns are
//! enforced by `TryFrom<String>` newtypes so that invalid values are rejected
//! while the configuration is being deserialized, before any manifest is
//! rendered.

pub mod common;
pub mod components;
pub mod entity_operator;
pub mod kafka;
pub mod listener;
pub mod storage;
pub mod zookeeper;

pub use kafka::{Kafka, KafkaClusterSpec, KafkaSpec};
