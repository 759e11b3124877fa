//! Storage configuration of the Kafka and ZooKeeper clusters.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Storage accepted by the Kafka cluster, including JBOD arrays built out of
/// several volumes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum KafkaStorage {
    Ephemeral(EphemeralStorage),
    PersistentClaim(PersistentClaimStorage),
    Jbod(JbodStorage),
}

/// Storage accepted where only a single volume is supported, such as the
/// ZooKeeper cluster or one entry of a JBOD array.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SingleVolumeStorage {
    Ephemeral(EphemeralStorage),
    PersistentClaim(PersistentClaimStorage),
}

/// Ephemeral storage uses the `emptyDir` volumes of the pods. The data is
/// lost when the pod is deleted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EphemeralStorage {
    /// When type=ephemeral, defines the total amount of local storage
    /// required for this EmptyDir volume (for example `2Gi`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<String>,

    /// Storage identification number. Mandatory for storage volumes defined
    /// in a storage of type `jbod`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub id: Option<i32>,
}

/// Persistent storage uses PersistentVolumeClaims to provision the volumes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersistentClaimStorage {
    /// When type=persistent-claim, defines the size of the persistent volume
    /// claim, such as `100Gi`.
    pub size: String,

    /// The storage class to use for dynamic volume allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Specifies a specific persistent volume to use. It contains key:value
    /// pairs representing labels for selecting such a volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<BTreeMap<String, String>>,

    /// Specifies if the persistent volume claim has to be deleted when the
    /// cluster is un-deployed. Default is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_claim: Option<bool>,

    /// Overrides for individual brokers. The `overrides` field allows
    /// specifying a different configuration for different brokers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Vec<PersistentClaimStorageOverride>>,

    /// Storage identification number. Mandatory for storage volumes defined
    /// in a storage of type `jbod`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub id: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersistentClaimStorageOverride {
    /// Id of the kafka broker (broker identifier).
    pub broker: i32,

    /// The storage class to use for dynamic volume allocation for this
    /// broker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// JBOD storage: a disk array made of several ephemeral or persistent
/// volumes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JbodStorage {
    /// List of volumes as Storage objects representing the JBOD disks array.
    #[schemars(length(min = 1))]
    pub volumes: Vec<SingleVolumeStorage>,
}

#[cfg(test)]
mod test {
    use super::{KafkaStorage, PersistentClaimStorage, SingleVolumeStorage};

    #[test]
    fn parses_jbod_with_mixed_volume_types() {
        let input = r#"
        type: jbod
        volumes:
          - type: persistent-claim
            id: 0
            size: 100Gi
            deleteClaim: false
          - type: ephemeral
            id: 1
            sizeLimit: 2Gi
        "#;
        let storage: KafkaStorage = serde_yaml::from_str(input).unwrap();
        let KafkaStorage::Jbod(jbod) = storage else {
            panic!("expected jbod storage");
        };
        assert_eq!(jbod.volumes.len(), 2);
        assert!(matches!(
            &jbod.volumes[0],
            SingleVolumeStorage::PersistentClaim(PersistentClaimStorage {
                size,
                id: Some(0),
                ..
            }) if size == "100Gi"
        ));
    }

    #[test]
    fn serializes_the_type_discriminator() {
        let storage = KafkaStorage::PersistentClaim(PersistentClaimStorage {
            size: "10Gi".to_string(),
            class: None,
            selector: None,
            delete_claim: Some(true),
            overrides: None,
            id: None,
        });
        let yaml = serde_yaml::to_string(&storage).unwrap();
        assert!(yaml.contains("type: persistent-claim"), "{yaml}");
        assert!(yaml.contains("deleteClaim: true"), "{yaml}");
        assert!(!yaml.contains("class"), "{yaml}");
    }
}
