//! `Machine` `v1beta1`, the canonical version.

use hubspoke::Hub;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, CustomResource, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
#[kube(
    group = "infra.hubspoke.dev",
    version = "v1beta1",
    kind = "Machine",
    namespaced,
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct MachineSpec {
    /// Instance type to launch, for example `m5.large`.
    pub instance_type: String,

    /// Organization owning the images queried when looking up a machine
    /// image by name instead of by ID.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_lookup_org: String,

    /// Base operating system to restrict image lookup to, for example
    /// `amazon-linux`. Not part of v1alpha2.
    #[serde(
        default,
        rename = "imageLookupBaseOS",
        skip_serializing_if = "String::is_empty"
    )]
    pub image_lookup_base_os: String,

    /// Provider-assigned identifier, set once the machine exists.
    #[serde(default, rename = "providerID", skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,

    /// Bootstrap user data handling. Absent when the machine boots without
    /// user data, which is not the same as present-with-defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_init: Option<CloudInit>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudInit {
    /// Opts out of storing user data in the secrets manager and passes it to
    /// the instance in plain text instead. v1alpha2 expressed the same
    /// toggle with the opposite polarity (`enableSecureSecretsManager`).
    #[serde(default)]
    pub insecure_skip_secrets_manager: bool,

    /// Prefix of the secrets holding the chunked user data. Replaces
    /// v1alpha2's single `secretRef`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret_prefix: String,

    /// Number of chunks the user data was split into.
    #[serde(default)]
    pub secret_count: i32,
}

impl Hub for Machine {}
