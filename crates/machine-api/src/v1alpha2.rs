//! `Machine` `v1alpha2`, a deprecated spoke version that is still served.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, CustomResource, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
#[kube(
    group = "infra.hubspoke.dev",
    version = "v1alpha2",
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

    /// Provider-assigned identifier, set once the machine exists.
    #[serde(default, rename = "providerID", skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,

    /// Bootstrap user data handling. Absent when the machine boots without
    /// user data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_init: Option<CloudInit>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudInit {
    /// Stores user data in the secrets manager instead of passing it to the
    /// instance in plain text. v1beta1 renamed this to
    /// `insecureSkipSecretsManager` with the opposite polarity.
    #[serde(default)]
    pub enable_secure_secrets_manager: bool,

    /// Name of the single secret holding the user data. v1beta1 replaced
    /// this with a `secretPrefix`/`secretCount` pair.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret_ref: String,
}
