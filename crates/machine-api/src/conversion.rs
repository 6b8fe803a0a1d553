//! Conversion between the served `Machine` versions.
//!
//! The field mappings between v1alpha2 and the v1beta1 hub, plus the
//! residual/restore hooks naming the fields only one of the two schemas can
//! express. Everything here is pure; the sequencing lives in the provided
//! [`Spoke`] methods.

use hubspoke::{RestoredFields, Spoke};
use serde_json::Value;

use crate::{v1alpha2, v1beta1};

// Restore payload field paths, matching the serialized field names.
const IMAGE_LOOKUP_BASE_OS: &str = "imageLookupBaseOS";
const SECRET_PREFIX: &str = "cloudInit.secretPrefix";
const SECRET_COUNT: &str = "cloudInit.secretCount";
const SECRET_REF: &str = "cloudInit.secretRef";

impl Spoke for v1alpha2::Machine {
    type Hub = v1beta1::Machine;

    const KIND: &'static str = "Machine";

    fn map_from_hub(src: &Self::Hub, dst: &mut Self) {
        dst.spec = v1alpha2::MachineSpec {
            instance_type: src.spec.instance_type.clone(),
            image_lookup_org: src.spec.image_lookup_org.clone(),
            provider_id: src.spec.provider_id.clone(),
            cloud_init: src
                .spec
                .cloud_init
                .as_ref()
                .map(|cloud_init| v1alpha2::CloudInit {
                    // Inverted exactly once per direction.
                    enable_secure_secrets_manager: !cloud_init.insecure_skip_secrets_manager,
                    // v1beta1 has no single secret reference anymore. The
                    // restore payload brings the old value back.
                    secret_ref: String::new(),
                }),
        };
    }

    fn map_to_hub(&self, dst: &mut Self::Hub) {
        dst.spec = v1beta1::MachineSpec {
            instance_type: self.spec.instance_type.clone(),
            image_lookup_org: self.spec.image_lookup_org.clone(),
            image_lookup_base_os: String::new(),
            provider_id: self.spec.provider_id.clone(),
            cloud_init: self
                .spec
                .cloud_init
                .as_ref()
                .map(|cloud_init| v1beta1::CloudInit {
                    insecure_skip_secrets_manager: !cloud_init.enable_secure_secrets_manager,
                    secret_prefix: String::new(),
                    secret_count: 0,
                }),
        };
    }

    fn hub_residual(hub: &Self::Hub) -> RestoredFields {
        let mut residual = RestoredFields::new();

        if !hub.spec.image_lookup_base_os.is_empty() {
            residual.insert(
                IMAGE_LOOKUP_BASE_OS.to_owned(),
                Value::from(hub.spec.image_lookup_base_os.clone()),
            );
        }

        if let Some(cloud_init) = &hub.spec.cloud_init {
            if !cloud_init.secret_prefix.is_empty() {
                residual.insert(
                    SECRET_PREFIX.to_owned(),
                    Value::from(cloud_init.secret_prefix.clone()),
                );
            }
            if cloud_init.secret_count != 0 {
                residual.insert(SECRET_COUNT.to_owned(), Value::from(cloud_init.secret_count));
            }
        }

        residual
    }

    fn restore_hub(hub: &mut Self::Hub, restored: &RestoredFields) {
        if hub.spec.image_lookup_base_os.is_empty() {
            if let Some(base_os) = restored.get(IMAGE_LOOKUP_BASE_OS).and_then(Value::as_str) {
                hub.spec.image_lookup_base_os = base_os.to_owned();
            }
        }

        if let Some(prefix) = restored.get(SECRET_PREFIX).and_then(Value::as_str) {
            let cloud_init = hub.spec.cloud_init.get_or_insert_default();
            if cloud_init.secret_prefix.is_empty() {
                cloud_init.secret_prefix = prefix.to_owned();
            }
        }

        if let Some(count) = restored.get(SECRET_COUNT).and_then(Value::as_i64) {
            let cloud_init = hub.spec.cloud_init.get_or_insert_default();
            if cloud_init.secret_count == 0 {
                cloud_init.secret_count = i32::try_from(count).unwrap_or_default();
            }
        }
    }

    fn spoke_residual(&self) -> RestoredFields {
        let mut residual = RestoredFields::new();

        if let Some(cloud_init) = &self.spec.cloud_init {
            if !cloud_init.secret_ref.is_empty() {
                residual.insert(
                    SECRET_REF.to_owned(),
                    Value::from(cloud_init.secret_ref.clone()),
                );
            }
        }

        residual
    }

    fn restore_spoke(&mut self, restored: &RestoredFields) {
        if let Some(secret_ref) = restored.get(SECRET_REF).and_then(Value::as_str) {
            let cloud_init = self.spec.cloud_init.get_or_insert_default();
            if cloud_init.secret_ref.is_empty() {
                cloud_init.secret_ref = secret_ref.to_owned();
            }
        }
    }
}
