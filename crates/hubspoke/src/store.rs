//! The restoration store.
//!
//! Restore payloads live in the object's metadata annotations, under one
//! reserved key per resource kind. Annotations are inert metadata: every
//! component that copies or persists the object carries them along verbatim,
//! which is exactly what lets a payload written while serving one version
//! survive until the object comes back in another. Nothing outside this
//! crate may interpret the value.

use std::collections::BTreeMap;

use crate::payload::{self, RestoredFields};

const ANNOTATION_DOMAIN: &str = "restored-fields.hubspoke.dev";

/// The annotation key reserved for `kind`'s restore payload.
///
/// Keys are scoped per kind so that objects carrying payloads of several
/// mechanisms (or owners embedding one kind in another) never collide.
pub fn annotation_key(kind: &str) -> String {
    format!("{ANNOTATION_DOMAIN}/{kind}", kind = kind.to_lowercase())
}

/// Loads the restore payload stored for `kind`.
///
/// This never fails: a missing payload simply means there is nothing to
/// restore, and an undecodable one (foreign mapping set, corruption) is
/// discarded so the conversion proceeds on the inbound record's explicit
/// fields alone.
pub fn load(annotations: &BTreeMap<String, String>, kind: &str) -> RestoredFields {
    let Some(value) = annotations.get(&annotation_key(kind)) else {
        return RestoredFields::new();
    };

    match payload::decode(value) {
        Ok(fields) => fields,
        Err(error) => {
            tracing::debug!(kind, %error, "discarding undecodable restore payload");
            RestoredFields::new()
        }
    }
}

/// Stores `fields` as `kind`'s restore payload, replacing any payload a
/// previous conversion left behind. Annotations belonging to other concerns
/// are not touched.
pub fn save(annotations: &mut BTreeMap<String, String>, kind: &str, fields: &RestoredFields) {
    annotations.insert(annotation_key(kind), payload::encode(fields));
}
