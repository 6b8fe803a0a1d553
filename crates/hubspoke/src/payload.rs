//! Encoding of restore payloads.
//!
//! A restore payload is a partial snapshot of the fields of one schema
//! version that another version cannot express. It travels as a single
//! string value in the object's metadata, so it must be self-describing:
//! a payload written by an incompatible mapping set has to be detectable
//! (and discardable) instead of being misinterpreted.

use std::collections::BTreeMap;

use serde::Deserialize;
use snafu::{ResultExt, Snafu, ensure};

/// Field values captured for a later conversion, keyed by their serialized
/// (camelCase, dot-separated) field path, for example `cloudInit.secretRef`.
pub type RestoredFields = BTreeMap<String, serde_json::Value>;

/// Envelope format understood by this mapping set. Bump whenever the
/// envelope shape or the field path convention changes incompatibly.
pub const FORMAT: u16 = 1;

#[derive(Debug, Snafu)]
pub enum DecodeError {
    #[snafu(display("payload is not a restore field envelope"))]
    Malformed { source: serde_json::Error },

    #[snafu(display(
        "payload was written by an incompatible mapping set (envelope format {found}, supported {supported})"
    ))]
    SchemaSkew { found: u16, supported: u16 },
}

#[derive(Debug, Deserialize)]
struct Envelope {
    format: u16,
    fields: RestoredFields,
}

/// Encodes restored fields into the self-describing envelope stored in the
/// side channel.
pub fn encode(fields: &RestoredFields) -> String {
    serde_json::json!({ "format": FORMAT, "fields": fields }).to_string()
}

/// Decodes a restore payload written by [`encode`].
///
/// Fails with [`DecodeError::SchemaSkew`] when the payload was written by a
/// newer or older mapping set. Callers are expected to treat any error as
/// "no restore data available" rather than failing the conversion.
pub fn decode(payload: &str) -> Result<RestoredFields, DecodeError> {
    let envelope: Envelope = serde_json::from_str(payload).context(MalformedSnafu)?;
    ensure!(
        envelope.format == FORMAT,
        SchemaSkewSnafu {
            found: envelope.format,
            supported: FORMAT,
        }
    );

    Ok(envelope.fields)
}
