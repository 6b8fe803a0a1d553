//! Translation between `ConversionReview` messages and typed conversions.
//!
//! The webhook HTTP layer is not this crate's business. A per-kind entry
//! point hands the raw [`ConversionReview`] to [`handle`] together with a
//! function converting the request's objects; everything about unwrapping
//! the request, error mapping and answering with the request's UID lives
//! here.

use std::{error::Error as _, fmt::Write as _, str::FromStr};

use kube::core::{
    conversion::{ConversionRequest, ConversionResponse, ConversionReview},
    response::{Status, StatusSummary},
};
use serde::{Serialize, de::DeserializeOwned};
use snafu::{OptionExt, ResultExt, Snafu, ensure};

pub type Result<T, E = ConversionError> = std::result::Result<T, E>;

/// An `apiVersion` naming no served version of the kind under conversion.
#[derive(Debug, PartialEq, Eq, Snafu)]
#[snafu(display("\"{api_version}\" is not a served version of this kind"))]
pub struct UnknownApiVersion {
    pub api_version: String,
}

/// Everything that can abort the conversion of a review.
///
/// Undecodable restore payloads are deliberately absent: those degrade to
/// "nothing to restore" inside [`store::load`](crate::store::load) and never
/// surface here.
#[derive(Debug, Snafu)]
pub enum ConversionError {
    #[snafu(display("failed to parse the desired resource version \"{api_version}\""))]
    ParseDesiredVersion {
        source: UnknownApiVersion,
        api_version: String,
    },

    #[snafu(display("failed to parse the resource version of an object sent for conversion"))]
    ParseObjectVersion { source: UnknownApiVersion },

    #[snafu(display("the object sent for conversion has no \"{field}\" field"))]
    MissingObjectField { field: &'static str },

    #[snafu(display("the \"{field}\" field of the object sent for conversion is not a string"))]
    ObjectFieldNotString { field: &'static str },

    #[snafu(display(
        "asked to convert an object of kind \"{found}\", but can only convert objects of kind \"{expected}\""
    ))]
    WrongObjectKind {
        expected: &'static str,
        found: String,
    },

    #[snafu(display("failed to deserialize object of kind \"{kind}\""))]
    DeserializeObject {
        source: serde_json::Error,
        kind: &'static str,
    },

    #[snafu(display("failed to serialize converted object of kind \"{kind}\""))]
    SerializeObject {
        source: serde_json::Error,
        kind: &'static str,
    },
}

impl ConversionError {
    pub fn http_return_code(&self) -> u16 {
        match self {
            Self::ParseDesiredVersion { .. }
            | Self::ParseObjectVersion { .. }
            | Self::DeserializeObject { .. }
            | Self::SerializeObject { .. } => 500,
            Self::MissingObjectField { .. }
            | Self::ObjectFieldNotString { .. }
            | Self::WrongObjectKind { .. } => 400,
        }
    }

    /// The full source chain in one line, the form the API server relays to
    /// the user who sent the object.
    pub fn full_message(&self) -> String {
        let mut message = self.to_string();

        let mut source = self.source();
        while let Some(error) = source {
            write!(message, ": {error}").expect("writing to a String cannot fail");
            source = error.source();
        }

        message
    }
}

/// Answers a [`ConversionReview`] by running `convert_objects` over its
/// request.
///
/// Reviews without a request are answered with an invalid response right
/// away. Otherwise the response mirrors the request's UID and carries either
/// the converted objects or the failure [`Status`] derived from the
/// returned [`ConversionError`].
pub fn handle<F>(review: ConversionReview, convert_objects: F) -> ConversionResponse
where
    F: FnOnce(&ConversionRequest) -> Result<Vec<serde_json::Value>>,
{
    let request = match ConversionRequest::from_review(review) {
        Ok(request) => request,
        Err(error) => {
            return ConversionResponse::invalid(Status {
                status: Some(StatusSummary::Failure),
                code: 400,
                message: format!("the review contains no conversion request: {error}"),
                reason: "ConversionReview request missing".to_owned(),
                details: None,
                metadata: None,
            });
        }
    };

    let converted = convert_objects(&request);
    let response = ConversionResponse::for_request(request);

    match converted {
        Ok(objects) => response.success(objects),
        Err(error) => {
            let message = error.full_message();
            tracing::info!(%message, "refusing conversion");

            response.failure(Status {
                status: Some(StatusSummary::Failure),
                code: error.http_return_code(),
                message: message.clone(),
                reason: message,
                details: None,
                metadata: None,
            })
        }
    }
}

/// Parses the version the request wants all objects converted into.
pub fn desired_version<V>(request: &ConversionRequest) -> Result<V>
where
    V: FromStr<Err = UnknownApiVersion>,
{
    V::from_str(&request.desired_api_version).context(ParseDesiredVersionSnafu {
        api_version: request.desired_api_version.clone(),
    })
}

/// Parses the version a raw conversion object currently has, taken from its
/// `apiVersion` field.
pub fn object_version<V>(object: &serde_json::Value) -> Result<V>
where
    V: FromStr<Err = UnknownApiVersion>,
{
    let api_version = object_string_field(object, "apiVersion")?;
    V::from_str(api_version).context(ParseObjectVersionSnafu)
}

/// Ensures a raw conversion object declares the expected kind.
pub fn ensure_object_kind(object: &serde_json::Value, expected: &'static str) -> Result<()> {
    let found = object_string_field(object, "kind")?;
    ensure!(found == expected, WrongObjectKindSnafu { expected, found });

    Ok(())
}

/// Deserializes a raw conversion object into its typed representation.
///
/// The only hard failure mode of a conversion: the resulting error message
/// names the offending field path as reported by serde.
pub fn deserialize_object<T>(object: &serde_json::Value, kind: &'static str) -> Result<T>
where
    T: DeserializeOwned,
{
    ensure!(
        object.get("spec").is_some(),
        MissingObjectFieldSnafu { field: "spec" }
    );

    serde_json::from_value(object.clone()).context(DeserializeObjectSnafu { kind })
}

/// Serializes a converted object back into the raw form the response needs.
pub fn serialize_object<T>(object: &T, kind: &'static str) -> Result<serde_json::Value>
where
    T: Serialize,
{
    serde_json::to_value(object).context(SerializeObjectSnafu { kind })
}

fn object_string_field<'a>(
    object: &'a serde_json::Value,
    field: &'static str,
) -> Result<&'a str> {
    object
        .get(field)
        .context(MissingObjectFieldSnafu { field })?
        .as_str()
        .context(ObjectFieldNotStringSnafu { field })
}
