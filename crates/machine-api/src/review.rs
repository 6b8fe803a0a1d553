//! `ConversionReview` entry point for the `Machine` kind.

use std::str::FromStr;

use hubspoke::{
    Spoke,
    review::{self, Result, UnknownApiVersion},
};
use kube::core::conversion::{ConversionRequest, ConversionResponse, ConversionReview};
use serde_json::Value;

use crate::{v1alpha2, v1beta1};

const KIND: &str = "Machine";

/// The versions of the `Machine` kind this webhook serves.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MachineVersion {
    V1Alpha2,
    V1Beta1,
}

impl MachineVersion {
    pub fn api_version(self) -> &'static str {
        match self {
            Self::V1Alpha2 => "infra.hubspoke.dev/v1alpha2",
            Self::V1Beta1 => "infra.hubspoke.dev/v1beta1",
        }
    }
}

impl FromStr for MachineVersion {
    type Err = UnknownApiVersion;

    fn from_str(api_version: &str) -> Result<Self, Self::Err> {
        match api_version {
            "infra.hubspoke.dev/v1alpha2" => Ok(Self::V1Alpha2),
            "infra.hubspoke.dev/v1beta1" => Ok(Self::V1Beta1),
            _ => Err(UnknownApiVersion {
                api_version: api_version.to_owned(),
            }),
        }
    }
}

/// Converts every object in the review into the desired version, routing
/// through the v1beta1 hub.
pub fn convert(review: ConversionReview) -> ConversionResponse {
    review::handle(review, try_convert)
}

fn try_convert(request: &ConversionRequest) -> Result<Vec<Value>> {
    let desired = review::desired_version(request)?;

    let mut converted = Vec::with_capacity(request.objects.len());
    for object in &request.objects {
        converted.push(convert_object(object, desired)?);
    }

    Ok(converted)
}

fn convert_object(object: &Value, desired: MachineVersion) -> Result<Value> {
    review::ensure_object_kind(object, KIND)?;
    let current: MachineVersion = review::object_version(object)?;

    let converted = match (current, desired) {
        (MachineVersion::V1Beta1, MachineVersion::V1Alpha2) => {
            let hub: v1beta1::Machine = review::deserialize_object(object, KIND)?;
            let mut spoke = v1alpha2::Machine::new("", v1alpha2::MachineSpec::default());
            spoke.convert_from(&hub);
            review::serialize_object(&spoke, KIND)?
        }
        (MachineVersion::V1Alpha2, MachineVersion::V1Beta1) => {
            let mut spoke: v1alpha2::Machine = review::deserialize_object(object, KIND)?;
            let mut hub = v1beta1::Machine::new("", v1beta1::MachineSpec::default());
            spoke.convert_to(&mut hub);
            review::serialize_object(&hub, KIND)?
        }
        // Already in the desired version, pass the object through untouched.
        _ => return Ok(object.clone()),
    };

    Ok(stamp_type_meta(converted, desired))
}

fn stamp_type_meta(mut object: Value, desired: MachineVersion) -> Value {
    object["apiVersion"] = Value::from(desired.api_version());
    object["kind"] = Value::from(KIND);
    object
}
