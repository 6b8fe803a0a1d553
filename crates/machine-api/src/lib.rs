//! The multi-version `Machine` custom resource.
//!
//! `v1beta1` is the canonical (stored) version and the conversion hub;
//! `v1alpha2` is a deprecated spoke version that is still served. The
//! [`review`] module contains the `ConversionReview` entry point a webhook
//! server wires up for this kind.

mod conversion;

pub mod review;
pub mod v1alpha2;
pub mod v1beta1;
