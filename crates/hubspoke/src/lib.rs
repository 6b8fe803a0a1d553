//! Hub-and-spoke conversion between versions of Kubernetes custom resources.
//!
//! A resource kind served in multiple API versions keeps exactly one
//! canonical ("hub") version, the one the API server stores. Every other
//! served ("spoke") version is produced on the fly by a conversion webhook.
//! Because a spoke schema usually cannot express every hub field (and vice
//! versa), a naive conversion silently drops data on every round trip.
//!
//! This crate makes those round trips lossless. Field values one side cannot
//! express are captured into an opaque *restore payload*, stored in the
//! object's metadata annotations, and filled back in on the next conversion
//! in the opposite direction. Explicit, non-zero values on the inbound
//! object always beat values recovered from the payload; the payload only
//! fills gaps.
//!
//! ## Usage Guide
//!
//! Mark the canonical version's object with [`Hub`] and implement [`Spoke`]
//! for every other served version. The required methods declare the pure
//! field mappings plus which fields each side cannot express; the provided
//! [`Spoke::convert_from`] and [`Spoke::convert_to`] methods do the rest.
//! Never convert spoke-to-spoke, always route through the hub.
//!
//! The [`review`] module translates between [`ConversionReview`] messages
//! and typed conversions, so a webhook server only needs to hand the review
//! to a per-kind entry point.
//!
//! [`ConversionReview`]: kube::core::conversion::ConversionReview

mod convert;

pub mod payload;
pub mod review;
pub mod store;

pub use convert::*;
pub use payload::RestoredFields;
