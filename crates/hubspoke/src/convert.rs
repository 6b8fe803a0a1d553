//! The conversion orchestrator.
//!
//! Conversions run per object and are synchronous: map the fields, fill the
//! gaps from the restore payload, capture the residual for the next trip.
//! Neither the mappers nor the store touch process-wide state, so converting
//! unrelated objects concurrently needs no coordination.

use kube::{Resource, ResourceExt};

use crate::{payload::RestoredFields, store};

/// Marker for the canonical version of a resource kind.
///
/// Every conversion routes through this version. Adding a served version
/// therefore adds one [`Spoke`] implementation instead of a quadratic number
/// of pairwise mappings.
pub trait Hub: Resource {}

/// A served, non-canonical version of a resource kind.
///
/// Implementors supply the pure field mappings between this version and the
/// hub, plus the residual/restore hooks naming the fields each side cannot
/// express. The provided [`convert_from`](Self::convert_from) and
/// [`convert_to`](Self::convert_to) methods sequence those pieces and manage
/// the restore payload in the object's side channel.
///
/// All methods must be total over structurally valid objects: a field the
/// destination cannot express maps to its zero value (it is the restore
/// payload's job to preserve it), never to an error.
pub trait Spoke: Resource + Sized {
    /// The canonical version this spoke converts to and from.
    type Hub: Hub;

    /// Kind name scoping this resource's restore payload in the side
    /// channel, see [`store::annotation_key`].
    const KIND: &'static str;

    /// Maps hub fields onto this version, rebuilding the spec wholesale.
    ///
    /// Boolean fields whose meaning flipped between the versions are
    /// inverted exactly once here and exactly once in
    /// [`map_to_hub`](Self::map_to_hub). Nested objects absent on the hub
    /// stay absent, they must not turn into zero-valued present objects.
    fn map_from_hub(src: &Self::Hub, dst: &mut Self);

    /// Maps this version's fields onto the hub, the mirror of
    /// [`map_from_hub`](Self::map_from_hub).
    fn map_to_hub(&self, dst: &mut Self::Hub);

    /// The non-zero hub fields this version's schema cannot express.
    fn hub_residual(hub: &Self::Hub) -> RestoredFields;

    /// Fills zero-valued hub fields from a restore payload. Explicit values
    /// already present on `hub` always win.
    fn restore_hub(hub: &mut Self::Hub, restored: &RestoredFields);

    /// The non-zero fields of this version the hub schema cannot express.
    fn spoke_residual(&self) -> RestoredFields;

    /// Fills zero-valued fields of this version from a restore payload.
    /// Explicit values already present on `self` always win.
    fn restore_spoke(&mut self, restored: &RestoredFields);

    /// Converts a hub object into this version.
    ///
    /// Hub fields this version cannot express are captured into the
    /// destination's restore payload; fields the hub could not supply are
    /// filled from the payload an earlier [`convert_to`](Self::convert_to)
    /// left behind.
    fn convert_from(&mut self, src: &Self::Hub) {
        // A payload already attached to this object wins over one carried in
        // the hub's metadata.
        let mut restored = store::load(self.annotations(), Self::KIND);
        *self.meta_mut() = src.meta().clone();
        if restored.is_empty() {
            restored = store::load(self.annotations(), Self::KIND);
        }

        Self::map_from_hub(src, self);
        self.restore_spoke(&restored);

        let residual = Self::hub_residual(src);
        if !residual.is_empty() {
            store::save(self.annotations_mut(), Self::KIND, &residual);
        }
    }

    /// Converts this object into its hub version.
    ///
    /// Fields of this version the hub cannot express are captured into this
    /// object's restore payload before the metadata is handed to the hub, so
    /// the stored record keeps the bridge for the next down-conversion. Hub
    /// fields this version could not supply are filled from the payload an
    /// earlier [`convert_from`](Self::convert_from) left behind.
    fn convert_to(&mut self, dst: &mut Self::Hub) {
        let restored = store::load(self.annotations(), Self::KIND);

        let residual = self.spoke_residual();
        if !residual.is_empty() {
            store::save(self.annotations_mut(), Self::KIND, &residual);
        }

        *dst.meta_mut() = self.meta().clone();
        self.map_to_hub(dst);
        Self::restore_hub(dst, &restored);
    }
}
