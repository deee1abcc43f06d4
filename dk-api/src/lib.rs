pub mod common;
pub mod conversion;
pub mod v1beta3;
pub mod v1beta4;
pub mod v1beta5;

use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use crate::conversion::{
    ConversionError,
    VersionedDynaKube,
};
pub use crate::v1beta5 as latest;

pub const GROUP: &str = "dynatrace.com";
pub const KIND: &str = "DynaKube";

// Fields that disappeared between two versions are parked in these annotations while the object
// is stored in the newer version, so converting back down restores them
pub const REMOVED_AUTO_UPDATE_ANNOTATION_KEY: &str = "internal.operator.dynatrace.com/auto-update";
pub const REMOVED_USE_CSI_DRIVER_ANNOTATION_KEY: &str = "internal.operator.dynatrace.com/use-csi-driver";

pub(crate) fn stash_removed_field<T: Serialize>(
    meta: &mut metav1::ObjectMeta,
    key: &str,
    value: Option<&T>,
) -> Result<(), serde_json::Error> {
    if let Some(v) = value {
        let encoded = serde_json::to_string(v)?;
        meta.annotations.get_or_insert_default().insert(key.into(), encoded);
    }
    Ok(())
}

pub(crate) fn restore_removed_field<T: DeserializeOwned>(
    meta: &mut metav1::ObjectMeta,
    key: &str,
) -> Result<Option<T>, serde_json::Error> {
    let Some(annotations) = meta.annotations.as_mut() else {
        return Ok(None);
    };

    let Some(encoded) = annotations.remove(key) else {
        return Ok(None);
    };

    if annotations.is_empty() {
        meta.annotations = None;
    }
    Ok(Some(serde_json::from_str(&encoded)?))
}

#[cfg(test)]
mod tests;
