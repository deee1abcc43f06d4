use serde_json::Value;
use thiserror::Error;

use crate::{
    v1beta3,
    v1beta4,
    v1beta5,
};

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("could not (un)marshal DynaKube: {0}")]
    Marshal(#[from] serde_json::Error),

    #[error("unsupported DynaKube apiVersion: {0}")]
    UnsupportedVersion(String),
}

// One variant per served version; every conversion walks the chain of adjacent
// to_next/from_next functions through the hub (the newest version)
#[derive(Clone, Debug, PartialEq)]
pub enum VersionedDynaKube {
    V1beta3(v1beta3::DynaKube),
    V1beta4(v1beta4::DynaKube),
    V1beta5(v1beta5::DynaKube),
}

pub const SERVED_VERSIONS: [&str; 3] = [v1beta3::API_VERSION, v1beta4::API_VERSION, v1beta5::API_VERSION];

impl VersionedDynaKube {
    pub fn from_value(obj: Value) -> Result<VersionedDynaKube, ConversionError> {
        let api_version = obj.get("apiVersion").and_then(Value::as_str).unwrap_or_default().to_string();
        match api_version.as_str() {
            v1beta3::API_VERSION => Ok(VersionedDynaKube::V1beta3(serde_json::from_value(obj)?)),
            v1beta4::API_VERSION => Ok(VersionedDynaKube::V1beta4(serde_json::from_value(obj)?)),
            v1beta5::API_VERSION => Ok(VersionedDynaKube::V1beta5(serde_json::from_value(obj)?)),
            _ => Err(ConversionError::UnsupportedVersion(api_version)),
        }
    }

    pub fn api_version(&self) -> &'static str {
        match self {
            VersionedDynaKube::V1beta3(_) => v1beta3::API_VERSION,
            VersionedDynaKube::V1beta4(_) => v1beta4::API_VERSION,
            VersionedDynaKube::V1beta5(_) => v1beta5::API_VERSION,
        }
    }

    pub fn into_hub(self) -> Result<v1beta5::DynaKube, ConversionError> {
        match self {
            VersionedDynaKube::V1beta3(dk) => Ok(dk.to_next()?.to_next()?),
            VersionedDynaKube::V1beta4(dk) => Ok(dk.to_next()?),
            VersionedDynaKube::V1beta5(dk) => Ok(dk),
        }
    }

    pub fn from_hub(hub: v1beta5::DynaKube, api_version: &str) -> Result<VersionedDynaKube, ConversionError> {
        match api_version {
            v1beta5::API_VERSION => Ok(VersionedDynaKube::V1beta5(hub)),
            v1beta4::API_VERSION => Ok(VersionedDynaKube::V1beta4(v1beta4::DynaKube::from_next(&hub)?)),
            v1beta3::API_VERSION => {
                let prev = v1beta4::DynaKube::from_next(&hub)?;
                Ok(VersionedDynaKube::V1beta3(v1beta3::DynaKube::from_next(&prev)?))
            },
            _ => Err(ConversionError::UnsupportedVersion(api_version.into())),
        }
    }

    pub fn convert(self, desired_api_version: &str) -> Result<VersionedDynaKube, ConversionError> {
        if self.api_version() == desired_api_version {
            return Ok(self);
        }
        VersionedDynaKube::from_hub(self.into_hub()?, desired_api_version)
    }

    pub fn into_value(self) -> Result<Value, ConversionError> {
        let value = match self {
            VersionedDynaKube::V1beta3(dk) => serde_json::to_value(dk)?,
            VersionedDynaKube::V1beta4(dk) => serde_json::to_value(dk)?,
            VersionedDynaKube::V1beta5(dk) => serde_json::to_value(dk)?,
        };
        Ok(value)
    }
}
