use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Kind of uploaded medical record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Prescription,
    LabReport,
    Imaging,
    #[default]
    Other,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prescription => "prescription",
            Self::LabReport => "lab_report",
            Self::Imaging => "imaging",
            Self::Other => "other",
        }
    }
}

impl FromStr for RecordType {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "prescription" => Ok(Self::Prescription),
            "lab_report" => Ok(Self::LabReport),
            "imaging" => Ok(Self::Imaging),
            "other" => Ok(Self::Other),
            _ => Err(CoreError::InvalidRecordType {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
