use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A volume on the array, identified by name and serial number
///
/// Only `name` and `serial` are read from the volume listing; other
/// fields in the response are ignored. Both are required: a listing
/// entry without either one fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VolumeRecord {
    /// Volume name
    pub name: String,

    /// Volume serial number
    pub serial: String,
}

/// Snapshots come from the same endpoint and carry the same fields
pub type SnapshotRecord = VolumeRecord;

impl VolumeRecord {
    /// Create a record from a name and serial
    pub fn new(name: &str, serial: &str) -> Self {
        Self {
            name: name.to_string(),
            serial: serial.to_string(),
        }
    }

    /// Split the record into a `(name, serial)` pair
    pub fn into_pair(self) -> (String, String) {
        (self.name, self.serial)
    }
}

impl From<VolumeRecord> for (String, String) {
    fn from(record: VolumeRecord) -> Self {
        record.into_pair()
    }
}

impl Display for VolumeRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.serial)
    }
}
