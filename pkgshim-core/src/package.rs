use serde::{Deserialize, Serialize};
use std::fmt;

/// One installed distribution as reported by the host's package registry.
///
/// The record is a read-only projection: pkgshim never mutates the registry
/// it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Distribution name (e.g., "requests").
    pub name: String,
    /// Installed version string, exactly as the registry reports it.
    pub version: String,
    /// Directory the distribution is installed into.
    #[serde(default)]
    pub location: String,
}

impl PackageRecord {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            location: location.into(),
        }
    }
}

/// Tab-separated `name\tversion\tlocation`, the line format of `pkgshim list`.
impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.name, self.version, self.location)
    }
}
