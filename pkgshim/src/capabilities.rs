//! Package-management capabilities the dispatcher delegates to.
//!
//! Each operation needs exactly one capability. A provider answers `None`
//! when the host does not have it, which the dispatcher reports as the
//! "no packaging tools" error instead of attempting the call.

use pkgshim_core::error::Result;
use pkgshim_core::PackageRecord;

/// Read-only view of the host's installed packages.
pub trait PackageRegistry {
    /// Installed packages in the order the registry reports them.
    fn installed_packages(&self) -> Result<Vec<PackageRecord>>;
}

/// Installs packages into the host environment.
pub trait PackageInstaller {
    /// Install `package`, forwarding `options` as one extra parameter when
    /// present. Returns the installer's own status code.
    fn install(&self, package: &str, options: Option<&str>) -> Result<i32>;
}

/// Removes packages from the host environment.
pub trait PackageUninstaller {
    /// Remove `package`. With `force_confirm` set the uninstaller must not
    /// prompt. Returns the uninstaller's own status code.
    fn uninstall(&self, package: &str, force_confirm: bool) -> Result<i32>;
}

/// Source of capabilities handed to the dispatcher at construction.
pub trait PackageTools {
    fn registry(&self) -> Option<&dyn PackageRegistry>;
    fn installer(&self) -> Option<&dyn PackageInstaller>;
    fn uninstaller(&self) -> Option<&dyn PackageUninstaller>;
}
