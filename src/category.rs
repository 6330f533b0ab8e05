//! Problem categories.
//!
//! Every submission is graded against exactly one category's rule set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Problem category, selecting which rule set applies to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Module scaffolding: init/exit, license, kernel logging.
    Foundations,
    /// Read-copy-update readers and updaters.
    Rcu,
    /// Mutexes, spinlocks, and other locking primitives.
    Synchronization,
    /// Kernel memory allocation and release.
    Memory,
    /// Character devices and file operations.
    CharacterDevice,
    /// PCI device drivers.
    PciDriver,
    /// Module parameters exposed through sysfs.
    ModuleParameters,
    /// Generic device/driver model code (platform drivers and friends).
    DeviceDrivers,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 8] = [
        Category::Foundations,
        Category::Rcu,
        Category::Synchronization,
        Category::Memory,
        Category::CharacterDevice,
        Category::PciDriver,
        Category::ModuleParameters,
        Category::DeviceDrivers,
    ];

    /// The snake_case name used in problem files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Foundations => "foundations",
            Category::Rcu => "rcu",
            Category::Synchronization => "synchronization",
            Category::Memory => "memory",
            Category::CharacterDevice => "character_device",
            Category::PciDriver => "pci_driver",
            Category::ModuleParameters => "module_parameters",
            Category::DeviceDrivers => "device_drivers",
        }
    }

    /// Parse a category from its snake_case name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
