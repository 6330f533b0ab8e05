//! Built-in rule tables for every category.
//!
//! Each category's rule set is the shared baseline followed by the
//! category-specific rules. Order inside each list is significant: forbidden
//! rules report the first hit, required rules the first missing entry, and
//! contextual checks the first failure.

use super::rules::{
    Applicability, CategoryRuleSet, ContextualCheck, ForbiddenRule, Invariant, RequiredRule,
};
use crate::category::Category;
use regex::Regex;

const KMALLOC_FAMILY: &str = r"\b(?:k[mz]alloc|kcalloc|kmalloc_array)\s*\(";
const ANY_ALLOCATION: &str =
    r"\b(?:k[mz]alloc|kcalloc|kmalloc_array|v[mz]alloc|kvmalloc|kvzalloc|kmem_cache_alloc)\s*\(";
const ANY_FREE: &str = r"\b(?:kfree|vfree|kvfree|kmem_cache_free)\s*\(";
const MODULE_PARAM: &str = r"\bmodule_param(?:_named|_array|_string|_cb)?\s*\(";
const MUTEX_LOCK: &str = r"\bmutex_lock(?:_interruptible|_killable)?\s*\(";
const MUTEX_UNLOCK: &str = r"\bmutex_unlock\s*\(";
const SPIN_LOCK: &str = r"\bspin_lock(?:_irqsave|_irq|_bh)?\s*\(";
const SPIN_UNLOCK: &str = r"\bspin_unlock(?:_irqrestore|_irq|_bh)?\s*\(";
const DRIVER_HELPER_MACRO: &str = r"\bmodule_(?:pci|platform|usb|i2c|spi)_driver\s*\(";

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid built-in rule pattern")
}

fn forbidden(name: &'static str, pattern: &str, message: &'static str) -> ForbiddenRule {
    ForbiddenRule {
        name,
        pattern: re(pattern),
        message,
    }
}

fn required(
    name: &'static str,
    pattern: &str,
    weight: u32,
    fix: &'static str,
    applicability: Applicability,
) -> RequiredRule {
    RequiredRule {
        name,
        pattern: re(pattern),
        weight,
        fix,
        applicability,
    }
}

fn when(pattern: &str) -> Applicability {
    Applicability::WhenPresent(re(pattern))
}

fn unless(pattern: &str) -> Applicability {
    Applicability::UnlessPresent(re(pattern))
}

fn balanced(
    name: &'static str,
    open: &str,
    close: &str,
    describe: fn(usize, usize) -> String,
    fix: &'static str,
) -> ContextualCheck {
    ContextualCheck {
        name,
        invariant: Invariant::Balanced {
            open: re(open),
            close: re(close),
            describe,
        },
        critical: true,
        fix,
    }
}

fn paired(
    name: &'static str,
    acquire: &str,
    release: &str,
    message: &'static str,
    fix: &'static str,
) -> ContextualCheck {
    ContextualCheck {
        name,
        invariant: Invariant::Paired {
            acquire: re(acquire),
            release: re(release),
            message,
        },
        critical: true,
        fix,
    }
}

fn covered(
    name: &'static str,
    primary: &str,
    cover: &str,
    describe: fn(usize, usize) -> String,
    fix: &'static str,
) -> ContextualCheck {
    ContextualCheck {
        name,
        invariant: Invariant::Covered {
            primary: re(primary),
            cover: re(cover),
            describe,
        },
        critical: false,
        fix,
    }
}

/// Build the rule set for one category.
pub fn rule_set(category: Category) -> CategoryRuleSet {
    let mut set = baseline();
    let specific = match category {
        Category::Foundations => foundations(),
        Category::Rcu => rcu(),
        Category::Synchronization => synchronization(),
        Category::Memory => memory(),
        Category::CharacterDevice => character_device(),
        Category::PciDriver => pci_driver(),
        Category::ModuleParameters => module_parameters(),
        Category::DeviceDrivers => device_drivers(),
    };
    set.required.extend(specific.required);
    set.forbidden.extend(specific.forbidden);
    set.contextual.extend(specific.contextual);
    set
}

fn baseline() -> CategoryRuleSet {
    CategoryRuleSet {
        forbidden: vec![
            forbidden(
                "malloc",
                r"\b(?:malloc|calloc|realloc)\s*\(",
                "Use kmalloc() or kzalloc() instead of malloc()/calloc()/realloc() in kernel code",
            ),
            forbidden(
                "free",
                r"\bfree\s*\(",
                "Use kfree() instead of free() in kernel code",
            ),
            forbidden(
                "printf",
                r"\bprintf\s*\(",
                "Use printk() or pr_info() instead of printf() in kernel code",
            ),
            forbidden(
                "userspace_headers",
                r"#\s*include\s*<(?:stdio|stdlib|string|unistd|pthread)\.h>",
                "User-space headers like <stdio.h> are not available to kernel modules; include <linux/...> headers instead",
            ),
            forbidden(
                "main_function",
                r"\bint\s+main\s*\(",
                "Kernel modules have no main(); register entry and exit points with module_init() and module_exit()",
            ),
        ],
        required: vec![
            required(
                "module_init",
                r"\bmodule_init\s*\(",
                20,
                "Add module_init(your_init_function); to register the module entry point",
                unless(DRIVER_HELPER_MACRO),
            ),
            required(
                "module_exit",
                r"\bmodule_exit\s*\(",
                20,
                "Add module_exit(your_exit_function); so the module can be unloaded cleanly",
                unless(DRIVER_HELPER_MACRO),
            ),
            required(
                "MODULE_LICENSE",
                r"\bMODULE_LICENSE\s*\(",
                20,
                "Add MODULE_LICENSE(\"GPL\"); so loading the module does not taint the kernel",
                Applicability::Always,
            ),
            required(
                "module_header",
                r"#\s*include\s*<linux/module\.h>",
                10,
                "Add #include <linux/module.h> at the top of the file",
                Applicability::Always,
            ),
        ],
        contextual: Vec::new(),
    }
}

fn foundations() -> CategoryRuleSet {
    CategoryRuleSet {
        forbidden: vec![forbidden(
            "userspace_sleep",
            r"\b(?:sleep|usleep)\s*\(",
            "Use msleep() or ssleep() instead of user-space sleep functions",
        )],
        required: vec![required(
            "kernel_logging",
            r"\b(?:printk|pr_(?:info|err|warn|notice|debug|alert|crit|emerg))\s*\(",
            10,
            "Log from your init and exit functions with pr_info() or printk(KERN_INFO ...)",
            Applicability::Always,
        )],
        contextual: Vec::new(),
    }
}

fn rcu() -> CategoryRuleSet {
    CategoryRuleSet {
        forbidden: vec![
            forbidden(
                "sleep_in_rcu_reader",
                r"(?s)\brcu_read_lock\s*\(\s*\)[^}]*?\b(?:msleep|ssleep|schedule|synchronize_rcu)\s*\([^}]*?\brcu_read_unlock\s*\(",
                "Blocking call inside an RCU read-side critical section; RCU readers must never sleep",
            ),
            forbidden(
                "call_rcu_without_callback",
                r"\bcall_rcu\s*\([^;]*,\s*NULL\s*\)",
                "call_rcu() needs a callback that frees the old object; NULL is not allowed",
            ),
        ],
        required: vec![
            required(
                "rcu_read_lock",
                r"\brcu_read_lock\s*\(",
                20,
                "Wrap rcu_dereference() in an rcu_read_lock()/rcu_read_unlock() section",
                when(r"\brcu_dereference\s*\("),
            ),
            required(
                "rcu_dereference",
                r"\brcu_dereference\s*\(",
                10,
                "Read RCU-protected pointers with rcu_dereference() inside the read-side section",
                when(r"\brcu_read_lock\s*\("),
            ),
            required(
                "rcu_assign_pointer",
                r"\brcu_assign_pointer\s*\(",
                10,
                "Publish the new version with rcu_assign_pointer() before waiting for readers",
                when(r"\b(?:synchronize_rcu|call_rcu|kfree_rcu)\s*\("),
            ),
            required(
                "rcu_grace_period",
                r"\b(?:synchronize_rcu|call_rcu|kfree_rcu)\s*\(",
                20,
                "Wait for a grace period with synchronize_rcu() (or defer with call_rcu()/kfree_rcu()) before freeing the old version",
                when(r"\brcu_assign_pointer\s*\("),
            ),
        ],
        contextual: vec![balanced(
            "rcu_lock_balance",
            r"\brcu_read_lock\s*\(",
            r"\brcu_read_unlock\s*\(",
            |locks, unlocks| {
                format!("RCU lock/unlock imbalance: {locks} locks vs {unlocks} unlocks")
            },
            "Pair every rcu_read_lock() with exactly one rcu_read_unlock() on every path",
        )],
    }
}

fn synchronization() -> CategoryRuleSet {
    CategoryRuleSet {
        forbidden: vec![forbidden(
            "sleep_under_spinlock",
            r"(?s)\bspin_lock(?:_irqsave|_irq|_bh)?\s*\([^}]*?\b(?:msleep|ssleep|schedule|mutex_lock|copy_to_user|copy_from_user)\s*\([^}]*?\bspin_unlock",
            "Sleeping call while holding a spinlock; code between spin_lock() and spin_unlock() must not sleep",
        )],
        required: vec![
            required(
                "locking_primitive",
                r"\b(?:mutex_lock(?:_interruptible|_killable)?|spin_lock(?:_irqsave|_irq|_bh)?|down(?:_interruptible)?|atomic_(?:inc|dec|add|sub|set|read)\w*)\s*\(",
                20,
                "Protect the shared state with a mutex, spinlock, semaphore, or atomic_t operation",
                Applicability::Always,
            ),
            required(
                "mutex_init",
                r"\b(?:mutex_init|DEFINE_MUTEX)\s*\(",
                10,
                "Initialise the mutex with DEFINE_MUTEX() or mutex_init() before first use",
                when(r"\bmutex_lock"),
            ),
            required(
                "spin_lock_init",
                r"\b(?:spin_lock_init|DEFINE_SPINLOCK)\s*\(",
                10,
                "Initialise the spinlock with DEFINE_SPINLOCK() or spin_lock_init() before first use",
                when(r"\bspin_lock(?:_irqsave|_irq|_bh)?\s*\("),
            ),
        ],
        contextual: vec![
            paired(
                "mutex_release",
                MUTEX_LOCK,
                MUTEX_UNLOCK,
                "Mutex locked but never unlocked: no mutex_unlock() call",
                "Release the mutex with mutex_unlock() on every path that took it",
            ),
            paired(
                "spinlock_release",
                SPIN_LOCK,
                SPIN_UNLOCK,
                "Spinlock taken but never released: no spin_unlock() call",
                "Match each spin_lock() variant with its spin_unlock() counterpart",
            ),
            // An early-return error path adds an extra unlock, so only more
            // locks than unlocks is reported.
            covered(
                "mutex_balance",
                MUTEX_LOCK,
                MUTEX_UNLOCK,
                |locks, unlocks| {
                    format!("Mutex lock/unlock imbalance: {locks} locks vs {unlocks} unlocks")
                },
                "Release the mutex with mutex_unlock() on every path that took it, including error paths",
            ),
            covered(
                "spinlock_balance",
                SPIN_LOCK,
                SPIN_UNLOCK,
                |locks, unlocks| {
                    format!("Spinlock lock/unlock imbalance: {locks} locks vs {unlocks} unlocks")
                },
                "Match each spin_lock() variant with its spin_unlock() counterpart on every path",
            ),
        ],
    }
}

fn memory() -> CategoryRuleSet {
    CategoryRuleSet {
        forbidden: vec![
            forbidden(
                "missing_gfp_flags",
                r"\bk[mz]alloc\s*\([^,;]*,\s*0\s*\)",
                "kmalloc()/kzalloc() need GFP flags such as GFP_KERNEL; 0 is not a valid allocation mode",
            ),
            forbidden(
                "kfree_non_heap",
                r"\bkfree\s*\(\s*&",
                "kfree() only releases memory returned by kmalloc(); never pass the address of a variable",
            ),
        ],
        required: vec![
            required(
                "allocation",
                ANY_ALLOCATION,
                20,
                "Allocate memory with kmalloc()/kzalloc() (or vmalloc() for large buffers)",
                Applicability::Always,
            ),
            required(
                "kfree",
                r"\bkfree\s*\(",
                20,
                "Release every kmalloc()/kzalloc() allocation with kfree()",
                when(KMALLOC_FAMILY),
            ),
            required(
                "vfree",
                r"\bvfree\s*\(",
                20,
                "Release vmalloc() memory with vfree()",
                when(r"\bv[mz]alloc\s*\("),
            ),
            required(
                "allocation_check",
                r"\bif\s*\(\s*!\s*[\w.\->]+\s*\)|==\s*NULL\b|\bunlikely\s*\(\s*!",
                10,
                "Check the allocation result for NULL and return -ENOMEM on failure",
                when(ANY_ALLOCATION),
            ),
        ],
        contextual: vec![covered(
            "memory_leak",
            ANY_ALLOCATION,
            ANY_FREE,
            |allocs, frees| {
                format!("Potential memory leak: {allocs} allocations vs {frees} frees")
            },
            "Free every allocation on both the success path and the error paths",
        )],
    }
}

fn character_device() -> CategoryRuleSet {
    CategoryRuleSet {
        forbidden: vec![forbidden(
            "memcpy_user_buffer",
            r"\bmemcpy\s*\((?:\s*(?:buf|buffer|ubuf|user_buf(?:fer)?)\s*,|[^,;]+,\s*(?:buf|buffer|ubuf|user_buf(?:fer)?)\s*,)",
            "Use copy_to_user()/copy_from_user() to move data across the user/kernel boundary; memcpy() on a __user pointer is unsafe",
        )],
        required: vec![
            required(
                "file_operations",
                r"\bstruct\s+file_operations\b",
                20,
                "Define a struct file_operations with your open/read/write/release handlers",
                Applicability::Always,
            ),
            required(
                "copy_to_user",
                r"\b(?:copy_to_user|simple_read_from_buffer|put_user)\s*\(",
                10,
                "Move data to user space with copy_to_user() in your read handler",
                when(r"\.read\s*="),
            ),
            required(
                "copy_from_user",
                r"\b(?:copy_from_user|simple_write_to_buffer|get_user)\s*\(",
                10,
                "Move data from user space with copy_from_user() in your write handler",
                when(r"\.write\s*="),
            ),
            required(
                "cdev_del",
                r"\bcdev_del\s*\(",
                20,
                "Remove the cdev with cdev_del() in your exit function",
                when(r"\bcdev_add\s*\("),
            ),
            required(
                "device_destroy",
                r"\bdevice_destroy\s*\(",
                10,
                "Remove the device node with device_destroy() in your exit function",
                when(r"\bdevice_create\s*\("),
            ),
            required(
                "class_destroy",
                r"\bclass_destroy\s*\(",
                10,
                "Release the device class with class_destroy() in your exit function",
                when(r"\bclass_create\s*\("),
            ),
        ],
        contextual: vec![
            paired(
                "chrdev_region_cleanup",
                r"\b(?:alloc_chrdev_region|register_chrdev_region)\s*\(",
                r"\bunregister_chrdev_region\s*\(",
                "Character device allocation without cleanup: no unregister_chrdev_region() call",
                "Call unregister_chrdev_region(dev, count) in the exit function and on init error paths",
            ),
            paired(
                "chrdev_cleanup",
                r"\bregister_chrdev\s*\(",
                r"\bunregister_chrdev\s*\(",
                "Character device allocation without cleanup: no unregister_chrdev() call",
                "Call unregister_chrdev(major, name) in the exit function",
            ),
        ],
    }
}

fn pci_driver() -> CategoryRuleSet {
    CategoryRuleSet {
        forbidden: vec![
            forbidden(
                "pci_find_device",
                r"\bpci_find_device\s*\(",
                "pci_find_device() no longer exists; match devices through a pci_device_id table",
            ),
            forbidden(
                "ioremap_nocache",
                r"\bioremap_nocache\s*\(",
                "ioremap_nocache() was removed from the kernel; use pci_iomap() or ioremap()",
            ),
        ],
        required: vec![
            required(
                "pci_driver_struct",
                r"\bstruct\s+pci_driver\b",
                20,
                "Describe your driver with a struct pci_driver (name, id_table, probe, remove)",
                Applicability::Always,
            ),
            required(
                "pci_device_id_table",
                r"\bstruct\s+pci_device_id\b",
                20,
                "Declare a struct pci_device_id table listing the devices you support",
                Applicability::Always,
            ),
            required(
                "pci_enable_device",
                r"\b(?:pci_enable_device(?:_mem)?|pcim_enable_device)\s*\(",
                10,
                "Enable the device with pci_enable_device() in your probe function",
                when(r"\.probe\s*="),
            ),
            required(
                "pci_disable_device",
                r"\bpci_disable_device\s*\(",
                10,
                "Disable the device with pci_disable_device() in your remove function",
                when(r"\bpci_enable_device(?:_mem)?\s*\("),
            ),
            required(
                "module_device_table",
                r"\bMODULE_DEVICE_TABLE\s*\(\s*pci\b",
                5,
                "Export the id table with MODULE_DEVICE_TABLE(pci, your_ids);",
                when(r"\bstruct\s+pci_device_id\b"),
            ),
        ],
        contextual: vec![paired(
            "pci_driver_cleanup",
            r"\bpci_register_driver\s*\(",
            r"\bpci_unregister_driver\s*\(",
            "PCI driver registration without cleanup: no pci_unregister_driver() call",
            "Call pci_unregister_driver(&your_driver) in the exit function, or use module_pci_driver()",
        )],
    }
}

fn module_parameters() -> CategoryRuleSet {
    CategoryRuleSet {
        forbidden: vec![forbidden(
            "world_writable_param",
            r"\bmodule_param\w*\s*\([^;]*,\s*(?:0777|0666|0662|S_IRWXUGO|S_IWUGO)\s*\)",
            "Module parameters must not be world-writable; use 0444 or 0644 permissions",
        )],
        required: vec![
            required(
                "module_param",
                MODULE_PARAM,
                20,
                "Declare the parameter with module_param(name, type, perm);",
                Applicability::Always,
            ),
            required(
                "MODULE_PARM_DESC",
                r"\bMODULE_PARM_DESC\s*\(",
                10,
                "Document each parameter with MODULE_PARM_DESC(name, \"description\");",
                when(MODULE_PARAM),
            ),
        ],
        contextual: vec![covered(
            "param_documentation",
            MODULE_PARAM,
            r"\bMODULE_PARM_DESC\s*\(",
            |params, descs| {
                format!(
                    "Undocumented module parameters: {params} module_param declarations vs {descs} MODULE_PARM_DESC entries"
                )
            },
            "Add a MODULE_PARM_DESC() line for every module_param()",
        )],
    }
}

fn device_drivers() -> CategoryRuleSet {
    CategoryRuleSet {
        forbidden: vec![forbidden(
            "ioremap_nocache",
            r"\bioremap_nocache\s*\(",
            "ioremap_nocache() was removed from the kernel; use ioremap()",
        )],
        required: vec![
            required(
                "driver_struct",
                r"\bstruct\s+\w*driver\b",
                10,
                "Describe your driver with a struct platform_driver (or another bus driver struct)",
                Applicability::Always,
            ),
            required(
                "probe_callback",
                r"\.probe\s*=",
                10,
                "Set the .probe callback so the driver can bind to devices",
                when(r"\bstruct\s+platform_driver\b"),
            ),
            required(
                "remove_callback",
                r"\.remove(?:_new)?\s*=",
                10,
                "Set the .remove callback to undo everything probe() set up",
                when(r"\.probe\s*="),
            ),
        ],
        contextual: vec![
            paired(
                "platform_driver_cleanup",
                r"\bplatform_driver_register\s*\(",
                r"\bplatform_driver_unregister\s*\(",
                "Driver registration without cleanup: no platform_driver_unregister() call",
                "Call platform_driver_unregister() in the exit function, or use module_platform_driver()",
            ),
            paired(
                "driver_cleanup",
                r"\bdriver_register\s*\(",
                r"\bdriver_unregister\s*\(",
                "Driver registration without cleanup: no driver_unregister() call",
                "Call driver_unregister() in the exit function",
            ),
        ],
    }
}
