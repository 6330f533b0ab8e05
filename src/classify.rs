//! Category classification of problems.
//!
//! A problem's category is decided from its metadata alone (title,
//! description, starter code), never from the submission. Keywords are
//! tested against an ordered table and the first matching row wins, which
//! makes the tie-break between overlapping categories explicit.

use crate::category::Category;
use crate::problem::ProblemMetadata;
use regex::Regex;
use std::sync::LazyLock;

/// Keyword table in priority order. `Foundations` is the fallback and has no row.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Rcu,
        &["rcu", "read-copy-update", "read copy update"],
    ),
    (
        Category::CharacterDevice,
        &[
            "character device",
            "char device",
            "chrdev",
            "cdev",
            "file_operations",
        ],
    ),
    (Category::PciDriver, &["pci"]),
    (
        Category::ModuleParameters,
        &["module_param", "module parameter", "modparam"],
    ),
    (
        Category::Memory,
        &[
            "kmalloc",
            "kzalloc",
            "vmalloc",
            "kfree",
            "memory allocation",
            "memory management",
            "memory leak",
            "slab",
        ],
    ),
    (
        Category::Synchronization,
        &[
            "mutex",
            "spinlock",
            "spin_lock",
            "semaphore",
            "atomic",
            "synchroniz",
            "race condition",
            "locking",
            "concurrency",
        ],
    ),
    (Category::DeviceDrivers, &["device", "driver"]),
];

/// Compiled keyword table. A keyword may follow `_` so kernel identifiers such
/// as `synchronize_rcu` or `alloc_chrdev_region` count, but not a letter or digit.
static KEYWORD_PATTERNS: LazyLock<Vec<(Category, Regex)>> = LazyLock::new(|| {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(category, keywords)| {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&format!(r"(?:^|[^a-z0-9])(?:{alternation})"))
                .expect("invalid regex");
            (*category, regex)
        })
        .collect()
});

/// Classify a problem into exactly one category.
///
/// An explicit category on the problem always wins. Otherwise the title,
/// description, and starter code are lowercased into one blob and matched
/// against `CATEGORY_KEYWORDS` in order, falling back to `Foundations`.
pub fn classify(problem: &ProblemMetadata) -> Category {
    if let Some(category) = problem.category {
        return category;
    }

    let blob = format!(
        "{} {} {}",
        problem.title, problem.description, problem.starter_code
    )
    .to_lowercase();

    classify_text(&blob)
}

/// Match lowercase text against the keyword table.
pub fn classify_text(text: &str) -> Category {
    KEYWORD_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(text))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Foundations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn problem(title: &str, description: &str) -> ProblemMetadata {
        ProblemMetadata {
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_is_foundations() {
        assert_eq!(
            classify(&problem("Hello Kernel", "Print a greeting on load")),
            Category::Foundations
        );
    }

    #[test]
    fn test_each_category_detected() {
        let cases = [
            ("RCU protected list", Category::Rcu),
            ("Build a character device", Category::CharacterDevice),
            ("Probe a PCI card", Category::PciDriver),
            ("Expose a module parameter", Category::ModuleParameters),
            ("Track kmalloc usage", Category::Memory),
            ("Protect a counter with a mutex", Category::Synchronization),
            ("Write a platform driver", Category::DeviceDrivers),
        ];
        for (title, expected) in cases {
            assert_eq!(classify(&problem(title, "")), expected, "title: {title}");
        }
    }

    #[test]
    fn test_priority_order_breaks_ties() {
        // rcu beats pci, pci beats generic device/driver.
        assert_eq!(
            classify(&problem("PCI driver", "uses RCU for the device list")),
            Category::Rcu
        );
        assert_eq!(
            classify(&problem("PCI driver", "a simple device driver")),
            Category::PciDriver
        );
        // "character device" must not fall through to device_drivers.
        assert_eq!(
            classify(&problem("Character device driver", "")),
            Category::CharacterDevice
        );
        // memory before synchronization.
        assert_eq!(
            classify(&problem("kmalloc under a mutex", "")),
            Category::Memory
        );
    }

    #[test]
    fn test_prefixed_kernel_identifiers_count() {
        let cases = [
            ("synchronize_rcu()", Category::Rcu),
            ("call_rcu(&old->rcu, free_cb)", Category::Rcu),
            ("kfree_rcu(old, rcu)", Category::Rcu),
            ("static struct cfg __rcu *gcfg;", Category::Rcu),
            ("list_for_each_entry_rcu(pos, &head, list)", Category::Rcu),
            ("alloc_chrdev_region(&dev, 0, 1, \"demo\")", Category::CharacterDevice),
            ("register_chrdev(0, \"demo\", &fops)", Category::CharacterDevice),
        ];
        for (starter, expected) in cases {
            let mut p = problem("Exercise", "Complete the module");
            p.starter_code = starter.to_string();
            assert_eq!(classify(&p), expected, "starter: {starter}");
        }
    }

    #[test]
    fn test_rcu_updater_problem_is_rcu() {
        let mut p = problem(
            "Safe pointer update",
            "Publish a new config and call synchronize_rcu() before kfree",
        );
        p.starter_code = "static struct cfg __rcu *gcfg;".to_string();
        assert_eq!(classify(&p), Category::Rcu);
    }

    #[test]
    fn test_keywords_need_word_start() {
        // "circuit" contains "rcu" but not at a word start.
        assert_eq!(
            classify(&problem("Circuit breaker", "count failures")),
            Category::Foundations
        );
    }

    #[test]
    fn test_starter_code_participates() {
        let mut p = problem("Exercise 4", "Complete the module");
        p.starter_code = "static struct mutex lock;".to_string();
        assert_eq!(classify(&p), Category::Synchronization);
    }

    #[test]
    fn test_explicit_category_wins() {
        let mut p = problem("RCU list", "");
        p.category = Some(Category::Memory);
        assert_eq!(classify(&p), Category::Memory);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify(&problem("USING RCU", "")), Category::Rcu);
    }

    proptest! {
        /// Classification is a pure function of the metadata.
        #[test]
        fn classify_is_deterministic(title in ".{0,40}", description in ".{0,80}") {
            let p = problem(&title, &description);
            prop_assert_eq!(classify(&p), classify(&p.clone()));
        }

        /// Appending an rcu mention to any text always yields rcu.
        #[test]
        fn rcu_has_highest_priority(prefix in "[a-z ]{0,40}") {
            let text = format!("{prefix} rcu");
            prop_assert_eq!(classify_text(&text), Category::Rcu);
        }
    }
}
