//! core::naming
//!
//! Branch naming rules and validation.
//!
//! Validation never fails loudly: it returns a [`NameCheck`] that callers
//! turn into an aborted operation with a human-readable reason.

use std::collections::BTreeMap;

/// Result of checking a candidate branch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameCheck {
    /// The name can be used for a new branch.
    Valid,
    /// The name was rejected.
    Invalid {
        /// Why the name was rejected, phrased for the user.
        reason: &'static str,
    },
}

impl NameCheck {
    /// Whether the name passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, NameCheck::Valid)
    }

    /// The rejection reason, if any.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            NameCheck::Valid => None,
            NameCheck::Invalid { reason } => Some(*reason),
        }
    }
}

fn invalid(reason: &'static str) -> NameCheck {
    NameCheck::Invalid { reason }
}

/// Check whether `name` may be used for a new branch in `branches`.
///
/// Rules, in evaluation order:
/// - not empty
/// - not already taken
/// - does not start with `-`
/// - matches `^[A-Za-z0-9][A-Za-z0-9._/-]*$`
/// - does not end with `/` or `.lock`
/// - does not contain `..`, `//` or `@{`
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use gitsim::core::naming::validate_branch_name;
///
/// let mut branches = BTreeMap::new();
/// assert!(validate_branch_name("feature", &branches).is_valid());
///
/// branches.insert("feature".to_string(), ());
/// assert!(!validate_branch_name("feature", &branches).is_valid());
/// assert!(!validate_branch_name("a..b", &branches).is_valid());
/// ```
pub fn validate_branch_name<V>(name: &str, branches: &BTreeMap<String, V>) -> NameCheck {
    if name.is_empty() {
        return invalid("Branch name cannot be empty.");
    }

    if branches.contains_key(name) {
        return invalid("Branch already exists.");
    }

    if name.starts_with('-') {
        return invalid("Branch name cannot start with \"-\".");
    }

    if !matches_basic_pattern(name) {
        return invalid("Use letters, numbers, \".\", \"_\", \"-\" and \"/\".");
    }

    if name.ends_with('/') || name.ends_with(".lock") {
        return invalid("Branch name cannot end with \"/\" or \".lock\".");
    }

    if name.contains("..") || name.contains("//") || name.contains("@{") {
        return invalid("Branch name cannot contain \"..\", \"//\", or \"@{\".");
    }

    NameCheck::Valid
}

/// `^[A-Za-z0-9][A-Za-z0-9._/-]*$`
fn matches_basic_pattern(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/' | '-'))
}
