use crate::config::{Config, ExtensionOverride};

/// Policy constants for one submission after extension overrides are merged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constants {
    /// `None` means unlimited submissions
    pub max_submissions: Option<u32>,
    pub max_late_days: u32,
    pub no_penalty_days: u32,
    pub penalty: u32,
}

/// Find the extension for a submission.
///
/// Emails are tried in the order given; the first one with an entry wins, even
/// if a later email also has one.
pub fn find_extension<'c, 'e>(
    config: &'c Config,
    emails: impl IntoIterator<Item = &'e str>,
) -> Option<(&'e str, &'c ExtensionOverride)> {
    emails
        .into_iter()
        .find_map(|email| config.extensions.get(email).map(|ext| (email, ext)))
}

/// Merge the top-level config with an optional extension override.
///
/// Each key the override defines replaces the default; the rest fall back to
/// the top level. A cap of 0 is treated as unlimited.
pub fn resolve_constants(config: &Config, extension: Option<&ExtensionOverride>) -> Constants {
    let ext = extension.cloned().unwrap_or_default();

    Constants {
        max_submissions: ext
            .max_submissions
            .unwrap_or(config.max_submissions)
            .filter(|&cap| cap > 0),
        max_late_days: ext.max_late_days.unwrap_or(config.max_late_days),
        no_penalty_days: ext.no_penalty_days.unwrap_or(config.no_penalty_days),
        penalty: ext.penalty.unwrap_or(config.penalty),
    }
}
