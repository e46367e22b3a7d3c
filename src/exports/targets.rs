//! Checks for a single target path against the file system.

use std::path::Path;

use crate::constants::WILDCARD;
use crate::exports::finding::{Finding, FindingKind};

/// Check one concrete target path declared for `entry_key`.
///
/// The path must be relative. For a wildcard entry the `*` has to be the last
/// character of the key, the target has to contain a `*` too, and the folder
/// in front of the target's `*` must exist. Otherwise the target itself must
/// exist.
///
/// `condition` names the condition the path was declared under, if any, and
/// only affects the message.
///
/// # Examples
///
/// ```rust,no_run
/// use check_export_map::exports::validate_value;
/// use std::path::Path;
///
/// if let Err(finding) = validate_value(Path::new("."), "./utils/*", "./lib/*.js", None) {
///     eprintln!("{finding}");
/// }
/// ```
pub fn validate_value(
    base_dir: &Path,
    entry_key: &str,
    target_path: &str,
    condition: Option<&str>,
) -> Result<(), Finding> {
    if !target_path.starts_with('.') {
        return Err(Finding::new(
            FindingKind::Structural,
            entry_key,
            format!("File paths must be relative and start with a dot. Got \"{target_path}\" instead"),
        ));
    }

    if let Some(key_star) = entry_key.find(WILDCARD) {
        if key_star != entry_key.len() - WILDCARD.len_utf8() {
            return Err(Finding::new(
                FindingKind::Shape,
                entry_key,
                format!(
                    "The wildcard character \"{WILDCARD}\" must be the last character of entry \"{entry_key}\""
                ),
            ));
        }

        let Some(value_star) = target_path.find(WILDCARD) else {
            return Err(Finding::new(
                FindingKind::Shape,
                entry_key,
                format!(
                    "Didn't find a wildcard \"{WILDCARD}\" in value of entry \"{entry_key}\": {target_path}"
                ),
            ));
        };

        let folder = wildcard_folder(&target_path[..value_star]);
        let resolved = base_dir.join(folder);
        tracing::trace!(entry = entry_key, folder = %resolved.display(), "resolving wildcard folder");

        if !resolved.is_dir() {
            return Err(Finding::new(
                FindingKind::Referential,
                entry_key,
                format!("Folder \"{folder}\" doesn't exist for entry \"{entry_key}\""),
            ));
        }
        return Ok(());
    }

    let resolved = base_dir.join(target_path);
    tracing::trace!(entry = entry_key, path = %resolved.display(), "checking target");

    if !resolved.exists() {
        let condition = condition.map(|c| format!("{c}: ")).unwrap_or_default();
        return Err(Finding::new(
            FindingKind::Referential,
            entry_key,
            format!("File not found for \"{entry_key}\" {condition}{target_path}"),
        ));
    }

    Ok(())
}

/// Folder holding the files a wildcard target can match.
///
/// `prefix` is the target up to its first `*`. A prefix ending in `/` is the
/// folder itself (without the slash); otherwise the prefix names a partial
/// file name and its parent is used.
pub fn wildcard_folder(prefix: &str) -> &str {
    if let Some(folder) = prefix.strip_suffix('/') {
        return if folder.is_empty() { "/" } else { folder };
    }

    match prefix.rfind('/') {
        Some(0) => "/",
        Some(slash) => &prefix[..slash],
        None => ".",
    }
}
