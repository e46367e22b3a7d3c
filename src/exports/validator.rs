//! Traversal of an export map and its conditional targets.

use std::collections::HashSet;
use std::path::Path;

use crate::constants::{DOT_ENTRY, ESM_EXTENSION, IMPORT_CONDITION, PACKAGE_JSON_ENTRY, ROOT_ENTRY};
use crate::exports::finding::{Finding, FindingKind};
use crate::exports::order::{ReferenceOrder, format_order};
use crate::exports::targets::validate_value;
use crate::manifest::{Condition, ExportEntry, ExportMap, ExportTarget, Exports, Manifest};

/// How many findings to collect per file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Stop at the first finding.
    #[default]
    FailFast,
    /// Keep going and report every finding.
    Exhaustive,
}

/// Options for a validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Fail-fast or exhaustive.
    pub mode: ValidationMode,
}

impl CheckOptions {
    /// Options for the given mode.
    pub const fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
        }
    }
}

/// A finding stopped the traversal.
struct Halt;

type Step = Result<(), Halt>;

/// Per-file traversal state. Never shared between files.
struct Traversal<'a> {
    base_dir: &'a Path,
    is_module: bool,
    mode: ValidationMode,
    reference: ReferenceOrder<'a>,
    seen: HashSet<&'a str>,
    has_dot_entry: bool,
    has_package_json_entry: bool,
    findings: Vec<Finding>,
}

impl<'a> Traversal<'a> {
    fn new(map: &'a ExportMap, manifest: &Manifest, base_dir: &'a Path, mode: ValidationMode) -> Self {
        Self {
            base_dir,
            is_module: manifest.is_module(),
            mode,
            reference: ReferenceOrder::derive(map),
            seen: HashSet::new(),
            has_dot_entry: false,
            has_package_json_entry: false,
            findings: Vec::new(),
        }
    }

    fn report(&mut self, finding: Finding) -> Step {
        tracing::debug!(kind = %finding.kind, entry = ?finding.entry, "{}", finding.message);
        self.findings.push(finding);
        match self.mode {
            ValidationMode::FailFast => Err(Halt),
            ValidationMode::Exhaustive => Ok(()),
        }
    }

    fn run(&mut self, map: &'a ExportMap) -> Step {
        for entry in map {
            self.visit_entry(entry)?;
        }

        if !self.has_dot_entry {
            self.report(Finding::for_map(
                FindingKind::Policy,
                format!("Export map does not have a \"{DOT_ENTRY}\" entry."),
            ))?;
        } else if !self.has_package_json_entry {
            self.report(Finding::for_map(
                FindingKind::Policy,
                format!("Export map does not have a \"{PACKAGE_JSON_ENTRY}\" entry."),
            ))?;
        }

        Ok(())
    }

    fn visit_entry(&mut self, entry: &'a ExportEntry) -> Step {
        let key = entry.key.as_str();
        tracing::trace!(entry = key, target = %entry.target, "checking entry");

        if !self.seen.insert(key) {
            self.report(Finding::new(FindingKind::Structural, key, format!("Duplicate entry \"{key}\".")))?;
        }

        if !key.starts_with('.') {
            self.report(Finding::new(
                FindingKind::Structural,
                key,
                format!("Export map entries must be relative and start with a \".\", got \"{key}\" instead."),
            ))?;
        }

        match key {
            DOT_ENTRY => self.has_dot_entry = true,
            PACKAGE_JSON_ENTRY => {
                self.has_package_json_entry = true;
                self.check_fixed_value(key, &entry.target)?;
            }
            ROOT_ENTRY => self.check_fixed_value(key, &entry.target)?,
            _ => {}
        }

        match &entry.target {
            ExportTarget::Path(path) => self.check_value(key, path, None),
            ExportTarget::Conditions(conditions) => self.visit_top_conditions(key, conditions),
            ExportTarget::Unsupported(kind) => self.report(Finding::new(
                FindingKind::Structural,
                key,
                format!("Entry \"{key}\" must map to a path or an object of conditions. Got {kind} instead"),
            )),
        }
    }

    /// `./package.json` and `./` must map to themselves.
    fn check_fixed_value(&mut self, key: &str, target: &ExportTarget) -> Step {
        if target.as_path() == Some(key) {
            return Ok(());
        }
        self.report(Finding::new(
            FindingKind::Policy,
            key,
            format!("Entry \"{key}\" should have value \"{key}\". Got \"{target}\" instead"),
        ))
    }

    fn visit_top_conditions(&mut self, key: &str, conditions: &[Condition]) -> Step {
        let mut last_order_index: Option<usize> = None;
        let mut order_reported = false;

        for condition in conditions {
            if let Some(index) = self.reference.position(&condition.name) {
                if !order_reported && last_order_index.is_some_and(|last| index < last) {
                    order_reported = true;
                    let finding = self.ordering_finding(key, conditions);
                    self.report(finding)?;
                }
                last_order_index = Some(index);
            }

            self.visit_condition(key, condition)?;
        }

        Ok(())
    }

    fn ordering_finding(&self, key: &str, conditions: &[Condition]) -> Finding {
        let actual: Vec<&str> = conditions.iter().map(|c| c.name.as_str()).collect();
        let expected = self.reference.expected_for(&actual);
        Finding::new(
            FindingKind::Ordering,
            key,
            format!(
                "Expected order of conditions: {}. Got {} in entry \"{key}\" instead",
                format_order(&expected),
                format_order(&actual)
            ),
        )
    }

    /// Rules for one condition. Nested conditions are checked the same way,
    /// without ordering.
    fn visit_condition(&mut self, key: &str, condition: &Condition) -> Step {
        let name = condition.name.as_str();

        if name.starts_with('.') {
            return self.report(Finding::new(
                FindingKind::Structural,
                key,
                format!("Entry type must not start with a dot. Got \"{name}\""),
            ));
        }

        match &condition.target {
            ExportTarget::Path(path) => {
                if name == IMPORT_CONDITION && !self.is_module && !path.ends_with(ESM_EXTENSION) {
                    return self.report(Finding::new(
                        FindingKind::Structural,
                        key,
                        format!(
                            "Value of entry type \"{IMPORT_CONDITION}\" must end with \"{ESM_EXTENSION}\". Got {path} instead"
                        ),
                    ));
                }
                self.check_value(key, path, Some(name))
            }
            ExportTarget::Conditions(nested) => {
                for inner in nested {
                    self.visit_condition(key, inner)?;
                }
                Ok(())
            }
            ExportTarget::Unsupported(kind) => self.report(Finding::new(
                FindingKind::Structural,
                key,
                format!("Condition \"{name}\" of entry \"{key}\" must map to a path. Got {kind} instead"),
            )),
        }
    }

    fn check_value(&mut self, key: &str, path: &str, condition: Option<&str>) -> Step {
        match validate_value(self.base_dir, key, path, condition) {
            Ok(()) => Ok(()),
            Err(finding) => self.report(finding),
        }
    }
}

/// Validate a manifest's export map, stopping at the first finding.
///
/// Targets are resolved against `base_dir`. An empty result means the map
/// passed. A manifest without `exports` yields no findings; use
/// [`check_manifest`](crate::exports::check_manifest) to tell that case apart.
pub fn validate(manifest: &Manifest, base_dir: &Path) -> Vec<Finding> {
    validate_with(manifest, base_dir, &CheckOptions::default())
}

/// Validate a manifest's export map with explicit options.
pub fn validate_with(manifest: &Manifest, base_dir: &Path, options: &CheckOptions) -> Vec<Finding> {
    match &manifest.exports {
        None => Vec::new(),
        Some(Exports::Invalid(kind)) => vec![Finding::for_map(
            FindingKind::Structural,
            format!("The \"exports\" field must be an object or a string. Got {kind} instead"),
        )],
        Some(Exports::Map(map)) => {
            let mut traversal = Traversal::new(map, manifest, base_dir, options.mode);
            // Halt only means the findings are complete
            let _ = traversal.run(map);
            traversal.findings
        }
    }
}
