//! Tests for the export map rules.

use super::*;
use crate::manifest::{ExportMap, ExportTarget, Manifest};
use crate::test_utils::{PackageFixture, init_test_logging};
use anyhow::Result;
use serde_json::json;

fn path(p: &str) -> ExportTarget {
    ExportTarget::path(p)
}

fn conds(pairs: &[(&str, &str)]) -> ExportTarget {
    ExportTarget::conditions(pairs.iter().map(|(name, p)| (*name, ExportTarget::path(*p))))
}

/// A package with the files most tests point at.
fn package() -> Result<PackageFixture> {
    init_test_logging(None);
    PackageFixture::new()?
        .with_file("index.js")?
        .with_file("index.mjs")?
        .with_file("index.cjs")?
        .with_file("foo.js")?
        .with_file("foo.mjs")?
        .with_file("foo.cjs")?
        .with_dir("lib")?
        .with_raw_manifest("{}")
}

fn base_map() -> ExportMap {
    ExportMap::new().entry(".", path("./index.js")).entry("./package.json", path("./package.json"))
}

fn single_finding(findings: Vec<Finding>) -> Finding {
    assert_eq!(findings.len(), 1, "expected exactly one finding: {findings:?}");
    findings.into_iter().next().unwrap()
}

#[test]
fn test_minimal_valid_map_passes() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(base_map());

    assert!(validate(&manifest, pkg.path()).is_empty());
    Ok(())
}

#[test]
fn test_missing_exports_is_skipped() -> Result<()> {
    let pkg = package()?.with_manifest(&json!({ "name": "pkg" }))?;
    let manifest = Manifest::load(&pkg.manifest_path())?;

    assert_eq!(check_manifest(&manifest, &CheckOptions::default()), FileOutcome::Skipped);
    assert!(validate(&manifest, pkg.path()).is_empty());
    Ok(())
}

#[test]
fn test_missing_dot_entry() -> Result<()> {
    let pkg = package()?;
    let manifest =
        Manifest::new().with_exports(ExportMap::new().entry("./package.json", path("./package.json")));

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Policy);
    assert_eq!(finding.message, "Export map does not have a \".\" entry.");
    Ok(())
}

#[test]
fn test_missing_package_json_entry() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(ExportMap::new().entry(".", path("./index.js")));

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Policy);
    assert!(finding.message.contains("\"./package.json\" entry"));
    Ok(())
}

#[test]
fn test_missing_dot_reported_before_missing_package_json() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(ExportMap::new().entry("./foo", path("./foo.js")));

    let findings = validate_with(&manifest, pkg.path(), &CheckOptions::new(ValidationMode::Exhaustive));
    let finding = single_finding(findings);
    assert!(finding.message.contains("\".\" entry"));
    Ok(())
}

#[test]
fn test_wrong_package_json_value() -> Result<()> {
    let pkg = package()?.with_file("pkg.json")?;
    let manifest = Manifest::new().with_exports(
        ExportMap::new().entry(".", path("./index.js")).entry("./package.json", path("./pkg.json")),
    );

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Policy);
    assert_eq!(
        finding.message,
        "Entry \"./package.json\" should have value \"./package.json\". Got \"./pkg.json\" instead"
    );
    Ok(())
}

#[test]
fn test_root_entry_is_optional_but_checked() -> Result<()> {
    let pkg = package()?;

    let manifest = Manifest::new().with_exports(base_map().entry("./", path("./")));
    assert!(validate(&manifest, pkg.path()).is_empty());

    let manifest = Manifest::new().with_exports(base_map().entry("./", path("./lib/")));
    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Policy);
    assert!(finding.message.contains("Entry \"./\" should have value \"./\""));
    Ok(())
}

#[test]
fn test_duplicate_entry() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(base_map().entry(".", path("./index.js")));

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Structural);
    assert_eq!(finding.message, "Duplicate entry \".\".");
    Ok(())
}

#[test]
fn test_duplicate_entry_from_raw_json() -> Result<()> {
    let pkg = package()?.with_raw_manifest(
        r#"{"exports": {".": "./index.js", "./package.json": "./package.json", ".": "./foo.js"}}"#,
    )?;
    let manifest = Manifest::load(&pkg.manifest_path())?;

    let outcome = check_manifest(&manifest, &CheckOptions::default());
    assert!(outcome.findings()[0].message.contains("Duplicate entry"));
    Ok(())
}

#[test]
fn test_entry_key_not_relative() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(base_map().entry("foo", path("./foo.js")));

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Structural);
    assert!(finding.message.contains("got \"foo\" instead"));
    Ok(())
}

#[test]
fn test_direct_target_not_relative() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(
        ExportMap::new().entry(".", path("index.js")).entry("./package.json", path("./package.json")),
    );

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Structural);
    assert!(finding.message.contains("Got \"index.js\""));
    Ok(())
}

#[test]
fn test_missing_file() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(
        ExportMap::new().entry(".", path("./missing.js")).entry("./package.json", path("./package.json")),
    );

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Referential);
    assert_eq!(finding.entry.as_deref(), Some("."));
    assert!(finding.message.contains("File not found for \".\""));
    Ok(())
}

#[test]
fn test_wildcard_entry_passes() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(base_map().entry("./utils/*", path("./lib/*.js")));

    assert!(validate(&manifest, pkg.path()).is_empty());
    Ok(())
}

#[test]
fn test_wildcard_rules() -> Result<()> {
    let pkg = package()?;

    let manifest = Manifest::new().with_exports(base_map().entry("./*-utils", path("./lib/*.js")));
    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Shape);
    assert!(finding.message.contains("wildcard character"));

    let manifest = Manifest::new().with_exports(base_map().entry("./utils/*", path("./lib/index.js")));
    let finding = single_finding(validate(&manifest, pkg.path()));
    assert!(finding.message.contains("Didn't find a wildcard"));

    let manifest = Manifest::new().with_exports(base_map().entry("./utils/*", path("./dist/*.js")));
    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Referential);
    assert!(finding.message.starts_with("Folder \"./dist\" doesn't exist"));
    Ok(())
}

#[test]
fn test_import_requires_mjs_without_module_type() -> Result<()> {
    let pkg = package()?;
    let map = ExportMap::new()
        .entry(".", conds(&[("import", "./index.js"), ("require", "./index.cjs")]))
        .entry("./package.json", path("./package.json"));

    let finding = single_finding(validate(&Manifest::new().with_exports(map.clone()), pkg.path()));
    assert_eq!(finding.kind, FindingKind::Structural);
    assert_eq!(finding.message, "Value of entry type \"import\" must end with \".mjs\". Got ./index.js instead");

    let manifest = Manifest::new().with_exports(map).with_type("module");
    assert!(validate(&manifest, pkg.path()).is_empty());
    Ok(())
}

#[test]
fn test_condition_name_starting_with_dot() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(
        ExportMap::new()
            .entry(".", conds(&[(".import", "./index.mjs")]))
            .entry("./package.json", path("./package.json")),
    );

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.message, "Entry type must not start with a dot. Got \".import\"");
    Ok(())
}

#[test]
fn test_condition_target_checked_on_disk() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(
        ExportMap::new()
            .entry(".", conds(&[("import", "./index.mjs"), ("require", "./gone.cjs")]))
            .entry("./package.json", path("./package.json")),
    );

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.message, "File not found for \".\" require: ./gone.cjs");
    Ok(())
}

#[test]
fn test_inconsistent_condition_order() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(
        ExportMap::new()
            .entry(".", conds(&[("import", "./index.mjs"), ("require", "./index.cjs"), ("default", "./index.js")]))
            .entry("./foo", conds(&[("require", "./foo.cjs"), ("import", "./foo.mjs")]))
            .entry("./package.json", path("./package.json")),
    );

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Ordering);
    assert_eq!(
        finding.message,
        "Expected order of conditions: \"import\" -> \"require\". Got \"require\" -> \"import\" in entry \"./foo\" instead"
    );
    Ok(())
}

#[test]
fn test_reference_order_taken_from_richest_entry() -> Result<()> {
    let pkg = package()?;
    // "." lists two conditions in the opposite order to the richest entry
    let manifest = Manifest::new().with_exports(
        ExportMap::new()
            .entry(".", conds(&[("default", "./index.js"), ("import", "./index.mjs")]))
            .entry("./foo", conds(&[("import", "./foo.mjs"), ("require", "./foo.cjs"), ("default", "./foo.js")]))
            .entry("./package.json", path("./package.json")),
    );

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Ordering);
    assert_eq!(finding.entry.as_deref(), Some("."));
    Ok(())
}

#[test]
fn test_consistent_condition_order_passes() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(
        ExportMap::new()
            .entry(".", conds(&[("import", "./index.mjs"), ("require", "./index.cjs"), ("default", "./index.js")]))
            .entry("./foo", conds(&[("import", "./foo.mjs"), ("default", "./foo.js")]))
            .entry("./package.json", path("./package.json")),
    );

    assert!(validate(&manifest, pkg.path()).is_empty());
    Ok(())
}

#[test]
fn test_unknown_conditions_do_not_affect_order() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(
        ExportMap::new()
            .entry(".", conds(&[("import", "./index.mjs"), ("require", "./index.cjs"), ("default", "./index.js")]))
            .entry("./foo", conds(&[("import", "./foo.mjs"), ("browser", "./foo.js"), ("require", "./foo.cjs")]))
            .entry("./package.json", path("./package.json")),
    );

    assert!(validate(&manifest, pkg.path()).is_empty());
    Ok(())
}

#[test]
fn test_nested_conditions_are_checked() -> Result<()> {
    let pkg = package()?;
    let nested = ExportTarget::conditions([
        ("node", conds(&[("import", "./index.mjs"), ("require", "./missing.cjs")])),
        ("default", path("./index.js")),
    ]);
    let manifest = Manifest::new().with_exports(
        ExportMap::new().entry(".", nested).entry("./package.json", path("./package.json")),
    );

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.message, "File not found for \".\" require: ./missing.cjs");
    Ok(())
}

#[test]
fn test_unsupported_target_shape() -> Result<()> {
    let pkg = package()?.with_raw_manifest(
        r#"{"exports": {".": ["./index.js"], "./package.json": "./package.json"}}"#,
    )?;
    let manifest = Manifest::load(&pkg.manifest_path())?;

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert_eq!(finding.kind, FindingKind::Structural);
    assert!(finding.message.contains("Got an array instead"));
    Ok(())
}

#[test]
fn test_invalid_exports_field() -> Result<()> {
    let pkg = package()?.with_raw_manifest(r#"{"exports": 42}"#)?;
    let manifest = Manifest::load(&pkg.manifest_path())?;

    let outcome = check_manifest(&manifest, &CheckOptions::default());
    assert!(outcome.is_failure());
    assert!(outcome.findings()[0].message.contains("\"exports\" field must be an object"));
    Ok(())
}

#[test]
fn test_fail_fast_stops_at_first_finding() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(
        ExportMap::new()
            .entry("foo", path("./foo.js"))
            .entry(".", path("./missing.js"))
            .entry("./package.json", path("./nope.json")),
    );

    let finding = single_finding(validate(&manifest, pkg.path()));
    assert!(finding.message.contains("\"foo\""));
    Ok(())
}

#[test]
fn test_exhaustive_collects_every_finding() -> Result<()> {
    let pkg = package()?;
    let manifest = Manifest::new().with_exports(
        ExportMap::new()
            .entry("foo", path("./foo.js"))
            .entry(".", path("./missing.js"))
            .entry("./package.json", path("./nope.json")),
    );

    let findings = validate_with(&manifest, pkg.path(), &CheckOptions::new(ValidationMode::Exhaustive));
    let kinds: Vec<FindingKind> = findings.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FindingKind::Structural,  // "foo" is not relative
            FindingKind::Referential, // ./missing.js
            FindingKind::Policy,      // ./package.json value
            FindingKind::Referential, // ./nope.json
        ]
    );
    Ok(())
}

#[test]
fn test_end_to_end_pass_and_fail() -> Result<()> {
    let pkg = package()?.with_manifest(&json!({
        "exports": { ".": "./index.js", "./package.json": "./package.json" }
    }))?;
    assert_eq!(check_file(&pkg.manifest_path(), &CheckOptions::default())?, FileOutcome::Passed);

    let pkg = pkg.with_manifest(&json!({
        "exports": { ".": "./missing.js", "./package.json": "./package.json" }
    }))?;
    let outcome = check_file(&pkg.manifest_path(), &CheckOptions::default())?;
    assert!(outcome.findings()[0].message.contains("File not found for \".\""));
    Ok(())
}
