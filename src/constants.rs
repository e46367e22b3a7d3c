//! Well-known names used throughout the export map checks.
//!
//! Entry keys and file names that carry fixed meaning in a package manifest
//! live here so the loader, validator, and reporter agree on them.

/// Manifest file checked when no paths are given on the command line.
pub const DEFAULT_MANIFEST_FILE: &str = "package.json";

/// The main entry point of a package.
pub const DOT_ENTRY: &str = ".";

/// Entry that must expose the manifest itself.
pub const PACKAGE_JSON_ENTRY: &str = "./package.json";

/// Legacy folder export. Optional, but must map to itself when present.
pub const ROOT_ENTRY: &str = "./";

/// Condition whose target must use ES module syntax.
pub const IMPORT_CONDITION: &str = "import";

/// Extension required for `import` targets unless the package is `"type": "module"`.
pub const ESM_EXTENSION: &str = ".mjs";

/// Value of the `type` field that makes `.js` files ES modules.
pub const MODULE_TYPE: &str = "module";

/// Subpath pattern character.
pub const WILDCARD: char = '*';
