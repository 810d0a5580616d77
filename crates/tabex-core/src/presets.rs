//! Built-in column sets for the scan dashboard's asset views

use crate::column::{ColumnDef, ColumnSpec};
use crate::error::{ExportError, Result};
use std::collections::BTreeMap;

const INVENTORY: &[(&str, &str)] = &[
    ("host", "Host"),
    ("port", "Port"),
    ("ip", "IP"),
    ("title", "Title"),
    ("status", "Status Code"),
    ("technologies", "Technologies"),
    ("labels", "Labels"),
    ("lastUpdated", "Last Updated"),
];

const GROUPS: &[(&str, &str)] = &[
    ("domain", "Domain"),
    ("totalServices", "Services"),
    ("status", "Status"),
    ("duration", "Duration"),
    ("lastUpdated", "Last Updated"),
];

const SCREENSHOTS: &[(&str, &str)] = &[
    ("host", "Host"),
    ("port", "Port"),
    ("ip", "IP"),
    ("title", "Title"),
    ("status", "Status Code"),
    ("technologies", "Technologies"),
    ("lastUpdated", "Last Updated"),
];

const VULNERABILITIES: &[(&str, &str)] = &[
    ("name", "Vulnerability"),
    ("severity", "Severity"),
    ("host", "Host"),
    ("port", "Port"),
    ("template", "Template"),
    ("description", "Description"),
    ("createTime", "Discovered"),
];

const DIR_SCANS: &[(&str, &str)] = &[
    ("url", "URL"),
    ("path", "Path"),
    ("status", "Status Code"),
    ("size", "Size"),
    ("title", "Title"),
    ("createTime", "Discovered"),
];

const BUILTIN: &[(&str, &[(&str, &str)])] = &[
    ("inventory", INVENTORY),
    ("groups", GROUPS),
    ("screenshots", SCREENSHOTS),
    ("vulnerabilities", VULNERABILITIES),
    ("dir-scans", DIR_SCANS),
];

/// Names of the built-in presets
pub fn names() -> Vec<&'static str> {
    BUILTIN.iter().map(|(name, _)| *name).collect()
}

/// Column definitions of a built-in preset.
///
/// Matching ignores case, `-` and `_`, so `dirScans` finds `dir-scans`.
pub fn builtin(name: &str) -> Option<Vec<ColumnDef>> {
    let wanted = normalize(name);
    BUILTIN
        .iter()
        .find(|(preset, _)| normalize(preset) == wanted)
        .map(|(_, columns)| {
            columns
                .iter()
                .map(|(key, label)| ColumnDef::new(*key, *label))
                .collect()
        })
}

/// Resolve a preset, preferring user-defined sets over built-ins
pub fn get(name: &str, custom: &BTreeMap<String, Vec<ColumnDef>>) -> Result<Vec<ColumnSpec>> {
    let wanted = normalize(name);

    if let Some((_, defs)) = custom.iter().find(|(n, _)| normalize(n) == wanted) {
        return Ok(defs.iter().map(ColumnSpec::from).collect());
    }

    builtin(name)
        .map(|defs| defs.into_iter().map(ColumnSpec::from).collect())
        .ok_or_else(|| ExportError::UnknownPreset(name.to_string()))
}

/// Whether two preset names refer to the same preset
pub fn same_name(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        assert_eq!(
            names(),
            vec!["inventory", "groups", "screenshots", "vulnerabilities", "dir-scans"]
        );
    }

    #[test]
    fn test_inventory_columns() {
        let cols = builtin("inventory").unwrap();
        assert_eq!(cols.len(), 8);
        assert_eq!(cols[0], ColumnDef::new("host", "Host"));
        assert_eq!(cols[7], ColumnDef::new("lastUpdated", "Last Updated"));
    }

    #[test]
    fn test_name_normalization() {
        assert!(builtin("dirScans").is_some());
        assert!(builtin("DIR_SCANS").is_some());
        assert!(builtin("nope").is_none());
    }

    #[test]
    fn test_same_name() {
        assert!(same_name("dir_scans", "Dir-Scans"));
        assert!(!same_name("groups", "group"));
    }

    #[test]
    fn test_custom_overrides_builtin() {
        let mut custom = BTreeMap::new();
        custom.insert(
            "inventory".to_string(),
            vec![ColumnDef::new("host", "Hostname")],
        );

        let cols = get("Inventory", &custom).unwrap();
        assert_eq!(cols.len(), 1);
        assert_eq!(cols[0].label, "Hostname");
    }

    #[test]
    fn test_unknown_preset() {
        let err = get("missing", &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, ExportError::UnknownPreset(name) if name == "missing"));
    }
}
