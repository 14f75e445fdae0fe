//! The ordered set of standard target resolutions.
//!
//! Order carries meaning only for tie-breaking in the selector: when two
//! entries are equally close to an observed resolution, the one listed
//! first wins.

use crate::error::{CoreError, CoreResult};
use crate::resolution::Resolution;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Width/height pairs of the default catalog, largest first.
pub const DEFAULT_STANDARD_RESOLUTIONS: [(u32, u32); 5] = [
    (1920, 1080), // 1080p
    (1280, 720),  // 720p
    (854, 480),   // 480p
    (640, 360),   // 360p
    (426, 240),   // 240p
];

/// Non-empty, duplicate-free, ordered list of standard resolutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardCatalog {
    entries: Vec<Resolution>,
}

impl StandardCatalog {
    /// Builds a catalog, rejecting empty lists and duplicate entries.
    pub fn new(entries: Vec<Resolution>) -> CoreResult<Self> {
        if entries.is_empty() {
            return Err(CoreError::Config(
                "standard catalog must contain at least one resolution".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(*entry) {
                return Err(CoreError::Config(format!(
                    "standard catalog lists {entry} more than once"
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Loads a catalog from a JSON array of `{"width", "height"}` objects
    /// or `"WxH"` strings.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!(
                "failed to read catalog file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&content).map_err(|e| match e {
            CoreError::JsonParseError(msg) => {
                CoreError::JsonParseError(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn from_json_str(content: &str) -> CoreResult<Self> {
        let entries: Vec<Resolution> = serde_json::from_str(content)
            .map_err(|e| CoreError::JsonParseError(format!("standard catalog: {e}")))?;
        Self::new(entries)
    }

    #[must_use]
    pub fn entries(&self) -> &[Resolution] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resolution> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// False for every catalog built through [`StandardCatalog::new`] or `default`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when `resolution` is one of the standard entries.
    #[must_use]
    pub fn contains(&self, resolution: &Resolution) -> bool {
        self.entries.contains(resolution)
    }
}

impl Default for StandardCatalog {
    fn default() -> Self {
        let entries = DEFAULT_STANDARD_RESOLUTIONS
            .iter()
            .filter_map(|&(w, h)| Resolution::new(w, h).ok())
            .collect();
        Self { entries }
    }
}

impl std::fmt::Display for StandardCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.entries.iter().map(ToString::to_string).collect();
        write!(f, "{}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(w: u32, h: u32) -> Resolution {
        Resolution::new(w, h).unwrap()
    }

    #[test]
    fn test_default_catalog_order() {
        let catalog = StandardCatalog::default();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.entries()[0], res(1920, 1080));
        assert_eq!(catalog.entries()[4], res(426, 240));
        assert_eq!(
            catalog.to_string(),
            "1920x1080, 1280x720, 854x480, 640x360, 426x240"
        );
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        assert!(matches!(
            StandardCatalog::new(vec![res(640, 360), res(640, 360)]),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(StandardCatalog::new(vec![]), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_contains() {
        let catalog = StandardCatalog::default();
        assert!(catalog.contains(&res(854, 480)));
        assert!(!catalog.contains(&res(854, 476)));
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_from_json_str() {
        let catalog = StandardCatalog::from_json_str(r#"["3840x2160", {"width": 1920, "height": 1080}]"#)
            .unwrap();
        assert_eq!(catalog.entries(), &[res(3840, 2160), res(1920, 1080)]);

        assert!(matches!(
            StandardCatalog::from_json_str("not json"),
            Err(CoreError::JsonParseError(_))
        ));
        assert!(matches!(
            StandardCatalog::from_json_str(r#"["640x360", "640x360"]"#),
            Err(CoreError::Config(_))
        ));
    }
}
