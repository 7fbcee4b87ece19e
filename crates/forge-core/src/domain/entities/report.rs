use std::path::PathBuf;

use serde::Serialize;

/// Summary of a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub project_name: String,
    pub descriptor: PathBuf,
    pub executable: PathBuf,
    /// Component type names written by the reflection tool, in file order.
    pub component_types: Vec<String>,
}

impl BuildReport {
    /// Parse the reflection tool's output: one type name per line.
    pub fn parse_component_types(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_types_skip_blank_lines() {
        let types = BuildReport::parse_component_types("Transform\n\nSprite\r\nCamera\n");
        assert_eq!(types, vec!["Transform", "Sprite", "Camera"]);
    }

    #[test]
    fn empty_output_has_no_types() {
        assert!(BuildReport::parse_component_types("").is_empty());
    }
}
