//! The `.wproj` project descriptor.
//!
//! A descriptor is a YAML mapping. Only three keys are consumed:
//!
//! ```yaml
//! projectName: Demo           # required
//! include: "demo.h"           # forwarded verbatim into generated headers
//! componentList: "A, B, C"    # forwarded verbatim; `initCode` is accepted as an alias
//! ```
//!
//! Values are opaque. Parsing only checks that `projectName` is present.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::domain::error::DomainError;

/// File extension of project descriptors, without the dot.
pub const DESCRIPTOR_EXTENSION: &str = "wproj";

const PROJECT_NAME_KEY: &str = "projectName";
const INCLUDE_KEY: &str = "include";
const COMPONENT_LIST_KEY: &str = "componentList";
const LEGACY_INIT_CODE_KEY: &str = "initCode";

/// Build parameters extracted from a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescriptor {
    project_name: String,
    include: String,
    component_list: String,
    missing_optional: Vec<&'static str>,
}

impl ProjectDescriptor {
    /// Parse descriptor text. Pure: reading the file happens elsewhere.
    ///
    /// # Errors
    ///
    /// - [`DomainError::MalformedDescriptor`] if the text is not YAML, the
    ///   root is not a mapping, or a consumed key holds a non-scalar value.
    /// - [`DomainError::MissingField`] if `projectName` is absent or empty.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let root: Value = if is_blank_document(raw) {
            Value::Null
        } else {
            serde_yaml::from_str(raw).map_err(|e| DomainError::MalformedDescriptor {
                reason: e.to_string(),
            })?
        };

        let empty = Mapping::new();
        let map = match &root {
            Value::Mapping(map) => map,
            // An empty document has no keys at all.
            Value::Null => &empty,
            other => {
                return Err(DomainError::MalformedDescriptor {
                    reason: format!("expected a mapping at the root, found {}", kind_of(other)),
                });
            }
        };

        let project_name = scalar(map, PROJECT_NAME_KEY)?
            .filter(|name| !name.is_empty())
            .ok_or(DomainError::MissingField {
                field: PROJECT_NAME_KEY,
            })?;

        let mut missing_optional = Vec::new();

        let include = scalar(map, INCLUDE_KEY)?.unwrap_or_else(|| {
            missing_optional.push(INCLUDE_KEY);
            String::new()
        });

        let component_list = match scalar(map, COMPONENT_LIST_KEY)? {
            Some(list) => list,
            None => scalar(map, LEGACY_INIT_CODE_KEY)?.unwrap_or_else(|| {
                missing_optional.push(COMPONENT_LIST_KEY);
                String::new()
            }),
        };

        Ok(Self {
            project_name,
            include,
            component_list,
            missing_optional,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn include(&self) -> &str {
        &self.include
    }

    pub fn component_list(&self) -> &str {
        &self.component_list
    }

    /// Name of the distributed runtime executable.
    pub fn executable_name(&self) -> &str {
        &self.project_name
    }

    /// Name of the CMake target that produces the runtime executable.
    pub fn executable_target_name(&self) -> String {
        format!("{}Runtime", self.project_name)
    }

    /// Optional keys that were absent and defaulted to an empty string.
    pub fn missing_optional(&self) -> &[&'static str] {
        &self.missing_optional
    }
}

fn is_blank_document(raw: &str) -> bool {
    raw.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

/// Read `key` as text. Absent and null both yield `None`.
fn scalar(map: &Mapping, key: &'static str) -> Result<Option<String>, DomainError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(DomainError::MalformedDescriptor {
            reason: format!("\"{key}\" must be a scalar, found {}", kind_of(other)),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
