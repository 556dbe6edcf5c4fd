//! Input parsing for JSON test-case descriptions
//!
//! Validation walks the raw JSON value by hand so every error can name the
//! offending field path (`steps[2].args[1]`).

use serde_json::{Map, Value};

use crate::error::{ConvertError, Result};

/// One step of a test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub action: String,
    pub args: Vec<String>,
}

impl Step {
    pub fn new(action: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            action: action.into(),
            args,
        }
    }
}

/// A parsed test case
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TestCase {
    pub name: String,
    pub documentation: Option<String>,
    pub tags: Vec<String>,
    pub steps: Vec<Step>,
}

impl TestCase {
    /// Parse and validate a test case from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ConvertError::malformed("$", e.to_string()))?;
        Self::from_value(&value)
    }

    /// Validate an already-parsed JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| ConvertError::malformed("$", "expected a JSON object"))?;

        let name = required_str(obj, "name", "name")?;
        if name.trim().is_empty() {
            return Err(ConvertError::malformed("name", "must not be empty"));
        }

        let documentation = match obj.get("documentation") {
            None | Some(Value::Null) => None,
            Some(Value::String(doc)) => Some(doc.clone()),
            Some(_) => return Err(ConvertError::malformed("documentation", "expected a string")),
        };

        let tags = match obj.get("tags") {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => string_array(value, "tags")?,
        };

        let steps_value = obj
            .get("steps")
            .ok_or_else(|| ConvertError::malformed("steps", "missing required field"))?;
        let steps = steps_value
            .as_array()
            .ok_or_else(|| ConvertError::malformed("steps", "expected an array"))?
            .iter()
            .enumerate()
            .map(|(idx, step)| parse_step(step, idx))
            .collect::<Result<Vec<_>>>()?;

        Ok(TestCase {
            name: name.to_string(),
            documentation,
            tags,
            steps,
        })
    }
}

fn parse_step(value: &Value, idx: usize) -> Result<Step> {
    let path = format!("steps[{}]", idx);
    let obj = value
        .as_object()
        .ok_or_else(|| ConvertError::malformed(path.clone(), "expected an object"))?;

    let action_path = format!("{}.action", path);
    let action = required_str(obj, "action", &action_path)?;
    if action.trim().is_empty() {
        return Err(ConvertError::malformed(action_path, "must not be empty"));
    }

    let args = match obj.get("args") {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => string_array(value, &format!("{}.args", path))?,
    };

    Ok(Step::new(action, args))
}

fn required_str<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a str> {
    match obj.get(key) {
        None => Err(ConvertError::malformed(path, "missing required field")),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ConvertError::malformed(path, "expected a string")),
    }
}

fn string_array(value: &Value, path: &str) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| ConvertError::malformed(path, "expected an array of strings"))?;
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_str()
                .map(String::from)
                .ok_or_else(|| {
                    ConvertError::malformed(format!("{}[{}]", path, idx), "expected a string")
                })
        })
        .collect()
}
