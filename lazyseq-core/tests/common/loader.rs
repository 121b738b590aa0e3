//! Fixture loading from YAML files

use serde::Deserialize;
use std::path::Path;

/// A single pipeline case from a fixture file
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub desc: String,
    pub source: Source,
    #[serde(default)]
    pub ops: Vec<Step>,
    #[serde(default = "to_list")]
    pub terminal: Step,
    pub expect: Outcome,
    /// Upper bound on values pulled out of the source
    #[serde(default)]
    pub max_pulls: Option<usize>,
}

fn to_list() -> Step {
    Step::Bare("to_list".to_string())
}

/// Logical content of the backing source
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Source {
    /// Finite list of values
    List(Vec<i64>),
    /// `naturals, naturals + 1, ...` forever
    Naturals { naturals: i64 },
    /// Finite list, then a body failure with this message
    Failing { values: Vec<i64>, fail: String },
}

/// A combinator or terminal - either a bare name or [name, argument]
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Bare(String),
    WithArg(String, Arg),
}

impl Step {
    pub fn name(&self) -> &str {
        match self {
            Step::Bare(name) => name,
            Step::WithArg(name, _) => name,
        }
    }

    pub fn arg(&self) -> Option<&Arg> {
        match self {
            Step::Bare(_) => None,
            Step::WithArg(_, arg) => Some(arg),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Arg {
    Int(i64),
    List(Vec<i64>),
    Name(String),
}

/// Terminal result, both expected (from YAML) and actual
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Values(Vec<i64>),
    Scalar(i64),
    Flag(bool),
    Error { error: String },
    /// `null`: an optional result that was absent
    Missing,
}

impl From<Option<i64>> for Outcome {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Outcome::Missing, Outcome::Scalar)
    }
}

/// Load all test cases from a YAML fixture file
pub fn load_fixtures(path: &Path) -> Vec<TestCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load fixtures from the standard fixtures directory
pub fn load_fixtures_by_name(name: &str) -> Vec<TestCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));
    load_fixtures(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_pipelines() {
        let cases = load_fixtures_by_name("pipelines");
        assert!(!cases.is_empty());
        assert!(cases.iter().any(|c| c.id == "filter_map_take"));
    }

    #[test]
    fn test_step_forms() {
        let steps: Vec<Step> =
            serde_yaml::from_str("[pair_sum, [take, 2], [map, square]]").unwrap();
        assert_eq!(steps[0].name(), "pair_sum");
        assert!(matches!(steps[1].arg(), Some(Arg::Int(2))));
        assert!(matches!(steps[2].arg(), Some(Arg::Name(n)) if n == "square"));
    }
}
