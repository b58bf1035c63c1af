//! The recursive suite tree model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node in the suite tree.
///
/// `specs` maps leaf names to opaque JSON values, `suites` maps segment
/// names to child nodes. Both maps may be empty; a node with neither is a
/// valid empty node and serializes to `{}`. Trees are pure values with a
/// single owner, so no node is ever shared by two parents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuiteNode {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub specs: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub suites: BTreeMap<String, SuiteNode>,
}

impl SuiteNode {
    /// Create an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the node holds neither specs nor child suites.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty() && self.suites.is_empty()
    }

    /// Insert a leaf specification, replacing any previous value.
    pub fn with_spec(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.specs.insert(name.into(), value);
        self
    }

    /// Insert a child suite, replacing any previous child of that name.
    pub fn with_suite(mut self, name: impl Into<String>, child: SuiteNode) -> Self {
        self.suites.insert(name.into(), child);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_node_serializes_to_empty_object() {
        let node = SuiteNode::new();
        assert!(node.is_empty());
        assert_eq!(serde_json::to_string(&node).unwrap(), "{}");
    }

    #[test]
    fn round_trips_nested_structure() {
        let node = SuiteNode::new().with_suite(
            "genmaicha",
            SuiteNode::new()
                .with_spec("viewport", json!({ "width": 1280 }))
                .with_suite("oolong", SuiteNode::new().with_spec("data", json!(true))),
        );

        let raw = serde_json::to_string(&node).unwrap();
        let restored: SuiteNode = serde_json::from_str(&raw).unwrap();
        assert_eq!(restored, node);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let node: SuiteNode =
            serde_json::from_str(r#"{"suites":{"sencha":{}}}"#).unwrap();
        assert!(node.specs.is_empty());
        assert_eq!(node.suites.len(), 1);
        assert!(node.suites["sencha"].is_empty());
    }

    #[test]
    fn with_spec_replaces_previous_value() {
        let node = SuiteNode::new()
            .with_spec("data", json!(1))
            .with_spec("data", json!(2));
        assert_eq!(node.specs["data"], json!(2));
    }

    #[test]
    fn is_empty_considers_both_fields() {
        assert!(!SuiteNode::new().with_spec("data", json!(null)).is_empty());
        assert!(!SuiteNode::new()
            .with_suite("sencha", SuiteNode::new())
            .is_empty());
    }
}
