use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ids::{NodeId, Role};

/// Placed between the source and target rule in the tooltip.
pub const RULE_SEPARATOR: &str = "<br/><br/>";

/// The page-supplied lookup tables: rule markup per node side, and the
/// parent of each nested node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTables {
    #[serde(default)]
    pub desc: BTreeMap<String, String>,
    #[serde(default)]
    pub parentref: BTreeMap<NodeId, NodeId>,
}

impl RuleTables {
    pub fn rule(&self, node: NodeId, role: Role) -> Option<&str> {
        self.desc.get(&node.rule_key(role)).map(String::as_str)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parentref.get(&node).copied()
    }

    pub fn insert_rule(&mut self, node: NodeId, role: Role, markup: impl Into<String>) {
        self.desc.insert(node.rule_key(role), markup.into());
    }

    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.parentref.insert(child, parent);
    }

    /// Source rule and target rule joined by [`RULE_SEPARATOR`]. A missing
    /// entry is rendered as `placeholder`.
    pub fn tooltip_markup(&self, node: NodeId, placeholder: &str) -> String {
        let src = self.rule_or_placeholder(node, Role::Source, placeholder);
        let trg = self.rule_or_placeholder(node, Role::Target, placeholder);
        format!("{src}{RULE_SEPARATOR}{trg}")
    }

    fn rule_or_placeholder<'a>(&'a self, node: NodeId, role: Role, placeholder: &'a str) -> &'a str {
        self.rule(node, role).unwrap_or_else(|| {
            warn!(%node, %role, "no rule description for node");
            placeholder
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_joins_both_rules() {
        let mut tables = RuleTables::default();
        let node = NodeId::new(3, 7);
        tables.insert_rule(node, Role::Source, "NP ( x0:DT x1:NN )");
        tables.insert_rule(node, Role::Target, "x1 x0");
        assert_eq!(
            tables.tooltip_markup(node, "undefined"),
            "NP ( x0:DT x1:NN )<br/><br/>x1 x0"
        );
    }

    #[test]
    fn missing_rule_uses_placeholder() {
        let mut tables = RuleTables::default();
        let node = NodeId::new(0, 1);
        tables.insert_rule(node, Role::Target, "\"a\"");
        assert_eq!(
            tables.tooltip_markup(node, "undefined"),
            "undefined<br/><br/>\"a\""
        );
    }

    #[test]
    fn tables_deserialize_from_page_shape() {
        let tables: RuleTables = serde_json::from_str(
            r#"{
                "desc": { "0-2-src": "x", "0-2-trg": "y" },
                "parentref": { "0-2": "0-1" }
            }"#,
        )
        .unwrap();
        assert_eq!(tables.parent(NodeId::new(0, 2)), Some(NodeId::new(0, 1)));
        assert_eq!(tables.parent(NodeId::new(0, 1)), None);
        assert_eq!(tables.rule(NodeId::new(0, 2), Role::Target), Some("y"));
    }

    #[test]
    fn bad_parentref_key_fails_to_load() {
        let result = serde_json::from_str::<RuleTables>(r#"{ "parentref": { "oops": "0-1" } }"#);
        assert!(result.is_err());
    }
}
