use std::collections::BTreeMap;

use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::ids::{ElementId, IdError, NodeId, RangeId, Role, TextSpanId};
use crate::sheet::{AnalysisSheet, SpanNode};

/// The elements styled together when a node is highlighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeElements {
    pub texts: Vec<TextSpanId>,
    pub ranges: Vec<RangeId>,
}

/// Node id to the elements it owns, built once per page so highlighting
/// never has to scan element ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanIndex {
    nodes: BTreeMap<NodeId, NodeElements>,
}

impl SpanIndex {
    pub fn from_sheet(sheet: &AnalysisSheet) -> Self {
        let mut index = Self::default();
        for sentence in &sheet.sentences {
            for role in Role::iter() {
                index.insert_tree(sentence.id, role, sentence.tree(role));
            }
        }
        debug!(nodes = index.nodes.len(), "built span index from sheet");
        index
    }

    /// Builds the index from the ids found on an existing page. Ids that are
    /// neither text nor range elements are skipped; malformed ones are
    /// logged and skipped.
    pub fn from_dom_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for id in ids {
            let id = id.as_ref();
            match id.parse::<ElementId>() {
                Ok(element) => index.insert(element),
                Err(IdError::WrongPrefix { .. }) => {}
                Err(err) => warn!(%err, "skipping element"),
            }
        }
        index
    }

    pub fn insert(&mut self, element: ElementId) {
        let entry = self.nodes.entry(element.node()).or_default();
        match element {
            ElementId::Text(span) => entry.texts.push(span),
            ElementId::Range(range) => entry.ranges.push(range),
        }
    }

    fn insert_tree(&mut self, group: u32, role: Role, span: &SpanNode) {
        let node = NodeId::new(group, span.node);
        let entry = self.nodes.entry(node).or_default();
        entry.ranges.push(RangeId::new(node, role));
        entry.texts.extend(
            span.words()
                .map(|(position, _)| TextSpanId::new(node, position, role)),
        );
        for child in span.children() {
            self.insert_tree(group, role, child);
        }
    }

    pub fn elements(&self, node: NodeId) -> Option<&NodeElements> {
        self.nodes.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_index_matches_page_ids() {
        let sheet = AnalysisSheet::from_json(
            r#"{
                "sentences": [{
                    "id": 0,
                    "source": { "node": 1, "items": ["a", { "node": 2, "items": ["b", "c"] }] },
                    "target": { "node": 1, "items": [{ "node": 2, "items": ["C"] }, "A"] }
                }]
            }"#,
        )
        .unwrap();
        let index = SpanIndex::from_sheet(&sheet);
        assert_eq!(index.len(), 2);

        let root = index.elements(NodeId::new(0, 1)).unwrap();
        let texts: Vec<String> = root.texts.iter().map(ToString::to_string).collect();
        assert_eq!(texts, vec!["text-0-1-0-src", "text-0-1-1-trg"]);
        let ranges: Vec<String> = root.ranges.iter().map(ToString::to_string).collect();
        assert_eq!(ranges, vec!["range-0-1-src", "range-0-1-trg"]);

        let inner = index.elements(NodeId::new(0, 2)).unwrap();
        let texts: Vec<String> = inner.texts.iter().map(ToString::to_string).collect();
        assert_eq!(
            texts,
            vec!["text-0-2-0-src", "text-0-2-1-src", "text-0-2-0-trg"]
        );
    }

    #[test]
    fn dom_ids_group_by_node_not_by_prefix() {
        // `text-1-23-...` must not be picked up for node 1-2
        let index = SpanIndex::from_dom_ids([
            "text-1-2-0-src",
            "text-1-23-0-src",
            "range-1-2-src",
            "rules",
            "text-1",
        ]);
        let node = index.elements(NodeId::new(1, 2)).unwrap();
        assert_eq!(node.texts.len(), 1);
        assert_eq!(node.ranges.len(), 1);
        assert!(index.contains(NodeId::new(1, 23)));
        assert_eq!(index.len(), 2);
    }
}
