use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::ids::{NodeId, Role};
use crate::index::SpanIndex;
use crate::style::HighlightStyle;
use crate::tables::RuleTables;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("invalid analysis sheet: {0}")]
    Json(#[from] serde_json::Error),
}

/// A rendered derivation for one sentence side. Items are either words or
/// nested spans, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanNode {
    pub node: u32,
    #[serde(default)]
    pub items: Vec<SpanItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpanItem {
    Word(String),
    Span(SpanNode),
}

impl SpanNode {
    pub fn children(&self) -> impl Iterator<Item = &SpanNode> {
        self.items.iter().filter_map(|item| match item {
            SpanItem::Span(child) => Some(child),
            SpanItem::Word(_) => None,
        })
    }

    /// Words directly under this span, with their position in `items`.
    pub fn words(&self) -> impl Iterator<Item = (usize, &str)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(position, item)| match item {
                SpanItem::Word(word) => Some((position, word.as_str())),
                SpanItem::Span(_) => None,
            })
    }

    /// Node numbers in pre-order.
    pub fn nodes(&self) -> Vec<u32> {
        let mut nodes = vec![self.node];
        for child in self.children() {
            nodes.extend(child.nodes());
        }
        nodes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: u32,
    pub source: SpanNode,
    pub target: SpanNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Sentence {
    pub fn tree(&self, role: Role) -> &SpanNode {
        match role {
            Role::Source => &self.source,
            Role::Target => &self.target,
        }
    }
}

/// Everything the viewer needs for one page: sentences, lookup tables and
/// highlight colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSheet {
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    #[serde(flatten)]
    pub tables: RuleTables,
    #[serde(default)]
    pub style: HighlightStyle,
}

impl AnalysisSheet {
    pub fn from_json(json: &str) -> Result<Self, SheetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a sheet and completes its `parentref` table from span nesting.
    pub fn load(json: &str) -> Result<Self, SheetError> {
        let mut sheet = Self::from_json(json)?;
        sheet.derive_parentref();
        Ok(sheet)
    }

    /// Fills in `parentref` from span nesting. Entries already present win.
    pub fn derive_parentref(&mut self) {
        for sentence in &self.sentences {
            for role in Role::iter() {
                link_children(sentence.id, sentence.tree(role), &mut self.tables.parentref);
            }
        }
    }

    pub fn validate(&self) -> Vec<SheetIssue> {
        let mut issues = Vec::new();
        let index = SpanIndex::from_sheet(self);

        for sentence in &self.sentences {
            for role in Role::iter() {
                let mut seen = BTreeSet::new();
                for node in sentence.tree(role).nodes() {
                    let node = NodeId::new(sentence.id, node);
                    if !seen.insert(node) {
                        issues.push(SheetIssue::DuplicateNode { node, role });
                    }
                }
            }
        }

        for node in index.node_ids() {
            for role in Role::iter() {
                if self.tables.rule(node, role).is_none() {
                    issues.push(SheetIssue::MissingRule { node, role });
                }
            }
        }

        for (&child, &parent) in &self.tables.parentref {
            if !index.contains(child) {
                issues.push(SheetIssue::UnknownChild { child });
            }
            if !index.contains(parent) {
                issues.push(SheetIssue::UnknownParent { child, parent });
            }
        }

        issues.extend(
            parent_cycles(&self.tables.parentref)
                .into_iter()
                .map(|node| SheetIssue::ParentCycle { node }),
        );

        issues
    }
}

fn link_children(group: u32, span: &SpanNode, parentref: &mut BTreeMap<NodeId, NodeId>) {
    let parent = NodeId::new(group, span.node);
    for child in span.children() {
        parentref
            .entry(NodeId::new(group, child.node))
            .or_insert(parent);
        link_children(group, child, parentref);
    }
}

/// Smallest node of every loop in the parent chain.
fn parent_cycles(parentref: &BTreeMap<NodeId, NodeId>) -> BTreeSet<NodeId> {
    let mut cycles = BTreeSet::new();
    for &start in parentref.keys() {
        let mut chain = vec![start];
        let mut current = start;
        while let Some(&next) = parentref.get(&current) {
            if let Some(pos) = chain.iter().position(|&node| node == next) {
                if let Some(&smallest) = chain[pos..].iter().min() {
                    cycles.insert(smallest);
                }
                break;
            }
            chain.push(next);
            current = next;
        }
    }
    cycles
}

/// Something in a sheet that degrades the viewer without stopping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetIssue {
    MissingRule { node: NodeId, role: Role },
    DuplicateNode { node: NodeId, role: Role },
    UnknownChild { child: NodeId },
    UnknownParent { child: NodeId, parent: NodeId },
    ParentCycle { node: NodeId },
}

impl fmt::Display for SheetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetIssue::MissingRule { node, role } => {
                write!(f, "node {node} has no `{}` rule", node.rule_key(*role))
            }
            SheetIssue::DuplicateNode { node, role } => {
                write!(f, "node {node} appears more than once in the {role} tree")
            }
            SheetIssue::UnknownChild { child } => {
                write!(f, "parentref entry for {child} names no rendered node")
            }
            SheetIssue::UnknownParent { child, parent } => {
                write!(f, "parent {parent} of {child} names no rendered node")
            }
            SheetIssue::ParentCycle { node } => {
                write!(f, "parentref loops back through {node}")
            }
        }
    }
}
