// ABOUTME: Mind map creation plugin producing a node tree and its markdown outline
// ABOUTME: Normalizes parent references and rejects dangling or cyclic hierarchies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Mind Map Plugin
//!
//! `create_mindmap` turns a title and a flat node list into a hierarchy. Each
//! node may name a `parentId`; an empty string or the literal `"null"` marks a
//! root. The markdown outline uses `#` for the title and one more `#` per
//! level, capped at `######`.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tutor_core::errors::RegistryError;
use uuid::Uuid;

use super::args::{invalid, parse_args};
use crate::plugins::{
    ListRule, ObjectSchema, PermissionSet, PluginDescriptor, TextRule, ToolCategory,
};
use crate::tools::{to_payload, PluginHandler, ToolContext, ToolResult};

/// Plugin id
pub const PLUGIN_ID: &str = "create_mindmap";

const MAX_TITLE_CHARS: usize = 200;
const MAX_NODES: usize = 100;
const MAX_HEADING_LEVEL: usize = 6;

#[derive(Debug, Deserialize)]
struct MindmapArgs {
    title: String,
    nodes: Vec<NodeArgs>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeArgs {
    #[serde(default)]
    id: Option<String>,
    label: String,
    #[serde(default)]
    parent_id: Option<String>,
}

/// One node of a finished mind map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapNode {
    /// Node id, caller supplied or generated
    pub id: String,
    /// Text shown on the node
    pub label: String,
    /// Parent node id; `None` for roots
    pub parent_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MindmapPayload {
    title: String,
    nodes: Vec<MindmapNode>,
    markdown: String,
    item_count: usize,
    created_at: String,
}

fn normalize_parent(parent_id: Option<String>) -> Option<String> {
    parent_id.filter(|parent| {
        let parent = parent.trim();
        !parent.is_empty() && parent != "null"
    })
}

fn build_nodes(nodes: Vec<NodeArgs>) -> ToolResult<Vec<MindmapNode>> {
    let nodes: Vec<MindmapNode> = nodes
        .into_iter()
        .map(|node| MindmapNode {
            id: node
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            label: node.label,
            parent_id: normalize_parent(node.parent_id),
        })
        .collect();

    {
        let mut seen = HashSet::new();
        for (index, node) in nodes.iter().enumerate() {
            if !seen.insert(node.id.as_str()) {
                return Err(invalid(
                    format!("nodes[{index}].id"),
                    format!("Duplicate node id '{}'", node.id),
                ));
            }
        }
        for (index, node) in nodes.iter().enumerate() {
            if let Some(parent) = &node.parent_id {
                if !seen.contains(parent.as_str()) {
                    return Err(invalid(
                        format!("nodes[{index}].parentId"),
                        format!("Node '{}' references unknown parent '{parent}'", node.label),
                    ));
                }
            }
        }
    }

    Ok(nodes)
}

/// Render the outline; returns `None` when some node is unreachable from a root
fn render_markdown(title: &str, nodes: &[MindmapNode]) -> Option<String> {
    let mut children: HashMap<Option<&str>, Vec<&MindmapNode>> = HashMap::new();
    for node in nodes {
        children
            .entry(node.parent_id.as_deref())
            .or_default()
            .push(node);
    }

    let mut markdown = format!("# {title}\n");
    let mut visited = 0;
    let mut stack: Vec<(&MindmapNode, usize)> = children
        .get(&None)
        .map(|roots| roots.iter().rev().map(|node| (*node, 2)).collect())
        .unwrap_or_default();

    while let Some((node, level)) = stack.pop() {
        visited += 1;
        let hashes = "#".repeat(level.min(MAX_HEADING_LEVEL));
        let _ = writeln!(markdown, "{hashes} {}", node.label);
        if let Some(kids) = children.get(&Some(node.id.as_str())) {
            stack.extend(kids.iter().rev().map(|kid| (*kid, level + 1)));
        }
    }

    (visited == nodes.len()).then_some(markdown)
}

/// Handler for `create_mindmap`
#[derive(Debug, Default)]
pub struct MindmapHandler;

#[async_trait]
impl PluginHandler for MindmapHandler {
    async fn handle(&self, args: Value, _context: &ToolContext) -> ToolResult<Value> {
        let args: MindmapArgs = parse_args(args)?;
        let title = args.title.trim();
        if title.is_empty() {
            return Err(invalid("title", "Title is required and must be a string"));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(invalid(
                "title",
                format!("Title must be at most {MAX_TITLE_CHARS} characters"),
            ));
        }
        if args.nodes.is_empty() {
            return Err(invalid(
                "nodes",
                "Nodes array is required and must not be empty",
            ));
        }
        if args.nodes.len() > MAX_NODES {
            return Err(invalid(
                "nodes",
                format!("Nodes array must contain at most {MAX_NODES} items"),
            ));
        }

        let nodes = build_nodes(args.nodes)?;
        let markdown = render_markdown(title, &nodes)
            .ok_or_else(|| invalid("nodes", "Nodes contain a parent cycle"))?;

        to_payload(&MindmapPayload {
            title: title.to_owned(),
            item_count: nodes.len(),
            nodes,
            markdown,
            created_at: Utc::now().to_rfc3339(),
        })
    }
}

/// Build the `create_mindmap` descriptor
///
/// # Errors
///
/// Returns `RegistryError` if the descriptor cannot be built
pub fn descriptor() -> Result<PluginDescriptor, RegistryError> {
    let node = ObjectSchema::new()
        .optional("id", TextRule::new())
        .field("label", TextRule::new().trimmed().min_chars(1))
        .optional("parentId", TextRule::new());
    let schema = ObjectSchema::new()
        .field(
            "title",
            TextRule::new()
                .trimmed()
                .min_chars(1)
                .max_chars(MAX_TITLE_CHARS),
        )
        .field(
            "nodes",
            ListRule::new().min_items(1).max_items(MAX_NODES).items(node),
        );

    PluginDescriptor::builder(PLUGIN_ID, "Mappa Mentale", ToolCategory::Creation)
        .schema(Arc::new(schema))
        .handler(Arc::new(MindmapHandler))
        .voice_prompt("Vuoi che crei una mappa mentale su {topic}?")
        .voice_feedback("Ho creato la mappa mentale {title} con {itemCount} nodi.")
        .triggers(["mappa mentale", "mappa", "mindmap", "mind map", "schema"])
        .permissions(PermissionSet::WRITE_CONTENT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, label: &str, parent: Option<&str>) -> MindmapNode {
        MindmapNode {
            id: id.to_owned(),
            label: label.to_owned(),
            parent_id: parent.map(str::to_owned),
        }
    }

    #[test]
    fn markdown_follows_hierarchy() {
        let nodes = vec![
            node("1", "Art", None),
            node("2", "Leonardo da Vinci", Some("1")),
            node("3", "Michelangelo", Some("1")),
            node("4", "Mona Lisa", Some("2")),
        ];
        let markdown = render_markdown("Italian Renaissance", &nodes).unwrap();

        assert_eq!(
            markdown,
            "# Italian Renaissance\n## Art\n### Leonardo da Vinci\n#### Mona Lisa\n### Michelangelo\n"
        );
    }

    #[test]
    fn heading_level_is_capped() {
        let nodes = vec![
            node("1", "Kingdom", None),
            node("2", "Phylum", Some("1")),
            node("3", "Class", Some("2")),
            node("4", "Order", Some("3")),
            node("5", "Family", Some("4")),
            node("6", "Genus", Some("5")),
            node("7", "Species", Some("6")),
        ];
        let markdown = render_markdown("Taxonomy", &nodes).unwrap();

        assert!(markdown.contains("###### Genus\n"));
        assert!(markdown.contains("###### Species\n"));
        assert!(!markdown.contains("#######"));
    }

    #[test]
    fn cycles_are_unreachable() {
        let nodes = vec![node("a", "A", Some("b")), node("b", "B", Some("a"))];
        assert!(render_markdown("Loop", &nodes).is_none());
    }

    #[test]
    fn empty_and_null_parents_become_roots() {
        assert_eq!(normalize_parent(Some(String::new())), None);
        assert_eq!(normalize_parent(Some("null".to_owned())), None);
        assert_eq!(normalize_parent(Some("1".to_owned())), Some("1".to_owned()));
    }
}
