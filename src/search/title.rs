//! Title-mode search: filter the category forest down to matching documents.

use crate::tree::{CategoryTree, Forest, TreeNode};

/// What a visible node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Category,
    Document { location: String },
}

/// A visible node in a filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    pub title: String,
    pub kind: NodeKind,
    /// The node's own title contains the query.
    pub matched: bool,
    /// Categories only: children should be shown without a click.
    pub expanded: bool,
    /// Visible children; hidden nodes are omitted.
    pub children: Vec<Self>,
}

/// A root category and its visible nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootView {
    pub title: String,
    pub nodes: Vec<NodeView>,
}

/// The forest as seen through a title query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeView {
    /// Normalized query, `None` when no filter is active.
    pub query: Option<String>,
    pub roots: Vec<RootView>,
}

impl TreeView {
    /// Whether nothing matched a non-empty query.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Find a visible node by its label path below the root.
    pub fn find(&self, root: &str, labels: &[&str]) -> Option<&NodeView> {
        let root = self.roots.iter().find(|r| r.title == root)?;
        let (first, rest) = labels.split_first()?;
        let mut node = root.nodes.iter().find(|n| n.title == *first)?;
        for label in rest {
            node = node.children.iter().find(|n| n.title == *label)?;
        }
        Some(node)
    }
}

/// Filter the forest by a title substring, case-insensitively.
///
/// An empty or whitespace-only query shows everything with every category
/// collapsed. Otherwise a document is visible when its title contains the
/// query; a category is visible when its own title matches or any descendant
/// matches, and expanded only in the latter case. Roots with no visible nodes
/// are dropped.
pub fn filter_tree(forest: &Forest, query: &str) -> TreeView {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return TreeView {
            query: None,
            roots: forest.trees().iter().map(unfiltered_root).collect(),
        };
    }

    let roots = forest
        .trees()
        .iter()
        .filter_map(|tree| {
            let nodes: Vec<NodeView> = tree
                .children
                .iter()
                .filter_map(|node| filter_node(node, &query))
                .collect();
            (!nodes.is_empty()).then(|| RootView {
                title: tree.root.clone(),
                nodes,
            })
        })
        .collect();

    TreeView {
        query: Some(query),
        roots,
    }
}

/// Bottom-up visibility: children are decided before their parent.
fn filter_node(node: &TreeNode, query: &str) -> Option<NodeView> {
    match node {
        TreeNode::Document(document) => {
            title_matches(&document.title, query).then(|| NodeView {
                title: document.title.clone(),
                kind: NodeKind::Document {
                    location: document.location.clone(),
                },
                matched: true,
                expanded: false,
                children: Vec::new(),
            })
        }
        TreeNode::Category(category) => {
            let children: Vec<NodeView> = category
                .children
                .iter()
                .filter_map(|child| filter_node(child, query))
                .collect();
            let matched = title_matches(&category.title, query);

            (matched || !children.is_empty()).then(|| NodeView {
                title: category.title.clone(),
                kind: NodeKind::Category,
                matched,
                expanded: !children.is_empty(),
                children,
            })
        }
    }
}

fn title_matches(title: &str, query: &str) -> bool {
    title.to_lowercase().contains(query)
}

fn unfiltered_root(tree: &CategoryTree) -> RootView {
    RootView {
        title: tree.root.clone(),
        nodes: tree.children.iter().map(unfiltered_node).collect(),
    }
}

fn unfiltered_node(node: &TreeNode) -> NodeView {
    match node {
        TreeNode::Document(document) => NodeView {
            title: document.title.clone(),
            kind: NodeKind::Document {
                location: document.location.clone(),
            },
            matched: false,
            expanded: false,
            children: Vec::new(),
        },
        TreeNode::Category(category) => NodeView {
            title: category.title.clone(),
            kind: NodeKind::Category,
            matched: false,
            expanded: false,
            children: category.children.iter().map(unfiltered_node).collect(),
        },
    }
}
