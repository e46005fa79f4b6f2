//! Category/document hierarchy built from navigation paths.
//!
//! Each distinct root label owns a [`CategoryTree`]. Paths are merged label by
//! label: categories are found or created, and the final label becomes a
//! [`Document`] leaf unless a node with that title already exists (first writer wins).

use crate::error::MergeError;
use crate::path::NavigationPath;
use ahash::{AHashMap, AHashSet};

/// A node in a category tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Category(Category),
    Document(Document),
}

impl TreeNode {
    /// The node title, unique among its siblings.
    pub fn title(&self) -> &str {
        match self {
            Self::Category(category) => &category.title,
            Self::Document(document) => &document.title,
        }
    }
}

/// An internal node grouping children by shared path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub title: String,
    pub children: Vec<TreeNode>,
}

/// A leaf referencing one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub location: String,
}

/// All documents and categories under one root label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTree {
    pub root: String,
    pub children: Vec<TreeNode>,
}

/// Result of merging one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// A new document leaf was appended.
    Inserted,
    /// A document with that title already existed at that position.
    Existing,
    /// A category with that title already existed at that position; nothing was added.
    CategoryExists,
}

/// Every category tree known to the process, in order of first sighting.
#[derive(Debug, Default)]
pub struct Forest {
    trees: Vec<CategoryTree>,
    by_root: AHashMap<String, usize>,
    dirty: AHashSet<String>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a validated path, creating the root tree and categories as needed.
    pub fn merge(
        &mut self,
        path: &NavigationPath,
        location: &str,
    ) -> Result<MergeOutcome, MergeError> {
        let tree = self.tree_mut(path.root());
        let outcome = merge_into(&mut tree.children, path.remaining(), location)?;

        if outcome == MergeOutcome::Inserted {
            self.dirty.insert(path.root().to_string());
        }
        Ok(outcome)
    }

    /// Merge `root` plus the labels beneath it. Fewer than one remaining label is malformed.
    pub fn merge_labels(
        &mut self,
        root: &str,
        remaining: &[String],
        location: &str,
    ) -> Result<MergeOutcome, MergeError> {
        let labels = std::iter::once(root).chain(remaining.iter().map(String::as_str));
        let path = NavigationPath::from_labels(labels)?;
        self.merge(&path, location)
    }

    /// Trees in order of first sighting.
    pub fn trees(&self) -> &[CategoryTree] {
        &self.trees
    }

    /// Look up the tree for a root label.
    pub fn tree(&self, root: &str) -> Option<&CategoryTree> {
        self.by_root.get(root).map(|&idx| &self.trees[idx])
    }

    /// Total number of document leaves across all trees.
    pub fn document_count(&self) -> usize {
        fn count(nodes: &[TreeNode]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    TreeNode::Document(_) => 1,
                    TreeNode::Category(category) => count(&category.children),
                })
                .sum()
        }
        self.trees.iter().map(|tree| count(&tree.children)).sum()
    }

    /// Drain the set of root labels whose trees changed since the last call.
    ///
    /// A dirty tree must be re-rendered in full.
    pub fn take_dirty(&mut self) -> Vec<String> {
        let mut dirty: Vec<String> = self.dirty.drain().collect();
        dirty.sort_by_key(|root| self.by_root.get(root).copied());
        dirty
    }

    fn tree_mut(&mut self, root: &str) -> &mut CategoryTree {
        let idx = match self.by_root.get(root) {
            Some(&idx) => idx,
            None => {
                tracing::debug!("Creating category tree for root '{}'", root);
                self.trees.push(CategoryTree {
                    root: root.to_string(),
                    children: Vec::new(),
                });
                self.by_root.insert(root.to_string(), self.trees.len() - 1);
                self.dirty.insert(root.to_string());
                self.trees.len() - 1
            }
        };
        &mut self.trees[idx]
    }
}

/// Walk `labels` down from `children`, appending what is missing.
fn merge_into(
    mut children: &mut Vec<TreeNode>,
    labels: &[String],
    location: &str,
) -> Result<MergeOutcome, MergeError> {
    let Some((title, categories)) = labels.split_last() else {
        return Ok(MergeOutcome::Existing);
    };

    for (depth, label) in categories.iter().enumerate() {
        let idx = match children.iter().position(|node| node.title() == label) {
            Some(idx) => idx,
            None => {
                children.push(TreeNode::Category(Category {
                    title: label.clone(),
                    children: Vec::new(),
                }));
                children.len() - 1
            }
        };

        children = match &mut children[idx] {
            TreeNode::Category(category) => &mut category.children,
            TreeNode::Document(_) => {
                let child = labels.get(depth + 1).unwrap_or(title);
                return Err(MergeError::DocumentInPath {
                    label: label.clone(),
                    child: child.clone(),
                });
            }
        };
    }

    match children.iter().find(|node| node.title() == title) {
        Some(TreeNode::Document(_)) => return Ok(MergeOutcome::Existing),
        Some(TreeNode::Category(_)) => return Ok(MergeOutcome::CategoryExists),
        None => {}
    }

    children.push(TreeNode::Document(Document {
        title: title.clone(),
        location: location.to_string(),
    }));
    Ok(MergeOutcome::Inserted)
}
