//! Plain-text rendering of tree views, search results and indexing status.

use crate::indexer::IndexingSnapshot;
use crate::search::{MatchType, NodeKind, NodeView, SearchResult, TreeView};
use std::fmt::Write as _;

const INDENT: &str = "  ";

/// Render a tree view, one node per line.
///
/// Categories show `▾` when expanded and `▸` when collapsed; documents show
/// `•` followed by their artifact location. Title matches are suffixed with `← match`.
pub fn render_tree(view: &TreeView) -> String {
    let mut output = String::new();

    for root in &view.roots {
        let _ = writeln!(output, "{}", root.title);
        for node in &root.nodes {
            render_node(&mut output, node, 1);
        }
        output.push('\n');
    }

    output.truncate(output.trim_end().len());
    output
}

fn render_node(output: &mut String, node: &NodeView, depth: usize) {
    let indent = INDENT.repeat(depth);
    let marker = if node.matched { "  ← match" } else { "" };

    match &node.kind {
        NodeKind::Category => {
            let toggle = if node.expanded { '▾' } else { '▸' };
            let _ = writeln!(output, "{indent}{toggle} {}{marker}", node.title);
        }
        NodeKind::Document { location } => {
            let _ = writeln!(output, "{indent}• {} ({location}){marker}", node.title);
        }
    }

    for child in &node.children {
        render_node(output, child, depth + 1);
    }
}

/// Render content search results.
pub fn render_results(query: &str, results: &[SearchResult], limit: usize) -> String {
    if results.is_empty() {
        return format!("No documents contain '{}'.", query.trim());
    }

    let title_count = results
        .iter()
        .filter(|r| r.match_type == MatchType::Title)
        .count();

    let mut output = format!(
        "Found {} results for '{}' ({} title, {} content):\n",
        results.len(),
        query.trim(),
        title_count,
        results.len() - title_count
    );

    for (n, result) in results.iter().take(limit).enumerate() {
        let kind = match result.match_type {
            MatchType::Title => "title",
            MatchType::Content => "content",
        };
        let _ = write!(
            output,
            "\n{}. {} [{}]\n   {}\n   {}\n   {}\n",
            n + 1,
            result.title,
            kind,
            result.breadcrumb,
            result.location,
            result.snippet
        );
    }

    if results.len() > limit {
        let _ = write!(output, "\n... and {} more results\n", results.len() - limit);
    }
    output
}

/// Render indexing progress as `done/total` plus any failures.
pub fn render_status(snapshot: &IndexingSnapshot, documents: usize) -> String {
    let mut output = format!(
        "Documents in tree: {}\nContent index: {} ({}/{} processed)\n",
        documents,
        if snapshot.complete { "ready" } else { "in progress" },
        snapshot.done,
        snapshot.total
    );

    if !snapshot.failed.is_empty() {
        let _ = writeln!(output, "Failed artifacts ({}):", snapshot.failed.len());
        for location in &snapshot.failed {
            let _ = writeln!(output, "  • {}", location);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use crate::path::NavigationPath;
    use crate::search::filter_tree;
    use crate::tree::Forest;
    use std::collections::BTreeSet;

    fn sample_forest() -> Forest {
        let mut forest = Forest::new();
        for (p, loc) in [("A > X > Doc1", "1.html"), ("A > X > Doc2", "2.html"), ("A > Y > Doc3", "3.html")] {
            forest.merge(&NavigationPath::parse(p).unwrap(), loc).unwrap();
        }
        forest
    }

    #[test]
    fn test_render_unfiltered_tree() {
        let output = render_tree(&filter_tree(&sample_forest(), ""));
        check!(output == "A\n  ▸ X\n    • Doc1 (1.html)\n    • Doc2 (2.html)\n  ▸ Y\n    • Doc3 (3.html)");
    }

    #[test]
    fn test_render_filtered_tree() {
        let output = render_tree(&filter_tree(&sample_forest(), "doc1"));
        check!(output == "A\n  ▾ X\n    • Doc1 (1.html)  ← match");
    }

    #[test]
    fn test_render_results_with_limit() {
        let result = |title: &str, match_type| SearchResult {
            title: title.into(),
            location: format!("{title}.html"),
            root_category: "A".into(),
            breadcrumb: "A > X".into(),
            snippet: "the <mark>tariff</mark>".into(),
            match_type,
        };
        let results = vec![
            result("Tariffs", MatchType::Title),
            result("Rules", MatchType::Content),
            result("Notes", MatchType::Content),
        ];

        let output = render_results("tariff", &results, 2);
        check!(output.starts_with("Found 3 results for 'tariff' (1 title, 2 content)"));
        check!(output.contains("1. Tariffs [title]"));
        check!(output.contains("2. Rules [content]"));
        check!(!output.contains("Notes"));
        check!(output.contains("... and 1 more results"));
    }

    #[test]
    fn test_render_status_lists_failures() {
        let snapshot = IndexingSnapshot {
            complete: true,
            total: 5,
            done: 5,
            failed: BTreeSet::from(["5.html".to_string()]),
        };
        let output = render_status(&snapshot, 5);
        check!(output.contains("Content index: ready (5/5 processed)"));
        check!(output.contains("• 5.html"));
    }
}
