//! Process tree construction and manipulation.
//!
//! Builds hierarchical process trees from flat process lists. Sibling
//! order follows the order of the input list, so sort first.

use super::process::ProcessEntry;
use std::collections::{HashMap, HashSet};

/// A node in the process tree
#[derive(Debug, Clone)]
pub struct ProcessTreeNode {
    pub process: ProcessEntry,
    pub children: Vec<ProcessTreeNode>,
    pub depth: usize,
}

/// Build a process tree from a flat list of processes
pub fn build_process_tree(processes: &[ProcessEntry]) -> Vec<ProcessTreeNode> {
    let known: HashSet<u32> = processes.iter().map(|p| p.pid).collect();

    let mut children_map: HashMap<u32, Vec<&ProcessEntry>> = HashMap::new();
    for process in processes {
        if let Some(ppid) = process.parent_pid.filter(|&ppid| ppid != process.pid) {
            children_map.entry(ppid).or_default().push(process);
        }
    }

    // Roots: no parent, a parent outside the list, or their own parent
    let mut visited = HashSet::new();
    let mut roots: Vec<ProcessTreeNode> = processes
        .iter()
        .filter(|p| match p.parent_pid {
            None => true,
            Some(ppid) => ppid == p.pid || !known.contains(&ppid),
        })
        .filter_map(|p| build_node(p, &children_map, 0, &mut visited))
        .collect();

    // Parent links that form a cycle never reach a root; list them as roots
    for process in processes {
        if !visited.contains(&process.pid) {
            roots.extend(build_node(process, &children_map, 0, &mut visited));
        }
    }
    roots
}

fn build_node(
    process: &ProcessEntry,
    children_map: &HashMap<u32, Vec<&ProcessEntry>>,
    depth: usize,
    visited: &mut HashSet<u32>,
) -> Option<ProcessTreeNode> {
    if !visited.insert(process.pid) {
        return None;
    }

    let children = children_map
        .get(&process.pid)
        .map(|list| {
            list.iter()
                .filter_map(|child| build_node(child, children_map, depth + 1, visited))
                .collect()
        })
        .unwrap_or_default();

    Some(ProcessTreeNode {
        process: process.clone(),
        children,
        depth,
    })
}

/// Flatten a process tree into a linear list with depth information
pub fn flatten_tree(tree: &[ProcessTreeNode]) -> Vec<FlattenedProcess> {
    let mut result = Vec::new();
    let count = tree.len();
    for (i, node) in tree.iter().enumerate() {
        flatten_node(node, &mut result, i + 1 == count, Vec::new());
    }
    result
}

/// A flattened process with indentation information
#[derive(Debug, Clone)]
pub struct FlattenedProcess {
    pub process: ProcessEntry,
    pub depth: usize,
    pub is_last: bool,
    pub parent_chain: Vec<bool>, // For drawing tree lines
}

fn flatten_node(
    node: &ProcessTreeNode,
    result: &mut Vec<FlattenedProcess>,
    is_last: bool,
    parent_chain: Vec<bool>,
) {
    result.push(FlattenedProcess {
        process: node.process.clone(),
        depth: node.depth,
        is_last,
        parent_chain: parent_chain.clone(),
    });

    if node.children.is_empty() {
        return;
    }

    // Roots have no connector column of their own
    let mut chain = parent_chain;
    if node.depth > 0 {
        chain.push(is_last);
    }
    let num_children = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        flatten_node(child, result, i == num_children - 1, chain.clone());
    }
}

/// Generate tree indentation string (like htop)
pub fn format_tree_indent(flattened: &FlattenedProcess) -> String {
    let mut indent = String::new();

    for &is_parent_last in &flattened.parent_chain {
        if is_parent_last {
            indent.push_str("  ");
        } else {
            indent.push_str("│ ");
        }
    }

    if flattened.depth > 0 {
        if flattened.is_last {
            indent.push_str("└─");
        } else {
            indent.push_str("├─");
        }
    }

    indent
}

/// Sorted-then-tree-ordered view: parents before their children.
pub fn tree_order(processes: &[ProcessEntry]) -> Vec<FlattenedProcess> {
    flatten_tree(&build_process_tree(processes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(pid: u32, parent_pid: Option<u32>, name: &str) -> ProcessEntry {
        ProcessEntry {
            pid,
            parent_pid,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_simple_tree() {
        let processes = vec![
            proc(1, None, "init"),
            proc(2, Some(1), "child1"),
            proc(3, Some(1), "child2"),
        ];

        let tree = build_process_tree(&processes);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].process.pid, 1);
        assert_eq!(tree[0].children.len(), 2);
    }

    #[test]
    fn test_orphan_becomes_root() {
        let processes = vec![proc(10, Some(999), "orphan"), proc(11, Some(10), "kid")];
        let flat = tree_order(&processes);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].process.pid, 10);
        assert_eq!(flat[1].depth, 1);
    }

    #[test]
    fn test_self_parent_does_not_loop() {
        let processes = vec![proc(0, Some(0), "idle"), proc(4, Some(0), "system")];
        let flat = tree_order(&processes);
        assert_eq!(flat.len(), 2);
    }

    #[test]
    fn test_parent_cycle_keeps_every_process() {
        let processes = vec![
            proc(1, None, "init"),
            proc(10, Some(11), "ping"),
            proc(11, Some(10), "pong"),
        ];
        let flat = tree_order(&processes);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[1].process.pid, 10);
        assert_eq!(flat[1].depth, 0);
        assert_eq!(flat[2].process.pid, 11);
        assert_eq!(flat[2].depth, 1);
    }

    #[test]
    fn test_indent_glyphs() {
        let processes = vec![
            proc(1, None, "init"),
            proc(2, Some(1), "a"),
            proc(3, Some(2), "a1"),
            proc(4, Some(1), "b"),
        ];
        let flat = tree_order(&processes);
        let indents: Vec<String> = flat.iter().map(format_tree_indent).collect();
        assert_eq!(indents, vec!["", "├─", "│ └─", "└─"]);
    }
}
