//! Human-readable rendering of report outlines

use std::fmt::Write;

use tagreport_core::levels::Level;
use tagreport_core::report::ReportNode;

const INDENT: &str = "  ";

/// Render an outline, one node per line, children indented under parents
pub fn outline(nodes: &[ReportNode]) -> String {
    let mut out = String::new();
    write_nodes(&mut out, nodes, 0);
    out
}

fn write_nodes(out: &mut String, nodes: &[ReportNode], depth: usize) {
    for node in nodes {
        let mark = if node.selected { "[x]" } else { "[ ]" };
        let _ = writeln!(
            out,
            "{}{} {} ({})",
            INDENT.repeat(depth),
            mark,
            node.title,
            node.key
        );
        write_nodes(out, node.children(), depth + 1);
    }
}

/// Render titled levels the way `outline` renders nodes, without marks
pub fn levels(levels: &[Level]) -> String {
    let mut out = String::new();
    write_levels(&mut out, levels, 0);
    out
}

fn write_levels(out: &mut String, levels: &[Level], depth: usize) {
    for level in levels {
        let _ = writeln!(out, "{}{} ({})", INDENT.repeat(depth), level.title, level.id);
        if let Some(sublevels) = &level.sublevels {
            write_levels(out, sublevels, depth + 1);
        }
    }
}

/// Total number of nodes in an outline
pub fn count(nodes: &[ReportNode]) -> usize {
    nodes.iter().map(ReportNode::count).sum()
}
