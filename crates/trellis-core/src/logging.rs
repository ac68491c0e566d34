//! Logging and debugging facilities for Trellis.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - Debug visualization for widget trees
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("trellis=debug,trellis_core=trace")
//!         .init();
//! }
//! ```
//!
//! # Debug Visualization
//!
//! Any tree implementing [`DebugTree`] can be dumped with [`format_tree`]:
//!
//! ```
//! use trellis_core::logging::{format_tree, DebugTree, TreeFormatOptions, TreeStyle};
//!
//! struct Node(&'static str, Vec<Node>);
//!
//! impl DebugTree for Node {
//!     fn debug_label(&self) -> String {
//!         self.0.to_string()
//!     }
//!     fn debug_children(&self) -> Vec<Self> {
//!         self.1.iter().map(|n| Node(n.0, Vec::new())).collect()
//!     }
//! }
//!
//! let tree = Node("window", vec![Node("grip", Vec::new())]);
//! let options = TreeFormatOptions { style: TreeStyle::Ascii, ..Default::default() };
//! assert_eq!(format_tree(&tree, &options), "window\n+-- grip\n");
//! ```

use std::fmt::Write as FmtWrite;

/// Span names used throughout Trellis for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Signal emission span.
    pub const SIGNAL: &str = "trellis::signal";
    /// Pointer event dispatch span.
    pub const DISPATCH: &str = "trellis::dispatch";
    /// Item lifecycle span.
    pub const ITEM: &str = "trellis::item";
    /// Interactive resize span.
    pub const RESIZE: &str = "trellis::resize";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "trellis_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Rendering surface target.
    pub const SURFACE: &str = "trellis_render::surface";
    /// Item tree target.
    pub const ITEM: &str = "trellis::item";
    /// Input event dispatch and binding target.
    pub const EVENT: &str = "trellis::event";
    /// Size grip target.
    pub const GRIP: &str = "trellis::size_grip";
    /// Button widgets target.
    pub const BUTTON: &str = "trellis::button";
    /// Configuration target.
    pub const CONFIG: &str = "trellis::config";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line-prefix representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            max_depth: None,
            indent_size: 2,
        }
    }
}

/// A tree that can be rendered by [`format_tree`].
pub trait DebugTree: Sized {
    /// One-line description of this node.
    fn debug_label(&self) -> String;

    /// The node's children, in order.
    fn debug_children(&self) -> Vec<Self>;
}

/// Format a tree rooted at `root`, one node per line.
pub fn format_tree<T: DebugTree>(root: &T, options: &TreeFormatOptions) -> String {
    let mut output = String::new();
    format_subtree_into(root, 0, true, options, &mut output);
    output
}

fn format_subtree_into<T: DebugTree>(
    node: &T,
    depth: usize,
    is_last: bool,
    options: &TreeFormatOptions,
    output: &mut String,
) {
    if let Some(max) = options.max_depth {
        if depth > max {
            return;
        }
    }

    output.push_str(&build_prefix(options, depth, is_last));
    // Writing to a String cannot fail.
    let _ = writeln!(output, "{}", node.debug_label());

    let children = node.debug_children();
    let child_count = children.len();
    for (i, child) in children.iter().enumerate() {
        format_subtree_into(child, depth + 1, i + 1 == child_count, options, output);
    }
}

/// Build the prefix string for a tree node.
fn build_prefix(options: &TreeFormatOptions, depth: usize, is_last: bool) -> String {
    if depth == 0 {
        return String::new();
    }

    let (branch, corner, last) = match options.style {
        TreeStyle::Ascii => ("|", "+--", "+--"),
        TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
        TreeStyle::Compact => ("", "-", "-"),
    };

    let mut prefix = String::new();
    for _ in 0..(depth - 1) {
        prefix.push_str(branch);
        for _ in 0..options.indent_size {
            prefix.push(' ');
        }
    }
    prefix.push_str(if is_last { last } else { corner });
    prefix.push(' ');
    prefix
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "trellis::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
