use std::fmt;

/// Whether a declaration groups other tests or is itself executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    /// A `describe`-family container, nestable.
    Group,
    /// An `it`/`test`-family leaf case.
    Case,
}

/// Skip/only qualifier on a declaration. Informational only; does not
/// affect location or naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    None,
    Skip,
    Only,
}

/// A node in the declaration tree: one `describe`/`it`/`test` call with the
/// 1-based inclusive line span of the whole call expression, callback body
/// included.
#[derive(Debug)]
pub struct TestNode {
    pub kind: TestKind,
    pub name: String,
    pub modifier: Modifier,
    pub line_start: usize,
    pub line_end: usize,
    pub children: Vec<TestNode>,
}

impl TestNode {
    /// Synthetic root spanning the whole file. Owns the top-level
    /// declarations; contributes no text to qualified names.
    pub fn root(total_lines: usize) -> TestNode {
        TestNode {
            kind: TestKind::Group,
            name: String::new(),
            modifier: Modifier::None,
            line_start: 1,
            line_end: total_lines.max(1),
            children: Vec::new(),
        }
    }

    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.line_start && line <= self.line_end
    }
}

/// Write a declaration tree with recursive indentation.
pub fn write_test_tree(
    f: &mut fmt::Formatter<'_>,
    nodes: &[TestNode],
    indent: &str,
) -> fmt::Result {
    for node in nodes {
        let label = match node.kind {
            TestKind::Group => "describe",
            TestKind::Case => "it",
        };
        let suffix = match node.modifier {
            Modifier::None => "",
            Modifier::Skip => ".skip",
            Modifier::Only => ".only",
        };
        writeln!(
            f,
            "{}{}{} {:?}  [L{}-{}]",
            indent, label, suffix, node.name, node.line_start, node.line_end
        )?;
        if !node.children.is_empty() {
            let deeper = format!("{indent}  ");
            write_test_tree(f, &node.children, &deeper)?;
        }
    }
    Ok(())
}

/// Wrapper for displaying a built tree (root's children only).
pub struct TreeView<'a>(pub &'a TestNode);

impl fmt::Display for TreeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_test_tree(f, &self.0.children, "")
    }
}
