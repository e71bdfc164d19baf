use tree_sitter::Language;

use crate::discover;
use crate::error::PickError;
use crate::locate::locate_path;
use crate::model::TestNode;
use crate::parser::parse_source;

/// Join the enclosing declaration names, outermost first, into the phrase a
/// test runner matches against. An empty name still contributes its
/// separator; collapsing it could change which tests match.
pub fn full_test_name(path: &[&TestNode]) -> String {
    path.iter()
        .map(|n| n.name.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fully-qualified, regex-escaped name of the most specific declaration
/// containing `line`, or None when no declaration contains it. The escaped
/// form matches the joined name literally when passed to a `-t` /
/// `--testNamePattern` style filter.
pub fn resolve_name_at_line(root: &TestNode, line: usize) -> Option<String> {
    let path = locate_path(root, line);
    if path.is_empty() {
        None
    } else {
        Some(regex::escape(&full_test_name(&path)))
    }
}

/// Parse, build, locate and resolve in one pass over a source snapshot.
/// A None result means "run the whole file".
pub fn resolve_test_name_at_line(
    source: &str,
    language: &Language,
    line: usize,
) -> Result<Option<String>, PickError> {
    let tree = parse_source(source, language)?;
    let root = discover::build(&tree, source);
    Ok(resolve_name_at_line(&root, line))
}
