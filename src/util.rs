use tree_sitter::Node;

/// Extract UTF-8 text from a tree-sitter node, returning `""` on failure.
pub fn txt<'a>(node: Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}
