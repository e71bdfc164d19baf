use tree_sitter::{Node, Tree};

use crate::model::{Modifier, TestKind, TestNode};
use crate::util::txt;

/// Build the declaration tree for a parsed source file.
///
/// Walks the syntax tree and registers every `describe`/`it`/`test`-family
/// call expression (including `.skip`/`.only` and `f`/`x`-prefixed forms)
/// that carries a literal name. Declarations with computed or interpolated
/// names cannot be targeted by a name filter and are left out; a skipped
/// group's callback body is still scanned, so its named descendants attach
/// to the nearest named ancestor.
pub fn build(tree: &Tree, source: &str) -> TestNode {
    let mut root = TestNode::root(source.lines().count());
    collect(tree.root_node(), source.as_bytes(), &mut root.children);
    root
}

/// Walk `node` looking for test declarations, appending them to `out` in
/// source order. Descends through anything that is not itself a recognized
/// declaration, so tests declared inside loops or helper wrappers are
/// still found.
fn collect(node: Node, src: &[u8], out: &mut Vec<TestNode>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "call_expression" && try_declaration(child, src, out) {
            continue;
        }
        collect(child, src, out);
    }
}

/// Register `call` if it is a test declaration. Returns false when the call
/// is ordinary code, in which case the caller keeps walking into it.
fn try_declaration(call: Node, src: &[u8], out: &mut Vec<TestNode>) -> bool {
    let Some(func) = call.child_by_field_name("function") else {
        return false;
    };
    let Some((kind, modifier)) = classify_callee(func, src) else {
        return false;
    };
    let Some(args) = call.child_by_field_name("arguments") else {
        return false;
    };

    let name = first_argument(args).and_then(|arg| literal_name(arg, src));

    // Only group bodies are recursed for discovery; a case is a leaf even
    // when its body happens to contain further calls.
    let mut children = Vec::new();
    if kind == TestKind::Group {
        if let Some(body) = callback_body(args) {
            collect(body, src, &mut children);
        }
    }

    match name {
        Some(name) => out.push(TestNode {
            kind,
            name,
            modifier,
            line_start: call.start_position().row + 1,
            line_end: call.end_position().row + 1,
            children,
        }),
        // Unnamed group: reparent its named descendants.
        None => out.append(&mut children),
    }

    true
}

/// Match the callee of a call expression against the recognized declaration
/// identifiers, yielding the declaration kind and modifier.
fn classify_callee(func: Node, src: &[u8]) -> Option<(TestKind, Modifier)> {
    match func.kind() {
        "identifier" => classify_identifier(txt(func, src)),
        "member_expression" => {
            let object = func.child_by_field_name("object")?;
            if object.kind() != "identifier" {
                return None;
            }
            let (kind, base_modifier) = classify_identifier(txt(object, src))?;
            if base_modifier != Modifier::None {
                return None;
            }
            let property = func.child_by_field_name("property")?;
            let modifier = match txt(property, src) {
                "skip" | "todo" => Modifier::Skip,
                "only" => Modifier::Only,
                "concurrent" | "failing" => Modifier::None,
                // `each` and friends produce templated names, not
                // declarations this tool can target.
                _ => return None,
            };
            Some((kind, modifier))
        }
        _ => None,
    }
}

fn classify_identifier(name: &str) -> Option<(TestKind, Modifier)> {
    match name {
        "describe" => Some((TestKind::Group, Modifier::None)),
        "fdescribe" => Some((TestKind::Group, Modifier::Only)),
        "xdescribe" => Some((TestKind::Group, Modifier::Skip)),
        "it" | "test" => Some((TestKind::Case, Modifier::None)),
        "fit" => Some((TestKind::Case, Modifier::Only)),
        "xit" | "xtest" => Some((TestKind::Case, Modifier::Skip)),
        _ => None,
    }
}

fn first_argument(args: Node) -> Option<Node> {
    let mut cursor = args.walk();
    let arg = args
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");
    arg
}

/// Extract the literal name from a declaration's first argument. Plain
/// strings and substitution-free template literals qualify; anything else
/// (identifiers, interpolated templates, concatenations) yields None.
///
/// The name is assembled from the literal's fragment children with escape
/// sequences decoded, so it equals the string the runner sees at runtime,
/// not the source spelling.
fn literal_name(arg: Node, src: &[u8]) -> Option<String> {
    if !matches!(arg.kind(), "string" | "template_string") {
        return None;
    }

    let mut name = String::new();
    let mut cursor = arg.walk();
    for child in arg.children(&mut cursor) {
        match child.kind() {
            "string_fragment" => name.push_str(txt(child, src)),
            "escape_sequence" => name.push_str(&decode_escape(txt(child, src))),
            "template_substitution" => return None,
            // Quote and backtick delimiters.
            _ => {}
        }
    }
    Some(name)
}

/// Decode one JS escape sequence (quote, backslash, `\n`-style control
/// character, or `\u`/`\x` hex escape) into the text it denotes at runtime.
/// Malformed hex escapes are kept as written.
fn decode_escape(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next();
    let Some(marker) = chars.next() else {
        return String::new();
    };
    match marker {
        'n' => "\n".to_string(),
        't' => "\t".to_string(),
        'r' => "\r".to_string(),
        '0' => "\0".to_string(),
        'u' | 'x' => {
            let rest: String = chars.collect();
            let hex = rest.trim_start_matches('{').trim_end_matches('}');
            u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .map(|c| c.to_string())
                .unwrap_or_else(|| raw.to_string())
        }
        other => other.to_string(),
    }
}

/// Find the declaration's callback argument and return its body.
fn callback_body(args: Node) -> Option<Node> {
    let mut cursor = args.walk();
    let callback = args.named_children(&mut cursor).find(|n| {
        matches!(
            n.kind(),
            "arrow_function" | "function_expression" | "function"
        )
    })?;
    callback.child_by_field_name("body")
}
