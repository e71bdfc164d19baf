use crate::model::TestNode;

/// Chain of declarations enclosing `line`, outermost first, ending at the
/// deepest node whose range contains the line. The synthetic root is not
/// included; an empty chain means the line sits outside every declaration
/// and the caller should fall back to running the whole file.
///
/// Sibling ranges are disjoint, so at most one child can contain any given
/// line; a line in the gap between two children belongs to the parent.
pub fn locate_path<'a>(root: &'a TestNode, line: usize) -> Vec<&'a TestNode> {
    let mut path = Vec::new();
    let mut current = root;
    'descend: loop {
        for child in &current.children {
            if child.contains_line(line) {
                path.push(child);
                current = child;
                continue 'descend;
            }
        }
        break;
    }
    path
}

/// The single most specific declaration containing `line`, if any.
pub fn locate<'a>(root: &'a TestNode, line: usize) -> Option<&'a TestNode> {
    locate_path(root, line).pop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Modifier, TestKind, TestNode};

    fn node(
        kind: TestKind,
        name: &str,
        line_start: usize,
        line_end: usize,
        children: Vec<TestNode>,
    ) -> TestNode {
        TestNode {
            kind,
            name: name.to_string(),
            modifier: Modifier::None,
            line_start,
            line_end,
            children,
        }
    }

    /// describe "outer" L1-10
    ///   it "a" L2-4
    ///   describe "inner" L5-9
    ///     it "b" L6-8
    fn sample() -> TestNode {
        let mut root = TestNode::root(12);
        root.children.push(node(
            TestKind::Group,
            "outer",
            1,
            10,
            vec![
                node(TestKind::Case, "a", 2, 4, Vec::new()),
                node(
                    TestKind::Group,
                    "inner",
                    5,
                    9,
                    vec![node(TestKind::Case, "b", 6, 8, Vec::new())],
                ),
            ],
        ));
        root
    }

    #[test]
    fn deepest_node_wins() {
        let root = sample();
        let found = locate(&root, 7).unwrap();
        assert_eq!(found.name, "b");
    }

    #[test]
    fn path_is_outermost_first() {
        let root = sample();
        let names: Vec<_> = locate_path(&root, 7).iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["outer", "inner", "b"]);
    }

    #[test]
    fn header_line_resolves_to_the_group() {
        let root = sample();
        let found = locate(&root, 1).unwrap();
        assert_eq!(found.name, "outer");
    }

    #[test]
    fn gap_between_siblings_resolves_to_parent() {
        // Line 5 is inside "inner"; the gap check needs a line inside
        // "outer" but outside both children.
        let mut root = TestNode::root(12);
        root.children.push(node(
            TestKind::Group,
            "outer",
            1,
            10,
            vec![
                node(TestKind::Case, "a", 2, 3, Vec::new()),
                node(TestKind::Case, "b", 6, 8, Vec::new()),
            ],
        ));
        let found = locate(&root, 5).unwrap();
        assert_eq!(found.name, "outer");
    }

    #[test]
    fn line_outside_every_declaration_is_none() {
        let root = sample();
        assert!(locate(&root, 11).is_none());
    }

    #[test]
    fn line_past_eof_is_none() {
        let root = sample();
        assert!(locate(&root, 100).is_none());
    }

    #[test]
    fn every_uncovered_line_of_a_node_locates_that_node() {
        let root = sample();
        // Lines of "inner" not covered by "b": 5 and 9.
        for line in [5, 9] {
            assert_eq!(locate(&root, line).unwrap().name, "inner");
        }
    }
}
