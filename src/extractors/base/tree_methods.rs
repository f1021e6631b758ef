// Tree search primitives
//
// Both searches are lazy, read-only and pre-order. A matched node is yielded and its
// subtree is never entered. Each call walks again from the given root.

use tree_sitter::Node;

/// Node kinds that a shallow search crosses without `descend_all`
pub const GENERIC_KINDS: &[&str] = &["module", "block", "expression_statement"];

/// Definitions that open a new scope
pub const SCOPE_KINDS: &[&str] = &[
    "function_definition",
    "class_definition",
    "decorated_definition",
    "lambda",
];

fn children_rev<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    let mut children: Vec<_> = node.children(&mut cursor).collect();
    children.reverse();
    children
}

/// Exhaustive depth-first search
pub struct Search<'tree, P> {
    stack: Vec<Node<'tree>>,
    matches: P,
}

impl<'tree, P> Iterator for Search<'tree, P>
where
    P: Fn(&Node<'tree>) -> bool,
{
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if (self.matches)(&node) {
                return Some(node);
            }
            self.stack.extend(children_rev(&node));
        }
        None
    }
}

/// Find every node satisfying `matches`, without looking inside matched nodes
pub fn search<'tree, P>(root: Node<'tree>, matches: P) -> Search<'tree, P>
where
    P: Fn(&Node<'tree>) -> bool,
{
    Search {
        stack: vec![root],
        matches,
    }
}

/// Find every node whose kind is in `kinds`
pub fn search_kinds<'tree>(
    root: Node<'tree>,
    kinds: &'static [&'static str],
) -> Search<'tree, impl Fn(&Node<'tree>) -> bool> {
    search(root, move |node: &Node<'tree>| kinds.contains(&node.kind()))
}

/// Find nodes of `kinds` that belong to the scope of `root`
///
/// Nested function/class definitions and lambdas are treated as barriers: they are
/// returned when asked for and skipped otherwise, never entered.
pub fn search_in_scope<'tree>(
    root: Node<'tree>,
    kinds: &'static [&'static str],
) -> impl Iterator<Item = Node<'tree>> {
    search(root, move |node: &Node<'tree>| {
        kinds.contains(&node.kind()) || SCOPE_KINDS.contains(&node.kind())
    })
    .filter(move |node| kinds.contains(&node.kind()))
}

/// Depth-bounded search
pub struct ShallowSearch<'tree> {
    stack: Vec<(Node<'tree>, usize)>,
    kinds: &'static [&'static str],
    descend_all: bool,
}

impl<'tree> Iterator for ShallowSearch<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, depth)) = self.stack.pop() {
            if depth == 0 {
                continue;
            }
            if self.kinds.contains(&node.kind()) {
                return Some(node);
            }
            let descend = GENERIC_KINDS.contains(&node.kind())
                || (self.descend_all && node.child_count() > 0);
            if descend {
                self.stack
                    .extend(children_rev(&node).into_iter().map(|child| (child, depth - 1)));
            }
        }
        None
    }
}

/// Find nodes of `kinds` at most `depth` levels below and including `root`
///
/// Only [`GENERIC_KINDS`] are crossed unless `descend_all` is set, in which case any
/// node with children is entered.
pub fn shallow_search<'tree>(
    root: Node<'tree>,
    kinds: &'static [&'static str],
    depth: usize,
    descend_all: bool,
) -> ShallowSearch<'tree> {
    ShallowSearch {
        stack: vec![(root, depth)],
        kinds,
        descend_all,
    }
}
