//! Parse tree for a regex

use core::fmt;

/// The node types of the parse tree.
/// Each node exclusively owns its children; the tree is acyclic and is
/// destroyed top-down with its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Matches the empty string.
    Empty,

    /// Match a literal character.
    Char(char),

    /// Match the catenation of two nodes.
    Cat(Box<Node>, Box<Node>),

    /// Match an alternation like a|b.
    Alt(Box<Node>, Box<Node>),

    /// Match zero or more repetitions of a node.
    Star(Box<Node>),

    /// Match zero or one occurrence of a node.
    Question(Box<Node>),
}

impl Node {
    /// \return whether this is an Empty node.
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }
}

fn display_node(node: &Node, depth: usize, f: &mut fmt::Formatter) -> fmt::Result {
    for _ in 0..depth {
        write!(f, "..")?;
    }
    match node {
        Node::Empty => writeln!(f, "Empty"),
        Node::Char(c) => writeln!(f, "'{}'", c),
        Node::Cat(left, right) => {
            writeln!(f, "Cat")?;
            display_node(left, depth + 1, f)?;
            display_node(right, depth + 1, f)
        }
        Node::Alt(left, right) => {
            writeln!(f, "Alt")?;
            display_node(left, depth + 1, f)?;
            display_node(right, depth + 1, f)
        }
        Node::Star(child) => {
            writeln!(f, "Star")?;
            display_node(child, depth + 1, f)
        }
        Node::Question(child) => {
            writeln!(f, "Question")?;
            display_node(child, depth + 1, f)
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        display_node(self, 0, f)
    }
}
