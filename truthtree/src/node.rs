//! Tableau nodes.
use std::fmt;

use log::trace;

use truthtree_formula::{Formula, FormulaSet};

use crate::config::TableauConfig;
use crate::rules::{select_rule, Rule, Split};

/// Handle of a node within a [`Tableau`](crate::tableau::Tableau).
///
/// The root node always has index 0 and children always have larger indices than their parents.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    index: u32,
}

impl NodeId {
    /// The root node of every tableau.
    pub const ROOT: NodeId = NodeId { index: 0 };

    pub(crate) fn from_index(index: usize) -> NodeId {
        debug_assert!(index <= u32::max_value() as usize);
        NodeId {
            index: index as u32,
        }
    }

    /// The 0-based index of the node in creation order.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Result of a single node expansion.
#[derive(Clone, Debug)]
pub(crate) enum Step {
    /// Nothing to do, the node was already closed or has children.
    Unchanged,
    Closed,
    Saturated,
    /// The node must be split. The caller creates and attaches the children.
    Branch(Split),
}

/// A vertex of the tableau.
///
/// A node stores the live formulas of its branch. Formulas decomposed by a rule on the way from the
/// root are removed from the live set but remembered, so that no rule ever adds them again.
#[derive(Clone, Debug)]
pub struct Node {
    formulas: FormulaSet,
    decomposed: FormulaSet,
    parent: Option<NodeId>,
    children: Option<[NodeId; 2]>,
    closed: bool,
    depth: usize,
}

impl Node {
    /// Create a root node with the given initial formulas.
    pub fn root(formulas: FormulaSet) -> Node {
        Node {
            formulas,
            decomposed: FormulaSet::new(),
            parent: None,
            children: None,
            closed: false,
            depth: 0,
        }
    }

    /// Live formulas of this node in insertion order.
    pub fn formulas(&self) -> &FormulaSet {
        &self.formulas
    }

    /// Formulas decomposed on the branch leading to this node.
    pub fn decomposed(&self) -> &FormulaSet {
        &self.decomposed
    }

    /// Whether a formula is a live formula of this node or was decomposed on its branch.
    pub fn knows(&self, formula: &Formula) -> bool {
        self.formulas.contains(formula) || self.decomposed.contains(formula)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The children of this node, either none or exactly two.
    pub fn children(&self) -> &[NodeId] {
        match &self.children {
            Some(children) => &children[..],
            None => &[],
        }
    }

    /// Whether the branch ending in this node is contradictory.
    ///
    /// Only leaves are ever closed, an inner node is never marked even if all of its descendants
    /// are.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Distance from the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Applies rules until the node is closed, saturated or needs to be split.
    ///
    /// Non-branching rules modify the node in place. Calling this for a closed node or a node with
    /// children does nothing.
    pub(crate) fn expand(&mut self, config: &TableauConfig) -> Step {
        if self.closed || self.children.is_some() {
            return Step::Unchanged;
        }

        loop {
            match select_rule(self, config) {
                None => return Step::Saturated,
                Some(Rule::Close { formula }) => {
                    trace!("closed by {} and {}", formula, formula.negate());
                    self.closed = true;
                    return Step::Closed;
                }
                Some(Rule::Extend {
                    kind,
                    source,
                    consume,
                    additions,
                }) => {
                    trace!("{} on {} adds {:?}", kind, source, &additions[..]);
                    if consume {
                        self.formulas.remove(&source);
                        self.decomposed.insert(source);
                    }
                    self.add_unknown(additions.iter());
                }
                Some(Rule::Branch(split)) => return Step::Branch(split),
            }
        }
    }

    /// Creates one of the two children for a split of this node.
    ///
    /// The child inherits all formulas except the decomposed one and receives the additions of the
    /// given side.
    pub(crate) fn child(&self, id: NodeId, split: &Split, side: usize) -> Node {
        let mut decomposed = self.decomposed.clone();
        decomposed.insert(split.source.clone());

        let mut child = Node {
            formulas: self.formulas.without(&split.source),
            decomposed,
            parent: Some(id),
            children: None,
            closed: false,
            depth: self.depth + 1,
        };
        child.add_unknown(split.sides[side].iter());
        child
    }

    pub(crate) fn attach_children(&mut self, children: [NodeId; 2]) {
        debug_assert!(!self.closed, "closed nodes cannot be split");
        debug_assert!(self.children.is_none(), "node was already split");
        self.children = Some(children);
    }

    fn add_unknown<'a>(&mut self, additions: impl Iterator<Item = &'a Formula>) {
        for formula in additions {
            if !self.knows(formula) {
                self.formulas.insert(formula.clone());
            }
        }
    }
}
