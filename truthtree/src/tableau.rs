//! The truth tree and its expansion driver.
use std::collections::VecDeque;
use std::iter;

use log::{debug, info, warn};

use truthtree_formula::{Formula, FormulaSet};
use truthtree_syntax::{parse_formula_list, ParserError};

use crate::config::{ConfigError, TableauConfig, TableauConfigUpdate};
use crate::node::{Node, NodeId, Step};
use crate::state::Verdict;

/// Outcome of expanding a single node.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Expansion {
    /// The node was already closed or had children.
    Unchanged,
    Closed,
    Saturated,
    /// The node was split, the new children are pending.
    Branched([NodeId; 2]),
}

/// A semantic tableau for a set of propositional formulas.
///
/// Nodes are stored in an arena indexed by [`NodeId`]. Expansion proceeds breadth-first from the
/// root and is bounded by [`TableauConfig::max_expansions`]. When the budget is exhausted the
/// verdict stays [`Verdict::Unknown`]. Raising the budget and calling
/// [`expand_all`](Tableau::expand_all) again resumes where expansion stopped.
pub struct Tableau {
    nodes: Vec<Node>,
    queue: VecDeque<NodeId>,
    expansions: usize,
    config: TableauConfig,
}

impl Tableau {
    /// Create a tableau with a root containing the given formulas.
    pub fn new(formulas: impl IntoIterator<Item = Formula>) -> Tableau {
        Tableau::with_config(formulas, TableauConfig::default())
    }

    /// Create a tableau using a custom configuration.
    pub fn with_config(
        formulas: impl IntoIterator<Item = Formula>,
        config: TableauConfig,
    ) -> Tableau {
        let root = Node::root(formulas.into_iter().collect::<FormulaSet>());
        Tableau {
            nodes: vec![root],
            queue: iter::once(NodeId::ROOT).collect(),
            expansions: 0,
            config,
        }
    }

    /// Create a tableau from a comma separated list of formulas.
    pub fn parse(input: &str) -> Result<Tableau, ParserError> {
        Ok(Tableau::new(parse_formula_list(input)?))
    }

    /// Change the configuration.
    ///
    /// This can be used between calls to [`expand_all`](Tableau::expand_all), e.g. to raise the
    /// expansion budget.
    pub fn config(&mut self, update: &TableauConfigUpdate) -> Result<(), ConfigError> {
        update.apply(&mut self.config)
    }

    /// The configuration currently in use.
    pub fn current_config(&self) -> &TableauConfig {
        &self.config
    }

    /// Expand pending nodes until the tableau is complete or the expansion budget is exhausted.
    pub fn expand_all(&mut self) -> Verdict {
        while let Some(&id) = self.queue.front() {
            if self.expansions >= self.config.max_expansions {
                warn!(
                    "Reached maximum expansions ({}). Halting further expansion.",
                    self.config.max_expansions
                );
                break;
            }
            self.queue.pop_front();
            self.expand_pending(id);
        }

        let verdict = self.verdict();
        info!(
            "Expanded {} nodes, tableau has {} nodes, verdict: {}",
            self.expansions,
            self.nodes.len(),
            verdict
        );
        verdict
    }

    /// Expand a single node, independent of the breadth-first order of
    /// [`expand_all`](Tableau::expand_all).
    ///
    /// Counts as an expansion but is not limited by the budget. Expanding a node that is closed or
    /// has children returns [`Expansion::Unchanged`].
    pub fn expand_node(&mut self, id: NodeId) -> Expansion {
        if let Some(position) = self.queue.iter().position(|&pending| pending == id) {
            self.queue.remove(position);
        }
        self.expand_pending(id)
    }

    fn expand_pending(&mut self, id: NodeId) -> Expansion {
        self.expansions += 1;

        let config = &self.config;
        let node = &mut self.nodes[id.index()];

        match node.expand(config) {
            Step::Unchanged => Expansion::Unchanged,
            Step::Closed => Expansion::Closed,
            Step::Saturated => Expansion::Saturated,
            Step::Branch(split) => {
                let left_id = NodeId::from_index(self.nodes.len());
                let right_id = NodeId::from_index(self.nodes.len() + 1);

                let node = &self.nodes[id.index()];
                let left = node.child(id, &split, 0);
                let right = node.child(id, &split, 1);

                debug!(
                    "{} on {} splits {} into {} and {}",
                    split.kind, split.source, id, left_id, right_id
                );

                self.nodes.push(left);
                self.nodes.push(right);
                self.nodes[id.index()].attach_children([left_id, right_id]);
                self.queue.push_back(left_id);
                self.queue.push_back(right_id);

                Expansion::Branched([left_id, right_id])
            }
        }
    }

    /// The verdict for the current state of expansion.
    pub fn verdict(&self) -> Verdict {
        if !self.queue.is_empty() {
            Verdict::Unknown
        } else if self.is_closed() {
            Verdict::Closed
        } else {
            Verdict::Open
        }
    }

    /// Whether every leaf of the tableau is closed.
    ///
    /// This only implies unsatisfiability once expansion is complete.
    pub fn is_closed(&self) -> bool {
        self.leaves().all(|(_, node)| node.is_closed())
    }

    /// Whether the last expansion stopped because the budget was exhausted.
    pub fn is_limit_reached(&self) -> bool {
        !self.queue.is_empty() && self.expansions >= self.config.max_expansions
    }

    /// Whether no pending nodes remain.
    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of node expansions performed so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// The node for a given handle.
    ///
    /// Panics when the handle does not belong to this tableau.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Iterate over all nodes in depth-first order, left children first.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            tableau: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// Iterate over all leaves in depth-first order.
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes().filter(|(_, node)| node.is_leaf())
    }

    /// Iterate over all leaves that are not closed in depth-first order.
    pub fn open_leaves(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.leaves().filter(|(_, node)| !node.is_closed())
    }

    /// The handles of a node and all its ancestors, ending with the root.
    pub fn branch(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        iter::successors(Some(id), move |&id| self.node(id).parent())
    }
}

/// Depth-first iterator over the nodes of a tableau.
pub struct Nodes<'a> {
    tableau: &'a Tableau,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tableau.node(id);
        self.stack.extend(node.children().iter().rev().copied());
        Some((id, node))
    }
}
