//! Text rendering of a tableau.
use std::io;

use crate::node::NodeId;
use crate::tableau::Tableau;

impl Tableau {
    /// Writes the tree in depth-first order, one node per line.
    ///
    /// Each line lists the formulas of a node, closed nodes are marked with `(closed)`. A node with
    /// children is followed by a `├─` line and its children are indented below it, with a vertical
    /// bar continuing past the first child.
    pub fn write_tree(&self, target: &mut impl io::Write) -> io::Result<()> {
        for (id, node) in self.nodes() {
            let prefix = self.prefix(id);
            write!(target, "{}{}", prefix, node.formulas())?;
            if node.is_closed() {
                write!(target, " (closed)")?;
            }
            writeln!(target)?;
            if !node.is_leaf() {
                writeln!(target, "{}├─", prefix)?;
            }
        }
        Ok(())
    }

    fn prefix(&self, id: NodeId) -> String {
        let mut segments: Vec<&str> = self
            .branch(id)
            .filter_map(|id| {
                let parent = self.node(id).parent()?;
                if self.node(parent).children().first() == Some(&id) {
                    Some("│  ")
                } else {
                    Some("   ")
                }
            })
            .collect();
        segments.reverse();
        segments.concat()
    }
}
