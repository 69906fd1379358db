use crate::tree::tree_node::Node;
use crate::NodeId;
use crate::Symbol;

/// Flat copy of a single node, linking to other nodes by id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRecord {
    /// arena position of the node, stable across updates
    pub id: NodeId,
    /// current order number, changes when the node is swapped
    pub order: u64,
    pub weight: u64,
    pub symbol: Option<Symbol>,
    pub is_nyt: bool,
    pub left_id: Option<NodeId>,
    pub right_id: Option<NodeId>,
    pub parent_id: Option<NodeId>,
}

impl NodeRecord {
    pub(crate) fn new(id: NodeId, node: &Node) -> Self {
        NodeRecord {
            id,
            order: node.order,
            weight: node.weight,
            symbol: node.symbol,
            is_nyt: node.is_nyt,
            left_id: node.left,
            right_id: node.right,
            parent_id: node.parent,
        }
    }
}

/// Point in time view of a whole tree. Records are in pre-order, starting with the root.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeSnapshot {
    pub nodes: Vec<NodeRecord>,
    pub root_id: NodeId,
}

impl TreeSnapshot {
    /// Single lookup by id, a scan over the records. Use [`TreeSnapshot::by_id`] for many
    /// lookups.
    pub fn get(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.iter().find(|record| record.id == id)
    }

    /// The records indexed by id. Ids are arena positions, so the table is dense.
    pub fn by_id(&self) -> Vec<Option<&NodeRecord>> {
        let len = self.nodes.iter().map(|record| record.id + 1).max().unwrap_or(0);
        let mut table = vec![None; len];
        for record in &self.nodes {
            table[record.id] = Some(record);
        }
        table
    }

    /// Ids of the nodes that are new or differ from `previous`, in the order of this snapshot.
    pub fn changed_since(&self, previous: &TreeSnapshot) -> Vec<NodeId> {
        let previous = previous.by_id();
        self.nodes
            .iter()
            .filter(|record| previous.get(record.id).copied().flatten() != Some(*record))
            .map(|record| record.id)
            .collect()
    }
}
