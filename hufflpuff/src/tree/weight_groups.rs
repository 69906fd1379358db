use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::NodeId;

/// Index from weight to the nodes currently carrying that weight, keyed by order number.
///
/// The block leader of a weight is the last entry of its group, so the lookup does not
/// depend on the size of the tree. Empty groups are removed.
#[derive(Debug, Default, Clone)]
pub(crate) struct WeightGroups {
    groups: HashMap<u64, BTreeMap<u64, NodeId>>,
}

impl WeightGroups {
    pub(crate) fn insert(&mut self, weight: u64, order: u64, node: NodeId) -> Option<NodeId> {
        self.groups.entry(weight).or_default().insert(order, node)
    }

    pub(crate) fn remove(&mut self, weight: u64, order: u64) -> Option<NodeId> {
        let group = self.groups.get_mut(&weight)?;
        let node = group.remove(&order);
        if group.is_empty() {
            self.groups.remove(&weight);
        }
        node
    }

    /// the node with the highest order number among all nodes of `weight`
    #[inline]
    pub(crate) fn leader(&self, weight: u64) -> Option<NodeId> {
        self.groups
            .get(&weight)
            .and_then(|group| group.iter().next_back())
            .map(|(_, &node)| node)
    }

    pub(crate) fn get(&self, weight: u64, order: u64) -> Option<NodeId> {
        self.groups.get(&weight)?.get(&order).copied()
    }

    /// Moves a node to the group of its new weight. Returns false if the node was not
    /// registered under `from`.
    pub(crate) fn move_node(&mut self, node: NodeId, order: u64, from: u64, to: u64) -> bool {
        if self.remove(from, order) != Some(node) {
            return false;
        }
        self.insert(to, order, node);
        true
    }

    /// Two nodes of the same weight traded their order numbers.
    pub(crate) fn exchange(&mut self, weight: u64, first: (NodeId, u64), second: (NodeId, u64)) {
        let group = self.groups.entry(weight).or_default();
        group.insert(first.1, first.0);
        group.insert(second.1, second.0);
    }

    pub(crate) fn len(&self) -> usize {
        self.groups.values().map(|group| group.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leader_is_highest_order() {
        let mut groups = WeightGroups::default();
        groups.insert(1, 509, 2);
        groups.insert(1, 511, 7);
        groups.insert(1, 505, 9);
        groups.insert(2, 512, 0);
        assert_eq!(groups.leader(1), Some(7));
        assert_eq!(groups.leader(2), Some(0));
        assert_eq!(groups.leader(3), None);
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn test_move_drops_empty_groups() {
        let mut groups = WeightGroups::default();
        groups.insert(0, 512, 0);
        assert!(groups.move_node(0, 512, 0, 1));
        assert_eq!(groups.leader(0), None);
        assert!(groups.groups.get(&0).is_none());
        assert_eq!(groups.get(1, 512), Some(0));
        // wrong source weight
        assert!(!groups.move_node(0, 512, 0, 2));
        assert_eq!(groups.get(1, 512), Some(0));
    }

    #[test]
    fn test_exchange_orders() {
        let mut groups = WeightGroups::default();
        groups.insert(3, 100, 1);
        groups.insert(3, 104, 2);
        // node 1 now holds order 104, node 2 order 100
        groups.exchange(3, (1, 104), (2, 100));
        assert_eq!(groups.leader(3), Some(1));
        assert_eq!(groups.get(3, 100), Some(2));
        assert_eq!(groups.len(), 2);
    }
}
