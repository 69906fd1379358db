use std::collections::HashMap;

use log::log_enabled;
use log::Level::Trace;
use log::*;

use super::root_order;
use super::snapshot::{NodeRecord, TreeSnapshot};
use super::tree_node::Node;
use super::weight_groups::WeightGroups;
use crate::bits_to_string;
use crate::BitSequence;
use crate::CapacityError;
use crate::InvariantViolation;
use crate::NodeId;
use crate::Symbol;
use crate::DEFAULT_MAX_SYMBOLS;

/// Adaptive huffman tree, updated one symbol at a time with the FGK rule.
///
/// All nodes are kept in one arena, nodes are never removed. The tree grows by two nodes
/// with every new symbol.
#[derive(Debug, Clone)]
pub struct Tree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root_node: NodeId,
    /// the single leaf without a symbol, the left child of the most recent split
    pub(crate) nyt_node: NodeId,
    symbol_index: HashMap<Symbol, NodeId>,
    weight_groups: WeightGroups,
    max_symbols: u32,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new(DEFAULT_MAX_SYMBOLS)
    }
}

impl Tree {
    /// Creates an empty tree, a lone NYT root, with room for `max_symbols` distinct symbols.
    pub fn new(max_symbols: u32) -> Self {
        let order = root_order(max_symbols);
        let mut weight_groups = WeightGroups::default();
        weight_groups.insert(0, order, 0);
        Tree {
            nodes: vec![Node::new_nyt(order, None)],
            root_node: 0,
            nyt_node: 0,
            symbol_index: HashMap::new(),
            weight_groups,
            max_symbols,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root_node
    }
    pub fn nyt(&self) -> NodeId {
        self.nyt_node
    }
    pub fn get_node(&self, node: NodeId) -> &Node {
        &self.nodes[node]
    }
    pub fn get_root_node(&self) -> &Node {
        &self.nodes[self.root_node]
    }
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
    pub fn num_symbols(&self) -> usize {
        self.symbol_index.len()
    }
    pub fn max_symbols(&self) -> u32 {
        self.max_symbols
    }
    /// true as long as no symbol was observed, the root is the NYT leaf then
    pub fn is_empty(&self) -> bool {
        self.symbol_index.is_empty()
    }
    /// number of symbols processed so far
    pub fn total_weight(&self) -> u64 {
        self.nodes[self.root_node].weight
    }
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbol_index.contains_key(&symbol)
    }
    pub fn leaf_for(&self, symbol: Symbol) -> Option<NodeId> {
        self.symbol_index.get(&symbol).copied()
    }

    /// Bits from the root down to `node`, empty for the root itself.
    pub fn path_from_root(&self, node: NodeId) -> BitSequence {
        let mut path = BitSequence::new();
        let mut current = node;
        while let Some(parent) = self.nodes[current].parent {
            path.push(self.nodes[parent].right == Some(current));
            current = parent;
        }
        path.reverse();
        path
    }

    /// The current code of an already observed symbol.
    ///
    /// `None` for a first occurrence, the caller then sends [`Tree::path_to_nyt`] followed
    /// by the raw symbol.
    pub fn code_for(&self, symbol: Symbol) -> Option<BitSequence> {
        self.leaf_for(symbol).map(|leaf| self.path_from_root(leaf))
    }

    pub fn path_to_nyt(&self) -> BitSequence {
        self.path_from_root(self.nyt_node)
    }

    /// all observed symbols with their current code, sorted by symbol
    pub fn codes(&self) -> Vec<(Symbol, BitSequence)> {
        let mut codes: Vec<_> = self
            .symbol_index
            .iter()
            .map(|(&symbol, &leaf)| (symbol, self.path_from_root(leaf)))
            .collect();
        codes.sort_by_key(|(symbol, _)| *symbol);
        codes
    }

    /// length of the longest root to leaf path
    pub fn get_depth(&self) -> usize {
        let mut max_depth = 0;
        self.walk_tree(self.root_node, &mut |_, _, depth| {
            max_depth = max_depth.max(depth);
        });
        max_depth
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        self.walk_tree(self.root_node, &mut |id, node, _| {
            nodes.push(NodeRecord::new(id, node));
        });
        TreeSnapshot {
            nodes,
            root_id: self.root_node,
        }
    }

    /// Registers one occurence of `symbol` and restructures the tree.
    ///
    /// A first occurence splits the NYT leaf, which fails once all `max_symbols` slots
    /// are taken. The tree is left unchanged in that case.
    pub fn encode_update(&mut self, symbol: Symbol) -> Result<(), CapacityError> {
        let start = match self.symbol_index.get(&symbol) {
            Some(&leaf) => leaf,
            None => self.split_nyt(symbol)?,
        };
        self.increment_from(start);
        Ok(())
    }

    /// Turns the NYT leaf into an internal node with a new NYT leaf on the left and a leaf
    /// for `symbol` on the right. The internal node keeps the arena slot and order number of
    /// the old NYT and is returned with its weight still at 0.
    fn split_nyt(&mut self, symbol: Symbol) -> Result<NodeId, CapacityError> {
        let internal = self.nyt_node;
        let order = self.nodes[internal].order;
        if order < 2 {
            return Err(CapacityError {
                max_symbols: self.max_symbols,
            });
        }
        debug!(
            "new symbol {}, splitting NYT node {} (order {})",
            symbol, internal, order
        );

        let nyt = self.nodes.len();
        let leaf = nyt + 1;
        self.nodes.push(Node::new_nyt(order - 2, Some(internal)));
        self.nodes.push(Node::new_leaf(symbol, order - 1, 1, internal));

        let node = &mut self.nodes[internal];
        node.is_nyt = false;
        node.left = Some(nyt);
        node.right = Some(leaf);

        // the internal node stays registered under weight 0 with its old order
        self.weight_groups.insert(0, order - 2, nyt);
        self.weight_groups.insert(1, order - 1, leaf);
        if let Some(previous) = self.symbol_index.insert(symbol, leaf) {
            fault(InvariantViolation::DuplicateSymbol {
                symbol,
                first: previous,
                second: leaf,
            });
        }
        self.nyt_node = nyt;
        Ok(internal)
    }

    /// The FGK walk: from `start` up to the root, swap every node with its block leader and
    /// increment it.
    fn increment_from(&mut self, start: NodeId) {
        let mut current = Some(start);
        while let Some(node) = current {
            let weight = self.nodes[node].weight;
            let leader = match self.weight_groups.leader(weight) {
                Some(leader) => leader,
                None => fault(self.stale_group(node)),
            };
            if leader != node && !self.is_ancestor(leader, node) {
                self.swap_nodes(node, leader);
            }

            let order = self.nodes[node].order;
            if !self.weight_groups.move_node(node, order, weight, weight + 1) {
                fault(self.stale_group(node));
            }
            self.nodes[node].weight += 1;
            self.check_weight_sum(node);
            current = self.nodes[node].parent;
        }
    }

    /// Children are incremented before their parent, so the sum has to hold on every step.
    #[inline]
    fn check_weight_sum(&self, node: NodeId) {
        let parent = &self.nodes[node];
        if let (Some(left), Some(right)) = (parent.left, parent.right) {
            let left_weight = self.nodes[left].weight;
            let right_weight = self.nodes[right].weight;
            if parent.weight != left_weight + right_weight {
                fault(InvariantViolation::WeightSum {
                    node,
                    weight: parent.weight,
                    left_weight,
                    right_weight,
                });
            }
        }
    }

    /// Ancestors are numbered strictly higher than their descendants, so the walk up can
    /// stop as soon as it passes the order number of `candidate`.
    fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let candidate_order = self.nodes[candidate].order;
        let mut current = self.nodes[node].parent;
        while let Some(ancestor) = current {
            if ancestor == candidate {
                return true;
            }
            if self.nodes[ancestor].order > candidate_order {
                return false;
            }
            current = self.nodes[ancestor].parent;
        }
        false
    }

    /// Exchanges the tree positions and order numbers of two nodes of equal weight. Each
    /// node keeps its weight, symbol and subtree.
    fn swap_nodes(&mut self, node: NodeId, leader: NodeId) {
        let (parent, leader_parent) = match (self.nodes[node].parent, self.nodes[leader].parent) {
            (Some(parent), Some(leader_parent)) => (parent, leader_parent),
            (None, _) => fault(InvariantViolation::SwapWithAncestor {
                node: leader,
                ancestor: node,
            }),
            (_, None) => fault(InvariantViolation::SwapWithAncestor {
                node,
                ancestor: leader,
            }),
        };
        if log_enabled!(Trace) {
            trace!(
                "swap node {} {:?} with leader {} {:?}",
                node,
                self.nodes[node],
                leader,
                self.nodes[leader]
            );
        }

        if parent == leader_parent {
            let shared = &mut self.nodes[parent];
            std::mem::swap(&mut shared.left, &mut shared.right);
        } else {
            self.replace_child(parent, node, leader);
            self.replace_child(leader_parent, leader, node);
            self.nodes[node].parent = Some(leader_parent);
            self.nodes[leader].parent = Some(parent);
        }

        let order = self.nodes[node].order;
        let leader_order = self.nodes[leader].order;
        self.nodes[node].order = leader_order;
        self.nodes[leader].order = order;
        self.weight_groups.exchange(
            self.nodes[node].weight,
            (node, leader_order),
            (leader, order),
        );
    }

    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        let parent_node = &mut self.nodes[parent];
        if parent_node.left == Some(old) {
            parent_node.left = Some(new);
        } else if parent_node.right == Some(old) {
            parent_node.right = Some(new);
        } else {
            fault(InvariantViolation::BrokenLink { node: old, parent });
        }
    }

    fn stale_group(&self, node: NodeId) -> InvariantViolation {
        InvariantViolation::StaleWeightGroup {
            node,
            weight: self.nodes[node].weight,
            order: self.nodes[node].order,
        }
    }

    /// Pre-order walk over the subtree of `start`, calling `fun` with id, node and depth.
    pub(crate) fn walk_tree<F>(&self, start: NodeId, fun: &mut F)
    where
        F: FnMut(NodeId, &Node, usize),
    {
        let mut stack = vec![(start, 0)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            fun(id, node, depth);
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
        }
    }

    /// Verifies every structural invariant of the tree and reports the first one broken.
    ///
    /// This is a sweep over the whole tree. Updates only check the nodes on their own walk,
    /// call this after updates where the full guarantee is needed.
    ///
    /// Checks parent/child links and reachability, weight sums, leaf contents, the symbol
    /// index, the single NYT leaf, the weight group index and the sibling property (weights
    /// are non-decreasing in order number, order numbers are unique and parents are numbered
    /// above their children).
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if let Some(parent) = self.nodes[self.root_node].parent {
            return Err(InvariantViolation::BrokenLink {
                node: self.root_node,
                parent,
            });
        }

        let mut reached = vec![false; self.nodes.len()];
        let mut symbols: HashMap<Symbol, NodeId> = HashMap::new();
        let mut nyt_count = 0;
        let mut stack = vec![self.root_node];
        while let Some(id) = stack.pop() {
            if reached[id] {
                return Err(InvariantViolation::Unreachable { node: id });
            }
            reached[id] = true;
            let node = &self.nodes[id];
            if self.weight_groups.get(node.weight, node.order) != Some(id) {
                return Err(self.stale_group(id));
            }

            match (node.left, node.right) {
                (None, None) => {
                    if node.is_nyt {
                        nyt_count += 1;
                        if node.weight != 0 {
                            return Err(InvariantViolation::NytWeight {
                                node: id,
                                weight: node.weight,
                            });
                        }
                        continue;
                    }
                    let symbol = match node.symbol {
                        Some(symbol) => symbol,
                        None => return Err(InvariantViolation::EmptyLeaf { node: id }),
                    };
                    if let Some(first) = symbols.insert(symbol, id) {
                        return Err(InvariantViolation::DuplicateSymbol {
                            symbol,
                            first,
                            second: id,
                        });
                    }
                    if self.symbol_index.get(&symbol) != Some(&id) {
                        return Err(InvariantViolation::StaleSymbolIndex { symbol, node: id });
                    }
                }
                (Some(left), Some(right)) => {
                    if node.is_nyt || node.symbol.is_some() {
                        return Err(InvariantViolation::MalformedInternal { node: id });
                    }
                    for &child in &[left, right] {
                        let child_node = &self.nodes[child];
                        if child_node.parent != Some(id) {
                            return Err(InvariantViolation::BrokenLink {
                                node: child,
                                parent: id,
                            });
                        }
                        if child_node.order >= node.order {
                            return Err(InvariantViolation::ParentOrder {
                                node: child,
                                order: child_node.order,
                                parent: id,
                                parent_order: node.order,
                            });
                        }
                        stack.push(child);
                    }
                    let left_weight = self.nodes[left].weight;
                    let right_weight = self.nodes[right].weight;
                    if node.weight != left_weight + right_weight {
                        return Err(InvariantViolation::WeightSum {
                            node: id,
                            weight: node.weight,
                            left_weight,
                            right_weight,
                        });
                    }
                }
                _ => return Err(InvariantViolation::MalformedInternal { node: id }),
            }
        }

        if let Some(node) = reached.iter().position(|&reached| !reached) {
            return Err(InvariantViolation::Unreachable { node });
        }
        if nyt_count != 1 {
            return Err(InvariantViolation::NytCount { count: nyt_count });
        }
        if !self.nodes[self.nyt_node].is_nyt {
            return Err(InvariantViolation::NytCount { count: 0 });
        }
        for (&symbol, &node) in &self.symbol_index {
            if self.nodes[node].symbol != Some(symbol) {
                return Err(InvariantViolation::StaleSymbolIndex { symbol, node });
            }
        }
        if self.weight_groups.len() != self.nodes.len() {
            return Err(InvariantViolation::WeightGroupSize {
                indexed: self.weight_groups.len(),
                nodes: self.nodes.len(),
            });
        }

        let mut by_order: Vec<NodeId> = (0..self.nodes.len()).collect();
        by_order.sort_by_key(|&id| self.nodes[id].order);
        for pair in by_order.windows(2) {
            let (lower, higher) = (&self.nodes[pair[0]], &self.nodes[pair[1]]);
            if lower.order == higher.order {
                return Err(InvariantViolation::DuplicateOrder {
                    order: lower.order,
                    first: pair[0],
                    second: pair[1],
                });
            }
            if lower.weight > higher.weight {
                return Err(InvariantViolation::SiblingOrder {
                    lower: pair[0],
                    lower_order: lower.order,
                    lower_weight: lower.weight,
                    higher: pair[1],
                    higher_order: higher.order,
                    higher_weight: higher.weight,
                });
            }
        }
        Ok(())
    }

    /// `(symbol, code)` of every observed symbol as `0`/`1` strings, for logging
    pub fn code_table(&self) -> Vec<(Symbol, String)> {
        self.codes()
            .into_iter()
            .map(|(symbol, code)| (symbol, bits_to_string(&code)))
            .collect()
    }
}

#[cold]
fn fault(violation: InvariantViolation) -> ! {
    panic!("adaptive huffman tree corrupted: {}", violation)
}
