use thiserror::Error;

use crate::NodeId;
use crate::Symbol;

/// The order-number budget of the tree is used up, no further NYT split is possible.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("tree capacity exhausted: all {max_symbols} symbol slots are in use")]
pub struct CapacityError {
    pub max_symbols: u32,
}

/// A broken structural invariant. Never expected in a correct tree, these describe which
/// node(s) violate which rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("node {node}: weight {weight} != left {left_weight} + right {right_weight}")]
    WeightSum {
        node: NodeId,
        weight: u64,
        left_weight: u64,
        right_weight: u64,
    },
    #[error("sibling property broken: node {lower} (order {lower_order}, weight {lower_weight}) outweighs node {higher} (order {higher_order}, weight {higher_weight})")]
    SiblingOrder {
        lower: NodeId,
        lower_order: u64,
        lower_weight: u64,
        higher: NodeId,
        higher_order: u64,
        higher_weight: u64,
    },
    #[error("node {node} (order {order}) is not numbered below its parent {parent} (order {parent_order})")]
    ParentOrder {
        node: NodeId,
        order: u64,
        parent: NodeId,
        parent_order: u64,
    },
    #[error("order number {order} is held by node {first} and node {second}")]
    DuplicateOrder {
        order: u64,
        first: NodeId,
        second: NodeId,
    },
    #[error("expected exactly one NYT leaf, found {count}")]
    NytCount { count: usize },
    #[error("NYT leaf {node} carries weight {weight}")]
    NytWeight { node: NodeId, weight: u64 },
    #[error("symbol {symbol} is registered on node {first} and node {second}")]
    DuplicateSymbol {
        symbol: Symbol,
        first: NodeId,
        second: NodeId,
    },
    #[error("symbol index entry for {symbol} points to node {node}, which does not carry it")]
    StaleSymbolIndex { symbol: Symbol, node: NodeId },
    #[error("leaf {node} neither is the NYT nor carries a symbol")]
    EmptyLeaf { node: NodeId },
    #[error("internal node {node} is malformed: it needs two children and no symbol")]
    MalformedInternal { node: NodeId },
    #[error("node {node} is not a child of its recorded parent {parent}")]
    BrokenLink { node: NodeId, parent: NodeId },
    #[error("node {node} is not reachable from the root")]
    Unreachable { node: NodeId },
    #[error("weight group index holds {indexed} entries for {nodes} nodes")]
    WeightGroupSize { indexed: usize, nodes: usize },
    #[error("weight group index is stale for node {node} (weight {weight}, order {order})")]
    StaleWeightGroup { node: NodeId, weight: u64, order: u64 },
    #[error("node {node} would be swapped with its ancestor {ancestor}")]
    SwapWithAncestor { node: NodeId, ancestor: NodeId },
}
