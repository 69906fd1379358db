use crate::NodeId;
use crate::Symbol;

/// A vertex of the adaptive tree.
///
/// Nodes live in the arena of their [`Tree`](crate::Tree) and link to each other by arena
/// position. Children are owned by their parent, `parent` is a plain back-reference.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    /// position in the canonical numbering, the root holds the highest order number
    pub(crate) order: u64,
    /// the number of occurences, for parents the sum of both children
    pub(crate) weight: u64,
    pub(crate) symbol: Option<Symbol>,
    pub(crate) is_nyt: bool,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new_nyt(order: u64, parent: Option<NodeId>) -> Self {
        Node {
            order,
            is_nyt: true,
            parent,
            ..Default::default()
        }
    }

    pub(crate) fn new_leaf(symbol: Symbol, order: u64, weight: u64, parent: NodeId) -> Self {
        Node {
            order,
            weight,
            symbol: Some(symbol),
            parent: Some(parent),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    #[inline]
    pub fn order(&self) -> u64 {
        self.order
    }
    #[inline]
    pub fn weight(&self) -> u64 {
        self.weight
    }
    #[inline]
    pub fn symbol(&self) -> Option<Symbol> {
        self.symbol
    }
    #[inline]
    pub fn is_nyt(&self) -> bool {
        self.is_nyt
    }
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The child reached by a single path bit, `false` goes left and `true` goes right.
    #[inline]
    pub fn child(&self, bit: bool) -> Option<NodeId> {
        if bit {
            self.right
        } else {
            self.left
        }
    }
}

impl core::fmt::Debug for Node {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_nyt {
            f.write_fmt(format_args!("Node{{ NYT order:{} }}", self.order))
        } else {
            f.write_fmt(format_args!(
                "Node{{ symbol:{:?} weight:{} order:{} }}",
                self.symbol, self.weight, self.order
            ))
        }
    }
}
