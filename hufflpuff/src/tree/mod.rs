pub mod snapshot;
mod tree;
pub(crate) mod tree_node;
mod weight_groups;

#[cfg(test)]
mod proptests;

pub use tree::Tree;

/// Root order number of a tree with room for `max_symbols` symbols.
///
/// Every NYT split hands out the two order numbers below the old NYT, so the root needs
/// `2 * max_symbols` to leave order 0 for the last NYT leaf.
#[inline]
pub fn root_order(max_symbols: u32) -> u64 {
    2 * max_symbols as u64
}

#[test]
fn test_root_order() {
    assert_eq!(root_order(0), 0);
    assert_eq!(root_order(1), 2);
    assert_eq!(root_order(256), 512);
    assert_eq!(root_order(u32::MAX), 2 * u32::MAX as u64);
}
