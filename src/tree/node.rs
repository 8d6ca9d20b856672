use crate::error::CodingError;

/// Index of a node in its tree's arena.
pub type NodeId = usize;

/// The two children of an internal node. A node has both or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Children {
    pub left: NodeId,
    pub right: NodeId,
}

/// One vertex of the code tree.
///
/// Nodes live in the tree's arena and refer to each other by [`NodeId`]; the tree is the only
/// thing that rewires them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    weight: u64,
    symbol: Option<String>,
    nyt: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<Children>,
    pub(crate) rank: usize,
}

impl Node {
    /// A weightless leaf standing for every symbol not seen yet.
    pub(crate) const fn nyt(parent: Option<NodeId>, rank: usize) -> Self {
        Self {
            weight: 0,
            symbol: None,
            nyt: true,
            parent,
            children: None,
            rank,
        }
    }

    pub(crate) fn leaf(symbol: String, parent: NodeId, rank: usize) -> Self {
        Self {
            weight: 0,
            symbol: Some(symbol),
            nyt: false,
            parent: Some(parent),
            children: None,
            rank,
        }
    }

    pub const fn weight(&self) -> u64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: i64) -> Result<(), CodingError> {
        self.weight = u64::try_from(weight).map_err(|_| CodingError::InvalidWeight { weight })?;
        Ok(())
    }

    pub(crate) const fn increment_weight(&mut self) {
        self.weight += 1;
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// `None` and the empty string both clear the symbol.
    pub fn set_symbol(&mut self, symbol: Option<String>) {
        self.symbol = symbol.filter(|s| !s.is_empty());
    }

    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Whether this is the not-yet-transmitted leaf.
    pub const fn is_nyt(&self) -> bool {
        self.nyt
    }

    /// Turns this NYT leaf into the parent of `children`.
    pub(crate) const fn branch(&mut self, children: Children) {
        self.children = Some(children);
        self.nyt = false;
    }

    pub const fn left(&self) -> Option<NodeId> {
        match self.children {
            Some(children) => Some(children.left),
            None => None,
        }
    }

    pub const fn right(&self) -> Option<NodeId> {
        match self.children {
            Some(children) => Some(children.right),
            None => None,
        }
    }

    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Position in the tree's order list; 0 is the NYT end.
    pub const fn rank(&self) -> usize {
        self.rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch_of(left_weight: i64, right_weight: i64) -> (Node, Node, Node) {
        let mut parent = Node::nyt(None, 2);
        parent.branch(Children { left: 1, right: 2 });
        parent.set_weight(left_weight + right_weight).unwrap();

        let mut left = Node::leaf("b".to_string(), 0, 0);
        left.set_weight(left_weight).unwrap();
        let mut right = Node::leaf("a".to_string(), 0, 1);
        right.set_weight(right_weight).unwrap();
        (parent, left, right)
    }

    #[test]
    fn establishes_weights_and_symbols() {
        let (parent, left, right) = branch_of(1, 2);
        assert_eq!(parent.weight(), 3);
        assert_eq!(right.symbol(), Some("a"));
        assert_eq!(right.weight(), 2);
        assert_eq!(left.symbol(), Some("b"));
        assert_eq!(left.weight(), 1);
        assert_eq!((parent.left(), parent.right()), (Some(1), Some(2)));
    }

    #[test]
    fn detects_leaves() {
        let (parent, left, right) = branch_of(1, 2);
        assert!(!parent.is_leaf());
        assert!(left.is_leaf());
        assert!(right.is_leaf());
        assert_eq!(left.left(), None);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut node = Node::nyt(None, 0);
        node.set_weight(4).unwrap();
        assert_eq!(node.set_weight(-1), Err(CodingError::InvalidWeight { weight: -1 }));
        assert_eq!(node.weight(), 4);
    }

    #[test]
    fn empty_symbol_means_none() {
        let mut node = Node::leaf("x".to_string(), 0, 0);
        node.set_symbol(Some(String::new()));
        assert_eq!(node.symbol(), None);
        node.set_symbol(Some("y".to_string()));
        assert_eq!(node.symbol(), Some("y"));
        node.set_symbol(None);
        assert_eq!(node.symbol(), None);
    }

    #[test]
    fn branching_clears_nyt_status() {
        let mut node = Node::nyt(None, 0);
        assert!(node.is_nyt() && node.is_leaf());
        node.branch(Children { left: 1, right: 2 });
        assert!(!node.is_nyt() && !node.is_leaf());
    }
}
