use core::fmt;
use std::collections::HashMap;

use crate::alphabet::Alphabet;
use crate::bits::BitReader;
use crate::config::CodecConfig;
use crate::error::{CodingError, SequenceFault};

pub mod node;

use node::{Children, Node, NodeId};

if_tracing! {
    use tracing::{debug, trace};
}

/// Where the decoder is while resolving one symbol.
enum DecodeState {
    /// Walking down from the root, one bit per edge.
    Traversing(NodeId),
    /// Reached the NYT leaf; a phased code follows.
    ReadingNewCode,
    Resolved(String),
}

/// The adaptive code tree shared, by construction, between an encoder and a decoder.
///
/// Nodes are kept in an arena. Alongside the tree structure the tree keeps Vitter's implicit
/// numbering as an explicit order list: ascending weight, leaves before internal nodes of the same
/// weight, siblings adjacent, the NYT leaf first and the root last. A *block* is a run of nodes in
/// that list sharing weight and kind.
///
/// One instance serves one session. It is not meant to be shared between threads.
#[derive(Debug, Clone)]
pub struct AdaptiveTree {
    alphabet: Alphabet,
    nodes: Vec<Node>,
    root: NodeId,
    nyt: NodeId,
    order: Vec<NodeId>,
    leaves: HashMap<String, NodeId>,
}

impl AdaptiveTree {
    /// A tree made of a single NYT root.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            nodes: vec![Node::nyt(None, 0)],
            root: 0,
            nyt: 0,
            order: vec![0],
            leaves: HashMap::new(),
        }
    }

    pub fn with_config(config: &CodecConfig) -> Result<Self, CodingError> {
        Ok(Self::new(Alphabet::new(config)?))
    }

    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The current not-yet-transmitted leaf.
    pub const fn nyt(&self) -> NodeId {
        self.nyt
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in ascending numbering, NYT end first.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Number of distinct symbols introduced so far.
    pub fn symbol_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of symbol occurrences added so far.
    pub fn total_weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    /// The leaf holding `group`, or the NYT leaf if `group` has not been seen.
    pub fn find(&self, group: &str) -> NodeId {
        self.leaves.get(group).copied().unwrap_or(self.nyt)
    }

    /// Edges from the root to `id`: `'1'` for a right turn, `'0'` for a left turn. A lone root is
    /// written as `"0"`.
    pub fn path(&self, id: NodeId) -> String {
        if id == self.root {
            return "0".to_string();
        }

        let mut bits = Vec::new();
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            bits.push(if self.is_right_child(current) { '1' } else { '0' });
            current = parent;
        }
        bits.iter().rev().collect()
    }

    /// Records one occurrence of `group` without producing any code.
    pub fn add(&mut self, group: &str) -> Result<(), CodingError> {
        self.alphabet.rank(group)?;
        let node = self.find(group);
        self.update(node, group);
        Ok(())
    }

    /// Emits the code for one symbol group and adapts the tree to it.
    pub fn encode_symbol(&mut self, group: &str) -> Result<String, CodingError> {
        let rank = self.alphabet.rank(group)?;
        let node = self.find(group);
        let mut code = self.path(node);
        if node == self.nyt {
            self.alphabet.phased_code().write(rank, &mut code);
            if_tracing! {
                debug!(symbol = ?group, rank, code_len = code.len(), "new symbol");
            }
        }
        self.update(node, group);
        Ok(code)
    }

    /// Decodes the first symbol group of `bits`, returning it with the number of bits it used.
    pub fn decode_bits(&mut self, bits: &str) -> Result<(String, usize), CodingError> {
        let mut reader = BitReader::new(bits);
        let group = self.decode_next(&mut reader)?;
        Ok((group, reader.position()))
    }

    /// Decodes one symbol group from `reader` and adapts the tree to it.
    pub fn decode_next(&mut self, reader: &mut BitReader<'_>) -> Result<String, CodingError> {
        if self.nodes[self.root].is_leaf() {
            // a lone root still costs one bit
            reader.next_bit()?;
        }

        let mut state = DecodeState::Traversing(self.root);
        loop {
            state = match state {
                DecodeState::Traversing(id) => match self.nodes[id].children {
                    Some(children) => {
                        let next = if reader.next_bit()? { children.right } else { children.left };
                        DecodeState::Traversing(next)
                    }
                    None => match self.nodes[id].symbol() {
                        Some(symbol) => DecodeState::Resolved(symbol.to_owned()),
                        None => DecodeState::ReadingNewCode,
                    },
                },
                DecodeState::ReadingNewCode => {
                    let start = reader.position();
                    let rank = self.alphabet.phased_code().read(reader)?;
                    let group = self
                        .alphabet
                        .unrank(rank)
                        .ok_or_else(|| CodingError::sequence(start, SequenceFault::RankOutOfRange { rank }))?;
                    if self.leaves.contains_key(&group) {
                        return Err(CodingError::sequence(start, SequenceFault::AlreadyTransmitted(group)));
                    }
                    if_tracing! {
                        debug!(symbol = ?group, rank, "new symbol");
                    }
                    DecodeState::Resolved(group)
                }
                DecodeState::Resolved(group) => {
                    let node = self.find(&group);
                    self.update(node, &group);
                    return Ok(group);
                }
            };
        }
    }

    /// Encodes a whole text, padding its last group.
    pub fn encode(&mut self, text: &str) -> Result<String, CodingError> {
        let mut out = String::new();
        for group in self.alphabet.split_groups(text) {
            out.push_str(&self.encode_symbol(&group)?);
        }
        Ok(out)
    }

    /// Decodes groups until `bits` is exhausted.
    pub fn decode(&mut self, bits: &str) -> Result<String, CodingError> {
        let mut reader = BitReader::new(bits);
        let mut out = String::new();
        while !reader.is_exhausted() {
            out.push_str(&self.decode_next(&mut reader)?);
        }
        Ok(out)
    }

    /// Counts one occurrence of `group`, whose leaf (or the NYT leaf) is `node`.
    fn update(&mut self, node: NodeId, group: &str) {
        let mut current = Some(node);
        let mut deferred_leaf = None;

        if node == self.nyt {
            let leaf = self.split(node, group);
            if node == self.root {
                self.nodes[node].increment_weight();
                self.nodes[leaf].increment_weight();
                return;
            }
            // the new leaf is the split node's own child, it must not be slid past
            deferred_leaf = Some(leaf);
        } else {
            let leader = self.leader(node);
            self.swap(node, leader);
            if self.sibling(node) == Some(self.nyt) {
                // its parent has the same weight and would block the slide
                deferred_leaf = Some(node);
                current = self.nodes[node].parent;
            }
        }

        while let Some(id) = current {
            current = self.slide_and_increment(id);
        }
        if let Some(leaf) = deferred_leaf {
            self.slide_and_increment(leaf);
        }
    }

    /// Replaces the NYT leaf `id` by an internal node over a fresh NYT leaf (left) and a leaf for
    /// `group` (right). Returns the new symbol leaf.
    fn split(&mut self, id: NodeId, group: &str) -> NodeId {
        let left = self.nodes.len();
        let right = left + 1;
        self.nodes.push(Node::nyt(Some(id), 0));
        self.nodes.push(Node::leaf(group.to_owned(), id, 1));
        self.nodes[id].branch(Children { left, right });

        self.order.insert(0, right);
        self.order.insert(0, left);
        for (rank, &member) in self.order.iter().enumerate() {
            self.nodes[member].rank = rank;
        }

        self.nyt = left;
        self.leaves.insert(group.to_owned(), right);
        right
    }

    /// Highest-numbered node of the block `id` belongs to.
    fn leader(&self, id: NodeId) -> NodeId {
        let node = &self.nodes[id];
        self.order[node.rank + 1..]
            .iter()
            .copied()
            .take_while(|&other| {
                let other_node = &self.nodes[other];
                other != self.root && other_node.weight() == node.weight() && other_node.is_leaf() == node.is_leaf()
            })
            .last()
            .unwrap_or(id)
    }

    /// Moves `id` ahead of the block that must precede it once its weight grows, increments its
    /// weight and returns the next node to adapt.
    ///
    /// A leaf of weight `w` passes the internal nodes of weight `w`; an internal node of weight `w`
    /// passes the leaves of weight `w + 1`. The root and the node's parent are never passed.
    fn slide_and_increment(&mut self, id: NodeId) -> Option<NodeId> {
        let weight = self.nodes[id].weight();
        let is_leaf = self.nodes[id].is_leaf();
        let former_parent = self.nodes[id].parent;
        let in_next_block = |other: &Node| {
            if is_leaf {
                !other.is_leaf() && other.weight() == weight
            } else {
                other.is_leaf() && other.weight() == weight + 1
            }
        };

        while let Some(&next) = self.order.get(self.nodes[id].rank + 1) {
            if next == self.root || Some(next) == self.nodes[id].parent || !in_next_block(&self.nodes[next]) {
                break;
            }
            if_tracing! {
                trace!(node = id, past = next, weight, "slide");
            }
            self.swap(id, next);
        }
        self.nodes[id].increment_weight();

        if is_leaf { self.nodes[id].parent } else { former_parent }
    }

    /// Exchanges the tree positions and numbering of `a` and `b`. Subtrees travel with their roots.
    fn swap(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let (Some(parent_a), Some(parent_b)) = (self.nodes[a].parent, self.nodes[b].parent) else {
            return;
        };

        let a_on_right = self.is_right_child(a);
        let b_on_right = self.is_right_child(b);
        self.set_child(parent_a, a_on_right, b);
        self.set_child(parent_b, b_on_right, a);
        self.nodes[a].parent = Some(parent_b);
        self.nodes[b].parent = Some(parent_a);

        let (rank_a, rank_b) = (self.nodes[a].rank, self.nodes[b].rank);
        self.order.swap(rank_a, rank_b);
        self.nodes[a].rank = rank_b;
        self.nodes[b].rank = rank_a;
    }

    fn set_child(&mut self, parent: NodeId, right: bool, child: NodeId) {
        if let Some(children) = self.nodes[parent].children.as_mut() {
            if right {
                children.right = child;
            } else {
                children.left = child;
            }
        }
    }

    fn is_right_child(&self, id: NodeId) -> bool {
        self.nodes[id].parent.and_then(|parent| self.nodes[parent].right()) == Some(id)
    }

    fn sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id].parent?;
        let children = self.nodes[parent].children?;
        Some(if children.left == id { children.right } else { children.left })
    }

    fn fmt_node(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.nodes[id];
        match node.children {
            Some(children) => {
                write!(f, "({} ", node.weight())?;
                self.fmt_node(children.left, f)?;
                f.write_str(" ")?;
                self.fmt_node(children.right, f)?;
                f.write_str(")")
            }
            None => match node.symbol() {
                Some(symbol) => write!(f, "{symbol:?}:{}", node.weight()),
                None => write!(f, "NYT:{}", node.weight()),
            },
        }
    }
}

impl Default for AdaptiveTree {
    fn default() -> Self {
        Self::new(Alphabet::default())
    }
}

/// `(weight left right)` for internal nodes, `"symbol":weight` for leaves.
impl fmt::Display for AdaptiveTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(self.root, f)
    }
}
