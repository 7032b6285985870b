use log::{debug, trace, warn};

use crate::INTERNAL_SENTINEL;
use crate::frequency::FrequencyTable;
use crate::queue::{Priority, PriorityQueue, QueueError};

/// A node of a Huffman tree.
///
/// Each internal node exclusively owns both of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A source byte and its occurrence count.
    Leaf { character: u8, frequency: u64 },
    /// The merge of two sub-trees. The left child sits behind a '0' bit,
    /// the right child behind a '1' bit.
    Internal {
        frequency: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(character: u8, frequency: u64) -> Self {
        Node::Leaf {
            character,
            frequency,
        }
    }

    /// Join two sub-trees under a new internal node. Returns `None` if the
    /// combined frequency does not fit in a `u64`.
    pub fn merge(left: Node, right: Node) -> Option<Self> {
        let frequency = left.frequency().checked_add(right.frequency())?;
        Some(Node::Internal {
            frequency,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn frequency(&self) -> u64 {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency,
        }
    }

    /// The byte this node stands for, if it is a leaf.
    pub fn character(&self) -> Option<u8> {
        match self {
            Node::Leaf { character, .. } => Some(*character),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Queue key of this node. Internal nodes carry the sentinel character.
    pub fn priority(&self) -> Priority {
        Priority::new(
            self.frequency(),
            self.character().unwrap_or(INTERNAL_SENTINEL),
        )
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Errors that can occur while building a tree
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum BuildError {
    #[error("Input is empty: no symbol has a non-zero frequency")]
    EmptyInput,
    #[error(transparent)]
    QueueOverflow(#[from] QueueError),
    #[error("Frequencies sum past u64::MAX")]
    FrequencyOverflow,
}

/// Index of a node in the construction arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

/// Nodes waiting to be merged. The queue refers to them by index; a node
/// leaves the arena when it is moved into its parent.
struct Arena {
    slots: Vec<Option<Node>>,
}

impl Arena {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.slots.push(Some(node));
        NodeId(self.slots.len() - 1)
    }

    /// Move a node out of the arena. Each queued id is taken once.
    fn take(&mut self, id: NodeId) -> Option<Node> {
        self.slots.get_mut(id.0).and_then(Option::take)
    }
}

/// A finished Huffman prefix-code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// One leaf is queued per byte with a non-zero count, in ascending byte
    /// order. The two lowest nodes are then repeatedly removed (the first
    /// becoming the left child, the second the right child) and their merge
    /// is queued again until a single node, the root, remains.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self, BuildError> {
        let mut queue = PriorityQueue::new();
        let mut arena = Arena::with_capacity(2 * queue.capacity() - 1);

        for (character, frequency) in frequencies.symbols() {
            let node = Node::leaf(character, frequency);
            let priority = node.priority();
            queue.insert(priority, arena.alloc(node))?;
        }
        debug!("Queued {} leaves", queue.len());

        // The last node left standing is the root.
        let mut root = None;
        while let Some((_, left)) = queue.remove_min() {
            let Some((_, right)) = queue.remove_min() else {
                root = arena.take(left);
                break;
            };
            let (Some(left), Some(right)) = (arena.take(left), arena.take(right)) else {
                break;
            };
            let (left_key, right_key) = (left.priority(), right.priority());
            let merged = Node::merge(left, right).ok_or(BuildError::FrequencyOverflow)?;
            trace!("Merged {left_key:?} and {right_key:?} into weight {}", merged.frequency());
            let priority = merged.priority();
            queue.insert(priority, arena.alloc(merged))?;
        }

        let tree = HuffmanTree {
            root: root.ok_or(BuildError::EmptyInput)?,
        };

        if let Some(character) = tree.sole_symbol() {
            warn!("Input has a single distinct byte {character:#04x}; the tree is a lone leaf");
        }
        debug!(
            "Built tree with {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        Ok(tree)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The only byte of a degenerate tree whose root is itself a leaf.
    pub fn sole_symbol(&self) -> Option<u8> {
        self.root.character()
    }

    /// Total frequency of all leaves.
    pub fn frequency(&self) -> u64 {
        self.root.frequency()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}

impl TryFrom<&FrequencyTable> for HuffmanTree {
    type Error = BuildError;

    fn try_from(frequencies: &FrequencyTable) -> Result<Self, Self::Error> {
        HuffmanTree::build(frequencies)
    }
}
