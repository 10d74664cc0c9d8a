use crate::frequency::FrequencyTable;
use derivative::Derivative;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Leaf(u8),
    Internal(Box<Node>, Box<Node>),
}

/// A node of the Huffman tree.
///
/// Nodes order by `(weight, order)` only. `order` is the symbol value for
/// leaves and `256 + k` for the k-th merged node, which makes ties resolve the
/// same way on every run.
#[derive(Debug, Clone, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
    weight: usize,
    order: usize,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    #[derivative(Hash = "ignore")]
    kind: Kind,
}

impl Node {
    fn leaf(symbol: u8, weight: usize) -> Self {
        Self {
            weight,
            order: symbol as usize,
            kind: Kind::Leaf(symbol),
        }
    }

    fn from_children(left: Node, right: Node, order: usize) -> Self {
        Self {
            weight: left.weight + right.weight,
            order,
            kind: Kind::Internal(Box::new(left), Box::new(right)),
        }
    }

    pub fn weight(&self) -> usize {
        self.weight
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, Kind::Leaf(_))
    }

    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            Kind::Leaf(_) => 1,
            Kind::Internal(l, r) => l.leaf_count() + r.leaf_count(),
        }
    }

    pub fn depth(&self) -> usize {
        match &self.kind {
            Kind::Leaf(_) => 0,
            Kind::Internal(l, r) => 1 + l.depth().max(r.depth()),
        }
    }
}

/// Builds the Huffman tree for `freq`, or `None` when the table is empty.
///
/// The smaller of the two merged nodes becomes the left child.
pub fn build(freq: &FrequencyTable) -> Option<Node> {
    let mut pq: BinaryHeap<_> = freq
        .iter()
        .map(|(s, count)| Reverse(Node::leaf(s, count)))
        .collect();

    let mut next_order = 256;
    while pq.len() > 1 {
        let (Some(Reverse(left)), Some(Reverse(right))) = (pq.pop(), pq.pop()) else {
            break;
        };
        pq.push(Reverse(Node::from_children(left, right, next_order)));
        next_order += 1;
    }

    let root = pq.pop().map(|r| r.0);
    if let Some(root) = &root {
        log::trace!(
            "huffman tree: {} leaves, depth {}, weight {}",
            root.leaf_count(),
            root.depth(),
            root.weight
        );
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol_of(node: &Node) -> Option<u8> {
        match node.kind {
            Kind::Leaf(s) => Some(s),
            Kind::Internal(..) => None,
        }
    }

    #[test]
    fn node_leaf() {
        let n = Node::leaf(b'x', 7);
        assert_eq!(n.weight(), 7);
        assert_eq!(symbol_of(&n), Some(b'x'));
        assert!(n.is_leaf());
    }

    #[test]
    fn node_from_children() {
        let left = Node::leaf(1, 5);
        let right = Node::leaf(2, 3);

        let n = Node::from_children(left.clone(), right.clone(), 256);

        assert_eq!(n.weight(), 8);
        assert_eq!(symbol_of(&n), None);
        assert_eq!(n.kind, Kind::Internal(Box::new(left), Box::new(right)));
    }

    #[test]
    fn node_compare_ignores_kind() {
        let a = Node::leaf(3, 10);
        let b = Node::from_children(Node::leaf(1, 4), Node::leaf(2, 6), 3);

        assert_eq!(a, b);
    }

    #[test]
    fn node_compare_ordering() {
        for i in 1..=1000 {
            let a = Node::leaf(200, i);
            let b = Node::leaf(0, i + 1);

            assert!(a < b);
        }

        // equal weight falls back to order
        assert!(Node::leaf(b'a', 2) < Node::leaf(b'b', 2));
        assert!(Node::leaf(255, 2) < Node::from_children(Node::leaf(0, 1), Node::leaf(1, 1), 256));
    }

    #[test]
    fn empty_table_no_tree() {
        assert!(build(&FrequencyTable::default()).is_none());
    }

    #[test]
    fn single_symbol_is_leaf_root() {
        let root = build(&FrequencyTable::of(b"aaaa")).unwrap();

        assert!(root.is_leaf());
        assert_eq!(root.weight(), 4);
        assert_eq!(symbol_of(&root), Some(b'a'));
    }

    #[test]
    fn abracadabra_shape() {
        let root = build(&FrequencyTable::of(b"abracadabra")).unwrap();

        assert_eq!(root.weight(), 11);
        assert_eq!(root.leaf_count(), 5);
        assert_eq!(root.depth(), 3);

        let Kind::Internal(left, right) = root.kind() else {
            panic!("root should be internal");
        };
        assert_eq!(symbol_of(left), Some(b'a'));
        assert_eq!(right.weight(), 6);
    }

    #[test]
    fn build_is_deterministic() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let a = build(&FrequencyTable::of(input)).unwrap();
        for _ in 0..20 {
            let b = build(&FrequencyTable::of(input)).unwrap();
            assert_eq!(format!("{:?}", a), format!("{:?}", b));
        }
    }
}
