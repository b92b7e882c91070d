use crate::split::{categorical, numeric, SplitInfo, SplitResult};
use crate::{DatasetInfo, Datatype, DimensionSelect, GainFunction, ImportanceSink, TrainSet};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SplitNode {
    pub(crate) children: Vec<Node>,
    pub(crate) split_feature_id: usize,
    pub(crate) split_info: SplitInfo,
    // Leaf value of all the samples of the node, used if the node is collapsed
    pub(crate) val: f64,
    pub(crate) gain: f64,
    pub(crate) n_obs: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LeafNode {
    pub(crate) val: f64,
    pub(crate) gain: f64,
    pub(crate) n_obs: usize,
}

impl LeafNode {
    pub fn value(&self) -> f64 {
        self.val
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn n_obs(&self) -> usize {
        self.n_obs
    }
}

/// Node of a regression tree.
///
/// A split node owns its children, in the order given by the directions of its split:
/// `children[split_info.direction(x)]` is where a sample with value `x` goes. Every
/// node caches its gain: the gain of its samples for a leaf, the weighted gain of its
/// children for a split node.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Node {
    Split(SplitNode),
    Leaf(LeafNode),
}

impl Default for Node {
    fn default() -> Self {
        Node::Leaf(LeafNode {
            val: 0.,
            gain: 0.,
            n_obs: 0,
        })
    }
}

/// Reorder the samples of `begin..begin + count` so that the samples of every child are
/// contiguous, children after children, keeping their relative order.
///
/// Returns the number of samples of each child.
fn partition(
    data: &mut TrainSet,
    begin: usize,
    count: usize,
    feature_id: usize,
    split_info: &SplitInfo,
) -> Vec<usize> {
    let directions: Vec<usize> = (begin..begin + count)
        .map(|j| split_info.direction(data.features[(feature_id, j)]))
        .collect();

    let mut counts = vec![0; split_info.n_children()];
    for &direction in &directions {
        counts[direction] += 1;
    }

    // Counting sort: position of every sample once partitioned
    let mut next_position = Vec::with_capacity(counts.len());
    let mut offset = 0;
    for &n in &counts {
        next_position.push(offset);
        offset += n;
    }
    let mut destination: Vec<usize> = directions
        .into_iter()
        .map(|direction| {
            let position = next_position[direction];
            next_position[direction] += 1;
            position
        })
        .collect();

    // Apply the permutation in place, one cycle after the other
    for i in 0..count {
        while destination[i] != i {
            let target = destination[i];
            data.swap(begin + i, begin + target);
            destination.swap(i, target);
        }
    }
    counts
}

impl Node {
    /// Grow the node on the samples `begin..begin + count` of `data`.
    ///
    /// The samples are reordered in place, each child gets a contiguous range. A
    /// `max_depth` of 1 makes a leaf. Returns minus the gain of the node.
    ///
    /// # Panics
    /// If `count` or `max_depth` is 0, or if the range is out of the data.
    pub fn train<'i, G: GainFunction, S: DimensionSelect + ?Sized>(
        &mut self,
        data: &mut TrainSet,
        begin: usize,
        count: usize,
        info: &DatasetInfo,
        min_leaf_size: usize,
        min_gain_split: f64,
        max_depth: usize,
        selector: &mut S,
        gain_fn: &G,
        mut importance: Option<&mut (dyn ImportanceSink + 'i)>,
    ) -> f64 {
        assert_ne!(count, 0, "can't train a node without samples");
        assert_ne!(max_depth, 0, "the maximum depth must be at least 1");
        let end = begin + count;
        assert!(end <= data.n_samples());

        let mut best_gain = gain_fn.evaluate(&data.responses[begin..end]);
        let mut best_split: Option<(usize, SplitInfo)> = None;

        if max_depth != 1 {
            for feature_id in selector.dimensions() {
                let row = data.features.row(feature_id);
                let values: Vec<f64> = (begin..end).map(|j| row[j]).collect();
                let responses = &data.responses[begin..end];
                let result = match info.datatype(feature_id) {
                    Datatype::Numeric => numeric::split_if_better(
                        best_gain,
                        &values,
                        responses,
                        min_leaf_size,
                        min_gain_split,
                        gain_fn,
                    ),
                    Datatype::Categorical { n_categories } => categorical::split_if_better(
                        best_gain,
                        &values,
                        n_categories,
                        responses,
                        min_leaf_size,
                        min_gain_split,
                        gain_fn,
                    ),
                };

                let SplitResult { gain, info: split_info } = match result {
                    Some(e) => e,
                    None => continue,
                };
                best_gain = gain;
                best_split = Some((feature_id, split_info));

                // If the gain is the best possible, no need to keep looking
                if best_gain >= 0. {
                    break;
                }
            }
        }

        let val = gain_fn.output_leaf_value(&data.responses[begin..end]);
        let (split_feature_id, split_info) = match best_split {
            Some(e) => e,
            None => {
                trace!("leaf of {} samples, value {}", count, val);
                *self = Node::Leaf(LeafNode {
                    val,
                    gain: best_gain,
                    n_obs: count,
                });
                return -best_gain;
            }
        };

        trace!(
            "split of {} samples on dimension {}, gain {}",
            count,
            split_feature_id,
            best_gain
        );
        if let Some(sink) = importance.as_deref_mut() {
            sink.increase_frequency(split_feature_id, 1);
            sink.increase_cover(split_feature_id, best_gain);
        }

        let counts = partition(data, begin, count, split_feature_id, &split_info);
        debug_assert_eq!(counts.iter().sum::<usize>(), count);

        let mut children = Vec::with_capacity(counts.len());
        let mut node_gain = 0.;
        let mut child_begin = begin;
        for child_count in counts {
            let mut child = Node::default();
            let child_gain = child.train(
                data,
                child_begin,
                child_count,
                info,
                min_leaf_size,
                min_gain_split,
                max_depth - 1,
                selector,
                gain_fn,
                importance.as_deref_mut(),
            );
            node_gain += child_count as f64 / count as f64 * (-child_gain);
            children.push(child);
            child_begin += child_count;
        }

        *self = Node::Split(SplitNode {
            children,
            split_feature_id,
            split_info,
            val,
            gain: node_gain,
            n_obs: count,
        });
        -node_gain
    }

    /// Prediction for one sample, with one value per dimension.
    pub fn predict(&self, point: &[f64]) -> f64 {
        match self {
            Node::Split(split) => {
                let direction = split.split_info.direction(point[split.split_feature_id]);
                split.children[direction].predict(point)
            }
            Node::Leaf(leaf) => leaf.val,
        }
    }

    /// Remove the subtrees whose gain is lower than `threshold`.
    ///
    /// Children are visited first. A child that must be discarded is replaced by a leaf
    /// predicting the value of all its samples, so the other children keep their
    /// directions. A node whose children are all discarded becomes such a leaf itself.
    ///
    /// Returns true if the caller should discard this node.
    pub fn prune(&mut self, threshold: f64) -> bool {
        let split = match self {
            Node::Leaf(leaf) => return leaf.gain < threshold,
            Node::Split(split) => split,
        };

        let mut n_discarded = 0;
        for child in split.children.iter_mut() {
            if child.prune(threshold) {
                child.collapse();
                n_discarded += 1;
            }
        }
        let discard = split.gain < threshold;
        if n_discarded == split.children.len() {
            self.collapse();
        }
        discard
    }

    /// Turn the node into a leaf with the statistics of all its samples.
    pub(crate) fn collapse(&mut self) {
        if let Node::Split(split) = self {
            let leaf = LeafNode {
                val: split.val,
                gain: split.gain,
                n_obs: split.n_obs,
            };
            *self = Node::Leaf(leaf);
        }
    }

    /// Multiply all the predictions by `alpha`.
    pub fn apply_shrinking(&mut self, alpha: f64) {
        match self {
            Node::Split(split) => {
                split.val *= alpha;
                for child in split.children.iter_mut() {
                    child.apply_shrinking(alpha);
                }
            }
            Node::Leaf(leaf) => leaf.val *= alpha,
        }
    }

    pub fn is_leaf(&self) -> bool {
        match self {
            Node::Split(_) => false,
            Node::Leaf(_) => true,
        }
    }

    pub fn gain(&self) -> f64 {
        match self {
            Node::Split(split) => split.gain,
            Node::Leaf(leaf) => leaf.gain,
        }
    }

    /// Number of training samples that reached the node.
    pub fn n_obs(&self) -> usize {
        match self {
            Node::Split(split) => split.n_obs,
            Node::Leaf(leaf) => leaf.n_obs,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Split(split) => &split.children,
            Node::Leaf(_) => &[],
        }
    }

    /// Dimension and split of a split node.
    pub fn split(&self) -> Option<(usize, &SplitInfo)> {
        match self {
            Node::Split(split) => Some((split.split_feature_id, &split.split_info)),
            Node::Leaf(_) => None,
        }
    }

    /// Number of levels, 1 for a leaf.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Node::depth).max().unwrap_or(0)
    }

    /// The leaves, from the first child to the last one.
    ///
    /// Right after the training, the leaves own consecutive ranges of the reordered
    /// samples in this order.
    pub fn leaves(&self) -> Vec<&LeafNode> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a LeafNode>) {
        match self {
            Node::Split(split) => {
                for child in &split.children {
                    child.collect_leaves(leaves);
                }
            }
            Node::Leaf(leaf) => leaves.push(leaf),
        }
    }
}
