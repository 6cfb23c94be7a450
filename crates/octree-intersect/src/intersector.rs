//! Enumeration of intersecting shape pairs over an octree.

use std::collections::BTreeSet;
use std::io;

use log::debug;

use crate::octree::{NodeId, Octree, OctreeNode, OctreeVisitor};
use crate::{
    ExactPredicate, IntersectionPredicate, IntersectorConfig, OctreeError, Shape,
};

/// Finds every pair of intersecting shapes stored in an [`Octree`].
///
/// A shape stored at node `N` can only meet shapes stored at `N`, at an
/// ancestor of `N`, or at a descendant of `N`: sibling subtrees are separated
/// by a splitting plane that neither shape touches. A single depth-first walk
/// therefore tests each node's shapes against each other and against the
/// shapes of every node on the path from the root, and nothing else. Every
/// unordered pair is tested exactly once.
///
/// # Example
///
/// ```ignore
/// use octree_intersect::Intersector;
///
/// let mut intersector = Intersector::new(shapes)?;
/// for (a, b) in intersector.intersect_all() {
///     println!("{a} {b}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Intersector<P = ExactPredicate> {
    octree: Octree,
    predicate: P,
    ancestor_stack: Vec<NodeId>,
    pairs: Vec<(usize, usize)>,
    candidates: usize,
}

impl Intersector<ExactPredicate> {
    /// Builds the octree over `shapes` and wraps it with the exact predicate.
    pub fn new(shapes: Vec<Shape>) -> Result<Self, OctreeError> {
        Self::with_config(shapes, &IntersectorConfig::default())
    }

    /// Builds the octree and predicate from a configuration.
    pub fn with_config(shapes: Vec<Shape>, config: &IntersectorConfig) -> Result<Self, OctreeError> {
        let octree = Octree::build_with_config(shapes, &config.octree())?;
        Ok(Self::with_predicate(octree, ExactPredicate::new(config.epsilon)))
    }
}

impl<P: IntersectionPredicate> Intersector<P> {
    /// Wraps an existing octree with a custom predicate.
    ///
    /// The octree margin is raised to the predicate's
    /// [`tolerance`](IntersectionPredicate::tolerance) if it is smaller, so
    /// that shapes within tolerance of each other never sit in sibling
    /// subtrees.
    pub fn with_predicate(mut octree: Octree, predicate: P) -> Self {
        octree.ensure_margin(predicate.tolerance());
        let ancestor_stack = Vec::with_capacity(octree.height());
        let pairs = Vec::with_capacity(octree.shape_count());
        Self {
            octree,
            predicate,
            ancestor_stack,
            pairs,
            candidates: 0,
        }
    }

    /// Returns the underlying octree.
    #[inline]
    pub fn octree(&self) -> &Octree {
        &self.octree
    }

    /// Returns the predicate used to confirm candidates.
    #[inline]
    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    /// Adds a shape to the octree. It is taken into account by the next
    /// [`intersect_all`](Self::intersect_all).
    pub fn insert(&mut self, shape: Shape) {
        self.octree.insert(shape);
    }

    /// Runs one traversal and returns the intersecting index pairs.
    ///
    /// Results of a previous call are discarded first, so calling this twice
    /// on an unchanged tree yields the same pairs.
    pub fn intersect_all(&mut self) -> &[(usize, usize)] {
        self.pairs.clear();
        self.ancestor_stack.clear();

        self.candidates = collect_pairs(
            &self.octree,
            &self.predicate,
            &mut self.ancestor_stack,
            &mut self.pairs,
        );

        debug!(
            "intersection pass: {} candidate pairs tested, {} intersecting",
            self.candidates,
            self.pairs.len()
        );

        &self.pairs
    }

    /// Returns the pairs found by the last traversal, in discovery order.
    /// Each pair lists the lower index first.
    #[inline]
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Returns the number of candidate pairs the last traversal handed to
    /// the predicate.
    #[inline]
    pub fn candidate_count(&self) -> usize {
        self.candidates
    }

    /// Returns the sorted set of indices involved in at least one intersection.
    pub fn intersecting_indices(&self) -> BTreeSet<usize> {
        self.pairs.iter().flat_map(|&(a, b)| [a, b]).collect()
    }

    /// Writes the pairs of the last traversal, one `"<a> <b>"` per line.
    pub fn write_pairs<W: io::Write>(&self, writer: W) -> io::Result<()> {
        crate::io::write_pairs(&self.pairs, writer)
    }

    /// Consumes the intersector and returns the pairs of the last traversal.
    pub fn into_pairs(self) -> Vec<(usize, usize)> {
        self.pairs
    }
}

/// Runs one traversal over `octree` with the exact predicate.
pub fn enumerate_intersections(octree: &Octree) -> Vec<(usize, usize)> {
    enumerate_with(octree, &ExactPredicate::default())
}

/// Runs one traversal over `octree` with a custom predicate.
///
/// If the octree margin is below the predicate's
/// [`tolerance`](IntersectionPredicate::tolerance), the traversal runs over a
/// copy rebuilt with the wider margin; `octree` itself is left as is.
pub fn enumerate_with<P: IntersectionPredicate>(octree: &Octree, predicate: &P) -> Vec<(usize, usize)> {
    if predicate.tolerance() > octree.margin() {
        let mut widened = octree.clone();
        widened.ensure_margin(predicate.tolerance());
        return enumerate_with(&widened, predicate);
    }

    let mut ancestors = Vec::with_capacity(octree.height());
    let mut pairs = Vec::with_capacity(octree.shape_count());
    collect_pairs(octree, predicate, &mut ancestors, &mut pairs);
    pairs
}

/// Walks the tree, appending confirmed pairs; returns the candidate count.
fn collect_pairs<P: IntersectionPredicate>(
    octree: &Octree,
    predicate: &P,
    ancestors: &mut Vec<NodeId>,
    pairs: &mut Vec<(usize, usize)>,
) -> usize {
    let mut collector = PairCollector {
        octree,
        predicate,
        ancestors,
        pairs,
        candidates: 0,
    };
    octree.traverse_depth_first(&mut collector);
    debug_assert!(collector.ancestors.is_empty());
    collector.candidates
}

/// Visitor keeping the root-to-current path and testing the current node
/// against it.
struct PairCollector<'a, P> {
    octree: &'a Octree,
    predicate: &'a P,
    ancestors: &'a mut Vec<NodeId>,
    pairs: &'a mut Vec<(usize, usize)>,
    candidates: usize,
}

impl<P: IntersectionPredicate> PairCollector<'_, P> {
    fn test<'s>(&mut self, mut s1: &'s Shape, mut s2: &'s Shape) {
        // Lower index first, so every pair is evaluated and reported the same
        // way whichever node holds which shape
        if s2.index() < s1.index() {
            std::mem::swap(&mut s1, &mut s2);
        }
        self.candidates += 1;
        if self.predicate.are_intersecting(s1, s2) {
            self.pairs.push((s1.index(), s2.index()));
        }
    }
}

impl<P: IntersectionPredicate> OctreeVisitor for PairCollector<'_, P> {
    fn enter(&mut self, id: NodeId, node: &OctreeNode, _depth: usize) {
        let octree = self.octree;
        let current = node.shapes();

        // Ancestors strictly above the current node
        for i in 0..self.ancestors.len() {
            let ancestor = octree.node(self.ancestors[i]);
            for s1 in ancestor.shapes() {
                for s2 in current {
                    self.test(s1, s2);
                }
            }
        }

        // The node against itself, each unordered pair once
        for (i, s1) in current.iter().enumerate() {
            for s2 in &current[i + 1..] {
                self.test(s1, s2);
            }
        }

        self.ancestors.push(id);
    }

    fn leave(&mut self, _id: NodeId, _node: &OctreeNode, _depth: usize) {
        self.ancestors.pop();
    }
}
