//! Octree navigation utilities for interactive visualization.

use std::collections::BTreeSet;

use macroquad::prelude::*;
use octree_intersect::octree::{FnVisitor, NodeId, Octree, OctreeNode};

use crate::{draw_shape, to_vec3};

const OCTANT_KEYS: [KeyCode; 8] = [
    KeyCode::Key0,
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
];

/// Interactive navigator walking down the octree one octant at a time.
#[derive(Debug, Default)]
pub struct OctantNavigator {
    path: Vec<usize>,
}

impl OctantNavigator {
    /// Creates a new navigator starting at the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the octants taken from the root.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Returns the current depth, 0 at the root.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Attempts to descend into `octant`. Returns true if the child exists.
    pub fn descend(&mut self, octree: &Octree, octant: usize) -> bool {
        let node = octree.node(self.current_id(octree));
        if octant < 8 && node.child(octant).is_some() {
            self.path.push(octant);
            return true;
        }
        false
    }

    /// Navigates to the parent node. Returns true if not already at root.
    pub fn go_parent(&mut self) -> bool {
        self.path.pop().is_some()
    }

    /// Returns to the root node.
    pub fn go_root(&mut self) {
        self.path.clear();
    }

    /// Handles keyboard input for navigation.
    /// Returns true if navigation state changed.
    pub fn update(&mut self, octree: &Octree) -> bool {
        let mut changed = false;

        for (octant, key) in OCTANT_KEYS.iter().enumerate() {
            if is_key_pressed(*key) {
                changed |= self.descend(octree, octant);
            }
        }
        if is_key_pressed(KeyCode::P) {
            changed |= self.go_parent();
        }
        if is_key_pressed(KeyCode::R) && !self.path.is_empty() {
            self.go_root();
            changed = true;
        }

        changed
    }

    /// Returns the id of the current node.
    ///
    /// Octants that no longer lead anywhere are ignored, so the result is
    /// always a node of `octree`.
    pub fn current_id(&self, octree: &Octree) -> NodeId {
        let mut current = NodeId::ROOT;
        for &octant in &self.path {
            match octree.node(current).child(octant) {
                Some(child) => current = child,
                None => break,
            }
        }
        current
    }

    /// Returns the current node.
    pub fn current_node<'a>(&self, octree: &'a Octree) -> &'a OctreeNode {
        octree.node(self.current_id(octree))
    }

    /// Draws the current node's cube, its children's cubes and every shape
    /// stored in its subtree.
    pub fn render(&self, octree: &Octree, hits: &BTreeSet<usize>) {
        let id = self.current_id(octree);
        let node = octree.node(id);

        draw_node_cube(node, YELLOW);
        for (_, child) in node.children() {
            draw_node_cube(octree.node(child), Color::new(0.4, 0.4, 0.5, 0.6));
        }

        let mut visitor = FnVisitor::new(|_, node: &OctreeNode, _| {
            for shape in node.shapes() {
                draw_shape(shape, hits.contains(&shape.index()));
            }
        });
        octree.traverse_subtree(id, &mut visitor);
    }

    /// Draws the navigation UI overlay.
    pub fn draw_ui(&self, octree: &Octree, y_offset: f32) {
        let id = self.current_id(octree);
        let node = octree.node(id);

        let mut subtree_shapes = 0;
        let mut visitor = FnVisitor::new(|_, node: &OctreeNode, _| subtree_shapes += node.shapes().len());
        octree.traverse_subtree(id, &mut visitor);

        let path_str = if self.path.is_empty() {
            "root".to_string()
        } else {
            self.path
                .iter()
                .map(|octant| octant.to_string())
                .collect::<Vec<_>>()
                .join(" -> ")
        };

        draw_text(
            &format!(
                "Node: {} shapes stored, {} in subtree",
                node.shapes().len(),
                subtree_shapes
            ),
            10.0,
            y_offset,
            18.0,
            WHITE,
        );
        draw_text(
            &format!("Path: {} (depth {})", path_str, self.depth()),
            10.0,
            y_offset + 20.0,
            18.0,
            YELLOW,
        );
        draw_text(
            &format!(
                "Cube: center ({:.2}, {:.2}, {:.2}), halfwidth {:.3}",
                node.center().x,
                node.center().y,
                node.center().z,
                node.halfwidth()
            ),
            10.0,
            y_offset + 40.0,
            18.0,
            GRAY,
        );
        draw_text(
            if node.is_leaf() {
                "(leaf)"
            } else {
                "[0-7] descend into octant"
            },
            10.0,
            y_offset + 60.0,
            18.0,
            if node.is_leaf() { ORANGE } else { GREEN },
        );
        draw_text("[P]arent | [R]oot", 10.0, y_offset + 80.0, 16.0, DARKGRAY);
    }
}

fn draw_node_cube(node: &OctreeNode, color: Color) {
    let size = 2.0 * node.halfwidth() as f32;
    draw_cube_wires(to_vec3(&node.center()), vec3(size, size, size), color);
}
