use std::fs::File;
use std::io::BufReader;

use macroquad::prelude::*;
use octree_intersect::io::read_shapes;
use octree_intersect::{Intersector, Shape, GEOMETRY_EPSILON};
use octree_viz::{random_scene, to_vec3, OctantNavigator, OrbitCamera};

const SCENE_SEED: u64 = 7;
const SCENE_SIZE: usize = 400;

/// Loads the shape file named on the command line, or generates a scene.
fn load_scene() -> Result<Vec<Shape>, String> {
    match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).map_err(|e| format!("failed to open {path}: {e}"))?;
            read_shapes(BufReader::new(file), GEOMETRY_EPSILON).map_err(|e| format!("failed to read {path}: {e}"))
        }
        None => Ok(random_scene(SCENE_SEED, SCENE_SIZE, 10.0, 1.2)),
    }
}

#[macroquad::main("Octree Intersections")]
async fn main() {
    let shapes = match load_scene() {
        Ok(shapes) => shapes,
        Err(message) => {
            eprintln!("{message}");
            return;
        }
    };
    let shape_count = shapes.len();
    println!("Loaded {shape_count} shapes");

    let mut intersector = match Intersector::new(shapes) {
        Ok(intersector) => intersector,
        Err(e) => {
            eprintln!("failed to build octree: {e}");
            return;
        }
    };
    let pair_count = intersector.intersect_all().len();
    let hits = intersector.intersecting_indices();
    let octree = intersector.octree();
    println!(
        "Octree built: height {}, {} nodes; {} intersecting pairs",
        octree.height(),
        octree.len(),
        pair_count
    );

    let root = octree.root();
    let mut camera = OrbitCamera::new(3.0 * root.halfwidth() as f32, 0.6, 0.4)
        .with_zoom(0.1 * root.halfwidth() as f32, 0.1, 10.0 * root.halfwidth() as f32)
        .with_target(to_vec3(&root.center()));
    let mut navigator = OctantNavigator::new();

    loop {
        camera.update();
        navigator.update(octree);

        clear_background(Color::from_rgba(20, 20, 30, 255));
        set_camera(&camera.to_camera3d());

        navigator.render(octree, &hits);

        set_default_camera();

        draw_text(
            &format!("Octree Intersections - {shape_count} shapes"),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!(
                "Height: {} | Pairs: {} | Shapes hit: {}",
                octree.height(),
                pair_count,
                hits.len()
            ),
            10.0,
            45.0,
            18.0,
            GRAY,
        );

        navigator.draw_ui(octree, 70.0);

        draw_text("Drag mouse to rotate, scroll to zoom", 10.0, 175.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 195.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
