//! Cube demo application
//!
//! This demonstrates the engine's object model end to end: scene assembly,
//! two-phase component bring-up, a fixed-timestep frame loop, deferred
//! destruction, and the cached cube mesh from the mesh resource group.

use std::any::Any;

use scene_engine::prelude::*;

/// Spins its owner at a fixed rate and reports progress
struct Spinner {
    speed: f32,
    angle: f32,
}

impl Component for Spinner {
    fn tag(&self) -> ComponentTag {
        ComponentTag::Script
    }

    fn on_init(&mut self, owner: &mut GameObject) {
        log::info!("spinner ready on '{}'", owner.name());
    }

    fn on_update(&mut self, _owner: &mut GameObject, delta_time: f32) {
        self.angle = (self.angle + self.speed * delta_time) % std::f32::consts::TAU;
    }

    fn on_destroy(&mut self) {
        log::info!("spinner stopped at {:.3} rad", self.angle);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Expires its owner after a fixed lifetime
struct Lifetime {
    remaining: f32,
}

impl Component for Lifetime {
    fn tag(&self) -> ComponentTag {
        ComponentTag::Custom(0)
    }

    fn on_update(&mut self, owner: &mut GameObject, delta_time: f32) {
        self.remaining -= delta_time;
        if self.remaining <= 0.0 {
            log::info!("'{}' expired, marking for destroy", owner.name());
            owner.mark_for_destroy();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Headless stand-in for the rendering backend
struct NullDevice;

impl GraphicsDevice for NullDevice {
    fn create_unit_cube(&mut self) -> Mesh {
        let positions = vec![
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
        ];
        let normals = positions.iter().map(|p| p.normalize()).collect();
        let indices = vec![
            0, 1, 2, 2, 3, 0, // back
            4, 6, 5, 6, 4, 7, // front
            0, 3, 7, 7, 4, 0, // left
            1, 5, 6, 6, 2, 1, // right
            3, 2, 6, 6, 7, 3, // top
            0, 4, 5, 5, 1, 0, // bottom
        ];
        Mesh::new(positions, normals, indices)
    }

    fn draw(&mut self, mesh: &Mesh) {
        log::debug!("draw call: {} triangles", mesh.triangle_count());
    }
}

fn main() {
    let config = EngineConfig::from_file("cube_app.toml").unwrap_or_default();
    env_logger::Builder::new()
        .parse_filters(&config.log_filter)
        .init();
    log::info!("starting '{}'", config.app_name);

    let mut ids = IdAllocator::new();
    let mut scenes = SceneManager::new();
    let scene_handle = scenes.create_scene("level", &mut ids);

    // Mesh resources: the cube is built once and shared from then on.
    let mut meshes = MeshResourceGroup::new();
    meshes.init(Box::new(NullDevice));
    let triangles = meshes.get_cube().map_or(0, Mesh::triangle_count);
    log::info!("cached cube mesh with {} triangles", triangles);

    // Scene assembly: a spinning cube with a short-lived spark child.
    let mut cube = GameObject::named("cube", &mut ids);
    cube.add_component(Box::new(Spinner {
        speed: 1.0,
        angle: 0.0,
    }))
    .expect("fresh object has no spinner yet");

    let spark = cube.spawn_child("spark", &mut ids).expect("name is free");
    spark
        .add_component(Box::new(Lifetime { remaining: 0.05 }))
        .expect("fresh object has no lifetime yet");

    let scene = scenes.scene_mut(scene_handle).expect("scene just created");
    scene.attach(cube).expect("name is free");
    scene.init();

    for frame in 0..10 {
        scene.update(config.fixed_timestep);
        if frame == 0 {
            let spark_alive = scene.find_by_path("cube/spark").is_some();
            log::info!("frame {}: spark alive = {}", frame, spark_alive);
        }
    }

    let spinner = scene
        .find_by_path("cube")
        .and_then(|cube| cube.component::<Spinner>(ComponentTag::Script))
        .expect("cube keeps its spinner");
    log::info!("cube rotated to {:.3} rad over 10 frames", spinner.angle);

    scenes.remove_scene(scene_handle);
    log::info!("shut down cleanly");
}
