//! Mesh resource and the cached-primitive mesh group

use crate::foundation::math::Vec3;
use crate::resources::group::{Resource, ResourceGroup};

/// CPU-side triangle mesh owned by a resource group
///
/// Indexed geometry: `indices` refer into `positions`/`normals` in triples.
pub struct Mesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from indexed geometry
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Vertex positions
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex normals
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Triangle indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Resource for Mesh {
    fn destroy(&mut self) {
        log::debug!(
            "destroying mesh ({} vertices, {} triangles)",
            self.vertex_count(),
            self.triangle_count()
        );
        self.positions.clear();
        self.normals.clear();
        self.indices.clear();
    }
}

/// Boundary to the graphics backend
///
/// The rendering call chain is out of scope for this core; this trait covers
/// the two points where it touches the object model: primitive mesh
/// construction and the single draw entry point a component may invoke.
pub trait GraphicsDevice {
    /// Build a unit cube mesh
    fn create_unit_cube(&mut self) -> Mesh;

    /// Submit a mesh for drawing this frame
    fn draw(&mut self, mesh: &Mesh);
}

/// Reserved key for the cached unit cube
const CUBE_KEY: &str = "engine/cube";

/// Mesh resource group with cached engine primitives
///
/// Wraps a [`ResourceGroup<Mesh>`] and adds the cache-once cube accessor:
/// the first [`get_cube`](MeshResourceGroup::get_cube) builds the unit cube
/// through the graphics device and stores it under a reserved key; every
/// later call returns that same stored instance.
pub struct MeshResourceGroup {
    meshes: ResourceGroup<Mesh>,
    device: Option<Box<dyn GraphicsDevice>>,
}

impl MeshResourceGroup {
    /// Create a group with no graphics device bound yet
    pub fn new() -> Self {
        Self {
            meshes: ResourceGroup::new(),
            device: None,
        }
    }

    /// Bind the graphics device used to build primitive meshes
    pub fn init(&mut self, device: Box<dyn GraphicsDevice>) {
        self.device = Some(device);
    }

    /// Get the unit cube mesh, building and caching it on first use
    ///
    /// Returns `None` (with a logged error) if no graphics device has been
    /// bound through [`init`](MeshResourceGroup::init).
    pub fn get_cube(&mut self) -> Option<&Mesh> {
        if !self.meshes.has(CUBE_KEY) {
            let Some(device) = self.device.as_mut() else {
                log::error!("mesh resource group: no graphics device bound; call init first");
                return None;
            };
            let cube = device.create_unit_cube();
            self.meshes.add(CUBE_KEY, cube).ok()?;
        }
        self.meshes.get(CUBE_KEY)
    }

    /// The underlying keyed mesh storage
    pub fn group(&self) -> &ResourceGroup<Mesh> {
        &self.meshes
    }

    /// Mutable access to the underlying keyed mesh storage
    pub fn group_mut(&mut self) -> &mut ResourceGroup<Mesh> {
        &mut self.meshes
    }
}

impl Default for MeshResourceGroup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingDevice {
        builds: Rc<Cell<u32>>,
    }

    impl GraphicsDevice for CountingDevice {
        fn create_unit_cube(&mut self) -> Mesh {
            self.builds.set(self.builds.get() + 1);
            Mesh::new(
                vec![Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
                vec![Vec3::new(0.0, 0.0, 1.0); 3],
                vec![0, 1, 2],
            )
        }

        fn draw(&mut self, _mesh: &Mesh) {}
    }

    #[test]
    fn test_get_cube_builds_once_and_caches() {
        let builds = Rc::new(Cell::new(0));
        let mut group = MeshResourceGroup::new();
        group.init(Box::new(CountingDevice {
            builds: Rc::clone(&builds),
        }));

        let first = group.get_cube().unwrap() as *const Mesh;
        let second = group.get_cube().unwrap() as *const Mesh;

        assert_eq!(builds.get(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_get_cube_without_device_is_none() {
        let mut group = MeshResourceGroup::new();
        assert!(group.get_cube().is_none());
        assert!(group.group().is_empty());
    }

    #[test]
    fn test_mesh_destroy_releases_geometry() {
        let mut mesh = Mesh::new(
            vec![Vec3::zeros()],
            vec![Vec3::zeros()],
            vec![0, 0, 0],
        );
        assert_eq!(mesh.triangle_count(), 1);
        mesh.destroy();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }
}
