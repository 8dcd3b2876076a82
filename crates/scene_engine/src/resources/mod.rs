//! Resources module - keyed, exclusively-owned engine resources
//!
//! Following Game Engine Architecture Chapter 7.2 - The Resource Manager.
//! Resources (meshes, textures, ...) are loaded once by a loader external to
//! this core, handed to a [`ResourceGroup`], and shared by reference from
//! then on. The group owns its assets exclusively: insertion transfers
//! ownership, lookup never does.

mod group;
mod mesh;

pub use group::{Resource, ResourceError, ResourceGroup};
pub use mesh::{GraphicsDevice, Mesh, MeshResourceGroup};
