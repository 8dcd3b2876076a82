//! Scene roots and the scene registry
//!
//! A [`Scene`] anchors one game-object tree; every object transitively
//! attached under it is "on scene". The [`SceneManager`] owns all scenes and
//! hands out stable weak handles, so a game object's scene back-reference can
//! never dangle - a handle to a removed scene simply resolves to `None`.

use crate::foundation::collections::{Handle, HandleMap};
use crate::scene::game_object::{GameObject, IdAllocator, SceneError};

/// Weak handle to a [`Scene`] registered in a [`SceneManager`]
pub type SceneHandle = Handle;

/// Root owner of one game-object tree
///
/// Owns a root [`GameObject`] carrying the scene's name; objects attached
/// under it (at any depth) report [`GameObject::on_scene`] as true.
pub struct Scene {
    handle: SceneHandle,
    name: String,
    root: GameObject,
}

impl Scene {
    fn new(handle: SceneHandle, name: String, ids: &mut IdAllocator) -> Self {
        let mut root = GameObject::named(name.clone(), ids);
        root.propagate_scene(Some(handle));
        Self { handle, name, root }
    }

    /// Handle this scene is registered under
    pub fn handle(&self) -> SceneHandle {
        self.handle
    }

    /// Name of this scene
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The root game object anchoring the tree
    pub fn root(&self) -> &GameObject {
        &self.root
    }

    /// Mutable access to the root game object
    pub fn root_mut(&mut self) -> &mut GameObject {
        &mut self.root
    }

    /// Attach a top-level game object, marking its whole subtree on-scene
    pub fn attach(&mut self, object: GameObject) -> Result<&mut GameObject, SceneError> {
        self.root.attach_child(object)
    }

    /// Detach a top-level game object, marking its whole subtree off-scene
    pub fn detach(&mut self, name: &str) -> Option<GameObject> {
        self.root.detach_child(name)
    }

    /// Resolve a `/`-delimited path relative to the scene root
    pub fn find_by_path(&self, path: &str) -> Option<&GameObject> {
        self.root.find_by_path(path)
    }

    /// Run the two-phase component bring-up over the whole tree, top-down
    pub fn init(&mut self) {
        Self::init_tree(&mut self.root);
    }

    /// Advance the scene one frame
    ///
    /// Drains objects marked for deferred destruction first, then walks the
    /// tree top-down calling [`GameObject::update`] on every node. Objects
    /// marked during this frame's update are destroyed at the start of the
    /// next call.
    pub fn update(&mut self, delta_time: f32) {
        Self::drain_marked(&mut self.root);
        Self::update_tree(&mut self.root, delta_time);
    }

    /// Tear down the whole tree
    pub fn destroy(&mut self) {
        self.root.destroy();
    }

    fn init_tree(object: &mut GameObject) {
        object.init();
        for child in object.children_mut() {
            Self::init_tree(child);
        }
    }

    fn update_tree(object: &mut GameObject, delta_time: f32) {
        object.update(delta_time);
        for child in object.children_mut() {
            Self::update_tree(child, delta_time);
        }
    }

    fn drain_marked(object: &mut GameObject) {
        let marked: Vec<String> = object
            .children()
            .filter(|child| child.is_marked_for_destroy())
            .map(|child| child.name().to_string())
            .collect();

        for name in marked {
            if let Some(mut child) = object.detach_child(&name) {
                child.destroy();
            }
        }

        for child in object.children_mut() {
            Self::drain_marked(child);
        }
    }
}

/// Registry owning every live [`Scene`]
///
/// Scenes are stored in a slot map so handles stay stable across removals and
/// a stale handle resolves to `None` instead of another scene.
pub struct SceneManager {
    scenes: HandleMap<Scene>,
}

impl SceneManager {
    /// Create an empty scene registry
    pub fn new() -> Self {
        Self {
            scenes: HandleMap::with_key(),
        }
    }

    /// Create and register a new scene, returning its handle
    pub fn create_scene(&mut self, name: impl Into<String>, ids: &mut IdAllocator) -> SceneHandle {
        let name = name.into();
        log::debug!("creating scene '{}'", name);
        self.scenes
            .insert_with_key(|handle| Scene::new(handle, name, ids))
    }

    /// Resolve a scene handle
    pub fn scene(&self, handle: SceneHandle) -> Option<&Scene> {
        self.scenes.get(handle)
    }

    /// Mutably resolve a scene handle
    pub fn scene_mut(&mut self, handle: SceneHandle) -> Option<&mut Scene> {
        self.scenes.get_mut(handle)
    }

    /// Tear down and unregister a scene
    ///
    /// Returns false if the handle was already stale.
    pub fn remove_scene(&mut self, handle: SceneHandle) -> bool {
        match self.scenes.remove(handle) {
            Some(mut scene) => {
                log::debug!("destroying scene '{}'", scene.name());
                scene.destroy();
                true
            }
            None => false,
        }
    }

    /// Number of live scenes
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scene is registered
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::component::{Component, ComponentTag};
    use std::any::Any;
    use std::cell::Cell;
    use std::rc::Rc;

    struct TickCounter {
        ticks: Rc<Cell<u32>>,
    }

    impl Component for TickCounter {
        fn tag(&self) -> ComponentTag {
            ComponentTag::Script
        }

        fn on_update(&mut self, _owner: &mut GameObject, _delta_time: f32) {
            self.ticks.set(self.ticks.get() + 1);
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn three_level_subtree(ids: &mut IdAllocator) -> GameObject {
        let mut root = GameObject::named("sub_root", ids);
        root.spawn_child("child", ids)
            .unwrap()
            .spawn_child("grandchild", ids)
            .unwrap();
        root
    }

    #[test]
    fn test_attach_propagates_scene_to_whole_subtree() {
        let mut ids = IdAllocator::new();
        let mut scenes = SceneManager::new();
        let handle = scenes.create_scene("level", &mut ids);

        let subtree = three_level_subtree(&mut ids);
        assert!(!subtree.on_scene());

        let scene = scenes.scene_mut(handle).unwrap();
        scene.attach(subtree).unwrap();

        let attached = scene.find_by_path("sub_root").unwrap();
        assert!(attached.on_scene());
        assert_eq!(attached.scene(), Some(handle));
        assert!(scene.find_by_path("sub_root/child").unwrap().on_scene());
        assert!(scene
            .find_by_path("sub_root/child/grandchild")
            .unwrap()
            .on_scene());
    }

    #[test]
    fn test_detach_marks_whole_subtree_off_scene() {
        let mut ids = IdAllocator::new();
        let mut scenes = SceneManager::new();
        let handle = scenes.create_scene("level", &mut ids);

        let scene = scenes.scene_mut(handle).unwrap();
        scene.attach(three_level_subtree(&mut ids)).unwrap();

        let detached = scene.detach("sub_root").unwrap();
        assert!(!detached.on_scene());
        let grandchild = detached.find_by_path("child/grandchild").unwrap();
        assert!(!grandchild.on_scene());
    }

    #[test]
    fn test_update_walks_every_node_once() {
        let mut ids = IdAllocator::new();
        let mut scenes = SceneManager::new();
        let handle = scenes.create_scene("level", &mut ids);
        let ticks = Rc::new(Cell::new(0));

        let scene = scenes.scene_mut(handle).unwrap();
        let mut parent = GameObject::named("parent", &mut ids);
        parent
            .add_component(Box::new(TickCounter {
                ticks: Rc::clone(&ticks),
            }))
            .unwrap();
        let child = parent.spawn_child("child", &mut ids).unwrap();
        child
            .add_component(Box::new(TickCounter {
                ticks: Rc::clone(&ticks),
            }))
            .unwrap();
        scene.attach(parent).unwrap();

        scene.init();
        scene.update(0.016);
        assert_eq!(ticks.get(), 2);

        scene.update(0.016);
        assert_eq!(ticks.get(), 4);
    }

    #[test]
    fn test_marked_objects_drain_before_next_update() {
        let mut ids = IdAllocator::new();
        let mut scenes = SceneManager::new();
        let handle = scenes.create_scene("level", &mut ids);
        let ticks = Rc::new(Cell::new(0));

        let scene = scenes.scene_mut(handle).unwrap();
        let mut doomed = GameObject::named("doomed", &mut ids);
        doomed
            .add_component(Box::new(TickCounter {
                ticks: Rc::clone(&ticks),
            }))
            .unwrap();
        scene.attach(doomed).unwrap();
        scene.init();

        scene.update(0.016);
        assert_eq!(ticks.get(), 1);

        scene
            .root_mut()
            .child_mut("doomed")
            .unwrap()
            .mark_for_destroy();

        // Drained at the start of the frame, before any component ticks.
        scene.update(0.016);
        assert_eq!(ticks.get(), 1);
        assert!(scene.find_by_path("doomed").is_none());
    }

    #[test]
    fn test_remove_scene_is_stale_safe() {
        let mut ids = IdAllocator::new();
        let mut scenes = SceneManager::new();
        let handle = scenes.create_scene("level", &mut ids);

        assert!(scenes.remove_scene(handle));
        assert!(!scenes.remove_scene(handle));
        assert!(scenes.scene(handle).is_none());
        assert!(scenes.is_empty());
    }
}
