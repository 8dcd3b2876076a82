//! Game object - the named, component-carrying node of the scene tree

use std::collections::BTreeMap;

use thiserror::Error;

use crate::foundation::paths;
use crate::scene::component::{Component, ComponentTag};
use crate::scene::scene::SceneHandle;

/// Scene tree errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// A component with the same tag is already attached
    #[error("game object '{object}' already has a {tag:?} component")]
    DuplicateComponent {
        /// Name of the rejecting game object
        object: String,
        /// Tag of the rejected component
        tag: ComponentTag,
    },

    /// A sibling with the same name already exists under the parent
    #[error("game object '{parent}' already has a child named '{name}'")]
    DuplicateChild {
        /// Name of the parent game object
        parent: String,
        /// Conflicting child name
        name: String,
    },
}

/// Process-unique game object identity
///
/// Assigned at construction, immutable afterwards. Two game objects are equal
/// iff their ids are equal; names and tree position never enter equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameObjectId(u64);

impl GameObjectId {
    /// Get the raw id value
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Injected identity source for game object construction
///
/// A plain counter: deterministic under test, no process-wide state. Every
/// constructor takes one explicitly, so ownership of identity generation
/// stays with the caller (typically the application or a test).
#[derive(Debug)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create an allocator starting at id 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next fresh id
    pub fn allocate(&mut self) -> GameObjectId {
        let id = GameObjectId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A named node in the scene tree
///
/// Exclusively owns at most one component per [`ComponentTag`] and a set of
/// child game objects keyed by name (names are unique among siblings, not
/// globally). Carries a weak reference to the [`Scene`](crate::scene::Scene)
/// it is transitively attached under, kept in sync by attach/detach.
pub struct GameObject {
    id: GameObjectId,
    name: String,
    components: BTreeMap<ComponentTag, Box<dyn Component>>,
    children: BTreeMap<String, GameObject>,
    scene: Option<SceneHandle>,
    initialized: bool,
    pending_destroy: bool,
    // Tag of the component currently running a hook, if any. Guards the
    // reattach after the hook returns: a hook may destroy or replace its own
    // slot, and the detached instance must not resurrect or clobber it.
    detached_tag: Option<ComponentTag>,
    detached_discard: bool,
}

impl std::fmt::Debug for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .field("scene", &self.scene)
            .field("initialized", &self.initialized)
            .field("pending_destroy", &self.pending_destroy)
            .finish()
    }
}

impl PartialEq for GameObject {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GameObject {}

impl GameObject {
    /// Create a detached, auto-named root object
    pub fn new(ids: &mut IdAllocator) -> Self {
        let id = ids.allocate();
        Self::with_id(id, format!("game_object_{}", id.value()))
    }

    /// Create a detached, named root object
    pub fn named(name: impl Into<String>, ids: &mut IdAllocator) -> Self {
        Self::with_id(ids.allocate(), name.into())
    }

    fn with_id(id: GameObjectId, name: String) -> Self {
        Self {
            id,
            name,
            components: BTreeMap::new(),
            children: BTreeMap::new(),
            scene: None,
            initialized: false,
            pending_destroy: false,
            detached_tag: None,
            detached_discard: false,
        }
    }

    /// Construct a named child attached to this object
    ///
    /// Fails if a sibling with the same name exists.
    pub fn spawn_child(
        &mut self,
        name: impl Into<String>,
        ids: &mut IdAllocator,
    ) -> Result<&mut GameObject, SceneError> {
        let child = Self::named(name, ids);
        self.attach_child(child)
    }

    /// Unique identity of this object
    pub fn id(&self) -> GameObjectId {
        self.id
    }

    /// Name of this object, unique among its siblings
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the two-phase bring-up has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ---- components ------------------------------------------------------

    /// Attach a component, transferring ownership to this object
    ///
    /// Fails if a component with the same tag is already attached; the
    /// rejected component is dropped and this object is left unchanged. If
    /// this object is already initialized, the new component is immediately
    /// run through `on_create` then `on_init` so it is never left behind its
    /// already-initialized siblings.
    ///
    /// A component may call this from inside one of its own hooks with its
    /// own tag to swap in a replacement; the running instance is torn down
    /// when the hook returns.
    pub fn add_component(&mut self, component: Box<dyn Component>) -> Result<(), SceneError> {
        let tag = component.tag();
        if self.components.contains_key(&tag) {
            return Err(SceneError::DuplicateComponent {
                object: self.name.clone(),
                tag,
            });
        }

        self.components.insert(tag, component);
        if self.initialized {
            // Catch-up bring-up for late arrivals; siblings are not re-run.
            self.run_detached(tag, |c, owner| c.on_create(owner));
            self.run_detached(tag, |c, owner| c.on_init(owner));
        }

        Ok(())
    }

    /// Detach the component under `tag`, run a hook with the owner freely
    /// borrowable, then reattach
    ///
    /// The hook may mutate the component map, including its own slot: if it
    /// destroyed its own tag or attached a replacement under it, the detached
    /// instance is torn down instead of reinserted, so a successfully added
    /// replacement is never clobbered and teardown stays exactly-once.
    fn run_detached<F>(&mut self, tag: ComponentTag, hook: F)
    where
        F: FnOnce(&mut dyn Component, &mut Self),
    {
        let Some(mut component) = self.components.remove(&tag) else {
            return;
        };

        // Save/restore so a catch-up dispatch inside the hook nests cleanly.
        let outer_tag = self.detached_tag.replace(tag);
        let outer_discard = std::mem::replace(&mut self.detached_discard, false);

        hook(component.as_mut(), self);

        let discard = self.detached_discard;
        self.detached_tag = outer_tag;
        self.detached_discard = outer_discard;

        if discard || self.components.contains_key(&tag) {
            component.on_destroy();
        } else {
            self.components.insert(tag, component);
        }
    }

    /// Whether a component with the given tag is attached
    pub fn has_component(&self, tag: ComponentTag) -> bool {
        self.components.contains_key(&tag)
    }

    /// Tear down and release the component with the given tag
    ///
    /// Destroying an absent tag is a no-op, not an error. A component may
    /// destroy its own tag from inside one of its hooks; the teardown then
    /// runs as soon as the hook returns.
    pub fn destroy_component(&mut self, tag: ComponentTag) {
        if self.detached_tag == Some(tag) {
            self.detached_discard = true;
            return;
        }
        if let Some(mut component) = self.components.remove(&tag) {
            component.on_destroy();
        }
    }

    /// Typed access to an attached component
    pub fn component<T: Component>(&self, tag: ComponentTag) -> Option<&T> {
        self.components.get(&tag).and_then(|c| c.as_any().downcast_ref())
    }

    /// Typed mutable access to an attached component
    pub fn component_mut<T: Component>(&mut self, tag: ComponentTag) -> Option<&mut T> {
        self.components
            .get_mut(&tag)
            .and_then(|c| c.as_any_mut().downcast_mut())
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    // ---- lifecycle -------------------------------------------------------

    /// Idempotent two-phase component bring-up
    ///
    /// Phase 1 runs `on_create` on every attached component in tag order;
    /// phase 2 runs `on_init` in the same order only after phase 1 finished
    /// for all of them. A second call is a no-op.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }

        let tags: Vec<ComponentTag> = self.components.keys().copied().collect();
        for tag in &tags {
            self.run_detached(*tag, |c, owner| c.on_create(owner));
        }
        for tag in &tags {
            self.run_detached(*tag, |c, owner| c.on_init(owner));
        }

        self.initialized = true;
    }

    /// Tick every attached component once, in tag order
    ///
    /// Does not recurse into children; the caller walks the tree and decides
    /// which nodes advance this frame ([`Scene::update`](crate::scene::Scene)
    /// walks the whole tree).
    pub fn update(&mut self, delta_time: f32) {
        let tags: Vec<ComponentTag> = self.components.keys().copied().collect();
        for tag in &tags {
            self.run_detached(*tag, |c, owner| c.on_update(owner, delta_time));
        }
    }

    /// Tear down this object's components, then every child subtree
    ///
    /// Components run `on_destroy` and are released before any child is
    /// descended into, so a parent's components never observe a child
    /// mid-teardown. After the call both maps are empty; a second call is a
    /// no-op.
    pub fn destroy(&mut self) {
        while let Some((_, mut component)) = self.components.pop_first() {
            component.on_destroy();
        }

        for (_, mut child) in std::mem::take(&mut self.children) {
            child.destroy();
        }
    }

    /// Mark this object for deferred destruction
    ///
    /// [`Scene::update`](crate::scene::Scene) drains marked objects at the
    /// start of each frame, before any component ticks.
    pub fn mark_for_destroy(&mut self) {
        self.pending_destroy = true;
    }

    /// Whether this object is queued for deferred destruction
    pub fn is_marked_for_destroy(&self) -> bool {
        self.pending_destroy
    }

    // ---- tree ------------------------------------------------------------

    /// Attach a child, transferring ownership of its whole subtree
    ///
    /// The child's subtree copies this object's scene membership before the
    /// call returns, so no caller can observe a partially-updated tree. Fails
    /// if a sibling with the same name exists; the incoming subtree is
    /// dropped in that case.
    pub fn attach_child(&mut self, mut child: GameObject) -> Result<&mut GameObject, SceneError> {
        if self.children.contains_key(&child.name) {
            return Err(SceneError::DuplicateChild {
                parent: self.name.clone(),
                name: child.name,
            });
        }

        child.propagate_scene(self.scene);
        let name = child.name.clone();
        Ok(self.children.entry(name).or_insert(child))
    }

    /// Detach a child by name, taking ownership of its subtree
    ///
    /// The detached subtree is fully marked off-scene before it is returned.
    pub fn detach_child(&mut self, name: &str) -> Option<GameObject> {
        let mut child = self.children.remove(name)?;
        child.propagate_scene(None);
        Some(child)
    }

    /// Look up a direct child by name
    pub fn child(&self, name: &str) -> Option<&GameObject> {
        self.children.get(name)
    }

    /// Mutable lookup of a direct child by name
    pub fn child_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.children.get_mut(name)
    }

    /// Iterate over direct children in name order
    pub fn children(&self) -> impl Iterator<Item = &GameObject> {
        self.children.values()
    }

    /// Iterate mutably over direct children in name order
    pub fn children_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.children.values_mut()
    }

    /// Resolve a `/`-delimited path of child names relative to this object
    ///
    /// Returns `None` and logs an error if any segment fails to resolve.
    pub fn find_by_path(&self, path: &str) -> Option<&GameObject> {
        let mut current = self;
        for segment in paths::segments(path) {
            match current.children.get(segment) {
                Some(child) => current = child,
                None => {
                    log::error!(
                        "game object '{}': no child '{}' on path '{}'",
                        self.name,
                        segment,
                        path
                    );
                    return None;
                }
            }
        }
        Some(current)
    }

    /// Mutable variant of [`find_by_path`](GameObject::find_by_path)
    pub fn find_by_path_mut(&mut self, path: &str) -> Option<&mut GameObject> {
        let mut current = self;
        for segment in paths::segments(path) {
            if !current.children.contains_key(segment) {
                log::error!("game object: no child '{}' on path '{}'", segment, path);
                return None;
            }
            current = current.children.get_mut(segment)?;
        }
        Some(current)
    }

    // ---- scene membership ------------------------------------------------

    /// Whether this object is transitively attached under a scene root
    pub fn on_scene(&self) -> bool {
        self.scene.is_some()
    }

    /// Weak handle to the scene this object is attached under
    ///
    /// Resolve it through [`SceneManager`](crate::scene::SceneManager).
    pub fn scene(&self) -> Option<SceneHandle> {
        self.scene
    }

    /// Copy a scene membership into this whole subtree
    ///
    /// The attach/detach notification of the tree: called with the parent's
    /// scene on attach and with `None` on detach.
    pub(crate) fn propagate_scene(&mut self, scene: Option<SceneHandle>) {
        self.scene = scene;
        for child in self.children.values_mut() {
            child.propagate_scene(scene);
        }
    }
}
