//! Entity module - named simulation objects living in a world.
//!
//! An entity carries its footprint ([`Shape`]), a list of labelled sprite
//! states, an optional state resolver, collision tags, per-key controllers,
//! free-form attributes, and a liveness flag.
//!
//! Entities are built before they join a world:
//!
//! ```
//! use tdtbge_core::{Entity, World, WorldConfig};
//! use tdtbge_types::Extent;
//!
//! let mut world = World::new("demo", Extent::new(10, 10), None, WorldConfig::default()).unwrap();
//! let food = Entity::new("food", [("default", "x")]).at(5, 5).with_attr("value", 5);
//! let id = world.add_entity(food).unwrap();
//! assert_eq!(world.entity(id).unwrap().attr_i64("value"), Some(5));
//! ```
//!
//! An entity created without [`Entity::at`] is *abstract*: it is only drawn
//! through another entity's shape, which lends it a position during the walk.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use tdtbge_types::Position;

use crate::error::Result;
use crate::shape::{Shape, ShapeSpec};
use crate::world::World;

/// State name used when an entity has no resolver.
pub const DEFAULT_STATE: &str = "default";

/// Stable handle of an entity inside a [`World`].
///
/// Ids are never reused while the world lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn to_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Key-bound callback attached to an entity.
///
/// Receives the owning entity's id and full access to the world.
pub type EntityController = Rc<dyn Fn(EntityId, &mut World) -> Result<()>>;

/// Picks the state name an entity should be drawn with.
pub type StateResolver = Rc<dyn Fn(&Entity, &World) -> String>;

/// Per-frame hook run for every live entity during `World::update`.
pub type UpdateHook = Rc<dyn Fn(&mut Entity)>;

/// One labelled sprite state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteState {
    pub name: String,
    pub sprite: String,
}

impl<N: Into<String>, S: Into<String>> From<(N, S)> for SpriteState {
    fn from((name, sprite): (N, S)) -> Self {
        Self {
            name: name.into(),
            sprite: sprite.into(),
        }
    }
}

pub struct Entity {
    name: String,
    position: Option<Position>,
    is_abstract: bool,
    shape: Shape,
    states: Vec<SpriteState>,
    resolver: Option<StateResolver>,
    collision_tags: BTreeSet<String>,
    controllers: BTreeMap<char, EntityController>,
    attributes: BTreeMap<String, Value>,
    update_hook: Option<UpdateHook>,
    debug: bool,
    alive: bool,
}

impl Entity {
    /// Create an abstract entity with the given states.
    ///
    /// Call [`Entity::at`] to give it a world position.
    pub fn new<I, S>(name: impl Into<String>, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SpriteState>,
    {
        Self {
            name: name.into(),
            position: None,
            is_abstract: true,
            shape: Shape::default(),
            states: states.into_iter().map(Into::into).collect(),
            resolver: None,
            collision_tags: BTreeSet::new(),
            controllers: BTreeMap::new(),
            attributes: BTreeMap::new(),
            update_hook: None,
            debug: false,
            alive: true,
        }
    }

    /// Place the entity at `(row, col)`.
    pub fn at(mut self, row: i32, col: i32) -> Self {
        self.position = Some(Position::new(row, col));
        self.is_abstract = false;
        self
    }

    pub fn with_shape<I>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = ShapeSpec>,
    {
        self.shape = Shape::expand(specs);
        self
    }

    pub fn with_collision_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.collision_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_state_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&Entity, &World) -> String + 'static,
    {
        self.resolver = Some(Rc::new(resolver));
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_controller<F>(mut self, key: char, controller: F) -> Self
    where
        F: Fn(EntityId, &mut World) -> Result<()> + 'static,
    {
        self.add_controller(key, controller);
        self
    }

    pub fn with_update_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Entity) + 'static,
    {
        self.update_hook = Some(Rc::new(hook));
        self
    }

    /// Mirror this entity's updates to the world's diagnostic channel.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Bind `controller` to `key`, replacing any previous binding.
    pub fn add_controller<F>(&mut self, key: char, controller: F)
    where
        F: Fn(EntityId, &mut World) -> Result<()> + 'static,
    {
        log::debug!("adding controller '{}' to entity {}", key, self.name);
        self.controllers.insert(key, Rc::new(controller));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substring match on the name, so `food` matches `food0..foodN`.
    pub fn name_matches(&self, fragment: &str) -> bool {
        self.name.contains(fragment)
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Column of the entity, if it currently has a position.
    pub fn x_pos(&self) -> Option<i32> {
        self.position.map(|p| p.col)
    }

    /// Row of the entity, if it currently has a position.
    pub fn y_pos(&self) -> Option<i32> {
        self.position.map(|p| p.row)
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub(crate) fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    pub fn states(&self) -> &[SpriteState] {
        &self.states
    }

    pub fn collision_tags(&self) -> &BTreeSet<String> {
        &self.collision_tags
    }

    pub fn controller(&self, key: char) -> Option<EntityController> {
        self.controllers.get(&key).cloned()
    }

    pub fn has_controller(&self, key: char) -> bool {
        self.controllers.contains_key(&key)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark the entity for purge on the next world update.
    pub fn destroy(&mut self) {
        self.alive = false;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Move by `x` columns and `y` rows, with `y` pointing up.
    pub fn modify_pos(&mut self, x: i32, y: i32) {
        if let Some(pos) = self.position.as_mut() {
            pos.col += x;
            pos.row -= y;
        }
    }

    /// Jump to column `x`, row `y`.
    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.position = Some(Position::new(y, x));
    }

    /// Position lent by a parent shape during rasterization.
    pub(crate) fn set_transient_position(&mut self, pos: Position) {
        self.position = Some(pos);
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attr_i64(&self, key: &str) -> Option<i64> {
        self.attributes.get(key).and_then(Value::as_i64)
    }

    pub fn attr_bool(&self, key: &str) -> Option<bool> {
        self.attributes.get(key).and_then(Value::as_bool)
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Name of the state to draw, before sprite lookup.
    pub fn resolve_state_name(&self, world: &World) -> String {
        match &self.resolver {
            Some(resolver) => resolver(self, world),
            None => DEFAULT_STATE.to_string(),
        }
    }

    /// Sprite token of the first state called `name`.
    pub fn sprite_for(&self, name: &str) -> Option<&str> {
        self.states
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.sprite.as_str())
    }

    /// Run the per-frame update hook.
    pub fn update(&mut self) {
        log::debug!("updating entity {}", self.name);
        if let Some(hook) = self.update_hook.clone() {
            hook(self);
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("abstract", &self.is_abstract)
            .field("shape", &self.shape)
            .field("states", &self.states)
            .field("has_resolver", &self.resolver.is_some())
            .field("collision_tags", &self.collision_tags)
            .field("controllers", &self.controllers.keys().collect::<Vec<_>>())
            .field("attributes", &self.attributes)
            .field("alive", &self.alive)
            .finish()
    }
}
