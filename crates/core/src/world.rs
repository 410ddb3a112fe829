//! World module - owns entities, sprites, bounds, and the viewport.
//!
//! The world is the only owner of entities. Shapes refer to nested children
//! by [`EntityId`], and [`World::purge`] scrubs those references whenever an
//! entity is removed, so no shape ever points at a missing entity.
//!
//! Insertion order is part of the contract: later entities overwrite earlier
//! ones in the grid, and controllers for one key run in insertion order.

use std::collections::BTreeMap;
use std::rc::Rc;

use tdtbge_types::{Extent, Position, Viewport};

use crate::collision;
use crate::config::WorldConfig;
use crate::entity::{Entity, EntityId};
use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::io::{AudioSink, FrameSink, KeySource, NullSink, ScriptedKeys, SilentAudio};
use crate::sprite::SpriteCache;

/// Key-bound callback attached to the world itself.
pub type WorldController = Rc<dyn Fn(&mut World) -> Result<()>>;

pub struct World {
    title: String,
    bounds: Extent,
    viewport: Viewport,
    config: WorldConfig,
    entities: Vec<(EntityId, Entity)>,
    next_id: u32,
    pub(crate) sprite_cache: SpriteCache,
    pub(crate) controllers: BTreeMap<char, WorldController>,
    pub(crate) grid: Grid,
    pub(crate) display: String,
    pub(crate) render_cycle: u64,
    pub(crate) input: Box<dyn KeySource>,
    pub(crate) output: Box<dyn FrameSink>,
    pub(crate) audio: Box<dyn AudioSink>,
}

impl World {
    /// Create an empty world.
    ///
    /// `viewport` defaults to the whole world. Fails with
    /// [`EngineError::OutOfBounds`] when the viewport does not fit.
    ///
    /// The world starts with headless collaborators: no input (the first key
    /// read is the quit key), discarded output, and silent audio.
    pub fn new(
        title: impl Into<String>,
        bounds: Extent,
        viewport: Option<Viewport>,
        config: WorldConfig,
    ) -> Result<Self> {
        let title = title.into();
        let viewport = viewport.unwrap_or(Viewport::full(bounds));
        check_viewport(viewport, bounds)?;

        log::info!("initializing world {} ({}, viewport {})", title, bounds, viewport);

        let mut world = Self {
            title,
            bounds,
            viewport,
            config,
            entities: Vec::new(),
            next_id: 0,
            sprite_cache: SpriteCache::new(),
            controllers: BTreeMap::new(),
            grid: Grid::new(bounds),
            display: String::new(),
            render_cycle: 0,
            input: Box::new(ScriptedKeys::default()),
            output: Box::new(NullSink),
            audio: Box::new(SilentAudio::default()),
        };
        world.note("Initializing world...")?;
        world.rebuild()?;
        Ok(world)
    }

    pub fn with_input(mut self, input: impl KeySource + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    pub fn with_output(mut self, output: impl FrameSink + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn bounds(&self) -> Extent {
        self.bounds
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn debug(&self) -> bool {
        self.config.debug
    }

    pub fn sprite_cache(&self) -> &SpriteCache {
        &self.sprite_cache
    }

    /// Grid computed by the last update.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Display block computed by the last update.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Number of frames rendered so far.
    pub fn render_cycle(&self) -> u64 {
        self.render_cycle
    }

    /// Add `entity`, register its sprites, and return its id.
    ///
    /// Nested children must already be in the world. Placed entities must lie
    /// entirely inside the world bounds, children included.
    pub fn add_entity(&mut self, entity: Entity) -> Result<EntityId> {
        self.check_placement(&entity)?;

        for state in entity.states() {
            self.sprite_cache.register(state.sprite.clone());
        }

        let id = EntityId::from_raw(self.next_id);
        self.next_id += 1;
        log::info!("adding entity {} '{}' to world {}", id, entity.name(), self.title);
        self.entities.push((id, entity));
        Ok(id)
    }

    /// Bind a world-level controller to `key`, replacing any previous one.
    pub fn add_controller<F>(&mut self, key: char, controller: F) -> Result<()>
    where
        F: Fn(&mut World) -> Result<()> + 'static,
    {
        self.note(&format!("adding controller '{}' to world: {}...", key, self.title))?;
        self.controllers.insert(key, Rc::new(controller));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|(eid, _)| *eid == id)
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, e)| (*id, e))
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|(id, _)| *id).collect()
    }

    /// Ids of entities whose name contains `fragment`, in insertion order.
    pub fn find(&self, fragment: &str) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, e)| e.name_matches(fragment))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.get(id).ok_or(EngineError::UnknownEntity { id })
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.get_mut(id).ok_or(EngineError::UnknownEntity { id })
    }

    /// See [`collision::is_touching`].
    pub fn is_touching(&self, a: EntityId, b: EntityId) -> Result<bool> {
        Ok(collision::is_touching(self.entity(a)?, self.entity(b)?))
    }

    /// See [`collision::will_collide_with`].
    pub fn will_collide(&self, mover: EntityId, target: EntityId, dx: i32, dy: i32) -> Result<bool> {
        Ok(collision::will_collide_with(
            self.entity(mover)?,
            self.entity(target)?,
            dx,
            dy,
        ))
    }

    /// True when `mover` would hit any entity after moving by `(dx, dy)`.
    pub fn is_blocked(&self, mover: EntityId, dx: i32, dy: i32) -> Result<bool> {
        let me = self.entity(mover)?;
        Ok(self
            .entities
            .iter()
            .filter(|(id, _)| *id != mover)
            .any(|(_, other)| collision::will_collide_with(me, other, dx, dy)))
    }

    /// Move the viewport origin to `(row, col)`.
    pub fn set_viewport_origin(&mut self, row: i32, col: i32) -> Result<()> {
        let moved = Viewport::new(Position::new(row, col), self.viewport.size);
        check_viewport(moved, self.bounds)?;
        self.viewport = moved;
        Ok(())
    }

    /// Scroll the viewport by `x` columns and `y` rows, with `y` pointing up.
    pub fn modify_viewport(&mut self, x: i32, y: i32) -> Result<()> {
        let origin = self.viewport.origin;
        self.set_viewport_origin(origin.row - y, origin.col + x)
    }

    /// Fire-and-forget sound effect.
    pub fn play_sound(&mut self, clip: &str) {
        log::debug!("playing {}", clip);
        self.audio.play(clip);
    }

    /// Advance entities, purge the dead, and rebuild grid and display.
    pub fn update(&mut self) -> Result<()> {
        self.note(&format!("Updating world {}...", self.title))?;

        let debug = self.config.debug;
        let mut dead = Vec::new();
        let mut notes = Vec::new();
        for (id, entity) in self.entities.iter_mut() {
            if entity.is_alive() {
                entity.update();
                if debug || entity.debug() {
                    notes.push(format!("updating entity {}...", entity.name()));
                    notes.push(format!("{:?}", entity.attributes()));
                }
            } else {
                dead.push(*id);
            }
        }
        for line in notes {
            self.output.diagnostic(&line)?;
        }

        for id in dead {
            self.purge(id);
        }
        self.rebuild()
    }

    /// Remove `id` from the world and strip it from every shape.
    ///
    /// Returns false when the entity was already gone; the scrub still runs.
    pub fn purge(&mut self, id: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|(eid, _)| *eid != id);
        let removed = self.entities.len() != before;

        for (_, entity) in self.entities.iter_mut() {
            let stripped = entity.shape_mut().strip_child(id);
            if stripped > 0 {
                log::debug!("stripped {} from shape of '{}'", id, entity.name());
            }
        }
        if removed {
            log::info!("purged entity {} from world {}", id, self.title);
        }
        removed
    }

    pub(crate) fn rebuild(&mut self) -> Result<()> {
        self.grid = self.generate_world_array()?;
        self.display = self.generate_world_display();
        Ok(())
    }

    /// Log `msg`, and mirror it to the diagnostic channel in debug mode.
    pub(crate) fn note(&mut self, msg: &str) -> Result<()> {
        log::debug!("{}", msg);
        if self.config.debug {
            self.output.diagnostic(msg)?;
        }
        Ok(())
    }

    fn check_placement(&self, entity: &Entity) -> Result<()> {
        for child in entity.shape().children() {
            if !self.contains(child) {
                return Err(EngineError::UnknownEntity { id: child });
            }
        }

        if entity.is_abstract() {
            return Ok(());
        }
        let Some(origin) = entity.position() else {
            return Ok(());
        };

        for entry in entity.shape().entries() {
            let anchor = origin + entry.offset;
            match entry.child {
                None => self.check_cell(entity.name(), anchor)?,
                Some(child) => {
                    let child = self.entity(child)?;
                    for inner in child.shape().entries() {
                        self.check_cell(child.name(), anchor + inner.offset)?;
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn check_cell(&self, name: &str, pos: Position) -> Result<()> {
        if self.bounds.contains(pos) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds {
                what: format!("entity '{}'", name),
                position: pos,
                bounds: self.bounds,
            })
        }
    }
}

fn check_viewport(viewport: Viewport, bounds: Extent) -> Result<()> {
    if viewport.fits_within(bounds) {
        Ok(())
    } else {
        Err(EngineError::OutOfBounds {
            what: format!("viewport {}", viewport.size),
            position: viewport.origin,
            bounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeSpec;

    fn world(rows: u16, cols: u16) -> World {
        World::new("test", Extent::new(rows, cols), None, WorldConfig::default()).unwrap()
    }

    #[test]
    fn new_world_has_full_viewport_and_empty_grid() {
        let w = world(4, 6);
        assert_eq!(w.viewport(), Viewport::full(Extent::new(4, 6)));
        assert_eq!(w.grid().rows(), 4);
        assert_eq!(w.grid().cols(), 6);
        assert_eq!(w.grid().occupied(), 0);
        assert_eq!(w.render_cycle(), 0);
    }

    #[test]
    fn viewport_outside_bounds_is_rejected() {
        let vp = Viewport::new(Position::new(15, 0), Extent::new(10, 10));
        let err = World::new("bad", Extent::new(20, 20), Some(vp), WorldConfig::default());
        assert!(matches!(err, Err(EngineError::OutOfBounds { .. })));
    }

    #[test]
    fn add_entity_registers_every_state_sprite() {
        let mut w = world(10, 10);
        w.add_entity(Entity::new("p", [("default", "O"), ("famished", "o")]).at(1, 1))
            .unwrap();
        assert!(w.sprite_cache().contains("O"));
        assert!(w.sprite_cache().contains("o"));
        assert!(w.sprite_cache().lookup("o").is_ok());
    }

    #[test]
    fn ids_are_assigned_in_insertion_order() {
        let mut w = world(10, 10);
        let a = w.add_entity(Entity::new("a", [("default", "a")]).at(0, 0)).unwrap();
        let b = w.add_entity(Entity::new("b", [("default", "b")]).at(0, 1)).unwrap();
        assert!(a < b);
        assert_eq!(w.ids(), vec![a, b]);
    }

    #[test]
    fn placement_outside_bounds_is_rejected() {
        let mut w = world(10, 10);
        let err = w.add_entity(Entity::new("far", [("default", "f")]).at(10, 0));
        assert!(matches!(err, Err(EngineError::OutOfBounds { .. })));

        let wide = Entity::new("wide", [("default", "w")])
            .at(0, 5)
            .with_shape([ShapeSpec::filled(0, 0, 1, 6)]);
        assert!(matches!(w.add_entity(wide), Err(EngineError::OutOfBounds { .. })));
        assert!(w.is_empty());
    }

    #[test]
    fn nested_child_must_already_exist() {
        let mut w = world(10, 10);
        let ghost = EntityId::from_raw(42);
        let house = Entity::new("house", [("default", "H")])
            .at(0, 0)
            .with_shape([ShapeSpec::nested(0, 0, ghost)]);
        assert!(matches!(
            w.add_entity(house),
            Err(EngineError::UnknownEntity { .. })
        ));
    }

    #[test]
    fn nested_child_cells_are_bounds_checked() {
        let mut w = world(10, 10);
        let censor = w
            .add_entity(Entity::new("censor", [("default", "X")]).with_shape([ShapeSpec::filled(0, 0, 3, 3)]))
            .unwrap();
        let house = Entity::new("house", [("default", "H")])
            .at(8, 8)
            .with_shape([ShapeSpec::nested(0, 0, censor)]);
        assert!(matches!(w.add_entity(house), Err(EngineError::OutOfBounds { .. })));
    }

    #[test]
    fn find_matches_name_fragments_in_order() {
        let mut w = world(10, 10);
        let f0 = w.add_entity(Entity::new("food0", [("default", "x")]).at(0, 0)).unwrap();
        w.add_entity(Entity::new("player", [("default", "O")]).at(1, 1)).unwrap();
        let f1 = w.add_entity(Entity::new("food1", [("default", "x")]).at(2, 2)).unwrap();
        assert_eq!(w.find("food"), vec![f0, f1]);
        assert!(w.find("door").is_empty());
    }

    #[test]
    fn purge_is_idempotent_and_scrubs_shapes() {
        let mut w = world(20, 20);
        let door = w.add_entity(Entity::new("door", [("default", "D")])).unwrap();
        let house = w
            .add_entity(
                Entity::new("house", [("default", "H")])
                    .at(5, 5)
                    .with_shape([ShapeSpec::outline(0, 0, 3, 5), ShapeSpec::nested(0, 2, door)]),
            )
            .unwrap();

        assert!(w.purge(door));
        assert!(!w.contains(door));
        assert!(!w.entity(house).unwrap().shape().references(door));

        assert!(!w.purge(door));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn update_purges_dead_entities() {
        let mut w = world(10, 10);
        let food = w.add_entity(Entity::new("food", [("default", "x")]).at(5, 5)).unwrap();
        w.entity_mut(food).unwrap().destroy();
        assert!(w.contains(food));
        w.update().unwrap();
        assert!(!w.contains(food));
    }

    #[test]
    fn viewport_scrolls_with_y_up_and_stays_in_bounds() {
        let vp = Viewport::new(Position::new(0, 0), Extent::new(5, 5));
        let mut w = World::new("scroll", Extent::new(10, 10), Some(vp), WorldConfig::default()).unwrap();

        w.modify_viewport(1, -2).unwrap();
        assert_eq!(w.viewport().origin, Position::new(2, 1));

        assert!(w.modify_viewport(0, 1).is_ok());
        assert_eq!(w.viewport().origin, Position::new(1, 1));

        let err = w.set_viewport_origin(6, 0);
        assert!(matches!(err, Err(EngineError::OutOfBounds { .. })));
        assert_eq!(w.viewport().origin, Position::new(1, 1));
    }

    #[test]
    fn is_blocked_consults_every_other_entity() {
        let mut w = world(10, 10);
        let player = w.add_entity(Entity::new("player", [("default", "O")]).at(5, 5)).unwrap();
        w.add_entity(
            Entity::new("rock", [("default", "#")])
                .at(5, 6)
                .with_collision_tags(["player"]),
        )
        .unwrap();

        assert!(w.is_blocked(player, 1, 0).unwrap());
        assert!(!w.is_blocked(player, -1, 0).unwrap());
    }
}
