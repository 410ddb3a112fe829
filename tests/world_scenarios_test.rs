//! End-to-end world behaviour: eating, nested shapes, state faults, scrolling.

use std::cell::Cell;
use std::rc::Rc;

use tdtbge::core::{EngineError, Entity, EntityId, ShapeSpec, World, WorldConfig};
use tdtbge::types::{Extent, Position, Viewport};

fn world(rows: u16, cols: u16) -> World {
    World::new("Test World", Extent::new(rows, cols), None, WorldConfig::default()).unwrap()
}

fn eat_exact_food(id: EntityId, world: &mut World) -> tdtbge::core::Result<()> {
    for other in world.ids() {
        if world.entity(other)?.name() != "food" || !world.is_touching(id, other)? {
            continue;
        }
        let value = world.entity(other)?.attr_i64("value").unwrap_or(0);
        let player = world.entity_mut(id)?;
        let hunger = player.attr_i64("hunger").unwrap_or(0);
        player.set_attr("hunger", hunger - value);
        world.entity_mut(other)?.destroy();
    }
    Ok(())
}

#[test]
fn player_eats_food_and_food_leaves_the_grid() {
    let mut world = world(20, 20);
    let food = world
        .add_entity(Entity::new("food", [("default", "x")]).at(5, 5).with_attr("value", 5))
        .unwrap();
    let player = world
        .add_entity(
            Entity::new("player", [("default", "O")])
                .at(1, 1)
                .with_attr("hunger", 10)
                .with_controller('e', eat_exact_food),
        )
        .unwrap();
    world.update().unwrap();
    let food_index = world.sprite_cache().lookup("x").unwrap();
    assert_eq!(world.grid().get(Position::new(5, 5)), Some(Some(food_index)));

    // Walk diagonally down-right to (5, 5).
    for _ in 0..4 {
        world.entity_mut(player).unwrap().modify_pos(1, -1);
    }
    assert_eq!(world.entity(player).unwrap().position(), Some(Position::new(5, 5)));

    world.dispatch('e').unwrap();
    assert!(!world.entity(food).unwrap().is_alive());
    assert_eq!(world.entity(player).unwrap().attr_i64("hunger"), Some(5));

    world.update().unwrap();
    assert!(!world.contains(food));
    let player_index = world.sprite_cache().lookup("O").unwrap();
    assert_eq!(world.grid().get(Position::new(5, 5)), Some(Some(player_index)));
    assert_ne!(world.grid().get(Position::new(5, 5)), Some(Some(food_index)));
}

#[test]
fn nested_door_is_drawn_at_its_anchor() {
    let mut world = world(20, 20);
    let seen = Rc::new(Cell::new(None));
    let seen_by_resolver = seen.clone();
    let door = world
        .add_entity(
            Entity::new("door", [("closed", "D")]).with_state_resolver(move |door, _| {
                seen_by_resolver.set(door.position());
                "closed".into()
            }),
        )
        .unwrap();
    world
        .add_entity(
            Entity::new("house", [("default", "H")])
                .at(5, 5)
                .with_shape([ShapeSpec::outline(0, 0, 5, 10), ShapeSpec::nested(0, 3, door)]),
        )
        .unwrap();

    let grid = world.generate_world_array().unwrap();
    let door_index = world.sprite_cache().lookup("D").unwrap();
    let house_index = world.sprite_cache().lookup("H").unwrap();

    assert_eq!(grid.get(Position::new(5, 8)), Some(Some(door_index)));
    assert_eq!(grid.get(Position::new(5, 7)), Some(Some(house_index)));
    assert_eq!(seen.get(), Some(Position::new(5, 8)));
    assert!(world.entity(door).unwrap().is_abstract());
}

#[test]
fn nested_child_shape_is_offset_from_anchor() {
    let mut world = world(20, 20);
    let censor = world
        .add_entity(Entity::new("censor", [("default", "#")]).with_shape([ShapeSpec::filled(0, 0, 2, 3)]))
        .unwrap();
    world
        .add_entity(
            Entity::new("house", [("default", "H")])
                .at(4, 4)
                .with_shape([ShapeSpec::nested(1, 1, censor)]),
        )
        .unwrap();
    let grid = world.generate_world_array().unwrap();
    let censor_index = world.sprite_cache().lookup("#").unwrap();
    for row in 5..7 {
        for col in 5..8 {
            assert_eq!(grid.get(Position::new(row, col)), Some(Some(censor_index)));
        }
    }
    assert_eq!(grid.occupied(), 6);
}

#[test]
fn purged_child_disappears_from_parent() {
    let mut world = world(20, 20);
    let censor = world
        .add_entity(Entity::new("censor", [("default", "#")]).with_shape([ShapeSpec::filled(0, 0, 2, 2)]))
        .unwrap();
    let house = world
        .add_entity(
            Entity::new("house", [("default", "H")])
                .at(2, 2)
                .with_shape([ShapeSpec::cell(0, 0), ShapeSpec::nested(1, 1, censor)]),
        )
        .unwrap();
    world.update().unwrap();
    assert_eq!(world.grid().occupied(), 5);

    world.entity_mut(censor).unwrap().destroy();
    world.update().unwrap();

    assert!(!world.contains(censor));
    assert!(world.entities().all(|(_, e)| !e.shape().references(censor)));
    assert_eq!(world.entity(house).unwrap().shape().len(), 1);
    assert_eq!(world.grid().occupied(), 1);

    // Purging again changes nothing.
    assert!(!world.purge(censor));
    assert_eq!(world.len(), 1);
}

#[test]
fn unknown_state_is_a_fault_not_a_default() {
    let mut world = world(10, 10);
    world
        .add_entity(
            Entity::new("player", [("default", "O"), ("famished", "o")])
                .at(1, 1)
                .with_state_resolver(|_, _| "starving".into()),
        )
        .unwrap();

    match world.update() {
        Err(EngineError::UnresolvedState { entity, state }) => {
            assert_eq!(entity, "player");
            assert_eq!(state, "starving");
        }
        other => panic!("expected UnresolvedState, got {other:?}"),
    }
}

#[test]
fn later_entity_wins_overlapping_cells() {
    let mut world = world(10, 10);
    world
        .add_entity(
            Entity::new("floor", [("default", ".")])
                .at(0, 0)
                .with_shape([ShapeSpec::filled(0, 0, 3, 3)]),
        )
        .unwrap();
    world
        .add_entity(Entity::new("rock", [("default", "#")]).at(1, 1))
        .unwrap();
    world.update().unwrap();

    let floor = world.sprite_cache().lookup(".").unwrap();
    let rock = world.sprite_cache().lookup("#").unwrap();
    assert_eq!(world.grid().get(Position::new(1, 1)), Some(Some(rock)));
    assert_eq!(world.grid().get(Position::new(0, 0)), Some(Some(floor)));
}

#[test]
fn small_viewport_limits_display_lines_and_scrolls_by_one_row() {
    let viewport = Viewport::new(Position::new(0, 0), Extent::new(5, 4));
    let mut world = World::new("scroll", Extent::new(30, 12), Some(viewport), WorldConfig::default()).unwrap();
    for row in 0..30 {
        world
            .add_entity(Entity::new(format!("marker{row}"), [("default", format!("{}", row % 10))]).at(row, 0))
            .unwrap();
    }
    world.update().unwrap();

    let lines: Vec<String> = world.display().lines().map(String::from).collect();
    assert_eq!(lines.len(), 5 + 2);
    assert_eq!(lines[1], "|| 0 - - - ||");
    assert_eq!(world.grid().rows(), 30);

    world.modify_viewport(0, -1).unwrap();
    world.update().unwrap();
    let scrolled: Vec<String> = world.display().lines().map(String::from).collect();
    assert_eq!(scrolled.len(), 7);
    assert_eq!(scrolled[1], "|| 1 - - - ||");
    assert_eq!(scrolled[1], lines[2]);
}

#[test]
fn every_state_sprite_is_registered() {
    let mut world = world(10, 10);
    let entities = [
        Entity::new("a", [("default", "1"), ("alt", "2")]).at(0, 0),
        Entity::new("b", [("default", "2"), ("alt", "3")]).at(0, 1),
        Entity::new("c", [("default", "4")]),
    ];
    for entity in entities {
        let states: Vec<String> = entity.states().iter().map(|s| s.sprite.clone()).collect();
        world.add_entity(entity).unwrap();
        for sprite in states {
            assert!(world.sprite_cache().lookup(&sprite).is_ok(), "{sprite} missing");
        }
    }
}

#[test]
fn touching_is_symmetric_across_a_neighbourhood() {
    let mut world = world(10, 10);
    let centre = world
        .add_entity(Entity::new("centre", [("default", "c")]).at(5, 5))
        .unwrap();
    for row in 2..9 {
        for col in 2..9 {
            let other = world
                .add_entity(Entity::new("probe", [("default", "p")]).at(row, col))
                .unwrap();
            let ab = world.is_touching(centre, other).unwrap();
            let ba = world.is_touching(other, centre).unwrap();
            assert_eq!(ab, ba);
            assert_eq!(ab, (row - 5i32).abs() <= 1 && (col - 5i32).abs() <= 1);
            world.purge(other);
        }
    }
}

#[test]
fn viewport_larger_than_world_is_rejected() {
    let viewport = Viewport::new(Position::new(0, 0), Extent::new(21, 20));
    let result = World::new("bad", Extent::new(20, 20), Some(viewport), WorldConfig::default());
    assert!(matches!(result, Err(EngineError::OutOfBounds { .. })));
}
