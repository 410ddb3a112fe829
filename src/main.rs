//! Top-down demo (default binary).
//!
//! A 200x200 world seen through a 20x20 window. Walk with `wasd` (the window
//! scrolls at its edges), eat food next to you with `e`, open the house door
//! with `o`, pause for five frames with `p`, and quit with `\`.

use anyhow::Result;
use clap::Parser;

use tdtbge::app::{self, Cli};
use tdtbge::core::{Entity, EntityId, ShapeSpec, World};
use tdtbge::term::{paint, Color};
use tdtbge::types::{Extent, Position, Viewport};

const WORLD_SIZE: Extent = Extent::new(200, 200);
const WINDOW_SIZE: Extent = Extent::new(20, 20);
const FOOD_VALUE: i64 = 5;
const FAMISHED_ABOVE: i64 = 25;

fn main() -> Result<()> {
    let cli = Cli::parse();
    app::init_logging(&cli.log_file)?;

    let config = cli.world_config(Some("audio/adventure_theme.wav"))?;
    let viewport = Viewport::new(Position::new(0, 0), WINDOW_SIZE);
    let mut world = World::new("Test World", WORLD_SIZE, Some(viewport), config)?;

    spawn_food(&mut world, WORLD_SIZE.rows as usize / 2)?;
    spawn_house(&mut world)?;
    world.add_entity(player())?;
    world.add_controller('p', |world| world.wait(5))?;

    app::play(world, &cli)
}

fn spawn_food(world: &mut World, count: usize) -> Result<()> {
    let sprite = paint("x", Color::Green);
    for i in 0..count {
        let row = fastrand::i32(0..WORLD_SIZE.rows as i32);
        let col = fastrand::i32(0..WORLD_SIZE.cols as i32);
        let food = Entity::new(format!("food{i}"), [("default", sprite.as_str())])
            .at(row, col)
            .with_attr("value", FOOD_VALUE);
        world.add_entity(food)?;
    }
    Ok(())
}

/// A walled house whose interior is hidden until its door is opened.
fn spawn_house(world: &mut World) -> Result<()> {
    let door = Entity::new(
        "door",
        [
            ("door_closed", paint("D", Color::Red)),
            ("door_open", "-".to_string()),
        ],
    )
    .with_attr("door_open", false)
    .with_attr("censor_name", "censor")
    .with_state_resolver(|door, _| {
        if door.attr_bool("door_open").unwrap_or(false) {
            "door_open".into()
        } else {
            "door_closed".into()
        }
    });
    let door = world.add_entity(door)?;

    let censor = Entity::new("censor", [("default", paint("X", Color::Magenta))])
        .with_shape([ShapeSpec::filled(0, 0, 3, 8)]);
    let censor = world.add_entity(censor)?;

    let house = Entity::new("house", [("default", paint("X", Color::Magenta))])
        .at(5, 5)
        .with_shape([
            ShapeSpec::outline(0, 0, 5, 10),
            ShapeSpec::nested(1, 1, censor),
            ShapeSpec::nested(0, 3, door),
        ]);
    world.add_entity(house)?;
    Ok(())
}

fn player() -> Entity {
    Entity::new(
        "player",
        [
            ("default", paint("O", Color::Blue)),
            ("famished", paint("o", Color::Cyan)),
        ],
    )
    .at(1, 1)
    .with_attr("hunger", 50)
    .with_state_resolver(|player, _| {
        if player.attr_i64("hunger").unwrap_or(0) > FAMISHED_ABOVE {
            "famished".into()
        } else {
            "default".into()
        }
    })
    .with_controller('w', |id, world| step(id, world, 0, 1))
    .with_controller('a', |id, world| step(id, world, -1, 0))
    .with_controller('s', |id, world| step(id, world, 0, -1))
    .with_controller('d', |id, world| step(id, world, 1, 0))
    .with_controller('e', eat)
    .with_controller('o', open_door)
}

/// Move inside the window, scrolling it when the player is at its edge.
fn step(id: EntityId, world: &mut World, x: i32, y: i32) -> tdtbge::core::Result<()> {
    let Some(pos) = world.entity(id)?.position() else {
        return Ok(());
    };
    let target = Position::new(pos.row - y, pos.col + x);
    let viewport = world.viewport();
    let relative = Position::new(
        target.row - viewport.origin.row,
        target.col - viewport.origin.col,
    );

    if viewport.size.contains(relative) || world.modify_viewport(x, y).is_ok() {
        world.entity_mut(id)?.modify_pos(x, y);
    }
    Ok(())
}

fn eat(id: EntityId, world: &mut World) -> tdtbge::core::Result<()> {
    for food in world.find("food") {
        if !world.is_touching(id, food)? {
            continue;
        }
        let value = world.entity(food)?.attr_i64("value").unwrap_or(0);
        let me = world.entity_mut(id)?;
        let hunger = me.attr_i64("hunger").unwrap_or(0);
        me.set_attr("hunger", hunger - value);
        world.entity_mut(food)?.destroy();
        world.play_sound("audio/coin.wav");
    }
    Ok(())
}

fn open_door(id: EntityId, world: &mut World) -> tdtbge::core::Result<()> {
    for door in world.find("door") {
        if !world.is_touching(id, door)? {
            continue;
        }
        let door_entity = world.entity_mut(door)?;
        door_entity.set_attr("door_open", true);
        let censor_name = door_entity.attr_str("censor_name").unwrap_or_default().to_string();
        if censor_name.is_empty() {
            continue;
        }
        for censor in world.find(&censor_name) {
            world.entity_mut(censor)?.destroy();
        }
    }
    Ok(())
}
