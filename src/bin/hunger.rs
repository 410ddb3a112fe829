//! Minimal demo: a 20x20 world with one piece of food and a hungry player.
//!
//! `wasd` moves, `e` eats adjacent food, `p` waits five frames, `\` quits.

use anyhow::Result;
use clap::Parser;

use tdtbge::app::{self, Cli};
use tdtbge::core::{Entity, EntityId, World};
use tdtbge::types::Extent;

fn main() -> Result<()> {
    let cli = Cli::parse();
    app::init_logging(&cli.log_file)?;

    let mut world = World::new("Test World", Extent::new(20, 20), None, cli.world_config(None)?)?;

    world.add_entity(
        Entity::new("food", [("default", "x")])
            .at(5, 5)
            .with_attr("value", 5),
    )?;
    world.add_controller('p', |world| world.wait(5))?;
    world.add_entity(
        Entity::new("player", [("hungry", "O"), ("famished", "o")])
            .at(1, 1)
            .with_attr("hunger", 10)
            .with_state_resolver(|player, _| {
                if player.attr_i64("hunger").unwrap_or(0) > 5 {
                    "famished".into()
                } else {
                    "hungry".into()
                }
            })
            .with_controller('w', |id, world| walk(id, world, 0, 1))
            .with_controller('a', |id, world| walk(id, world, -1, 0))
            .with_controller('s', |id, world| walk(id, world, 0, -1))
            .with_controller('d', |id, world| walk(id, world, 1, 0))
            .with_controller('e', eat),
    )?;

    app::play(world, &cli)
}

/// Move unless that would leave the world.
fn walk(id: EntityId, world: &mut World, x: i32, y: i32) -> tdtbge::core::Result<()> {
    let bounds = world.bounds();
    let player = world.entity_mut(id)?;
    player.modify_pos(x, y);
    if !player.position().is_some_and(|p| bounds.contains(p)) {
        player.modify_pos(-x, -y);
    }
    Ok(())
}

fn eat(id: EntityId, world: &mut World) -> tdtbge::core::Result<()> {
    for food in world.find("food") {
        if world.entity(food)?.name() != "food" || !world.is_touching(id, food)? {
            continue;
        }
        let value = world.entity(food)?.attr_i64("value").unwrap_or(0);
        let player = world.entity_mut(id)?;
        let hunger = player.attr_i64("hunger").unwrap_or(0);
        player.set_attr("hunger", hunger - value);
        world.entity_mut(food)?.destroy();
    }
    Ok(())
}
