//! Cannon Gallery entry point
//!
//! Headless native runner: drives the simulation at a fixed tick rate with a
//! simple auto-aiming gunner and prints the final snapshot as JSON.
//!
//! Usage: `cannon-gallery [--overlap=MODE] [--approach=MODE] [config.json] [max_ticks]`

use cannon_gallery::consts::TICK_MS;
use cannon_gallery::renderer::{DrawList, draw_frame};
use cannon_gallery::sim::{BodyKind, TickInput, World, tick};
use cannon_gallery::{GameConfig, SimError};

/// Ticks between auto-fire attempts
const FIRE_INTERVAL: u64 = 20;
const DEFAULT_MAX_TICKS: u64 = 60 * 120;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Cannon Gallery (native) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SimError> {
    let (flags, positional): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|a| a.starts_with("--"));
    let mut args = positional.into_iter();

    let mut config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    for flag in &flags {
        let (name, value) = flag
            .trim_start_matches("--")
            .split_once('=')
            .ok_or_else(|| SimError::InvalidConfig(format!("bad flag {}", flag)))?;
        config.set_option(name, value)?;
    }

    let max_ticks = match args.next() {
        Some(n) => n
            .parse::<u64>()
            .map_err(|e| SimError::InvalidConfig(format!("max_ticks: {}", e)))?,
        None => DEFAULT_MAX_TICKS,
    };

    let mut world = World::new(config)?;
    let mut frame = DrawList::new();

    for i in 0..max_ticks {
        let now_ms = i as f64 * TICK_MS;
        let input = autopilot(&world, i);
        let report = tick(&mut world, &input, now_ms);

        for hit in &report.hits {
            log::info!(
                "Tick {}: hit target {} for {} (score {})",
                world.time_ticks(),
                hit.target,
                hit.value,
                world.score()
            );
        }

        draw_frame(&world.snapshot(now_ms), &mut frame);

        if world.is_game_over() || (world.bullets_remaining() == 0 && no_bullets_in_flight(&world))
        {
            break;
        }
    }

    let now_ms = world.time_ticks() as f64 * TICK_MS;
    let board = world.scoreboard();
    log::info!(
        "Finished after {} ticks: score {}, {} bullets left, {} targets left, {} draw calls",
        world.time_ticks(),
        board.score,
        board.bullets_remaining,
        board.target_count,
        frame.commands.len()
    );

    println!("{}", serde_json::to_string_pretty(&world.snapshot(now_ms))?);
    Ok(())
}

/// Aim at the lowest target and fire periodically
fn autopilot(world: &World, tick_index: u64) -> TickInput {
    let nozzle = world.emitter().nozzle();
    let aim = world
        .bodies()
        .iter()
        .filter(|b| b.kind == BodyKind::Target)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|t| {
            let to = t.pos - nozzle;
            to.y.atan2(to.x).to_degrees()
        });

    TickInput {
        aim,
        fire: tick_index % FIRE_INTERVAL == 0,
        ..Default::default()
    }
}

fn no_bullets_in_flight(world: &World) -> bool {
    world.bodies().iter().all(|b| b.kind != BodyKind::Bullet)
}
