//! Paint a world snapshot onto a surface

use glam::Vec2;

use super::surface::{Surface, rgba};
use crate::sim::{GamePhase, WorldSnapshot};

const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

const CANNON_WIDTH: f32 = 5.0;
const BANNER_FONT: &str = "24px Arial";
const SCOREBOARD_FONT: &str = "18px Arial";
const GAME_OVER_FONT: &str = "48px Arial";

/// Scoreboard columns: (label, x)
const SCOREBOARD_COLUMNS: [(&str, f32); 3] =
    [("Score", 35.0), ("Bullets", 95.0), ("Targets", 155.0)];
const SCOREBOARD_LABEL_Y: f32 = 10.0;
const SCOREBOARD_VALUE_Y: f32 = 35.0;

/// Arena (y-up) to screen (y-down)
#[inline]
pub fn to_screen(pos: Vec2, arena_height: f32) -> Vec2 {
    Vec2::new(pos.x, arena_height - pos.y)
}

/// Draw one complete frame
pub fn draw_frame(snapshot: &WorldSnapshot, surface: &mut impl Surface) {
    let h = snapshot.arena_height;
    surface.clear();

    for body in &snapshot.bodies {
        surface.draw_circle(to_screen(body.pos, h), body.radius, rgba(body.color, 1.0));
    }

    surface.draw_line(
        to_screen(snapshot.emitter.base, h),
        to_screen(snapshot.emitter.nozzle, h),
        BLACK,
        CANNON_WIDTH,
    );

    if let Some(banner) = &snapshot.banner {
        surface.draw_text(&banner.text, to_screen(banner.pos, h), BANNER_FONT, BLACK);
    }

    let board = &snapshot.scoreboard;
    let values = [
        board.score.to_string(),
        board.bullets_remaining.to_string(),
        board.target_count.to_string(),
    ];
    for ((label, x), value) in SCOREBOARD_COLUMNS.iter().zip(values.iter()) {
        surface.draw_text(label, Vec2::new(*x, SCOREBOARD_LABEL_Y), SCOREBOARD_FONT, BLACK);
        surface.draw_text(value, Vec2::new(*x, SCOREBOARD_VALUE_Y), SCOREBOARD_FONT, BLACK);
    }

    if snapshot.phase == GamePhase::GameOver {
        surface.draw_text("Game Over!", Vec2::new(200.0, 200.0), GAME_OVER_FONT, BLACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList};
    use crate::settings::GameConfig;
    use crate::sim::{Banner, World};

    fn world(seed_count: u32) -> World {
        World::new(GameConfig {
            seed_count,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_bodies_are_flipped_to_screen() {
        let w = world(3);
        let snap = w.snapshot(0.0);
        let mut list = DrawList::new();
        draw_frame(&snap, &mut list);

        assert_eq!(list.commands[0], DrawCommand::Clear);
        let circles: Vec<_> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(circles.len(), 3);
        for (body, (center, radius)) in snap.bodies.iter().zip(circles) {
            assert_eq!(center, Vec2::new(body.pos.x, snap.arena_height - body.pos.y));
            assert_eq!(radius, body.radius);
        }
    }

    #[test]
    fn test_scoreboard_and_banner_text() {
        let mut w = world(2);
        w.restart().unwrap();
        let mut snap = w.snapshot(0.0);
        snap.banner = Some(Banner::new("Hit! +5", Vec2::new(10.0, 20.0), 1.0));

        let mut list = DrawList::new();
        draw_frame(&snap, &mut list);
        let texts: Vec<_> = list.texts().collect();
        assert!(texts.contains(&"Hit! +5"));
        assert!(texts.contains(&"Score"));
        assert!(texts.contains(&"100"));
        assert!(texts.contains(&"2"));
        assert!(!texts.contains(&"Game Over!"));
    }

    #[test]
    fn test_game_over_text() {
        let mut w = world(0);
        w.step(0.0);
        let mut list = DrawList::new();
        draw_frame(&w.snapshot(0.0), &mut list);
        assert!(list.texts().any(|t| t == "Game Over!"));
    }

    #[test]
    fn test_cannon_line() {
        let w = world(0);
        let snap = w.snapshot(0.0);
        let mut list = DrawList::new();
        draw_frame(&snap, &mut list);
        let line = list.commands.iter().find_map(|c| match c {
            DrawCommand::Line { from, to, width, .. } => Some((*from, *to, *width)),
            _ => None,
        });
        let (from, to, width) = line.unwrap();
        assert_eq!(width, CANNON_WIDTH);
        assert_eq!(from, to_screen(snap.emitter.base, snap.arena_height));
        assert_eq!(to, to_screen(snap.emitter.nozzle, snap.arena_height));
    }
}
