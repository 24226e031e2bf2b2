//! Layout of the movement test course.
//!
//! The floor top sits at y = 0. Heights are picked around the default
//! movement config: a 2 m standing capsule, a 0.5 m crouch and a jump apex
//! just over 1 m.

use bevy::prelude::*;

use super::geometry::Block;

/// Where the player starts: standing capsule resting on the floor.
pub const SPAWN_POINT: Vec3 = Vec3::new(0.0, 1.1, 6.0);

const FLOOR: Color = Color::srgb(0.35, 0.36, 0.38);
const STONE: Color = Color::srgb(0.55, 0.5, 0.45);
const ACCENT: Color = Color::srgb(0.6, 0.3, 0.25);

/// Solid blocks of the course.
pub fn course_blocks() -> Vec<Block> {
    let mut blocks = vec![
        // Ground
        Block::new(Vec3::new(-20.0, -1.0, -20.0), Vec3::new(40.0, 1.0, 40.0), FLOOR),
        // Crawlspace: low roof on two side walls, only passable crouched
        Block::new(Vec3::new(-2.0, 1.2, -10.0), Vec3::new(4.0, 0.4, 6.0), STONE),
        Block::new(Vec3::new(-2.4, 0.0, -10.0), Vec3::new(0.4, 1.6, 6.0), STONE),
        Block::new(Vec3::new(2.0, 0.0, -10.0), Vec3::new(0.4, 1.6, 6.0), STONE),
        // Jump platforms below the jump apex
        Block::new(Vec3::new(6.0, 0.0, -2.0), Vec3::new(2.0, 0.9, 2.0), ACCENT),
        Block::new(Vec3::new(9.0, 0.0, -5.0), Vec3::new(2.0, 1.6, 2.0), ACCENT),
    ];

    // Stairs within the autostep height
    for i in 0..5 {
        let step = i as f32;
        blocks.push(Block::new(
            Vec3::new(-9.0, 0.0, -2.0 - step * 0.6),
            Vec3::new(3.0, 0.25 * (step + 1.0), 0.6),
            STONE,
        ));
    }

    blocks
}
