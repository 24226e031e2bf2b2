//! World module - the test course.

mod course;
mod geometry;
mod plugin;

pub use course::{course_blocks, SPAWN_POINT};
pub use geometry::{spawn_block, spawn_lighting, spawn_ramp, Block, CourseGeometry};
pub use plugin::{setup_course, WorldPlugin};
