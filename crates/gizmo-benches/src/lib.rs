// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared board builders for the Gizmo benchmarks.

use gizmo_physics::{FlipperSide, PhysicsBody, ShapeError, Vector2, World};

/// Walled board with a row of bumpers, two flippers and `balls` balls
/// dropped in a grid above them.
pub fn board_with_balls(balls: usize) -> Result<World, ShapeError> {
    let mut world = World::default();
    world.add_body(PhysicsBody::boundary(Vector2::new(10.0, -0.5), 22.0, 1.0)?);
    world.add_body(PhysicsBody::boundary(Vector2::new(-0.5, 10.0), 1.0, 22.0)?);
    world.add_body(PhysicsBody::boundary(Vector2::new(20.5, 10.0), 1.0, 22.0)?);
    for i in 0..5_i32 {
        let x = 2.0 + 4.0 * f64::from(i);
        world.add_body(PhysicsBody::circle_obstacle(Vector2::new(x, 4.0))?);
        world.add_body(PhysicsBody::triangle(Vector2::new(x + 2.0, 6.0))?);
    }
    world.add_body(PhysicsBody::flipper(Vector2::new(6.0, 1.5), FlipperSide::Left)?);
    world.add_body(PhysicsBody::flipper(Vector2::new(14.0, 1.5), FlipperSide::Right)?);
    let mut placed = 0_usize;
    let mut row = 0_u32;
    while placed < balls {
        for col in 0..40_u32 {
            if placed == balls {
                break;
            }
            let at = Vector2::new(0.5 + 0.48 * f64::from(col), 9.0 + 0.48 * f64::from(row));
            world.add_body(PhysicsBody::ball(at)?);
            placed += 1;
        }
        row += 1;
    }
    Ok(world)
}
