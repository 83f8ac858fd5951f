//! Collision rules and the computer opponent.

use crate::entities::{Ball, Field, Paddle};
use crate::types::Side;

/// Physics calculations for game simulation
pub struct Physics;

impl Physics {
    /// Check whether the ball got past a paddle's defended edge.
    ///
    /// The computer defends the left edge and the player the right one, so
    /// the returned side is the one that scores.
    pub fn check_goal(ball: &Ball, computer: &Paddle, player: &Paddle) -> Option<Side> {
        if ball.center_x <= computer.borders().left {
            Some(Side::Player)
        } else if ball.center_x >= player.borders().right {
            Some(Side::Cpu)
        } else {
            None
        }
    }

    /// Reflect the ball off a paddle if its facing edge is inside the paddle,
    /// or crossed the paddle face during the last tick.
    ///
    /// On a hit the x velocity is inverted and the ball is put flush against
    /// the paddle face, so a fast ball can't stay inside and bounce twice.
    pub fn check_paddle_hit(ball: &mut Ball, paddle: &Paddle, side: Side) -> bool {
        let paddle_box = paddle.borders();

        let (edge, face) = match side {
            // Computer is on the left: its right face meets the ball's left edge
            Side::Cpu => (ball.center_x - ball.radius, paddle_box.right),
            Side::Player => (ball.center_x + ball.radius, paddle_box.left),
        };
        let inside = match side {
            Side::Cpu => edge > paddle_box.left && edge <= paddle_box.right,
            Side::Player => edge >= paddle_box.left && edge < paddle_box.right,
        };

        let hit = if inside {
            paddle_box.spans_y(ball.center_y)
        } else {
            match Self::face_crossing(ball, edge, face, side) {
                Some(y) => paddle_box.spans_y(y),
                None => false,
            }
        };
        if !hit {
            return false;
        }

        ball.invert_move(true, false);
        ball.center_x = match side {
            Side::Cpu => face + ball.radius,
            Side::Player => face - ball.radius,
        };
        true
    }

    /// Height at which the ball's facing edge passed the paddle face this
    /// tick, if it did. Only a ball heading toward the paddle can cross.
    fn face_crossing(ball: &Ball, edge: f32, face: f32, side: Side) -> Option<f32> {
        let previous = edge - ball.speed_x;
        let crossed = match side {
            Side::Cpu => ball.speed_x < 0.0 && previous > face && edge <= face,
            Side::Player => ball.speed_x > 0.0 && previous < face && edge >= face,
        };
        if !crossed {
            return None;
        }

        let fraction = (face - previous) / ball.speed_x;
        Some(ball.center_y - ball.speed_y + ball.speed_y * fraction)
    }

    /// Bounce the ball off the top and bottom walls
    pub fn bounce_walls(ball: &mut Ball, field: &Field) -> bool {
        let walls = field.borders();
        let ball_box = ball.borders();

        let hits_top = ball_box.top <= walls.top && ball.speed_y < 0.0;
        let hits_bottom = ball_box.bottom >= walls.bottom && ball.speed_y > 0.0;

        if hits_top || hits_bottom {
            ball.invert_move(false, true);
            true
        } else {
            false
        }
    }

    /// Pick the computer paddle's next speed.
    ///
    /// The computer only chases a ball that is on its half (with a margin of
    /// two paddle widths past the center line) and heading its way. A ball on
    /// the far half stops the paddle outright; anything else lets it coast
    /// down to rest.
    pub fn chase_ball(
        computer: &Paddle,
        ball: &Ball,
        field: &Field,
        cpu_speed: f32,
        dead_zone: f32,
        deceleration: f32,
    ) -> f32 {
        let near_limit = field.width / 2.0 + 2.0 * computer.width;
        if ball.center_x > near_limit {
            return 0.0;
        }

        if ball.speed_x < 0.0 {
            let offset = ball.center_y - computer.borders().center_y;
            if offset < -dead_zone {
                return -cpu_speed;
            }
            if offset > dead_zone {
                return cpu_speed;
            }
        }

        Self::decelerate(computer.speed(), deceleration)
    }

    /// Move `speed` toward zero by `step` without crossing it
    pub fn decelerate(speed: f32, step: f32) -> f32 {
        if speed > 0.0 {
            (speed - step).max(0.0)
        } else {
            (speed + step).min(0.0)
        }
    }
}
