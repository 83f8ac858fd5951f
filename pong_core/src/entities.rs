//! Ball, paddles and the playing field.

use crate::render::Surface;
use crate::types::{Borders, Point, Rect, Rgb};

/// Length of one dash of the center net
const NET_DASH: f32 = 8.0;

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub color: Rgb,
    display_width: f32,
    display_high: f32,
}

impl Ball {
    pub fn new(
        center_x: f32,
        center_y: f32,
        radius: f32,
        color: Rgb,
        display_width: f32,
        display_high: f32,
    ) -> Self {
        Ball {
            center_x,
            center_y,
            radius,
            speed_x: 0.0,
            speed_y: 0.0,
            color,
            display_width,
            display_high,
        }
    }

    pub fn set_pos(&mut self, x: f32, y: f32) {
        self.center_x = x;
        self.center_y = y;
    }

    pub fn set_speed(&mut self, speed_x: f32, speed_y: f32) {
        self.speed_x = speed_x;
        self.speed_y = speed_y;
    }

    pub fn speed(&self) -> (f32, f32) {
        (self.speed_x, self.speed_y)
    }

    /// Advance one tick
    pub fn update_pos(&mut self) {
        self.center_x += self.speed_x;
        self.center_y += self.speed_y;
    }

    /// Reverse the selected velocity components
    pub fn invert_move(&mut self, invert_x: bool, invert_y: bool) {
        if invert_x {
            self.speed_x = -self.speed_x;
        }
        if invert_y {
            self.speed_y = -self.speed_y;
        }
    }

    /// Back to the center of the display, at rest
    pub fn reset(&mut self) {
        self.center_x = self.display_width / 2.0;
        self.center_y = self.display_high / 2.0;
        self.speed_x = 0.0;
        self.speed_y = 0.0;
    }

    /// Bounding box of the ball
    pub fn borders(&self) -> Borders {
        Borders {
            left: self.center_x - self.radius,
            right: self.center_x + self.radius,
            top: self.center_y - self.radius,
            bottom: self.center_y + self.radius,
            center_x: self.center_x,
            center_y: self.center_y,
        }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.draw_circle(
            Point::new(self.center_x, self.center_y),
            self.radius,
            self.color,
        );
    }
}

/// A paddle ("gamer"), moving vertically only
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub top_x: f32,
    pub top_y: f32,
    pub width: f32,
    pub height: f32,
    pub speed_y: f32,
    pub color: Rgb,
    pub name: String,
    init_top_x: f32,
    init_top_y: f32,
}

impl Paddle {
    pub fn new(
        top_x: f32,
        top_y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        name: impl Into<String>,
    ) -> Self {
        Paddle {
            top_x,
            top_y,
            width,
            height,
            speed_y: 0.0,
            color,
            name: name.into(),
            init_top_x: top_x,
            init_top_y: top_y,
        }
    }

    pub fn set_pos(&mut self, x: f32, y: f32) {
        self.top_x = x;
        self.top_y = y;
    }

    pub fn set_speed(&mut self, speed_y: f32) {
        self.speed_y = speed_y;
    }

    pub fn speed(&self) -> f32 {
        self.speed_y
    }

    /// Advance one tick; the paddle is not kept inside the field
    pub fn update_pos(&mut self) {
        self.top_y += self.speed_y;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.top_x, self.top_y, self.width, self.height)
    }

    pub fn borders(&self) -> Borders {
        self.rect().borders()
    }

    /// Back to the construction-time position. Speed is left alone.
    pub fn reset(&mut self) {
        self.top_x = self.init_top_x;
        self.top_y = self.init_top_y;
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.draw_rect(self.rect(), self.color);
    }
}

/// The playing field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    pub background_color: Rgb,
    pub line_color: Rgb,
    pub title: String,
    /// Thickness of the top and bottom walls
    pub border_width: f32,
}

impl Field {
    pub fn new(
        width: f32,
        height: f32,
        background_color: Rgb,
        line_color: Rgb,
        title: impl Into<String>,
        border_width: f32,
    ) -> Self {
        Field {
            width,
            height,
            background_color,
            line_color,
            title: title.into(),
            border_width,
        }
    }

    /// The area between the walls. Left and right are open goals.
    pub fn borders(&self) -> Borders {
        Rect::new(
            0.0,
            self.border_width,
            self.width,
            self.height - 2.0 * self.border_width,
        )
        .borders()
    }

    /// Background, walls and the dashed net
    pub fn draw(&self, surface: &mut impl Surface) {
        surface.fill(self.background_color);

        let bottom_wall = self.height - self.border_width;
        surface.draw_rect(
            Rect::new(0.0, 0.0, self.width, self.border_width),
            self.line_color,
        );
        surface.draw_rect(
            Rect::new(0.0, bottom_wall, self.width, self.border_width),
            self.line_color,
        );

        let center_x = self.width / 2.0;
        let mut y = self.border_width;
        while y < bottom_wall {
            let end = (y + NET_DASH).min(bottom_wall);
            surface.draw_line(
                Point::new(center_x, y),
                Point::new(center_x, end),
                self.line_color,
            );
            y += 2.0 * NET_DASH;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CommandList, DrawCommand};

    const WHITE: Rgb = Rgb(255, 255, 255);

    fn ball() -> Ball {
        Ball::new(50.0, 50.0, 5.0, WHITE, 100.0, 100.0)
    }

    #[test]
    fn test_ball_update_pos() {
        let mut ball = ball();
        ball.set_speed(1.0, 1.0);

        ball.update_pos();

        assert_eq!(ball.center_x, 51.0);
        assert_eq!(ball.center_y, 51.0);
    }

    #[test]
    fn test_ball_update_pos_not_clamped() {
        let mut ball = ball();
        ball.set_pos(98.0, 2.0);
        ball.set_speed(7.5, -4.0);

        ball.update_pos();

        assert_eq!((ball.center_x, ball.center_y), (105.5, -2.0));
    }

    #[test]
    fn test_ball_set_speed() {
        let mut ball = ball();
        ball.set_speed(2.0, 2.0);

        assert_eq!(ball.speed(), (2.0, 2.0));
    }

    #[test]
    fn test_ball_invert_move() {
        let mut ball = ball();
        ball.set_speed(2.0, 2.0);

        ball.invert_move(true, true);
        assert_eq!(ball.speed(), (-2.0, -2.0));

        ball.invert_move(true, true);
        assert_eq!(ball.speed(), (2.0, 2.0));
    }

    #[test]
    fn test_ball_invert_single_axis() {
        let mut ball = ball();
        ball.set_speed(3.0, -1.0);

        ball.invert_move(true, false);
        assert_eq!(ball.speed(), (-3.0, -1.0));

        ball.invert_move(false, true);
        assert_eq!(ball.speed(), (-3.0, 1.0));
    }

    #[test]
    fn test_ball_reset() {
        let mut ball = Ball::new(10.0, 7.0, 5.0, WHITE, 320.0, 240.0);
        ball.set_speed(-4.0, 3.0);
        ball.update_pos();

        ball.reset();

        assert_eq!((ball.center_x, ball.center_y), (160.0, 120.0));
        assert_eq!(ball.speed(), (0.0, 0.0));
    }

    #[test]
    fn test_ball_draw() {
        let mut list = CommandList::new();
        ball().draw(&mut list);

        assert_eq!(
            list.commands,
            vec![DrawCommand::Circle(Point::new(50.0, 50.0), 5.0, WHITE)]
        );
    }

    #[test]
    fn test_paddle_update_pos() {
        let mut paddle = Paddle::new(50.0, 50.0, 10.0, 40.0, WHITE, "Player 1");
        paddle.set_speed(1.0);

        paddle.update_pos();

        assert_eq!(paddle.top_y, 51.0);
        assert_eq!(paddle.top_x, 50.0);
    }

    #[test]
    fn test_paddle_moves_off_screen() {
        let mut paddle = Paddle::new(50.0, 2.0, 10.0, 40.0, WHITE, "Player 1");
        paddle.set_speed(-4.0);

        paddle.update_pos();

        assert_eq!(paddle.top_y, -2.0);
        assert!(paddle.borders().top < 0.0);
    }

    #[test]
    fn test_paddle_set_speed() {
        let mut paddle = Paddle::new(50.0, 50.0, 10.0, 40.0, WHITE, "Player 1");
        paddle.set_speed(2.0);

        assert_eq!(paddle.speed(), 2.0);
    }

    #[test]
    fn test_paddle_reset() {
        let mut paddle = Paddle::new(20.0, 30.0, 10.0, 40.0, WHITE, "Player");
        paddle.set_pos(77.0, 140.0);
        paddle.set_speed(3.0);

        paddle.reset();

        assert_eq!((paddle.top_x, paddle.top_y), (20.0, 30.0));
        assert_eq!(paddle.speed(), 3.0);
    }

    #[test]
    fn test_paddle_borders_follow_position() {
        let mut paddle = Paddle::new(20.0, 30.0, 10.0, 40.0, WHITE, "CPU");
        let before = paddle.borders();

        paddle.set_pos(100.0, 0.0);
        let after = paddle.borders();

        assert_eq!(before.left, 20.0);
        assert_eq!(before.bottom, 70.0);
        assert_eq!(after.left, 100.0);
        assert_eq!(after.right, 110.0);
        assert_eq!(after.top, 0.0);
        assert_eq!(after.center_y, 20.0);
    }

    #[test]
    fn test_field_borders() {
        let field = Field::new(320.0, 240.0, Rgb(0, 0, 0), WHITE, "Pong", 2.0);
        let borders = field.borders();

        assert_eq!(borders.top, 2.0);
        assert_eq!(borders.bottom, 238.0);
        assert_eq!(borders.left, 0.0);
        assert_eq!(borders.right, 320.0);
        assert_eq!((borders.center_x, borders.center_y), (160.0, 120.0));
    }

    #[test]
    fn test_field_draw_starts_with_fill_and_walls() {
        let field = Field::new(320.0, 240.0, Rgb(0, 0, 0), WHITE, "Pong", 2.0);
        let mut list = CommandList::new();

        field.draw(&mut list);

        assert_eq!(list.commands[0], DrawCommand::Fill(Rgb(0, 0, 0)));
        assert_eq!(
            list.commands[1],
            DrawCommand::Rect(Rect::new(0.0, 0.0, 320.0, 2.0), WHITE)
        );
        assert_eq!(
            list.commands[2],
            DrawCommand::Rect(Rect::new(0.0, 238.0, 320.0, 2.0), WHITE)
        );
        let dashes = list
            .commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line(..)))
            .count();
        assert!(dashes > 1);
    }
}
