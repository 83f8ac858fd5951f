//! Drawing surface boundary.
//!
//! The engine never talks to a window or terminal directly. Each frame it
//! issues drawing calls against a [`Surface`], which the client implements on
//! top of whatever it renders with. Coordinates are world units, origin at
//! the top-left of the field, y growing downwards.

use crate::types::{Point, Rect, Rgb};

/// Drawing capability consumed by the engine
pub trait Surface {
    /// Clear the whole surface with one color
    fn fill(&mut self, color: Rgb);

    /// Filled rectangle
    fn draw_rect(&mut self, rect: Rect, color: Rgb);

    /// Filled circle
    fn draw_circle(&mut self, center: Point, radius: f32, color: Rgb);

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb);

    /// Text anchored at its top-left corner
    fn draw_text(&mut self, text: &str, position: Point, color: Rgb);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(Rgb),
    Rect(Rect, Rgb),
    Circle(Point, f32, Rgb),
    Line(Point, Point, Rgb),
    Text(String, Point, Rgb),
}

/// Surface that keeps every call, in order, for later replay
#[derive(Debug, Default, Clone)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color of the most recent fill, if any
    pub fn background(&self) -> Option<Rgb> {
        self.commands.iter().rev().find_map(|command| match command {
            DrawCommand::Fill(color) => Some(*color),
            _ => None,
        })
    }
}

impl Surface for CommandList {
    fn fill(&mut self, color: Rgb) {
        // A fill hides everything drawn before it
        self.commands.clear();
        self.commands.push(DrawCommand::Fill(color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Rgb) {
        self.commands.push(DrawCommand::Rect(rect, color));
    }

    fn draw_circle(&mut self, center: Point, radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::Circle(center, radius, color));
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb) {
        self.commands.push(DrawCommand::Line(from, to, color));
    }

    fn draw_text(&mut self, text: &str, position: Point, color: Rgb) {
        self.commands
            .push(DrawCommand::Text(text.to_string(), position, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_discards_earlier_commands() {
        let mut list = CommandList::new();
        list.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Rgb(1, 2, 3));
        list.fill(Rgb(0, 0, 0));
        list.draw_circle(Point::new(5.0, 5.0), 2.0, Rgb(255, 0, 0));

        assert_eq!(
            list.commands,
            vec![
                DrawCommand::Fill(Rgb(0, 0, 0)),
                DrawCommand::Circle(Point::new(5.0, 5.0), 2.0, Rgb(255, 0, 0)),
            ]
        );
        assert_eq!(list.background(), Some(Rgb(0, 0, 0)));
    }

    #[test]
    fn test_text_is_recorded() {
        let mut list = CommandList::new();
        list.draw_text("1 : 0", Point::new(10.0, 4.0), Rgb(255, 255, 255));

        assert!(matches!(
            &list.commands[0],
            DrawCommand::Text(text, _, _) if text == "1 : 0"
        ));
        assert_eq!(list.background(), None);
    }
}
