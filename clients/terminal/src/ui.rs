use crate::app::App;
use pong_core::{CommandList, DrawCommand, Rgb};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
        Block, BorderType, Paragraph, Widget,
    },
};

/// Field area smaller than this shows a resize hint instead of the field
const MIN_GAME_WIDTH: u16 = 40;
const MIN_GAME_HEIGHT: u16 = 14;

const HEADER_HEIGHT: u16 = 3;
const CONTROLS_HEIGHT: u16 = 1;

/// Terminal cells are about twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Spacing of the scan lines that fill rectangles and circles, world units
const FILL_STEP: f32 = 1.0;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),   // Title and status
                Constraint::Min(5),                  // Field
                Constraint::Length(CONTROLS_HEIGHT), // Controls
            ])
            .split(area);

        let field = self.session.field();
        let header = Paragraph::new(self.session.status_string())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(field.title.as_str())
                    .title_alignment(Alignment::Center),
            );
        header.render(chunks[0], buf);

        if let Some(message) = size_warning(area) {
            Paragraph::new(message)
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);
        } else {
            let game_area = fit_field(chunks[1], field.width, field.height);
            FieldView {
                frame: &self.frame,
                width: field.width,
                height: field.height,
            }
            .render(game_area, buf);
        }

        let controls = format!(
            "↑/↓ or W/S: move   Q/ESC: quit   Input: {}",
            self.keys.mode_description()
        );
        Paragraph::new(controls)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

/// Resize hint for a terminal too small to hold the field, in whole
/// terminal dimensions
pub fn size_warning(area: Rect) -> Option<String> {
    let min_height = MIN_GAME_HEIGHT + HEADER_HEIGHT + CONTROLS_HEIGHT;
    if area.width >= MIN_GAME_WIDTH && area.height >= min_height {
        return None;
    }
    Some(format!(
        "Terminal too small!\n\nMinimum required: {}×{}\nCurrent size: {}×{}",
        MIN_GAME_WIDTH, min_height, area.width, area.height
    ))
}

/// Largest area inside `area` (borders included) whose cells show a
/// `width` x `height` field undistorted, centered
pub fn fit_field(area: Rect, width: f32, height: f32) -> Rect {
    let inner_w = area.width.saturating_sub(2) as f32;
    let inner_h = area.height.saturating_sub(2) as f32;
    let ratio = width / height * CELL_ASPECT;

    let (w, h) = if inner_w / inner_h > ratio {
        (inner_h * ratio, inner_h)
    } else {
        (inner_w, inner_w / ratio)
    };
    let w = (w.round() as u16).saturating_add(2).min(area.width);
    let h = (h.round() as u16).saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Paints recorded drawing calls on a braille canvas
pub struct FieldView<'a> {
    pub frame: &'a CommandList,
    pub width: f32,
    pub height: f32,
}

impl FieldView<'_> {
    /// World y grows downwards, canvas y upwards
    fn flip(&self, y: f32) -> f64 {
        f64::from(self.height - y)
    }

    fn paint(&self, ctx: &mut Context) {
        for command in &self.frame.commands {
            match command {
                DrawCommand::Fill(_) => {}
                DrawCommand::Rect(rect, rgb) => {
                    let mut y = rect.y;
                    let bottom = rect.y + rect.height;
                    while y <= bottom {
                        ctx.draw(&CanvasLine::new(
                            f64::from(rect.x),
                            self.flip(y),
                            f64::from(rect.x + rect.width),
                            self.flip(y),
                            color(*rgb),
                        ));
                        y += FILL_STEP;
                    }
                }
                DrawCommand::Circle(center, radius, rgb) => {
                    let (x, y) = (f64::from(center.x), self.flip(center.y));
                    let mut r = *radius;
                    while r > 0.0 {
                        ctx.draw(&Circle {
                            x,
                            y,
                            radius: f64::from(r),
                            color: color(*rgb),
                        });
                        r -= FILL_STEP;
                    }
                    ctx.draw(&Points {
                        coords: &[(x, y)],
                        color: color(*rgb),
                    });
                }
                DrawCommand::Line(from, to, rgb) => {
                    ctx.draw(&CanvasLine::new(
                        f64::from(from.x),
                        self.flip(from.y),
                        f64::from(to.x),
                        self.flip(to.y),
                        color(*rgb),
                    ));
                }
                DrawCommand::Text(text, position, rgb) => {
                    ctx.print(
                        f64::from(position.x),
                        self.flip(position.y),
                        Span::styled(text.clone(), Style::default().fg(color(*rgb))),
                    );
                }
            }
        }
    }
}

impl Widget for FieldView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = self.frame.background().map(color).unwrap_or(Color::Reset);

        Canvas::default()
            .block(Block::bordered().border_type(BorderType::Rounded))
            .marker(Marker::Braille)
            .background_color(background)
            .x_bounds([0.0, f64::from(self.width)])
            .y_bounds([0.0, f64::from(self.height)])
            .paint(|ctx| self.paint(ctx))
            .render(area, buf);
    }
}
