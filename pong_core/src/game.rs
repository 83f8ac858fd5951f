//! Main game logic and state management.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::{Config, ConfigError};
use crate::entities::{Ball, Field, Paddle};
use crate::physics::Physics;
use crate::render::Surface;
use crate::types::*;

/// Height of one line of score text, in world units
const TEXT_LINE: f32 = 12.0;

/// One game of Pong: a field, a ball, the player's paddle on the right and
/// the computer's on the left
pub struct GameSession {
    config: Config,
    field: Field,
    ball: Ball,
    player: Paddle,
    computer: Paddle,
    stats: Stats,
    rng: StdRng,
}

impl GameSession {
    /// Create a new session and serve the first ball
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let field_cfg = &config.field;
        let (width, height) = (field_cfg.width, field_cfg.height);
        let field = Field::new(
            width,
            height,
            config.color(&field_cfg.background_color)?,
            config.color(&field_cfg.line_color)?,
            field_cfg.title.clone(),
            field_cfg.border_width,
        );

        let ball = Ball::new(
            width / 2.0,
            height / 2.0,
            config.ball.radius,
            config.color(&config.ball.color)?,
            width,
            height,
        );

        let computer = Paddle::new(
            config.paddle_inset,
            (height - config.cpu.height) / 2.0,
            config.cpu.width,
            config.cpu.height,
            config.color(&config.cpu.color)?,
            config.cpu.name.clone(),
        );

        let player = Paddle::new(
            width - config.paddle_inset - config.player.width,
            (height - config.player.height) / 2.0,
            config.player.width,
            config.player.height,
            config.color(&config.player.color)?,
            config.player.name.clone(),
        );

        let stats = Stats::new(
            (config.default_ball_speed, config.default_ball_speed),
            config.cpu_speed,
        );
        let rng = StdRng::seed_from_u64(config.seed);

        let mut session = GameSession {
            config,
            field,
            ball,
            player,
            computer,
            stats,
            rng,
        };
        session.serve();

        info!(
            title = %session.field.title,
            max_score = session.config.max_score,
            "session started"
        );
        Ok(session)
    }

    /// Run one tick with the input events collected since the last one
    pub fn step(&mut self, inputs: &[InputEvent]) -> Outcome {
        if let Some(winner) = self.stats.winner {
            return Outcome::GameOver(winner);
        }

        for event in inputs {
            if *event == InputEvent::Quit {
                info!("quit requested");
                return Outcome::Quit;
            }
            self.apply_input(*event);
        }

        self.move_computer();
        self.step_physics();
        self.resolve_collisions();

        match self.check_end_game() {
            Some(winner) => Outcome::GameOver(winner),
            None => Outcome::Continue,
        }
    }

    /// Turn a key event into a player paddle speed. Keys other than up and
    /// down are ignored.
    pub fn apply_input(&mut self, event: InputEvent) {
        let speed = self.config.player_speed;
        match event {
            InputEvent::KeyDown(Key::Up) => self.player.set_speed(-speed),
            InputEvent::KeyDown(Key::Down) => self.player.set_speed(speed),
            InputEvent::KeyUp(Key::Up) | InputEvent::KeyUp(Key::Down) => {
                self.player.set_speed(0.0)
            }
            _ => {}
        }
    }

    /// Let the computer pick its paddle speed for this tick
    pub fn move_computer(&mut self) {
        let speed = Physics::chase_ball(
            &self.computer,
            &self.ball,
            &self.field,
            self.stats.cpu_speed,
            self.config.ai_dead_zone,
            self.config.ai_deceleration,
        );
        self.computer.set_speed(speed);
    }

    /// Advance the ball and both paddles by their speeds
    pub fn step_physics(&mut self) {
        self.ball.update_pos();
        self.player.update_pos();
        self.computer.update_pos();
    }

    /// Paddle hits, then goals, then walls. Returns the scoring side.
    ///
    /// A ball still inside a paddle's band can't be past its outer edge, so
    /// hits and goals only compete when the ball swept through a paddle this
    /// tick. The paddle wins that case.
    pub fn resolve_collisions(&mut self) -> Option<Side> {
        if Physics::check_paddle_hit(&mut self.ball, &self.computer, Side::Cpu)
            || Physics::check_paddle_hit(&mut self.ball, &self.player, Side::Player)
        {
            debug!(x = self.ball.center_x, y = self.ball.center_y, "paddle hit");
        }

        if let Some(scorer) = Physics::check_goal(&self.ball, &self.computer, &self.player) {
            self.handle_goal(scorer);
            return Some(scorer);
        }

        Physics::bounce_walls(&mut self.ball, &self.field);

        None
    }

    /// Record the winner once either side reaches the max score
    pub fn check_end_game(&mut self) -> Option<Side> {
        let max_score = self.config.max_score;
        let winner = if self.stats.cpu_score >= max_score {
            Some(Side::Cpu)
        } else if self.stats.player_score >= max_score {
            Some(Side::Player)
        } else {
            None
        };

        if winner.is_some() && self.stats.winner.is_none() {
            info!(
                player = self.stats.player_score,
                cpu = self.stats.cpu_score,
                ?winner,
                "game over"
            );
        }
        if winner.is_some() {
            self.stats.winner = winner;
        }
        winner
    }

    /// Put the ball and both paddles back where they started. Scores and
    /// level are kept.
    pub fn reset_game(&mut self) {
        self.ball.reset();
        self.player.reset();
        self.computer.reset();
        if self.config.stop_paddles_on_serve {
            self.player.set_speed(0.0);
            self.computer.set_speed(0.0);
        }
    }

    /// Draw the whole frame
    pub fn render(&self, surface: &mut impl Surface) {
        self.field.draw(surface);
        self.ball.draw(surface);
        self.player.draw(surface);
        self.computer.draw(surface);

        let color = self.field.line_color;
        let top = self.field.border_width + TEXT_LINE / 2.0;
        let quarter = self.field.width / 4.0;
        surface.draw_text(
            &format!("{}: {}", self.computer.name, self.stats.cpu_score),
            Point::new(quarter, top),
            color,
        );
        surface.draw_text(
            &format!("{}: {}", self.player.name, self.stats.player_score),
            Point::new(3.0 * quarter, top),
            color,
        );
        surface.draw_text(
            &format!("Level {}", self.stats.level),
            Point::new(self.field.width / 2.0 + TEXT_LINE / 2.0, top + TEXT_LINE),
            color,
        );
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn player(&self) -> &Paddle {
        &self.player
    }

    pub fn computer(&self) -> &Paddle {
        &self.computer
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Get a human-readable status string
    pub fn status_string(&self) -> String {
        match self.stats.winner {
            None => format!("Level {}", self.stats.level),
            Some(Side::Player) => format!("{} wins!", self.player.name),
            Some(Side::Cpu) => format!("{} wins!", self.computer.name),
        }
    }

    fn handle_goal(&mut self, scorer: Side) {
        match scorer {
            Side::Player => self.stats.player_score += 1,
            Side::Cpu => self.stats.cpu_score += 1,
        }
        info!(
            ?scorer,
            player = self.stats.player_score,
            cpu = self.stats.cpu_score,
            "goal"
        );

        self.update_game_speed();
        self.reset_game();
        self.serve();
    }

    /// Every goal raises the level and speeds up the ball and the computer
    fn update_game_speed(&mut self) {
        let increment = self.config.cpu_speed_increment;

        self.stats.last_diff = self.stats.diff();
        self.stats.level += 1;
        self.stats.serve_speed.0 += increment;
        self.stats.serve_speed.1 += increment;
        self.stats.cpu_speed += increment;

        info!(
            level = self.stats.level,
            diff = self.stats.last_diff,
            cpu_speed = self.stats.cpu_speed,
            "level up"
        );
    }

    /// Ball to the center, moving at the serve speed in a random direction
    fn serve(&mut self) {
        self.ball.reset();

        let (speed_x, speed_y) = self.stats.serve_speed;
        let dir_x = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let dir_y = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.set_speed(dir_x * speed_x, dir_y * speed_y);

        debug!(speed_x = self.ball.speed_x, speed_y = self.ball.speed_y, "serve");
    }
}
