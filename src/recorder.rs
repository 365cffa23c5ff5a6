//! Offline rendering of a simulation run into an animated GIF.
//!
//! The recording replays the configured simulation with the same seed as the live view, so both
//! show the same trajectory. Each simulation step becomes one frame.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, Frame, ImageError, Rgba, RgbaImage,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::SimulationConfig,
    domain::{
        step_count, Arena, HasCollision, Position, Simulation, SimulationError, TickObserver,
        Trail,
    },
};

const FRAME_SIZE: u32 = 400;
const MARGIN: f64 = 10.0;
const ENCODING_SPEED: i32 = 10;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const WALL: Rgba<u8> = Rgba([0, 0, 0, 255]);
const TRAIL: Rgba<u8> = Rgba([255, 128, 128, 255]);
const ROBOT: Rgba<u8> = Rgba([77, 77, 255, 255]);

/// Records the configured simulation to a GIF file and returns the finished simulation.
pub fn record(config: &SimulationConfig, path: &Path) -> Result<Simulation, RecordError> {
    let file = File::create(path)?;
    let simulation = record_to(config, BufWriter::new(file))?;
    info!(path = %path.display(), "saved animation");
    Ok(simulation)
}

/// Writes the animation to `writer` and flushes it once the GIF trailer is written.
pub fn record_to<W: Write>(
    config: &SimulationConfig,
    mut writer: W,
) -> Result<Simulation, RecordError> {
    let frames = step_count(config.duration, config.dt);
    if frames == 0 {
        warn!(
            duration = config.duration,
            dt = config.dt,
            "duration is shorter than one time step, the animation has no frames"
        );
    }

    let mut simulation = config.simulation();
    let delay = Delay::from_numer_denom_ms((config.dt * 1000.0).round() as u32, 1);
    let mut recorder = Recorder::new(&mut writer, Trail::new(config.trail_length), delay)?;

    simulation.run(config.duration, config.dt, Some(&mut recorder))?;
    recorder.finish()?;
    writer.flush()?;

    Ok(simulation)
}

struct Recorder<W: Write> {
    encoder: GifEncoder<W>,
    trail: Trail,
    delay: Delay,
    error: Option<ImageError>,
}

impl<W: Write> Recorder<W> {
    fn new(writer: W, trail: Trail, delay: Delay) -> Result<Self, RecordError> {
        let mut encoder = GifEncoder::new_with_speed(writer, ENCODING_SPEED);
        encoder.set_repeat(Repeat::Infinite)?;
        Ok(Self {
            encoder,
            trail,
            delay,
            error: None,
        })
    }

    /// Writes the GIF trailer and reports the first encoding error, if any.
    fn finish(self) -> Result<(), RecordError> {
        let Self { encoder, error, .. } = self;
        drop(encoder);
        match error {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}

impl<W: Write> TickObserver for Recorder<W> {
    fn on_tick(&mut self, simulation: &Simulation) {
        if self.error.is_some() {
            return;
        }
        if let Some(agent) = simulation.agent() {
            self.trail.push(agent.position());
        }
        let frame = Frame::from_parts(render_frame(simulation, &self.trail), 0, 0, self.delay);
        if let Err(error) = self.encoder.encode_frame(frame) {
            self.error = Some(error);
        }
    }
}

/// Draws the arena walls, the trail and the robot.
pub fn render_frame(simulation: &Simulation, trail: &Trail) -> RgbaImage {
    let mut canvas = Canvas::new(simulation.arena(), FRAME_SIZE);

    canvas.draw_walls(simulation.arena());

    if !trail.is_empty() {
        let points = trail.positions().map(|p| canvas.to_pixel(p)).collect::<Vec<_>>();
        for segment in points.windows(2) {
            canvas.draw_line(segment[0], segment[1], TRAIL);
        }
    }

    if let Some(agent) = simulation.agent() {
        let shape = agent.shape();
        let center = canvas.to_pixel(shape.position());
        canvas.fill_circle(center, shape.radius() * canvas.scale, ROBOT);
    }

    canvas.image
}

struct Canvas {
    image: RgbaImage,
    scale: f64,
}

impl Canvas {
    fn new(arena: &Arena, size: u32) -> Self {
        let scale = (size as f64 - 2.0 * MARGIN) / arena.width().max(arena.height());
        let width = (arena.width() * scale + 2.0 * MARGIN).round() as u32;
        let height = (arena.height() * scale + 2.0 * MARGIN).round() as u32;
        Self {
            image: RgbaImage::from_pixel(width.max(1), height.max(1), BACKGROUND),
            scale,
        }
    }

    /// Image coordinates have their origin in the top left corner, arena coordinates in the
    /// bottom left corner.
    fn to_pixel(&self, position: Position) -> (f64, f64) {
        let (x, y): (f64, f64) = position.into();
        (
            MARGIN + x * self.scale,
            self.image.height() as f64 - MARGIN - y * self.scale,
        )
    }

    fn draw_walls(&mut self, arena: &Arena) {
        let corners = [
            Position::new(0.0, 0.0),
            Position::new(arena.width(), 0.0),
            Position::new(arena.width(), arena.height()),
            Position::new(0.0, arena.height()),
        ]
        .map(|p| self.to_pixel(p));

        for (i, &from) in corners.iter().enumerate() {
            let to = corners[(i + 1) % corners.len()];
            self.draw_line(from, to, WALL);
            // Second pixel row on the outside of the wall
            let (dx, dy) = outward(from, to);
            self.draw_line((from.0 + dx, from.1 + dy), (to.0 + dx, to.1 + dy), WALL);
        }
    }

    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba<u8>) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.put(
                (from.0 + t * dx).round() as i64,
                (from.1 + t * dy).round() as i64,
                color,
            );
        }
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Rgba<u8>) {
        let extent = radius.ceil() as i64;
        let (cx, cy) = (center.0.round() as i64, center.1.round() as i64);
        for dy in -extent..=extent {
            for dx in -extent..=extent {
                if ((dx * dx + dy * dy) as f64).sqrt() <= radius {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && x < self.image.width() as i64 && y < self.image.height() as i64 {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Unit offset perpendicular to a wall, pointing away from the arena. Walls run clockwise in
/// image coordinates.
fn outward(from: (f64, f64), to: (f64, f64)) -> (f64, f64) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    if length == 0.0 {
        return (0.0, 0.0);
    }
    (-dy / length, dx / length)
}

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("failed to write animation: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode animation: {0}")]
    Image(#[from] ImageError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{codecs::gif::GifDecoder, AnimationDecoder};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::{Agent, AgentConfig, Velocity};

    #[test]
    fn test_render_frame() {
        let mut simulation = Simulation::new(Arena::new(100.0, 100.0), 0);
        simulation.attach(Agent::new(
            Position::new(50.0, 50.0),
            AgentConfig::new(2.0, Velocity::new(10.0)),
        ));
        let mut trail = Trail::new(10);
        trail.push(Position::new(20.0, 50.0));
        trail.push(Position::new(40.0, 50.0));

        let image = render_frame(&simulation, &trail);

        assert_eq!(image.dimensions(), (FRAME_SIZE, FRAME_SIZE));
        assert_eq!(*image.get_pixel(200, 200), ROBOT);
        assert_eq!(*image.get_pixel(205, 200), ROBOT);
        assert_eq!(*image.get_pixel(120, 200), TRAIL);
        assert_eq!(*image.get_pixel(10, 100), WALL);
        assert_eq!(*image.get_pixel(9, 100), WALL);
        assert_eq!(*image.get_pixel(100, 390), WALL);
        assert_eq!(*image.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*image.get_pixel(300, 300), BACKGROUND);
    }

    #[test]
    fn test_render_frame_rectangular_arena() {
        let simulation = Simulation::new(Arena::new(100.0, 50.0), 0);
        let image = render_frame(&simulation, &Trail::new(0));
        assert_eq!(image.dimensions(), (FRAME_SIZE, 210));
    }

    #[test]
    fn test_record_to() {
        let config = SimulationConfig {
            duration: 1.0,
            dt: 0.25,
            arena: Arena::new(20.0, 20.0),
            agent: AgentConfig::new(1.0, Velocity::new(5.0)),
            trail_length: 3,
            seed: 5,
        };
        let mut buffer = vec![];

        let simulation = record_to(&config, &mut buffer).unwrap();

        assert_eq!(&buffer[..6], b"GIF89a");
        let frames = GifDecoder::new(Cursor::new(buffer))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].delay().numer_denom_ms(), (250, 1));
        assert_eq!(simulation.time(), 1.0);
    }

    struct FailingFlush(Vec<u8>);

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    #[test]
    fn test_record_to_reports_failed_flush() {
        let config = SimulationConfig {
            duration: 0.5,
            dt: 0.25,
            arena: Arena::new(20.0, 20.0),
            agent: AgentConfig::new(1.0, Velocity::new(5.0)),
            trail_length: 3,
            seed: 5,
        };

        let error = record_to(&config, FailingFlush(vec![])).unwrap_err();

        assert!(error.to_string().contains("disk full"), "{error}");
    }

    #[test]
    fn test_outward() {
        assert_eq!(outward((10.0, 390.0), (390.0, 390.0)), (0.0, 1.0));
        assert_eq!(outward((390.0, 10.0), (10.0, 10.0)), (0.0, -1.0));
    }
}
