//! Frame output: glyph rows or JSON lines.

use cellclock_core::{OutputFormat, RenderConfig, SimTime};
use cellclock_world::Frame;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct FrameRecord {
    time: SimTime,
    alive: usize,
    rows: Vec<Vec<bool>>,
}

pub struct Renderer<W: Write> {
    config: RenderConfig,
    out: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(config: RenderConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn render(&mut self, frame: &Frame) -> io::Result<()> {
        match self.config.format {
            OutputFormat::Terminal => self.render_terminal(frame)?,
            OutputFormat::JsonLines => self.render_json(frame)?,
        }
        self.out.flush()
    }

    fn render_terminal(&mut self, frame: &Frame) -> io::Result<()> {
        // Cursor home, so each frame overdraws the previous one.
        write!(self.out, "\x1b[H")?;
        for row in frame.matrix.rows() {
            let line: String = row
                .iter()
                .map(|&alive| {
                    if alive {
                        self.config.alive_glyph
                    } else {
                        self.config.dead_glyph
                    }
                })
                .collect();
            writeln!(self.out, "{}", line)?;
        }
        writeln!(
            self.out,
            "total lives: {}, time frame: {}",
            frame.alive_count(),
            frame.time
        )
    }

    fn render_json(&mut self, frame: &Frame) -> io::Result<()> {
        let record = FrameRecord {
            time: frame.time,
            alive: frame.alive_count(),
            rows: frame.matrix.rows().map(<[bool]>::to_vec).collect(),
        };
        serde_json::to_writer(&mut self.out, &record)?;
        writeln!(self.out)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
