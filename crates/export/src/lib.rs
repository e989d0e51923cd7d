//! Export helpers for frame streams (JSON lines) and planet trails (CSV).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("filesystem error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod frames {
    use std::io::Write;

    use serde::Serialize;
    use sky_sim::render::{PanelText, RenderFrame, RenderSink, Transform};

    use crate::ExportError;

    /// Compact per-frame record; trails are exported separately as CSV.
    #[derive(Serialize)]
    struct FrameLine<'a> {
        frame: u64,
        wall_ms: f64,
        sim_ms: f64,
        dt_s: f64,
        transforms: &'a [Transform],
        panels: &'a [PanelText],
    }

    /// Writes one JSON object per frame, newline separated.
    pub struct JsonLinesSink<W: Write> {
        writer: W,
        written: u64,
    }

    impl<W: Write> JsonLinesSink<W> {
        pub fn new(writer: W) -> Self {
            Self { writer, written: 0 }
        }

        pub fn frames_written(&self) -> u64 {
            self.written
        }

        pub fn flush(&mut self) -> Result<(), ExportError> {
            self.writer.flush()?;
            Ok(())
        }

        pub fn into_inner(self) -> W {
            self.writer
        }
    }

    impl<W: Write> RenderSink for JsonLinesSink<W> {
        type Error = ExportError;

        fn submit(&mut self, frame: &RenderFrame) -> Result<(), Self::Error> {
            let line = FrameLine {
                frame: frame.frame_index,
                wall_ms: frame.time.wall_now_ms,
                sim_ms: frame.time.sim_time_ms,
                dt_s: frame.time.dt_real_s,
                transforms: &frame.transforms,
                panels: &frame.panels,
            };
            serde_json::to_writer(&mut self.writer, &line)?;
            self.writer.write_all(b"\n")?;
            self.written += 1;
            Ok(())
        }
    }
}

pub mod trails {
    use std::io::{self, Write};

    use sky_sim::render::TrailSnapshot;

    pub const HEADER: &str = "body,index,x_au,y_au,z_au";

    /// Write the standard trail CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One trail sample, scene frame (Y up, AU).
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub body: &'a str,
        pub index: usize,
        pub position: [f64; 3],
    }

    impl Record<'_> {
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{},{:.9},{:.9},{:.9}",
                self.body, self.index, self.position[0], self.position[1], self.position[2]
            )
        }
    }

    /// Header plus every sample of every trail, oldest first per body.
    pub fn write_trails(writer: &mut dyn Write, trails: &[TrailSnapshot]) -> io::Result<usize> {
        write_header(writer)?;
        let mut rows = 0;
        for trail in trails {
            for (index, point) in trail.points.iter().enumerate() {
                Record {
                    body: &trail.name,
                    index,
                    position: *point,
                }
                .write_to(writer)?;
                rows += 1;
            }
        }
        Ok(rows)
    }
}
