//! Plain-text surface for terminals

use crate::display::{DisplaySurface, Labels};
use std::io::{self, Write};

/// Writes one block of labels per render
pub struct ConsoleSurface<W: Write> {
    out: W,
}

impl ConsoleSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_block(&mut self, labels: &Labels) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "---- {} ----", labels.status)?;
        writeln!(out, "{}: {}", labels.processor_heading, labels.processor_name)?;
        writeln!(out, "  {}", labels.processor_cores)?;
        writeln!(out, "  {}", labels.processor_load)?;
        writeln!(out, "  {}", labels.processor_temperature)?;
        writeln!(out, "{}", labels.gpu_heading)?;
        writeln!(out, "  {}", labels.gpu_temperature)?;
        writeln!(out, "  {}", labels.gpu_load)?;
        writeln!(out, "  {}", labels.gpu_memory_controller)?;
        writeln!(out, "  {}", labels.gpu_video_engine)?;
        writeln!(out, "  {}", labels.gpu_bus)?;
        writeln!(out, "{}", labels.memory_heading)?;
        writeln!(out, "  {}", labels.memory_total)?;
        writeln!(out, "  {}", labels.memory_free)?;
        writeln!(out, "  {}", labels.memory_load)?;
        out.flush()
    }
}

impl<W: Write> DisplaySurface for ConsoleSurface<W> {
    fn render(&mut self, labels: &Labels) {
        if let Err(e) = self.write_block(labels) {
            log::warn!("Failed to write to console: {}", e);
        }
    }
}
