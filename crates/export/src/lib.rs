//! Export helpers: JSON-lines reports and the CSV position logbook.

use thiserror::Error;

/// Errors raised while writing reports or log rows.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub mod reports {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use serde::Serialize;

    use super::ExportError;

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

    /// One JSON object per line, flushed as soon as it is written.
    pub struct JsonLines<W: Write> {
        inner: W,
        written: usize,
    }

    impl<W: Write> JsonLines<W> {
        pub fn new(inner: W) -> Self {
            Self { inner, written: 0 }
        }

        pub fn write<T: Serialize>(&mut self, record: &T) -> Result<(), ExportError> {
            serde_json::to_writer(&mut self.inner, record)?;
            self.inner.write_all(b"\n")?;
            self.inner.flush()?;
            self.written += 1;
            Ok(())
        }

        /// Number of records written so far.
        pub fn written(&self) -> usize {
            self.written
        }

        pub fn into_inner(self) -> W {
            self.inner
        }
    }
}

pub mod logbook {
    use std::fs::{self, File, OpenOptions};
    use std::path::Path;

    use csv::{Writer, WriterBuilder};
    use scnav_core::Vector;

    use super::ExportError;

    pub const HEADER: [&str; 16] = [
        "Key",
        "System",
        "Global_X",
        "Global_Y",
        "Global_Z",
        "Container",
        "Local_X",
        "Local_Y",
        "Local_Z",
        "Longitude",
        "Latitude",
        "Height",
        "Time",
        "Readable_Time",
        "Player",
        "Comment",
    ];

    /// Marker row written at the start of every session.
    pub const NEW_RUN: &str = "New_Run";

    /// Body-relative part of a log row.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct SurfaceFix<'a> {
        pub container: &'a str,
        pub local: Vector,
        pub longitude: f64,
        pub latitude: f64,
        pub height: f64,
    }

    /// One logged position.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Entry<'a> {
        pub system: &'a str,
        pub global: Vector,
        pub surface: Option<SurfaceFix<'a>>,
        /// Unix seconds.
        pub time: f64,
        pub readable_time: &'a str,
        pub player: &'a str,
        pub comment: &'a str,
    }

    /// Append-only CSV log of player positions.
    pub struct Logbook {
        writer: Writer<File>,
        next_key: u64,
    }

    impl Logbook {
        /// Open `path` for appending, writing the header if the file is new,
        /// followed by a [`NEW_RUN`] marker row.
        pub fn open(path: &Path) -> Result<Self, ExportError> {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let is_new = !path.exists();
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_writer(file);
            if is_new {
                writer.write_record(HEADER)?;
            }
            writer.write_record([NEW_RUN])?;
            writer.flush()?;
            Ok(Self {
                writer,
                next_key: 1,
            })
        }

        /// Append one position. Keys count up from 1 within a run.
        pub fn append(&mut self, entry: &Entry<'_>) -> Result<u64, ExportError> {
            let key = self.next_key;
            let surface = entry.surface.as_ref();
            let number = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
            let row = [
                key.to_string(),
                entry.system.to_string(),
                entry.global.x.to_string(),
                entry.global.y.to_string(),
                entry.global.z.to_string(),
                surface.map(|s| s.container.to_string()).unwrap_or_default(),
                number(surface.map(|s| s.local.x)),
                number(surface.map(|s| s.local.y)),
                number(surface.map(|s| s.local.z)),
                number(surface.map(|s| s.longitude)),
                number(surface.map(|s| s.latitude)),
                number(surface.map(|s| s.height)),
                entry.time.to_string(),
                entry.readable_time.to_string(),
                entry.player.to_string(),
                entry.comment.to_string(),
            ];
            self.writer.write_record(&row)?;
            self.writer.flush()?;
            self.next_key += 1;
            Ok(key)
        }
    }
}
