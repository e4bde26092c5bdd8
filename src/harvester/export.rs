// CSV export of flattened (video, link) rows

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::HarvestError;
use super::models::{ExportRow, VideoRecord};

/// Default destination, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "./output/playlist_extracted_links.csv";

/// Text encoding of the export file, fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    #[serde(alias = "utf-8")]
    Utf8,
    /// Little-endian with byte order mark
    #[serde(alias = "utf-16")]
    Utf16,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "utf-8"),
            Self::Utf16 => write!(f, "utf-16"),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "utf16" | "utf-16" | "utf-16le" => Ok(Self::Utf16),
            other => Err(format!("unsupported encoding '{}' (expected utf8 or utf16)", other)),
        }
    }
}

/// Re-encodes the UTF-8 stream produced by the CSV writer
pub struct EncodedWriter<W: Write> {
    inner: W,
    encoding: Encoding,
    // Incomplete UTF-8 sequence carried over between writes
    pending: Vec<u8>,
}

impl<W: Write> EncodedWriter<W> {
    pub fn new(mut inner: W, encoding: Encoding) -> io::Result<Self> {
        if encoding == Encoding::Utf16 {
            inner.write_all(&[0xFF, 0xFE])?;
        }
        Ok(Self {
            inner,
            encoding,
            pending: Vec::new(),
        })
    }

    fn write_utf16(&mut self, buf: &[u8]) -> io::Result<()> {
        self.pending.extend_from_slice(buf);

        let valid = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        };

        let encoded: Vec<u8> = std::str::from_utf8(&self.pending[..valid])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
            .encode_utf16()
            .flat_map(u16::to_le_bytes)
            .collect();

        self.inner.write_all(&encoded)?;
        self.pending.drain(..valid);
        Ok(())
    }
}

impl<W: Write> Write for EncodedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.encoding {
            Encoding::Utf8 => self.inner.write_all(buf)?,
            Encoding::Utf16 => self.write_utf16(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Where and how to write the export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub path: PathBuf,
    pub encoding: Encoding,
    pub include_title: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
            encoding: Encoding::Utf8,
            include_title: true,
        }
    }
}

/// Open CSV export; rows are written as they arrive
pub struct CsvExport {
    writer: csv::Writer<EncodedWriter<BufWriter<File>>>,
    path: PathBuf,
    include_title: bool,
    rows: usize,
}

impl CsvExport {
    /// Create the destination (and its directory) and write the header row
    pub fn create(options: &ExportOptions) -> Result<Self, HarvestError> {
        let path = options.path.clone();
        let file = Self::open(&path).map_err(|source| HarvestError::ExportWrite {
            path: path.clone(),
            source,
        })?;
        let encoded = EncodedWriter::new(BufWriter::new(file), options.encoding).map_err(
            |source| HarvestError::ExportWrite {
                path: path.clone(),
                source,
            },
        )?;

        let writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(encoded);

        let mut export = Self {
            writer,
            path,
            include_title: options.include_title,
            rows: 0,
        };
        export.write_header()?;
        Ok(export)
    }

    fn open(path: &Path) -> io::Result<File> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        File::create(path)
    }

    fn write_header(&mut self) -> Result<(), HarvestError> {
        let result = if self.include_title {
            self.writer.write_record(["video_url", "title", "text", "link"])
        } else {
            self.writer.write_record(["video_url", "text", "link"])
        };
        result.map_err(|e| self.write_error(e.into()))
    }

    pub fn write_row(&mut self, row: ExportRow<'_>) -> Result<(), HarvestError> {
        let result = if self.include_title {
            self.writer
                .write_record([row.video_ref.as_str(), row.title, row.text, row.link])
        } else {
            self.writer
                .write_record([row.video_ref.as_str(), row.text, row.link])
        };
        result.map_err(|e| self.write_error(e.into()))?;
        self.rows += 1;
        Ok(())
    }

    /// Write every link of the record, returns the number of rows written
    pub fn write_record(&mut self, record: &VideoRecord) -> Result<usize, HarvestError> {
        for row in record.rows() {
            self.write_row(row)?;
        }
        Ok(record.links.len())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush everything to disk and return the data row count
    pub fn finish(mut self) -> Result<usize, HarvestError> {
        self.writer
            .flush()
            .map_err(|e| self.write_error(e))?;
        Ok(self.rows)
    }

    fn write_error(&self, source: io::Error) -> HarvestError {
        HarvestError::ExportWrite {
            path: self.path.clone(),
            source,
        }
    }
}
