//! Buffered file streams with the gzip layer applied per file extension.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::format::is_gzipped;

/// Opens a buffered reader over the file, decompressing when the path ends
/// in `.gz`.
pub fn open_input(path: &Path) -> io::Result<Box<dyn Read>> {
    let file = BufReader::new(File::open(path)?);
    Ok(if is_gzipped(path) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    })
}

/// A buffered map output stream, gzip-compressed when the path asks for it.
/// Call [`finish`](MapOutput::finish) to flush the compressor trailer.
pub enum MapOutput {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl MapOutput {
    pub fn finish(self) -> io::Result<()> {
        match self {
            MapOutput::Plain(mut w) => w.flush(),
            MapOutput::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for MapOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            MapOutput::Plain(w) => w.write(buf),
            MapOutput::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            MapOutput::Plain(w) => w.flush(),
            MapOutput::Gzip(w) => w.flush(),
        }
    }
}

/// Creates a buffered writer over the file, compressing when the path ends
/// in `.gz`.
pub fn create_output(path: &Path) -> io::Result<MapOutput> {
    let file = BufWriter::new(File::create(path)?);
    Ok(if is_gzipped(path) {
        MapOutput::Gzip(GzEncoder::new(file, Compression::default()))
    } else {
        MapOutput::Plain(file)
    })
}
