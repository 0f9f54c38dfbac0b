//! `Closer` implementations for standard library I/O handles.
//!
//! Dropping these handles already releases them, but silently discards any
//! error raised on the way out. Closing them through [`Closer`] surfaces that
//! error first; the handle itself is released when its owner drops it.

use crate::closer::Closer;
use ioclose_core::{Error, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::net::{Shutdown, TcpStream};

/// Flushes buffered data to the underlying writer.
impl<W: Write> Closer for BufWriter<W> {
    fn close(&mut self) -> Result<()> {
        self.flush().map_err(|e| Error::io("flush buffered writer", e))
    }
}

/// Syncs data and metadata to disk.
impl Closer for File {
    fn close(&mut self) -> Result<()> {
        self.sync_all().map_err(|e| Error::io("sync file", e))
    }
}

/// Shuts down both halves of the connection. A stream that is no longer
/// connected counts as closed.
impl Closer for TcpStream {
    fn close(&mut self) -> Result<()> {
        match self.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(Error::io("shut down TCP stream", e)),
        }
    }
}
