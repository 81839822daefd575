//! Byte-cursor primitives for the schemapack wire format.
//!
//! [`Writer`] appends big-endian values to a growable buffer; [`Reader`]
//! walks a byte slice with bounds-checked reads that fail instead of
//! panicking when the buffer runs out.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error returned by bounds-checked [`Reader`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Fewer bytes remain than the read requires.
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    /// A text payload is not valid UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,
}
