//! Binary buffer writer over a growable byte vector.

/// Appends big-endian values to an internal byte buffer.
///
/// # Example
///
/// ```
/// use schemapack_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u16(0x0203);
/// assert_eq!(writer.flush(), [0x01, 0x02, 0x03]);
/// ```
#[derive(Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a writer with `capacity` bytes preallocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether no bytes have been written since the last flush.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the written bytes and resets the writer.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Writes a signed 8-bit integer.
    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.buf.push(val as u8);
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 16-bit integer (big-endian).
    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 32-bit integer (big-endian).
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 64-bit integer (big-endian).
    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 64-bit integer (big-endian).
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 32-bit floating point number (big-endian).
    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 64-bit floating point number (big-endian).
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a UTF-8 string. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        let bytes = s.as_bytes();
        self.buf.extend_from_slice(bytes);
        bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x01, 0x02]);
    }

    #[test]
    fn test_u16_big_endian() {
        let mut writer = Writer::new();
        writer.u16(0x0102);
        assert_eq!(writer.flush(), [0x01, 0x02]);
    }

    #[test]
    fn test_u32_big_endian() {
        let mut writer = Writer::new();
        writer.u32(0x01020304);
        assert_eq!(writer.flush(), [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_i8_negative() {
        let mut writer = Writer::new();
        writer.i8(-1);
        assert_eq!(writer.flush(), [0xff]);
    }

    #[test]
    fn test_i16_roundtrip() {
        let mut writer = Writer::new();
        writer.i16(-1000);
        let data = writer.flush();
        assert_eq!(i16::from_be_bytes([data[0], data[1]]), -1000);
    }

    #[test]
    fn test_i64_roundtrip() {
        let mut writer = Writer::new();
        writer.i64(-9_999_999_999);
        let data = writer.flush();
        assert_eq!(data.len(), 8);
        assert_eq!(
            i64::from_be_bytes(data.try_into().unwrap()),
            -9_999_999_999
        );
    }

    #[test]
    fn test_f64_bits() {
        let mut writer = Writer::new();
        writer.f64(1.0);
        assert_eq!(writer.flush(), 1.0f64.to_be_bytes());
    }

    #[test]
    fn test_utf8() {
        let mut writer = Writer::new();
        let n = writer.utf8("café");
        let data = writer.flush();
        assert_eq!(n, data.len());
        assert_eq!(std::str::from_utf8(&data).unwrap(), "café");
    }

    #[test]
    fn test_flush_resets() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        assert_eq!(writer.flush(), [0x01]);
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x02]);
    }

    #[test]
    fn test_buf() {
        let mut writer = Writer::new();
        writer.buf(&[1, 2, 3]);
        assert_eq!(writer.len(), 3);
        assert_eq!(writer.flush(), [1, 2, 3]);
    }
}
