use std::borrow::Cow;
use std::str;

use crate::error::ParcelError;

/// A flattened payload written by a [`Parcelable`](crate::Parcelable) type.
///
/// Integers use a zigzag variable-length encoding, floats store the exponent
/// in the first byte so zero fits in a single byte, and strings are UTF-8
/// terminated by a zero byte.
///
/// ```
/// let mut parcel = intention_schema::Parcel::new();
/// parcel.write_string("🍕");
/// parcel.write_var_float(123.456);
/// assert_eq!(parcel.as_bytes(), [240, 159, 141, 149, 0, 133, 242, 210, 237]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Parcel {
    data: Vec<u8>,
}

impl Parcel {
    /// Creates an empty parcel ready for writing.
    pub fn new() -> Parcel {
        Parcel { data: vec![] }
    }

    /// Wraps bytes previously produced by [`Parcel::into_bytes`].
    pub fn from_bytes(data: Vec<u8>) -> Parcel {
        Parcel { data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Starts reading this parcel from its first byte.
    pub fn reader(&self) -> ParcelReader<'_> {
        ParcelReader::new(&self.data)
    }

    pub fn write_bool(&mut self, value: bool) {
        self.data.push(if value { 1 } else { 0 });
    }

    pub fn write_byte(&mut self, value: u8) {
        self.data.push(value);
    }

    /// Write a variable-length signed 32-bit integer.
    pub fn write_var_int(&mut self, value: i32) {
        self.write_var_uint(((value << 1) ^ (value >> 31)) as u32);
    }

    /// Write a variable-length unsigned 32-bit integer.
    pub fn write_var_uint(&mut self, mut value: u32) {
        loop {
            let byte = value as u8 & 127;
            value >>= 7;

            if value == 0 {
                self.write_byte(byte);
                return;
            }

            self.write_byte(byte | 128);
        }
    }

    /// Write a variable-length 32-bit floating-point number.
    pub fn write_var_float(&mut self, value: f32) {
        let mut bits = value.to_bits();

        // Move the exponent to the first 8 bits
        bits = (bits >> 23) | (bits << 9);

        // Zero and denormals take a single byte
        if (bits & 255) == 0 {
            self.data.push(0);
            return;
        }

        self.data.extend_from_slice(&[
            bits as u8,
            (bits >> 8) as u8,
            (bits >> 16) as u8,
            (bits >> 24) as u8,
        ]);
    }

    /// Write a 64-bit float as its raw little-endian bits.
    pub fn write_f64(&mut self, value: f64) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_string(&mut self, value: &str) {
        self.data.extend_from_slice(value.as_bytes());
        self.data.push(0);
    }

    /// Write a variable-length signed 64-bit integer.
    pub fn write_var_int64(&mut self, value: i64) {
        self.write_var_uint64(((value << 1) ^ (value >> 63)) as u64);
    }

    /// Write a variable-length unsigned 64-bit integer.
    pub fn write_var_uint64(&mut self, mut value: u64) {
        let mut i = 0;
        while value > 127 && i < 8 {
            self.write_byte((value as u8 & 127) | 128);
            value >>= 7;
            i += 1;
        }
        self.write_byte(value as u8);
    }
}

/// Cursor over the bytes of a [`Parcel`].
pub struct ParcelReader<'a> {
    data: &'a [u8],
    index: usize,
}

impl<'a> ParcelReader<'a> {
    pub fn new(data: &'a [u8]) -> ParcelReader<'a> {
        ParcelReader { data, index: 0 }
    }

    /// Current read position. Ends up as the data length when everything has
    /// been read.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.data.len()
    }

    pub fn read_bool(&mut self) -> Result<bool, ParcelError> {
        match self.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ParcelError::InvalidBool(other)),
        }
    }

    pub fn read_byte(&mut self) -> Result<u8, ParcelError> {
        match self.data.get(self.index) {
            Some(&value) => {
                self.index += 1;
                Ok(value)
            }
            None => Err(ParcelError::UnexpectedEnd(self.index)),
        }
    }

    pub fn read_var_int(&mut self) -> Result<i32, ParcelError> {
        let value = self.read_var_uint()?;
        Ok((if (value & 1) != 0 {
            !(value >> 1)
        } else {
            value >> 1
        }) as i32)
    }

    pub fn read_var_uint(&mut self) -> Result<u32, ParcelError> {
        let mut shift: u8 = 0;
        let mut result: u32 = 0;

        loop {
            let byte = self.read_byte()?;
            result |= ((byte & 127) as u32) << shift;
            shift += 7;

            if (byte & 128) == 0 || shift >= 35 {
                break;
            }
        }

        Ok(result)
    }

    pub fn read_var_float(&mut self) -> Result<f32, ParcelError> {
        let first = self.read_byte()?;

        if first == 0 {
            return Ok(0.0);
        }
        if self.index + 3 > self.data.len() {
            return Err(ParcelError::UnexpectedEnd(self.data.len()));
        }

        let mut bits: u32 = first as u32
            | ((self.data[self.index] as u32) << 8)
            | ((self.data[self.index + 1] as u32) << 16)
            | ((self.data[self.index + 2] as u32) << 24);
        self.index += 3;

        // Move the exponent back into place
        bits = (bits << 23) | (bits >> 9);

        Ok(f32::from_bits(bits))
    }

    pub fn read_f64(&mut self) -> Result<f64, ParcelError> {
        let end = self.index + 8;
        let bytes = self
            .data
            .get(self.index..end)
            .ok_or(ParcelError::UnexpectedEnd(self.data.len()))?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        self.index = end;
        Ok(f64::from_le_bytes(raw))
    }

    /// Reads a zero-terminated string. Invalid UTF-8 is replaced rather than
    /// rejected.
    pub fn read_string(&mut self) -> Result<Cow<'a, str>, ParcelError> {
        let start = self.index;

        while self.index < self.data.len() {
            if self.data[self.index] == 0 {
                self.index += 1;
                return Ok(String::from_utf8_lossy(&self.data[start..self.index - 1]));
            }

            self.index += 1;
        }

        Err(ParcelError::UnterminatedString(start))
    }

    pub fn read_var_int64(&mut self) -> Result<i64, ParcelError> {
        let value = self.read_var_uint64()?;
        Ok((if (value & 1) != 0 {
            !(value >> 1)
        } else {
            value >> 1
        }) as i64)
    }

    pub fn read_var_uint64(&mut self) -> Result<u64, ParcelError> {
        let mut shift: u8 = 0;
        let mut result: u64 = 0;

        loop {
            let byte = self.read_byte()?;
            if (byte & 128) == 0 || shift >= 56 {
                result |= (byte as u64) << shift;
                break;
            }
            result |= ((byte & 127) as u64) << shift;
            shift += 7;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_once(cb: fn(&mut Parcel)) -> Vec<u8> {
        let mut parcel = Parcel::new();
        cb(&mut parcel);
        parcel.into_bytes()
    }

    #[test]
    fn read_bool() {
        let read = |bytes: &[u8]| ParcelReader::new(bytes).read_bool();
        assert_eq!(read(&[]), Err(ParcelError::UnexpectedEnd(0)));
        assert_eq!(read(&[0]), Ok(false));
        assert_eq!(read(&[1]), Ok(true));
        assert_eq!(read(&[2]), Err(ParcelError::InvalidBool(2)));
    }

    #[test]
    fn var_int_encoding() {
        assert_eq!(write_once(|p| p.write_var_int(0)), [0]);
        assert_eq!(write_once(|p| p.write_var_int(-1)), [1]);
        assert_eq!(write_once(|p| p.write_var_int(1)), [2]);
        assert_eq!(write_once(|p| p.write_var_int(-64)), [127]);
        assert_eq!(write_once(|p| p.write_var_int(64)), [128, 1]);

        let read = |bytes: &[u8]| ParcelReader::new(bytes).read_var_int();
        assert_eq!(read(&[127]), Ok(-64));
        assert_eq!(read(&[128, 1]), Ok(64));
        assert_eq!(read(&[128]), Err(ParcelError::UnexpectedEnd(1)));
    }

    #[test]
    fn var_float_zero_is_one_byte() {
        assert_eq!(write_once(|p| p.write_var_float(0.0)), [0]);
        assert_eq!(write_once(|p| p.write_var_float(1.0)), [127, 0, 0, 0]);
        assert_eq!(ParcelReader::new(&[127, 0, 0, 0]).read_var_float(), Ok(1.0));
        assert_eq!(
            ParcelReader::new(&[127, 0]).read_var_float(),
            Err(ParcelError::UnexpectedEnd(2))
        );
    }

    #[test]
    fn string_requires_terminator() {
        let mut reader = ParcelReader::new(&[97, 98, 0, 99]);
        assert_eq!(reader.read_string(), Ok(Cow::Borrowed("ab")));
        assert_eq!(reader.read_string(), Err(ParcelError::UnterminatedString(3)));
    }

    #[test]
    fn mixed_fields_read_back_in_order() {
        let mut parcel = Parcel::new();
        parcel.write_string("route");
        parcel.write_var_int64(-1_234_567_890_123);
        parcel.write_f64(2.5);
        parcel.write_bool(true);

        let mut reader = parcel.reader();
        assert_eq!(reader.read_string().unwrap(), "route");
        assert_eq!(reader.read_var_int64().unwrap(), -1_234_567_890_123);
        assert_eq!(reader.read_f64().unwrap(), 2.5);
        assert!(reader.read_bool().unwrap());
        assert!(reader.is_exhausted());
    }
}
