use trellis_core::{Buffer, BufferTarget, BufferView, ParseError, Property, RootId};

use super::{read_code, read_object, required, FromJson};
use crate::reader::JsonReader;

impl FromJson for Buffer {
    fn read(r: &mut JsonReader<'_>, _root: RootId) -> Result<Self, ParseError> {
        let mut buffer = Buffer::default();
        let mut byte_length = None;

        read_object(r, "buffer", &mut buffer.base, |r, key| {
            match key {
                "byteLength" => byte_length = Some(r.read_u64()?),
                "uri" => buffer.uri = Some(r.read_string()?),
                "name" => buffer.name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        buffer.byte_length = required(byte_length, "buffer", "byteLength")?;
        Ok(buffer)
    }
}

impl FromJson for BufferView {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut buffer = None;
        let mut byte_offset = 0;
        let mut byte_length = None;
        let mut byte_stride = None;
        let mut target = None;
        let mut name = None;

        read_object(r, "bufferView", &mut base, |r, key| {
            match key {
                "buffer" => buffer = Some(r.read_index(root)?),
                "byteOffset" => byte_offset = r.read_u64()?,
                "byteLength" => byte_length = Some(r.read_u64()?),
                "byteStride" => byte_stride = Some(r.read_u32()?),
                "target" => target = Some(read_code(r, "buffer target", BufferTarget::from_code)?),
                "name" => name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(BufferView {
            buffer: required(buffer, "bufferView", "buffer")?,
            byte_offset,
            byte_length: required(byte_length, "bufferView", "byteLength")?,
            byte_stride,
            target,
            name,
            base,
        })
    }
}
