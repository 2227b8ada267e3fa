use trellis_core::{
    Accessor, ComponentType, ElementType, ParseError, Property, RootId, Sparse, SparseIndices,
    SparseValues,
};

use super::{read_code, read_name, read_object, required, FromJson};
use crate::reader::JsonReader;

impl FromJson for Accessor {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut buffer_view = None;
        let mut byte_offset = 0;
        let mut component_type = None;
        let mut normalized = false;
        let mut count = None;
        let mut element_type = None;
        let mut max = None;
        let mut min = None;
        let mut sparse = None;
        let mut name = None;

        read_object(r, "accessor", &mut base, |r, key| {
            match key {
                "bufferView" => buffer_view = Some(r.read_index(root)?),
                "byteOffset" => byte_offset = r.read_u64()?,
                "componentType" => {
                    component_type = Some(read_code(r, "component type", ComponentType::from_code)?)
                }
                "normalized" => normalized = r.read_bool()?,
                "count" => count = Some(r.read_u32()?),
                "type" => element_type = Some(read_name(r, "accessor type", ElementType::from_name)?),
                "max" => max = Some(r.read_f64_array()?),
                "min" => min = Some(r.read_f64_array()?),
                "sparse" => sparse = Some(Sparse::read(r, root)?),
                "name" => name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Accessor {
            buffer_view,
            byte_offset,
            component_type: required(component_type, "accessor", "componentType")?,
            normalized,
            count: required(count, "accessor", "count")?,
            element_type: required(element_type, "accessor", "type")?,
            max,
            min,
            sparse,
            name,
            base,
        })
    }
}

impl FromJson for Sparse {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut count = None;
        let mut indices = None;
        let mut values = None;

        read_object(r, "sparse", &mut base, |r, key| {
            match key {
                "count" => count = Some(r.read_u32()?),
                "indices" => indices = Some(SparseIndices::read(r, root)?),
                "values" => values = Some(SparseValues::read(r, root)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Sparse {
            count: required(count, "sparse", "count")?,
            indices: required(indices, "sparse", "indices")?,
            values: required(values, "sparse", "values")?,
            base,
        })
    }
}

impl FromJson for SparseIndices {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut buffer_view = None;
        let mut byte_offset = 0;
        let mut component_type = None;

        read_object(r, "sparse indices", &mut base, |r, key| {
            match key {
                "bufferView" => buffer_view = Some(r.read_index(root)?),
                "byteOffset" => byte_offset = r.read_u64()?,
                "componentType" => {
                    component_type = Some(read_code(r, "component type", ComponentType::from_code)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(SparseIndices {
            buffer_view: required(buffer_view, "sparse indices", "bufferView")?,
            byte_offset,
            component_type: required(component_type, "sparse indices", "componentType")?,
            base,
        })
    }
}

impl FromJson for SparseValues {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut buffer_view = None;
        let mut byte_offset = 0;

        read_object(r, "sparse values", &mut base, |r, key| {
            match key {
                "bufferView" => buffer_view = Some(r.read_index(root)?),
                "byteOffset" => byte_offset = r.read_u64()?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(SparseValues {
            buffer_view: required(buffer_view, "sparse values", "bufferView")?,
            byte_offset,
            base,
        })
    }
}
