use trellis_core::{Camera, Orthographic, ParseError, Perspective, Projection, Property, RootId};

use super::{read_name, read_object, required, FromJson};
use crate::reader::JsonReader;

impl FromJson for Perspective {
    fn read(r: &mut JsonReader<'_>, _root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut aspect_ratio = None;
        let mut yfov = None;
        let mut zfar = None;
        let mut znear = None;

        read_object(r, "perspective", &mut base, |r, key| {
            match key {
                "aspectRatio" => aspect_ratio = Some(r.read_f32()?),
                "yfov" => yfov = Some(r.read_f32()?),
                "zfar" => zfar = Some(r.read_f32()?),
                "znear" => znear = Some(r.read_f32()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Perspective {
            aspect_ratio,
            yfov: required(yfov, "perspective", "yfov")?,
            zfar,
            znear: required(znear, "perspective", "znear")?,
            base,
        })
    }
}

impl FromJson for Orthographic {
    fn read(r: &mut JsonReader<'_>, _root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut xmag = None;
        let mut ymag = None;
        let mut zfar = None;
        let mut znear = None;

        read_object(r, "orthographic", &mut base, |r, key| {
            match key {
                "xmag" => xmag = Some(r.read_f32()?),
                "ymag" => ymag = Some(r.read_f32()?),
                "zfar" => zfar = Some(r.read_f32()?),
                "znear" => znear = Some(r.read_f32()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Orthographic {
            xmag: required(xmag, "orthographic", "xmag")?,
            ymag: required(ymag, "orthographic", "ymag")?,
            zfar: required(zfar, "orthographic", "zfar")?,
            znear: required(znear, "orthographic", "znear")?,
            base,
        })
    }
}

#[derive(Clone, Copy)]
enum CameraType {
    Perspective,
    Orthographic,
}

impl CameraType {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "perspective" => Some(CameraType::Perspective),
            "orthographic" => Some(CameraType::Orthographic),
            _ => None,
        }
    }
}

impl FromJson for Camera {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut camera_type = None;
        let mut perspective = None;
        let mut orthographic = None;
        let mut name = None;

        read_object(r, "camera", &mut base, |r, key| {
            match key {
                "type" => camera_type = Some(read_name(r, "camera type", CameraType::from_name)?),
                "perspective" => perspective = Some(Perspective::read(r, root)?),
                "orthographic" => orthographic = Some(Orthographic::read(r, root)?),
                "name" => name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        // The projection that does not match `type` is kept as plain data.
        let projection = match required(camera_type, "camera", "type")? {
            CameraType::Perspective => {
                if let Some(other) = orthographic {
                    base.unrecognized
                        .insert("orthographic".to_string(), serde_json::to_value(&other)?);
                }
                Projection::Perspective(required(perspective, "camera", "perspective")?)
            }
            CameraType::Orthographic => {
                if let Some(other) = perspective {
                    base.unrecognized
                        .insert("perspective".to_string(), serde_json::to_value(&other)?);
                }
                Projection::Orthographic(required(orthographic, "camera", "orthographic")?)
            }
        };

        Ok(Camera {
            projection,
            name,
            base,
        })
    }
}
