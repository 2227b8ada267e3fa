use trellis_core::{
    Animation, AnimationSampler, Channel, Interpolation, ParseError, Property, RootId, Target,
    TargetPath,
};

use super::{read_entities, read_name, read_object, required, FromJson};
use crate::reader::JsonReader;

impl FromJson for Target {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut node = None;
        let mut path = None;

        read_object(r, "target", &mut base, |r, key| {
            match key {
                "node" => node = Some(r.read_index(root)?),
                "path" => path = Some(read_name(r, "target path", TargetPath::from_name)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Target {
            node,
            path: required(path, "target", "path")?,
            base,
        })
    }
}

impl FromJson for Channel {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut sampler = None;
        let mut target = None;

        read_object(r, "channel", &mut base, |r, key| {
            match key {
                "sampler" => sampler = Some(r.read_u32()?),
                "target" => target = Some(Target::read(r, root)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Channel {
            sampler: required(sampler, "channel", "sampler")?,
            target: required(target, "channel", "target")?,
            base,
        })
    }
}

impl FromJson for AnimationSampler {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut input = None;
        let mut interpolation = Interpolation::default();
        let mut output = None;

        read_object(r, "animation sampler", &mut base, |r, key| {
            match key {
                "input" => input = Some(r.read_index(root)?),
                "interpolation" => {
                    interpolation = read_name(r, "interpolation", Interpolation::from_name)?
                }
                "output" => output = Some(r.read_index(root)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(AnimationSampler {
            input: required(input, "animation sampler", "input")?,
            interpolation,
            output: required(output, "animation sampler", "output")?,
            base,
        })
    }
}

impl FromJson for Animation {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut animation = Animation::default();
        let mut channels = None;
        let mut samplers = None;

        read_object(r, "animation", &mut animation.base, |r, key| {
            match key {
                "channels" => channels = Some(read_entities(r, root)?),
                "samplers" => samplers = Some(read_entities(r, root)?),
                "name" => animation.name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        animation.channels = required(channels, "animation", "channels")?;
        animation.samplers = required(samplers, "animation", "samplers")?;
        Ok(animation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::de::tests::read_one;

    const ROTATE: &str = r#"{
        "name": "spin",
        "channels": [{"sampler": 0, "target": {"node": 2, "path": "rotation"}}],
        "samplers": [{"input": 4, "output": 5}]
    }"#;

    #[test]
    fn test_animation() {
        let animation = read_one::<Animation>(ROTATE).unwrap();
        assert_eq!(animation.name.as_deref(), Some("spin"));
        let channel = &animation.channels[0];
        assert_eq!(channel.sampler, 0);
        assert_eq!(channel.target.path, TargetPath::Rotation);
        assert_eq!(channel.target.node.map(|n| n.index()), Some(2));
        assert_eq!(animation.samplers[0].interpolation, Interpolation::Linear);
        assert_eq!(animation.samplers[0].output.index(), 5);
    }

    #[test]
    fn test_unknown_target_path() {
        let err = read_one::<Channel>(r#"{"sampler": 0, "target": {"path": "color"}}"#).unwrap_err();
        assert_eq!(err.context(), Some(("target", "path")));
    }

    #[test]
    fn test_sampler_requires_output() {
        let err = read_one::<AnimationSampler>(r#"{"input": 0, "interpolation": "STEP"}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingProperty {
                entity: "animation sampler",
                property: "output"
            }
        ));
    }
}
