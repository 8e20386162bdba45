//! Keyframe descriptors: the attribute that positions a keyframe on its
//! clip's timeline.

use fresh_core::{FreshError, FreshResult, Node};

const REPLAY_CHILDREN: &str = "replay-children";

/// Descriptor attribute names, in the order they are reported.
const DESCRIPTORS: [&str; 5] = ["rel-s", "rel-t", "t", "s", "label"];

/// The single descriptor a keyframe carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyframeDescriptor {
    None,
    /// Seconds after the previous keyframe.
    RelS(String),
    /// Frames after the previous keyframe.
    RelT(String),
    /// Absolute frame.
    T(String),
    /// Absolute time in seconds.
    S(String),
    Label {
        label: String,
        replay_children: Option<String>,
    },
}

impl KeyframeDescriptor {
    /// Read the descriptor off a `<keyframe>` element.
    ///
    /// Fails when more than one descriptor is present, or when
    /// `replay-children` appears without `label`.
    pub fn from_node(node: &Node) -> FreshResult<Self> {
        let present: Vec<_> = node
            .attributes
            .iter()
            .filter(|a| DESCRIPTORS.contains(&a.name.as_str()))
            .collect();
        let replay_children = node.attr(REPLAY_CHILDREN).map(str::to_string);

        for attribute in &node.attributes {
            let name = attribute.name.as_str();
            if !DESCRIPTORS.contains(&name) && name != REPLAY_CHILDREN {
                tracing::warn!(attribute = %name, "ignoring unsupported keyframe attribute");
            }
        }

        let descriptor = match present.as_slice() {
            [] => KeyframeDescriptor::None,
            [single] => {
                let value = single.value.clone();
                match single.name.as_str() {
                    "rel-s" => KeyframeDescriptor::RelS(value),
                    "rel-t" => KeyframeDescriptor::RelT(value),
                    "t" => KeyframeDescriptor::T(value),
                    "s" => KeyframeDescriptor::S(value),
                    _ => {
                        return Ok(KeyframeDescriptor::Label {
                            label: value,
                            replay_children,
                        })
                    }
                }
            }
            several => {
                return Err(FreshError::ConflictingDescriptors {
                    descriptors: several.iter().map(|a| a.name.clone()).collect(),
                })
            }
        };

        if replay_children.is_some() {
            return Err(FreshError::missing_attribute("keyframe", "label"));
        }
        Ok(descriptor)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, KeyframeDescriptor::None)
    }

    /// The `key value` lines written ahead of the keyframe's children array.
    pub fn properties(&self) -> Vec<(&'static str, &str)> {
        match self {
            KeyframeDescriptor::None => Vec::new(),
            KeyframeDescriptor::RelS(v) => vec![("rel_s", v.as_str())],
            KeyframeDescriptor::RelT(v) => vec![("rel_t", v.as_str())],
            KeyframeDescriptor::T(v) => vec![("t", v.as_str())],
            KeyframeDescriptor::S(v) => vec![("s", v.as_str())],
            KeyframeDescriptor::Label {
                label,
                replay_children,
            } => {
                let mut lines = vec![("label", label.as_str())];
                if let Some(replay) = replay_children {
                    lines.push(("replay_children", replay.as_str()));
                }
                lines
            }
        }
    }
}
