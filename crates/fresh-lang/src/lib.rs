//! # fresh-lang
//!
//! Fresh markup reader and converters.
//! Markup is parsed into a [`fresh_core::Node`] tree, which is then written
//! either as JSON or as Fresh language text. Both writers take their element
//! knowledge from [`schema`].

pub mod convert;
pub mod hoist;
pub mod json;
pub mod keyframe;
pub mod reader;
pub mod reindent;
pub mod schema;
pub mod writer;

pub use convert::{markup_to_fresh, markup_to_json};
pub use hoist::{hoist_tweens, HoistedTree};
pub use json::JsonWriter;
pub use keyframe::KeyframeDescriptor;
pub use reader::parse_document;
pub use reindent::{reindent, Reindented, Reindenter};
pub use schema::ElementKind;
pub use writer::FreshWriter;
