//! Decoders for the frame payloads this codec understands

mod comment;
mod picture;
mod text;

pub use comment::CommentContent;
pub use picture::{PictureContent, PictureType};
pub use text::TextContent;
