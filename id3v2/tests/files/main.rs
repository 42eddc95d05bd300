#![allow(missing_docs)]

mod read;
pub(crate) mod util;
mod write;
