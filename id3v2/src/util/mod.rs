//! Low level building blocks of the codec

pub(crate) mod alloc;
pub mod io;
pub mod synchsafe;
pub(crate) mod text;
pub mod upgrade;
