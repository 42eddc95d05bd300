/// Options to control how a tag is written
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: Option<u32>,
}

impl WriteOptions {
	/// Default preferred padding size in bytes
	pub const DEFAULT_PREFERRED_PADDING: u32 = 2048;

	/// Creates a new `WriteOptions`, equivalent to [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			preferred_padding: Some(Self::DEFAULT_PREFERRED_PADDING),
		}
	}

	/// Set the preferred padding size in bytes
	///
	/// The padding is written as zeroed bytes after the last frame, and is counted in the tag size.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::config::WriteOptions;
	///
	/// // Leave more room for later edits
	/// let options = WriteOptions::new().preferred_padding(4096);
	///
	/// // The smallest possible tag
	/// let options = WriteOptions::new().preferred_padding(0);
	/// ```
	pub fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		match preferred_padding {
			0 => self.preferred_padding = None,
			_ => self.preferred_padding = Some(preferred_padding),
		}
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	preferred_padding: 2048,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
