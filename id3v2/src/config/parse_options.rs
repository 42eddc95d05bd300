/// Options to control how a tag is parsed
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) read_cover_art: bool,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	read_cover_art: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Creates a new `ParseOptions`, equivalent to [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			read_cover_art: true,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::config::{ParseOptions, ParsingMode};
	///
	/// // Keep scanning past ID3v2.2 frames we can't translate
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Relaxed);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// Whether or not to keep `APIC` frames
	///
	/// Skipped pictures are never copied out of the tag, which matters for tags holding large
	/// images.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::config::ParseOptions;
	///
	/// // Only the text frames are needed
	/// let parsing_options = ParseOptions::new().read_cover_art(false);
	/// ```
	pub fn read_cover_art(&mut self, read_cover_art: bool) -> Self {
		self.read_cover_art = read_cover_art;
		*self
	}
}

/// The parsing strictness mode
///
/// This only affects records that are well formed but not understood. A frame whose declared
/// size runs past the end of the tag is an error in every mode.
///
/// # Examples
///
/// ```rust,no_run
/// use id3v2::config::{ParseOptions, ParsingMode};
/// use id3v2::read_from_path;
///
/// # fn main() -> id3v2::error::Result<()> {
/// // We only want to read standard-compliant inputs
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
/// let tag = read_from_path("foo.mp3", parsing_options)?;
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// An ID3v2.2 frame ID with no ID3v2.3 counterpart results in
	/// [`ErrorKind::UnknownLegacyFrameId`](crate::error::ErrorKind::UnknownLegacyFrameId).
	Strict,
	/// Default mode, stops at the first record that can't be understood
	///
	/// An ID3v2.2 frame ID with no ID3v2.3 counterpart is treated the same as the start of the
	/// padding: the frames read so far make up the tag.
	#[default]
	BestAttempt,
	/// Least strict mode, skips over records that can't be understood
	///
	/// An ID3v2.2 frame ID with no ID3v2.3 counterpart is skipped using its declared size, and
	/// reading continues with the next frame.
	Relaxed,
}
