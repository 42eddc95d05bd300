//! Utilities for working with synchsafe integers and unsynchronized content
//!
//! ## Synchsafe integers
//!
//! A synchsafe integer spreads 28 bits over 4 bytes, leaving the most significant bit of every
//! byte zeroed. This guarantees that no size field will ever contain `0xFF` followed by a byte
//! `>= 0xE0`, which a naive scanner would mistake for an MPEG frame sync.
//!
//! Synchsafe integers are used for the tag size, the extended header size, and (**ID3v2.4 only**)
//! frame sizes. ID3v2.3 frame sizes are plain big endian integers.
//!
//! ## Unsynchronization
//!
//! When a tag has its unsynchronisation flag set, a `0x00` was inserted after every `0xFF` in
//! its content. [`reverse_unsynchronisation`] removes them again.

use crate::error::Result;
use crate::macros::err;

/// An integer that can be converted to and from synchsafe variants
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in <`INTEGER_TYPE::BITS - size_of::<INTEGER_TYPE>()`> bits
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Each byte should have 7 set bits and an MSB of 0
	/// assert_eq!(synch_number, 0b01111111_01111111_01111111_01111111_u32);
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Unsynchronise a synchsafe integer
	///
	/// The most significant bit of each byte is ignored.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Now, our re-unsynchronized number should match our original
	/// assert_eq!(synch_number.unsynch(), unsynch_number);
	/// # Ok(()) }
	/// ```
	fn unsynch(self) -> Self;
}

macro_rules! impl_synchsafe {
	(
		$ty:ty,
		synch($n:ident) $body:block;
		unsynch($u:ident) $unsynch_body:block
	) => {
		#[allow(unused_parens)]
		impl SynchsafeInteger for $ty {
			fn synch(self) -> Result<Self> {
				const MAXIMUM_INTEGER: $ty = {
					let num_bytes = core::mem::size_of::<$ty>();
					// 7 bits are available per byte, shave off 1 bit per byte
					<$ty>::MAX >> num_bytes
				};

				if self > MAXIMUM_INTEGER {
					err!(TooMuchData);
				}

				let $n = self;
				Ok($body)
			}

			fn unsynch(self) -> Self {
				let $u = self;
				$unsynch_body
			}
		}
	};
}

impl_synchsafe! {
	u16,
	synch(n) {
		(n & 0x7F) |
		((n & (0x7F << 7)) << 1)
	};
	unsynch(u) {
		((u & 0x7F00) >> 1) | (u & 0x7F)
	}
}

impl_synchsafe! {
	u32,
	synch(n) {
		(n & 0x7F) |
		((n & (0x7F << 7)) << 1) |
		((n & (0x7F << 14)) << 2) |
		((n & (0x7F << 21)) << 3)
	};
	unsynch(u) {
		((u & 0x7F00_0000) >> 3) | ((u & 0x7F_0000) >> 2) | ((u & 0x7F00) >> 1) | (u & 0x7F)
	}
}

/// Decode a 4 byte synchsafe integer
///
/// # Examples
///
/// ```rust
/// use id3v2::util::synchsafe::decode;
///
/// assert_eq!(decode([0x00, 0x00, 0x01, 0x7F]), 0xFF);
/// ```
pub fn decode(bytes: [u8; 4]) -> u32 {
	u32::from_be_bytes(bytes).unsynch()
}

/// Encode a value as a 4 byte synchsafe integer
///
/// # Errors
///
/// `value` doesn't fit in 28 bits
///
/// # Examples
///
/// ```rust
/// use id3v2::util::synchsafe::encode;
///
/// # fn main() -> id3v2::error::Result<()> {
/// assert_eq!(encode(0xFF)?, [0x00, 0x00, 0x01, 0x7F]);
/// # Ok(()) }
/// ```
pub fn encode(value: u32) -> Result<[u8; 4]> {
	Ok(value.synch()?.to_be_bytes())
}

/// Reverse the unsynchronisation scheme
///
/// This is a single pass over `content`. Whenever a `0xFF` is copied and the very next byte is
/// `0x00`, that zero is dropped. A trailing `0xFF` is copied as-is.
///
/// The output is never longer than the input, and `content` is left untouched.
///
/// # Examples
///
/// ```rust
/// use id3v2::util::synchsafe::reverse_unsynchronisation;
///
/// // The content has two `0xFF 0x00` pairs, which will be removed
/// let content = [0xFF, 0x00, 0x1A, 0xFF, 0x00, 0x15];
///
/// // All null bytes following `0xFF` have been removed
/// assert_eq!(
/// 	reverse_unsynchronisation(&content),
/// 	[0xFF, 0x1A, 0xFF, 0x15]
/// );
/// ```
pub fn reverse_unsynchronisation(content: &[u8]) -> Vec<u8> {
	let mut ret = Vec::with_capacity(content.len());

	let mut pos = 0;
	while pos < content.len() {
		let current_byte = content[pos];
		ret.push(current_byte);
		pos += 1;

		if current_byte == 0xFF && content.get(pos) == Some(&0) {
			pos += 1;
		}
	}

	ret
}

#[cfg(test)]
mod tests {
	use super::{SynchsafeInteger, decode, encode, reverse_unsynchronisation};

	const UNSYNCHRONIZED_CONTENT: &[u8] =
		&[0xFF, 0x00, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00, 0x00];
	const EXPECTED: &[u8] = &[0xFF, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00];

	#[test_log::test]
	fn unsynchronized_content() {
		assert_eq!(reverse_unsynchronisation(UNSYNCHRONIZED_CONTENT), EXPECTED);
		assert_eq!(
			reverse_unsynchronisation(&[0xFF, 0x00, 0xFF, 0x00, 0xAB]),
			[0xFF, 0xFF, 0xAB]
		);
	}

	#[test_log::test]
	fn unsynchronized_content_large() {
		let content = UNSYNCHRONIZED_CONTENT.repeat(1000);
		assert_eq!(reverse_unsynchronisation(&content), EXPECTED.repeat(1000));
	}

	#[test_log::test]
	fn unsynchronization_should_not_replace_unrelated() {
		const ORIGINAL_CONTENT: &[u8] = &[0xFF, 0x1A, 0xFF, 0xC0, 0x10, 0x01];
		assert_eq!(reverse_unsynchronisation(ORIGINAL_CONTENT), ORIGINAL_CONTENT);
	}

	#[test_log::test]
	fn unsynchronization_is_identity_without_ff() {
		let content = (0..=0xFE_u8).collect::<Vec<_>>();
		assert_eq!(reverse_unsynchronisation(&content), content);
	}

	#[test_log::test]
	fn unsynchronization_trailing_ff() {
		assert_eq!(reverse_unsynchronisation(&[0x01, 0xFF]), [0x01, 0xFF]);
		assert_eq!(reverse_unsynchronisation(&[0xFF]), [0xFF]);
		assert!(reverse_unsynchronisation(&[]).is_empty());
	}

	#[test_log::test]
	fn synchsafe_round_trip() {
		for value in (0..0x0FFF_FFFF_u32).step_by(0x1_2345).chain([0, 0x7F, 0x80, 0x0FFF_FFFF]) {
			let encoded = encode(value).unwrap();
			assert!(encoded.iter().all(|b| b & 0x80 == 0), "{value:#X}");
			assert_eq!(decode(encoded), value);
		}
	}

	#[test_log::test]
	fn synchsafe_overflow() {
		assert!(encode(0x1000_0000).is_err());
		assert!(0x4000_u16.synch().is_err());
	}

	macro_rules! synchsafe_integer_tests {
		(
			$($int:ty => {
				synch: $original:literal, $new:literal;
				unsynch: $original_unsync:literal, $new_unsynch:literal;
			});+
		) => {
			$(
				paste::paste! {
					#[test_log::test]
					fn [<$int _synch>]() {
						assert_eq!($original.synch().unwrap(), $new);
					}

					#[test_log::test]
					fn [<$int _unsynch>]() {
						assert_eq!($original_unsync.unsynch(), $new_unsynch);
					}
				}
			)+
		};
	}

	synchsafe_integer_tests! {
		u16 => {
			synch:   0x3FFF_u16, 0x7F7F_u16;
			unsynch: 0x7F7F_u16, 0x3FFF_u16;
		};
		u32 => {
			synch:   0xFFF_FFFF_u32, 0x7F7F_7F7F_u32;
			unsynch: 0x7F7F_7F7F_u32, 0xFFF_FFFF_u32;
		}
	}
}
