use crate::error::Result;
use crate::macros::err;

/// The largest buffer created from a size read out of a tag
///
/// A tag size is a 28-bit synchsafe integer, so nothing legitimate can exceed this.
pub(crate) const ALLOCATION_LIMIT: usize = 0x0FFF_FFFF;

/// **DO NOT USE DIRECTLY**
///
/// Creates a `Vec` of the specified length, containing copies of `element`.
///
/// This should be used through [`try_vec!`](crate::macros::try_vec)
pub(crate) fn fallible_vec_from_element<T>(element: T, expected_size: usize) -> Result<Vec<T>>
where
	T: Clone,
{
	let mut v = Vec::new();
	if expected_size == 0 {
		return Ok(v);
	}

	if expected_size > ALLOCATION_LIMIT {
		err!(TooMuchData);
	}

	v.try_reserve_exact(expected_size)?;
	v.resize(expected_size, element);

	Ok(v)
}
