//! Binary data wrapper for tile payloads.
//!
//! A [`Blob`] owns the raw bytes of one tile exactly as they are stored in an
//! archive. The server never inspects or re-encodes the payload, it only moves
//! it from storage into a response body.

use std::fmt::{self, Debug};

/// An immutable chunk of binary tile data.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Returns the payload as a byte slice.
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	/// Consumes the blob and returns the underlying bytes.
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Returns the length of the payload in bytes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` if the payload is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Blob({})", self.0.len())
	}
}
