//! Word-level helpers shared by the coders.

use Word;

/// Left-pads `value` into a big-endian 32-byte word.
pub fn pad_usize(value: usize) -> Word {
	let mut padded = [0u8; 32];
	let mut value = value as u64;
	let mut index = 32;
	while value != 0 {
		index -= 1;
		padded[index] = value as u8;
		value >>= 8;
	}
	padded
}

/// The word holding `value` zero-extended.
pub fn uint_word(value: u64) -> Word {
	pad_usize(value as usize)
}

/// The word holding `value` in sign-extended two's complement.
pub fn int_word(value: i64) -> Word {
	let mut padded = if value < 0 { [0xffu8; 32] } else { [0u8; 32] };
	let mut bits = value as u64;
	for index in (24..32).rev() {
		padded[index] = bits as u8;
		bits >>= 8;
	}
	padded
}

/// True if the word is a zero-extended unsigned value of at most `bits` bits.
pub fn fits_unsigned(word: &Word, bits: usize) -> bool {
	if bits >= 256 {
		return true;
	}
	let whole_bytes = (256 - bits) / 8;
	for byte in &word[..whole_bytes] {
		if *byte != 0 {
			return false;
		}
	}
	let stray_bits = (256 - bits) % 8;
	if stray_bits > 0 {
		let mask = !(0xffu8 >> stray_bits);
		if word[whole_bytes] & mask != 0 {
			return false;
		}
	}
	true
}

/// True if the word is a sign-extended two's-complement value of at most
/// `bits` bits.
pub fn fits_signed(word: &Word, bits: usize) -> bool {
	if bits >= 256 {
		return true;
	}
	if bits == 0 {
		return false;
	}
	let sign_bit = bits - 1;
	let byte = 31 - sign_bit / 8;
	let mask = 1u8 << (sign_bit % 8);
	let fill = if word[byte] & mask != 0 { 0xffu8 } else { 0x00 };
	// bits above the sign bit within its own byte
	let above = !(mask | (mask - 1));
	if word[byte] & above != fill & above {
		return false;
	}
	word[..byte].iter().all(|b| *b == fill)
}

/// True if the word's two's-complement value is negative.
pub fn is_negative(word: &Word) -> bool {
	word[0] & 0x80 != 0
}

/// Widens `bytes` into a word, filling the lead with the sign.
pub fn extend(bytes: &[u8], signed: bool) -> Word {
	let negative = signed && !bytes.is_empty() && bytes[0] & 0x80 != 0;
	let mut word = if negative { [0xffu8; 32] } else { [0u8; 32] };
	word[32 - bytes.len()..].copy_from_slice(bytes);
	word
}

#[cfg(test)]
pub fn read32(s: &str) -> Word {
	use rustc_serialize::hex::FromHex;

	let bytes = s.from_hex().unwrap();
	assert_eq!(bytes.len(), 32);
	let mut result = [0u8; 32];
	result.copy_from_slice(&bytes);
	result
}
