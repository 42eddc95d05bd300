//! Utilities for upgrading old ID3v2 frame IDs

use std::collections::HashMap;
use std::sync::OnceLock;

/// Every ID3v2.2 frame ID with a known ID3v2.3 counterpart
pub(crate) const V2_KEYS: &[(&str, &str)] = &[
	("BUF", "RBUF"),
	("COM", "COMM"),
	("PIC", "APIC"),
	("TAL", "TALB"),
	("TBP", "TBPM"),
	("TCM", "TCOM"),
	("TCO", "TCON"),
	("TCR", "TCOP"),
	("TDA", "TDAT"),
	("TDY", "TDLY"),
	("TEN", "TENC"),
	("TFT", "TFLT"),
	("TIM", "TIME"),
	("TKE", "TKEY"),
	("TLA", "TLAN"),
	("TLE", "TLEN"),
	("TMT", "TMED"),
	("TOA", "TOPE"),
	("TOF", "TOFN"),
	("TOL", "TOLY"),
	("TOR", "TORY"),
	("TOT", "TOAL"),
	("TP1", "TPE1"),
	("TP2", "TPE2"),
	("TP3", "TPE3"),
	("TP4", "TPE4"),
	("TPA", "TPOS"),
	("TPB", "TPUB"),
	("TRC", "TSRC"),
	("TRD", "TRDA"),
	("TRK", "TRCK"),
	("TSI", "TSIZ"),
	("TSS", "TSSE"),
	("TT1", "TIT1"),
	("TT2", "TIT2"),
	("TT3", "TIT3"),
	("TXT", "TEXT"),
	("TXX", "TXXX"),
	("TYE", "TYER"),
];

fn v2keys() -> &'static HashMap<&'static str, &'static str> {
	static INSTANCE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
	INSTANCE.get_or_init(|| V2_KEYS.iter().copied().collect())
}

/// Upgrade an ID3v2.2 key to an ID3v2.3 key
///
/// The lookup is an exact, case-sensitive match.
///
/// # Examples
///
/// ```rust
/// use id3v2::util::upgrade::upgrade_v2;
///
/// let old_title = "TT2";
/// let new_title = upgrade_v2(old_title);
///
/// assert_eq!(new_title, Some("TIT2"));
/// assert_eq!(upgrade_v2("tt2"), None);
/// ```
pub fn upgrade_v2(key: &str) -> Option<&'static str> {
	v2keys().get(key).copied()
}

#[cfg(test)]
mod tests {
	use super::{V2_KEYS, upgrade_v2};

	use std::collections::HashSet;

	#[test_log::test]
	fn every_legacy_key_upgrades_to_a_unique_id() {
		let mut seen = HashSet::new();
		for (v2, v3) in V2_KEYS {
			assert_eq!(v2.len(), 3);
			assert_eq!(v3.len(), 4);
			assert!(
				v3.bytes()
					.all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
			);
			assert!(seen.insert(*v3), "duplicate target {v3}");
			assert_eq!(upgrade_v2(v2), Some(*v3));
		}
	}

	#[test_log::test]
	fn unknown_legacy_key() {
		assert_eq!(upgrade_v2("XYZ"), None);
		assert_eq!(upgrade_v2("TIT2"), None);
		assert_eq!(upgrade_v2("com"), None);
		assert_eq!(upgrade_v2(""), None);
	}
}
