//! 2-bit packed UMIs.
//!
//! A [`PackedUmi`] stores up to [`MAX_PACKED_LEN`] bases in a single `u64`, two bits per base
//! (A=0, C=1, G=2, T=3). Two packed UMIs of the same length can be compared with one XOR and
//! one popcount, which is what makes the quadratic distance matrix cheap for typical
//! 8-16bp UMIs.
//!
//! # Example
//!
//! ```
//! use umi_collapse_dna::PackedUmi;
//!
//! let a = PackedUmi::pack(b"GGGG").unwrap();
//! let b = PackedUmi::pack(b"GGGT").unwrap();
//! assert_eq!(a.mismatches(&b), 1);
//! ```

/// Longest UMI that fits into a [`PackedUmi`].
pub const MAX_PACKED_LEN: usize = 32;

/// Mask selecting the low bit of every 2-bit base slot.
const LOW_BITS: u64 = 0x5555_5555_5555_5555;

/// A UMI packed two bits per base, least significant slot first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PackedUmi {
    bits: u64,
    len: u8,
}

impl PackedUmi {
    #[inline]
    const fn base_code(base: u8) -> Option<u64> {
        match base {
            b'A' | b'a' => Some(0),
            b'C' | b'c' => Some(1),
            b'G' | b'g' => Some(2),
            b'T' | b't' => Some(3),
            _ => None,
        }
    }

    /// Packs a UMI.
    ///
    /// Returns `None` if the UMI is longer than [`MAX_PACKED_LEN`] or contains anything other
    /// than `ACGT` (either case). Callers fall back to byte comparison in that case.
    #[must_use]
    pub fn pack(umi: &[u8]) -> Option<Self> {
        if umi.len() > MAX_PACKED_LEN {
            return None;
        }
        let mut bits = 0u64;
        for (slot, &base) in umi.iter().enumerate() {
            bits |= Self::base_code(base)? << (slot * 2);
        }
        Some(Self { bits, len: u8::try_from(umi.len()).ok()? })
    }

    /// Packs every UMI in `umis`, or returns `None` if any one of them cannot be packed.
    #[must_use]
    pub fn pack_all<S: AsRef<str>>(umis: &[S]) -> Option<Vec<Self>> {
        umis.iter().map(|u| Self::pack(u.as_ref().as_bytes())).collect()
    }

    /// Number of bases.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// True for the empty UMI.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of base positions at which `self` and `other` differ.
    ///
    /// Both UMIs must have the same length.
    #[inline]
    #[must_use]
    pub fn mismatches(&self, other: &Self) -> u32 {
        debug_assert_eq!(self.len, other.len, "UMIs must have equal length");
        let diff = self.bits ^ other.bits;
        // fold each 2-bit slot onto its low bit
        ((diff | (diff >> 1)) & LOW_BITS).count_ones()
    }
}
