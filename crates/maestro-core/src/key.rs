use crate::hash::hash_one;
use std::fmt;
use std::hash::Hash;

/// Identifies a group of views whose sizes are equalized together.
///
/// Keys are derived by hashing a caller-supplied identifier. Keeping
/// identifiers unique is the caller's job: two unrelated groups whose
/// identifiers hash to the same key share one registry entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(u64);

impl GroupKey {
    pub fn new<T: Hash + ?Sized>(identifier: &T) -> Self {
        Self(hash_one(identifier))
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_identifier_yields_same_key() {
        assert_eq!(GroupKey::new("row1"), GroupKey::new("row1"));
        assert_eq!(GroupKey::new(&42u32), GroupKey::new(&42u32));
        assert_ne!(GroupKey::new("row1"), GroupKey::new("row2"));
    }

    #[test]
    fn raw_keys_round_trip() {
        let key = GroupKey::from_raw(0xabc);
        assert_eq!(key.as_u64(), 0xabc);
        assert_eq!(key.to_string(), "group#0000000000000abc");
    }
}
