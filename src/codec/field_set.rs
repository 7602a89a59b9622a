use std::fmt;

/// Records which attributes of a model were explicitly assigned.
///
/// Index `i` corresponds to the attribute declared at position `i`. The
/// vector is allocated on the first assignment; until then, and for any
/// index beyond its length, every attribute reads as unset.
#[derive(Clone, Default)]
pub struct FieldSet {
    bits: Vec<bool>,
}

impl FieldSet {
    pub const fn new() -> Self {
        FieldSet { bits: Vec::new() }
    }

    /// Creates an allocated, all-unset set for `len` attributes.
    pub fn with_len(len: usize) -> Self {
        FieldSet { bits: vec![false; len] }
    }

    /// Length of the underlying vector: 0 when nothing was ever assigned.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_set(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Marks `index` as set, allocating room for `len` attributes if needed.
    pub fn set(&mut self, index: usize, len: usize) {
        self.assign(index, true, len);
    }

    pub fn unset(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = false;
        }
    }

    pub fn assign(&mut self, index: usize, value: bool, len: usize) {
        if self.bits.len() < len {
            self.bits.resize(len, false);
        }
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = value;
        }
    }

    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.is_empty_from(0)
    }

    /// True when no attribute at or after `first` is set.
    pub fn is_empty_from(&self, first: usize) -> bool {
        self.bits.iter().skip(first).all(|bit| !bit)
    }

    /// Indices of the set attributes, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(index, bit)| bit.then_some(index))
    }
}

impl PartialEq for FieldSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for FieldSet {}

impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
