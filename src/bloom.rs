//! Bloom filter, an approximate set without false negative.
//!
//! Filter is size from expected number of element `n` and target false positive rate `p`:
//! - number of bit `m = ceil(-n * ln(p) / ln(2)^2)`
//! - number of hash function `k = round(m / n * ln(2))`
//!
//! Element are hash through their canonical byte form, see [Canonical].

/* std use */
use std::borrow::Cow;

/* project use */
use crate::bitvector::BitVector;
use crate::error;
use crate::hash::HashFamily;

/// Type that can be convert in a canonical byte string before hashing
pub trait Canonical {
    fn canonical(&self) -> Cow<'_, [u8]>;
}

impl Canonical for [u8] {
    fn canonical(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl Canonical for Vec<u8> {
    fn canonical(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl Canonical for str {
    fn canonical(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl Canonical for String {
    fn canonical(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

macro_rules! impl_canonical_integer {
    ($($t:ty),*) => {
        $(
            impl Canonical for $t {
                fn canonical(&self) -> Cow<'_, [u8]> {
                    Cow::Owned(self.to_string().into_bytes())
                }
            }
        )*
    };
}

impl_canonical_integer!(u8, u16, u32, u64, usize);

/// Number of bit need to store `n` element with false positive rate `p`
pub fn optimal_size(n: u64, p: f64) -> usize {
    let ln2 = std::f64::consts::LN_2;

    (-(n as f64) * p.ln() / (ln2 * ln2)).ceil() as usize
}

/// Number of hash function that minimize false positive rate for `m` bit and `n` element
pub fn optimal_hash_count(m: usize, n: u64) -> usize {
    ((m as f64 / n as f64) * std::f64::consts::LN_2)
        .round()
        .max(1.0) as usize
}

/// Approximate membership set, bit are only set never clear
pub struct BloomFilter<T: ?Sized> {
    family: HashFamily,
    bits: BitVector,
    _element: std::marker::PhantomData<fn(&T)>,
}

impl<T: ?Sized> Clone for BloomFilter<T> {
    fn clone(&self) -> Self {
        Self {
            family: self.family.clone(),
            bits: self.bits.clone(),
            _element: std::marker::PhantomData,
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for BloomFilter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomFilter")
            .field("size", &self.bits.len())
            .field("hash_count", &self.family.len())
            .field("ones", &self.bits.count_ones())
            .finish()
    }
}

impl<T> BloomFilter<T>
where
    T: Canonical + ?Sized,
{
    /// Build a filter for `expected` element with `error` false positive rate
    pub fn new(expected: u64, error: f64) -> error::Result<Self> {
        if expected == 0 {
            return Err(error::Error::InvalidCardinality);
        }
        if !(error > 0.0 && error < 1.0) {
            return Err(error::Error::InvalidErrorRate { rate: error });
        }

        let size = optimal_size(expected, error).max(1);
        let hash_count = optimal_hash_count(size, expected);

        log::debug!(
            "bloom filter for {} element at {} error use {} bits and {} hash functions",
            expected,
            error,
            size,
            hash_count
        );

        Self::with_size(size, hash_count)
    }

    /// Build a filter of `size` bit with `hash_count` hash functions
    pub fn with_size(size: usize, hash_count: usize) -> error::Result<Self> {
        if size == 0 || hash_count == 0 {
            return Err(error::Error::InvalidFilterSize);
        }

        Ok(Self {
            family: HashFamily::generate(hash_count),
            bits: BitVector::new(size),
            _element: std::marker::PhantomData,
        })
    }

    /// Number of bit (m)
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// Number of hash function (k)
    pub fn hash_count(&self) -> usize {
        self.family.len()
    }

    /// Acces to underlying bit vector
    pub fn bits(&self) -> &BitVector {
        &self.bits
    }

    pub fn insert(&mut self, element: &T) {
        let data = element.canonical();
        let size = self.bits.len();

        for idx in self.family.indices(&data, size) {
            self.bits.mark(idx);
        }
    }

    /// True if element is probably in set, false if element is surely absent
    pub fn contains(&self, element: &T) -> bool {
        let data = element.canonical();

        let found = self
            .family
            .indices(&data, self.bits.len())
            .all(|idx| self.bits.bit(idx));

        found
    }

    /// True if two filter have same size and same hash functions
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.size() == other.size() && self.family == other.family
    }

    /// After union self contains every element of other
    pub fn union(&mut self, other: &Self) -> error::Result<()> {
        if !self.is_compatible(other) {
            return Err(error::Error::IncompatibleTables);
        }

        self.bits.union_with(&other.bits)
    }
}
