//! Family of seeded MurmurHash3 (x86 32 bits) function.

/// Seed of the first function of a family
pub const BASE_SEED: u32 = 1;

/// Odd step between two consecutive seed, multiplication by an odd value is a bijection modulo 2^32
pub const SEED_STEP: u32 = 0x9E37_79B9;

/// Largest upper bound reach by one 31 bits hash, above two hash are combine in a 64 bits value
pub const NARROW_BOUND: usize = 1 << 31;

/// Xor apply to seed to get seed of low word of a wide hash
const WIDE_SEED_MASK: u32 = 0x85EB_CA6B;

/// One hash function, a seed apply to MurmurHash3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashFunction {
    seed: u32,
}

impl HashFunction {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Raw 32 bits avalanche hash of data
    pub fn raw(&self, mut data: &[u8]) -> u32 {
        match murmur3::murmur3_32(&mut data, self.seed) {
            Ok(hash) => hash,
            Err(_) => unreachable!("read from a byte slice can't fail"),
        }
    }

    /// 64 bits hash of data, high word is [HashFunction::raw]
    pub fn wide(&self, data: &[u8]) -> u64 {
        let high = self.raw(data) as u64;
        let low = HashFunction::new(self.seed ^ WIDE_SEED_MASK).raw(data) as u64;

        (high << 32) | low
    }

    /// Hash data in [0, upper_bound[
    ///
    /// Up to [NARROW_BOUND] sign bit of raw hash is discard before reduction, larger bound use
    /// [HashFunction::wide] to reach every index.
    ///
    /// # Panics
    /// If `upper_bound` is 0
    pub fn hash(&self, data: &[u8], upper_bound: usize) -> usize {
        if upper_bound <= NARROW_BOUND {
            ((self.raw(data) >> 1) as usize) % upper_bound
        } else {
            (self.wide(data) % upper_bound as u64) as usize
        }
    }
}

/// Ordered set of [HashFunction] with pairwise distinct seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashFamily {
    functions: Vec<HashFunction>,
}

impl HashFamily {
    /// Generate `count` functions, seed i is `BASE_SEED + i * SEED_STEP`
    pub fn generate(count: usize) -> Self {
        Self {
            functions: (0..count as u32)
                .map(|i| HashFunction::new(BASE_SEED.wrapping_add(i.wrapping_mul(SEED_STEP))))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn functions(&self) -> &[HashFunction] {
        &self.functions
    }

    /// Iterate over value of each function for data
    pub fn indices<'a>(
        &'a self,
        data: &'a [u8],
        upper_bound: usize,
    ) -> impl Iterator<Item = usize> + 'a {
        self.functions
            .iter()
            .map(move |function| function.hash(data, upper_bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = HashFunction::new(42);
        let b = HashFunction::new(42);

        assert_eq!(a.raw(b"ACGTACGT"), b.raw(b"ACGTACGT"));
        assert_eq!(a.hash(b"ACGTACGT", 1000), b.hash(b"ACGTACGT", 1000));
        assert_ne!(a.raw(b"ACGTACGT"), HashFunction::new(43).raw(b"ACGTACGT"));
    }

    #[test]
    fn murmur_reference() {
        assert_eq!(HashFunction::new(0).raw(b""), 0);
        assert_eq!(HashFunction::new(1).raw(b""), 0x514E_28B7);
        assert_eq!(HashFunction::new(0).raw(b"hello"), 0x248B_FA47);
    }

    #[test]
    fn distinct_seed() {
        let family = HashFamily::generate(1000);

        let mut seeds = family
            .functions()
            .iter()
            .map(|f| f.seed())
            .collect::<Vec<u32>>();
        seeds.sort_unstable();
        seeds.dedup();

        assert_eq!(seeds.len(), 1000);
        assert_eq!(family.functions()[0].seed(), BASE_SEED);
    }

    #[test]
    fn same_family() {
        assert_eq!(HashFamily::generate(7), HashFamily::generate(7));
        assert!(HashFamily::generate(0).is_empty());
    }

    #[test]
    fn in_bound() {
        let family = HashFamily::generate(5);

        for i in 0..1_000u32 {
            let data = i.to_string();
            for idx in family.indices(data.as_bytes(), 97) {
                assert!(idx < 97);
            }
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn large_bound() {
        let family = HashFamily::generate(7);
        let upper_bound = 1usize << 34;

        let max = (0..200_000u32)
            .flat_map(|i| {
                let data = i.to_string();
                family.indices(data.as_bytes(), upper_bound).collect::<Vec<usize>>()
            })
            .max()
            .unwrap();

        assert!(max < upper_bound);
        assert!(max >= 1 << 32, "max index {}", max);
    }

    #[test]
    fn narrow_bound_unchanged() {
        let function = HashFunction::new(BASE_SEED);

        assert_eq!(
            function.hash(b"ACGT", NARROW_BOUND),
            (function.raw(b"ACGT") >> 1) as usize
        );
    }

    #[test]
    fn uniform() {
        let function = HashFunction::new(BASE_SEED);
        let mut buckets = [0u32; 16];

        for i in 0..160_000u32 {
            buckets[function.hash(i.to_string().as_bytes(), 16)] += 1;
        }

        for count in buckets {
            assert!((9_000..11_000).contains(&count), "bucket {}", count);
        }
    }
}
