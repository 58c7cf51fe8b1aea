//! Two tier kmer counter.
//!
//! First occurrence of a kmer is only record in a [BloomFilter], an exact counter is create when filter
//! report kmer as already seen. Kmer seen once never reach the frequency map, singleton are drop at
//! [KmerTable::store] time.

/* crate use */
use rustc_hash::FxHashMap;

/* project use */
use crate::bloom::BloomFilter;
use crate::error;

/// Exact count of kmer seen at least twice
pub type FrequencyMap = FxHashMap<Vec<u8>, u64>;

/// Header of csv produce by [KmerTable::store]
pub const CSV_HEADER: [&str; 2] = ["kmer", "frequency"];

#[derive(Debug, Clone)]
pub struct KmerTable {
    k: usize,
    filter: BloomFilter<[u8]>,
    frequencies: FrequencyMap,
}

impl KmerTable {
    /// Build a table for kmer of size `k`, with a filter size for `expected` kmer at `error` rate
    pub fn new(k: usize, expected: u64, error: f64) -> error::Result<Self> {
        Self::with_filter(k, BloomFilter::new(expected, error)?)
    }

    /// Build a table for kmer of size `k` on top of filter
    pub fn with_filter(k: usize, filter: BloomFilter<[u8]>) -> error::Result<Self> {
        if k == 0 {
            return Err(error::Error::InvalidK);
        }

        Ok(Self {
            k,
            filter,
            frequencies: FrequencyMap::default(),
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn filter(&self) -> &BloomFilter<[u8]> {
        &self.filter
    }

    /// Number of kmer with an exact counter
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Record one occurrence of kmer
    pub fn add(&mut self, kmer: &[u8]) {
        if let Some(count) = self.frequencies.get_mut(kmer) {
            *count += 1;
        } else if self.filter.contains(kmer) {
            self.frequencies.insert(kmer.to_vec(), 2);
        } else {
            self.filter.insert(kmer);
        }
    }

    /// Count of kmer, kmer without exact counter are report as seen once
    pub fn get(&self, kmer: &[u8]) -> u64 {
        self.frequencies.get(kmer).copied().unwrap_or(1)
    }

    /// Iterate over kmer with an exact counter, order is arbitrary
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], u64)> {
        self.frequencies
            .iter()
            .map(|(kmer, count)| (kmer.as_slice(), *count))
    }

    /// Write csv `kmer,frequency` in writer, kmer are sort in lexicographic order
    pub fn write<W>(&self, writer: W) -> error::Result<()>
    where
        W: std::io::Write,
    {
        let mut output = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);

        output
            .write_record(CSV_HEADER)
            .map_err(|source| error::Error::Csv { source })?;

        let mut entries = self.frequencies.iter().collect::<Vec<_>>();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        for (kmer, count) in entries {
            output
                .write_record(&[kmer.as_slice(), count.to_string().as_bytes()])
                .map_err(|source| error::Error::Csv { source })?;
        }

        output
            .flush()
            .map_err(|source| error::Error::WriteFile { source })
    }

    /// Write csv `kmer,frequency` in file at path
    pub fn store<P>(&self, path: P) -> error::Result<()>
    where
        P: AsRef<std::path::Path>,
    {
        let file = std::fs::File::create(path.as_ref()).map_err(|source| {
            error::Error::CreateFile {
                path: path.as_ref().to_path_buf(),
                source,
            }
        })?;

        self.write(std::io::BufWriter::new(file))?;

        log::info!(
            "store {} kmer in {}",
            self.frequencies.len(),
            path.as_ref().display()
        );

        Ok(())
    }

    /// Merge a table build independently, tables must share k and filter parameters.
    ///
    /// A kmer count only by one table gain one occurrence if the other filter saw it. A kmer seen
    /// once in each table but count by neither stay a singleton.
    pub fn merge(&mut self, other: &KmerTable) -> error::Result<()> {
        if self.k != other.k || !self.filter.is_compatible(&other.filter) {
            return Err(error::Error::IncompatibleTables);
        }

        for (kmer, count) in self.frequencies.iter_mut() {
            if !other.frequencies.contains_key(kmer) && other.filter.contains(kmer) {
                *count += 1;
            }
        }

        for (kmer, count) in other.frequencies.iter() {
            if let Some(current) = self.frequencies.get_mut(kmer) {
                *current += count;
            } else if self.filter.contains(kmer) {
                self.frequencies.insert(kmer.clone(), count + 1);
            } else {
                self.frequencies.insert(kmer.clone(), *count);
            }
        }

        self.filter.union(&other.filter)?;

        log::debug!("merged table contains {} kmer", self.frequencies.len());

        Ok(())
    }
}
