//! Extract kmer of a [Record].

/* project use */
use crate::error;
use crate::record::Record;

/// Iterator over overlapping kmer of a sequence, from left to right
#[derive(Debug, Clone)]
pub struct Kmers<'a> {
    windows: std::slice::Windows<'a, u8>,
}

impl<'a> Kmers<'a> {
    /// Iterate over kmer of size `k` of sequence, sequence shorter than `k` produce no kmer
    pub fn new(sequence: &'a [u8], k: usize) -> error::Result<Self> {
        if k == 0 {
            return Err(error::Error::InvalidK);
        }

        Ok(Self {
            windows: sequence.windows(k),
        })
    }
}

impl<'a> Iterator for Kmers<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.windows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.windows.size_hint()
    }
}

impl<'a> ExactSizeIterator for Kmers<'a> {}

/// Kmer of size `k` of record sequence
pub fn kmers(record: &Record, k: usize) -> error::Result<Kmers<'_>> {
    Kmers::new(&record.sequence, k)
}

/// Number of kmer occurrence in records, it's a sizing hint for bloom filter not a count of distinct kmer.
///
/// Each record contributes `max(len - k + 1, 0)`.
pub fn estimate_kmer_count<I>(records: I, k: usize) -> error::Result<u64>
where
    I: IntoIterator<Item = error::Result<Record>>,
{
    if k == 0 {
        return Err(error::Error::InvalidK);
    }

    records.into_iter().try_fold(0u64, |acc, record| {
        let length = record?.sequence.len();

        Ok(acc + (length + 1).saturating_sub(k) as u64)
    })
}
