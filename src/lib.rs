//! Count kmer of sequencing reads in bounded memory.
//!
//! Kmer seen once, mostly sequencing errors, are only record in a [bloom::BloomFilter], exact counter are
//! keep for kmer seen at least twice, see [table::KmerTable].
//!
//! ```no_run
//! # fn main() -> kmer_table::error::Result<()> {
//! let records = kmer_table::input::read_file("reads.fastq")?;
//! let table = kmer_table::count::build_table(records, 31, 1_000_000, 0.01)?;
//!
//! table.store("reads.fastq_frequencies.out")?;
//! # Ok(())
//! # }
//! ```

/* mod declaration */
pub mod bitvector;
pub mod bloom;
pub mod cancel;
pub mod count;
pub mod error;
pub mod fasta;
pub mod fastq;
pub mod group;
pub mod hash;
pub mod input;
pub mod kmer;
pub mod lines;
pub mod record;
pub mod table;

/* reexport */
pub use count::build_table;
pub use record::Record;
pub use table::KmerTable;

/// Default kmer size
pub const DEFAULT_K: usize = 31;

/// Default false positive rate of bloom filter
pub const DEFAULT_ERROR_RATE: f64 = 0.01;
