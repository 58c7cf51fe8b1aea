//! Error type shared by every kmer_table module.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("kmer_table k must be larger than 0")]
    InvalidK,

    #[error("kmer_table expected number of element must be larger than 0")]
    InvalidCardinality,

    #[error("kmer_table error rate must be in ]0, 1[ get {rate}")]
    InvalidErrorRate { rate: f64 },

    #[error("kmer_table bloom filter need at least one bit and one hash function")]
    InvalidFilterSize,

    #[error("kmer_table index {index} is out of bit vector of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("kmer_table can't read {path:?} file extension must be .fa, .fasta or .fastq")]
    UnsupportedFormat { path: std::path::PathBuf },

    #[error("kmer_table all input must have same format {first:?} and {other:?} differ")]
    FormatMismatch {
        first: std::path::PathBuf,
        other: std::path::PathBuf,
    },

    #[error("kmer_table {path:?} isn't a directory")]
    InvalidDirectory { path: std::path::PathBuf },

    #[error("kmer_table found a malformed record near line {line}: {reason}")]
    MalformedRecord { line: u64, reason: &'static str },

    #[error("kmer_table can't open file {path:?} {source}")]
    OpenFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("kmer_table failled to read a line {source}")]
    ReadLine { source: std::io::Error },

    #[error("kmer_table failled to list directory {path:?} {source}")]
    ReadDirectory {
        path: std::path::PathBuf,
        source: walkdir::Error,
    },

    #[error("kmer_table can't create file {path:?} {source}")]
    CreateFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("kmer_table failled to write output {source}")]
    WriteFile { source: std::io::Error },

    #[error("kmer_table failled to write csv {source}")]
    Csv { source: csv::Error },

    #[error("kmer_table can't merge tables build with different parameters")]
    IncompatibleTables,

    #[error("kmer_table reading was cancelled")]
    Cancelled,
}

impl Error {
    /// True for errors produce by invalid counting parameters
    pub fn is_parameter(&self) -> bool {
        matches!(
            self,
            Error::InvalidK
                | Error::InvalidCardinality
                | Error::InvalidErrorRate { .. }
                | Error::InvalidFilterSize
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
