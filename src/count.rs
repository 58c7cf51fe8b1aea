//! Fold kmer of records in a [KmerTable].

/* crate use */
use rayon::prelude::*;

/* project use */
use crate::error;
use crate::input;
use crate::kmer;
use crate::record::Record;
use crate::table::KmerTable;

/// Parameter of a counting run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub k: usize,
    pub error_rate: f64,
    /// Expected number of kmer, if None it's estimate from input
    pub expected: Option<u64>,
}

impl Params {
    pub fn new(k: usize, error_rate: f64, expected: Option<u64>) -> error::Result<Self> {
        if k == 0 {
            return Err(error::Error::InvalidK);
        }
        if !(error_rate > 0.0 && error_rate < 1.0) {
            return Err(error::Error::InvalidErrorRate { rate: error_rate });
        }
        if expected == Some(0) {
            return Err(error::Error::InvalidCardinality);
        }

        Ok(Self {
            k,
            error_rate,
            expected,
        })
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            k: crate::DEFAULT_K,
            error_rate: crate::DEFAULT_ERROR_RATE,
            expected: None,
        }
    }
}

/// Fill a table with every kmer of records, stop on first error
pub fn build_table<I>(
    records: I,
    k: usize,
    expected: u64,
    error_rate: f64,
) -> error::Result<KmerTable>
where
    I: IntoIterator<Item = error::Result<Record>>,
{
    let mut table = KmerTable::new(k, expected, error_rate)?;

    fill_table(&mut table, records)?;

    Ok(table)
}

/// Add every kmer of records in table, stop on first error
pub fn fill_table<I>(table: &mut KmerTable, records: I) -> error::Result<()>
where
    I: IntoIterator<Item = error::Result<Record>>,
{
    let k = table.k();
    let mut nb_record = 0u64;

    for record in records {
        let record = record?;

        for kmer in kmer::kmers(&record, k)? {
            table.add(kmer);
        }

        nb_record += 1;
    }

    log::debug!(
        "{} records read, {} kmer seen at least twice",
        nb_record,
        table.len()
    );

    Ok(())
}

/// Count kmer of a file or of all files of a directory
pub fn count_path<P>(path: P, params: &Params) -> error::Result<KmerTable>
where
    P: AsRef<std::path::Path>,
{
    let paths = if path.as_ref().is_dir() {
        input::list_directory(path)?
    } else {
        vec![path.as_ref().to_path_buf()]
    };

    count_files(&paths, params)
}

/// Count kmer of files in one table, files are read twice if expected number of kmer isn't set
pub fn count_files<P>(paths: &[P], params: &Params) -> error::Result<KmerTable>
where
    P: AsRef<std::path::Path>,
{
    let expected = match params.expected {
        Some(expected) => expected,
        None => kmer::estimate_kmer_count(input::read_files(paths)?, params.k)?,
    };

    build_table(
        input::read_files(paths)?,
        params.k,
        expected.max(1),
        params.error_rate,
    )
}

/// Count kmer of each file in a separate table on rayon thread pool, then merge tables.
///
/// All tables use the same filter size, the sum of expected kmer of each file.
///
/// A kmer seen once in each of several files is never promote in any table and merge can't
/// recover it, so result can count fewer kmer than [count_files].
pub fn par_count_files<P>(paths: &[P], params: &Params) -> error::Result<KmerTable>
where
    P: AsRef<std::path::Path> + Sync,
{
    input::common_format(paths)?;

    let expected = match params.expected {
        Some(expected) => expected,
        None => paths
            .par_iter()
            .map(|path| kmer::estimate_kmer_count(input::read_file(path)?, params.k))
            .collect::<error::Result<Vec<u64>>>()?
            .into_iter()
            .sum(),
    }
    .max(1);

    log::info!(
        "count {} files in parallel, filter size for {} kmer",
        paths.len(),
        expected
    );

    let tables = paths
        .par_iter()
        .map(|path| {
            build_table(
                input::read_file(path)?,
                params.k,
                expected,
                params.error_rate,
            )
        })
        .collect::<error::Result<Vec<KmerTable>>>()?;

    let mut tables = tables.into_iter();
    let mut merged = match tables.next() {
        Some(table) => table,
        None => KmerTable::new(params.k, expected, params.error_rate)?,
    };

    for table in tables {
        merged.merge(&table)?;
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    fn write(directory: &std::path::Path, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = directory.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();

        path
    }

    #[test]
    fn params() {
        assert!(Params::new(31, 0.01, None).is_ok());
        assert!(matches!(
            Params::new(0, 0.01, None),
            Err(error::Error::InvalidK)
        ));
        assert!(Params::new(31, 0.0, None).unwrap_err().is_parameter());
        assert!(Params::new(31, 0.01, Some(0)).unwrap_err().is_parameter());
        assert_eq!(Params::default().k, crate::DEFAULT_K);
    }

    #[test]
    fn build() {
        let records = vec![
            Ok(Record::new(b"r1", b"AAAAA", None)),
            Ok(Record::new(b"r2", b"ACGT", None)),
        ];

        let table = build_table(records, 3, 100, 0.01).unwrap();

        assert_eq!(table.get(b"AAA"), 3);
        assert_eq!(table.get(b"ACG"), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn build_error() {
        let records = vec![
            Ok(Record::new(b"r1", b"AAAAA", None)),
            Err(error::Error::Cancelled),
        ];

        assert!(matches!(
            build_table(records, 3, 100, 0.01),
            Err(error::Error::Cancelled)
        ));
        assert!(build_table(Vec::new(), 0, 100, 0.01).is_err());
    }

    #[test]
    fn path() {
        let directory = tempfile::tempdir().unwrap();
        let file = write(directory.path(), "a.fa", b">r1\nAAAA\nAA\n>r2\nCCC\n");

        let params = Params::new(3, 0.01, None).unwrap();
        let table = count_path(&file, &params).unwrap();

        assert_eq!(table.get(b"AAA"), 4);
        assert_eq!(table.get(b"CCC"), 1);

        write(directory.path(), "b.fa", b">r3\nCCC\n");
        let table = count_path(directory.path(), &params).unwrap();

        assert_eq!(table.get(b"AAA"), 4);
        assert_eq!(table.get(b"CCC"), 2);
    }

    #[test]
    fn parallel() {
        let directory = tempfile::tempdir().unwrap();
        let a = write(directory.path(), "a.fastq", b"@a\nAAAAC\n+\nIIIII\n");
        let b = write(directory.path(), "b.fastq", b"@b\nAAAAG\n+\nIIIII\n");
        let c = write(directory.path(), "c.fastq", b"@c\nGGGG\n+\nIIII\n");

        let params = Params::new(3, 0.01, None).unwrap();
        let sequential = count_files(&[&a, &b, &c], &params).unwrap();
        let parallel = par_count_files(&[&a, &b, &c], &params).unwrap();

        for kmer in [&b"AAA"[..], &b"AAC"[..], &b"AAG"[..], &b"GGG"[..]] {
            assert_eq!(sequential.get(kmer), parallel.get(kmer));
        }
        assert_eq!(parallel.get(b"AAA"), 4);
        assert_eq!(parallel.get(b"GGG"), 2);
    }

    #[test]
    fn parallel_singleton() {
        let directory = tempfile::tempdir().unwrap();
        let a = write(directory.path(), "a.fa", b">a\nACGT\n");
        let b = write(directory.path(), "b.fa", b">b\nACGT\n");

        let params = Params::new(4, 0.01, Some(1_000)).unwrap();
        let sequential = count_files(&[&a, &b], &params).unwrap();
        let parallel = par_count_files(&[&a, &b], &params).unwrap();

        assert_eq!(sequential.get(b"ACGT"), 2);
        assert_eq!(sequential.len(), 1);
        assert!(parallel.is_empty());
    }

    #[test]
    fn parallel_mismatch() {
        let directory = tempfile::tempdir().unwrap();
        let a = write(directory.path(), "a.fastq", b"@a\nAAAAC\n+\nIIIII\n");
        let b = write(directory.path(), "b.fa", b">b\nAAAAG\n");

        let params = Params::default();
        assert!(matches!(
            par_count_files(&[a, b], &params),
            Err(error::Error::FormatMismatch { .. })
        ));
    }
}
