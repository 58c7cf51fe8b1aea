//! Select parser from file extension and chain record of many files.
//!
//! Format check is perform on every path before any file is open, files are open one after another.

/* std use */
use std::collections::VecDeque;

/* project use */
use crate::cancel::CancelToken;
use crate::error;
use crate::fasta;
use crate::fastq;
use crate::lines::Lines;
use crate::record::Record;

type FileReader = std::io::BufReader<std::fs::File>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Fasta,
    Fastq,
}

impl Format {
    /// Select format from file extension `.fa`, `.fasta` or `.fastq`
    pub fn from_path<P>(path: P) -> error::Result<Self>
    where
        P: AsRef<std::path::Path>,
    {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("fa") | Some("fasta") => Ok(Format::Fasta),
            Some("fastq") => Ok(Format::Fastq),
            _ => Err(error::Error::UnsupportedFormat {
                path: path.as_ref().to_path_buf(),
            }),
        }
    }
}

/// Record reader of one input
pub enum Reader<R> {
    Fasta(fasta::Reader<R>),
    Fastq(fastq::Reader<R>),
}

impl<R> Reader<R>
where
    R: std::io::BufRead,
{
    pub fn new(format: Format, lines: Lines<R>) -> Self {
        match format {
            Format::Fasta => Reader::Fasta(fasta::Reader::from_lines(lines)),
            Format::Fastq => Reader::Fastq(fastq::Reader::from_lines(lines)),
        }
    }
}

impl<R> Iterator for Reader<R>
where
    R: std::io::BufRead,
{
    type Item = error::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Reader::Fasta(reader) => reader.next(),
            Reader::Fastq(reader) => reader.next(),
        }
    }
}

/// Record of a list of files, in path order
pub struct Records {
    format: Format,
    paths: VecDeque<std::path::PathBuf>,
    current: Option<Reader<FileReader>>,
    cancel: Option<CancelToken>,
    failed: bool,
}

impl Records {
    fn new(
        format: Format,
        paths: VecDeque<std::path::PathBuf>,
        cancel: Option<CancelToken>,
    ) -> Self {
        Self {
            format,
            paths,
            current: None,
            cancel,
            failed: false,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    fn open(&self, path: &std::path::Path) -> error::Result<Reader<FileReader>> {
        Ok(Reader::new(
            self.format,
            Lines::from_path(path, self.cancel.clone())?,
        ))
    }
}

impl Iterator for Records {
    type Item = error::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some(reader) = self.current.as_mut() {
                match reader.next() {
                    Some(Ok(record)) => return Some(Ok(record)),
                    Some(Err(e)) => {
                        self.current = None;
                        self.failed = true;
                        return Some(Err(e));
                    }
                    None => self.current = None,
                }
            }

            let path = self.paths.pop_front()?;
            match self.open(&path) {
                Ok(reader) => self.current = Some(reader),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Read fasta or fastq file, format is select by extension
pub fn read_file<P>(path: P) -> error::Result<Records>
where
    P: AsRef<std::path::Path>,
{
    read_files(&[path])
}

/// Read files of same format, records are produce in path order
pub fn read_files<P>(paths: &[P]) -> error::Result<Records>
where
    P: AsRef<std::path::Path>,
{
    build_records(paths, None)
}

/// Read all regular files of a directory, subdirectory are ignored
pub fn read_directory<P>(path: P) -> error::Result<Records>
where
    P: AsRef<std::path::Path>,
{
    read_files(&list_directory(path)?)
}

/// Same as [read_file] but reading stop when token is cancelled
pub fn read_file_with_cancel<P>(path: P, cancel: CancelToken) -> error::Result<Records>
where
    P: AsRef<std::path::Path>,
{
    build_records(&[path], Some(cancel))
}

/// Same as [read_files] but reading stop when token is cancelled
pub fn read_files_with_cancel<P>(paths: &[P], cancel: CancelToken) -> error::Result<Records>
where
    P: AsRef<std::path::Path>,
{
    build_records(paths, Some(cancel))
}

/// Same as [read_directory] but reading stop when token is cancelled
pub fn read_directory_with_cancel<P>(path: P, cancel: CancelToken) -> error::Result<Records>
where
    P: AsRef<std::path::Path>,
{
    build_records(&list_directory(path)?, Some(cancel))
}

/// Regular files of directory sort by name
pub fn list_directory<P>(path: P) -> error::Result<Vec<std::path::PathBuf>>
where
    P: AsRef<std::path::Path>,
{
    let path = path.as_ref();
    if !path.is_dir() {
        return Err(error::Error::InvalidDirectory {
            path: path.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| error::Error::ReadDirectory {
            path: path.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    log::debug!("{} files found in {}", files.len(), path.display());

    Ok(files)
}

/// Format shared by every path, an empty list has no format
///
/// Every path must have the same extension, `a.fa` and `b.fasta` can't be read together.
pub fn common_format<P>(paths: &[P]) -> error::Result<Option<Format>>
where
    P: AsRef<std::path::Path>,
{
    let mut iter = paths.iter();

    let first = match iter.next() {
        Some(first) => first,
        None => return Ok(None),
    };
    let format = Format::from_path(first)?;
    let extension = first.as_ref().extension();

    for other in iter {
        if other.as_ref().extension() != extension {
            return Err(error::Error::FormatMismatch {
                first: first.as_ref().to_path_buf(),
                other: other.as_ref().to_path_buf(),
            });
        }
    }

    Ok(Some(format))
}

fn build_records<P>(paths: &[P], cancel: Option<CancelToken>) -> error::Result<Records>
where
    P: AsRef<std::path::Path>,
{
    let format = common_format(paths)?.unwrap_or(Format::Fasta);
    let mut paths = paths
        .iter()
        .map(|p| p.as_ref().to_path_buf())
        .collect::<VecDeque<_>>();

    let mut records = Records::new(format, VecDeque::new(), cancel);

    // first file is open immediately, so a missing file is report before any record
    if let Some(first) = paths.pop_front() {
        records.current = Some(records.open(&first)?);
    }
    records.paths = paths;

    Ok(records)
}
