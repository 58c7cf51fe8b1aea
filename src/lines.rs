//! Line source of every parser.
//!
//! Line terminator (`\n` or `\r\n`) are remove. Reader is drop, and file close, at end of input,
//! on first error or on cancellation.

/* crate use */
use bstr::io::BufReadExt;

/* project use */
use crate::cancel::CancelToken;
use crate::error;

pub struct Lines<R> {
    inner: Option<bstr::io::ByteLines<R>>,
    cancel: Option<CancelToken>,
    line_number: u64,
}

impl<R> Lines<R>
where
    R: std::io::BufRead,
{
    pub fn new(reader: R) -> Self {
        Self {
            inner: Some(reader.byte_lines()),
            cancel: None,
            line_number: 0,
        }
    }

    pub fn with_cancel(reader: R, cancel: CancelToken) -> Self {
        Self {
            inner: Some(reader.byte_lines()),
            cancel: Some(cancel),
            line_number: 0,
        }
    }

    /// Number of line read
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

impl Lines<std::io::BufReader<std::fs::File>> {
    /// Open file at path
    pub fn from_path<P>(path: P, cancel: Option<CancelToken>) -> error::Result<Self>
    where
        P: AsRef<std::path::Path>,
    {
        let file = std::fs::File::open(path.as_ref()).map_err(|source| error::Error::OpenFile {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        log::info!("read {}", path.as_ref().display());

        let reader = std::io::BufReader::new(file);
        Ok(match cancel {
            Some(token) => Self::with_cancel(reader, token),
            None => Self::new(reader),
        })
    }
}

impl<R> Iterator for Lines<R>
where
    R: std::io::BufRead,
{
    type Item = error::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let inner = self.inner.as_mut()?;

        if self.cancel.as_ref().map_or(false, |c| c.is_cancelled()) {
            self.inner = None;
            return Some(Err(error::Error::Cancelled));
        }

        match inner.next() {
            Some(Ok(line)) => {
                self.line_number += 1;
                Some(Ok(line))
            }
            Some(Err(source)) => {
                self.inner = None;
                Some(Err(error::Error::ReadLine { source }))
            }
            None => {
                self.inner = None;
                None
            }
        }
    }
}
