//! Fastq parser, a record is exactly four line: `@id`, sequence, `+[id]`, quality.

/* project use */
use crate::error;
use crate::lines::Lines;
use crate::record::Record;

/// Produce [Record] from fastq lines
pub struct Reader<R> {
    lines: Lines<R>,
    failed: bool,
}

impl<R> Reader<R>
where
    R: std::io::BufRead,
{
    pub fn new(reader: R) -> Self {
        Self::from_lines(Lines::new(reader))
    }

    pub fn from_lines(lines: Lines<R>) -> Self {
        Self {
            lines,
            failed: false,
        }
    }

    /// Read next four lines, error if input stop in middle of a record
    pub fn next_record(&mut self) -> error::Result<Option<Record>> {
        let header = match self.lines.next().transpose()? {
            Some(line) => line,
            None => return Ok(None),
        };

        let sequence = self.required_line()?;
        let plus = self.required_line()?;
        let quality = self.required_line()?;

        let id = header
            .strip_prefix(b"@")
            .ok_or(error::Error::MalformedRecord {
                line: self.lines.line_number() - 3,
                reason: "fastq header must begin with '@'",
            })?;

        if !plus.starts_with(b"+") {
            return Err(error::Error::MalformedRecord {
                line: self.lines.line_number() - 1,
                reason: "fastq separator must begin with '+'",
            });
        }

        Ok(Some(Record {
            id: id.to_vec(),
            sequence,
            quality: Some(quality),
        }))
    }

    fn required_line(&mut self) -> error::Result<Vec<u8>> {
        self.lines
            .next()
            .transpose()?
            .ok_or(error::Error::MalformedRecord {
                line: self.lines.line_number(),
                reason: "fastq record isn't four line long",
            })
    }
}

impl<R> Iterator for Reader<R>
where
    R: std::io::BufRead,
{
    type Item = error::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
