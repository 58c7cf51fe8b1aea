//! Fasta parser.
//!
//! Lines are group in block that end with a header line (`>`). Header at end of block `i` is the id of
//! record, sequence is the concatenation of non header line of block `i + 1`. So at most two block are
//! buffered: the block that provide id and the block that provide sequence.

/* crate use */
use bstr::ByteSlice;

/* project use */
use crate::error;
use crate::group::GroupUntilExt;
use crate::group::TryGroupUntil;
use crate::lines::Lines;
use crate::record::Record;

type Block = Vec<Vec<u8>>;

#[allow(clippy::ptr_arg)]
fn is_header(line: &Vec<u8>) -> bool {
    line.starts_with(b">")
}

/// Number of line of first block that come before first header
fn skipped_lines(block: &[Vec<u8>]) -> usize {
    match block.last() {
        Some(line) if is_header(line) => block.len() - 1,
        _ => block.len(),
    }
}

/// Produce [Record] from fasta lines
pub struct Reader<R> {
    blocks: TryGroupUntil<Lines<R>, Vec<u8>, fn(&Vec<u8>) -> bool>,
    previous: Option<Block>,
    started: bool,
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
            blocks: lines.try_group_until(is_header as fn(&Vec<u8>) -> bool),
            previous: None,
            started: false,
        }
    }

    pub fn next_record(&mut self) -> error::Result<Option<Record>> {
        if !self.started {
            self.started = true;
            self.previous = self.blocks.next().transpose()?;

            if let Some(block) = self.previous.as_ref() {
                let skipped = skipped_lines(block);
                if skipped != 0 {
                    log::warn!("{} line before first fasta header are ignored", skipped);
                }
            }
        }

        let id = match self
            .previous
            .as_ref()
            .and_then(|block| block.last())
            .filter(|line| is_header(line))
        {
            Some(header) => header[1..].to_vec(),
            None => return Ok(None),
        };

        let next = self.blocks.next().transpose()?;

        let sequence = next
            .as_ref()
            .map(|block| {
                block
                    .iter()
                    .filter(|line| !is_header(line))
                    .flat_map(|line| line.iter().copied())
                    .collect::<Vec<u8>>()
            })
            .unwrap_or_default();

        log::trace!(
            "fasta record {} of length {}",
            id.to_str_lossy(),
            sequence.len()
        );

        self.previous = next;

        Ok(Some(Record {
            id,
            sequence,
            quality: None,
        }))
    }
}

impl<R> Iterator for Reader<R>
where
    R: std::io::BufRead,
{
    type Item = error::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.previous = None;
                Some(Err(e))
            }
        }
    }
}
