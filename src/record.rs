/// One sequence read from a fasta or fastq file, quality is only present for fastq record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub id: Vec<u8>,
    pub sequence: Vec<u8>,
    pub quality: Option<Vec<u8>>,
}

impl Record {
    pub fn new(id: &[u8], sequence: &[u8], quality: Option<&[u8]>) -> Self {
        Self {
            id: id.to_vec(),
            sequence: sequence.to_vec(),
            quality: quality.map(|q| q.to_vec()),
        }
    }
}
