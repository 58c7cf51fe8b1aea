use std::io::Write;

use kmer_table::error;
use kmer_table::input;
use kmer_table::Record;

fn write(directory: &std::path::Path, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = directory.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content).unwrap();

    path
}

#[test]
fn fasta_to_csv() {
    let _ = env_logger::builder().is_test(true).try_init();

    let directory = tempfile::tempdir().unwrap();
    let reads = write(
        directory.path(),
        "reads.fasta",
        b">r1\nAAAC\nGT\n>r2\nAAACC\n>r3\nGGG\n",
    );

    let records = input::read_file(&reads).unwrap();
    let table = kmer_table::build_table(records, 3, 1_000, 0.001).unwrap();

    // r1: AAA AAC ACG CGT, r2: AAA AAC ACC, r3: GGG
    assert_eq!(table.get(b"AAA"), 2);
    assert_eq!(table.get(b"AAC"), 2);
    assert_eq!(table.get(b"ACG"), 1);
    assert_eq!(table.get(b"GGG"), 1);

    let output = directory.path().join("reads.fasta_frequencies.out");
    table.store(&output).unwrap();

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "kmer,frequency\nAAA,2\nAAC,2\n"
    );
}

#[test]
fn fastq_records() {
    let directory = tempfile::tempdir().unwrap();
    let reads = write(directory.path(), "reads.fastq", b"@r1\nACGT\n+\nIIII\n");

    let records = input::read_file(&reads)
        .unwrap()
        .collect::<error::Result<Vec<Record>>>()
        .unwrap();

    assert_eq!(records, vec![Record::new(b"r1", b"ACGT", Some(b"IIII"))]);
}

#[test]
fn repeated_kmer() {
    let records = vec![Ok(Record::new(b"r1", b"AAAAA", None))];

    let table = kmer_table::build_table(records, 3, 10, 0.01).unwrap();

    let mut output = Vec::new();
    table.write(&mut output).unwrap();

    assert_eq!(table.get(b"AAA"), 3);
    assert_eq!(String::from_utf8(output).unwrap(), "kmer,frequency\nAAA,3\n");
}

#[test]
fn malformed_abort() {
    let directory = tempfile::tempdir().unwrap();
    let reads = write(
        directory.path(),
        "reads.fastq",
        b"@r1\nAAAA\n+\nIIII\n@r2\nAAAA\n+\n",
    );

    let records = input::read_file(&reads).unwrap();

    assert!(matches!(
        kmer_table::build_table(records, 3, 100, 0.01),
        Err(error::Error::MalformedRecord { .. })
    ));
}

#[test]
fn directory() {
    let directory = tempfile::tempdir().unwrap();
    write(directory.path(), "a.fa", b">a\nACGTACGT\n");
    write(directory.path(), "b.fa", b">b\nACGTTT\n");

    let params = kmer_table::count::Params::new(4, 0.01, Some(1_000)).unwrap();
    let table = kmer_table::count::count_path(directory.path(), &params).unwrap();

    // a: ACGT CGTA GTAC TACG ACGT, b: ACGT CGTT GTTT
    assert_eq!(table.get(b"ACGT"), 3);
    assert_eq!(table.len(), 1);
}

#[test]
fn early_stop() {
    let directory = tempfile::tempdir().unwrap();
    let reads = write(
        directory.path(),
        "reads.fa",
        b">r1\nAC\n>r2\nGT\n>r3\nTT\n",
    );

    let first = input::read_file(&reads)
        .unwrap()
        .take(1)
        .collect::<error::Result<Vec<Record>>>()
        .unwrap();

    assert_eq!(first, vec![Record::new(b"r1", b"AC", None)]);
}
