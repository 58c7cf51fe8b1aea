/* crate use */
use clap::Parser;

/* project use */
use kmer_table::count;
use kmer_table::error;

#[derive(clap::Parser, Debug)]
#[clap(
    name = "kmer_table",
    version,
    about = "Count kmer seen at least twice in fasta or fastq files"
)]
struct Command {
    /// Fasta or fastq files, or one directory, all inputs must have the same format
    #[clap(required = true)]
    pub inputs: Vec<std::path::PathBuf>,

    /// Kmer size
    #[clap(short = 'k', long = "kmer-size", default_value_t = kmer_table::DEFAULT_K)]
    pub k: usize,

    /// Bloom filter false positive rate
    #[clap(short = 'e', long = "error-rate", default_value_t = kmer_table::DEFAULT_ERROR_RATE)]
    pub error_rate: f64,

    /// Expected number of kmer, estimated from inputs if not set
    #[clap(short = 'n', long = "expected")]
    pub expected: Option<u64>,

    /// Directory where table is write
    #[clap(short = 'o', long = "output", default_value = ".")]
    pub output: std::path::PathBuf,

    /// Number of thread, with more than one each file is count in a separate table before merge,
    /// a kmer seen only once in each file is then drop
    #[clap(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,

    /// Verbosity level, repeat to increase
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    pub verbose: usize,
}

/// Name of table file, `<input name>_frequencies.out`
fn output_name(input: &std::path::Path) -> std::ffi::OsString {
    let mut name = input
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| std::ffi::OsString::from("kmer"));
    name.push("_frequencies.out");

    name
}

fn main() -> error::Result<()> {
    let cmd = Command::parse();

    let level = match cmd.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let params = count::Params::new(cmd.k, cmd.error_rate, cmd.expected)?;

    let paths = if cmd.inputs.len() == 1 && cmd.inputs[0].is_dir() {
        kmer_table::input::list_directory(&cmd.inputs[0])?
    } else {
        cmd.inputs.clone()
    };

    let table = if cmd.threads > 1 && paths.len() > 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cmd.threads)
            .build_global()
            .unwrap_or_else(|e| log::warn!("rayon thread pool already set {}", e));

        count::par_count_files(&paths, &params)?
    } else {
        count::count_files(&paths, &params)?
    };

    let output = cmd.output.join(output_name(&cmd.inputs[0]));
    table.store(&output)?;

    log::info!(
        "{} kmer seen at least twice write in {}",
        table.len(),
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name() {
        assert_eq!(
            output_name(std::path::Path::new("data/reads.fastq")),
            std::ffi::OsString::from("reads.fastq_frequencies.out")
        );
        assert_eq!(
            output_name(std::path::Path::new("data/yeast/")),
            std::ffi::OsString::from("yeast_frequencies.out")
        );
    }

    #[test]
    fn cli() {
        let cmd = Command::try_parse_from([
            "kmer_table",
            "-k",
            "21",
            "-e",
            "0.001",
            "a.fa",
            "b.fa",
        ])
        .unwrap();

        assert_eq!(cmd.k, 21);
        assert_eq!(cmd.error_rate, 0.001);
        assert_eq!(cmd.expected, None);
        assert_eq!(cmd.inputs.len(), 2);
        assert_eq!(cmd.threads, 1);
    }
}
