use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use huffman_coding::pipeline::{
    DEFAULT_DECODED, DEFAULT_ENCODED, DEFAULT_SOURCE, Pipeline, PipelineConfig,
};
use huffman_coding::{CodecOptions, SingleSymbolCode, Strictness};

#[derive(Parser)]
#[command(
    version,
    about = "Encode a text file as a Huffman bit-string and decode it back"
)]
struct Cli {
    #[arg(short, long, default_value = DEFAULT_SOURCE)]
    /// Text file to encode
    input: PathBuf,

    #[arg(short, long, default_value = DEFAULT_ENCODED)]
    /// Where to write the encoding, one '0' or '1' per bit
    encoded: PathBuf,

    #[arg(short, long, default_value = DEFAULT_DECODED)]
    /// Where to write the decoded text
    decoded: PathBuf,

    #[arg(long)]
    /// Refuse inputs larger than this many bytes
    max_input_bytes: Option<u64>,

    #[arg(long, default_value = "false")]
    /// Read any byte other than '0' as a '1' and ignore a trailing partial code
    lenient: bool,

    #[arg(long, default_value = "false")]
    /// Give the only byte of a single-symbol input the code "0" instead of
    /// an empty code
    one_bit_single_symbol: bool,
}

impl From<Cli> for PipelineConfig {
    fn from(cli: Cli) -> Self {
        PipelineConfig {
            source: cli.input,
            encoded: cli.encoded,
            decoded: cli.decoded,
            max_input_bytes: cli.max_input_bytes,
            options: CodecOptions {
                strictness: if cli.lenient {
                    Strictness::Lenient
                } else {
                    Strictness::Strict
                },
                single_symbol: if cli.one_bit_single_symbol {
                    SingleSymbolCode::OneBit
                } else {
                    SingleSymbolCode::Empty
                },
            },
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match Pipeline::new(Cli::parse().into()).run() {
        Ok(report) => {
            println!(
                "{} bytes ({} distinct) -> {} bits -> {} bytes",
                report.input_bytes,
                report.distinct_symbols,
                report.encoded_bits,
                report.decoded_bytes
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
