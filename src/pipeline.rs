//! The file round trip around the coding stages: count the source file,
//! write its encoding, read that back and write the decoding.

use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::{Path, PathBuf};

use log::info;

use crate::codec::{Codec, CodecOptions};
use crate::frequency::FrequencyTable;

pub const DEFAULT_SOURCE: &str = "amostra.txt";
pub const DEFAULT_ENCODED: &str = "codificado.txt";
pub const DEFAULT_DECODED: &str = "decodificado.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub source: PathBuf,
    pub encoded: PathBuf,
    pub decoded: PathBuf,
    /// Largest source file accepted, in bytes. `None` accepts any size.
    pub max_input_bytes: Option<u64>,
    pub options: CodecOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            encoded: PathBuf::from(DEFAULT_ENCODED),
            decoded: PathBuf::from(DEFAULT_DECODED),
            max_input_bytes: None,
            options: CodecOptions::default(),
        }
    }
}

/// Errors that can occur while running the pipeline
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: crate::Error,
    },
    #[error("{}: input is larger than {limit} bytes", path.display())]
    InputTooLarge { path: PathBuf, limit: u64 },
    #[error(transparent)]
    Coding(#[from] crate::Error),
}

impl PipelineError {
    fn file(path: &Path) -> impl FnOnce(crate::Error) -> Self + '_ {
        move |source| PipelineError::File {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub input_bytes: usize,
    pub distinct_symbols: usize,
    pub encoded_bits: usize,
    pub decoded_bytes: usize,
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every phase in order.
    ///
    /// Nothing is written if the tree or the encoding cannot be built. A
    /// decoding failure leaves the bytes decoded so far in the output file.
    pub fn run(&self) -> Result<Report, PipelineError> {
        let config = &self.config;

        let text = self.read_source()?;
        let frequencies = FrequencyTable::from_bytes(&text);
        info!(
            "Read {} bytes ({} distinct) from {}",
            text.len(),
            frequencies.distinct(),
            config.source.display()
        );

        let codec =
            Codec::from_frequencies(&frequencies, config.options).map_err(crate::Error::from)?;
        // Encode fully before creating the file so a failure leaves no artifact.
        let encoded = codec.encode(&text).map_err(crate::Error::from)?;

        let encoded_bits = write_file(&config.encoded, encoded.as_bytes())?;
        info!("Wrote {encoded_bits} bits to {}", config.encoded.display());

        let encoded = std::fs::read(&config.encoded)
            .map_err(|e| PipelineError::file(&config.encoded)(e.into()))?;

        let decoded = File::create(&config.decoded)
            .map_err(|e| PipelineError::file(&config.decoded)(e.into()))?;
        let decoded_bytes = codec
            .decoder()
            .decode_text_to_writer(&encoded, BufWriter::new(decoded))
            .map_err(PipelineError::file(&config.decoded))?;
        info!("Wrote {decoded_bytes} bytes to {}", config.decoded.display());

        Ok(Report {
            input_bytes: text.len(),
            distinct_symbols: frequencies.distinct(),
            encoded_bits,
            decoded_bytes,
        })
    }

    fn read_source(&self) -> Result<Vec<u8>, PipelineError> {
        let path = &self.config.source;
        let mut file = File::open(path).map_err(|e| PipelineError::file(path)(e.into()))?;

        let mut text = Vec::new();
        match self.config.max_input_bytes {
            Some(limit) => {
                file.by_ref()
                    .take(limit.saturating_add(1))
                    .read_to_end(&mut text)
                    .map_err(|e| PipelineError::file(path)(e.into()))?;
                if text.len() as u64 > limit {
                    return Err(PipelineError::InputTooLarge {
                        path: path.clone(),
                        limit,
                    });
                }
            }
            None => {
                file.read_to_end(&mut text)
                    .map_err(|e| PipelineError::file(path)(e.into()))?;
            }
        }
        Ok(text)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<usize, PipelineError> {
    use std::io::Write;

    let file = File::create(path).map_err(|e| PipelineError::file(path)(e.into()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .and_then(|()| writer.flush())
        .map_err(|e| PipelineError::file(path)(e.into()))?;
    Ok(contents.len())
}
