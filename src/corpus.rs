//! Corpus generation.
//!
//! Corpus files hold one paragraph per line, wrapped in `<doc ...>` /
//! `</doc>` markers. Each input file is one shard: shards run in parallel on
//! the worker pool, share the homonym index read-only, and each own a random
//! stream, so no locking is needed.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{HomophonyError, Result};
use crate::mistake::{MistakeInjector, SentencePair};
use crate::parallel::WorkerPool;

const DOC_OPEN_MARKER: &str = "<doc";
const DOC_CLOSE_MARKER: &str = "</doc";

/// Whether `line` is a paragraph worth generating samples from.
///
/// Blank lines and document boundary markers are not.
///
/// ```
/// use homophony::corpus::is_valid_paragraph;
///
/// assert!(is_valid_paragraph("Bonjour le monde."));
/// assert!(!is_valid_paragraph(""));
/// assert!(!is_valid_paragraph("<doc id=1>"));
/// ```
pub fn is_valid_paragraph(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with(DOC_OPEN_MARKER) && !line.starts_with(DOC_CLOSE_MARKER)
}

/// One training record for the downstream pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// The sentence with mistakes.
    pub inputs: String,
    /// The correct sentence.
    pub targets: String,
}

impl From<SentencePair> for TrainingSample {
    fn from(pair: SentencePair) -> Self {
        TrainingSample {
            inputs: pair.mistake,
            targets: pair.correct,
        }
    }
}

/// Lazily reads paragraphs and yields their training samples.
pub struct CorpusSamples<'a, B: BufRead, R: Rng> {
    lines: Lines<B>,
    injector: &'a MistakeInjector,
    rng: R,
    pending: VecDeque<SentencePair>,
    paragraphs: usize,
}

impl<'a, B: BufRead, R: Rng> CorpusSamples<'a, B, R> {
    pub fn new(reader: B, injector: &'a MistakeInjector, rng: R) -> Self {
        Self {
            lines: reader.lines(),
            injector,
            rng,
            pending: VecDeque::new(),
            paragraphs: 0,
        }
    }

    /// Number of valid paragraphs read so far.
    pub fn paragraphs(&self) -> usize {
        self.paragraphs
    }
}

impl<B: BufRead, R: Rng> Iterator for CorpusSamples<'_, B, R> {
    type Item = Result<TrainingSample>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.pending.pop_front() {
                return Some(Ok(pair.into()));
            }

            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            if !is_valid_paragraph(&line) {
                continue;
            }
            self.paragraphs += 1;

            for pair in self.injector.inject(&line, &mut self.rng) {
                match pair {
                    Ok(pair) => self.pending.push_back(pair),
                    Err(e) => return Some(Err(e)),
                }
            }
        }
    }
}

/// Open a corpus file and iterate over its samples.
pub fn samples_from_file<'a, P: AsRef<Path>, R: Rng>(
    path: P,
    injector: &'a MistakeInjector,
    rng: R,
) -> Result<CorpusSamples<'a, BufReader<File>, R>> {
    let path = path.as_ref();
    info!("reading corpus file {}", path.display());
    let file = File::open(path)?;
    Ok(CorpusSamples::new(BufReader::new(file), injector, rng))
}

/// Counters of one shard or of a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub files: usize,
    pub paragraphs: usize,
    pub samples: usize,
}

impl GenerationStats {
    fn merge(&mut self, other: &GenerationStats) {
        self.files += other.files;
        self.paragraphs += other.paragraphs;
        self.samples += other.samples;
    }
}

/// Writes JSON-lines training samples from corpus files, one shard per file.
pub struct CorpusGenerator {
    injector: Arc<MistakeInjector>,
    pool: WorkerPool,
    seed: Option<u64>,
}

impl CorpusGenerator {
    pub fn new(injector: Arc<MistakeInjector>, pool: WorkerPool) -> Self {
        Self {
            injector,
            pool,
            seed: None,
        }
    }

    /// Make generation reproducible: shard `i` is seeded with `seed + i`.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Output file name of shard `shard`.
    pub fn shard_file_name(shard: usize) -> String {
        format!("shard-{shard:05}.jsonl")
    }

    /// Generate samples for every input into `output_dir`.
    ///
    /// Shard `i` reads `inputs[i]` and writes `shard-0000i.jsonl`. The first
    /// failing shard's error is returned.
    pub fn generate(&self, inputs: &[PathBuf], output_dir: &Path) -> Result<GenerationStats> {
        fs::create_dir_all(output_dir)?;

        let shards: Vec<(usize, &PathBuf)> = inputs.iter().enumerate().collect();
        let results = self.pool.map_batched(&shards, 1, |&(shard, input)| {
            let output = output_dir.join(Self::shard_file_name(shard));
            self.run_shard(shard, input, &output)
        })?;

        let mut total = GenerationStats::default();
        for result in results {
            total.merge(&result?);
        }
        info!(
            "generated {} samples from {} paragraphs in {} files",
            total.samples, total.paragraphs, total.files
        );
        Ok(total)
    }

    /// Generate the samples of one input file into `output`.
    pub fn run_shard(&self, shard: usize, input: &Path, output: &Path) -> Result<GenerationStats> {
        let rng = self.shard_rng(shard);
        let mut samples = samples_from_file(input, &self.injector, rng)?;
        let mut writer = BufWriter::new(File::create(output)?);

        let mut count = 0;
        for sample in samples.by_ref() {
            serde_json::to_writer(&mut writer, &sample?)?;
            writer.write_all(b"\n")?;
            count += 1;
        }
        writer.flush()?;

        debug!(
            "shard {shard}: {count} samples from {} -> {}",
            input.display(),
            output.display()
        );
        Ok(GenerationStats {
            files: 1,
            paragraphs: samples.paragraphs(),
            samples: count,
        })
    }

    fn shard_rng(&self, shard: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(shard as u64)),
            None => StdRng::from_os_rng(),
        }
    }
}

impl std::fmt::Debug for CorpusGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusGenerator")
            .field("injector", &self.injector)
            .field("pool", &self.pool)
            .field("seed", &self.seed)
            .finish()
    }
}

/// Read every sample of a JSON-lines file written by [`CorpusGenerator`].
pub fn read_samples<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingSample>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut samples = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sample = serde_json::from_str(&line).map_err(|e| {
            HomophonyError::other(format!("{}:{}: {e}", path.display(), number + 1))
        })?;
        samples.push(sample);
    }
    Ok(samples)
}
