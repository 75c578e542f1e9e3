//! Command implementations for the homophony CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::GeneratorConfig;
use crate::corpus::CorpusGenerator;
use crate::error::Result;
use crate::homonym::{Dictionary, HomonymIndex, HomonymLoader};
use crate::mistake::MistakeInjector;
use crate::parallel::WorkerPool;
use crate::phonetic::PhoneticNormalizer;

/// Execute a CLI command.
pub fn execute_command(args: HomophonyArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Normalize(normalize_args) => normalize_words(normalize_args),
        Command::Homonyms(homonyms_args) => build_homonyms(homonyms_args.clone(), config, &args),
        Command::Generate(generate_args) => generate_corpus(generate_args.clone(), config, &args),
    }
}

/// Read the configuration file, or fall back to the defaults.
fn load_config(args: &HomophonyArgs) -> Result<GeneratorConfig> {
    match &args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            GeneratorConfig::from_file(path)
        }
        None => Ok(GeneratorConfig::default()),
    }
}

/// Print `word<TAB>key` for every word.
fn normalize_words(args: &NormalizeArgs) -> Result<()> {
    let normalizer = PhoneticNormalizer::french()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for word in &args.words {
        writeln!(out, "{word}\t{}", normalizer.normalize(word))?;
    }
    Ok(())
}

/// Build the index from a dictionary and write it as JSON.
fn build_homonyms(
    args: HomonymsArgs,
    mut config: GeneratorConfig,
    cli_args: &HomophonyArgs,
) -> Result<()> {
    if let Some(dictionary) = args.dictionary {
        config.dictionary_path = dictionary;
    }
    if args.threads.is_some() {
        config.thread_pool_size = args.threads;
    }
    config.validate()?;

    let start_time = Instant::now();
    let dictionary = Dictionary::load_from_file(&config.dictionary_path)?;
    let normalizer = PhoneticNormalizer::french()?;
    let pool = WorkerPool::new(config.pool_config())?;
    let index = HomonymIndex::build(dictionary.words(), &normalizer, &pool)?;

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            index.write_json(&mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            index.write_json(&mut out)?;
            writeln!(out)?;
        }
    }

    output_result(
        "Homonym index built",
        &IndexBuildResult {
            words: index.len(),
            groups: index.group_count(),
            output: args.output.map(|p| p.to_string_lossy().to_string()),
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Load the index and write one shard of samples per input file.
fn generate_corpus(
    args: GenerateArgs,
    mut config: GeneratorConfig,
    cli_args: &HomophonyArgs,
) -> Result<()> {
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(dictionary) = args.dictionary {
        config.dictionary_path = dictionary;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.threads.is_some() {
        config.thread_pool_size = args.threads;
    }
    if let Some(probability) = args.max_mistake_probability {
        config.max_mistake_probability = probability;
    }
    config.validate()?;

    let start_time = Instant::now();
    let index = HomonymLoader::from_config(&config).load()?;
    let injector = MistakeInjector::new(Arc::new(index)).with_rate(config.mistake_rate());
    let pool = WorkerPool::new(config.pool_config())?;
    let generator = CorpusGenerator::new(Arc::new(injector), pool).with_seed(config.seed);

    let stats = generator.generate(&args.inputs, &args.output)?;

    output_result(
        "Training samples generated",
        &GenerationResult {
            output_dir: args.output.to_string_lossy().to_string(),
            stats,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;

    use super::*;
    use crate::corpus::read_samples;

    #[test]
    fn test_homonyms_command_writes_index() {
        let dir = tempfile::tempdir().unwrap();
        let dictionary = dir.path().join("french");
        let output = dir.path().join("homonyms.json");
        fs::write(&dictionary, "vert\nverre\nchat\n").unwrap();

        let args = HomophonyArgs::try_parse_from([
            "homophony",
            "-q",
            "homonyms",
            "--dictionary",
            dictionary.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();
        execute_command(args).unwrap();

        let index: HomonymIndex =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(&index.group("verre").unwrap()[..], &["vert", "verre"]);
    }

    #[test]
    fn test_generate_command_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let dictionary = dir.path().join("french");
        let data_dir = dir.path().join("data");
        let corpus = dir.path().join("wiki_00");
        let output = dir.path().join("out");
        fs::write(&dictionary, "vert\nverre\nvers\n").unwrap();
        fs::write(&corpus, "<doc id=\"1\">\nUn verre vert.\n</doc>\n").unwrap();

        let args = HomophonyArgs::try_parse_from([
            "homophony",
            "-q",
            "generate",
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--dictionary",
            dictionary.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--seed",
            "1",
            corpus.to_str().unwrap(),
        ])
        .unwrap();
        execute_command(args).unwrap();

        assert!(data_dir.join("homonyms.json").exists());
        let samples = read_samples(output.join(CorpusGenerator::shard_file_name(0))).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].inputs, "Un verre vert .");
        assert_eq!(samples[0].targets, "Un verre vert .");
        assert_eq!(samples[1].targets, "Un verre vert .");
    }

    #[test]
    fn test_generate_rejects_bad_probability() {
        let dir = tempfile::tempdir().unwrap();
        let args = HomophonyArgs::try_parse_from([
            "homophony",
            "-q",
            "generate",
            "--output",
            dir.path().join("out").to_str().unwrap(),
            "--max-mistake-probability",
            "1.5",
            "wiki_00",
        ])
        .unwrap();
        assert!(execute_command(args).is_err());
    }
}
