use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use homophony::corpus::{CorpusGenerator, read_samples};
use homophony::error::Result;
use homophony::homonym::{Dictionary, HomonymIndex, HomonymLoader};
use homophony::mistake::{MistakeInjector, MistakeRate, SentencePair};
use homophony::parallel::{WorkerPool, WorkerPoolConfig};
use homophony::phonetic::PhoneticNormalizer;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::tempdir;

const DICTIONARY: &[&str] = &[
    "eau", "haut", "au", "o", "vert", "verre", "vers", "ver", "cent", "sent", "sang", "sans",
    "saint", "sein", "sain", "fois", "foie", "foi", "lac", "laque", "chat", "chas", "mère",
    "mer", "le", "la", "est",
];

fn build_index() -> HomonymIndex {
    let dictionary = Dictionary::from_words(DICTIONARY.iter().copied());
    let normalizer = PhoneticNormalizer::french().unwrap();
    let pool = WorkerPool::new(WorkerPoolConfig::default().with_threads(3).with_batch_size(4))
        .unwrap();
    HomonymIndex::build(dictionary.words(), &normalizer, &pool).unwrap()
}

#[test]
fn test_every_word_in_exactly_its_own_group() {
    let index = build_index();

    for word in DICTIONARY {
        let group = index.group(word).unwrap();
        assert!(group.iter().any(|m| m == word), "{word} not in its group");
        for member in group.iter() {
            assert!(Arc::ptr_eq(group, index.group(member).unwrap()));
        }
    }

    let members: usize = index.groups().iter().map(|g| g.len()).sum();
    assert_eq!(members, DICTIONARY.len());
}

#[test]
fn test_groups_follow_dictionary_order() {
    let index = build_index();

    assert_eq!(&index.group("au").unwrap()[..], &["eau", "haut", "au", "o"]);
    assert_eq!(&index.group("ver").unwrap()[..], &["vert", "verre", "vers", "ver"]);
    assert_eq!(&index.group("sein").unwrap()[..], &["sans", "saint", "sein", "sain"]);
    assert_eq!(&index.group("foi").unwrap()[..], &["fois", "foie", "foi"]);
    assert_eq!(&index.group("mer").unwrap()[..], &["mère", "mer"]);
}

#[test]
fn test_full_substitution_draws_from_groups() {
    let index = Arc::new(build_index());
    let injector = MistakeInjector::new(index.clone()).with_rate(MistakeRate::Fixed(1.0));
    let mut rng = StdRng::seed_from_u64(5);

    let pairs: Vec<SentencePair> = injector
        .inject("Le verre est vert. La mer a un lac.", &mut rng)
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(pairs.len(), 4);

    for pair in pairs.iter().skip(1).step_by(2) {
        let correct: Vec<&str> = pair.correct.split(' ').collect();
        let mistake: Vec<&str> = pair.mistake.split(' ').collect();
        assert_eq!(correct.len(), mistake.len());

        for (word, replacement) in correct.iter().zip(&mistake) {
            match index.group(word) {
                Some(group) => assert!(group.iter().any(|m| m == replacement)),
                None => assert_eq!(word, replacement),
            }
        }
    }
}

#[test]
fn test_no_substitution_keeps_sentences() {
    let injector =
        MistakeInjector::new(Arc::new(build_index())).with_rate(MistakeRate::Fixed(0.0));
    let mut rng = StdRng::seed_from_u64(5);

    for pair in injector.inject("Le verre est vert. Oui !", &mut rng) {
        let pair = pair.unwrap();
        assert_eq!(pair.correct, pair.mistake);
    }
}

#[test]
fn test_generate_from_cached_index() {
    let dir = tempdir().unwrap();
    let dictionary = dir.path().join("french");
    fs::write(&dictionary, DICTIONARY.join("\n")).unwrap();

    let corpus_a = dir.path().join("wiki_00");
    let corpus_b = dir.path().join("wiki_01");
    fs::write(
        &corpus_a,
        "<doc id=\"1\" title=\"Eau\">\nL'eau est haute. Le lac est vert.\n\n</doc>\n",
    )
    .unwrap();
    fs::write(&corpus_b, "<doc id=\"2\">\nLe chat boit.\n</doc>\n").unwrap();

    let index = HomonymLoader::new(dir.path().join("data"))
        .with_dictionary(&dictionary)
        .load()
        .unwrap();
    let injector = Arc::new(MistakeInjector::new(Arc::new(index)));

    let run = |output: &str| {
        let pool = WorkerPool::new(WorkerPoolConfig::default().with_threads(2)).unwrap();
        let generator = CorpusGenerator::new(injector.clone(), pool)
            .with_seed(Some(99));
        let output = dir.path().join(output);
        let stats = generator
            .generate(&[corpus_a.clone(), corpus_b.clone()], &output)
            .unwrap();
        (stats, output)
    };

    let (stats, first) = run("first");
    assert_eq!(stats.files, 2);
    assert_eq!(stats.paragraphs, 2);
    assert_eq!(stats.samples, 6);

    let (_, second) = run("second");
    for shard in 0..2 {
        let name = CorpusGenerator::shard_file_name(shard);
        assert_eq!(
            read_samples(first.join(&name)).unwrap(),
            read_samples(second.join(&name)).unwrap()
        );
    }

    let targets: HashSet<String> = read_samples(first.join(CorpusGenerator::shard_file_name(1)))
        .unwrap()
        .into_iter()
        .map(|s| s.targets)
        .collect();
    assert_eq!(targets, HashSet::from(["Le chat boit .".to_string()]));
}
