use anyhow::Result;
use dstc2_dialog::{
    dialogue_indices, load_dataset_json, load_vocab, save_vocab, DataType, DialogueIndex,
    DialogueRatioSplit, KeepSplits,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_file(tag: &str) -> Result<PathBuf> {
    let stamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
    Ok(std::env::temp_dir().join(format!("dstc2_dialog_{tag}_{stamp}")))
}

/// Three train dialogues (2, 3 and 1 turns), one valid dialogue, one test dialogue.
fn corpus() -> serde_json::Value {
    let pair = |text: &str, done: bool| {
        json!([
            { "text": text, "episode_done": done, "db_result": null },
            { "text": format!("reply to {text}"), "act": { "type": "inform" } }
        ])
    };
    json!({
        "train": [
            pair("I want Thai food", false), pair("north part", true),
            pair("cheap restaurant", false), pair("any area", false), pair("thank you bye", true),
            pair("hello", false)
        ],
        "valid": [pair("expensive food", false), pair("goodbye", true)],
        "test": [pair("chinese please", true)]
    })
}

/// Load from disk, then check the partition and batching properties end to end.
#[test]
fn load_index_and_batch() -> Result<()> {
    let path = temp_file("corpus.json")?;
    std::fs::write(&path, serde_json::to_vec(&corpus())?)?;

    let ds = load_dataset_json(&path, &KeepSplits)?;
    assert_eq!(ds.train().len(), 6);
    assert_eq!(ds.all().len(), 9);
    assert_eq!(ds.all()[6].input_text, "chinese please");
    assert_eq!(ds.all()[7].input_text, "expensive food");

    assert_eq!(
        dialogue_indices(ds.train()),
        vec![
            DialogueIndex::new(0, 2),
            DialogueIndex::new(2, 5),
            DialogueIndex::new(5, 6)
        ]
    );

    let mut rng = StdRng::seed_from_u64(2024);
    let batches: Vec<_> = ds
        .batch_generator(2, DataType::All, true, &mut rng)?
        .collect();
    // The open "hello" dialogue runs into the test turn in `all`: 4 dialogues -> 2 batches.
    assert_eq!(dialogue_indices(ds.all()).len(), 4);
    assert_eq!(batches.len(), 2);
    let total: usize = batches.iter().map(Vec::len).sum();
    assert_eq!(total, ds.all().len());

    let _ = std::fs::remove_file(&path);
    Ok(())
}

#[test]
fn sequential_generation_is_stable() -> Result<()> {
    let ds = dstc2_dialog::DialogueDataset::from_value(corpus(), &KeepSplits)?;
    let draw = |seed: u64| -> Result<Vec<Vec<String>>> {
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(ds
            .batch_generator(1, DataType::Train, false, &mut rng)?
            .map(|b| b.iter().map(|t| t.input_text.clone()).collect())
            .collect())
    };
    let first = draw(1)?;
    assert_eq!(first, draw(99)?);
    assert_eq!(first[0], vec!["I want Thai food", "north part"]);
    Ok(())
}

#[test]
fn ratio_split_keeps_every_turn() -> Result<()> {
    let policy = DialogueRatioSplit::new(0.2, 0.2, 7)?;
    let ds = dstc2_dialog::DialogueDataset::from_value(corpus(), &policy)?;
    assert_eq!(ds.all().len(), 9);
    assert_eq!(ds.train().len() + ds.valid().len() + ds.test().len(), 9);
    Ok(())
}

#[test]
fn vocab_from_train_split() -> Result<()> {
    let ds = dstc2_dialog::DialogueDataset::from_value(corpus(), &KeepSplits)?;
    let path = temp_file("vocab.txt")?;
    save_vocab(ds.train(), &path)?;
    let words = load_vocab(&path)?;
    assert_eq!(words.first().map(String::as_str), Some("any"));
    assert!(words.contains(&"thai".to_string()));
    assert!(!words.contains(&"reply".to_string()));
    let mut sorted = words.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted, words);
    let _ = std::fs::remove_file(&path);
    Ok(())
}
