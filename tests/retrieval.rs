use std::io::Write;

use serde_json::{json, Value};

use mushaf::address::{parse_range, resolve, Bound};
use mushaf::{walk, Error, Index, Mushaf, Record, Result, Source, WalkOptions};

/// Sura 1 in the simple orthography, split into letterblocks.
fn fatiha_simple() -> Value {
    json!({
        "1": {
            "1": {
                "1": ["بِسْمِ"],
                "2": ["ا", "للَّهِ"],
                "3": ["ا", "لرَّ", "حْمَنِ"],
                "4": ["ا", "لرَّ", "حِيمِ"]
            },
            "2": {
                "1": ["ا", "لْحَمْدُ"],
                "2": ["لِلَّهِ"],
                "3": ["رَ", "بِّ"],
                "4": ["ا", "لْعَا", "لَمِينَ"]
            },
            "3": {
                "1": ["ا", "لرَّ", "حْمَنِ"],
                "2": ["ا", "لرَّ", "حِيمِ"]
            },
            "4": {
                "1": ["مَا", "لِكِ"],
                "2": ["يَوْ", "مِ"],
                "3": ["ا", "لدِّ", "ينِ"]
            },
            "5": {
                "1": ["إِ", "يَّا", "كَ"],
                "2": ["نَعْبُدُ"],
                "3": ["وَ", "إِ", "يَّا", "كَ"],
                "4": ["نَسْتَعِينُ"]
            },
            "6": {
                "1": ["ا", "هْدِ", "نَا"],
                "2": ["ا", "لصِّرَ", "ا", "طَ"],
                "3": ["ا", "لْمُسْتَقِيمَ"]
            },
            "7": {
                "1": ["صِرَ", "ا", "طَ"],
                "2": ["ا", "لَّذِ", "ينَ"],
                "3": ["أَ", "نْعَمْتَ"],
                "4": ["عَلَيْهِمْ"],
                "5": ["غَيْرِ"],
                "6": ["ا", "لْمَغْضُو", "بِ"],
                "7": ["عَلَيْهِمْ"],
                "8": ["وَ", "لَا"],
                "9": ["ا", "لضَّا", "لِّينَ"]
            }
        }
    })
}

/// Same shape with the Uthmani spellings that differ in verse 1: wasla on
/// the article and a superscript alef in al-Rahman.
fn fatiha_uthmani() -> Value {
    let mut v = fatiha_simple();
    v["1"]["1"]["2"][0] = json!("ٱ");
    v["1"]["1"]["3"] = json!(["ٱ", "لرَّ", "حْمَٰنِ"]);
    v["1"]["1"]["4"][0] = json!("ٱ");
    v
}

fn store() -> Mushaf {
    Mushaf::from_json(
        &fatiha_simple().to_string(),
        &fatiha_uthmani().to_string(),
    )
    .unwrap()
}

fn collect(store: &Mushaf, range: &str, options: &WalkOptions) -> Result<Vec<Record>> {
    let (ini, end) = parse_range(range)?;
    walk(store, &ini, &end, options)?.collect()
}

fn block_options() -> WalkOptions {
    WalkOptions { blocks: true, ..WalkOptions::default() }
}

#[test]
fn first_word_in_all_four_shapes() {
    let store = store();
    let records = collect(&store, "1:1:1", &WalkOptions::default()).unwrap();
    assert_eq!(records.len(), 1);

    let r = &records[0];
    assert_eq!(r.grapheme_ar, "بِسْمِ");
    assert_eq!(r.grapheme_lt, "B₁ᵢSᵒMᵢ");
    assert_eq!(r.archigrapheme_ar, "ٮسم");
    assert_eq!(r.archigrapheme_lt, "BSM");
    assert_eq!(r.canonical_ar, "بِسْمِ");
    assert_eq!(r.index.to_string(), "1:1:1");
}

#[test]
fn block_range_across_verse_boundary() {
    let store = store();
    let records = collect(&store, "1:1:4:2-1:2:2:-1", &block_options()).unwrap();
    let indexes: Vec<String> = records.iter().map(|r| r.index.to_string()).collect();
    assert_eq!(
        indexes,
        ["1:1:4:2", "1:1:4:3", "1:2:1:1", "1:2:1:2", "1:2:2:1"]
    );
}

#[test]
fn block_range_across_word_and_verse_boundaries_skeletons() {
    let store = store();
    let records = collect(&store, "1:6:2:2-1:7:1:-1", &block_options()).unwrap();
    assert_eq!(records.len(), 8);
    assert_eq!(records[0].index.to_string(), "1:6:2:2");
    assert_eq!(records[7].index.to_string(), "1:7:1:3");

    let skeletons: Vec<&str> = records.iter().map(|r| r.archigrapheme_lt.as_str()).collect();
    assert_eq!(skeletons.join(" "), "LCR A T A LMSBFBM CR A T");
}

#[test]
fn word_with_multiple_blocks_in_blocks_mode() {
    let store = store();
    let records = collect(&store, "1:1:2:1-1:1:2:-1", &block_options()).unwrap();
    let indexes: Vec<String> = records.iter().map(|r| r.index.to_string()).collect();
    assert_eq!(indexes, ["1:1:2:1", "1:1:2:2"]);
}

#[test]
fn whole_sura_counts_and_ordering() {
    let store = store();

    let blocks = collect(&store, "", &block_options()).unwrap();
    assert_eq!(blocks.len(), 67);
    let mut prev: Option<Index> = None;
    for r in &blocks {
        let cur = Index::new(r.index.sura, r.index.verse, r.index.word, r.index.block.unwrap());
        if let Some(p) = prev {
            assert!(cur > p, "{} does not follow {}", cur, p);
        }
        prev = Some(cur);
    }

    let words = collect(&store, "", &WalkOptions::default()).unwrap();
    assert_eq!(words.len(), 29);
    // Single-word verses and single-block words are not skipped.
    assert!(words.iter().any(|r| r.index.to_string() == "1:5:2"));
}

#[test]
fn last_sentinel_equals_explicit_last_block() {
    let store = store();
    let sentinel = collect(&store, "1:1:1:1-1:1:1:-1", &block_options()).unwrap();
    let explicit = collect(&store, "1:1:1:1-1:1:1:1", &block_options()).unwrap();
    assert_eq!(sentinel, explicit);

    let sentinel = resolve(&store, &parse_range("1:2:4:-1").unwrap().1, Bound::End).unwrap();
    assert_eq!(sentinel, Index::new(1, 2, 4, 3));
}

#[test]
fn single_unit_range_yields_one_record() {
    let store = store();
    let records = collect(&store, "1:4:2:1-1:4:2:1", &block_options()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].grapheme_ar, "يَوْ");
}

#[test]
fn uthmani_source_differs_in_graphemes_not_skeletons() {
    let store = store();
    let simple = collect(&store, "1:1:3", &WalkOptions::default()).unwrap();
    let uthmani = collect(
        &store,
        "1:1:3",
        &WalkOptions { source: Source::TanzilUthmani, blocks: false },
    )
    .unwrap();

    assert_eq!(simple[0].grapheme_ar, "الرَّحْمَنِ");
    assert_eq!(uthmani[0].grapheme_ar, "ٱلرَّحْمَٰنِ");
    assert_ne!(simple[0].grapheme_lt, uthmani[0].grapheme_lt);

    // The orthographic variants share one consonantal skeleton.
    assert_eq!(simple[0].archigrapheme_ar, uthmani[0].archigrapheme_ar);
    assert_eq!(simple[0].archigrapheme_lt, "ALRGMN");
    assert_eq!(uthmani[0].archigrapheme_lt, "ALRGMN");
}

#[test]
fn grapheme_concatenation_reconstructs_words() {
    let store = store();
    let blocks = collect(&store, "1:7", &block_options()).unwrap();
    for r in &blocks {
        assert_eq!(r.grapheme_ar, r.canonical_ar);
    }
}

#[test]
fn out_of_range_start_is_invalid_not_empty() {
    let store = store();
    assert!(matches!(
        collect(&store, "1:8", &WalkOptions::default()),
        Err(Error::InvalidAddress(_))
    ));
    assert!(matches!(
        collect(&store, "2", &WalkOptions::default()),
        Err(Error::InvalidAddress(_))
    ));
}

#[test]
fn inverted_range_is_rejected() {
    let store = store();
    assert!(matches!(
        collect(&store, "1:2-1:1", &WalkOptions::default()),
        Err(Error::RangeOrder { .. })
    ));
}

#[test]
fn malformed_corpus_text_fails_the_walk_and_fuses() {
    let corpus = json!({"1": {"1": {"1": ["بِسْمِ"], "2": ["xyz"]}}}).to_string();
    let store = Mushaf::from_json(&corpus, &corpus).unwrap();
    let (ini, end) = parse_range("").unwrap();
    let mut iter = walk(&store, &ini, &end, &block_options()).unwrap();

    assert!(matches!(iter.next(), Some(Ok(_))));
    assert!(matches!(iter.next(), Some(Err(Error::Segmentation(_)))));
    assert!(iter.next().is_none());
}

#[test]
fn loads_corpus_resources_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let simple_path = dir.path().join("simple.json");
    let uthmani_path = dir.path().join("uthmani.json");
    let mut f = std::fs::File::create(&simple_path).unwrap();
    f.write_all(fatiha_simple().to_string().as_bytes()).unwrap();
    let mut f = std::fs::File::create(&uthmani_path).unwrap();
    f.write_all(fatiha_uthmani().to_string().as_bytes()).unwrap();

    let store = Mushaf::load(&simple_path, &uthmani_path).unwrap();
    let records = collect(&store, "1:1:1", &WalkOptions::default()).unwrap();
    assert_eq!(records[0].archigrapheme_lt, "BSM");
}
