use crate::{
    Capabilities, Charset, GenerationMethod, GeneratorConfig, LineEnding, NormalizedCharset,
    WordlistWriter, estimate_size, gen_accelerated, gen_wordlist, gen_wordlist_iter, gen_words,
    generate, normalize,
};
use num_traits::ToPrimitive;

fn get_charset(positions: &[&str]) -> NormalizedCharset {
    normalize(&Charset::from_positions(positions.iter().copied())).unwrap()
}

/// Runs every strategy available here and returns each one's output.
fn all_strategies(charset: &NormalizedCharset) -> Vec<(&'static str, Vec<String>)> {
    let mut results = vec![
        ("list", gen_wordlist(charset).unwrap()),
        ("iter", gen_wordlist_iter(charset).collect()),
        ("words", gen_words(charset).collect()),
    ];
    if let Ok(words) = gen_accelerated(charset, &Capabilities::probe()) {
        results.push(("accelerated", words.collect()));
    }
    results
}

fn assert_equivalent(positions: &[&str]) {
    let charset = get_charset(positions);
    let expected_len = estimate_size(&charset).to_usize().unwrap();
    let results = all_strategies(&charset);
    let (_, reference) = &results[0];

    assert_eq!(reference.len(), expected_len);
    for (name, words) in &results[1..] {
        assert_eq!(words, reference, "{} differs from list for {:?}", name, positions);
    }
}

#[test]
fn test_cross_strategy_equivalence() {
    assert_equivalent(&["123", "ABC"]);
    assert_equivalent(&["xyz"]);
    assert_equivalent(&["123", "ABC", " !\"$"]);
    assert_equivalent(&["321", "CBAA", "$\" !\""]);
    assert_equivalent(&["ab", "c", "def", "g", "hi"]);
    assert_equivalent(&["αβγ", "日本", "🦀x"]);
}

#[test]
fn test_cross_strategy_equivalence_wide() {
    assert_equivalent(&["0123456789", "abcdefghij", "ABCDEFGHIJ", "!@#$%"]);
}

#[test]
fn test_odometer_order() {
    let words = gen_wordlist(&get_charset(&["123", "ABC"])).unwrap();
    assert_eq!(
        words,
        vec!["1A", "1B", "1C", "2A", "2B", "2C", "3A", "3B", "3C"]
    );
}

#[test]
fn test_single_position() {
    let words: Vec<String> = gen_wordlist_iter(&get_charset(&["xyz"])).collect();
    assert_eq!(words, vec!["x", "y", "z"]);
    assert!(words.iter().all(|w| w.chars().count() == 1));
}

#[test]
fn test_deduplication() {
    let charset = get_charset(&["aab", "cc"]);
    assert_eq!(charset, get_charset(&["ab", "c"]));

    let words: Vec<String> = gen_words(&charset).collect();
    assert_eq!(words, vec!["ac", "bc"]);
}

#[test]
fn test_rejection() {
    assert!(normalize(&Charset::new()).is_err());
    assert!(normalize(&Charset::new().position(0, "")).is_err());
}

#[test]
fn test_word_length_matches_positions() {
    let charset = get_charset(&["ab", "cd", "ef", "gh"]);
    for word in gen_wordlist_iter(&charset) {
        assert_eq!(word.chars().count(), charset.positions());
    }
}

#[test]
fn test_early_cancellation() {
    // 10,000 combinations, only three consumed
    let charset = get_charset(&["0123456789"; 4]);
    let mut iter = gen_wordlist_iter(&charset);
    let first: Vec<String> = iter.by_ref().take(3).collect();

    assert_eq!(first, vec!["0000", "0001", "0002"]);
    assert_eq!(iter.produced(), 3);
}

#[test]
fn test_generate_dispatches_by_size() {
    let small = generate(
        &Charset::from_positions(["0123456789"; 2]),
        &GeneratorConfig::default(),
    )
    .unwrap();
    assert_eq!(small.strategy(), GenerationMethod::List);

    let large = generate(
        &Charset::from_positions(["0123456789"; 7]),
        &GeneratorConfig::default(),
    )
    .unwrap();
    assert_eq!(large.strategy(), GenerationMethod::Iter);
    assert_eq!(large.into_iter().nth(12), Some("0000012".to_string()));
}

#[test]
fn test_written_output_identical_across_strategies() {
    let charset = get_charset(&["123", "ABC", " !\"$"]);

    for ending in [LineEnding::Lf, LineEnding::Crlf] {
        let outputs: Vec<Vec<u8>> = all_strategies(&charset)
            .into_iter()
            .map(|(_, words)| {
                let mut buf = Vec::new();
                let mut writer = WordlistWriter::new(&mut buf).line_ending(ending);
                writer.write_words(&words).unwrap();
                writer.finish().unwrap();
                buf
            })
            .collect();

        for output in &outputs[1..] {
            assert_eq!(output, &outputs[0]);
        }
        let expected_first = format!("1A {}", ending.as_str());
        assert!(outputs[0].starts_with(expected_first.as_bytes()));
    }
}
