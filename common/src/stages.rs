use itertools::Itertools;
use std::collections::HashMap;
use tracing::debug;

use crate::{KeyValue, Record};

const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']', '{', '}',
];

/// Lowercase `line`, blank out punctuation and split on whitespace.
fn tokenize(line: &str) -> Vec<String> {
    line.to_lowercase()
        .replace(PUNCTUATION, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Turn `(file, line)` records into `(file, word)` records.
pub fn line_preprocessing(records: Vec<Record>) -> Vec<Record> {
    let words = records
        .into_iter()
        .flat_map(|Record { file, text }| {
            tokenize(&text)
                .into_iter()
                .map(move |word| Record::new(file.as_str(), word))
        })
        .collect_vec();
    debug!("preprocessed {} words", words.len());
    words
}

pub fn mapper(records: Vec<Record>) -> Vec<KeyValue> {
    let intermediate = records
        .into_iter()
        .map(|record| KeyValue::new(record.text, 1))
        .collect_vec();
    debug!("mapped {} pairs", intermediate.len());
    intermediate
}

pub fn shuffle_and_sort(mut intermediate: Vec<KeyValue>) -> Vec<KeyValue> {
    intermediate.sort_unstable_by(|a, b| a.key.cmp(&b.key));
    debug!("sorted {} pairs", intermediate.len());
    intermediate
}

/// Sum the counts of each run of equal keys.
///
/// Input must already be sorted by key; an unsorted input yields one entry per
/// run rather than per word.
pub fn reducer(sorted: Vec<KeyValue>) -> Vec<KeyValue> {
    let reduced = sorted
        .into_iter()
        .group_by(|kv| kv.key.clone())
        .into_iter()
        .map(|(key, kvs)| KeyValue::new(key, kvs.map(|kv| kv.value).sum()))
        .collect_vec();
    debug!("reduced to {} distinct words", reduced.len());
    reduced
}

/// Word -> count accumulator fed one line at a time. Entries are only sorted
/// when the report is taken.
#[derive(Debug, Default)]
pub struct WordCounter {
    counts: HashMap<String, u64>,
}

impl WordCounter {
    pub fn add_line(&mut self, line: &str) {
        for word in tokenize(line) {
            *self.counts.entry(word).or_default() += 1;
        }
    }

    pub fn into_report(self) -> Vec<KeyValue> {
        let entries = self
            .counts
            .into_iter()
            .map(|(key, value)| KeyValue::new(key, value))
            .collect_vec();
        shuffle_and_sort(entries)
    }
}

/// Single-pass alternative to preprocess, map, sort and reduce.
pub fn count_words<'a>(lines: impl IntoIterator<Item = &'a Record>) -> Vec<KeyValue> {
    let mut counter = WordCounter::default();
    for record in lines {
        counter.add_line(&record.text);
    }
    counter.into_report()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn staged(lines: Vec<Record>) -> Vec<KeyValue> {
        reducer(shuffle_and_sort(mapper(line_preprocessing(lines))))
    }

    #[test]
    fn test_tokenize_strips_punctuation_and_case() {
        assert_eq!(
            tokenize("The quick, (BROWN) fox's \"jump\"! [a]{b};c:d?e."),
            vec!["the", "quick", "brown", "fox", "s", "jump", "a", "b", "c", "d", "e"]
        );
    }

    #[test]
    fn test_tokenize_keeps_other_symbols() {
        assert_eq!(tokenize("state-of-the-art  50%"), vec!["state-of-the-art", "50%"]);
    }

    #[test]
    fn test_line_preprocessing_keeps_file_and_order() {
        let words = line_preprocessing(vec![
            Record::new("a.txt", "Hello, world!"),
            Record::new("b.txt", "Bye"),
        ]);
        assert_eq!(
            words,
            vec![
                Record::new("a.txt", "hello"),
                Record::new("a.txt", "world"),
                Record::new("b.txt", "bye"),
            ]
        );
    }

    #[test]
    fn test_mapper_emits_one_per_word() {
        let kvs = mapper(vec![Record::new("a.txt", "x"), Record::new("a.txt", "x")]);
        assert_eq!(kvs, vec![KeyValue::new("x", 1), KeyValue::new("x", 1)]);
    }

    #[test]
    fn test_counts_the_across_variants() {
        let lines = vec![
            Record::new("a.txt", "The, the. THE"),
            Record::new("a.txt", "(the) 'the' the; tHe!"),
        ];
        let counts = staged(lines);
        assert_eq!(counts, vec![KeyValue::new("the", 7)]);
    }

    #[test]
    fn test_reducer_on_unsorted_input_splits_runs() {
        let kvs = vec![KeyValue::new("a", 1), KeyValue::new("b", 1), KeyValue::new("a", 1)];
        assert_eq!(reducer(kvs).len(), 3);
    }

    #[test]
    fn test_word_counter_accumulates_across_lines() {
        let mut counter = WordCounter::default();
        counter.add_line("b a");
        counter.add_line("A, b! b");
        assert_eq!(
            counter.into_report(),
            vec![KeyValue::new("a", 2), KeyValue::new("b", 3)]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(staged(vec![]).is_empty());
        assert!(count_words(&Vec::<Record>::new()).is_empty());
    }

    proptest! {
        #[test]
        fn prop_report_sorted_and_unique(lines in prop::collection::vec("[a-cA-C ,.!]{0,12}", 0..20)) {
            let records = lines.into_iter().map(|l| Record::new("p.txt", l)).collect_vec();
            let report = staged(records);
            for pair in report.windows(2) {
                prop_assert!(pair[0].key < pair[1].key);
            }
            prop_assert!(report.iter().all(|kv| kv.value >= 1));
        }

        #[test]
        fn prop_streaming_matches_staged(lines in prop::collection::vec("[a-dA-D ,;'()]{0,16}", 0..20)) {
            let records = lines.into_iter().map(|l| Record::new("p.txt", l)).collect_vec();
            let streamed = count_words(&records);
            prop_assert_eq!(streamed, staged(records));
        }
    }
}
