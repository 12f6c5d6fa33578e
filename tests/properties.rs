use proptest::prelude::*;
use std::io::Cursor;
use std::collections::HashMap;
use wordtable::{guide_table, offsets, prefix, table_len, Encode, Filter, Options, Sort, Stage};

fn options(count: usize) -> Options {
    let mut options = Options::default();
    options.count = count;
    options
}

fn run(stage: &dyn Stage, input: &str, count: usize) -> String {
    let mut out = Vec::new();
    stage
        .process(&mut Cursor::new(input), &mut out, &options(count))
        .unwrap();
    String::from_utf8(out).unwrap()
}

fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        "#[a-z0-9 ]{0,8}",
        "[a-zé'-]{1,8}",
    ]
}

proptest! {
    #[test]
    fn filter_keeps_first_words(lines in prop::collection::vec(line(), 1..64), seed in any::<usize>()) {
        let words: Vec<_> = lines.iter().filter(|l| !l.starts_with('#')).cloned().collect();
        prop_assume!(!words.is_empty());
        let take = 1 + seed % words.len();
        let out = run(&Filter, &(lines.join("\n") + "\n"), take);
        let expected: String = words[..take].iter().map(|w| format!("{}\n", w)).collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn encode_counts_every_terminator(words in prop::collection::vec("[a-zé]{0,6}", 1..64)) {
        let header = run(&Encode, &(words.join("\n") + "\n"), words.len());
        let total: usize = words.iter().map(|w| w.len() + 1).sum();
        let len = format!("const size_t WORDTABLE_LEN = {};", total);
        prop_assert!(header.contains(&len));
        prop_assert_eq!(header.matches("\\0\"\n").count(), words.len() - 1);
    }

    #[test]
    fn encode_is_deterministic(words in prop::collection::vec("[a-z]{1,6}", 1..16)) {
        let input = words.join("\n");
        prop_assert_eq!(run(&Encode, &input, words.len()), run(&Encode, &input, words.len()));
    }

    #[test]
    fn sort_permutes(words in prop::collection::vec("[a-zA-Zé]{0,6}", 0..64)) {
        let out = run(&Sort, &words.iter().map(|w| format!("{}\n", w)).collect::<String>(), 1);
        let mut sorted: Vec<_> = out.lines().map(String::from).collect();
        prop_assert!(sorted.windows(2).all(|w| w[0].as_bytes() <= w[1].as_bytes()));
        let mut words = words;
        words.sort();
        sorted.sort();
        prop_assert_eq!(sorted, words);
    }

    #[test]
    fn offsets_end_at_table_len(words in prop::collection::vec("[a-zé]{0,6}", 1..64)) {
        let offsets = offsets(&words).unwrap();
        prop_assert_eq!(offsets[0], 0);
        for (pair, word) in offsets.windows(2).zip(&words) {
            prop_assert_eq!((pair[1] - pair[0]) as usize, word.len() + 1);
        }
        let last = *offsets.last().unwrap() as usize;
        prop_assert_eq!(last + words.last().unwrap().len() + 1, table_len(&words));
    }

    #[test]
    fn guide_points_at_first_word(mut words in prop::collection::vec("[a-c]{0,3}", 1..64)) {
        words.sort();
        let table = guide_table(&words).unwrap();
        let mut first = HashMap::new();
        for (i, word) in words.iter().enumerate() {
            first.entry(prefix(word)).or_insert(i);
        }
        let last = words.len() - 1;
        for (slot, &entry) in table.iter().enumerate() {
            let expected = first.get(&(slot as u16)).copied().unwrap_or(last);
            prop_assert_eq!(usize::from(entry), expected);
        }
        for (key, &i) in &first {
            prop_assert_eq!(prefix(&words[i]), *key);
            prop_assert!(words[..i].iter().all(|w| prefix(w) != *key));
        }
    }
}
