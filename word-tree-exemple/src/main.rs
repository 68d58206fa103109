use std::env;

use word_tree_core::model::word_tree::WordTree;
use word_tree_core::{format_completions, CompletionInput, Framing, Ranking};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Vocabulary file: a record count header, then "word frequency" pairs
    // sorted by word. The first argument overrides the default path.
    let path = env::args().nth(1).unwrap_or_else(|| "./data/word_list.txt".to_owned());
    let tree = WordTree::new(&path)?;
    println!("Loaded '{}': {} words, {} nodes", tree.name(), tree.len(), tree.node_count());

    // Default input: 5 completions, least frequent first, last character dropped
    let mut input = CompletionInput::default();

    // A zero limit is rejected
    match input.set_limit(0) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("Limit 0 is invalid, must be at least 1"),
    }

    for prefix in ["th", "wor", "pl", "zz"] {
        let completions = tree.complete(prefix, &input);
        println!("{prefix:>4} -> {:?}", format_completions(&completions, input.framing));
    }

    // Most frequent words first, full words in the line
    input.ranking = Ranking::MostFrequent;
    input.framing = Framing::Plain;
    input.set_limit(3)?;
    for prefix in ["th", "wor", "pl", "zz"] {
        let completions = tree.complete(prefix, &input);
        for completion in &completions {
            println!("{prefix:>4} -> {} ({})", completion.word, completion.frequency);
        }
        println!("{prefix:>4} => {:?}", format_completions(&completions, input.framing));
    }

    Ok(())
}
