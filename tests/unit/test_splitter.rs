use docuchat::models::Document;
use docuchat::services::splitter::{TextSplitter, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use std::path::PathBuf;

fn document(text: &str) -> Document {
    Document::new(
        "essay.txt".to_string(),
        PathBuf::from("essay.txt"),
        text.to_string(),
    )
}

#[test]
fn test_default_configuration() {
    let splitter = TextSplitter::default();
    assert_eq!(splitter.chunk_size(), DEFAULT_CHUNK_SIZE);
    assert_eq!(splitter.chunk_overlap(), DEFAULT_CHUNK_OVERLAP);
}

#[test]
fn test_paragraph_text_chunks_within_budget() {
    let paragraph = "What I Worked On. Before college the two main things I worked on, \
                     outside of school, were writing and programming. I didn't write essays. \
                     I wrote what beginning writers were supposed to write then, and probably \
                     still are: short stories. My stories were awful. They had hardly any plot, \
                     just characters with strong feelings, which I imagined made them deep. ";
    let text = paragraph.repeat(8);

    let splitter = TextSplitter::new(256, 64).unwrap();
    let nodes = splitter.split_document(&document(&text));

    assert!(nodes.len() > 1);
    for node in &nodes {
        assert!(!node.text.trim().is_empty());
        assert!(node.end_char - node.start_char <= 256);
    }
}

#[test]
fn test_offsets_recover_chunk_text() {
    let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
    let splitter = TextSplitter::new(20, 5).unwrap();
    let doc = document(text);
    let nodes = splitter.split_document(&doc);

    let chars: Vec<char> = text.chars().collect();
    for node in &nodes {
        let slice: String = chars[node.start_char..node.end_char].iter().collect();
        assert_eq!(slice, node.text);
        assert_eq!(node.document_id, doc.id);
        assert_eq!(node.file_name, "essay.txt");
    }
}

#[test]
fn test_each_node_has_unique_id() {
    let text = "one two three four five six seven eight nine ten ".repeat(20);
    let splitter = TextSplitter::new(64, 16).unwrap();
    let nodes = splitter.split_document(&document(&text));

    let mut ids: Vec<_> = nodes.iter().map(|node| node.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), nodes.len());
}

#[test]
fn test_multibyte_text_is_split_safely() {
    let text = "これは 日本語の テキスト です ".repeat(40);
    let splitter = TextSplitter::new(50, 10).unwrap();
    let nodes = splitter.split_document(&document(&text));

    assert!(!nodes.is_empty());
    for node in &nodes {
        // Offsets are in characters, so reslicing by chars must round-trip
        let chars: Vec<char> = text.chars().collect();
        let slice: String = chars[node.start_char..node.end_char].iter().collect();
        assert_eq!(slice, node.text);
    }
}
