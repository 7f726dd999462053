use docuchat::services::DirectoryReader;
use docuchat::DocuChatError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_loads_supported_extensions() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "notes.txt", "plain text");
    write_file(temp_dir.path(), "readme.md", "markdown");
    write_file(temp_dir.path(), "guide.markdown", "more markdown");
    write_file(temp_dir.path(), "spec.rst", "restructured");
    write_file(temp_dir.path(), "data.csv", "a,b,c");

    let documents = DirectoryReader::new(temp_dir.path()).load_data().unwrap();

    let names: Vec<&str> = documents.iter().map(|d| d.file_name.as_str()).collect();
    assert_eq!(names, vec!["guide.markdown", "notes.txt", "readme.md", "spec.rst"]);
}

#[test]
fn test_document_fields_populated() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "essay.txt", "What I Worked On");

    let documents = DirectoryReader::new(temp_dir.path()).load_data().unwrap();

    assert_eq!(documents.len(), 1);
    let doc = &documents[0];
    assert_eq!(doc.file_name, "essay.txt");
    assert_eq!(doc.text, "What I Worked On");
    assert!(doc.path.ends_with("essay.txt"));
}

#[test]
fn test_recursive_collects_nested_relative_names() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("chapters")).unwrap();
    write_file(temp_dir.path(), "intro.txt", "introduction");
    write_file(&temp_dir.path().join("chapters"), "one.txt", "chapter one");

    let documents = DirectoryReader::new(temp_dir.path())
        .with_recursive(true)
        .load_data()
        .unwrap();

    assert_eq!(documents.len(), 2);
    assert!(documents
        .iter()
        .any(|d| d.file_name == format!("chapters{}one.txt", std::path::MAIN_SEPARATOR)));
}

#[test]
fn test_invalid_utf8_reports_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("binary.txt"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

    let result = DirectoryReader::new(temp_dir.path()).load_data();

    match result {
        Err(DocuChatError::DocumentLoad { message }) => {
            assert!(message.contains("binary.txt"));
        }
        other => panic!("expected DocumentLoad error, got {other:?}"),
    }
}

#[test]
fn test_directory_of_only_empty_files_is_error() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "a.txt", "");
    write_file(temp_dir.path(), "b.txt", "\n\n");

    let result = DirectoryReader::new(temp_dir.path()).load_data();
    assert!(matches!(result, Err(DocuChatError::DocumentLoad { .. })));
}
