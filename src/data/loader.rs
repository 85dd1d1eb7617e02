use std::path::Path;

use serde::Deserialize;

use crate::models::QuizDocument;

use super::StoreError;

/// A store file holds either a single quiz or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoreFile {
    Many(Vec<QuizDocument>),
    One(Box<QuizDocument>),
}

pub async fn load_documents_from_json<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<QuizDocument>, StoreError> {
    let path = path.as_ref();

    let json_content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    parse_documents(&json_content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_documents(json: &str) -> Result<Vec<QuizDocument>, serde_json::Error> {
    Ok(match serde_json::from_str(json)? {
        StoreFile::Many(docs) => docs,
        StoreFile::One(doc) => vec![*doc],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_single_and_list() {
        let one = r#"{ "id": "a", "title": "A", "time": 1, "questions": [] }"#;
        assert_eq!(parse_documents(one).unwrap().len(), 1);

        let many = format!("[{one}, {one}]");
        assert_eq!(parse_documents(&many).unwrap().len(), 2);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_documents("{ \"title\": 3 }").is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = load_documents_from_json("does/not/exist.json")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
