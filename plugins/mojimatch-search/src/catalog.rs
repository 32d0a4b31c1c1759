//! Title catalog records
//!
//! A catalog is a JSON array of records. Each record is searched over its
//! primary title, every localized title in `infos`, and its pronunciation.
//! Unknown fields are ignored so upstream music lists load as-is.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ahash::AHashSet;
use mojimatch_core::SearchTarget;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Alternate (e.g. localized) title of a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitleInfo {
    pub title: String,
}

/// One searchable catalog record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub infos: Vec<TitleInfo>,
}

impl CatalogEntry {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            pronunciation: None,
            infos: Vec::new(),
        }
    }

    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = Some(pronunciation.into());
        self
    }

    pub fn with_alias(mut self, title: impl Into<String>) -> Self {
        self.infos.push(TitleInfo {
            title: title.into(),
        });
        self
    }
}

impl SearchTarget for CatalogEntry {
    /// Title, then aliases, then pronunciation; repeated titles are skipped
    fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        let mut seen = AHashSet::new();
        std::iter::once(self.title.as_str())
            .chain(self.infos.iter().map(|info| info.title.as_str()))
            .chain(self.pronunciation.as_deref())
            .filter(move |title| seen.insert(*title))
    }
}

/// Parse a catalog from any reader
pub fn read_catalog(reader: impl Read) -> Result<Vec<CatalogEntry>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a catalog from a JSON file
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    let file = File::open(path)?;
    read_catalog(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const MUSICS: &str = r#"[
        {
            "id": 1,
            "seq": 1000,
            "title": "セカイはまだ始まってすらいない",
            "pronunciation": "せかいはまだはじまってすらいない",
            "infos": [{ "title": "The World Hasn't Even Started Yet", "creator": "pinocchiop" }]
        },
        { "id": 47, "title": "メルト", "pronunciation": "めると" },
        { "id": 74, "title": "独りんぼエンヴィー" }
    ]"#;

    #[test]
    fn test_read_catalog() {
        let entries = read_catalog(MUSICS.as_bytes()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].infos.len(), 1);
        assert_eq!(entries[1].pronunciation.as_deref(), Some("めると"));
        assert!(entries[2].pronunciation.is_none());
        assert!(entries[2].infos.is_empty());
    }

    #[test]
    fn test_titles_order() {
        let entries = read_catalog(MUSICS.as_bytes()).unwrap();
        let titles: Vec<&str> = entries[0].titles().collect();
        assert_eq!(
            titles,
            vec![
                "セカイはまだ始まってすらいない",
                "The World Hasn't Even Started Yet",
                "せかいはまだはじまってすらいない",
            ]
        );
    }

    #[test]
    fn test_titles_skip_duplicates() {
        let entry = CatalogEntry::new(1, "ロキ")
            .with_alias("ロキ")
            .with_pronunciation("ろき");
        let titles: Vec<&str> = entry.titles().collect();
        assert_eq!(titles, vec!["ロキ", "ろき"]);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MUSICS.as_bytes()).unwrap();
        let entries = load_catalog(file.path()).unwrap();
        assert_eq!(entries[1].title, "メルト");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_malformed_catalog() {
        let err = read_catalog(r#"[{ "title": "no id" }]"#.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
