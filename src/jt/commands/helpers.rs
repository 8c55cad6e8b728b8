use super::Change;
use crate::error::{JtError, Result};
use crate::model::TagDb;
use crate::tag::{TagKey, TagKind};
use crate::views::Entry;

/// `[key] name`, the line offered to the picker.
pub fn choice_line(entry: &Entry) -> String {
    if entry.name.is_empty() {
        format!("[{}]", entry.key)
    } else {
        format!("[{}] {}", entry.key, entry.name)
    }
}

/// The key between the leading `[` and the first `]` of a picked line.
pub fn extract_token(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix('[')?;
    let end = rest.find(']')?;
    let token = rest[..end].trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Classifies a user-supplied key, failing with every accepted shape.
pub fn parse_tag(raw: &str) -> Result<TagKey> {
    raw.trim().parse()
}

/// Like [`parse_tag`], but only category, id and extension keys are accepted.
pub fn parse_taxonomy_tag(raw: &str) -> Result<TagKey> {
    let key = parse_tag(raw)?;
    if key.kind() == TagKind::Directory {
        return Err(JtError::InvalidFormat(format!(
            "'{}' is a directory; expected AC (e.g. 31), AC.ID (e.g. 31.11) or AC.ID+EXT (e.g. 31.11+0001)",
            key
        )));
    }
    Ok(key)
}

/// The line printed for an extension after a rename or move: one per linked
/// directory, or the bare tag if it has none.
pub fn extension_changes(db: &TagDb, key: &str) -> Vec<Change> {
    let Some(record) = db.ext.get(key) else {
        return Vec::new();
    };
    let entry = Entry {
        key: key.to_string(),
        name: record.name.clone(),
    };
    if record.dirs.is_empty() {
        return vec![Change::Tagged {
            kind: TagKind::Extension,
            key: entry.key,
            name: entry.name,
        }];
    }
    record
        .dirs
        .iter()
        .map(|dir| Change::Attached {
            dir: dir.clone(),
            ext: entry.clone(),
        })
        .collect()
}

/// The directory half of a link line.
pub fn dir_entry(db: &TagDb, dir: &str) -> Entry {
    Entry {
        key: dir.to_string(),
        name: db.dir_name(dir).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_lines_round_trip_through_extract() {
        let entry = Entry {
            key: "31.11+0001".into(),
            name: "2024 [draft]".into(),
        };
        let line = choice_line(&entry);
        assert_eq!(line, "[31.11+0001] 2024 [draft]");
        assert_eq!(extract_token(&line), Some("31.11+0001"));

        let bare = Entry {
            key: "31.11".into(),
            name: String::new(),
        };
        assert_eq!(extract_token(&choice_line(&bare)), Some("31.11"));
    }

    #[test]
    fn extract_rejects_unbracketed_lines() {
        assert_eq!(extract_token("31.11 Taxes"), None);
        assert_eq!(extract_token("[31.11 Taxes"), None);
        assert_eq!(extract_token("[] nothing"), None);
    }

    #[test]
    fn taxonomy_tags_exclude_directories() {
        assert!(parse_taxonomy_tag(" 31.11 ").is_ok());
        assert!(matches!(
            parse_taxonomy_tag("0000_0000_0000_0001"),
            Err(JtError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_taxonomy_tag("3.11"),
            Err(JtError::InvalidFormat(_))
        ));
    }
}
