//! Tag identifier grammar.
//!
//! Four key shapes are used throughout jt:
//!
//! | Kind       | Shape                 | Example               |
//! |------------|-----------------------|-----------------------|
//! | Category   | `AC`                  | `31`                  |
//! | Id         | `AC.II`               | `31.11`               |
//! | Extension  | `AC.II+EEEE`          | `31.11+0001`          |
//! | Directory  | `DDDD_DDDD_DDDD_DDDD` | `0000_0000_0000_0001` |
//!
//! Each shape has its own key type, so a function that needs an extension key
//! cannot be handed a category by mistake. [`TagKey::classify`] turns a raw
//! token into whichever kind it matches. Parent extraction is a pure prefix
//! operation on the key string.

use crate::error::{JtError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static RE_AC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{2}$").expect("static regex"));
static RE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}$").expect("static regex"));
static RE_EXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}\+[0-9]{4}$").expect("static regex"));
static RE_DIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}(_[0-9]{4}){3}$").expect("static regex"));

/// Largest number a directory key can hold (16 digits).
pub const MAX_DIR_NUMBER: u64 = 9_999_999_999_999_999;

/// Largest extension number under one id (4 digits).
pub const MAX_EXT_NUMBER: u16 = 9_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Category,
    Id,
    Extension,
    Directory,
}

impl TagKind {
    /// Short label used in messages ("AC", "ID", "EXT", "DIR").
    pub fn label(&self) -> &'static str {
        match self {
            TagKind::Category => "AC",
            TagKind::Id => "ID",
            TagKind::Extension => "EXT",
            TagKind::Directory => "DIR",
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            TagKind::Category => "two digits (e.g. 31)",
            TagKind::Id => "XX.YY (e.g. 31.11)",
            TagKind::Extension => "XX.YY+ZZZZ (e.g. 31.11+0001)",
            TagKind::Directory => "XXXX_XXXX_XXXX_XXXX (e.g. 0000_0000_0000_0001)",
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            TagKind::Category => &RE_AC,
            TagKind::Id => &RE_ID,
            TagKind::Extension => &RE_EXT,
            TagKind::Directory => &RE_DIR,
        }
    }

    /// Whether `raw` matches this kind's grammar.
    pub fn matches(&self, raw: &str) -> bool {
        self.regex().is_match(raw)
    }

    fn check(&self, raw: &str) -> Result<()> {
        if self.matches(raw) {
            Ok(())
        } else {
            Err(JtError::InvalidFormat(format!(
                "'{}' is not a valid {} tag, expected {}",
                raw,
                self.label(),
                self.shape()
            )))
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

macro_rules! key_type {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            pub const KIND: TagKind = $kind;

            /// Parses `raw`, failing with `InvalidFormat` if it does not match the grammar.
            pub fn parse(raw: &str) -> Result<Self> {
                Self::KIND.check(raw)?;
                Ok(Self(raw.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = JtError;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

key_type!(
    /// A category key, `AC`.
    AcKey,
    TagKind::Category
);
key_type!(
    /// An id key, `AC.II`.
    IdKey,
    TagKind::Id
);
key_type!(
    /// An extension key, `AC.II+EEEE`.
    ExtKey,
    TagKind::Extension
);
key_type!(
    /// A directory key, four groups of four digits joined by `_`.
    DirKey,
    TagKind::Directory
);

impl IdKey {
    /// The owning category (leading two digits).
    pub fn category(&self) -> AcKey {
        AcKey(self.0[..2].to_string())
    }

    /// Same two-digit suffix under another category.
    pub fn with_category(&self, category: &AcKey) -> IdKey {
        IdKey(format!("{}{}", category.0, &self.0[2..]))
    }

    /// Prefix shared by every child extension key (`AC.II+`).
    pub fn child_prefix(&self) -> String {
        format!("{}+", self.0)
    }
}

impl AcKey {
    /// Prefix shared by every id and extension under this category (`AC.`).
    pub fn child_prefix(&self) -> String {
        format!("{}.", self.0)
    }
}

impl ExtKey {
    /// Builds `id+NNNN`, zero padded.
    pub fn from_parts(id: &IdKey, number: u16) -> Result<Self> {
        if number > MAX_EXT_NUMBER {
            return Err(JtError::InvalidFormat(format!(
                "extension number {} under '{}' exceeds {}",
                number, id, MAX_EXT_NUMBER
            )));
        }
        Ok(ExtKey(format!("{}+{:04}", id.0, number)))
    }

    /// The owning id (everything before `+`).
    pub fn id(&self) -> IdKey {
        IdKey(self.0[..5].to_string())
    }

    pub fn category(&self) -> AcKey {
        AcKey(self.0[..2].to_string())
    }

    /// The four-digit numeric suffix.
    pub fn number(&self) -> u16 {
        // Grammar guarantees four ASCII digits after '+'.
        self.0[6..].parse().unwrap_or(0)
    }

    /// Same number under another id.
    pub fn with_id(&self, id: &IdKey) -> ExtKey {
        ExtKey(format!("{}{}", id.0, &self.0[5..]))
    }
}

impl DirKey {
    /// Builds the key for slot `number`, grouped in fours.
    pub fn from_number(number: u64) -> Result<Self> {
        if number > MAX_DIR_NUMBER {
            return Err(JtError::Vault(format!(
                "directory number {} does not fit in 16 digits",
                number
            )));
        }
        let digits = format!("{:016}", number);
        let groups: Vec<&str> = (0..16).step_by(4).map(|i| &digits[i..i + 4]).collect();
        Ok(DirKey(groups.join("_")))
    }

    /// The 16-digit slot number, separators ignored.
    pub fn number(&self) -> u64 {
        self.0.replace('_', "").parse().unwrap_or(0)
    }
}

/// A token classified into one of the four key kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKey {
    Category(AcKey),
    Id(IdKey),
    Extension(ExtKey),
    Directory(DirKey),
}

impl TagKey {
    /// Classifies `raw`, trying category, id, extension, then directory.
    /// Returns `None` if no grammar matches.
    pub fn classify(raw: &str) -> Option<TagKey> {
        if TagKind::Category.matches(raw) {
            Some(TagKey::Category(AcKey(raw.to_string())))
        } else if TagKind::Id.matches(raw) {
            Some(TagKey::Id(IdKey(raw.to_string())))
        } else if TagKind::Extension.matches(raw) {
            Some(TagKey::Extension(ExtKey(raw.to_string())))
        } else if TagKind::Directory.matches(raw) {
            Some(TagKey::Directory(DirKey(raw.to_string())))
        } else {
            None
        }
    }

    pub fn kind(&self) -> TagKind {
        match self {
            TagKey::Category(_) => TagKind::Category,
            TagKey::Id(_) => TagKind::Id,
            TagKey::Extension(_) => TagKind::Extension,
            TagKey::Directory(_) => TagKind::Directory,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TagKey::Category(k) => k.as_str(),
            TagKey::Id(k) => k.as_str(),
            TagKey::Extension(k) => k.as_str(),
            TagKey::Directory(k) => k.as_str(),
        }
    }
}

impl FromStr for TagKey {
    type Err = JtError;

    fn from_str(s: &str) -> Result<Self> {
        TagKey::classify(s).ok_or_else(|| {
            JtError::InvalidFormat(format!(
                "'{}' must be one of: AC ({}), AC.ID ({}), AC.ID+EXT ({}), DIR ({})",
                s,
                TagKind::Category.shape(),
                TagKind::Id.shape(),
                TagKind::Extension.shape(),
                TagKind::Directory.shape()
            ))
        })
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_shape() {
        assert_eq!(TagKey::classify("31").unwrap().kind(), TagKind::Category);
        assert_eq!(TagKey::classify("31.11").unwrap().kind(), TagKind::Id);
        assert_eq!(
            TagKey::classify("31.11+0001").unwrap().kind(),
            TagKind::Extension
        );
        assert_eq!(
            TagKey::classify("0000_0000_0000_0001").unwrap().kind(),
            TagKind::Directory
        );
    }

    #[test]
    fn rejects_near_misses() {
        for raw in [
            "", "3", "311", "31.1", "31.111", "31.11+001", "31.11+00001", "31-11", "a1",
            "0000_0000_0000", "0000_0000_0000_00001", "0000-0000-0000-0000", "31\n",
            "３１",
        ] {
            assert!(TagKey::classify(raw).is_none(), "{raw:?} should not match");
        }
    }

    #[test]
    fn typed_parse_enforces_expected_kind() {
        assert!(AcKey::parse("31").is_ok());
        assert!(matches!(
            AcKey::parse("31.11"),
            Err(JtError::InvalidFormat(_))
        ));
        assert!(matches!(
            ExtKey::parse("31.11"),
            Err(JtError::InvalidFormat(_))
        ));
        assert!("0000_0000_0000_0001".parse::<DirKey>().is_ok());
    }

    #[test]
    fn from_str_reports_all_shapes() {
        let err = "nope".parse::<TagKey>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("AC.ID+EXT"));
        assert!(msg.contains("nope"));
    }

    #[test]
    fn parents_are_string_prefixes() {
        let ext = ExtKey::parse("31.11+0042").unwrap();
        assert_eq!(ext.id().as_str(), "31.11");
        assert_eq!(ext.category().as_str(), "31");
        assert_eq!(ext.number(), 42);
        assert_eq!(ext.id().category().as_str(), "31");
    }

    #[test]
    fn rekeys_keep_suffixes() {
        let id = IdKey::parse("31.11").unwrap();
        let ac = AcKey::parse("45").unwrap();
        assert_eq!(id.with_category(&ac).as_str(), "45.11");

        let ext = ExtKey::parse("31.11+0007").unwrap();
        let other = IdKey::parse("31.12").unwrap();
        assert_eq!(ext.with_id(&other).as_str(), "31.12+0007");
    }

    #[test]
    fn extension_from_parts_pads_and_bounds() {
        let id = IdKey::parse("01.01").unwrap();
        assert_eq!(ExtKey::from_parts(&id, 4).unwrap().as_str(), "01.01+0004");
        assert_eq!(
            ExtKey::from_parts(&id, 9999).unwrap().as_str(),
            "01.01+9999"
        );
        assert!(ExtKey::from_parts(&id, 10000).is_err());
    }

    #[test]
    fn directory_numbers_round_trip() {
        let key = DirKey::from_number(1).unwrap();
        assert_eq!(key.as_str(), "0000_0000_0000_0001");
        assert_eq!(key.number(), 1);

        let big = DirKey::from_number(1_234_567_890_123_456).unwrap();
        assert_eq!(big.as_str(), "1234_5678_9012_3456");
        assert_eq!(big.number(), 1_234_567_890_123_456);

        assert!(DirKey::from_number(MAX_DIR_NUMBER + 1).is_err());
    }
}
