//! Document metadata types.
//!
//! Provides [`Metadata`], the multi-valued field record owned by the caller
//! of an extraction, and [`DocumentMetadata`] for the document information
//! dictionary fields a decoder copies into that record.

use std::collections::BTreeMap;

/// Field holding the complete captured text.
pub const FULLTEXT: &str = "fulltext";
/// Field holding the truncated prefix of the captured text.
pub const SUMMARY: &str = "summary";
/// Multi-valued field holding extracted link tokens.
pub const OUTLINKS: &str = "outlinks";
/// Field holding the decoded page count.
pub const PAGE_COUNT: &str = "page_count";

pub const TITLE: &str = "title";
pub const AUTHOR: &str = "author";
pub const SUBJECT: &str = "subject";
pub const KEYWORDS: &str = "keywords";
pub const CREATOR: &str = "creator";
pub const PRODUCER: &str = "producer";
pub const CREATION_DATE: &str = "creation_date";
pub const MOD_DATE: &str = "mod_date";

/// Mapping from field name to one or more string values.
///
/// [`set`](Metadata::set) replaces whatever the field held; [`add`](Metadata::add)
/// appends to a multi-valued field. Values keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Metadata {
    fields: BTreeMap<String, Vec<String>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to a single value, replacing any previous values.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), vec![value.into()]);
    }

    /// Append a value to a field.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    /// First value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of a field, empty if the field is absent.
    pub fn get_values(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if the field has at least one value.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields and their values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Move every field of `other` into this record, replacing fields of the
    /// same name.
    pub fn merge(&mut self, other: Metadata) {
        self.fields.extend(other.fields);
    }
}

/// Document-level metadata from a document information dictionary.
///
/// All fields are optional since documents may omit the dictionary entirely
/// or include only a subset of fields.
///
/// # Date Format
///
/// Date fields (`creation_date`, `mod_date`) are stored as raw PDF date
/// strings in the format `D:YYYYMMDDHHmmSSOHH'mm'`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentMetadata {
    /// Document title.
    pub title: Option<String>,
    /// Document author.
    pub author: Option<String>,
    /// Document subject / description.
    pub subject: Option<String>,
    /// Keywords associated with the document.
    pub keywords: Option<String>,
    /// Application that created the original document.
    pub creator: Option<String>,
    /// Application that produced the PDF.
    pub producer: Option<String>,
    /// Date the document was created (raw PDF date string).
    pub creation_date: Option<String>,
    /// Date the document was last modified (raw PDF date string).
    pub mod_date: Option<String>,
}

impl DocumentMetadata {
    fn entries(&self) -> impl Iterator<Item = (&'static str, Option<&String>)> {
        [
            (TITLE, self.title.as_ref()),
            (AUTHOR, self.author.as_ref()),
            (SUBJECT, self.subject.as_ref()),
            (KEYWORDS, self.keywords.as_ref()),
            (CREATOR, self.creator.as_ref()),
            (PRODUCER, self.producer.as_ref()),
            (CREATION_DATE, self.creation_date.as_ref()),
            (MOD_DATE, self.mod_date.as_ref()),
        ]
        .into_iter()
    }

    /// Copy every present field into a [`Metadata`] record.
    ///
    /// Absent fields leave the record untouched.
    pub fn apply_to(&self, metadata: &mut Metadata) {
        for (name, value) in self.entries() {
            if let Some(value) = value {
                metadata.set(name, value.clone());
            }
        }
    }
}
