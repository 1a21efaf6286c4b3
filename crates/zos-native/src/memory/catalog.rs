//! In-memory data set catalog.
//!
//! Names are stored upper-cased. Partitioned data sets hold their members in
//! a sorted map so directory listings come back in collating order.

use std::collections::BTreeMap;

use crate::error::{NativeError, NativeResult};
use crate::records::{DataSetAttributes, DataSetEntry, MemberEntry};

use super::content_etag;

/// Volume serial assigned to every allocation.
const DEFAULT_VOLSER: &str = "VOL001";

#[derive(Debug, Clone)]
enum Contents {
    Sequential(String),
    Partitioned(BTreeMap<String, String>),
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    attributes: DataSetAttributes,
    volser: String,
    contents: Contents,
}

/// Cataloged data sets keyed by fully qualified name.
#[derive(Debug, Default)]
pub(crate) struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

/// Split `NAME(MEMBER)` into its data set and member parts.
pub(crate) fn split_member(dsn: &str) -> (String, Option<String>) {
    let dsn = dsn.trim().to_ascii_uppercase();
    if let Some(open) = dsn.find('(') {
        if let Some(member) = dsn[open + 1..].strip_suffix(')') {
            return (dsn[..open].to_string(), Some(member.to_string()));
        }
    }
    (dsn, None)
}

impl Catalog {
    pub(crate) fn list(&self, pattern: &str) -> Vec<DataSetEntry> {
        let pattern = pattern.to_ascii_uppercase();
        self.entries
            .iter()
            .filter(|(name, _)| matches_pattern(name, &pattern))
            .map(|(name, entry)| DataSetEntry {
                name: Some(name.clone()),
                dsorg: entry.attributes.dsorg.clone(),
                volser: Some(entry.volser.clone()),
                migr: Some(false),
                recfm: entry.attributes.recfm.clone(),
            })
            .collect()
    }

    pub(crate) fn members(&self, dsn: &str) -> NativeResult<Vec<MemberEntry>> {
        let (name, _) = split_member(dsn);
        match &self.entry(&name)?.contents {
            Contents::Partitioned(members) => {
                Ok(members.keys().map(MemberEntry::named).collect())
            }
            Contents::Sequential(_) => Err(NativeError::Invalid(format!(
                "data set '{name}' is not partitioned"
            ))),
        }
    }

    pub(crate) fn read(&self, dsn: &str) -> NativeResult<String> {
        let (name, member) = split_member(dsn);
        match (&self.entry(&name)?.contents, member) {
            (Contents::Sequential(data), None) => Ok(data.clone()),
            (Contents::Partitioned(members), Some(member)) => members
                .get(&member)
                .cloned()
                .ok_or_else(|| NativeError::not_found("member", format!("{name}({member})"))),
            (Contents::Partitioned(_), None) => Err(NativeError::Invalid(format!(
                "data set '{name}' is partitioned; a member name is required"
            ))),
            (Contents::Sequential(_), Some(_)) => Err(NativeError::Invalid(format!(
                "data set '{name}' is not partitioned"
            ))),
        }
    }

    /// Replace content, creating the member when absent. Returns the new ETag.
    pub(crate) fn write(&mut self, dsn: &str, data: &str, etag: &str) -> NativeResult<String> {
        let (name, member) = split_member(dsn);
        let entry = self
            .entries
            .get_mut(&name)
            .ok_or_else(|| NativeError::not_found("data set", name.clone()))?;

        let slot = match (&mut entry.contents, member) {
            (Contents::Sequential(text), None) => text,
            (Contents::Partitioned(members), Some(member)) => {
                members.entry(member).or_default()
            }
            (Contents::Partitioned(_), None) => {
                return Err(NativeError::Invalid(format!(
                    "data set '{name}' is partitioned; a member name is required"
                )))
            }
            (Contents::Sequential(_), Some(_)) => {
                return Err(NativeError::Invalid(format!(
                    "data set '{name}' is not partitioned"
                )))
            }
        };

        if !etag.is_empty() {
            let current = content_etag(slot);
            if current != etag {
                return Err(NativeError::EtagMismatch {
                    name: dsn.to_string(),
                    expected: etag.to_string(),
                    actual: current,
                });
            }
        }

        *slot = data.to_string();
        Ok(content_etag(data))
    }

    pub(crate) fn create(&mut self, dsn: &str, attributes: &DataSetAttributes) -> NativeResult<()> {
        let (name, member) = split_member(dsn);
        if member.is_some() {
            return Err(NativeError::Invalid(
                "cannot allocate a data set with a member name".to_string(),
            ));
        }
        validate_name(&name)?;
        if self.entries.contains_key(&name) {
            return Err(NativeError::already_exists("data set", name));
        }

        let mut attributes = attributes.clone();
        if attributes.dsorg.is_none() {
            attributes.dsorg = Some("PS".to_string());
        }
        attributes.dsorg = attributes.dsorg.map(|d| d.to_ascii_uppercase());
        attributes.recfm = Some(
            attributes
                .recfm
                .map(|r| r.to_ascii_uppercase())
                .unwrap_or_else(|| "FB".to_string()),
        );
        attributes.lrecl.get_or_insert(80);

        let contents = if attributes.is_partitioned() {
            Contents::Partitioned(BTreeMap::new())
        } else {
            Contents::Sequential(String::new())
        };

        tracing::debug!(dsn = %name, dsorg = ?attributes.dsorg, "allocated data set");
        self.entries.insert(
            name,
            CatalogEntry {
                attributes,
                volser: DEFAULT_VOLSER.to_string(),
                contents,
            },
        );
        Ok(())
    }

    pub(crate) fn create_member(&mut self, dsn: &str) -> NativeResult<()> {
        let (name, member) = split_member(dsn);
        let member = member
            .filter(|m| !m.is_empty())
            .ok_or_else(|| NativeError::Invalid(format!("'{dsn}' does not name a member")))?;
        let entry = self
            .entries
            .get_mut(&name)
            .ok_or_else(|| NativeError::not_found("data set", name.clone()))?;
        match &mut entry.contents {
            Contents::Partitioned(members) => {
                if members.contains_key(&member) {
                    return Err(NativeError::already_exists("member", format!("{name}({member})")));
                }
                members.insert(member, String::new());
                Ok(())
            }
            Contents::Sequential(_) => Err(NativeError::Invalid(format!(
                "data set '{name}' is not partitioned"
            ))),
        }
    }

    pub(crate) fn delete(&mut self, dsn: &str) -> NativeResult<()> {
        let (name, member) = split_member(dsn);
        match member {
            None => self
                .entries
                .remove(&name)
                .map(|_| ())
                .ok_or_else(|| NativeError::not_found("data set", name)),
            Some(member) => {
                let entry = self
                    .entries
                    .get_mut(&name)
                    .ok_or_else(|| NativeError::not_found("data set", name.clone()))?;
                match &mut entry.contents {
                    Contents::Partitioned(members) => members
                        .remove(&member)
                        .map(|_| ())
                        .ok_or_else(|| {
                            NativeError::not_found("member", format!("{name}({member})"))
                        }),
                    Contents::Sequential(_) => Err(NativeError::Invalid(format!(
                        "data set '{name}' is not partitioned"
                    ))),
                }
            }
        }
    }

    fn entry(&self, name: &str) -> NativeResult<&CatalogEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| NativeError::not_found("data set", name))
    }
}

fn validate_name(name: &str) -> NativeResult<()> {
    if name.is_empty() || name.len() > 44 {
        return Err(NativeError::Invalid(format!(
            "invalid data set name '{name}'"
        )));
    }
    for qualifier in name.split('.') {
        let valid = (1..=8).contains(&qualifier.len())
            && qualifier
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || "$#@".contains(c))
            && qualifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "$#@-".contains(c));
        if !valid {
            return Err(NativeError::Invalid(format!(
                "invalid qualifier '{qualifier}' in data set name '{name}'"
            )));
        }
    }
    Ok(())
}

/// Catalog search filter matching.
///
/// `**` spans any number of qualifiers (including none), `*` matches any run
/// of characters within one qualifier and `%` matches exactly one character.
pub(crate) fn matches_pattern(name: &str, pattern: &str) -> bool {
    let name: Vec<&str> = name.split('.').collect();
    let pattern: Vec<&str> = pattern.split('.').collect();
    match_qualifiers(&name, &pattern)
}

fn match_qualifiers(name: &[&str], pattern: &[&str]) -> bool {
    match pattern.split_first() {
        None => name.is_empty(),
        Some((&"**", rest)) => (0..=name.len()).any(|skip| match_qualifiers(&name[skip..], rest)),
        Some((first, rest)) => match name.split_first() {
            Some((head, tail)) => match_qualifier(head.as_bytes(), first.as_bytes())
                && match_qualifiers(tail, rest),
            None => false,
        },
    }
}

fn match_qualifier(text: &[u8], pattern: &[u8]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((b'*', rest)) => (0..=text.len()).any(|skip| match_qualifier(&text[skip..], rest)),
        Some((b'%', rest)) => !text.is_empty() && match_qualifier(&text[1..], rest),
        Some((c, rest)) => text.first() == Some(c) && match_qualifier(&text[1..], rest),
    }
}
