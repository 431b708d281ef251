//! File naming conventions for catalog documents.
//!
//! - new data: `<ll>.<ext>`
//! - base, in order of preference: `copy_<ll>.<ext>`, then `<ll>_copy.<ext>`
//! - merge output: `merged_<ll>.<ext>`
//!
//! Parsing is case-insensitive for the fixed parts, the locale segment, and
//! the extension.

use catsync_types::LocaleId;

const BASE_PREFIX: &str = "copy_";
const BASE_SUFFIX: &str = "_copy";
const MERGED_PREFIX: &str = "merged_";

/// One of the naming conventions a base document may follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseConvention {
    /// `copy_<ll>.<ext>`
    Prefixed,
    /// `<ll>_copy.<ext>`
    Suffixed,
}

impl BaseConvention {
    /// Candidate conventions, most preferred first.
    pub const ORDER: [BaseConvention; 2] = [BaseConvention::Prefixed, BaseConvention::Suffixed];

    /// The conventional file name for `locale`.
    pub fn file_name(self, locale: &LocaleId, extension: &str) -> String {
        match self {
            Self::Prefixed => format!("{BASE_PREFIX}{locale}.{extension}"),
            Self::Suffixed => format!("{locale}{BASE_SUFFIX}.{extension}"),
        }
    }

    /// Extract the locale from a file name following this convention.
    pub fn parse(self, file_name: &str, extension: &str) -> Option<LocaleId> {
        let stem = strip_extension(file_name, extension)?;
        let segment = match self {
            Self::Prefixed => strip_prefix_ignore_case(stem, BASE_PREFIX)?,
            Self::Suffixed => strip_suffix_ignore_case(stem, BASE_SUFFIX)?,
        };
        LocaleId::parse(segment).ok()
    }
}

/// `<ll>.<ext>`
pub fn new_data_file_name(locale: &LocaleId, extension: &str) -> String {
    format!("{locale}.{extension}")
}

/// Extract the locale from a new-data file name.
pub fn parse_new_data_file_name(file_name: &str, extension: &str) -> Option<LocaleId> {
    let stem = strip_extension(file_name, extension)?;
    LocaleId::parse(stem).ok()
}

/// `merged_<ll>.<ext>`
pub fn merged_file_name(locale: &LocaleId, extension: &str) -> String {
    format!("{MERGED_PREFIX}{locale}.{extension}")
}

fn strip_extension<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
    let stem = strip_suffix_ignore_case(file_name, extension)?;
    stem.strip_suffix('.')
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    let tail = s.get(split..)?;
    if tail.eq_ignore_ascii_case(suffix) {
        s.get(..split)
    } else {
        None
    }
}
