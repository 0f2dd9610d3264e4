use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::{IgnoredAny, SeqAccess, Visitor};
use serde::Deserializer as _;

use super::models::Title;
use super::{CatalogError, CatalogLogger};

/// Reads titles from a local definitions file.
///
/// Without names the whole array is decoded. With names the array is
/// streamed and only matching elements are kept. This does blocking I/O;
/// [`CatalogClient::get_titles`](super::CatalogClient::get_titles) runs it on
/// the blocking pool.
pub(crate) fn read_titles_file(
    path: &Path,
    names: &[String],
    logger: Option<&dyn CatalogLogger>,
) -> Result<Vec<Title>, CatalogError> {
    if let Some(logger) = logger {
        let mut fields = vec![("definitions_file", path.display().to_string())];
        if !names.is_empty() {
            fields.push(("requested_titles", names.join(", ")));
        }
        logger.log_info("Reading titles from definitions file", &fields);
    }

    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    if names.is_empty() {
        let titles: Vec<Title> = serde_json::from_reader(reader)?;
        return Ok(titles);
    }

    let (titles, missing) = scan_for_titles(reader, names)?;
    if !missing.is_empty() {
        return Err(CatalogError::NotFound {
            missing: missing.into_iter().collect(),
        });
    }

    Ok(titles)
}

/// Streams a JSON array of titles, keeping the first element for each wanted name.
///
/// Returns the matches in document order together with the names that never matched.
pub fn scan_for_titles<R: std::io::Read>(
    reader: R,
    names: &[String],
) -> Result<(Vec<Title>, BTreeSet<String>), serde_json::Error> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    let result = (&mut de).deserialize_seq(MatchingTitles {
        wanted: names.iter().cloned().collect(),
    })?;
    de.end()?;
    Ok(result)
}

struct MatchingTitles {
    wanted: BTreeSet<String>,
}

impl<'de> Visitor<'de> for MatchingTitles {
    type Value = (Vec<Title>, BTreeSet<String>);

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON array of titles")
    }

    fn visit_seq<A>(mut self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut titles = Vec::new();

        while !self.wanted.is_empty() {
            let Some(title) = seq.next_element::<Title>()? else {
                break;
            };
            let matched = title.name().is_some_and(|name| self.wanted.remove(name));
            if matched {
                titles.push(title);
            }
        }

        // Skip the rest without building titles.
        while seq.next_element::<IgnoredAny>()?.is_some() {}

        Ok((titles, self.wanted))
    }
}
