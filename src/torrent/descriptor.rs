use crate::bencode::BencodeValue;
use crate::error::{MagnetizeError, Result};
use super::display::format_size;
use super::InfoHash;
use std::collections::HashSet;
use std::fmt;
use url::Url;

/// A file in the torrent payload
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path components relative to the torrent root
    pub path: Vec<String>,
    /// Size in bytes
    pub length: u64,
}

impl FileEntry {
    pub fn path_display(&self) -> String {
        self.path.join("/")
    }
}

/// Read-only view of a torrent descriptor.
///
/// Built once from a fully decoded descriptor; the identifier is
/// computed at construction and never recomputed.
#[derive(Debug, Clone)]
pub struct TorrentDescriptor {
    info_hash: InfoHash,
    name: String,
    tracker_tiers: Vec<Vec<String>>,
    creation_date: Option<i64>,
    comment: Option<String>,
    created_by: Option<String>,
    files: Vec<FileEntry>,
    total_size: u64,
    piece_length: u64,
    multi_file: bool,
}

impl TorrentDescriptor {
    pub fn from_bencode(value: &BencodeValue) -> Result<Self> {
        let dict = value.as_dict().ok_or(MagnetizeError::WrongType {
            field: "torrent",
            expected: "a dictionary",
        })?;

        let info_value = dict
            .get(b"info".as_ref())
            .ok_or(MagnetizeError::MissingField("info"))?;
        let info = info_value.as_dict().ok_or(MagnetizeError::WrongType {
            field: "info",
            expected: "a dictionary",
        })?;

        // Hash the untouched info subtree before anything else is derived
        // from it
        let info_hash = InfoHash::of(info_value);

        let name = info
            .get(b"name".as_ref())
            .ok_or(MagnetizeError::MissingField("name"))?
            .as_str()
            .ok_or(MagnetizeError::WrongType {
                field: "name",
                expected: "a UTF-8 string",
            })?
            .to_string();

        let piece_length = info
            .get(b"piece length".as_ref())
            .ok_or(MagnetizeError::MissingField("piece length"))?
            .as_integer()
            .ok_or(MagnetizeError::WrongType {
                field: "piece length",
                expected: "an integer",
            })?;
        if piece_length <= 0 {
            return Err(MagnetizeError::WrongType {
                field: "piece length",
                expected: "a positive integer",
            });
        }
        let piece_length = piece_length as u64;

        let (files, total_size, multi_file) = parse_files(info, &name)?;
        let tracker_tiers = parse_trackers(dict)?;

        let creation_date = value.dict_get_int(b"creation date");
        let comment = value.dict_get_str(b"comment").map(String::from);
        let created_by = value.dict_get_str(b"created by").map(String::from);

        Ok(TorrentDescriptor {
            info_hash,
            name,
            tracker_tiers,
            creation_date,
            comment,
            created_by,
            files,
            total_size,
            piece_length,
            multi_file,
        })
    }

    pub fn info_hash(&self) -> &InfoHash {
        &self.info_hash
    }

    /// Identifier as 40 lowercase hex characters
    pub fn identifier(&self) -> String {
        self.info_hash.to_hex()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    /// Creation time in Unix seconds
    pub fn creation_date(&self) -> Option<i64> {
        self.creation_date
    }

    pub fn is_multi_file(&self) -> bool {
        self.multi_file
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// One label per file: "path (1.5 KB)"
    pub fn file_labels(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|f| format!("{} ({})", f.path_display(), format_size(f.length)))
            .collect()
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Human-readable total size
    pub fn size(&self) -> String {
        format_size(self.total_size)
    }

    pub fn piece_length(&self) -> u64 {
        self.piece_length
    }

    /// Piece count and chunk size, e.g. "5 pieces @ 512.0 KB".
    ///
    /// The count over-shoots by one when the total size divides evenly.
    pub fn piece_summary(&self) -> String {
        let pieces = self.total_size / self.piece_length + 1;
        format!("{} pieces @ {}", pieces, format_size(self.piece_length))
    }

    pub fn tracker_tiers(&self) -> &[Vec<String>] {
        &self.tracker_tiers
    }

    /// Flat list of tracker URIs in tier order
    pub fn trackers(&self) -> Vec<&str> {
        self.tracker_tiers
            .iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    pub fn magnet_link(&self) -> String {
        format!(
            "magnet:?xt=urn:btih:{}&dn={}",
            self.info_hash.to_hex(),
            self.name
        )
    }

    pub fn magnet_link_with_trackers(&self) -> String {
        let mut link = self.magnet_link();
        for tracker in self.trackers() {
            link.push_str("&tr=");
            link.push_str(tracker);
        }
        link
    }
}

impl fmt::Display for TorrentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn parse_files(
    info: &indexmap::IndexMap<Vec<u8>, BencodeValue>,
    name: &str,
) -> Result<(Vec<FileEntry>, u64, bool)> {
    if let Some(files_value) = info.get(b"files".as_ref()) {
        // Multi-file mode
        let files_list = files_value.as_list().ok_or(MagnetizeError::WrongType {
            field: "files",
            expected: "a list",
        })?;
        if files_list.is_empty() {
            return Err(MagnetizeError::WrongType {
                field: "files",
                expected: "a non-empty list",
            });
        }

        let mut files = Vec::new();
        let mut total = 0u64;

        for file_value in files_list {
            let file_dict = file_value.as_dict().ok_or(MagnetizeError::WrongType {
                field: "files",
                expected: "a list of dictionaries",
            })?;

            let length = file_dict
                .get(b"length".as_ref())
                .ok_or(MagnetizeError::MissingField("length"))?
                .as_integer()
                .ok_or(MagnetizeError::WrongType {
                    field: "length",
                    expected: "an integer",
                })?;
            if length < 0 {
                return Err(MagnetizeError::WrongType {
                    field: "length",
                    expected: "a non-negative integer",
                });
            }

            let path_list = file_dict
                .get(b"path".as_ref())
                .ok_or(MagnetizeError::MissingField("path"))?
                .as_list()
                .ok_or(MagnetizeError::WrongType {
                    field: "path",
                    expected: "a list",
                })?;

            let path = path_list
                .iter()
                .map(|component| {
                    component
                        .as_str()
                        .map(String::from)
                        .ok_or(MagnetizeError::WrongType {
                            field: "path",
                            expected: "a list of UTF-8 strings",
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            total += length as u64;
            files.push(FileEntry {
                path,
                length: length as u64,
            });
        }

        Ok((files, total, true))
    } else {
        // Single-file mode: the name is the sole path
        let length = info
            .get(b"length".as_ref())
            .ok_or(MagnetizeError::MissingField("length"))?
            .as_integer()
            .ok_or(MagnetizeError::WrongType {
                field: "length",
                expected: "an integer",
            })?;
        if length < 0 {
            return Err(MagnetizeError::WrongType {
                field: "length",
                expected: "a non-negative integer",
            });
        }

        let file = FileEntry {
            path: vec![name.to_string()],
            length: length as u64,
        };

        Ok((vec![file], length as u64, false))
    }
}

/// Resolve tracker tiers from "announce-list", falling back to
/// "announce".
///
/// Duplicate URIs are dropped globally, keeping the first occurrence in
/// tier order; tiers left empty by de-duplication are omitted.
fn parse_trackers(
    dict: &indexmap::IndexMap<Vec<u8>, BencodeValue>,
) -> Result<Vec<Vec<String>>> {
    let mut tiers = Vec::new();
    let mut seen = HashSet::new();

    if let Some(tiers_value) = dict.get(b"announce-list".as_ref()) {
        let tier_list = tiers_value.as_list().ok_or(MagnetizeError::WrongType {
            field: "announce-list",
            expected: "a list",
        })?;

        for tier_value in tier_list {
            let trackers = tier_value.as_list().ok_or(MagnetizeError::WrongType {
                field: "announce-list",
                expected: "a list of lists",
            })?;

            let mut tier = Vec::new();
            for tracker_value in trackers {
                let tracker = tracker_value.as_str().ok_or(MagnetizeError::WrongType {
                    field: "announce-list",
                    expected: "a list of lists of UTF-8 strings",
                })?;
                validate_tracker(tracker)?;

                if seen.insert(tracker.to_string()) {
                    tier.push(tracker.to_string());
                }
            }

            if !tier.is_empty() {
                tiers.push(tier);
            }
        }
    } else if let Some(announce_value) = dict.get(b"announce".as_ref()) {
        let tracker = announce_value.as_str().ok_or(MagnetizeError::WrongType {
            field: "announce",
            expected: "a UTF-8 string",
        })?;
        validate_tracker(tracker)?;
        tiers.push(vec![tracker.to_string()]);
    }

    Ok(tiers)
}

/// Trackers are kept as their original text; parsing only validates them
fn validate_tracker(uri: &str) -> Result<()> {
    match Url::parse(uri) {
        Ok(_) => Ok(()),
        Err(err) => Err(MagnetizeError::InvalidTrackerUri {
            uri: uri.to_string(),
            reason: err,
        }),
    }
}
