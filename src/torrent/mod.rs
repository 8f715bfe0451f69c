mod descriptor;
mod display;
mod info_hash;

pub use descriptor::{FileEntry, TorrentDescriptor};
pub use display::format_size;
pub use info_hash::InfoHash;

use crate::bencode::decode;
use crate::error::Result;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Load and parse a .torrent file
pub async fn load_torrent_file<P: AsRef<Path>>(path: P) -> Result<TorrentDescriptor> {
    let data = fs::read(path.as_ref()).await?;
    debug!("Read {} bytes from {}", data.len(), path.as_ref().display());
    parse_torrent(&data)
}

/// Parse a torrent descriptor from raw bytes.
///
/// Either yields a complete descriptor or fails; there is no partial
/// result.
pub fn parse_torrent(data: &[u8]) -> Result<TorrentDescriptor> {
    let value = decode(data)?;
    let descriptor = TorrentDescriptor::from_bencode(&value)?;
    debug!(
        "Parsed torrent '{}': {} files, info hash {}",
        descriptor.name(),
        descriptor.file_count(),
        descriptor.identifier()
    );
    Ok(descriptor)
}
