use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use flate2::read::GzDecoder;
use memmap2::Mmap;
use serde::de::DeserializeOwned;

use crate::input::{InputError, RegionPayload};
use crate::model::Region;

/// Parses a JSON input file. Plain JSON is memory-mapped and parsed in place;
/// `.gz` files are stream-decoded.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let file = File::open(path)?;
    let parse_err = |e: serde_json::Error| InputError::Parse(format!("{}: {e}", path.display()));
    if path.extension().is_some_and(|ext| ext == "gz") {
        let reader = BufReader::new(GzDecoder::new(file));
        serde_json::from_reader(reader).map_err(parse_err)
    } else {
        let mmap = unsafe { Mmap::map(&file)? };
        serde_json::from_slice(&mmap[..]).map_err(parse_err)
    }
}

pub fn read_payload_file(path: &Path) -> Result<RegionPayload, InputError> {
    read_json_file(path)
}

/// Per-region payloads loaded so far. An entry goes from absent to loaded
/// and is only ever replaced by a newer load, never dropped.
#[derive(Debug, Default)]
pub struct PayloadCache {
    entries: BTreeMap<Region, Arc<RegionPayload>>,
}

impl PayloadCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, region: Region) -> Option<Arc<RegionPayload>> {
        self.entries.get(&region).cloned()
    }

    pub fn insert(&mut self, region: Region, payload: RegionPayload) -> Arc<RegionPayload> {
        let payload = Arc::new(payload);
        self.entries.insert(region, Arc::clone(&payload));
        payload
    }

    pub fn get_or_load<F>(&mut self, region: Region, load: F) -> Result<Arc<RegionPayload>, InputError>
    where
        F: FnOnce(Region) -> Result<RegionPayload, InputError>,
    {
        if let Some(hit) = self.get(region) {
            tracing::debug!(region = %region, "payload cache hit");
            return Ok(hit);
        }
        let payload = load(region)?;
        Ok(self.insert(region, payload))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
