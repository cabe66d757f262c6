//! Dashboard tiles and their persisted overrides
//!
//! The built-in tiles can be given a different URL and put in a different
//! order. Both customisations live in the store as JSON; anything that fails
//! to parse is ignored and the built-in values are used.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{LaunchpadError, Result};
use crate::store::{keys, KeyValueStore};

/// Tiles per carousel page
pub const TILES_PER_PAGE: usize = 4;

/// Tile colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Red,
    Blue,
    Green,
    Orange,
    Teal,
    Pink,
}

impl Accent {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Accent::Red => (0xFF, 0x3B, 0x30),
            Accent::Blue => (0x00, 0x7A, 0xFF),
            Accent::Green => (0x34, 0xC7, 0x59),
            Accent::Orange => (0xFF, 0x95, 0x00),
            Accent::Teal => (0x5A, 0xC8, 0xFA),
            Accent::Pink => (0xFF, 0x2D, 0x55),
        }
    }
}

/// A shortcut on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: String,
    pub name: String,
    pub url: String,
    pub accent: Accent,
}

const BUILTIN_TILES: [(&str, &str, &str, Accent); 6] = [
    (
        "expired",
        "Expired",
        "https://monitor-expired-faizzz7348.replit.app",
        Accent::Red,
    ),
    (
        "routes",
        "Routes",
        "https://routes-vm-Faizzz7348.replit.app",
        Accent::Blue,
    ),
    (
        "mapper",
        "Mapper",
        "https://routes-map-Faizzz7348.replit.app",
        Accent::Green,
    ),
    (
        "sms",
        "SMS",
        "https://sms-gateway-Faizzz7348.replit.app",
        Accent::Orange,
    ),
    (
        "video",
        "Video",
        "https://video-linker-faizzz7348.replit.app",
        Accent::Teal,
    ),
    (
        "file-share",
        "File Share",
        "https://file-share-Faizzz7348.replit.app",
        Accent::Pink,
    ),
];

/// The built-in tiles in their default order
pub fn builtin_tiles() -> Vec<Tile> {
    BUILTIN_TILES
        .iter()
        .map(|(id, name, url, accent)| Tile {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            accent: *accent,
        })
        .collect()
}

fn builtin_url(id: &str) -> Option<&'static str> {
    BUILTIN_TILES
        .iter()
        .find(|(builtin, ..)| *builtin == id)
        .map(|(_, _, url, _)| *url)
}

/// Whether `url` points at the tile's built-in address once both are
/// normalised (scheme and host case, trailing slash)
fn is_builtin_url(id: &str, url: &str) -> bool {
    let Some(builtin) = builtin_url(id) else {
        return false;
    };
    match (Url::parse(builtin), Url::parse(url.trim())) {
        (Ok(builtin), Ok(url)) => builtin == url,
        _ => builtin == url,
    }
}

fn builtin_rank(id: &str) -> usize {
    BUILTIN_TILES
        .iter()
        .position(|(builtin, ..)| *builtin == id)
        .unwrap_or(usize::MAX)
}

/// Stored URL override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct UrlOverride {
    id: String,
    url: String,
}

/// Check that a tile URL is an absolute http(s) URL with a host
pub fn validate_url(raw: &str) -> Result<Url> {
    let invalid = |reason: &str| LaunchpadError::InvalidUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("only http and https are supported"));
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(invalid("missing host")),
    }
}

/// Tiles in display order with overrides applied
pub struct TileCatalog<S> {
    store: S,
    tiles: Vec<Tile>,
}

impl<S: KeyValueStore> TileCatalog<S> {
    /// Build the catalog from built-ins plus whatever the store holds
    pub fn load(store: S) -> Self {
        let mut tiles = builtin_tiles();

        if let Some(overrides) = read_json::<Vec<UrlOverride>>(&store, keys::TILE_URLS) {
            for entry in overrides {
                if let Some(tile) = tiles.iter_mut().find(|t| t.id == entry.id) {
                    tile.url = entry.url;
                }
            }
        }

        if let Some(order) = read_json::<Vec<String>>(&store, keys::TILE_ORDER) {
            tiles.sort_by_key(|tile| {
                order
                    .iter()
                    .position(|id| *id == tile.id)
                    .unwrap_or(usize::MAX)
            });
        }

        Self { store, tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    /// Whether a tile's URL differs from its built-in one
    pub fn is_overridden(&self, id: &str) -> bool {
        match self.get(id) {
            Some(tile) => builtin_url(id).is_some() && !is_builtin_url(id, &tile.url),
            None => false,
        }
    }

    /// Point a tile at a new URL
    pub fn set_url(&mut self, id: &str, url: &str) -> Result<()> {
        let url = validate_url(url)?;
        let tile = self
            .tiles
            .iter_mut()
            .find(|tile| tile.id == id)
            .ok_or_else(|| LaunchpadError::UnknownTile(id.to_string()))?;

        tile.url = match builtin_url(id) {
            Some(builtin) if is_builtin_url(id, url.as_str()) => builtin.to_string(),
            _ => url.to_string(),
        };
        tracing::info!(tile = %id, "Tile URL updated");
        self.persist_overrides()
    }

    /// Restore a tile's built-in URL
    pub fn reset_url(&mut self, id: &str) -> Result<()> {
        let builtin = builtin_url(id).ok_or_else(|| LaunchpadError::UnknownTile(id.to_string()))?;
        if let Some(tile) = self.tiles.iter_mut().find(|tile| tile.id == id) {
            tile.url = builtin.to_string();
        }
        self.persist_overrides()
    }

    /// Move the tile at `from` so it ends up at `to`
    pub fn move_tile(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.tiles.len() {
            return Err(LaunchpadError::TileIndex(from));
        }
        if to >= self.tiles.len() {
            return Err(LaunchpadError::TileIndex(to));
        }
        if from == to {
            return Ok(());
        }

        let tile = self.tiles.remove(from);
        self.tiles.insert(to, tile);
        self.persist_order()
    }

    /// Restore the built-in order
    pub fn reset_order(&mut self) -> Result<()> {
        self.tiles.sort_by_key(|tile| builtin_rank(&tile.id));
        self.store.remove(keys::TILE_ORDER)
    }

    /// Tiles split into carousel pages
    pub fn pages(&self, per_page: usize) -> Vec<&[Tile]> {
        self.tiles.chunks(per_page.max(1)).collect()
    }

    pub fn page_count(&self, per_page: usize) -> usize {
        self.tiles.len().div_ceil(per_page.max(1))
    }

    fn persist_overrides(&mut self) -> Result<()> {
        let mut overrides: Vec<UrlOverride> = self
            .tiles
            .iter()
            .filter(|tile| builtin_url(&tile.id).is_some() && !is_builtin_url(&tile.id, &tile.url))
            .map(|tile| UrlOverride {
                id: tile.id.clone(),
                url: tile.url.clone(),
            })
            .collect();
        overrides.sort_by_key(|entry| builtin_rank(&entry.id));

        if overrides.is_empty() {
            self.store.remove(keys::TILE_URLS)
        } else {
            let json = serde_json::to_string(&overrides)?;
            self.store.set(keys::TILE_URLS, &json)
        }
    }

    fn persist_order(&mut self) -> Result<()> {
        let order: Vec<&str> = self.tiles.iter().map(|tile| tile.id.as_str()).collect();
        let json = serde_json::to_string(&order)?;
        self.store.set(keys::TILE_ORDER, &json)
    }
}

fn read_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Ignoring malformed {}: {}", key, e);
            None
        }
    }
}
