use serde::{Deserialize, Serialize};
use std::fmt;

/// One album entry returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub cover_image_url: Option<String>,
}

impl Album {
    /// Human readable label, "artist - title" or just the title.
    pub fn display_name(&self) -> String {
        match self.artist.as_deref().filter(|a| !a.is_empty()) {
            Some(artist) => format!("{artist} - {}", self.title),
            None => self.title.clone(),
        }
    }
}

/// Catalog matches for one candidate title, in the catalog's relevance order.
///
/// A group is never empty: index 0 is the primary match, the rest are
/// alternatives the user may promote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResultGroup")]
pub struct ResultGroup {
    query: String,
    albums: Vec<Album>,
}

#[derive(Deserialize)]
struct RawResultGroup {
    query: String,
    albums: Vec<Album>,
}

impl TryFrom<RawResultGroup> for ResultGroup {
    type Error = String;

    fn try_from(raw: RawResultGroup) -> Result<Self, Self::Error> {
        ResultGroup::new(raw.query, raw.albums)
            .ok_or_else(|| "result group has no albums".to_string())
    }
}

impl ResultGroup {
    pub fn new(query: impl Into<String>, albums: Vec<Album>) -> Option<Self> {
        if albums.is_empty() {
            return None;
        }
        Some(Self {
            query: query.into(),
            albums,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn primary(&self) -> &Album {
        &self.albums[0]
    }

    pub fn alternatives(&self) -> &[Album] {
        &self.albums[1..]
    }

    /// Moves `album_id` to the front. Returns false if it is not in the group.
    pub fn promote(&mut self, album_id: &str) -> bool {
        match self.albums.iter().position(|a| a.id == album_id) {
            Some(index) => {
                let chosen = self.albums.remove(index);
                self.albums.insert(0, chosen);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogKind {
    Spotify,
    AppleMusic,
}

impl CatalogKind {
    pub fn id(&self) -> &'static str {
        match self {
            CatalogKind::Spotify => "spotify",
            CatalogKind::AppleMusic => "apple-music",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::Spotify => write!(f, "Spotify"),
            CatalogKind::AppleMusic => write!(f, "Apple Music"),
        }
    }
}

impl std::str::FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spotify" => Ok(CatalogKind::Spotify),
            "apple" | "apple-music" | "applemusic" => Ok(CatalogKind::AppleMusic),
            other => Err(format!("unknown catalog: {other}")),
        }
    }
}
