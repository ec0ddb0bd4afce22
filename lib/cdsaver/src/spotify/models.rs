use serde::Deserialize;
use shared::catalog::Album;

// Raw search payloads, only the fields the app reads.
#[derive(Deserialize, Debug)]
pub(crate) struct SearchResponse {
    pub albums: Option<AlbumPage>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct AlbumPage {
    #[serde(default)]
    pub items: Vec<SpotifyAlbum>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct SpotifyAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct SpotifyArtist {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct SpotifyImage {
    pub url: String,
}

impl From<SpotifyAlbum> for Album {
    fn from(album: SpotifyAlbum) -> Self {
        Album {
            id: album.id,
            title: album.name,
            artist: album.artists.into_iter().next().map(|a| a.name),
            // Spotify lists images widest first.
            cover_image_url: album.images.into_iter().next().map(|i| i.url),
        }
    }
}

impl SearchResponse {
    pub fn into_albums(self) -> Vec<Album> {
        self.albums
            .map(|page| page.items.into_iter().map(Album::from).collect())
            .unwrap_or_default()
    }
}
