use serde::Deserialize;
use shared::catalog::Album;

/// Edge length used when the artwork does not report its own size.
const FALLBACK_ARTWORK_SIZE: u32 = 600;

#[derive(Deserialize, Debug)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: SearchResults,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct SearchResults {
    pub albums: Option<AlbumPage>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct AlbumPage {
    #[serde(default)]
    pub data: Vec<AppleMusicAlbum>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct AppleMusicAlbum {
    pub id: String,
    pub attributes: AlbumAttributes,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AlbumAttributes {
    pub name: String,
    pub artist_name: Option<String>,
    pub artwork: Option<Artwork>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct Artwork {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Artwork {
    /// Fills the `{w}`/`{h}` template Apple hands out with a concrete size.
    pub fn resolved_url(&self) -> String {
        let width = self.width.unwrap_or(FALLBACK_ARTWORK_SIZE);
        let height = self.height.unwrap_or(width);
        self.url
            .replace("{w}", &width.to_string())
            .replace("{h}", &height.to_string())
    }
}

impl From<AppleMusicAlbum> for Album {
    fn from(album: AppleMusicAlbum) -> Self {
        let AlbumAttributes {
            name,
            artist_name,
            artwork,
        } = album.attributes;
        Album {
            id: album.id,
            title: name,
            artist: artist_name,
            cover_image_url: artwork.map(|a| a.resolved_url()),
        }
    }
}

impl SearchResponse {
    pub fn into_albums(self) -> Vec<Album> {
        self.results
            .albums
            .map(|page| page.data.into_iter().map(Album::from).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_catalog_search() {
        let body = r#"{
            "results": {
                "albums": {
                    "href": "/v1/catalog/us/search?term=abbey+road&types=albums",
                    "next": "/v1/catalog/us/search?offset=5&term=abbey+road&types=albums",
                    "data": [
                        {
                            "id": "1441164426",
                            "type": "albums",
                            "href": "/v1/catalog/us/albums/1441164426",
                            "attributes": {
                                "name": "Abbey Road (Remastered)",
                                "artistName": "The Beatles",
                                "artwork": {
                                    "width": 1400,
                                    "height": 1400,
                                    "url": "https://is1-ssl.mzstatic.com/image/thumb/Music/{w}x{h}bb.jpeg"
                                },
                                "trackCount": 17
                            }
                        }
                    ]
                }
            },
            "meta": {"results": {"order": ["albums"], "rawOrder": ["albums"]}}
        }"#;

        let albums = serde_json::from_str::<SearchResponse>(body).unwrap().into_albums();

        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].id, "1441164426");
        assert_eq!(albums[0].display_name(), "The Beatles - Abbey Road (Remastered)");
        assert_eq!(
            albums[0].cover_image_url.as_deref(),
            Some("https://is1-ssl.mzstatic.com/image/thumb/Music/1400x1400bb.jpeg")
        );
    }

    #[test]
    fn no_album_results_is_empty() {
        let body = r#"{"results": {}, "meta": {"results": {"order": []}}}"#;
        let albums = serde_json::from_str::<SearchResponse>(body).unwrap().into_albums();
        assert!(albums.is_empty());
    }

    #[test]
    fn artwork_without_size_uses_fallback() {
        let artwork = Artwork {
            url: "https://example.com/{w}x{h}.jpg".to_string(),
            width: None,
            height: None,
        };
        assert_eq!(artwork.resolved_url(), "https://example.com/600x600.jpg");
    }
}
