//! Demo photo albums
//!
//! Static fixture data so the demo runs without a backend. Images are served
//! by picsum.photos, keyed by seed so every load shows the same photo.

use loupe_ui::GalleryImage;
use serde::Deserialize;
use std::sync::OnceLock;

/// Embedded fixture data (compiled into the binary)
const FIXTURE_JSON: &str = include_str!("../fixtures/photos.json");

const THUMBNAIL_SIZE: (u32, u32) = (240, 160);
const FULL_SIZE: (u32, u32) = (1600, 1067);

#[derive(Debug, Deserialize)]
struct FixtureData {
    albums: Vec<FixtureAlbum>,
}

#[derive(Debug, Deserialize)]
struct FixtureAlbum {
    title: String,
    /// Album is shown without keyboard handling and counter
    #[serde(default)]
    plain: bool,
    photos: Vec<FixturePhoto>,
}

#[derive(Debug, Deserialize)]
struct FixturePhoto {
    seed: String,
    caption: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub title: String,
    pub plain: bool,
    pub images: Vec<GalleryImage>,
}

static ALBUMS: OnceLock<Vec<Album>> = OnceLock::new();

fn photo_url(seed: &str, (width, height): (u32, u32)) -> String {
    format!("https://picsum.photos/seed/{}/{}/{}", seed, width, height)
}

pub fn albums() -> &'static [Album] {
    ALBUMS.get_or_init(|| {
        let fixture: FixtureData = match serde_json::from_str(FIXTURE_JSON) {
            Ok(fixture) => fixture,
            Err(e) => {
                tracing::error!("Failed to parse demo fixtures: {}", e);
                return Vec::new();
            }
        };

        fixture
            .albums
            .into_iter()
            .map(|album| Album {
                title: album.title,
                plain: album.plain,
                images: album
                    .photos
                    .iter()
                    .map(|photo| GalleryImage {
                        thumbnail_url: photo_url(&photo.seed, THUMBNAIL_SIZE),
                        full_url: photo_url(&photo.seed, FULL_SIZE),
                        alt: photo.caption.clone(),
                    })
                    .collect(),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_parse() {
        let albums = albums();
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].images.len(), 5);
        assert!(albums[1].plain);
    }

    #[test]
    fn test_thumbnail_and_full_urls_differ() {
        let image = &albums()[0].images[0];
        assert_eq!(
            image.full_url,
            "https://picsum.photos/seed/harbour/1600/1067"
        );
        assert_ne!(image.thumbnail_url, image.full_url);
        assert_eq!(image.alt, "Boats moored in the harbour");
    }
}
