/// One thumbnail that can open the lightbox
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryItem {
    /// Position in the gallery, stable for the widget lifetime
    pub index: usize,
    /// Full-resolution image shown in the overlay
    pub image_url: String,
    /// Alternative text carried over from the thumbnail
    pub alt: String,
}

/// Ordered, read-only collection of gallery items.
///
/// Built once when the widget attaches; indices are assigned in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gallery {
    items: Vec<GalleryItem>,
}

impl Gallery {
    /// Build a gallery from `(image_url, alt)` pairs.
    pub fn from_entries<I, U, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (U, A)>,
        U: Into<String>,
        A: Into<String>,
    {
        let items = entries
            .into_iter()
            .enumerate()
            .map(|(index, (url, alt))| GalleryItem {
                index,
                image_url: url.into(),
                alt: alt.into(),
            })
            .collect();
        Self { items }
    }

    /// Build a gallery from image URLs with empty alt text.
    pub fn from_urls<I, U>(urls: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        Self::from_entries(urls.into_iter().map(|url| (url, String::new())))
    }

    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    /// Image URL at `index`, if in range.
    pub fn url(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(|item| item.image_url.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GalleryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_insertion_order() {
        let gallery = Gallery::from_urls(["a.jpg", "b.jpg", "c.jpg"]);
        let indices: Vec<usize> = gallery.iter().map(|item| item.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(gallery.url(1), Some("b.jpg"));
    }

    #[test]
    fn test_from_entries_keeps_alt_text() {
        let gallery = Gallery::from_entries([("a.jpg", "Harbour at dawn"), ("b.jpg", "")]);
        assert_eq!(gallery.get(0).map(|i| i.alt.as_str()), Some("Harbour at dawn"));
        assert_eq!(gallery.get(1).map(|i| i.alt.as_str()), Some(""));
    }

    #[test]
    fn test_out_of_range_lookup() {
        let gallery = Gallery::from_urls(["a.jpg"]);
        assert_eq!(gallery.url(1), None);
        assert!(gallery.get(7).is_none());
    }

    #[test]
    fn test_empty_gallery() {
        let gallery = Gallery::default();
        assert!(gallery.is_empty());
        assert_eq!(gallery.len(), 0);
    }
}
