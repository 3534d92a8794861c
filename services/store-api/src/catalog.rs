//! Static album catalog served by the storefront.

use serde::Serialize;

/// A single album listing.
#[derive(Debug, Clone, Serialize)]
pub struct Album {
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub price_cents: u32,
    pub sales: u32,
}

/// In-memory album catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    albums: Vec<Album>,
}

impl Catalog {
    /// Catalog seeded with the default storefront inventory.
    pub fn seeded() -> Self {
        let rows: [(&str, &str, &str, u32, u32); 8] = [
            ("The Best Of Men At Work", "Men At Work", "Rock", 899, 412),
            ("A Copland Celebration, Vol. I", "Aaron Copland", "Classical", 899, 57),
            ("Worlds", "Aaron Goldberg", "Jazz", 899, 133),
            ("For Those About To Rock", "AC/DC", "Rock", 899, 958),
            ("Let There Be Rock", "AC/DC", "Rock", 899, 701),
            ("Balls to the Wall", "Accept", "Metal", 899, 288),
            ("Restless and Wild", "Accept", "Metal", 899, 196),
            ("Big Ones", "Aerosmith", "Rock", 899, 845),
        ];

        let albums = rows
            .iter()
            .enumerate()
            .map(|(i, (title, artist, genre, price_cents, sales))| Album {
                id: i as u32 + 1,
                title: title.to_string(),
                artist: artist.to_string(),
                genre: genre.to_string(),
                price_cents: *price_cents,
                sales: *sales,
            })
            .collect();

        Self { albums }
    }

    /// All albums in catalog order.
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// The `count` best-selling albums, highest sales first.
    pub fn top_selling(&self, count: usize) -> Vec<&Album> {
        let mut sorted: Vec<&Album> = self.albums.iter().collect();
        sorted.sort_by(|a, b| b.sales.cmp(&a.sales).then(a.id.cmp(&b.id)));
        sorted.truncate(count);
        sorted
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_selling_orders_by_sales() {
        let catalog = Catalog::seeded();
        let top = catalog.top_selling(3);

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].title, "For Those About To Rock");
        assert!(top[0].sales >= top[1].sales);
        assert!(top[1].sales >= top[2].sales);
    }

    #[test]
    fn test_top_selling_truncates_to_catalog_size() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.top_selling(100).len(), catalog.albums().len());
    }
}
