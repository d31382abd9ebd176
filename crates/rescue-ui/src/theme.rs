use crate::resource::AssetManifest;

/// Glyphs and labels the terminal renderer uses for the map overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTheme {
    pub name: String,
    pub map_key: String,
    pub zone_glyphs: [char; 3],
    pub last_known_glyph: char,
    pub sailor_glyph: char,
    pub water_glyph: char,
}

impl MapTheme {
    pub fn new(name: impl Into<String>, map_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map_key: map_key.into(),
            zone_glyphs: ['1', '2', '3'],
            last_known_glyph: '+',
            sailor_glyph: '@',
            water_glyph: '.',
        }
    }
}

impl Default for MapTheme {
    fn default() -> Self {
        Self::new("Cape Coast", "maps/cape_coast")
    }
}

pub fn built_in_themes() -> Vec<MapTheme> {
    let manifest = AssetManifest::current();
    if manifest.maps.is_empty() {
        return vec![MapTheme::default()];
    }

    manifest
        .maps
        .iter()
        .map(|map| MapTheme::new(&map.display_name, &map.key))
        .collect()
}
