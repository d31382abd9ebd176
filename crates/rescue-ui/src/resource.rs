use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MapAsset {
    pub key: String,
    pub display_name: String,
    pub texture_path: String,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct AssetManifest {
    pub maps: Vec<MapAsset>,
}

static MANIFEST: Lazy<AssetManifest> = Lazy::new(load_manifest);

fn load_manifest() -> AssetManifest {
    if let Ok(path) = std::env::var("RESCUE_ASSET_MANIFEST") {
        if let Ok(content) = std::fs::read_to_string(&path) {
            if let Ok(manifest) = serde_json::from_str::<AssetManifest>(&content) {
                return manifest;
            } else {
                eprintln!("Failed to parse asset manifest {path}; falling back to placeholder");
            }
        } else {
            eprintln!("Failed to read asset manifest {path}; falling back to placeholder");
        }
    }

    AssetManifest::placeholder()
}

impl AssetManifest {
    pub fn placeholder() -> Self {
        Self {
            maps: vec![MapAsset {
                key: "maps/cape_coast".into(),
                display_name: "CAPE COAST".into(),
                texture_path: "maps/cape_coast.png".into(),
                width: 400,
                height: 400,
            }],
        }
    }

    pub fn current() -> &'static AssetManifest {
        &MANIFEST
    }

    pub fn primary_map(&self) -> Option<&MapAsset> {
        self.maps.first()
    }
}
