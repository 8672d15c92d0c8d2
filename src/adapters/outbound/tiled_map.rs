use crate::common::{DomainError, DomainResult};
use crate::domains::grid_navigation::aggregate::Grid;
use crate::domains::grid_navigation::ports::{GridSource, MapSource};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "GRIDNAV_DATA_DIR";

const TILESET_NAME: &str = "MapEditor Tileset_woodland.png";

#[derive(Debug, Deserialize)]
struct TiledDocument {
    layers: Vec<TiledLayer>,
}

#[derive(Debug, Deserialize)]
struct TiledLayer {
    #[serde(default)]
    data: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    layers: Vec<ExportLayer<'a>>,
    tilesets: Vec<ExportTileset<'a>>,
    canvas: ExportCanvas,
}

#[derive(Debug, Serialize)]
struct ExportLayer<'a> {
    name: &'a str,
    tileset: &'a str,
    data: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct ExportTileset<'a> {
    name: &'a str,
    image: &'a str,
    imagewidth: u32,
    imageheight: u32,
    tilewidth: u32,
    tileheight: u32,
}

#[derive(Debug, Serialize)]
struct ExportCanvas {
    width: u32,
    height: u32,
}

/// Reads the first layer carrying a `data` array from a Tiled-style JSON map.
pub fn parse_tiled_map(json: &str) -> DomainResult<Grid> {
    let doc: TiledDocument = serde_json::from_str(json)?;
    let data = doc
        .layers
        .into_iter()
        .find_map(|layer| layer.data)
        .ok_or_else(|| DomainError::MapFormat {
            reason: "no layer carries a data array".to_string(),
        })?;
    if data.is_empty() {
        return Err(DomainError::MapFormat {
            reason: "layer data array is empty".to_string(),
        });
    }
    Grid::from_cells(data)
}

/// Serializes the current cell values as a single-layer Tiled-style map.
pub fn render_tiled_map(grid: &dyn GridSource) -> DomainResult<String> {
    let doc = ExportDocument {
        layers: vec![ExportLayer {
            name: "world",
            tileset: TILESET_NAME,
            data: grid.to_row_major(),
        }],
        tilesets: vec![ExportTileset {
            name: TILESET_NAME,
            image: TILESET_NAME,
            imagewidth: 512,
            imageheight: 512,
            tilewidth: 32,
            tileheight: 32,
        }],
        canvas: ExportCanvas {
            width: 1024,
            height: 1024,
        },
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Map files on disk. Relative names resolve under the base directory.
pub struct FilesystemMapSource {
    base: PathBuf,
}

impl FilesystemMapSource {
    pub fn new(base: Option<PathBuf>) -> Self {
        let base = base.unwrap_or_else(|| match env::var(DATA_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => PathBuf::from("data"),
        });
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }
}

impl MapSource for FilesystemMapSource {
    fn load_grid(&self, name: &str) -> DomainResult<Grid> {
        let path = self.resolve(name);
        let content = fs::read_to_string(&path).map_err(|e| {
            DomainError::InfrastructureError(format!("{}: {}", path.display(), e))
        })?;
        parse_tiled_map(&content)
    }

    fn save_grid(&self, name: &str, grid: &dyn GridSource) -> DomainResult<()> {
        let path = self.resolve(name);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
            }
        }
        let rendered = render_tiled_map(grid)?;
        fs::write(&path, rendered).map_err(|e| {
            DomainError::InfrastructureError(format!("{}: {}", path.display(), e))
        })?;
        Ok(())
    }
}
