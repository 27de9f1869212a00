use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use macroquad::{
    color::WHITE,
    math::Vec2 as MacroquadVec2,
    texture::{self, DrawTextureParams, Texture2D},
};
use wave_survivor_core::SkinId;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Enemy and player textures loaded from a sprite manifest.
///
/// Skins without an entry fall back to primitive shapes.
#[derive(Debug, Default)]
pub(crate) struct SkinAtlas {
    skins: HashMap<SkinId, Texture2D>,
    player: Option<Texture2D>,
}

impl SkinAtlas {
    pub(crate) fn from_manifest_path(path: &Path, roster: &[String]) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read sprite manifest at {}", path.display()))?;
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base, roster)?;

        let mut atlas = Self::default();
        for (slot, path) in entries {
            let bytes = fs::read(&path)
                .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
            let texture = Texture2D::from_file_with_format(&bytes, None);
            match slot {
                Slot::Player => atlas.player = Some(texture),
                Slot::Skin(skin) => {
                    let _ = atlas.skins.insert(skin, texture);
                }
            }
        }
        Ok(atlas)
    }

    pub(crate) fn skin(&self, skin: SkinId) -> Option<Texture2D> {
        self.skins.get(&skin).copied()
    }

    pub(crate) fn player(&self) -> Option<Texture2D> {
        self.player
    }
}

/// Draws `texture` centred on `center`, scaled to a square of `size`.
pub(crate) fn draw_centered(texture: Texture2D, center: MacroquadVec2, size: f32, flip_x: bool) {
    let half = size / 2.0;
    texture::draw_texture_ex(
        texture,
        center.x - half,
        center.y - half,
        WHITE,
        DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(size, size)),
            flip_x,
            ..DrawTextureParams::default()
        },
    );
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Player,
    Skin(SkinId),
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    player: Option<String>,
    #[serde(default)]
    skins: HashMap<String, String>,
}

fn parse_manifest(
    contents: &str,
    base_path: &Path,
    roster: &[String],
) -> Result<Vec<(Slot, PathBuf)>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut entries = Vec::with_capacity(manifest.skins.len() + 1);
    if let Some(player) = manifest.player {
        entries.push((Slot::Player, base_path.join(player)));
    }

    let mut skins: Vec<(SkinId, PathBuf)> = Vec::with_capacity(manifest.skins.len());
    for (name, relative_path) in manifest.skins {
        let Some(index) = roster.iter().position(|skin| *skin == name) else {
            bail!("sprite manifest names skin `{name}` which is not in the roster");
        };
        let index = u16::try_from(index).context("roster index exceeds skin id range")?;
        skins.push((SkinId::new(index), base_path.join(relative_path)));
    }
    skins.sort_by_key(|(skin, _)| *skin);
    entries.extend(skins.into_iter().map(|(skin, path)| (Slot::Skin(skin), path)));

    Ok(entries)
}
