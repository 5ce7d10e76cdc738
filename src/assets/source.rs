use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::{
    color::transform::isolate_red,
    foundation::{
        core::Canvas,
        error::{HueloopError, HueloopResult},
    },
};

/// The decoded input raster, always RGBA8 with straight alpha.
#[derive(Clone, Debug)]
pub struct SourceImage {
    path: Option<PathBuf>,
    image: RgbaImage,
}

impl SourceImage {
    /// Read and decode an image file. The format is sniffed from the file contents.
    #[tracing::instrument(skip_all)]
    pub fn open(path: impl AsRef<Path>) -> HueloopResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            HueloopError::decode(format!("open source image '{}': {e}", path.display()))
        })?;
        let mut src = Self::decode(&bytes).map_err(|e| match e {
            HueloopError::Decode(msg) => {
                HueloopError::decode(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })?;
        src.path = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), canvas = %src.canvas(), "loaded source image");
        Ok(src)
    }

    /// Decode an in-memory image. Images without alpha get a fully opaque channel.
    pub fn decode(bytes: &[u8]) -> HueloopResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| HueloopError::decode(format!("decode image: {e}")))?;
        Self::from_rgba(dyn_img.to_rgba8())
    }

    /// Wrap an already decoded raster.
    pub fn from_rgba(image: RgbaImage) -> HueloopResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(HueloopError::decode("source image has no pixels"));
        }
        Ok(Self { path: None, image })
    }

    /// File the image was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas::of(&self.image)
    }

    /// Derive the red-isolated baseline every frame is rendered from.
    pub fn baseline(&self) -> Baseline {
        Baseline {
            image: isolate_red(&self.image),
        }
    }
}

/// Red-isolated copy of the source. Read-only once built.
#[derive(Clone, Debug)]
pub struct Baseline {
    image: RgbaImage,
}

impl Baseline {
    /// Pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas::of(&self.image)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
