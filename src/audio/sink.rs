//! rodio-backed `AudioBackend`.
//!
//! Assets are plain files named `<asset_id>.<extension>` under one directory.
//! Each loaded asset gets its own paused `Sink` on the shared output mixer.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::backend::AudioBackend;
use super::types::{AssetUnavailable, Looping, UnavailableReason};

type FileDecoder = Decoder<BufReader<File>>;

/// Path of `asset_id` inside `dir`, e.g. `assets/relax1.mp3`.
pub fn asset_path(dir: &Path, asset_id: &str, extension: &str) -> PathBuf {
    let ext = extension.trim().trim_start_matches('.');
    if ext.is_empty() {
        dir.join(asset_id)
    } else {
        dir.join(format!("{asset_id}.{ext}"))
    }
}

/// Open and decode the file behind `asset_id`.
pub(super) fn open_decoder(path: &Path, asset_id: &str) -> Result<FileDecoder, AssetUnavailable> {
    if !path.is_file() {
        return Err(AssetUnavailable::new(
            asset_id,
            UnavailableReason::Missing(path.to_path_buf()),
        ));
    }
    let file = File::open(path).map_err(|e| AssetUnavailable::new(asset_id, UnavailableReason::Io(e)))?;
    Decoder::new(BufReader::new(file))
        .map_err(|e| AssetUnavailable::new(asset_id, UnavailableReason::Decode(e.to_string())))
}

/// A loaded asset: a paused sink plus the decoded source waiting to be queued.
pub struct LoadedAsset {
    sink: Sink,
    source: Option<FileDecoder>,
}

#[derive(Clone)]
pub struct RodioBackend {
    stream: Rc<OutputStream>,
    assets_dir: PathBuf,
    extension: String,
    volume: f32,
}

impl RodioBackend {
    /// Audio stays audible for as long as any clone of the backend (and so
    /// the shared output stream) is alive.
    pub fn new(stream: OutputStream, assets_dir: PathBuf, extension: String, volume: f32) -> Self {
        Self {
            stream: Rc::new(stream),
            assets_dir,
            extension,
            volume,
        }
    }
}

impl AudioBackend for RodioBackend {
    type Handle = LoadedAsset;

    fn load(&mut self, asset_id: &str) -> Result<LoadedAsset, AssetUnavailable> {
        let path = asset_path(&self.assets_dir, asset_id, &self.extension);
        let source = open_decoder(&path, asset_id)?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.set_volume(self.volume);
        Ok(LoadedAsset {
            sink,
            source: Some(source),
        })
    }

    fn play(&mut self, handle: &mut LoadedAsset, looping: Looping) {
        if let Some(source) = handle.source.take() {
            match looping {
                Looping::Forever => handle.sink.append(source.repeat_infinite()),
                Looping::Once => handle.sink.append(source),
            }
        }
        handle.sink.play();
    }

    fn stop(&mut self, handle: LoadedAsset) {
        handle.sink.stop();
    }
}
