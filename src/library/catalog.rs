use super::model::Track;

const BUILTIN: [(&str, &str); 4] = [
    ("Deep Meditation to Relax", "relax1"),
    ("Complete Focus of Mind", "relax2"),
    ("Relaxing Meditation to Soul", "relax3"),
    ("Deep Sleep of Mind", "relax4"),
];

/// Immutable title -> asset table built once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// The four tracks bundled with the app, in home-screen order.
    pub fn builtin() -> Self {
        Self {
            tracks: BUILTIN
                .iter()
                .map(|(title, asset)| Track::new(*title, *asset))
                .collect(),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Exact title lookup. Unknown titles resolve to the first entry rather
    /// than failing.
    pub fn resolve(&self, title: &str) -> &Track {
        self.tracks
            .iter()
            .find(|t| t.title == title)
            .unwrap_or(&self.tracks[0])
    }

    /// Shorthand for `resolve(title).asset_id`.
    pub fn resolve_asset(&self, title: &str) -> &str {
        &self.resolve(title).asset_id
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
