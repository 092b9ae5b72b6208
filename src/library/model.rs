/// A catalog entry. `title` is the display key, `asset_id` names the audio
/// file (without extension) inside the configured assets directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub asset_id: String,
}

impl Track {
    pub fn new(title: impl Into<String>, asset_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            asset_id: asset_id.into(),
        }
    }
}
