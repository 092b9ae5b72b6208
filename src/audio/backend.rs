use super::types::{AssetUnavailable, Looping};

/// Opaque audio service used by the session controller.
///
/// `stop` takes the handle by value: once a handle has been stopped it is
/// gone, so a resource can only be released once.
pub trait AudioBackend {
    type Handle;

    /// Prepare `asset_id` for playback. Nothing is audible until `play`.
    fn load(&mut self, asset_id: &str) -> Result<Self::Handle, AssetUnavailable>;

    fn play(&mut self, handle: &mut Self::Handle, looping: Looping);

    fn stop(&mut self, handle: Self::Handle);
}
