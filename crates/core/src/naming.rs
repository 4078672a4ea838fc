//! Storage naming for generated image files.

use uuid::Uuid;

/// Directory (relative to the media root) that holds generated images.
pub const GENERATED_IMAGES_DIR: &str = "generated_images";

/// File extension of every generated image.
pub const IMAGE_EXTENSION: &str = "png";

/// Relative storage path for a generated image.
///
/// Names are derived from a fresh identifier rather than the prompt, so
/// arbitrary prompt text can never collide or produce an invalid path.
/// The prompt is kept only as record metadata.
///
/// # Examples
///
/// ```
/// use chaotix_core::naming::generated_image_path;
/// use uuid::Uuid;
///
/// let id = Uuid::nil();
/// assert_eq!(
///     generated_image_path(id),
///     "generated_images/00000000-0000-0000-0000-000000000000.png"
/// );
/// ```
pub fn generated_image_path(id: Uuid) -> String {
    format!("{GENERATED_IMAGES_DIR}/{id}.{IMAGE_EXTENSION}")
}

/// Relative storage path for a new image, using a random identifier.
pub fn new_generated_image_path() -> String {
    generated_image_path(Uuid::new_v4())
}
