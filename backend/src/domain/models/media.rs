//! Domain model for uploaded site media.
use shared::MediaBucket;

/// A file received from the settings form, ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct MediaUpload {
    pub bucket: MediaBucket,
    /// Object name inside the bucket, `<epoch_millis>.<ext>`
    pub object_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    pub fn new(bucket: MediaBucket, original_filename: &str, epoch_millis: u64, bytes: Vec<u8>) -> Self {
        let extension = Self::extension_of(original_filename);
        Self {
            bucket,
            object_name: Self::generate_object_name(original_filename, epoch_millis),
            content_type: Self::content_type_for(&extension).to_string(),
            bytes,
        }
    }

    /// Build the stored file name from the upload time and the original extension.
    /// Names are only as unique as the millisecond timestamp.
    pub fn generate_object_name(original_filename: &str, epoch_millis: u64) -> String {
        format!("{}.{}", epoch_millis, Self::extension_of(original_filename))
    }

    /// Extension of the original file as written, `bin` when there is none
    fn extension_of(original_filename: &str) -> String {
        let file_name = original_filename.rsplit(['/', '\\']).next().unwrap_or(original_filename);
        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_string(),
            _ => "bin".to_string(),
        }
    }

    fn content_type_for(extension: &str) -> &'static str {
        match extension.to_ascii_lowercase().as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            "mp3" => "audio/mpeg",
            "wav" => "audio/wav",
            "ogg" => "audio/ogg",
            "m4a" => "audio/mp4",
            _ => "application/octet-stream",
        }
    }
}
