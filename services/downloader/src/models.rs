//! Models for extracted video data and response payloads

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Video metadata recovered from an upstream page
///
/// Every field is best-effort. The `Default` value documents the fallback used
/// for each field when the page does not expose it: empty strings for text and
/// URLs, zero for the duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub id: String,
    pub description: String,
    pub created_at: String,
    pub play_url: String,
    pub download_url: String,
    pub cover_url: String,
    /// Duration exactly as the page reports it, fractional seconds included
    pub duration_seconds: Number,
}

impl Default for VideoMetadata {
    fn default() -> Self {
        Self {
            id: String::new(),
            description: String::new(),
            created_at: String::new(),
            play_url: String::new(),
            download_url: String::new(),
            cover_url: String::new(),
            duration_seconds: Number::from(0u64),
        }
    }
}

/// Result of fetching the direct media resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// Declared `Content-Type` of the media response (empty when absent)
    pub content_type: String,
    /// Number of bytes in the media response body
    pub byte_size: u64,
}

/// Query parameters for the download endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadQuery {
    pub url: Option<String>,
}

/// Video details returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct VideoDetails {
    pub id: String,
    pub description: String,
    pub created_at: String,
    pub video_url: String,
    pub download_url: String,
    pub cover_url: String,
    pub duration: Number,
    pub content_type: String,
    pub file_size: u64,
}

impl VideoDetails {
    /// Combine extracted metadata with the probe of its play URL
    pub fn new(metadata: VideoMetadata, probe: ProbeResult) -> Self {
        Self {
            id: metadata.id,
            description: metadata.description,
            created_at: metadata.created_at,
            video_url: metadata.play_url,
            download_url: metadata.download_url,
            cover_url: metadata.cover_url,
            duration: metadata.duration_seconds,
            content_type: probe.content_type,
            file_size: probe.byte_size,
        }
    }
}

/// Successful response for the download endpoint
#[derive(Debug, Clone, Serialize)]
pub struct DownloadResponse {
    pub success: bool,
    pub message: String,
    pub data: VideoDetails,
}

impl DownloadResponse {
    pub fn found(data: VideoDetails) -> Self {
        Self {
            success: true,
            message: "Video found successfully".to_string(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_download_response_shape() {
        let metadata = VideoMetadata {
            id: "7301".to_string(),
            description: "clip".to_string(),
            created_at: "1700000000".to_string(),
            play_url: "https://cdn.example/play.mp4".to_string(),
            download_url: "https://cdn.example/dl.mp4".to_string(),
            cover_url: "https://cdn.example/cover.jpg".to_string(),
            duration_seconds: Number::from(12u64),
        };
        let probe = ProbeResult {
            content_type: "video/mp4".to_string(),
            byte_size: 2048,
        };

        let body = serde_json::to_value(DownloadResponse::found(VideoDetails::new(
            metadata, probe,
        )))
        .unwrap();

        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "Video found successfully",
                "data": {
                    "id": "7301",
                    "description": "clip",
                    "created_at": "1700000000",
                    "video_url": "https://cdn.example/play.mp4",
                    "download_url": "https://cdn.example/dl.mp4",
                    "cover_url": "https://cdn.example/cover.jpg",
                    "duration": 12,
                    "content_type": "video/mp4",
                    "file_size": 2048
                }
            })
        );
    }

    #[test]
    fn test_fractional_duration_is_reported_unchanged() {
        let metadata = VideoMetadata {
            play_url: "https://cdn.example/play.mp4".to_string(),
            duration_seconds: Number::from_f64(12.7).unwrap(),
            ..VideoMetadata::default()
        };

        let body =
            serde_json::to_value(VideoDetails::new(metadata, ProbeResult::default())).unwrap();
        assert_eq!(body["duration"], json!(12.7));

        let body = serde_json::to_value(VideoDetails::new(
            VideoMetadata::default(),
            ProbeResult::default(),
        ))
        .unwrap();
        assert_eq!(body["duration"], 0);
    }
}
