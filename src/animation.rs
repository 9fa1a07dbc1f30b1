//! Best-effort fetch of the decorative sidebar animation.
//!
//! Only the Lottie header (size, frame rate, frame range) is decoded; the sidebar draws its own
//! looping pulse from it. Any failure is reported as an [`AnimationFetchError`] and the caller
//! shows a warning in place of the animation.

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::http_client;
use crate::settings::AnimationSettings;

#[derive(Debug, Error)]
pub enum AnimationFetchError {
    #[error("Animation request failed: {0}")]
    Http(String),
    #[error("Animation server returned status {0}")]
    Status(u16),
    #[error("Failed to read animation body: {0}")]
    Body(#[from] std::io::Error),
    #[error("Animation payload is malformed: {0}")]
    Malformed(String),
}

/// Header fields of a Lottie document.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationInfo {
    pub name: Option<String>,
    pub width: f32,
    pub height: f32,
    pub frame_rate: f32,
    pub in_point: f32,
    pub out_point: f32,
    pub layer_count: usize,
}

impl AnimationInfo {
    /// Length of one loop in seconds.
    pub fn duration_secs(&self) -> f32 {
        (self.out_point - self.in_point) / self.frame_rate
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Position inside the current loop, in `[0, 1)`.
    pub fn phase(&self, time_secs: f64) -> f32 {
        let duration = f64::from(self.duration_secs());
        if duration <= 0.0 {
            return 0.0;
        }
        (time_secs.rem_euclid(duration) / duration) as f32
    }
}

#[derive(Debug, Deserialize)]
struct LottieHeader {
    #[serde(default)]
    nm: Option<String>,
    w: f32,
    h: f32,
    fr: f32,
    ip: f32,
    op: f32,
    #[serde(default)]
    layers: Vec<serde_json::Value>,
}

/// Decode and sanity-check a Lottie payload.
pub fn parse_animation(bytes: &[u8]) -> Result<AnimationInfo, AnimationFetchError> {
    let header: LottieHeader = serde_json::from_slice(bytes)
        .map_err(|err| AnimationFetchError::Malformed(err.to_string()))?;
    if !(header.w > 0.0 && header.h > 0.0) {
        return Err(AnimationFetchError::Malformed(
            "width and height must be positive".into(),
        ));
    }
    if !(header.fr > 0.0) {
        return Err(AnimationFetchError::Malformed(
            "frame rate must be positive".into(),
        ));
    }
    if !(header.op > header.ip) {
        return Err(AnimationFetchError::Malformed(
            "out point must follow in point".into(),
        ));
    }
    Ok(AnimationInfo {
        name: header.nm,
        width: header.w,
        height: header.h,
        frame_rate: header.fr,
        in_point: header.ip,
        out_point: header.op,
        layer_count: header.layers.len(),
    })
}

/// Fetch and decode the animation. Anything but `200 OK` is a failure.
pub fn fetch_animation(
    url: &str,
    timeout: Duration,
    max_bytes: usize,
) -> Result<AnimationInfo, AnimationFetchError> {
    let response = match http_client::agent(timeout).get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, _)) => return Err(AnimationFetchError::Status(code)),
        Err(err) => return Err(AnimationFetchError::Http(err.to_string())),
    };
    if response.status() != 200 {
        return Err(AnimationFetchError::Status(response.status()));
    }
    let bytes = http_client::read_response_bytes(response, max_bytes)?;
    parse_animation(&bytes)
}

/// Run [`fetch_animation`] on a worker thread so the first frames render immediately.
///
/// Returns `None` when the animation is disabled.
pub fn spawn_fetch(
    settings: &AnimationSettings,
) -> Option<Receiver<Result<AnimationInfo, AnimationFetchError>>> {
    if !settings.enabled {
        return None;
    }
    let (tx, rx) = mpsc::channel();
    let url = settings.url.clone();
    let timeout = Duration::from_secs(settings.timeout_secs);
    let max_bytes = settings.max_bytes;
    let spawned = std::thread::Builder::new()
        .name("airlens-animation".into())
        .spawn(move || {
            let result = fetch_animation(&url, timeout, max_bytes);
            match &result {
                Ok(info) => tracing::info!(
                    "Fetched animation {} ({:.1}s loop)",
                    info.name.as_deref().unwrap_or("<unnamed>"),
                    info.duration_secs()
                ),
                Err(err) => tracing::warn!("{err}"),
            }
            let _ = tx.send(result);
        });
    match spawned {
        Ok(_) => Some(rx),
        Err(err) => {
            tracing::warn!("Could not start animation fetch: {err}");
            let (tx, rx) = mpsc::channel();
            let _ = tx.send(Err(AnimationFetchError::Http(err.to_string())));
            Some(rx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::serve_once;

    const LOTTIE: &str =
        r#"{"v":"5.5.7","nm":"air","fr":30,"ip":0,"op":90,"w":400,"h":200,"layers":[{},{}]}"#;

    fn ok_response(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        )
    }

    #[test]
    fn parses_lottie_header() {
        let info = parse_animation(LOTTIE.as_bytes()).unwrap();
        assert_eq!(info.name.as_deref(), Some("air"));
        assert_eq!(info.layer_count, 2);
        assert_eq!(info.duration_secs(), 3.0);
        assert_eq!(info.aspect(), 2.0);
        assert!((info.phase(4.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rejects_degenerate_header() {
        let err = parse_animation(br#"{"fr":0,"ip":0,"op":10,"w":1,"h":1}"#).unwrap_err();
        assert!(matches!(err, AnimationFetchError::Malformed(_)));
        let err = parse_animation(b"<html>nope</html>").unwrap_err();
        assert!(matches!(err, AnimationFetchError::Malformed(_)));
    }

    #[test]
    fn fetch_succeeds_on_200_json() {
        let url = serve_once(ok_response(LOTTIE));
        let info = fetch_animation(&url, Duration::from_secs(5), 1 << 20).unwrap();
        assert_eq!(info.frame_rate, 30.0);
    }

    #[test]
    fn non_200_status_is_a_failure() {
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n".into());
        let err = fetch_animation(&url, Duration::from_secs(5), 1 << 20).unwrap_err();
        assert!(matches!(err, AnimationFetchError::Status(404)));
    }

    #[test]
    fn no_content_status_is_a_failure() {
        let url = serve_once("HTTP/1.1 204 No Content\r\n\r\n".into());
        let err = fetch_animation(&url, Duration::from_secs(5), 1 << 20).unwrap_err();
        assert!(matches!(err, AnimationFetchError::Status(204)));
    }

    #[test]
    fn unparsable_body_is_a_failure() {
        let url = serve_once(ok_response("not json at all"));
        let err = fetch_animation(&url, Duration::from_secs(5), 1 << 20).unwrap_err();
        assert!(matches!(err, AnimationFetchError::Malformed(_)));
    }

    #[test]
    fn disabled_animation_spawns_nothing() {
        let settings = AnimationSettings {
            enabled: false,
            ..AnimationSettings::default()
        };
        assert!(spawn_fetch(&settings).is_none());
    }
}
