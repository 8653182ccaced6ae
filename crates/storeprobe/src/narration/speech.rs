//! Speech synthesis and audio/video muxing backends.

use crate::result::{ProbeError, ProbeResult};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Audio format requested from the speech service (WAV container)
pub const OUTPUT_FORMAT: &str = "riff-24khz-16bit-mono-pcm";

/// Turns narration text into an audio file
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Synthesize `text` with `voice` and write the audio to `out_path`
    async fn synthesize(&self, text: &str, voice: &str, out_path: &Path) -> ProbeResult<()>;
}

/// Combines a silent video with a narration track
#[async_trait]
pub trait MediaMuxer: Send + Sync {
    /// Write `out_path` containing `video`'s picture and `audio`'s sound
    async fn mux(&self, video: &Path, audio: &Path, out_path: &Path) -> ProbeResult<()>;
}

/// Azure Cognitive Services text-to-speech over its REST endpoint
#[derive(Debug, Clone)]
pub struct AzureSpeech {
    endpoint: String,
    key: String,
    client: reqwest::Client,
}

impl AzureSpeech {
    /// Client for the given subscription key and region (e.g. `eastus`)
    pub fn new(key: impl Into<String>, region: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();
        Self {
            endpoint: format!("https://{region}.tts.speech.microsoft.com/cognitiveservices/v1"),
            key: key.into(),
            client,
        }
    }

    /// Point at a different endpoint (sovereign clouds, local mocks)
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Returns the synthesis endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// SSML document speaking `text` with `voice`
#[must_use]
pub fn ssml_document(text: &str, voice: &str) -> String {
    let lang = voice.splitn(3, '-').take(2).collect::<Vec<_>>().join("-");
    format!(
        "<speak version='1.0' xml:lang='{lang}'><voice name='{voice}'>{}</voice></speak>",
        xml_escape(text)
    )
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[async_trait]
impl SpeechBackend for AzureSpeech {
    async fn synthesize(&self, text: &str, voice: &str, out_path: &Path) -> ProbeResult<()> {
        let preview: String = text.chars().take(50).collect();
        tracing::info!(voice, "generating narration: \"{preview}...\"");

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .header("User-Agent", "storeprobe")
            .body(ssml_document(text, voice))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProbeError::speech(format!(
                "speech synthesis failed ({}): {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let audio = resp.bytes().await?;
        tokio::fs::write(out_path, &audio)
            .await
            .map_err(|e| ProbeError::io(out_path, e))?;
        tracing::info!(path = %out_path.display(), bytes = audio.len(), "narration saved");
        Ok(())
    }
}

/// Muxes with the `ffmpeg` binary, re-encoding the video to H.264
#[derive(Debug, Clone)]
pub struct FfmpegMuxer {
    program: String,
}

impl Default for FfmpegMuxer {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
        }
    }
}

impl FfmpegMuxer {
    /// Muxer invoking `ffmpeg` from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific ffmpeg executable
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Command-line arguments for one mux job
    #[must_use]
    pub fn args(video: &Path, audio: &Path, out_path: &Path) -> Vec<String> {
        let mut args = vec!["-i".to_string(), video.display().to_string()];
        args.extend(["-i".to_string(), audio.display().to_string()]);
        args.extend(
            ["-c:v", "libx264", "-preset", "fast", "-crf", "22", "-c:a", "aac", "-shortest"]
                .map(String::from),
        );
        args.push(out_path.display().to_string());
        args.push("-y".to_string());
        args
    }
}

#[async_trait]
impl MediaMuxer for FfmpegMuxer {
    async fn mux(&self, video: &Path, audio: &Path, out_path: &Path) -> ProbeResult<()> {
        tracing::info!(video = %video.display(), "merging audio and video");
        let output = tokio::process::Command::new(&self.program)
            .args(Self::args(video, audio, out_path))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ProbeError::mux(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail: Vec<&str> = stderr.lines().rev().take(5).collect();
            let tail: Vec<&str> = tail.into_iter().rev().collect();
            return Err(ProbeError::mux(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                tail.join("\n")
            )));
        }
        tracing::info!(path = %out_path.display(), "narrated video created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_VOICE;

    #[test]
    fn test_endpoint_uses_region() {
        let speech = AzureSpeech::new("key", "eastus");
        assert_eq!(
            speech.endpoint(),
            "https://eastus.tts.speech.microsoft.com/cognitiveservices/v1"
        );
        let local = speech.with_endpoint("http://127.0.0.1:9/tts");
        assert_eq!(local.endpoint(), "http://127.0.0.1:9/tts");
    }

    #[test]
    fn test_ssml_escapes_text() {
        let ssml = ssml_document("Error: expected <button> & 'Pay'", DEFAULT_VOICE);
        assert!(ssml.contains("xml:lang='en-US'"));
        assert!(ssml.contains("<voice name='en-US-JennyNeural'>"));
        assert!(ssml.contains("expected &lt;button&gt; &amp; &apos;Pay&apos;"));
    }

    #[test]
    fn test_ffmpeg_args() {
        let args = FfmpegMuxer::args(
            Path::new("in/video.webm"),
            Path::new("out/narration.wav"),
            Path::new("out/home.mp4"),
        );
        assert_eq!(
            args,
            [
                "-i", "in/video.webm", "-i", "out/narration.wav", "-c:v", "libx264", "-preset",
                "fast", "-crf", "22", "-c:a", "aac", "-shortest", "out/home.mp4", "-y"
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_ffmpeg_is_mux_error() {
        let muxer = FfmpegMuxer::new().with_program("definitely-not-ffmpeg-7c1f");
        let err = muxer
            .mux(Path::new("a.webm"), Path::new("a.wav"), Path::new("a.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::Mux { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_speech_endpoint_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let speech = AzureSpeech::new("key", "eastus").with_endpoint("http://127.0.0.1:9/tts");
        let out = tmp.path().join("n.wav");
        let err = speech.synthesize("hello", DEFAULT_VOICE, &out).await;
        assert!(err.is_err());
        assert!(!out.exists());
    }
}
