//! ffmpeg transcode argument builder.
//!
//! Builds the command-line tokens for one pitch-shift transcode. The token
//! order is fixed:
//!
//! ```text
//! -y -i <input> [filter] -c:a <codec> [-b:a <bitrate>] <output>
//! ```
//!
//! # Pitch Filters
//!
//! - **Tempo preserved**: `-af rubberband=pitch=<ratio>:pitchq=quality`
//!   changes pitch only; duration is unchanged.
//! - **Tempo not preserved**: `-filter:a asetrate=<rate>*<ratio>,aresample=<rate>`
//!   plays the samples back faster or slower, so duration scales by `1/ratio`.
//!   `<rate>` is a fixed standard rate, not the source file's rate.
//! - **No shift, tempo not preserved**: no filter, plain re-encode.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::pitch;

/// Nominal rate used by the resample-based shift.
pub const STANDARD_SAMPLE_RATE: u32 = 44_100;

/// rubberband `pitchq` setting.
pub const PITCH_QUALITY: &str = "quality";

/// Output container/codec choice, keyed by output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Mp3,
    Flac,
    Wav,
    Aac,
    Ogg,
}

/// Lower-case extension -> format. Anything not listed encodes as MP3.
const EXTENSION_TABLE: &[(&str, OutputFormat)] = &[
    ("mp3", OutputFormat::Mp3),
    ("flac", OutputFormat::Flac),
    ("wav", OutputFormat::Wav),
    ("aac", OutputFormat::Aac),
    ("m4a", OutputFormat::Aac),
    ("ogg", OutputFormat::Ogg),
];

impl OutputFormat {
    /// Look up an extension (without the dot), case-insensitively.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        EXTENSION_TABLE
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, format)| *format)
            .unwrap_or(OutputFormat::Mp3)
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(OutputFormat::Mp3)
    }

    /// ffmpeg encoder name.
    pub fn codec(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "libmp3lame",
            OutputFormat::Flac => "flac",
            OutputFormat::Wav => "pcm_s16le",
            OutputFormat::Aac => "aac",
            OutputFormat::Ogg => "libvorbis",
        }
    }

    /// Target bitrate for lossy encoders.
    pub fn bitrate(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Mp3 => Some("320k"),
            OutputFormat::Aac | OutputFormat::Ogg => Some("256k"),
            OutputFormat::Flac | OutputFormat::Wav => None,
        }
    }
}

/// One pitch-shift transcode.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeRequest {
    input_path: PathBuf,
    output_path: PathBuf,
    semitones: f64,
    preserve_tempo: bool,
}

impl TranscodeRequest {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        semitones: f64,
        preserve_tempo: bool,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            semitones,
            preserve_tempo,
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn semitones(&self) -> f64 {
        self.semitones
    }

    pub fn preserve_tempo(&self) -> bool {
        self.preserve_tempo
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_path(&self.output_path)
    }
}

/// Builder for ffmpeg transcode tokens.
pub struct TranscodeArgsBuilder<'a> {
    request: &'a TranscodeRequest,
    resample_rate: u32,
}

impl<'a> TranscodeArgsBuilder<'a> {
    pub fn new(request: &'a TranscodeRequest) -> Self {
        Self {
            request,
            resample_rate: STANDARD_SAMPLE_RATE,
        }
    }

    /// Override the nominal rate used by the resample-based shift.
    pub fn resample_rate(mut self, rate: u32) -> Self {
        self.resample_rate = rate;
        self
    }

    /// Build the complete ffmpeg argument list.
    ///
    /// Paths are passed through unchanged, including non-UTF-8 names.
    pub fn build(&self) -> Vec<OsString> {
        let mut tokens: Vec<OsString> = Vec::new();

        tokens.push("-y".into());
        tokens.push("-i".into());
        tokens.push(self.request.input_path.clone().into_os_string());

        self.add_pitch_filter(&mut tokens);
        self.add_codec_options(&mut tokens);

        tokens.push(self.request.output_path.clone().into_os_string());

        tokens
    }

    fn add_pitch_filter(&self, tokens: &mut Vec<OsString>) {
        let semitones = self.request.semitones;

        if self.request.preserve_tempo {
            let ratio = pitch::ratio(semitones);
            tokens.push("-af".into());
            tokens.push(format!("rubberband=pitch={:.6}:pitchq={}", ratio, PITCH_QUALITY).into());
        } else if semitones != 0.0 {
            let ratio = pitch::ratio(semitones);
            let rate = self.resample_rate;
            tokens.push("-filter:a".into());
            tokens.push(format!("asetrate={}*{:.6},aresample={}", rate, ratio, rate).into());
        }
    }

    fn add_codec_options(&self, tokens: &mut Vec<OsString>) {
        let format = self.request.output_format();

        tokens.push("-c:a".into());
        tokens.push(format.codec().into());

        if let Some(bitrate) = format.bitrate() {
            tokens.push("-b:a".into());
            tokens.push(bitrate.into());
        }
    }
}

/// Build ffmpeg arguments for a request using the standard resample rate.
pub fn build_transcode_args(request: &TranscodeRequest) -> Vec<OsString> {
    TranscodeArgsBuilder::new(request).build()
}
