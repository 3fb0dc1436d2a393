//! ffmpeg/ffprobe command construction.
//!
//! Argument building is pure: nothing here spawns a process except
//! [`AudioProber`], which goes through an injected runner.

mod probe;
mod transcode;

pub use probe::{
    format_info_args, parse_sample_rate, sample_rate_args, AudioProber, ProbeError, ProbeProperty,
    ProbeRequest,
};
pub use transcode::{
    build_transcode_args, OutputFormat, TranscodeArgsBuilder, TranscodeRequest, PITCH_QUALITY,
    STANDARD_SAMPLE_RATE,
};
