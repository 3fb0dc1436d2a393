//! Boundary operations exposed to the host.
//!
//! Every operation runs synchronously on the calling thread and makes a
//! single attempt. A request moves through
//! `Constructed -> ArgsBuilt -> Executing -> Completed | Failed`; failures
//! are terminal and come back as a [`ProcessResult`] (or a typed error for
//! scalar queries).

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::command::{
    AudioProber, ProbeError, TranscodeArgsBuilder, TranscodeRequest, STANDARD_SAMPLE_RATE,
};
use crate::observer::ProcessingObserver;
use crate::result::ProcessResult;
use crate::runner::{ProcessRunner, SystemRunner};
use crate::tools::ToolchainHandles;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Input file does not exist: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    InputUnreadable { path: PathBuf, source: io::Error },
}

/// Facade over the toolchain, runner and optional observer.
pub struct AudioService {
    tools: ToolchainHandles,
    runner: Arc<dyn ProcessRunner>,
    observer: Option<Arc<dyn ProcessingObserver>>,
    resample_rate: u32,
}

impl AudioService {
    /// Service running real processes.
    pub fn new(tools: ToolchainHandles) -> Self {
        Self {
            tools,
            runner: Arc::new(SystemRunner::new()),
            observer: None,
            resample_rate: STANDARD_SAMPLE_RATE,
        }
    }

    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProcessingObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Nominal rate for the resample-based (tempo-changing) shift.
    pub fn with_resample_rate(mut self, rate: u32) -> Self {
        self.resample_rate = rate;
        self
    }

    pub fn tools(&self) -> &ToolchainHandles {
        &self.tools
    }

    /// Run `ffmpeg -version` to confirm the extracted binary works.
    pub fn check_ffmpeg(&self) -> ProcessResult {
        let args = vec![OsString::from("-version")];
        match self.runner.run(self.tools.ffmpeg(), &args) {
            Ok(output) => ProcessResult::success("Embedded FFmpeg is available", output.combined()),
            Err(e) => {
                warn!("FFmpeg check failed: {}", e);
                ProcessResult::failure("Embedded FFmpeg failed to run", e.output())
            }
        }
    }

    /// Transcode with a pitch shift.
    pub fn process_audio(&self, request: &TranscodeRequest) -> ProcessResult {
        if !request.input_path().exists() {
            let err = ServiceError::InputMissing(request.input_path().to_path_buf());
            warn!("{}", err);
            return ProcessResult::failure("Input file does not exist", "");
        }

        let args = TranscodeArgsBuilder::new(request)
            .resample_rate(self.resample_rate)
            .build();

        info!(
            "Shifting {} by {} semitones (preserve tempo: {}) -> {}",
            request.input_path().display(),
            request.semitones(),
            request.preserve_tempo(),
            request.output_path().display()
        );

        self.notify(|o| o.processing_started());
        let outcome = self.runner.run(self.tools.ffmpeg(), &args);
        self.notify(|o| o.processing_finished());

        match outcome {
            Ok(output) => {
                info!("Wrote {}", request.output_path().display());
                ProcessResult::success("Audio processing completed", output.combined())
            }
            Err(e) => {
                warn!("Audio processing failed: {}", e);
                ProcessResult::failure(format!("Audio processing failed: {}", e), e.output())
            }
        }
    }

    /// Full format/stream metadata as JSON text.
    pub fn get_audio_info(&self, path: &Path) -> ProcessResult {
        match self.prober().get_format_info(path) {
            Ok(json) => ProcessResult::success("Audio information retrieved", json),
            Err(e) => {
                warn!("Probe of {} failed: {}", path.display(), e);
                ProcessResult::failure("Failed to read audio information", e.output())
            }
        }
    }

    /// Sample rate of the first audio stream.
    pub fn get_sample_rate(&self, path: &Path) -> Result<u32, ProbeError> {
        self.prober().get_sample_rate(path)
    }

    fn prober(&self) -> AudioProber<'_> {
        AudioProber::new(self.tools.ffprobe(), self.runner.as_ref())
    }

    fn notify(&self, event: impl Fn(&dyn ProcessingObserver)) {
        if let Some(observer) = &self.observer {
            event(observer.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{RunError, RunOutput};
    use parking_lot::Mutex;
    use std::fs;
    use tempfile::tempdir;

    /// Records invocations and replies with a canned outcome.
    struct FakeRunner {
        calls: Mutex<Vec<(PathBuf, Vec<OsString>)>>,
        fail: bool,
        events: Option<Arc<Mutex<Vec<&'static str>>>>,
    }

    impl FakeRunner {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
                events: None,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::ok()
            }
        }
    }

    impl ProcessRunner for FakeRunner {
        fn run(&self, program: &Path, args: &[OsString]) -> Result<RunOutput, RunError> {
            self.calls.lock().push((program.to_path_buf(), args.to_vec()));
            if let Some(events) = &self.events {
                events.lock().push("run");
            }
            if self.fail {
                return Err(RunError::ProcessNonZeroExit {
                    program: program.to_path_buf(),
                    code: Some(1),
                    output: "Unknown encoder".to_string(),
                });
            }
            Ok(RunOutput {
                stdout: b"ffmpeg version 7.0\n".to_vec(),
                stderr: Vec::new(),
            })
        }
    }

    struct EventLog(Arc<Mutex<Vec<&'static str>>>);

    impl ProcessingObserver for EventLog {
        fn processing_started(&self) {
            self.0.lock().push("started");
        }

        fn processing_finished(&self) {
            self.0.lock().push("finished");
        }
    }

    fn handles() -> ToolchainHandles {
        ToolchainHandles::new("/tools/ffmpeg", "/tools/ffprobe")
    }

    #[test]
    fn missing_input_fails_before_running() {
        let runner = Arc::new(FakeRunner::ok());
        let service = AudioService::new(handles()).with_runner(runner.clone());

        let request = TranscodeRequest::new("/nonexistent/a.wav", "b.mp3", 2.0, false);
        let result = service.process_audio(&request);

        assert!(!result.success);
        assert_eq!(result.message, "Input file does not exist");
        assert!(runner.calls.lock().is_empty());
    }

    #[test]
    fn process_audio_runs_ffmpeg_with_built_args() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("a.wav");
        fs::write(&input, b"RIFF").unwrap();
        let output = dir.path().join("b.flac");

        let runner = Arc::new(FakeRunner::ok());
        let service = AudioService::new(handles())
            .with_runner(runner.clone())
            .with_resample_rate(48_000);

        let request = TranscodeRequest::new(&input, &output, 12.0, false);
        let result = service.process_audio(&request);

        assert!(result.success);
        assert_eq!(result.message, "Audio processing completed");

        let calls = runner.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, PathBuf::from("/tools/ffmpeg"));
        assert!(calls[0]
            .1
            .contains(&OsString::from("asetrate=48000*2.000000,aresample=48000")));
        assert_eq!(calls[0].1.last().unwrap().as_os_str(), output.as_os_str());
    }

    #[test]
    fn observer_brackets_the_run_even_on_failure() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("a.wav");
        fs::write(&input, b"RIFF").unwrap();

        let events = Arc::new(Mutex::new(Vec::new()));
        let runner = FakeRunner {
            events: Some(events.clone()),
            ..FakeRunner::failing()
        };
        let service = AudioService::new(handles())
            .with_runner(Arc::new(runner))
            .with_observer(Arc::new(EventLog(events.clone())));

        let result = service.process_audio(&TranscodeRequest::new(&input, "out.mp3", 1.0, true));

        assert!(!result.success);
        assert!(result.message.starts_with("Audio processing failed"));
        assert_eq!(result.output, "Unknown encoder");
        assert_eq!(*events.lock(), vec!["started", "run", "finished"]);
    }

    #[test]
    fn check_ffmpeg_reports_version_output() {
        let runner = Arc::new(FakeRunner::ok());
        let service = AudioService::new(handles()).with_runner(runner.clone());

        let result = service.check_ffmpeg();

        assert!(result.success);
        assert!(result.output.contains("ffmpeg version"));
        assert_eq!(runner.calls.lock()[0].1, vec![OsString::from("-version")]);
    }

    #[test]
    fn audio_info_failure_carries_raw_output() {
        let runner = Arc::new(FakeRunner::failing());
        let service = AudioService::new(handles()).with_runner(runner.clone());

        let result = service.get_audio_info(Path::new("a.wav"));

        assert!(!result.success);
        assert_eq!(result.message, "Failed to read audio information");
        assert_eq!(result.output, "Unknown encoder");
        assert_eq!(runner.calls.lock()[0].0, PathBuf::from("/tools/ffprobe"));
    }

    #[test]
    fn sample_rate_goes_through_ffprobe() {
        let runner = Arc::new(FakeRunner::ok());
        let service = AudioService::new(handles()).with_runner(runner.clone());

        // Fake stdout is not numeric.
        let err = service.get_sample_rate(Path::new("a.wav")).unwrap_err();

        assert!(matches!(err, ProbeError::ParseFailed { .. }));
        assert_eq!(runner.calls.lock()[0].0, PathBuf::from("/tools/ffprobe"));
    }
}
