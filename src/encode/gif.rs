use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::codecs::gif::{GifEncoder, Repeat};

use crate::encode::path::{create_unique_file, ensure_parent_dir};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{RainError, RainResult};

/// Options for GIF output.
#[derive(Clone, Debug, PartialEq)]
pub struct GifOpts {
    /// Length of one loop in seconds, spread evenly over the frames.
    pub duration_secs: f64,
    /// NeuQuant speed, `1` (best) to `30` (fastest).
    pub speed: i32,
}

impl Default for GifOpts {
    fn default() -> Self {
        Self {
            duration_secs: 10.0,
            speed: 10,
        }
    }
}

impl GifOpts {
    /// Check the duration and quantizer speed.
    pub fn validate(&self) -> RainResult<()> {
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(RainError::validation("gif duration must be finite and > 0"));
        }
        if !(1..=30).contains(&self.speed) {
            return Err(RainError::validation("gif speed must be within 1..=30"));
        }
        Ok(())
    }
}

/// Per-frame display time: `duration_secs·1000 / frame_count` milliseconds, rounded to the
/// nearest 10 ms GIF step and never below one step.
pub fn frame_delay(duration_secs: f64, frame_count: u64) -> RainResult<image::Delay> {
    if frame_count == 0 {
        return Err(RainError::NoFrames);
    }
    if !(duration_secs.is_finite() && duration_secs > 0.0) {
        return Err(RainError::validation(format!(
            "gif duration {duration_secs}s is out of range"
        )));
    }
    let centis = (duration_secs * 100.0 / frame_count as f64).round().max(1.0);
    if centis > f64::from(u32::from(u16::MAX)) {
        return Err(RainError::validation(format!(
            "gif frame delay {centis}cs exceeds the format limit"
        )));
    }
    Ok(image::Delay::from_numer_denom_ms(centis as u32 * 10, 1))
}

/// First IO error seen by a [`CheckedWriter`].
type WriteErrors = Arc<Mutex<Option<io::Error>>>;

/// Buffered writer that remembers IO errors, including the final flush on drop.
///
/// The GIF encoder writes its trailer from `Drop` and discards failures there.
struct CheckedWriter<W: Write> {
    inner: Option<BufWriter<W>>,
    errors: WriteErrors,
}

impl<W: Write> CheckedWriter<W> {
    fn new(inner: W, errors: WriteErrors) -> Self {
        Self {
            inner: Some(BufWriter::new(inner)),
            errors,
        }
    }

    fn record(&self, e: &io::Error) {
        let mut slot = self.errors.lock().unwrap_or_else(|p| p.into_inner());
        if slot.is_none() {
            *slot = Some(io::Error::new(e.kind(), e.to_string()));
        }
    }

    fn closed() -> io::Error {
        io::Error::other("writer already closed")
    }
}

impl<W: Write> Write for CheckedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let res = match self.inner.as_mut() {
            Some(w) => w.write(buf),
            None => Err(Self::closed()),
        };
        if let Err(e) = &res {
            self.record(e);
        }
        res
    }

    fn flush(&mut self) -> io::Result<()> {
        let res = match self.inner.as_mut() {
            Some(w) => w.flush(),
            None => Err(Self::closed()),
        };
        if let Err(e) = &res {
            self.record(e);
        }
        res
    }
}

impl<W: Write> Drop for CheckedWriter<W> {
    fn drop(&mut self) {
        if let Some(w) = self.inner.take()
            && let Err(e) = w.into_inner()
        {
            self.record(e.error());
        }
    }
}

/// Drop `encoder` (trailer + flush) and report any IO error it hit along the way.
fn finish_gif<W: Write>(
    encoder: GifEncoder<CheckedWriter<W>>,
    errors: &WriteErrors,
) -> RainResult<()> {
    drop(encoder);
    let failed = errors.lock().unwrap_or_else(|p| p.into_inner()).take();
    match failed {
        Some(e) => Err(RainError::encode(format!("write gif: {e}"))),
        None => Ok(()),
    }
}

/// Sink that streams frames into an infinitely looping GIF.
///
/// The target is resolved in `begin`: an existing file is never overwritten, a numeric suffix is
/// added instead (see [`unique_output_path`](crate::encode::path::unique_output_path)).
pub struct GifSink {
    requested: PathBuf,
    opts: GifOpts,
    written: Option<PathBuf>,
    state: Option<GifState>,
}

struct GifState {
    encoder: GifEncoder<CheckedWriter<File>>,
    errors: WriteErrors,
    delay: image::Delay,
    cfg: SinkConfig,
    pushed: u64,
}

impl GifSink {
    /// Create a sink targeting `path`.
    pub fn new(path: impl Into<PathBuf>, opts: GifOpts) -> RainResult<Self> {
        opts.validate()?;
        Ok(Self {
            requested: path.into(),
            opts,
            written: None,
            state: None,
        })
    }

    /// Path actually written, available once `begin` has run.
    pub fn output_path(&self) -> Option<&Path> {
        self.written.as_deref()
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> RainResult<()> {
        if self.state.is_some() {
            return Err(RainError::encode("gif sink already started"));
        }
        let delay = frame_delay(self.opts.duration_secs, cfg.frame_count)?;

        ensure_parent_dir(&self.requested)?;
        let (out, file) = create_unique_file(&self.requested)?;

        let errors = WriteErrors::default();
        let mut encoder =
            GifEncoder::new_with_speed(CheckedWriter::new(file, errors.clone()), self.opts.speed);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| RainError::encode(format!("set gif loop flag: {e}")))?;

        tracing::debug!(path = %out.display(), frames = cfg.frame_count, "gif sink started");
        self.written = Some(out);
        self.state = Some(GifState {
            encoder,
            errors,
            delay,
            cfg,
            pushed: 0,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &image::RgbImage) -> RainResult<()> {
        let Some(state) = self.state.as_mut() else {
            return Err(RainError::encode("gif sink is not started"));
        };
        if frame.width() != state.cfg.width || frame.height() != state.cfg.height {
            return Err(RainError::validation(format!(
                "frame {} size mismatch: got {}x{}, expected {}x{}",
                idx.0,
                frame.width(),
                frame.height(),
                state.cfg.width,
                state.cfg.height
            )));
        }

        let rgba = image::DynamicImage::ImageRgb8(frame.clone()).into_rgba8();
        state
            .encoder
            .encode_frame(image::Frame::from_parts(rgba, 0, 0, state.delay))
            .map_err(|e| RainError::encode(format!("encode gif frame {}: {e}", idx.0)))?;
        state.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> RainResult<()> {
        let Some(state) = self.state.take() else {
            return Err(RainError::encode("gif sink is not started"));
        };
        if state.pushed == 0 {
            return Err(RainError::NoFrames);
        }
        finish_gif(state.encoder, &state.errors)
    }
}

/// Write `frames` as one looping GIF and return the path used.
pub fn write_gif(
    frames: &[image::RgbImage],
    path: impl Into<PathBuf>,
    opts: GifOpts,
) -> RainResult<PathBuf> {
    let Some(first) = frames.first() else {
        return Err(RainError::NoFrames);
    };
    let mut sink = GifSink::new(path, opts)?;
    sink.begin(SinkConfig {
        width: first.width(),
        height: first.height(),
        frame_count: frames.len() as u64,
    })?;
    for (i, frame) in frames.iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), frame)?;
    }
    sink.end()?;
    sink.written
        .ok_or_else(|| RainError::encode("gif sink finished without an output path"))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
