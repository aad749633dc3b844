use super::*;
use image::AnimationDecoder as _;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_gif").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> image::RgbImage {
    image::RgbImage::from_pixel(w, h, image::Rgb(rgb))
}

fn decode(path: &Path) -> Vec<image::Frame> {
    let f = std::io::BufReader::new(File::open(path).unwrap());
    image::codecs::gif::GifDecoder::new(f)
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

fn delay_ms(d: image::Delay) -> f64 {
    let (n, m) = d.numer_denom_ms();
    f64::from(n) / f64::from(m)
}

#[test]
fn delay_rounds_to_nearest_gif_step() {
    assert_eq!(delay_ms(frame_delay(2.0, 4).unwrap()), 500.0);
    assert_eq!(delay_ms(frame_delay(0.25, 1).unwrap()), 250.0);
    // 78.125 ms rounds up, 33.3 ms rounds down.
    assert_eq!(delay_ms(frame_delay(10.0, 128).unwrap()), 80.0);
    assert_eq!(delay_ms(frame_delay(10.0, 300).unwrap()), 30.0);
}

#[test]
fn delay_never_drops_below_one_step() {
    assert_eq!(delay_ms(frame_delay(1.0, 1000).unwrap()), 10.0);
    assert_eq!(delay_ms(frame_delay(0.001, 1).unwrap()), 10.0);
}

#[test]
fn delay_rejects_zero_frames_and_bad_durations() {
    assert!(matches!(frame_delay(1.0, 0), Err(RainError::NoFrames)));
    assert!(frame_delay(0.0, 10).is_err());
    assert!(frame_delay(f64::NAN, 10).is_err());
}

#[test]
fn opts_validation() {
    assert!(GifOpts::default().validate().is_ok());
    assert!(
        GifOpts {
            duration_secs: -1.0,
            ..GifOpts::default()
        }
        .validate()
        .is_err()
    );
    assert!(
        GifOpts {
            speed: 0,
            ..GifOpts::default()
        }
        .validate()
        .is_err()
    );
}

#[test]
fn empty_sequence_is_rejected_without_creating_a_file() {
    let dir = scratch("empty");
    let p = dir.join("out.gif");
    let err = write_gif(&[], &p, GifOpts::default()).unwrap_err();
    assert!(matches!(err, RainError::NoFrames));
    assert!(!p.exists());
}

#[test]
fn writes_every_frame() {
    let dir = scratch("frames");
    let frames = vec![
        solid(8, 6, [255, 0, 0]),
        solid(8, 6, [0, 255, 0]),
        solid(8, 6, [0, 0, 255]),
    ];
    let out = write_gif(&frames, dir.join("out.gif"), GifOpts::default()).unwrap();
    assert_eq!(out, dir.join("out.gif"));

    let decoded = decode(&out);
    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded[0].buffer().dimensions(), (8, 6));
    let px = decoded[1].buffer().get_pixel(3, 3).0;
    assert!(px[1] > 200 && px[0] < 50, "{px:?}");
}

#[test]
fn existing_output_is_never_overwritten() {
    let dir = scratch("collide");
    let p = dir.join("out.gif");
    std::fs::write(&p, b"keep me").unwrap();

    let frames = vec![solid(4, 4, [9, 9, 9])];
    let first = write_gif(&frames, &p, GifOpts::default()).unwrap();
    assert_eq!(first, dir.join("out_1.gif"));
    let second = write_gif(&frames, &p, GifOpts::default()).unwrap();
    assert_eq!(second, dir.join("out_2.gif"));
    assert_eq!(std::fs::read(&p).unwrap(), b"keep me");
}

#[test]
fn sink_rejects_mismatched_frames_and_misuse() {
    let dir = scratch("misuse");
    let mut sink = GifSink::new(dir.join("out.gif"), GifOpts::default()).unwrap();
    assert!(sink.push_frame(FrameIndex(0), &solid(4, 4, [0; 3])).is_err());

    sink.begin(SinkConfig {
        width: 4,
        height: 4,
        frame_count: 1,
    })
    .unwrap();
    assert!(sink.push_frame(FrameIndex(0), &solid(5, 4, [0; 3])).is_err());
    assert!(matches!(sink.end(), Err(RainError::NoFrames)));
}

struct FullDisk;

impl Write for FullDisk {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("no space left on device"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn checked_writer_records_failed_final_flush() {
    let errors = WriteErrors::default();
    {
        let mut w = CheckedWriter::new(FullDisk, errors.clone());
        // Fits in the buffer, so the failure only shows up when it is flushed on drop.
        w.write_all(b"GIF89a").unwrap();
    }
    let e = errors.lock().unwrap().take().unwrap();
    assert!(e.to_string().contains("no space"), "{e}");
}

#[test]
fn finishing_a_gif_reports_trailer_write_errors() {
    let errors = WriteErrors::default();
    let mut encoder = GifEncoder::new_with_speed(CheckedWriter::new(FullDisk, errors.clone()), 10);
    encoder.set_repeat(Repeat::Infinite).unwrap();
    let rgba = image::DynamicImage::ImageRgb8(solid(4, 4, [1, 2, 3])).into_rgba8();
    encoder
        .encode_frame(image::Frame::from_parts(
            rgba,
            0,
            0,
            frame_delay(1.0, 1).unwrap(),
        ))
        .unwrap();

    let err = finish_gif(encoder, &errors).unwrap_err();
    assert!(matches!(err, RainError::Encode(_)), "{err}");
}

#[test]
fn finishing_a_gif_on_a_healthy_writer_succeeds() {
    let errors = WriteErrors::default();
    let encoder = GifEncoder::new(CheckedWriter::new(Vec::<u8>::new(), errors.clone()));
    assert!(finish_gif(encoder, &errors).is_ok());
}
