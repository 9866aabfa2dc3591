use std::io::BufReader;

use image::AnimationDecoder as _;
use image::codecs::gif::GifDecoder;

use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::palette::ColorIndex;

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("gyre_unit").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn two_frame_sequence() -> FrameSequence {
    let canvas = Canvas::new(6, 4).unwrap();
    let mut a = IndexedFrame::filled(canvas, ColorIndex::WHITE);
    a.indices[0] = ColorIndex::BLACK;
    let mut b = IndexedFrame::filled(canvas, ColorIndex::WHITE);
    b.indices[23] = ColorIndex::RED;
    FrameSequence {
        canvas,
        frames: vec![a, b],
        delays_cs: vec![0, 5],
    }
}

#[test]
fn partial_path_is_a_hidden_per_process_sibling() {
    let cfg = GifEncodeConfig::new("out/dir/rgb.gif");
    let expected = format!("out/dir/.rgb.gif.{}.partial", std::process::id());
    assert_eq!(cfg.partial_path(), PathBuf::from(expected));
}

#[test]
fn config_without_file_name_is_rejected() {
    assert!(GifEncodeConfig::new("..").validate().is_err());
    assert!(GifEncodeConfig::new("a.gif").validate().is_ok());
}

#[test]
fn writes_decodable_animation_and_cleans_up() {
    let dir = out_dir("writes_decodable_animation");
    let cfg = GifEncodeConfig::new(dir.join("anim.gif"));
    let _ = std::fs::remove_file(&cfg.out_path);

    write_gif(&two_frame_sequence(), &Palette::standard(), &cfg).unwrap();
    assert!(cfg.out_path.exists());
    assert!(!cfg.partial_path().exists());

    let reader = BufReader::new(File::open(&cfg.out_path).unwrap());
    let frames = GifDecoder::new(reader)
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].buffer().dimensions(), (6, 4));
    assert_eq!(frames[1].delay().numer_denom_ms(), (50, 1));

    let px = frames[0].buffer().get_pixel(0, 0).0;
    assert!(px[0] < 16 && px[1] < 16 && px[2] < 16, "{px:?}");
    let px = frames[0].buffer().get_pixel(5, 3).0;
    assert!(px[0] > 240 && px[1] > 240 && px[2] > 240, "{px:?}");
}

#[test]
fn frames_index_the_shared_global_palette() {
    let dir = out_dir("shared_global_palette");
    let cfg = GifEncodeConfig::new(dir.join("indexed.gif"));
    let seq = two_frame_sequence();
    let palette = Palette::standard();
    write_gif(&seq, &palette, &cfg).unwrap();

    let mut opts = gif::DecodeOptions::new();
    opts.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = opts
        .read_info(BufReader::new(File::open(&cfg.out_path).unwrap()))
        .unwrap();

    let expected_palette: Vec<u8> = (0..palette.len())
        .flat_map(|i| palette.rgb(ColorIndex(i as u8)).unwrap())
        .collect();
    assert_eq!(decoder.global_palette(), Some(expected_palette.as_slice()));

    let mut decoded = 0;
    while let Some(frame) = decoder.read_next_frame().unwrap() {
        let source = &seq.frames[decoded];
        let expected: Vec<u8> = source.indices.iter().map(|c| c.0).collect();
        assert!(frame.palette.is_none(), "frame {decoded} carries a local palette");
        assert_eq!(&frame.buffer[..], expected.as_slice(), "frame {decoded}");
        assert_eq!(frame.delay, seq.delays_cs[decoded]);
        decoded += 1;
    }
    assert_eq!(decoded, seq.len());
}

#[test]
fn refuses_to_overwrite_when_asked() {
    let dir = out_dir("refuses_to_overwrite");
    let path = dir.join("keep.gif");
    std::fs::write(&path, b"existing").unwrap();

    let cfg = GifEncodeConfig {
        overwrite: false,
        ..GifEncodeConfig::new(&path)
    };
    let err = write_gif(&two_frame_sequence(), &Palette::standard(), &cfg).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(std::fs::read(&path).unwrap(), b"existing");
}

#[test]
fn invalid_sequence_leaves_no_file_behind() {
    let dir = out_dir("invalid_sequence");
    let cfg = GifEncodeConfig::new(dir.join("bad.gif"));
    let _ = std::fs::remove_file(&cfg.out_path);

    let mut seq = two_frame_sequence();
    seq.frames[1].indices[0] = ColorIndex(42);
    assert!(write_gif(&seq, &Palette::standard(), &cfg).is_err());
    assert!(!cfg.out_path.exists());
    assert!(!cfg.partial_path().exists());
}

#[test]
fn png_export_expands_palette() {
    let dir = out_dir("png_export");
    let path = dir.join("frame.png");
    let seq = two_frame_sequence();
    write_frame_png(&seq.frames[1], &Palette::standard(), &path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (6, 4));
    assert_eq!(img.get_pixel(5, 3).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn oversized_canvas_is_rejected_before_writing() {
    let dir = out_dir("oversized_canvas");
    let cfg = GifEncodeConfig::new(dir.join("wide.gif"));
    let _ = std::fs::remove_file(&cfg.out_path);

    let canvas = Canvas::new(70_000, 1).unwrap();
    let seq = FrameSequence {
        canvas,
        frames: vec![IndexedFrame::filled(canvas, ColorIndex::WHITE)],
        delays_cs: vec![0],
    };
    let err = write_gif(&seq, &Palette::standard(), &cfg).unwrap_err();
    assert!(err.to_string().contains("width"), "{err}");
    assert!(!cfg.out_path.exists());
    assert!(!cfg.partial_path().exists());
}
