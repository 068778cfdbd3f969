//! Integration test: configuration → file render → WAV on disk.

mod common;

use common::{FakeBackend, ProbeEngine};
use sb_engine::{ToneEngine, TUNES};
use sb_formats::{parse_header, WAV_HEADER_LEN};
use sb_master::{event_channel, run_session, ModeKind, PlayerConfig, PlayerError};
use std::fs;
use std::path::Path;

fn file_config(path: &Path, stereo: bool, audio16bit: bool, samplerate: u32, time: u32) -> PlayerConfig {
    PlayerConfig {
        stereo,
        audio16bit,
        samplerate,
        time,
        outfile: Some(path.to_path_buf()),
        hardware: false,
    }
}

#[test]
fn mono_8bit_one_second() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mono8.wav");
    let config = file_config(&path, false, false, 8000, 1);
    let engine = ToneEngine::new(config.audio_format().unwrap(), &TUNES[0]);
    let (_tx, rx) = event_channel();

    let summary = run_session(&config, engine, FakeBackend::default(), &rx).unwrap();
    assert_eq!(summary.mode, ModeKind::FileRender);
    assert_eq!(summary.bytes_rendered, 8000);

    let data = fs::read(&path).unwrap();
    assert_eq!(data.len(), 8044);
    let header = parse_header(&data).unwrap();
    assert_eq!(header.byte_rate, 8000);
    assert_eq!(header.block_align, 1);
    assert_eq!(header.data_size, 8000);
    assert_eq!(header.chunk_size as usize, data.len() - 8);

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.len(), 8000);
}

#[test]
fn stereo_16bit_two_seconds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stereo16.wav");
    let config = file_config(&path, true, true, 44100, 2);
    let (engine, calls) = ProbeEngine::new();
    let (_tx, rx) = event_channel();

    run_session(&config, engine, FakeBackend::default(), &rx).unwrap();

    // One second of audio per engine call.
    assert_eq!(calls.fills(), 2);
    let data = fs::read(&path).unwrap();
    assert_eq!(data.len(), 352_844);
    let header = parse_header(&data).unwrap();
    assert_eq!(header.data_size, 352_800);
    assert_eq!(header.format().unwrap(), config.audio_format().unwrap());
}

#[test]
fn sixteen_bit_samples_land_little_endian() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("le.wav");
    let config = file_config(&path, false, true, 8000, 1);
    let format = config.audio_format().unwrap();
    let (_tx, rx) = event_channel();
    run_session(&config, ToneEngine::new(format, &TUNES[1]), FakeBackend::default(), &rx).unwrap();

    // The same engine rendered in memory gives native-order samples.
    let mut native = vec![0u8; format.bytes_per_second() as usize];
    sb_engine::RenderEngine::fill_buffer(&mut ToneEngine::new(format, &TUNES[1]), &mut native);
    let expected: Vec<i16> = native
        .chunks_exact(2)
        .map(|b| i16::from_ne_bytes([b[0], b[1]]))
        .collect();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let decoded: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(decoded, expected);
    assert!(decoded.iter().any(|&s| s != 0));
}

#[test]
fn file_render_wins_over_hardware() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("both.wav");
    let mut config = file_config(&path, false, false, 8000, 1);
    config.hardware = true;
    let (engine, calls) = ProbeEngine::new();
    let (_tx, rx) = event_channel();

    let summary = run_session(&config, engine, FakeBackend::default(), &rx).unwrap();

    assert_eq!(summary.mode, ModeKind::FileRender);
    assert_eq!(calls.quanta(), 0);
    assert_eq!(fs::metadata(&path).unwrap().len(), 8044);
}

#[test]
fn unopenable_sink_fails_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.wav");
    let config = file_config(&path, true, true, 44100, 5);
    let (engine, calls) = ProbeEngine::new();
    let (_tx, rx) = event_channel();

    let err = run_session(&config, engine, FakeBackend::default(), &rx).unwrap_err();

    assert!(matches!(err, PlayerError::Io(_)), "unexpected error: {err}");
    assert_eq!(calls.fills(), 0);
}

#[test]
fn config_error_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.wav");
    let config = file_config(&path, true, true, 0, 5);
    let (engine, calls) = ProbeEngine::new();
    let (_tx, rx) = event_channel();

    let err = run_session(&config, engine, FakeBackend::default(), &rx).unwrap_err();

    assert!(matches!(err, PlayerError::Config(_)));
    assert!(!path.exists());
    assert_eq!(calls.fills(), 0);
}

#[test]
fn engine_fault_aborts_and_keeps_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.wav");
    let config = file_config(&path, false, false, 8000, 10);
    let (engine, calls) = ProbeEngine::new();
    let (_tx, rx) = event_channel();

    let err = run_session(&config, engine.fault_after_fills(3), FakeBackend::default(), &rx).unwrap_err();

    assert!(matches!(err, PlayerError::EngineFault(_)));
    assert_eq!(calls.fills(), 3);
    // Header plus the two seconds written before the fault.
    assert_eq!(fs::metadata(&path).unwrap().len(), (WAV_HEADER_LEN + 2 * 8000) as u64);
}

#[test]
fn zero_length_render_is_a_valid_empty_wav() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.wav");
    let config = file_config(&path, true, true, 44100, 0);
    let (engine, calls) = ProbeEngine::new();
    let (_tx, rx) = event_channel();

    run_session(&config, engine, FakeBackend::default(), &rx).unwrap();

    assert_eq!(calls.fills(), 0);
    assert_eq!(fs::metadata(&path).unwrap().len(), WAV_HEADER_LEN as u64);
    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.len(), 0);
}
