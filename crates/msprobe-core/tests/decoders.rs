//! Tests for the decoders against a scripted chip

mod common;

use common::ScriptedChip;
use msprobe_core::decoder::{self, Bertold, Decoder, Fazant, Flaky, Murderous, Unknown};
use msprobe_core::error::AccessError;
use msprobe_core::types::{Address, Colorspace, InputFormat, Region, RegisterSnapshot, Signal};

#[test]
fn test_flaky_reads_all_four_windows()
{
    let mut chip = ScriptedChip::flaky_1080p();
    let status = Flaky.decode(&mut chip).unwrap();

    assert_eq!(status.width, 1920);
    assert_eq!(status.height, 1080);
    assert_eq!(status.signal, Some(Signal::Present));
    assert_eq!(status.colorspace, Some(Colorspace::Rgb));
    assert_eq!(status.format, Some(InputFormat::Hdmi));
    assert_eq!(status.frame_id, 0);

    assert_eq!(
        chip.reads,
        vec![
            Region::ram(Address::new(0xf660), 4),
            Region::ram(Address::new(0xf6e9), 1),
            Region::ram(Address::new(0x1c3a), 1),
            Region::ram(Address::new(0x1c41), 1),
        ]
    );
}

#[test]
fn test_flaky_unknown_format_code_stays_unset()
{
    let mut chip = ScriptedChip::flaky_1080p();
    chip.poke(0x1c41, &[0x01]).poke(0x1c3a, &[0x07]).poke(0xf6e9, &[0x01]);

    let status = Flaky.decode(&mut chip).unwrap();
    assert_eq!(status.format, None);
    assert_eq!(status.colorspace, Some(Colorspace::Y444));
    assert_eq!(status.signal, Some(Signal::Absent));
}

#[test]
fn test_flaky_fails_on_first_empty_read()
{
    let mut chip = ScriptedChip::flaky_1080p();
    chip.empty_reads = 1;

    let err = Flaky.decode(&mut chip).unwrap_err();
    assert!(matches!(err, AccessError::Empty { .. }));
    assert_eq!(chip.reads.len(), 1);
}

#[test]
fn test_flaky_fails_when_any_later_read_is_empty()
{
    for empty_at in 1..4 {
        let mut chip = ScriptedChip::flaky_1080p();
        chip.empty_read_at = Some(empty_at);

        let err = Flaky.decode(&mut chip).unwrap_err();
        assert!(matches!(err, AccessError::Empty { .. }), "read {empty_at}: {err:?}");
        assert_eq!(chip.reads.len(), empty_at + 1, "stops at the failed read");
    }
}

#[test]
fn test_murderous_interlaced_block()
{
    let mut chip = ScriptedChip::new();
    let mut block = [0u8; 16];
    block[0] = 0x0f;
    block[4..6].copy_from_slice(&1920u16.to_le_bytes());
    block[12..14].copy_from_slice(&540u16.to_le_bytes());
    chip.poke(0xe180, &block);

    let status = Murderous.decode(&mut chip).unwrap();
    assert_eq!((status.width, status.height), (1920, 1080));
    assert_eq!(status.signal, Some(Signal::Present));
    assert_eq!(chip.reads, vec![Region::ram(Address::new(0xe180), 16)]);
}

#[test]
fn test_murderous_no_signal_after_progressive()
{
    let mut chip = ScriptedChip::new();
    chip.poke(0xe180, &[0x08]);

    let status = Murderous.decode(&mut chip).unwrap();
    assert_eq!(status.signal, Some(Signal::Absent));
}

#[test]
fn test_murderous_empty_read_fails()
{
    let mut chip = ScriptedChip::new();
    chip.empty_reads = 1;
    assert!(Murderous.decode(&mut chip).is_err());
}

#[test]
fn test_unknown_decodes_only_dimensions_and_signal()
{
    let mut chip = ScriptedChip::new();
    chip.poke(0xf606, &[0x00, 0x05, 0xff, 0xff, 0xff, 0xff, 0xd0, 0x02])
        .poke(0xf6e9, &[0x00])
        .poke(0x1c3a, &[0x01])
        .poke(0x1c41, &[0x02]);

    let status = Unknown.decode(&mut chip).unwrap();
    assert_eq!((status.width, status.height), (1280, 720));
    assert_eq!(status.signal, Some(Signal::Present));
    assert_eq!(status.colorspace, None);
    assert_eq!(status.format, None);
    assert_eq!(
        chip.reads,
        vec![Region::ram(Address::new(0xf606), 8), Region::ram(Address::new(0xf6e9), 1)]
    );
}

#[test]
fn test_unknown_fails_on_empty_timing_read()
{
    let mut chip = ScriptedChip::new();
    chip.empty_reads = 1;
    assert!(matches!(Unknown.decode(&mut chip), Err(AccessError::Empty { .. })));
}

#[test]
fn test_unknown_fails_when_signal_flag_read_is_empty()
{
    let mut chip = ScriptedChip::new();
    chip.poke(0xf606, &[0x00, 0x05, 0, 0, 0, 0, 0xd0, 0x02]);
    chip.empty_read_at = Some(1);

    let result = Unknown.decode(&mut chip);
    match result {
        Err(AccessError::Empty { region }) => {
            assert_eq!(region, Region::ram(Address::new(0xf6e9), 1));
        }
        other => panic!("Expected an empty signal-flag read, got {other:?}"),
    }
    assert_eq!(chip.reads.len(), 2);
}

#[test]
fn test_bertold_uses_registers()
{
    let mut chip = ScriptedChip::new();
    chip.registers = Some(RegisterSnapshot::new(99, [0, 0, 0xd0, 0x02, 0xe0, 0x01, 0, 0]));

    let status = Bertold::BEFORE_SCALER.decode(&mut chip).unwrap();
    assert_eq!((status.width, status.height), (720, 480));
    assert_eq!(status.signal, Some(Signal::Present));
    assert_eq!(status.frame_id, 99);
    assert_eq!(chip.calls, vec![Address::new(0xf41e)]);
    assert!(chip.reads.is_empty());

    Bertold::AFTER_SCALER.decode(&mut chip).unwrap();
    assert_eq!(chip.calls, vec![Address::new(0xf41e), Address::new(0xf406)]);
}

#[test]
fn test_bertold_call_failure()
{
    let mut chip = ScriptedChip::new();
    let err = Bertold::AFTER_SCALER.decode(&mut chip).unwrap_err();
    assert!(matches!(err, AccessError::ProcedureFailed { .. }));
}

#[test]
fn test_fazant_is_idempotent_and_touches_nothing()
{
    let mut chip = ScriptedChip::new();
    chip.empty_reads = usize::MAX;

    let first = Fazant.decode(&mut chip).unwrap();
    for _ in 0..100 {
        assert_eq!(Fazant.decode(&mut chip).unwrap(), first);
    }
    assert_eq!((first.width, first.height), (42, 42));
    assert_eq!(first.signal, Some(Signal::Diagnostic));
    assert!(chip.reads.is_empty());
    assert!(chip.calls.is_empty());
}

#[test]
fn test_every_registered_decoder_fails_cleanly_without_data()
{
    for entry in decoder::REGISTRY {
        let mut chip = ScriptedChip::new();
        chip.empty_reads = usize::MAX;
        let result = entry.decode(&mut chip);
        if entry.name() == "fazant" {
            assert!(result.is_ok());
        } else {
            assert!(result.is_err(), "{} should fail", entry.name());
        }
    }
}
