//! Formatter contract tests: exact line grammar, totality on empty input,
//! and determinism.

use wifi_csi_sta::format::{format_record, LineBuf, LINE_CAPACITY};

fn format_line(rssi: i32, samples: &[i8]) -> (bool, Vec<u8>) {
    let mut line = LineBuf::new();
    let ok = format_record(rssi, samples, &mut line);
    (ok, line.as_bytes().to_vec())
}

#[test]
fn test_round_trip_reference_line() {
    let (ok, line) = format_line(-54, &[4, -3, 0, 127, -128]);
    assert!(ok);
    assert_eq!(line, b"CSI_DATA,-54,[ 4 -3 0 127 -128 ]\n");
}

#[test]
fn test_empty_samples_line() {
    // The formatter is total: two spaces, no tokens. Suppressing empty
    // records is the sink's job, asserted in sink_tests.
    let (ok, line) = format_line(10, &[]);
    assert!(ok);
    assert_eq!(line, b"CSI_DATA,10,[  ]\n");
}

#[test]
fn test_positive_rssi_has_no_sign() {
    let (ok, line) = format_line(7, &[1]);
    assert!(ok);
    assert_eq!(line, b"CSI_DATA,7,[ 1 ]\n");
}

#[test]
fn test_token_spacing_is_exact() {
    let (_, line) = format_line(-1, &[9, 9, 9]);
    let text = String::from_utf8(line).unwrap();
    assert!(text.starts_with("CSI_DATA,-1,[ "));
    assert!(text.ends_with(" ]\n"));
    assert!(!text.contains("  9"));
    assert!(!text.contains("9  "));
}

#[test]
fn test_deterministic_across_calls() {
    let samples = [4i8, -3, 0, 127, -128];
    let first = format_line(-54, &samples);
    for _ in 0..10 {
        assert_eq!(format_line(-54, &samples), first);
    }
}

#[test]
fn test_buffer_reuse_leaves_no_residue() {
    let mut line = LineBuf::new();
    assert!(format_record(-90, &[100; 50], &mut line));
    let long = line.as_bytes().to_vec();

    assert!(format_record(3, &[1], &mut line));
    assert_eq!(line.as_bytes(), b"CSI_DATA,3,[ 1 ]\n");
    assert_ne!(line.as_bytes(), long.as_slice());
}

#[test]
fn test_capacity_covers_worst_case() {
    // 612 samples of "-128" plus separators, header, and terminator.
    let samples = [i8::MIN; 612];
    let (ok, line) = format_line(i32::MIN, &samples);
    assert!(ok);
    assert!(line.len() <= LINE_CAPACITY);
    assert_eq!(line.iter().filter(|&&b| b == b'\n').count(), 1);
}
