use std::path::PathBuf;

use framescan_core::{sequences_from_filename_list, DetectOptions, FrameRange, Time};

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

#[test]
fn test_contiguous_padded_sequence() {
    let seqs = sequences_from_filename_list(
        &paths(&["img.0001.jpg", "img.0002.jpg", "img.0003.jpg"]),
        DetectOptions::default(),
    );
    assert_eq!(seqs.len(), 1);
    let s = &seqs[0];
    assert_eq!(s.prefix(), "img.");
    assert_eq!(s.suffix(), ".jpg");
    assert_eq!(s.padding(), 4);
    assert!(s.is_strict_padding());
    assert_eq!(s.ranges(), &[FrameRange::new(1, 3, 1)]);
    assert_eq!(s.standard_pattern(), "img.####.jpg");
    assert_eq!(s.c_style_pattern(), "img.%04d.jpg");
}

#[test]
fn test_unpadded_sequence_with_missing_frames() {
    let seqs = sequences_from_filename_list(
        &paths(&["img.1.jpg", "img.2.jpg", "img.10.jpg"]),
        DetectOptions::default(),
    );
    assert_eq!(seqs.len(), 1);
    let s = &seqs[0];
    assert_eq!(s.padding(), 0);
    assert!(!s.is_strict_padding());
    assert_eq!(s.global_range(), (1, 10));
    assert!(s.has_missing_file());
    assert_eq!(s.nb_files(), 3);
    assert_eq!(s.nb_missing_files(), 7);
}

#[test]
fn test_stepped_sequence() {
    let seqs = sequences_from_filename_list(
        &paths(&["img.1.jpg", "img.3.jpg", "img.5.jpg", "img.7.jpg"]),
        DetectOptions::default(),
    );
    assert_eq!(seqs.len(), 1);
    assert_eq!(seqs[0].ranges(), &[FrameRange::new(1, 7, 2)]);
    assert_eq!(seqs[0].nb_files(), 4);
    // the stepped progression is complete, so nothing is missing
    assert!(!seqs[0].has_missing_file());
    assert_eq!(seqs[0].nb_missing_files(), 0);
}

#[test]
fn test_mixed_padding_yields_two_sequences() {
    let seqs = sequences_from_filename_list(
        &paths(&["img99.jpg", "img100.jpg", "img0099.jpg", "img0100.jpg"]),
        DetectOptions::default(),
    );
    assert_eq!(seqs.len(), 2);

    let strict: Vec<_> = seqs.iter().filter(|s| s.is_strict_padding()).collect();
    let loose: Vec<_> = seqs.iter().filter(|s| !s.is_strict_padding()).collect();
    assert_eq!(strict.len(), 1);
    assert_eq!(strict[0].padding(), 4);
    assert_eq!(strict[0].global_range(), (99, 100));
    assert_eq!(loose.len(), 1);
    assert_eq!(loose[0].padding(), 0);
    assert_eq!(loose[0].global_range(), (99, 100));
}

#[test]
fn test_plain_files_yield_no_sequences() {
    let seqs = sequences_from_filename_list(
        &paths(&["a.txt", "b.txt", "c.txt"]),
        DetectOptions::default(),
    );
    assert!(seqs.is_empty());
}

#[test]
fn test_signed_sequence_with_negative_option() {
    let options = DetectOptions::default() | DetectOptions::NEGATIVE;
    let seqs = sequences_from_filename_list(
        &paths(&["f-2.jpg", "f-1.jpg", "f0.jpg", "f1.jpg"]),
        options,
    );
    assert_eq!(seqs.len(), 1);
    let s = &seqs[0];
    assert_eq!(s.padding(), 1);
    assert!(!s.is_strict_padding());
    assert_eq!(s.ranges(), &[FrameRange::new(-2, 1, 1)]);
    assert_eq!(s.filename_at(-1), "f-1.jpg");
}

#[test]
fn test_without_negative_option_sign_splits_skeletons() {
    // "f-1.jpg" and "f1.jpg" have different skeletons when the sign is text
    let seqs = sequences_from_filename_list(
        &paths(&["f-2.jpg", "f-1.jpg", "f1.jpg", "f2.jpg"]),
        DetectOptions::default(),
    );
    assert_eq!(seqs.len(), 2);
}

#[test]
fn test_singleton_is_not_a_sequence() {
    let seqs =
        sequences_from_filename_list(&paths(&["img.0042.jpg"]), DetectOptions::default());
    assert!(seqs.is_empty());
}

#[test]
fn test_singleton_promoted_when_based_on_filename() {
    let options = DetectOptions::default() | DetectOptions::SEQUENCE_BASED_ON_FILENAME;
    let seqs = sequences_from_filename_list(&paths(&["img.0042.jpg"]), options);
    assert_eq!(seqs.len(), 1);
    assert_eq!(seqs[0].nb_files(), 1);
    assert_eq!(seqs[0].global_range(), (42, 42));
}

#[test]
fn test_grouping_disabled_without_numbers_option() {
    let seqs = sequences_from_filename_list(
        &paths(&["img.0001.jpg", "img.0002.jpg"]),
        DetectOptions::empty(),
    );
    assert!(seqs.is_empty());
}

#[test]
fn test_distinct_skeletons_never_merge() {
    let seqs = sequences_from_filename_list(
        &paths(&[
            "img.0001.jpg",
            "img.0002.jpg",
            "img.0001.exr",
            "img.0002.exr",
        ]),
        DetectOptions::default(),
    );
    assert_eq!(seqs.len(), 2);
    // output is sorted by standard pattern
    assert_eq!(seqs[0].suffix(), ".exr");
    assert_eq!(seqs[1].suffix(), ".jpg");
}

#[test]
fn test_directory_components_are_ignored() {
    let seqs = sequences_from_filename_list(
        &paths(&["/shots/a/img.0001.jpg", "/shots/b/img.0002.jpg"]),
        DetectOptions::default(),
    );
    assert_eq!(seqs.len(), 1);
}

#[test]
fn test_round_trip_of_every_detected_frame() {
    let options = DetectOptions::default() | DetectOptions::NEGATIVE;
    let names = [
        "render.0001.exr",
        "render.0002.exr",
        "render.0005.exr",
        "f-2.jpg",
        "f-1.jpg",
        "f0.jpg",
        "img.3.jpg",
        "img.7.jpg",
    ];
    let seqs = sequences_from_filename_list(&paths(&names), options);
    for s in &seqs {
        for t in s.frames().collect::<Vec<Time>>() {
            let filename = s.filename_at(t);
            let (parsed, raw) = s
                .is_in(&filename)
                .unwrap_or_else(|| panic!("{filename} should be in {s}"));
            assert_eq!(parsed, t);
            assert_eq!(raw.parse::<Time>().unwrap(), t);
        }
    }
}

#[test]
fn test_partition_soundness_of_detected_members() {
    // every input filename appears in exactly one sequence's frame list
    let names = ["img99.jpg", "img100.jpg", "img0099.jpg", "img0100.jpg"];
    let seqs = sequences_from_filename_list(&paths(&names), DetectOptions::default());
    let mut produced: Vec<String> = seqs.iter().flat_map(|s| s.files()).collect();
    produced.sort();
    let mut expected: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    expected.sort();
    assert_eq!(produced, expected);
}
