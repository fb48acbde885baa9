use std::collections::BTreeMap;

use crate::decompose::{FileNumbers, FileStrings};
use crate::frame_range::{FrameRange, Time};
use crate::sequence::Sequence;

/// Turn one bucket of same-skeleton filenames into sequences.
///
/// The time axis is the varying numeric column; when several columns vary the
/// bucket is first partitioned by the raw text of every other column and each
/// partition analyzed on the last varying column. Within a partition, members
/// are split by padding class, so `img99.jpg` and `img0099.jpg` never merge.
///
/// One-frame outputs are returned as-is; callers downgrade them to plain
/// files when appropriate.
pub(crate) fn build_sequences(skeleton: &FileStrings, bucket: &[FileNumbers]) -> Vec<Sequence> {
    if bucket.is_empty() {
        return Vec::new();
    }
    let n_cols = bucket[0].len();
    debug_assert!(bucket.iter().all(|m| m.len() == n_cols));
    debug_assert!(skeleton.len() == n_cols + 1);

    let varying: Vec<usize> = (0..n_cols)
        .filter(|&i| {
            let first = bucket[0].get(i).value();
            bucket.iter().any(|m| m.get(i).value() != first)
        })
        .collect();

    // the time axis is the last varying column; with nothing varying (a
    // singleton bucket, or duplicated names) the last column stands in
    let axis = varying.last().copied().unwrap_or(n_cols - 1);

    if varying.len() <= 1 {
        let members: Vec<&FileNumbers> = bucket.iter().collect();
        return split_padding_classes(skeleton, &members, axis);
    }

    let mut partitions: BTreeMap<Vec<&str>, Vec<&FileNumbers>> = BTreeMap::new();
    for member in bucket {
        let key: Vec<&str> = (0..n_cols)
            .filter(|&i| i != axis)
            .map(|i| member.get(i).raw())
            .collect();
        partitions.entry(key).or_default().push(member);
    }

    let mut out = Vec::new();
    for members in partitions.into_values() {
        out.extend(split_padding_classes(skeleton, &members, axis));
    }
    out
}

/// Partition members of one time axis by padding class and emit one sequence
/// per class.
///
/// Zero-padded members of width `w` form a strict class. An unpadded member
/// joins the widest strict class whose width its digit count can render
/// (`%0wd` of its value reproduces the raw text); leftovers form the loose
/// class, whose padding is the common digit count when uniform, else 0.
fn split_padding_classes(
    skeleton: &FileStrings,
    members: &[&FileNumbers],
    axis: usize,
) -> Vec<Sequence> {
    let mut strict: BTreeMap<usize, Vec<&FileNumbers>> = BTreeMap::new();
    let mut unpadded: Vec<&FileNumbers> = Vec::new();

    for &member in members {
        let field = member.get(axis);
        if field.padding() > 0 {
            strict.entry(field.padding()).or_default().push(member);
        } else {
            unpadded.push(member);
        }
    }

    let widths: Vec<usize> = strict.keys().copied().collect();
    let mut loose: Vec<&FileNumbers> = Vec::new();
    for member in unpadded {
        let digits = member.get(axis).nb_digits();
        match widths
            .iter()
            .rev()
            .find(|&&w| w <= digits)
            .and_then(|w| strict.get_mut(w))
        {
            Some(class) => class.push(member),
            None => loose.push(member),
        }
    }

    let mut out = Vec::new();
    for (&width, class) in &strict {
        out.push(make_sequence(skeleton, class, axis, width, true));
    }
    if !loose.is_empty() {
        let digits = loose[0].get(axis).nb_digits();
        let uniform = loose.iter().all(|m| m.get(axis).nb_digits() == digits);
        let padding = if uniform { digits } else { 0 };
        out.push(make_sequence(skeleton, &loose, axis, padding, false));
    }
    out
}

fn make_sequence(
    skeleton: &FileStrings,
    class: &[&FileNumbers],
    axis: usize,
    padding: usize,
    strict_padding: bool,
) -> Sequence {
    let mut sorted: Vec<&FileNumbers> = class.to_vec();
    sorted.sort_by_key(|m| m.get(axis).value());
    sorted.dedup_by_key(|m| m.get(axis).value());

    let times: Vec<Time> = sorted.iter().map(|m| m.get(axis).value()).collect();
    let step = extract_step(&times);
    let ranges = ranges_from_times(&times, step);

    // fixed columns keep their raw text; any member provides it
    let template = sorted[0];
    let mut prefix = String::new();
    for i in 0..axis {
        prefix.push_str(skeleton.get(i));
        prefix.push_str(template.get(i).raw());
    }
    prefix.push_str(skeleton.get(axis));

    let mut suffix = String::new();
    for i in (axis + 1)..template.len() {
        suffix.push_str(skeleton.get(i));
        suffix.push_str(template.get(i).raw());
    }
    suffix.push_str(skeleton.get(template.len()));

    Sequence::from_parts(prefix, suffix, padding, strict_padding, ranges)
}

/// Greatest common divisor of the successive differences of sorted,
/// deduplicated times. 1 with fewer than two frames.
pub(crate) fn extract_step(times: &[Time]) -> Time {
    if times.len() <= 1 {
        return 1;
    }
    let mut step = 0;
    for pair in times.windows(2) {
        step = gcd(step, pair[1] - pair[0]);
    }
    if step == 0 {
        1
    } else {
        step
    }
}

fn gcd(a: Time, b: Time) -> Time {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Cut sorted times into maximal runs of the class step. Every run keeps
/// the class step, one-frame runs included, so the sequence remembers its
/// stepping.
fn ranges_from_times(times: &[Time], step: Time) -> Vec<FrameRange> {
    let mut ranges = Vec::new();
    let mut start = times[0];
    let mut prev = times[0];
    for &t in &times[1..] {
        if t - prev == step {
            prev = t;
        } else {
            ranges.push(FrameRange::new(start, prev, step));
            start = t;
            prev = t;
        }
    }
    ranges.push(FrameRange::new(start, prev, step));
    ranges
}
