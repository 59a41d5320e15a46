//! Whole-list scan driving the track folding.

use std::path::Path;

use tracing::info;

use super::options::AggregateOptions;
use super::track::aggregate_track;
use crate::i3::{FileStore, OStream, RecordSink, RecordStore};
use crate::util::Result;

/// Counters describing one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationSummary {
    /// Records in the input list.
    pub molecules: u32,
    /// Tracks emitted.
    pub tracks: u32,
    /// Noise records stamped without output.
    pub noise: u32,
    /// Records folded into a track behind its head.
    pub linked: u32,
    /// Records passed over because they were not unvisited when reached.
    pub skipped: u32,
    /// Linked records whose track id disagreed with their head.
    pub id_mismatches: u32,
}

/// Scan every record of `store` and emit one averaged record per track.
///
/// The "unvisited" marker is whatever record 0 carries when the scan starts;
/// every record handled here is stamped with that value plus one.
pub fn aggregate_store<S, K>(
    store: &mut S,
    sink: &mut K,
    opts: &AggregateOptions,
) -> Result<AggregationSummary>
where
    S: RecordStore + ?Sized,
    K: RecordSink + ?Sized,
{
    let molecules = store.len();
    let mut summary = AggregationSummary { molecules, ..Default::default() };
    if molecules == 0 {
        return Ok(summary);
    }

    let unvisited = store.read(0)?.visited();
    let stamp = unvisited.wrapping_add(1);

    for i in 0..molecules {
        if opts.progress_interval > 0 && i % opts.progress_interval == 0 {
            info!("Processing molecule {}", i);
        }

        let mut record = store.read(i)?;

        if record.visited() != unvisited {
            summary.skipped += 1;
            continue;
        }

        if record.is_noise() {
            record.set_visited(stamp);
            store.write(i, &record)?;
            summary.noise += 1;
            continue;
        }

        let outcome = aggregate_track(store, sink, i, stamp, opts)?;
        summary.tracks += 1;
        summary.linked += outcome.length - 1;
        summary.noise += outcome.noise;
        summary.id_mismatches += outcome.id_mismatches;
    }

    store.flush()?;
    Ok(summary)
}

/// Average the tracks of the list at `input` into a new list at `output`.
pub fn run_aggregation(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<AggregationSummary> {
    run_aggregation_with(input, output, &AggregateOptions::default())
}

/// [`run_aggregation`] with explicit settings.
///
/// The input list is stamped in place. The output gets the input header,
/// one record per track, a trailing zero word, and a molecule count equal
/// to the number of tracks.
pub fn run_aggregation_with(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    opts: &AggregateOptions,
) -> Result<AggregationSummary> {
    let input = input.as_ref();
    let output = output.as_ref();
    let _span = tracing::info_span!("avemlist", input = %input.display()).entered();

    let mut store = FileStore::open(input)?;
    let mut out = OStream::create(output)?;
    out.write_bytes(store.header())?;

    let summary = aggregate_store(&mut store, &mut out, opts)?;
    info!("Processed {} tracks", summary.tracks);

    out.write_end_marker()?;
    out.patch_molecules(summary.tracks)?;
    out.finish()?;

    Ok(summary)
}
