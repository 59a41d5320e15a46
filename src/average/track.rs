//! Folding one linked track into a single record.

use tracing::{debug, warn};

use super::options::AggregateOptions;
use super::policy::{FieldPolicy, PolicyTable};
use crate::i3::{Field, Record, RecordSink, RecordStore, OBJECT_DATA_SIZE};
use crate::util::{Error, Result};

/// Result of folding one track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackOutcome {
    /// The record written to the sink.
    pub record: Record,
    /// Number of input records folded into the track, head included.
    pub length: u32,
    /// Noise records on the chain stamped while stepping over them.
    pub noise: u32,
    /// Linked records whose track id differs from the head's.
    pub id_mismatches: u32,
}

/// Weight of a record in its track's averages.
///
/// Non-positive (and NaN) heights carry no weight.
#[inline]
pub fn weight_of(record: &Record) -> f32 {
    let height = record.height();
    if height > 0.0 {
        height.sqrt()
    } else {
        0.0
    }
}

/// Running sums for one track.
struct Accumulator<'a> {
    policy: &'a PolicyTable,
    head: Record,
    weighted: [f32; OBJECT_DATA_SIZE],
    plain: [f32; OBJECT_DATA_SIZE],
    total_weight: f32,
    count: u32,
}

impl<'a> Accumulator<'a> {
    fn new(policy: &'a PolicyTable, head: Record) -> Self {
        let mut acc = Self {
            policy,
            head,
            weighted: [0.0; OBJECT_DATA_SIZE],
            plain: [0.0; OBJECT_DATA_SIZE],
            total_weight: 0.0,
            count: 0,
        };
        acc.add(&head);
        acc
    }

    fn add(&mut self, record: &Record) {
        let weight = weight_of(record);
        if weight == 0.0 {
            debug!(height = record.height(), "record carries no weight");
        }
        let table = self.policy;
        for (field, policy) in table.iter() {
            let i = field.index();
            let value = record.float(field);
            match policy {
                FieldPolicy::Average => {
                    self.weighted[i] += value * weight;
                    self.plain[i] += value;
                }
                FieldPolicy::Total => self.weighted[i] += value,
                FieldPolicy::NoAverage => {}
            }
        }
        self.total_weight += weight;
        self.count += 1;
    }

    fn finish(self) -> Record {
        let mut out = self.head;
        for (field, policy) in self.policy.iter() {
            let i = field.index();
            let value = match policy {
                FieldPolicy::Average if self.total_weight > 0.0 => {
                    self.weighted[i] / self.total_weight
                }
                FieldPolicy::Average => self.plain[i] / self.count as f32,
                FieldPolicy::Total => self.weighted[i],
                FieldPolicy::NoAverage => continue,
            };
            out.set_float(field, value);
        }
        out
    }
}

/// Fold the track starting at `start` into one record and emit it.
///
/// Every record of the chain is stamped with `stamp` in the store. Noise
/// records on the chain are stepped over: stamped if they are not yet, never
/// folded, and their link is still followed. The emitted record keeps the
/// head's integer slots as they were before stamping.
pub fn aggregate_track<S, K>(
    store: &mut S,
    sink: &mut K,
    start: u32,
    stamp: i32,
    opts: &AggregateOptions,
) -> Result<TrackOutcome>
where
    S: RecordStore + ?Sized,
    K: RecordSink + ?Sized,
{
    let limit = store.len();
    let head = store.read(start)?;
    let track_id = head.track_id();
    let mut acc = Accumulator::new(&opts.policy, head);

    let mut current = head;
    current.set_visited(stamp);
    store.write(start, &current)?;

    let mut index = start;
    let mut hops = 1u32;
    let mut length = 1u32;
    let mut noise = 0u32;
    let mut id_mismatches = 0u32;

    while let Some(next) = current.link() {
        if next >= limit {
            return Err(Error::corrupt(
                start,
                index,
                format!("links to {} past the end of the list ({} records)", next, limit),
            ));
        }
        if hops >= limit {
            return Err(Error::corrupt(start, index, "chain is longer than the list"));
        }
        hops += 1;

        let mut record = store.read(next)?;
        if record.is_noise() {
            if record.visited() != stamp {
                record.set_visited(stamp);
                store.write(next, &record)?;
                noise += 1;
            }
            debug!(head = start, index = next, "stepping over noise record");
            current = record;
            index = next;
            continue;
        }
        if record.visited() == stamp {
            return Err(Error::corrupt(
                start,
                index,
                format!("links to {} which is already part of a track", next),
            ));
        }

        if opts.check_track_ids && record.track_id() != track_id {
            warn!(
                head = start,
                index = next,
                expected = track_id,
                found = record.track_id(),
                x = record.float(Field::Xo),
                y = record.float(Field::Yo),
                category = record.category(),
                frame = record.frame(),
                "tracking error detected"
            );
            id_mismatches += 1;
        }

        acc.add(&record);
        record.set_visited(stamp);
        store.write(next, &record)?;

        current = record;
        index = next;
        length += 1;
    }

    let record = acc.finish();
    sink.emit(&record)?;
    debug!(head = start, length, noise, "averaged track");

    Ok(TrackOutcome { record, length, noise, id_mismatches })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i3::MemStore;

    fn molecule(height: f32, x: f32, area: f32, link: i32) -> Record {
        let mut r = Record::new();
        r.set_float(Field::Height, height);
        r.set_float(Field::X, x);
        r.set_float(Field::Area, area);
        r.set_int(Field::Link, link);
        r
    }

    #[test]
    fn test_weighted_average() {
        let mut store = MemStore::new(vec![
            molecule(4.0, 10.0, 1.0, 1),
            molecule(9.0, 20.0, 2.0, 2),
            molecule(16.0, 30.0, 3.0, -1),
        ]);
        let mut out = Vec::new();
        let opts = AggregateOptions::default();

        let outcome = aggregate_track(&mut store, &mut out, 0, 1, &opts).unwrap();
        assert_eq!(outcome.length, 3);
        assert_eq!(out.len(), 1);

        let r = &out[0];
        let expected = (10.0 * 2.0 + 20.0 * 3.0 + 30.0 * 4.0) / 9.0;
        assert!((r.float(Field::X) - expected).abs() < 1e-5);
        assert_eq!(r.float(Field::Area), 6.0);
        assert_eq!(r.float(Field::Height), 29.0);
        // Head's link is carried over.
        assert_eq!(r.int(Field::Link), 1);

        assert!(store.records().iter().all(|r| r.visited() == 1));
    }

    #[test]
    fn test_zero_height_falls_back_to_mean() {
        let mut store = MemStore::new(vec![molecule(0.0, 10.0, 1.0, 1), molecule(-4.0, 20.0, 1.0, 0)]);
        let mut out = Vec::new();
        aggregate_track(&mut store, &mut out, 0, 1, &AggregateOptions::default()).unwrap();

        let x = out[0].float(Field::X);
        assert!(x.is_finite());
        assert_eq!(x, 15.0);
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut store = MemStore::new(vec![molecule(1.0, 0.0, 0.0, 1), molecule(1.0, 0.0, 0.0, 1)]);
        let mut out = Vec::new();
        let err = aggregate_track(&mut store, &mut out, 0, 1, &AggregateOptions::default()).unwrap_err();
        assert!(matches!(err, Error::CorruptChain { head: 0, index: 1, .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_link_out_of_range() {
        let mut store = MemStore::new(vec![molecule(1.0, 0.0, 0.0, 5)]);
        let mut out = Vec::new();
        let err = aggregate_track(&mut store, &mut out, 0, 1, &AggregateOptions::default()).unwrap_err();
        assert!(matches!(err, Error::CorruptChain { head: 0, index: 0, .. }));
    }

    #[test]
    fn test_track_id_mismatch_is_not_fatal() {
        let mut a = molecule(1.0, 0.0, 0.0, 1);
        a.set_int(Field::Fiti, 3);
        let mut b = molecule(1.0, 0.0, 0.0, -1);
        b.set_int(Field::Fiti, 4);
        let mut store = MemStore::new(vec![a, b]);
        let mut out = Vec::new();
        let opts = AggregateOptions { check_track_ids: true, ..Default::default() };

        let outcome = aggregate_track(&mut store, &mut out, 0, 1, &opts).unwrap();
        assert_eq!(outcome.id_mismatches, 1);
        assert_eq!(out.len(), 1);
    }

    fn noise(x: f32, link: i32) -> Record {
        let mut r = molecule(1.0, x, 5.0, link);
        r.set_int(Field::Cat, -1);
        r
    }

    #[test]
    fn test_linked_noise_is_stepped_over() {
        // 0 -> 1 (noise) -> 2
        let mut store = MemStore::new(vec![molecule(4.0, 10.0, 1.0, 1), noise(90.0, 2), molecule(9.0, 20.0, 2.0, -1)]);
        let mut out = Vec::new();

        let outcome = aggregate_track(&mut store, &mut out, 0, 1, &AggregateOptions::default()).unwrap();
        assert_eq!(outcome.length, 2);
        assert_eq!(outcome.noise, 1);
        assert_eq!(out[0].float(Field::X), 16.0);
        assert_eq!(out[0].float(Field::Area), 3.0);
        assert!(store.records().iter().all(|r| r.visited() == 1));
    }

    #[test]
    fn test_already_stamped_noise_is_not_corruption() {
        let mut stamped = noise(90.0, 2);
        stamped.set_visited(1);
        let mut store = MemStore::new(vec![molecule(4.0, 10.0, 1.0, 1), stamped, molecule(9.0, 20.0, 2.0, -1)]);
        let mut out = Vec::new();

        let outcome = aggregate_track(&mut store, &mut out, 0, 1, &AggregateOptions::default()).unwrap();
        assert_eq!(outcome.length, 2);
        assert_eq!(outcome.noise, 0);
        assert_eq!(out[0].float(Field::X), 16.0);
    }
}
