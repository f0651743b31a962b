use gemhist::{GemHist, GemHistBuilder};

use proptest::prelude::*;

fn serialize(xhist: Option<&[u32]>, yhist: Option<&[u32]>) -> Vec<u8> {
    let mut builder = GemHistBuilder::new();
    if let Some(xs) = xhist {
        builder.set_xhist(xs).unwrap();
    }
    if let Some(ys) = yhist {
        builder.set_yhist(ys).unwrap();
    }
    builder.finish().unwrap()
}

#[test]
fn concrete_scenario() {
    let buf = serialize(Some(&[1, 2, 3]), Some(&[100, 200]));
    let hist = GemHist::from_buffer(&buf).unwrap();

    assert_eq!(hist.xhist_len(), 3);
    assert_eq!(hist.xhist(0), Some(1));
    assert_eq!(hist.xhist(1), Some(2));
    assert_eq!(hist.xhist(2), Some(3));

    assert_eq!(hist.yhist_len(), 2);
    assert_eq!(hist.yhist(0), Some(100));
    assert_eq!(hist.yhist(1), Some(200));
}

#[test]
fn absence_reads_like_emptiness() {
    let absent = serialize(None, Some(&[5]));
    let empty = serialize(Some(&[]), Some(&[5]));

    let absent = GemHist::from_buffer(&absent).unwrap();
    let empty = GemHist::from_buffer(&empty).unwrap();

    assert_eq!(absent.xhist_len(), 0);
    assert_eq!(empty.xhist_len(), 0);
    assert_eq!(absent.xhist(0), None);
    assert_eq!(empty.xhist(0), None);
    assert_eq!(absent.xhist_iter().count(), empty.xhist_iter().count());
}

#[test]
fn fields_are_independent() {
    let only_y = serialize(None, Some(&[9, 8, 7]));
    let hist = GemHist::from_buffer(&only_y).unwrap();
    assert_eq!(hist.xhist_len(), 0);
    assert_eq!(hist.yhist_iter().collect::<Vec<_>>(), vec![9, 8, 7]);

    let only_x = serialize(Some(&[4, 5]), None);
    let hist = GemHist::from_buffer(&only_x).unwrap();
    assert_eq!(hist.yhist_len(), 0);
    assert_eq!(hist.xhist_iter().collect::<Vec<_>>(), vec![4, 5]);
}

#[test]
fn order_is_preserved_verbatim() {
    // Unsorted, with duplicates: nothing may be reordered or deduplicated.
    let xs = [3, 1, 3, 2, 2, 0, u32::MAX, 0];
    let buf = serialize(Some(&xs), None);
    let hist = GemHist::from_buffer(&buf).unwrap();
    assert_eq!(hist.xhist_iter().collect::<Vec<_>>(), xs);
}

#[test]
fn slice_view_matches_element_reads() {
    let xs: Vec<u32> = (0..257).map(|i| i * 3).collect();
    let buf = serialize(Some(&xs), Some(&[2, 4, 6]));
    let hist = GemHist::from_buffer(&buf).unwrap();

    // The contiguous view is capability-gated; when present it must agree
    // with single-element reads over the full range.
    if let Some(slice) = hist.xhist_slice() {
        assert_eq!(slice.len(), hist.xhist_len());
        for (i, &v) in slice.iter().enumerate() {
            assert_eq!(hist.xhist(i), Some(v));
        }
    }
    if let Some(slice) = hist.yhist_slice() {
        assert_eq!(slice, &[2, 4, 6]);
    }
}

#[test]
fn large_histograms_round_trip() {
    let xs: Vec<u32> = (0..10_000).map(|i| i ^ 0xA5A5).collect();
    let ys: Vec<u32> = (0..10_000).rev().collect();
    let buf = serialize(Some(&xs), Some(&ys));
    let hist = GemHist::from_buffer(&buf).unwrap();

    assert_eq!(hist.xhist_len(), 10_000);
    assert_eq!(hist.yhist_len(), 10_000);
    assert_eq!(hist.xhist_iter().collect::<Vec<_>>(), xs);
    assert_eq!(hist.yhist_iter().collect::<Vec<_>>(), ys);
    assert_eq!(hist.xhist(9_999), Some(9_999 ^ 0xA5A5));
}

#[test]
fn record_embedded_at_a_nonzero_root_offset() {
    // Every reference is a forward relative offset, so a record pasted into a
    // larger buffer stays readable from its root word.
    let record = serialize(Some(&[11, 22]), None);
    let mut framed = vec![0u8; 8];
    framed.extend_from_slice(&record);

    let hist = GemHist::from_buffer_at(&framed, 8).unwrap();
    assert_eq!(hist.xhist_iter().collect::<Vec<_>>(), vec![11, 22]);
}

proptest! {
    #[test]
    fn round_trips_all_sequences(
        xs in proptest::collection::vec(any::<u32>(), 0..500),
        ys in proptest::collection::vec(any::<u32>(), 0..500),
    ) {
        let buf = serialize(Some(&xs), Some(&ys));
        let hist = GemHist::from_buffer(&buf).unwrap();

        prop_assert_eq!(hist.xhist_len(), xs.len());
        prop_assert_eq!(hist.yhist_len(), ys.len());
        prop_assert_eq!(hist.xhist_iter().collect::<Vec<_>>(), xs);
        prop_assert_eq!(hist.yhist_iter().collect::<Vec<_>>(), ys);
    }
}
