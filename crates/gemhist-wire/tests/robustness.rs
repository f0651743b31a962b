use gemhist_wire::{Builder, TableReader};

use proptest::prelude::*;

fn build_two_vector_record(xs: &[u32], ys: &[u32]) -> Vec<u8> {
    let mut b = Builder::new();
    let x = b.create_u32_vector(xs).unwrap();
    let y = b.create_u32_vector(ys).unwrap();
    b.begin_table(2).unwrap();
    b.set_vector_field(0, x).unwrap();
    b.set_vector_field(1, y).unwrap();
    let t = b.end_table().unwrap();
    b.finish(t).unwrap();
    b.into_vec().unwrap()
}

proptest! {
    #[test]
    fn round_trips_arbitrary_vectors(
        xs in proptest::collection::vec(any::<u32>(), 0..300),
        ys in proptest::collection::vec(any::<u32>(), 0..300),
    ) {
        let buf = build_two_vector_record(&xs, &ys);
        let table = TableReader::open_root(&buf).unwrap();

        let x = table.u32_vector(0).unwrap().unwrap();
        prop_assert_eq!(x.len(), xs.len());
        prop_assert_eq!(x.iter().collect::<Vec<_>>(), xs);

        let y = table.u32_vector(1).unwrap().unwrap();
        prop_assert_eq!(y.len(), ys.len());
        for (i, &expected) in ys.iter().enumerate() {
            prop_assert_eq!(y.get(i), Some(expected));
        }
    }

    // Guards against panics on corrupted/truncated inputs; not a replacement
    // for coverage-guided fuzzing.
    #[test]
    fn decoder_never_panics(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        if let Ok(table) = TableReader::open_root(&data) {
            for slot in 0..4 {
                if let Ok(Some(v)) = table.u32_vector(slot) {
                    let _ = v.get(0);
                    let _ = v.iter().count();
                    let _ = v.as_slice();
                }
            }
        }
    }

    #[test]
    fn truncations_of_a_valid_record_never_panic(
        xs in proptest::collection::vec(any::<u32>(), 0..50),
        cut in 0usize..200,
    ) {
        let buf = build_two_vector_record(&xs, &[]);
        let cut = cut.min(buf.len());
        let truncated = &buf[..cut];
        if let Ok(table) = TableReader::open_root(truncated) {
            let _ = table.u32_vector(0);
            let _ = table.u32_vector(1);
        }
    }
}
