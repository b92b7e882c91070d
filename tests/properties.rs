use proptest::prelude::*;
use regtree::*;

/// Samples with a numeric dimension (with ties) and a categorical one of 3 categories.
fn samples(max_len: usize) -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<f64>)> {
    (1..=max_len).prop_flat_map(|len| {
        let columns = proptest::collection::vec((0..10u8, 0..3u8), len)
            .prop_map(|v| {
                v.into_iter()
                    .map(|(x, c)| vec![x as f64, c as f64])
                    .collect::<Vec<_>>()
            });
        let responses = proptest::collection::vec((0..20u8).prop_map(f64::from), len);
        (columns, responses)
    })
}

fn info() -> DatasetInfo {
    DatasetInfo::numeric(2).with_categorical(1, 3)
}

fn fit(
    columns: &[Vec<f64>],
    responses: &[f64],
    max_depth: usize,
    min_leaf_size: usize,
) -> (DecisionTree, ColumnMajorMatrix<f64>, Vec<f64>, Vec<f64>) {
    let mut features = ColumnMajorMatrix::from_columns(columns.to_vec());
    let mut responses = responses.to_vec();
    // The weights identify the samples
    let mut weights: Vec<f64> = (0..responses.len()).map(|i| i as f64).collect();
    let params = TreeParams {
        min_leaf_size,
        min_gain_split: 0.,
        max_depth,
    };
    let tree = DecisionTree::fit_in_place(
        &mut features,
        &mut responses,
        &mut weights,
        &info(),
        &params,
        &mut AllDimensionSelect::new(2),
        &MSEGain::default(),
        None,
    )
    .expect("valid inputs");
    (tree, features, responses, weights)
}

proptest! {
    #[test]
    fn samples_are_only_reordered(
        (columns, responses) in samples(40),
        max_depth in 1..5usize,
        min_leaf_size in 1..4usize,
    ) {
        let (_, features, new_responses, weights) = fit(&columns, &responses, max_depth, min_leaf_size);
        let mut seen = vec![false; responses.len()];
        for (col, &id) in weights.iter().enumerate() {
            let id = id as usize;
            prop_assert!(!seen[id]);
            seen[id] = true;
            prop_assert_eq!(features.column(col), &columns[id][..]);
            prop_assert_eq!(new_responses[col], responses[id]);
        }
    }

    #[test]
    fn leaves_own_contiguous_ranges(
        (columns, responses) in samples(40),
        max_depth in 1..5usize,
        min_leaf_size in 1..4usize,
    ) {
        let (tree, features, responses, _) = fit(&columns, &responses, max_depth, min_leaf_size);
        prop_assert!(tree.depth() <= max_depth);
        let mut start = 0;
        for leaf in tree.root().leaves() {
            prop_assert!(leaf.n_obs() >= 1);
            let range = start..start + leaf.n_obs();
            prop_assert!((leaf.value() - mean(&responses[range.clone()])).abs() < 1e-9);
            for col in range {
                prop_assert_eq!(tree.predict(features.column(col)), leaf.value());
            }
            start += leaf.n_obs();
        }
        prop_assert_eq!(start, responses.len());
    }

    #[test]
    fn single_level_predicts_the_mean((columns, responses) in samples(40)) {
        let (tree, _, _, _) = fit(&columns, &responses, 1, 1);
        prop_assert!(tree.root().is_leaf());
        let expected = mean(&responses);
        for column in &columns {
            prop_assert!((tree.predict(column) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn prune_is_idempotent(
        (columns, responses) in samples(40),
        max_depth in 1..5usize,
        threshold in -50.0..0.0f64,
    ) {
        let (original, _, _, _) = fit(&columns, &responses, max_depth, 1);

        let mut tree = original.clone();
        tree.prune(std::f64::NEG_INFINITY);
        prop_assert_eq!(&tree, &original);

        tree.prune(threshold);
        prop_assert!(tree.n_leaves() <= original.n_leaves());
        let once = tree.clone();
        tree.prune(threshold);
        prop_assert_eq!(&tree, &once);

        tree.prune(std::f64::INFINITY);
        prop_assert!(tree.root().is_leaf());
        prop_assert_eq!(tree.root().n_obs(), responses.len());
        prop_assert!((tree.predict(&columns[0]) - mean(&responses)).abs() < 1e-9);
    }
}
