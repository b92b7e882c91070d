extern crate rand;
extern crate regtree;

use rand::prelude::*;
use rand::rngs::StdRng;
use regtree::{rmse, ColumnMajorMatrix, Dataset, DatasetInfo, DecisionTree, TreeParams};

/// Noisy step function of a numeric dimension, shifted by a categorical one.
fn make_dataset(rng: &mut impl Rng, n_samples: usize) -> Dataset {
    let features = ColumnMajorMatrix::from_function(3, n_samples, |row, _| match row {
        0 => rng.gen_range(0.0..10.0),
        1 => rng.gen_range(0..4) as f64,
        _ => rng.gen_range(-1.0..1.0),
    });
    let target = features
        .columns()
        .map(|x| x[0].floor() + 5. * x[1] + rng.gen_range(-0.5..0.5))
        .collect();
    Dataset { features, target }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(0);
    let train = make_dataset(&mut rng, 2000);
    let test = make_dataset(&mut rng, 500);
    let info = DatasetInfo::numeric(3).with_categorical(1, 4);
    println!(
        "{} train samples, {} test samples",
        train.n_samples(),
        test.n_samples()
    );

    for max_depth in 1..8 {
        let mut tree_params = TreeParams::default();
        tree_params.max_depth = max_depth;
        tree_params.min_gain_split = 0.;

        println!("\nParams tree{:?}", tree_params);

        let mut tree = DecisionTree::build(&train, &info, &tree_params)?;
        println!("Leaves {} depth {}", tree.n_leaves(), tree.depth());
        println!(
            "RMSE train {:.8}",
            rmse(&train.target, &tree.par_predict(&train.features))
        );
        println!(
            "RMSE Test {:.8}",
            rmse(&test.target, &tree.par_predict(&test.features))
        );

        tree.prune(-0.5);
        println!(
            "Pruned: leaves {} RMSE Test {:.8}",
            tree.n_leaves(),
            rmse(&test.target, &tree.par_predict(&test.features))
        );
    }

    Ok(())
}
