use anyhow::Result;
use ironfold::instances::{And, Append, Concat, First, Max, Min, Sum};
use ironfold::testing::{TestDataBuilder, assert_grouping_invariant, grouping_results};
use ironfold::{
    ExecMode, Grouping, MergeError, Reducer, merge_fn, reduce, reduce_grouped, reduce_or_identity,
    reduce_with,
};
use std::sync::atomic::{AtomicUsize, Ordering};

fn parallel(threads: Option<usize>, partitions: usize) -> Result<Reducer> {
    Ok(Reducer::new(ExecMode::Parallel {
        threads,
        partitions: Some(partitions),
    })?)
}

#[test]
fn sum_with_and_without_items() -> Result<()> {
    let add = Sum::<i32>::new();
    assert_eq!(reduce(vec![1, 2, 3, 4], &add)?, 10);
    assert_eq!(reduce_or_identity(vec![1, 2, 3, 4], &add), 10);
    assert_eq!(reduce_or_identity(Vec::new(), &add), 0);
    Ok(())
}

#[test]
fn single_item_is_returned_unchanged() -> Result<()> {
    let calls = AtomicUsize::new(0);
    let counting = merge_fn(|a: u32, b: u32| {
        calls.fetch_add(1, Ordering::Relaxed);
        a + b
    });
    assert_eq!(reduce(vec![42], &counting)?, 42);
    assert_eq!(calls.load(Ordering::Relaxed), 0);
    Ok(())
}

#[test]
fn empty_input_without_identity_is_an_error() {
    let err = reduce(Vec::<u8>::new(), &First::new()).unwrap_err();
    assert!(matches!(err, MergeError::EmptyInputWithoutIdentity));

    let err = Reducer::sequential()
        .reduce(Vec::<u8>::new(), &Max::new())
        .unwrap_err();
    assert!(matches!(err, MergeError::EmptyInputWithoutIdentity));
}

#[test]
fn supplied_identity_only_applies_to_empty_input() -> Result<()> {
    let last_wins = merge_fn(|_: u32, b: u32| b);
    assert_eq!(reduce_with(vec![], &last_wins, Some(0))?, 0);
    assert_eq!(reduce_with(vec![7, 9], &last_wins, Some(0))?, 9);
    assert!(reduce_with(Vec::new(), &last_wins, None).is_err());
    Ok(())
}

#[test]
fn subtraction_depends_on_grouping() -> Result<()> {
    let minus = merge_fn(|a: i64, b: i64| a - b);
    let items = vec![10, 4, 3];

    let left = reduce_grouped(items.clone(), &minus, Grouping::LeftFold)?;
    let right = reduce_grouped(items.clone(), &minus, Grouping::RightFold)?;
    assert_eq!(left, 3);
    assert_eq!(right, 9);
    assert_ne!(left, right);

    // no identity registered
    assert!(reduce_grouped(Vec::new(), &minus, Grouping::Balanced).is_err());
    Ok(())
}

#[test]
fn subtraction_of_one_to_four() -> Result<()> {
    let minus = merge_fn(|a: i64, b: i64| a - b);
    let items = vec![1, 2, 3, 4];
    assert_eq!(reduce_grouped(items.clone(), &minus, Grouping::LeftFold)?, -8);
    assert_eq!(reduce_grouped(items.clone(), &minus, Grouping::RightFold)?, -2);
    assert!(!ironfold::testing::is_associative_on(&minus, &1, &2, &3));
    Ok(())
}

#[test]
fn sequential_reducer_handles_deep_nesting() -> Result<()> {
    let nest = merge_fn(|a: Vec<u32>, b: Vec<u32>| {
        let depth = a[0].max(b[0]) + 1;
        vec![depth]
    });
    let leaves = vec![vec![0u32]; 1 << 16];
    assert_eq!(Reducer::sequential().reduce(leaves, &nest)?, vec![16]);
    Ok(())
}

#[test]
fn boolean_and_with_identity() -> Result<()> {
    assert!(reduce_or_identity(Vec::new(), &And));
    assert!(reduce_or_identity(vec![true, true, true], &And));
    assert!(!reduce(vec![true, false, true], &And)?);
    Ok(())
}

#[test]
fn min_max_product_over_floats() -> Result<()> {
    use ironfold::derive::product2;

    let range = product2(Min::<f64>::new(), Max::<f64>::new());
    let leaves: Vec<(f64, f64)> = [-1.0, 5.0, 3.0].into_iter().map(|x| (x, x)).collect();
    assert_eq!(reduce(leaves, &range)?, (-1.0, 5.0));
    assert_eq!(
        reduce_or_identity(Vec::new(), &range),
        (f64::INFINITY, f64::NEG_INFINITY)
    );
    Ok(())
}

#[test]
fn every_shape_agrees_for_associative_ops() {
    let ints = TestDataBuilder::<i64>::new().add_range(-20..=37).build();
    assert_grouping_invariant(&Sum::new(), &ints);
    assert_grouping_invariant(&Max::new(), &ints);

    let words = TestDataBuilder::new()
        .add_generated(17, |i| format!("{i},"))
        .build();
    assert_grouping_invariant(&Concat, &words);

    let results = grouping_results(&Sum::<i64>::new(), &ints).unwrap();
    assert!(results.len() >= 3);
    assert!(grouping_results(&Sum::<i64>::new(), &ints[..0]).is_none());
}

#[test]
fn parallel_reduction_preserves_order() -> Result<()> {
    let leaves = TestDataBuilder::<i32>::new()
        .add_range(0..=999)
        .map(|x: i32| vec![x])
        .build();
    let expected: Vec<i32> = (0..=999).collect();

    for partitions in [1, 2, 7, 16, 1000, 4096] {
        for fanout in [2, 3, 8] {
            let reducer = parallel(None, partitions)?.with_fanout(fanout)?;
            assert_eq!(reducer.reduce(leaves.clone(), &Append::new())?, expected);
        }
    }
    Ok(())
}

#[test]
fn parallel_and_sequential_agree() -> Result<()> {
    let items: Vec<u64> = (1..=10_000).collect();
    let seq = Reducer::sequential().reduce(items.clone(), &Sum::new())?;
    let par = Reducer::default().reduce(items, &Sum::new())?;
    assert_eq!(seq, 50_005_000);
    assert_eq!(seq, par);
    Ok(())
}

#[test]
fn dedicated_pool_runs_the_reduction() -> Result<()> {
    let widest = AtomicUsize::new(0);
    let observe = merge_fn(|a: u64, b: u64| {
        widest.fetch_max(rayon::current_num_threads(), Ordering::Relaxed);
        a + b
    });

    let reducer = parallel(Some(3), 6)?;
    assert_eq!(reducer.reduce((1..=600).collect(), &observe)?, 180_300);
    assert_eq!(widest.load(Ordering::Relaxed), 3);
    Ok(())
}

#[test]
fn fewer_items_than_partitions() -> Result<()> {
    let reducer = parallel(Some(2), 64)?;
    assert_eq!(reducer.reduce(vec![5, 6], &Sum::<i32>::new())?, 11);
    assert_eq!(reducer.reduce(vec![5], &Sum::<i32>::new())?, 5);
    assert_eq!(reducer.reduce_or_identity(vec![], &Sum::<i32>::new()), 0);
    Ok(())
}

#[test]
fn invalid_reducer_settings() {
    assert!(matches!(
        Reducer::new(ExecMode::Parallel { threads: None, partitions: Some(0) }),
        Err(MergeError::InvalidConfig(_))
    ));
    assert!(matches!(
        Reducer::sequential().with_fanout(0),
        Err(MergeError::InvalidConfig(_))
    ));
}

#[test]
fn chunked_grouping_handles_uneven_tail() -> Result<()> {
    let show = merge_fn(|a: String, b: String| format!("({a}{b})"));
    let items: Vec<String> = ["a", "b", "c", "d", "e"].map(String::from).to_vec();
    assert_eq!(
        reduce_grouped(items, &show, Grouping::Chunked { size: 2 })?,
        "(((ab)(cd))e)"
    );
    Ok(())
}
