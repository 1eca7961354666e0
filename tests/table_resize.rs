use probe_table::{
    prime::is_prime,
    strategy::{Chaining, CustomProbing, DoubleHashing},
    Config, LoadFactorPolicy, Strategy,
};
use test_log::test;

fn strategies() -> [Strategy; 3] {
    [
        Chaining.into(),
        DoubleHashing.into(),
        CustomProbing::default().into(),
    ]
}

#[test]
fn resize_shrink_waits_for_enough_deletes() -> probe_table::Result<()> {
    for strategy in strategies() {
        let mut table = Config::new(strategy).build()?;

        for i in 0..7 {
            table.insert(i, ())?;
        }
        assert_eq!(29, table.size());

        // 7/29 is already below the shrink threshold, but the table only
        // shrinks after 3 deletions (half of the 7 items at the last resize)
        table.remove(&0)?;
        assert_eq!(29, table.size());

        table.remove(&1)?;
        assert_eq!(29, table.size());

        table.remove(&2)?;
        assert_eq!(13, table.size());

        for i in 3..7 {
            table.search(&i)?;
        }
    }

    Ok(())
}

#[test]
fn resize_sizes_stay_prime() -> probe_table::Result<()> {
    for strategy in strategies() {
        let mut table = Config::new(strategy).build()?;
        let mut max_size = 0;

        for i in 0..1_000 {
            table.insert(format!("key-{i}"), i)?;

            assert!(is_prime(table.size()));
            assert!(table.load_factor() <= 0.5);
            max_size = max_size.max(table.size());
        }

        for i in 0..1_000 {
            assert_eq!(Ok(i), table.remove(&format!("key-{i}")));

            assert!(is_prime(table.size()));
            assert!(table.size() >= 13);
        }

        assert!(max_size > 2_000);
        assert_eq!(13, table.size());
        assert_eq!(0, table.len());
    }

    Ok(())
}

#[test]
fn resize_drops_tombstones() -> probe_table::Result<()> {
    let mut table = Config::new(DoubleHashing).build()?;

    for i in 0..6 {
        table.insert(i, i)?;
    }
    table.remove(&0)?;
    table.remove(&1)?;
    assert_eq!(2, table.tombstones());
    assert_eq!(13, table.size());

    // Fills up past the grow threshold
    for i in 6..10 {
        table.insert(i, i)?;
    }

    assert_eq!(29, table.size());
    assert_eq!(0, table.tombstones());

    for i in 2..10 {
        assert_eq!(Ok(&i), table.search(&i));
    }

    Ok(())
}

#[test]
fn resize_respects_min_size() -> probe_table::Result<()> {
    let mut table = Config::new(DoubleHashing)
        .initial_size(7)
        .min_size(7)
        .build()?;
    assert_eq!(7, table.size());

    for i in 0..4 {
        table.insert(i, ())?;
    }
    assert_eq!(17, table.size());

    for i in 0..4 {
        table.remove(&i)?;
    }
    assert_eq!(7, table.size());

    Ok(())
}

#[test]
fn resize_custom_thresholds() -> probe_table::Result<()> {
    let mut table = Config::new(DoubleHashing)
        .load_factor_policy(LoadFactorPolicy::new(0.75, 0.1))
        .build()?;

    for i in 0..9 {
        table.insert(i, ())?;
    }
    assert_eq!(13, table.size());

    table.insert(9, ())?;
    assert_eq!(29, table.size());

    Ok(())
}
