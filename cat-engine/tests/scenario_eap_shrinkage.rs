use cat_engine::{CatSession, CatSessionOptionsBuilder, ItemParams};

#[test]
fn eap_shrinks_toward_prior_mean() {
    // spec.md §8 scenario 4
    let opts = CatSessionOptionsBuilder::new()
        .method("eap")
        .prior("norm", [0.0, 1.0])
        .build()
        .unwrap();
    let mut session = CatSession::new(opts);

    session.update_batch(
        &[
            ItemParams { a: 1.0, b: -4.0, c: 0.5, d: 1.0 },
            ItemParams { a: 1.0, b: -3.0, c: 0.5, d: 1.0 },
        ],
        &[0, 0],
    )
    .unwrap();

    assert!((session.theta() - (-1.65)).abs() < 0.15, "theta = {}", session.theta());
}
