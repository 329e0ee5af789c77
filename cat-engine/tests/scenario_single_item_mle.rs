use cat_engine::{CatSession, CatSessionOptionsBuilder, ItemParams};

#[test]
fn single_correct_item_gives_positive_theta_and_finite_se() {
    let opts = CatSessionOptionsBuilder::new().build().unwrap();
    let mut session = CatSession::new(opts);

    session.update(ItemParams { a: 1.0, b: 0.0, c: 0.0, d: 1.0 }, 1);

    assert!(session.theta() > 0.0);
    assert_eq!(session.n_items(), 1);
    assert!(session.se().is_finite());
}
