use std::collections::HashMap;

use cat_engine::{
    CatSessionOptionsBuilder, ItemParams, MultiCat, MultiCatBuilder, MultiZetaStimulus, UpdateAndSelectOptions,
    ZetaTuple,
};

fn stimulus(id: u64, cats: &[&str]) -> MultiZetaStimulus<serde_json::Value> {
    MultiZetaStimulus::new(
        id,
        vec![ZetaTuple::new(
            cats.iter().map(|s| s.to_string()).collect(),
            ItemParams { a: 1.0, b: 0.0, c: 0.0, d: 1.0 },
        )],
        serde_json::json!({ "id": id }),
    )
}

#[test]
fn two_constructs_over_a_shared_three_item_pool() {
    // spec.md §8 scenario 6
    let opts = || CatSessionOptionsBuilder::new().build().unwrap();
    let mut controller: MultiCat<serde_json::Value> = MultiCatBuilder::new()
        .session("reading", opts())
        .session("math", opts())
        .corpus(vec![stimulus(0, &["reading"]), stimulus(1, &["math"]), stimulus(2, &["reading", "math"])])
        .seed(11)
        .build()
        .unwrap();

    let next = controller
        .update_and_select(
            UpdateAndSelectOptions::new("reading").batch(vec![0], vec![1], vec!["reading".to_string()]),
        )
        .unwrap();

    assert_eq!(controller.remaining_items().len(), 2);
    assert_eq!(controller.n_items()["reading"], 1);
    let next = next.expect("pool has two items left for reading");
    assert_ne!(next.id, 0, "the answered item must not be offered again");

    let n_items_map: HashMap<String, usize> = controller.n_items();
    assert_eq!(n_items_map.len(), 3); // reading, math, unvalidated
}
