use std::collections::HashMap;

use cat_engine::{
    CatSessionOptionsBuilder, ItemParams, MultiCatBuilder, MultiZetaStimulus, Operator, StopAfterNItems,
    StoppingRule, UpdateAndSelectOptions, ZetaTuple,
};

fn stimulus(id: u64) -> MultiZetaStimulus<serde_json::Value> {
    MultiZetaStimulus::new(
        id,
        vec![ZetaTuple::new(
            vec!["reading".to_string()],
            ItemParams { a: 1.0, b: 0.0, c: 0.0, d: 1.0 },
        )],
        serde_json::json!({ "id": id }),
    )
}

#[test]
fn stop_after_n_items_fires_with_the_literal_reason_string() {
    // spec.md §8 scenario 7
    let opts = CatSessionOptionsBuilder::new().build().unwrap();
    let stopping = StoppingRule::new(
        Box::new(StopAfterNItems::new(HashMap::from([("reading".to_string(), 2)]))),
        Operator::Or,
    );
    let mut controller = MultiCatBuilder::new()
        .session("reading", opts)
        .corpus(vec![stimulus(0), stimulus(1), stimulus(2)])
        .stopping(stopping)
        .seed(3)
        .build()
        .unwrap();

    controller
        .update_and_select(UpdateAndSelectOptions::new("reading").batch(vec![0], vec![1], vec!["reading".to_string()]))
        .unwrap();
    let result = controller
        .update_and_select(UpdateAndSelectOptions::new("reading").batch(vec![1], vec![1], vec!["reading".to_string()]))
        .unwrap();

    assert!(result.is_none());
    assert_eq!(controller.stopping_reason(), Some("Early stopping"));
}
