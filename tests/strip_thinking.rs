use serde_json::{json, Value};
use strip_thinking::{Plugin, StripThinking};

fn sanitize(body: Value) -> Value {
    StripThinking.sanitize(body).unwrap()
}

#[test]
fn test_reference_scenarios() {
    let cases = vec![
        (
            json!({
                "reasoning": {"effort": "high"},
                "messages": [{"role": "user", "content": "hi", "thinking": "scratch"}]
            }),
            json!({"messages": [{"role": "user", "content": "hi"}]}),
        ),
        (json!({"messages": []}), json!({"messages": []})),
        (json!({"model": "x"}), json!({"model": "x"})),
        (
            json!({"reasoning": {}, "messages": "not-an-array"}),
            json!({"messages": "not-an-array"}),
        ),
    ];

    for (input, expected) in cases {
        assert_eq!(sanitize(input.clone()), expected, "input: {}", input);
    }
}

#[test]
fn test_reasoning_removed_whatever_its_value() {
    for reasoning in [
        json!(null),
        json!(false),
        json!(0),
        json!("high"),
        json!([]),
        json!({"effort": "low", "max_tokens": 2048}),
    ] {
        let out = sanitize(json!({"model": "m", "reasoning": reasoning}));
        assert_eq!(out, json!({"model": "m"}));
    }
}

#[test]
fn test_messages_keep_length_and_order() {
    let input = json!({
        "model": "local",
        "messages": [
            {"role": "system", "content": "be brief"},
            {"role": "user", "content": "q1"},
            {"role": "assistant", "content": "a1", "thinking": {"text": "hmm", "signature": "sig"}},
            {"role": "user", "content": [{"type": "text", "text": "q2"}]},
            {"role": "assistant", "content": "a2", "thinking": null}
        ]
    });
    let out = sanitize(input.clone());

    let before = input["messages"].as_array().unwrap();
    let after = out["messages"].as_array().unwrap();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(after) {
        assert!(a.get("thinking").is_none());
        let mut expected = b.clone();
        expected.as_object_mut().unwrap().shift_remove("thinking");
        assert_eq!(a, &expected);
    }
    assert_eq!(out["model"], json!("local"));
}

#[test]
fn test_absent_messages_not_added() {
    let out = sanitize(json!({"reasoning": {"effort": "medium"}, "stream": true}));
    assert!(out.get("messages").is_none());
    assert_eq!(out, json!({"stream": true}));
}

#[test]
fn test_non_sequence_messages_untouched() {
    for messages in [
        json!(null),
        json!(42),
        json!("text"),
        json!({"thinking": "not a list, left alone"}),
    ] {
        let out = sanitize(json!({"messages": messages.clone()}));
        assert_eq!(out, json!({"messages": messages}));
    }
}

#[test]
fn test_nested_thinking_is_not_touched() {
    // Only the top-level `thinking` key of each message is metadata.
    let input = json!({
        "messages": [{"role": "user", "content": {"thinking": "user text"}}],
        "metadata": {"reasoning": "kept"}
    });
    assert_eq!(sanitize(input.clone()), input);
}

#[test]
fn test_idempotent() {
    let inputs = vec![
        json!({}),
        json!({"reasoning": 1, "messages": [{"thinking": 1}, 7, {"role": "user"}]}),
        json!({"messages": "x", "temperature": 0.2}),
    ];
    for input in inputs {
        let once = sanitize(input);
        let twice = sanitize(once.clone());
        assert_eq!(once, twice);
    }
}

#[test]
fn test_non_object_payload_is_contract_violation() {
    for bad in [json!(null), json!(true), json!("{}"), json!([])] {
        let err = StripThinking.sanitize(bad).unwrap_err();
        assert!(err.is_contract_violation(), "{}", err);
    }
}

#[test]
fn test_sanitize_in_place_borrows() {
    let mut body = json!({"reasoning": {}, "messages": [{"thinking": "t", "content": "c"}]});
    StripThinking::sanitize_in_place(&mut body).unwrap();
    assert_eq!(body, json!({"messages": [{"content": "c"}]}));
}

#[tokio::test]
async fn test_plugin_contract() {
    let plugin: std::sync::Arc<dyn Plugin> = std::sync::Arc::new(StripThinking::new());
    assert_eq!(plugin.name(), "strip-thinking");

    let out = plugin
        .transform_request_in(json!({"reasoning": {"effort": "high"}, "model": "m"}))
        .await
        .unwrap();
    assert_eq!(out, json!({"model": "m"}));

    // Responses are passed through unchanged.
    let resp = json!({"choices": [{"message": {"thinking": "kept"}}], "reasoning": "kept"});
    assert_eq!(
        plugin.transform_response_out(resp.clone()).await.unwrap(),
        resp
    );
}

#[test]
fn test_plugin_contract_blocking_host() {
    let out = tokio_test::block_on(
        StripThinking.transform_request_in(json!({"messages": [{"thinking": 1}]})),
    )
    .unwrap();
    assert_eq!(out, json!({"messages": [{}]}));
}
