use health_scan::core::completion::raw_response_from_text;
use health_scan::domain::model::InputFormat;
use health_scan::{normalize, normalize_text, HealthAnalysis};
use serde_json::{json, Value};

fn analysis(score: i64, pros: &[&str], cons: &[&str]) -> HealthAnalysis {
    HealthAnalysis {
        score,
        pros: pros.iter().map(|s| s.to_string()).collect(),
        cons: cons.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_well_formed_records_pass_through_unchanged() {
    let bullets = ["Low sugar", "High fiber", "Whole grain", "No additives", "Protein"];

    for score in 1..=10 {
        for len in 0..=5 {
            let pros = &bullets[..len];
            let cons = &bullets[5 - len..];
            let expected = analysis(score, pros, cons);

            let as_object = serde_json::to_value(&expected).unwrap();
            assert_eq!(normalize(&as_object), expected);

            let as_text = Value::String(as_object.to_string());
            assert_eq!(normalize(&as_text), expected);
        }
    }
}

#[test]
fn test_scores_are_floored_and_clamped() {
    let cases = [(json!(15), 10), (json!(-3), 1), (json!(7.8), 7), (json!(11.2), 10)];
    for (input, expected) in cases {
        let raw = json!({"score": input.clone(), "pros": [], "cons": []});
        assert_eq!(normalize(&raw).score, expected, "score input {}", input);
    }
}

#[test]
fn test_long_lists_keep_first_five_in_order() {
    let raw = json!({
        "score": 6,
        "pros": ["p1", "p2", "p3", "p4", "p5", "p6", "p7"],
        "cons": ["c1", "c2", "c3", "c4", "c5", "c6"]
    });
    let result = normalize(&raw);
    assert_eq!(result.pros, vec!["p1", "p2", "p3", "p4", "p5"]);
    assert_eq!(result.cons, vec!["c1", "c2", "c3", "c4", "c5"]);
}

#[test]
fn test_non_list_bullets_use_fallback_entries() {
    let raw = json!({"score": 6, "pros": "Tasty"});
    assert_eq!(
        normalize(&raw),
        analysis(6, &["No pros available"], &["No cons available"])
    );
}

#[test]
fn test_fenced_text_parses_like_unwrapped_text() {
    let body = r#"{"score": 4, "pros": ["Calcium"], "cons": ["Added sugar", "Palm oil"]}"#;
    let expected = normalize_text(body);
    assert_eq!(expected, analysis(4, &["Calcium"], &["Added sugar", "Palm oil"]));

    let tagged = format!("```json\n{}\n```", body);
    let bare = format!("```\n{}\n```", body);
    assert_eq!(normalize_text(&tagged), expected);
    assert_eq!(normalize_text(&bare), expected);
    assert_eq!(normalize(&Value::String(tagged)), expected);
}

#[test]
fn test_prose_around_embedded_object() {
    let text = r#"Sure! {"score":8,"pros":["Low sugar"],"cons":["High sodium"]} Hope that helps."#;
    assert_eq!(
        normalize(&json!(text)),
        analysis(8, &["Low sugar"], &["High sodium"])
    );
}

#[test]
fn test_non_json_text_yields_fallback_record() {
    assert_eq!(
        normalize(&json!("I cannot analyze this image.")),
        analysis(5, &["Unable to analyze"], &["Please try again"])
    );
}

#[test]
fn test_output_text_envelope_keeps_empty_list() {
    let raw = json!({"output_text": "{\"score\":3,\"pros\":[],\"cons\":[\"Too sugary\"]}"});
    assert_eq!(normalize(&raw), analysis(3, &[], &["Too sugary"]));
}

#[test]
fn test_output_items_envelope() {
    let raw = json!({
        "output": [
            {"content": [{"type": "output_text", "text": "```json\n{\"score\": 9, "}]},
            {"content": [{"type": "output_text", "text": "\"pros\": [\"Whole oats\"], \"cons\": []}\n```"}]}
        ]
    });
    assert_eq!(normalize(&raw), analysis(9, &["Whole oats"], &[]));
}

#[test]
fn test_chat_completion_body_end_to_end() {
    let body = json!({
        "id": "chatcmpl-abc",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": "Here is the analysis:\n```json\n{\"score\": 2, \"pros\": [\"Cheap\"], \"cons\": [\"Very high sugar\", \"Artificial colors\"]}\n```"
            },
            "finish_reason": "stop"
        }]
    })
    .to_string();

    let raw = raw_response_from_text(&body, InputFormat::Auto).unwrap();
    let result = normalize(&raw);
    assert_eq!(
        result,
        analysis(2, &["Cheap"], &["Very high sugar", "Artificial colors"])
    );
    assert_eq!(result.band(), health_scan::ScoreBand::Poor);
}
