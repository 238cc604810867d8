use std::io::Cursor;

use serde_json::{Value, json};

use ringslot::session::Session;

fn run(capacity: usize, input: &str) -> Vec<Value> {
    let mut session = Session::new(capacity).unwrap();
    let mut out = Vec::new();
    session.run(Cursor::new(input), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn zero_capacity_session_fails() {
    assert!(Session::new(0).is_err());
}

#[test]
fn shrink_over_protocol() {
    let input = r#"
{"type":"add","value":10}
{"type":"add","value":20}
{"type":"add","value":30}
{"type":"add","value":40}
{"type":"add","value":50}
{"type":"resize","size":3}
{"type":"get_all"}
{"type":"stats"}
"#;
    let resps = run(5, input);
    assert_eq!(resps.len(), 8);
    assert_eq!(resps[6], json!({ "ok": true, "values": [30, 40, 50] }));
    assert_eq!(
        resps[7],
        json!({ "ok": true, "capacity": 3, "current_amount": 3, "head": 0 })
    );
}

#[test]
fn errors_do_not_change_state() {
    let input = r#"
{"type":"add","value":"a"}
{"type":"resize","size":0}
{"type":"get","index":2}
not json
{"type":"get_all"}
"#;
    let resps = run(2, input);
    assert_eq!(resps[1]["error"], "invalid_argument");
    assert_eq!(resps[2]["error"], "index_out_of_range");
    assert_eq!(resps[3]["error"], "bad_request");
    assert_eq!(resps[4], json!({ "ok": true, "values": ["a"] }));
}

#[test]
fn mixed_value_types() {
    let input = r#"
{"type":"add","value":{"temp":21.5}}
{"type":"add","value":[1,2]}
{"type":"add"}
{"type":"get_all"}
"#;
    let resps = run(4, input);
    assert_eq!(
        resps[3]["values"],
        json!([{ "temp": 21.5 }, [1, 2], null])
    );
}

#[test]
fn huge_resize_keeps_session_alive() {
    let input = r#"
{"type":"add","value":1}
{"type":"resize","size":18446744073709551615}
{"type":"add","value":2}
{"type":"get_all"}
"#;
    let resps = run(3, input);
    assert_eq!(resps.len(), 4);
    assert_eq!(resps[1]["ok"], json!(false));
    assert_eq!(resps[1]["error"], "invalid_argument");
    assert_eq!(resps[3], json!({ "ok": true, "values": [1, 2] }));
}
