//! Round-trip tests over the public API, driven by wire documents captured
//! from real XML-RPC traffic (a home-automation CCU and the classic
//! `sample.sum` examples).

use xmlrpc_codec::{parse_call, parse_response, Call, Fault, Response, Value};

use std::collections::HashMap;

const SAMPLE_SUM_CALL: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<methodCall>
   <methodName>sample.sum</methodName>
   <params>
      <param>
         <value><int>17</int></value>
      </param>
      <param>
         <value><int>13</int></value>
      </param>
   </params>
</methodCall>"#;

const SAMPLE_SUM_RESPONSE: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<methodResponse>
   <params>
      <param>
         <value><int>30</int></value>
      </param>
   </params>
</methodResponse>"#;

const INSTALL_CALL: &str = r#"<?xml version="1.0"?><methodCall><methodName>setInstallModeWithWhitelist</methodName><params><param><value><boolean>1</boolean></value></param><param><value><i4>30</i4></value></param><param><value><array><data><value><struct><member><name>ADDRESS</name><value><string>3014F7XXXXXXXXYYYY8CBEEE</string></value></member><member><name>KEY</name><value><string>FBCABCDEFG508A29ABCDEFG413CE9FEF</string></value></member><member><name>KEY_MODE</name><value><string>LOCAL</string></value></member></struct></value></data></array></value></param></params></methodCall>"#;

const EMPTY_RESPONSE: &str = r#"<?xml version="1.0" encoding="iso-8859-1"?>
<methodResponse><params><param>
  <value></value>
</param></params></methodResponse>"#;

const LIST_DEVICES_CALL: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?><methodCall><methodName>listDevices</methodName><params><param><value>ZeePusher</value></param></params></methodCall>"#;

const MULTICALL: &str = r#"<?xml version="1.0" encoding="iso-8859-1"?>
<methodCall><methodName>system.multicall</methodName>
<params><param><value><array><data><value><struct><member><name>methodName</name><value>event</value></member><member><name>params</name><value><array><data><value>SeePusher</value><value>LEQ123456:0</value><value>STICKY_UNREACH</value><value><boolean>1</boolean></value></data></array></value></member></struct></value><value><struct><member><name>methodName</name><value>event</value></member><member><name>params</name><value><array><data><value>SeePusher</value><value>LEQ123458:0</value><value>UNREACH</value><value><boolean>1</boolean></value></data></array></value></member></struct></value><value><struct><member><name>methodName</name><value>event</value></member><member><name>params</name><value><array><data><value>SeePusher</value><value>LEQ123457:0</value><value>STICKY_UNREACH</value><value><boolean>1</boolean></value></data></array></value></member></struct></value><value><struct><member><name>methodName</name><value>event</value></member><member><name>params</name><value><array><data><value>SeePusher</value><value>LEQ123459:0</value><value>UNREACH</value><value><boolean>1</boolean></value></data></array></value></member></struct></value></data></array></value></param></params></methodCall>"#;

#[test]
fn parses_simple_call() {
    let call = parse_call(&mut SAMPLE_SUM_CALL.as_bytes()).unwrap();

    assert_eq!(call.method_name(), "sample.sum");
    assert_eq!(call.params().len(), 2);
    assert_eq!(call[0], Value::Int(17));
    assert_eq!(call[1], Value::Int(13));
}

#[test]
fn parses_simple_response() {
    let response = parse_response(&mut SAMPLE_SUM_RESPONSE.as_bytes()).unwrap();

    assert_eq!(response, Response::Value(Value::Int(30)));
}

#[test]
fn parses_untyped_empty_value_as_empty_string() {
    // If no type is indicated, the type is string.
    let response = parse_response(&mut EMPTY_RESPONSE.as_bytes()).unwrap();

    assert_eq!(response, Response::Value(Value::from("")));
}

#[test]
fn parses_call_with_struct_array() {
    let call = parse_call(&mut INSTALL_CALL.as_bytes()).unwrap();

    assert_eq!(call.method_name(), "setInstallModeWithWhitelist");
    assert_eq!(call.params().len(), 3);
    assert_eq!(call[0], Value::Bool(true));
    assert_eq!(call[1], Value::Int(30));
    assert_eq!(call[2].count(), 1);
    assert_eq!(call[2][0].count(), 3);
    assert_eq!(call[2][0]["ADDRESS"], Value::from("3014F7XXXXXXXXYYYY8CBEEE"));
    assert_eq!(call[2][0]["KEY"], Value::from("FBCABCDEFG508A29ABCDEFG413CE9FEF"));
    assert_eq!(call[2][0]["KEY_MODE"], Value::from("LOCAL"));
}

#[test]
fn parses_untyped_string_parameter() {
    let call = parse_call(&mut LIST_DEVICES_CALL.as_bytes()).unwrap();

    assert_eq!(call.method_name(), "listDevices");
    assert_eq!(call.params(), &[Value::from("ZeePusher")]);
}

#[test]
fn parses_and_decodes_multicall() {
    let call = parse_call(&mut MULTICALL.as_bytes()).unwrap();

    assert_eq!(call.method_name(), "system.multicall");
    assert_eq!(call.params().len(), 1);

    let batch = match call[0] {
        Value::Array(ref batch) => batch,
        ref other => panic!("expected an array parameter, got {:?}", other),
    };
    assert_eq!(batch.len(), 4);

    let first = Call::from_value(&batch[0]).expect("first entry did not decode");
    assert_eq!(first.method_name(), "event");
    assert_eq!(
        first.params(),
        &[
            Value::from("SeePusher"),
            Value::from("LEQ123456:0"),
            Value::from("STICKY_UNREACH"),
            Value::Bool(true),
        ]
    );

    // Every entry decodes, in original order.
    let ids: Vec<Value> = batch
        .iter()
        .map(|entry| Call::from_value(entry).unwrap()[1].clone())
        .collect();
    assert_eq!(
        ids,
        vec![
            Value::from("LEQ123456:0"),
            Value::from("LEQ123458:0"),
            Value::from("LEQ123457:0"),
            Value::from("LEQ123459:0"),
        ]
    );
}

#[test]
fn multicall_batch_roundtrip() {
    let calls = vec![
        Call::new("pow").arg(2).arg(4),
        Call::new("add").arg(2).arg(4),
        Call::new("event").arg("SeePusher").arg(true),
        Call::new("doesn't exist"),
    ];

    let batch = Value::Array(calls.iter().map(Call::to_value).collect());
    let decoded: Vec<Call> = match batch {
        Value::Array(ref entries) => entries
            .iter()
            .map(|entry| Call::from_value(entry).expect("entry did not decode"))
            .collect(),
        _ => unreachable!(),
    };

    assert_eq!(decoded, calls);
}

#[test]
fn sample_sum_roundtrip() {
    let call = Call::new("sample.sum").arg(17).arg(13);

    let parsed = parse_call(&mut call.xml_string().as_bytes()).unwrap();
    assert_eq!(parsed.method_name(), "sample.sum");
    assert_eq!(parsed.params(), &[Value::Int(17), Value::Int(13)]);
}

#[test]
fn call_roundtrip() {
    let call = Call::new("examples.getStateName").arg(41);
    let xml = call.xml_string();

    let parsed = parse_call(&mut xml.as_bytes()).unwrap();
    assert_eq!(parsed, call);
    assert_eq!(parsed.xml_string(), xml);
}

#[test]
fn response_roundtrip() {
    let response = Response::Value(Value::from("South Dakota"));
    let xml = response.xml_string();

    let parsed = parse_response(&mut xml.as_bytes()).unwrap();
    assert_eq!(parsed, response);
    assert_eq!(parsed.xml_string(), xml);
}

#[test]
fn nested_call_roundtrip() {
    let mut entry = HashMap::new();
    entry.insert("key".to_string(), Value::from("value"));
    let call = Call::new("register")
        .arg(true)
        .arg(vec![Value::Struct(entry)]);

    let parsed = parse_call(&mut call.xml_string().as_bytes()).unwrap();
    assert_eq!(parsed, call);
}

#[test]
fn scalar_roundtrip() {
    let call = Call::new("everything")
        .arg(-42)
        .arg(1.25)
        .arg(false)
        .arg("it's <XML> & \"friends\"")
        .arg(Value::DateTime("19980717T14:08:55".to_string()))
        .arg(Value::Base64(b"\x00\x01binary".to_vec()));

    let parsed = parse_call(&mut call.xml_string().as_bytes()).unwrap();
    assert_eq!(parsed, call);
}

#[test]
fn fault_roundtrip() {
    let response = Response::Fault(Fault::new(404, "missing"));
    let xml = response.xml_string();

    let parsed = parse_response(&mut xml.as_bytes()).unwrap();
    assert_eq!(parsed, response);
    assert_eq!(parsed.fault().map(Fault::code), Some(404));
}

#[test]
fn malformed_fault_yields_sentinel() {
    // A fault whose struct lacks faultCode still parses into a usable
    // response with a reserved negative code instead of failing outright.
    let xml = r#"<?xml version="1.0"?>
<methodResponse><fault><value><struct>
<member><name>faultMessage</name><value>whoops</value></member>
</struct></value></fault></methodResponse>"#;

    let response = parse_response(&mut xml.as_bytes()).unwrap();
    let fault = response.fault().expect("expected a fault");
    assert!(fault.code() < 0);
}
