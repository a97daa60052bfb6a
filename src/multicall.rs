//! The `system.multicall` convention: calls and responses as plain values.
//!
//! Batching encodes each call as a `{ methodName, params }` struct inside an
//! array parameter of one enclosing `system.multicall` call. Each entry of
//! the result array is either a fault struct or a one-element array wrapping
//! the result value; the wrapping keeps a struct-valued result
//! distinguishable from a fault.

use crate::call::Call;
use crate::coerce::FromValue;
use crate::fault::Fault;
use crate::response::Response;
use crate::value::Value;

use log::error;

use std::collections::HashMap;

impl Call {
    /// Encodes this call as its `{ methodName, params }` struct form.
    pub fn to_value(&self) -> Value {
        let mut members = HashMap::new();
        members.insert(
            "methodName".to_string(),
            Value::String(self.method_name.clone()),
        );
        members.insert("params".to_string(), Value::Array(self.params.clone()));

        Value::Struct(members)
    }

    /// Decodes a call from its `{ methodName, params }` struct form.
    ///
    /// Consumption is tolerant: a missing or `Nil` `params` member means no
    /// parameters, and a `params` that is neither of those nor an array is
    /// taken as the single parameter. A missing `methodName` is a decode
    /// failure.
    pub fn from_value(value: &Value) -> Option<Call> {
        let members = match *value {
            Value::Struct(ref members) => members,
            _ => {
                error!("invalid call, not a struct: {}", value);
                return None;
            }
        };

        let method_name = match members.get("methodName").and_then(String::from_value) {
            Some(name) => name,
            None => {
                error!("invalid call, no method name: {}", value);
                return None;
            }
        };

        let params = match members.get("params") {
            Some(&Value::Array(ref elements)) => elements.clone(),
            Some(&Value::Nil) | None => Vec::new(),
            Some(single) => vec![single.clone()],
        };

        Some(Call {
            method_name,
            params,
        })
    }

    /// Builds the enclosing `system.multicall` call from a batch of calls.
    ///
    /// The batch becomes a single array parameter holding each call's struct
    /// form, in order.
    pub fn multicall<I>(calls: I) -> Call
    where
        I: IntoIterator<Item = Call>,
    {
        let batch: Vec<Value> = calls.into_iter().map(|call| call.to_value()).collect();

        Call::new("system.multicall").arg(Value::Array(batch))
    }
}

impl Response {
    /// Encodes this response for a multicall result array: faults as their
    /// struct form, values wrapped into a one-element array.
    pub fn to_value(&self) -> Value {
        match *self {
            Response::Fault(ref fault) => fault.to_value(),
            Response::Value(ref value) => Value::Array(vec![value.clone()]),
        }
    }

    /// Decodes a multicall result: a struct is a fault, a one-element array
    /// is a value. Anything else is a decode failure.
    pub fn from_value(value: &Value) -> Option<Response> {
        match *value {
            Value::Struct(_) => match Fault::from_value(value) {
                Some(fault) => Some(Response::Fault(fault)),
                None => {
                    error!("invalid multicall fault: {}", value);
                    None
                }
            },
            Value::Array(ref elements) if elements.len() == 1 => {
                Some(Response::Value(elements[0].clone()))
            }
            _ => {
                error!("invalid multicall response: {}", value);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_calls_in_order() {
        let calls = vec![
            Call::new("pow").arg(2).arg(4),
            Call::new("add").arg(2).arg(4),
            Call::new("doesn't exist"),
        ];

        let multicall = Call::multicall(calls.clone());
        assert_eq!(multicall.method_name(), "system.multicall");
        assert_eq!(multicall.params().len(), 1);

        let batch = match multicall[0] {
            Value::Array(ref batch) => batch,
            ref other => panic!("expected an array parameter, got {:?}", other),
        };
        let decoded: Vec<Call> = batch
            .iter()
            .map(|entry| Call::from_value(entry).expect("entry did not decode"))
            .collect();
        assert_eq!(decoded, calls);
    }

    #[test]
    fn decodes_params_tolerantly() {
        let mut members = HashMap::new();
        members.insert("methodName".to_string(), Value::from("ping"));
        let call = Call::from_value(&Value::Struct(members.clone())).unwrap();
        assert_eq!(call.method_name(), "ping");
        assert_eq!(call.params(), &[]);

        members.insert("params".to_string(), Value::Nil);
        let call = Call::from_value(&Value::Struct(members.clone())).unwrap();
        assert_eq!(call.params(), &[]);

        // A scalar params is taken as the single parameter.
        members.insert("params".to_string(), Value::from(5));
        let call = Call::from_value(&Value::Struct(members.clone())).unwrap();
        assert_eq!(call.params(), &[Value::Int(5)]);

        members.remove("methodName");
        assert_eq!(Call::from_value(&Value::Struct(members)), None);
        assert_eq!(Call::from_value(&Value::from("ping")), None);
    }

    #[test]
    fn responses_roundtrip_as_values() {
        let value_response = Response::Value(Value::from(16));
        assert_eq!(
            value_response.to_value(),
            Value::Array(vec![Value::Int(16)])
        );
        assert_eq!(
            Response::from_value(&value_response.to_value()),
            Some(value_response)
        );

        let fault_response = Response::Fault(Fault::new(4, "nope"));
        assert_eq!(
            Response::from_value(&fault_response.to_value()),
            Some(fault_response)
        );
    }

    #[test]
    fn rejects_undecodable_responses() {
        // Only one-element arrays are value responses.
        assert_eq!(
            Response::from_value(&Value::Array(vec![Value::Int(1), Value::Int(2)])),
            None
        );
        assert_eq!(Response::from_value(&Value::from("bare")), None);
    }
}
