//! XML-RPC wire format.
//!
//! Encodes `<methodCall>` documents and decodes `<methodResponse>` documents
//! into [`RpcValue`]s. Faults decode to [`RpcError::Fault`].

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDateTime;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::clients::rpc::value::DATETIME_FORMAT;
use crate::clients::rpc::{RpcError, RpcFault, RpcValue};

/// Date-time layouts accepted when decoding, in order of preference.
const DATETIME_LAYOUTS: [&str; 3] = [DATETIME_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y%m%dT%H%M%S"];

/// Encodes a `<methodCall>` document.
#[must_use]
pub fn encode_call(method: &str, params: &[RpcValue]) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><methodCall><methodName>"#);
    xml.push_str(&escape(method));
    xml.push_str("</methodName><params>");
    for param in params {
        xml.push_str("<param>");
        write_value(&mut xml, param);
        xml.push_str("</param>");
    }
    xml.push_str("</params></methodCall>");
    xml
}

fn write_value(xml: &mut String, value: &RpcValue) {
    xml.push_str("<value>");
    match value {
        RpcValue::Nil => xml.push_str("<nil/>"),
        RpcValue::Bool(b) => {
            xml.push_str("<boolean>");
            xml.push_str(if *b { "1" } else { "0" });
            xml.push_str("</boolean>");
        }
        RpcValue::Int(i) => {
            // <int> is 32-bit on the wire.
            let tag = if i32::try_from(*i).is_ok() { "int" } else { "i8" };
            xml.push_str(&format!("<{tag}>{i}</{tag}>"));
        }
        // NaN and infinities have no XML-RPC spelling; send them as nil.
        RpcValue::Double(d) if !d.is_finite() => xml.push_str("<nil/>"),
        RpcValue::Double(d) => xml.push_str(&format!("<double>{d}</double>")),
        RpcValue::String(s) => {
            xml.push_str("<string>");
            xml.push_str(&escape(s.as_str()));
            xml.push_str("</string>");
        }
        RpcValue::DateTime(dt) => xml.push_str(&format!(
            "<dateTime.iso8601>{}</dateTime.iso8601>",
            dt.format(DATETIME_FORMAT)
        )),
        RpcValue::Base64(bytes) => {
            xml.push_str("<base64>");
            xml.push_str(&STANDARD.encode(bytes));
            xml.push_str("</base64>");
        }
        RpcValue::Array(items) => {
            xml.push_str("<array><data>");
            for item in items {
                write_value(xml, item);
            }
            xml.push_str("</data></array>");
        }
        RpcValue::Struct(members) => {
            xml.push_str("<struct>");
            for (name, member) in members {
                xml.push_str("<member><name>");
                xml.push_str(&escape(name.as_str()));
                xml.push_str("</name>");
                write_value(xml, member);
                xml.push_str("</member>");
            }
            xml.push_str("</struct>");
        }
    }
    xml.push_str("</value>");
}

/// Decodes a `<methodResponse>` document.
///
/// # Errors
///
/// Returns [`RpcError::Fault`] if the response is a fault, and
/// [`RpcError::MalformedResponse`] if the document is not valid XML-RPC.
pub fn decode_response(xml: &str) -> Result<RpcValue, RpcError> {
    let root = parse_document(xml)?;
    if root.name != "methodResponse" {
        return Err(malformed(format!(
            "expected <methodResponse>, found <{}>",
            root.name
        )));
    }

    if let Some(fault) = root.child("fault") {
        let value = decode_value(require(fault, "value")?)?;
        return Err(RpcError::Fault(RpcFault {
            code: value
                .get("faultCode")
                .and_then(RpcValue::as_i64)
                .unwrap_or_default(),
            message: value
                .get("faultString")
                .and_then(RpcValue::as_str)
                .unwrap_or_default()
                .to_string(),
        }));
    }

    let params = require(&root, "params")?;
    let param = require(params, "param")?;
    decode_value(require(param, "value")?)
}

/// A parsed XML element. Text is kept untrimmed.
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn named(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            ..Self::default()
        }
    }

    fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }
}

fn malformed(reason: impl Into<String>) -> RpcError {
    RpcError::MalformedResponse {
        reason: reason.into(),
    }
}

fn require<'a>(element: &'a Element, name: &str) -> Result<&'a Element, RpcError> {
    element
        .child(name)
        .ok_or_else(|| malformed(format!("missing <{name}> in <{}>", element.name)))
}

fn parse_document(xml: &str) -> Result<Element, RpcError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| malformed(format!("invalid XML: {e}")))?;

        match event {
            Event::Start(start) => stack.push(Element::named(&start)),
            Event::Empty(start) => attach(&mut stack, &mut root, Element::named(&start))?,
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("unbalanced end tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    let text = text
                        .unescape()
                        .map_err(|e| malformed(format!("invalid text: {e}")))?;
                    top.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed("unexpected end of document"));
    }
    root.ok_or_else(|| malformed("empty document"))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), RpcError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(malformed("multiple root elements"))
    }
}

fn decode_value(element: &Element) -> Result<RpcValue, RpcError> {
    let Some(typed) = element.children.first() else {
        return Ok(RpcValue::String(element.text.clone()));
    };
    let text = typed.text.trim();

    match typed.name.as_str() {
        "int" | "i4" | "i8" => text
            .parse()
            .map(RpcValue::Int)
            .map_err(|_| malformed(format!("invalid integer {text:?}"))),
        "boolean" => match text {
            "1" | "true" => Ok(RpcValue::Bool(true)),
            "0" | "false" => Ok(RpcValue::Bool(false)),
            other => Err(malformed(format!("invalid boolean {other:?}"))),
        },
        "double" => text
            .parse()
            .map(RpcValue::Double)
            .map_err(|_| malformed(format!("invalid double {text:?}"))),
        "string" => Ok(RpcValue::String(typed.text.clone())),
        "dateTime.iso8601" => DATETIME_LAYOUTS
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
            .map(RpcValue::DateTime)
            .ok_or_else(|| malformed(format!("invalid dateTime.iso8601 {text:?}"))),
        "base64" => {
            let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            STANDARD
                .decode(compact)
                .map(RpcValue::Base64)
                .map_err(|e| malformed(format!("invalid base64: {e}")))
        }
        "nil" => Ok(RpcValue::Nil),
        "array" => require(typed, "data")?
            .children_named("value")
            .map(decode_value)
            .collect::<Result<Vec<_>, _>>()
            .map(RpcValue::Array),
        "struct" => {
            let mut members = BTreeMap::new();
            for member in typed.children_named("member") {
                let name = require(member, "name")?.text.clone();
                let value = decode_value(require(member, "value")?)?;
                members.insert(name, value);
            }
            Ok(RpcValue::Struct(members))
        }
        other => Err(malformed(format!("unknown value type <{other}>"))),
    }
}
