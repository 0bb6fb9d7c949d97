//! Module for handling the [`percent_encoding`] crate.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// All ASCII characters escaped by the WHATWG
/// [`application/x-www-form-urlencoded` serializer](https://url.spec.whatwg.org/#urlencoded-serializing).
///
/// Using this with [`utf8_percent_encode`] (plus writing spaces as `+`) gives
/// identical results to JavaScript's
/// [`URLSearchParams`](https://developer.mozilla.org/docs/Web/API/URLSearchParams/toString).
const WWW_FORM_URLENCODED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b' ')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*');

/// Flattens form fields into an `application/x-www-form-urlencoded` body:
/// `key=value` pairs joined by `&`, in the map's (sorted) key order.
pub(crate) fn encode_pairs(pairs: &BTreeMap<String, String>) -> String {
    let mut body = String::new();

    for (key, value) in pairs {
        if !body.is_empty() {
            body.push('&');
        }

        body.push_str(&encode_component(key));
        body.push('=');
        body.push_str(&encode_component(value));
    }

    body
}

/// Percent-encodes one key or value per [`WWW_FORM_URLENCODED`], writing
/// spaces as `+`.
fn encode_component(component: &str) -> String {
    utf8_percent_encode(component, WWW_FORM_URLENCODED)
        .to_string()
        .replace(' ', "+")
}
