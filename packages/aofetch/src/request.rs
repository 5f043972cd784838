//! Request encoder: route, verb, and body fields into wire tags.

use crate::types::{
    Body, Method, Tag, ACTION_CALL_ROUTE, BODY_TAG_PREFIX, TAG_ACTION, TAG_METHOD, TAG_ROUTE,
};

/// Encodes a route call as the ordered tag sequence the remote process
/// expects: the action marker, the route, the verb, then one `X-Body-<key>`
/// tag per body field in map iteration order.
///
/// Values are coerced to their canonical string form; there is no further
/// escaping, the wire format assumes plain string tag values.
pub fn encode_route_call(route: &str, method: Method, body: &Body) -> Vec<Tag> {
    let mut tags = vec![
        Tag::new(TAG_ACTION, ACTION_CALL_ROUTE),
        Tag::new(TAG_ROUTE, route),
        Tag::new(TAG_METHOD, method.as_str()),
    ];

    for (key, value) in body {
        tags.push(Tag::new(
            format!("{}{}", BODY_TAG_PREFIX, key),
            value.to_string(),
        ));
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BodyValue;

    #[test]
    fn emits_marker_route_and_method_in_order() {
        let tags = encode_route_call("/name", Method::GET, &Body::new());
        assert_eq!(
            tags,
            vec![
                Tag::new("Action", "Call-Route"),
                Tag::new("Route", "/name"),
                Tag::new("Method", "GET"),
            ]
        );
    }

    #[test]
    fn body_fields_become_prefixed_tags() {
        let mut body = Body::new();
        body.insert("name".to_string(), BodyValue::from("bob"));
        body.insert("count".to_string(), BodyValue::from(3i64));
        body.insert("flag".to_string(), BodyValue::from(true));

        let tags = encode_route_call("/users", Method::POST, &body);

        // Fixed tags first, then body fields sorted by key.
        assert_eq!(tags[2], Tag::new("Method", "POST"));
        assert_eq!(
            &tags[3..],
            &[
                Tag::new("X-Body-count", "3"),
                Tag::new("X-Body-flag", "true"),
                Tag::new("X-Body-name", "bob"),
            ]
        );
    }

    #[test]
    fn empty_body_adds_no_tags() {
        let tags = encode_route_call("/", Method::POST, &Body::new());
        assert_eq!(tags.len(), 3);
    }
}
