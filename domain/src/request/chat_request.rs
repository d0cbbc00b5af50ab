//! Outgoing chat request body.
//!
//! The host owns the request; we only read the `messages` array and rewrite
//! the terminal user turn. Every other field is carried through untouched
//! because the body is kept as a [`serde_json::Value`].

use super::role::Role;
use serde_json::Value;

/// Name of the array field holding the conversation turns.
pub const MESSAGES_FIELD: &str = "messages";

/// One turn as read from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    /// String content, or the compact JSON of non-string content.
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: impl Into<Role>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A request body whose last turn is a `user` turn with string content.
///
/// Construction through [`ChatRequestBody::parse`] is the shape check: any
/// body that does not qualify yields `None` and must be sent unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequestBody {
    root: Value,
}

impl ChatRequestBody {
    /// Parse a raw body, returning `None` unless it is a JSON object with a
    /// non-empty `messages` array whose last entry has `role == "user"` and
    /// string `content`.
    pub fn parse(raw: &str) -> Option<Self> {
        let root: Value = serde_json::from_str(raw).ok()?;
        let last = root.get(MESSAGES_FIELD)?.as_array()?.last()?;
        if last.get("role")?.as_str()? != "user" {
            return None;
        }
        last.get("content")?.as_str()?;
        Some(Self { root })
    }

    fn messages(&self) -> &[Value] {
        self.root
            .get(MESSAGES_FIELD)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Content of the terminal user turn.
    pub fn last_user_content(&self) -> &str {
        self.messages()
            .last()
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// All turns, in order.
    pub fn turns(&self) -> Vec<ChatTurn> {
        self.messages()
            .iter()
            .map(|m| {
                let role = m
                    .get("role")
                    .and_then(Value::as_str)
                    .map(Role::from)
                    .unwrap_or_else(|| Role::Other(String::new()));
                let content = match m.get("content") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                };
                ChatTurn { role, content }
            })
            .collect()
    }

    /// Replace the content of the terminal user turn.
    pub fn set_last_content(&mut self, content: impl Into<String>) {
        if let Some(last) = self
            .root
            .get_mut(MESSAGES_FIELD)
            .and_then(Value::as_array_mut)
            .and_then(|messages| messages.last_mut())
            && let Some(obj) = last.as_object_mut()
        {
            obj.insert("content".to_string(), Value::String(content.into()));
        }
    }

    /// Serialize back to a request body.
    pub fn to_body(&self) -> String {
        self.root.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_qualifying_body() {
        let raw = json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hello"}
            ]
        })
        .to_string();

        let body = ChatRequestBody::parse(&raw).unwrap();
        assert_eq!(body.last_user_content(), "hello");
        assert_eq!(body.turns().len(), 2);
        assert_eq!(body.turns()[0].role, Role::System);
    }

    #[test]
    fn test_non_qualifying_bodies() {
        let cases = [
            "not json".to_string(),
            json!({"prompt": "hi"}).to_string(),
            json!({"messages": "hi"}).to_string(),
            json!({"messages": []}).to_string(),
            json!({"messages": [{"role": "assistant", "content": "hi"}]}).to_string(),
            json!({"messages": [{"role": "user", "content": [{"type": "text", "text": "hi"}]}]})
                .to_string(),
            json!({"messages": [{"role": "user"}]}).to_string(),
            json!([1, 2, 3]).to_string(),
        ];
        for raw in cases {
            assert!(ChatRequestBody::parse(&raw).is_none(), "accepted: {}", raw);
        }
    }

    #[test]
    fn test_rewrite_preserves_other_fields() {
        let raw = json!({
            "model": "gpt-4o",
            "stream": true,
            "threadId": "abc",
            "messages": [
                {"role": "assistant", "content": "hey", "id": "m1"},
                {"role": "user", "content": "hello", "id": "m2"}
            ]
        })
        .to_string();

        let mut body = ChatRequestBody::parse(&raw).unwrap();
        body.set_last_content("rewritten");

        let out: Value = serde_json::from_str(&body.to_body()).unwrap();
        assert_eq!(out["model"], "gpt-4o");
        assert_eq!(out["stream"], true);
        assert_eq!(out["threadId"], "abc");
        assert_eq!(out["messages"][0]["content"], "hey");
        assert_eq!(out["messages"][1]["content"], "rewritten");
        assert_eq!(out["messages"][1]["id"], "m2");
    }

    #[test]
    fn test_non_string_history_content_is_rendered_as_json() {
        let raw = json!({
            "messages": [
                {"role": "assistant", "content": [{"type": "text", "text": "a"}]},
                {"role": "user", "content": "b"}
            ]
        })
        .to_string();
        let body = ChatRequestBody::parse(&raw).unwrap();
        assert_eq!(body.turns()[0].content, r#"[{"text":"a","type":"text"}]"#);
    }
}
