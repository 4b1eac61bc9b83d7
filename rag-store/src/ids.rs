use uuid::Uuid;

/// Deterministic UUIDv5 from an arbitrary string id.
pub fn stable_uuid(id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, id.as_bytes())
}

/// Point id for a contract pair; the same pair always lands on the same point.
pub fn pair_point_id(pair_id: &str) -> String {
    stable_uuid(&format!("pair|{pair_id}")).to_string()
}

/// Point id for an ad-hoc document, derived from its text.
pub fn text_point_id(text: &str) -> String {
    stable_uuid(&format!("doc|{text}")).to_string()
}
