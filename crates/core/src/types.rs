/// Document identifiers are opaque strings: server generated, or a
/// well-known name such as `profile` or `theme`.
pub type DocId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
