//! Collection name sanitization for MongoDB compatibility.
//!
//! Partitioned collection names are built from caller-supplied partition keys,
//! which may contain characters MongoDB reserves in namespaces.

/// Replaces characters MongoDB does not accept in collection names.
///
/// - Dots (`.`) separate the database from the collection in a namespace
/// - Dollar signs (`$`) are reserved for system collections
/// - Null bytes (`\0`) terminate names
pub(crate) struct NameSanitizer;

impl NameSanitizer {
    const REPLACEMENTS: [(&'static str, &'static str); 3] = [
        (".", "__dot__"),
        ("$", "__dollar__"),
        ("\0", "__null__"),
    ];

    /// Sanitizes a name by replacing problematic characters with escaped versions.
    pub(crate) fn sanitize(input: &str) -> String {
        let mut sanitized = input.to_string();
        for (target, replacement) in Self::REPLACEMENTS.iter() {
            sanitized = sanitized.replace(*target, *replacement);
        }
        sanitized
    }
}
