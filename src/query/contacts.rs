//! Recipient search over saved contacts

/// Shortest query that triggers a search
pub const MIN_CONTACT_QUERY_LEN: usize = 2;

/// Contacts whose name contains `query`, case-insensitively.
///
/// Queries shorter than [`MIN_CONTACT_QUERY_LEN`] characters return nothing.
pub fn search_contacts(contacts: &[String], query: &str) -> Vec<String> {
    if query.chars().count() < MIN_CONTACT_QUERY_LEN {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    contacts
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
