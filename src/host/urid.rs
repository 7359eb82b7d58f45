//! URI ↔ numeric ID registry.
//!
//! Plugins identify URIs by small integers (URIDs). A host owns one registry
//! and hands it to whatever needs mapping, rather than sharing a process-wide
//! table. Once assigned, an ID stays bound to its URI for the registry's
//! lifetime.

use std::collections::HashMap;

pub type Urid = u32;

#[derive(Debug, Default)]
pub struct UridMap {
    ids: HashMap<String, Urid>,
    // uris[id - 1]
    uris: Vec<String>,
}

impl UridMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// ID for `uri`, assigning the next free one on first sight. IDs start at 1;
    /// 0 is never a valid URID.
    pub fn uri_to_id(&mut self, uri: &str) -> Urid {
        if let Some(&id) = self.ids.get(uri) {
            return id;
        }

        self.uris.push(uri.to_owned());
        let id = self.uris.len() as Urid;
        self.ids.insert(uri.to_owned(), id);
        id
    }

    /// URI previously mapped to `id`.
    pub fn id_to_uri(&self, id: Urid) -> Option<&str> {
        let index = (id as usize).checked_sub(1)?;
        self.uris.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATOM_INT: &str = "http://lv2plug.in/ns/ext/atom#Int";
    const ATOM_FLOAT: &str = "http://lv2plug.in/ns/ext/atom#Float";

    #[test]
    fn ids_start_at_one_and_are_stable() {
        let mut map = UridMap::new();
        let int = map.uri_to_id(ATOM_INT);
        let float = map.uri_to_id(ATOM_FLOAT);

        assert_eq!(int, 1);
        assert_eq!(float, 2);
        assert_eq!(map.uri_to_id(ATOM_INT), int);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn unmap_inverts_map() {
        let mut map = UridMap::new();
        let id = map.uri_to_id(ATOM_FLOAT);
        assert_eq!(map.id_to_uri(id), Some(ATOM_FLOAT));
    }

    #[test]
    fn unknown_ids_unmap_to_none() {
        let mut map = UridMap::new();
        map.uri_to_id(ATOM_INT);
        assert_eq!(map.id_to_uri(0), None);
        assert_eq!(map.id_to_uri(2), None);
    }
}
